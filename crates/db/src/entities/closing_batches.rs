//! `SeaORM` Entity for closing_batches table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "closing_batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub batch_type: String,
    pub company_code: String,
    pub fiscal_year: i32,
    pub period: i32,
    pub ledger: String,
    #[sea_orm(unique)]
    pub batch_code: String,
    pub posted_by: String,
    pub posted_at: DateTimeUtc,
    pub status: String,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub total_debit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub total_credit: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::closing_batch_lines::Entity")]
    ClosingBatchLines,
}

impl Related<super::closing_batch_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClosingBatchLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

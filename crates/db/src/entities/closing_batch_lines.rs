//! `SeaORM` Entity for closing_batch_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "closing_batch_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub batch_id: Uuid,
    pub line_no: i32,
    pub account_code: String,
    pub account_name: String,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub debit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub credit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub balance: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::closing_batches::Entity",
        from = "Column::BatchId",
        to = "super::closing_batches::Column::Id",
        on_delete = "Cascade"
    )]
    ClosingBatches,
}

impl Related<super::closing_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClosingBatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! `SeaORM` Entity for closing_status table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "closing_status")]
#[allow(clippy::struct_excessive_bools)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_code: String,
    pub fiscal_year: i32,
    pub period: i32,
    pub ledger: String,
    pub period_closed: bool,
    pub gl_closed: bool,
    pub tb_closed: bool,
    pub pnl_closed: bool,
    pub equity_closed: bool,
    pub fs_closed: bool,
    pub fy_opened: bool,
    pub closed_by: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

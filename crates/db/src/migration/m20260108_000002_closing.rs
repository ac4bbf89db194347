//! Closing schema: per-scope milestone status and immutable batches.

use sea_orm_migration::prelude::*;

use super::{MONEY_PRECISION, MONEY_SCALE};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClosingStatus::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ClosingStatus::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ClosingStatus::CompanyCode).string_len(16).not_null())
                    .col(ColumnDef::new(ClosingStatus::FiscalYear).integer().not_null())
                    .col(ColumnDef::new(ClosingStatus::Period).integer().not_null())
                    .col(ColumnDef::new(ClosingStatus::Ledger).string_len(8).not_null())
                    .col(flag(ClosingStatus::PeriodClosed))
                    .col(flag(ClosingStatus::GlClosed))
                    .col(flag(ClosingStatus::TbClosed))
                    .col(flag(ClosingStatus::PnlClosed))
                    .col(flag(ClosingStatus::EquityClosed))
                    .col(flag(ClosingStatus::FsClosed))
                    .col(flag(ClosingStatus::FyOpened))
                    .col(ColumnDef::new(ClosingStatus::ClosedBy).string())
                    .col(
                        ColumnDef::new(ClosingStatus::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClosingStatus::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_closing_status_scope")
                    .table(ClosingStatus::Table)
                    .col(ClosingStatus::CompanyCode)
                    .col(ClosingStatus::FiscalYear)
                    .col(ClosingStatus::Period)
                    .col(ClosingStatus::Ledger)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClosingBatches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ClosingBatches::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ClosingBatches::BatchType).string_len(16).not_null())
                    .col(ColumnDef::new(ClosingBatches::CompanyCode).string_len(16).not_null())
                    .col(ColumnDef::new(ClosingBatches::FiscalYear).integer().not_null())
                    .col(ColumnDef::new(ClosingBatches::Period).integer().not_null())
                    .col(ColumnDef::new(ClosingBatches::Ledger).string_len(8).not_null())
                    .col(
                        ColumnDef::new(ClosingBatches::BatchCode)
                            .string_len(96)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ClosingBatches::PostedBy).string().not_null())
                    .col(
                        ColumnDef::new(ClosingBatches::PostedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClosingBatches::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(ClosingBatches::TotalDebit)
                            .decimal_len(MONEY_PRECISION, MONEY_SCALE)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClosingBatches::TotalCredit)
                            .decimal_len(MONEY_PRECISION, MONEY_SCALE)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_closing_batches_scope")
                    .table(ClosingBatches::Table)
                    .col(ClosingBatches::CompanyCode)
                    .col(ClosingBatches::FiscalYear)
                    .col(ClosingBatches::Period)
                    .col(ClosingBatches::Ledger)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClosingBatchLines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClosingBatchLines::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClosingBatchLines::BatchId).uuid().not_null())
                    .col(ColumnDef::new(ClosingBatchLines::LineNo).integer().not_null())
                    .col(
                        ColumnDef::new(ClosingBatchLines::AccountCode)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClosingBatchLines::AccountName).string().not_null())
                    .col(amount(ClosingBatchLines::Debit))
                    .col(amount(ClosingBatchLines::Credit))
                    .col(amount(ClosingBatchLines::Balance))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_closing_batch_lines_batch")
                            .from(ClosingBatchLines::Table, ClosingBatchLines::BatchId)
                            .to(ClosingBatches::Table, ClosingBatches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClosingBatchLines::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClosingBatches::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClosingStatus::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

fn flag(column: ClosingStatus) -> ColumnDef {
    ColumnDef::new(column)
        .boolean()
        .not_null()
        .default(false)
        .to_owned()
}

fn amount(column: ClosingBatchLines) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(MONEY_PRECISION, MONEY_SCALE)
        .not_null()
        .default(0)
        .to_owned()
}

#[derive(DeriveIden, Clone, Copy)]
enum ClosingStatus {
    Table,
    Id,
    CompanyCode,
    FiscalYear,
    Period,
    Ledger,
    PeriodClosed,
    GlClosed,
    TbClosed,
    PnlClosed,
    EquityClosed,
    FsClosed,
    FyOpened,
    ClosedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClosingBatches {
    Table,
    Id,
    BatchType,
    CompanyCode,
    FiscalYear,
    Period,
    Ledger,
    BatchCode,
    PostedBy,
    PostedAt,
    Status,
    TotalDebit,
    TotalCredit,
}

#[derive(DeriveIden, Clone, Copy)]
enum ClosingBatchLines {
    Table,
    Id,
    BatchId,
    LineNo,
    AccountCode,
    AccountName,
    Debit,
    Credit,
    Balance,
}

//! Journal schema: chart of accounts, entries, lines, receivable invoices.

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
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::AccountCode)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::AccountName).string().not_null())
                    .col(ColumnDef::new(Accounts::AccountLevel).integer().not_null())
                    .col(ColumnDef::new(Accounts::AccountType).string_len(16).not_null())
                    .col(ColumnDef::new(Accounts::ParentAccount).string_len(32))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalEntries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JournalEntries::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(JournalEntries::EntryDate).date().not_null())
                    .col(ColumnDef::new(JournalEntries::Period).string_len(7).not_null())
                    .col(ColumnDef::new(JournalEntries::Description).text().not_null())
                    .col(ColumnDef::new(JournalEntries::Origin).string_len(32).not_null())
                    .col(ColumnDef::new(JournalEntries::OriginId).string_len(64))
                    .col(
                        ColumnDef::new(JournalEntries::Reversed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(JournalEntries::ReversalEntryId).uuid())
                    .col(ColumnDef::new(JournalEntries::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(JournalEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // NULL origin_id (manual entries) is never considered a duplicate.
        manager
            .create_index(
                Index::create()
                    .name("ux_journal_entries_origin")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::Origin)
                    .col(JournalEntries::OriginId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entries_entry_date")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::EntryDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entries_reversal_entry")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::ReversalEntryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalLines::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JournalLines::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(JournalLines::EntryId).uuid().not_null())
                    .col(ColumnDef::new(JournalLines::LineNo).integer().not_null())
                    .col(ColumnDef::new(JournalLines::AccountCode).string_len(32).not_null())
                    .col(ColumnDef::new(JournalLines::AccountName).string().not_null())
                    .col(
                        ColumnDef::new(JournalLines::Debit)
                            .decimal_len(MONEY_PRECISION, MONEY_SCALE)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(JournalLines::Credit)
                            .decimal_len(MONEY_PRECISION, MONEY_SCALE)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(JournalLines::Description).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_journal_lines_entry")
                            .from(JournalLines::Table, JournalLines::EntryId)
                            .to(JournalEntries::Table, JournalEntries::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_journal_lines_entry")
                    .table(JournalLines::Table)
                    .col(JournalLines::EntryId)
                    .col(JournalLines::LineNo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SourceInvoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SourceInvoices::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SourceInvoices::Counterparty).string().not_null())
                    .col(
                        ColumnDef::new(SourceInvoices::Total)
                            .decimal_len(MONEY_PRECISION, MONEY_SCALE)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SourceInvoices::IssuedOn).date().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SourceInvoices::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JournalLines::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JournalEntries::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    AccountCode,
    AccountName,
    AccountLevel,
    AccountType,
    ParentAccount,
}

#[derive(DeriveIden)]
enum JournalEntries {
    Table,
    Id,
    EntryDate,
    Period,
    Description,
    Origin,
    OriginId,
    Reversed,
    ReversalEntryId,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum JournalLines {
    Table,
    Id,
    EntryId,
    LineNo,
    AccountCode,
    AccountName,
    Debit,
    Credit,
    Description,
}

#[derive(DeriveIden)]
enum SourceInvoices {
    Table,
    Id,
    Counterparty,
    Total,
    IssuedOn,
}

//! Initial schema migration.
//!
//! - `users`: basic-auth accounts; the username is the owner id
//! - `groups`: income/expense buckets, one name per owner
//! - `categories`: subdivisions of a group, one name per owner
//! - `cashes`: money entries booked under a category
//!
//! The parent foreign keys restrict deletion, so a group with categories or
//! a category with cash entries can never disappear from under its children.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum Groups {
    Table,
    Id,
    Name,
    Abbr,
    Flow,
    OwnerId,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    Abbr,
    Flow,
    GroupId,
    OwnerId,
}

#[derive(Iden)]
enum Cashes {
    Table,
    Id,
    Name,
    ValueCents,
    CreatedAt,
    CategoryId,
    OwnerId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Groups
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Groups::Name).string().not_null())
                    .col(ColumnDef::new(Groups::Abbr).string().not_null())
                    .col(ColumnDef::new(Groups::Flow).string().not_null())
                    .col(ColumnDef::new(Groups::OwnerId).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-groups-owner_id-name-unique")
                    .table(Groups::Table)
                    .col(Groups::OwnerId)
                    .col(Groups::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Categories
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Abbr).string().not_null())
                    .col(ColumnDef::new(Categories::Flow).string().not_null())
                    .col(ColumnDef::new(Categories::GroupId).integer().not_null())
                    .col(ColumnDef::new(Categories::OwnerId).string().not_null())
                    // NO ACTION still refuses the delete; SQLite reports RESTRICT
                    // with an extended code that sea-orm does not classify.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-categories-group_id")
                            .from(Categories::Table, Categories::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-owner_id-name-unique")
                    .table(Categories::Table)
                    .col(Categories::OwnerId)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-group_id")
                    .table(Categories::Table)
                    .col(Categories::GroupId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Cash
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Cashes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cashes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cashes::Name).string().not_null())
                    .col(ColumnDef::new(Cashes::ValueCents).big_integer().not_null())
                    .col(ColumnDef::new(Cashes::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Cashes::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Cashes::OwnerId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cashes-category_id")
                            .from(Cashes::Table, Cashes::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cashes-category_id")
                    .table(Cashes::Table)
                    .col(Cashes::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cashes-owner_id")
                    .table(Cashes::Table)
                    .col(Cashes::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first
        manager
            .drop_table(Table::drop().table(Cashes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

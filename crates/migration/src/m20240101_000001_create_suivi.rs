//! Create `suivi` table.
//!
//! One row per logged work session. Every column is NOT NULL; no foreign
//! keys and no index beyond the primary key.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Suivi::Table)
                    .if_not_exists()
                    .col(pk_auto(Suivi::Id))
                    .col(date(Suivi::Date).not_null())
                    .col(time(Suivi::HeureDebut).not_null())
                    .col(time(Suivi::HeureFin).not_null())
                    .col(integer(Suivi::Duree).not_null())
                    .col(integer(Suivi::Km).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Suivi::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Suivi { Table, Id, Date, HeureDebut, HeureFin, Duree, Km }

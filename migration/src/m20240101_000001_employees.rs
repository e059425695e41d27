use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Name,
    NationalId,
    Department,
    Enabled,
}

const NATIONAL_ID_INDEX: &str = "idx_employees_national_id";
const DEPARTMENT_ENABLED_INDEX: &str = "idx_employees_department_enabled";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut id = ColumnDef::new(Employees::Id);
        // SQLite only auto-increments an `integer` primary key.
        match manager.get_database_backend() {
            DatabaseBackend::Sqlite => id.integer(),
            _ => id.big_integer(),
        };
        id.not_null().auto_increment().primary_key();

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(&mut id)
                    .col(ColumnDef::new(Employees::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Employees::NationalId)
                            .string_len(11)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::Department)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::Enabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(NATIONAL_ID_INDEX)
                    .table(Employees::Table)
                    .col(Employees::NationalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(DEPARTMENT_ENABLED_INDEX)
                    .table(Employees::Table)
                    .col(Employees::Department)
                    .col(Employees::Enabled)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Employees::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

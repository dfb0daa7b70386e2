//! Initial schema: companies, QMS types, applications and document templates.

use sea_orm_migration::{prelude::*, sea_orm::DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Companies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::Address).string().not_null())
                    .col(ColumnDef::new(Companies::ContactPerson).string().not_null())
                    .col(ColumnDef::new(Companies::Email).string().not_null())
                    .col(ColumnDef::new(Companies::Phone).string().not_null())
                    .col(ColumnDef::new(Companies::Industry).string().not_null())
                    .col(
                        ColumnDef::new(Companies::RegistrationNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Companies::Employees).integer().not_null())
                    .col(ColumnDef::new(Companies::Website).string().null())
                    .col(ColumnDef::new(Companies::Logo).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_companies_email")
                    .table(Companies::Table)
                    .col(Companies::Email)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("ix_companies_registration_number")
                    .table(Companies::Table)
                    .col(Companies::RegistrationNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QmsTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(QmsTypes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(QmsTypes::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_qms_types_name")
                    .table(QmsTypes::Table)
                    .col(QmsTypes::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Applications::QmsTypeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Applications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Applications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Applications::FormData).json_binary().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_company_id")
                            .from(Applications::Table, Applications::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_qms_type_id")
                            .from(Applications::Table, Applications::QmsTypeId)
                            .to(QmsTypes::Table, QmsTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_applications_company_id")
                    .table(Applications::Table)
                    .col(Applications::CompanyId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("ix_applications_qms_type_id")
                    .table(Applications::Table)
                    .col(Applications::QmsTypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Documents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Documents::Title).string().not_null())
                    .col(ColumnDef::new(Documents::QmsTypeId).uuid().not_null())
                    .col(ColumnDef::new(Documents::FilePath).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_qms_type_id")
                            .from(Documents::Table, Documents::QmsTypeId)
                            .to(QmsTypes::Table, QmsTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_documents_qms_type_id")
                    .table(Documents::Table)
                    .col(Documents::QmsTypeId)
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();
        match manager.get_database_backend() {
            DbBackend::Postgres => {
                db.execute_unprepared(POSTGRES_UPDATED_AT_FUNCTION_SQL)
                    .await?;
                db.execute_unprepared(POSTGRES_UPDATED_AT_TRIGGER_SQL).await?;
            }
            DbBackend::MySql => {
                db.execute_unprepared(MYSQL_UPDATED_AT_TRIGGER_SQL).await?;
            }
            // SQLite relies on the stamp written by the persistence layer
            DbBackend::Sqlite => {}
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        match manager.get_database_backend() {
            DbBackend::Postgres => {
                db.execute_unprepared(
                    "DROP TRIGGER IF EXISTS update_applications_updated_at ON applications",
                )
                .await?;
                db.execute_unprepared("DROP FUNCTION IF EXISTS update_updated_at_column()")
                    .await?;
            }
            DbBackend::MySql => {
                db.execute_unprepared("DROP TRIGGER IF EXISTS update_applications_updated_at")
                    .await?;
            }
            DbBackend::Sqlite => {}
        }

        manager
            .drop_table(Table::drop().table(Documents::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(Applications::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(QmsTypes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

const POSTGRES_UPDATED_AT_FUNCTION_SQL: &str = r"
CREATE OR REPLACE FUNCTION update_updated_at_column()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql
";

const POSTGRES_UPDATED_AT_TRIGGER_SQL: &str = r"
CREATE TRIGGER update_applications_updated_at
    BEFORE UPDATE ON applications
    FOR EACH ROW
    EXECUTE FUNCTION update_updated_at_column()
";

const MYSQL_UPDATED_AT_TRIGGER_SQL: &str = r"
CREATE TRIGGER update_applications_updated_at
    BEFORE UPDATE ON applications
    FOR EACH ROW
    SET NEW.updated_at = CURRENT_TIMESTAMP(6)
";

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    Name,
    Address,
    ContactPerson,
    Email,
    Phone,
    Industry,
    RegistrationNumber,
    Employees,
    Website,
    Logo,
}

#[derive(DeriveIden)]
enum QmsTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    CompanyId,
    QmsTypeId,
    CreatedAt,
    UpdatedAt,
    FormData,
}

#[derive(DeriveIden)]
enum Documents {
    Table,
    Id,
    Title,
    QmsTypeId,
    FilePath,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// No FOREIGN KEY clauses: sqlx enables enforcement on SQLite, and deleting a
// parent must leave its children in place. Relations live on the entities.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== ADMIN ==========
        manager
            .create_table(
                Table::create()
                    .table(Admin::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admin::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Admin::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ========== COMPANY ==========
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Company::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Company::CompanyName).string().not_null())
                    .col(
                        ColumnDef::new(Company::CompanyApiKey)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== LOCATION ==========
        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Location::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Location::CompanyId).integer().not_null())
                    .col(ColumnDef::new(Location::LocationName).string().not_null())
                    .col(ColumnDef::new(Location::LocationCountry).string().not_null())
                    .col(ColumnDef::new(Location::LocationCity).string().not_null())
                    .col(ColumnDef::new(Location::LocationMeta).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_location_company_id")
                    .table(Location::Table)
                    .col(Location::CompanyId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // ========== SENSOR ==========
        manager
            .create_table(
                Table::create()
                    .table(Sensor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sensor::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sensor::LocationId).integer().not_null())
                    .col(ColumnDef::new(Sensor::SensorName).string().not_null())
                    .col(ColumnDef::new(Sensor::SensorCategory).string().not_null())
                    .col(ColumnDef::new(Sensor::SensorMeta).string())
                    .col(
                        ColumnDef::new(Sensor::SensorApiKey)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sensor_location_id")
                    .table(Sensor::Table)
                    .col(Sensor::LocationId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // ========== SENSOR DATA ==========
        manager
            .create_table(
                Table::create()
                    .table(SensorData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SensorData::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SensorData::SensorId).integer().not_null())
                    .col(ColumnDef::new(SensorData::JsonData).json().not_null())
                    .col(ColumnDef::new(SensorData::Timestamp).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Range queries filter by sensor then timestamp
        manager
            .create_index(
                Index::create()
                    .name("idx_sensor_data_sensor_timestamp")
                    .table(SensorData::Table)
                    .col(SensorData::SensorId)
                    .col(SensorData::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SensorData::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sensor::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Location::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Company::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admin::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Admin {
    Table,
    Username,
    Password,
}

#[derive(DeriveIden)]
enum Company {
    Table,
    Id,
    CompanyName,
    CompanyApiKey,
}

#[derive(DeriveIden)]
enum Location {
    Table,
    Id,
    CompanyId,
    LocationName,
    LocationCountry,
    LocationCity,
    LocationMeta,
}

#[derive(DeriveIden)]
enum Sensor {
    Table,
    Id,
    LocationId,
    SensorName,
    SensorCategory,
    SensorMeta,
    SensorApiKey,
}

#[derive(DeriveIden)]
enum SensorData {
    Table,
    Id,
    SensorId,
    JsonData,
    Timestamp,
}

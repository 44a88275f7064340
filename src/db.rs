use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    Set,
};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::entity::admin;

/// Open the connection pool described by `config`.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}

/// Bring the schema up to date and make sure an operator account exists.
pub async fn prepare(db: &DatabaseConnection, config: &Config) -> Result<(), DbErr> {
    tracing::info!("Running migrations...");
    migration::Migrator::up(db, None).await?;
    tracing::info!("Migrations completed");

    seed_default_admin(db, &config.default_admin_username, &config.default_admin_password).await
}

/// Insert the default admin, but only into an empty `admin` table.
pub async fn seed_default_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<(), DbErr> {
    if admin::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    admin::ActiveModel {
        username: Set(username.to_string()),
        password: Set(password.to_string()),
    }
    .insert(db)
    .await?;

    tracing::warn!(username = %username, "Seeded default admin account; change its password");
    Ok(())
}

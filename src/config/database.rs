//! Database configuration module for Eko-Akort.
//!
//! Handles `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions via `Schema::create_table_from_entity`
//! so the schema always matches the Rust structs without manual SQL. Also
//! seeds the bespoke utility companies (with their discount-tier ladders) on
//! first run.

use crate::core::tiers::default_discount_tiers;
use crate::entities::{AppliedTip, Company, Consumption, Subscription, Tip, User, company};
use crate::errors::{Error, Result};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Schema, Set,
};
use tracing::info;

/// Gets the database URL from environment variable or returns default `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/eko_akort.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a default local file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Idempotent: existing tables are left untouched.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Company),
        schema.create_table_from_entity(Subscription),
        schema.create_table_from_entity(Consumption),
        schema.create_table_from_entity(Tip),
        schema.create_table_from_entity(AppliedTip),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    Ok(())
}

/// Seeds the four bespoke utility companies if the companies table is empty.
///
/// Their discount ladders are serialized from the same defaults the tier
/// resolver falls back to, so a fresh database and a missing ladder behave
/// identically.
pub async fn seed_default_companies(db: &DatabaseConnection) -> Result<()> {
    if Company::find().count(db).await? > 0 {
        return Ok(());
    }

    let seeds = [
        ("İSKİ", "ISKI", "water", true),
        ("TESKİ", "TESKI", "water", false),
        ("Enerjisa", "ENERJISA", "electricity", true),
        ("Aydem", "AYDEM", "electricity", false),
    ];

    for (name, code, utility, contracted) in seeds {
        let tiers = serde_json::to_string(&default_discount_tiers(name)).map_err(|e| {
            Error::Config {
                message: format!("Failed to serialize default tiers for {name}: {e}"),
            }
        })?;

        let model = company::ActiveModel {
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            utility_type: Set(utility.to_string()),
            discount_tiers: Set(tiers),
            is_contracted: Set(contracted),
            ..Default::default()
        };
        model.insert(db).await?;
    }

    info!("Seeded {} default companies", seeds.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CompanyModel, ConsumptionModel, SubscriptionModel, UserModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist if querying them succeeds
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<CompanyModel> = Company::find().limit(1).all(&db).await?;
        let _: Vec<SubscriptionModel> = Subscription::find().limit(1).all(&db).await?;
        let _: Vec<ConsumptionModel> = Consumption::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_default_companies() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        seed_default_companies(&db).await?;
        assert_eq!(Company::find().count(&db).await?, 4);

        // Second run must not duplicate
        seed_default_companies(&db).await?;
        assert_eq!(Company::find().count(&db).await?, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_seeded_ladders_parse_back() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        seed_default_companies(&db).await?;

        for model in Company::find().all(&db).await? {
            let tiers: Vec<crate::core::tiers::DiscountTier> =
                serde_json::from_str(&model.discount_tiers).map_err(|e| Error::Config {
                    message: e.to_string(),
                })?;
            assert_eq!(tiers.len(), 5);
            assert_eq!(tiers[0].min_points, 0);
        }

        Ok(())
    }
}

//! Shared test utilities for `EkoAkort`.
//!
//! This module provides common helper functions for setting up test databases,
//! creating test entities with sensible defaults, and building detached
//! fixtures for the pure calculators.

#![allow(clippy::unwrap_used)]

use crate::core::profile::{CompanyProfile, ConsumptionRecord, SubscriptionProfile, UtilityType};
use crate::core::tiers::DiscountTier;
use crate::entities;
use crate::errors::Result;
use chrono::{TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user in building 1 with zero points.
pub async fn create_test_user(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::user::Model> {
    create_user_in_building(db, name, 1).await
}

/// Creates a test user in a specific building.
pub async fn create_user_in_building(
    db: &DatabaseConnection,
    name: &str,
    building_id: i64,
) -> Result<entities::user::Model> {
    let model = entities::user::ActiveModel {
        name: Set(name.to_string()),
        apartment_number: Set("3".to_string()),
        building_id: Set(building_id),
        family_size: Set(2),
        monthly_points: Set(0),
        total_points: Set(0),
        monthly_tips_used: Set(0),
        tips_reset_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Builds a detached user row for the pure ranking functions.
#[must_use]
pub fn user_model(id: i64, name: &str, monthly_points: i64) -> entities::user::Model {
    entities::user::Model {
        id,
        name: name.to_string(),
        apartment_number: id.to_string(),
        building_id: 1,
        family_size: 2,
        monthly_points,
        total_points: monthly_points,
        monthly_tips_used: 0,
        tips_reset_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Creates a test company with an empty tier ladder (defaults apply).
pub async fn create_test_company(
    db: &DatabaseConnection,
    name: &str,
    utility_type: &str,
    is_contracted: bool,
) -> Result<entities::company::Model> {
    create_company_with_tiers(db, name, utility_type, is_contracted, "[]").await
}

/// Creates a test company with a raw tier-ladder column.
/// Use this to test malformed or custom ladders.
pub async fn create_company_with_tiers(
    db: &DatabaseConnection,
    name: &str,
    utility_type: &str,
    is_contracted: bool,
    discount_tiers: &str,
) -> Result<entities::company::Model> {
    let model = entities::company::ActiveModel {
        name: Set(name.to_string()),
        code: Set(name.to_uppercase().replace(' ', "_")),
        utility_type: Set(utility_type.to_string()),
        discount_tiers: Set(discount_tiers.to_string()),
        is_contracted: Set(is_contracted),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Creates an active test subscription linking a user to a company.
pub async fn create_test_subscription(
    db: &DatabaseConnection,
    user_id: i64,
    company: &entities::company::Model,
) -> Result<entities::subscription::Model> {
    let model = entities::subscription::ActiveModel {
        user_id: Set(user_id),
        company_id: Set(company.id),
        subscriber_no: Set(format!("{}-{user_id}", company.code)),
        utility_type: Set(company.utility_type.clone()),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Marks a subscription inactive.
pub async fn deactivate_subscription(db: &DatabaseConnection, subscription_id: i64) -> Result<()> {
    let sub = entities::Subscription::find_by_id(subscription_id)
        .one(db)
        .await?
        .unwrap();
    let mut active: entities::subscription::ActiveModel = sub.into();
    active.is_active = Set(false);
    active.update(db).await?;
    Ok(())
}

/// Sets up a complete test environment with one user and one active water
/// subscription. Returns (db, user, subscription).
pub async fn setup_with_subscription() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::subscription::Model,
)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "Ayşe").await?;
    let company = create_test_company(&db, "İSKİ", "water", false).await?;
    let sub = create_test_subscription(&db, user.id, &company).await?;
    Ok((db, user, sub))
}

/// Creates a test tip.
pub async fn create_test_tip(
    db: &DatabaseConnection,
    title: &str,
    difficulty: &str,
    points_reward: Option<i64>,
) -> Result<entities::tip::Model> {
    let model = entities::tip::ActiveModel {
        title: Set(title.to_string()),
        content: Set("Test tip content".to_string()),
        category: Set("general".to_string()),
        utility_type: Set("water".to_string()),
        estimated_savings: Set(5.0),
        difficulty: Set(difficulty.to_string()),
        points_reward: Set(points_reward),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Detached water subscription profile served by İSKİ, default ladder.
#[must_use]
pub fn water_profile(id: i64) -> SubscriptionProfile {
    SubscriptionProfile {
        id,
        utility_type: UtilityType::Water,
        company: CompanyProfile {
            id: id + 100,
            name: "İSKİ".to_string(),
            code: "ISKI".to_string(),
            is_contracted: false,
            tiers: Vec::new(),
        },
    }
}

/// Detached electricity subscription profile served by Aydem, default ladder.
#[must_use]
pub fn electricity_profile(id: i64) -> SubscriptionProfile {
    SubscriptionProfile {
        id,
        utility_type: UtilityType::Electricity,
        company: CompanyProfile {
            id: id + 100,
            name: "Aydem".to_string(),
            code: "AYDEM".to_string(),
            is_contracted: false,
            tiers: Vec::new(),
        },
    }
}

/// Detached water profile with a custom company.
#[must_use]
pub fn profile_with_company(
    id: i64,
    company_name: &str,
    is_contracted: bool,
    tiers: Vec<DiscountTier>,
) -> SubscriptionProfile {
    SubscriptionProfile {
        id,
        utility_type: UtilityType::Water,
        company: CompanyProfile {
            id: id + 100,
            name: company_name.to_string(),
            code: company_name.to_uppercase().replace(' ', "_"),
            is_contracted,
            tiers,
        },
    }
}

/// Detached reading fixture taken at noon UTC on the given day.
#[must_use]
pub fn reading(subscription_id: i64, counter_value: f64, year: i32, month: u32, day: u32) -> ConsumptionRecord {
    ConsumptionRecord {
        subscription_id,
        counter_value,
        recorded_at: Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
        awarded_points: 0,
    }
}

//! Unified error types for the Eko-Akort engine and its data-access boundary.
//!
//! The pure calculators in [`crate::core`] never construct these errors; all
//! "insufficient data" cases there degrade to zero-valued output. Errors exist
//! only at the edges: reading-entry validation, tip application, configuration
//! loading, and database access.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Details of what went wrong
        message: String,
    },

    /// Underlying SeaORM/SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Counter values are cumulative and may never decrease
    #[error(
        "Counter cannot go backward: last recorded value is {last}, submitted value is {submitted}"
    )]
    CounterRegression {
        /// Latest reading stored for the subscription
        last: f64,
        /// Rejected value the user submitted
        submitted: f64,
    },

    /// Submitted counter value is NaN, infinite, or negative
    #[error("Invalid counter value: {value}")]
    InvalidReading {
        /// The offending value
        value: f64,
    },

    /// Subscription lookup failed or the subscription is inactive
    #[error("Subscription {id} not found or inactive")]
    SubscriptionNotFound {
        /// Subscription primary key
        id: i64,
    },

    /// Every subscription must resolve to exactly one company
    #[error("No company found for subscription {subscription_id}")]
    CompanyNotFound {
        /// Subscription whose company join came back empty
        subscription_id: i64,
    },

    /// User lookup failed
    #[error("User {id} not found")]
    UserNotFound {
        /// User primary key
        id: i64,
    },

    /// A subscription row carries a utility type outside {water, electricity}
    #[error("Unknown utility type: {value}")]
    UnknownUtilityType {
        /// The unrecognized string from the database
        value: String,
    },

    /// Tip lookup failed
    #[error("Tip {id} not found")]
    TipNotFound {
        /// Tip primary key
        id: i64,
    },

    /// Each tip may be applied at most once per user
    #[error("Tip {id} has already been applied")]
    TipAlreadyApplied {
        /// Tip primary key
        id: i64,
    },

    /// Users may apply a limited number of tips per month
    #[error("Monthly tip limit of {limit} reached")]
    TipLimitReached {
        /// The configured limit
        limit: u32,
    },

    /// I/O failure (config files, .env)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

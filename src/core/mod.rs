//! Core business logic for consumption analytics and rewards.
//!
//! The calculators here (`comparison`, `points`, `tiers`, `discounts`,
//! `engine`) are pure functions over detached data; the async modules
//! (`profile`, `readings`, `tips`, `leaderboard`) form the thin data-access
//! layer that feeds them.

/// Month-over-month consumption comparison
pub mod comparison;
/// Per-company discount standings
pub mod discounts;
/// The single evaluation entry point producing a dashboard snapshot
pub mod engine;
/// Building-level ranking of residents
pub mod leaderboard;
/// Year-month period keys
pub mod period;
/// Monthly gamification scoring
pub mod points;
/// Typed data-access boundary (users, subscriptions, readings)
pub mod profile;
/// Counter reading validation and entry
pub mod readings;
/// Text formatting of dashboard snapshots
pub mod report;
/// Discount tier ladders and resolution
pub mod tiers;
/// Savings tips listing and application
pub mod tips;

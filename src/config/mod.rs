/// Database connection, schema creation, and company seeding
pub mod database;

/// Scoring coefficient configuration from config.toml
pub mod scoring;

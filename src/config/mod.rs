/// Database configuration and connection management
pub mod database;

/// Discord user to partner mapping from environment variables
pub mod partners;

/// Seed data loading from config.toml
pub mod seed;

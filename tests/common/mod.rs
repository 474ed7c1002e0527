//! Shared helpers for integration tests

#![allow(dead_code)]

use aninotion::config::{
    BootstrapConfig, Config, DatabaseConfig, JwtConfig, LogFormat, PostConfig, ServerConfig,
};

pub const JWT_SECRET: &str = "test_secret_key_for_testing_only";

/// Configuration pointing at `database_url`, no environment required
pub fn test_config(database_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "warn".to_string(),
            log_format: LogFormat::Pretty,
        },
        database: DatabaseConfig {
            url: database_url.to_string(),
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            expiry_hours: 1,
        },
        posts: PostConfig::default(),
        bootstrap: BootstrapConfig::default(),
    }
}

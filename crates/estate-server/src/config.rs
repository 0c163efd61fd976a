//! Server configuration from environment.

use estate_core::EstateRules;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// SQLite file; empty keeps everything in memory
    pub database_path: String,
    pub database_max_connections: u32,
    pub log_json: bool,
    pub rules: EstateRules,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparseable values take the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).and_then(|raw| parse_flag(&raw));
        let defaults = EstateRules::default();

        Self {
            server_port: parse_value(lookup("ESTATE_PORT")).unwrap_or(3000),
            database_path: lookup("ESTATE_DATABASE_PATH")
                .unwrap_or_else(|| "data/estate.db".to_string()),
            database_max_connections: parse_value(lookup("ESTATE_DB_MAX_CONNECTIONS")).unwrap_or(5),
            log_json: flag("ESTATE_LOG_JSON").unwrap_or(false),
            rules: EstateRules {
                max_tree_height: parse_value(lookup("ESTATE_TREE_MAX_HEIGHT"))
                    .unwrap_or(defaults.max_tree_height),
                enforce_tree_height: flag("ESTATE_ENFORCE_TREE_HEIGHT")
                    .unwrap_or(defaults.enforce_tree_height),
                ..defaults
            },
        }
    }

    /// In-memory configuration with default rules.
    pub fn in_memory() -> Self {
        Self {
            server_port: 0,
            database_path: String::new(),
            database_max_connections: 1,
            log_json: false,
            rules: EstateRules::default(),
        }
    }

    pub fn persistence_enabled(&self) -> bool {
        !self.database_path.trim().is_empty()
    }
}

fn parse_value<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|raw| raw.trim().parse().ok())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

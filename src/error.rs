//! Error types for the graph seeder

use thiserror::Error;

/// Result type for seeder operations
pub type Result<T> = std::result::Result<T, SeederError>;

/// Graph seeder errors
#[derive(Error, Debug)]
pub enum SeederError {
    #[error("Invalid benchmark spec: {0}")]
    InvalidSpec(String),

    #[error("Relation '{relation}' role '{role}' references undeclared node type '{type_name}'")]
    UnknownRoleType {
        relation: String,
        role: String,
        type_name: String,
    },

    #[error("No generated instances of node type '{type_name}' to resolve a role against")]
    EmptyRoleType { type_name: String },

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Store returned {actual} ids for {expected} submitted records")]
    IdCountMismatch { expected: usize, actual: usize },

    #[error("Store call failed: {detail}\nstatement: {statement}")]
    Store { statement: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigFile(#[from] config_crate::ConfigError),
}

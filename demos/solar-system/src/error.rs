//! Error types for the planet table and the config override.

/// Problems with the planet table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The table is not valid JSON or has the wrong shape.
    #[error("failed to parse planet table: {0}")]
    Parse(#[from] serde_json::Error),

    /// The table has no planets.
    #[error("planet table is empty")]
    Empty,

    /// A radius, distance or period is zero or negative.
    #[error("{planet}: {field} must be positive, got {value}")]
    NonPositive {
        planet: String,
        field: &'static str,
        value: f64,
    },

    /// A radius, distance or period is NaN or infinite.
    #[error("{planet}: {field} is not a finite number")]
    NonFinite { planet: String, field: &'static str },
}

/// Problems with a JSON config override.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

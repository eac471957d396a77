//! Error type shared by the library modules.

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The scanning binary could not be started or rejected `--version`.
    #[error("{tool} not found. Install with: sudo apt install nmap")]
    ToolMissing { tool: String },

    /// Profile name is not in the profile table.
    #[error("invalid profile '{name}'. Choose from: {}", .valid.join(", "))]
    InvalidProfile { name: String, valid: Vec<&'static str> },

    /// The shell running the scan could not be spawned or awaited.
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElblessError {
    #[error("AWS API error: {0}")]
    Remote(String),

    #[error("Cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("Failed to enumerate tasks in cluster {cluster}: {reason}")]
    Discovery { cluster: String, reason: String },

    #[error("Malformed task {task_id}: {reason}")]
    MalformedTask { task_id: String, reason: String },

    #[error("Failed to resolve endpoint for task {task_id}: {reason}")]
    Resolution { task_id: String, reason: String },

    #[error("Invalid service filter {pattern:?}: {reason}")]
    InvalidFilter { pattern: String, reason: String },

    #[error("Missing region: pass --region or set AWS_DEFAULT_REGION")]
    MissingRegion,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ElblessError>;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to open dataset database: {0}")]
    DatabaseOpen(rusqlite::Error),
    #[error("failed to query dataset table: {0}")]
    DatabaseQuery(rusqlite::Error),
    #[error("invalid dataset table: {0}")]
    InvalidTable(String),

    #[error("failed to read model file: {0}")]
    ModelRead(std::io::Error),
    #[error("failed to deserialize model: {0}")]
    ModelDeserialization(serde_json::Error),
    #[error("invalid model: {0}")]
    InvalidModel(String),
    #[error("model labels do not match dataset categories (model: {model:?}, dataset: {dataset:?})")]
    LabelMismatch {
        model: Vec<String>,
        dataset: Vec<String>,
    },

    #[error("classifier returned {actual} label vectors for {expected} inputs")]
    PredictionCount { expected: usize, actual: usize },
    #[error("classifier returned {actual} labels, expected one per category ({expected})")]
    PredictionWidth { expected: usize, actual: usize },
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;

use thiserror::Error;

/// Errors raised by the workbench when a request cannot be served.
///
/// The statistics themselves never fail: they return `None` when the data is
/// too thin, and the session layer turns that into [`WorkbenchError::NotComputable`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkbenchError {
    #[error("no dataset loaded")]
    NoData,

    #[error("need at least {required} rows, dataset has {actual}")]
    TooFewRows { required: usize, actual: usize },

    #[error("unknown column '{0}'")]
    MissingColumn(String),

    #[error("schema needs at least one named column")]
    EmptySchema,

    #[error("column '{0}' is defined more than once")]
    DuplicateColumn(String),

    #[error("column '{column}' expects a number, got '{value}'")]
    InvalidNumeric { column: String, value: String },

    #[error("{reason}")]
    NotComputable { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, WorkbenchError>;

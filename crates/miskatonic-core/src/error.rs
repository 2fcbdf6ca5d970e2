use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV input has no header row")]
    MissingHeaders,

    #[error("missing columns in CSV: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV error at record {record}: {source}")]
    Csv {
        record: u64,
        #[source]
        source: csv::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// Whether the failure comes from the shape or encoding of the input file.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingHeaders | Self::MissingColumns(_) | Self::Csv { .. }
        )
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A row's cell count differs from the header's.
    #[error("invalid CSV: row at line {line} has {found} cells, header has {expected}")]
    RecordLength {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("invalid CSV: quoted cell opened at line {line} is never closed")]
    UnclosedQuote { line: u64 },
}

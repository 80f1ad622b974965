use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The dedicated rayon pool could not be created.
    #[error("Failed to set thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid matrix shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// A row's length differs from the first row's.
    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

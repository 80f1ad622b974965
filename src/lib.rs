pub mod config;
pub mod error;
pub mod matrix;
pub mod pearson;
pub mod pvalue;
pub mod stability;
pub mod upper;
pub mod weighted;

pub use config::ComputeConfig;
pub use error::{Error, Result};
pub use matrix::{
    correlation_cross_matrix, correlation_matrix, correlation_matrix_with_config,
    correlation_upper_triangle, matrix_from_rows,
};
pub use pearson::{pearson_pair, pearson_slices};
pub use weighted::{weighted_pearson, weighted_pearson_slices};

use ndarray::{Array2, ArrayBase, ArrayView1, Data, Ix2};
use rayon::prelude::*;
use tracing::debug;

use crate::config::ComputeConfig;
use crate::error::{Error, Result};
use crate::stability::{assert_weight_len, clamp_corr};
use crate::upper::upper_triangular_len;
use crate::weighted::weighted_mean;

struct PreparedRow {
    centered: Vec<f64>,
    ss: f64,
}

trait PairKernel: Sync {
    fn prepare(&self, row: ArrayView1<'_, f64>) -> PreparedRow;
    fn combine(&self, a: &PreparedRow, b: &PreparedRow) -> f64;
}

struct Plain;

impl PairKernel for Plain {
    fn prepare(&self, row: ArrayView1<'_, f64>) -> PreparedRow {
        let mean = row.mean().unwrap_or(f64::NAN);
        let centered: Vec<f64> = row.iter().map(|&v| v - mean).collect();
        let ss = centered.iter().map(|c| c * c).sum::<f64>();
        PreparedRow { centered, ss }
    }

    fn combine(&self, a: &PreparedRow, b: &PreparedRow) -> f64 {
        let r_num: f64 = a
            .centered
            .iter()
            .zip(&b.centered)
            .map(|(x, y)| x * y)
            .sum();
        clamp_corr(r_num / (a.ss * b.ss).sqrt())
    }
}

struct Weighted {
    w: Vec<f64>,
    w_sum: f64,
}

impl Weighted {
    fn new(w: ArrayView1<'_, f64>) -> Self {
        Self {
            w_sum: w.sum(),
            w: w.to_vec(),
        }
    }
}

impl PairKernel for Weighted {
    fn prepare(&self, row: ArrayView1<'_, f64>) -> PreparedRow {
        let mean = weighted_mean(&row, &ArrayView1::from(&self.w[..]), self.w_sum);
        let centered: Vec<f64> = row.iter().map(|&v| v - mean).collect();
        let ss = centered
            .iter()
            .zip(&self.w)
            .map(|(c, wi)| c * c * wi)
            .sum::<f64>()
            / self.w_sum;
        PreparedRow { centered, ss }
    }

    fn combine(&self, a: &PreparedRow, b: &PreparedRow) -> f64 {
        let r_num = a
            .centered
            .iter()
            .zip(&b.centered)
            .zip(&self.w)
            .map(|((x, y), wi)| x * y * wi)
            .sum::<f64>()
            / self.w_sum;
        clamp_corr(r_num / (a.ss * b.ss).sqrt())
    }
}

fn prepare_rows<S, K>(data: &ArrayBase<S, Ix2>, kernel: &K) -> Vec<PreparedRow>
where
    S: Data<Elem = f64> + Sync,
    K: PairKernel,
{
    (0..data.nrows())
        .into_par_iter()
        .map(|i| kernel.prepare(data.row(i)))
        .collect()
}

// Row i of the result holds columns i..n_rows; the leading entry is the
// diagonal and stays 1.0.
fn upper_rows<S, K>(data: &ArrayBase<S, Ix2>, kernel: &K) -> Vec<Vec<f64>>
where
    S: Data<Elem = f64> + Sync,
    K: PairKernel,
{
    let n_rows = data.nrows();
    let prepared = prepare_rows(data, kernel);

    (0..n_rows)
        .into_par_iter()
        .map(|i| {
            let mut row = vec![1.0; n_rows - i];
            for j in i + 1..n_rows {
                row[j - i] = kernel.combine(&prepared[i], &prepared[j]);
            }
            row
        })
        .collect()
}

fn cross_rows<S1, S2, K>(
    lhs: &ArrayBase<S1, Ix2>,
    rhs: &ArrayBase<S2, Ix2>,
    kernel: &K,
) -> Vec<Vec<f64>>
where
    S1: Data<Elem = f64> + Sync,
    S2: Data<Elem = f64> + Sync,
    K: PairKernel,
{
    let prepared_lhs = prepare_rows(lhs, kernel);
    let prepared_rhs = prepare_rows(rhs, kernel);

    prepared_lhs
        .par_iter()
        .map(|a| {
            prepared_rhs
                .iter()
                .map(|b| kernel.combine(a, b))
                .collect::<Vec<f64>>()
        })
        .collect()
}

fn check_weights<S>(data: &ArrayBase<S, Ix2>, weights: Option<&ArrayView1<'_, f64>>)
where
    S: Data<Elem = f64>,
{
    let (n_rows, n_cols) = data.dim();
    if let Some(w) = weights {
        assert_weight_len(n_cols, w.len());
    }
    debug!(
        rows = n_rows,
        cols = n_cols,
        weighted = weights.is_some(),
        "Computing Pearson correlations"
    );
}

/// Symmetric `n_rows x n_rows` correlation matrix of the rows of `data`.
///
/// `weights` is shared by every row pair and must have one entry per
/// column. The diagonal is always 1.0, even for a zero-variance row; its
/// off-diagonal cells are NaN.
///
/// # Panics
///
/// If `weights` is present and its length differs from `data.ncols()`.
pub fn correlation_matrix<S>(
    data: &ArrayBase<S, Ix2>,
    weights: Option<ArrayView1<'_, f64>>,
) -> Array2<f64>
where
    S: Data<Elem = f64> + Sync,
{
    check_weights(data, weights.as_ref());
    let n_rows = data.nrows();

    let row_results = match weights {
        Some(w) => upper_rows(data, &Weighted::new(w)),
        None => upper_rows(data, &Plain),
    };

    let mut corr = Array2::<f64>::ones((n_rows, n_rows));
    for (i, row) in row_results.iter().enumerate() {
        for j in i + 1..n_rows {
            let val = row[j - i];
            corr[[i, j]] = val;
            corr[[j, i]] = val;
        }
    }

    corr
}

pub fn correlation_matrix_with_config<S>(
    data: &ArrayBase<S, Ix2>,
    weights: Option<ArrayView1<'_, f64>>,
    config: &ComputeConfig,
) -> Result<Array2<f64>>
where
    S: Data<Elem = f64> + Sync,
{
    config.install(|| correlation_matrix(data, weights))
}

/// Correlation of every row of `lhs` with every row of `rhs`.
///
/// # Panics
///
/// If the two matrices differ in column count, or `weights` does not have
/// one entry per column.
pub fn correlation_cross_matrix<S1, S2>(
    lhs: &ArrayBase<S1, Ix2>,
    rhs: &ArrayBase<S2, Ix2>,
    weights: Option<ArrayView1<'_, f64>>,
) -> Array2<f64>
where
    S1: Data<Elem = f64> + Sync,
    S2: Data<Elem = f64> + Sync,
{
    let (lhs_rows, lhs_cols) = lhs.dim();
    let (rhs_rows, rhs_cols) = rhs.dim();
    assert_eq!(
        lhs_cols, rhs_cols,
        "Pearson cross-correlation requires equal sample count in both matrices"
    );
    check_weights(lhs, weights.as_ref());

    let row_results = match weights {
        Some(w) => cross_rows(lhs, rhs, &Weighted::new(w)),
        None => cross_rows(lhs, rhs, &Plain),
    };

    let mut corr = Array2::<f64>::zeros((lhs_rows, rhs_rows));
    for (i, row) in row_results.iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            corr[[i, j]] = val;
        }
    }

    corr
}

/// Upper triangle of [`correlation_matrix`], diagonal included, packed row by
/// row.
pub fn correlation_upper_triangle<S>(
    data: &ArrayBase<S, Ix2>,
    weights: Option<ArrayView1<'_, f64>>,
) -> Vec<f64>
where
    S: Data<Elem = f64> + Sync,
{
    check_weights(data, weights.as_ref());

    let row_results = match weights {
        Some(w) => upper_rows(data, &Weighted::new(w)),
        None => upper_rows(data, &Plain),
    };

    let mut packed = Vec::with_capacity(upper_triangular_len(data.nrows()));
    for row in row_results {
        packed.extend_from_slice(&row);
    }
    packed
}

pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n_cols = rows.first().map_or(0, Vec::len);

    let mut flat = Vec::with_capacity(rows.len() * n_cols);
    for (row, values) in rows.iter().enumerate() {
        if values.len() != n_cols {
            return Err(Error::RaggedRows {
                row,
                expected: n_cols,
                found: values.len(),
            });
        }
        flat.extend_from_slice(values);
    }

    Ok(Array2::from_shape_vec((rows.len(), n_cols), flat)?)
}

use ndarray::{Array2, ArrayBase, Data, Ix2};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::stability::clamp_corr;

/// Two-tailed t test of a Pearson coefficient over a fixed sample size.
#[derive(Debug, Clone)]
pub struct CorrTTest {
    df: f64,
    dist: StudentsT,
}

impl CorrTTest {
    /// `None` when fewer than three observations leave no degrees of freedom.
    pub fn new(n_samples: usize) -> Option<Self> {
        let df = n_samples.checked_sub(2).filter(|&df| df > 0)? as f64;
        let dist = StudentsT::new(0.0, 1.0, df).ok()?;
        Some(Self { df, dist })
    }

    pub fn df(&self) -> f64 {
        self.df
    }

    /// `r * sqrt(df / (1 - r^2))`; infinite at `|r| == 1`.
    pub fn statistic(&self, r: f64) -> f64 {
        r * (self.df / ((1.0 - r) * (1.0 + r))).sqrt()
    }

    pub fn pvalue(&self, r: f64) -> f64 {
        if !r.is_finite() {
            return f64::NAN;
        }
        let r = clamp_corr(r);
        if r.abs() == 1.0 {
            return 0.0;
        }
        let t = self.statistic(r).abs();
        (2.0 * self.dist.cdf(-t)).min(1.0)
    }
}

/// P-value of `r` observed over `n_samples` paired observations, or NaN when
/// there are too few observations for a t statistic.
pub fn pearson_pvalue(r: f64, n_samples: usize) -> f64 {
    CorrTTest::new(n_samples).map_or(f64::NAN, |test| test.pvalue(r))
}

/// Element-wise p-values for a square correlation matrix; the diagonal is 0.
pub fn pvalue_matrix<S>(corr: &ArrayBase<S, Ix2>, n_samples: usize) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let test = CorrTTest::new(n_samples);
    Array2::from_shape_fn(corr.dim(), |(i, j)| match &test {
        _ if i == j => 0.0,
        Some(test) => test.pvalue(corr[[i, j]]),
        None => f64::NAN,
    })
}

use ndarray::{ArrayBase, ArrayView1, Data, Ix1, Zip};

use crate::pearson::pearson_pair;
use crate::stability::{assert_same_len, assert_weight_len, clamp_corr};

/// Weighted Pearson correlation of `x` and `y`.
///
/// `w` holds one non-negative weight per observation. Negative weights are
/// not rejected and give a meaningless coefficient. A weight vector summing
/// to zero yields NaN. `None` delegates to [`pearson_pair`].
///
/// # Panics
///
/// If `x`, `y` and `w` are not all the same length.
pub fn weighted_pearson<S1, S2>(
    x: &ArrayBase<S1, Ix1>,
    y: &ArrayBase<S2, Ix1>,
    w: Option<ArrayView1<'_, f64>>,
) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    match w {
        None => pearson_pair(x, y),
        Some(w) => weighted_pearson_with(x, y, &w),
    }
}

fn weighted_pearson_with<S1, S2, S3>(
    x: &ArrayBase<S1, Ix1>,
    y: &ArrayBase<S2, Ix1>,
    w: &ArrayBase<S3, Ix1>,
) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    S3: Data<Elem = f64>,
{
    assert_same_len(x.len(), y.len());
    assert_weight_len(x.len(), w.len());

    let w_sum = w.sum();
    let mx = weighted_mean(x, w, w_sum);
    let my = weighted_mean(y, w, w_sum);

    let (num, xx, yy) = Zip::from(x)
        .and(y)
        .and(w)
        .fold((0.0, 0.0, 0.0), |(num, xx, yy), &xi, &yi, &wi| {
            let xm = xi - mx;
            let ym = yi - my;
            (num + xm * ym * wi, xx + xm * xm * wi, yy + ym * ym * wi)
        });

    let r_num = num / w_sum;
    let xm2 = xx / w_sum;
    let ym2 = yy / w_sum;

    let r_den = (xm2 * ym2).sqrt();
    clamp_corr(r_num / r_den)
}

pub(crate) fn weighted_mean<S1, S2>(
    values: &ArrayBase<S1, Ix1>,
    w: &ArrayBase<S2, Ix1>,
    w_sum: f64,
) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    Zip::from(values)
        .and(w)
        .fold(0.0, |acc, &v, &wi| acc + v * wi)
        / w_sum
}

/// Slice convenience over [`weighted_pearson`].
pub fn weighted_pearson_slices(x: &[f64], y: &[f64], w: Option<&[f64]>) -> f64 {
    weighted_pearson(
        &ArrayView1::from(x),
        &ArrayView1::from(y),
        w.map(ArrayView1::from),
    )
}

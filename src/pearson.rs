use ndarray::{ArrayBase, ArrayView1, Data, Ix1, Zip};

use crate::stability::{assert_same_len, clamp_corr};

/// Pearson correlation of two equal-length sequences.
///
/// A zero-variance input is not special-cased: the `0 / 0` division
/// produces NaN and the NaN is returned as-is. Empty input also yields NaN.
///
/// # Panics
///
/// If `x` and `y` differ in length.
pub fn pearson_pair<S1, S2>(x: &ArrayBase<S1, Ix1>, y: &ArrayBase<S2, Ix1>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    assert_same_len(x.len(), y.len());

    let (Some(mx), Some(my)) = (x.mean(), y.mean()) else {
        return f64::NAN;
    };

    let (r_num, xx, yy) = Zip::from(x)
        .and(y)
        .fold((0.0, 0.0, 0.0), |(num, xx, yy), &xi, &yi| {
            let xm = xi - mx;
            let ym = yi - my;
            (num + xm * ym, xx + xm * xm, yy + ym * ym)
        });

    let r_den = (xx * yy).sqrt();
    clamp_corr(r_num / r_den)
}

/// Slice convenience over [`pearson_pair`].
pub fn pearson_slices(x: &[f64], y: &[f64]) -> f64 {
    pearson_pair(&ArrayView1::from(x), &ArrayView1::from(y))
}

/// Clamp a raw coefficient into [-1, 1].
///
/// `f64::clamp` keeps NaN as NaN, so a degenerate input still yields a
/// degenerate output instead of a bounded sentinel.
#[inline]
pub fn clamp_corr(r: f64) -> f64 {
    r.clamp(-1.0, 1.0)
}

#[inline]
pub(crate) fn assert_same_len(x_len: usize, y_len: usize) {
    assert_eq!(
        x_len, y_len,
        "Pearson correlation requires sequences of equal length"
    );
}

#[inline]
pub(crate) fn assert_weight_len(sample_len: usize, weight_len: usize) {
    assert_eq!(
        sample_len, weight_len,
        "Weight vector length must match the number of observations"
    );
}

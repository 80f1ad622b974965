use ndarray::Array2;

pub fn upper_triangular_len(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Offset of `(i, j)` in a packed triangle of order `n`. Order of the pair
/// does not matter.
pub fn packed_index(i: usize, j: usize, n: usize) -> usize {
    let (i, j) = if i <= j { (i, j) } else { (j, i) };
    debug_assert!(j < n, "packed index out of range");
    i * n - i * i.saturating_sub(1) / 2 + (j - i)
}

pub fn unpack_upper_triangle(packed: &[f64], n: usize) -> Array2<f64> {
    assert_eq!(
        packed.len(),
        upper_triangular_len(n),
        "Packed upper triangle length does not match matrix order"
    );

    let mut out = Array2::<f64>::zeros((n, n));
    let mut offset = 0;
    for i in 0..n {
        for j in i..n {
            let val = packed[offset];
            out[[i, j]] = val;
            out[[j, i]] = val;
            offset += 1;
        }
    }
    out
}

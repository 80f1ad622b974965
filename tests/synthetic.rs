use ndarray::{array, Array2};
use wpearson::{
    correlation_matrix, pearson_pair, pearson_slices, weighted_pearson, weighted_pearson_slices,
};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn scaled_sequence_is_perfectly_correlated() {
    let r = pearson_slices(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]);
    assert!(approx_eq(r, 1.0, 1e-12));
}

#[test]
fn reversed_sequence_is_perfectly_anticorrelated() {
    let r = pearson_slices(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.0, 4.0, 3.0, 2.0, 1.0]);
    assert!(approx_eq(r, -1.0, 1e-12));
}

#[test]
fn unit_weights_match_unweighted() {
    let x = array![1.0, 2.0, 3.0];
    let y = array![1.0, 2.0, 3.0];
    let w = array![1.0, 1.0, 1.0];

    let weighted = weighted_pearson(&x, &y, Some(w.view()));
    let plain = pearson_pair(&x, &y);
    assert!(approx_eq(weighted, 1.0, 1e-12));
    assert!(approx_eq(weighted, plain, 1e-12));
}

#[test]
fn missing_weights_use_plain_kernel() {
    let x = array![0.3, -1.2, 4.4, 2.0, 0.0];
    let y = array![1.1, 0.4, 3.9, 2.2, -0.7];
    assert_eq!(
        weighted_pearson(&x, &y, None).to_bits(),
        pearson_pair(&x, &y).to_bits()
    );
}

#[test]
fn zero_weight_drops_observation() {
    let weighted = weighted_pearson_slices(
        &[100.0, 1.0, 2.0, 3.0],
        &[-50.0, 2.0, 4.0, 7.0],
        Some(&[0.0, 1.0, 1.0, 1.0]),
    );
    let trimmed = pearson_slices(&[1.0, 2.0, 3.0], &[2.0, 4.0, 7.0]);
    assert!(approx_eq(weighted, trimmed, 1e-12));
}

#[test]
fn known_value() {
    let x = [1.0, 2.0, 3.0, 4.0];
    let y = [2.0, 1.0, 4.0, 3.0];
    // xm = [-1.5, -0.5, 0.5, 1.5], ym = [-0.5, -1.5, 1.5, 0.5]
    // sum(xm*ym) = 0.75 + 0.75 + 0.75 + 0.75 = 3.0, sum(xm^2) = sum(ym^2) = 5.0
    assert!(approx_eq(pearson_slices(&x, &y), 0.6, 1e-12));
}

#[test]
fn three_row_matrix() {
    let data = Array2::from_shape_vec(
        (3, 3),
        vec![1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 3.0, 2.0, 1.0],
    )
    .expect("matrix shape");

    let corr = correlation_matrix(&data, None);
    assert_eq!(corr.dim(), (3, 3));
    for i in 0..3 {
        assert_eq!(corr[[i, i]], 1.0);
        for j in 0..3 {
            assert_eq!(corr[[i, j]], corr[[j, i]]);
        }
    }
    assert!(approx_eq(corr[[0, 1]], 1.0, 1e-12));
    assert!(approx_eq(corr[[0, 2]], -1.0, 1e-12));
    assert!(approx_eq(corr[[1, 2]], -1.0, 1e-12));
}

#[test]
fn zero_variance_is_nan() {
    let r = pearson_slices(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
    assert!(r.is_nan());

    let r = weighted_pearson_slices(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0], Some(&[1.0, 2.0, 1.0]));
    assert!(r.is_nan());
}

#[test]
fn zero_weight_sum_is_nan() {
    let r = weighted_pearson_slices(&[1.0, 2.0, 3.0], &[3.0, 1.0, 2.0], Some(&[0.0, 0.0, 0.0]));
    assert!(r.is_nan());
}

#[test]
fn empty_input_is_nan() {
    assert!(pearson_slices(&[], &[]).is_nan());
}

#[test]
#[should_panic(expected = "equal length")]
fn mismatched_lengths_panic() {
    pearson_slices(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
}

#[test]
#[should_panic(expected = "Weight vector length")]
fn mismatched_weights_panic() {
    weighted_pearson_slices(&[1.0, 2.0, 3.0], &[1.0, 2.0, 4.0], Some(&[1.0, 1.0]));
}

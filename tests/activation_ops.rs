//! Integration tests for softmax, log_softmax, exp and log

mod common;

use common::{array, assert_allclose_f32, create_client, to_f32_vec};
use hostops::prelude::*;

// ============================================================================
// softmax / log_softmax
// ============================================================================

#[test]
fn test_softmax_lanes_sum_to_one() {
    let client = create_client();
    let a = array(&client, &[1.0f32, 2.0, 3.0, -1.0, 0.0, 10.0], &[2, 3]);

    let result = client.softmax(&a, -1, Output::new()).unwrap();
    assert_eq!(result.shape(), &[2, 3]);
    let data = result.to_vec::<f32>().unwrap();
    for lane in data.chunks(3) {
        let sum: f32 = lane.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "lane {lane:?}");
        assert!(lane.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }
    assert_allclose_f32(&data[..3], &[0.090_030_57, 0.244_728_48, 0.665_240_94], 1e-5, 1e-6, "row 0");
}

#[test]
fn test_softmax_shift_invariant() {
    let client = create_client();
    let a = array(&client, &[0.5f32, -2.0, 1.5, 3.0], &[4]);
    let shifted = array(&client, &[100.5f32, 98.0, 101.5, 103.0], &[4]);

    let p = client.softmax(&a, 0, Output::new()).unwrap();
    let q = client.softmax(&shifted, 0, Output::new()).unwrap();
    assert_allclose_f32(
        &p.to_vec::<f32>().unwrap(),
        &q.to_vec::<f32>().unwrap(),
        1e-5,
        1e-6,
        "softmax shift",
    );
}

#[test]
fn test_softmax_leading_axis() {
    let client = create_client();
    let a = array(&client, &[0.0f32, 1.0, 0.0, 1.0], &[2, 2]);

    let result = client.softmax(&a, 0, Output::new()).unwrap();
    assert_allclose_f32(&result.to_vec::<f32>().unwrap(), &[0.5; 4], 1e-6, 1e-7, "axis 0");
}

#[test]
fn test_softmax_f16() {
    let client = create_client();
    let values: Vec<half::f16> = [1.0f32, 1.0].iter().map(|&v| half::f16::from_f32(v)).collect();
    let a = array(&client, &values, &[2]);

    let result = client.softmax(&a, 0, Output::new()).unwrap();
    assert_eq!(result.dtype(), DType::F16);
    assert_eq!(to_f32_vec(&result), vec![0.5, 0.5]);
}

#[test]
fn test_softmax_rejects_narrow_floats() {
    let client = create_client();
    let values = [BF16::ONE, BF16::ZERO];
    let a = array(&client, &values, &[2]);

    let err = client.softmax(&a, 0, Output::new()).unwrap_err();
    assert_eq!(err, Error::unsupported_dtype(DType::BF16, "softmax"));
    let err = client.log_softmax(&a, 0, Output::new()).unwrap_err();
    assert_eq!(err, Error::unsupported_dtype(DType::BF16, "log_softmax"));
}

#[test]
fn test_log_softmax_matches_log_of_softmax() {
    let client = create_client();
    let a = array(&client, &[0.3f32, -1.2, 2.2, 0.0, 4.0, -3.0], &[3, 2]);

    let p = client.softmax(&a, 1, Output::new()).unwrap();
    let expected: Vec<f32> = p.to_vec::<f32>().unwrap().iter().map(|v| v.ln()).collect();
    let result = client.log_softmax(&a, 1, Output::new()).unwrap();
    assert_allclose_f32(&result.to_vec::<f32>().unwrap(), &expected, 1e-5, 1e-6, "log_softmax");
}

#[test]
fn test_exp_of_log_softmax_is_softmax() {
    let client = create_client();
    let a = array(&client, &[0.1f32, 0.7, -0.4, 2.0], &[4]);

    let log_p = client.log_softmax(&a, 0, Output::new()).unwrap();
    let p = client.exp(&log_p, Output::new()).unwrap();
    let expected = client.softmax(&a, 0, Output::new()).unwrap();
    assert_allclose_f32(
        &p.to_vec::<f32>().unwrap(),
        &expected.to_vec::<f32>().unwrap(),
        1e-5,
        1e-6,
        "exp(log_softmax)",
    );
}

#[test]
fn test_log_softmax_stable_for_large_inputs() {
    let client = create_client();
    let a = array(&client, &[1000.0f32, 0.0], &[2]);

    let result = client.log_softmax(&a, 0, Output::new()).unwrap();
    let data = result.to_vec::<f32>().unwrap();
    assert!(data.iter().all(|v| v.is_finite()));
    assert_allclose_f32(&data, &[0.0, -1000.0], 1e-6, 1e-6, "large");
}

#[test]
fn test_softmax_in_place() {
    let client = create_client();
    let a = array(&client, &[2.0f32, 2.0], &[2]);

    let result = client.softmax(&a, 0, Output::into(&a)).unwrap();
    assert!(result.shares_storage(&a));
    assert_eq!(a.to_vec::<f32>().unwrap(), vec![0.5, 0.5]);
}

// ============================================================================
// exp / log
// ============================================================================

#[test]
fn test_exp_and_log() {
    let client = create_client();
    let a = array(&client, &[0.0f32, 1.0, -1.0, 2.5], &[2, 2]);

    let e = client.exp(&a, Output::new()).unwrap();
    assert_eq!(e.shape(), &[2, 2]);
    let expected: Vec<f32> = [0.0f32, 1.0, -1.0, 2.5].iter().map(|v| v.exp()).collect();
    assert_allclose_f32(&e.to_vec::<f32>().unwrap(), &expected, 1e-6, 1e-7, "exp");

    let back = client.log(&e, Output::new()).unwrap();
    assert_allclose_f32(&back.to_vec::<f32>().unwrap(), &[0.0, 1.0, -1.0, 2.5], 1e-5, 1e-6, "log");
}

#[test]
fn test_log_edge_values() {
    let client = create_client();
    let a = array(&client, &[0.0f32, -1.0], &[2]);

    let result = client.log(&a, Output::new()).unwrap();
    let data = result.to_vec::<f32>().unwrap();
    assert_eq!(data[0], f32::NEG_INFINITY);
    assert!(data[1].is_nan());
}

#[test]
fn test_exp_narrow_floats() {
    let client = create_client();
    let bf16 = array(&client, &[BF16::ZERO, BF16::ONE], &[2]);
    let fp8 = array(&client, &[FP8E4M3FN::ZERO, FP8E4M3FN::ONE], &[2]);

    for input in [bf16, fp8] {
        let result = client.exp(&input, Output::new()).unwrap();
        assert_eq!(result.dtype(), input.dtype());
        let data = to_f32_vec(&result);
        assert_eq!(data[0], 1.0);
        assert!((data[1] - std::f32::consts::E).abs() < 0.2, "{}", input.dtype());
    }
}

#[test]
fn test_exp_rejects_integers_and_f64() {
    let client = create_client();
    let ints = array(&client, &[1i64], &[1]);
    let doubles = array(&client, &[1.0f64], &[1]);
    let out = array(&client, &[3.0f32], &[1]);

    assert_eq!(
        client.exp(&ints, Output::new()).unwrap_err(),
        Error::unsupported_dtype(DType::I64, "exp")
    );
    assert_eq!(
        client.log(&doubles, Output::new()).unwrap_err(),
        Error::unsupported_dtype(DType::F64, "log")
    );

    let wide = array(&client, &[1.0f32, 2.0], &[2]);
    assert!(client.exp(&wide, Output::into(&out)).is_err());
    assert_eq!(out.to_vec::<f32>().unwrap(), vec![3.0]);
}

//! Integration tests for add, subtract, multiply and divide
//!
//! Covers array-array and array-scalar operands in both positions, dtype
//! promotion of mixed operands, and the checks that must fail before any
//! output element is written.

mod common;

use common::{array, assert_allclose_f32, create_client, to_f32_vec};
use hostops::prelude::*;

// ============================================================================
// Array with array
// ============================================================================

#[test]
fn test_elementwise_f32() {
    let client = create_client();
    let a = array(&client, &[1.0f32, 2.0, 3.0, 4.0], &[2, 2]);
    let b = array(&client, &[0.5f32, 4.0, -1.0, 8.0], &[2, 2]);

    let add = client.add(&a, &b, Output::new()).unwrap();
    assert_eq!(add.shape(), &[2, 2]);
    assert_eq!(add.to_vec::<f32>().unwrap(), [1.5, 6.0, 2.0, 12.0]);
    let sub = client.subtract(&a, &b, Output::new()).unwrap();
    assert_eq!(sub.to_vec::<f32>().unwrap(), [0.5, -2.0, 4.0, -4.0]);
    let mul = client.multiply(&a, &b, Output::new()).unwrap();
    assert_eq!(mul.to_vec::<f32>().unwrap(), [0.5, 8.0, -3.0, 32.0]);
    let div = client.divide(&a, &b, Output::new()).unwrap();
    assert_eq!(div.to_vec::<f32>().unwrap(), [2.0, 0.5, -3.0, 0.5]);
}

#[test]
fn test_float_division_by_zero_is_ieee() {
    let client = create_client();
    let a = array(&client, &[1.0f32, -1.0, 0.0], &[3]);
    let zeros = array(&client, &[0.0f32; 3], &[3]);

    let result = client.divide(&a, &zeros, Output::new()).unwrap();
    let data = result.to_vec::<f32>().unwrap();
    assert_eq!(data[0], f32::INFINITY);
    assert_eq!(data[1], f32::NEG_INFINITY);
    assert!(data[2].is_nan());
}

#[test]
fn test_integer_arithmetic_wraps() {
    let client = create_client();
    let a = array(&client, &[250u8, 3, 7], &[3]);
    let b = array(&client, &[10u8, 5, 2], &[3]);

    let add = client.add(&a, &b, Output::new()).unwrap();
    assert_eq!(add.to_vec::<u8>().unwrap(), [4, 8, 9]);
    let sub = client.subtract(&a, &b, Output::new()).unwrap();
    assert_eq!(sub.to_vec::<u8>().unwrap(), [240, 254, 5]);
    let div = client.divide(&a, &b, Output::new()).unwrap();
    assert_eq!(div.to_vec::<u8>().unwrap(), [25, 0, 3]);
}

#[test]
fn test_signed_integer_division_truncates() {
    let client = create_client();
    let a = array(&client, &[7i32, -7, 7, -7], &[4]);
    let b = array(&client, &[2i32, 2, -2, -2], &[4]);

    let div = client.divide(&a, &b, Output::new()).unwrap();
    assert_eq!(div.to_vec::<i32>().unwrap(), [3, -3, -3, 3]);
}

#[test]
fn test_mixed_dtypes_promote() {
    let client = create_client();
    let a = array(&client, &[200u8, 1], &[2]);
    let b = array(&client, &[-100i8, -2], &[2]);

    let result = client.add(&a, &b, Output::new()).unwrap();
    assert_eq!(result.dtype(), DType::I16);
    assert_eq!(result.to_vec::<i16>().unwrap(), [100, -1]);

    let bf16 = array(&client, &[BF16::from_f32(1.5), BF16::from_f32(-2.0)], &[2]);
    let f32s = array(&client, &[0.25f32, 0.5], &[2]);
    let result = client.multiply(&bf16, &f32s, Output::new()).unwrap();
    assert_eq!(result.dtype(), DType::F32);
    assert_eq!(result.to_vec::<f32>().unwrap(), [0.375, -1.0]);
}

#[test]
fn test_narrow_float_arithmetic() {
    let client = create_client();
    let one = FP8E4M3FN::ONE;
    let a = array(&client, &[one, one], &[2]);
    let b = array(&client, &[FP8E4M3FN::from_f32(2.0), FP8E4M3FN::from_f32(0.5)], &[2]);

    let result = client.add(&a, &b, Output::new()).unwrap();
    assert_eq!(result.dtype(), DType::FP8E4M3FN);
    assert_eq!(to_f32_vec(&result), vec![3.0, 1.5]);

    let big = array(&client, &[FP8E4M3FN::from_f32(448.0)], &[1]);
    let result = client.multiply(&big, 2.0f32, Output::new()).unwrap();
    assert_eq!(to_f32_vec(&result), vec![448.0]);
}

// ============================================================================
// Scalar operands
// ============================================================================

#[test]
fn test_scalar_on_either_side() {
    let client = create_client();
    let a = array(&client, &[1.0f32, 2.0, 4.0], &[3]);

    let r = client.subtract(&a, 1.0f64, Output::new()).unwrap();
    assert_eq!(r.dtype(), DType::F32);
    assert_eq!(r.to_vec::<f32>().unwrap(), [0.0, 1.0, 3.0]);

    let r = client.subtract(1.0f32, &a, Output::new()).unwrap();
    assert_eq!(r.to_vec::<f32>().unwrap(), [0.0, -1.0, -3.0]);

    let r = client.divide(8.0f32, &a, Output::new()).unwrap();
    assert_eq!(r.to_vec::<f32>().unwrap(), [8.0, 4.0, 2.0]);

    // integer scalars convert into float arrays
    let r = client.multiply(&a, 3i32, Output::new()).unwrap();
    assert_eq!(r.to_vec::<f32>().unwrap(), [3.0, 6.0, 12.0]);
}

#[test]
fn test_scalar_adopts_array_dtype() {
    let client = create_client();
    let a = array(&client, &[1u8, 2, 3], &[3]);

    let r = client.multiply(&a, 2u8, Output::new()).unwrap();
    assert_eq!(r.dtype(), DType::U8);
    assert_eq!(r.to_vec::<u8>().unwrap(), [2, 4, 6]);

    let r = client.add(&a, 100i64, Output::new()).unwrap();
    assert_eq!(r.dtype(), DType::U8);
    assert_eq!(r.to_vec::<u8>().unwrap(), [101, 102, 103]);
}

#[test]
fn test_half_scalar_arithmetic() {
    let client = create_client();
    let values: Vec<half::f16> = [1.0f32, 2.0].iter().map(|&v| half::f16::from_f32(v)).collect();
    let a = array(&client, &values, &[2]);

    let r = client.add(&a, 0.5f32, Output::new()).unwrap();
    assert_eq!(r.dtype(), DType::F16);
    assert_allclose_f32(&to_f32_vec(&r), &[1.5, 2.5], 1e-3, 1e-3, "f16 + scalar");
}

#[test]
fn test_scalar_rules() {
    let client = create_client();
    let a = array(&client, &[1i16, 2], &[2]);

    let err = client.add(&a, 0.5f32, Output::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "scalar", .. }));

    let err = client.add(&a, 40_000i32, Output::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "scalar", .. }));

    let u = array(&client, &[1u32], &[1]);
    let err = client.add(&u, -1i8, Output::new()).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_two_scalars_rejected() {
    let client = create_client();
    let err = client.add(1.0f32, 2.0f32, Output::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "lhs", .. }));
    let err = client.multiply(Scalar::Int(2), Scalar::UInt(3), Output::new()).unwrap_err();
    assert!(err.is_invalid_argument());
}

// ============================================================================
// Output handling and failures
// ============================================================================

#[test]
fn test_into_out_and_in_place() {
    let client = create_client();
    let a = array(&client, &[1i64, 2, 3], &[3]);
    let b = array(&client, &[10i64, 20, 30], &[3]);
    let out = DeviceArray::for_host(client.device(), &[3], DType::I64, false);

    let r = client.add(&a, &b, Output::into(&out)).unwrap();
    assert!(r.shares_storage(&out));
    assert_eq!(out.to_vec::<i64>().unwrap(), [11, 22, 33]);

    client.multiply(&b, &b, Output::into(&b)).unwrap();
    assert_eq!(b.to_vec::<i64>().unwrap(), [100, 400, 900]);

    client.subtract(&a, &out, Output::into(&out)).unwrap();
    assert_eq!(out.to_vec::<i64>().unwrap(), [-10, -20, -30]);
}

#[test]
fn test_device_visible_allocation() {
    let client = create_client();
    let a = array(&client, &[1.0f32], &[1]);

    let r = client.add(&a, 1.0f32, Output::device_visible()).unwrap();
    assert!(r.is_device_visible());
    let r = client.add(&a, 1.0f32, Output::new()).unwrap();
    assert!(!r.is_device_visible());
}

#[test]
fn test_failures_leave_out_untouched() {
    let client = create_client();
    let a = array(&client, &[6i32, 8], &[2]);
    let zero = array(&client, &[3i32, 0], &[2]);
    let short = array(&client, &[1i32], &[1]);
    let out = array(&client, &[-1i32, -1], &[2]);

    let err = client.divide(&a, &zero, Output::into(&out)).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "rhs", .. }));
    let err = client.divide(&a, 0i32, Output::into(&out)).unwrap_err();
    assert!(err.is_invalid_argument());
    let err = client.add(&a, &short, Output::into(&out)).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
    let err = client.add(&a, 1.5f64, Output::into(&out)).unwrap_err();
    assert!(err.is_invalid_argument());

    let floats = array(&client, &[1.0f32, 2.0], &[2]);
    let err = client.add(&a, &floats, Output::into(&out)).unwrap_err();
    assert!(matches!(err, Error::DTypeMismatch { arg: "out", .. }));

    assert_eq!(out.to_vec::<i32>().unwrap(), [-1, -1]);
}

#[test]
fn test_unsupported_promoted_dtype() {
    let client = create_client();
    let bools = DeviceArray::for_host(client.device(), &[2], DType::Bool, false);
    let err = client.add(&bools, &bools, Output::new()).unwrap_err();
    assert_eq!(err, Error::unsupported_dtype(DType::Bool, "add"));
}

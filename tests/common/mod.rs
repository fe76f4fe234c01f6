//! Common test utilities
#![allow(dead_code)]

use hostops::array::DeviceArray;
use hostops::dtype::Element;
use hostops::runtime::{HostClient, HostConfig};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per test binary
///
/// Honors `RUST_LOG`, e.g. `RUST_LOG=hostops=debug cargo test`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Create a host client with default configuration
pub fn create_client() -> HostClient {
    init_tracing();
    HostClient::new()
}

/// Create a host client with a custom configuration
pub fn create_client_with(config: HostConfig) -> HostClient {
    init_tracing();
    HostClient::with_config(config)
}

/// Build an array on the client's device
pub fn array<T: Element>(client: &HostClient, data: &[T], shape: &[usize]) -> DeviceArray {
    DeviceArray::from_slice(data, shape, client.device()).unwrap()
}

/// Assert two f32 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Decode any float array to f32 for comparison
pub fn to_f32_vec(array: &DeviceArray) -> Vec<f32> {
    use hostops::dtype::{BF16, DType, FP8E4M3FN, FP8E4M3FNUZ};

    match array.dtype() {
        DType::F32 => array.to_vec::<f32>().unwrap(),
        DType::F64 => array.to_vec::<f64>().unwrap().into_iter().map(|v| v as f32).collect(),
        DType::F16 => array.to_vec::<half::f16>().unwrap().into_iter().map(f32::from).collect(),
        DType::BF16 => array.to_vec::<BF16>().unwrap().into_iter().map(f32::from).collect(),
        DType::FP8E4M3FN => array.to_vec::<FP8E4M3FN>().unwrap().into_iter().map(f32::from).collect(),
        DType::FP8E4M3FNUZ => array.to_vec::<FP8E4M3FNUZ>().unwrap().into_iter().map(f32::from).collect(),
        other => panic!("not a float dtype: {other}"),
    }
}

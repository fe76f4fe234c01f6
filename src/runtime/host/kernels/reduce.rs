//! Reduction and normalization kernels
//!
//! All kernels here see their input as `outer_size * reduce_size * inner_size`
//! contiguous elements, where the middle extent is the axis being reduced.
//! Element `(o, r, i)` lives at `o * reduce_size * inner_size + r * inner_size + i`.

use crate::dtype::Element;

/// Argmax along a dimension - returns indices of maximum values
///
/// Ties resolve to the lowest index. NaN never compares greater, so it is
/// only selected when it sits at index 0.
///
/// # Arguments
/// * `a` - Input (outer_size * reduce_size * inner_size elements)
/// * `out` - Output (outer_size * inner_size) i64 indices
/// * `outer_size` - Product of dimensions before the reduction dimension
/// * `reduce_size` - Size of the dimension being reduced, at least 1
/// * `inner_size` - Product of dimensions after the reduction dimension
#[inline]
pub fn argmax_kernel<T: Element>(
    a: &[T],
    out: &mut [i64],
    outer_size: usize,
    reduce_size: usize,
    inner_size: usize,
) {
    for outer in 0..outer_size {
        for inner in 0..inner_size {
            // Base index for this (outer, inner) position
            let base_idx = outer * reduce_size * inner_size + inner;

            let mut max_val = a[base_idx].to_f64();
            let mut max_idx: i64 = 0;

            for r in 1..reduce_size {
                let val = a[base_idx + r * inner_size].to_f64();
                if val > max_val {
                    max_val = val;
                    max_idx = r as i64;
                }
            }

            out[outer * inner_size + inner] = max_idx;
        }
    }
}

/// Softmax along a dimension
///
/// softmax(x)[i] = exp(x[i] - max(x)) / sum(exp(x - max(x)))
///
/// Computed in f64 and encoded once per element.
#[inline]
pub fn softmax_kernel<T: Element>(
    a: &[T],
    out: &mut [T],
    outer_size: usize,
    dim_size: usize,
    inner_size: usize,
) {
    for_each_lane(a, out, outer_size, dim_size, inner_size, |lane| {
        let max_val = lane_max(lane);
        let mut exp_sum = 0.0f64;
        for val in lane.iter_mut() {
            *val = (*val - max_val).exp();
            exp_sum += *val;
        }

        let inv_sum = 1.0 / exp_sum;
        for val in lane.iter_mut() {
            *val *= inv_sum;
        }
    });
}

/// Log-softmax along a dimension
///
/// log_softmax(x)[i] = (x[i] - max(x)) - ln(sum(exp(x - max(x))))
#[inline]
pub fn log_softmax_kernel<T: Element>(
    a: &[T],
    out: &mut [T],
    outer_size: usize,
    dim_size: usize,
    inner_size: usize,
) {
    for_each_lane(a, out, outer_size, dim_size, inner_size, |lane| {
        let max_val = lane_max(lane);
        for val in lane.iter_mut() {
            *val -= max_val;
        }

        let log_sum = lane.iter().map(|v| v.exp()).sum::<f64>().ln();
        for val in lane.iter_mut() {
            *val -= log_sum;
        }
    });
}

fn lane_max(lane: &[f64]) -> f64 {
    lane.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Gather each lane along the middle extent into an f64 buffer, transform it
/// in place, and scatter the result
fn for_each_lane<T: Element>(
    a: &[T],
    out: &mut [T],
    outer_size: usize,
    dim_size: usize,
    inner_size: usize,
    mut f: impl FnMut(&mut [f64]),
) {
    // Pre-allocate reusable buffer for the lane
    let mut lane = vec![0.0f64; dim_size];

    for outer in 0..outer_size {
        for inner in 0..inner_size {
            let base_idx = outer * dim_size * inner_size + inner;

            for (d, slot) in lane.iter_mut().enumerate() {
                *slot = a[base_idx + d * inner_size].to_f64();
            }

            f(&mut lane);

            for (d, &val) in lane.iter().enumerate() {
                out[base_idx + d * inner_size] = T::from_f64(val);
            }
        }
    }
}

//! Selection kernels

use crate::dtype::Element;

/// Partial sort of indices along a dimension
///
/// For each lane, positions `[0, k)` receive the indices of the `k` smallest
/// values in unspecified order, position `k` the index of the k-th smallest,
/// and positions after `k` the indices of values no smaller than it. Values
/// are ordered by `f64::total_cmp`, so NaN sorts after every number.
///
/// # Arguments
/// * `a` - Input (outer_size * dim_size * inner_size elements)
/// * `out` - Output indices, same element count as `a`
/// * `k` - Partition point, `k < dim_size`
#[inline]
pub fn argpartition_kernel<T: Element>(
    a: &[T],
    out: &mut [i64],
    outer_size: usize,
    dim_size: usize,
    inner_size: usize,
    k: usize,
) {
    let mut values = vec![0.0f64; dim_size];
    let mut indices: Vec<usize> = Vec::with_capacity(dim_size);

    for outer in 0..outer_size {
        for inner in 0..inner_size {
            let base_idx = outer * dim_size * inner_size + inner;

            for (d, slot) in values.iter_mut().enumerate() {
                *slot = a[base_idx + d * inner_size].to_f64();
            }
            indices.clear();
            indices.extend(0..dim_size);
            indices.select_nth_unstable_by(k, |&i, &j| values[i].total_cmp(&values[j]));

            for (d, &idx) in indices.iter().enumerate() {
                out[base_idx + d * inner_size] = idx as i64;
            }
        }
    }
}

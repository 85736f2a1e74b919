//! Row renormalization kernel

use super::parallel_for;
use super::reduce::REDUCE_TILE;
use crate::dtype::Element;

/// Epsilon added to the norm before dividing, so rows sitting exactly on
/// the bound scale by slightly less than 1 instead of dividing by zero.
const RENORM_EPS: f64 = 1e-7;

/// Rescale each row of a contiguous `rows x row_len` buffer whose p-norm
/// exceeds `maxnorm` by `maxnorm / (norm + 1e-7)`.
///
/// Each task owns one row: lanes of a fixed-width scratch buffer accumulate
/// `|x|^p` at `REDUCE_TILE` stride, a halving tree combines the lanes, and
/// the row is scaled in place only when its norm is over the bound.
///
/// # Safety
/// `data` must be valid for `rows * row_len` elements of `T`.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn renorm_rows_kernel<T: Element>(
    data: *mut T,
    rows: usize,
    row_len: usize,
    p: f64,
    maxnorm: f64,
) {
    let data_addr = data as usize;
    parallel_for(rows, 1, move |row| unsafe {
        let row_ptr = (data_addr as *mut T).add(row * row_len);

        let mut tile = [0.0f64; REDUCE_TILE];
        for (lane, slot) in tile.iter_mut().enumerate() {
            let mut acc = 0.0;
            let mut i = lane;
            while i < row_len {
                acc += (*row_ptr.add(i)).to_f64().abs().powf(p);
                i += REDUCE_TILE;
            }
            *slot = acc;
        }
        let mut stride = REDUCE_TILE / 2;
        while stride > 0 {
            for lane in 0..stride {
                tile[lane] += tile[lane + stride];
            }
            stride /= 2;
        }

        let norm = tile[0].powf(1.0 / p);
        if norm > maxnorm {
            let factor = maxnorm / (norm + RENORM_EPS);
            for i in 0..row_len {
                let pv = row_ptr.add(i);
                *pv = T::from_f64((*pv).to_f64() * factor);
            }
        }
    });
}

//! Pointwise transform kernels
//!
//! One generic kernel per arity; the op enums select the per-element map.
//! Every kernel is an unrestricted data-parallel loop over a flat,
//! contiguous element range with no cross-element ordering.

use super::{parallel_for, PAR_MIN_LEN};
use crate::dtype::Element;
use crate::ops::{BinaryOp, CompareOp, UnaryOp};

/// Apply a unary map: `out[i] = op(a[i])`.
///
/// # Safety
/// `a` and `out` must be valid for `len` elements of `T`. They may alias
/// only if they are equal.
pub unsafe fn unary_kernel<T: Element>(op: UnaryOp, a: *const T, out: *mut T, len: usize) {
    let a_addr = a as usize;
    let out_addr = out as usize;
    parallel_for(len, PAR_MIN_LEN, move |i| unsafe {
        let a = a_addr as *const T;
        let out = out_addr as *mut T;
        *out.add(i) = T::from_f64(op.apply((*a.add(i)).to_f64()));
    });
}

/// Apply a binary map against a scalar: `out[i] = op(a[i], scalar)`.
///
/// # Safety
/// `a` and `out` must be valid for `len` elements of `T`.
pub unsafe fn scalar_kernel<T: Element>(
    op: BinaryOp,
    a: *const T,
    scalar: f64,
    out: *mut T,
    len: usize,
) {
    let a_addr = a as usize;
    let out_addr = out as usize;
    parallel_for(len, PAR_MIN_LEN, move |i| unsafe {
        let a = a_addr as *const T;
        let out = out_addr as *mut T;
        *out.add(i) = T::from_f64(op.apply((*a.add(i)).to_f64(), scalar));
    });
}

/// Apply a binary map with a scaled right operand:
/// `out[i] = op(a[i], alpha * b[i])`.
///
/// With `alpha = 1` this is the plain pairwise op; `Add` with an arbitrary
/// alpha is the scaled accumulate (`a + alpha * b`).
///
/// # Safety
/// `a`, `b`, and `out` must be valid for `len` elements of `T`.
pub unsafe fn binary_kernel<T: Element>(
    op: BinaryOp,
    a: *const T,
    alpha: f64,
    b: *const T,
    out: *mut T,
    len: usize,
) {
    let a_addr = a as usize;
    let b_addr = b as usize;
    let out_addr = out as usize;
    parallel_for(len, PAR_MIN_LEN, move |i| unsafe {
        let a = a_addr as *const T;
        let b = b_addr as *const T;
        let out = out_addr as *mut T;
        *out.add(i) = T::from_f64(op.apply((*a.add(i)).to_f64(), alpha * (*b.add(i)).to_f64()));
    });
}

/// Fused triad: `out[i] = t[i] + value * op(s1[i], s2[i])` with `op` being
/// `Mul` or `Div`.
///
/// # Safety
/// All pointers must be valid for `len` elements of `T`.
pub unsafe fn addc_kernel<T: Element>(
    op: BinaryOp,
    t: *const T,
    value: f64,
    s1: *const T,
    s2: *const T,
    out: *mut T,
    len: usize,
) {
    let t_addr = t as usize;
    let s1_addr = s1 as usize;
    let s2_addr = s2 as usize;
    let out_addr = out as usize;
    parallel_for(len, PAR_MIN_LEN, move |i| unsafe {
        let t = t_addr as *const T;
        let s1 = s1_addr as *const T;
        let s2 = s2_addr as *const T;
        let out = out_addr as *mut T;
        let v = op.apply((*s1.add(i)).to_f64(), (*s2.add(i)).to_f64());
        *out.add(i) = T::from_f64((*t.add(i)).to_f64() + value * v);
    });
}

/// Clamp every element into `[min, max]`.
///
/// # Safety
/// `a` and `out` must be valid for `len` elements of `T`.
pub unsafe fn clamp_kernel<T: Element>(a: *const T, min: f64, max: f64, out: *mut T, len: usize) {
    let a_addr = a as usize;
    let out_addr = out as usize;
    parallel_for(len, PAR_MIN_LEN, move |i| unsafe {
        let a = a_addr as *const T;
        let out = out_addr as *mut T;
        let x = (*a.add(i)).to_f64();
        let y = if x < min {
            min
        } else if x > max {
            max
        } else {
            x
        };
        *out.add(i) = T::from_f64(y);
    });
}

/// Compare against a scalar, writing 0/1 flags in the input dtype.
///
/// The comparison runs in the element's own domain, not through f64.
///
/// # Safety
/// `a` and `out` must be valid for `len` elements of `T`.
pub unsafe fn compare_scalar_kernel<T: Element>(
    op: CompareOp,
    a: *const T,
    scalar: f64,
    out: *mut T,
    len: usize,
) {
    let a_addr = a as usize;
    let out_addr = out as usize;
    let s = T::from_f64(scalar);
    parallel_for(len, PAR_MIN_LEN, move |i| unsafe {
        let a = a_addr as *const T;
        let out = out_addr as *mut T;
        *out.add(i) = if op.holds(*a.add(i), s) {
            T::one()
        } else {
            T::zero()
        };
    });
}

/// Compare two tensors elementwise, writing 0/1 flags in the input dtype.
///
/// # Safety
/// `a`, `b`, and `out` must be valid for `len` elements of `T`.
pub unsafe fn compare_kernel<T: Element>(
    op: CompareOp,
    a: *const T,
    b: *const T,
    out: *mut T,
    len: usize,
) {
    let a_addr = a as usize;
    let b_addr = b as usize;
    let out_addr = out as usize;
    parallel_for(len, PAR_MIN_LEN, move |i| unsafe {
        let a = a_addr as *const T;
        let b = b_addr as *const T;
        let out = out_addr as *mut T;
        *out.add(i) = if op.holds(*a.add(i), *b.add(i)) {
            T::one()
        } else {
            T::zero()
        };
    });
}

/// Fill a buffer with a constant.
///
/// # Safety
/// `out` must be valid for `len` elements of `T`.
pub unsafe fn fill_kernel<T: Element>(out: *mut T, value: f64, len: usize) {
    let out_addr = out as usize;
    let v = T::from_f64(value);
    parallel_for(len, PAR_MIN_LEN, move |i| unsafe {
        let out = out_addr as *mut T;
        *out.add(i) = v;
    });
}

/// KL-divergence gradient with respect to the input:
/// `out[i] = target[i] > 0 ? norm * (-target[i]) : 0`.
///
/// # Safety
/// `target` and `out` must be valid for `len` elements of `T`.
pub unsafe fn kl_grad_kernel<T: Element>(target: *const T, norm: f64, out: *mut T, len: usize) {
    let target_addr = target as usize;
    let out_addr = out as usize;
    parallel_for(len, PAR_MIN_LEN, move |i| unsafe {
        let target = target_addr as *const T;
        let out = out_addr as *mut T;
        let y = (*target.add(i)).to_f64();
        *out.add(i) = T::from_f64(if y > 0.0 { norm * (-y) } else { 0.0 });
    });
}

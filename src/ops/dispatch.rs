//! DType dispatch for backend operations
//!
//! The `dispatch_dtype!` macro converts a runtime `DType` value into a
//! concrete generic type so that a single generic kernel serves every
//! element type.
//!
//! # Usage
//!
//! ```ignore
//! dispatch_dtype!(tensor.dtype(), T => {
//!     // T is now a concrete type (f32, f64, i64)
//!     unsafe { some_kernel::<T>(...) }
//! });
//! ```

/// Macro for runtime dtype dispatch to typed operations.
///
/// Takes a `DType` value and evaluates the body with `T` bound to the
/// corresponding Rust type. The match is exhaustive, so every operation is
/// available for every dtype; integer tensors route transcendental maps
/// through f64 conversion in the kernels.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block) => {
        match $dtype {
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
        }
    };
}

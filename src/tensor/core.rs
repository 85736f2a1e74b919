//! Core Tensor type

use super::{Layout, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::fmt;

/// N-dimensional array stored on a compute device
///
/// `Tensor` consists of:
/// - **Storage**: Reference-counted device memory
/// - **Layout**: Shape, strides, and offset defining the view into storage
/// - **DType**: Element type (determined at runtime)
///
/// # Zero-Copy Views
///
/// Operations like `transpose`, `narrow`, and `reshape` create new tensors
/// that share the same underlying storage, through Arc-wrapped storage and a
/// modified layout. Writes committed into shared storage are visible through
/// every live view of it.
pub struct Tensor<R: Runtime> {
    /// Device memory
    storage: Storage<R>,
    /// Shape, strides, offset
    layout: Layout,
}

impl<R: Runtime> Tensor<R> {
    /// Create a tensor from storage and layout
    pub fn from_parts(storage: Storage<R>, layout: Layout) -> Self {
        Self { storage, layout }
    }

    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape`
    /// dimensions. For a fallible alternative, use [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &R::Device) -> Self {
        Self::try_from_slice(data, shape, device).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    ///
    /// Returns an error if `data.len()` does not equal the product of the
    /// `shape` dimensions, or if memory allocation fails.
    pub fn try_from_slice<T: Element>(
        data: &[T],
        shape: &[usize],
        device: &R::Device,
    ) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        let storage = Storage::from_slice(data, device)?;
        let layout = Layout::contiguous(shape);

        Ok(Self { storage, layout })
    }

    /// Create an uninitialized tensor
    ///
    /// # Safety
    /// The contents are uninitialized. Reading before writing is undefined behavior.
    pub fn empty(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_empty(shape, dtype, device).expect("Tensor::empty failed")
    }

    /// Create an uninitialized tensor (fallible version)
    pub fn try_empty(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        let len: usize = shape.iter().product();
        let storage = Storage::new(len, dtype, device)?;
        let layout = Layout::contiguous(shape);

        Ok(Self { storage, layout })
    }

    /// Create a tensor filled with zeros
    pub fn zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_zeros(shape, dtype, device).expect("Tensor::zeros failed")
    }

    /// Create a tensor filled with zeros (fallible version)
    pub fn try_zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        Self::try_full_scalar(shape, dtype, 0.0, device)
    }

    /// Create a tensor filled with ones
    pub fn ones(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_ones(shape, dtype, device).expect("Tensor::ones failed")
    }

    /// Create a tensor filled with ones (fallible version)
    pub fn try_ones(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        Self::try_full_scalar(shape, dtype, 1.0, device)
    }

    /// Create a tensor filled with a scalar value
    ///
    /// The scalar is converted to the target dtype.
    pub fn full_scalar(shape: &[usize], dtype: DType, value: f64, device: &R::Device) -> Self {
        Self::try_full_scalar(shape, dtype, value, device).expect("Tensor::full_scalar failed")
    }

    /// Create a tensor filled with a scalar value (fallible version)
    pub fn try_full_scalar(
        shape: &[usize],
        dtype: DType,
        value: f64,
        device: &R::Device,
    ) -> Result<Self> {
        // Helper to convert a typed Vec to bytes safely.
        #[inline]
        fn typed_to_bytes<T: bytemuck::NoUninit>(v: Vec<T>) -> Vec<u8> {
            bytemuck::cast_slice::<T, u8>(&v).to_vec()
        }

        let len: usize = shape.iter().product();
        if len == 0 {
            return Self::try_empty(shape, dtype, device);
        }

        // Allocate with correct type alignment, then convert to bytes.
        let bytes: Vec<u8> = match dtype {
            DType::F32 => typed_to_bytes(vec![value as f32; len]),
            DType::F64 => typed_to_bytes(vec![value; len]),
            DType::I64 => typed_to_bytes(vec![value as i64; len]),
        };

        let storage = Storage::from_bytes(&bytes, dtype, device)?;
        let layout = Layout::contiguous(shape);

        Ok(Self { storage, layout })
    }

    // ===== Accessors =====

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get the total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// Check if the tensor is contiguous in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Check if this is a scalar (0-dimensional tensor)
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.layout.is_scalar()
    }

    /// Get size along a dimension (supports negative indexing)
    pub fn size(&self, dim: isize) -> Option<usize> {
        self.layout.dim(dim)
    }

    // ===== View Operations (Zero-Copy) =====

    /// Transpose two dimensions (zero-copy)
    pub fn transpose(&self, dim0: isize, dim1: isize) -> Result<Self> {
        let new_layout =
            self.layout
                .transpose(dim0, dim1)
                .ok_or_else(|| Error::InvalidDimension {
                    dim: dim0,
                    ndim: self.ndim(),
                })?;

        Ok(Self {
            storage: self.storage.clone(),
            layout: new_layout,
        })
    }

    /// Transpose last two dimensions (matrix transpose)
    pub fn t(&self) -> Result<Self> {
        self.transpose(-2, -1)
    }

    /// Reshape to a new shape (zero-copy, contiguous tensors only)
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        let new_layout = self.layout.reshape(shape).ok_or(Error::NotContiguous)?;

        Ok(Self {
            storage: self.storage.clone(),
            layout: new_layout,
        })
    }

    /// Flatten to 1D (zero-copy if contiguous)
    pub fn flatten(&self) -> Result<Self> {
        self.reshape(&[self.numel()])
    }

    /// Narrow a dimension (zero-copy slice)
    ///
    /// Returns a view narrowed to `length` elements starting at `start`
    /// along `dim`.
    pub fn narrow(&self, dim: isize, start: usize, length: usize) -> Result<Self> {
        let dim_idx = self
            .layout
            .normalize_dim(dim)
            .ok_or(Error::InvalidDimension {
                dim,
                ndim: self.ndim(),
            })?;

        let new_layout =
            self.layout
                .narrow(dim_idx, start, length)
                .ok_or_else(|| Error::ShapeMismatch {
                    expected: vec![self.shape()[dim_idx]],
                    got: vec![start, length],
                })?;

        Ok(Self {
            storage: self.storage.clone(),
            layout: new_layout,
        })
    }

    /// Make tensor contiguous (copy if needed)
    ///
    /// If the tensor is already contiguous, returns a view (zero-copy) that
    /// aliases the same storage. Otherwise, allocates new storage and copies
    /// the data into row-major order via `Runtime::copy_strided`.
    pub fn contiguous(&self) -> Self {
        if self.is_contiguous() {
            self.clone()
        } else {
            let dtype = self.dtype();
            let device = self.storage.device();
            let numel = self.numel();

            let new_storage =
                Storage::new(numel, dtype, device).expect("Tensor::contiguous allocation failed");
            let new_layout = Layout::contiguous(self.shape());

            let elem_size = dtype.size_in_bytes();
            let src_byte_offset = self.layout.offset() * elem_size;

            R::copy_strided(
                self.storage.ptr(),
                src_byte_offset,
                new_storage.ptr(),
                self.shape(),
                self.strides(),
                elem_size,
                device,
            )
            .expect("copy_strided failed in contiguous()");

            Self {
                storage: new_storage,
                layout: new_layout,
            }
        }
    }

    /// Commit data from `src` into this tensor's view
    ///
    /// Shapes and dtypes must match. The destination may be an arbitrary
    /// strided view; a strided destination is resolved through
    /// `Runtime::copy_to_strided`. This is the write-back half of the
    /// contiguous-scratch idiom: compute into a contiguous temporary, then
    /// commit the result into the original (possibly strided) view.
    pub fn copy_from(&self, src: &Self) -> Result<()> {
        if self.shape() != src.shape() {
            return Err(Error::shape_mismatch(self.shape(), src.shape()));
        }
        if self.dtype() != src.dtype() {
            return Err(Error::DTypeMismatch {
                lhs: self.dtype(),
                rhs: src.dtype(),
            });
        }

        let elem_size = self.dtype().size_in_bytes();
        let device = self.storage.device();
        let src_c = if src.is_contiguous() {
            src.clone()
        } else {
            src.contiguous()
        };

        if self.is_contiguous() {
            R::copy_within_device(
                src_c.storage.ptr(),
                self.storage.ptr(),
                self.numel() * elem_size,
                device,
            )?;
        } else {
            R::copy_to_strided(
                src_c.storage.ptr(),
                self.storage.ptr(),
                self.layout.offset() * elem_size,
                self.shape(),
                self.strides(),
                elem_size,
                device,
            )?;
        }

        Ok(())
    }

    // ===== Data Access =====

    /// Copy tensor data to a Vec on the host
    ///
    /// This is a host synchronization point. The tensor must be contiguous.
    ///
    /// # Panics
    ///
    /// Panics if the tensor is not contiguous, or if `T` does not match the
    /// tensor's dtype.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        assert!(
            self.is_contiguous(),
            "Tensor must be contiguous to copy to vec"
        );
        assert_eq!(
            T::DTYPE,
            self.dtype(),
            "to_vec element type must match tensor dtype"
        );

        let numel = self.numel();
        let elem_size = std::mem::size_of::<T>();
        let byte_offset = self.layout.offset() * elem_size;

        let mut result = vec![T::zeroed(); numel];
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut result);
        let src_ptr = self.storage.ptr() as usize + byte_offset;
        R::copy_from_device(src_ptr as u64, bytes, self.storage.device())
            .expect("copy_from_device failed in to_vec()");
        result
    }

    /// Extract the scalar value from a single-element tensor
    ///
    /// This is the idiomatic way to get a scalar out of a tensor for use in
    /// host control flow, and a host synchronization point.
    ///
    /// Errors with `DTypeMismatch` when `T` does not match the tensor's
    /// dtype, and with `ShapeMismatch` when the tensor holds more than one
    /// element.
    pub fn item<T: Element>(&self) -> Result<T> {
        if T::DTYPE != self.dtype() {
            return Err(Error::DTypeMismatch {
                lhs: T::DTYPE,
                rhs: self.dtype(),
            });
        }
        if self.numel() != 1 {
            return Err(Error::ShapeMismatch {
                expected: vec![1],
                got: self.shape().to_vec(),
            });
        }

        let tensor = if self.is_contiguous() {
            std::borrow::Cow::Borrowed(self)
        } else {
            std::borrow::Cow::Owned(self.contiguous())
        };

        let elem_size = std::mem::size_of::<T>();
        let byte_offset = tensor.layout.offset() * elem_size;
        let src_ptr = (tensor.storage.ptr() as usize + byte_offset) as u64;

        let mut result = T::zeroed();
        let bytes: &mut [u8] = bytemuck::bytes_of_mut(&mut result);
        R::copy_from_device(src_ptr, bytes, tensor.storage.device())?;
        Ok(result)
    }
}

impl<R: Runtime> Clone for Tensor<R> {
    /// Clone creates a new tensor sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl<R: Runtime> fmt::Debug for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

impl<R: Runtime> fmt::Display for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({:?}, dtype={})", self.shape(), self.dtype())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_from_slice() {
        let device = CpuDevice::new();
        let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let tensor = Tensor::<CpuRuntime>::from_slice(&data, &[2, 3], &device);

        assert_eq!(tensor.shape(), &[2, 3]);
        assert_eq!(tensor.dtype(), DType::F32);
        assert!(tensor.is_contiguous());
        assert_eq!(tensor.numel(), 6);

        let result: Vec<f32> = tensor.to_vec();
        assert_eq!(result, data);
    }

    #[test]
    fn test_from_slice_shape_mismatch() {
        let device = CpuDevice::new();
        let result = Tensor::<CpuRuntime>::try_from_slice(&[1.0f32, 2.0], &[3], &device);
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_contiguous_from_transpose() {
        let device = CpuDevice::new();
        let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let tensor = Tensor::<CpuRuntime>::from_slice(&data, &[2, 3], &device);

        let transposed = tensor.transpose(0, 1).unwrap();
        assert!(!transposed.is_contiguous());

        let contiguous = transposed.contiguous();
        assert!(contiguous.is_contiguous());
        assert_eq!(contiguous.shape(), &[3, 2]);

        let result: Vec<f32> = contiguous.to_vec();
        assert_eq!(result, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_copy_from_strided_destination() {
        let device = CpuDevice::new();
        let dst = Tensor::<CpuRuntime>::zeros(&[3, 2], DType::F32, &device);
        let view = dst.transpose(0, 1).unwrap(); // [2, 3] strided view

        let src =
            Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);
        view.copy_from(&src).unwrap();

        // dst is the transpose of src
        let result: Vec<f32> = dst.to_vec();
        assert_eq!(result, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_item_scalar() {
        let device = CpuDevice::new();

        let tensor = Tensor::<CpuRuntime>::from_slice(&[42.0f64], &[1], &device);
        let val: f64 = tensor.item().unwrap();
        assert!((val - 42.0).abs() < 1e-10);

        let tensor = Tensor::<CpuRuntime>::from_slice(&[7i64], &[1, 1, 1], &device);
        let val: i64 = tensor.item().unwrap();
        assert_eq!(val, 7);
    }

    #[test]
    fn test_item_dtype_mismatch() {
        let device = CpuDevice::new();
        let tensor = Tensor::<CpuRuntime>::from_slice(&[7.0f32], &[1], &device);

        assert!(matches!(
            tensor.item::<f64>(),
            Err(Error::DTypeMismatch { .. })
        ));
        assert_eq!(tensor.item::<f32>().unwrap(), 7.0);
    }

    #[test]
    #[should_panic(expected = "element type must match tensor dtype")]
    fn test_to_vec_dtype_mismatch_panics() {
        let device = CpuDevice::new();
        let tensor = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[4], &device);
        let _ = tensor.to_vec::<f64>();
    }

    #[test]
    fn test_full_scalar() {
        let device = CpuDevice::new();
        let tensor = Tensor::<CpuRuntime>::full_scalar(&[2, 2], DType::I64, 42.0, &device);

        assert_eq!(tensor.shape(), &[2, 2]);
        let result: Vec<i64> = tensor.to_vec();
        assert_eq!(result, [42, 42, 42, 42]);
    }
}

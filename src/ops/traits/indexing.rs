//! Index gather/scatter operations

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Gather and scatter along one dimension through an i64 index vector
///
/// Indices are 1-based: valid entries are `1..=size(dim)`. Every index is
/// validated on the host before any memory is touched, so an error return
/// means no operand was modified. Duplicate indices in a scatter resolve to
/// the last occurrence.
pub trait IndexingOps<R: Runtime> {
    /// Gather rows of `src` along `dim` into a fresh tensor of the same
    /// shape with `dim` resized to the index count
    fn index_select(
        &self,
        src: &Tensor<R>,
        dim: usize,
        indices: &Tensor<R>,
    ) -> Result<Tensor<R>>;

    /// Scatter rows of `src` into `dst` along `dim`, in place
    ///
    /// `src` must have the shape of `dst` with `dim` resized to the index
    /// count.
    fn index_copy(
        &self,
        dst: &Tensor<R>,
        dim: usize,
        indices: &Tensor<R>,
        src: &Tensor<R>,
    ) -> Result<()>;

    /// Fill the selected rows of `dst` along `dim` with a constant, in place
    fn index_fill(
        &self,
        dst: &Tensor<R>,
        dim: usize,
        indices: &Tensor<R>,
        value: f64,
    ) -> Result<()>;
}

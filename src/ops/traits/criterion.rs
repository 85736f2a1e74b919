//! Training criteria

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Pointwise loss criteria
///
/// `input` holds log-probabilities and `target` probabilities; the two must
/// match in dtype and element count. With `size_average` the loss and
/// gradient are normalized by the element count.
pub trait CriterionOps<R: Runtime> {
    /// KL-divergence loss: `sum over i of target[i] > 0 ?
    /// target[i] * (ln(target[i]) - input[i]) : 0`, averaged when
    /// `size_average` is set
    fn kl_div_loss(&self, input: &Tensor<R>, target: &Tensor<R>, size_average: bool)
        -> Result<f64>;

    /// Gradient of [`kl_div_loss`] with respect to `input`:
    /// `target[i] > 0 ? -norm * target[i] : 0` where `norm` is `2 / n` when
    /// `size_average` is set and `2` otherwise
    ///
    /// [`kl_div_loss`]: CriterionOps::kl_div_loss
    fn kl_div_grad(
        &self,
        input: &Tensor<R>,
        target: &Tensor<R>,
        size_average: bool,
    ) -> Result<Tensor<R>>;
}

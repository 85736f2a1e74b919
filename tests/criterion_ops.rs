//! KL-divergence criterion

use gtensor::prelude::*;

fn setup() -> (CpuDevice, CpuClient) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (device, client)
}

const INPUT: [f64; 3] = [0.1, 0.2, 0.7];
const TARGET: [f64; 3] = [0.2, 0.3, 0.5];

fn reference_loss() -> f64 {
    INPUT
        .iter()
        .zip(TARGET)
        .map(|(&x, y)| if y > 0.0 { y * (y.ln() - x) } else { 0.0 })
        .sum()
}

#[test]
fn test_loss_sum_and_average() {
    let (device, client) = setup();
    let input = Tensor::<CpuRuntime>::from_slice(&INPUT, &[3], &device);
    let target = Tensor::<CpuRuntime>::from_slice(&TARGET, &[3], &device);

    let summed = client.kl_div_loss(&input, &target, false).unwrap();
    assert!((summed - reference_loss()).abs() < 1e-12);

    let averaged = client.kl_div_loss(&input, &target, true).unwrap();
    assert!((averaged - reference_loss() / 3.0).abs() < 1e-12);
}

#[test]
fn test_gradient() {
    let (device, client) = setup();
    let input = Tensor::<CpuRuntime>::from_slice(&INPUT, &[3], &device);
    let target = Tensor::<CpuRuntime>::from_slice(&TARGET, &[3], &device);

    let grad = client.kl_div_grad(&input, &target, false).unwrap();
    assert_eq!(grad.shape(), input.shape());
    let g: Vec<f64> = grad.to_vec();
    for (gi, y) in g.iter().zip(TARGET) {
        assert!((gi - (-2.0 * y)).abs() < 1e-12);
    }

    let g_avg: Vec<f64> = client
        .kl_div_grad(&input, &target, true)
        .unwrap()
        .to_vec();
    for (gi, y) in g_avg.iter().zip(TARGET) {
        assert!((gi - (-2.0 * y / 3.0)).abs() < 1e-12);
    }
}

#[test]
fn test_zero_target_entries_are_inert() {
    let (device, client) = setup();
    let input = Tensor::<CpuRuntime>::from_slice(&[5.0f64, -5.0], &[2], &device);
    let target = Tensor::<CpuRuntime>::from_slice(&[0.0f64, 0.0], &[2], &device);

    // y * (ln y - x) is taken as 0 when y = 0, not NaN
    assert_eq!(client.kl_div_loss(&input, &target, false).unwrap(), 0.0);
    let g: Vec<f64> = client.kl_div_grad(&input, &target, false).unwrap().to_vec();
    assert_eq!(g, [0.0, 0.0]);
}

#[test]
fn test_strided_operands() {
    let (device, client) = setup();
    let input = Tensor::<CpuRuntime>::from_slice(&INPUT, &[3], &device);

    let padded = Tensor::<CpuRuntime>::from_slice(&[9.0f64, 0.2, 0.3, 0.5], &[4], &device);
    let target = padded.narrow(0, 1, 3).unwrap();

    let loss = client.kl_div_loss(&input, &target, false).unwrap();
    assert!((loss - reference_loss()).abs() < 1e-12);
}

#[test]
fn test_operand_mismatch() {
    let (device, client) = setup();
    let input = Tensor::<CpuRuntime>::zeros(&[3], DType::F64, &device);
    let target = Tensor::<CpuRuntime>::zeros(&[2], DType::F64, &device);
    assert!(matches!(
        client.kl_div_loss(&input, &target, false),
        Err(Error::ShapeMismatch { .. })
    ));
    assert!(matches!(
        client.kl_div_grad(&input, &target, false),
        Err(Error::ShapeMismatch { .. })
    ));
}

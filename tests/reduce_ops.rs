//! Reduction engine: both dimension strategies, identity seeding, and
//! whole-tensor reductions

use gtensor::prelude::*;

fn setup() -> (CpuDevice, CpuClient) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (device, client)
}

#[test]
fn test_sum_innermost_dimension() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);
    let r = client.sum(&t, 1).unwrap();
    assert_eq!(r.shape(), &[2, 1]);
    assert_eq!(r.to_vec::<f32>(), [6.0, 15.0]);
}

#[test]
fn test_sum_outer_dimension() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);
    let r = client.sum(&t, 0).unwrap();
    assert_eq!(r.shape(), &[1, 3]);
    assert_eq!(r.to_vec::<f32>(), [5.0, 7.0, 9.0]);
}

#[test]
fn test_prod_max_min_along_dim() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);

    assert_eq!(client.prod(&t, 1).unwrap().to_vec::<f64>(), [6.0, 120.0]);
    assert_eq!(client.max(&t, 1).unwrap().to_vec::<f64>(), [3.0, 6.0]);
    assert_eq!(client.min(&t, 0).unwrap().to_vec::<f64>(), [1.0, 2.0, 3.0]);
}

#[test]
fn test_reduce_matches_on_strided_input() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);
    let view = t.transpose(0, 1).unwrap(); // [[1, 4], [2, 5], [3, 6]]

    let from_view: Vec<f32> = client.sum(&view, 0).unwrap().to_vec();
    let from_copy: Vec<f32> = client.sum(&view.contiguous(), 0).unwrap().to_vec();
    assert_eq!(from_view, from_copy);
    assert_eq!(from_view, [6.0, 15.0]);
}

#[test]
fn test_single_element_reduction_returns_it() {
    let (device, client) = setup();
    // Identity seeding must not leak into a one-element reduction
    let t = Tensor::<CpuRuntime>::from_slice(&[-42.0f32], &[1], &device);
    assert_eq!(client.max(&t, 0).unwrap().to_vec::<f32>(), [-42.0]);
    assert_eq!(client.min(&t, 0).unwrap().to_vec::<f32>(), [-42.0]);
    assert_eq!(client.maxall(&t).unwrap(), -42.0);
}

#[test]
fn test_reduce_empty_extent_yields_identity() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::zeros(&[2, 0, 3], DType::F32, &device);

    let s = client.sum(&t, 1).unwrap();
    assert_eq!(s.shape(), &[2, 1, 3]);
    assert_eq!(s.to_vec::<f32>(), [0.0; 6]);

    let p = client.prod(&t, 1).unwrap();
    assert_eq!(p.to_vec::<f32>(), [1.0; 6]);

    let m = client.max(&t, 1).unwrap();
    assert_eq!(m.to_vec::<f32>(), [f32::MIN; 6]);
}

#[test]
fn test_four_dimensional_reduction() {
    let (device, client) = setup();
    let data: Vec<f64> = (1..=16).map(|i| i as f64).collect();
    let t = Tensor::<CpuRuntime>::from_slice(&data, &[2, 2, 2, 2], &device);

    let r = client.sum(&t, 2).unwrap();
    assert_eq!(r.shape(), &[2, 2, 1, 2]);
    assert_eq!(
        r.to_vec::<f64>(),
        [4.0, 6.0, 12.0, 14.0, 20.0, 22.0, 28.0, 30.0]
    );
    assert_eq!(client.sumall(&r).unwrap(), 136.0);
}

#[test]
fn test_rank_limit_enforced() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::zeros(&[1, 1, 1, 1, 2], DType::F32, &device);
    assert!(matches!(
        client.sum(&t, 4),
        Err(Error::UnsupportedRank { ndim: 5, .. })
    ));
}

#[test]
fn test_invalid_dimension() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::zeros(&[2, 3], DType::F32, &device);
    assert!(matches!(
        client.sum(&t, 2),
        Err(Error::InvalidDimension { dim: 2, ndim: 2 })
    ));
}

#[test]
fn test_mean_and_norm_along_dim() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);

    assert_eq!(client.mean(&t, 1).unwrap().to_vec::<f64>(), [2.0, 5.0]);

    let n1: Vec<f64> = client.norm(&t, 1.0, 1).unwrap().to_vec();
    assert_eq!(n1, [6.0, 15.0]);

    let n2: Vec<f64> = client.norm(&t, 2.0, 1).unwrap().to_vec();
    assert!((n2[0] - 14.0f64.sqrt()).abs() < 1e-12);
    assert!((n2[1] - 77.0f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_whole_tensor_reductions() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);

    assert_eq!(client.sumall(&t).unwrap(), 10.0);
    assert_eq!(client.prodall(&t).unwrap(), 24.0);
    assert_eq!(client.maxall(&t).unwrap(), 4.0);
    assert_eq!(client.minall(&t).unwrap(), 1.0);
    assert_eq!(client.meanall(&t).unwrap(), 2.5);

    let var = client.varall(&t).unwrap();
    assert!((var - 5.0 / 3.0).abs() < 1e-12);
    assert!((client.stdall(&t).unwrap() - var.sqrt()).abs() < 1e-12);
}

#[test]
fn test_normall() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 0.0, -2.0, 0.0], &[4], &device);

    // p = 0 counts non-zeros and takes no root
    assert_eq!(client.normall(&t, 0.0).unwrap(), 2.0);
    assert_eq!(client.normall(&t, 1.0).unwrap(), 3.0);
    assert!((client.normall(&t, 2.0).unwrap() - 5.0f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_dot_and_dist() {
    let (device, client) = setup();
    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0], &[3], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[4.0f64, 5.0, 6.0], &[3], &device);

    assert_eq!(client.dot(&a, &b).unwrap(), 32.0);

    let x = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0], &[2], &device);
    let y = Tensor::<CpuRuntime>::from_slice(&[4.0f64, 6.0], &[2], &device);
    assert!((client.dist(&x, &y, 2.0).unwrap() - 5.0).abs() < 1e-12);

    let c = Tensor::<CpuRuntime>::from_slice(&[1.0f64], &[1], &device);
    assert!(matches!(
        client.dot(&a, &c),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_empty_tensor_global_edge_cases() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::zeros(&[0], DType::F64, &device);

    assert_eq!(client.sumall(&t).unwrap(), 0.0);
    assert_eq!(client.prodall(&t).unwrap(), 1.0);
    assert!(client.maxall(&t).is_err());
    assert!(client.minall(&t).is_err());
    assert!(client.meanall(&t).is_err());
    assert!(client.varall(&t).is_err());
}

#[test]
fn test_integer_reductions_are_exact() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[5i64, -3, 7, 0], &[4], &device);
    assert_eq!(client.min(&t, 0).unwrap().to_vec::<i64>(), [-3]);
    assert_eq!(client.max(&t, 0).unwrap().to_vec::<i64>(), [7]);
    assert_eq!(client.sumall(&t).unwrap(), 9.0);
}

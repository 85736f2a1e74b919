//! Tensor view, storage sharing, and copy semantics

use gtensor::prelude::*;

fn setup() -> (CpuDevice, CpuClient) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (device, client)
}

#[test]
fn test_views_share_storage() {
    let (device, _client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);
    assert_eq!(t.storage().ref_count(), 1);
    assert!(t.storage().is_unique());
    assert_eq!(t.size(0), Some(2));
    assert_eq!(t.size(-1), Some(3));
    assert_eq!(t.size(2), None);

    let view = t.transpose(0, 1).unwrap();
    assert_eq!(t.storage().ref_count(), 2);
    assert!(!t.storage().is_unique());
    assert_eq!(view.shape(), &[3, 2]);
    assert_eq!(view.strides(), &[1, 3]);
    assert!(!view.is_contiguous());

    drop(view);
    assert_eq!(t.storage().ref_count(), 1);
}

#[test]
fn test_contiguous_on_contiguous_aliases() {
    let (device, _client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);
    let c = t.contiguous();

    // No copy: both handles point at the same buffer
    assert_eq!(c.storage().ptr(), t.storage().ptr());
    assert_eq!(t.storage().ref_count(), 2);
}

#[test]
fn test_contiguous_materializes_strided_view() {
    let (device, _client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);
    let c = t.transpose(0, 1).unwrap().contiguous();

    assert!(c.is_contiguous());
    assert_ne!(c.storage().ptr(), t.storage().ptr());
    let v: Vec<f32> = c.to_vec();
    assert_eq!(v, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
}

#[test]
fn test_narrow_offsets_into_storage() {
    let (device, _client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1i64, 2, 3, 4, 5, 6], &[6], &device);
    let n = t.narrow(0, 2, 3).unwrap();

    assert_eq!(n.shape(), &[3]);
    // Offset view: contiguity requires offset 0, so this reads via a copy
    let v: Vec<i64> = n.contiguous().to_vec();
    assert_eq!(v, [3, 4, 5]);
}

#[test]
fn test_narrow_out_of_range() {
    let (device, _client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0], &[3], &device);
    assert!(t.narrow(0, 2, 2).is_err());
    assert!(t.narrow(1, 0, 1).is_err());
}

#[test]
fn test_reshape_requires_contiguous() {
    let (device, _client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
    assert_eq!(t.reshape(&[4]).unwrap().shape(), &[4]);
    assert_eq!(t.flatten().unwrap().to_vec::<f32>(), [1.0, 2.0, 3.0, 4.0]);

    let strided = t.transpose(0, 1).unwrap();
    assert!(strided.flatten().is_err());
    assert!(matches!(
        strided.reshape(&[4]),
        Err(Error::NotContiguous)
    ));
}

#[test]
fn test_copy_from_commits_into_narrowed_view() {
    let (device, _client) = setup();
    let dst = Tensor::<CpuRuntime>::zeros(&[4], DType::F64, &device);
    let window = dst.narrow(0, 1, 2).unwrap();

    let src = Tensor::<CpuRuntime>::from_slice(&[7.0f64, 8.0], &[2], &device);
    window.copy_from(&src).unwrap();

    let v: Vec<f64> = dst.to_vec();
    assert_eq!(v, [0.0, 7.0, 8.0, 0.0]);
}

#[test]
fn test_copy_from_rejects_mismatches() {
    let (device, _client) = setup();
    let dst = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::F32, &device);

    let wrong_shape = Tensor::<CpuRuntime>::zeros(&[4], DType::F32, &device);
    assert!(matches!(
        dst.copy_from(&wrong_shape),
        Err(Error::ShapeMismatch { .. })
    ));

    let wrong_dtype = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::F64, &device);
    assert!(matches!(
        dst.copy_from(&wrong_dtype),
        Err(Error::DTypeMismatch { .. })
    ));
}

#[test]
fn test_writes_visible_through_sibling_views() {
    let (device, _client) = setup();
    let t = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::F32, &device);
    let row0 = t.narrow(0, 0, 1).unwrap();

    let src = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[1, 2], &device);
    row0.copy_from(&src).unwrap();

    let v: Vec<f32> = t.to_vec();
    assert_eq!(v, [1.0, 2.0, 0.0, 0.0]);
}

#[test]
fn test_constructors() {
    let (device, _client) = setup();

    let z = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::I64, &device);
    assert_eq!(z.to_vec::<i64>(), [0, 0, 0, 0]);

    let o = Tensor::<CpuRuntime>::ones(&[3], DType::F32, &device);
    assert_eq!(o.to_vec::<f32>(), [1.0, 1.0, 1.0]);

    let f = Tensor::<CpuRuntime>::full_scalar(&[2], DType::F64, -2.5, &device);
    assert_eq!(f.to_vec::<f64>(), [-2.5, -2.5]);
}

#[test]
fn test_item_requires_single_element() {
    let (device, _client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2], &device);
    assert!(t.item::<f32>().is_err());

    // A strided single-element view still extracts
    let first = t.narrow(0, 1, 1).unwrap();
    let v: f32 = first.item().unwrap();
    assert_eq!(v, 2.0);
}

#[test]
fn test_empty_tensor() {
    let (device, _client) = setup();
    let t = Tensor::<CpuRuntime>::zeros(&[2, 0, 3], DType::F32, &device);
    assert_eq!(t.numel(), 0);
    assert!(t.to_vec::<f32>().is_empty());
}

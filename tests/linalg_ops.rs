//! Dense matrix engine: addmv/addmm/addr over strided operands, renorm

use gtensor::prelude::*;

fn setup() -> (CpuDevice, CpuClient) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (device, client)
}

fn assert_close(got: &[f64], want: &[f64]) {
    assert_eq!(got.len(), want.len());
    for (g, w) in got.iter().zip(want) {
        assert!((g - w).abs() < 1e-9, "got {:?}, want {:?}", got, want);
    }
}

#[test]
fn test_addmv() {
    let (device, client) = setup();
    let mat = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);
    let vec = Tensor::<CpuRuntime>::from_slice(&[5.0f64, 6.0], &[2], &device);
    let t = Tensor::<CpuRuntime>::ones(&[2], DType::F64, &device);

    // 1 * [1, 1] + 1 * [[1, 2], [3, 4]] * [5, 6]
    let r: Vec<f64> = client.addmv(1.0, &t, 1.0, &mat, &vec).unwrap().to_vec();
    assert_close(&r, &[18.0, 40.0]);

    // beta and alpha scale independently
    let r: Vec<f64> = client.addmv(2.0, &t, 3.0, &mat, &vec).unwrap().to_vec();
    assert_close(&r, &[53.0, 119.0]);
}

#[test]
fn test_addmv_transposed_matrix() {
    let (device, client) = setup();
    let mat = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);
    let vec = Tensor::<CpuRuntime>::from_slice(&[5.0f64, 6.0], &[2], &device);
    let t = Tensor::<CpuRuntime>::zeros(&[2], DType::F64, &device);

    // beta = 0: t's contents are never read
    let mt = mat.t().unwrap();
    let r: Vec<f64> = client.addmv(0.0, &t, 1.0, &mt, &vec).unwrap().to_vec();
    // [[1, 3], [2, 4]] * [5, 6]
    assert_close(&r, &[23.0, 34.0]);
}

#[test]
fn test_addmv_strided_vector() {
    let (device, client) = setup();
    let mat = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);
    let t = Tensor::<CpuRuntime>::zeros(&[2], DType::F64, &device);

    // Vector taken as a narrowed window with a storage offset
    let buf = Tensor::<CpuRuntime>::from_slice(&[0.0f64, 5.0, 6.0, 0.0], &[4], &device);
    let vec = buf.narrow(0, 1, 2).unwrap();

    let r: Vec<f64> = client.addmv(0.0, &t, 1.0, &mat, &vec).unwrap().to_vec();
    assert_close(&r, &[17.0, 39.0]);
}

#[test]
fn test_addmm() {
    let (device, client) = setup();
    let m1 = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);
    let m2 = Tensor::<CpuRuntime>::from_slice(&[5.0f64, 6.0, 7.0, 8.0], &[2, 2], &device);
    let t = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 0.0, 0.0, 1.0], &[2, 2], &device);

    // 2 * I + [[1, 2], [3, 4]] * [[5, 6], [7, 8]]
    let r: Vec<f64> = client.addmm(2.0, &t, 1.0, &m1, &m2).unwrap().to_vec();
    assert_close(&r, &[21.0, 22.0, 43.0, 52.0]);
}

#[test]
fn test_addmm_rectangular() {
    let (device, client) = setup();
    let m1 = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);
    let m2 = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2], &device);
    let t = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::F64, &device);

    let r = client.addmm(0.0, &t, 1.0, &m1, &m2).unwrap();
    assert_eq!(r.shape(), &[2, 2]);
    assert_close(&r.to_vec::<f64>(), &[22.0, 28.0, 49.0, 64.0]);
}

#[test]
fn test_addmm_both_operands_transposed() {
    let (device, client) = setup();
    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 3.0, 2.0, 4.0], &[2, 2], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[5.0f64, 7.0, 6.0, 8.0], &[2, 2], &device);
    let t = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::F64, &device);

    let r: Vec<f64> = client
        .addmm(0.0, &t, 1.0, &a.t().unwrap(), &b.t().unwrap())
        .unwrap()
        .to_vec();
    // [[1, 2], [3, 4]] * [[5, 6], [7, 8]]
    assert_close(&r, &[19.0, 22.0, 43.0, 50.0]);
}

#[test]
fn test_addmm_integer_exact() {
    let (device, client) = setup();
    let m1 = Tensor::<CpuRuntime>::from_slice(&[1i64, 2, 3, 4], &[2, 2], &device);
    let m2 = Tensor::<CpuRuntime>::from_slice(&[5i64, 6, 7, 8], &[2, 2], &device);
    let t = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::I64, &device);

    let r: Vec<i64> = client.addmm(0.0, &t, 1.0, &m1, &m2).unwrap().to_vec();
    assert_eq!(r, [19, 22, 43, 50]);
}

#[test]
fn test_addmm_shape_checked() {
    let (device, client) = setup();
    let m1 = Tensor::<CpuRuntime>::zeros(&[2, 3], DType::F64, &device);
    let m2 = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::F64, &device);
    let t = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::F64, &device);

    assert!(matches!(
        client.addmm(0.0, &t, 1.0, &m1, &m2),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_addr() {
    let (device, client) = setup();
    let v1 = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0], &[2], &device);
    let v2 = Tensor::<CpuRuntime>::from_slice(&[3.0f64, 4.0, 5.0], &[3], &device);
    let t = Tensor::<CpuRuntime>::ones(&[2, 3], DType::F64, &device);

    // 0.5 * ones + 2 * outer([1, 2], [3, 4, 5])
    let r: Vec<f64> = client.addr(0.5, &t, 2.0, &v1, &v2).unwrap().to_vec();
    assert_close(&r, &[6.5, 8.5, 10.5, 12.5, 16.5, 20.5]);
}

#[test]
fn test_mv_mm_outer_conveniences() {
    let (device, client) = setup();
    let mat = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);
    let vec = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 1.0], &[2], &device);

    assert_close(&client.mv(&mat, &vec).unwrap().to_vec::<f64>(), &[3.0, 7.0]);
    assert_close(
        &client.mm(&mat, &mat).unwrap().to_vec::<f64>(),
        &[7.0, 10.0, 15.0, 22.0],
    );
    assert_close(
        &client.outer(&vec, &vec).unwrap().to_vec::<f64>(),
        &[1.0, 1.0, 1.0, 1.0],
    );
}

#[test]
fn test_renorm_rows() {
    let (device, client) = setup();
    // Row 2-norms: 5 and 0.5; only the first exceeds maxnorm = 1
    let t = Tensor::<CpuRuntime>::from_slice(&[3.0f64, 4.0, 0.3, 0.4], &[2, 2], &device);
    let r: Vec<f64> = client.renorm(&t, 2.0, 0, 1.0).unwrap().to_vec();

    let factor = 1.0 / (5.0 + 1e-7);
    assert!((r[0] - 3.0 * factor).abs() < 1e-9);
    assert!((r[1] - 4.0 * factor).abs() < 1e-9);
    assert_eq!(&r[2..], &[0.3, 0.4]);
}

#[test]
fn test_renorm_columns() {
    let (device, client) = setup();
    let t = Tensor::<CpuRuntime>::from_slice(&[3.0f64, 0.0, 4.0, 0.0], &[2, 2], &device);
    let r: Vec<f64> = client.renorm(&t, 2.0, 1, 1.0).unwrap().to_vec();

    // Column 0 has norm 5 and is rescaled; column 1 is all zero and untouched
    let factor = 1.0 / (5.0 + 1e-7);
    assert!((r[0] - 3.0 * factor).abs() < 1e-9);
    assert_eq!(r[1], 0.0);
    assert!((r[2] - 4.0 * factor).abs() < 1e-9);
    assert_eq!(r[3], 0.0);
}

#[test]
fn test_renorm_validation() {
    let (device, client) = setup();
    let vec = Tensor::<CpuRuntime>::zeros(&[4], DType::F64, &device);
    assert!(matches!(
        client.renorm(&vec, 2.0, 0, 1.0),
        Err(Error::InvalidArgument { .. })
    ));

    let mat = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::F64, &device);
    assert!(matches!(
        client.renorm(&mat, 0.0, 0, 1.0),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        client.renorm(&mat, 2.0, 0, -1.0),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_operand_dimension_checks() {
    let (device, client) = setup();
    let mat = Tensor::<CpuRuntime>::zeros(&[2, 2], DType::F64, &device);
    let vec = Tensor::<CpuRuntime>::zeros(&[2], DType::F64, &device);

    assert!(client.addmv(1.0, &vec, 1.0, &vec, &vec).is_err());
    assert!(client.addmm(1.0, &mat, 1.0, &vec, &mat).is_err());
    assert!(client.addr(1.0, &mat, 1.0, &mat, &vec).is_err());
}

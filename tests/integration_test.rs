//! End-to-end tests of the dispatching entry point

use ru_stdev::prelude::*;
use ru_stdev::Datum;
use serde_json::json;

fn filled(rows: usize, cols: usize) -> Matrix {
    let values: Vec<f64> = (1..=rows * cols).map(|v| v as f64).collect();
    Matrix::from_vec(values, [rows, cols]).expect("valid shape")
}

fn scalar(result: Option<Stdev>) -> f64 {
    result
        .and_then(|s| s.as_scalar())
        .expect("expected a scalar result")
}

#[test]
fn test_sequence_scenarios() -> Result<()> {
    let data = vec![2.0, 4.0, 5.0, 3.0, 8.0, 2.0];
    assert_eq!(scalar(stdev(Input::sequence(&data), None)?), 2.280350850198276);

    let biased = scalar(stdev(Input::sequence(&data), Some(&Options::new().bias(true)))?);
    assert!((biased - 2.0816659994661326).abs() < 1e-15);

    assert_eq!(scalar(stdev(Input::sequence(&[2.0]), None)?), 0.0);

    let empty: Vec<f64> = Vec::new();
    assert!(stdev(Input::from(&empty), None)?.is_none());
    Ok(())
}

#[test]
fn test_sequence_ignores_matrix_options() -> Result<()> {
    let data = [1_u8, 2, 3];
    let opts = Options::new().dim(2).dtype("beep");
    assert_eq!(scalar(stdev(Input::sequence(&data), Some(&opts))?), 1.0);
    Ok(())
}

#[derive(Debug)]
struct Trade {
    price: f64,
}

// Records carry no numeric value of their own and need an accessor
impl Datum for Trade {
    fn value(&self) -> Option<f64> {
        None
    }
}

#[test]
fn test_sequence_with_accessor() -> Result<()> {
    let trades: Vec<Trade> = [2.0, 4.0, 5.0, 3.0, 8.0, 2.0]
        .into_iter()
        .map(|price| Trade { price })
        .collect();

    let opts = Options::new().with_accessor(|t: &Trade, _| t.price);
    assert_eq!(
        scalar(stdev(Input::sequence(&trades), Some(&opts))?),
        2.280350850198276
    );

    let err = stdev(Input::sequence(&trades), None).unwrap_err();
    assert!(err.is_type_error());
    assert!(err.to_string().contains("element 0"));
    Ok(())
}

#[test]
fn test_identity_accessor_matches_plain_sequence() -> Result<()> {
    let data = [3.5, -1.25, 8.0, 0.0, 2.75];
    let plain = stdev(Input::sequence(&data), None)?;
    let opts = Options::new().with_accessor(|&x: &f64, _| x);
    assert_eq!(stdev(Input::sequence(&data), Some(&opts))?, plain);
    Ok(())
}

#[test]
fn test_matrix_scenarios() -> Result<()> {
    let m = filled(3, 3);

    let per_row = stdev(Input::matrix(&m), Some(&Options::new().dim(2)))?.expect("value");
    assert_eq!(per_row.as_matrix().unwrap().shape(), [3, 1]);
    assert_eq!(per_row.as_matrix().unwrap().to_string(), "1;1;1");

    let per_col = stdev(Input::matrix(&m), Some(&Options::new().dim(1)))?.expect("value");
    assert_eq!(per_col.as_matrix().unwrap().shape(), [1, 3]);
    assert_eq!(per_col.as_matrix().unwrap().to_string(), "3,3,3");

    // Default collapses columns
    let default = stdev(Input::matrix(&m), None)?.expect("value");
    assert_eq!(default, per_row);

    let m = filled(5, 5);
    let out = stdev(Input::matrix(&m), None)?
        .and_then(Stdev::into_matrix)
        .expect("matrix");
    assert!(out.iter().all(|v| v == 1.5811388300841898));

    let out = stdev(Input::matrix(&m), Some(&Options::new().dim(1).bias(true)))?
        .and_then(Stdev::into_matrix)
        .expect("matrix");
    assert!(out.iter().all(|v| v == 7.0710678118654755));
    Ok(())
}

#[test]
fn test_matrix_output_dtype() -> Result<()> {
    let m = filled(5, 5);
    let out = stdev(Input::matrix(&m), Some(&Options::new().dim(1).dtype("int32")))?
        .and_then(Stdev::into_matrix)
        .expect("matrix");
    assert_eq!(out.dtype(), DType::Int32);
    assert_eq!(out.data(), &DataBuffer::Int32(vec![7; 5]));
    Ok(())
}

#[test]
fn test_degenerate_matrix_is_a_sequence() -> Result<()> {
    let data = vec![2.0, 4.0, 5.0, 3.0, 8.0, 2.0];
    let expected = stdev(Input::sequence(&data), None)?;
    let expected_biased = stdev(Input::sequence(&data), Some(&Options::new().bias(true)))?;

    let row = Matrix::from_vec(data.clone(), [1, 6])?;
    let col = Matrix::from_vec(data, [6, 1])?;
    for m in [&row, &col] {
        assert_eq!(stdev(Input::matrix(m), None)?, expected);
        for dim in [1, 2] {
            let opts = Options::new().dim(dim).dtype("uint8");
            assert_eq!(stdev(Input::matrix(m), Some(&opts))?, expected);
        }
        let opts = Options::new().bias(true);
        assert_eq!(stdev(Input::matrix(m), Some(&opts))?, expected_biased);
    }

    let single = Matrix::from_vec(vec![42.0], [1, 1])?;
    assert_eq!(stdev(Input::matrix(&single), None)?, Some(Stdev::Scalar(0.0)));

    let empty_row = Matrix::zeros([1, 0], DType::Float64);
    assert!(stdev(Input::matrix(&empty_row), None)?.is_none());
    Ok(())
}

#[test]
fn test_degenerate_strided_views() -> Result<()> {
    let data = [2.0, 4.0, 5.0, 3.0, 8.0, 2.0];
    let expected = stdev(Input::sequence(&data), None)?;
    let expected_biased = stdev(Input::sequence(&data), Some(&Options::new().bias(true)))?;

    // Every other slot after a leading pad holds a value
    let mut padded = vec![99.0];
    for &v in &data {
        padded.extend([v, -99.0]);
    }
    let row = Matrix::from_layout(DataBuffer::from(padded.clone()), [1, 6], [13, 2], 1)?;
    let col = Matrix::from_layout(DataBuffer::from(padded), [6, 1], [2, 1], 1)?;
    let transposed = row.clone().transpose();
    assert_eq!(transposed.shape(), [6, 1]);

    // Middle column of a 6x3 row-major block
    let block: Vec<f64> = data.iter().flat_map(|&v| [-1.0, v, 1000.0]).collect();
    let middle = Matrix::from_layout(DataBuffer::from(block), [6, 1], [3, 1], 1)?;

    for m in [&row, &col, &transposed, &middle] {
        assert_eq!(m.iter().collect::<Vec<_>>(), data);
        assert_eq!(stdev(Input::matrix(m), None)?, expected);
        for dim in [1, 2] {
            let opts = Options::new().dim(dim).dtype("int8");
            assert_eq!(stdev(Input::matrix(m), Some(&opts))?, expected);
        }
        let opts = Options::new().bias(true).dim(1);
        assert_eq!(stdev(Input::matrix(m), Some(&opts))?, expected_biased);
    }
    Ok(())
}

#[test]
fn test_zero_sized_matrix() -> Result<()> {
    for shape in [[0, 10], [10, 0], [0, 0]] {
        let m = Matrix::zeros(shape, DType::Float64);
        assert!(stdev(Input::matrix(&m), None)?.is_none());
        assert!(stdev(Input::matrix(&m), Some(&Options::new().dim(1)))?.is_none());
    }
    Ok(())
}

#[test]
fn test_invalid_options_are_rejected_before_computation() {
    let m = filled(3, 3);

    match stdev(Input::matrix(&m), Some(&Options::new().dtype("beep"))) {
        Err(RuStdevError::UnknownDType { dtype }) => assert_eq!(dtype, "beep"),
        other => panic!("Expected UnknownDType error, got {other:?}"),
    }

    let err = stdev(Input::matrix(&m), Some(&Options::new().dim(3))).unwrap_err();
    assert!(err.is_range_error());
    assert!(err.to_string().contains('3'));

    let err = stdev(Input::matrix(&m), Some(&Options::new().dim(0))).unwrap_err();
    assert!(err.is_type_error());

    // Validation still runs on the one-row shortcut
    let row = filled(1, 4);
    let err = stdev(Input::matrix(&row), Some(&Options::new().dtype("beep"))).unwrap_err();
    assert!(err.is_config_error());
    let err = stdev(Input::matrix(&row), Some(&Options::new().dim(5))).unwrap_err();
    assert!(err.is_range_error());
}

#[test]
fn test_json_entry_point() -> Result<()> {
    assert_eq!(stdev_value(&json!([2, 4, 5, 3, 8, 2]), None)?, json!(2.280350850198276));
    assert_eq!(stdev_value(&json!([]), None)?, json!(null));
    assert_eq!(stdev_value(&json!([2]), None)?, json!(0.0));

    let matrix = json!({ "data": [1, 2, 3, 4, 5, 6, 7, 8, 9], "shape": [3, 3], "dtype": "int8" });
    assert_eq!(
        stdev_value(&matrix, Some(&json!({ "dim": 1 })))?,
        json!({ "data": [3.0, 3.0, 3.0], "shape": [1, 3], "dtype": "float64" })
    );
    assert_eq!(
        stdev_value(&matrix, Some(&json!({ "dtype": "uint8" })))?,
        json!({ "data": [1, 1, 1], "shape": [3, 1], "dtype": "uint8" })
    );
    Ok(())
}

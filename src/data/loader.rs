use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{RawDataset, REQUIRED_COLUMNS};
use crate::error::{DatasetProblem, LabError};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a spectral dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – Wavelength, DBST, DBST+H2PO4-, DBST+Pb2+ columns, header optional
/// * `.json`    – `{ "wavelength": [...], "baseline": [...], "h2po4": [...], "pb": [...] }`
/// * `.parquet` – the first four numeric columns, in the CSV order
pub fn load_file(path: &Path) -> Result<RawDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "txt" => {
            let file = File::open(path).context("opening CSV file")?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        "parquet" | "pq" => {
            let file = File::open(path).context("opening parquet file")?;
            read_parquet(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

fn dataset_error(problem: DatasetProblem) -> anyhow::Error {
    LabError::from(problem).into()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: one row per wavelength, columns
/// `Wavelength, DBST, DBST+H2PO4-, DBST+Pb2+`.
///
/// The first row is taken as a header when any of its first four cells is
/// not a number.
/// Cells after the fourth are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<RawDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut columns: Vec<Vec<f64>> = Vec::new();
    let mut data_rows = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let is_header = record
            .iter()
            .take(REQUIRED_COLUMNS)
            .any(|cell| cell.parse::<f64>().is_err());
        if row_no == 0 && is_header {
            log::debug!("CSV header: {:?}", record.iter().collect::<Vec<_>>());
            continue;
        }
        if data_rows == 0 {
            columns = vec![Vec::new(); record.len().min(REQUIRED_COLUMNS)];
        }
        let row = data_rows;
        data_rows += 1;

        for (column, values) in columns.iter_mut().enumerate() {
            // Short rows leave this column behind; RawDataset reports the mismatch.
            let Some(cell) = record.get(column) else {
                continue;
            };
            let value = cell
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    dataset_error(DatasetProblem::NonNumeric {
                        row,
                        column,
                        text: cell.to_string(),
                    })
                })?;
            values.push(value);
        }
    }

    if data_rows == 0 {
        return Err(dataset_error(DatasetProblem::Empty));
    }
    Ok(RawDataset::from_columns(columns)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct JsonDataset {
    wavelength: Vec<f64>,
    #[serde(alias = "dbst")]
    baseline: Vec<f64>,
    h2po4: Vec<f64>,
    pb: Vec<f64>,
}

/// Expected JSON schema (column-oriented, `df.to_dict(orient='list')`):
///
/// ```json
/// {
///   "wavelength": [400.0, 401.0, ...],
///   "baseline":   [120.5, 131.0, ...],
///   "h2po4":      [150.2, 160.9, ...],
///   "pb":         [ 80.1,  85.3, ...]
/// }
/// ```
pub fn parse_json(text: &str) -> Result<RawDataset> {
    let raw: JsonDataset = serde_json::from_str(text).context("parsing JSON")?;
    Ok(RawDataset::new(raw.wavelength, raw.baseline, raw.h2po4, raw.pb)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Read the first four columns of a Parquet file written by Pandas or Polars.
/// Float64, Float32, Int64 and Int32 columns are accepted; nulls are not.
///
/// The column count comes from the file schema, so a file without rows is
/// reported as empty rather than as missing columns.
pub fn read_parquet(file: File) -> Result<RawDataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let schema_columns = builder.schema().fields().len();
    let reader = builder.build().context("building parquet reader")?;

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); schema_columns.min(REQUIRED_COLUMNS)];
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (column, values) in columns.iter_mut().enumerate() {
            values.extend(numeric_column(batch.column(column), row_offset, column)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(RawDataset::from_columns(columns)?)
}

/// Convert one Arrow column to `f64`, rejecting nulls.
fn numeric_column(col: &ArrayRef, row_offset: usize, column: usize) -> Result<Vec<f64>> {
    let values: Vec<Option<f64>> = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.iter().collect(),
        DataType::Float32 => downcast::<Float32Array>(col)?
            .iter()
            .map(|v| v.map(f64::from))
            .collect(),
        DataType::Int64 => downcast::<Int64Array>(col)?
            .iter()
            .map(|v| v.map(|i| i as f64))
            .collect(),
        DataType::Int32 => downcast::<Int32Array>(col)?
            .iter()
            .map(|v| v.map(f64::from))
            .collect(),
        other => {
            return Err(dataset_error(DatasetProblem::NonNumeric {
                row: row_offset,
                column,
                text: format!("{other:?}"),
            }));
        }
    };

    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            v.ok_or_else(|| {
                dataset_error(DatasetProblem::NonNumeric {
                    row: row_offset + i,
                    column,
                    text: "null".to_string(),
                })
            })
        })
        .collect()
}

fn downcast<T: Array + 'static>(col: &ArrayRef) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array layout for {:?}", col.data_type()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::Series;

    fn problem(err: &anyhow::Error) -> Option<&DatasetProblem> {
        match err.downcast_ref::<LabError>()? {
            LabError::InvalidDataset(p) => Some(p),
            _ => None,
        }
    }

    #[test]
    fn csv_with_header() {
        let text = "Wavelength,DBST,DBST+H2PO4-,DBST+Pb2+\n400,10,5,8\n450,50,60,40\n500,30,20,25\n";
        let ds = read_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.wavelength(), &[400.0, 450.0, 500.0]);
        assert_eq!(ds.series(Series::PlusH2PO4), &[5.0, 60.0, 20.0]);
    }

    #[test]
    fn csv_without_header_and_extra_column() {
        let text = "400, 10, 5, 8, note\n450, 50, 60, 40, x\n";
        let ds = read_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.wavelength(), &[400.0, 450.0]);
        assert_eq!(ds.series(Series::PlusPb), &[8.0, 40.0]);
    }

    #[test]
    fn csv_with_three_columns_is_rejected() {
        let err = read_csv("w,a,b\n400,1,2\n".as_bytes()).unwrap_err();
        assert_eq!(problem(&err), Some(&DatasetProblem::TooFewColumns { found: 3 }));
    }

    #[test]
    fn csv_non_numeric_cell_is_reported() {
        let err = read_csv("400,1,2,3\n401,1,oops,3\n".as_bytes()).unwrap_err();
        assert_eq!(
            problem(&err),
            Some(&DatasetProblem::NonNumeric {
                row: 1,
                column: 2,
                text: "oops".to_string()
            })
        );
    }

    #[test]
    fn csv_non_numeric_row_skips_header() {
        let err = read_csv("w,a,b,c\n400,1,x,3\n".as_bytes()).unwrap_err();
        assert_eq!(
            problem(&err),
            Some(&DatasetProblem::NonNumeric {
                row: 0,
                column: 2,
                text: "x".to_string()
            })
        );
    }

    #[test]
    fn csv_short_row_is_a_length_mismatch() {
        let err = read_csv("400,1,2,3\n401,1,2\n".as_bytes()).unwrap_err();
        assert_eq!(
            problem(&err),
            Some(&DatasetProblem::LengthMismatch {
                column: 3,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn csv_header_only_is_empty() {
        let err = read_csv("Wavelength,DBST,H,Pb\n".as_bytes()).unwrap_err();
        assert_eq!(problem(&err), Some(&DatasetProblem::Empty));
    }

    #[test]
    fn json_columns() {
        let ds = parse_json(r#"{"wavelength":[400,450],"dbst":[1,2],"h2po4":[3,4],"pb":[5,6]}"#).unwrap();
        assert_eq!(ds.series(Series::Baseline), &[1.0, 2.0]);
        assert!(parse_json(r#"{"wavelength":[400],"baseline":[1]}"#).is_err());
    }

    #[test]
    fn parquet_first_four_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("wavelength", DataType::Int32, false),
            Field::new("dbst", DataType::Float64, false),
            Field::new("h2po4", DataType::Float32, false),
            Field::new("pb", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int32Array::from(vec![400, 450])),
                Arc::new(Float64Array::from(vec![10.0, 50.0])),
                Arc::new(Float32Array::from(vec![5.0f32, 60.0])),
                Arc::new(Int64Array::from(vec![8i64, 40])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join(format!("dbst-lab-{}.parquet", std::process::id()));
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.wavelength(), &[400.0, 450.0]);
        assert_eq!(ds.series(Series::PlusH2PO4), &[5.0, 60.0]);
        assert_eq!(ds.series(Series::PlusPb), &[8.0, 40.0]);
    }

    fn write_parquet(name: &str, schema: Arc<Schema>, batches: &[RecordBatch]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("dbst-lab-{name}-{}.parquet", std::process::id()));
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        for batch in batches {
            writer.write(batch).unwrap();
        }
        writer.close().unwrap();
        path
    }

    fn float_schema(columns: usize) -> Arc<Schema> {
        Arc::new(Schema::new(
            (0..columns)
                .map(|i| Field::new(format!("c{i}"), DataType::Float64, false))
                .collect::<Vec<_>>(),
        ))
    }

    #[test]
    fn parquet_without_rows_is_empty() {
        let schema = float_schema(4);
        let no_batches = write_parquet("no-batches", schema.clone(), &[]);
        let empty_batch = write_parquet(
            "empty-batch",
            schema.clone(),
            &[RecordBatch::new_empty(schema)],
        );

        for path in [no_batches, empty_batch] {
            let err = load_file(&path).unwrap_err();
            std::fs::remove_file(&path).ok();
            assert_eq!(problem(&err), Some(&DatasetProblem::Empty));
        }
    }

    #[test]
    fn parquet_with_three_columns_is_rejected() {
        let path = write_parquet("three-columns", float_schema(3), &[]);
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(problem(&err), Some(&DatasetProblem::TooFewColumns { found: 3 }));
    }

    #[test]
    fn unknown_extension() {
        let err = load_file(Path::new("spectra.xlsx")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .xlsx");
    }
}

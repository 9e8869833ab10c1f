use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::error::LoadError;
use super::model::{LaunchRecord, LaunchTable, Outcome};

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; the four required columns, extra columns ignored
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field, numeric columns of any width
pub fn load_file(path: &Path) -> Result<LaunchTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let table = LaunchTable::from_records(records)?;
    log::info!(
        "Loaded {} launches from {} (payload bounds {})",
        table.len(),
        path.display(),
        table.payload_bounds()
    );
    Ok(table)
}

/// Validate one row's raw cells into a [`LaunchRecord`].
fn build_record(
    row: usize,
    launch_site: &str,
    payload_mass_kg: f64,
    class: f64,
    booster_version_category: &str,
) -> Result<LaunchRecord, LoadError> {
    if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
        return Err(LoadError::InvalidValue {
            row,
            column: COL_PAYLOAD_MASS,
            value: payload_mass_kg.to_string(),
        });
    }
    let outcome = Outcome::from_code(class).ok_or_else(|| LoadError::InvalidValue {
        row,
        column: COL_CLASS,
        value: class.to_string(),
    })?;

    Ok(LaunchRecord {
        launch_site: launch_site.to_string(),
        payload_mass_kg,
        outcome,
        booster_version_category: booster_version_category.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let file = File::open(path)?;
    read_csv(file)
}

fn read_csv<R: std::io::Read>(input: R) -> Result<Vec<LaunchRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let position = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let site_idx = position(COL_LAUNCH_SITE)?;
    let payload_idx = position(COL_PAYLOAD_MASS)?;
    let class_idx = position(COL_CLASS)?;
    let booster_idx = position(COL_BOOSTER_CATEGORY)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let number = |idx: usize, column: &'static str| {
            cell(idx)
                .parse::<f64>()
                .map_err(|_| LoadError::InvalidValue {
                    row,
                    column,
                    value: cell(idx).to_string(),
                })
        };

        records.push(build_record(
            row,
            cell(site_idx),
            number(payload_idx, COL_PAYLOAD_MASS)?,
            number(class_idx, COL_CLASS)?,
            cell(booster_idx),
        )?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON row, the `df.to_json(orient='records')` shape.
#[derive(Debug, Deserialize)]
struct JsonRow {
    #[serde(rename = "Launch Site")]
    launch_site: Option<String>,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: Option<f64>,
    #[serde(rename = "class")]
    class: Option<f64>,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: Option<String>,
}

fn load_json(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let text = std::fs::read_to_string(path)?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<LaunchRecord>, LoadError> {
    let rows: Vec<JsonRow> = serde_json::from_str(text)?;

    rows.into_iter()
        .enumerate()
        .map(|(row, r)| {
            build_record(
                row,
                r.launch_site
                    .as_deref()
                    .ok_or(LoadError::MissingColumn(COL_LAUNCH_SITE))?,
                r.payload_mass_kg
                    .ok_or(LoadError::MissingColumn(COL_PAYLOAD_MASS))?,
                r.class.ok_or(LoadError::MissingColumn(COL_CLASS))?,
                r.booster_version_category
                    .as_deref()
                    .ok_or(LoadError::MissingColumn(COL_BOOSTER_CATEGORY))?,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per launch field.
///
/// Numeric columns may be any integer or float width; they are cast to
/// `Float64` before validation. String columns may be `Utf8` or `LargeUtf8`.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let offset = records.len();

        let sites = string_column(&batch, COL_LAUNCH_SITE)?;
        let payloads = float_column(&batch, COL_PAYLOAD_MASS)?;
        let classes = float_column(&batch, COL_CLASS)?;
        let boosters = string_column(&batch, COL_BOOSTER_CATEGORY)?;

        let sites = sites.as_string::<i32>();
        let payloads = payloads.as_primitive::<Float64Type>();
        let classes = classes.as_primitive::<Float64Type>();
        let boosters = boosters.as_string::<i32>();

        for i in 0..batch.num_rows() {
            let row = offset + i;
            let cells: [(&'static str, &dyn Array); 4] = [
                (COL_LAUNCH_SITE, sites as &dyn Array),
                (COL_PAYLOAD_MASS, payloads as &dyn Array),
                (COL_CLASS, classes as &dyn Array),
                (COL_BOOSTER_CATEGORY, boosters as &dyn Array),
            ];
            for (column, array) in cells {
                if array.is_null(i) {
                    return Err(LoadError::InvalidValue {
                        row,
                        column,
                        value: "null".to_string(),
                    });
                }
            }

            records.push(build_record(
                row,
                sites.value(i),
                payloads.value(i),
                classes.value(i),
                boosters.value(i),
            )?);
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a ArrayRef, LoadError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name))?;
    Ok(batch.column(idx))
}

/// Fetch a string column normalised to `Utf8`.
fn string_column(batch: &RecordBatch, name: &'static str) -> Result<ArrayRef, LoadError> {
    let col = column(batch, name)?;
    match col.data_type() {
        DataType::Utf8 => Ok(col.clone()),
        DataType::LargeUtf8 | DataType::Utf8View => Ok(cast(col, &DataType::Utf8)?),
        other => Err(LoadError::UnsupportedColumnType {
            column: name,
            data_type: format!("{other:?}"),
        }),
    }
}

/// Fetch a numeric column normalised to `Float64`.
fn float_column(batch: &RecordBatch, name: &'static str) -> Result<ArrayRef, LoadError> {
    let col = column(batch, name)?;
    match col.data_type() {
        DataType::Float64 => Ok(col.clone()),
        dt if dt.is_numeric() => Ok(cast(col, &DataType::Float64)?),
        other => Err(LoadError::UnsupportedColumnType {
            column: name,
            data_type: format!("{other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
2,3,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,4,VAFB SLC-4E,0,500.0,F9 v1.1  B1003,v1.1
4,5,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    #[test]
    fn csv_reads_required_columns_and_ignores_extras() {
        let records = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[2].launch_site, "CCAFS LC-40");
        assert_eq!(records[2].payload_mass_kg, 525.0);
        assert_eq!(records[4].outcome, Outcome::Success);
        assert_eq!(records[4].booster_version_category, "FT");
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let csv = "Launch Site,class,Booster Version Category\nKSC LC-39A,1,FT\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(COL_PAYLOAD_MASS)));
    }

    #[test]
    fn csv_rejects_bad_class_and_negative_payload() {
        let bad_class = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,10,2,FT\n";
        assert!(matches!(
            read_csv(bad_class.as_bytes()),
            Err(LoadError::InvalidValue { row: 0, column: COL_CLASS, .. })
        ));

        let negative = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,-1,1,FT\n";
        assert!(matches!(
            read_csv(negative.as_bytes()),
            Err(LoadError::InvalidValue { column: COL_PAYLOAD_MASS, .. })
        ));

        let text = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,heavy,1,FT\n";
        assert!(matches!(
            read_csv(text.as_bytes()),
            Err(LoadError::InvalidValue { value, .. }) if value == "heavy"
        ));
    }

    #[test]
    fn load_file_computes_bounds() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.payload_bounds().lo, 0.0);
        assert_eq!(table.payload_bounds().hi, 2490.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn header_only_file_is_empty() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"Launch Site,Payload Mass (kg),class,Booster Version Category\n")
            .unwrap();
        assert!(matches!(load_file(file.path()), Err(LoadError::Empty)));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn json_records() {
        let text = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490, "class": 1, "Booster Version Category": "FT"},
            {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 500.0, "class": 0.0, "Booster Version Category": "v1.1", "Flight Number": 4}
        ]"#;
        let records = parse_json(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].payload_mass_kg, 2490.0);
        assert_eq!(records[1].outcome, Outcome::Failure);

        let missing = r#"[{"Launch Site": "A", "class": 1, "Booster Version Category": "FT"}]"#;
        assert!(matches!(
            parse_json(missing),
            Err(LoadError::MissingColumn(COL_PAYLOAD_MASS))
        ));
    }

    #[test]
    fn parquet_with_integer_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS LC-40", "KSC LC-39A"])),
                Arc::new(Float64Array::from(vec![677.0, 3136.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["v1.0", "FT"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].outcome, Outcome::Success);
        assert_eq!(table.records()[1].launch_site, "KSC LC-39A");
        assert_eq!(table.payload_bounds().hi, 3136.0);
    }
}

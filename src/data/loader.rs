use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array, Int8Array,
    UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, TimeUnit, TimestampMicrosecondType,
    TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType,
};
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{BaseTable, Record};

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

pub const DATE_COLUMN: &str = "dteday";
pub const SEASON_COLUMN: &str = "season";
pub const WEATHER_COLUMN: &str = "weathersit";
pub const WORKING_DAY_COLUMN: &str = "workingday";
pub const REGISTERED_COLUMN: &str = "registered";
pub const CASUAL_COLUMN: &str = "casual";
pub const CNT_COLUMN: &str = "cnt";

const NUMERIC_COLUMNS: [&str; 6] = [
    SEASON_COLUMN,
    WEATHER_COLUMN,
    WORKING_DAY_COLUMN,
    REGISTERED_COLUMN,
    CASUAL_COLUMN,
    CNT_COLUMN,
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("expected a top-level JSON array of records")]
    NotRecordArray,
}

pub type Result<T> = std::result::Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line (the default dataset)
/// * `.json`    – `[{ "dteday": "2011-01-01", "season": 1, ... }, ...]`
/// * `.parquet` – flat columns; `dteday` as text, date or timestamp
///
/// Rows whose date cannot be parsed are kept with `date = None`.
pub fn load_file(path: &Path) -> Result<BaseTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!("Loaded {} records from {}", table.len(), path.display());
    let invalid = table.invalid_date_count();
    if invalid > 0 {
        log::warn!("{invalid} records have an unparseable '{DATE_COLUMN}' and are excluded from every date range");
    }
    Ok(table)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// Coerce date text to a calendar day; anything unrecognised is `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// Integers and integral floats (`"3"`, `"3.0"`).
fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(float_to_integer))
}

/// An integral float inside the `i64` range; `None` otherwise.
fn float_to_integer(f: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, hence the strict bound.
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn invalid(row: usize, column: &str, value: impl ToString) -> LoadError {
    LoadError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// The six numeric fields of a record, in [`NUMERIC_COLUMNS`] order.
fn build_record(row: usize, date: Option<NaiveDate>, numbers: [i64; 6]) -> Result<Record> {
    let code = |i: usize| u8::try_from(numbers[i]).map_err(|_| invalid(row, NUMERIC_COLUMNS[i], numbers[i]));
    let count = |i: usize| u32::try_from(numbers[i]).map_err(|_| invalid(row, NUMERIC_COLUMNS[i], numbers[i]));

    Ok(Record {
        date,
        season: code(0)?,
        weather: code(1)?,
        working_day: code(2)?,
        registered: count(3)?,
        casual: count(4)?,
        cnt: count(5)?,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, at least the date column and
/// the numeric columns used by the charts. Extra columns are ignored.
fn load_csv(path: &Path) -> Result<BaseTable> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };
    let date_idx = position(DATE_COLUMN)?;
    let mut numeric_idx = [0usize; 6];
    for (slot, name) in numeric_idx.iter_mut().zip(NUMERIC_COLUMNS) {
        *slot = position(name)?;
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let date = parse_date(record.get(date_idx).unwrap_or(""));

        let mut numbers = [0i64; 6];
        for (i, idx) in numeric_idx.iter().enumerate() {
            let cell = record.get(*idx).unwrap_or("");
            numbers[i] = parse_integer(cell).ok_or_else(|| invalid(row_no, NUMERIC_COLUMNS[i], cell))?;
        }

        records.push(build_record(row_no, date, numbers)?);
    }

    Ok(BaseTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "dteday": "2011-01-01", "season": 1, "weathersit": 2, "workingday": 0,
///     "registered": 654, "casual": 331, "cnt": 985 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<BaseTable> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    let Some(rows) = root.as_array() else {
        return Err(LoadError::NotRecordArray);
    };

    // The first record stands in for a header. An empty array has none, so
    // it is reported as missing the date column.
    let first = rows.first().and_then(|r| r.as_object());
    for name in std::iter::once(DATE_COLUMN).chain(NUMERIC_COLUMNS) {
        if !first.is_some_and(|obj| obj.contains_key(name)) {
            return Err(LoadError::MissingColumn(name.to_string()));
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| invalid(row_no, "<row>", "not a JSON object"))?;

        let date = match obj.get(DATE_COLUMN) {
            Some(JsonValue::String(s)) => parse_date(s),
            _ => None,
        };

        let mut numbers = [0i64; 6];
        for (i, name) in NUMERIC_COLUMNS.iter().enumerate() {
            let value = obj
                .get(*name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
            numbers[i] = json_integer(value).ok_or_else(|| invalid(row_no, name, value))?;
        }

        records.push(build_record(row_no, date, numbers)?);
    }

    Ok(BaseTable::from_records(records))
}

fn json_integer(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_to_integer)),
        JsonValue::String(s) => parse_integer(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat columns.
///
/// `dteday` may be `Utf8`, `LargeUtf8`, `Date32`, `Date64` or a
/// `Timestamp` of any unit (as written by pandas). Numeric columns may be
/// any integer type or an integral float.
fn load_parquet(path: &Path) -> Result<BaseTable> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;

    // Checked on the file schema so files without row groups are caught too.
    let file_schema = builder.schema();
    for name in std::iter::once(DATE_COLUMN).chain(NUMERIC_COLUMNS) {
        if file_schema.index_of(name).is_err() {
            return Err(LoadError::MissingColumn(name.to_string()));
        }
    }
    let reader = builder.build()?;

    let mut records = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let column = |name: &str| {
            schema
                .index_of(name)
                .map(|i| batch.column(i).clone())
                .map_err(|_| LoadError::MissingColumn(name.to_string()))
        };
        let date_col = column(DATE_COLUMN)?;
        let numeric_cols = NUMERIC_COLUMNS
            .into_iter()
            .map(column)
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row;
            let date = extract_date(&date_col, row);

            let mut numbers = [0i64; 6];
            for (i, col) in numeric_cols.iter().enumerate() {
                numbers[i] = extract_integer(col, row).ok_or_else(|| {
                    let shown = array_value_to_string(col.as_ref(), row).unwrap_or_default();
                    invalid(row_no, NUMERIC_COLUMNS[i], shown)
                })?;
            }

            records.push(build_record(row_no, date, numbers)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(BaseTable::from_records(records))
}

// -- Parquet / Arrow helpers --

fn extract_date(col: &Arc<dyn Array>, row: usize) -> Option<NaiveDate> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => parse_date(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => parse_date(col.as_string::<i64>().value(row)),
        DataType::Date32 => col.as_primitive::<Date32Type>().value_as_date(row),
        DataType::Date64 => col.as_primitive::<Date64Type>().value_as_date(row),
        DataType::Timestamp(unit, _) => timestamp_at(col, *unit, row).map(|dt| dt.date()),
        _ => None,
    }
}

/// Timezone-aware timestamps come back as their UTC wall time.
fn timestamp_at(col: &Arc<dyn Array>, unit: TimeUnit, row: usize) -> Option<NaiveDateTime> {
    match unit {
        TimeUnit::Second => col.as_primitive::<TimestampSecondType>().value_as_datetime(row),
        TimeUnit::Millisecond => col
            .as_primitive::<TimestampMillisecondType>()
            .value_as_datetime(row),
        TimeUnit::Microsecond => col
            .as_primitive::<TimestampMicrosecondType>()
            .value_as_datetime(row),
        TimeUnit::Nanosecond => col
            .as_primitive::<TimestampNanosecondType>()
            .value_as_datetime(row),
    }
}

/// Read a single integer cell; `None` for nulls, fractions and non-numeric
/// column types.
fn extract_integer(col: &Arc<dyn Array>, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Int8 => any.downcast_ref::<Int8Array>().map(|a| a.value(row) as i64),
        DataType::Int16 => any.downcast_ref::<Int16Array>().map(|a| a.value(row) as i64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as i64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row)),
        DataType::UInt8 => any.downcast_ref::<UInt8Array>().map(|a| a.value(row) as i64),
        DataType::UInt16 => any.downcast_ref::<UInt16Array>().map(|a| a.value(row) as i64),
        DataType::UInt32 => any.downcast_ref::<UInt32Array>().map(|a| a.value(row) as i64),
        DataType::UInt64 => any
            .downcast_ref::<UInt64Array>()
            .and_then(|a| i64::try_from(a.value(row)).ok()),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .and_then(|a| float_to_integer(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .and_then(|a| float_to_integer(a.value(row))),
        DataType::Utf8 => parse_integer(col.as_string::<i32>().value(row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{
        ArrayRef, Date32Array, StringArray, TimestampMillisecondArray, TimestampNanosecondArray,
    };
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::tests::day;

    const HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,casual,registered,cnt";

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_common_date_forms() {
        assert_eq!(parse_date("2011-01-05"), Some(day(2011, 1, 5)));
        assert_eq!(parse_date("2011/01/05"), Some(day(2011, 1, 5)));
        assert_eq!(parse_date("1/5/2011"), Some(day(2011, 1, 5)));
        assert_eq!(parse_date("2011-01-05 13:45:00"), Some(day(2011, 1, 5)));
        assert_eq!(parse_date("2011-01-05T00:00:00"), Some(day(2011, 1, 5)));
        assert_eq!(parse_date("2011-01-05T23:00:00+00:00"), Some(day(2011, 1, 5)));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2011-02-30"), None);
    }

    #[test]
    fn loads_csv_and_coerces_bad_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "all_data.csv",
            &format!(
                "{HEADER}\n\
                 1,2011-01-01,1,0,1,0,6,0,2,0.34,331,654,985\n\
                 2,garbage,1,0,1,0,0,0,2,0.36,131,670,801\n\
                 3,2011-01-03,1.0,0,1,0,1,1,1,0.19,120,1229,1349\n"
            ),
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.invalid_date_count(), 1);

        let first = table.records()[0];
        assert_eq!(first.date, Some(day(2011, 1, 1)));
        assert_eq!(first.season, 1);
        assert_eq!(first.weather, 2);
        assert_eq!(first.working_day, 0);
        assert_eq!((first.registered, first.casual, first.cnt), (654, 331, 985));

        assert_eq!(table.records()[1].date, None);
        assert_eq!(table.records()[1].cnt, 801);
        assert_eq!(table.records()[2].working_day, 1);
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.csv", "dteday,season,cnt\n2011-01-01,1,10\n");
        match load_file(&path) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, WEATHER_COLUMN),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_count_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "data.csv",
            "dteday,season,weathersit,workingday,registered,casual,cnt\n\
             2011-01-01,1,1,1,many,2,3\n",
        );
        match load_file(&path) {
            Err(LoadError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 0);
                assert_eq!(column, REGISTERED_COLUMN);
                assert_eq!(value, "many");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn negative_count_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "data.csv",
            "dteday,season,weathersit,workingday,registered,casual,cnt\n\
             2011-01-01,1,1,1,5,-2,3\n",
        );
        assert!(matches!(
            load_file(&path),
            Err(LoadError::InvalidValue { ref column, .. }) if column == CASUAL_COLUMN
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        assert!(matches!(load_file(&path), Err(LoadError::Io { .. })));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.xlsx", "");
        assert!(matches!(
            load_file(&path),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "data.json",
            r#"[
                {"dteday": "2011-01-05", "season": 1, "weathersit": 1, "workingday": 1,
                 "registered": 80, "casual": 20, "cnt": 100, "temp": 0.2},
                {"dteday": null, "season": 1, "weathersit": 2.0, "workingday": "0",
                 "registered": 30, "casual": 10, "cnt": 40}
            ]"#,
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].date, Some(day(2011, 1, 5)));
        assert_eq!(table.records()[1].date, None);
        assert_eq!(table.records()[1].weather, 2);
        assert_eq!(table.records()[1].working_day, 0);
    }

    /// Two-row Parquet file with the given date column and fixed counts.
    fn write_parquet(dir: &tempfile::TempDir, date_field: Field, dates: ArrayRef) -> PathBuf {
        let schema = Arc::new(Schema::new(vec![
            date_field,
            Field::new(SEASON_COLUMN, DataType::Int64, false),
            Field::new(WEATHER_COLUMN, DataType::Int64, false),
            Field::new(WORKING_DAY_COLUMN, DataType::Int32, false),
            Field::new(REGISTERED_COLUMN, DataType::Int64, false),
            Field::new(CASUAL_COLUMN, DataType::Int64, false),
            Field::new(CNT_COLUMN, DataType::Int64, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            dates,
            Arc::new(Int64Array::from(vec![1, 2])),
            Arc::new(Int64Array::from(vec![1, 3])),
            Arc::new(Int32Array::from(vec![1, 0])),
            Arc::new(Int64Array::from(vec![80, 30])),
            Arc::new(Int64Array::from(vec![20, 10])),
            Arc::new(Int64Array::from(vec![100, 40])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let path = dir.path().join("data.parquet");
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    fn epoch() -> NaiveDate {
        day(1970, 1, 1)
    }

    #[test]
    fn loads_parquet_columns() {
        let dir = tempfile::tempdir().unwrap();
        let dates: ArrayRef = Arc::new(StringArray::from(vec![Some("2011-01-05"), None]));
        let path = write_parquet(&dir, Field::new(DATE_COLUMN, DataType::Utf8, true), dates);

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].date, Some(day(2011, 1, 5)));
        assert_eq!(table.records()[0].cnt, 100);
        assert_eq!(table.records()[1].date, None);
        assert_eq!(table.records()[1].season, 2);
        assert_eq!(table.records()[1].weather, 3);
    }

    #[test]
    fn loads_parquet_date32_column() {
        let dir = tempfile::tempdir().unwrap();
        let days = (day(2011, 1, 5) - epoch()).num_days() as i32;
        let dates: ArrayRef = Arc::new(Date32Array::from(vec![Some(days), None]));
        let path = write_parquet(&dir, Field::new(DATE_COLUMN, DataType::Date32, true), dates);

        let table = load_file(&path).unwrap();
        assert_eq!(table.records()[0].date, Some(day(2011, 1, 5)));
        assert_eq!(table.records()[1].date, None);
    }

    #[test]
    fn loads_parquet_timestamp_column() {
        let dir = tempfile::tempdir().unwrap();
        let nanos = day(2011, 2, 10)
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_nanos_opt()
            .unwrap();
        let dates: ArrayRef = Arc::new(TimestampNanosecondArray::from(vec![Some(nanos), None]));
        let field = Field::new(
            DATE_COLUMN,
            DataType::Timestamp(TimeUnit::Nanosecond, None),
            true,
        );
        let path = write_parquet(&dir, field, dates);

        let table = load_file(&path).unwrap();
        assert_eq!(table.records()[0].date, Some(day(2011, 2, 10)));
        assert_eq!(table.records()[1].date, None);
        assert_eq!(table.invalid_date_count(), 1);
    }

    #[test]
    fn loads_parquet_millisecond_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let millis = day(2012, 12, 31)
            .and_hms_opt(18, 30, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        let dates: ArrayRef = Arc::new(TimestampMillisecondArray::from(vec![Some(millis), Some(0)]));
        let field = Field::new(
            DATE_COLUMN,
            DataType::Timestamp(TimeUnit::Millisecond, None),
            true,
        );
        let path = write_parquet(&dir, field, dates);

        let table = load_file(&path).unwrap();
        assert_eq!(table.records()[0].date, Some(day(2012, 12, 31)));
        assert_eq!(table.records()[1].date, Some(epoch()));
    }

    #[test]
    fn parquet_without_rows_still_needs_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(DATE_COLUMN, DataType::Utf8, true),
            Field::new(SEASON_COLUMN, DataType::Int64, false),
        ]));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.parquet");
        let writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.close().unwrap();

        match load_file(&path) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, WEATHER_COLUMN),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn float_beyond_integer_range_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "data.csv",
            "dteday,season,weathersit,workingday,registered,casual,cnt\n\
             2011-01-01,1,1,1,1e30,0,1e30\n",
        );
        match load_file(&path) {
            Err(LoadError::InvalidValue { column, value, .. }) => {
                assert_eq!(column, REGISTERED_COLUMN);
                assert_eq!(value, "1e30");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn count_beyond_u32_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        for huge in ["4294967296", "18446744073709551615", "9223372036854775807"] {
            let path = write_file(
                &dir,
                "data.csv",
                &format!(
                    "dteday,season,weathersit,workingday,registered,casual,cnt\n\
                     2011-01-01,1,1,1,0,0,{huge}\n"
                ),
            );
            assert!(
                matches!(
                    load_file(&path),
                    Err(LoadError::InvalidValue { ref column, .. }) if column == CNT_COLUMN
                ),
                "{huge} should be rejected"
            );
        }
    }

    #[test]
    fn largest_u32_count_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "data.csv",
            "dteday,season,weathersit,workingday,registered,casual,cnt\n\
             2011-01-01,1,1,1,4294967295,0,4294967295.0\n",
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.records()[0].cnt, u32::MAX);
    }

    #[test]
    fn json_float_beyond_integer_range_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "data.json",
            r#"[{"dteday": "2011-01-05", "season": 1, "weathersit": 1, "workingday": 1,
                 "registered": 1e30, "casual": 0, "cnt": 1e30}]"#,
        );
        assert!(matches!(
            load_file(&path),
            Err(LoadError::InvalidValue { ref column, .. }) if column == REGISTERED_COLUMN
        ));
    }

    #[test]
    fn json_root_must_be_an_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.json", r#"{"dteday": "2011-01-05"}"#);
        assert!(matches!(load_file(&path), Err(LoadError::NotRecordArray)));
    }

    #[test]
    fn json_missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "data.json",
            r#"[{"dteday": "2011-01-05", "season": 1, "weathersit": 1, "workingday": 1,
                 "registered": 80, "casual": 20}]"#,
        );
        match load_file(&path) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, CNT_COLUMN),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn empty_json_array_has_no_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.json", "[]");
        match load_file(&path) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, DATE_COLUMN),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}

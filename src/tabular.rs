//! Decodes a fetched payload into a [`Table`], dispatching on the URL's
//! file extension. CSV goes through polars with schema inference; XLS/XLSX
//! go through calamine. All missing cells normalize to `CellValue::Null`
//! here, before pagination ever sees the table.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType as ExcelDataType, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::constants::DEFAULT_INFER_SCHEMA_LEN;
use crate::errors::TabularError;
use crate::model::{CellValue, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xls,
    Xlsx,
}

impl FileFormat {
    /// The extension is whatever follows the last `.` in the URL, lowercased.
    pub fn from_url(url: &str) -> Result<FileFormat, TabularError> {
        let extension = url.rsplit('.').next().unwrap_or("").to_lowercase();
        match extension.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            "xls" => Ok(FileFormat::Xls),
            _ => {
                log::debug!("Unsupported extension {extension:?} for url {url}");
                Err(TabularError::unsupported_format())
            }
        }
    }
}

pub fn read_table(url: &str, bytes: &[u8]) -> Result<Table, TabularError> {
    match FileFormat::from_url(url)? {
        FileFormat::Csv => read_csv(bytes),
        FileFormat::Xls | FileFormat::Xlsx => read_excel(bytes),
    }
}

fn read_csv(bytes: &[u8]) -> Result<Table, TabularError> {
    let cursor = Cursor::new(bytes.to_vec());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(DEFAULT_INFER_SCHEMA_LEN))
        .map_parse_options(|parse| {
            parse
                .with_try_parse_dates(true)
                .with_encoding(CsvEncoding::LossyUtf8)
        })
        .into_reader_with_file_handle(cursor)
        .finish()?;
    log::debug!("Read csv df {}x{}", df.height(), df.width());
    df_to_table(&df)
}

fn df_to_table(df: &DataFrame) -> Result<Table, TabularError> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut row = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            row.push(cell_from_any(column.get(idx)?));
        }
        rows.push(row);
    }
    Ok(Table { columns, rows })
}

fn cell_from_any(value: AnyValue) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Null,
        AnyValue::Boolean(b) => CellValue::Bool(b),
        AnyValue::String(s) => CellValue::String(s.to_string()),
        AnyValue::StringOwned(s) => CellValue::String(s.to_string()),
        AnyValue::Int8(v) => CellValue::Int(v as i64),
        AnyValue::Int16(v) => CellValue::Int(v as i64),
        AnyValue::Int32(v) => CellValue::Int(v as i64),
        AnyValue::Int64(v) => CellValue::Int(v),
        AnyValue::UInt8(v) => CellValue::Int(v as i64),
        AnyValue::UInt16(v) => CellValue::Int(v as i64),
        AnyValue::UInt32(v) => CellValue::Int(v as i64),
        AnyValue::UInt64(v) => {
            if v <= i64::MAX as u64 {
                CellValue::Int(v as i64)
            } else {
                CellValue::Float(v as f64)
            }
        }
        AnyValue::Float32(v) => CellValue::Float(v as f64),
        AnyValue::Float64(v) => CellValue::Float(v),
        AnyValue::Date(days) => match date_from_days(days) {
            Some(date) => CellValue::Date(date),
            None => CellValue::Null,
        },
        AnyValue::Datetime(v, unit, _) => match datetime_from_timestamp(v, unit) {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Null,
        },
        AnyValue::DatetimeOwned(v, unit, _) => match datetime_from_timestamp(v, unit) {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Null,
        },
        // Last-resort net for parser output we have no mapping for
        other => CellValue::String(other.to_string()),
    }
}

fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(chrono::Duration::days(days as i64))
}

fn datetime_from_timestamp(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    match unit {
        TimeUnit::Nanoseconds => Some(chrono::DateTime::from_timestamp_nanos(value).naive_utc()),
        TimeUnit::Microseconds => {
            chrono::DateTime::from_timestamp_micros(value).map(|dt| dt.naive_utc())
        }
        TimeUnit::Milliseconds => {
            chrono::DateTime::from_timestamp_millis(value).map(|dt| dt.naive_utc())
        }
    }
}

fn read_excel(bytes: &[u8]) -> Result<Table, TabularError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TabularError::processing("Spreadsheet has no worksheets"))??;

    let mut rows_iter = range.rows();
    let columns: Vec<String> = match rows_iter.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let name = cell.as_string().unwrap_or_else(|| cell.to_string());
                if name.is_empty() {
                    format!("column_{}", idx + 1)
                } else {
                    name
                }
            })
            .collect(),
        None => {
            return Ok(Table {
                columns: vec![],
                rows: vec![],
            })
        }
    };

    let width = columns.len();
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for row in rows_iter {
        let mut cells = Vec::with_capacity(width);
        for idx in 0..width {
            let cell = row
                .get(idx)
                .map(cell_from_excel)
                .unwrap_or(CellValue::Null);
            cells.push(cell);
        }
        rows.push(cells);
    }
    normalize_integral_columns(&mut rows, width);
    log::debug!("Read spreadsheet table {}x{width}", rows.len());
    Ok(Table { columns, rows })
}

fn cell_from_excel(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(v) => CellValue::Int(*v),
        Data::Float(v) => CellValue::Float(*v),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(dt) => CellValue::DateTime(dt),
            None => cell
                .as_string()
                .map(CellValue::String)
                .unwrap_or(CellValue::Null),
        },
        Data::DurationIso(s) => CellValue::String(s.clone()),
        // Error cells carry no usable value
        Data::Error(_) => CellValue::Null,
    }
}

/// Spreadsheets store every number as a float; columns whose values are all
/// whole numbers surface as integers, the way pandas reads them.
fn normalize_integral_columns(rows: &mut [Vec<CellValue>], width: usize) {
    const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0; // 2^53
    for col in 0..width {
        let mut has_float = false;
        let integral = rows.iter().all(|row| match &row[col] {
            CellValue::Float(f) => {
                has_float = true;
                f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INT
            }
            CellValue::Int(_) | CellValue::Null => true,
            _ => false,
        });
        if integral && has_float {
            for row in rows.iter_mut() {
                if let CellValue::Float(f) = row[col] {
                    row[col] = CellValue::Int(f as i64);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TabularError;
    use serde_json::json;

    #[test]
    fn test_file_format_from_url() -> Result<(), TabularError> {
        assert_eq!(
            FileFormat::from_url("http://example.com/data/file.csv")?,
            FileFormat::Csv
        );
        assert_eq!(
            FileFormat::from_url("http://example.com/Report.XLSX")?,
            FileFormat::Xlsx
        );
        assert_eq!(FileFormat::from_url("http://example.com/a.b.xls")?, FileFormat::Xls);
        Ok(())
    }

    #[test]
    fn test_file_format_unsupported_extension() {
        let err = FileFormat::from_url("http://example.com/file.json").unwrap_err();
        match err {
            TabularError::UnsupportedFormat(msg) => {
                assert_eq!(
                    msg.to_string(),
                    "Unsupported file format. Only .xlsx, .xls, and .csv are supported"
                );
            }
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_file_format_no_extension() {
        assert!(FileFormat::from_url("http://example.com/file").is_err());
    }

    #[test]
    fn test_read_csv_types_and_nulls() -> Result<(), TabularError> {
        let data = b"id,name,value\n1,alpha,10.5\n2,,\n3,gamma,7.25\n";
        let table = read_table("http://x/test.csv", data)?;
        assert_eq!(table.columns, vec!["id", "name", "value"]);
        assert_eq!(table.height(), 3);
        assert_eq!(table.rows[0][0], CellValue::Int(1));
        assert_eq!(table.rows[0][2], CellValue::Float(10.5));
        assert_eq!(table.rows[1][1], CellValue::Null);
        assert_eq!(table.rows[1][2], CellValue::Null);
        Ok(())
    }

    #[test]
    fn test_read_csv_parses_dates() -> Result<(), TabularError> {
        let data = b"day,count\n2024-01-01,3\n2024-01-02,4\n";
        let table = read_table("http://x/days.csv", data)?;
        assert_eq!(table.rows[0][0].to_json(), json!("2024-01-01"));
        Ok(())
    }

    #[test]
    fn test_read_csv_header_only() -> Result<(), TabularError> {
        let data = b"id,name,value\n";
        let table = read_table("http://x/empty.csv", data)?;
        assert_eq!(table.columns, vec!["id", "name", "value"]);
        assert_eq!(table.height(), 0);
        Ok(())
    }

    #[test]
    fn test_read_csv_malformed_is_processing_error() {
        // Zero bytes: no header row to parse
        let err = read_table("http://x/broken.csv", b"").unwrap_err();
        assert!(matches!(err, TabularError::Polars(_)));
    }

    #[test]
    fn test_cell_from_excel_empty_is_null() {
        assert_eq!(cell_from_excel(&Data::Empty), CellValue::Null);
    }

    #[test]
    fn test_cell_from_excel_scalars() {
        assert_eq!(cell_from_excel(&Data::Int(7)), CellValue::Int(7));
        assert_eq!(cell_from_excel(&Data::Float(2.5)), CellValue::Float(2.5));
        assert_eq!(cell_from_excel(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(
            cell_from_excel(&Data::String(String::from("hi"))),
            CellValue::String(String::from("hi"))
        );
    }

    #[test]
    fn test_cell_from_excel_iso_datetime() {
        let cell = Data::DateTimeIso(String::from("2024-03-09T12:30:45"));
        match cell_from_excel(&cell) {
            CellValue::DateTime(dt) => {
                assert_eq!(dt.to_string(), "2024-03-09 12:30:45");
            }
            other => panic!("expected DateTime, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_integral_columns_whole_floats_become_ints() {
        let mut rows = vec![
            vec![CellValue::Float(1.0), CellValue::Float(1.5)],
            vec![CellValue::Null, CellValue::Float(2.0)],
            vec![CellValue::Float(3.0), CellValue::Float(2.5)],
        ];
        normalize_integral_columns(&mut rows, 2);
        assert_eq!(rows[0][0], CellValue::Int(1));
        assert_eq!(rows[1][0], CellValue::Null);
        assert_eq!(rows[2][0], CellValue::Int(3));
        // Mixed column stays floating point
        assert_eq!(rows[0][1], CellValue::Float(1.5));
    }
}

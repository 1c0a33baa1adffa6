//! Spreadsheet parser (xlsx, xlsm, xls, ods)

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::config::Config;
use crate::model::Table;

use super::{push_row, record_row, Parser};

/// Parser for spreadsheets; one table per sheet
pub struct ExcelParser;

impl Parser for ExcelParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Vec<Table>> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

        let sheet_names = match config.sheet_name {
            Some(ref name) => vec![name.clone()],
            None => workbook.sheet_names(),
        };

        let mut tables = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range: Range<Data> = workbook
                .worksheet_range(&sheet_name)
                .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

            tables.push(parse_range(sheet_name, &range, config)?);
        }

        Ok(tables)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "xlsx" | "xls" | "ods" | "xlsm")
    }
}

fn parse_range(name: String, range: &Range<Data>, config: &Config) -> Result<Table> {
    let mut table = Table::new(name);
    let mut rows = range.rows();

    // First row is header; an empty sheet gives an empty table
    let Some(header_row) = rows.next() else {
        return Ok(table);
    };
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell_to_string(cell);
            if name.is_empty() {
                format!("Column{}", i + 1)
            } else {
                name
            }
        })
        .collect();

    for (line_num, row) in rows.enumerate() {
        let cells: Vec<String> = row.iter().map(cell_to_string).collect();
        push_row(
            &mut table,
            record_row(&headers, cells.iter().map(String::as_str)),
            config,
        )
        .with_context(|| format!("Invalid row {} in sheet {}", line_num + 2, table.name()))?;
    }

    Ok(table)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            // Whole numbers lose the trailing `.0`
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => serial_to_string(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

/// Format a spreadsheet date serial (days since 1899-12-30) as ISO-8601
fn serial_to_string(serial: f64) -> String {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0));
    let offset = TimeDelta::try_milliseconds((serial * 86_400_000.0).round() as i64);

    match epoch
        .zip(offset)
        .and_then(|(epoch, offset)| epoch.checked_add_signed(offset))
    {
        Some(dt) if dt.time() == NaiveTime::MIN => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => serial.to_string(),
    }
}

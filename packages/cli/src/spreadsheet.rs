//! XLSX and CSV writers for flattened records.
//!
//! Both files are always written as siblings: the XLSX for humans, the CSV
//! twin for anything downstream that wants plain text. Appending rebuilds
//! both files from the CSV twin plus the new rows, since the XLSX writer
//! cannot edit a workbook in place.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use pipeline::ColumnMapping;

/// One output row: display column name → cell text.
pub type Row = IndexMap<String, String>;

/// Write `rows` under the given output path (extension is replaced per
/// format). With `append`, rows already present in the CSV twin stay in
/// front of the new ones.
pub fn write(rows: &[Row], columns: &ColumnMapping, output: &Path, append: bool) -> Result<()> {
    let xlsx_path = output.with_extension("xlsx");
    let csv_path = output.with_extension("csv");

    let mut cells: Vec<Vec<String>> = Vec::new();
    if append && csv_path.exists() {
        cells.extend(read_existing(&csv_path, columns)?);
        info!(
            existing = cells.len(),
            path = %csv_path.display(),
            "appending to existing output"
        );
    }
    for row in rows {
        cells.push(
            columns
                .headers()
                .map(|header| row.get(header).cloned().unwrap_or_default())
                .collect(),
        );
    }

    write_csv(&csv_path, columns, &cells)?;
    write_xlsx(&xlsx_path, columns, &cells)?;

    info!(
        rows = cells.len(),
        xlsx = %xlsx_path.display(),
        csv = %csv_path.display(),
        "saved spreadsheet"
    );
    Ok(())
}

/// Read data rows back from the CSV twin, padded or truncated to the
/// current column count.
fn read_existing(path: &Path, columns: &ColumnMapping) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening existing output {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("reading existing output row")?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(columns.len(), String::new());
        rows.push(row);
    }
    Ok(rows)
}

fn write_csv(path: &Path, columns: &ColumnMapping, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record(columns.headers())?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, columns: &ColumnMapping, rows: &[Vec<String>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in columns.headers().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &bold)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            worksheet.write_string((r + 1) as u32, c as u16, cell)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("saving {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn columns() -> ColumnMapping {
        ColumnMapping::new()
            .column("Product Name", "product_name")
            .column("Manufacturer", "brand")
    }

    fn row(name: &str, brand: &str) -> Row {
        let mut row = Row::new();
        row.insert("Product Name".into(), name.into());
        row.insert("Manufacturer".into(), brand.into());
        row
    }

    fn scratch_path(test: &str) -> PathBuf {
        std::env::temp_dir().join(format!("partscan-{}-{test}.xlsx", std::process::id()))
    }

    fn read_csv(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn writes_both_files_with_headers() {
        let output = scratch_path("write");
        write(&[row("ZR34K5", "Copeland")], &columns(), &output, false).unwrap();

        assert!(output.with_extension("xlsx").exists());

        let csv_path = output.with_extension("csv");
        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, ["Product Name", "Manufacturer"]);

        let rows = read_csv(&csv_path);
        assert_eq!(rows, vec![vec!["ZR34K5".to_string(), "Copeland".to_string()]]);
    }

    #[test]
    fn append_keeps_existing_rows_in_front() {
        let output = scratch_path("append");
        write(&[row("A", "X")], &columns(), &output, false).unwrap();
        write(&[row("B", "Y")], &columns(), &output, true).unwrap();

        let rows = read_csv(&output.with_extension("csv"));
        assert_eq!(
            rows,
            vec![
                vec!["A".to_string(), "X".to_string()],
                vec!["B".to_string(), "Y".to_string()],
            ]
        );
    }

    #[test]
    fn append_without_existing_file_is_a_plain_write() {
        let output = scratch_path("append-fresh");
        let _ = std::fs::remove_file(output.with_extension("csv"));
        write(&[row("A", "X")], &columns(), &output, true).unwrap();

        let rows = read_csv(&output.with_extension("csv"));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_cells_are_written_empty() {
        let output = scratch_path("missing");
        let mut partial = Row::new();
        partial.insert("Product Name".into(), "Solo".into());

        write(&[partial], &columns(), &output, false).unwrap();

        let rows = read_csv(&output.with_extension("csv"));
        assert_eq!(rows, vec![vec!["Solo".to_string(), String::new()]]);
    }
}

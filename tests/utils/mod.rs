use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use disclosure_merge::reader::{CsvOptions, CsvTableReader};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Author file used by the end-to-end tests
pub const AUTHOR_FILE_NAME: &str = "AuthorID_20240628.csv";

/// Render a disclosure CSV with `columns` as the header
///
/// The first column of every row holds the given identifier; every other cell
/// holds `<column>_<row>`, except `Program_Year` which holds `year`.
#[must_use]
pub fn disclosure_csv(columns: &[&str], ids: &[&str], year: u16) -> String {
    let mut out = columns.join(",");
    out.push('\n');
    for (row, id) in ids.iter().enumerate() {
        let cells: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| match (idx, *column) {
                (0, _) => (*id).to_string(),
                (_, "Program_Year") => year.to_string(),
                (_, column) => format!("{column}_{row}"),
            })
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

/// Write a deflate-compressed archive holding `entries` (name, content)
pub fn write_archive(path: &Path, entries: &[(&str, String)]) -> PathBuf {
    let file = File::create(path).expect("create archive");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in entries {
        writer.start_file(*name, options).expect("start archive entry");
        writer.write_all(content.as_bytes()).expect("write archive entry");
    }
    writer.finish().expect("finish archive");
    path.to_path_buf()
}

/// Write a `;`-delimited author file
pub fn write_author_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write author file");
    path
}

/// Read a CSV written by the pipeline back into one batch
pub fn read_output(path: &Path) -> RecordBatch {
    CsvTableReader::open_all(path, &CsvOptions::default())
        .and_then(CsvTableReader::read_to_batch)
        .expect("read output csv")
}

/// Values of a text column, nulls as `None`
pub fn text_column(batch: &RecordBatch, name: &str) -> Vec<Option<String>> {
    let column = batch.column_by_name(name).unwrap_or_else(|| panic!("column {name} present"));
    let strings = column.as_any().downcast_ref::<StringArray>().expect("text column");
    (0..strings.len())
        .map(|i| (!strings.is_null(i)).then(|| strings.value(i).to_string()))
        .collect()
}

/// Column names of a batch in order
pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch.schema().fields().iter().map(|f| f.name().clone()).collect()
}

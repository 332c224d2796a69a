//! Dataset file reading (Parquet and CSV) into Polars DataFrames.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, ParquetReader, SerReader};

use crate::error::{IngestError, Result};

/// On-disk format of a dataset, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Parquet,
    Csv,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("parquet") => Ok(Self::Parquet),
            Some("csv") => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Reads a Parquet file into a DataFrame.
pub fn read_parquet_table(path: &Path) -> Result<DataFrame> {
    let file = open_file(path)?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| IngestError::ParquetParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads a CSV file (single header row) into a DataFrame.
///
/// The whole file is scanned for schema inference so late non-integer values
/// do not break an integer-typed column.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    // Surface a missing file as FileNotFound rather than a parse error.
    drop(open_file(path)?);
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads a dataset file, dispatching on its extension.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let df = match TableFormat::from_path(path)? {
        TableFormat::Parquet => read_parquet_table(path)?,
        TableFormat::Csv => read_csv_table(path)?,
    };
    validate_column_names(&df, path)?;
    Ok(df)
}

/// Rejects blank column headers.
pub fn validate_column_names(df: &DataFrame, path: &Path) -> Result<()> {
    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Normalizes column names to trimmed text.
///
/// Applied to the population table only, whose headers are built
/// dynamically upstream and may carry stray whitespace.
pub fn normalize_column_names(df: &mut DataFrame) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    df.set_column_names(names)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn create_temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            TableFormat::from_path(Path::new("a/b.parquet")).unwrap(),
            TableFormat::Parquet
        );
        assert_eq!(
            TableFormat::from_path(Path::new("b.CSV")).unwrap(),
            TableFormat::Csv
        );
        assert!(matches!(
            TableFormat::from_path(Path::new("b.xlsx")),
            Err(IngestError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_read_csv_table() {
        let file = create_temp_csv("municipio,total_total_total_2024\n12345 Example City,10000\n");
        let df = read_table(file.path()).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_missing_file() {
        let result = read_table(Path::new("/nonexistent/structured_population.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_normalize_column_names() {
        let file = create_temp_csv("municipio, total_total_total_2024 \n12345 Example City,1\n");
        let mut df = read_table(file.path()).unwrap();
        normalize_column_names(&mut df).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["municipio", "total_total_total_2024"]);
    }
}

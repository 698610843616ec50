use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};

/// Ошибки уровня файла: прерывают весь прогон до обработки строк
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read workbook: {0}")]
    Unreadable(String),
}

/// Читает первый лист файла как прямоугольник текстовых ячеек.
/// Строка 0 возвращается как есть — заголовок пропускает вызывающий код.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, ImportError> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.to_path_buf()));
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => read_csv(path),
        _ => read_spreadsheet(path),
    }
}

fn read_csv(path: &Path) -> Result<Vec<Vec<String>>, ImportError> {
    let file = std::fs::File::open(path).map_err(|e| ImportError::Unreadable(e.to_string()))?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| ImportError::Unreadable(e.to_string()))?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

fn read_spreadsheet(path: &Path) -> Result<Vec<Vec<String>>, ImportError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ImportError::Unreadable(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::Unreadable("workbook has no sheets".to_string()))?
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// Ячейки приводятся к тексту; у целых чисел дробная часть не печатается,
/// чтобы порядковые даты пережили преобразование ("45599", не "45599.0")
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_to_string(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => float_to_string(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}

fn float_to_string(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_a_file_level_error() {
        let err = read_rows(Path::new("no/such/ledger.xlsx")).unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[test]
    fn test_read_csv_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        std::fs::write(
            &path,
            "Date,Cash,Transfer,Lady,Drinks\n2024-11-03,1500,0,Ice,2\n",
        )
        .unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Date");
        assert_eq!(rows[1], vec!["2024-11-03", "1500", "0", "Ice", "2"]);
    }

    #[test]
    fn test_csv_rows_may_be_ragged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        std::fs::write(&path, "Date,Cash\n2024-11-03\n").unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn test_float_to_string_drops_integral_fraction() {
        assert_eq!(float_to_string(45599.0), "45599");
        assert_eq!(float_to_string(1500.5), "1500.5");
    }
}

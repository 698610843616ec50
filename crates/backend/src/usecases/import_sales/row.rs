use chrono::NaiveDate;

/// Ошибки уровня строки: фиксируются в отчёте, импорт продолжается
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("Missing date")]
    MissingDate,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Lady not found: \"{name}\". Available: {known}")]
    UnknownLady { name: String, known: String },
    #[error("Lady name is required when a drink quantity is given. Available: {known}")]
    MissingLadyName { known: String },
}

/// Нормализованная строка ведомости; живёт только внутри одного прогона
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    /// Номер строки листа, считая заголовок первой строкой
    pub row: usize,
    /// ISO-дата `YYYY-MM-DD`
    pub date: String,
    pub cash: f64,
    pub transfer: f64,
    pub lady_name: Option<String>,
    pub quantity: i64,
}

/// Пустая строка или строка без даты в первой ячейке — пропускается
pub fn is_blank(cells: &[String]) -> bool {
    cells.is_empty() || cells[0].trim().is_empty()
}

/// Чистое преобразование: ячейки → `ImportRow`, без побочных эффектов
pub fn normalize(index: usize, cells: &[String]) -> Result<ImportRow, RowError> {
    let date = parse_date(cell(cells, 0))?;
    let cash = parse_amount(cell(cells, 1));
    let transfer = parse_amount(cell(cells, 2));
    let lady_name = {
        let name = cell(cells, 3).trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    };
    let quantity = parse_quantity(cell(cells, 4));

    Ok(ImportRow {
        row: index + 1,
        date,
        cash,
        transfer,
        lady_name,
        quantity,
    })
}

fn cell(cells: &[String], index: usize) -> &str {
    cells.get(index).map(|s| s.as_str()).unwrap_or("")
}

/// Разбор даты: короткое число (≤5 символов) трактуется как порядковый
/// день книги от эпохи 1899-12-30, иначе — календарная запись
pub fn parse_date(raw: &str) -> Result<String, RowError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RowError::MissingDate);
    }

    if raw.len() <= 5 {
        if let Ok(serial) = raw.parse::<f64>() {
            let base = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
            let date = base + chrono::Duration::days(serial as i64);
            return Ok(date.format("%Y-%m-%d").to_string());
        }
    }

    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Ok(date.format("%Y-%m-%d").to_string());
        }
    }

    Err(RowError::InvalidDate(raw.to_string()))
}

/// Неотрицательная сумма; пустое, нечисловое или отрицательное значение → 0
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.trim().replace(',', ".");
    match s.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => v,
        _ => 0.0,
    }
}

/// Неотрицательное целое количество; дробное усекается, мусор → 0
pub fn parse_quantity(raw: &str) -> i64 {
    let s = raw.trim();
    if let Ok(v) = s.parse::<i64>() {
        return v.max(0);
    }
    if let Ok(f) = s.parse::<f64>() {
        return (f.trunc() as i64).max(0);
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_date_matches_calendar_date() {
        // 45599 дней от 1899-12-30 = 3 ноября 2024
        assert_eq!(parse_date("45599").unwrap(), "2024-11-03");
        assert_eq!(parse_date("2024-11-03").unwrap(), "2024-11-03");
        assert_eq!(parse_date("11/03/2024").unwrap(), "2024-11-03");
    }

    #[test]
    fn test_long_numeric_is_not_a_serial() {
        // шесть цифр — уже не порядковый номер дня
        assert!(matches!(
            parse_date("455990"),
            Err(RowError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_invalid_and_missing_dates() {
        assert_eq!(parse_date(""), Err(RowError::MissingDate));
        assert_eq!(parse_date("   "), Err(RowError::MissingDate));
        assert!(matches!(
            parse_date("not a date"),
            Err(RowError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_date("2024-13-40"),
            Err(RowError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1500"), 1500.0);
        assert_eq!(parse_amount("1500.50"), 1500.5);
        assert_eq!(parse_amount("1500,50"), 1500.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("n/a"), 0.0);
        assert_eq!(parse_amount("-200"), 0.0);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity("2.9"), 2);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("-1"), 0);
        assert_eq!(parse_quantity("many"), 0);
    }

    #[test]
    fn test_blank_rows() {
        assert!(is_blank(&[]));
        assert!(is_blank(&["".to_string(), "100".to_string()]));
        assert!(is_blank(&["  ".to_string()]));
        assert!(!is_blank(&["2024-11-03".to_string()]));
    }

    #[test]
    fn test_normalize_full_row() {
        let cells: Vec<String> = ["45599", "1500", "2000,50", " Ice ", "2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let row = normalize(1, &cells).unwrap();
        assert_eq!(row.row, 2);
        assert_eq!(row.date, "2024-11-03");
        assert_eq!(row.cash, 1500.0);
        assert_eq!(row.transfer, 2000.5);
        assert_eq!(row.lady_name.as_deref(), Some("Ice"));
        assert_eq!(row.quantity, 2);
    }

    #[test]
    fn test_normalize_short_row_defaults() {
        let cells = vec!["2024-11-03".to_string()];
        let row = normalize(3, &cells).unwrap();
        assert_eq!(row.row, 4);
        assert_eq!(row.cash, 0.0);
        assert_eq!(row.transfer, 0.0);
        assert_eq!(row.lady_name, None);
        assert_eq!(row.quantity, 0);
    }
}

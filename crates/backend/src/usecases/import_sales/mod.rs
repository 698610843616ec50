//! Импорт ведомости продаж из файла таблицы.
//!
//! Колонки листа (строка 0 — заголовок, пропускается):
//!   A — дата (порядковый номер дня книги или текст)
//!   B — сумма наличными
//!   C — сумма переводом
//!   D — имя сотрудницы (без учёта регистра, из активного состава)
//!   E — количество напитков (целое)
//!
//! Конвейер: чтение листа → разбор строки → справочник имён → запись в
//! журнал → отчёт. Вся запись идёт в одной транзакции на файл; ошибки
//! отдельных строк не прерывают импорт и попадают в отчёт.

pub mod directory;
pub mod executor;
pub mod row;
pub mod workbook;

pub use executor::import_sales_from_file;
pub use row::RowError;
pub use workbook::ImportError;

pub mod import_sales;

pub mod employees;
pub mod expenses;
pub mod import;
pub mod ladies;
pub mod lady_drinks;
pub mod reports;
pub mod salaries;
pub mod sales;

pub mod employees;
pub mod expenses;
pub mod ladies;
pub mod lady_drinks;
pub mod salaries;
pub mod sales;

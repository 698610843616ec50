pub mod employee;
pub mod expense;
pub mod import;
pub mod lady;
pub mod sale;
pub mod salary;

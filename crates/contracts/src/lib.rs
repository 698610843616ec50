pub mod domain;
pub mod reports;
pub mod system;

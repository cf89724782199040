pub mod aim;
pub mod config;
pub mod table;
pub mod types;

pub mod ball;
pub mod table;

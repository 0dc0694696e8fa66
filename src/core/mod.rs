pub mod refined;
pub mod table;

pub use refined::{IndexScore, TestFraction};
pub use table::{Column, ColumnType, Table};

//! Turns the semicolon-delimited stock export into SQL for the products
//! table.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod product;
pub mod records;
pub mod sql;

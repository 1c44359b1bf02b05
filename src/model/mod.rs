//! Portal data model: lookup tables, request parameters and result records.

pub mod dtos;
pub mod structs;

//! Application module - login and free-classroom queries
//!
//! Works against any [`RequestApi`](crate::interface::RequestApi), so the same
//! flow drives the real portal client and the test doubles.

pub mod classroom;
pub use classroom::*;

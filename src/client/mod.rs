//! Client module - the HTTP session the portal authenticates
//!
//! A single cookie-jar-backed reqwest client, bound to the portal base URL and
//! shared by login and every later query.

pub mod request;

pub use request::JwxtClient;

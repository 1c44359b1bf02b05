pub mod app;
pub mod client;
pub mod config;
pub mod crypto;
pub mod date;
pub mod error;
pub mod export;
pub mod font;
pub mod interface;
pub mod logging;
pub mod mock;
pub mod model;
pub mod parser;
pub mod render;
#[cfg(feature = "server")]
pub mod server;

pub use client::JwxtClient;
pub use error::{Error, ErrorKind, Result};

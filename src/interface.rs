#![allow(async_fn_in_trait)] // 允许在内部 trait 中使用 async fn

use crate::config::{ClientConfig, DEFAULT_REQUEST_DELAY};
use crate::error::Result;
use crate::model::dtos::{FreeClassroomQuery, LoginParams};
use std::time::Duration;

/// Common trait for HTTP client functionality
pub trait HttpClient {
    /// Create a new client with a fresh cookie jar
    fn new(config: ClientConfig) -> Result<Self>
    where
        Self: Sized;
}

/// The three exchanges the portal needs. Every call shares the same session.
pub trait RequestApi {
    /// Courtesy pause applied before the login post and before each search
    fn request_delay(&self) -> Duration {
        DEFAULT_REQUEST_DELAY
    }

    /// Fetch the login page HTML
    async fn get_login_page(&self) -> Result<String>;

    /// Post credentials; returns the final URL after redirects
    async fn send_login_request(&self, params: LoginParams) -> Result<String>;

    /// Post a free-classroom search; returns the result page HTML
    async fn search_free_classroom(&self, query: &FreeClassroomQuery) -> Result<String>;
}

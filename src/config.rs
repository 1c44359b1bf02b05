//! Runtime configuration.
//!
//! Everything is passed explicitly: the client takes a [`ClientConfig`], the
//! renderer a [`RenderConfig`], the preview server a [`ServerConfig`].
//! Credentials come from command-line flags or a local `.env.json`.

use crate::error::{ErrorKind, Result};
use image::Rgba;
use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_BASE_URL: &str = "https://jwxt.neuq.edu.cn/eams";
pub const DEFAULT_CREDENTIALS_PATH: &str = ".env.json";
pub const DEFAULT_OUTPUT_DIR: &str = "free-classroom-data";

/// Pause before every login and every search so the portal does not flag
/// the session for clicking too fast.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin plus context path, without a trailing slash
    pub base_url: String,
    pub request_delay: Duration,
    /// No timeout unless the caller sets one
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
            timeout: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Absolute URL for a portal path such as `/loginExt.action`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let creds: Credentials = serde_json::from_str(&raw)?;
        if creds.username.is_empty() || creds.password.is_empty() {
            return Err(ErrorKind::ConfigError(format!(
                "{} has an empty username or password",
                path.as_ref().display()
            ))
            .into());
        }
        Ok(creds)
    }

    /// Flags win when both are given; otherwise fall back to the JSON file.
    pub fn resolve(
        username: Option<String>,
        password: Option<String>,
        file: impl AsRef<Path>,
    ) -> Result<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok(Self { username, password })
            }
            (Some(_), None) | (None, Some(_)) => Err(ErrorKind::ConfigError(
                "pass both -u <username> and -p <password>".to_string(),
            )
            .into()),
            _ => {
                let file = file.as_ref();
                if !file.exists() {
                    return Err(ErrorKind::ConfigError(format!(
                        "pass -u username -p password or provide them in `{}`",
                        file.display()
                    ))
                    .into());
                }
                Self::from_json_file(file)
            }
        }
    }
}

/// Layout and palette for the PNG renderer. Sizes are pixels.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub line_height: u32,
    pub columns: u32,
    pub font_size: f32,
    pub title_font_size: f32,
    pub footer_font_size: f32,
    /// Font file to draw text with; system fonts are searched when unset
    pub font_path: Option<PathBuf>,
    pub background: Rgba<u8>,
    pub header: Rgba<u8>,
    pub text: Rgba<u8>,
    pub border: Rgba<u8>,
    pub footer: Rgba<u8>,
    pub free: Rgba<u8>,
    pub occupied: Rgba<u8>,
    pub empty_notice: Rgba<u8>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            padding: 40,
            line_height: 24,
            columns: 3,
            font_size: 16.0,
            title_font_size: 20.0,
            footer_font_size: 12.0,
            font_path: None,
            background: Rgba([0xff, 0xff, 0xff, 0xff]),
            header: Rgba([0x2c, 0x3e, 0x50, 0xff]),
            text: Rgba([0x34, 0x49, 0x5e, 0xff]),
            border: Rgba([0xbd, 0xc3, 0xc7, 0xff]),
            footer: Rgba([0x95, 0xa5, 0xa6, 0xff]),
            free: Rgba([0x27, 0xae, 0x60, 0xff]),
            occupied: Rgba([0xe7, 0x4c, 0x3c, 0xff]),
            empty_notice: Rgba([0xe7, 0x4c, 0x3c, 0xff]),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `HOST` (default 127.0.0.1) and `PORT` (default 3000).
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = match env::var("PORT") {
            Ok(p) => p
                .parse()
                .map_err(|_| ErrorKind::ConfigError(format!("invalid PORT: {p}")))?,
            Err(_) => 3000,
        };
        Ok(Self { host, port })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn url_joins_without_double_slash() {
        let config = ClientConfig::default().with_base_url("http://localhost:8080/eams/");
        assert_eq!(
            config.url("/loginExt.action"),
            "http://localhost:8080/eams/loginExt.action"
        );
        assert_eq!(
            config.url("classroom/apply/free!search.action"),
            "http://localhost:8080/eams/classroom/apply/free!search.action"
        );
    }

    #[test]
    fn flags_take_precedence_over_file() {
        let creds = Credentials::resolve(
            Some("2021001".into()),
            Some("pw".into()),
            "/definitely/missing.json",
        )
        .unwrap();
        assert_eq!(creds.username, "2021001");
    }

    #[test]
    fn half_given_flags_are_rejected() {
        let err = Credentials::resolve(Some("u".into()), None, "/missing.json").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ConfigError(_)));
    }

    #[test]
    fn credentials_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"username":"2021002","password":"secret"}}"#).unwrap();
        let creds = Credentials::resolve(None, None, file.path()).unwrap();
        assert_eq!(creds.username, "2021002");
        assert_eq!(creds.password, "secret");
        assert!(!format!("{creds:?}").contains("secret"));
    }

    #[test]
    fn missing_file_without_flags_is_a_config_error() {
        let err = Credentials::resolve(None, None, "/no/such/.env.json").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ConfigError(_)));
    }
}

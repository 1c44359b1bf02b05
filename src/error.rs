pub type Result<T> = core::result::Result<T, Error>;

pub struct Error {
    pub inner: Box<ErrorKind>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            inner: Box::new(kind),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.inner
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::new(ErrorKind::ReqwestError(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::new(ErrorKind::SerdeJsonError(e))
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(e: serde_urlencoded::ser::Error) -> Error {
        Error::new(ErrorKind::ParseError(format!("form encoding: {e}")))
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Error {
        Error::new(ErrorKind::ImageError(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::new(ErrorKind::StdIoError(e))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Transport failure, passed through as reqwest reported it.
    #[error("{0}")]
    ReqwestError(reqwest::Error),
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(serde_json::Error),
    #[error("ImageError: {0}")]
    ImageError(image::ImageError),
    #[error("FontError: {0}")]
    FontError(String),
    #[error("StdIoError: {0}")]
    StdIoError(std::io::Error),
    #[error("ParseError: {0}")]
    ParseError(String),
    /// The login page carried no `CryptoJS.SHA1('<salt>-' + ...)` script.
    #[error("salt not found on login page")]
    SaltNotFound,
    #[error("LoginError: login failed for user {0}")]
    LoginError(String),
    #[error("invalid input: {0}")]
    ValidationError(String),
    #[error("ConfigError: {0}")]
    ConfigError(String),
}

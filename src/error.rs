use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("path {name:?} escapes the data directory")]
    PathEscape { name: String },

    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("invalid path parameter: {0}")]
    InvalidParam(String),

    #[error("{0:?} is not a regular file")]
    NotAFile(String),

    #[error("request body error: {0}")]
    Body(String),

    #[error("k8s client error: {0}")]
    Kubernetes(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than the server.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::PathEscape { .. } | Error::InvalidName(_) | Error::InvalidParam(_)
        )
    }

    pub fn is_kubernetes(&self) -> bool {
        matches!(self, Error::Kubernetes(_))
    }
}

impl From<kube::Error> for Error {
    fn from(e: kube::Error) -> Self {
        Error::Kubernetes(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// request never produced a response (DNS, TLS, timeout, ...)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// response arrived but was not 2xx
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// two distinct keys, e.g. `1` and `"1"`, that spell the same field
    #[error("document {name} has more than one field named {key:?}")]
    DuplicateKey { name: String, key: String },

    #[error("document {name} is a {found}, expected a mapping")]
    NotAMapping { name: String, found: &'static str },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Transport failures mean "not here, try the next category".
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Status { .. })
    }
}

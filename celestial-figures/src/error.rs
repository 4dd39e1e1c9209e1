//! Error type for figure construction, normalization and output.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`Fetch`](Error::Fetch) | HTTP downloads in [`crate::fetch`] |
//! | [`Parse`](Error::Parse) | fab, Hipparcos and CSV readers |
//! | [`MissingStar`](Error::MissingStar) | catalog lookups during normalization and emission |
//! | [`Config`](Error::Config) | TOML configuration loading |
//! | [`Plot`](Error::Plot) | SVG rendering |

use crate::catalog::StarId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("{source_name}:{line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("constellation {constellation} references HIP {star}, which is not in the catalog")]
    MissingStar {
        constellation: String,
        star: StarId,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("plot error: {0}")]
    Plot(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn parse(source_name: &str, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.to_string(),
            line,
            message: message.into(),
        }
    }

    pub fn missing_star(constellation: &str, star: StarId) -> Self {
        Self::MissingStar {
            constellation: constellation.to_string(),
            star,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

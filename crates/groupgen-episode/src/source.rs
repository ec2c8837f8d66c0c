//! Where the upstream episode comes from.

use crate::EpisodeError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeSource {
    File(PathBuf),
    /// An `http:` or `https:` URL, fetched with one blocking GET.
    Remote(Url),
    /// An episode already held in memory (embedded resources, tests).
    Inline { name: String, text: String },
}

impl EpisodeSource {
    /// Accepts `file:`, `http:` and `https:` URLs and plain filesystem paths.
    pub fn parse(location: &str) -> Result<Self, EpisodeError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(EpisodeError::InvalidLocation {
                location: location.to_string(),
                message: "empty location".to_string(),
            });
        }
        match Url::parse(location) {
            // Single-letter schemes are drive letters, not URLs.
            Ok(url) if url.scheme().len() == 1 => Ok(Self::File(PathBuf::from(location))),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::File)
                .map_err(|()| EpisodeError::InvalidLocation {
                    location: location.to_string(),
                    message: "file URL has no local path".to_string(),
                }),
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                if url.host_str().is_none() {
                    return Err(EpisodeError::InvalidLocation {
                        location: location.to_string(),
                        message: "URL has no host".to_string(),
                    });
                }
                Ok(Self::Remote(url))
            }
            Ok(url) => Err(EpisodeError::UnsupportedScheme {
                location: location.to_string(),
                scheme: url.scheme().to_string(),
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Self::File(PathBuf::from(location)))
            }
            Err(err) => Err(EpisodeError::InvalidLocation {
                location: location.to_string(),
                message: err.to_string(),
            }),
        }
    }

    pub fn inline(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Inline {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Blocking read of the whole document.
    pub fn read(&self) -> Result<String, EpisodeError> {
        match self {
            Self::File(path) => std::fs::read_to_string(path).map_err(|source| EpisodeError::Io {
                location: path.display().to_string(),
                source,
            }),
            Self::Remote(url) => fetch(url),
            Self::Inline { text, .. } => Ok(text.clone()),
        }
    }
}

fn fetch(url: &Url) -> Result<String, EpisodeError> {
    let io_error = |err: reqwest::Error| EpisodeError::Io {
        location: url.to_string(),
        source: std::io::Error::other(err),
    };
    tracing::debug!(url = %url, "fetching upstream episode");
    reqwest::blocking::get(url.clone())
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(io_error)
}

impl FromStr for EpisodeSource {
    type Err = EpisodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EpisodeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
            Self::Inline { name, .. } => write!(f, "inline:{name}"),
        }
    }
}

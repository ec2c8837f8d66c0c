//! Episode handling for groupgen.
//!
//! An *episode* is the binding record a previous, separately compiled schema
//! module left behind. For group interfaces it maps a group's schema identity
//! (namespace + name) to the qualified name of the interface generated for it.
//!
//! - [`EpisodeSource`] locates the upstream episode (file URL or path).
//! - [`extract`] turns an episode document into normalized [`InterfaceBindings`].
//! - [`EpisodeIndex`] answers "is this group already published, and as what?".
//! - [`LazyEpisode`] is the load-once state the generator holds.
//! - [`EpisodeBuilder`] records this run's interfaces and writes them back out
//!   in the episode format.

pub mod builder;
pub mod extract;
pub mod index;
pub mod source;

pub use builder::{EpisodeBuilder, EpisodeEntry};
pub use extract::{extract_bindings, InterfaceBinding, InterfaceBindings, SchemaComponentRef};
pub use index::{Availability, EpisodeIndex, LazyEpisode, ReferencedInterfaceOutline};
pub use source::EpisodeSource;

use thiserror::Error;

/// Every way loading or writing an episode can fail. All of them abort the
/// generation run.
#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("cannot read episode {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid episode location {location:?}: {message}")]
    InvalidLocation { location: String, message: String },
    #[error("unsupported episode URL scheme {scheme:?} in {location}")]
    UnsupportedScheme { location: String, scheme: String },
    #[error("malformed episode XML at byte {position}: {message}")]
    Malformed { position: usize, message: String },
    #[error("unrecognized episode document root <{root}>")]
    UnrecognizedDocument { root: String },
    #[error("episode document is empty")]
    EmptyDocument,
    #[error("undeclared namespace prefix {prefix:?} in scd {scd:?}")]
    UnknownPrefix { prefix: String, scd: String },
    #[error("episode binding {scd:?} names no interface")]
    MissingInterfaceRef { scd: String },
    #[error("cannot deserialize interface bindings: {0}")]
    Deserialize(String),
    #[error("cannot write episode: {0}")]
    Write(String),
}

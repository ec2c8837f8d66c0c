//! Fatal generation errors.
//!
//! Every variant aborts the run. Recoverable conditions are reported as
//! warnings through [`crate::diagnostics`] instead.

use groupgen_episode::EpisodeError;
use groupgen_model::schema_writer::SchemaWriteError;
use groupgen_model::QName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("upstream episode: {0}")]
    Episode(#[from] EpisodeError),

    #[error("no package found for namespace \"{namespace}\" of group {group}")]
    PackageNotFound { namespace: String, group: QName },

    #[error("no implementation class {class_name} found for group {group}")]
    NoImplementation { class_name: String, group: QName },

    #[error("interface {name} already exists")]
    InterfaceExists { name: String },

    #[error("property {property} of group {group} not found in implementation class {class}")]
    PropertyNotFound {
        group: QName,
        property: String,
        class: String,
    },

    #[error("members {first} and {second} of group {group} both map to property {property}")]
    PropertyNameCollision {
        group: QName,
        property: String,
        first: QName,
        second: QName,
    },

    #[error("schema fragment for documentation: {0}")]
    SchemaFragment(#[from] SchemaWriteError),

    #[error("builder generation for {interface}: {message}")]
    Builder { interface: String, message: String },
}

pub type Result<T> = std::result::Result<T, GenerationError>;

//! Groupgen core: interfaces for schema groups.
//!
//! For every named model group and attribute group of a schema set this crate
//! declares an interface that
//!
//! - replaces the placeholder class the schema compiler generated for the
//!   group, keeping its qualified name,
//! - mirrors that placeholder's getters (and setters, unless immutable),
//! - extends the interfaces of the groups it nests,
//! - is implemented by every generated class whose complex type uses the group.
//!
//! Groups already published by an upstream module (its *episode*) are
//! referenced instead of redeclared.
//!
//! The entry point is [`GroupInterfaceGenerator`].

pub mod bind;
pub mod builder;
pub mod cleanup;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod interface;
pub mod link;
pub mod property;
pub mod synthesize;
pub mod walker;

pub use bind::GroupAssociations;
pub use builder::{
    BuilderGenerator, BuilderOptions, BuilderOutline, BuilderOutlines, FluentBuilderDeclarations,
};
pub use config::{
    BoundPropertiesPlugin, CompanionPlugins, DeepClonePlugin, GeneratorConfig, GeneratorSettings,
};
pub use diagnostics::{CollectingDiagnostics, Diagnostic, Diagnostics, Severity};
pub use error::GenerationError;
pub use generator::{GenerationInput, GenerationReport, GroupInterfaceGenerator};
pub use interface::{InterfaceOutline, InterfaceSet, TypeOutline};
pub use walker::{
    resolve_members, walk_complex_type, walk_group, ContentGroups, GroupStructure,
    MemberDeclaration, MemberKind,
};

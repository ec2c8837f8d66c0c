//! Groupgen model: the inputs the group-interface generator works on.
//!
//! Two halves live here:
//!
//! - [`schema`]: the compiled schema declarations (model groups, attribute
//!   groups, complex types) as plain serde data. These are read-only inputs.
//! - [`outline`]: the generated-code outline (packages, implementation classes,
//!   object factories, interface declarations) that the generator rewires.
//!
//! The [`naming`] module carries the schema compiler's naming conventions and
//! [`schema_writer`] renders a declaration back to an XSD fragment for docs.

pub mod environment;
pub mod naming;
pub mod outline;
pub mod qname;
pub mod schema;
pub mod schema_writer;

pub use environment::TypeEnvironment;
pub use naming::{NameConverter, StandardNameConverter};
pub use outline::{
    ClassOutline, DeclaredType, FieldOutline, InterfaceDecl, Method, Outline, OutlineError,
    PackageOutline, Param, SchemaComponent, TypeRef,
};
pub use qname::{Locator, QName};
pub use schema::{
    AttributeDecl, AttributeGroupDecl, AttributeUse, ComplexType, Compositor, ContentType,
    ElementDecl, GroupDeclaration, GroupKind, MaxOccurs, ModelGroup, ModelGroupDecl, Particle,
    PropertyCustomization, SchemaSet, Term,
};

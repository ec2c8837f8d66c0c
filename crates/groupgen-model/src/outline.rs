//! Generated-code outline.
//!
//! The outline is what the schema compiler already produced before the group
//! generator runs: packages, implementation classes with their fields and
//! methods, and each package's object factory. The generator mutates it in
//! place (declares interfaces, adds `implements` edges, drops dummy classes).
//!
//! Types are rendered as plain strings (`"java.lang.String"`, `"boolean"`,
//! `"void"`); the outline never interprets them.

use crate::qname::QName;
use crate::schema::ComplexType;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutlineError {
    #[error("type {name} already exists in package {package:?}")]
    TypeExists { package: String, name: String },
    #[error("unknown package {0:?}")]
    UnknownPackage(String),
}

// ============================================================================
// Type references
// ============================================================================

/// A qualified type name split into package and (possibly dotted) simple name.
///
/// Nested types keep their outer type in `name`: `Address.BuildSupport`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeRef {
    pub package: String,
    pub name: String,
}

impl TypeRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Split a qualified name at its last dot. Names without a dot live in the
    /// unnamed package.
    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", qualified),
        }
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn nested(&self, name: &str) -> TypeRef {
        TypeRef::new(self.package.clone(), format!("{}.{name}", self.name))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<String>,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params: Vec::new(),
            throws: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    pub fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!("{} {}({params})", self.return_type, self.name);
        if !self.throws.is_empty() {
            out.push_str(" throws ");
            out.push_str(&self.throws.join(", "));
        }
        out
    }
}

/// A generated field together with its bound property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOutline {
    /// Public (capitalized) property name, e.g. `Street`.
    pub property_name: String,
    pub field_name: String,
    pub ty: String,
}

impl FieldOutline {
    pub fn new(
        property_name: impl Into<String>,
        field_name: impl Into<String>,
        ty: impl Into<String>,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            field_name: field_name.into(),
            ty: ty.into(),
        }
    }
}

// ============================================================================
// Classes
// ============================================================================

/// The schema component an implementation class was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum SchemaComponent {
    /// Placeholder class generated for a named group.
    Group { name: QName },
    ComplexType(ComplexType),
    /// Class for a global element; only elements of complex type take part in
    /// group binding.
    Element {
        name: QName,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        complex_type: Option<ComplexType>,
    },
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOutline {
    pub package: String,
    pub name: String,
    pub schema_component: SchemaComponent,
    #[serde(default)]
    pub fields: Vec<FieldOutline>,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub implements: Vec<TypeRef>,
}

impl ClassOutline {
    pub fn new(
        package: impl Into<String>,
        name: impl Into<String>,
        schema_component: SchemaComponent,
    ) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            schema_component,
            fields: Vec::new(),
            methods: Vec::new(),
            implements: Vec::new(),
        }
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.package.clone(), self.name.clone())
    }

    pub fn qualified_name(&self) -> String {
        self.type_ref().qualified_name()
    }

    /// The complex type this class binds, if any.
    pub fn complex_type(&self) -> Option<&ComplexType> {
        match &self.schema_component {
            SchemaComponent::ComplexType(ct) => Some(ct),
            SchemaComponent::Element { complex_type, .. } => complex_type.as_ref(),
            SchemaComponent::Group { .. } | SchemaComponent::None => None,
        }
    }

    pub fn find_method(&self, name: &str, arity: usize) -> Option<&Method> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.params.len() == arity)
    }

    /// Adds an `implements` edge unless it is already present.
    pub fn add_implements(&mut self, ty: TypeRef) -> bool {
        if self.implements.contains(&ty) {
            return false;
        }
        self.implements.push(ty);
        true
    }
}

// ============================================================================
// Interfaces
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub package: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub extends: Vec<TypeRef>,
    #[serde(default)]
    pub nested: BTreeMap<String, InterfaceDecl>,
}

impl InterfaceDecl {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            doc: String::new(),
            methods: Vec::new(),
            extends: Vec::new(),
            nested: BTreeMap::new(),
        }
    }

    pub fn add_extends(&mut self, ty: TypeRef) -> bool {
        if self.extends.contains(&ty) {
            return false;
        }
        self.extends.push(ty);
        true
    }

    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Declares a nested interface; the name must be free.
    pub fn declare_nested(&mut self, name: &str) -> Result<&mut InterfaceDecl, OutlineError> {
        if self.nested.contains_key(name) {
            return Err(OutlineError::TypeExists {
                package: self.package.clone(),
                name: format!("{}.{name}", self.name),
            });
        }
        let nested = InterfaceDecl::new(self.package.clone(), format!("{}.{name}", self.name));
        Ok(self.nested.entry(name.to_string()).or_insert(nested))
    }
}

// ============================================================================
// Packages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum DeclaredType {
    Class { qualified_name: String },
    Interface(InterfaceDecl),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOutline {
    pub name: String,
    /// Most used namespace URI of the schema components bound into this package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub types: BTreeMap<String, DeclaredType>,
    /// Methods of the package's object factory (`create<ClassName>` etc).
    #[serde(default)]
    pub object_factory: Vec<Method>,
}

impl PackageOutline {
    pub fn new(name: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
            types: BTreeMap::new(),
            object_factory: Vec::new(),
        }
    }

    /// Removes the slot of `class` if it still holds that class.
    pub fn remove_class(&mut self, class: &ClassOutline) -> bool {
        let qualified = class.qualified_name();
        let holds_class = matches!(
            self.types.get(&class.name),
            Some(DeclaredType::Class { qualified_name }) if *qualified_name == qualified
        );
        if holds_class {
            self.types.remove(&class.name);
        }
        holds_class
    }

    pub fn declare_interface(&mut self, name: &str) -> Result<&mut InterfaceDecl, OutlineError> {
        let package = self.name.clone();
        let slot = match self.types.entry(name.to_string()) {
            Entry::Occupied(_) => {
                return Err(OutlineError::TypeExists {
                    package,
                    name: name.to_string(),
                })
            }
            Entry::Vacant(slot) => slot,
        };
        match slot.insert(DeclaredType::Interface(InterfaceDecl::new(package.clone(), name))) {
            DeclaredType::Interface(decl) => Ok(decl),
            DeclaredType::Class { .. } => Err(OutlineError::TypeExists {
                package,
                name: name.to_string(),
            }),
        }
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceDecl> {
        match self.types.get(name) {
            Some(DeclaredType::Interface(decl)) => Some(decl),
            _ => None,
        }
    }

    pub fn interface_mut(&mut self, name: &str) -> Option<&mut InterfaceDecl> {
        match self.types.get_mut(name) {
            Some(DeclaredType::Interface(decl)) => Some(decl),
            _ => None,
        }
    }

    /// Drops every object-factory method with the given name; returns how many.
    pub fn remove_factory_methods(&mut self, name: &str) -> usize {
        let before = self.object_factory.len();
        self.object_factory.retain(|m| m.name != name);
        before - self.object_factory.len()
    }
}

// ============================================================================
// Outline
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    #[serde(default)]
    pub packages: BTreeMap<String, PackageOutline>,
    /// Every generated class, keyed by qualified name.
    #[serde(default)]
    pub classes: BTreeMap<String, ClassOutline>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_package(&mut self, package: PackageOutline) {
        self.packages.insert(package.name.clone(), package);
    }

    /// Registers a class in the class registry and in its package.
    pub fn add_class(&mut self, class: ClassOutline) -> Result<(), OutlineError> {
        let package = self
            .packages
            .get_mut(&class.package)
            .ok_or_else(|| OutlineError::UnknownPackage(class.package.clone()))?;
        if package.types.contains_key(&class.name) {
            return Err(OutlineError::TypeExists {
                package: class.package.clone(),
                name: class.name.clone(),
            });
        }
        let qualified_name = class.qualified_name();
        package.types.insert(
            class.name.clone(),
            DeclaredType::Class {
                qualified_name: qualified_name.clone(),
            },
        );
        self.classes.insert(qualified_name, class);
        Ok(())
    }

    /// First package whose most used namespace is `namespace`.
    pub fn package_for_namespace(&self, namespace: &str) -> Option<&PackageOutline> {
        self.packages
            .values()
            .find(|p| p.namespace.as_deref() == Some(namespace))
    }

    /// The placeholder class generated for the named group.
    pub fn class_for_group(&self, group: &QName) -> Option<&ClassOutline> {
        self.classes.values().find(|c| {
            matches!(&c.schema_component, SchemaComponent::Group { name } if name == group)
        })
    }

    pub fn interface(&self, ty: &TypeRef) -> Option<&InterfaceDecl> {
        self.packages.get(&ty.package)?.interface(&ty.name)
    }

    pub fn interface_mut(&mut self, ty: &TypeRef) -> Option<&mut InterfaceDecl> {
        self.packages.get_mut(&ty.package)?.interface_mut(&ty.name)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDecl> {
        self.packages.values().flat_map(|p| {
            p.types.values().filter_map(|t| match t {
                DeclaredType::Interface(decl) => Some(decl),
                DeclaredType::Class { .. } => None,
            })
        })
    }
}

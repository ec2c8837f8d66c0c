//! Outlines of the interfaces this run knows about.

use groupgen_episode::ReferencedInterfaceOutline;
use groupgen_model::{FieldOutline, GroupDeclaration, GroupKind, QName, TypeRef};
use serde::Serialize;
use std::collections::BTreeMap;

/// An interface synthesized in this run for a group declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceOutline {
    declaration: GroupDeclaration,
    type_ref: TypeRef,
    /// The placeholder class the interface displaced.
    dummy_implementation: TypeRef,
    super_interfaces: Vec<TypeOutline>,
    published_fields: Vec<FieldOutline>,
}

impl InterfaceOutline {
    pub(crate) fn new(
        declaration: GroupDeclaration,
        type_ref: TypeRef,
        dummy_implementation: TypeRef,
    ) -> Self {
        Self {
            declaration,
            type_ref,
            dummy_implementation,
            super_interfaces: Vec::new(),
            published_fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &QName {
        self.declaration.name()
    }

    pub fn kind(&self) -> GroupKind {
        self.declaration.kind()
    }

    pub fn declaration(&self) -> &GroupDeclaration {
        &self.declaration
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn dummy_implementation(&self) -> &TypeRef {
        &self.dummy_implementation
    }

    pub fn super_interfaces(&self) -> &[TypeOutline] {
        &self.super_interfaces
    }

    pub fn published_fields(&self) -> &[FieldOutline] {
        &self.published_fields
    }

    pub(crate) fn add_super_interface(&mut self, super_interface: TypeOutline) -> bool {
        if self.super_interfaces.contains(&super_interface) {
            return false;
        }
        self.super_interfaces.push(super_interface);
        true
    }

    pub(crate) fn publish_field(&mut self, field: FieldOutline) {
        self.published_fields.push(field);
    }
}

/// Anything that can be extended or implemented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum TypeOutline {
    /// Synthesized in this run.
    Synthesized { type_ref: TypeRef },
    /// Published by an upstream module.
    Referenced(ReferencedInterfaceOutline),
}

impl TypeOutline {
    pub fn type_ref(&self) -> &TypeRef {
        match self {
            TypeOutline::Synthesized { type_ref } => type_ref,
            TypeOutline::Referenced(reference) => &reference.type_ref,
        }
    }
}

/// Synthesized interfaces of one batch, keyed by group name.
pub type InterfaceSet = BTreeMap<QName, InterfaceOutline>;

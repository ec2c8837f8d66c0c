//! Compiled types visible to the generation run.
//!
//! Interfaces published by separately compiled modules are only usable as
//! `implements` targets when they are actually available. The environment
//! answers that question once, by name, instead of probing at binding time.

use crate::outline::TypeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeEnvironment {
    interfaces: BTreeSet<String>,
}

impl TypeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, qualified_name: impl Into<String>) {
        self.interfaces.insert(qualified_name.into());
    }

    pub fn contains(&self, ty: &TypeRef) -> bool {
        self.interfaces.contains(&ty.qualified_name())
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TypeEnvironment {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            interfaces: iter.into_iter().map(Into::into).collect(),
        }
    }
}

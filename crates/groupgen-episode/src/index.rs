//! The episode index: group identity → externally published interface.

use crate::extract::{extract_bindings, InterfaceBindings};
use crate::source::EpisodeSource;
use crate::EpisodeError;
use groupgen_model::{QName, TypeEnvironment, TypeRef};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::BTreeMap;

/// Whether a referenced interface can actually be named as a supertype in
/// this run. Decided once, when the episode is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Compiled,
    Missing,
}

/// Handle to an interface generated by a separately compiled module.
///
/// Only the name is known; its members are never re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencedInterfaceOutline {
    pub type_ref: TypeRef,
    pub availability: Availability,
}

impl ReferencedInterfaceOutline {
    pub fn resolve(type_ref: TypeRef, environment: &TypeEnvironment) -> Self {
        let availability = if environment.contains(&type_ref) {
            Availability::Compiled
        } else {
            Availability::Missing
        };
        Self {
            type_ref,
            availability,
        }
    }

    /// The interface type, if it is available to implement.
    pub fn compiled(&self) -> Option<&TypeRef> {
        match self.availability {
            Availability::Compiled => Some(&self.type_ref),
            Availability::Missing => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeIndex {
    interfaces: BTreeMap<QName, ReferencedInterfaceOutline>,
}

impl EpisodeIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_bindings(bindings: InterfaceBindings, environment: &TypeEnvironment) -> Self {
        let interfaces = bindings
            .interfaces
            .into_iter()
            .map(|binding| {
                let component = QName::new(
                    binding.schema_component.namespace,
                    binding.schema_component.name,
                );
                let outline = ReferencedInterfaceOutline::resolve(
                    TypeRef::parse(&binding.name),
                    environment,
                );
                (component, outline)
            })
            .collect();
        Self { interfaces }
    }

    /// Reads and indexes the episode behind `source`.
    pub fn load(
        source: &EpisodeSource,
        environment: &TypeEnvironment,
    ) -> Result<Self, EpisodeError> {
        let text = source.read()?;
        let bindings = extract_bindings(&text)?;
        let index = Self::from_bindings(bindings, environment);
        tracing::info!(
            source = %source,
            interfaces = index.len(),
            "loaded upstream episode"
        );
        Ok(index)
    }

    pub fn is_known(&self, component: &QName) -> bool {
        self.interfaces.contains_key(component)
    }

    pub fn lookup(&self, component: &QName) -> Option<&ReferencedInterfaceOutline> {
        self.interfaces.get(component)
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QName, &ReferencedInterfaceOutline)> {
        self.interfaces.iter()
    }
}

/// Load-once episode state: the configured source plus the index, filled on
/// first access.
///
/// Without a configured source the index is empty once loaded, never absent.
#[derive(Debug, Clone)]
pub struct LazyEpisode {
    source: Option<EpisodeSource>,
    index: OnceCell<EpisodeIndex>,
}

impl LazyEpisode {
    pub fn new(source: Option<EpisodeSource>) -> Self {
        Self {
            source,
            index: OnceCell::new(),
        }
    }

    pub fn source(&self) -> Option<&EpisodeSource> {
        self.source.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.index.get().is_some()
    }

    /// The index, loading it on the first successful call. A failed load
    /// leaves the state unloaded.
    pub fn get_or_load(
        &self,
        environment: &TypeEnvironment,
    ) -> Result<&EpisodeIndex, EpisodeError> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }
        let index = match &self.source {
            Some(source) => EpisodeIndex::load(source, environment)?,
            None => EpisodeIndex::empty(),
        };
        Ok(self.index.get_or_init(|| index))
    }
}

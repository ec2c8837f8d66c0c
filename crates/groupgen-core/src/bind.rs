//! Implementation binding: classes implement the interfaces of the groups
//! they use.
//!
//! Only associations with interfaces synthesized in this run are recorded in
//! [`GroupAssociations`]; upstream interfaces are implemented but not recorded.

use crate::generator::Session;
use crate::interface::InterfaceSet;
use crate::walker::walk_complex_type;
use groupgen_episode::EpisodeIndex;
use groupgen_model::{QName, TypeRef};
use serde::Serialize;
use std::collections::BTreeMap;

/// Which synthesized interfaces each class implements, by class qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupAssociations {
    by_class: BTreeMap<String, Vec<TypeRef>>,
}

impl GroupAssociations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, class: &str, interface: &TypeRef) {
        let interfaces = self.by_class.entry(class.to_string()).or_default();
        if !interfaces.contains(interface) {
            interfaces.push(interface.clone());
        }
    }

    pub fn interfaces_for_class(&self, class: &str) -> &[TypeRef] {
        self.by_class.get(class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classes implementing `interface`.
    pub fn implementors_of<'a>(&'a self, interface: &'a TypeRef) -> impl Iterator<Item = &'a str> {
        self.by_class
            .iter()
            .filter(move |(_, interfaces)| interfaces.contains(interface))
            .map(|(class, _)| class.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TypeRef])> {
        self.by_class
            .iter()
            .map(|(class, interfaces)| (class.as_str(), interfaces.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_class.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty()
    }
}

enum Resolution {
    Synthesized(TypeRef),
    External(TypeRef),
    Unavailable(String),
}

fn resolve_group(
    session: &Session<'_>,
    group: &QName,
    batch: &InterfaceSet,
    episode: &EpisodeIndex,
) -> Resolution {
    if let Some(interface) = batch.get(group) {
        return Resolution::Synthesized(interface.type_ref().clone());
    }
    if let Some(reference) = episode.lookup(group) {
        return match reference.compiled() {
            Some(type_ref) => Resolution::External(type_ref.clone()),
            None => Resolution::Unavailable(format!(
                "interface {} for group {group} is not available to implement",
                reference.type_ref
            )),
        };
    }
    let Some(package) = session.names.to_package_name(&group.namespace) else {
        return Resolution::Unavailable(format!(
            "no package found for namespace \"{}\" of group {group}",
            group.namespace
        ));
    };
    let candidate = TypeRef::new(package, session.names.to_class_name(&group.local));
    if session.environment.contains(&candidate) {
        Resolution::External(candidate)
    } else {
        Resolution::Unavailable(format!(
            "interface {candidate} for group {group} not found"
        ))
    }
}

fn bind_groups(
    session: &mut Session<'_>,
    class_name: &str,
    groups: &[QName],
    batch: &InterfaceSet,
    episode: &EpisodeIndex,
    associations: &mut GroupAssociations,
) {
    for group in groups {
        let interface = match resolve_group(session, group, batch, episode) {
            Resolution::Synthesized(interface) => {
                associations.record(class_name, &interface);
                interface
            }
            Resolution::External(interface) => interface,
            Resolution::Unavailable(message) => {
                let locator = session.schema.locator_of(group).cloned();
                session.warn(
                    format!("{message}; class {class_name} will not implement it"),
                    locator.as_ref(),
                );
                continue;
            }
        };
        if let Some(class) = session.outline.classes.get_mut(class_name) {
            if class.add_implements(interface.clone()) {
                tracing::debug!(class = %class_name, interface = %interface, "bound implementation");
            }
        }
    }
}

/// Adds `implements` edges to every class whose complex type uses a group.
pub(crate) fn bind_implementations(
    session: &mut Session<'_>,
    model_groups: &InterfaceSet,
    attribute_groups: &InterfaceSet,
    episode: &EpisodeIndex,
) -> GroupAssociations {
    let mut associations = GroupAssociations::new();
    let bindable: Vec<(String, _)> = session
        .outline
        .classes
        .iter()
        .filter_map(|(name, class)| {
            class
                .complex_type()
                .map(|ct| (name.clone(), walk_complex_type(ct)))
        })
        .collect();

    for (class_name, content) in bindable {
        bind_groups(
            session,
            &class_name,
            &content.attribute_groups,
            attribute_groups,
            episode,
            &mut associations,
        );
        bind_groups(
            session,
            &class_name,
            &content.model_groups,
            model_groups,
            episode,
            &mut associations,
        );
    }
    associations
}

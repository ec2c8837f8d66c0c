//! Superinterface linking.
//!
//! Nested group references become `extends` edges. A reference resolves to
//! an interface of the same batch first, then to the upstream episode. What
//! resolves to neither is dropped without a diagnostic.

use crate::generator::Session;
use crate::interface::{InterfaceSet, TypeOutline};
use crate::walker::walk_group;
use groupgen_episode::EpisodeIndex;
use groupgen_model::QName;

fn resolve_reference(
    reference: &QName,
    interfaces: &InterfaceSet,
    episode: &EpisodeIndex,
) -> Option<TypeOutline> {
    if let Some(interface) = interfaces.get(reference) {
        return Some(TypeOutline::Synthesized {
            type_ref: interface.type_ref().clone(),
        });
    }
    episode.lookup(reference).cloned().map(TypeOutline::Referenced)
}

pub(crate) fn link_super_interfaces(
    session: &mut Session<'_>,
    interfaces: &mut InterfaceSet,
    episode: &EpisodeIndex,
) {
    let mut edges: Vec<(QName, TypeOutline)> = Vec::new();
    for (name, interface) in interfaces.iter() {
        let structure = walk_group(interface.declaration(), session.names);
        for reference in &structure.group_refs {
            match resolve_reference(reference, interfaces, episode) {
                Some(target) => edges.push((name.clone(), target)),
                None => tracing::debug!(
                    group = %name,
                    reference = %reference,
                    "nested group has no interface; no superinterface"
                ),
            }
        }
    }

    for (name, target) in edges {
        let Some(interface) = interfaces.get_mut(&name) else {
            continue;
        };
        if let Some(decl) = session.outline.interface_mut(interface.type_ref()) {
            decl.add_extends(target.type_ref().clone());
        }
        tracing::debug!(
            interface = %interface.type_ref(),
            extends = %target.type_ref(),
            "linked superinterface"
        );
        interface.add_super_interface(target);
    }
}

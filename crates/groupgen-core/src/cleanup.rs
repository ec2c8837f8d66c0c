//! Removal of the placeholder classes once every interface is wired.

use crate::interface::InterfaceOutline;
use groupgen_model::{Outline, TypeRef};

/// Drops each interface's dummy class and its `create<Name>` factory method.
/// Returns the removed classes.
pub fn remove_dummy_implementations<'a>(
    outline: &mut Outline,
    interfaces: impl IntoIterator<Item = &'a InterfaceOutline>,
) -> Vec<TypeRef> {
    let mut removed = Vec::new();
    for interface in interfaces {
        let dummy = interface.dummy_implementation();
        let factory_method = format!("create{}", dummy.name);
        let factory_methods = outline
            .packages
            .get_mut(&dummy.package)
            .map(|package| package.remove_factory_methods(&factory_method))
            .unwrap_or(0);
        if outline.classes.remove(&dummy.qualified_name()).is_some() {
            removed.push(dummy.clone());
        }
        tracing::debug!(
            class = %dummy,
            factory_methods,
            "removed dummy implementation"
        );
    }
    removed
}

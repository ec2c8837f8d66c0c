//! Interface synthesis: one interface per group declaration.
//!
//! The interface takes over the slot of the placeholder class the schema
//! compiler generated for the group: same package, same simple name. The
//! group's namespace must still map to a package. Its accessors are copied
//! from that placeholder's getters and setters, so existing implementations
//! keep satisfying it.

use crate::error::{GenerationError, Result};
use crate::generator::Session;
use crate::interface::InterfaceOutline;
use crate::property::mirror_property;
use crate::walker::{walk_group, GroupStructure};
use groupgen_model::schema_writer::{escape_doc, write_group};
use groupgen_model::{GroupDeclaration, QName};
use std::collections::BTreeMap;

const DOC_HEADER: &str = "Group interface generated from the following XML Schema declaration.";

/// Documentation for a synthesized interface: where the group came from and
/// what it looks like.
pub fn interface_doc(declaration: &GroupDeclaration) -> Result<String> {
    let locator = declaration.locator();
    let fragment = write_group(declaration)?;
    Ok(format!(
        "{DOC_HEADER}\n\
         Name: {name}\n\
         Source: {system_id}, line {line}, column {column}\n\
         Schema source:\n\
         <pre>\n{fragment}\n</pre>",
        name = declaration.name(),
        system_id = locator.system_id,
        line = locator.line,
        column = locator.column,
        fragment = escape_doc(&fragment),
    ))
}

fn check_property_names(group: &QName, structure: &GroupStructure) -> Result<()> {
    let mut seen: BTreeMap<&str, &QName> = BTreeMap::new();
    for member in structure.variable_members() {
        if let Some(first) = seen.insert(&member.property_name, &member.name) {
            return Err(GenerationError::PropertyNameCollision {
                group: group.clone(),
                property: member.property_name.clone(),
                first: first.clone(),
                second: member.name.clone(),
            });
        }
    }
    Ok(())
}

pub(crate) fn synthesize(
    session: &mut Session<'_>,
    declaration: &GroupDeclaration,
) -> Result<InterfaceOutline> {
    let group = declaration.name();
    let locator = declaration.locator();

    if session
        .outline
        .package_for_namespace(&group.namespace)
        .is_none()
    {
        let error = GenerationError::PackageNotFound {
            namespace: group.namespace.clone(),
            group: group.clone(),
        };
        return Err(session.fail(error, Some(locator)));
    };

    let Some(dummy) = session.outline.class_for_group(group).cloned() else {
        let error = GenerationError::NoImplementation {
            class_name: session.names.to_class_name(&group.local),
            group: group.clone(),
        };
        return Err(session.fail(error, Some(locator)));
    };

    let structure = walk_group(declaration, session.names);
    if let Err(error) = check_property_names(group, &structure) {
        return Err(session.fail(error, Some(locator)));
    }
    let doc = match interface_doc(declaration) {
        Ok(doc) => doc,
        Err(error) => return Err(session.fail(error, Some(locator))),
    };

    let type_ref = dummy.type_ref();
    let declared = match session.outline.packages.get_mut(&dummy.package) {
        Some(home) => {
            home.remove_class(&dummy);
            match home.declare_interface(&dummy.name) {
                Ok(decl) => {
                    decl.doc = doc;
                    true
                }
                Err(_) => false,
            }
        }
        None => false,
    };
    if !declared {
        let error = GenerationError::InterfaceExists {
            name: type_ref.qualified_name(),
        };
        return Err(session.fail(error, Some(locator)));
    }

    let mut interface =
        InterfaceOutline::new(declaration.clone(), type_ref.clone(), dummy.type_ref());
    let mut methods = Vec::new();
    for member in structure.variable_members() {
        let Some(field) = dummy
            .fields
            .iter()
            .find(|f| f.property_name == member.property_name)
        else {
            let error = GenerationError::PropertyNotFound {
                group: group.clone(),
                property: member.property_name.clone(),
                class: dummy.qualified_name(),
            };
            return Err(session.fail(error, Some(&member.locator)));
        };
        methods.extend(mirror_property(&dummy, field, session.settings).into_methods());
        interface.publish_field(field.clone());
    }
    if let Some(decl) = session.outline.interface_mut(&type_ref) {
        decl.methods.extend(methods);
    }

    tracing::debug!(
        group = %group,
        interface = %type_ref,
        fields = interface.published_fields().len(),
        "synthesized group interface"
    );
    Ok(interface)
}

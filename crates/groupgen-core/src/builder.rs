//! Builder-interface extension.
//!
//! Every synthesized interface gets a nested builder contract
//! (`Address.BuildSupport`). Populating it is delegated to a
//! [`BuilderGenerator`], once per interface, after all builder types have
//! been declared so generators can refer to each other's builders.

use crate::bind::GroupAssociations;
use crate::error::{GenerationError, Result};
use crate::generator::Session;
use crate::interface::InterfaceOutline;
use crate::property::accessor_stem;
use groupgen_model::{FieldOutline, InterfaceDecl, Method, Outline, TypeRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Method names passed through to the builder generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderOptions {
    pub new_builder_method_name: String,
    pub new_copy_builder_method_name: String,
}

/// A synthesized interface paired with its nested builder contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderOutline {
    pub interface: TypeRef,
    pub builder_type: TypeRef,
    /// Simple name of the nested type inside `interface`.
    pub builder_name: String,
    pub fields: Vec<FieldOutline>,
    pub super_interfaces: Vec<TypeRef>,
}

impl BuilderOutline {
    pub fn builder_decl<'o>(&self, outline: &'o Outline) -> Option<&'o InterfaceDecl> {
        outline.interface(&self.interface)?.nested.get(&self.builder_name)
    }

    pub fn builder_decl_mut<'o>(&self, outline: &'o mut Outline) -> Option<&'o mut InterfaceDecl> {
        outline
            .interface_mut(&self.interface)?
            .nested
            .get_mut(&self.builder_name)
    }
}

/// Builder outlines keyed by interface qualified name.
pub type BuilderOutlines = BTreeMap<String, BuilderOutline>;

pub trait BuilderGenerator {
    fn build_properties(
        &mut self,
        outline: &mut Outline,
        builder: &BuilderOutline,
        builders: &BuilderOutlines,
        associations: &GroupAssociations,
        options: &BuilderOptions,
    ) -> Result<()>;
}

/// Declares the nested builder interface of every synthesized interface.
pub(crate) fn declare_builder_interfaces<'a>(
    session: &mut Session<'_>,
    interfaces: impl IntoIterator<Item = &'a InterfaceOutline>,
) -> Result<BuilderOutlines> {
    let builder_name = session.settings.builder_interface_name.clone();
    let mut builders = BuilderOutlines::new();
    for interface in interfaces {
        let type_ref = interface.type_ref();
        let declared = match session.outline.interface_mut(type_ref) {
            Some(decl) => decl.declare_nested(&builder_name).is_ok(),
            None => false,
        };
        if !declared {
            let error = GenerationError::InterfaceExists {
                name: type_ref.nested(&builder_name).qualified_name(),
            };
            return Err(session.fail(error, Some(interface.declaration().locator())));
        }
        builders.insert(
            type_ref.qualified_name(),
            BuilderOutline {
                interface: type_ref.clone(),
                builder_type: type_ref.nested(&builder_name),
                builder_name: builder_name.clone(),
                fields: interface.published_fields().to_vec(),
                super_interfaces: interface
                    .super_interfaces()
                    .iter()
                    .map(|s| s.type_ref().clone())
                    .collect(),
            },
        );
    }
    Ok(builders)
}

pub(crate) fn build_all(
    session: &mut Session<'_>,
    generator: &mut dyn BuilderGenerator,
    builders: &BuilderOutlines,
    associations: &GroupAssociations,
) -> Result<()> {
    let settings = session.settings;
    for builder in builders.values() {
        let options = &settings.builder_options;
        if let Err(error) =
            generator.build_properties(session.outline, builder, builders, associations, options)
        {
            return Err(session.fail(error, None));
        }
    }
    Ok(())
}

/// Declares fluent `with<Property>` setters on each builder contract.
///
/// Builders of superinterfaces synthesized in the same run are extended, so
/// a builder exposes the inherited properties too.
#[derive(Debug, Clone, Copy, Default)]
pub struct FluentBuilderDeclarations;

impl BuilderGenerator for FluentBuilderDeclarations {
    fn build_properties(
        &mut self,
        outline: &mut Outline,
        builder: &BuilderOutline,
        builders: &BuilderOutlines,
        _associations: &GroupAssociations,
        _options: &BuilderOptions,
    ) -> Result<()> {
        let Some(interface) = outline.interface(&builder.interface) else {
            return Err(GenerationError::Builder {
                interface: builder.interface.qualified_name(),
                message: "interface is not declared".to_string(),
            });
        };
        let builder_type = builder.builder_type.qualified_name();
        let methods: Vec<Method> = builder
            .fields
            .iter()
            .filter_map(|field| {
                let stem = accessor_stem(field);
                let getter = interface
                    .find_method(&format!("get{stem}"))
                    .or_else(|| interface.find_method(&format!("is{stem}")))?;
                Some(
                    Method::new(format!("with{stem}"), builder_type.clone())
                        .param("value", getter.return_type.clone()),
                )
            })
            .collect();
        let extends: Vec<TypeRef> = builder
            .super_interfaces
            .iter()
            .filter_map(|s| builders.get(&s.qualified_name()))
            .map(|b| b.builder_type.clone())
            .collect();

        let Some(decl) = builder.builder_decl_mut(outline) else {
            return Err(GenerationError::Builder {
                interface: builder.interface.qualified_name(),
                message: format!("builder interface {} is not declared", builder.builder_name),
            });
        };
        decl.methods.extend(methods);
        for super_builder in extends {
            decl.add_extends(super_builder);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupgen_model::PackageOutline;

    fn outline_with_interface() -> Outline {
        let mut outline = Outline::new();
        let mut package = PackageOutline::new("com.example", Some("urn:example".to_string()));
        let address = package.declare_interface("Address").unwrap();
        address.methods.push(Method::new("getStreet", "java.lang.String"));
        address.methods.push(Method::new("isPrimary", "boolean"));
        address.declare_nested("BuildSupport").unwrap();
        outline.add_package(package);
        outline
    }

    fn address_builder() -> BuilderOutline {
        let interface = TypeRef::parse("com.example.Address");
        BuilderOutline {
            builder_type: interface.nested("BuildSupport"),
            interface,
            builder_name: "BuildSupport".to_string(),
            fields: vec![
                FieldOutline::new("Street", "street", "java.lang.String"),
                FieldOutline::new("Primary", "primary", "boolean"),
                FieldOutline::new("City", "city", "java.lang.String"),
            ],
            super_interfaces: vec![],
        }
    }

    fn options() -> BuilderOptions {
        BuilderOptions {
            new_builder_method_name: "builder".to_string(),
            new_copy_builder_method_name: "newCopyBuilder".to_string(),
        }
    }

    #[test]
    fn fluent_setters_for_fields_with_getters() {
        let mut outline = outline_with_interface();
        let builder = address_builder();
        let builders = BuilderOutlines::from([(builder.interface.qualified_name(), builder.clone())]);
        FluentBuilderDeclarations
            .build_properties(
                &mut outline,
                &builder,
                &builders,
                &GroupAssociations::new(),
                &options(),
            )
            .unwrap();

        let decl = builder.builder_decl(&outline).unwrap();
        assert_eq!(decl.name, "Address.BuildSupport");
        let signatures: Vec<String> = decl.methods.iter().map(Method::signature).collect();
        assert_eq!(
            signatures,
            vec![
                "com.example.Address.BuildSupport withStreet(java.lang.String value)",
                "com.example.Address.BuildSupport withPrimary(boolean value)",
            ]
        );
    }

    #[test]
    fn missing_builder_declaration_is_an_error() {
        let mut outline = outline_with_interface();
        let mut builder = address_builder();
        builder.builder_name = "Other".to_string();
        let err = FluentBuilderDeclarations
            .build_properties(
                &mut outline,
                &builder,
                &BuilderOutlines::new(),
                &GroupAssociations::new(),
                &options(),
            )
            .unwrap_err();
        assert!(matches!(err, GenerationError::Builder { .. }));
    }
}

//! Interface accessors mirrored from the dummy implementation.

use crate::config::GeneratorSettings;
use groupgen_model::{ClassOutline, FieldOutline, Method};

/// Error type a constrained setter declares it may throw.
pub const VETOED_CHANGE_EXCEPTION: &str = "java.beans.PropertyVetoException";

/// Accessor stem for a field: `Any` wildcard content is exposed as `Content`.
pub fn accessor_stem(field: &FieldOutline) -> &str {
    if field.property_name == "Any" {
        "Content"
    } else {
        &field.property_name
    }
}

/// `get<Name>()`, falling back to `is<Name>()`.
pub fn find_getter<'c>(class: &'c ClassOutline, field: &FieldOutline) -> Option<&'c Method> {
    let stem = accessor_stem(field);
    class
        .find_method(&format!("get{stem}"), 0)
        .or_else(|| class.find_method(&format!("is{stem}"), 0))
}

pub fn find_setter<'c>(class: &'c ClassOutline, field: &FieldOutline) -> Option<&'c Method> {
    class.find_method(&format!("set{}", accessor_stem(field)), 1)
}

/// Abstract accessors to declare on the interface for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirroredProperty {
    pub getter: Option<Method>,
    pub setter: Option<Method>,
}

impl MirroredProperty {
    pub fn into_methods(self) -> impl Iterator<Item = Method> {
        self.getter.into_iter().chain(self.setter)
    }
}

/// Mirrors a field's accessors. A field without a getter gets nothing.
pub fn mirror_property(
    implementation: &ClassOutline,
    field: &FieldOutline,
    settings: &GeneratorSettings,
) -> MirroredProperty {
    let Some(getter) = find_getter(implementation, field) else {
        tracing::debug!(
            class = %implementation.qualified_name(),
            property = %field.property_name,
            "no getter; property skipped"
        );
        return MirroredProperty::default();
    };
    let getter = Method::new(getter.name.clone(), getter.return_type.clone());

    let setter = if settings.immutable {
        None
    } else {
        find_setter(implementation, field).map(|setter| {
            let mut method = Method {
                name: setter.name.clone(),
                return_type: setter.return_type.clone(),
                params: setter.params.clone(),
                throws: Vec::new(),
            };
            if settings.setter_throws_veto {
                method.throws.push(VETOED_CHANGE_EXCEPTION.to_string());
            }
            method
        })
    };

    MirroredProperty {
        getter: Some(getter),
        setter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use groupgen_model::{QName, SchemaComponent};

    fn address() -> ClassOutline {
        let mut class = ClassOutline::new(
            "com.example",
            "Address",
            SchemaComponent::Group {
                name: QName::new("urn:example", "AddressGroup"),
            },
        );
        class.methods = vec![
            Method::new("getStreet", "java.lang.String"),
            Method::new("setStreet", "void").param("value", "java.lang.String"),
            Method::new("isPrimary", "boolean"),
            Method::new("getContent", "java.lang.Object"),
            Method::new("getCity", "java.lang.String").param("bogus", "int"),
        ];
        class
    }

    fn field(property: &str) -> FieldOutline {
        FieldOutline::new(property, property.to_lowercase(), "java.lang.String")
    }

    #[test]
    fn getter_and_setter_are_mirrored() {
        let mirrored = mirror_property(&address(), &field("Street"), &GeneratorSettings::default());
        assert_eq!(
            mirrored.getter,
            Some(Method::new("getStreet", "java.lang.String"))
        );
        let setter = mirrored.setter.unwrap();
        assert_eq!(setter.signature(), "void setStreet(java.lang.String value)");
        assert!(setter.throws.is_empty());
    }

    #[test]
    fn boolean_getter_and_any_remap() {
        let class = address();
        assert_eq!(find_getter(&class, &field("Primary")).unwrap().name, "isPrimary");
        assert_eq!(find_getter(&class, &field("Any")).unwrap().name, "getContent");
    }

    #[test]
    fn getter_must_take_no_parameters() {
        let mirrored = mirror_property(&address(), &field("City"), &GeneratorSettings::default());
        assert_eq!(mirrored, MirroredProperty::default());
    }

    #[test]
    fn immutable_mode_declares_no_setter() {
        let settings = GeneratorConfig {
            declare_setters: false,
            ..GeneratorConfig::default()
        }
        .settings();
        let mirrored = mirror_property(&address(), &field("Street"), &settings);
        assert!(mirrored.getter.is_some());
        assert!(mirrored.setter.is_none());
    }

    #[test]
    fn constrained_setters_declare_veto() {
        let mut settings = GeneratorSettings::default();
        settings.setter_throws_veto = true;
        let mirrored = mirror_property(&address(), &field("Street"), &settings);
        assert_eq!(
            mirrored.setter.unwrap().throws,
            vec![VETOED_CHANGE_EXCEPTION.to_string()]
        );
    }
}

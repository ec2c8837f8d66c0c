//! Structural walk over group declarations and complex-type content.
//!
//! One walk yields both halves of a group's structure:
//!
//! - **members**: the element or attribute declarations that become interface
//!   properties, with their derived property names and fixed-value flags;
//! - **group refs**: the nested groups that become superinterfaces.
//!
//! Group references are collected along a single non-repeated particle
//! chain: a repeated particle ends the descent, as does any term that is not
//! a group reference or an anonymous compositor. The same rule applies to
//! a complex type's content root, so superinterface linking and
//! implementation binding agree on what "uses a group" means.

use groupgen_model::{
    AttributeGroupDecl, AttributeUse, ComplexType, ElementDecl, GroupDeclaration, Locator,
    ModelGroup, ModelGroupDecl, NameConverter, Particle, PropertyCustomization, QName, Term,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Element,
    Attribute,
}

/// A member of a group that may become an interface property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDeclaration {
    pub kind: MemberKind,
    pub name: QName,
    pub property_name: String,
    /// Fixed-value members never become accessors.
    pub fixed: bool,
    pub locator: Locator,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupStructure {
    pub members: Vec<MemberDeclaration>,
    pub group_refs: Vec<QName>,
}

impl GroupStructure {
    /// Members that will be mirrored as interface properties.
    pub fn variable_members(&self) -> impl Iterator<Item = &MemberDeclaration> {
        self.members.iter().filter(|m| !m.fixed)
    }
}

/// Groups a complex type uses directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentGroups {
    pub attribute_groups: Vec<QName>,
    pub model_groups: Vec<QName>,
}

fn customized(customization: Option<&PropertyCustomization>) -> Option<&str> {
    customization.and_then(|c| c.property_name.as_deref())
}

fn element_member(decl: &ElementDecl, names: &dyn NameConverter) -> MemberDeclaration {
    let property_name = customized(decl.customization.as_ref())
        .map(str::to_string)
        .unwrap_or_else(|| names.to_property_name(&decl.name.local));
    MemberDeclaration {
        kind: MemberKind::Element,
        name: decl.name.clone(),
        property_name,
        fixed: decl.fixed_value.is_some(),
        locator: decl.locator.clone(),
    }
}

fn attribute_member(use_: &AttributeUse, names: &dyn NameConverter) -> MemberDeclaration {
    // The use's customization wins over the declaration's.
    let property_name = customized(use_.customization.as_ref())
        .or_else(|| customized(use_.decl.customization.as_ref()))
        .map(str::to_string)
        .unwrap_or_else(|| names.to_property_name(&use_.decl.name.local));
    MemberDeclaration {
        kind: MemberKind::Attribute,
        name: use_.decl.name.clone(),
        property_name,
        fixed: use_.fixed_value.is_some() || use_.decl.fixed_value.is_some(),
        locator: use_.locator.clone(),
    }
}

fn chain_refs(group: &ModelGroup, out: &mut Vec<QName>) {
    for particle in &group.particles {
        particle_refs(particle, out);
    }
}

fn particle_refs(particle: &Particle, out: &mut Vec<QName>) {
    if particle.is_repeated() {
        return;
    }
    match &particle.term {
        Term::GroupRef(name) => out.push(name.clone()),
        Term::ModelGroup(nested) => chain_refs(nested, out),
        Term::Element(_) | Term::Wildcard => {}
    }
}

fn walk_model_group(decl: &ModelGroupDecl, names: &dyn NameConverter) -> GroupStructure {
    let members = decl
        .group
        .particles
        .iter()
        .filter_map(|particle| match &particle.term {
            Term::Element(element) => Some(element_member(element, names)),
            _ => None,
        })
        .collect();
    let mut group_refs = Vec::new();
    chain_refs(&decl.group, &mut group_refs);
    GroupStructure {
        members,
        group_refs,
    }
}

fn walk_attribute_group(decl: &AttributeGroupDecl, names: &dyn NameConverter) -> GroupStructure {
    GroupStructure {
        members: decl
            .attribute_uses
            .iter()
            .map(|use_| attribute_member(use_, names))
            .collect(),
        group_refs: decl.attribute_groups.clone(),
    }
}

pub fn walk_group(decl: &GroupDeclaration, names: &dyn NameConverter) -> GroupStructure {
    match decl {
        GroupDeclaration::ModelGroup(g) => walk_model_group(g, names),
        GroupDeclaration::AttributeGroup(g) => walk_attribute_group(g, names),
    }
}

/// Members of a group in declaration order.
pub fn resolve_members(decl: &GroupDeclaration, names: &dyn NameConverter) -> Vec<MemberDeclaration> {
    walk_group(decl, names).members
}

pub fn walk_complex_type(complex_type: &ComplexType) -> ContentGroups {
    let mut model_groups = Vec::new();
    if let Some(root) = complex_type.content_root().as_particle() {
        particle_refs(root, &mut model_groups);
    }
    ContentGroups {
        attribute_groups: complex_type.attribute_groups.clone(),
        model_groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupgen_model::{AttributeDecl, Compositor, ContentType, StandardNameConverter};

    fn ns(local: &str) -> QName {
        QName::new("urn:example", local)
    }

    fn element(local: &str) -> Particle {
        Particle::once(Term::Element(ElementDecl::new(ns(local))))
    }

    fn sequence(particles: Vec<Particle>) -> ModelGroup {
        ModelGroup {
            compositor: Compositor::Sequence,
            particles,
        }
    }

    fn model_group(local: &str, particles: Vec<Particle>) -> GroupDeclaration {
        GroupDeclaration::ModelGroup(ModelGroupDecl {
            name: ns(local),
            group: sequence(particles),
            locator: Locator::default(),
        })
    }

    #[test]
    fn model_group_members_are_direct_elements_only() {
        let decl = model_group(
            "AddressGroup",
            vec![
                element("street"),
                Particle::once(Term::Wildcard),
                Particle::once(Term::ModelGroup(sequence(vec![element("hidden")]))),
                element("postal-code"),
            ],
        );
        let members = resolve_members(&decl, &StandardNameConverter);
        let names: Vec<&str> = members.iter().map(|m| m.property_name.as_str()).collect();
        assert_eq!(names, vec!["Street", "PostalCode"]);
        assert!(members.iter().all(|m| m.kind == MemberKind::Element));
    }

    #[test]
    fn customization_wins_over_convention() {
        let mut street = ElementDecl::new(ns("street"));
        street.customization = Some(PropertyCustomization {
            property_name: Some("StreetLine".to_string()),
        });
        let decl = model_group("G", vec![Particle::once(Term::Element(street))]);
        let members = resolve_members(&decl, &StandardNameConverter);
        assert_eq!(members[0].property_name, "StreetLine");
    }

    #[test]
    fn attribute_use_customization_falls_back_to_declaration() {
        let mut decl = AttributeDecl::new(QName::new("", "id"));
        decl.customization = Some(PropertyCustomization {
            property_name: Some("Identifier".to_string()),
        });
        let decl_only = AttributeUse::new(decl.clone());
        let mut overridden = AttributeUse::new(decl);
        overridden.customization = Some(PropertyCustomization {
            property_name: Some("Key".to_string()),
        });

        let group = GroupDeclaration::AttributeGroup(AttributeGroupDecl {
            name: ns("Base"),
            attribute_uses: vec![decl_only, overridden],
            attribute_groups: vec![],
            locator: Locator::default(),
        });
        let names: Vec<String> = resolve_members(&group, &StandardNameConverter)
            .into_iter()
            .map(|m| m.property_name)
            .collect();
        assert_eq!(names, vec!["Identifier", "Key"]);
    }

    #[test]
    fn fixed_value_on_use_or_declaration_marks_member_fixed() {
        let mut on_decl = AttributeDecl::new(QName::new("", "id"));
        on_decl.fixed_value = Some("1".to_string());
        let mut on_use = AttributeUse::new(AttributeDecl::new(QName::new("", "version")));
        on_use.fixed_value = Some("2".to_string());
        let free = AttributeUse::new(AttributeDecl::new(QName::new("", "lang")));

        let group = GroupDeclaration::AttributeGroup(AttributeGroupDecl {
            name: ns("Base"),
            attribute_uses: vec![AttributeUse::new(on_decl), on_use, free],
            attribute_groups: vec![ns("Other")],
            locator: Locator::default(),
        });
        let structure = walk_group(&group, &StandardNameConverter);
        let fixed: Vec<bool> = structure.members.iter().map(|m| m.fixed).collect();
        assert_eq!(fixed, vec![true, true, false]);
        assert_eq!(structure.variable_members().count(), 1);
        assert_eq!(structure.group_refs, vec![ns("Other")]);
    }

    #[test]
    fn group_refs_follow_single_non_repeated_chain() {
        let decl = model_group(
            "Outer",
            vec![
                Particle::once(Term::GroupRef(ns("Inner"))),
                Particle::repeated(Term::GroupRef(ns("Many"))),
                Particle::once(Term::ModelGroup(sequence(vec![Particle::once(
                    Term::GroupRef(ns("Nested")),
                )]))),
                Particle::repeated(Term::ModelGroup(sequence(vec![Particle::once(
                    Term::GroupRef(ns("BehindRepeat")),
                )]))),
                element("e"),
            ],
        );
        let structure = walk_group(&decl, &StandardNameConverter);
        assert_eq!(structure.group_refs, vec![ns("Inner"), ns("Nested")]);
        assert_eq!(structure.members.len(), 1);
    }

    #[test]
    fn complex_type_root_uses_explicit_content() {
        let ct = ComplexType {
            name: Some(ns("AddressType")),
            explicit_content: Some(ContentType::Particle(Particle::once(Term::GroupRef(ns(
                "AddressGroup",
            ))))),
            content: ContentType::Empty,
            attribute_groups: vec![ns("Base")],
        };
        let groups = walk_complex_type(&ct);
        assert_eq!(groups.model_groups, vec![ns("AddressGroup")]);
        assert_eq!(groups.attribute_groups, vec![ns("Base")]);
    }

    #[test]
    fn repeated_content_root_uses_no_model_group() {
        let ct = ComplexType {
            name: None,
            explicit_content: None,
            content: ContentType::Particle(Particle::repeated(Term::ModelGroup(sequence(vec![
                Particle::once(Term::GroupRef(ns("G"))),
            ])))),
            attribute_groups: vec![],
        };
        assert!(walk_complex_type(&ct).model_groups.is_empty());
    }
}

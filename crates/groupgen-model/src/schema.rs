//! Compiled schema declarations.
//!
//! This is the slice of a compiled XML Schema set the generator needs: named
//! model groups, named attribute groups and the complex types that use them.
//! Everything here is immutable input.

use crate::qname::{Locator, QName};
use serde::{Deserialize, Serialize};

// ============================================================================
// Members
// ============================================================================

/// A binding customization attached to a schema component
/// (the `<property name="..."/>` customization of the schema compiler).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCustomization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDecl {
    pub name: QName,
    /// Rendered type name, used only for schema fragments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<QName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<PropertyCustomization>,
    #[serde(default)]
    pub locator: Locator,
}

impl ElementDecl {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            type_name: None,
            fixed_value: None,
            customization: None,
            locator: Locator::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDecl {
    pub name: QName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<QName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<PropertyCustomization>,
}

impl AttributeDecl {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            type_name: None,
            fixed_value: None,
            customization: None,
        }
    }
}

/// Use of an attribute declaration inside an attribute group or complex type.
///
/// A use may carry its own fixed value and customization on top of the
/// underlying declaration's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeUse {
    pub decl: AttributeDecl,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<PropertyCustomization>,
    #[serde(default)]
    pub locator: Locator,
}

impl AttributeUse {
    pub fn new(decl: AttributeDecl) -> Self {
        Self {
            decl,
            required: false,
            fixed_value: None,
            customization: None,
            locator: Locator::default(),
        }
    }
}

// ============================================================================
// Content models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxOccurs {
    Bounded(u32),
    Unbounded,
}

impl Default for MaxOccurs {
    fn default() -> Self {
        MaxOccurs::Bounded(1)
    }
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Particle {
    #[serde(default = "one")]
    pub min_occurs: u32,
    #[serde(default)]
    pub max_occurs: MaxOccurs,
    pub term: Term,
}

impl Particle {
    /// A particle occurring exactly once.
    pub fn once(term: Term) -> Self {
        Self {
            min_occurs: 1,
            max_occurs: MaxOccurs::Bounded(1),
            term,
        }
    }

    /// A particle that may occur more than once.
    pub fn repeated(term: Term) -> Self {
        Self {
            min_occurs: 0,
            max_occurs: MaxOccurs::Unbounded,
            term,
        }
    }

    pub fn is_repeated(&self) -> bool {
        match self.max_occurs {
            MaxOccurs::Unbounded => true,
            MaxOccurs::Bounded(n) => n > 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Term {
    Element(ElementDecl),
    /// Reference to a named model group (`<xs:group ref="..."/>`).
    GroupRef(QName),
    /// Anonymous nested compositor.
    ModelGroup(ModelGroup),
    Wildcard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compositor {
    #[default]
    Sequence,
    Choice,
    All,
}

impl Compositor {
    pub fn xsd_name(self) -> &'static str {
        match self {
            Compositor::Sequence => "sequence",
            Compositor::Choice => "choice",
            Compositor::All => "all",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelGroup {
    #[serde(default)]
    pub compositor: Compositor,
    #[serde(default)]
    pub particles: Vec<Particle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum ContentType {
    Particle(Particle),
    Simple,
    Empty,
}

impl ContentType {
    pub fn as_particle(&self) -> Option<&Particle> {
        match self {
            ContentType::Particle(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexType {
    /// `None` for anonymous types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<QName>,
    /// Content as written in the type definition, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_content: Option<ContentType>,
    /// Effective content after derivation.
    pub content: ContentType,
    /// Attribute groups referenced directly by this type.
    #[serde(default)]
    pub attribute_groups: Vec<QName>,
}

impl ComplexType {
    /// Explicit content is preferred; the effective content is the fallback.
    pub fn content_root(&self) -> &ContentType {
        self.explicit_content.as_ref().unwrap_or(&self.content)
    }
}

// ============================================================================
// Group declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelGroupDecl {
    pub name: QName,
    pub group: ModelGroup,
    #[serde(default)]
    pub locator: Locator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeGroupDecl {
    pub name: QName,
    #[serde(default)]
    pub attribute_uses: Vec<AttributeUse>,
    /// Attribute groups included by reference.
    #[serde(default)]
    pub attribute_groups: Vec<QName>,
    #[serde(default)]
    pub locator: Locator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    ModelGroup,
    AttributeGroup,
}

/// A named, reusable group declaration of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupDeclaration {
    ModelGroup(ModelGroupDecl),
    AttributeGroup(AttributeGroupDecl),
}

impl GroupDeclaration {
    pub fn name(&self) -> &QName {
        match self {
            GroupDeclaration::ModelGroup(g) => &g.name,
            GroupDeclaration::AttributeGroup(g) => &g.name,
        }
    }

    pub fn kind(&self) -> GroupKind {
        match self {
            GroupDeclaration::ModelGroup(_) => GroupKind::ModelGroup,
            GroupDeclaration::AttributeGroup(_) => GroupKind::AttributeGroup,
        }
    }

    pub fn locator(&self) -> &Locator {
        match self {
            GroupDeclaration::ModelGroup(g) => &g.locator,
            GroupDeclaration::AttributeGroup(g) => &g.locator,
        }
    }
}

// ============================================================================
// Schema set
// ============================================================================

/// All group declarations of the schema set being compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSet {
    #[serde(default)]
    pub model_groups: Vec<ModelGroupDecl>,
    #[serde(default)]
    pub attribute_groups: Vec<AttributeGroupDecl>,
}

impl SchemaSet {
    pub fn model_group_declarations(&self) -> impl Iterator<Item = GroupDeclaration> + '_ {
        self.model_groups
            .iter()
            .cloned()
            .map(GroupDeclaration::ModelGroup)
    }

    pub fn attribute_group_declarations(&self) -> impl Iterator<Item = GroupDeclaration> + '_ {
        self.attribute_groups
            .iter()
            .cloned()
            .map(GroupDeclaration::AttributeGroup)
    }

    /// Where the named group was declared, if it belongs to this schema set.
    pub fn locator_of(&self, name: &QName) -> Option<&Locator> {
        self.model_groups
            .iter()
            .find(|g| &g.name == name)
            .map(|g| &g.locator)
            .or_else(|| {
                self.attribute_groups
                    .iter()
                    .find(|g| &g.name == name)
                    .map(|g| &g.locator)
            })
    }

    pub fn declarations(&self, kind: GroupKind) -> Vec<GroupDeclaration> {
        match kind {
            GroupKind::ModelGroup => self.model_group_declarations().collect(),
            GroupKind::AttributeGroup => self.attribute_group_declarations().collect(),
        }
    }
}

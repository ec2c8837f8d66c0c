//! Renders group declarations back to XSD fragments.
//!
//! Used for the documentation attached to generated interfaces, so the output
//! favours readability: prefixed `xs:` names, local names for references,
//! two-space indentation.

use crate::qname::QName;
use crate::schema::{
    AttributeGroupDecl, AttributeUse, GroupDeclaration, MaxOccurs, ModelGroup, ModelGroupDecl,
    Particle, Term,
};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaWriteError {
    #[error("failed to write schema fragment: {0}")]
    Xml(String),
    #[error("schema fragment is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

type XmlWriter = Writer<Vec<u8>>;

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), SchemaWriteError> {
    writer
        .write_event(event)
        .map_err(|e| SchemaWriteError::Xml(e.to_string()))
}

fn occurs_attributes(start: &mut BytesStart<'_>, particle: &Particle) {
    if particle.min_occurs != 1 {
        start.push_attribute(("minOccurs", particle.min_occurs.to_string().as_str()));
    }
    match particle.max_occurs {
        MaxOccurs::Bounded(1) => {}
        MaxOccurs::Bounded(n) => start.push_attribute(("maxOccurs", n.to_string().as_str())),
        MaxOccurs::Unbounded => start.push_attribute(("maxOccurs", "unbounded")),
    }
}

fn type_attribute(start: &mut BytesStart<'_>, type_name: Option<&QName>) {
    if let Some(ty) = type_name {
        start.push_attribute(("type", ty.local.as_str()));
    }
}

fn write_particle(writer: &mut XmlWriter, particle: &Particle) -> Result<(), SchemaWriteError> {
    match &particle.term {
        Term::Element(decl) => {
            let mut start = BytesStart::new("xs:element");
            start.push_attribute(("name", decl.name.local.as_str()));
            type_attribute(&mut start, decl.type_name.as_ref());
            if let Some(fixed) = &decl.fixed_value {
                start.push_attribute(("fixed", fixed.as_str()));
            }
            occurs_attributes(&mut start, particle);
            emit(writer, Event::Empty(start))
        }
        Term::GroupRef(name) => {
            let mut start = BytesStart::new("xs:group");
            start.push_attribute(("ref", name.local.as_str()));
            occurs_attributes(&mut start, particle);
            emit(writer, Event::Empty(start))
        }
        Term::ModelGroup(group) => write_model_group(writer, group, Some(particle)),
        Term::Wildcard => {
            let mut start = BytesStart::new("xs:any");
            occurs_attributes(&mut start, particle);
            emit(writer, Event::Empty(start))
        }
    }
}

fn write_model_group(
    writer: &mut XmlWriter,
    group: &ModelGroup,
    particle: Option<&Particle>,
) -> Result<(), SchemaWriteError> {
    let tag = format!("xs:{}", group.compositor.xsd_name());
    let mut start = BytesStart::new(tag.as_str());
    if let Some(particle) = particle {
        occurs_attributes(&mut start, particle);
    }
    if group.particles.is_empty() {
        return emit(writer, Event::Empty(start));
    }
    emit(writer, Event::Start(start))?;
    for child in &group.particles {
        write_particle(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(tag.as_str())))
}

fn write_attribute_use(writer: &mut XmlWriter, use_: &AttributeUse) -> Result<(), SchemaWriteError> {
    let mut start = BytesStart::new("xs:attribute");
    start.push_attribute(("name", use_.decl.name.local.as_str()));
    type_attribute(&mut start, use_.decl.type_name.as_ref());
    if use_.required {
        start.push_attribute(("use", "required"));
    }
    if let Some(fixed) = use_.fixed_value.as_ref().or(use_.decl.fixed_value.as_ref()) {
        start.push_attribute(("fixed", fixed.as_str()));
    }
    emit(writer, Event::Empty(start))
}

fn write_model_group_decl(
    writer: &mut XmlWriter,
    decl: &ModelGroupDecl,
) -> Result<(), SchemaWriteError> {
    let mut start = BytesStart::new("xs:group");
    start.push_attribute(("name", decl.name.local.as_str()));
    emit(writer, Event::Start(start))?;
    write_model_group(writer, &decl.group, None)?;
    emit(writer, Event::End(BytesEnd::new("xs:group")))
}

fn write_attribute_group_decl(
    writer: &mut XmlWriter,
    decl: &AttributeGroupDecl,
) -> Result<(), SchemaWriteError> {
    let mut start = BytesStart::new("xs:attributeGroup");
    start.push_attribute(("name", decl.name.local.as_str()));
    if decl.attribute_uses.is_empty() && decl.attribute_groups.is_empty() {
        return emit(writer, Event::Empty(start));
    }
    emit(writer, Event::Start(start))?;
    for use_ in &decl.attribute_uses {
        write_attribute_use(writer, use_)?;
    }
    for group in &decl.attribute_groups {
        let mut reference = BytesStart::new("xs:attributeGroup");
        reference.push_attribute(("ref", group.local.as_str()));
        emit(writer, Event::Empty(reference))?;
    }
    emit(writer, Event::End(BytesEnd::new("xs:attributeGroup")))
}

/// Renders a group declaration as an XSD fragment.
pub fn write_group(decl: &GroupDeclaration) -> Result<String, SchemaWriteError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    match decl {
        GroupDeclaration::ModelGroup(g) => write_model_group_decl(&mut writer, g)?,
        GroupDeclaration::AttributeGroup(g) => write_attribute_group_decl(&mut writer, g)?,
    }
    Ok(String::from_utf8(writer.into_inner())?)
}

/// Escapes text for embedding in a generated doc comment.
pub fn escape_doc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = '\0';
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' if prev == '*' => out.push_str("&#47;"),
            '@' => out.push_str("&#064;"),
            _ => out.push(c),
        }
        prev = c;
    }
    out
}

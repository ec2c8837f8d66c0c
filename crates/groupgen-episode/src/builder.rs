//! Records this run's interfaces as an episode for downstream modules.

use crate::EpisodeError;
use groupgen_model::{GroupKind, QName, TypeRef};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::collections::BTreeMap;
use std::path::Path;

const BINDINGS_NAMESPACE: &str = "https://jakarta.ee/xml/ns/jaxb";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeEntry {
    pub kind: GroupKind,
    pub component: QName,
    pub interface: TypeRef,
}

#[derive(Debug, Clone, Default)]
pub struct EpisodeBuilder {
    entries: Vec<EpisodeEntry>,
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), EpisodeError> {
    writer
        .write_event(event)
        .map_err(|e| EpisodeError::Write(e.to_string()))
}

fn scd_axis(kind: GroupKind) -> &'static str {
    match kind {
        GroupKind::ModelGroup => "group",
        GroupKind::AttributeGroup => "attributeGroup",
    }
}

impl EpisodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_interface(&mut self, kind: GroupKind, component: &QName, interface: &TypeRef) {
        self.entries.push(EpisodeEntry {
            kind,
            component: component.clone(),
            interface: interface.clone(),
        });
    }

    pub fn entries(&self) -> &[EpisodeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn write_entry(
        writer: &mut Writer<Vec<u8>>,
        entry: &EpisodeEntry,
        prefix: Option<&str>,
    ) -> Result<(), EpisodeError> {
        let scd = match prefix {
            Some(prefix) => format!("{}::{prefix}:{}", scd_axis(entry.kind), entry.component.local),
            None => format!("{}::{}", scd_axis(entry.kind), entry.component.local),
        };
        let mut bindings = BytesStart::new("bindings");
        bindings.push_attribute(("scd", scd.as_str()));
        emit(writer, Event::Start(bindings))?;
        let mut interface = BytesStart::new("interface");
        interface.push_attribute(("ref", entry.interface.qualified_name().as_str()));
        emit(writer, Event::Empty(interface))?;
        emit(writer, Event::End(BytesEnd::new("bindings")))
    }

    /// Renders the recorded interfaces as an episode document.
    pub fn write_episode(&self) -> Result<String, EpisodeError> {
        let mut by_namespace: BTreeMap<&str, Vec<&EpisodeEntry>> = BTreeMap::new();
        for entry in &self.entries {
            by_namespace
                .entry(entry.component.namespace.as_str())
                .or_default()
                .push(entry);
        }

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        let mut root = BytesStart::new("bindings");
        root.push_attribute(("xmlns", BINDINGS_NAMESPACE));
        root.push_attribute(("version", "3.0"));
        emit(&mut writer, Event::Start(root))?;

        for (namespace, entries) in by_namespace {
            if namespace.is_empty() {
                for entry in entries {
                    Self::write_entry(&mut writer, entry, None)?;
                }
                continue;
            }
            let mut schema = BytesStart::new("bindings");
            schema.push_attribute(("scd", "x-schema::tns"));
            schema.push_attribute(("xmlns:tns", namespace));
            emit(&mut writer, Event::Start(schema))?;
            for entry in entries {
                Self::write_entry(&mut writer, entry, Some("tns"))?;
            }
            emit(&mut writer, Event::End(BytesEnd::new("bindings")))?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("bindings")))?;
        String::from_utf8(writer.into_inner()).map_err(|e| EpisodeError::Write(e.to_string()))
    }

    pub fn write_to(&self, path: &Path) -> Result<(), EpisodeError> {
        let text = self.write_episode()?;
        std::fs::write(path, text).map_err(|source| EpisodeError::Io {
            location: path.display().to_string(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            interfaces = self.entries.len(),
            "wrote episode"
        );
        Ok(())
    }
}

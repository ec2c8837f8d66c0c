//! Extraction of interface bindings from episode documents.
//!
//! Two document shapes are accepted:
//!
//! ```text
//! <interfaces>                                   normalized form
//!   <interface name="com.example.G">
//!     <schema-component namespace="urn:x" name="G"/>
//!   </interface>
//! </interfaces>
//!
//! <bindings>                                     episode form
//!   <bindings scd="x-schema::tns" xmlns:tns="urn:x">
//!     <bindings scd="group::tns:G">
//!       <interface ref="com.example.G"/>
//!     </bindings>
//!   </bindings>
//! </bindings>
//! ```
//!
//! The normalized form is deserialized directly. The episode form is walked
//! once with a streaming reader and reduced to the normalized form; only
//! `group::` and `attributeGroup::` components contribute bindings.

use crate::EpisodeError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "interfaces")]
pub struct InterfaceBindings {
    #[serde(rename = "interface", default)]
    pub interfaces: Vec<InterfaceBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceBinding {
    /// Qualified name of the generated interface.
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "schema-component")]
    pub schema_component: SchemaComponentRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaComponentRef {
    #[serde(rename = "@namespace", default)]
    pub namespace: String,
    #[serde(rename = "@name")]
    pub name: String,
}

/// Reduces an episode document (either shape) to its interface bindings.
pub fn extract_bindings(text: &str) -> Result<InterfaceBindings, EpisodeError> {
    match root_element(text)?.as_str() {
        "interfaces" => quick_xml::de::from_str(text)
            .map_err(|e| EpisodeError::Deserialize(e.to_string())),
        "bindings" => extract_episode_bindings(text),
        other => Err(EpisodeError::UnrecognizedDocument {
            root: other.to_string(),
        }),
    }
}

fn malformed(reader: &Reader<&[u8]>, message: impl ToString) -> EpisodeError {
    EpisodeError::Malformed {
        position: reader.buffer_position(),
        message: message.to_string(),
    }
}

fn utf8(reader: &Reader<&[u8]>, bytes: &[u8]) -> Result<String, EpisodeError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| malformed(reader, e))
}

fn root_element(text: &str) -> Result<String, EpisodeError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return utf8(&reader, e.local_name().as_ref());
            }
            Ok(Event::Eof) => return Err(EpisodeError::EmptyDocument),
            Ok(_) => {}
            Err(e) => return Err(malformed(&reader, e)),
        }
    }
}

// ============================================================================
// Episode form
// ============================================================================

#[derive(Debug, Default)]
struct Frame {
    prefixes: Vec<(String, String)>,
    /// Namespace for unprefixed names, set by `x-schema::prefix`.
    schema_namespace: Option<String>,
    component: Option<PendingBinding>,
}

#[derive(Debug)]
struct PendingBinding {
    scd: String,
    namespace: String,
    name: String,
    interface: Option<String>,
}

enum Scd<'a> {
    Schema(&'a str),
    Component(&'a str),
    Other,
}

fn classify_scd(scd: &str) -> Scd<'_> {
    let scd = scd.trim().trim_start_matches('/');
    if let Some(prefix) = scd.strip_prefix("x-schema::") {
        Scd::Schema(prefix)
    } else if let Some(name) = scd.strip_prefix("group::") {
        Scd::Component(name)
    } else if let Some(name) = scd.strip_prefix("attributeGroup::") {
        Scd::Component(name)
    } else {
        Scd::Other
    }
}

struct EpisodeWalker<'r> {
    reader: Reader<&'r [u8]>,
    stack: Vec<Frame>,
    bindings: InterfaceBindings,
}

impl<'r> EpisodeWalker<'r> {
    fn resolve_prefix(&self, prefix: &str) -> Option<&str> {
        self.stack.iter().rev().find_map(|frame| {
            frame
                .prefixes
                .iter()
                .rev()
                .find(|(p, _)| p == prefix)
                .map(|(_, ns)| ns.as_str())
        })
    }

    fn schema_namespace(&self) -> &str {
        self.stack
            .iter()
            .rev()
            .find_map(|frame| frame.schema_namespace.as_deref())
            .unwrap_or("")
    }

    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), EpisodeError> {
        let local = utf8(&self.reader, element.local_name().as_ref())?;
        let mut frame = Frame::default();
        let mut scd = None;
        let mut reference = None;

        for attr in element.attributes() {
            let attr = attr.map_err(|e| malformed(&self.reader, e))?;
            let key = utf8(&self.reader, attr.key.as_ref())?;
            let value = attr
                .unescape_value()
                .map_err(|e| malformed(&self.reader, e))?
                .into_owned();
            if let Some(prefix) = key.strip_prefix("xmlns:") {
                frame.prefixes.push((prefix.to_string(), value));
            } else if key == "scd" {
                scd = Some(value);
            } else if key == "ref" {
                reference = Some(value);
            }
        }
        self.stack.push(frame);

        match local.as_str() {
            "bindings" => {
                if let Some(scd) = scd {
                    self.classify_bindings(scd)?;
                }
            }
            "interface" | "class" => {
                if let Some(reference) = reference {
                    self.attach_reference(reference);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn classify_bindings(&mut self, scd: String) -> Result<(), EpisodeError> {
        match classify_scd(&scd) {
            Scd::Schema(prefix) => {
                let namespace = self
                    .resolve_prefix(prefix)
                    .ok_or_else(|| EpisodeError::UnknownPrefix {
                        prefix: prefix.to_string(),
                        scd: scd.clone(),
                    })?
                    .to_string();
                if let Some(frame) = self.stack.last_mut() {
                    frame.schema_namespace = Some(namespace);
                }
            }
            Scd::Component(qualified) => {
                let (namespace, name) = match qualified.split_once(':') {
                    Some((prefix, name)) => {
                        let namespace = self.resolve_prefix(prefix).ok_or_else(|| {
                            EpisodeError::UnknownPrefix {
                                prefix: prefix.to_string(),
                                scd: scd.clone(),
                            }
                        })?;
                        (namespace.to_string(), name.to_string())
                    }
                    None => (self.schema_namespace().to_string(), qualified.to_string()),
                };
                if let Some(frame) = self.stack.last_mut() {
                    frame.component = Some(PendingBinding {
                        scd: scd.clone(),
                        namespace,
                        name,
                        interface: None,
                    });
                }
            }
            Scd::Other => {}
        }
        Ok(())
    }

    fn attach_reference(&mut self, reference: String) {
        let pending = self
            .stack
            .iter_mut()
            .rev()
            .find_map(|frame| frame.component.as_mut());
        if let Some(pending) = pending {
            if pending.interface.is_none() {
                pending.interface = Some(reference);
            }
        }
    }

    fn close(&mut self) -> Result<(), EpisodeError> {
        let Some(frame) = self.stack.pop() else {
            return Err(malformed(&self.reader, "unbalanced end tag"));
        };
        if let Some(pending) = frame.component {
            let interface = pending
                .interface
                .ok_or(EpisodeError::MissingInterfaceRef { scd: pending.scd })?;
            self.bindings.interfaces.push(InterfaceBinding {
                name: interface,
                schema_component: SchemaComponentRef {
                    namespace: pending.namespace,
                    name: pending.name,
                },
            });
        }
        Ok(())
    }

    fn run(mut self) -> Result<InterfaceBindings, EpisodeError> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => self.open(&e)?,
                Ok(Event::Empty(e)) => {
                    self.open(&e)?;
                    self.close()?;
                }
                Ok(Event::End(_)) => self.close()?,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(malformed(&self.reader, e)),
            }
        }
        if !self.stack.is_empty() {
            return Err(malformed(&self.reader, "unexpected end of document"));
        }
        Ok(self.bindings)
    }
}

fn extract_episode_bindings(text: &str) -> Result<InterfaceBindings, EpisodeError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);
    EpisodeWalker {
        reader,
        stack: Vec::new(),
        bindings: InterfaceBindings::default(),
    }
    .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPISODE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<jaxb:bindings xmlns:jaxb="https://jakarta.ee/xml/ns/jaxb" version="3.0">
  <jaxb:bindings scd="x-schema::tns" xmlns:tns="urn:example">
    <jaxb:schemaBindings map="false"/>
    <jaxb:bindings scd="/group::tns:AddressGroup">
      <kscs:interface xmlns:kscs="http://www.kscs.com/util/jaxb/bindings" ref="com.example.Address"/>
    </jaxb:bindings>
    <jaxb:bindings scd="attributeGroup::Base">
      <jaxb:class ref="com.example.Base"/>
    </jaxb:bindings>
    <jaxb:bindings scd="~tns:CustomerType">
      <jaxb:class ref="com.example.Customer"/>
    </jaxb:bindings>
  </jaxb:bindings>
</jaxb:bindings>
"#;

    #[test]
    fn episode_form_yields_group_bindings_only() {
        let bindings = extract_bindings(EPISODE).unwrap();
        assert_eq!(
            bindings.interfaces,
            vec![
                InterfaceBinding {
                    name: "com.example.Address".to_string(),
                    schema_component: SchemaComponentRef {
                        namespace: "urn:example".to_string(),
                        name: "AddressGroup".to_string(),
                    },
                },
                InterfaceBinding {
                    name: "com.example.Base".to_string(),
                    schema_component: SchemaComponentRef {
                        namespace: "urn:example".to_string(),
                        name: "Base".to_string(),
                    },
                },
            ]
        );
    }

    #[test]
    fn normalized_form_is_deserialized() {
        let text = r#"<interfaces>
  <interface name="com.example.G">
    <schema-component namespace="urn:example" name="G"/>
  </interface>
</interfaces>"#;
        let bindings = extract_bindings(text).unwrap();
        assert_eq!(bindings.interfaces.len(), 1);
        assert_eq!(bindings.interfaces[0].name, "com.example.G");
        assert_eq!(bindings.interfaces[0].schema_component.name, "G");
    }

    #[test]
    fn undeclared_prefix_is_fatal() {
        let text = r#"<bindings><bindings scd="group::nope:G"><interface ref="a.G"/></bindings></bindings>"#;
        assert!(matches!(
            extract_bindings(text),
            Err(EpisodeError::UnknownPrefix { prefix, .. }) if prefix == "nope"
        ));
    }

    #[test]
    fn group_binding_without_interface_is_fatal() {
        let text = r#"<bindings xmlns:t="urn:x"><bindings scd="group::t:G"/></bindings>"#;
        assert!(matches!(
            extract_bindings(text),
            Err(EpisodeError::MissingInterfaceRef { .. })
        ));
    }

    #[test]
    fn truncated_xml_is_malformed() {
        let text = r#"<bindings xmlns:t="urn:x"><bindings scd="group::t:G">"#;
        assert!(matches!(
            extract_bindings(text),
            Err(EpisodeError::Malformed { .. })
        ));
    }

    #[test]
    fn unknown_root_is_rejected() {
        assert!(matches!(
            extract_bindings("<schema/>"),
            Err(EpisodeError::UnrecognizedDocument { root }) if root == "schema"
        ));
        assert!(matches!(extract_bindings(""), Err(EpisodeError::EmptyDocument)));
    }
}

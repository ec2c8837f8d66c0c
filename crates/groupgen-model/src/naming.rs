//! Schema-name to code-name conventions.
//!
//! The schema compiler owns these conventions; the generator only calls them
//! through [`NameConverter`]. [`StandardNameConverter`] follows the usual
//! XML-to-Java rules closely enough for group interfaces to line up with the
//! classes the compiler produced.

use url::Url;

pub trait NameConverter {
    /// `street-name` → `StreetName`.
    fn to_property_name(&self, xml_name: &str) -> String;

    /// `address-group` → `AddressGroup`.
    fn to_class_name(&self, xml_name: &str) -> String;

    /// `http://www.example.com/ns/address` → `com.example.ns.address`.
    ///
    /// `None` when the namespace yields no package (e.g. the empty namespace).
    fn to_package_name(&self, namespace_uri: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNameConverter;

const STRIPPED_EXTENSIONS: &[&str] = &[".xsd", ".xml", ".html", ".htm"];

const RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while",
];

fn words(xml_name: &str) -> impl Iterator<Item = &str> {
    xml_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn camel_case(xml_name: &str) -> String {
    words(xml_name).map(capitalize).collect()
}

fn package_segment(raw: &str) -> Option<String> {
    let mut segment: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if segment.is_empty() {
        return None;
    }
    if segment.starts_with(|c: char| c.is_ascii_digit()) || RESERVED_WORDS.contains(&segment.as_str())
    {
        segment.insert(0, '_');
    }
    Some(segment)
}

fn strip_extension(segment: &str) -> &str {
    for ext in STRIPPED_EXTENSIONS {
        if let Some(stripped) = segment.strip_suffix(ext) {
            return stripped;
        }
    }
    segment
}

impl NameConverter for StandardNameConverter {
    fn to_property_name(&self, xml_name: &str) -> String {
        camel_case(xml_name)
    }

    fn to_class_name(&self, xml_name: &str) -> String {
        camel_case(xml_name)
    }

    fn to_package_name(&self, namespace_uri: &str) -> Option<String> {
        let namespace_uri = namespace_uri.trim();
        if namespace_uri.is_empty() {
            return None;
        }

        let mut raw_segments: Vec<String> = Vec::new();
        match Url::parse(namespace_uri) {
            Ok(url) if url.scheme() == "urn" => {
                raw_segments.extend(url.path().split(':').map(str::to_string));
            }
            Ok(url) if url.has_host() => {
                let host = url.host_str().unwrap_or_default();
                let mut labels: Vec<&str> = host.split('.').collect();
                if labels.first() == Some(&"www") {
                    labels.remove(0);
                }
                raw_segments.extend(labels.into_iter().rev().map(str::to_string));
                if let Some(segments) = url.path_segments() {
                    raw_segments.extend(
                        segments
                            .filter(|s| !s.is_empty())
                            .map(|s| strip_extension(s).to_string()),
                    );
                }
            }
            _ => {
                raw_segments.extend(
                    namespace_uri
                        .split(['/', ':'])
                        .filter(|s| !s.is_empty())
                        .map(|s| strip_extension(s).to_string()),
                );
            }
        }

        let segments: Vec<String> = raw_segments
            .iter()
            .filter_map(|s| package_segment(s))
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(segments.join("."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_names_are_camel_cased() {
        let names = StandardNameConverter;
        assert_eq!(names.to_property_name("street"), "Street");
        assert_eq!(names.to_property_name("first-name"), "FirstName");
        assert_eq!(names.to_property_name("postal_code"), "PostalCode");
        assert_eq!(names.to_property_name("ID"), "ID");
    }

    #[test]
    fn http_namespaces_reverse_the_host() {
        let names = StandardNameConverter;
        assert_eq!(
            names.to_package_name("http://www.example.com/ns/address.xsd"),
            Some("com.example.ns.address".to_string())
        );
        assert_eq!(
            names.to_package_name("https://example.org/2024/types"),
            Some("org.example._2024.types".to_string())
        );
    }

    #[test]
    fn urn_namespaces_use_colon_parts() {
        let names = StandardNameConverter;
        assert_eq!(
            names.to_package_name("urn:example:groups"),
            Some("example.groups".to_string())
        );
    }

    #[test]
    fn empty_namespace_has_no_package() {
        let names = StandardNameConverter;
        assert_eq!(names.to_package_name(""), None);
    }

    #[test]
    fn reserved_words_are_escaped() {
        let names = StandardNameConverter;
        assert_eq!(
            names.to_package_name("http://example.com/class"),
            Some("com.example._class".to_string())
        );
    }
}

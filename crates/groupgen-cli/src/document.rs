//! JSON documents read and written by the CLI.

use groupgen_core::{
    BuilderOutline, Diagnostic, GenerationReport, GeneratorSettings, GroupAssociations,
    InterfaceOutline,
};
use groupgen_model::{Outline, SchemaSet, TypeEnvironment, TypeRef};
use serde::{Deserialize, Serialize};

/// Everything one generation run needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationDocument {
    #[serde(default)]
    pub schema: SchemaSet,
    #[serde(default)]
    pub outline: Outline,
    /// Compiled interfaces visible to the run (qualified names).
    #[serde(default)]
    pub environment: TypeEnvironment,
}

#[derive(Debug, Serialize)]
pub struct ReportDocument<'r> {
    pub settings: &'r GeneratorSettings,
    pub model_group_interfaces: Vec<&'r InterfaceOutline>,
    pub attribute_group_interfaces: Vec<&'r InterfaceOutline>,
    pub associations: &'r GroupAssociations,
    pub builders: Vec<&'r BuilderOutline>,
    pub removed_classes: &'r [TypeRef],
    pub warnings: &'r [Diagnostic],
}

impl<'r> From<&'r GenerationReport> for ReportDocument<'r> {
    fn from(report: &'r GenerationReport) -> Self {
        Self {
            settings: &report.settings,
            model_group_interfaces: report.model_group_interfaces.values().collect(),
            attribute_group_interfaces: report.attribute_group_interfaces.values().collect(),
            associations: &report.associations,
            builders: report.builders.values().collect(),
            removed_classes: &report.removed_classes,
            warnings: &report.warnings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OutputDocument<'r> {
    pub outline: &'r Outline,
    pub report: ReportDocument<'r>,
}

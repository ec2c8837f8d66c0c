//! Generator configuration.
//!
//! [`GeneratorConfig`] is what a host (or the CLI's JSON config file) supplies.
//! [`GeneratorSettings`] is the resolved view the pipeline actually runs on,
//! after companion plugins have been taken into account.

use crate::builder::BuilderOptions;
use groupgen_episode::{EpisodeError, EpisodeSource};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NEW_BUILDER_METHOD_NAME: &str = "builder";
pub const DEFAULT_NEW_COPY_BUILDER_METHOD_NAME: &str = "newCopyBuilder";
pub const DEFAULT_BUILDER_INTERFACE_NAME: &str = "BuildSupport";

/// Companion plugins active in the same compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionPlugins {
    /// An immutability plugin suppresses setters regardless of `declare_setters`.
    pub immutable: bool,
    pub bound_properties: Option<BoundPropertiesPlugin>,
    pub deep_clone: Option<DeepClonePlugin>,
    pub deep_copy: bool,
    pub fluent_builder: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundPropertiesPlugin {
    pub constrained: bool,
    pub setter_throws: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepClonePlugin {
    pub clone_throws: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub declare_setters: bool,
    pub declare_builder_interface: bool,
    pub new_builder_method_name: String,
    pub new_copy_builder_method_name: String,
    pub builder_interface_name: String,
    /// URL or path of an upstream episode.
    pub upstream_episode: Option<String>,
    pub plugins: CompanionPlugins,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            declare_setters: true,
            declare_builder_interface: false,
            new_builder_method_name: DEFAULT_NEW_BUILDER_METHOD_NAME.to_string(),
            new_copy_builder_method_name: DEFAULT_NEW_COPY_BUILDER_METHOD_NAME.to_string(),
            builder_interface_name: DEFAULT_BUILDER_INTERFACE_NAME.to_string(),
            upstream_episode: None,
            plugins: CompanionPlugins::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn settings(&self) -> GeneratorSettings {
        let plugins = &self.plugins;
        let setter_throws_veto = plugins
            .bound_properties
            .as_ref()
            .is_some_and(|bp| bp.constrained && bp.setter_throws);
        GeneratorSettings {
            immutable: !self.declare_setters || plugins.immutable,
            setter_throws_veto,
            declare_builder_interface: self.declare_builder_interface && plugins.fluent_builder,
            needs_clone_method: plugins.deep_clone.is_some(),
            clone_method_throws: plugins
                .deep_clone
                .as_ref()
                .is_some_and(|dc| dc.clone_throws),
            needs_copy_method: plugins.deep_copy,
            builder_interface_name: self.builder_interface_name.clone(),
            builder_options: BuilderOptions {
                new_builder_method_name: self.new_builder_method_name.clone(),
                new_copy_builder_method_name: self.new_copy_builder_method_name.clone(),
            },
        }
    }

    pub fn episode_source(&self) -> Result<Option<EpisodeSource>, EpisodeError> {
        self.upstream_episode
            .as_deref()
            .map(EpisodeSource::parse)
            .transpose()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// No mutators are declared on interfaces.
    pub immutable: bool,
    /// Mutators declare that a vetoed change may be signalled.
    pub setter_throws_veto: bool,
    pub declare_builder_interface: bool,
    pub needs_clone_method: bool,
    pub clone_method_throws: bool,
    pub needs_copy_method: bool,
    pub builder_interface_name: String,
    pub builder_options: BuilderOptions,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorConfig::default().settings()
    }
}

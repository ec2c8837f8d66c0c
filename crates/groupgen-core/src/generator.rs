//! The generation pipeline.
//!
//! One [`GroupInterfaceGenerator::generate`] call runs these phases in order:
//!
//! 1. load the upstream episode (once per generator),
//! 2. synthesize and link model-group interfaces,
//! 3. synthesize and link attribute-group interfaces,
//! 4. bind implementation classes to the interfaces of the groups they use,
//! 5. drop the placeholder classes and their factory methods,
//! 6. optionally declare and populate builder interfaces.
//!
//! Any fatal error is reported to the [`Diagnostics`] sink and returned.

use crate::bind::{bind_implementations, GroupAssociations};
use crate::builder::{
    build_all, declare_builder_interfaces, BuilderGenerator, BuilderOutlines,
    FluentBuilderDeclarations,
};
use crate::cleanup::remove_dummy_implementations;
use crate::config::{GeneratorConfig, GeneratorSettings};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{GenerationError, Result};
use crate::interface::{InterfaceOutline, InterfaceSet};
use crate::link::link_super_interfaces;
use crate::synthesize::synthesize;
use groupgen_episode::{EpisodeBuilder, EpisodeIndex, EpisodeSource, LazyEpisode};
use groupgen_model::{
    GroupKind, Locator, NameConverter, Outline, QName, SchemaSet, TypeEnvironment, TypeRef,
};

/// The collaborators of one generation run.
pub struct GenerationInput<'a> {
    pub schema: &'a SchemaSet,
    pub outline: &'a mut Outline,
    pub names: &'a dyn NameConverter,
    /// Compiled interfaces visible to this run.
    pub environment: &'a TypeEnvironment,
    pub diagnostics: &'a mut dyn Diagnostics,
}

/// State shared by the phases of one run.
pub(crate) struct Session<'a> {
    pub schema: &'a SchemaSet,
    pub outline: &'a mut Outline,
    pub names: &'a dyn NameConverter,
    pub environment: &'a TypeEnvironment,
    pub settings: &'a GeneratorSettings,
    diagnostics: &'a mut dyn Diagnostics,
    warnings: Vec<Diagnostic>,
}

impl<'a> Session<'a> {
    /// Reports a fatal error and hands it back for returning.
    pub fn fail(&mut self, error: GenerationError, locator: Option<&Locator>) -> GenerationError {
        let diagnostic = Diagnostic::error(error.to_string(), locator);
        tracing::error!(error = %diagnostic, "group interface generation failed");
        self.diagnostics.error(&diagnostic);
        error
    }

    pub fn warn(&mut self, message: String, locator: Option<&Locator>) {
        let diagnostic = Diagnostic::warning(message, locator);
        tracing::warn!(warning = %diagnostic, "group interface generation");
        self.diagnostics.warning(&diagnostic);
        self.warnings.push(diagnostic);
    }
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub settings: GeneratorSettings,
    pub model_group_interfaces: InterfaceSet,
    pub attribute_group_interfaces: InterfaceSet,
    pub associations: GroupAssociations,
    pub builders: BuilderOutlines,
    /// Placeholder classes removed from the outline.
    pub removed_classes: Vec<TypeRef>,
    pub warnings: Vec<Diagnostic>,
}

impl GenerationReport {
    /// Model-group interfaces first, then attribute-group interfaces.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceOutline> {
        self.model_group_interfaces
            .values()
            .chain(self.attribute_group_interfaces.values())
    }

    pub fn interface(&self, group: &QName) -> Option<&InterfaceOutline> {
        self.model_group_interfaces
            .get(group)
            .or_else(|| self.attribute_group_interfaces.get(group))
    }

    pub fn interface_count(&self) -> usize {
        self.model_group_interfaces.len() + self.attribute_group_interfaces.len()
    }
}

pub struct GroupInterfaceGenerator {
    settings: GeneratorSettings,
    episode: LazyEpisode,
    episode_builder: Option<EpisodeBuilder>,
    builder_generator: Box<dyn BuilderGenerator>,
}

impl GroupInterfaceGenerator {
    pub fn new(settings: GeneratorSettings, upstream_episode: Option<EpisodeSource>) -> Self {
        tracing::debug!(
            immutable = settings.immutable,
            setter_throws_veto = settings.setter_throws_veto,
            declare_builder_interface = settings.declare_builder_interface,
            needs_clone_method = settings.needs_clone_method,
            clone_method_throws = settings.clone_method_throws,
            needs_copy_method = settings.needs_copy_method,
            "group interface generator settings"
        );
        Self {
            settings,
            episode: LazyEpisode::new(upstream_episode),
            episode_builder: None,
            builder_generator: Box::new(FluentBuilderDeclarations),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self::new(config.settings(), config.episode_source()?))
    }

    /// Records every synthesized interface for a downstream episode.
    pub fn with_episode_builder(mut self) -> Self {
        self.episode_builder = Some(EpisodeBuilder::new());
        self
    }

    pub fn with_builder_generator(mut self, generator: Box<dyn BuilderGenerator>) -> Self {
        self.builder_generator = generator;
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn episode_builder(&self) -> Option<&EpisodeBuilder> {
        self.episode_builder.as_ref()
    }

    pub fn take_episode_builder(&mut self) -> Option<EpisodeBuilder> {
        self.episode_builder.take()
    }

    pub fn generate(&mut self, input: GenerationInput<'_>) -> Result<GenerationReport> {
        let GenerationInput {
            schema,
            outline,
            names,
            environment,
            diagnostics,
        } = input;
        let mut session = Session {
            schema,
            outline,
            names,
            environment,
            settings: &self.settings,
            diagnostics,
            warnings: Vec::new(),
        };

        let episode = match self.episode.get_or_load(environment) {
            Ok(episode) => episode,
            Err(error) => return Err(session.fail(error.into(), None)),
        };

        let model_group_interfaces = synthesize_batch(
            &mut session,
            episode,
            GroupKind::ModelGroup,
            self.episode_builder.as_mut(),
        )?;
        let attribute_group_interfaces = synthesize_batch(
            &mut session,
            episode,
            GroupKind::AttributeGroup,
            self.episode_builder.as_mut(),
        )?;

        let associations = bind_implementations(
            &mut session,
            &model_group_interfaces,
            &attribute_group_interfaces,
            episode,
        );

        let removed_classes = remove_dummy_implementations(
            session.outline,
            model_group_interfaces
                .values()
                .chain(attribute_group_interfaces.values()),
        );

        let builders = if session.settings.declare_builder_interface {
            let builders = declare_builder_interfaces(
                &mut session,
                model_group_interfaces
                    .values()
                    .chain(attribute_group_interfaces.values()),
            )?;
            build_all(
                &mut session,
                self.builder_generator.as_mut(),
                &builders,
                &associations,
            )?;
            builders
        } else {
            BuilderOutlines::new()
        };

        tracing::info!(
            model_groups = model_group_interfaces.len(),
            attribute_groups = attribute_group_interfaces.len(),
            bound_classes = associations.len(),
            builders = builders.len(),
            warnings = session.warnings.len(),
            "generated group interfaces"
        );

        Ok(GenerationReport {
            settings: self.settings.clone(),
            model_group_interfaces,
            attribute_group_interfaces,
            associations,
            builders,
            removed_classes,
            warnings: session.warnings,
        })
    }
}

/// Synthesizes every group of one kind the episode does not already cover,
/// then links the batch's superinterfaces.
fn synthesize_batch(
    session: &mut Session<'_>,
    episode: &EpisodeIndex,
    kind: GroupKind,
    mut episode_builder: Option<&mut EpisodeBuilder>,
) -> Result<InterfaceSet> {
    let mut interfaces = InterfaceSet::new();
    for declaration in session.schema.declarations(kind) {
        if episode.is_known(declaration.name()) {
            tracing::debug!(group = %declaration.name(), "group published upstream; not redeclared");
            continue;
        }
        let interface = synthesize(session, &declaration)?;
        if let Some(builder) = episode_builder.as_deref_mut() {
            builder.add_interface(kind, interface.name(), interface.type_ref());
        }
        interfaces.insert(interface.name().clone(), interface);
    }
    link_super_interfaces(session, &mut interfaces, episode);
    Ok(interfaces)
}

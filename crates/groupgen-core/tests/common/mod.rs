//! Schema-set and outline fixtures shared by the integration tests.

#![allow(dead_code)]

use groupgen_core::{
    CollectingDiagnostics, GenerationError, GenerationInput, GenerationReport,
    GroupInterfaceGenerator,
};
use groupgen_model::{
    AttributeDecl, AttributeGroupDecl, AttributeUse, ClassOutline, ComplexType, ContentType,
    ElementDecl, FieldOutline, Locator, Method, ModelGroup, ModelGroupDecl, Outline,
    PackageOutline, Particle, QName, SchemaComponent, SchemaSet, StandardNameConverter, Term,
    TypeEnvironment,
};

pub const NS: &str = "urn:example";
pub const PKG: &str = "com.example";

pub fn qn(local: &str) -> QName {
    QName::new(NS, local)
}

pub fn element(local: &str) -> Particle {
    Particle::once(Term::Element(ElementDecl::new(qn(local))))
}

pub fn fixed_element(local: &str, value: &str) -> Particle {
    let mut decl = ElementDecl::new(qn(local));
    decl.fixed_value = Some(value.to_string());
    Particle::once(Term::Element(decl))
}

pub fn group_ref(local: &str) -> Particle {
    Particle::once(Term::GroupRef(qn(local)))
}

pub fn attribute(local: &str) -> AttributeUse {
    AttributeUse::new(AttributeDecl::new(QName::new("", local)))
}

pub fn fixed_attribute(local: &str, value: &str) -> AttributeUse {
    let mut decl = AttributeDecl::new(QName::new("", local));
    decl.fixed_value = Some(value.to_string());
    AttributeUse::new(decl)
}

/// Getter and setter pairs as the schema compiler generates them.
pub fn accessors(property: &str, ty: &str) -> Vec<Method> {
    let getter = if ty == "boolean" {
        format!("is{property}")
    } else {
        format!("get{property}")
    };
    vec![
        Method::new(getter, ty),
        Method::new(format!("set{property}"), "void").param("value", ty),
    ]
}

pub struct Fixture {
    pub schema: SchemaSet,
    pub outline: Outline,
    pub environment: TypeEnvironment,
}

impl Fixture {
    pub fn new() -> Self {
        let mut outline = Outline::new();
        outline.add_package(PackageOutline::new(PKG, Some(NS.to_string())));
        Self {
            schema: SchemaSet::default(),
            outline,
            environment: TypeEnvironment::new(),
        }
    }

    pub fn model_group(&mut self, local: &str, particles: Vec<Particle>) -> &mut Self {
        self.schema.model_groups.push(ModelGroupDecl {
            name: qn(local),
            group: ModelGroup {
                particles,
                ..ModelGroup::default()
            },
            locator: Locator {
                system_id: "example.xsd".to_string(),
                line: 10,
                column: 5,
            },
        });
        self
    }

    pub fn attribute_group(
        &mut self,
        local: &str,
        attribute_uses: Vec<AttributeUse>,
        nested: &[&str],
    ) -> &mut Self {
        self.schema.attribute_groups.push(AttributeGroupDecl {
            name: qn(local),
            attribute_uses,
            attribute_groups: nested.iter().map(|n| qn(n)).collect(),
            locator: Locator::default(),
        });
        self
    }

    /// Placeholder class for a group, with a field and accessors per property
    /// and a `create<Class>` factory method.
    pub fn dummy(&mut self, class: &str, group: &str, properties: &[(&str, &str)]) -> &mut Self {
        let mut outline_class = ClassOutline::new(
            PKG,
            class,
            SchemaComponent::Group { name: qn(group) },
        );
        for (property, ty) in properties {
            outline_class
                .fields
                .push(FieldOutline::new(*property, property.to_lowercase(), *ty));
            outline_class.methods.extend(accessors(property, ty));
        }
        self.factory_method(class);
        self.outline.add_class(outline_class).unwrap();
        self
    }

    /// Class generated for a complex type.
    pub fn class_with_content(
        &mut self,
        class: &str,
        content: Option<Particle>,
        attribute_groups: &[&str],
    ) -> &mut Self {
        let complex_type = ComplexType {
            name: Some(qn(&format!("{class}Type"))),
            explicit_content: None,
            content: content.map(ContentType::Particle).unwrap_or(ContentType::Empty),
            attribute_groups: attribute_groups.iter().map(|n| qn(n)).collect(),
        };
        self.factory_method(class);
        self.outline
            .add_class(ClassOutline::new(
                PKG,
                class,
                SchemaComponent::ComplexType(complex_type),
            ))
            .unwrap();
        self
    }

    fn factory_method(&mut self, class: &str) {
        self.outline
            .packages
            .get_mut(PKG)
            .unwrap()
            .object_factory
            .push(Method::new(format!("create{class}"), format!("{PKG}.{class}")));
    }

    pub fn run(
        &mut self,
        generator: &mut GroupInterfaceGenerator,
    ) -> (Result<GenerationReport, GenerationError>, CollectingDiagnostics) {
        let mut diagnostics = CollectingDiagnostics::new();
        let result = generator.generate(GenerationInput {
            schema: &self.schema,
            outline: &mut self.outline,
            names: &StandardNameConverter,
            environment: &self.environment,
            diagnostics: &mut diagnostics,
        });
        (result, diagnostics)
    }

    pub fn class(&self, name: &str) -> Option<&ClassOutline> {
        self.outline.classes.get(&format!("{PKG}.{name}"))
    }

    pub fn factory_method_names(&self) -> Vec<String> {
        self.outline.packages[PKG]
            .object_factory
            .iter()
            .map(|m| m.name.clone())
            .collect()
    }
}

pub fn signatures(methods: &[Method]) -> Vec<String> {
    methods.iter().map(Method::signature).collect()
}

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use minijinja::{AutoEscape, Environment};
use scaffold_core::naming::{camel_case, pascal_case, snake_case};
use scaffold_core::ResourceDescriptor;
use serde_json::Value;
use std::fmt;

/// The artifact kinds a resource is scaffolded into, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Migration,
    Factory,
    Test,
    Model,
    Resource,
    ResourceCollection,
    Controller,
    Routes,
}

impl TemplateId {
    pub const ALL: [TemplateId; 8] = [
        TemplateId::Migration,
        TemplateId::Factory,
        TemplateId::Test,
        TemplateId::Model,
        TemplateId::Resource,
        TemplateId::ResourceCollection,
        TemplateId::Controller,
        TemplateId::Routes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TemplateId::Migration => "migration.php.j2",
            TemplateId::Factory => "factory.php.j2",
            TemplateId::Test => "test.php.j2",
            TemplateId::Model => "model.php.j2",
            TemplateId::Resource => "resource.php.j2",
            TemplateId::ResourceCollection => "resources.php.j2",
            TemplateId::Controller => "controller.php.j2",
            TemplateId::Routes => "routes.php.j2",
        }
    }

    fn source(self) -> &'static str {
        match self {
            TemplateId::Migration => include_str!("../templates/migration.php.j2"),
            TemplateId::Factory => include_str!("../templates/factory.php.j2"),
            TemplateId::Test => include_str!("../templates/test.php.j2"),
            TemplateId::Model => include_str!("../templates/model.php.j2"),
            TemplateId::Resource => include_str!("../templates/resource.php.j2"),
            TemplateId::ResourceCollection => include_str!("../templates/resources.php.j2"),
            TemplateId::Controller => include_str!("../templates/controller.php.j2"),
            TemplateId::Routes => include_str!("../templates/routes.php.j2"),
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateId::Migration => "migration",
            TemplateId::Factory => "factory",
            TemplateId::Test => "test",
            TemplateId::Model => "model",
            TemplateId::Resource => "resource",
            TemplateId::ResourceCollection => "resource collection",
            TemplateId::Controller => "controller",
            TemplateId::Routes => "routes",
        };
        f.write_str(name)
    }
}

/// Template parameters: the descriptor's keys in declaration order, plus per-artifact extras.
pub type Params = IndexMap<String, Value>;

pub fn params(descriptor: &ResourceDescriptor) -> Result<Params> {
    let Value::Object(map) = serde_json::to_value(descriptor)? else {
        bail!("resource descriptor did not serialize to a map");
    };
    Ok(map.into_iter().collect())
}

pub trait Renderer {
    fn render(&self, id: TemplateId, params: &Params) -> Result<String>;
}

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("camel", |value: String| camel_case(&value));
        env.add_filter("pascal", |value: String| pascal_case(&value));
        env.add_filter("snake", |value: String| snake_case(&value));
        for id in TemplateId::ALL {
            env.add_template(id.name(), id.source())
                .with_context(|| format!("Invalid {id} template"))?;
        }
        Ok(Self { env })
    }
}

impl Renderer for JinjaRenderer {
    fn render(&self, id: TemplateId, params: &Params) -> Result<String> {
        let template = self.env.get_template(id.name())?;
        let text = template.render(params).with_context(|| format!("Failed to render {id} template"))?;
        Ok(text)
    }
}

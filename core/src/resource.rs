use crate::field::{FieldSpec, FieldType};
use crate::naming::{camel_case, upper_first};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Everything a generator needs to know about one resource. Built once per run and never
/// mutated afterwards; serializes with the camelCase keys the templates read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pascal_name: String,
    camel_name: String,
    plural_name: String,
    fields: Vec<FieldSpec>,
    primary_key_fields: Vec<FieldSpec>,
    use_generated_key: bool,
    has_auto_increment_primary_key: bool,
    uses_default_key: bool,
    soft_deletes_enabled: bool,
}

impl ResourceDescriptor {
    pub fn build(name: &str, plural: &str, fields: Vec<FieldSpec>, soft_deletes: bool) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::EmptyResourceName);
        }
        let camel_name = camel_case(name);
        if camel_name.is_empty() {
            return Err(Error::EmptyResourceName);
        }
        let pascal_name = upper_first(&camel_name);

        let mut seen = HashSet::new();
        if let Some(dup) = fields.iter().find(|f| !seen.insert(f.name.as_str())) {
            return Err(Error::DuplicateFieldName { name: dup.name.clone() });
        }

        let primary_key_fields: Vec<FieldSpec> = fields.iter().filter(|f| f.is_primary_key).cloned().collect();

        // A single uuid key means the application supplies identifiers for the whole resource,
        // even if another key column is marked incrementing.
        let mut use_generated_key = false;
        let mut any_incrementing = false;
        for field in &primary_key_fields {
            use_generated_key |= field.ty == FieldType::Uuid;
            any_incrementing |= field.is_incrementing;
        }

        let uses_default_key = primary_key_fields.is_empty() && !fields.iter().any(|f| f.name == "id");

        Ok(Self {
            pascal_name,
            camel_name,
            plural_name: plural.to_string(),
            fields,
            primary_key_fields,
            use_generated_key,
            has_auto_increment_primary_key: !use_generated_key && any_incrementing,
            uses_default_key,
            soft_deletes_enabled: soft_deletes,
        })
    }

    /// Parses `definitions` and builds the descriptor in one step.
    pub fn from_definitions<I, S>(name: &str, plural: &str, definitions: I, soft_deletes: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = crate::field::parse_all(definitions)?;
        Self::build(name, plural, fields, soft_deletes)
    }

    pub fn pascal_name(&self) -> &str {
        &self.pascal_name
    }

    pub fn camel_name(&self) -> &str {
        &self.camel_name
    }

    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn primary_key_fields(&self) -> &[FieldSpec] {
        &self.primary_key_fields
    }

    pub fn use_generated_key(&self) -> bool {
        self.use_generated_key
    }

    pub fn has_auto_increment_primary_key(&self) -> bool {
        self.has_auto_increment_primary_key
    }

    pub fn soft_deletes_enabled(&self) -> bool {
        self.soft_deletes_enabled
    }

    /// No field was marked primary and none is named `id`; generators add a conventional
    /// incrementing `id` key.
    pub fn uses_default_key(&self) -> bool {
        self.uses_default_key
    }
}

use crate::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Storage kind of a field. Anything outside the known set is kept verbatim in `Other`
/// and rendered string-like; the migration still receives the raw type name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Date,
    Uuid,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Uuid => "uuid",
            FieldType::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FieldType::Other(_))
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "string" => FieldType::String,
            "integer" => FieldType::Integer,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "uuid" => FieldType::Uuid,
            _ => FieldType::Other(value.to_string()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for FieldType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One parsed `name:type[:modifier]*` token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub is_primary_key: bool,
    /// Only ever set for integer fields, and always together with `is_primary_key`.
    pub is_incrementing: bool,
    pub is_nullable: bool,
}

impl FieldSpec {
    pub fn parse(definition: &str) -> Result<Self> {
        let mut segments = definition.split(':');
        let name = segments.next().unwrap_or_default().trim();
        let Some(ty) = segments.next() else {
            return Err(Error::malformed(definition, "expected `name:type[:modifier]*`"));
        };
        if name.is_empty() {
            return Err(Error::malformed(definition, "field name is empty"));
        }
        let ty = match ty.trim() {
            "" => {
                warn!(field = name, "empty field type, treating it as string");
                FieldType::String
            }
            ty => FieldType::from(ty),
        };

        let mut field = FieldSpec {
            name: name.to_string(),
            ty,
            is_primary_key: false,
            is_incrementing: false,
            is_nullable: false,
        };
        let mut increments = false;
        for modifier in segments {
            match modifier.trim().to_ascii_lowercase().as_str() {
                "primary" => field.is_primary_key = true,
                "increments" | "autoincrement" => {
                    field.is_primary_key = true;
                    increments = true;
                }
                "nullable" => field.is_nullable = true,
                "" => {}
                other => warn!(field = %field.name, modifier = other, "ignoring unrecognized modifier"),
            }
        }
        if increments {
            if field.ty == FieldType::Integer {
                field.is_incrementing = true;
            } else {
                warn!(field = %field.name, ty = %field.ty, "only integer fields can auto-increment; treating as a plain primary key");
            }
        }
        if !field.ty.is_known() {
            warn!(field = %field.name, ty = %field.ty, "unrecognized field type, rendering it string-like");
        }
        Ok(field)
    }

    pub fn is_date(&self) -> bool {
        self.ty == FieldType::Date
    }

    pub fn is_boolean(&self) -> bool {
        self.ty == FieldType::Boolean
    }

    pub fn is_uuid(&self) -> bool {
        self.ty == FieldType::Uuid
    }

    #[doc(hidden)]
    pub fn mock(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: FieldType::from(ty),
            is_primary_key: false,
            is_incrementing: false,
            is_nullable: false,
        }
    }
}

impl FromStr for FieldSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parses every token in order, stopping at the first malformed one.
pub fn parse_all<I, S>(definitions: I) -> Result<Vec<FieldSpec>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    definitions.into_iter().map(|d| FieldSpec::parse(d.as_ref())).collect()
}

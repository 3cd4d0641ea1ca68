pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed field definition `{definition}`: {reason}")]
    MalformedFieldDefinition { definition: String, reason: String },

    #[error("Resource name must not be empty")]
    EmptyResourceName,

    #[error("Field `{name}` is defined more than once")]
    DuplicateFieldName { name: String },

    #[error("{0}")]
    Config(String),
}

impl Error {
    pub(crate) fn malformed(definition: &str, reason: impl Into<String>) -> Self {
        Error::MalformedFieldDefinition {
            definition: definition.to_string(),
            reason: reason.into(),
        }
    }
}

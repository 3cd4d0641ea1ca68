pub use self::error::{Error, Result};
pub use field::{FieldSpec, FieldType};
pub use resource::ResourceDescriptor;

mod error;
pub mod config;
pub mod field;
pub mod naming;
pub mod resource;

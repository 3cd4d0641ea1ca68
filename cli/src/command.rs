mod info;
mod resource;

pub use info::*;
pub use resource::*;

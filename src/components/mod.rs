pub mod templates;

pub use templates::{TemplateName, Templates};

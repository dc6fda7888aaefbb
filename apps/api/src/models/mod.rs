pub mod content;
pub mod language;
pub mod validate;

//! Attribute values attached to noticed errors, and the rules that decide
//! which of them are kept.

pub mod validator;
pub mod value;

pub use validator::{validate_attributes, AttributeError, AttributeValidator, DefaultAttributeValidator};
pub use value::{AttributeValue, Attributes};

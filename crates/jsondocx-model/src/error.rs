//! Errors raised while building a definition from JSON

use thiserror::Error;

/// A definition that cannot be compiled
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// The root value is not a JSON object
    #[error("definition must be an object with a `content` field")]
    NotAnObject,

    /// A field that must hold content nodes is missing or not an array
    #[error("`{field}` must be a sequence of content nodes")]
    NotASequence { field: &'static str },

    /// The value has the right skeleton but a node could not be decoded
    #[error("malformed definition: {0}")]
    Malformed(#[from] serde_json::Error),
}

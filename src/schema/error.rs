// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::rc::Rc;

type String = Rc<str>;

/// Errors raised while constructing a type catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A type with this name is already defined.
    #[error("a type named '{0}' is already defined")]
    DuplicateType(String),
    /// Empty or whitespace-only type name.
    #[error("'{0}' is not a valid type name (empty or whitespace-only names are not allowed)")]
    InvalidName(String),
    /// A field's declared type does not name a declared type.
    #[error("field '{field}' on type '{declaring_type}' refers to undeclared type '{referenced}'")]
    UnknownFieldType {
        declaring_type: String,
        field: String,
        referenced: String,
    },
}

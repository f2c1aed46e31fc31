// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::rc::Rc;

type String = Rc<str>;

/// Failures raised while resolving and stamping type names.
///
/// Every kind is a contract violation the caller must fix (bad schema, bad
/// hint, ambiguous data) rather than a transient condition; a failure
/// aborts the whole call with no partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotateError {
    /// An array was passed where only scalar-or-object values are defined,
    /// or an object carried a non-string type tag.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A type name (explicit tag, parent hint, or field target) does not
    /// exist in the schema.
    #[error("no type named '{type_name}' found in the schema")]
    UnknownType { type_name: String },

    /// The parent hint resolved to something other than an object type;
    /// only object types declare fields usable as context.
    #[error("parent type '{type_name}' is expected to be an object type but is {kind}")]
    TypeMismatch { type_name: String, kind: String },

    /// The property hint does not name a field of the parent type.
    #[error("the given field '{field}' does not exist on type '{type_name}'")]
    UnknownField { field: String, type_name: String },

    /// Exactly one half of the (parent type name, property of parent) pair
    /// was supplied.
    #[error("expected {missing} to be given as well; parent type name and property of parent must be supplied together")]
    MissingContext { missing: String },

    /// No declared type's field set covers the object's property names.
    #[error("no viable type names found for this value:\n{value}\nHint: try adding a __typename to the input object or pass in a parent type name and property of parent")]
    NoViableType { value: String },

    /// Two or more declared types cover the object's property names.
    #[error("cannot resolve the __typename between these possible types: [{}]\nfor this value:\n{value}\nHint: try adding a __typename to the input object or pass in a parent type name and property of parent", .candidates.join(", "))]
    AmbiguousType {
        candidates: Vec<String>,
        value: String,
    },

    /// An abstract type has no resolver callback registered.
    #[error("no resolver found for the abstract type '{type_name}'")]
    MissingResolver { type_name: String },

    /// The resolver handed back a pending result; only synchronous
    /// resolvers are supported.
    #[error("the resolver for '{type_name}' returned a deferred result but only synchronous resolvers are supported")]
    AsyncResolverUnsupported { type_name: String },

    /// The resolver declined to pick a concrete type for the value.
    #[error("unable to resolve a concrete type for abstract type '{type_name}' given this value:\n{value}")]
    UnresolvedAbstractType { type_name: String, value: String },

    /// The resolver's answer does not name a valid object type.
    #[error("the abstract type '{abstract_type}' resolved to an unknown or misconfigured type '{resolved}'")]
    UnknownResolvedType {
        abstract_type: String,
        resolved: String,
    },

    /// A schema-type kind that can never be annotated (e.g. an input
    /// object) was reached; names the hint context to aid diagnosing the
    /// malformed schema.
    #[error("unexpected type '{type_name}' ({kind}) found; parent type name: {}, property of parent: {}", .parent_type_name.as_deref().unwrap_or("<none>"), .property_of_parent.as_deref().unwrap_or("<none>"))]
    UnexpectedType {
        type_name: String,
        kind: String,
        parent_type_name: Option<String>,
        property_of_parent: Option<String>,
    },
}

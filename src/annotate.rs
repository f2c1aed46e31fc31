// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Resolves and stamps `__typename` discriminants onto plain data trees.
//!
//! [`annotate`] is the entry point and sole recursive driver: it determines
//! the concrete object type of the incoming value, stamps the type name onto
//! a shallow copy, and recurses into every property with the resolved type
//! name and the property name as new parent context. [`find_candidates`] is
//! the leaf heuristic it falls back to when a value carries neither an
//! explicit tag nor a contextual hint.
//!
//! Both operations are pure: the input value is never mutated and no state
//! survives the call beyond the caller-supplied schema.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::schema::{AbstractType, NamedType, TypeResolution, TypeSystem};
use crate::Value;

pub mod error;

#[cfg(test)]
mod tests {
    mod annotate;
    mod candidates;
    mod fixtures;
}

use error::AnnotateError;

type String = Rc<str>;

/// Property under which the resolved type name is stamped.
pub const TYPENAME_KEY: &str = "__typename";

/// Annotates `value` and every nested object with the name of the schema
/// type it represents. Scalars, nulls and timestamps are returned unchanged.
///
/// Fails with [`AnnotateError::InvalidArgument`] when given an array:
/// arrays are only handled one level up, while recursing into an object's
/// properties.
pub fn annotate(value: &Value, schema: &TypeSystem) -> Result<Value, AnnotateError> {
    annotate_inner(value, schema, None, None)
}

/// Like [`annotate`], with a contextual hint for the top-level value: the
/// name of the object type that declares it and the property it sits under.
/// Both halves of the hint must be supplied together.
pub fn annotate_with_context(
    value: &Value,
    schema: &TypeSystem,
    parent_type_name: Option<&str>,
    property_of_parent: Option<&str>,
) -> Result<Value, AnnotateError> {
    annotate_inner(value, schema, parent_type_name, property_of_parent)
}

/// Returns every declared type whose field set is a superset of the
/// object's own property names, in schema declaration order.
///
/// Matching is by field name only, never field type: the point is
/// disambiguating shape, not validation. Non-object values have no
/// candidates; arrays are rejected outright.
pub fn find_candidates(
    value: &Value,
    schema: &TypeSystem,
) -> Result<Vec<Rc<NamedType>>, AnnotateError> {
    if matches!(value, Value::Array(_)) {
        return Err(AnnotateError::InvalidArgument {
            reason: "find_candidates expects objects to be passed in, not arrays".into(),
        });
    }
    let Value::Object(props) = value else {
        return Ok(Vec::new());
    };
    let candidates = schema
        .iter_entries()
        .filter(|(_, source_defined)| *source_defined)
        .filter_map(|(ty, _)| ty.matchable_fields().map(|fields| (ty, fields)))
        .filter(|(_, fields)| props.keys().all(|prop| fields.contains_key(prop.as_ref())))
        .map(|(ty, _)| Rc::clone(ty))
        .collect();
    Ok(candidates)
}

fn annotate_inner(
    value: &Value,
    schema: &TypeSystem,
    parent_type_name: Option<&str>,
    property_of_parent: Option<&str>,
) -> Result<Value, AnnotateError> {
    let props = match value {
        Value::Array(_) => {
            return Err(AnnotateError::InvalidArgument {
                reason: "annotate expects objects to be passed in, not arrays".into(),
            })
        }
        Value::Object(props) => props,
        // Scalars, nulls and timestamps pass through untouched.
        _ => return Ok(value.clone()),
    };

    let named = resolve_named_type(value, props, schema, parent_type_name, property_of_parent)?;

    let type_name: String = match named.as_ref() {
        // Schema-level custom scalars (e.g. structured JSON blobs) pass
        // through untouched even though they are objects in the value tree.
        NamedType::Scalar(_) => return Ok(value.clone()),
        NamedType::Object(o) => o.name.clone(),
        NamedType::Abstract(a) => resolve_abstract(a, value, schema)?,
        NamedType::InputObject(_) => {
            return Err(AnnotateError::UnexpectedType {
                type_name: named.name().clone(),
                kind: named.kind_name().into(),
                parent_type_name: parent_type_name.map(Rc::from),
                property_of_parent: property_of_parent.map(Rc::from),
            })
        }
    };

    // Shallow copy with the resolved name stamped first, then every original
    // property in the object's own key order. Children see this object's
    // resolved name and their own property name as parent context.
    let mut annotated = IndexMap::with_capacity(props.len() + 1);
    annotated.insert(String::from(TYPENAME_KEY), Value::String(type_name.clone()));
    for (property, child) in props.iter() {
        if property.as_ref() == TYPENAME_KEY {
            // The tag is a terminal string, never re-annotated.
            continue;
        }
        let annotated_child = match child {
            Value::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| {
                        annotate_inner(element, schema, Some(type_name.as_ref()), Some(property.as_ref()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Value::from(elements)
            }
            _ => annotate_inner(child, schema, Some(type_name.as_ref()), Some(property.as_ref()))?,
        };
        annotated.insert(property.clone(), annotated_child);
    }
    Ok(Value::from(annotated))
}

/// Determines the named type of an object: explicit tag, then contextual
/// hint, then shape heuristic, in that strict order.
fn resolve_named_type(
    value: &Value,
    props: &IndexMap<String, Value>,
    schema: &TypeSystem,
    parent_type_name: Option<&str>,
    property_of_parent: Option<&str>,
) -> Result<Rc<NamedType>, AnnotateError> {
    if let Some(tag) = props.get(TYPENAME_KEY) {
        let Value::String(name) = tag else {
            return Err(AnnotateError::InvalidArgument {
                reason: format!("the {TYPENAME_KEY} property must be a string, got {tag}").into(),
            });
        };
        return schema
            .get_type(name)
            .cloned()
            .ok_or_else(|| AnnotateError::UnknownType {
                type_name: name.clone(),
            });
    }

    match (parent_type_name, property_of_parent) {
        (Some(parent_name), Some(property)) => {
            let parent =
                schema
                    .get_type(parent_name)
                    .ok_or_else(|| AnnotateError::UnknownType {
                        type_name: parent_name.into(),
                    })?;
            let NamedType::Object(parent) = parent.as_ref() else {
                return Err(AnnotateError::TypeMismatch {
                    type_name: parent_name.into(),
                    kind: parent.kind_name().into(),
                });
            };
            let field = parent
                .field(property)
                .ok_or_else(|| AnnotateError::UnknownField {
                    field: property.into(),
                    type_name: parent.name.clone(),
                })?;
            // The builder guarantees field targets resolve; the lookup stays
            // total anyway.
            let referenced = field.named_type();
            schema
                .get_type(referenced)
                .cloned()
                .ok_or_else(|| AnnotateError::UnknownType {
                    type_name: referenced.into(),
                })
        }
        (Some(_), None) => Err(AnnotateError::MissingContext {
            missing: "property_of_parent".into(),
        }),
        (None, Some(_)) => Err(AnnotateError::MissingContext {
            missing: "parent_type_name".into(),
        }),
        (None, None) => {
            let candidates = find_candidates(value, schema)?;
            match candidates.as_slice() {
                [] => Err(AnnotateError::NoViableType {
                    value: render(value),
                }),
                [only] => Ok(Rc::clone(only)),
                _ => Err(AnnotateError::AmbiguousType {
                    candidates: candidates.iter().map(|ty| ty.name().clone()).collect(),
                    value: render(value),
                }),
            }
        }
    }
}

/// Dispatches an abstract type through its resolver callback to a concrete
/// object type name.
fn resolve_abstract(
    abstract_type: &AbstractType,
    value: &Value,
    schema: &TypeSystem,
) -> Result<String, AnnotateError> {
    let resolver =
        abstract_type
            .resolver
            .as_ref()
            .ok_or_else(|| AnnotateError::MissingResolver {
                type_name: abstract_type.name.clone(),
            })?;
    match (**resolver)(value) {
        TypeResolution::Deferred => Err(AnnotateError::AsyncResolverUnsupported {
            type_name: abstract_type.name.clone(),
        }),
        TypeResolution::Unresolved => Err(AnnotateError::UnresolvedAbstractType {
            type_name: abstract_type.name.clone(),
            value: render(value),
        }),
        TypeResolution::Name(resolved) => match schema.get_type(&resolved).map(Rc::as_ref) {
            Some(NamedType::Object(o)) => Ok(o.name.clone()),
            _ => Err(AnnotateError::UnknownResolvedType {
                abstract_type: abstract_type.name.clone(),
                resolved,
            }),
        },
        TypeResolution::Resolved(ty) => match ty.as_ref() {
            NamedType::Object(o) => Ok(o.name.clone()),
            other => Err(AnnotateError::UnknownResolvedType {
                abstract_type: abstract_type.name.clone(),
                resolved: other.name().clone(),
            }),
        },
    }
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|_| format!("{value:?}"))
        .into()
}

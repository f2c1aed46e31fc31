// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The type catalog consumed by the annotator.
//!
//! A [`TypeSystem`] is a read-only, insertion-ordered collection of named
//! types: object types with field maps, abstract types (unions and
//! interfaces) with optional resolver callbacks, scalars, and input object
//! types. It is built once through [`TypeSystemBuilder`], which raises any
//! inconsistency at construction time rather than letting a malformed
//! catalog produce wrong annotations later.

use core::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::Value;

pub mod error;

use error::SchemaError;

type String = Rc<str>;

/// Scalars every catalog carries. These are not source-defined and are
/// therefore never candidates during shape matching.
const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Reference to a named type, possibly wrapped in list or non-null markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: &str) -> TypeRef {
        TypeRef::Named(name.into())
    }

    pub fn list(inner: TypeRef) -> TypeRef {
        TypeRef::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeRef) -> TypeRef {
        TypeRef::NonNull(Box::new(inner))
    }

    /// Strips list and non-null wrappers down to the underlying type name.
    pub fn named_type(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }
}

/// Field-name to declared-type mapping, in declaration order.
pub type FieldMap = IndexMap<String, TypeRef>;

/// Outcome of an abstract type's resolver callback.
pub enum TypeResolution {
    /// Names a concrete object type declared in the catalog.
    Name(String),
    /// A resolved type handed back directly.
    Resolved(Rc<NamedType>),
    /// The resolver declined to pick a type.
    Unresolved,
    /// The resolver kicked off asynchronous work instead of answering.
    /// Always a usage error; the annotator never awaits.
    Deferred,
}

/// Synchronous callback mapping a raw value to a concrete type.
pub type TypeResolver = Rc<dyn Fn(&Value) -> TypeResolution>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbstractKind {
    Interface,
    Union,
}

pub struct ObjectType {
    pub name: String,
    pub fields: FieldMap,
}

impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&TypeRef> {
        self.fields.get(name)
    }
}

pub struct AbstractType {
    pub name: String,
    pub kind: AbstractKind,
    /// Interfaces declare fields; unions have none and therefore never
    /// match by shape.
    pub fields: FieldMap,
    pub resolver: Option<TypeResolver>,
}

pub struct ScalarType {
    pub name: String,
}

pub struct InputObjectType {
    pub name: String,
    pub fields: FieldMap,
}

pub enum NamedType {
    Object(ObjectType),
    Abstract(AbstractType),
    Scalar(ScalarType),
    InputObject(InputObjectType),
}

impl NamedType {
    pub fn name(&self) -> &String {
        match self {
            NamedType::Object(o) => &o.name,
            NamedType::Abstract(a) => &a.name,
            NamedType::Scalar(s) => &s.name,
            NamedType::InputObject(i) => &i.name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            NamedType::Object(_) => "object",
            NamedType::Abstract(a) => match a.kind {
                AbstractKind::Interface => "interface",
                AbstractKind::Union => "union",
            },
            NamedType::Scalar(_) => "scalar",
            NamedType::InputObject(_) => "input object",
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            NamedType::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_abstract(&self) -> Option<&AbstractType> {
        match self {
            NamedType::Abstract(a) => Some(a),
            _ => None,
        }
    }

    /// Field map usable for shape matching: object types and interfaces.
    /// Unions, scalars and input object types expose none.
    pub(crate) fn matchable_fields(&self) -> Option<&FieldMap> {
        match self {
            NamedType::Object(o) => Some(&o.fields),
            NamedType::Abstract(a) if a.kind == AbstractKind::Interface => Some(&a.fields),
            _ => None,
        }
    }
}

impl fmt::Debug for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind_name(), self.name())
    }
}

#[derive(Debug)]
struct TypeEntry {
    ty: Rc<NamedType>,
    source_defined: bool,
}

/// Read-only catalog of named types, enumerated in declaration order.
#[derive(Debug)]
pub struct TypeSystem {
    types: IndexMap<String, TypeEntry>,
}

impl TypeSystem {
    pub fn builder() -> TypeSystemBuilder {
        TypeSystemBuilder::new()
    }

    /// Looks up a named type. Absent means unknown.
    pub fn get_type(&self, name: &str) -> Option<&Rc<NamedType>> {
        self.types.get(name).map(|entry| &entry.ty)
    }

    /// Enumerates all declared types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &Rc<NamedType>> {
        self.types.values().map(|entry| &entry.ty)
    }

    /// Whether the type was declared by the caller, as opposed to being
    /// registered internally (built-in scalars).
    pub fn is_source_defined(&self, name: &str) -> bool {
        self.types
            .get(name)
            .is_some_and(|entry| entry.source_defined)
    }

    pub(crate) fn iter_entries(&self) -> impl Iterator<Item = (&Rc<NamedType>, bool)> {
        self.types
            .values()
            .map(|entry| (&entry.ty, entry.source_defined))
    }
}

/// Builds a [`TypeSystem`], validating as it goes. Built-in scalars are
/// pre-registered; everything defined through the builder is
/// source-defined.
pub struct TypeSystemBuilder {
    types: IndexMap<String, TypeEntry>,
}

impl Default for TypeSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeSystemBuilder {
    pub fn new() -> Self {
        let mut builder = TypeSystemBuilder {
            types: IndexMap::new(),
        };
        for name in BUILTIN_SCALARS {
            // Infallible: the names are distinct and non-empty.
            let _ = builder.insert(NamedType::Scalar(ScalarType { name: name.into() }), false);
        }
        builder
    }

    pub fn define_scalar(&mut self, name: &str) -> Result<(), SchemaError> {
        self.insert(NamedType::Scalar(ScalarType { name: name.into() }), true)
    }

    pub fn define_object(&mut self, name: &str, fields: &[(&str, TypeRef)]) -> Result<(), SchemaError> {
        self.insert(
            NamedType::Object(ObjectType {
                name: name.into(),
                fields: to_field_map(fields),
            }),
            true,
        )
    }

    pub fn define_interface(
        &mut self,
        name: &str,
        fields: &[(&str, TypeRef)],
        resolver: Option<TypeResolver>,
    ) -> Result<(), SchemaError> {
        self.insert(
            NamedType::Abstract(AbstractType {
                name: name.into(),
                kind: AbstractKind::Interface,
                fields: to_field_map(fields),
                resolver,
            }),
            true,
        )
    }

    pub fn define_union(&mut self, name: &str, resolver: Option<TypeResolver>) -> Result<(), SchemaError> {
        self.insert(
            NamedType::Abstract(AbstractType {
                name: name.into(),
                kind: AbstractKind::Union,
                fields: FieldMap::new(),
                resolver,
            }),
            true,
        )
    }

    pub fn define_input_object(
        &mut self,
        name: &str,
        fields: &[(&str, TypeRef)],
    ) -> Result<(), SchemaError> {
        self.insert(
            NamedType::InputObject(InputObjectType {
                name: name.into(),
                fields: to_field_map(fields),
            }),
            true,
        )
    }

    fn insert(&mut self, ty: NamedType, source_defined: bool) -> Result<(), SchemaError> {
        let name: String = ty.name().clone();
        if name.trim().is_empty() {
            return Err(SchemaError::InvalidName(name));
        }
        if self.types.contains_key(name.as_ref()) {
            return Err(SchemaError::DuplicateType(name));
        }
        self.types.insert(
            name,
            TypeEntry {
                ty: Rc::new(ty),
                source_defined,
            },
        );
        Ok(())
    }

    /// Finalizes the catalog. Every field's underlying named type must be
    /// declared; dangling references fail here instead of at annotation
    /// time.
    pub fn build(self) -> Result<TypeSystem, SchemaError> {
        for entry in self.types.values() {
            let fields = match entry.ty.as_ref() {
                NamedType::Object(o) => &o.fields,
                NamedType::Abstract(a) => &a.fields,
                NamedType::InputObject(i) => &i.fields,
                NamedType::Scalar(_) => continue,
            };
            for (field, ty) in fields.iter() {
                let referenced = ty.named_type();
                if !self.types.contains_key(referenced) {
                    return Err(SchemaError::UnknownFieldType {
                        declaring_type: entry.ty.name().clone(),
                        field: field.clone(),
                        referenced: referenced.into(),
                    });
                }
            }
        }
        Ok(TypeSystem { types: self.types })
    }
}

fn to_field_map(fields: &[(&str, TypeRef)]) -> FieldMap {
    fields
        .iter()
        .map(|(name, ty)| (String::from(*name), ty.clone()))
        .collect()
}

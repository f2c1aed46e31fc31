// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Farm schema and fixture data shared by the annotator tests.

use std::rc::Rc;

use chrono::Utc;
use serde_json::json;

use crate::schema::{TypeRef, TypeResolution, TypeResolver, TypeSystem};
use crate::Value;

/// Controls how the `Animal` interface resolves, to exercise the resolver
/// error paths.
pub enum AnimalResolver {
    Sync,
    Deferred,
    Missing,
}

pub fn farm_schema() -> TypeSystem {
    farm_schema_with(AnimalResolver::Sync)
}

pub fn farm_schema_with(animal: AnimalResolver) -> TypeSystem {
    let mut builder = TypeSystem::builder();
    builder.define_scalar("DateTime").unwrap();
    builder.define_scalar("JSONObject").unwrap();
    builder
        .define_object(
            "Building",
            &[
                ("id", TypeRef::non_null(TypeRef::named("ID"))),
                ("description", TypeRef::named("String")),
                ("cost", TypeRef::named("Int")),
            ],
        )
        .unwrap();
    builder
        .define_object(
            "Equipment",
            &[
                ("id", TypeRef::non_null(TypeRef::named("ID"))),
                ("brand", TypeRef::named("String")),
                ("type", TypeRef::named("String")),
                ("purchasedOn", TypeRef::named("DateTime")),
                ("info", TypeRef::named("JSONObject")),
            ],
        )
        .unwrap();
    builder
        .define_object(
            "Chicken",
            &[
                ("id", TypeRef::non_null(TypeRef::named("ID"))),
                ("name", TypeRef::named("String")),
                ("cost", TypeRef::named("Int")),
                ("feedRequirements", TypeRef::named("Int")),
                ("eggOutput", TypeRef::named("Int")),
            ],
        )
        .unwrap();
    builder
        .define_object(
            "Cow",
            &[
                ("id", TypeRef::non_null(TypeRef::named("ID"))),
                ("name", TypeRef::named("String")),
                ("cost", TypeRef::named("Int")),
                ("hayRequirements", TypeRef::named("Int")),
                ("milkOutput", TypeRef::named("Int")),
            ],
        )
        .unwrap();

    let animal_resolver: Option<TypeResolver> = match animal {
        AnimalResolver::Sync => Some(Rc::new(|animal: &Value| {
            let Value::Object(props) = animal else {
                return TypeResolution::Unresolved;
            };
            if props.contains_key("hayRequirements") || props.contains_key("milkOutput") {
                return TypeResolution::Name("Cow".into());
            }
            if props.contains_key("eggOutput") || props.contains_key("feedRequirements") {
                return TypeResolution::Name("Chicken".into());
            }
            TypeResolution::Unresolved
        })),
        AnimalResolver::Deferred => Some(Rc::new(|_: &Value| TypeResolution::Deferred)),
        AnimalResolver::Missing => None,
    };
    builder
        .define_interface(
            "Animal",
            &[
                ("id", TypeRef::non_null(TypeRef::named("ID"))),
                ("name", TypeRef::named("String")),
                ("cost", TypeRef::named("Int")),
            ],
            animal_resolver,
        )
        .unwrap();
    builder
        .define_union(
            "Asset",
            Some(Rc::new(|asset: &Value| {
                let Value::Object(props) = asset else {
                    return TypeResolution::Unresolved;
                };
                if props.contains_key("brand") {
                    TypeResolution::Name("Equipment".into())
                } else if props.contains_key("description") {
                    TypeResolution::Name("Building".into())
                } else {
                    TypeResolution::Unresolved
                }
            })),
        )
        .unwrap();
    builder
        .define_object(
            "Farm",
            &[
                ("id", TypeRef::non_null(TypeRef::named("ID"))),
                ("name", TypeRef::named("String")),
                ("buildings", TypeRef::list(TypeRef::named("Building"))),
                ("equipment", TypeRef::list(TypeRef::named("Equipment"))),
                ("animals", TypeRef::list(TypeRef::named("Animal"))),
                ("assets", TypeRef::list(TypeRef::named("Asset"))),
            ],
        )
        .unwrap();
    builder
        .define_input_object(
            "FarmInput",
            &[
                ("id", TypeRef::non_null(TypeRef::named("ID"))),
                ("name", TypeRef::named("String")),
            ],
        )
        .unwrap();
    builder.build().unwrap()
}

pub fn val(json: serde_json::Value) -> Value {
    serde_json::from_value(json).unwrap()
}

pub fn chicken() -> Value {
    val(json!({
        "id": 1,
        "name": "Henrieta",
        "cost": 45,
        "feedRequirements": 45,
        "eggOutput": 30,
    }))
}

pub fn cow() -> Value {
    val(json!({
        "id": 2,
        "name": "Moophy",
        "cost": 1200,
        "hayRequirements": 200,
        "milkOutput": 500,
    }))
}

pub fn tractor() -> Value {
    let mut tractor = val(json!({
        "id": 1,
        "brand": "John Deer",
        "type": "Tractor",
    }));
    tractor
        .as_object_mut()
        .unwrap()
        .insert("purchasedOn".into(), Value::Timestamp(Utc::now()));
    tractor
}

pub fn house() -> Value {
    val(json!({
        "id": 1,
        "description": "The house",
        "cost": 400000,
    }))
}

pub fn barn() -> Value {
    val(json!({
        "id": 2,
        "description": "Barn",
        "cost": 100000,
    }))
}

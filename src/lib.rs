// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod annotate;
mod number;
mod value;

pub mod schema;

pub use annotate::error::AnnotateError;
pub use annotate::{annotate, annotate_with_context, find_candidates, TYPENAME_KEY};
pub use number::Number;
pub use value::Value;

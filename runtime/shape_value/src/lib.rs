//! Shape Value - runtime values for the shape matcher.
//!
//! This crate provides:
//! - Identifiers (`Name`) for bindings, fields and type names
//! - Runtime values (`Value`, `ObjectValue`, `Heap`)
//! - Declared types (`TypeDecl`, `TypeDef`, `TypeRef`) and the registry that
//!   owns them (`TypeRegistry`, `SharedTypeRegistry`)
//! - The constructor schema capability (`SchemaProvider`) consulted by class
//!   patterns that have no extractor
//!
//! # Heap Enforcement
//!
//! All heap allocations go through `Value::` factory methods or
//! `TypeRef::construct`. `Heap<T>` has a crate-private constructor, so
//! callers cannot build shared payloads by hand.

mod heap;
mod name;
mod types;
mod value;

pub use heap::Heap;
pub use name::Name;
pub use types::{
    DeclaredSchema, DefineError, InitHook, SchemaProvider, SharedSchemaProvider,
    SharedTypeRegistry, TypeDecl, TypeDef, TypeRef, TypeRegistry,
};
pub use value::{Attributes, ObjectValue, Value};

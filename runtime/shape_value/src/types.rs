//! Declared types and their constructor schemas.
//!
//! A declared type is the Rust rendition of a case class: a name, an ordered
//! list of constructor fields, an optional parent and an optional init hook.
//! The ordered field list is the *constructor schema* that class patterns
//! fall back to when no extractor is registered for their target.
//!
//! Nested declarations (a `List` family with `Nil` and `Cons(head, tail)`)
//! are expressed with [`TypeDecl::parent`]: every variant of a family is an
//! instance of the family's root type.
//!
//! # Schema Caveat
//!
//! Class matching reads positional sub-patterns off the attribute whose name
//! equals the declared field name. `construct` stores fields that way, but an
//! init hook is free to move them. Matching against such a type reads the
//! wrong attribute or fails; this is a documented limitation, not a contract.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::name::Name;
use crate::value::{Attributes, ObjectValue, Value};

/// Runs after the declared fields are stored, like statements in a
/// constructor body. May add derived attributes or rename stored ones.
pub type InitHook = fn(&mut Attributes);

/// Errors from declaring, constructing or copying declared types.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefineError {
    #[error("type `{0}` is already defined")]
    DuplicateType(Name),
    #[error("type `{type_name}` declares field `{field}` more than once")]
    DuplicateField { type_name: Name, field: Name },
    #[error("type `{type_name}` names unknown parent `{parent}`")]
    UnknownParent { type_name: Name, parent: Name },
    #[error("{type_name} expects {expected} field(s), got {got}")]
    ArityMismatch {
        type_name: Name,
        expected: usize,
        got: usize,
    },
    #[error("{type_name} has no field `{field}`")]
    UnknownField { type_name: Name, field: Name },
    #[error("{type_name} instance has no attribute `{field}`")]
    MissingAttribute { type_name: Name, field: Name },
}

/// Declaration of a type, consumed by [`TypeRegistry::define`].
#[derive(Clone, Debug)]
pub struct TypeDecl {
    name: Name,
    fields: Vec<Name>,
    parent: Option<Name>,
    init: Option<InitHook>,
}

impl TypeDecl {
    pub fn new(name: impl Into<Name>) -> Self {
        TypeDecl {
            name: name.into(),
            fields: Vec::new(),
            parent: None,
            init: None,
        }
    }

    /// Ordered constructor fields.
    #[must_use]
    pub fn fields<I, N>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Make this type a variant of an already-defined type.
    #[must_use]
    pub fn parent(mut self, parent: impl Into<Name>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn init(mut self, hook: InitHook) -> Self {
        self.init = Some(hook);
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }
}

/// A defined type. Immutable once registered.
pub struct TypeDef {
    name: Name,
    fields: Arc<[Name]>,
    parent: Option<TypeRef>,
    init: Option<InitHook>,
}

impl TypeDef {
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Declared constructor fields, in order.
    pub fn fields(&self) -> &Arc<[Name]> {
        &self.fields
    }

    pub fn parent(&self) -> Option<&TypeRef> {
        self.parent.as_ref()
    }

    /// Returns `true` if `ancestor` is this type or one of its parents.
    pub fn is_subtype_of(&self, ancestor: &TypeDef) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if std::ptr::eq(ty, ancestor) {
                return true;
            }
            current = ty.parent.as_deref();
        }
        false
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDef")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .finish_non_exhaustive()
    }
}

/// Shared handle to a [`TypeDef`]. Equality is identity.
#[derive(Clone)]
pub struct TypeRef(Arc<TypeDef>);

impl TypeRef {
    /// Construct an instance from positional field values.
    ///
    /// Stores field `i` under the attribute named by declared field `i`, then
    /// runs the init hook.
    pub fn construct(&self, args: Vec<Value>) -> Result<Value, DefineError> {
        if args.len() != self.fields.len() {
            return Err(DefineError::ArityMismatch {
                type_name: self.name.clone(),
                expected: self.fields.len(),
                got: args.len(),
            });
        }
        let mut attrs = Attributes::new();
        for (field, value) in self.fields.iter().zip(args) {
            attrs.insert(field.clone(), value);
        }
        if let Some(init) = self.init {
            init(&mut attrs);
        }
        tracing::trace!(type_name = %self.name, "constructed instance");
        Ok(Value::Object(ObjectValue::new(self.clone(), attrs)))
    }
}

impl Deref for TypeRef {
    type Target = TypeDef;

    #[inline]
    fn deref(&self) -> &TypeDef {
        &self.0
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.0.name)
    }
}

// Schema providers

/// Supplies the ordered constructor field names of a type.
///
/// Consulted by class patterns only when no extractor is registered for the
/// pattern's target.
pub trait SchemaProvider: Send + Sync {
    fn field_names_for(&self, ty: &TypeRef) -> Option<Arc<[Name]>>;
}

/// Shared, thread-safe schema provider.
pub type SharedSchemaProvider = Arc<dyn SchemaProvider>;

/// Reads the schema straight off the type definition.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclaredSchema;

impl SchemaProvider for DeclaredSchema {
    fn field_names_for(&self, ty: &TypeRef) -> Option<Arc<[Name]>> {
        Some(Arc::clone(ty.fields()))
    }
}

// Registry

/// Owns the declared types of one program, keyed by name.
#[derive(Default)]
pub struct TypeRegistry {
    types: FxHashMap<Name, TypeRef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a type.
    pub fn define(&mut self, decl: TypeDecl) -> Result<TypeRef, DefineError> {
        self.check_decl(&decl)?;
        let parent = match &decl.parent {
            Some(parent) => Some(self.types.get(parent.as_str()).cloned().ok_or_else(|| {
                DefineError::UnknownParent {
                    type_name: decl.name.clone(),
                    parent: parent.clone(),
                }
            })?),
            None => None,
        };
        let def = TypeRef(Arc::new(TypeDef {
            name: decl.name.clone(),
            fields: decl.fields.into(),
            parent,
            init: decl.init,
        }));
        tracing::debug!(type_name = %def.name, fields = def.fields.len(), "defined type");
        self.types.insert(decl.name, def.clone());
        Ok(def)
    }

    /// Define a root type and its variants in one step.
    ///
    /// Every variant gets `root` as its parent. Nothing is registered if any
    /// declaration is invalid. Returns the root followed by the variants.
    pub fn define_family<I>(
        &mut self,
        root: TypeDecl,
        variants: I,
    ) -> Result<Vec<TypeRef>, DefineError>
    where
        I: IntoIterator<Item = TypeDecl>,
    {
        let variants: Vec<TypeDecl> = variants
            .into_iter()
            .map(|v| v.parent(root.name.clone()))
            .collect();

        let mut seen = FxHashSet::default();
        for decl in std::iter::once(&root).chain(&variants) {
            if !seen.insert(decl.name.clone()) {
                return Err(DefineError::DuplicateType(decl.name.clone()));
            }
            self.check_decl(decl)?;
        }
        if let Some(parent) = &root.parent {
            if !self.types.contains_key(parent.as_str()) {
                return Err(DefineError::UnknownParent {
                    type_name: root.name.clone(),
                    parent: parent.clone(),
                });
            }
        }

        let mut defined = Vec::with_capacity(variants.len() + 1);
        defined.push(self.define(root)?);
        for decl in variants {
            defined.push(self.define(decl)?);
        }
        Ok(defined)
    }

    pub fn get(&self, name: &str) -> Option<TypeRef> {
        self.types.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn check_decl(&self, decl: &TypeDecl) -> Result<(), DefineError> {
        if self.types.contains_key(decl.name.as_str()) {
            return Err(DefineError::DuplicateType(decl.name.clone()));
        }
        let mut seen = FxHashSet::default();
        for field in &decl.fields {
            if !seen.insert(field) {
                return Err(DefineError::DuplicateField {
                    type_name: decl.name.clone(),
                    field: field.clone(),
                });
            }
        }
        Ok(())
    }
}

impl SchemaProvider for TypeRegistry {
    /// Schemas of types registered here; `None` for foreign types.
    fn field_names_for(&self, ty: &TypeRef) -> Option<Arc<[Name]>> {
        self.types
            .get(ty.name().as_str())
            .filter(|registered| *registered == ty)
            .map(|registered| Arc::clone(registered.fields()))
    }
}

/// A [`TypeRegistry`] shared between threads.
#[derive(Clone, Default)]
pub struct SharedTypeRegistry(Arc<RwLock<TypeRegistry>>);

impl SharedTypeRegistry {
    pub fn new(registry: TypeRegistry) -> Self {
        SharedTypeRegistry(Arc::new(RwLock::new(registry)))
    }

    pub fn define(&self, decl: TypeDecl) -> Result<TypeRef, DefineError> {
        self.0.write().define(decl)
    }

    pub fn define_family<I>(
        &self,
        root: TypeDecl,
        variants: I,
    ) -> Result<Vec<TypeRef>, DefineError>
    where
        I: IntoIterator<Item = TypeDecl>,
    {
        self.0.write().define_family(root, variants)
    }

    pub fn get(&self, name: &str) -> Option<TypeRef> {
        self.0.read().get(name)
    }
}

impl SchemaProvider for SharedTypeRegistry {
    fn field_names_for(&self, ty: &TypeRef) -> Option<Arc<[Name]>> {
        self.0.read().field_names_for(ty)
    }
}

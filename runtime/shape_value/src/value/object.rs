//! Instances of declared types.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use crate::heap::Heap;
use crate::name::Name;
use crate::types::{DefineError, TypeDef, TypeRef};

use super::Value;

/// Attribute storage of an object.
///
/// Filled by `TypeRef::construct` with one entry per declared field, then
/// handed to the type's init hook, which may add derived attributes or store
/// fields under other names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    values: FxHashMap<Name, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Set an attribute, returning the previous value.
    pub fn insert(&mut self, name: impl Into<Name>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.values.iter()
    }

    fn drain_values(&mut self) -> impl Iterator<Item = Value> + '_ {
        self.values.drain().map(|(_, value)| value)
    }
}

/// An instance of a declared type.
#[derive(Clone)]
pub struct ObjectValue {
    ty: TypeRef,
    attrs: Heap<Attributes>,
}

impl ObjectValue {
    pub(crate) fn new(ty: TypeRef, attrs: Attributes) -> Self {
        ObjectValue {
            ty,
            attrs: Heap::new(attrs),
        }
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    pub fn type_name(&self) -> &Name {
        self.ty.name()
    }

    /// Read an attribute by name.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    /// Returns `true` if this object's type is `ty` or declares it as an ancestor.
    pub fn is_instance_of(&self, ty: &TypeDef) -> bool {
        self.ty.is_subtype_of(ty)
    }

    /// Rebuild the object through its constructor with some fields replaced.
    ///
    /// Declared fields not named in `overrides` keep their current values.
    /// The init hook runs again on the new object.
    pub fn copy_with<I, N>(&self, overrides: I) -> Result<Value, DefineError>
    where
        I: IntoIterator<Item = (N, Value)>,
        N: Into<Name>,
    {
        let fields = self.ty.fields();
        let mut args = Vec::with_capacity(fields.len());
        for field in fields.iter() {
            let current = self
                .get_attr(field.as_str())
                .ok_or_else(|| DefineError::MissingAttribute {
                    type_name: self.type_name().clone(),
                    field: field.clone(),
                })?;
            args.push(current.clone());
        }
        for (name, value) in overrides {
            let name = name.into();
            let index = fields.iter().position(|f| *f == name).ok_or_else(|| {
                DefineError::UnknownField {
                    type_name: self.type_name().clone(),
                    field: name.clone(),
                }
            })?;
            args[index] = value;
        }
        self.ty.construct(args)
    }
}

// Tear down uniquely owned children iteratively. A long `Cons` chain would
// otherwise drop one nested `ObjectValue` per stack frame.
impl Drop for ObjectValue {
    fn drop(&mut self) {
        let Some(attrs) = Heap::get_mut(&mut self.attrs) else {
            return;
        };
        let mut pending: Vec<Value> = attrs.drain_values().collect();
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::Object(obj) => {
                    if let Some(attrs) = Heap::get_mut(&mut obj.attrs) {
                        pending.extend(attrs.drain_values());
                    }
                }
                Value::List(items) | Value::Tuple(items) => {
                    if let Some(items) = Heap::get_mut(items) {
                        pending.append(items);
                    }
                }
                _ => {}
            }
            // `value` now owns no children, so dropping it is shallow.
        }
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.attrs == other.attrs
    }
}

impl Eq for ObjectValue {}

impl Hash for ObjectValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.name().hash(state);
        // Declared fields only: attribute map iteration order is unspecified.
        for field in self.ty.fields().iter() {
            self.get_attr(field.as_str()).hash(state);
        }
    }
}

impl fmt::Display for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name())?;
        for (i, field) in self.ty.fields().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.get_attr(field.as_str()) {
                Some(value) => write!(f, "{value}")?,
                None => write!(f, "<{field}?>")?,
            }
        }
        write!(f, ")")
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValue")
            .field("type", self.type_name())
            .field("attrs", &*self.attrs)
            .finish()
    }
}

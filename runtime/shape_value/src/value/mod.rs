//! Runtime values matched by patterns.
//!
//! # Heap Enforcement
//!
//! ```text
//! let s = Value::string("hello");           // OK
//! let list = Value::list(vec![]);           // OK
//! let p = point.construct(vec![x, y])?;     // OK, via TypeRef
//! let s = Value::Str(Heap::new(...));       // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Recursion
//!
//! Equality, hashing and rendering recurse once per level of the *data*.
//! A runtime-built `Cons` chain can be arbitrarily long, so each level goes
//! through `ensure_sufficient_stack`.

mod object;

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use shape_stack::ensure_sufficient_stack;

use crate::heap::Heap;
use crate::types::TypeDef;

pub use object::{Attributes, ObjectValue};

/// A dynamically-shaped runtime value.
#[derive(Clone)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    ///
    /// Compared and hashed by bit pattern: `NaN` equals itself and
    /// `0.0` differs from `-0.0`.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Character value.
    Char(char),
    /// Unit value.
    Void,
    /// Absent value.
    None,

    // Heap Types (use Heap<T> for enforced Arc usage)
    /// String value.
    Str(Heap<String>),
    /// Growable ordered sequence.
    List(Heap<Vec<Value>>),
    /// Fixed ordered sequence.
    Tuple(Heap<Vec<Value>>),

    /// Instance of a declared type.
    Object(ObjectValue),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }
}

// Accessors

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Elements of a `List` or `Tuple`.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns `true` if this is an object whose type is `ty` or a variant of it.
    pub fn is_instance_of(&self, ty: &TypeDef) -> bool {
        self.as_object().is_some_and(|obj| obj.is_instance_of(ty))
    }

    /// Name of the value's runtime type, for diagnostics.
    pub fn type_name(&self) -> Cow<'_, str> {
        match self {
            Value::Int(_) => Cow::Borrowed("int"),
            Value::Float(_) => Cow::Borrowed("float"),
            Value::Bool(_) => Cow::Borrowed("bool"),
            Value::Char(_) => Cow::Borrowed("char"),
            Value::Void => Cow::Borrowed("void"),
            Value::None => Cow::Borrowed("none"),
            Value::Str(_) => Cow::Borrowed("str"),
            Value::List(_) => Cow::Borrowed("list"),
            Value::Tuple(_) => Cow::Borrowed("tuple"),
            Value::Object(obj) => Cow::Borrowed(obj.type_name().as_str()),
        }
    }
}

// Trait Implementations

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Void, Value::Void) | (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        })
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        ensure_sufficient_stack(|| match self {
            Value::Int(n) => n.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::Void | Value::None => {}
            Value::Str(s) => s.hash(state),
            Value::List(items) | Value::Tuple(items) => {
                for item in items.iter() {
                    item.hash(state);
                }
            }
            Value::Object(obj) => obj.hash(state),
        });
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Void => write!(f, "Void"),
            Value::None => write!(f, "None"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Tuple(items) => write!(f, "Tuple({:?})", &**items),
            Value::Object(obj) => write!(f, "Object({obj})"),
        })
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::Void => write!(f, "void"),
            Value::None => write!(f, "None"),
            Value::Str(s) => write!(f, "\"{}\"", s.as_str()),
            Value::List(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Object(obj) => write!(f, "{obj}"),
        })
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

//! Pattern descriptions, as produced by the syntax layer.

use std::fmt;

use shape_value::{Name, TypeRef, TypeRegistry, Value};

use crate::extract::{Extractor, ExtractorRegistry};

/// What a class pattern destructures against.
#[derive(Clone, Debug)]
pub enum Target {
    /// Custom extraction; the candidate's own type is not checked.
    Extractor(Extractor),
    /// Declared type; instance check, then fields by constructor schema.
    Type(TypeRef),
}

impl Target {
    /// Resolve a written target name.
    ///
    /// An extractor registered under `name` takes precedence over a declared
    /// type of the same name.
    pub fn resolve(
        name: &str,
        extractors: &ExtractorRegistry,
        types: &TypeRegistry,
    ) -> Option<Target> {
        extractors
            .get(name)
            .map(Target::Extractor)
            .or_else(|| types.get(name).map(Target::Type))
    }

    pub fn name(&self) -> &Name {
        match self {
            Target::Extractor(extractor) => extractor.name(),
            Target::Type(ty) => ty.name(),
        }
    }
}

impl From<Extractor> for Target {
    fn from(extractor: Extractor) -> Self {
        Target::Extractor(extractor)
    }
}

impl From<TypeRef> for Target {
    fn from(ty: TypeRef) -> Self {
        Target::Type(ty)
    }
}

impl From<&TypeRef> for Target {
    fn from(ty: &TypeRef) -> Self {
        Target::Type(ty.clone())
    }
}

/// A class pattern: `Target(p1, p2, field=p3)`.
#[derive(Clone, Debug)]
pub struct ClassPattern {
    pub target: Target,
    pub positional: Vec<Pattern>,
    pub keywords: Vec<(Name, Pattern)>,
}

/// Declarative description of an expected value shape.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// `_`: matches anything, binds nothing.
    Wildcard,
    /// Matches a structurally equal value.
    Literal(Value),
    /// Matches anything and binds it.
    ///
    /// The name `_` is the exception: it builds the wildcard matcher and
    /// binds nothing.
    Name(Name),
    /// `name @ pattern`: binds the whole value once `pattern` matches.
    Alias(Name, Box<Pattern>),
    /// Fixed-arity list or tuple.
    Sequence(Vec<Pattern>),
    /// Constructed value, destructured by extractor or declared schema.
    Class(ClassPattern),
}

impl Pattern {
    pub fn lit(value: Value) -> Self {
        Pattern::Literal(value)
    }

    pub fn name(name: impl Into<Name>) -> Self {
        Pattern::Name(name.into())
    }

    pub fn alias(name: impl Into<Name>, inner: Pattern) -> Self {
        Pattern::Alias(name.into(), Box::new(inner))
    }

    pub fn seq(items: Vec<Pattern>) -> Self {
        Pattern::Sequence(items)
    }

    /// Class pattern with positional sub-patterns only.
    pub fn class(target: impl Into<Target>, positional: Vec<Pattern>) -> Self {
        Pattern::Class(ClassPattern {
            target: target.into(),
            positional,
            keywords: Vec::new(),
        })
    }

    /// Add a keyword sub-pattern to a class pattern.
    ///
    /// Only class patterns take keywords. Debug builds panic on any other
    /// pattern; release builds return it unchanged.
    #[must_use]
    pub fn with_keyword(mut self, field: impl Into<Name>, pattern: Pattern) -> Self {
        debug_assert!(
            matches!(self, Pattern::Class(_)),
            "keyword sub-pattern on non-class pattern `{self}`"
        );
        if let Pattern::Class(class) = &mut self {
            class.keywords.push((field.into(), pattern));
        }
        self
    }

    /// Depth of the pattern tree; bounds matcher recursion.
    pub fn depth(&self) -> usize {
        match self {
            Pattern::Wildcard | Pattern::Literal(_) | Pattern::Name(_) => 1,
            Pattern::Alias(_, inner) => 1 + inner.depth(),
            Pattern::Sequence(items) => 1 + items.iter().map(Pattern::depth).max().unwrap_or(0),
            Pattern::Class(class) => {
                let sub = class
                    .positional
                    .iter()
                    .chain(class.keywords.iter().map(|(_, p)| p))
                    .map(Pattern::depth)
                    .max()
                    .unwrap_or(0);
                1 + sub
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => write!(f, "_"),
            Pattern::Literal(value) => write!(f, "{value}"),
            Pattern::Name(name) => write!(f, "{name}"),
            Pattern::Alias(name, inner) => write!(f, "{name} @ {inner}"),
            Pattern::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Pattern::Class(class) => {
                write!(f, "{}(", class.target.name())?;
                let keywords = class
                    .keywords
                    .iter()
                    .map(|(name, p)| (Some(name), p));
                let all = class.positional.iter().map(|p| (None, p)).chain(keywords);
                for (i, (name, p)) in all.enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(name) = name {
                        write!(f, "{name}=")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")")
            }
        }
    }
}

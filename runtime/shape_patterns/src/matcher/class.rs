//! Class matching: destructure a constructed value into fields.
//!
//! Two paths, chosen by the pattern's target:
//!
//! 1. **Extractor**: the registered function decides whether the candidate
//!    is accepted and which fields it yields. No type check happens, so the
//!    candidate may be of any type.
//! 2. **Declared type**: the candidate must be an instance of the target
//!    type (or one of its variants). Positional sub-pattern `i` reads the
//!    attribute named by field `i` of the constructor schema; keyword
//!    sub-patterns read the attribute of their own name.
//!
//! Path 2 assumes the constructor stored each declared field under its own
//! name. Types whose init hook renames fields will not match as written.

use std::fmt;

use shape_value::{Name, ObjectValue, SharedSchemaProvider, TypeRef, Value};

use super::{Matcher, Mismatch, SharedMatcher};
use crate::bindings::Bindings;
use crate::extract::Extractor;
use crate::pattern::Target;

/// Matches sub-matchers against fields of a constructed value.
pub struct ClassMatcher {
    target: Target,
    positional: Vec<SharedMatcher>,
    keywords: Vec<(Name, SharedMatcher)>,
    /// Keyword field names, passed to extractors.
    requested: Box<[Name]>,
    schemas: SharedSchemaProvider,
}

impl ClassMatcher {
    pub fn new(
        target: Target,
        positional: Vec<SharedMatcher>,
        keywords: Vec<(Name, SharedMatcher)>,
        schemas: SharedSchemaProvider,
    ) -> Self {
        let requested = keywords.iter().map(|(name, _)| name.clone()).collect();
        ClassMatcher {
            target,
            positional,
            keywords,
            requested,
            schemas,
        }
    }

    fn match_extracted(
        &self,
        extractor: &Extractor,
        value: &Value,
        bindings: &mut Bindings,
    ) -> Result<(), Mismatch> {
        let Some(extracted) = extractor.extract(value, &self.requested) else {
            tracing::trace!(class = %extractor.name(), got = %value, "extractor rejected value");
            return Err(Mismatch);
        };
        if extracted.positional.len() < self.positional.len() {
            tracing::trace!(
                class = %extractor.name(),
                expected = self.positional.len(),
                got = extracted.positional.len(),
                "extractor yielded too few positional fields"
            );
            return Err(Mismatch);
        }
        for (matcher, field) in self.positional.iter().zip(&extracted.positional) {
            matcher.match_into(field, bindings)?;
        }
        for (name, matcher) in &self.keywords {
            let Some(field) = extracted.keywords.get(name) else {
                tracing::trace!(class = %extractor.name(), field = %name, "extractor omitted keyword field");
                return Err(Mismatch);
            };
            matcher.match_into(field, bindings)?;
        }
        Ok(())
    }

    fn match_declared(
        &self,
        ty: &TypeRef,
        value: &Value,
        bindings: &mut Bindings,
    ) -> Result<(), Mismatch> {
        let Some(object) = value.as_object().filter(|obj| obj.is_instance_of(ty)) else {
            tracing::trace!(class = %ty.name(), got = %value.type_name(), "not an instance");
            return Err(Mismatch);
        };
        if !self.positional.is_empty() {
            let Some(fields) = self.schemas.field_names_for(ty) else {
                tracing::debug!(class = %ty.name(), "no constructor schema for type");
                return Err(Mismatch);
            };
            if self.positional.len() > fields.len() {
                tracing::trace!(
                    class = %ty.name(),
                    expected = self.positional.len(),
                    declared = fields.len(),
                    "more positional sub-patterns than declared fields"
                );
                return Err(Mismatch);
            }
            for (matcher, field) in self.positional.iter().zip(fields.iter()) {
                matcher.match_into(read_attr(object, field)?, bindings)?;
            }
        }
        for (name, matcher) in &self.keywords {
            matcher.match_into(read_attr(object, name)?, bindings)?;
        }
        Ok(())
    }
}

fn read_attr<'a>(object: &'a ObjectValue, field: &Name) -> Result<&'a Value, Mismatch> {
    object.get_attr(field.as_str()).ok_or_else(|| {
        tracing::trace!(class = %object.type_name(), field = %field, "missing attribute");
        Mismatch
    })
}

impl Matcher for ClassMatcher {
    fn match_into(&self, value: &Value, bindings: &mut Bindings) -> Result<(), Mismatch> {
        match &self.target {
            Target::Extractor(extractor) => self.match_extracted(extractor, value, bindings),
            Target::Type(ty) => self.match_declared(ty, value, bindings),
        }
    }
}

impl fmt::Debug for ClassMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassMatcher")
            .field("target", &self.target)
            .field("positional", &self.positional)
            .field("keywords", &self.keywords)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

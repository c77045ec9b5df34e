//! Variable scopes that receive match bindings.
//!
//! Uses a scope stack (not cloning). A switch body runs in a pushed scope
//! holding its branch's bindings; a patterns block defines its bindings in
//! the scope that is current when the block runs.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use shape_patterns::Bindings;
use shape_value::{Name, Value};

/// Single-threaded shared scope handle.
///
/// Scopes are owned by one evaluation; matchers are the part that is shared
/// across threads, not environments.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

/// A single scope containing variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Define a variable in this scope, shadowing any outer one.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }
}

/// Scope stack with a global scope at the bottom.
pub struct Environment {
    scopes: Vec<LocalScope<Scope>>,
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope().clone();
        self.scopes
            .push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    fn current_scope(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global)
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.current_scope().borrow_mut().define(name, value);
    }

    /// Define every binding of a successful match in the current scope.
    pub fn define_all(&mut self, bindings: Bindings) {
        let mut scope = self.current_scope().borrow_mut();
        for (name, value) in bindings {
            scope.define(name, value);
        }
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current_scope().borrow().lookup(name)
    }

    /// Push a scope that is popped when the guard drops, even on unwind.
    pub fn scoped(&mut self) -> ScopedEnvironment<'_> {
        self.push_scope();
        ScopedEnvironment { env: self }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`Environment::scoped`].
pub struct ScopedEnvironment<'env> {
    env: &'env mut Environment,
}

impl Drop for ScopedEnvironment<'_> {
    fn drop(&mut self) {
        self.env.pop_scope();
    }
}

impl Deref for ScopedEnvironment<'_> {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        self.env
    }
}

impl DerefMut for ScopedEnvironment<'_> {
    fn deref_mut(&mut self) -> &mut Environment {
        self.env
    }
}

#[cfg(test)]
mod tests;

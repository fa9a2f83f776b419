use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;

/// A lexical binding environment with an optional parent.
///
/// A scope maps names to bindings in insertion order and chains to the scope
/// it was opened inside of. Scopes are shared handles: cloning a `Scope`
/// clones the handle, not the bindings, so a closure or object value that
/// captures its defining scope observes later writes through it and keeps it
/// alive for as long as the value exists.
///
/// # Example
/// ```
/// use opal::interpreter::scope::Scope;
///
/// let outer = Scope::root();
/// outer.define("x", 1);
///
/// let inner = Scope::nested(&outer);
/// assert_eq!(inner.resolve("x", false), Some(1));
/// assert_eq!(inner.resolve("x", true), None);
///
/// assert!(inner.assign("x", 2));
/// assert_eq!(outer.resolve("x", true), Some(2));
/// ```
pub struct Scope<T> {
    inner: Rc<RefCell<Bindings<T>>>,
}

struct Bindings<T> {
    parent:  Option<Scope<T>>,
    entries: IndexMap<String, T>,
}

impl<T: Clone> Scope<T> {
    /// Creates a scope with no parent.
    #[must_use]
    pub fn root() -> Self {
        Self { inner: Rc::new(RefCell::new(Bindings { parent:  None,
                                                      entries: IndexMap::new(), })), }
    }

    /// Creates a child scope chained to `parent`.
    #[must_use]
    pub fn nested(parent: &Self) -> Self {
        Self { inner: Rc::new(RefCell::new(Bindings { parent:  Some(parent.clone()),
                                                      entries: IndexMap::new(), })), }
    }

    /// Looks up `name`, searching only this scope when `current_only` is
    /// true and walking the parent chain otherwise.
    #[must_use]
    pub fn resolve(&self, name: &str, current_only: bool) -> Option<T> {
        let bindings = self.inner.borrow();
        if let Some(value) = bindings.entries.get(name) {
            return Some(value.clone());
        }
        if current_only {
            return None;
        }
        bindings.parent.as_ref().and_then(|parent| parent.resolve(name, false))
    }

    /// Binds `name` in this scope.
    ///
    /// Callers are responsible for rejecting duplicates first; defining a
    /// name twice in the same scope violates the environment model.
    pub fn define(&self, name: impl Into<String>, value: T) {
        let name = name.into();
        let mut bindings = self.inner.borrow_mut();
        debug_assert!(!bindings.entries.contains_key(&name),
                      "'{name}' is already defined in this scope");
        bindings.entries.insert(name, value);
    }

    /// Writes `value` into the scope that owns `name`, walking the parent
    /// chain to find it. Returns false if the name is unbound everywhere.
    pub fn assign(&self, name: &str, value: T) -> bool {
        let mut bindings = self.inner.borrow_mut();
        if let Some(entry) = bindings.entries.get_mut(name) {
            *entry = value;
            return true;
        }
        match &bindings.parent {
            Some(parent) => parent.assign(name, value),
            None => false,
        }
    }

    /// Returns the binding names of this scope only, in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.inner.borrow().entries.keys().cloned().collect()
    }

    /// Returns true if both handles refer to the same scope.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for Scope<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

// Scopes can be cyclic through captured values, so the debug form stays
// shallow: binding names only, never binding values.
impl<T> fmt::Debug for Scope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.inner.borrow();
        f.debug_struct("Scope")
         .field("names", &bindings.entries.keys().collect::<Vec<_>>())
         .field("has_parent", &bindings.parent.is_some())
         .finish()
    }
}

//! Typed mapping — key/value store enforcing a key descriptor and a value
//! descriptor on every mutation. Keys are arbitrary values, so the backing
//! store is an association list searched by equality rather than a hash map.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::descriptor::TypeDescriptor;
use crate::error::{TypeError, TypeResult};
use crate::value::Value;
use crate::verify::verify_type;

#[derive(Debug)]
pub struct TypedMapping {
    key: TypeDescriptor,
    value: TypeDescriptor,
    entries: Rc<RefCell<Vec<(Value, Value)>>>,
}

impl TypedMapping {
    pub fn new(key: TypeDescriptor, value: TypeDescriptor) -> Rc<Self> {
        Self::with_backing(key, value, Rc::new(RefCell::new(Vec::new())))
    }

    /// Wrap an externally supplied backing store, shared rather than copied.
    pub fn with_backing(
        key: TypeDescriptor,
        value: TypeDescriptor,
        entries: Rc<RefCell<Vec<(Value, Value)>>>,
    ) -> Rc<Self> {
        Rc::new(Self { key, value, entries })
    }

    pub fn key_type(&self) -> &TypeDescriptor {
        &self.key
    }

    pub fn value_type(&self) -> &TypeDescriptor {
        &self.value
    }

    /// A mapping describes itself as a list of key/value pairs:
    /// `list[tuple[K, V]]`.
    pub fn describe(&self) -> TypeDescriptor {
        TypeDescriptor::list_of(TypeDescriptor::pair_of(self.key.clone(), self.value.clone()))
    }

    pub(crate) fn same_backing(a: &Rc<Self>, b: &Rc<Self>) -> bool {
        Rc::ptr_eq(a, b) || Rc::ptr_eq(&a.entries, &b.entries)
    }

    // ── Mutation — gated ─────────────────────────────────────────────────────

    /// Verify key then value; on success insert or replace the entry for an
    /// equal key. A failed insert leaves the mapping untouched.
    pub fn insert(&self, key: Value, value: Value) -> TypeResult<()> {
        verify_type(None, &key, &self.key)?;
        verify_type(None, &value, &self.value)?;
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
        Ok(())
    }

    /// Re-validate every pair of `other` through the normal `insert` path.
    /// No bulk bypass: a mismatching pair stops the merge at that pair.
    pub fn update(&self, other: &TypedMapping) -> TypeResult<()> {
        // Snapshot first — self and other may share a backing store.
        let pairs: Vec<(Value, Value)> = other.entries.borrow().clone();
        for (key, value) in pairs {
            self.insert(key, value)?;
        }
        Ok(())
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    /// Lookup verifies the *supplied* key against the key descriptor, then
    /// delegates to the backing store. The retrieved value is not re-checked.
    pub fn get(&self, key: &Value) -> TypeResult<Value> {
        verify_type(None, key, &self.key)?;
        self.entries
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| TypeError::MissingKey(key.to_string()))
    }

    pub fn contains_key(&self, key: &Value) -> TypeResult<bool> {
        verify_type(None, key, &self.key)?;
        Ok(self.entries.borrow().iter().any(|(k, _)| k == key))
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<Value> {
        self.entries.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.entries.borrow().clone()
    }
}

impl fmt::Display for TypedMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.entries.borrow().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

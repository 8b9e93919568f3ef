//! Typed list — a sequence enforcing one element descriptor on every
//! mutation. Reads never re-check; the mutation gate keeps the invariant.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::descriptor::TypeDescriptor;
use crate::error::{TypeError, TypeResult};
use crate::value::Value;
use crate::verify::verify_type;

#[derive(Debug)]
pub struct TypedList {
    element: TypeDescriptor,
    items: Rc<RefCell<Vec<Value>>>,
}

impl TypedList {
    pub fn new(element: TypeDescriptor) -> Rc<Self> {
        Self::with_backing(element, Rc::new(RefCell::new(Vec::new())))
    }

    /// Wrap an externally supplied backing store. Shared, not copied:
    /// mutations through the list are visible through `items` and vice versa.
    pub fn with_backing(element: TypeDescriptor, items: Rc<RefCell<Vec<Value>>>) -> Rc<Self> {
        Rc::new(Self { element, items })
    }

    pub fn element_type(&self) -> &TypeDescriptor {
        &self.element
    }

    pub fn describe(&self) -> TypeDescriptor {
        TypeDescriptor::list_of(self.element.clone())
    }

    pub(crate) fn same_backing(a: &Rc<Self>, b: &Rc<Self>) -> bool {
        Rc::ptr_eq(a, b) || Rc::ptr_eq(&a.items, &b.items)
    }

    // ── Mutation — gated ─────────────────────────────────────────────────────

    pub fn push(&self, value: Value) -> TypeResult<()> {
        verify_type(None, &value, &self.element)?;
        self.items.borrow_mut().push(value);
        Ok(())
    }

    /// Verify every element up front; a single mismatch rejects the whole
    /// batch and leaves the list unchanged.
    pub fn extend(&self, values: impl IntoIterator<Item = Value>) -> TypeResult<()> {
        let values: Vec<Value> = values.into_iter().collect();
        for value in &values {
            verify_type(None, value, &self.element)?;
        }
        self.items.borrow_mut().extend(values);
        Ok(())
    }

    pub fn set(&self, index: usize, value: Value) -> TypeResult<()> {
        verify_type(None, &value, &self.element)?;
        let mut items = self.items.borrow_mut();
        let len = items.len();
        match items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(TypeError::IndexOutOfBounds { index, len }),
        }
    }

    pub fn remove(&self, index: usize) -> TypeResult<Value> {
        let mut items = self.items.borrow_mut();
        if index >= items.len() {
            return Err(TypeError::IndexOutOfBounds { index, len: items.len() });
        }
        Ok(items.remove(index))
    }

    // ── Reads — trusted ──────────────────────────────────────────────────────

    pub fn get(&self, index: usize) -> TypeResult<Value> {
        let items = self.items.borrow();
        items
            .get(index)
            .cloned()
            .ok_or(TypeError::IndexOutOfBounds { index, len: items.len() })
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }
}

impl fmt::Display for TypedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.borrow().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

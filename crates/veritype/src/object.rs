//! Typed objects and the attribute-interception gate.
//!
//! A class is a field→descriptor table plus a weak-typing flag, immutable
//! once built. Instances store values in a private map; the only way in or
//! out is `get`/`set`, each of which runs the matcher. Reads verify the
//! *currently stored* value too — a guard against out-of-band mutation of
//! anything reachable through shared backing stores.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::descriptor::TypeDescriptor;
use crate::error::{TypeError, TypeResult};
use crate::value::Value;
use crate::verify::verify_type;

// ─── Class definitions ───────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ClassDef {
    name: String,
    parent: Option<ClassHandle>,
    fields: HashMap<String, TypeDescriptor>,
    weak_typing: bool,
}

impl ClassDef {
    /// Declared descriptor for `field`, searching the parent chain.
    fn field_type(&self, field: &str) -> Option<&TypeDescriptor> {
        self.fields
            .get(field)
            .or_else(|| self.parent.as_ref().and_then(|p| p.0.field_type(field)))
    }
}

/// Shared handle to a class. Equality is identity: two handles are equal iff
/// they point at the same definition.
#[derive(Clone)]
pub struct ClassHandle(Rc<ClassDef>);

impl ClassHandle {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn weak_typing(&self) -> bool {
        self.0.weak_typing
    }

    pub fn field_type(&self, field: &str) -> Option<&TypeDescriptor> {
        self.0.field_type(field)
    }

    /// True if `self` is `other` or transitively extends it.
    pub fn is_subclass_of(&self, other: &ClassHandle) -> bool {
        let mut current = Some(self.clone());
        while let Some(class) = current {
            if Rc::ptr_eq(&class.0, &other.0) {
                return true;
            }
            current = class.0.parent.clone();
        }
        false
    }
}

impl PartialEq for ClassHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ClassHandle {}

impl fmt::Debug for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassHandle({})", self.0.name)
    }
}

/// Builds a [`ClassHandle`]. The descriptor table is frozen at `build`.
pub struct ClassBuilder {
    name: String,
    parent: Option<ClassHandle>,
    fields: HashMap<String, TypeDescriptor>,
    weak_typing: bool,
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: HashMap::new(),
            weak_typing: false,
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.insert(name.into(), ty);
        self
    }

    pub fn parent(mut self, parent: &ClassHandle) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Permit undeclared fields to be freely read and written, unchecked.
    /// Declared fields are still verified.
    pub fn weak_typing(mut self, weak: bool) -> Self {
        self.weak_typing = weak;
        self
    }

    pub fn build(self) -> ClassHandle {
        ClassHandle(Rc::new(ClassDef {
            name: self.name,
            parent: self.parent,
            fields: self.fields,
            weak_typing: self.weak_typing,
        }))
    }
}

// ─── Instances ───────────────────────────────────────────────────────────────

/// An instance of a declared class. Field storage is private; every access
/// goes through the gate.
#[derive(Debug)]
pub struct TypedObject {
    class: ClassHandle,
    fields: RefCell<HashMap<String, Value>>,
}

impl TypedObject {
    pub fn new(class: &ClassHandle) -> Rc<Self> {
        Rc::new(Self {
            class: class.clone(),
            fields: RefCell::new(HashMap::new()),
        })
    }

    pub fn class(&self) -> &ClassHandle {
        &self.class
    }

    /// Read a field through the gate.
    ///
    /// Declared fields re-verify the stored value on every read; undeclared
    /// fields pass through raw only under weak typing.
    pub fn get(&self, name: &str) -> TypeResult<Value> {
        match self.class.field_type(name) {
            Some(expected) => {
                let stored = self.raw(name)?;
                verify_type(Some(name), &stored, expected)?;
                Ok(stored)
            }
            None if self.class.weak_typing() => self.raw(name),
            None => Err(TypeError::UndeclaredField(name.to_owned())),
        }
    }

    /// Write a field through the gate. On failure the instance is unmodified.
    pub fn set(&self, name: &str, value: Value) -> TypeResult<()> {
        match self.class.field_type(name) {
            Some(expected) => {
                verify_type(Some(name), &value, expected)?;
                self.fields.borrow_mut().insert(name.to_owned(), value);
                Ok(())
            }
            None if self.class.weak_typing() => {
                // Weak writes commit without any check.
                self.fields.borrow_mut().insert(name.to_owned(), value);
                Ok(())
            }
            None => Err(TypeError::UndeclaredField(name.to_owned())),
        }
    }

    fn raw(&self, name: &str) -> TypeResult<Value> {
        self.fields
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| TypeError::UnsetField(name.to_owned()))
    }
}

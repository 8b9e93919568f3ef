//! Runtime values — the dynamic host side of the checker.
//!
//! Rust has no dynamically typed host to bolt onto, so the library carries
//! its own: `Value` is what flows through typed fields and containers.
//! `Custom` is the open end — any wrapper type that implements
//! [`CustomValue`] becomes a self-describing value eligible for structural
//! matching against `Generic` descriptors, with no registration step.

use std::fmt;
use std::rc::Rc;

use crate::containers::{TypedList, TypedMapping};
use crate::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::function::FunctionValue;
use crate::object::TypedObject;

// ─── Self-description capability ─────────────────────────────────────────────

/// A type-fulfilling wrapper type: not a builtin value kind, but able to
/// produce a descriptor of itself for structural matching.
///
/// The built-in typed containers satisfy the same contract internally;
/// third-party wrapper types implement this trait and enter the dynamic
/// world as [`Value::Custom`].
pub trait CustomValue: fmt::Debug {
    /// The descriptor this value fulfils, e.g. `list[str]`.
    fn describe(&self) -> TypeDescriptor;

    /// Runtime kind name used in error messages.
    fn kind_name(&self) -> &str;
}

// ─── Value ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Object(Rc<TypedObject>),
    List(Rc<TypedList>),
    Map(Rc<TypedMapping>),
    Function(Rc<FunctionValue>),
    Custom(Rc<dyn CustomValue>),
}

impl Value {
    /// Stable runtime kind name for error messages.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Object(obj) => obj.class().name(),
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Function(_) => "fn",
            Self::Custom(c) => c.kind_name(),
        }
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Int(_) => Some(PrimitiveKind::Int),
            Self::Float(_) => Some(PrimitiveKind::Float),
            Self::Str(_) => Some(PrimitiveKind::Str),
            Self::Bytes(_) => Some(PrimitiveKind::Bytes),
            _ => None,
        }
    }

    /// Self-description, for values that can produce one.
    pub(crate) fn self_description(&self) -> Option<TypeDescriptor> {
        match self {
            Self::List(list) => Some(list.describe()),
            Self::Map(map) => Some(map.describe()),
            Self::Custom(c) => Some(c.describe()),
            _ => None,
        }
    }
}

/// Primitives compare by value; objects, functions and custom values by
/// identity; containers by identity of their backing store.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => TypedList::same_backing(a, b),
            (Self::Map(a), Self::Map(b)) => TypedMapping::same_backing(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Custom(a), Self::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Self::Object(obj) => write!(f, "<{} object>", obj.class().name()),
            Self::List(list) => write!(f, "{list}"),
            Self::Map(map) => write!(f, "{map}"),
            Self::Function(fun) => write!(f, "<fn {}>", fun.name()),
            Self::Custom(c) => write!(f, "<{}>", c.kind_name()),
        }
    }
}

// ─── Conversions ─────────────────────────────────────────────────────────────

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<Rc<TypedObject>> for Value {
    fn from(obj: Rc<TypedObject>) -> Self {
        Self::Object(obj)
    }
}

impl From<Rc<TypedList>> for Value {
    fn from(list: Rc<TypedList>) -> Self {
        Self::List(list)
    }
}

impl From<Rc<TypedMapping>> for Value {
    fn from(map: Rc<TypedMapping>) -> Self {
        Self::Map(map)
    }
}

impl From<Rc<FunctionValue>> for Value {
    fn from(fun: Rc<FunctionValue>) -> Self {
        Self::Function(fun)
    }
}

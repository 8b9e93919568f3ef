//! Type descriptor model — the vocabulary of types the checker understands.
//!
//! Pure data plus `Display` for error messages. Equality between `Function`
//! and `Generic` descriptors is structural (component-wise); equality between
//! `ClassRef` descriptors is class identity, never structure, so a class that
//! mentions itself in a field type can't recurse during comparison.

use std::fmt;

use crate::object::ClassHandle;

// ─── Primitive kinds ─────────────────────────────────────────────────────────

/// The fixed set of builtin value kinds. Matched exactly — no coercion,
/// no numeric widening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Int,
    Float,
    Str,
    Bytes,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bytes => "bytes",
        }
    }
}

// ─── Descriptors ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// Matches everything; no further checks.
    Any,
    Primitive(PrimitiveKind),
    /// Ordered alternatives. First successful match wins; order defines the
    /// error message, not precedence.
    Union(Vec<TypeDescriptor>),
    /// Instance of this class or a subclass (nominal polymorphism).
    ClassRef(ClassHandle),
    Generic(GenericType),
    Function(FunctionShape),
    /// The unconstrained callable marker. What a callable with no declaration
    /// metadata typeifies to; matched by (and matches) any function shape.
    Callable,
}

/// A parameterized shape such as "list of X". Args may be unresolved
/// placeholders, in which case only the origin is checked at match time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericType {
    pub origin: String,
    pub args: Vec<GenericArg>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericArg {
    /// An unresolved type parameter.
    Placeholder,
    Type(TypeDescriptor),
}

/// Shape of a callable: parameter descriptors in declaration order plus the
/// return descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionShape {
    pub params: Vec<TypeDescriptor>,
    pub ret: Box<TypeDescriptor>,
}

// ─── Constructors ────────────────────────────────────────────────────────────

impl TypeDescriptor {
    pub const INT: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Int);
    pub const FLOAT: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Float);
    pub const STR: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Str);
    pub const BYTES: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Bytes);

    pub fn union(alternatives: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::Union(alternatives.into_iter().collect())
    }

    pub fn class(handle: &ClassHandle) -> Self {
        Self::ClassRef(handle.clone())
    }

    /// `list[element]`
    pub fn list_of(element: TypeDescriptor) -> Self {
        Self::Generic(GenericType {
            origin: "list".into(),
            args: vec![GenericArg::Type(element)],
        })
    }

    /// `list[T]` — element type left unresolved, eligible for the loose
    /// generic match.
    pub fn list_of_any() -> Self {
        Self::Generic(GenericType {
            origin: "list".into(),
            args: vec![GenericArg::Placeholder],
        })
    }

    /// `tuple[a, b]`
    pub fn pair_of(a: TypeDescriptor, b: TypeDescriptor) -> Self {
        Self::Generic(GenericType {
            origin: "tuple".into(),
            args: vec![GenericArg::Type(a), GenericArg::Type(b)],
        })
    }

    pub fn function(params: Vec<TypeDescriptor>, ret: TypeDescriptor) -> Self {
        Self::Function(FunctionShape { params, ret: Box::new(ret) })
    }
}

// ─── Display ─────────────────────────────────────────────────────────────────

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Primitive(kind) => write!(f, "{}", kind.name()),
            Self::Union(alts) => {
                let rendered: Vec<String> = alts.iter().map(ToString::to_string).collect();
                write!(f, "{}", rendered.join(" or "))
            }
            Self::ClassRef(class) => write!(f, "{}", class.name()),
            Self::Generic(g) => write!(f, "{g}"),
            Self::Function(shape) => write!(f, "{shape}"),
            Self::Callable => write!(f, "fn"),
        }
    }
}

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.origin)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match arg {
                GenericArg::Placeholder => write!(f, "T")?,
                GenericArg::Type(t) => write!(f, "{t}")?,
            }
        }
        write!(f, "]")
    }
}

impl fmt::Display for FunctionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

//! veritype — a runtime type-checking layer.
//!
//! Declare a class as a field→descriptor table, construct instances, and
//! read/write fields through a gate that runs the matcher on every access.
//! Typed containers enforce element descriptors on every mutation, callables
//! are typeified into function shapes, and any wrapper type can join the
//! structural-matching rules by implementing [`CustomValue`].
//!
//! Everything is in-process and synchronous; failures come back as
//! [`TypeError`] values, never as logs or panics.

pub mod containers;
pub mod descriptor;
pub mod error;
pub mod function;
pub mod object;
pub mod value;
pub mod verify;

pub use containers::{TypedList, TypedMapping};
pub use descriptor::{FunctionShape, GenericArg, GenericType, PrimitiveKind, TypeDescriptor};
pub use error::{Mismatch, TypeError, TypeResult, UnregisteredKind};
pub use function::{FunctionBuilder, FunctionValue};
pub use object::{ClassBuilder, ClassHandle, TypedObject};
pub use value::{CustomValue, Value};
pub use verify::verify_type;

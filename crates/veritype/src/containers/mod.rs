//! The two reference generic containers. Both enforce their element
//! descriptors on every mutation and self-describe for the matcher's
//! structural rules.

pub mod list;
pub mod map;

pub use list::TypedList;
pub use map::TypedMapping;

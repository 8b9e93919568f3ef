//! The type matcher.
//!
//! `verify_type` decides whether a value satisfies a descriptor, in a fixed
//! priority order: `Any`, unions, builtin kinds, class references,
//! self-describing values, callables. The order is what resolves ambiguity —
//! builtin kinds are checked before the structural rules, so a wrapper type
//! that also happens to hold a builtin kind never reaches them.

use crate::descriptor::{GenericArg, TypeDescriptor};
use crate::error::{TypeError, TypeResult};
use crate::value::Value;

/// Verify `value` against `expected`, naming `field` in any error.
///
/// Either the value fully passes or the whole check fails with a single
/// structured error — never partial.
pub fn verify_type(
    field: Option<&str>,
    value: &Value,
    expected: &TypeDescriptor,
) -> TypeResult<()> {
    // 1. Any matches unconditionally.
    if matches!(expected, TypeDescriptor::Any) {
        return Ok(());
    }

    // 2. Union — first successful alternative wins, left to right.
    //    Intermediate mismatches are discarded; only the aggregate surfaces.
    if let TypeDescriptor::Union(alts) = expected {
        for alt in alts {
            if verify_type(field, value, alt).is_ok() {
                return Ok(());
            }
        }
        let listed: Vec<String> = alts.iter().map(ToString::to_string).collect();
        return Err(TypeError::mismatch(field, listed.join(" or "), value.kind_name()));
    }

    // 3. Builtin kinds match exactly or not at all. A primitive value never
    //    falls through to the structural rules below.
    if let TypeDescriptor::Primitive(kind) = expected {
        return if value.primitive_kind() == Some(*kind) {
            Ok(())
        } else {
            Err(TypeError::mismatch(field, expected, value.kind_name()))
        };
    }
    if value.primitive_kind().is_some() {
        return Err(TypeError::mismatch(field, expected, value.kind_name()));
    }

    // 4. Class references — nominal polymorphism over the typed-object family.
    if let TypeDescriptor::ClassRef(class) = expected {
        return match value {
            Value::Object(obj) if obj.class().is_subclass_of(class) => Ok(()),
            _ => Err(TypeError::mismatch(field, class.name(), value.kind_name())),
        };
    }

    // 5. Self-describing values: exact descriptor equality, or the loose
    //    generic match when every expected parameter is an unresolved
    //    placeholder (origin equivalence only).
    if let Some(described) = value.self_description() {
        if described == *expected {
            return Ok(());
        }
        if let (TypeDescriptor::Generic(want), TypeDescriptor::Generic(got)) =
            (expected, &described)
        {
            let unconstrained = want.args.iter().all(|a| matches!(a, GenericArg::Placeholder));
            if unconstrained && got.origin == want.origin {
                return Ok(());
            }
        }
        return Err(TypeError::mismatch(field, expected, &described));
    }

    // 6. Callables: typeify and compare. A callable with no declaration
    //    metadata degrades to the unconstrained marker and matches any shape.
    if let Value::Function(fun) = value {
        return match expected {
            TypeDescriptor::Callable => Ok(()),
            TypeDescriptor::Function(shape) => match fun.signature() {
                None => Ok(()),
                Some(sig) if sig == shape => Ok(()),
                Some(_) => Err(TypeError::mismatch(field, expected, fun.typeify())),
            },
            _ => Err(TypeError::mismatch(field, expected, fun.typeify())),
        };
    }

    // 7. Nothing accepts this runtime kind.
    Err(TypeError::unregistered(field, value.kind_name()))
}

// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{GenericType, TypeDescriptor as T};

    #[test]
    fn any_matches_everything() {
        for v in [Value::Int(1), Value::Float(0.5), Value::Str("x".into()), Value::Bytes(vec![0])] {
            assert!(verify_type(None, &v, &T::Any).is_ok());
        }
    }

    #[test]
    fn union_short_circuits_on_first_match() {
        // Any buried first in the union wins before Int is ever consulted;
        // declaration order is the only tie-break.
        let u = T::union([T::Any, T::INT]);
        assert!(verify_type(None, &Value::Str("s".into()), &u).is_ok());
    }

    #[test]
    fn union_failure_lists_every_alternative() {
        let u = T::union([T::INT, T::STR, T::BYTES]);
        let err = verify_type(Some("v"), &Value::Float(1.5), &u).unwrap_err();
        let TypeError::Mismatch(m) = err else { panic!("expected mismatch, got {err:?}") };
        assert_eq!(m.field.as_deref(), Some("v"));
        assert_eq!(m.expected, "int or str or bytes");
        assert_eq!(m.actual, "float");
    }

    #[test]
    fn no_numeric_widening() {
        assert!(verify_type(None, &Value::Int(3), &T::FLOAT).is_err());
        assert!(verify_type(None, &Value::Float(3.0), &T::INT).is_err());
    }

    #[test]
    fn primitive_value_never_reaches_structural_rules() {
        // An int against list[T] fails at the builtin step, not at step 7.
        let err = verify_type(None, &Value::Int(1), &T::list_of_any()).unwrap_err();
        assert!(matches!(err, TypeError::Mismatch(_)));
    }

    #[test]
    fn loose_generic_requires_all_placeholders() {
        let list = crate::containers::TypedList::new(T::INT);
        let v = Value::List(list);
        // list[T] — origin-only check.
        assert!(verify_type(None, &v, &T::list_of_any()).is_ok());
        // list[str] — fully resolved, must match exactly.
        assert!(verify_type(None, &v, &T::list_of(T::STR)).is_err());
        // tuple[T] — placeholder args but wrong origin.
        let wrong_origin = T::Generic(GenericType {
            origin: "tuple".into(),
            args: vec![GenericArg::Placeholder],
        });
        assert!(verify_type(None, &v, &wrong_origin).is_err());
    }

    #[test]
    fn unknown_kind_is_a_taxonomy_error() {
        let class = crate::object::ClassBuilder::new("Thing").build();
        let obj = crate::object::TypedObject::new(&class);
        // A typed object satisfies class refs, not function shapes.
        let err = verify_type(None, &Value::Object(obj), &T::Callable).unwrap_err();
        assert!(matches!(err, TypeError::UnregisteredKind(_)));
    }
}

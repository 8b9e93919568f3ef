//! Matcher behavior tests.
//!
//! Exercises `verify_type` across the whole descriptor vocabulary:
//! primitives, unions, class references, generic containers, and callables.

use veritype::{
    ClassBuilder, CustomValue, FunctionValue, GenericArg, GenericType, TypeDescriptor as T,
    TypeError, TypedList, TypedMapping, TypedObject, Value, verify_type,
};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn ok(value: &Value, expected: &T) {
    verify_type(None, value, expected).unwrap_or_else(|e| {
        panic!("expected {value} to match {expected}, got: {e}");
    });
}

fn err(value: &Value, expected: &T) -> TypeError {
    match verify_type(None, value, expected) {
        Ok(()) => panic!("expected {value} to fail against {expected}"),
        Err(e) => e,
    }
}

fn mismatch(value: &Value, expected: &T) -> veritype::Mismatch {
    match err(value, expected) {
        TypeError::Mismatch(m) => m,
        other => panic!("expected a mismatch, got: {other:?}"),
    }
}

fn primitives() -> [(Value, T); 4] {
    [
        (Value::Int(7), T::INT),
        (Value::Float(2.5), T::FLOAT),
        (Value::Str("hi".into()), T::STR),
        (Value::Bytes(vec![1, 2, 3]), T::BYTES),
    ]
}

// ─── Primitives (P1) ─────────────────────────────────────────────────────────

#[test]
fn primitive_exactness() {
    let cases = primitives();
    for (i, (value, _)) in cases.iter().enumerate() {
        for (j, (_, desc)) in cases.iter().enumerate() {
            if i == j {
                ok(value, desc);
            } else {
                err(value, desc);
            }
        }
    }
}

#[test]
fn int_does_not_satisfy_float() {
    let m = mismatch(&Value::Int(1), &T::FLOAT);
    assert_eq!(m.expected, "float");
    assert_eq!(m.actual, "int");
}

#[test]
fn any_accepts_every_kind() {
    for (value, _) in primitives() {
        ok(&value, &T::Any);
    }
    ok(&Value::List(TypedList::new(T::INT)), &T::Any);
}

// ─── Unions (P2) ─────────────────────────────────────────────────────────────

#[test]
fn union_outcome_is_commutative() {
    let v = Value::Str("s".into());
    ok(&v, &T::union([T::INT, T::STR]));
    ok(&v, &T::union([T::STR, T::INT]));
    err(&v, &T::union([T::INT, T::FLOAT]));
}

#[test]
fn union_message_lists_alternatives_in_declaration_order() {
    let m = mismatch(&Value::Bytes(vec![]), &T::union([T::INT, T::STR]));
    assert_eq!(m.expected, "int or str");
    assert_eq!(m.actual, "bytes");
}

#[test]
fn union_recurses_into_generic_alternatives() {
    let list = Value::List(TypedList::new(T::STR));
    ok(&list, &T::union([T::INT, T::list_of(T::STR)]));
    err(&list, &T::union([T::INT, T::list_of(T::INT)]));
}

// ─── Class references (P7) ───────────────────────────────────────────────────

#[test]
fn class_ref_accepts_subclass() {
    let base = ClassBuilder::new("Base").field("x", T::INT).build();
    let derived = ClassBuilder::new("Derived").parent(&base).build();
    let unrelated = ClassBuilder::new("Other").build();

    let want = T::class(&base);
    ok(&Value::Object(TypedObject::new(&derived)), &want);
    ok(&Value::Object(TypedObject::new(&base)), &want);

    let m = mismatch(&Value::Object(TypedObject::new(&unrelated)), &want);
    assert_eq!(m.expected, "Base");
    assert_eq!(m.actual, "Other");
}

#[test]
fn class_ref_rejects_superclass_instance() {
    let base = ClassBuilder::new("Base").build();
    let derived = ClassBuilder::new("Derived").parent(&base).build();
    err(&Value::Object(TypedObject::new(&base)), &T::class(&derived));
}

#[test]
fn class_ref_rejects_non_objects() {
    let base = ClassBuilder::new("Base").build();
    err(&Value::Int(1), &T::class(&base));
    err(&Value::List(TypedList::new(T::INT)), &T::class(&base));
}

// ─── Generic containers ──────────────────────────────────────────────────────

#[test]
fn list_matches_exact_element_type() {
    let list = Value::List(TypedList::new(T::STR));
    ok(&list, &T::list_of(T::STR));
    err(&list, &T::list_of(T::INT));
}

#[test]
fn list_matches_loosely_when_unconstrained() {
    let list = Value::List(TypedList::new(T::union([T::INT, T::STR])));
    ok(&list, &T::list_of_any());
}

#[test]
fn mapping_self_describes_as_pair_list() {
    let map = Value::Map(TypedMapping::new(T::STR, T::INT));
    ok(&map, &T::list_of(T::pair_of(T::STR, T::INT)));
    ok(&map, &T::list_of_any());
    let m = mismatch(&map, &T::list_of(T::pair_of(T::STR, T::FLOAT)));
    assert_eq!(m.expected, "list[tuple[str, float]]");
    assert_eq!(m.actual, "list[tuple[str, int]]");
}

#[test]
fn custom_value_joins_structural_matching() {
    #[derive(Debug)]
    struct Grid;

    impl CustomValue for Grid {
        fn describe(&self) -> T {
            T::Generic(GenericType {
                origin: "grid".into(),
                args: vec![GenericArg::Type(T::FLOAT)],
            })
        }

        fn kind_name(&self) -> &str {
            "grid"
        }
    }

    let grid = Value::Custom(std::rc::Rc::new(Grid));

    // Exact self-description.
    ok(&grid, &Grid.describe());
    // Loose origin-only match.
    let loose = T::Generic(GenericType {
        origin: "grid".into(),
        args: vec![GenericArg::Placeholder],
    });
    ok(&grid, &loose);
    // Resolved but wrong parameter.
    err(&grid, &T::Generic(GenericType {
        origin: "grid".into(),
        args: vec![GenericArg::Type(T::INT)],
    }));
}

// ─── Callables ───────────────────────────────────────────────────────────────

#[test]
fn typeify_preserves_declaration_order_and_defaults() {
    let f = FunctionValue::builder("mix")
        .param("a", T::INT)
        .param_untyped("b")
        .returns(T::STR)
        .build(|_| Ok(Value::Str(String::new())));
    assert_eq!(f.typeify(), T::function(vec![T::INT, T::Any], T::STR));
}

#[test]
fn typeify_defaults_return_to_any() {
    let f = FunctionValue::builder("id")
        .param("x", T::INT)
        .build(|args| Ok(args[0].clone()));
    assert_eq!(f.typeify(), T::function(vec![T::INT], T::Any));
}

#[test]
fn declared_function_matches_exact_shape() {
    let f = FunctionValue::builder("square")
        .param("x", T::INT)
        .returns(T::INT)
        .build(|args| match args {
            [Value::Int(n)] => Ok(Value::Int(n * n)),
            _ => Err(TypeError::mismatch(None, "int", "other")),
        });
    let v = Value::Function(f);
    ok(&v, &T::function(vec![T::INT], T::INT));
    err(&v, &T::function(vec![T::FLOAT], T::INT));
    err(&v, &T::function(vec![T::INT, T::INT], T::INT));
}

#[test]
fn any_callable_matches_bare_callable_marker() {
    let declared = FunctionValue::builder("f")
        .param("x", T::INT)
        .returns(T::INT)
        .build(|_| Ok(Value::Int(0)));
    let opaque = FunctionValue::opaque("g", |_| Ok(Value::Int(0)));
    ok(&Value::Function(declared), &T::Callable);
    ok(&Value::Function(opaque), &T::Callable);
}

#[test]
fn metadata_less_callable_matches_any_shape() {
    let opaque = FunctionValue::opaque("g", |_| Ok(Value::Int(0)));
    assert_eq!(opaque.typeify(), T::Callable);
    ok(&Value::Function(opaque), &T::function(vec![T::STR, T::BYTES], T::FLOAT));
}

#[test]
fn call_invokes_the_body() {
    let square = FunctionValue::builder("square")
        .param("x", T::INT)
        .returns(T::INT)
        .build(|args| match args {
            [Value::Int(n)] => Ok(Value::Int(n * n)),
            _ => Err(TypeError::mismatch(None, "int", "other")),
        });
    assert_eq!(square.call(&[Value::Int(9)]).unwrap(), Value::Int(81));
}

// ─── Taxonomy failures ───────────────────────────────────────────────────────

#[test]
fn object_against_generic_is_unregistered() {
    let class = ClassBuilder::new("Thing").build();
    let obj = Value::Object(TypedObject::new(&class));
    let e = err(&obj, &T::list_of_any());
    assert!(matches!(e, TypeError::UnregisteredKind(_)));
    assert!(e.to_string().contains("Thing"));
}

#[test]
fn field_name_appears_in_error() {
    let e = verify_type(Some("count"), &Value::Str("x".into()), &T::INT).unwrap_err();
    assert_eq!(e.to_string(), "field `count`: expected int, got str");
}

//! Demo driver: declares a checked class, runs it through a tick loop, and
//! shows the gate rejecting a bad write.

use anyhow::Result;
use veritype::{
    ClassBuilder, FunctionValue, TypeDescriptor as T, TypeError, TypedList, TypedObject, Value,
};

fn main() -> Result<()> {
    // class Main { x: int, y: any, z: list[str], w: fn(int) -> int }
    let main_class = ClassBuilder::new("Main")
        .field("x", T::INT)
        .field("y", T::Any)
        .field("z", T::list_of(T::STR))
        .field("w", T::function(vec![T::INT], T::INT))
        .build();

    let obj = TypedObject::new(&main_class);
    obj.set("x", Value::Int(0))?;
    obj.set("z", Value::List(TypedList::new(T::STR)))?;

    let square = FunctionValue::builder("square")
        .param("x", T::INT)
        .returns(T::INT)
        .build(|args| match args {
            [Value::Int(n)] => Ok(Value::Int(n * n)),
            _ => Err(TypeError::mismatch(None, "int", "something else")),
        });
    obj.set("w", Value::Function(square))?;

    // Ten ticks: z.push(str(w(x))); x += 1
    for _ in 0..10 {
        let Value::Int(x) = obj.get("x")? else { unreachable!("x is gated to int") };
        let Value::Function(w) = obj.get("w")? else { unreachable!("w is gated to fn") };
        let Value::List(z) = obj.get("z")? else { unreachable!("z is gated to list") };

        let squared = w.call(&[Value::Int(x)])?;
        z.push(Value::Str(squared.to_string()))?;
        obj.set("x", Value::Int(x + 1))?;

        println!("{z}");
    }

    // `y` is declared `any` — every kind passes through.
    obj.set("y", Value::Str("abc".into()))?;
    obj.set("y", Value::Float(501.7))?;
    obj.set("y", Value::Bytes(b"Hello".to_vec()))?;

    obj.set("x", Value::Int(10))?;

    // This one is rejected: x is declared int.
    match obj.set("x", Value::Str("abc".into())) {
        Ok(()) => unreachable!("the gate let a str into an int field"),
        Err(e) => println!("rejected: {e}"),
    }

    Ok(())
}

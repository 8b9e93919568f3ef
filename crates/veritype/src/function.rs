//! Callable values and the function typeifier.
//!
//! A `FunctionValue` is an introspectable callable: a body plus optional
//! declaration metadata. `typeify` converts it into a descriptor so callables
//! can be matched like any other value — a declared signature becomes an
//! exact `Function` shape, a metadata-less callable degrades to the
//! unconstrained `Callable` marker.

use std::fmt;
use std::rc::Rc;

use crate::descriptor::{FunctionShape, TypeDescriptor};
use crate::error::TypeResult;
use crate::value::Value;

type NativeFn = Rc<dyn Fn(&[Value]) -> TypeResult<Value>>;

pub struct FunctionValue {
    name: String,
    signature: Option<FunctionShape>,
    body: NativeFn,
}

impl FunctionValue {
    /// A callable with no declaration metadata at all.
    pub fn opaque(
        name: impl Into<String>,
        body: impl Fn(&[Value]) -> TypeResult<Value> + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            signature: None,
            body: Rc::new(body),
        })
    }

    pub fn builder(name: impl Into<String>) -> FunctionBuilder {
        FunctionBuilder {
            name: name.into(),
            params: Vec::new(),
            ret: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> Option<&FunctionShape> {
        self.signature.as_ref()
    }

    /// The descriptor this callable fulfils.
    pub fn typeify(&self) -> TypeDescriptor {
        match &self.signature {
            Some(shape) => TypeDescriptor::Function(shape.clone()),
            None => TypeDescriptor::Callable,
        }
    }

    /// Invoke the body. Arguments are not checked against the declared
    /// signature — only field reads and writes are gated.
    pub fn call(&self, args: &[Value]) -> TypeResult<Value> {
        (self.body)(args)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Collects a declared signature in parameter order. Parameters without a
/// descriptor default to `any`, as does an undeclared return type.
pub struct FunctionBuilder {
    name: String,
    params: Vec<(String, Option<TypeDescriptor>)>,
    ret: Option<TypeDescriptor>,
}

impl FunctionBuilder {
    pub fn param(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.params.push((name.into(), Some(ty)));
        self
    }

    pub fn param_untyped(mut self, name: impl Into<String>) -> Self {
        self.params.push((name.into(), None));
        self
    }

    pub fn returns(mut self, ty: TypeDescriptor) -> Self {
        self.ret = Some(ty);
        self
    }

    pub fn build(self, body: impl Fn(&[Value]) -> TypeResult<Value> + 'static) -> Rc<FunctionValue> {
        let shape = FunctionShape {
            params: self
                .params
                .into_iter()
                .map(|(_, ty)| ty.unwrap_or(TypeDescriptor::Any))
                .collect(),
            ret: Box::new(self.ret.unwrap_or(TypeDescriptor::Any)),
        };
        Rc::new(FunctionValue {
            name: self.name,
            signature: Some(shape),
            body: Rc::new(body),
        })
    }
}

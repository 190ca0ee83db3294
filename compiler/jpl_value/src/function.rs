//! Function values: closures defined in JPL source and natives provided by the host.

use std::fmt;
use std::sync::Arc;

use jpl_ir::Pipeline;

use crate::errors::EvalResult;
use crate::scope::Scope;
use crate::value::Value;

/// Calls back into the evaluator.
///
/// Native functions receive an `Invoker` so they can call function values
/// they were handed, such as a callback argument.
pub trait Invoker {
    /// Call `function` with `input` and `args`, collecting every output.
    fn invoke(&self, function: &FunctionValue, input: Value, args: &[Value])
        -> EvalResult<Vec<Value>>;
}

/// Signature of a host function: invoker, input value, arguments.
pub type NativeFn = dyn Fn(&dyn Invoker, Value, &[Value]) -> EvalResult<Vec<Value>> + Send + Sync;

/// A function value.
#[derive(Clone)]
pub enum FunctionValue {
    Closure(Arc<Closure>),
    Native(NativeFunction),
}

impl FunctionValue {
    /// Create a closure over `scope`.
    pub fn closure(params: Vec<String>, body: Pipeline, scope: Scope) -> Self {
        FunctionValue::Closure(Arc::new(Closure {
            params,
            body,
            scope,
        }))
    }

    /// Wrap a host function.
    pub fn native<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&dyn Invoker, Value, &[Value]) -> EvalResult<Vec<Value>> + Send + Sync + 'static,
    {
        FunctionValue::Native(NativeFunction {
            name: name.into(),
            func: Arc::new(func),
        })
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Closure(closure) => {
                write!(f, "<function({})>", closure.params.join(", "))
            }
            FunctionValue::Native(native) => write!(f, "<native {}>", native.name),
        }
    }
}

/// A function defined in JPL source.
///
/// `scope` is the scope active at the definition site. Capture is by
/// reference: the closure shares the whole enclosing chain.
pub struct Closure {
    pub params: Vec<String>,
    pub body: Pipeline,
    pub scope: Scope,
}

/// A function provided by the host.
#[derive(Clone)]
pub struct NativeFunction {
    name: Arc<str>,
    func: Arc<NativeFn>,
}

impl NativeFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the host function.
    pub fn call(&self, invoker: &dyn Invoker, input: Value, args: &[Value]) -> EvalResult<Vec<Value>> {
        (self.func)(invoker, input, args)
    }
}

//! Function invocation.

use jpl_value::{EvalResult, FunctionValue, Invoker, Value};
use tracing::debug;

use super::Interpreter;

impl Interpreter {
    /// Call a function value and collect its outputs.
    ///
    /// Closures run their body in a child of the captured scope with one
    /// binding per parameter; missing arguments are `null`, surplus ones are
    /// ignored. Natives receive the interpreter as their [`Invoker`].
    pub fn call_function(
        &self,
        function: &FunctionValue,
        input: Value,
        args: &[Value],
    ) -> EvalResult<Vec<Value>> {
        match function {
            FunctionValue::Closure(closure) => {
                let _frame = self.enter_call()?;
                debug!(
                    params = closure.params.len(),
                    args = args.len(),
                    depth = self.call_depth(),
                    "call closure"
                );
                let bindings = closure.params.iter().enumerate().map(|(i, param)| {
                    (param.clone(), args.get(i).cloned().unwrap_or(Value::Null))
                });
                let scope = closure.scope.bind_all(bindings);
                self.evaluate(&closure.body, input, &scope)
            }
            FunctionValue::Native(native) => {
                debug!(name = native.name(), args = args.len(), "call native");
                native.call(self, input, args)
            }
        }
    }
}

impl Invoker for Interpreter {
    fn invoke(
        &self,
        function: &FunctionValue,
        input: Value,
        args: &[Value],
    ) -> EvalResult<Vec<Value>> {
        self.call_function(function, input, args)
    }
}

//! Standalone functions built from source.

use jpl_value::{not_callable, FunctionValue, Scope, Value};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{JplError, Options};

/// Build a function value from a parameter list and a body.
///
/// The body sees its parameters and `presets`, nothing else.
pub fn parse_function(
    arg_names: &[&str],
    source: &str,
    presets: FxHashMap<String, Value>,
) -> Result<Value, JplError> {
    let body = jpl_parse::parse(source)?;
    debug!(params = arg_names.len(), presets = presets.len(), "parse function");
    let params = arg_names.iter().map(|&name| name.to_owned()).collect();
    Ok(Value::function(FunctionValue::closure(
        params,
        body,
        Scope::with_presets(presets),
    )))
}

/// Call a function value from the host.
///
/// `options` supplies the call-depth limit; its presets are not visible to
/// the function, which only sees its own captured scope.
pub fn call_function(
    function: &Value,
    input: Value,
    args: &[Value],
    options: &Options,
) -> Result<Vec<Value>, JplError> {
    let Some(function) = function.as_function() else {
        return Err(not_callable(function).into());
    };
    let outputs = options.interpreter().call_function(function, input, args)?;
    Ok(outputs)
}

use num_bigint::BigInt;

use crate::{
    error::EvaluateError,
    interpreter::{
        scope::Scope,
        value::{Definition, FunctionValue, NativeFunction, ObjectValue, Primitive, RuntimeValue},
    },
};

/// Builds the initial runtime scope the evaluator runs against.
///
/// The names mirror the analyzer's type environment: the native printing
/// functions and `range`, plus the testing helpers (`variable`, the
/// `function*` entries, and an `object` carrying a prototype and `method*`
/// entries).
///
/// # Example
/// ```
/// use opal::interpreter::evaluator::builtin::runtime_scope;
///
/// let scope = runtime_scope();
/// assert!(scope.resolve("range", false).is_some());
/// ```
#[must_use]
pub fn runtime_scope() -> Scope<RuntimeValue> {
    let scope = Scope::root();

    scope.define("log", native("log", builtin_log));
    scope.define("debug", native("debug", builtin_debug));
    scope.define("print", native("print", builtin_print));
    scope.define("range", native("range", builtin_range));

    scope.define("variable",
                 RuntimeValue::Primitive(Primitive::String("variable".to_string())));
    scope.define("function", native("function", builtin_function));
    scope.define("functionAny", native("functionAny", builtin_function_any));
    scope.define("functionString", native("functionString", builtin_function_string));

    let prototype = ObjectValue { name:  Some("Prototype".to_string()),
                                  scope: Scope::root(), };
    prototype.scope.define("inherited_property",
                           RuntimeValue::Primitive(Primitive::String("inherited".to_string())));
    prototype.scope
             .define("inherited_method", native("inherited_method", builtin_inherited_method));

    let object = ObjectValue { name:  Some("Object".to_string()),
                               scope: Scope::root(), };
    object.scope.define("prototype", RuntimeValue::Object(prototype));
    object.scope.define("method", native("method", builtin_method));
    object.scope.define("methodAny", native("methodAny", builtin_method_any));
    object.scope.define("methodString", native("methodString", builtin_method_string));
    scope.define("object", RuntimeValue::Object(object));

    scope
}

fn native(name: &str, function: NativeFunction) -> RuntimeValue {
    RuntimeValue::Function(FunctionValue { name:       name.to_string(),
                                           definition: Definition::Native(function), })
}

fn expect_arity(name: &str,
                arguments: &[RuntimeValue],
                expected: usize)
                -> Result<(), EvaluateError> {
    if arguments.len() == expected {
        Ok(())
    } else {
        Err(EvaluateError::ArgumentCountMismatch { name: name.to_string(),
                                                   expected,
                                                   found: arguments.len(), })
    }
}

/// `log(value)`: prints the value's print form and passes the value
/// through.
fn builtin_log(mut arguments: Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError> {
    expect_arity("log", &arguments, 1)?;
    let argument = arguments.remove(0);
    println!("{}", argument.print());
    Ok(argument)
}

/// `print(value)`: prints the value's print form.
fn builtin_print(arguments: Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError> {
    expect_arity("print", &arguments, 1)?;
    println!("{}", arguments[0].print());
    Ok(RuntimeValue::nil())
}

/// `debug(value)`: prints the value's debug form, with strings and
/// characters quoted.
fn builtin_debug(arguments: Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError> {
    expect_arity("debug", &arguments, 1)?;
    println!("{}", arguments[0].debug());
    Ok(RuntimeValue::nil())
}

/// `range(start, end)`: the integers from `start` up to, but excluding,
/// `end`. Empty when `start >= end`.
fn builtin_range(arguments: Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError> {
    expect_arity("range", &arguments, 2)?;

    let (Some(start), Some(end)) = (arguments[0].as_integer(), arguments[1].as_integer()) else {
        return Err(EvaluateError::InvalidArgument { name:    "range".to_string(),
                                                    details: format!("expected two integers, found {} and {}",
                                                                     arguments[0].print(),
                                                                     arguments[1].print()), });
    };

    let mut values = Vec::new();
    let mut current = start.clone();
    while current < *end {
        values.push(RuntimeValue::Primitive(Primitive::Integer(current.clone())));
        current += BigInt::from(1);
    }

    Ok(RuntimeValue::Primitive(Primitive::List(values)))
}

/// `function()`: does nothing.
fn builtin_function(arguments: Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError> {
    expect_arity("function", &arguments, 0)?;
    Ok(RuntimeValue::nil())
}

/// `functionAny(value)`: passes any value through.
fn builtin_function_any(mut arguments: Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError> {
    expect_arity("functionAny", &arguments, 1)?;
    Ok(arguments.remove(0))
}

/// `functionString(value)`: passes a string through, rejecting anything
/// else.
fn builtin_function_string(mut arguments: Vec<RuntimeValue>)
                           -> Result<RuntimeValue, EvaluateError> {
    expect_arity("functionString", &arguments, 1)?;
    if !arguments[0].is_string() {
        return Err(EvaluateError::InvalidArgument { name:    "functionString".to_string(),
                                                    details: format!("expected a string, found {}",
                                                                     arguments[0].print()), });
    }
    Ok(arguments.remove(0))
}

// The method helpers receive the receiver as their implicit first argument,
// exactly like declared methods do.

fn builtin_method(arguments: Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError> {
    expect_arity("method", &arguments, 1)?;
    Ok(RuntimeValue::nil())
}

fn builtin_method_any(mut arguments: Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError> {
    expect_arity("methodAny", &arguments, 2)?;
    Ok(arguments.remove(1))
}

fn builtin_method_string(mut arguments: Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError> {
    expect_arity("methodString", &arguments, 2)?;
    if !arguments[1].is_string() {
        return Err(EvaluateError::InvalidArgument { name:    "methodString".to_string(),
                                                    details: format!("expected a string, found {}",
                                                                     arguments[1].print()), });
    }
    Ok(arguments.remove(1))
}

fn builtin_inherited_method(arguments: Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError> {
    expect_arity("inherited_method", &arguments, 1)?;
    Ok(RuntimeValue::nil())
}

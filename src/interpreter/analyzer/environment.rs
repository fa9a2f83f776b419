use crate::interpreter::{
    scope::Scope,
    types::{FunctionType, ObjectType, Type},
};

/// Builds the initial type scope the analyzer runs against.
///
/// Besides the native function signatures, the scope carries helper
/// variables typed at the non-literal types and a sample object type, so
/// analysis of member access and subtyping can be exercised without
/// constructing objects in source.
///
/// # Example
/// ```
/// use opal::interpreter::{analyzer::environment, types::Type};
///
/// let scope = environment::type_scope();
/// assert_eq!(scope.resolve("variable", false), Some(Type::String));
/// ```
#[must_use]
pub fn type_scope() -> Scope<Type> {
    let scope = Scope::root();

    // Helper variables for the types that have no literal form.
    scope.define("any", Type::Any);
    scope.define("dynamic", Type::Dynamic);
    scope.define("equatable", Type::Equatable);
    scope.define("comparable", Type::Comparable);
    scope.define("iterable", Type::Iterable);

    // Native functions. Note that log returns Dynamic, not the argument
    // type: the type system cannot express "same as the argument".
    scope.define("log", function(vec![Type::Any], Type::Dynamic));
    scope.define("debug", function(vec![Type::Any], Type::Nil));
    scope.define("print", function(vec![Type::Any], Type::Nil));
    scope.define("range", function(vec![Type::Integer, Type::Integer], Type::Iterable));

    // Helpers for exercising variables, functions, and objects.
    scope.define("variable", Type::String);
    scope.define("function", function(Vec::new(), Type::Nil));
    scope.define("functionAny", function(vec![Type::Any], Type::Any));
    scope.define("functionString", function(vec![Type::String], Type::String));

    let prototype = ObjectType { name:  Some("Prototype".to_string()),
                                 scope: Scope::root(), };
    prototype.scope.define("inherited_property", Type::String);
    prototype.scope.define("inherited_method", function(Vec::new(), Type::Nil));

    let object = ObjectType { name:  Some("Object".to_string()),
                              scope: Scope::root(), };
    object.scope.define("prototype", Type::Object(prototype));
    object.scope.define("method", function(Vec::new(), Type::Nil));
    object.scope.define("methodAny", function(vec![Type::Any], Type::Any));
    object.scope.define("methodString", function(vec![Type::String], Type::String));
    scope.define("object", Type::Object(object));

    scope
}

fn function(parameters: Vec<Type>, returns: Type) -> Type {
    Type::Function(FunctionType { parameters,
                                  returns: Box::new(returns), })
}

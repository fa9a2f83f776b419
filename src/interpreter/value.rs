use std::{fmt, rc::Rc};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{ast, error::EvaluateError, interpreter::scope::Scope};

/// Represents a runtime value in the evaluator.
///
/// Values are either primitives, callable functions, or objects. Equality is
/// structural for primitives and by identity for functions and objects, which
/// is what `==` and `!=` observe at the language level.
#[derive(Debug, Clone)]
pub enum RuntimeValue {
    /// A primitive payload.
    Primitive(Primitive),
    /// A callable function value.
    Function(FunctionValue),
    /// An object value owning its member scope.
    Object(ObjectValue),
}

/// The primitive payloads a [`RuntimeValue`] can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// The absent value, `NIL`.
    Nil,
    /// A boolean.
    Boolean(bool),
    /// An arbitrary-precision integer.
    Integer(BigInt),
    /// An arbitrary-precision decimal.
    Decimal(BigDecimal),
    /// A single character.
    Character(char),
    /// A string.
    String(String),
    /// An iterable sequence of values, as produced by `range`.
    List(Vec<RuntimeValue>),
}

/// A function value: its name and how to invoke it.
#[derive(Clone)]
pub struct FunctionValue {
    /// The function's name, used in diagnostics.
    pub name:       String,
    /// The invocable definition.
    pub definition: Definition,
}

/// How a function value executes when called.
#[derive(Clone)]
pub enum Definition {
    /// A built-in implemented natively.
    Native(NativeFunction),
    /// A function declared in the language, carrying its body and the scope
    /// it captured at its `DEF`.
    Declared(Rc<DeclaredFunction>),
}

/// The signature shared by all native built-ins.
pub type NativeFunction = fn(Vec<RuntimeValue>) -> Result<RuntimeValue, EvaluateError>;

/// A function declared in source, together with its captured defining scope.
///
/// The scope handle keeps the defining environment alive for as long as the
/// function value exists, so a function returned out of its defining
/// construct still resolves its captured bindings.
#[derive(Debug)]
pub struct DeclaredFunction {
    /// The parameter names, in declaration order.
    pub parameters:     Vec<String>,
    /// The statements making up the body.
    pub body:           Vec<ast::Stmt>,
    /// The scope in effect when the `DEF` was evaluated.
    pub scope:          Scope<RuntimeValue>,
    /// True for object methods, which receive the receiver as an implicit
    /// first argument bound to `this`.
    pub binds_receiver: bool,
}

/// An object value: an optional name and the scope holding its members.
#[derive(Debug, Clone)]
pub struct ObjectValue {
    /// The optional object name.
    pub name:  Option<String>,
    /// The member scope. Inheritance works through a `prototype` binding in
    /// this scope, not through the scope's parent chain.
    pub scope: Scope<RuntimeValue>,
}

impl RuntimeValue {
    /// The `NIL` value.
    #[must_use]
    pub const fn nil() -> Self {
        Self::Primitive(Primitive::Nil)
    }

    /// Returns the boolean payload, if this is a boolean primitive.
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Primitive(Primitive::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer primitive.
    #[must_use]
    pub const fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Primitive(Primitive::Integer(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the decimal payload, if this is a decimal primitive.
    #[must_use]
    pub const fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Self::Primitive(Primitive::Decimal(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string primitive.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::Primitive(Primitive::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns true if this is a string primitive.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::Primitive(Primitive::String(_)))
    }

    /// Returns the list payload, if this is an iterable primitive.
    #[must_use]
    pub const fn as_list(&self) -> Option<&Vec<Self>> {
        match self {
            Self::Primitive(Primitive::List(values)) => Some(values),
            _ => None,
        }
    }

    /// Returns the function value, if this is one.
    #[must_use]
    pub const fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the object value, if this is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Renders the value the way `log`, `print`, and string concatenation
    /// display it.
    ///
    /// # Example
    /// ```
    /// use opal::interpreter::value::RuntimeValue;
    ///
    /// assert_eq!(RuntimeValue::nil().print(), "NIL");
    /// ```
    #[must_use]
    pub fn print(&self) -> String {
        match self {
            Self::Primitive(primitive) => primitive.print(),
            Self::Function(function) => format!("DEF {}", function.name),
            Self::Object(object) => match &object.name {
                Some(name) => format!("OBJECT {name}"),
                None => "OBJECT".to_string(),
            },
        }
    }

    /// Renders the value for `debug` output: like [`print`](Self::print),
    /// except characters and strings are quoted with their escapes
    /// re-applied.
    #[must_use]
    pub fn debug(&self) -> String {
        match self {
            Self::Primitive(Primitive::Character(value)) => {
                format!("'{}'", escape_character(*value))
            },
            Self::Primitive(Primitive::String(value)) => {
                let escaped: String = value.chars().map(escape_character).collect();
                format!("\"{escaped}\"")
            },
            Self::Primitive(Primitive::List(values)) => {
                let rendered: Vec<String> = values.iter().map(Self::debug).collect();
                format!("[{}]", rendered.join(", "))
            },
            _ => self.print(),
        }
    }
}

impl Primitive {
    fn print(&self) -> String {
        match self {
            Self::Nil => "NIL".to_string(),
            Self::Boolean(value) => {
                if *value {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            },
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => value.to_string(),
            Self::Character(value) => value.to_string(),
            Self::String(value) => value.clone(),
            Self::List(values) => {
                let rendered: Vec<String> = values.iter().map(RuntimeValue::print).collect();
                format!("[{}]", rendered.join(", "))
            },
        }
    }
}

fn escape_character(c: char) -> String {
    match c {
        '\x08' => "\\b".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\x0C' => "\\f".to_string(),
        '\'' => "\\'".to_string(),
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        _ => c.to_string(),
    }
}

impl fmt::Display for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print())
    }
}

impl PartialEq for RuntimeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primitive(left), Self::Primitive(right)) => left == right,
            (Self::Function(left), Self::Function(right)) => {
                left.name == right.name && left.definition == right.definition
            },
            (Self::Object(left), Self::Object(right)) => left.scope.ptr_eq(&right.scope),
            _ => false,
        }
    }
}

impl PartialEq for Definition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Native(left), Self::Native(right)) => left == right,
            (Self::Declared(left), Self::Declared(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue").field("name", &self.name).finish_non_exhaustive()
    }
}

impl From<&ast::Literal> for RuntimeValue {
    fn from(literal: &ast::Literal) -> Self {
        match literal {
            ast::Literal::Nil => Self::Primitive(Primitive::Nil),
            ast::Literal::Boolean(value) => Self::Primitive(Primitive::Boolean(*value)),
            ast::Literal::Integer(value) => Self::Primitive(Primitive::Integer(value.clone())),
            ast::Literal::Decimal(value) => Self::Primitive(Primitive::Decimal(value.clone())),
            ast::Literal::Character(value) => Self::Primitive(Primitive::Character(*value)),
            ast::Literal::String(value) => Self::Primitive(Primitive::String(value.clone())),
        }
    }
}

use std::fmt;

use crate::interpreter::scope::Scope;

/// Represents a type in the analyzed language.
///
/// The primitive variants are singletons: two primitives are the same type
/// exactly when they are the same variant. Function types compare
/// structurally, and object types compare by identity of their member scope,
/// so each `OBJECT` literal gets a type distinct from every other.
#[derive(Debug, Clone)]
pub enum Type {
    /// The top type; every type is a subtype of `Any`.
    Any,
    /// The type of `NIL`.
    Nil,
    /// The escape hatch: mutually compatible with every type.
    Dynamic,
    /// The type of `TRUE` and `FALSE`.
    Boolean,
    /// Arbitrary-precision integers.
    Integer,
    /// Arbitrary-precision decimals.
    Decimal,
    /// Single characters.
    Character,
    /// Strings.
    String,
    /// Values that support `==` and `!=`.
    Equatable,
    /// Values that support ordered comparison.
    Comparable,
    /// Values a `FOR` loop can consume.
    Iterable,
    /// A function type: parameter types and a return type.
    Function(FunctionType),
    /// An object type carrying its own member scope.
    Object(ObjectType),
}

/// The type of a function: its parameter types and return type.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    /// The parameter types, in declaration order.
    pub parameters: Vec<Type>,
    /// The return type.
    pub returns:    Box<Type>,
}

/// The type of an object: an optional name and the scope of its members.
///
/// Member lookup at analysis time searches only this scope; prototype
/// traversal is an evaluation-time concept.
#[derive(Debug, Clone)]
pub struct ObjectType {
    /// The optional object name.
    pub name:  Option<String>,
    /// The member scope. Identity of this scope is the identity of the type.
    pub scope: Scope<Type>,
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Function(left), Self::Function(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => left.scope.ptr_eq(&right.scope),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Type {
    /// Resolves a built-in type name, as written in source annotations.
    ///
    /// # Example
    /// ```
    /// use opal::interpreter::types::Type;
    ///
    /// assert_eq!(Type::named("Integer"), Some(Type::Integer));
    /// assert_eq!(Type::named("Widget"), None);
    /// ```
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "Any" => Some(Self::Any),
            "Nil" => Some(Self::Nil),
            "Dynamic" => Some(Self::Dynamic),
            "Boolean" => Some(Self::Boolean),
            "Integer" => Some(Self::Integer),
            "Decimal" => Some(Self::Decimal),
            "Character" => Some(Self::Character),
            "String" => Some(Self::String),
            "Equatable" => Some(Self::Equatable),
            "Comparable" => Some(Self::Comparable),
            "Iterable" => Some(Self::Iterable),
            _ => None,
        }
    }

    /// Returns true if `self` is a subtype of `supertype`.
    ///
    /// The relation is reflexive, `Any` is the top type, `Dynamic` is
    /// compatible in both directions, `Integer` and `Decimal` are mutually
    /// compatible, the five literal-bearing primitives are `Comparable`, and
    /// `Equatable` admits `Nil`, everything comparable, and `Iterable`.
    /// No other pairs are related.
    ///
    /// This is the relation argument passing and the operand-compatibility
    /// checks use. Declarations, assignments, and returns use the stricter
    /// [`is_assignable_to`](Self::is_assignable_to).
    ///
    /// # Example
    /// ```
    /// use opal::interpreter::types::Type;
    ///
    /// assert!(Type::Integer.is_subtype_of(&Type::Comparable));
    /// assert!(Type::Nil.is_subtype_of(&Type::Equatable));
    /// assert!(!Type::Nil.is_subtype_of(&Type::Comparable));
    /// ```
    #[must_use]
    pub fn is_subtype_of(&self, supertype: &Self) -> bool {
        if (*self == Self::Integer && *supertype == Self::Decimal)
           || (*self == Self::Decimal && *supertype == Self::Integer)
        {
            return true;
        }
        self.is_assignable_to(supertype)
    }

    /// Returns true if a value of this type may flow into a position
    /// declared at `supertype`.
    ///
    /// This is [`is_subtype_of`](Self::is_subtype_of) without the mutual
    /// `Integer`/`Decimal` compatibility: a declared `Integer` accepts only
    /// integers, so `LET x: Integer = 1.0;` is rejected even though the two
    /// numeric types are interchangeable as arguments and comparison
    /// operands.
    ///
    /// # Example
    /// ```
    /// use opal::interpreter::types::Type;
    ///
    /// assert!(Type::Decimal.is_subtype_of(&Type::Integer));
    /// assert!(!Type::Decimal.is_assignable_to(&Type::Integer));
    /// ```
    #[must_use]
    pub fn is_assignable_to(&self, supertype: &Self) -> bool {
        if *supertype == Self::Any {
            return true;
        }
        if *supertype == Self::Dynamic || *self == Self::Dynamic {
            return true;
        }
        if self == supertype {
            return true;
        }
        if *supertype == Self::Comparable {
            return matches!(self,
                            Self::Boolean
                            | Self::Integer
                            | Self::Decimal
                            | Self::Character
                            | Self::String);
        }
        if *supertype == Self::Equatable {
            return *self == Self::Nil
                   || self.is_assignable_to(&Self::Comparable)
                   || *self == Self::Iterable;
        }
        false
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "Any"),
            Self::Nil => write!(f, "Nil"),
            Self::Dynamic => write!(f, "Dynamic"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Integer => write!(f, "Integer"),
            Self::Decimal => write!(f, "Decimal"),
            Self::Character => write!(f, "Character"),
            Self::String => write!(f, "String"),
            Self::Equatable => write!(f, "Equatable"),
            Self::Comparable => write!(f, "Comparable"),
            Self::Iterable => write!(f, "Iterable"),
            Self::Function(function) => {
                write!(f, "(")?;
                for (index, parameter) in function.parameters.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, ") -> {}", function.returns)
            },
            Self::Object(object) => match &object.name {
                Some(name) => write!(f, "Object {name}"),
                None => write!(f, "Object"),
            },
        }
    }
}

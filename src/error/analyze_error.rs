#[derive(Debug)]
/// Represents all errors that can occur during semantic analysis.
///
/// Type fields are carried as rendered type names so the error can be
/// reported without holding the analyzer's type structures alive.
pub enum AnalyzeError {
    /// A name was declared twice in the same scope.
    DuplicateDefinition {
        /// The name that was redeclared.
        name: String,
    },
    /// A type annotation named a type that does not exist.
    UnknownType {
        /// The unresolved type name.
        name: String,
    },
    /// A variable reference did not resolve to a binding.
    UnknownVariable {
        /// The unresolved variable name.
        name: String,
    },
    /// A function call named a binding that does not exist.
    UnknownFunction {
        /// The unresolved function name.
        name: String,
    },
    /// A function call named a binding that is not a function.
    NotAFunction {
        /// The name of the non-function binding.
        name: String,
    },
    /// A call supplied the wrong number of arguments.
    ArgumentCountMismatch {
        /// The callee name.
        name:     String,
        /// The declared parameter count.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
    },
    /// An argument's type is not a subtype of its parameter type.
    ArgumentTypeMismatch {
        /// The callee name.
        name:     String,
        /// The declared parameter type.
        expected: String,
        /// The argument's type.
        found:    String,
    },
    /// An `IF` condition is not boolean-typed.
    ConditionNotBoolean {
        /// The condition's type.
        found: String,
    },
    /// A `FOR` expression has type `Nil` and can never be iterated.
    NotIterable,
    /// A `RETURN` appeared outside any function body.
    ReturnOutsideFunction,
    /// A returned value's type is not a subtype of the declared return type.
    ReturnTypeMismatch {
        /// The declared return type.
        expected: String,
        /// The returned value's type.
        found:    String,
    },
    /// An initializer's type is not a subtype of the declared variable type.
    DeclarationTypeMismatch {
        /// The declared variable name.
        name:     String,
        /// The declared type.
        declared: String,
        /// The initializer's type.
        found:    String,
    },
    /// An assigned value's type is not a subtype of the target's type.
    AssignmentTypeMismatch {
        /// The target's type.
        expected: String,
        /// The assigned value's type.
        found:    String,
    },
    /// The target of an assignment is neither a variable nor a property.
    InvalidAssignmentTarget,
    /// A property or method was accessed on a non-object, non-dynamic value.
    InvalidReceiver {
        /// The receiver's type.
        found: String,
    },
    /// A property or method name does not exist on the receiving object type.
    UndefinedProperty {
        /// The missing member name.
        name: String,
    },
    /// An arithmetic operand is neither `Integer` nor `Decimal`.
    OperandNotNumeric {
        /// The operand's type.
        found: String,
    },
    /// Arithmetic operands mix `Integer` with `Decimal`.
    OperandMismatch {
        /// The left operand's type.
        left:  String,
        /// The right operand's type.
        right: String,
    },
    /// A comparison operand is not a subtype of `Comparable`.
    OperandNotComparable {
        /// The operand's type.
        found: String,
    },
    /// Two operands cannot be compared because neither side's type is a
    /// subtype of the other.
    IncomparableOperands {
        /// The left operand's type.
        left:  String,
        /// The right operand's type.
        right: String,
    },
    /// A logical operand is not exactly `Boolean`.
    OperandNotBoolean {
        /// The operand's type.
        found: String,
    },
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDefinition { name } => {
                write!(f, "Analyze error: '{name}' is already defined in this scope.")
            },
            Self::UnknownType { name } => write!(f, "Analyze error: Unknown type '{name}'."),
            Self::UnknownVariable { name } => {
                write!(f, "Analyze error: Variable '{name}' is not defined.")
            },
            Self::UnknownFunction { name } => {
                write!(f, "Analyze error: Function '{name}' is not defined.")
            },
            Self::NotAFunction { name } => write!(f, "Analyze error: '{name}' is not a function."),
            Self::ArgumentCountMismatch { name, expected, found } => write!(f,
                                                                            "Analyze error: '{name}' takes {expected} argument(s) but {found} were supplied."),
            Self::ArgumentTypeMismatch { name, expected, found } => write!(f,
                                                                           "Analyze error: Argument of '{name}' has type {found}, expected a subtype of {expected}."),
            Self::ConditionNotBoolean { found } => write!(f,
                                                          "Analyze error: Condition has type {found}, expected Boolean."),
            Self::NotIterable => write!(f, "Analyze error: FOR expression can never be iterable."),
            Self::ReturnOutsideFunction => write!(f, "Analyze error: RETURN outside function."),
            Self::ReturnTypeMismatch { expected, found } => write!(f,
                                                                   "Analyze error: Return value has type {found}, expected a subtype of {expected}."),
            Self::DeclarationTypeMismatch { name, declared, found } => write!(f,
                                                                              "Analyze error: Initializer of '{name}' has type {found}, expected a subtype of {declared}."),
            Self::AssignmentTypeMismatch { expected, found } => write!(f,
                                                                       "Analyze error: Assigned value has type {found}, expected a subtype of {expected}."),
            Self::InvalidAssignmentTarget => write!(f,
                                                    "Analyze error: Assignment target must be a variable or property."),
            Self::InvalidReceiver { found } => write!(f,
                                                      "Analyze error: Property receiver has type {found}, expected an object."),
            Self::UndefinedProperty { name } => write!(f,
                                                       "Analyze error: Property '{name}' is not defined on the object."),
            Self::OperandNotNumeric { found } => write!(f,
                                                        "Analyze error: Operand has type {found}, expected Integer or Decimal."),
            Self::OperandMismatch { left, right } => write!(f,
                                                            "Analyze error: Numeric operands must match, found {left} and {right}."),
            Self::OperandNotComparable { found } => write!(f,
                                                           "Analyze error: Operand has type {found}, which is not comparable."),
            Self::IncomparableOperands { left, right } => write!(f,
                                                                 "Analyze error: Operands of types {left} and {right} cannot be compared."),
            Self::OperandNotBoolean { found } => write!(f,
                                                        "Analyze error: Operand has type {found}, expected Boolean."),
        }
    }
}

impl std::error::Error for AnalyzeError {}

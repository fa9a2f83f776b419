#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
///
/// Runtime values referenced by an error are carried in their printed form,
/// so the error stays detached from the evaluator's live state.
pub enum EvaluateError {
    /// A name was defined twice in the same scope.
    DuplicateDefinition {
        /// The name that was redefined.
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
    /// A call went through a binding that is not a function value.
    NotAFunction {
        /// The name of the non-function binding.
        name: String,
    },
    /// An `IF` condition did not evaluate to a boolean.
    ConditionNotBoolean {
        /// The printed form of the condition's value.
        found: String,
    },
    /// A `FOR` expression did not evaluate to an iterable.
    NotIterable {
        /// The printed form of the offending value.
        found: String,
    },
    /// An operand has the wrong runtime type for its operator.
    InvalidOperand {
        /// The operator's source spelling.
        operator: String,
        /// The printed form of the offending operand.
        found:    String,
    },
    /// Comparison operands are not primitives of the same kind.
    IncomparableOperands {
        /// The printed form of the left operand.
        left:  String,
        /// The printed form of the right operand.
        right: String,
    },
    /// Attempted division by zero, for either numeric kind.
    DivisionByZero,
    /// A call supplied the wrong number of arguments.
    ArgumentCountMismatch {
        /// The callee name.
        name:     String,
        /// The declared parameter count.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
    },
    /// An argument value was rejected by a built-in function.
    InvalidArgument {
        /// The callee name.
        name:    String,
        /// Details about why the argument is invalid.
        details: String,
    },
    /// Two parameters of the same function share a name.
    DuplicateParameter {
        /// The duplicated parameter name.
        name: String,
    },
    /// A method declared `this` as an explicit parameter.
    ThisParameter,
    /// A property or method was accessed on a non-object value.
    ReceiverNotObject {
        /// The printed form of the receiver.
        found: String,
    },
    /// A member was not found on the object or anywhere on its prototype
    /// chain.
    UndefinedProperty {
        /// The missing member name.
        name: String,
    },
    /// A member resolved through a method call is not callable.
    NotAMethod {
        /// The name of the non-callable member.
        name: String,
    },
    /// A `prototype` binding evaluated to something other than an object.
    PrototypeNotObject,
    /// Prototype lookup exceeded the inheritance depth cap.
    PrototypeDepthExceeded,
    /// The target of an assignment is neither a variable nor a property.
    InvalidAssignmentTarget,
    /// A `RETURN` escaped past the top level of the program.
    ReturnOutsideFunction,
}

impl std::fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDefinition { name } => write!(f,
                                                         "Evaluate error: '{name}' is already defined in the current scope."),
            Self::UnknownVariable { name } => {
                write!(f, "Evaluate error: Variable '{name}' is not defined.")
            },
            Self::UnknownFunction { name } => {
                write!(f, "Evaluate error: Function '{name}' is not defined.")
            },
            Self::NotAFunction { name } => {
                write!(f, "Evaluate error: '{name}' is not a function.")
            },
            Self::ConditionNotBoolean { found } => {
                write!(f, "Evaluate error: Condition is not a Boolean: {found}.")
            },
            Self::NotIterable { found } => {
                write!(f, "Evaluate error: Value is not iterable: {found}.")
            },
            Self::InvalidOperand { operator, found } => {
                write!(f, "Evaluate error: Invalid operand for '{operator}': {found}.")
            },
            Self::IncomparableOperands { left, right } => {
                write!(f, "Evaluate error: Cannot compare {left} with {right}.")
            },
            Self::DivisionByZero => write!(f, "Evaluate error: Division by zero."),
            Self::ArgumentCountMismatch { name, expected, found } => write!(f,
                                                                            "Evaluate error: '{name}' takes {expected} argument(s) but {found} were supplied."),
            Self::InvalidArgument { name, details } => {
                write!(f, "Evaluate error: Invalid argument to '{name}': {details}.")
            },
            Self::DuplicateParameter { name } => {
                write!(f, "Evaluate error: Duplicate parameter name '{name}'.")
            },
            Self::ThisParameter => {
                write!(f, "Evaluate error: 'this' cannot be used as a parameter name.")
            },
            Self::ReceiverNotObject { found } => {
                write!(f, "Evaluate error: Receiver is not an object: {found}.")
            },
            Self::UndefinedProperty { name } => {
                write!(f, "Evaluate error: Undefined property '{name}'.")
            },
            Self::NotAMethod { name } => {
                write!(f, "Evaluate error: Member '{name}' is not callable.")
            },
            Self::PrototypeNotObject => write!(f, "Evaluate error: Prototype must be an object."),
            Self::PrototypeDepthExceeded => {
                write!(f, "Evaluate error: Prototype chain is too deep.")
            },
            Self::InvalidAssignmentTarget => write!(f,
                                                    "Evaluate error: Assignment target must be a variable or property."),
            Self::ReturnOutsideFunction => write!(f, "Evaluate error: Return outside of function."),
        }
    }
}

impl std::error::Error for EvaluateError {}

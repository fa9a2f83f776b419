use crate::{
    ast::{BinaryOperator, Literal},
    interpreter::types::Type,
};

/// A fully analyzed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// The top-level statements in source order.
    pub statements: Vec<Stmt>,
}

/// A function parameter with its resolved type.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter name.
    pub name: String,
    /// The resolved parameter type (`DYNAMIC` when unannotated).
    pub ty:   Type,
}

/// An analyzed `LET` declaration carrying the resolved variable type.
#[derive(Debug, Clone, PartialEq)]
pub struct LetDecl {
    /// The name being declared.
    pub name:  String,
    /// The resolved variable type.
    pub ty:    Type,
    /// The analyzed initializer, if present.
    pub value: Option<Expr>,
}

/// An analyzed `DEF` declaration with resolved parameter and return types.
#[derive(Debug, Clone, PartialEq)]
pub struct DefDecl {
    /// The function name.
    pub name:        String,
    /// The parameters with their resolved types.
    pub parameters:  Vec<Parameter>,
    /// The resolved return type (`DYNAMIC` when unannotated).
    pub return_type: Type,
    /// The analyzed function body.
    pub body:        Vec<Stmt>,
}

/// An analyzed variable reference.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    /// The variable name.
    pub name: String,
    /// The type the name is bound to.
    pub ty:   Type,
}

/// An analyzed property access.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyExpr {
    /// The receiver expression.
    pub receiver: Box<Expr>,
    /// The property name.
    pub name:     String,
    /// The type of the member (`DYNAMIC` for dynamic receivers).
    pub ty:       Type,
}

/// An analyzed `OBJECT` literal together with its fresh object type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    /// The optional object name.
    pub name:    Option<String>,
    /// The analyzed fields, in declaration order.
    pub fields:  Vec<LetDecl>,
    /// The analyzed methods, in declaration order.
    pub methods: Vec<DefDecl>,
    /// The object type created for this literal.
    pub ty:      Type,
}

/// An analyzed statement.
///
/// Structurally parallel to [`crate::ast::Stmt`], except that assignments are
/// split into their two legal target forms so a consumer never has to
/// re-discover what the grammar allowed.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A variable declaration.
    Let(LetDecl),
    /// A function declaration.
    Def(DefDecl),
    /// A conditional statement.
    If {
        /// The analyzed condition, known to be boolean-typed.
        condition: Expr,
        /// Statements executed when the condition is true.
        then_body: Vec<Stmt>,
        /// Statements executed when the condition is false.
        else_body: Vec<Stmt>,
    },
    /// A `FOR` loop.
    For {
        /// The loop variable name.
        name:     String,
        /// The type bound to the loop variable.
        ty:       Type,
        /// The analyzed iterable expression.
        iterable: Expr,
        /// The loop body.
        body:     Vec<Stmt>,
    },
    /// A `RETURN` statement.
    Return {
        /// The analyzed return value, if present.
        value: Option<Expr>,
    },
    /// An expression statement.
    Expression(Expr),
    /// An assignment whose target is a variable.
    AssignVariable {
        /// The target variable.
        target: VariableExpr,
        /// The analyzed value.
        value:  Expr,
    },
    /// An assignment whose target is an object property.
    AssignProperty {
        /// The target property.
        target: PropertyExpr,
        /// The analyzed value.
        value:  Expr,
    },
}

/// An analyzed expression. Every variant carries its resolved [`Type`],
/// retrievable uniformly through [`Expr::ty`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal with its literal type.
    Literal {
        /// The literal value.
        value: Literal,
        /// The literal's type.
        ty:    Type,
    },
    /// A parenthesized expression; its type is the inner expression's type.
    Group(Box<Expr>),
    /// A binary operation with its result type.
    Binary {
        /// The operator, preserved unchanged from the AST.
        operator: BinaryOperator,
        /// Left operand.
        left:     Box<Expr>,
        /// Right operand.
        right:    Box<Expr>,
        /// The result type.
        ty:       Type,
    },
    /// A variable reference.
    Variable(VariableExpr),
    /// A property access.
    Property(PropertyExpr),
    /// A function call with the callee's return type.
    Function {
        /// The function name.
        name:      String,
        /// The analyzed arguments.
        arguments: Vec<Expr>,
        /// The call's result type.
        ty:        Type,
    },
    /// A method call with the callee's return type.
    Method {
        /// The receiver expression.
        receiver:  Box<Expr>,
        /// The method name.
        name:      String,
        /// The analyzed arguments.
        arguments: Vec<Expr>,
        /// The call's result type.
        ty:        Type,
    },
    /// An `OBJECT` literal.
    Object(ObjectLiteral),
}

impl Expr {
    /// Returns the resolved type of this expression.
    ///
    /// Groups delegate to their inner expression; every other variant stores
    /// its type directly.
    #[must_use]
    pub fn ty(&self) -> Type {
        match self {
            Self::Group(inner) => inner.ty(),
            Self::Literal { ty, .. }
            | Self::Binary { ty, .. }
            | Self::Function { ty, .. }
            | Self::Method { ty, .. } => ty.clone(),
            Self::Variable(variable) => variable.ty.clone(),
            Self::Property(property) => property.ty.clone(),
            Self::Object(object) => object.ty.clone(),
        }
    }
}

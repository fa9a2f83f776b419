use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// Represents a literal value in the language.
///
/// `Literal` covers all raw, constant values that can appear directly in
/// source code. Numeric literals are arbitrary precision: integers are backed
/// by [`BigInt`] and decimals by [`BigDecimal`], so source spellings never
/// overflow during decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// The `NIL` literal.
    Nil,
    /// A boolean literal value: `TRUE` or `FALSE`.
    Boolean(bool),
    /// An arbitrary-precision integer literal, such as `42` or `-0`.
    Integer(BigInt),
    /// An arbitrary-precision decimal literal, such as `3.14` or `1.0e-2`.
    Decimal(BigDecimal),
    /// A character literal, such as `'c'` or `'\n'`.
    Character(char),
    /// A string literal with its escape sequences already resolved.
    String(String),
}

/// A complete program: the sequence of top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// The top-level statements in source order.
    pub statements: Vec<Stmt>,
}

/// A `LET` declaration, used both as a statement and as an object field.
///
/// The declared type and the initializer are each optional; the analyzer
/// decides the bound type from whichever is present.
#[derive(Debug, Clone, PartialEq)]
pub struct LetDecl {
    /// The name being declared.
    pub name:      String,
    /// The declared type name, if the source carried a `: Type` annotation.
    pub type_name: Option<String>,
    /// The initializer expression, if present.
    pub value:     Option<Expr>,
}

/// A single function parameter with its optional type annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter name.
    pub name:      String,
    /// The annotated type name, if present.
    pub type_name: Option<String>,
}

/// A `DEF` declaration, used both as a statement and as an object method.
#[derive(Debug, Clone, PartialEq)]
pub struct DefDecl {
    /// The function name.
    pub name:        String,
    /// The parameter list in declaration order.
    pub parameters:  Vec<Parameter>,
    /// The annotated return type name, if present.
    pub return_type: Option<String>,
    /// The statements making up the function body.
    pub body:        Vec<Stmt>,
}

/// An `OBJECT` literal: optional name, fields first, then methods.
///
/// The parser enforces the ordering; a field appearing after a method is a
/// parse error.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    /// The optional object name.
    pub name:    Option<String>,
    /// The field declarations, in source order.
    pub fields:  Vec<LetDecl>,
    /// The method declarations, in source order.
    pub methods: Vec<DefDecl>,
}

/// An abstract syntax tree (AST) node representing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A variable declaration using `LET`.
    Let(LetDecl),
    /// A function declaration using `DEF`.
    Def(DefDecl),
    /// A conditional statement with optional `ELSE` body.
    If {
        /// The condition expression.
        condition: Expr,
        /// Statements executed when the condition is true.
        then_body: Vec<Stmt>,
        /// Statements executed when the condition is false.
        else_body: Vec<Stmt>,
    },
    /// A `FOR name IN expr` loop.
    For {
        /// The loop variable name.
        name:     String,
        /// The expression producing the iterable.
        iterable: Expr,
        /// The loop body.
        body:     Vec<Stmt>,
    },
    /// A `RETURN` statement with optional value.
    ///
    /// The guarded form `RETURN expr IF cond;` never reaches the AST; the
    /// parser desugars it into an `If` wrapping a plain `Return`.
    Return {
        /// The returned value, or `None` for a bare `RETURN;`.
        value: Option<Expr>,
    },
    /// An expression evaluated for its result.
    Expression(Expr),
    /// An assignment to a variable or property.
    ///
    /// The grammar allows any expression as the target; the analyzer and
    /// evaluator restrict it to `Variable` or `Property`.
    Assignment {
        /// The assignment target.
        target: Expr,
        /// The assigned value.
        value:  Expr,
    },
}

/// An abstract syntax tree (AST) node representing an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),
    /// A parenthesized expression.
    Group(Box<Expr>),
    /// A binary operation.
    Binary {
        /// The operator.
        operator: BinaryOperator,
        /// Left operand.
        left:     Box<Expr>,
        /// Right operand.
        right:    Box<Expr>,
    },
    /// Reference to a variable by name.
    Variable(String),
    /// A property access, such as `receiver.name`.
    Property {
        /// The receiver expression.
        receiver: Box<Expr>,
        /// The property name.
        name:     String,
    },
    /// A function call, such as `name(arguments)`.
    Function {
        /// The function name.
        name:      String,
        /// The arguments in call order.
        arguments: Vec<Expr>,
    },
    /// A method call, such as `receiver.name(arguments)`.
    Method {
        /// The receiver expression.
        receiver:  Box<Expr>,
        /// The method name.
        name:      String,
        /// The arguments in call order.
        arguments: Vec<Expr>,
    },
    /// An `OBJECT` literal expression.
    Object(ObjectLiteral),
}

/// Represents a binary operator.
///
/// The tags are preserved unchanged through the typed IR, so a code generator
/// can dispatch on them directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`AND`)
    And,
    /// Logical or (`OR`)
    Or,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::And => "AND",
            Self::Or => "OR",
        };
        write!(f, "{operator}")
    }
}

use std::{mem, rc::Rc};

use crate::{
    ast,
    error::EvaluateError,
    interpreter::{
        scope::Scope,
        value::{DeclaredFunction, Definition, FunctionValue, RuntimeValue},
    },
};

/// The non-local control signal threaded through evaluation.
///
/// A `RETURN` statement does not produce a value; it unwinds to the
/// innermost active function invocation, which converts the signal back
/// into that call's result. Domain failures ride the same channel so both
/// unwind identically, but only `invoke` absorbs returns; errors always
/// surface to the caller.
pub(in crate::interpreter::evaluator) enum Control {
    /// A genuine evaluation failure.
    Error(EvaluateError),
    /// A `RETURN` escaping to the enclosing function invocation.
    Return(RuntimeValue),
}

impl From<EvaluateError> for Control {
    fn from(error: EvaluateError) -> Self {
        Self::Error(error)
    }
}

/// Result type used inside the evaluator, where returns are still in
/// flight.
pub(in crate::interpreter::evaluator) type Exec<T> = Result<T, Control>;

/// Executes an AST against a threaded runtime scope.
///
/// The evaluator visits the AST directly; it neither requires nor consults
/// a prior analysis pass. Every `IF`, `FOR` iteration, function invocation,
/// and `OBJECT` literal opens fresh child scopes, and the pre-entry scope is
/// restored on every exit path, including a return escape.
///
/// # Example
/// ```
/// use opal::interpreter::{
///     evaluator::{builtin, core::Evaluator},
///     lexer, parser,
/// };
///
/// let tokens = lexer::lex("LET x = 1 + 2; x;").unwrap();
/// let source = parser::core::parse_source(&tokens).unwrap();
///
/// let mut evaluator = Evaluator::new(builtin::runtime_scope());
/// let value = evaluator.evaluate(&source).unwrap();
///
/// assert_eq!(value.print(), "3");
/// ```
pub struct Evaluator {
    pub(in crate::interpreter::evaluator) scope: Scope<RuntimeValue>,
}

impl Evaluator {
    /// Creates an evaluator rooted at the given runtime scope, typically
    /// [`builtin::runtime_scope`](super::builtin::runtime_scope).
    #[must_use]
    pub fn new(scope: Scope<RuntimeValue>) -> Self {
        Self { scope }
    }

    /// Returns a handle to the evaluator's current scope.
    #[must_use]
    pub fn scope(&self) -> Scope<RuntimeValue> {
        self.scope.clone()
    }

    /// Evaluates a complete program, returning the last statement's value.
    ///
    /// # Errors
    /// Returns an [`EvaluateError`] for any runtime failure. A `RETURN`
    /// that unwinds past the top level is reported as a return outside of
    /// function.
    pub fn evaluate(&mut self, source: &ast::Source) -> Result<RuntimeValue, EvaluateError> {
        let mut value = RuntimeValue::nil();
        for statement in &source.statements {
            match self.statement(statement) {
                Ok(result) => value = result,
                Err(Control::Return(_)) => return Err(EvaluateError::ReturnOutsideFunction),
                Err(Control::Error(error)) => return Err(error),
            }
        }
        Ok(value)
    }

    pub(in crate::interpreter::evaluator) fn statement(&mut self,
                                                       statement: &ast::Stmt)
                                                       -> Exec<RuntimeValue> {
        match statement {
            ast::Stmt::Let(decl) => self.let_stmt(decl),
            ast::Stmt::Def(decl) => self.def_stmt(decl),
            ast::Stmt::If { condition,
                            then_body,
                            else_body, } => self.if_stmt(condition, then_body, else_body),
            ast::Stmt::For { name, iterable, body } => self.for_stmt(name, iterable, body),
            ast::Stmt::Return { value } => self.return_stmt(value.as_ref()),
            ast::Stmt::Expression(expression) => self.expression(expression),
            ast::Stmt::Assignment { target, value } => self.assignment(target, value),
        }
    }

    /// Evaluates a `LET`, binding the initializer's value (or nil) in the
    /// current scope. Also used for object fields, where the current scope
    /// is the object's member scope.
    pub(in crate::interpreter::evaluator) fn let_stmt(&mut self,
                                                      decl: &ast::LetDecl)
                                                      -> Exec<RuntimeValue> {
        if self.scope.resolve(&decl.name, true).is_some() {
            return Err(EvaluateError::DuplicateDefinition { name: decl.name.clone() }.into());
        }

        let value = match &decl.value {
            Some(value) => self.expression(value)?,
            None => RuntimeValue::nil(),
        };

        self.scope.define(&decl.name, value.clone());
        Ok(value)
    }

    /// Evaluates a `DEF`, binding a function value whose closure captures
    /// the defining scope.
    fn def_stmt(&mut self, decl: &ast::DefDecl) -> Exec<RuntimeValue> {
        if self.scope.resolve(&decl.name, true).is_some() {
            return Err(EvaluateError::DuplicateDefinition { name: decl.name.clone() }.into());
        }

        let parameters = decl.parameters.iter().map(|parameter| parameter.name.clone()).collect();
        let function =
            RuntimeValue::Function(FunctionValue { name:       decl.name.clone(),
                                                   definition:
                                                       Definition::Declared(Rc::new(DeclaredFunction { parameters,
                                                                                                       body: decl.body.clone(),
                                                                                                       scope: self.scope.clone(),
                                                                                                       binds_receiver: false, })), });

        self.scope.define(&decl.name, function.clone());
        Ok(function)
    }

    fn if_stmt(&mut self,
               condition: &ast::Expr,
               then_body: &[ast::Stmt],
               else_body: &[ast::Stmt])
               -> Exec<RuntimeValue> {
        let condition = self.expression(condition)?;
        let Some(value) = condition.as_boolean() else {
            return Err(EvaluateError::ConditionNotBoolean { found: condition.print() }.into());
        };

        let body = if value { then_body } else { else_body };
        let scope = Scope::nested(&self.scope);
        self.run_block(body, scope)
    }

    /// Evaluates a `FOR` loop. Each element gets a fresh iteration scope
    /// binding the loop variable, with the body in a child scope of that.
    fn for_stmt(&mut self,
                name: &str,
                iterable: &ast::Expr,
                body: &[ast::Stmt])
                -> Exec<RuntimeValue> {
        let value = self.expression(iterable)?;
        let Some(elements) = value.as_list() else {
            return Err(EvaluateError::NotIterable { found: value.print() }.into());
        };

        for element in elements {
            let iteration_scope = Scope::nested(&self.scope);
            iteration_scope.define(name, element.clone());
            let body_scope = Scope::nested(&iteration_scope);
            self.run_block(body, body_scope)?;
        }

        Ok(RuntimeValue::nil())
    }

    fn return_stmt(&mut self, value: Option<&ast::Expr>) -> Exec<RuntimeValue> {
        let value = match value {
            Some(value) => self.expression(value)?,
            None => RuntimeValue::nil(),
        };
        Err(Control::Return(value))
    }

    fn assignment(&mut self, target: &ast::Expr, value: &ast::Expr) -> Exec<RuntimeValue> {
        match target {
            ast::Expr::Variable(name) => {
                if self.scope.resolve(name, false).is_none() {
                    return Err(EvaluateError::UnknownVariable { name: name.clone() }.into());
                }
                let value = self.expression(value)?;
                self.scope.assign(name, value.clone());
                Ok(value)
            },
            ast::Expr::Property { receiver, name } => {
                let receiver = self.expression(receiver)?;
                let Some(object) = receiver.as_object() else {
                    return Err(EvaluateError::ReceiverNotObject { found:
                                                                      receiver.print(), }.into());
                };
                let object = object.clone();
                if object.scope.resolve(name, true).is_none() {
                    return Err(EvaluateError::UndefinedProperty { name: name.clone() }.into());
                }
                let value = self.expression(value)?;
                object.scope.assign(name, value.clone());
                Ok(value)
            },
            _ => Err(EvaluateError::InvalidAssignmentTarget.into()),
        }
    }

    pub(in crate::interpreter::evaluator) fn expression(&mut self,
                                                        expression: &ast::Expr)
                                                        -> Exec<RuntimeValue> {
        match expression {
            ast::Expr::Literal(literal) => Ok(RuntimeValue::from(literal)),
            ast::Expr::Group(inner) => self.expression(inner),
            ast::Expr::Binary { operator, left, right } => self.binary(*operator, left, right),
            ast::Expr::Variable(name) => match self.scope.resolve(name, false) {
                Some(value) => Ok(value),
                None => Err(EvaluateError::UnknownVariable { name: name.clone() }.into()),
            },
            ast::Expr::Property { receiver, name } => self.property(receiver, name),
            ast::Expr::Function { name, arguments } => self.function_call(name, arguments),
            ast::Expr::Method { receiver,
                                name,
                                arguments, } => self.method_call(receiver, name, arguments),
            ast::Expr::Object(literal) => self.object_literal(literal),
        }
    }

    fn function_call(&mut self, name: &str, arguments: &[ast::Expr]) -> Exec<RuntimeValue> {
        let Some(value) = self.scope.resolve(name, false) else {
            return Err(EvaluateError::UnknownFunction { name: name.to_string() }.into());
        };
        let Some(function) = value.as_function() else {
            return Err(EvaluateError::NotAFunction { name: name.to_string() }.into());
        };
        let function = function.clone();

        let mut evaluated = Vec::new();
        for argument in arguments {
            evaluated.push(self.expression(argument)?);
        }

        Ok(self.invoke(&function, evaluated)?)
    }

    /// Invokes a function value with already-evaluated arguments.
    ///
    /// Declared functions run their body in a fresh body scope under a
    /// fresh parameter scope chained to the captured defining scope. A
    /// return escape from the body becomes this call's result; the caller's
    /// scope is restored on every path.
    pub(in crate::interpreter::evaluator) fn invoke(&mut self,
                                                    function: &FunctionValue,
                                                    arguments: Vec<RuntimeValue>)
                                                    -> Result<RuntimeValue, EvaluateError> {
        let declared = match &function.definition {
            Definition::Native(native) => return native(arguments),
            Definition::Declared(declared) => declared,
        };

        let expected = declared.parameters.len() + usize::from(declared.binds_receiver);
        if arguments.len() != expected {
            return Err(EvaluateError::ArgumentCountMismatch { name:     function.name.clone(),
                                                              expected,
                                                              found:    arguments.len(), });
        }
        if declared.binds_receiver && declared.parameters.iter().any(|name| name == "this") {
            return Err(EvaluateError::ThisParameter);
        }

        let parameter_scope = Scope::nested(&declared.scope);
        let mut arguments = arguments;
        if declared.binds_receiver {
            parameter_scope.define("this", arguments.remove(0));
        }
        for (name, argument) in declared.parameters.iter().zip(arguments) {
            if parameter_scope.resolve(name, true).is_some() {
                return Err(EvaluateError::DuplicateParameter { name: name.clone() });
            }
            parameter_scope.define(name, argument);
        }

        let body_scope = Scope::nested(&parameter_scope);
        let previous = mem::replace(&mut self.scope, body_scope);

        let mut outcome = Ok(RuntimeValue::nil());
        for statement in &declared.body {
            if let Err(control) = self.statement(statement) {
                outcome = match control {
                    Control::Return(value) => Ok(value),
                    Control::Error(error) => Err(error),
                };
                break;
            }
        }

        self.scope = previous;
        outcome
    }

    /// Runs a statement list in the given scope, restoring the current
    /// scope afterwards on every path. Returns the last statement's value.
    pub(in crate::interpreter::evaluator) fn run_block(&mut self,
                                                       statements: &[ast::Stmt],
                                                       scope: Scope<RuntimeValue>)
                                                       -> Exec<RuntimeValue> {
        let previous = mem::replace(&mut self.scope, scope);

        let mut result = Ok(RuntimeValue::nil());
        for statement in statements {
            result = self.statement(statement);
            if result.is_err() {
                break;
            }
        }

        self.scope = previous;
        result
    }
}

use crate::{
    ast,
    error::AnalyzeError,
    interpreter::{
        scope::Scope,
        types::{FunctionType, Type},
    },
    ir,
};

/// Result type used by the analyzer.
pub type AnalyzeResult<T> = Result<T, AnalyzeError>;

/// The name under which a function's return type is recorded in its body
/// scope, letting `RETURN` statements resolve it lexically. The `$` prefix
/// keeps it out of the language's identifier space.
pub(in crate::interpreter::analyzer) const RETURN_BINDING: &str = "$RETURN";

/// Walks an AST, resolving names and types against a threaded type scope and
/// producing the typed IR.
///
/// The analyzer and the evaluator visit the AST independently: analysis is
/// not a prerequisite for execution, and the two deliberately disagree in a
/// few documented places (loop variable types, prototype traversal).
///
/// # Example
/// ```
/// use opal::interpreter::analyzer::{core::Analyzer, environment};
///
/// let tokens = opal::interpreter::lexer::lex("LET x = 1;").unwrap();
/// let source = opal::interpreter::parser::core::parse_source(&tokens).unwrap();
///
/// let mut analyzer = Analyzer::new(environment::type_scope());
/// assert!(analyzer.analyze(&source).is_ok());
/// ```
pub struct Analyzer {
    pub(in crate::interpreter::analyzer) scope: Scope<Type>,
}

impl Analyzer {
    /// Creates an analyzer rooted at the given type scope, typically
    /// [`environment::type_scope`](super::environment::type_scope).
    #[must_use]
    pub fn new(scope: Scope<Type>) -> Self {
        Self { scope }
    }

    /// Returns a handle to the analyzer's current scope.
    #[must_use]
    pub fn scope(&self) -> Scope<Type> {
        self.scope.clone()
    }

    /// Analyzes a complete program.
    ///
    /// # Errors
    /// Returns an [`AnalyzeError`] describing the first statement that
    /// violates the name or type rules.
    pub fn analyze(&mut self, source: &ast::Source) -> AnalyzeResult<ir::Source> {
        let mut statements = Vec::new();
        for statement in &source.statements {
            statements.push(self.statement(statement)?);
        }
        Ok(ir::Source { statements })
    }

    pub(in crate::interpreter::analyzer) fn statement(&mut self,
                                                      statement: &ast::Stmt)
                                                      -> AnalyzeResult<ir::Stmt> {
        match statement {
            ast::Stmt::Let(decl) => Ok(ir::Stmt::Let(self.let_decl(decl)?)),
            ast::Stmt::Def(decl) => Ok(ir::Stmt::Def(self.def_decl(decl)?)),
            ast::Stmt::If { condition,
                            then_body,
                            else_body, } => self.if_stmt(condition, then_body, else_body),
            ast::Stmt::For { name, iterable, body } => self.for_stmt(name, iterable, body),
            ast::Stmt::Return { value } => self.return_stmt(value.as_ref()),
            ast::Stmt::Expression(expression) => {
                Ok(ir::Stmt::Expression(self.expression(expression)?))
            },
            ast::Stmt::Assignment { target, value } => self.assignment(target, value),
        }
    }

    /// Analyzes a `LET` declaration and binds the name in the current scope.
    ///
    /// The bound type is the declared type if annotated, else the
    /// initializer's type, else `Dynamic`. When both are present the
    /// initializer must be a subtype of the declaration.
    pub(in crate::interpreter::analyzer) fn let_decl(&mut self,
                                                     decl: &ast::LetDecl)
                                                     -> AnalyzeResult<ir::LetDecl> {
        if self.scope.resolve(&decl.name, true).is_some() {
            return Err(AnalyzeError::DuplicateDefinition { name: decl.name.clone() });
        }

        let declared = match &decl.type_name {
            Some(name) => Some(resolve_type_name(name)?),
            None => None,
        };

        let value = match &decl.value {
            Some(value) => Some(self.expression(value)?),
            None => None,
        };
        let value_type = value.as_ref().map(ir::Expr::ty);

        let variable_type = declared.clone().or_else(|| value_type.clone()).unwrap_or(Type::Dynamic);

        if let (Some(declared), Some(value_type)) = (&declared, &value_type) {
            if !value_type.is_assignable_to(declared) {
                return Err(AnalyzeError::DeclarationTypeMismatch { name:     decl.name.clone(),
                                                                   declared: declared.to_string(),
                                                                   found:
                                                                       value_type.to_string(), });
            }
        }

        self.scope.define(&decl.name, variable_type.clone());

        Ok(ir::LetDecl { name: decl.name.clone(),
                         ty: variable_type,
                         value })
    }

    /// Analyzes a `DEF` declaration.
    ///
    /// The function type is bound in the enclosing scope before the body is
    /// visited, so recursive calls resolve. The body is analyzed in a child
    /// scope holding the parameters and the `$RETURN` entry.
    pub(in crate::interpreter::analyzer) fn def_decl(&mut self,
                                                     decl: &ast::DefDecl)
                                                     -> AnalyzeResult<ir::DefDecl> {
        if self.scope.resolve(&decl.name, true).is_some() {
            return Err(AnalyzeError::DuplicateDefinition { name: decl.name.clone() });
        }

        let mut parameters = Vec::new();
        for parameter in &decl.parameters {
            let ty = match &parameter.type_name {
                Some(name) => resolve_type_name(name)?,
                None => Type::Dynamic,
            };
            parameters.push(ir::Parameter { name: parameter.name.clone(),
                                            ty });
        }

        let return_type = match &decl.return_type {
            Some(name) => resolve_type_name(name)?,
            None => Type::Dynamic,
        };

        let function_type =
            Type::Function(FunctionType { parameters: parameters.iter()
                                                                .map(|parameter| {
                                                                    parameter.ty.clone()
                                                                })
                                                                .collect(),
                                          returns:    Box::new(return_type.clone()), });
        self.scope.define(&decl.name, function_type);

        let previous = self.scope.clone();
        self.scope = Scope::nested(&previous);

        let body = self.def_body(&parameters, &return_type, &decl.body);

        self.scope = previous;
        let body = body?;

        Ok(ir::DefDecl { name: decl.name.clone(),
                         parameters,
                         return_type,
                         body })
    }

    fn def_body(&mut self,
                parameters: &[ir::Parameter],
                return_type: &Type,
                body: &[ast::Stmt])
                -> AnalyzeResult<Vec<ir::Stmt>> {
        for parameter in parameters {
            if self.scope.resolve(&parameter.name, true).is_some() {
                return Err(AnalyzeError::DuplicateDefinition { name: parameter.name.clone() });
            }
            self.scope.define(&parameter.name, parameter.ty.clone());
        }
        self.scope.define(RETURN_BINDING, return_type.clone());

        let mut statements = Vec::new();
        for statement in body {
            statements.push(self.statement(statement)?);
        }
        Ok(statements)
    }

    fn if_stmt(&mut self,
               condition: &ast::Expr,
               then_body: &[ast::Stmt],
               else_body: &[ast::Stmt])
               -> AnalyzeResult<ir::Stmt> {
        let condition = self.expression(condition)?;
        if !condition.ty().is_assignable_to(&Type::Boolean) {
            return Err(AnalyzeError::ConditionNotBoolean { found: condition.ty().to_string() });
        }

        let then_body = self.child_block(then_body)?;
        let else_body = self.child_block(else_body)?;

        Ok(ir::Stmt::If { condition,
                          then_body,
                          else_body })
    }

    fn for_stmt(&mut self,
                name: &str,
                iterable: &ast::Expr,
                body: &[ast::Stmt])
                -> AnalyzeResult<ir::Stmt> {
        let iterable = self.expression(iterable)?;
        if iterable.ty() == Type::Nil {
            return Err(AnalyzeError::NotIterable);
        }

        let previous = self.scope.clone();
        self.scope = Scope::nested(&previous);
        // The loop variable is bound as Integer regardless of the iterable's
        // element type; the type model cannot express element types.
        self.scope.define(name, Type::Integer);

        let body = self.block(body);

        self.scope = previous;

        Ok(ir::Stmt::For { name: name.to_string(),
                           ty: Type::Integer,
                           iterable,
                           body: body? })
    }

    fn return_stmt(&mut self, value: Option<&ast::Expr>) -> AnalyzeResult<ir::Stmt> {
        let Some(return_type) = self.scope.resolve(RETURN_BINDING, false) else {
            return Err(AnalyzeError::ReturnOutsideFunction);
        };

        let value = match value {
            Some(value) => Some(self.expression(value)?),
            None => None,
        };
        let value_type = value.as_ref().map_or(Type::Nil, ir::Expr::ty);

        if !value_type.is_assignable_to(&return_type) {
            return Err(AnalyzeError::ReturnTypeMismatch { expected: return_type.to_string(),
                                                          found:    value_type.to_string(), });
        }

        Ok(ir::Stmt::Return { value })
    }

    fn assignment(&mut self, target: &ast::Expr, value: &ast::Expr) -> AnalyzeResult<ir::Stmt> {
        match target {
            ast::Expr::Variable(name) => {
                let Some(existing) = self.scope.resolve(name, false) else {
                    return Err(AnalyzeError::UnknownVariable { name: name.clone() });
                };

                let value = self.expression(value)?;
                if !value.ty().is_assignable_to(&existing) {
                    return Err(AnalyzeError::AssignmentTypeMismatch { expected:
                                                                          existing.to_string(),
                                                                      found:
                                                                          value.ty().to_string(), });
                }

                Ok(ir::Stmt::AssignVariable { target: ir::VariableExpr { name: name.clone(),
                                                                         ty:   existing, },
                                              value })
            },
            ast::Expr::Property { receiver, name } => {
                let receiver = self.expression(receiver)?;
                let member_type = match receiver.ty() {
                    Type::Object(object) => match object.scope.resolve(name, true) {
                        Some(member) => member,
                        None => {
                            return Err(AnalyzeError::UndefinedProperty { name: name.clone() });
                        },
                    },
                    Type::Dynamic => Type::Dynamic,
                    other => {
                        return Err(AnalyzeError::InvalidReceiver { found: other.to_string() });
                    },
                };

                let value = self.expression(value)?;
                if !value.ty().is_assignable_to(&member_type) {
                    return Err(AnalyzeError::AssignmentTypeMismatch { expected:
                                                                          member_type.to_string(),
                                                                      found:
                                                                          value.ty().to_string(), });
                }

                Ok(ir::Stmt::AssignProperty { target: ir::PropertyExpr { receiver:
                                                                             Box::new(receiver),
                                                                         name: name.clone(),
                                                                         ty: member_type, },
                                              value })
            },
            _ => Err(AnalyzeError::InvalidAssignmentTarget),
        }
    }

    /// Analyzes a statement list in a fresh child scope, restoring the
    /// current scope afterwards even on failure.
    fn child_block(&mut self, statements: &[ast::Stmt]) -> AnalyzeResult<Vec<ir::Stmt>> {
        let previous = self.scope.clone();
        self.scope = Scope::nested(&previous);
        let result = self.block(statements);
        self.scope = previous;
        result
    }

    fn block(&mut self, statements: &[ast::Stmt]) -> AnalyzeResult<Vec<ir::Stmt>> {
        let mut analyzed = Vec::new();
        for statement in statements {
            analyzed.push(self.statement(statement)?);
        }
        Ok(analyzed)
    }
}

/// Resolves a type annotation to a built-in type.
pub(in crate::interpreter::analyzer) fn resolve_type_name(name: &str) -> AnalyzeResult<Type> {
    Type::named(name).ok_or_else(|| AnalyzeError::UnknownType { name: name.to_string() })
}

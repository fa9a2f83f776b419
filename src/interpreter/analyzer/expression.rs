use crate::{
    ast::{self, BinaryOperator},
    error::AnalyzeError,
    interpreter::{
        analyzer::core::{AnalyzeResult, Analyzer},
        scope::Scope,
        types::{ObjectType, Type},
    },
    ir,
};

impl Analyzer {
    /// Analyzes an expression, producing its IR with a resolved type.
    pub(in crate::interpreter::analyzer) fn expression(&mut self,
                                                       expression: &ast::Expr)
                                                       -> AnalyzeResult<ir::Expr> {
        match expression {
            ast::Expr::Literal(literal) => Ok(literal_expr(literal)),
            ast::Expr::Group(inner) => Ok(ir::Expr::Group(Box::new(self.expression(inner)?))),
            ast::Expr::Binary { operator, left, right } => self.binary(*operator, left, right),
            ast::Expr::Variable(name) => self.variable(name),
            ast::Expr::Property { receiver, name } => self.property(receiver, name),
            ast::Expr::Function { name, arguments } => self.function_call(name, arguments),
            ast::Expr::Method { receiver,
                                name,
                                arguments, } => self.method_call(receiver, name, arguments),
            ast::Expr::Object(literal) => self.object_literal(literal),
        }
    }

    /// Analyzes a binary expression. Both operands are analyzed first; the
    /// operator family then decides the result type.
    fn binary(&mut self,
              operator: BinaryOperator,
              left: &ast::Expr,
              right: &ast::Expr)
              -> AnalyzeResult<ir::Expr> {
        let left = self.expression(left)?;
        let right = self.expression(right)?;
        let left_type = left.ty();
        let right_type = right.ty();

        let ty = match operator {
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div => math_type(operator, &left_type, &right_type)?,
            BinaryOperator::Equal | BinaryOperator::NotEqual => {
                equality_type(&left_type, &right_type)?
            },
            BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual => comparison_type(&left_type, &right_type)?,
            BinaryOperator::And | BinaryOperator::Or => boolean_type(&left_type, &right_type)?,
        };

        Ok(ir::Expr::Binary { operator,
                              left: Box::new(left),
                              right: Box::new(right),
                              ty })
    }

    fn variable(&mut self, name: &str) -> AnalyzeResult<ir::Expr> {
        let Some(ty) = self.scope.resolve(name, false) else {
            return Err(AnalyzeError::UnknownVariable { name: name.to_string() });
        };
        Ok(ir::Expr::Variable(ir::VariableExpr { name: name.to_string(),
                                                 ty }))
    }

    /// Analyzes a property access. Object receivers are searched in their
    /// own member scope only; dynamic receivers yield `Dynamic`.
    fn property(&mut self, receiver: &ast::Expr, name: &str) -> AnalyzeResult<ir::Expr> {
        let receiver = self.expression(receiver)?;
        let ty = self.member_type(&receiver, name)?;

        Ok(ir::Expr::Property(ir::PropertyExpr { receiver: Box::new(receiver),
                                                 name: name.to_string(),
                                                 ty }))
    }

    fn function_call(&mut self, name: &str, arguments: &[ast::Expr]) -> AnalyzeResult<ir::Expr> {
        let Some(resolved) = self.scope.resolve(name, false) else {
            return Err(AnalyzeError::UnknownFunction { name: name.to_string() });
        };
        let Type::Function(function) = resolved else {
            return Err(AnalyzeError::NotAFunction { name: name.to_string() });
        };

        if function.parameters.len() != arguments.len() {
            return Err(AnalyzeError::ArgumentCountMismatch { name:     name.to_string(),
                                                             expected: function.parameters.len(),
                                                             found:    arguments.len(), });
        }

        let mut analyzed = Vec::new();
        for (argument, parameter) in arguments.iter().zip(&function.parameters) {
            let argument = self.expression(argument)?;
            if !argument.ty().is_subtype_of(parameter) {
                return Err(AnalyzeError::ArgumentTypeMismatch { name:     name.to_string(),
                                                                expected: parameter.to_string(),
                                                                found:
                                                                    argument.ty().to_string(), });
            }
            analyzed.push(argument);
        }

        Ok(ir::Expr::Function { name:      name.to_string(),
                                arguments: analyzed,
                                ty:        *function.returns, })
    }

    /// Analyzes a method call. The member is looked up like a property; when
    /// it resolves to a function type the call shape is checked against it,
    /// otherwise the call types as `Dynamic`.
    fn method_call(&mut self,
                   receiver: &ast::Expr,
                   name: &str,
                   arguments: &[ast::Expr])
                   -> AnalyzeResult<ir::Expr> {
        let receiver = self.expression(receiver)?;
        let member_type = self.member_type(&receiver, name)?;

        let mut analyzed = Vec::new();
        for argument in arguments {
            analyzed.push(self.expression(argument)?);
        }

        let ty = if let Type::Function(function) = member_type {
            if function.parameters.len() != analyzed.len() {
                return Err(AnalyzeError::ArgumentCountMismatch { name:     name.to_string(),
                                                                 expected:
                                                                     function.parameters.len(),
                                                                 found:    analyzed.len(), });
            }
            for (argument, parameter) in analyzed.iter().zip(&function.parameters) {
                if !argument.ty().is_subtype_of(parameter) {
                    return Err(AnalyzeError::ArgumentTypeMismatch { name: name.to_string(),
                                                                    expected:
                                                                        parameter.to_string(),
                                                                    found:
                                                                        argument.ty().to_string(), });
                }
            }
            *function.returns
        } else {
            Type::Dynamic
        };

        Ok(ir::Expr::Method { receiver: Box::new(receiver),
                              name: name.to_string(),
                              arguments: analyzed,
                              ty })
    }

    /// Analyzes an `OBJECT` literal into a fresh object type.
    ///
    /// The member scope has no parent, so field initializers and method
    /// bodies resolve against the members themselves plus their own locals
    /// only. Fields are analyzed before methods, matching declaration order.
    fn object_literal(&mut self, literal: &ast::ObjectLiteral) -> AnalyzeResult<ir::Expr> {
        let object_type = ObjectType { name:  literal.name.clone(),
                                       scope: Scope::root(), };

        let previous = self.scope.clone();
        self.scope = object_type.scope.clone();
        let members = self.object_members(literal);
        self.scope = previous;

        let (fields, methods) = members?;

        Ok(ir::Expr::Object(ir::ObjectLiteral { name: literal.name.clone(),
                                                fields,
                                                methods,
                                                ty: Type::Object(object_type) }))
    }

    fn object_members(&mut self,
                      literal: &ast::ObjectLiteral)
                      -> AnalyzeResult<(Vec<ir::LetDecl>, Vec<ir::DefDecl>)> {
        let mut fields = Vec::new();
        for field in &literal.fields {
            fields.push(self.let_decl(field)?);
        }

        let mut methods = Vec::new();
        for method in &literal.methods {
            methods.push(self.def_decl(method)?);
        }

        Ok((fields, methods))
    }

    /// Resolves the type of `name` on the given receiver expression: a
    /// member of an object type's own scope, or `Dynamic` for dynamic
    /// receivers.
    fn member_type(&mut self, receiver: &ir::Expr, name: &str) -> AnalyzeResult<Type> {
        match receiver.ty() {
            Type::Object(object) => match object.scope.resolve(name, true) {
                Some(member) => Ok(member),
                None => Err(AnalyzeError::UndefinedProperty { name: name.to_string() }),
            },
            Type::Dynamic => Ok(Type::Dynamic),
            other => Err(AnalyzeError::InvalidReceiver { found: other.to_string() }),
        }
    }
}

fn literal_expr(literal: &ast::Literal) -> ir::Expr {
    let ty = match literal {
        ast::Literal::Nil => Type::Nil,
        ast::Literal::Boolean(_) => Type::Boolean,
        ast::Literal::Integer(_) => Type::Integer,
        ast::Literal::Decimal(_) => Type::Decimal,
        ast::Literal::Character(_) => Type::Character,
        ast::Literal::String(_) => Type::String,
    };
    ir::Expr::Literal { value: literal.clone(),
                        ty }
}

/// Types the arithmetic operators.
///
/// Two dynamic operands stay dynamic. `+` with a string on either side is
/// concatenation. Otherwise, after substituting a dynamic side with the
/// other, both sides must be the same numeric type, which is the result.
fn math_type(operator: BinaryOperator, left: &Type, right: &Type) -> AnalyzeResult<Type> {
    if *left == Type::Dynamic && *right == Type::Dynamic {
        return Ok(Type::Dynamic);
    }

    if operator == BinaryOperator::Add && (*left == Type::String || *right == Type::String) {
        return Ok(Type::String);
    }

    let left = if *left == Type::Dynamic { right } else { left };
    let right = if *right == Type::Dynamic { left } else { right };

    if !is_numeric(left) {
        return Err(AnalyzeError::OperandNotNumeric { found: left.to_string() });
    }
    if !is_numeric(right) {
        return Err(AnalyzeError::OperandNotNumeric { found: right.to_string() });
    }
    if left != right {
        return Err(AnalyzeError::OperandMismatch { left:  left.to_string(),
                                                   right: right.to_string(), });
    }

    Ok(left.clone())
}

fn equality_type(left: &Type, right: &Type) -> AnalyzeResult<Type> {
    if !left.is_subtype_of(right) && !right.is_subtype_of(left) {
        return Err(AnalyzeError::IncomparableOperands { left:  left.to_string(),
                                                        right: right.to_string(), });
    }
    Ok(Type::Boolean)
}

fn comparison_type(left: &Type, right: &Type) -> AnalyzeResult<Type> {
    if !left.is_subtype_of(&Type::Comparable) {
        return Err(AnalyzeError::OperandNotComparable { found: left.to_string() });
    }
    if !right.is_subtype_of(&Type::Comparable) {
        return Err(AnalyzeError::OperandNotComparable { found: right.to_string() });
    }
    if !left.is_subtype_of(right) && !right.is_subtype_of(left) {
        return Err(AnalyzeError::IncomparableOperands { left:  left.to_string(),
                                                        right: right.to_string(), });
    }
    Ok(Type::Boolean)
}

fn boolean_type(left: &Type, right: &Type) -> AnalyzeResult<Type> {
    if *left != Type::Boolean {
        return Err(AnalyzeError::OperandNotBoolean { found: left.to_string() });
    }
    if *right != Type::Boolean {
        return Err(AnalyzeError::OperandNotBoolean { found: right.to_string() });
    }
    Ok(Type::Boolean)
}

const fn is_numeric(ty: &Type) -> bool {
    matches!(ty, Type::Integer | Type::Decimal)
}

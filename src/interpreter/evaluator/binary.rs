use std::cmp::Ordering;

use crate::{
    ast::{self, BinaryOperator},
    error::EvaluateError,
    interpreter::{
        evaluator::core::{Evaluator, Exec},
        value::{Primitive, RuntimeValue},
    },
    util::num::{div_half_even, floor_div},
};

impl Evaluator {
    /// Evaluates a binary operation.
    ///
    /// Operands evaluate left to right, except that `AND` and `OR`
    /// short-circuit: the right operand is never evaluated when the left
    /// side decides the result.
    pub(in crate::interpreter::evaluator) fn binary(&mut self,
                                                    operator: BinaryOperator,
                                                    left: &ast::Expr,
                                                    right: &ast::Expr)
                                                    -> Exec<RuntimeValue> {
        match operator {
            BinaryOperator::Add => self.add(left, right),
            BinaryOperator::Sub | BinaryOperator::Mul => self.arithmetic(operator, left, right),
            BinaryOperator::Div => self.divide(left, right),
            BinaryOperator::Equal => {
                let left = self.expression(left)?;
                let right = self.expression(right)?;
                Ok(boolean(left == right))
            },
            BinaryOperator::NotEqual => {
                let left = self.expression(left)?;
                let right = self.expression(right)?;
                Ok(boolean(left != right))
            },
            BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual => self.comparison(operator, left, right),
            BinaryOperator::And => self.logical_and(left, right),
            BinaryOperator::Or => self.logical_or(left, right),
        }
    }

    /// Evaluates `+`: string concatenation when either side is a string,
    /// otherwise numeric addition of matching kinds.
    fn add(&mut self, left: &ast::Expr, right: &ast::Expr) -> Exec<RuntimeValue> {
        let left = self.expression(left)?;
        let right = self.expression(right)?;

        if left.is_string() || right.is_string() {
            let concatenated = format!("{}{}", left.print(), right.print());
            return Ok(RuntimeValue::Primitive(Primitive::String(concatenated)));
        }

        if let (Some(a), Some(b)) = (left.as_integer(), right.as_integer()) {
            return Ok(RuntimeValue::Primitive(Primitive::Integer(a + b)));
        }
        if let (Some(a), Some(b)) = (left.as_decimal(), right.as_decimal()) {
            return Ok(RuntimeValue::Primitive(Primitive::Decimal(a + b)));
        }

        Err(invalid_operand(BinaryOperator::Add, &left, &right).into())
    }

    /// Evaluates `-` and `*`, which require operands of the same numeric
    /// kind.
    fn arithmetic(&mut self,
                  operator: BinaryOperator,
                  left: &ast::Expr,
                  right: &ast::Expr)
                  -> Exec<RuntimeValue> {
        let left = self.expression(left)?;
        let right = self.expression(right)?;

        if let (Some(a), Some(b)) = (left.as_integer(), right.as_integer()) {
            let result = match operator {
                BinaryOperator::Sub => a - b,
                BinaryOperator::Mul => a * b,
                _ => unreachable!(),
            };
            return Ok(RuntimeValue::Primitive(Primitive::Integer(result)));
        }
        if let (Some(a), Some(b)) = (left.as_decimal(), right.as_decimal()) {
            let result = match operator {
                BinaryOperator::Sub => a - b,
                BinaryOperator::Mul => a * b,
                _ => unreachable!(),
            };
            return Ok(RuntimeValue::Primitive(Primitive::Decimal(result)));
        }

        Err(invalid_operand(operator, &left, &right).into())
    }

    /// Evaluates `/`: floor division for integers, half-even rounding at
    /// the dividend's scale for decimals. Division by zero fails for both
    /// kinds.
    fn divide(&mut self, left: &ast::Expr, right: &ast::Expr) -> Exec<RuntimeValue> {
        let left = self.expression(left)?;
        let right = self.expression(right)?;

        if let (Some(a), Some(b)) = (left.as_integer(), right.as_integer()) {
            let quotient = floor_div(a, b, EvaluateError::DivisionByZero)?;
            return Ok(RuntimeValue::Primitive(Primitive::Integer(quotient)));
        }
        if let (Some(a), Some(b)) = (left.as_decimal(), right.as_decimal()) {
            let quotient = div_half_even(a, b, EvaluateError::DivisionByZero)?;
            return Ok(RuntimeValue::Primitive(Primitive::Decimal(quotient)));
        }

        Err(invalid_operand(BinaryOperator::Div, &left, &right).into())
    }

    /// Evaluates the ordered comparisons over primitives of the same
    /// payload kind.
    fn comparison(&mut self,
                  operator: BinaryOperator,
                  left: &ast::Expr,
                  right: &ast::Expr)
                  -> Exec<RuntimeValue> {
        let left = self.expression(left)?;
        let right = self.expression(right)?;

        let Some(ordering) = compare_primitives(&left, &right) else {
            return Err(EvaluateError::IncomparableOperands { left:  left.print(),
                                                             right: right.print(), }.into());
        };

        let result = match operator {
            BinaryOperator::Less => ordering == Ordering::Less,
            BinaryOperator::LessEqual => ordering != Ordering::Greater,
            BinaryOperator::Greater => ordering == Ordering::Greater,
            BinaryOperator::GreaterEqual => ordering != Ordering::Less,
            _ => unreachable!(),
        };

        Ok(boolean(result))
    }

    /// Evaluates `AND`, short-circuiting on a false left operand.
    fn logical_and(&mut self, left: &ast::Expr, right: &ast::Expr) -> Exec<RuntimeValue> {
        let left = self.expression(left)?;
        let Some(left_value) = left.as_boolean() else {
            return Err(EvaluateError::InvalidOperand { operator: BinaryOperator::And.to_string(),
                                                       found:    left.print(), }.into());
        };

        if !left_value {
            return Ok(boolean(false));
        }

        let right = self.expression(right)?;
        let Some(right_value) = right.as_boolean() else {
            return Err(EvaluateError::InvalidOperand { operator: BinaryOperator::And.to_string(),
                                                       found:    right.print(), }.into());
        };

        Ok(boolean(right_value))
    }

    /// Evaluates `OR`, short-circuiting on a true left operand.
    fn logical_or(&mut self, left: &ast::Expr, right: &ast::Expr) -> Exec<RuntimeValue> {
        let left = self.expression(left)?;
        let Some(left_value) = left.as_boolean() else {
            return Err(EvaluateError::InvalidOperand { operator: BinaryOperator::Or.to_string(),
                                                       found:    left.print(), }.into());
        };

        if left_value {
            return Ok(boolean(true));
        }

        let right = self.expression(right)?;
        let Some(right_value) = right.as_boolean() else {
            return Err(EvaluateError::InvalidOperand { operator: BinaryOperator::Or.to_string(),
                                                       found:    right.print(), }.into());
        };

        Ok(boolean(right_value))
    }
}

const fn boolean(value: bool) -> RuntimeValue {
    RuntimeValue::Primitive(Primitive::Boolean(value))
}

/// Orders two runtime values when both are primitives of the same
/// comparable payload kind.
fn compare_primitives(left: &RuntimeValue, right: &RuntimeValue) -> Option<Ordering> {
    match (left, right) {
        (RuntimeValue::Primitive(Primitive::Boolean(a)),
         RuntimeValue::Primitive(Primitive::Boolean(b))) => Some(a.cmp(b)),
        (RuntimeValue::Primitive(Primitive::Integer(a)),
         RuntimeValue::Primitive(Primitive::Integer(b))) => Some(a.cmp(b)),
        (RuntimeValue::Primitive(Primitive::Decimal(a)),
         RuntimeValue::Primitive(Primitive::Decimal(b))) => Some(a.cmp(b)),
        (RuntimeValue::Primitive(Primitive::Character(a)),
         RuntimeValue::Primitive(Primitive::Character(b))) => Some(a.cmp(b)),
        (RuntimeValue::Primitive(Primitive::String(a)),
         RuntimeValue::Primitive(Primitive::String(b))) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Builds the failure for a malformed arithmetic operation, pointing at the
/// left operand when it is the wrong kind and at the right otherwise.
fn invalid_operand(operator: BinaryOperator,
                   left: &RuntimeValue,
                   right: &RuntimeValue)
                   -> EvaluateError {
    let left_numeric = left.as_integer().is_some() || left.as_decimal().is_some();
    let left_valid = match operator {
        BinaryOperator::Add => left_numeric || left.is_string(),
        _ => left_numeric,
    };

    if left_valid {
        EvaluateError::InvalidOperand { operator: operator.to_string(),
                                        found:    right.print(), }
    } else {
        EvaluateError::InvalidOperand { operator: operator.to_string(),
                                        found:    left.print(), }
    }
}

use std::{mem, rc::Rc};

use crate::{
    ast,
    error::EvaluateError,
    interpreter::{
        evaluator::core::{Evaluator, Exec},
        scope::Scope,
        value::{DeclaredFunction, Definition, FunctionValue, ObjectValue, RuntimeValue},
    },
};

/// Defensive bound on prototype traversal. Construction cannot close a
/// cycle, but assignment to a `prototype` member can.
const PROTOTYPE_DEPTH_LIMIT: usize = 64;

impl Evaluator {
    /// Evaluates an `OBJECT` literal.
    ///
    /// The object's member scope is a child of the current scope, so field
    /// initializers and method bodies can reach enclosing bindings. Fields
    /// evaluate first, then methods are bound as functions that capture the
    /// member scope and expect the receiver as an implicit first argument.
    pub(in crate::interpreter::evaluator) fn object_literal(&mut self,
                                                            literal: &ast::ObjectLiteral)
                                                            -> Exec<RuntimeValue> {
        let object = ObjectValue { name:  literal.name.clone(),
                                   scope: Scope::nested(&self.scope), };

        let previous = mem::replace(&mut self.scope, object.scope.clone());
        let members = self.object_members(literal, &object);
        self.scope = previous;
        members?;

        Ok(RuntimeValue::Object(object))
    }

    fn object_members(&mut self, literal: &ast::ObjectLiteral, object: &ObjectValue) -> Exec<()> {
        for field in &literal.fields {
            self.let_stmt(field)?;
        }

        for method in &literal.methods {
            if object.scope.resolve(&method.name, true).is_some() {
                return Err(EvaluateError::DuplicateDefinition { name:
                                                                    method.name.clone(), }.into());
            }

            let parameters =
                method.parameters.iter().map(|parameter| parameter.name.clone()).collect();
            let function =
                FunctionValue { name:       method.name.clone(),
                                definition:
                                    Definition::Declared(Rc::new(DeclaredFunction { parameters,
                                                                                    body: method.body.clone(),
                                                                                    scope: object.scope.clone(),
                                                                                    binds_receiver: true, })), };
            object.scope.define(&method.name, RuntimeValue::Function(function));
        }

        Ok(())
    }

    /// Evaluates a property access, walking the prototype chain.
    pub(in crate::interpreter::evaluator) fn property(&mut self,
                                                      receiver: &ast::Expr,
                                                      name: &str)
                                                      -> Exec<RuntimeValue> {
        let receiver = self.expression(receiver)?;
        let Some(object) = receiver.as_object() else {
            return Err(EvaluateError::ReceiverNotObject { found: receiver.print() }.into());
        };

        match resolve_member(object, name)? {
            Some(value) => Ok(value),
            None => Err(EvaluateError::UndefinedProperty { name: name.to_string() }.into()),
        }
    }

    /// Evaluates a method call: resolves the member through the prototype
    /// chain, then invokes it with the receiver prepended to the argument
    /// list.
    pub(in crate::interpreter::evaluator) fn method_call(&mut self,
                                                         receiver: &ast::Expr,
                                                         name: &str,
                                                         arguments: &[ast::Expr])
                                                         -> Exec<RuntimeValue> {
        let receiver = self.expression(receiver)?;
        let Some(object) = receiver.as_object() else {
            return Err(EvaluateError::ReceiverNotObject { found: receiver.print() }.into());
        };

        let Some(member) = resolve_member(object, name)? else {
            return Err(EvaluateError::UndefinedProperty { name: name.to_string() }.into());
        };
        let Some(function) = member.as_function() else {
            return Err(EvaluateError::NotAMethod { name: name.to_string() }.into());
        };
        let function = function.clone();

        let mut evaluated = vec![receiver.clone()];
        for argument in arguments {
            evaluated.push(self.expression(argument)?);
        }

        Ok(self.invoke(&function, evaluated)?)
    }
}

/// Searches for `name` on the object and then along its prototype chain.
///
/// Each step examines only the current object's own scope; inheritance is
/// the explicit `prototype` binding, never the scope parent chain. A
/// `prototype` that is not an object fails, as does a chain deeper than the
/// defensive limit.
fn resolve_member(object: &ObjectValue,
                  name: &str)
                  -> Result<Option<RuntimeValue>, EvaluateError> {
    let mut current = object.clone();

    for _ in 0..PROTOTYPE_DEPTH_LIMIT {
        if let Some(value) = current.scope.resolve(name, true) {
            return Ok(Some(value));
        }

        match current.scope.resolve("prototype", true) {
            None => return Ok(None),
            Some(RuntimeValue::Object(prototype)) => current = prototype,
            Some(_) => return Err(EvaluateError::PrototypeNotObject),
        }
    }

    Err(EvaluateError::PrototypeDepthExceeded)
}

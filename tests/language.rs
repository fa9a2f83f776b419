use opal::{
    error::{Error, EvaluateError},
    evaluate,
    interpreter::{
        evaluator::{builtin::runtime_scope, core::Evaluator},
        lexer,
        parser::core::parse_source,
        scope::Scope,
        value::RuntimeValue,
    },
};

fn eval(source: &str) -> RuntimeValue {
    evaluate(source).unwrap_or_else(|e| panic!("Script failed: {e}\n{source}"))
}

fn assert_prints(source: &str, expected: &str) {
    assert_eq!(eval(source).print(), expected, "for script: {source}");
}

fn assert_failure(source: &str) -> Error {
    match evaluate(source) {
        Ok(value) => panic!("Script succeeded with {} but was expected to fail:\n{source}",
                            value.print()),
        Err(error) => error,
    }
}

/// Evaluates a script and returns the evaluator's final scope for
/// inspection.
fn final_scope(source: &str) -> Scope<RuntimeValue> {
    let tokens = lexer::lex(source).expect("script should lex");
    let parsed = parse_source(&tokens).expect("script should parse");
    let mut evaluator = Evaluator::new(runtime_scope());
    evaluator.evaluate(&parsed)
             .unwrap_or_else(|e| panic!("Script failed: {e}\n{source}"));
    evaluator.scope()
}

#[test]
fn arithmetic_and_declaration() {
    assert_prints("LET x = 1 + 2; log(x);", "3");
    assert_prints("LET x = 7 * 9; log(x);", "63");
    assert_prints("LET x = 8 - 5; log(x);", "3");
    assert_prints("LET x = 10 / 2; log(x);", "5");

    let scope = final_scope("LET x = 1 + 2; log(x);");
    let x = scope.resolve("x", false).expect("x should be bound");
    assert_eq!(x.print(), "3");
}

#[test]
fn recursive_function() {
    assert_prints("DEF fib(n) DO \
                     IF n <= 1 DO RETURN n; END \
                     RETURN fib(n - 1) + fib(n - 2); \
                   END \
                   log(fib(10));",
                  "55");
}

#[test]
fn string_concatenation() {
    assert_prints(r#"LET s = "hi" + 1; log(s);"#, "hi1");
    assert_prints(r#"log(1 + "hi");"#, "1hi");
    assert_prints(r#"log("a" + NIL);"#, "aNIL");
    assert_prints(r#"log("" + TRUE);"#, "TRUE");
    assert_prints(r#"log("pi=" + 3.14);"#, "pi=3.14");
}

#[test]
fn object_with_method_and_this() {
    assert_prints("LET o = OBJECT DO \
                     LET x = 1; \
                     DEF get() DO RETURN this.x; END \
                   END; \
                   log(o.get());",
                  "1");
}

#[test]
fn for_loop_over_range_in_order() {
    assert_prints(r#"LET s = ""; FOR i IN range(0, 3) DO s = s + i; END log(s);"#,
                  "012");
    assert_prints(r#"LET s = ""; FOR i IN range(2, 2) DO s = s + i; END log(s);"#,
                  "");
}

#[test]
fn duplicate_declaration_fails() {
    let error = assert_failure("LET a = 1; LET a = 2;");
    assert!(matches!(error,
                     Error::Evaluate(EvaluateError::DuplicateDefinition { .. })));
}

#[test]
fn shadowing_in_child_scope_is_allowed() {
    assert_prints("LET a = 1; IF TRUE DO LET a = 2; log(a); END log(a);", "1");
}

#[test]
fn integer_division_floors() {
    assert_prints("log(7 / 2);", "3");
    assert_prints("LET a = -7; log(a / 2);", "-4");
    assert_prints("LET a = -8; log(a / 2);", "-4");
    assert_prints("log(7 / -2);", "-4");
}

#[test]
fn decimal_division_rounds_half_even() {
    assert_prints("log(1.0 / 3.0);", "0.3");
    assert_prints("log(10.0 / 4.0);", "2.5");
    assert_prints("log(1.0 / 4.0);", "0.2");
    assert_prints("log(3.0 / 4.0);", "0.8");
}

#[test]
fn division_by_zero_fails_for_both_kinds() {
    let error = assert_failure("1 / 0;");
    assert!(matches!(error, Error::Evaluate(EvaluateError::DivisionByZero)));

    let error = assert_failure("1.0 / 0.0;");
    assert!(matches!(error, Error::Evaluate(EvaluateError::DivisionByZero)));
}

#[test]
fn logical_operators_short_circuit() {
    // The right operand would fail as a non-boolean, so success proves it
    // was never evaluated.
    assert_prints("log(FALSE AND 1);", "FALSE");
    assert_prints("log(TRUE OR 1);", "TRUE");

    assert_prints("log(TRUE AND FALSE);", "FALSE");
    assert_prints("log(FALSE OR TRUE);", "TRUE");

    let error = assert_failure("log(1 AND TRUE);");
    assert!(matches!(error, Error::Evaluate(EvaluateError::InvalidOperand { .. })));
    let error = assert_failure("log(TRUE AND 1);");
    assert!(matches!(error, Error::Evaluate(EvaluateError::InvalidOperand { .. })));
}

#[test]
fn equality_is_structural() {
    assert_prints("log(1 == 1);", "TRUE");
    assert_prints("log(1 != 2);", "TRUE");
    assert_prints(r#"log("a" == "a");"#, "TRUE");
    assert_prints("log(NIL == NIL);", "TRUE");
    assert_prints("log(1 == 1.0);", "FALSE");
    assert_prints("LET o = OBJECT DO END; LET p = o; log(o == p);", "TRUE");
    assert_prints("LET o = OBJECT DO END; LET p = OBJECT DO END; log(o == p);",
                  "FALSE");
}

#[test]
fn comparisons_require_matching_primitives() {
    assert_prints("log(2 < 3);", "TRUE");
    assert_prints("log(3 <= 3);", "TRUE");
    assert_prints(r#"log("b" > "a");"#, "TRUE");
    assert_prints("log('a' < 'b');", "TRUE");
    assert_prints("log(FALSE < TRUE);", "TRUE");

    let error = assert_failure(r#"log(1 < "a");"#);
    assert!(matches!(error,
                     Error::Evaluate(EvaluateError::IncomparableOperands { .. })));
    let error = assert_failure("log(1 < 1.0);");
    assert!(matches!(error,
                     Error::Evaluate(EvaluateError::IncomparableOperands { .. })));
}

#[test]
fn closures_capture_their_defining_scope() {
    assert_prints("DEF make() DO \
                     LET x = 41; \
                     DEF get() DO RETURN x + 1; END \
                     RETURN get; \
                   END \
                   LET f = make(); \
                   log(f());",
                  "42");
}

#[test]
fn closures_write_through_to_captured_bindings() {
    assert_prints("DEF counter() DO \
                     LET n = 0; \
                     DEF next() DO n = n + 1; RETURN n; END \
                     RETURN next; \
                   END \
                   LET tick = counter(); \
                   tick(); \
                   tick(); \
                   log(tick());",
                  "3");
}

#[test]
fn builtin_object_inherits_through_prototype() {
    assert_prints("log(object.inherited_property);", "inherited");
    assert_prints("log(object.inherited_method());", "NIL");
    assert_prints("log(object.methodAny(5));", "5");
    assert_prints(r#"log(object.methodString("s"));"#, "s");
}

#[test]
fn prototype_chain_resolves_through_two_levels() {
    assert_prints("LET base = OBJECT DO \
                     LET x = 7; \
                     DEF get() DO RETURN this.x; END \
                   END; \
                   LET middle = OBJECT DO LET prototype = base; END; \
                   LET leaf = OBJECT DO LET prototype = middle; END; \
                   log(leaf.x);",
                  "7");
}

#[test]
fn method_receiver_is_the_original_object() {
    // x resolves through the prototype, but `this` stays bound to the
    // receiver the call started from.
    assert_prints("LET base = OBJECT DO \
                     LET x = 1; \
                     DEF get() DO RETURN this.x; END \
                   END; \
                   LET child = OBJECT DO \
                     LET prototype = base; \
                     LET x = 2; \
                   END; \
                   log(child.get());",
                  "2");
}

#[test]
fn prototype_must_be_an_object() {
    let error = assert_failure("LET o = OBJECT DO LET prototype = 5; END; o.missing;");
    assert!(matches!(error, Error::Evaluate(EvaluateError::PrototypeNotObject)));
}

#[test]
fn undefined_property_fails() {
    let error = assert_failure("LET o = OBJECT DO LET x = 1; END; o.missing;");
    assert!(matches!(error,
                     Error::Evaluate(EvaluateError::UndefinedProperty { .. })));
}

#[test]
fn this_cannot_be_an_explicit_parameter() {
    let error = assert_failure("LET o = OBJECT DO \
                                  DEF m(this) DO END \
                                END; \
                                o.m(1);");
    assert!(matches!(error, Error::Evaluate(EvaluateError::ThisParameter)));
}

#[test]
fn return_with_guard_desugars() {
    assert_prints("DEF f(n) DO \
                     RETURN 10 IF n == 1; \
                     RETURN 20; \
                   END \
                   log(f(1));",
                  "10");
    assert_prints("DEF f(n) DO \
                     RETURN 10 IF n == 1; \
                     RETURN 20; \
                   END \
                   log(f(2));",
                  "20");
}

#[test]
fn return_outside_function_fails() {
    let error = assert_failure("RETURN 1;");
    assert!(matches!(error, Error::Evaluate(EvaluateError::ReturnOutsideFunction)));

    let error = assert_failure("IF TRUE DO RETURN 1; END");
    assert!(matches!(error, Error::Evaluate(EvaluateError::ReturnOutsideFunction)));
}

#[test]
fn function_without_return_yields_nil() {
    assert_prints("DEF f() DO LET x = 1; END log(f());", "NIL");
}

#[test]
fn scopes_are_restored_after_blocks() {
    let error = assert_failure("IF TRUE DO LET y = 1; END log(y);");
    assert!(matches!(error, Error::Evaluate(EvaluateError::UnknownVariable { .. })));

    let error = assert_failure("FOR i IN range(0, 1) DO END log(i);");
    assert!(matches!(error, Error::Evaluate(EvaluateError::UnknownVariable { .. })));

    // A return escape must restore the caller's scope too.
    assert_prints("LET x = 1; \
                   DEF f() DO RETURN 2; END \
                   f(); \
                   log(x);",
                  "1");
}

#[test]
fn assignment_writes_to_the_owning_scope() {
    assert_prints("LET x = 1; IF TRUE DO x = 2; END log(x);", "2");

    let error = assert_failure("missing = 1;");
    assert!(matches!(error, Error::Evaluate(EvaluateError::UnknownVariable { .. })));
}

#[test]
fn property_assignment_requires_existing_member() {
    assert_prints("LET o = OBJECT DO LET x = 1; END; o.x = 5; log(o.x);", "5");

    let error = assert_failure("LET o = OBJECT DO END; o.x = 5;");
    assert!(matches!(error,
                     Error::Evaluate(EvaluateError::UndefinedProperty { .. })));
}

#[test]
fn invalid_assignment_target_fails() {
    let error = assert_failure("1 = 2;");
    assert!(matches!(error, Error::Evaluate(EvaluateError::InvalidAssignmentTarget)));
}

#[test]
fn condition_must_be_boolean_at_runtime() {
    let error = assert_failure("IF 1 DO END");
    assert!(matches!(error,
                     Error::Evaluate(EvaluateError::ConditionNotBoolean { .. })));
}

#[test]
fn for_requires_an_iterable() {
    let error = assert_failure("FOR i IN 5 DO END");
    assert!(matches!(error, Error::Evaluate(EvaluateError::NotIterable { .. })));
}

#[test]
fn call_arity_is_checked() {
    let error = assert_failure("DEF f(a, b) DO END f(1);");
    assert!(matches!(error,
                     Error::Evaluate(EvaluateError::ArgumentCountMismatch { .. })));

    let error = assert_failure("range(1);");
    assert!(matches!(error,
                     Error::Evaluate(EvaluateError::ArgumentCountMismatch { .. })));
}

#[test]
fn builtin_testing_helpers() {
    assert_prints("log(variable);", "variable");
    assert_prints("print(1);", "NIL");
    assert_prints(r#"debug("hi");"#, "NIL");
    assert_prints("log(function());", "NIL");
    assert_prints("log(functionAny(42));", "42");
    assert_prints(r#"log(functionString("s"));"#, "s");

    let error = assert_failure("functionString(1);");
    assert!(matches!(error, Error::Evaluate(EvaluateError::InvalidArgument { .. })));
}

#[test]
fn object_fields_may_reference_enclosing_scope() {
    assert_prints("LET seed = 9; \
                   LET o = OBJECT DO LET x = seed; END; \
                   log(o.x);",
                  "9");
}

#[test]
fn last_statement_value_is_the_program_result() {
    assert_prints("1 + 1;", "2");
    assert_prints("LET x = 5;", "5");
    assert_prints("OBJECT Point DO END;", "OBJECT Point");
}

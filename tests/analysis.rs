use opal::{
    analyze,
    error::{AnalyzeError, Error},
    interpreter::types::Type,
    ir,
};

fn assert_analyzes(source: &str) -> ir::Source {
    analyze(source).unwrap_or_else(|e| panic!("Analysis failed: {e}\n{source}"))
}

fn assert_rejected(source: &str) -> Error {
    match analyze(source) {
        Ok(_) => panic!("Analysis succeeded but was expected to fail:\n{source}"),
        Err(error) => error,
    }
}

/// The types every primitive-focused property iterates over.
fn primitives() -> Vec<Type> {
    vec![Type::Any,
         Type::Nil,
         Type::Dynamic,
         Type::Boolean,
         Type::Integer,
         Type::Decimal,
         Type::Character,
         Type::String,
         Type::Equatable,
         Type::Comparable,
         Type::Iterable]
}

#[test]
fn subtyping_is_reflexive_with_any_on_top() {
    for ty in primitives() {
        assert!(ty.is_subtype_of(&ty), "{ty} should be a subtype of itself");
        assert!(ty.is_subtype_of(&Type::Any), "{ty} should be a subtype of Any");
        assert!(ty.is_subtype_of(&Type::Dynamic));
        assert!(Type::Dynamic.is_subtype_of(&ty));
    }
}

#[test]
fn subtyping_admits_exactly_the_listed_pairs() {
    assert!(Type::Integer.is_subtype_of(&Type::Decimal));
    assert!(Type::Decimal.is_subtype_of(&Type::Integer));

    for ty in [Type::Boolean, Type::Integer, Type::Decimal, Type::Character, Type::String] {
        assert!(ty.is_subtype_of(&Type::Comparable), "{ty} should be comparable");
        assert!(ty.is_subtype_of(&Type::Equatable), "{ty} should be equatable");
    }
    assert!(Type::Nil.is_subtype_of(&Type::Equatable));
    assert!(Type::Iterable.is_subtype_of(&Type::Equatable));

    // A sample of pairs that must not be admitted.
    assert!(!Type::Nil.is_subtype_of(&Type::Comparable));
    assert!(!Type::Iterable.is_subtype_of(&Type::Comparable));
    assert!(!Type::Any.is_subtype_of(&Type::Integer));
    assert!(!Type::Equatable.is_subtype_of(&Type::Comparable));
    assert!(!Type::String.is_subtype_of(&Type::Integer));
    assert!(!Type::Boolean.is_subtype_of(&Type::Integer));
}

#[test]
fn assignability_excludes_the_numeric_pair() {
    assert!(!Type::Decimal.is_assignable_to(&Type::Integer));
    assert!(!Type::Integer.is_assignable_to(&Type::Decimal));
    assert!(Type::Integer.is_assignable_to(&Type::Integer));
    assert!(Type::Integer.is_assignable_to(&Type::Comparable));
    assert!(Type::Integer.is_assignable_to(&Type::Any));
}

#[test]
fn let_binds_the_initializer_type() {
    let source = assert_analyzes("LET x = 1;");
    let ir::Stmt::Let(decl) = &source.statements[0] else {
        panic!("expected a Let statement");
    };
    assert_eq!(decl.ty, Type::Integer);

    let source = assert_analyzes("LET x;");
    let ir::Stmt::Let(decl) = &source.statements[0] else {
        panic!("expected a Let statement");
    };
    assert_eq!(decl.ty, Type::Dynamic);

    let source = assert_analyzes("LET x: Comparable = 1;");
    let ir::Stmt::Let(decl) = &source.statements[0] else {
        panic!("expected a Let statement");
    };
    assert_eq!(decl.ty, Type::Comparable);
}

#[test]
fn let_rejects_initializer_type_mismatches() {
    let error = assert_rejected("LET x: Integer = 1.0;");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::DeclarationTypeMismatch { .. })));

    let error = assert_rejected(r#"LET x: Integer = "s";"#);
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::DeclarationTypeMismatch { .. })));
}

#[test]
fn unknown_type_names_are_rejected() {
    let error = assert_rejected("LET x: Widget = 1;");
    assert!(matches!(error, Error::Analyze(AnalyzeError::UnknownType { .. })));
}

#[test]
fn duplicate_definitions_are_rejected() {
    let error = assert_rejected("LET x = 1; LET x = 2;");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::DuplicateDefinition { .. })));

    let error = assert_rejected("DEF f() DO END DEF f() DO END");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::DuplicateDefinition { .. })));
}

#[test]
fn top_level_return_is_rejected() {
    let error = assert_rejected("RETURN 1;");
    assert!(matches!(error, Error::Analyze(AnalyzeError::ReturnOutsideFunction)));
}

#[test]
fn return_types_are_checked() {
    assert_analyzes("DEF f(): Integer DO RETURN 1; END");
    assert_analyzes("DEF f() DO RETURN 1; END");
    assert_analyzes("DEF f(): Any DO RETURN 1; END");

    let error = assert_rejected("DEF f(): Integer DO RETURN 1.0; END");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::ReturnTypeMismatch { .. })));

    // A bare RETURN produces Nil, which only fits Nil-like returns.
    let error = assert_rejected("DEF f(): Integer DO RETURN; END");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::ReturnTypeMismatch { .. })));
    assert_analyzes("DEF f(): Nil DO RETURN; END");
}

#[test]
fn return_resolves_through_nested_blocks() {
    assert_analyzes("DEF f(n: Integer): Integer DO \
                       IF n < 1 DO RETURN 0; END \
                       RETURN n; \
                     END");
}

#[test]
fn conditions_must_be_boolean() {
    let error = assert_rejected("IF 1 DO END");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::ConditionNotBoolean { .. })));

    assert_analyzes("IF TRUE DO END");
    assert_analyzes("IF dynamic DO END");
}

#[test]
fn for_iterables_must_not_be_nil() {
    let error = assert_rejected("FOR i IN NIL DO END");
    assert!(matches!(error, Error::Analyze(AnalyzeError::NotIterable)));

    assert_analyzes("FOR i IN range(0, 3) DO END");
}

#[test]
fn for_binds_the_loop_variable_as_integer() {
    let source = assert_analyzes("FOR i IN range(0, 3) DO LET x = i; END");
    let ir::Stmt::For { ty, body, .. } = &source.statements[0] else {
        panic!("expected a For statement");
    };
    assert_eq!(*ty, Type::Integer);

    let ir::Stmt::Let(decl) = &body[0] else {
        panic!("expected a Let statement in the body");
    };
    assert_eq!(decl.ty, Type::Integer);
}

#[test]
fn division_result_type_tracks_the_operands() {
    let source = assert_analyzes("1 / 2; 1.0 / 2.0;");
    let ir::Stmt::Expression(integer_division) = &source.statements[0] else {
        panic!("expected an expression statement");
    };
    let ir::Stmt::Expression(decimal_division) = &source.statements[1] else {
        panic!("expected an expression statement");
    };
    assert_eq!(integer_division.ty(), Type::Integer);
    assert_eq!(decimal_division.ty(), Type::Decimal);
}

#[test]
fn arithmetic_typing_rules() {
    let source = assert_analyzes(r#"LET s = "hi" + 1;"#);
    let ir::Stmt::Let(decl) = &source.statements[0] else {
        panic!("expected a Let statement");
    };
    assert_eq!(decl.ty, Type::String);

    let error = assert_rejected("1 + 1.0;");
    assert!(matches!(error, Error::Analyze(AnalyzeError::OperandMismatch { .. })));

    let error = assert_rejected("TRUE + 1;");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::OperandNotNumeric { .. })));

    // Two dynamic operands stay dynamic.
    let source = assert_analyzes("dynamic + dynamic;");
    let ir::Stmt::Expression(sum) = &source.statements[0] else {
        panic!("expected an expression statement");
    };
    assert_eq!(sum.ty(), Type::Dynamic);
}

#[test]
fn comparison_and_logical_typing_rules() {
    assert_analyzes("1 < 2; 1 == 1.0; TRUE AND FALSE;");

    let error = assert_rejected("NIL < 1;");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::OperandNotComparable { .. })));

    let error = assert_rejected(r#"1 < "a";"#);
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::IncomparableOperands { .. })));

    let error = assert_rejected("1 AND TRUE;");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::OperandNotBoolean { .. })));
}

#[test]
fn calls_are_checked_against_function_types() {
    assert_analyzes("functionAny(1);");
    assert_analyzes(r#"functionString("s");"#);
    assert_analyzes("log(object);");

    let error = assert_rejected("functionString(1);");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::ArgumentTypeMismatch { .. })));

    let error = assert_rejected("function(1);");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::ArgumentCountMismatch { .. })));

    let error = assert_rejected("missing();");
    assert!(matches!(error, Error::Analyze(AnalyzeError::UnknownFunction { .. })));

    let error = assert_rejected("variable();");
    assert!(matches!(error, Error::Analyze(AnalyzeError::NotAFunction { .. })));
}

#[test]
fn recursion_is_visible_inside_the_body() {
    assert_analyzes("DEF fib(n) DO \
                       IF n <= 1 DO RETURN n; END \
                       RETURN fib(n - 1) + fib(n - 2); \
                     END");
}

#[test]
fn property_analysis_uses_the_own_scope_only() {
    assert_analyzes("object.method();");
    assert_analyzes(r#"object.methodString("s");"#);

    // The member exists at runtime through the prototype chain, but the
    // analyzer does not traverse prototypes.
    let error = assert_rejected("object.inherited_property;");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::UndefinedProperty { .. })));

    let error = assert_rejected("object.missing;");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::UndefinedProperty { .. })));

    let error = assert_rejected(r#"object.methodString(1);"#);
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::ArgumentTypeMismatch { .. })));

    let error = assert_rejected("variable.anything;");
    assert!(matches!(error, Error::Analyze(AnalyzeError::InvalidReceiver { .. })));
}

#[test]
fn dynamic_receivers_analyze_to_dynamic() {
    let source = assert_analyzes("dynamic.anything; dynamic.calls(1, 2);");
    let ir::Stmt::Expression(property) = &source.statements[0] else {
        panic!("expected an expression statement");
    };
    let ir::Stmt::Expression(method) = &source.statements[1] else {
        panic!("expected an expression statement");
    };
    assert_eq!(property.ty(), Type::Dynamic);
    assert_eq!(method.ty(), Type::Dynamic);
}

#[test]
fn object_literals_carry_a_fresh_object_type() {
    let source = assert_analyzes("LET o = OBJECT Point DO \
                                    LET x = 1; \
                                    LET y = 2; \
                                  END; \
                                  o.x;");
    let ir::Stmt::Let(decl) = &source.statements[0] else {
        panic!("expected a Let statement");
    };
    let Type::Object(object) = &decl.ty else {
        panic!("expected an object type, found {}", decl.ty);
    };
    assert_eq!(object.name.as_deref(), Some("Point"));
    assert_eq!(object.scope.names(), vec!["x", "y"]);

    let ir::Stmt::Expression(access) = &source.statements[1] else {
        panic!("expected an expression statement");
    };
    assert_eq!(access.ty(), Type::Integer);
}

#[test]
fn object_methods_see_members_but_not_the_enclosing_scope() {
    assert_analyzes("LET o = OBJECT DO \
                       LET x = 1; \
                       DEF get() DO RETURN x; END \
                     END;");

    // Object scopes are rooted, so enclosing bindings are invisible to
    // analysis even though the evaluator can reach them.
    let error = assert_rejected("LET outer = 1; \
                                 LET o = OBJECT DO LET x = outer; END;");
    assert!(matches!(error, Error::Analyze(AnalyzeError::UnknownVariable { .. })));
}

#[test]
fn assignments_are_type_checked() {
    assert_analyzes("LET x = 1; x = 2;");

    let error = assert_rejected(r#"LET x = 1; x = "s";"#);
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::AssignmentTypeMismatch { .. })));

    let error = assert_rejected("missing = 1;");
    assert!(matches!(error, Error::Analyze(AnalyzeError::UnknownVariable { .. })));

    let error = assert_rejected("1 = 2;");
    assert!(matches!(error, Error::Analyze(AnalyzeError::InvalidAssignmentTarget)));
}

#[test]
fn property_assignments_check_the_member_type() {
    assert_analyzes("LET o = OBJECT DO LET x = 1; END; o.x = 2;");

    let error = assert_rejected(r#"LET o = OBJECT DO LET x = 1; END; o.x = "s";"#);
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::AssignmentTypeMismatch { .. })));

    let error = assert_rejected("LET o = OBJECT DO END; o.x = 1;");
    assert!(matches!(error,
                     Error::Analyze(AnalyzeError::UndefinedProperty { .. })));
}

#[test]
fn every_expression_statement_carries_a_type() {
    let source = assert_analyzes(r#"1; 1.0; 'c'; "s"; NIL; TRUE; (1 + 2); variable;"#);
    let expected = [Type::Integer,
                    Type::Decimal,
                    Type::Character,
                    Type::String,
                    Type::Nil,
                    Type::Boolean,
                    Type::Integer,
                    Type::String];

    for (statement, expected) in source.statements.iter().zip(expected) {
        let ir::Stmt::Expression(expression) = statement else {
            panic!("expected an expression statement");
        };
        assert_eq!(expression.ty(), expected);
    }
}

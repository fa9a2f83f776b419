use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use opal::{
    ast::{BinaryOperator, Expr, Literal, Stmt},
    error::{Error, LexError, ParseError},
    interpreter::{
        lexer::{Token, TokenKind, lex},
        parser::core::{parse_expr, parse_source, parse_stmt},
    },
};

fn tokens(source: &str) -> Vec<Token> {
    lex(source).unwrap_or_else(|e| panic!("Lexing failed: {e}\n{source}"))
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokens(source).iter().map(|token| token.kind).collect()
}

fn literals(source: &str) -> Vec<String> {
    tokens(source).iter().map(|token| token.literal.clone()).collect()
}

fn expression(source: &str) -> Expr {
    parse_expr(&tokens(source)).unwrap_or_else(|e| panic!("Parsing failed: {e}\n{source}"))
}

#[test]
fn tokens_preserve_their_source_slices() {
    assert_eq!(literals("LET x = -5; // trailing comment"),
               vec!["LET", "x", "=", "-5", ";"]);
    assert_eq!(kinds("LET x = -5;"),
               vec![TokenKind::Identifier,
                    TokenKind::Identifier,
                    TokenKind::Operator,
                    TokenKind::Integer,
                    TokenKind::Operator]);

    assert_eq!(literals(r#"'a' '\n' "hi\t" 3.14e-2"#),
               vec!["'a'", r"'\n'", r#""hi\t""#, "3.14e-2"]);
}

#[test]
fn numeric_token_boundaries() {
    // A sign is part of a number only when a digit follows directly.
    assert_eq!(kinds("-5"), vec![TokenKind::Integer]);
    assert_eq!(kinds("- 5"), vec![TokenKind::Operator, TokenKind::Integer]);
    assert_eq!(kinds("-0"), vec![TokenKind::Integer]);

    // An exponent needs digits; otherwise the `e` is an identifier.
    assert_eq!(literals("10e5"), vec!["10e5"]);
    assert_eq!(kinds("10e5"), vec![TokenKind::Integer]);
    assert_eq!(literals("10e"), vec!["10", "e"]);
    assert_eq!(kinds("10e"), vec![TokenKind::Integer, TokenKind::Identifier]);

    // A decimal point needs digits on both sides.
    assert_eq!(kinds(".1"), vec![TokenKind::Operator, TokenKind::Integer]);
    assert_eq!(kinds("1."), vec![TokenKind::Integer, TokenKind::Operator]);
    assert_eq!(kinds("3.14"), vec![TokenKind::Decimal]);
    assert_eq!(kinds("1.0e2"), vec![TokenKind::Decimal]);
}

#[test]
fn identifiers_may_contain_hyphens_and_digits() {
    assert_eq!(literals("kebab-case _x x1"), vec!["kebab-case", "_x", "x1"]);
    assert_eq!(kinds("kebab-case"), vec![TokenKind::Identifier]);
}

#[test]
fn comparison_operators_lex_as_single_tokens() {
    assert_eq!(literals("< <= > >= == != ! ="),
               vec!["<", "<=", ">", ">=", "==", "!=", "!", "="]);
    assert!(kinds("< <= > >= == != ! =").iter().all(|kind| *kind == TokenKind::Operator));
}

#[test]
fn whitespace_and_comments_are_skipped() {
    assert_eq!(literals("1 // one\n\t 2 \x08 3"), vec!["1", "2", "3"]);
    assert_eq!(literals("// only a comment"), Vec::<String>::new());
}

#[test]
fn malformed_literals_fail_to_lex() {
    assert!(matches!(lex(r#""abc"#), Err(LexError::UnterminatedString { .. })));
    assert!(matches!(lex("\"a\nb\""), Err(LexError::UnterminatedString { .. })));
    assert!(matches!(lex("'ab'"), Err(LexError::UnterminatedCharacter { .. })));
    assert!(matches!(lex("'a"), Err(LexError::UnterminatedCharacter { .. })));
    assert!(matches!(lex("''"), Err(LexError::InvalidCharacter { .. })));
    assert!(matches!(lex(r"'\q'"), Err(LexError::InvalidEscape { .. })));
    assert!(matches!(lex(r#""a\qb""#), Err(LexError::InvalidEscape { .. })));
}

#[test]
fn lex_failures_carry_the_byte_offset() {
    let Err(LexError::UnterminatedString { index }) = lex(r#"LET x = "abc"#) else {
        panic!("expected an unterminated string failure");
    };
    assert_eq!(index, 8);
}

#[test]
fn character_literals_round_trip() {
    assert_eq!(expression("'X'"), Expr::Literal(Literal::Character('X')));

    let escapes = [(r"'\b'", '\x08'),
                   (r"'\n'", '\n'),
                   (r"'\r'", '\r'),
                   (r"'\t'", '\t'),
                   (r"'\''", '\''),
                   (r#"'\"'"#, '"'),
                   (r"'\\'", '\\')];
    for (source, expected) in escapes {
        assert_eq!(expression(source),
                   Expr::Literal(Literal::Character(expected)),
                   "for literal {source}");
    }
}

#[test]
fn string_escapes_resolve_to_their_characters() {
    assert_eq!(expression(r#""a\nb\tc""#),
               Expr::Literal(Literal::String("a\nb\tc".to_string())));
    assert_eq!(expression(r#""\b\r\"\'\\""#),
               Expr::Literal(Literal::String("\x08\r\"'\\".to_string())));
}

#[test]
fn unknown_string_escapes_are_preserved() {
    // The lexer never admits unknown escapes, so exercise the decoder with
    // a hand-built token.
    let token = Token { kind:    TokenKind::String,
                        literal: r#""a\qb""#.to_string(), };
    assert_eq!(parse_expr(&[token]).unwrap(),
               Expr::Literal(Literal::String(r"a\qb".to_string())));
}

#[test]
fn numeric_literals_reparse_to_equal_values() {
    assert_eq!(expression("-0"), Expr::Literal(Literal::Integer(BigInt::from(0))));
    assert_eq!(expression("10e5"),
               Expr::Literal(Literal::Integer(BigInt::from(1_000_000))));
    assert_eq!(expression("3.14e-2"),
               Expr::Literal(Literal::Decimal(BigDecimal::from_str("0.0314").unwrap())));
}

#[test]
fn integer_literals_with_negative_exponents_are_rejected() {
    let error = parse_expr(&tokens("10e-5")).unwrap_err();
    assert!(matches!(error, ParseError::InvalidLiteral { .. }));
}

#[test]
fn precedence_and_associativity() {
    let Expr::Binary { operator, right, .. } = expression("1 + 2 * 3") else {
        panic!("expected a binary expression");
    };
    assert_eq!(operator, BinaryOperator::Add);
    assert!(matches!(*right,
                     Expr::Binary { operator: BinaryOperator::Mul, .. }));

    let Expr::Binary { operator, left, .. } = expression("1 - 2 - 3") else {
        panic!("expected a binary expression");
    };
    assert_eq!(operator, BinaryOperator::Sub);
    assert!(matches!(*left, Expr::Binary { operator: BinaryOperator::Sub, .. }));

    let Expr::Binary { operator, .. } = expression("1 < 2 AND 3 < 4") else {
        panic!("expected a binary expression");
    };
    assert_eq!(operator, BinaryOperator::And);
}

#[test]
fn secondary_expressions_chain_left_to_right() {
    let Expr::Property { receiver, name } = expression("a.b.c") else {
        panic!("expected a property access");
    };
    assert_eq!(name, "c");
    assert!(matches!(*receiver, Expr::Property { .. }));

    let Expr::Method { name, arguments, .. } = expression("a.b(1, 2)") else {
        panic!("expected a method call");
    };
    assert_eq!(name, "b");
    assert_eq!(arguments.len(), 2);
}

#[test]
fn return_with_guard_desugars_at_parse_time() {
    let statement = parse_stmt(&tokens("RETURN 1 IF TRUE;")).unwrap();
    let Stmt::If { then_body, else_body, .. } = statement else {
        panic!("expected the guarded return to become an If");
    };
    assert!(matches!(then_body.as_slice(), [Stmt::Return { value: Some(_) }]));
    assert!(else_body.is_empty());

    let statement = parse_stmt(&tokens("RETURN;")).unwrap();
    assert!(matches!(statement, Stmt::Return { value: None }));
}

#[test]
fn object_literals_require_fields_before_methods() {
    let source = "OBJECT DO \
                    LET x = 1; \
                    DEF get() DO END \
                    LET y = 2; \
                  END;";
    let error = parse_source(&tokens(source)).unwrap_err();
    assert!(matches!(error, ParseError::FieldAfterMethod { .. }));

    let Expr::Object(object) = expression("OBJECT Point DO \
                                             LET x = 1; \
                                             LET y = 2; \
                                             DEF get() DO END \
                                           END")
    else {
        panic!("expected an object literal");
    };
    assert_eq!(object.name.as_deref(), Some("Point"));
    assert_eq!(object.fields.len(), 2);
    assert_eq!(object.methods.len(), 1);
}

#[test]
fn declarations_may_carry_type_annotations() {
    let statement = parse_stmt(&tokens("LET x: Integer = 1;")).unwrap();
    let Stmt::Let(decl) = statement else {
        panic!("expected a Let statement");
    };
    assert_eq!(decl.type_name.as_deref(), Some("Integer"));

    let statement = parse_stmt(&tokens("DEF f(a: Integer, b): String DO END")).unwrap();
    let Stmt::Def(decl) = statement else {
        panic!("expected a Def statement");
    };
    assert_eq!(decl.parameters[0].type_name.as_deref(), Some("Integer"));
    assert_eq!(decl.parameters[1].type_name, None);
    assert_eq!(decl.return_type.as_deref(), Some("String"));
}

#[test]
fn missing_tokens_are_reported() {
    assert!(matches!(parse_source(&tokens("LET x = 1")),
                     Err(ParseError::UnexpectedEndOfInput { .. })));
    assert!(matches!(parse_source(&tokens("IF TRUE DO")),
                     Err(ParseError::UnexpectedEndOfInput { .. })));
    assert!(matches!(parse_source(&tokens("LET 1 = 2;")),
                     Err(ParseError::UnexpectedToken { .. })));
    assert!(matches!(parse_source(&tokens("* 2;")),
                     Err(ParseError::UnexpectedToken { .. })));
}

#[test]
fn start_rules_reject_trailing_tokens() {
    assert!(matches!(parse_expr(&tokens("1 2")),
                     Err(ParseError::UnexpectedTrailingTokens { .. })));
    assert!(matches!(parse_stmt(&tokens("LET x = 1; LET y = 2;")),
                     Err(ParseError::UnexpectedTrailingTokens { .. })));
}

#[test]
fn pipeline_errors_surface_as_the_tagged_sum() {
    assert!(matches!(opal::lex("'ab'"), Err(Error::Lex(_))));
    assert!(matches!(opal::parse("LET x = ;"), Err(Error::Parse(_))));
    assert!(matches!(opal::analyze("missing;"), Err(Error::Analyze(_))));
    assert!(matches!(opal::evaluate("1 / 0;"), Err(Error::Evaluate(_))));
}

use spicec::ast::*;
use spicec::parser::parse_spice;

fn expr(source: &str) -> Expr {
    let module = parse_spice(source).expect("parse failed");
    match module.body.into_iter().next() {
        Some(Stmt::Expression(stmt)) => stmt.expression,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn binary(expr: &Expr) -> (&BinaryOp, &Expr, &Expr) {
    match expr {
        Expr::Binary {
            operator,
            left,
            right,
        } => (operator, left, right),
        other => panic!("expected a binary expression, got {other:?}"),
    }
}

#[test]
fn test_or_binds_looser_than_and() {
    match expr("a or b and c\n") {
        Expr::Logical {
            operator: LogicalOp::Or,
            right,
            ..
        } => match *right {
            Expr::Logical {
                operator: LogicalOp::And,
                ..
            } => {}
            other => panic!("expected 'and' on the right, got {other:?}"),
        },
        other => panic!("expected 'or' at the top, got {other:?}"),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let parsed = expr("a + b * c\n");
    let (op, _, right) = binary(&parsed);
    assert_eq!(*op, BinaryOp::Add);
    let (op, _, _) = binary(right);
    assert_eq!(*op, BinaryOp::Mul);
}

#[test]
fn test_exponentiation_is_right_associative() {
    let parsed = expr("2 ** 3 ** 2\n");
    let (op, left, right) = binary(&parsed);
    assert_eq!(*op, BinaryOp::Pow);
    assert_eq!(*left, Expr::Literal(Literal::Number("2".to_string())));
    let (op, _, _) = binary(right);
    assert_eq!(*op, BinaryOp::Pow);
}

#[test]
fn test_membership_operators() {
    let cases: &[(&str, BinaryOp)] = &[
        ("x in items\n", BinaryOp::In),
        ("x not in items\n", BinaryOp::NotIn),
        ("x is None\n", BinaryOp::Is),
        ("x is not None\n", BinaryOp::IsNot),
    ];
    for (source, expected) in cases {
        let parsed = expr(source);
        let (op, _, _) = binary(&parsed);
        assert_eq!(op, expected, "{source}");
    }
}

#[test]
fn test_assignment_is_right_associative() {
    match expr("a = b = 1\n") {
        Expr::Assignment { value, .. } => match *value {
            Expr::Assignment { .. } => {}
            other => panic!("expected a nested assignment, got {other:?}"),
        },
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn test_named_call_arguments() {
    match expr("move(point, x=1, y=2)\n") {
        Expr::Call { arguments, .. } => {
            assert_eq!(arguments.len(), 3);
            assert!(arguments[0].name.is_none());
            assert_eq!(arguments[1].name.as_deref(), Some("x"));
            assert_eq!(arguments[2].name.as_deref(), Some("y"));
        }
        other => panic!("expected a call, got {other:?}"),
    }
}

#[test]
fn test_slice_component_elision() {
    let cases: &[(&str, bool, bool, bool)] = &[
        ("arr[:]\n", false, false, false),
        ("arr[1:]\n", true, false, false),
        ("arr[:5]\n", false, true, false),
        ("arr[::2]\n", false, false, true),
        ("arr[1:5:2]\n", true, true, true),
    ];
    for (source, has_start, has_stop, has_step) in cases {
        match expr(source) {
            Expr::Subscript { index, .. } => match *index {
                Expr::Slice { start, stop, step } => {
                    assert_eq!(start.is_some(), *has_start, "start of {source}");
                    assert_eq!(stop.is_some(), *has_stop, "stop of {source}");
                    assert_eq!(step.is_some(), *has_step, "step of {source}");
                }
                other => panic!("expected a slice in {source}, got {other:?}"),
            },
            other => panic!("expected a subscript in {source}, got {other:?}"),
        }
    }
}

#[test]
fn test_plain_subscript_is_not_a_slice() {
    match expr("arr[0]\n") {
        Expr::Subscript { index, .. } => {
            assert_eq!(*index, Expr::Literal(Literal::Number("0".to_string())));
        }
        other => panic!("expected a subscript, got {other:?}"),
    }
}

#[test]
fn test_comprehension_kinds() {
    let kinds: &[(&str, ComprehensionKind)] = &[
        ("[x * 2 for x in items]\n", ComprehensionKind::List),
        ("{x for x in items}\n", ComprehensionKind::Set),
        ("{k: v for k, v in pairs}\n", ComprehensionKind::Dict),
        ("(x for x in items)\n", ComprehensionKind::Generator),
    ];
    for (source, kind) in kinds {
        match expr(source) {
            Expr::Comprehension(comp) => assert_eq!(comp.kind, *kind, "{source}"),
            other => panic!("expected a comprehension in {source}, got {other:?}"),
        }
    }
}

#[test]
fn test_comprehension_with_condition() {
    match expr("[x for x in items if x > 0]\n") {
        Expr::Comprehension(comp) => {
            assert!(comp.condition.is_some());
        }
        other => panic!("expected a comprehension, got {other:?}"),
    }
}

#[test]
fn test_dict_comprehension_keeps_key() {
    match expr("{k: v * 2 for k, v in pairs}\n") {
        Expr::Comprehension(comp) => {
            assert!(comp.key.is_some());
            assert_eq!(comp.kind, ComprehensionKind::Dict);
        }
        other => panic!("expected a comprehension, got {other:?}"),
    }
}

#[test]
fn test_collection_literals() {
    assert_eq!(expr("[]\n"), Expr::Literal(Literal::List(Vec::new())));
    assert_eq!(expr("{}\n"), Expr::Literal(Literal::Dict(Vec::new())));
    assert_eq!(expr("()\n"), Expr::Literal(Literal::Tuple(Vec::new())));
    match expr("{1, 2, 3}\n") {
        Expr::Literal(Literal::Set(items)) => assert_eq!(items.len(), 3),
        other => panic!("expected a set literal, got {other:?}"),
    }
    match expr("(1,)\n") {
        Expr::Literal(Literal::Tuple(items)) => assert_eq!(items.len(), 1),
        other => panic!("expected a one-element tuple, got {other:?}"),
    }
    match expr("(1)\n") {
        Expr::Literal(Literal::Number(raw)) => assert_eq!(raw, "1"),
        other => panic!("expected a parenthesized number, got {other:?}"),
    }
}

#[test]
fn test_lambda_with_bare_body() {
    match expr("lambda (x, y) -> x + y\n") {
        Expr::Lambda { params, body, .. } => {
            assert_eq!(params.len(), 2);
            let (op, _, _) = binary(&body);
            assert_eq!(*op, BinaryOp::Add);
        }
        other => panic!("expected a lambda, got {other:?}"),
    }
}

#[test]
fn test_lambda_with_braced_body_and_return_type() {
    match expr("lambda (x: int): int -> { x * 2 }\n") {
        Expr::Lambda {
            params,
            return_type,
            ..
        } => {
            assert_eq!(params[0].type_annotation.as_deref(), Some("int"));
            assert_eq!(return_type.as_deref(), Some("int"));
        }
        other => panic!("expected a lambda, got {other:?}"),
    }
}

#[test]
fn test_condition_brace_opens_the_block() {
    // In condition position the brace must terminate the expression,
    // not start a set or dict literal.
    let module = parse_spice("if x {\n    y()\n}\n").expect("parse failed");
    match &module.body[0] {
        Stmt::If(stmt) => {
            assert_eq!(
                stmt.condition,
                Expr::Identifier {
                    name: "x".to_string(),
                    line: 1
                }
            );
            assert_eq!(stmt.then_body.len(), 1);
        }
        other => panic!("expected an if, got {other:?}"),
    }
}

#[test]
fn test_lambda_brace_in_condition_is_not_the_block() {
    // The brace after `->` belongs to the lambda body; the block brace
    // comes after the call closes.
    let module =
        parse_spice("if check(lambda (x) -> { x > 0 }) {\n    pass\n}\n").expect("parse failed");
    match &module.body[0] {
        Stmt::If(stmt) => {
            match &stmt.condition {
                Expr::Call { arguments, .. } => {
                    assert!(matches!(arguments[0].value, Expr::Lambda { .. }));
                }
                other => panic!("expected a call condition, got {other:?}"),
            }
            assert_eq!(stmt.then_body.len(), 1);
        }
        other => panic!("expected an if, got {other:?}"),
    }
}

#[test]
fn test_attribute_and_call_chains() {
    match expr("obj.items[0].render()\n") {
        Expr::Call { callee, .. } => match *callee {
            Expr::Attribute { name, .. } => assert_eq!(name, "render"),
            other => panic!("expected an attribute callee, got {other:?}"),
        },
        other => panic!("expected a call, got {other:?}"),
    }
}

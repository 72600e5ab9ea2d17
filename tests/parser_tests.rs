use spicec::ast::*;
use spicec::parser::parse_spice;

fn parse(source: &str) -> Module {
    parse_spice(source).expect("parse failed")
}

#[test]
fn test_interface_with_extends() {
    let module = parse(
        "interface Pet extends Animal, Walker {\n    def name() -> str;\n    def walk() -> None;\n}\n",
    );
    match &module.body[0] {
        Stmt::Interface(decl) => {
            assert_eq!(decl.name, "Pet");
            assert_eq!(decl.bases, vec!["Animal", "Walker"]);
            assert_eq!(decl.methods.len(), 2);
            assert_eq!(decl.methods[0].name, "name");
            assert_eq!(decl.methods[0].return_type.as_deref(), Some("str"));
            assert_eq!(decl.methods[1].return_type.as_deref(), Some("None"));
        }
        other => panic!("expected an interface, got {other:?}"),
    }
}

#[test]
fn test_interface_with_parenthesized_bases() {
    let module = parse("interface Pet(Animal) {\n    def name() -> str;\n}\n");
    match &module.body[0] {
        Stmt::Interface(decl) => assert_eq!(decl.bases, vec!["Animal"]),
        other => panic!("expected an interface, got {other:?}"),
    }
}

#[test]
fn test_class_dual_base_syntax() {
    let with_parens = parse("class Dog(Animal) {\n    pass\n}\n");
    let with_extends = parse("class Dog extends Animal {\n    pass\n}\n");
    match (&with_parens.body[0], &with_extends.body[0]) {
        (Stmt::Class(a), Stmt::Class(b)) => {
            assert_eq!(a.bases, b.bases);
            assert_eq!(a.bases, vec!["Animal"]);
        }
        other => panic!("expected classes, got {other:?}"),
    }
}

#[test]
fn test_class_implements_clause() {
    let module = parse("class Dog extends Animal implements Walker, Pet {\n    pass\n}\n");
    match &module.body[0] {
        Stmt::Class(decl) => {
            assert_eq!(decl.bases, vec!["Animal"]);
            assert_eq!(decl.interfaces, vec!["Walker", "Pet"]);
        }
        other => panic!("expected a class, got {other:?}"),
    }
}

#[test]
fn test_combined_base_syntaxes_rejected() {
    assert!(parse_spice("class Dog(Animal) extends Pet {\n    pass\n}\n").is_err());
}

#[test]
fn test_parameters_with_types_and_defaults() {
    let module = parse("def greet(name: str, times: int = 3) -> str {\n    pass\n}\n");
    match &module.body[0] {
        Stmt::Function(decl) => {
            assert_eq!(decl.params.len(), 2);
            assert_eq!(decl.params[0].name, "name");
            assert_eq!(decl.params[0].type_annotation.as_deref(), Some("str"));
            assert!(decl.params[0].default.is_none());
            assert_eq!(decl.params[1].name, "times");
            assert_eq!(
                decl.params[1].default,
                Some(Expr::Literal(Literal::Number("3".to_string())))
            );
            assert_eq!(decl.return_type.as_deref(), Some("str"));
        }
        other => panic!("expected a function, got {other:?}"),
    }
}

#[test]
fn test_colon_return_type_spelling() {
    let module = parse("def size(): int {\n    return 0\n}\n");
    match &module.body[0] {
        Stmt::Function(decl) => assert_eq!(decl.return_type.as_deref(), Some("int")),
        other => panic!("expected a function, got {other:?}"),
    }
}

#[test]
fn test_if_elif_else_chain() {
    let module = parse(
        "if x > 2 {\n    a()\n} elif x > 1 {\n    b()\n} else {\n    c()\n}\n",
    );
    match &module.body[0] {
        Stmt::If(stmt) => {
            assert_eq!(stmt.then_body.len(), 1);
            assert_eq!(stmt.elif_branches.len(), 1);
            assert!(stmt.else_body.is_some());
        }
        other => panic!("expected an if, got {other:?}"),
    }
}

#[test]
fn test_while_loop() {
    let module = parse("while n > 0 {\n    n -= 1;\n}\n");
    match &module.body[0] {
        Stmt::While(stmt) => assert_eq!(stmt.body.len(), 1),
        other => panic!("expected a while, got {other:?}"),
    }
}

#[test]
fn test_for_loop_with_tuple_target() {
    let module = parse("for k, v in pairs {\n    use(k, v)\n}\n");
    match &module.body[0] {
        Stmt::For(stmt) => match &stmt.target {
            Expr::Literal(Literal::Tuple(items)) => assert_eq!(items.len(), 2),
            other => panic!("expected a tuple target, got {other:?}"),
        },
        other => panic!("expected a for, got {other:?}"),
    }
}

#[test]
fn test_switch_with_cases_and_default() {
    let module = parse(
        "switch command {\n    case \"start\" {\n        run();\n    }\n    case \"stop\" {\n        halt();\n    }\n    default {\n        ignore();\n    }\n}\n",
    );
    match &module.body[0] {
        Stmt::Switch(stmt) => {
            assert_eq!(stmt.cases.len(), 2);
            assert!(stmt.default.is_some());
        }
        other => panic!("expected a switch, got {other:?}"),
    }
}

#[test]
fn test_duplicate_default_rejected() {
    let source = "switch x {\n    default {\n        a()\n    }\n    default {\n        b()\n    }\n}\n";
    assert!(parse_spice(source).is_err());
}

#[test]
fn test_imports() {
    let module = parse("import os.path as p\nfrom typing import List as L, Dict\n");
    match &module.body[0] {
        Stmt::Import(stmt) => {
            assert!(!stmt.is_from);
            assert_eq!(stmt.module, "os.path");
            assert_eq!(stmt.alias.as_deref(), Some("p"));
        }
        other => panic!("expected an import, got {other:?}"),
    }
    match &module.body[1] {
        Stmt::Import(stmt) => {
            assert!(stmt.is_from);
            assert_eq!(stmt.module, "typing");
            assert_eq!(stmt.names.len(), 2);
            assert_eq!(stmt.names[0].alias.as_deref(), Some("L"));
            assert!(stmt.names[1].alias.is_none());
        }
        other => panic!("expected an import, got {other:?}"),
    }
}

#[test]
fn test_raise_with_and_without_value() {
    let module = parse("raise ValueError(\"bad\");\nraise\n");
    match &module.body[0] {
        Stmt::Raise(stmt) => assert!(stmt.exception.is_some()),
        other => panic!("expected a raise, got {other:?}"),
    }
    match &module.body[1] {
        Stmt::Raise(stmt) => assert!(stmt.exception.is_none()),
        other => panic!("expected a raise, got {other:?}"),
    }
}

#[test]
fn test_semicolon_and_newline_terminators_are_equivalent() {
    let with_semicolon = parse("x = 1;\n");
    let without = parse("x = 1\n");
    match (&with_semicolon.body[0], &without.body[0]) {
        (Stmt::Expression(a), Stmt::Expression(b)) => {
            assert!(a.has_semicolon);
            assert!(!b.has_semicolon);
            assert_eq!(a.expression, b.expression);
        }
        other => panic!("expected expression statements, got {other:?}"),
    }
}

#[test]
fn test_missing_terminator_is_an_error() {
    assert!(parse_spice("x = 1 y = 2\n").is_err());
}

#[test]
fn test_final_variable_declaration() {
    let module = parse("final MAX_SIZE: int = 100;\n");
    match &module.body[0] {
        Stmt::Final(decl) => {
            assert_eq!(decl.name, "MAX_SIZE");
            assert_eq!(decl.type_annotation.as_deref(), Some("int"));
            assert_eq!(decl.line, 1);
        }
        other => panic!("expected a final declaration, got {other:?}"),
    }
}

use spicec::ast::*;
use spicec::codegen::generate_python;
use spicec::parser::parse_spice;

fn parse(source: &str) -> Module {
    parse_spice(source).expect("parse failed")
}

fn compile_to_python(source: &str) -> String {
    generate_python(&parse(source))
}

#[test]
fn test_abstract_class_with_abstract_method() {
    let module = parse(
        "abstract class Animal {\n    abstract def make_sound() -> str;\n\n    def eat() -> None {\n        pass;\n    }\n}\n",
    );
    match &module.body[0] {
        Stmt::Class(decl) => {
            assert!(decl.is_abstract);
            match &decl.body[0] {
                Stmt::Function(method) => {
                    assert!(method.is_abstract);
                    assert!(method.body.is_none());
                }
                other => panic!("expected a method, got {other:?}"),
            }
            match &decl.body[1] {
                Stmt::Function(method) => {
                    assert!(!method.is_abstract);
                    assert!(method.body.is_some());
                }
                other => panic!("expected a method, got {other:?}"),
            }
        }
        other => panic!("expected a class, got {other:?}"),
    }
}

#[test]
fn test_final_class_gets_decorator() {
    let python = compile_to_python("final class Config {\n    pass\n}\n");
    assert!(python.contains("from typing import final"));
    assert!(python.contains("@final\nclass Config:"));
}

#[test]
fn test_static_method_has_no_self() {
    let python = compile_to_python(
        "class MathUtils {\n    static def add(a: int, b: int) -> int {\n        return a + b\n    }\n}\n",
    );
    assert!(python.contains("@staticmethod"));
    assert!(python.contains("def add(a: int, b: int) -> int:"));
    assert!(!python.contains("def add(self"));
}

#[test]
fn test_final_method_inside_class() {
    let python = compile_to_python(
        "class Base {\n    final def id() -> int {\n        return 1\n    }\n}\n",
    );
    assert!(python.contains("from typing import final"));
    assert!(python.contains("@final"));
    assert!(python.contains("def id(self) -> int:"));
}

#[test]
fn test_modifier_without_declaration_is_rejected() {
    assert!(parse_spice("abstract x = 1\n").is_err());
    assert!(parse_spice("static class Oops {\n    pass\n}\n").is_err());
}

#[test]
fn test_abstract_class_derives_abc_only_without_bases() {
    let with_base = compile_to_python(
        "abstract class Dog extends Animal {\n    abstract def bark() -> None;\n}\n",
    );
    assert!(with_base.contains("class Dog(Animal):"));
    assert!(!with_base.contains("class Dog(Animal, ABC):"));

    let without_base =
        compile_to_python("abstract class Shape {\n    abstract def area() -> float;\n}\n");
    assert!(without_base.contains("class Shape(ABC):"));
}

#[test]
fn test_decorator_order_static_then_abstract() {
    let python = compile_to_python(
        "abstract class Registry {\n    static abstract def create() -> None;\n}\n",
    );
    let static_pos = python.find("@staticmethod").expect("missing @staticmethod");
    let abstract_pos = python.find("@abstractmethod").expect("missing @abstractmethod");
    assert!(static_pos < abstract_pos);
}

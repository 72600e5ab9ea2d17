use spicec::codegen::generate_python;
use spicec::parser::parse_spice;

fn compile_to_python(source: &str) -> String {
    let module = parse_spice(source).expect("parse failed");
    generate_python(&module)
}

#[test]
fn test_abstract_class_round_trip() {
    let python = compile_to_python(
        "abstract class Animal {\n    abstract def make_sound() -> str;\n\n    def eat() -> None {\n        pass;\n    }\n}\n",
    );
    assert!(python.contains("from abc import ABC, abstractmethod"));
    assert!(python.contains("class Animal(ABC):"));
    assert_eq!(python.matches("@abstractmethod").count(), 1);
    assert!(python.contains("def make_sound(self) -> str:"));
    assert!(python.contains("def eat(self) -> None:"));
}

#[test]
fn test_interface_becomes_protocol() {
    let python = compile_to_python(
        "interface Shape {\n    def area() -> float;\n    def perimeter() -> float;\n}\n",
    );
    assert!(python.contains("from typing import Protocol"));
    assert!(python.contains("class Shape(Protocol):"));
    assert!(python.contains("def area(self) -> float:"));
    assert!(python.contains("def perimeter(self) -> float:"));
    assert!(python.contains("..."));
}

#[test]
fn test_interface_bases_follow_protocol() {
    let python = compile_to_python(
        "interface Pet extends Animal {\n    def name() -> str;\n}\n",
    );
    assert!(python.contains("class Pet(Protocol, Animal):"));
}

#[test]
fn test_switch_lowers_to_if_chain() {
    let python = compile_to_python(
        "switch command {\n    case \"start\" {\n        run();\n    }\n    case \"stop\" {\n        halt();\n    }\n    default {\n        ignore();\n    }\n}\n",
    );
    assert!(python.contains("if command == \"start\":"));
    assert!(python.contains("elif command == \"stop\":"));
    assert!(python.contains("else:"));
}

#[test]
fn test_binary_chains_emit_flat() {
    // Grouping parens are not represented in the tree; binary chains
    // re-emit without them even when the parse shape came from parens.
    let python = compile_to_python("x = (a + b) * c\n");
    assert!(python.contains("x = a + b * c"));
}

#[test]
fn test_switch_compares_emitted_subject_expression() {
    let python = compile_to_python(
        "switch state.mode {\n    case 1 {\n        pass;\n    }\n}\n",
    );
    assert!(python.contains("if state.mode == 1:"));
}

#[test]
fn test_imports_synthesized_only_when_needed() {
    let python = compile_to_python("x = 1\n");
    assert!(!python.contains("from abc import"));
    assert!(!python.contains("from typing import"));
}

#[test]
fn test_one_blank_line_between_top_level_declarations() {
    let python = compile_to_python(
        "def a() {\n    pass\n}\n\n\ndef b() {\n    pass\n}\n",
    );
    assert_eq!(python, "def a():\n    pass\n\ndef b():\n    pass\n");
}

#[test]
fn test_consecutive_imports_stay_adjacent() {
    let python = compile_to_python("import os\nimport sys\n\nx = 1\n");
    assert!(python.contains("import os\nimport sys\n"));
}

#[test]
fn test_collection_emission() {
    let python = compile_to_python("a = set()\nb = {1, 2}\nc = (1,)\nd = {\"k\": 1}\n");
    assert!(python.contains("a = set()"));
    assert!(python.contains("b = {1, 2}"));
    assert!(python.contains("c = (1,)"));
    assert!(python.contains("d = {\"k\": 1}"));
}

#[test]
fn test_empty_braces_are_an_empty_dict() {
    let python = compile_to_python("x = {}\n");
    assert!(python.contains("x = {}"));
}

#[test]
fn test_lambda_drops_annotations() {
    let python = compile_to_python("f = lambda (x: int) -> { x * 2 }\n");
    assert!(python.contains("f = lambda x: x * 2"));
}

#[test]
fn test_slice_emission() {
    let python = compile_to_python("a = arr[1:5:2]\nb = arr[:]\nc = arr[::2]\n");
    assert!(python.contains("a = arr[1:5:2]"));
    assert!(python.contains("b = arr[:]"));
    assert!(python.contains("c = arr[::2]"));
}

#[test]
fn test_comprehension_emission() {
    let python = compile_to_python(
        "a = [x * 2 for x in items if x > 0]\nb = {k: v for k, v in pairs}\n",
    );
    assert!(python.contains("a = [x * 2 for x in items if x > 0]"));
    assert!(python.contains("b = {k: v for (k, v) in pairs}"));
}

#[test]
fn test_for_loop_keeps_iterable() {
    let python = compile_to_python("for item in inventory.all() {\n    item.save()\n}\n");
    assert!(python.contains("for item in inventory.all():"));
    assert!(python.contains("    item.save()"));
}

#[test]
fn test_final_declaration_emits_annotated_assignment() {
    let python = compile_to_python("final MAX: int = 100;\n");
    assert!(python.contains("MAX: int = 100"));
}

#[test]
fn test_logical_and_unary_are_parenthesized() {
    let python = compile_to_python("x = a and not b\n");
    assert!(python.contains("x = (a and (not b))"));
}

#[test]
fn test_output_ends_with_single_newline() {
    let python = compile_to_python("x = 1\ny = 2\n");
    assert!(python.ends_with('\n'));
    assert!(!python.ends_with("\n\n"));
}

use super::ast::*;
use super::malformed::{SyntaxError, SyntaxErrorKind};
use super::*; // 导入父模块（parser）的所有公共项，主要是 `parse` 函数
use crate::diagnostics::Diagnostic;
use crate::lexer::{self, AnimationMode, Shape};
use crate::symbols::SymbolTable;

/// 先声明一个光标 `c`，失败案例大多需要它。
const PRELUDE: &str = "c = create cursor at (0, 0) with (0, 0, 0, 255, 1, 1)\n";

/// 辅助函数，用于测试成功解析的场景。
/// 它会执行词法和语法分析，如果出现任何错误就会 panic，否则返回 AST。
fn parse_ok(source: &str) -> Program {
    let mut symbols = SymbolTable::new();
    let (tokens, lex_errors) = lexer::lex(source, &mut symbols);
    assert!(lex_errors.is_empty(), "Lexer failed unexpectedly for source: {source}: {lex_errors:?}");

    let (program, errors) = parse(source, tokens);
    assert!(errors.is_empty(), "Parser failed unexpectedly for source: {source}: {errors:?}");
    program
}

/// 辅助函数，用于测试解析失败的场景，返回全部语法错误。
fn parse_fail(source: &str) -> Vec<SyntaxError> {
    let mut symbols = SymbolTable::new();
    let (tokens, _lex_errors) = lexer::lex(source, &mut symbols);
    let (_program, errors) = parse(source, tokens);
    assert!(!errors.is_empty(), "Parser accepted invalid source: {source}");
    errors
}

fn first_error(source: &str) -> SyntaxErrorKind {
    parse_fail(source).remove(0).kind
}

// --- 成功路径测试 (Happy Path) ---

#[test]
fn test_creation_movement_drawing_and_mode() {
    let source = "a = create cursor at (10,20) with (255,0,0,0,255,0,2,1)\n\
                  move a by 5\n\
                  draw (circle, 10) with a\n\
                  mode snail";
    let program = parse_ok(source);
    assert_eq!(program.stmts.len(), 4);

    match &program.stmts[0].kind {
        StmtKind::CreateCursor(create) => {
            assert_eq!(create.target.name, "a");
            assert!(matches!(create.color, ColorArgs::TwoTone(_)));
            assert!(matches!(create.thickness, Operand::Literal(2, _)));
            assert!(matches!(create.visibility, Operand::Literal(1, _)));
        }
        other => panic!("expected a cursor creation, got {other:?}"),
    }
    assert!(matches!(
        &program.stmts[1].kind,
        StmtKind::Move { cursor, distance: Operand::Literal(5, _) } if cursor.name == "a"
    ));
    assert!(matches!(
        &program.stmts[2].kind,
        StmtKind::Draw { figure: Figure::Basic { shape: Shape::Circle, .. }, .. }
    ));
    assert_eq!(program.stmts[3].kind, StmtKind::Mode(AnimationMode::Snail));
}

#[test]
fn test_six_value_creation_is_rgba() {
    let program = parse_ok(PRELUDE);
    match &program.stmts[0].kind {
        StmtKind::CreateCursor(create) => assert!(matches!(create.color, ColorArgs::Rgba(_))),
        other => panic!("expected a cursor creation, got {other:?}"),
    }
}

#[test]
fn test_assignments_and_arithmetic() {
    let program = parse_ok("x = 4\ny = x\nz = x * 3");
    assert!(matches!(&program.stmts[0].kind, StmtKind::Assign { value: Operand::Literal(4, _), .. }));
    assert!(matches!(
        &program.stmts[1].kind,
        StmtKind::Assign { value: Operand::Name(ident), .. } if ident.name == "x"
    ));
    assert!(matches!(
        &program.stmts[2].kind,
        StmtKind::Arithmetic { op: ArithOp::Mul, operand: Operand::Literal(3, _), .. }
    ));
}

#[test]
fn test_rotate_set_and_arc() {
    let source = format!("{PRELUDE}rotate c by 90\nset c thickness at 4\ndraw (arc, 50, 0, 180) with c");
    let program = parse_ok(&source);
    assert!(matches!(&program.stmts[1].kind, StmtKind::Rotate { angle: Operand::Literal(90, _), .. }));
    assert!(matches!(&program.stmts[2].kind, StmtKind::SetThickness { thickness: Operand::Literal(4, _), .. }));
    assert!(matches!(
        &program.stmts[3].kind,
        StmtKind::Draw {
            figure: Figure::Arc { size: Operand::Literal(50, _), start: Operand::Literal(0, _), end: Operand::Literal(180, _) },
            ..
        }
    ));
}

#[test]
fn test_for_loop_body() {
    let program = parse_ok("for i in (1,3) do x = x + 1 end");
    match &program.stmts[0].kind {
        StmtKind::For { var, start, end, body } => {
            assert_eq!(var.name, "i");
            assert!(matches!(start, Operand::Literal(1, _)));
            assert!(matches!(end, Operand::Literal(3, _)));
            assert_eq!(body.len(), 1);
            assert!(matches!(body[0].kind, StmtKind::Arithmetic { op: ArithOp::Add, .. }));
        }
        other => panic!("expected a for loop, got {other:?}"),
    }
}

#[test]
fn test_if_else_and_while() {
    let program = parse_ok("x = 1\nif x < 5 then x = 2 else x = 3 end\nwhile x = 3 do x = x - 1 end");
    match &program.stmts[1].kind {
        StmtKind::If { condition, then_body, else_body } => {
            assert_eq!(condition.op, CompareOp::Lt);
            assert_eq!(then_body.len(), 1);
            assert_eq!(else_body.as_ref().map(Vec::len), Some(1));
        }
        other => panic!("expected an if statement, got {other:?}"),
    }
    assert!(matches!(
        &program.stmts[2].kind,
        StmtKind::While { condition: Condition { op: CompareOp::Eq, .. }, body } if body.len() == 1
    ));
}

#[test]
fn test_nested_blocks() {
    let program = parse_ok("for i in (1, 2) do if i > 1 then x = 1 end end");
    match &program.stmts[0].kind {
        StmtKind::For { body, .. } => assert!(matches!(body[0].kind, StmtKind::If { .. })),
        other => panic!("expected a for loop, got {other:?}"),
    }
}

// --- 失败路径测试 (Sad Path) ---

#[test]
fn test_move_error_productions() {
    use SyntaxErrorKind::*;
    assert_eq!(first_error("move"), MoveIncomplete);
    assert_eq!(first_error("move 5"), MoveMissingCursor { number: "5".into() });
    assert_eq!(
        first_error(&format!("{PRELUDE}move c")),
        MoveMissingBy { cursor: "c".into() }
    );
    assert_eq!(
        first_error(&format!("{PRELUDE}move c by")),
        MoveMissingDistance { cursor: "c".into() }
    );
}

#[test]
fn test_swapped_orders() {
    let order = |source: &str| match first_error(&format!("{PRELUDE}{source}")) {
        SyntaxErrorKind::IncorrectOrder { statement, text } => (statement, text),
        other => panic!("expected an ordering error for {source:?}, got {other:?}"),
    };
    assert_eq!(order("c by move 10"), ("move", "c by move 10".to_string()));
    assert_eq!(order("by c move 10"), ("move", "by c move 10".to_string()));
    assert_eq!(order("move by c 10"), ("move", "move by c 10".to_string()));
    assert_eq!(order("c move by 10"), ("move", "c move by 10".to_string()));
    assert_eq!(order("rotate by c 45"), ("rotate", "rotate by c 45".to_string()));
}

#[test]
fn test_rotate_and_set_error_productions() {
    use SyntaxErrorKind::*;
    assert_eq!(first_error("rotate"), RotateIncomplete);
    assert_eq!(first_error("rotate 90"), RotateExpectedCursor { found: "90".into() });
    assert_eq!(first_error(&format!("{PRELUDE}rotate c 90")), RotateMissingBy { cursor: "c".into() });
    assert_eq!(first_error(&format!("{PRELUDE}rotate c by")), RotateMissingAngle { cursor: "c".into() });
    assert_eq!(first_error(&format!("{PRELUDE}set c thickness 5")), SetMissingAt { cursor: "c".into() });
    assert_eq!(first_error(&format!("{PRELUDE}set c thickness at")), SetMissingValue { cursor: "c".into() });
    assert_eq!(first_error("set thickness at 3"), SetMissingCursor);
}

#[test]
fn test_arc_missing_start_angle() {
    let errors = parse_fail(&format!("{PRELUDE}draw (arc, 10,) with c"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, SyntaxErrorKind::ArcMissingStart);
}

#[test]
fn test_draw_error_productions() {
    use SyntaxErrorKind::*;
    assert_eq!(first_error("draw"), DrawIncomplete);
    assert_eq!(first_error(&format!("{PRELUDE}draw (circle) with c")), DrawMissingSize { form: "circle" });
    assert_eq!(first_error(&format!("{PRELUDE}draw (square, 4) c")), DrawMissingWith);
    assert_eq!(first_error("draw (line, 4) with"), DrawMissingCursor);
    assert_eq!(first_error(&format!("{PRELUDE}draw (line, 4 with c")), DrawBeforeWith);
}

#[test]
fn test_creation_with_wrong_number_of_values() {
    let errors = parse_fail("a = create cursor at (1, 2) with (1, 2, 3, 4, 5, 6, 7)");
    assert_eq!(errors[0].kind, SyntaxErrorKind::CreateWrongArity { found: 7 });
}

#[test]
fn test_block_error_productions() {
    use SyntaxErrorKind::*;
    assert_eq!(first_error("for i (1,3) do end"), ForMissingIn { var: "i".into() });
    assert_eq!(first_error("for i in (1 3) do end"), ForMissingComma);
    assert_eq!(first_error("for i in (1,3) end"), ForMissingDo { var: "i".into() });
    assert_eq!(first_error("x = 1\nif x < 2 x = 3 end"), IfMissingThen);
    assert_eq!(first_error("while do end"), WhileMissingCondition);
    assert_eq!(first_error("mode"), ModeMissingAnimation);
}

#[test]
fn test_missing_end_at_end_of_file() {
    let errors = parse_fail("for i in (1,3) do x = 1");
    assert_eq!(
        errors[0].kind,
        SyntaxErrorKind::UnexpectedEof { hints: vec!["for", "end"] }
    );
}

#[test]
fn test_arithmetic_missing_operand() {
    assert_eq!(
        first_error("x = 1\ny = x +"),
        SyntaxErrorKind::ArithmeticMissingOperand {
            name: "y".into(),
            base: "x".into(),
            op: "+",
        }
    );
}

#[test]
fn test_generic_fallback_collects_every_keyword_on_the_line() {
    let errors = parse_fail("x = 1\nby end");
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors[0].kind,
        SyntaxErrorKind::UnexpectedElement {
            found: "by".into(),
            hints: vec!["by", "end"],
        }
    );
    assert!(matches!(&errors[1].kind, SyntaxErrorKind::UnexpectedElement { found, .. } if found == "end"));
}

#[test]
fn test_errors_inside_bodies_are_reported() {
    let errors = parse_fail(&format!("{PRELUDE}for i in (1,2) do move c end"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, SyntaxErrorKind::MoveMissingBy { cursor: "c".into() });
}

#[test]
fn test_parsing_continues_after_an_error() {
    let errors = parse_fail("move\nmode\nrotate");
    assert_eq!(errors.len(), 3);
}

#[test]
fn test_syntax_error_becomes_diagnostic() {
    let source = format!("{PRELUDE}move c");
    let error = parse_fail(&source).remove(0);
    let diagnostic: Diagnostic = error.into();
    assert_eq!(diagnostic.code(), "E0102");
    assert_eq!(diagnostic.suggestion(), Some("'move c by <number>'."));
}

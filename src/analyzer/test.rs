// In src/analyzer/test.rs

use super::*;
use crate::lexer::{lex, AnimationMode};
use crate::parser::parse;

const PRELUDE: &str = "c = create cursor at (100, 100) with (0, 0, 0, 255, 1, 1)\n";

struct Outcome {
    instructions: Option<InstructionBuffer>,
    symbols: SymbolTable,
    diagnostics: DiagnosticBag,
}

/// 执行词法、语法分析和求值。前两个阶段必须没有错误。
fn analyze_source(src: &str) -> Outcome {
    let mut symbols = SymbolTable::new();
    let (tokens, lex_errors) = lex(src, &mut symbols);
    assert!(lex_errors.is_empty(), "Test setup failed (lexical errors): {lex_errors:?}");

    let (program, parse_errors) = parse(src, tokens);
    assert!(parse_errors.is_empty(), "Test setup failed (parsing errors): {parse_errors:?}");

    let mut diagnostics = DiagnosticBag::new(src);
    let instructions = Analyzer::new(&mut symbols, &mut diagnostics).analyze(&program);
    Outcome {
        instructions,
        symbols,
        diagnostics,
    }
}

/// 辅助函数：用于测试应该成功通过分析的代码。
fn analyze_ok(src: &str) -> (InstructionBuffer, SymbolTable) {
    let outcome = analyze_source(src);
    match outcome.instructions {
        Some(instructions) => (instructions, outcome.symbols),
        None => panic!("Analysis failed unexpectedly: {}", outcome.diagnostics.render_plain()),
    }
}

/// 辅助函数：用于测试应该产生语义错误的代码，返回错误码列表。
fn analyze_err(src: &str) -> (Vec<String>, SymbolTable) {
    let outcome = analyze_source(src);
    assert!(outcome.instructions.is_none(), "Analysis succeeded unexpectedly for: {src}");
    let codes = outcome.diagnostics.iter().map(|d| d.code().to_string()).collect();
    (codes, outcome.symbols)
}

// --- 成功路径测试 ---

#[test]
fn test_instructions_follow_source_order() {
    let src = "a = create cursor at (10,20) with (255,0,0,0,255,0,2,1)\n\
               move a by 5\n\
               draw (circle, 10) with a\n\
               mode snail";
    let (buffer, symbols) = analyze_ok(src);
    let texts: Vec<String> = buffer.iter().map(Instruction::text).collect();
    assert_eq!(
        texts,
        vec![
            "Cursor a = createCursor(10, 20, (SDL_Color){255, 0, 0, 255}, 2, 1);",
            "moveCursor(&a,5);",
            "drawCircle(renderer, &a, 10); // Draw a circle",
            "animateDrawingsnail(renderer);",
        ]
    );
    assert_eq!(buffer.mode(), Some(AnimationMode::Snail));

    let cursor = symbols.cursor("a").expect("cursor a should exist");
    assert_eq!((cursor.x, cursor.y), (15, 20));
}

#[test]
fn test_for_loop_runs_body_once_per_iteration() {
    let (_, symbols) = analyze_ok("for i in (1,3) do x = x + 1 end");
    assert_eq!(symbols.value("x"), Some(3));
    assert_eq!(symbols.value("i"), Some(3));
}

#[test]
fn test_for_loop_emits_one_instruction_per_iteration() {
    let (buffer, _) = analyze_ok(&format!("{PRELUDE}for i in (1, 4) do move c by i end"));
    let moves: Vec<&str> = buffer.transforms().collect();
    assert_eq!(
        moves,
        vec!["moveCursor(&c,1);", "moveCursor(&c,2);", "moveCursor(&c,3);", "moveCursor(&c,4);"]
    );
}

#[test]
fn test_while_loop_rechecks_its_condition() {
    let (_, symbols) = analyze_ok("x = 0\nwhile x < 3 do x = x + 1 end");
    assert_eq!(symbols.value("x"), Some(3));
}

#[test]
fn test_if_else_selects_one_branch() {
    let (_, symbols) = analyze_ok("x = 5\nif x > 3 then y = 1 else y = 2 end");
    assert_eq!(symbols.value("y"), Some(1));

    let (_, symbols) = analyze_ok("x = 5\nif x = 4 then y = 1 else y = 2 end");
    assert_eq!(symbols.value("y"), Some(2));
}

#[test]
fn test_arithmetic_uses_floor_semantics() {
    let (_, symbols) = analyze_ok("x = 7\ny = x / 2\nz = x % 3\nn = 0\nn = n - 7\nq = n / 2\nr = n % 3");
    assert_eq!(symbols.value("y"), Some(3));
    assert_eq!(symbols.value("z"), Some(1));
    assert_eq!(symbols.value("q"), Some(-4));
    assert_eq!(symbols.value("r"), Some(2));
}

#[test]
fn test_cursor_state_follows_the_runtime() {
    let src = format!("{PRELUDE}rotate c by 450\nmove c by 10\nset c thickness at 6");
    let (buffer, symbols) = analyze_ok(&src);
    let cursor = symbols.cursor("c").expect("cursor c should exist");
    assert_eq!(cursor.angle, 90);
    assert_eq!((cursor.x, cursor.y), (100, 110));
    assert_eq!(cursor.thickness, 6);
    assert_eq!(
        buffer.transforms().collect::<Vec<_>>(),
        vec!["rotateCursor(&c,450);", "moveCursor(&c,10);", "setThickness(&c,6);"]
    );
}

#[test]
fn test_rotate_by_extreme_literals_does_not_overflow() {
    let src = format!(
        "{PRELUDE}rotate c by 1\nrotate c by 9223372036854775807\n\
         n = 0\nn = n - 9223372036854775807\nn = n - 1\nrotate c by n"
    );
    let (_, symbols) = analyze_ok(&src);
    assert_eq!(symbols.value("n"), Some(i64::MIN));
    assert_eq!(symbols.cursor("c").expect("cursor c should exist").angle, 0);
}

#[test]
fn test_arc_and_filled_shapes() {
    let src = format!("{PRELUDE}draw (arc, 50, 0, 90) with c\ndraw (filledsquare, 8) with c");
    let (buffer, _) = analyze_ok(&src);
    assert_eq!(
        buffer.drawings().collect::<Vec<_>>(),
        vec![
            "drawArc(renderer, &c, 50, 0, 90);",
            "drawFilledSquare(renderer, &c, 8); // Draw a filled square",
        ]
    );
}

#[test]
fn test_last_mode_wins() {
    let (buffer, _) = analyze_ok("mode snail\nmode disco");
    assert_eq!(buffer.mode(), Some(AnimationMode::Disco));
}

#[test]
fn test_values_come_from_variables() {
    let (buffer, _) = analyze_ok(&format!("{PRELUDE}size = 12\ndraw (square, size) with c"));
    assert_eq!(
        buffer.drawings().next(),
        Some("drawSquare(renderer, &c, 12); // Draw a square")
    );
}

// --- 失败路径测试 ---

#[test]
fn test_division_by_zero_reports_once_and_skips_assignment() {
    let (codes, symbols) = analyze_err("y = 4\nx = y / 0");
    assert_eq!(codes, vec!["E0200"]);
    assert_eq!(symbols.value("x"), None);

    let (codes, symbols) = analyze_err("y = 4\nx = y % 0");
    assert_eq!(codes, vec!["E0201"]);
    assert_eq!(symbols.value("x"), None);
}

#[test]
fn test_zero_divisor_in_loop_body_is_reported_once() {
    let (codes, _) = analyze_err("y = 1\nfor i in (1,3) do x = y / 0 end");
    assert_eq!(codes, vec!["E0200"]);
}

#[test]
fn test_undefined_variable() {
    let (codes, _) = analyze_err("if 1 > 2 then z = 5 end\nw = z");
    assert_eq!(codes, vec!["E0202"]);
}

#[test]
fn test_kind_mismatch() {
    let (codes, _) = analyze_err(&format!("{PRELUDE}x = 5\nmove x by 2"));
    assert_eq!(codes, vec!["E0203"]);

    let (codes, _) = analyze_err(&format!("{PRELUDE}move c by c"));
    assert_eq!(codes, vec!["E0203"]);
}

#[test]
fn test_cursor_created_twice() {
    let (codes, _) = analyze_err(&format!("{PRELUDE}{PRELUDE}"));
    assert_eq!(codes, vec!["E0204"]);
}

#[test]
fn test_arithmetic_overflow() {
    let (codes, symbols) = analyze_err("x = 9223372036854775807\ny = x + 1");
    assert_eq!(codes, vec!["E0205"]);
    assert_eq!(symbols.value("y"), None);
}

#[test]
fn test_semantic_error_lines_come_from_the_statement() {
    let outcome = analyze_source("y = 4\n\nx = y / 0");
    let diagnostic = outcome.diagnostics.iter().next().expect("one diagnostic");
    assert_eq!(diagnostic.line(), 3);
    assert_eq!(diagnostic.to_string().lines().next(), Some("Semantic error on line 3: you can't divide by 0."));
}

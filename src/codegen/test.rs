// In src/codegen/test.rs

use super::*; // 导入父模块 (codegen) 的所有内容
use crate::analyzer::Analyzer;
use crate::diagnostics::DiagnosticBag;
use crate::lexer;
use crate::parser;
use crate::symbols::SymbolTable;

// --- Test Harness ---

/// 完成"词法分析 -> 解析 -> 求值 -> 代码生成"的完整流程，返回 C 程序文本。
/// 任何一步失败都直接 panic。
fn codegen_test_harness(source: &str) -> String {
    let mut symbols = SymbolTable::new();
    let (tokens, lexer_errors) = lexer::lex(source, &mut symbols);
    if !lexer_errors.is_empty() {
        panic!("Lexing failed: {:?}", lexer_errors);
    }

    let (program, parser_errors) = parser::parse(source, tokens);
    if !parser_errors.is_empty() {
        panic!("Parsing failed: {:?}", parser_errors);
    }

    let mut diagnostics = DiagnosticBag::new(source);
    match Analyzer::new(&mut symbols, &mut diagnostics).analyze(&program) {
        Some(buffer) => generate(&buffer),
        None => panic!("Analysis failed: {}", diagnostics.render_plain()),
    }
}

const PROGRAM: &str = "a = create cursor at (10,20) with (255,0,0,0,255,0,2,1)\n\
                       move a by 5\n\
                       draw (circle, 10) with a";

// --- Test Cases ---

#[test]
fn test_program_layout() {
    let c_code = codegen_test_harness(PROGRAM);

    assert!(c_code.starts_with(
        "#include \"config.h\"\n#include \"draw.h\"\n#include \"handle.h\"\n#include \"newcursor.h\"\n\nvoid animateDrawingsnail(SDL_Renderer* renderer) {\n"
    ));
    assert!(c_code.ends_with("    return 0;\n}\n"));

    // 四个动画函数按固定顺序出现，最后是 main
    let positions: Vec<usize> = [
        "void animateDrawingsnail(",
        "void animateDrawingbond(",
        "void animateRotation2(",
        "void animateDrawing(",
        "int main() {",
    ]
    .iter()
    .map(|signature| c_code.find(signature).unwrap_or_else(|| panic!("missing {signature}")))
    .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{positions:?}");
}

#[test]
fn test_prologue_has_creations_then_cursor_table() {
    let c_code = codegen_test_harness(PROGRAM);
    let prologue = "Cursor a = createCursor(10, 20, (SDL_Color){255, 0, 0, 255}, 2, 1);\n\n\
                    Cursor* cursors[] = {\n    &a\n};\n\n";
    assert_eq!(c_code.matches(prologue).count(), 4);
}

#[test]
fn test_cursor_table_lists_every_cursor() {
    let source = "a = create cursor at (0,0) with (0,0,0,255,1,1)\n\
                  b = create cursor at (5,5) with (0,0,0,255,1,1)";
    let c_code = codegen_test_harness(source);
    assert!(c_code.contains("Cursor* cursors[] = {\n    &a,\n    &b\n};"));
}

#[test]
fn test_empty_buffer_still_produces_a_program() {
    let c_code = generate(&InstructionBuffer::new());
    assert_eq!(c_code.matches("Cursor* cursors[] = {\n    \n};\n\n").count(), 4);
    assert!(c_code.contains("      animateDrawing(renderer);"));
}

#[test]
fn test_transform_lines_per_mode() {
    let c_code = codegen_test_harness(PROGRAM);

    // bounce 模式在每条变换指令后多写一个分号
    assert_eq!(c_code.matches("    moveCursor(&a,5);;\n").count(), 1);
    assert_eq!(c_code.matches("    moveCursor(&a,5);\n").count(), 3);
    assert!(c_code.contains("    // Movement instructions and rotation instructions\n    moveCursor(&a,5);;\n\n"));
    assert!(c_code.contains("    // movement and rotation instructions \n    moveCursor(&a,5);\n\n"));
}

#[test]
fn test_drawing_lines_per_mode() {
    let c_code = codegen_test_harness(PROGRAM);

    // snail: 不缩进，不补分号
    assert!(c_code.contains(
        "            angles[i] += 0.05;\n        }\ndrawCircle(renderer, &a, 10); // Draw a circle\n\n        SDL_RenderPresent(renderer);\n        SDL_Delay(50);\n"
    ));
    // 其余三个模式缩进八格，并在注释后补分号
    assert_eq!(
        c_code.matches("        drawCircle(renderer, &a, 10); // Draw a circle;\n").count(),
        3
    );
    assert!(c_code.contains("        // Drawing instructions \n        drawCircle"));
}

#[test]
fn test_entry_point_calls_selected_mode() {
    let c_code = codegen_test_harness(&format!("{PROGRAM}\nmode snail"));
    assert!(c_code.contains("    // Animation mode\n    animateDrawingsnail(renderer);\n\n    // Clean up and exit\n"));
    assert!(!c_code.contains("      animateDrawing(renderer);"));
}

#[test]
fn test_entry_point_uses_last_mode() {
    let c_code = codegen_test_harness("mode snail\nmode bounce\nmode disco");
    assert!(c_code.contains("    // Animation mode\n    animateRotation2(renderer);\n\n"));
}

#[test]
fn test_entry_point_defaults_to_plain_mode() {
    let c_code = codegen_test_harness(PROGRAM);
    // 默认调用后面没有换行
    assert!(c_code.contains("    // Animation mode\n      animateDrawing(renderer);    // Clean up and exit\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let first = codegen_test_harness(&format!("{PROGRAM}\nmode bounce"));
    let second = codegen_test_harness(&format!("{PROGRAM}\nmode bounce"));
    assert_eq!(first, second);
}

#[test]
fn test_loop_instructions_are_unrolled() {
    let source = "a = create cursor at (0,0) with (0,0,0,255,1,1)\n\
                  for i in (1,2) do rotate a by 90 end";
    let c_code = codegen_test_harness(source);
    assert!(c_code.contains("    // Movement and rotation instructions\n    rotateCursor(&a,90);\n    rotateCursor(&a,90);\n\n"));
}

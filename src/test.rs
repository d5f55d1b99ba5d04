// In src/test.rs

use std::cell::RefCell;

use super::*;
use crate::lexer::AnimationMode;

/// 辅助函数：整段流程必须成功，返回生成的 C 程序。
fn compile_ok(source: &str) -> (String, Compilation) {
    let compilation = compile(source);
    match compilation.c_code.clone() {
        Some(c_code) => (c_code, compilation),
        None => panic!("Compilation failed unexpectedly:\n{}", compilation.diagnostics.render_plain()),
    }
}

/// 辅助函数：流程必须失败，返回诊断的错误码。
fn compile_err(source: &str) -> Vec<String> {
    let compilation = compile(source);
    assert!(!compilation.succeeded(), "Compilation succeeded unexpectedly for: {source}");
    assert!(compilation.c_code.is_none());
    compilation.diagnostics.iter().map(|d| d.code().to_string()).collect()
}

#[test]
fn test_end_to_end_snail_program() {
    let source = "a = create cursor at (10,20) with (255,0,0,0,255,0,2,1)\n\
                  move a by 5\n\
                  draw (circle, 10) with a\n\
                  mode snail";
    let (c_code, compilation) = compile_ok(source);
    assert!(compilation.succeeded());
    assert!(compilation.diagnostics.is_empty());

    let instructions = compilation.instructions.expect("instructions");
    assert_eq!(instructions.len(), 4);
    assert_eq!(instructions.mode(), Some(AnimationMode::Snail));
    assert!(c_code.contains("    animateDrawingsnail(renderer);\n\n"));
}

#[test]
fn test_loop_body_runs_once_per_iteration() {
    let (_, compilation) = compile_ok("for i in (1,3) do x = x + 1 end");
    assert_eq!(compilation.symbols.value("x"), Some(3));
}

#[test]
fn test_fuzzy_correction_still_stops_compilation() {
    let codes = compile_err("c = create cursor at (0,0) with (0,0,0,255,1,1)\ndraw (circl, 10) with c");
    assert_eq!(codes, vec!["E0002"]);
}

#[test]
fn test_syntax_errors_skip_evaluation() {
    let compilation = compile("x = 4\nmove by");
    assert!(!compilation.succeeded());
    assert!(compilation.instructions.is_none());
    // 求值没有发生，x 只被声明
    assert_eq!(compilation.symbols.value("x"), None);
}

#[test]
fn test_semantic_errors_produce_no_program() {
    let codes = compile_err("y = 4\nx = y / 0");
    assert_eq!(codes, vec!["E0200"]);
}

#[test]
fn test_unknown_identifier_is_lexical() {
    let codes = compile_err("xyzzy");
    assert_eq!(codes.first().map(String::as_str), Some("E0000"));
}

#[test]
fn test_read_source_reports_missing_file() {
    let err = read_source(Path::new("definitely/not/here.dpp")).expect_err("missing file");
    assert!(matches!(err, DriverError::NotFound(_)));
    assert_eq!(err.to_string(), "file 'definitely/not/here.dpp' not found.");
}

// --- emit ---

/// 只记录调用的工具链。
#[derive(Default)]
struct RecordingToolchain {
    calls: RefCell<Vec<String>>,
    sources: RefCell<Vec<String>>,
}

impl Toolchain for RecordingToolchain {
    fn build(&self, sources: &[String], flags: &[String]) -> Result<(), ToolchainError> {
        self.calls
            .borrow_mut()
            .push(format!("build {} {}", sources.join(" "), flags.join(" ")));
        *self.sources.borrow_mut() = sources.to_vec();
        Ok(())
    }

    fn run(&self) -> Result<(), ToolchainError> {
        self.calls.borrow_mut().push("run".to_string());
        Ok(())
    }
}

fn temp_output(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("drawpp-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn test_emit_writes_then_builds_and_runs() {
    let mut config = Config::new("drawing.dpp");
    config.runtime_dir = temp_output("build_and_run");
    config.output = config.runtime_dir.join("generated_code.c");
    let toolchain = RecordingToolchain::default();

    emit(&config, "int main() {}\n", &toolchain).expect("emit");

    assert_eq!(fs::read_to_string(&config.output).expect("output"), "int main() {}\n");
    assert_eq!(
        *toolchain.calls.borrow(),
        vec![
            "build generated_code.c draw.c handle.c newcursor.c -lSDL2 -lm".to_string(),
            "run".to_string(),
        ]
    );
}

#[test]
fn test_emit_builds_the_file_it_wrote() {
    let mut config = Config::new("drawing.dpp");
    config.runtime_dir = temp_output("runtime");
    config.output = temp_output("elsewhere/program.c");
    config.run = false;
    let toolchain = RecordingToolchain::default();

    emit(&config, "int main() {}\n", &toolchain).expect("emit");

    let sources = toolchain.sources.borrow();
    assert_eq!(sources[1..], ["draw.c", "handle.c", "newcursor.c"]);
    let built = PathBuf::from(&sources[0]);
    assert!(built.is_absolute(), "{}", built.display());
    assert_eq!(fs::read_to_string(&built).expect("built source"), "int main() {}\n");
}

#[test]
fn test_emit_only_skips_the_toolchain() {
    let mut config = Config::new("drawing.dpp");
    config.output = temp_output("emit_only/generated_code.c");
    config.emit_only = true;
    let toolchain = RecordingToolchain::default();

    emit(&config, "/* empty */\n", &toolchain).expect("emit");
    assert!(config.output.exists());
    assert!(toolchain.calls.borrow().is_empty());
}

#[test]
fn test_no_run_only_builds() {
    let mut config = Config::new("drawing.dpp");
    config.output = temp_output("no_run/generated_code.c");
    config.run = false;
    let toolchain = RecordingToolchain::default();

    emit(&config, "/* empty */\n", &toolchain).expect("emit");
    assert_eq!(toolchain.calls.borrow().len(), 1);
}

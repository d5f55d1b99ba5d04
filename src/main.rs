// src/main.rs

use clap::error::ErrorKind;
use clap::Parser;
use drawpp::config::Config;
use drawpp::toolchain::GccToolchain;
use drawpp::{compile, emit, read_source, DriverError};
use log::{debug, error};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

/// Draw++ 编译器：把绘图脚本翻译成基于 SDL 的 C 程序，编译并运行它
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 需要编译的 Draw++ 源文件
    input_file: PathBuf,

    /// 生成的 C 程序的路径 [默认: <RUNTIME_DIR>/generated_code.c]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// SDL 运行时源码所在的目录
    #[arg(long, default_value = "./SDL")]
    runtime_dir: PathBuf,

    /// 用来编译生成程序的 C 编译器
    #[arg(long, default_value = "gcc")]
    cc: String,

    /// 只生成 C 程序，不编译也不运行
    #[arg(long, short = 'S')]
    emit_only: bool,

    /// 编译但不运行
    #[arg(long)]
    no_run: bool,

    /// 用带源码片段的格式显示诊断
    #[arg(long)]
    pretty: bool,

    /// 结束时打印所有变量和游标
    #[arg(long)]
    print_symbols: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let output = self
            .output
            .unwrap_or_else(|| self.runtime_dir.join("generated_code.c"));
        Config {
            output,
            runtime_dir: self.runtime_dir,
            compiler: self.cc,
            emit_only: self.emit_only,
            run: !self.no_run,
            pretty: self.pretty,
            print_symbols: self.print_symbols,
            verbose: self.verbose,
            ..Config::new(self.input_file)
        }
    }
}

fn main() {
    process::exit(real_main(std::env::args_os()));
}

/// 解析参数并跑完整个管道，返回进程退出码。
fn real_main<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help 和 --version 正常退出；clap 默认的 2 留给“文件不存在”
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
        }
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    // 测试里会多次进入这里，只有第一次初始化生效
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).try_init();

    let config = cli.into_config();
    debug!("{config:?}");
    run(&config)
}

/// 完整的编译管道，返回进程退出码。
fn run(config: &Config) -> i32 {
    let source_name = config.source_name();

    let source = match read_source(&config.source) {
        Ok(source) => source,
        Err(err @ DriverError::NotFound(_)) => {
            eprintln!("Error: {err}");
            return 2;
        }
        Err(err) => {
            eprintln!("Error: {err}");
            return 1;
        }
    };

    // --- 统一的编译管道 ---
    let compilation = compile(&source);

    if compilation.diagnostics.has_errors() {
        if let Err(err) = compilation.diagnostics.print(&source_name, config.pretty) {
            error!("failed to print diagnostics: {err}");
        }
        return 1;
    }

    let Some(c_code) = compilation.c_code.as_deref() else {
        eprintln!("Compilation of '{source_name}' produced no program.");
        return 1;
    };

    // --- 如果编译成功，则继续执行后续步骤 ---
    let toolchain = GccToolchain::from_config(config);
    let status = match emit(config, c_code, &toolchain) {
        Ok(()) => {
            if config.emit_only {
                println!("Successfully generated C code at '{}'", config.output.display());
            }
            0
        }
        Err(DriverError::Toolchain(err)) => {
            eprintln!("Error during compilation or execution:");
            eprintln!("error[{}]: {err}", err.code().code);
            if let Some(stderr) = err.stderr() {
                eprintln!("{stderr}");
            }
            1
        }
        Err(err) => {
            eprintln!("Error: {err}");
            1
        }
    };

    if config.print_symbols {
        print!("{}", compilation.symbols.dump());
    }
    status
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("drawpp-cli-{}", process::id()));
        fs::create_dir_all(&dir).expect("scratch dir");
        dir.join(name)
    }

    fn write_source(name: &str, source: &str) -> PathBuf {
        let path = scratch(name);
        fs::write(&path, source).expect("write source");
        path
    }

    #[test]
    fn test_usage_errors_exit_1() {
        assert_eq!(real_main(["drawpp"]), 1);
        assert_eq!(real_main(["drawpp", "a.dpp", "b.dpp"]), 1);
        assert_eq!(real_main(["drawpp", "a.dpp", "--no-such-flag"]), 1);
    }

    #[test]
    fn test_help_exits_0() {
        assert_eq!(real_main(["drawpp", "--help"]), 0);
    }

    #[test]
    fn test_missing_file_exits_2() {
        let missing = scratch("does-not-exist.dpp");
        assert_eq!(real_main([OsString::from("drawpp"), missing.into_os_string()]), 2);
    }

    #[test]
    fn test_diagnostics_exit_1() {
        let source = write_source("unknown.dpp", "xyzzy\n");
        assert_eq!(real_main([OsString::from("drawpp"), source.into_os_string()]), 1);
    }

    #[test]
    fn test_emit_only_exits_0_and_writes_the_program() {
        let source = write_source(
            "valid.dpp",
            "c = create cursor at (100, 100) with (0, 0, 0, 255, 1, 1)\nmove c by 10\n",
        );
        let output = scratch("valid.c");
        let args = [
            OsString::from("drawpp"),
            source.into_os_string(),
            OsString::from("-S"),
            OsString::from("-o"),
            output.clone().into_os_string(),
        ];
        assert_eq!(real_main(args), 0);
        let program = fs::read_to_string(&output).expect("generated program");
        assert!(program.contains("moveCursor(&c,10);"), "{program}");
    }

    #[test]
    fn test_output_defaults_under_the_runtime_dir() {
        let cli = Cli::try_parse_from(["drawpp", "a.dpp", "--runtime-dir", "rt"]).expect("cli");
        let config = cli.into_config();
        assert_eq!(config.output, PathBuf::from("rt").join("generated_code.c"));
        assert_eq!(config.generated_source().expect("relative"), PathBuf::from("generated_code.c"));
    }
}

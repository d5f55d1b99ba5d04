pub mod analyzer;
pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod suggest;
pub mod symbols;
pub mod toolchain;
pub mod utils;

#[cfg(test)]
mod test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use analyzer::{Analyzer, InstructionBuffer};
use config::Config;
use diagnostics::DiagnosticBag;
use symbols::SymbolTable;
use toolchain::{Toolchain, ToolchainError};

/// 一次编译的全部产物。
#[derive(Debug)]
pub struct Compilation {
    pub diagnostics: DiagnosticBag,
    pub symbols: SymbolTable,
    /// 只有没有任何诊断时才会求值
    pub instructions: Option<InstructionBuffer>,
    pub c_code: Option<String>,
}

impl Compilation {
    pub fn succeeded(&self) -> bool {
        !self.diagnostics.has_errors() && self.c_code.is_some()
    }
}

/// 驱动层的错误：文件读写和外部工具链。
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("file '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to resolve '{}': {source}", path.display())]
    Resolve { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
}

// 2. 定义一个顶层的、干净的公共 API
/// 编译 Draw++ 源代码字符串。
///
/// # Returns
/// 总是返回一个 [`Compilation`]。诊断都在 `diagnostics` 里；
/// 只有没有诊断时 `c_code` 才是 `Some`，里面是生成的 C 程序。
pub fn compile(source: &str) -> Compilation {
    let mut diagnostics = DiagnosticBag::new(source);
    let mut symbols = SymbolTable::new();

    // 1. 词法分析
    // lexer 总是返回一个 token 向量，即使有错误。
    let (tokens, lexer_errors) = lexer::lex(source, &mut symbols);
    debug!("lexed {} tokens", tokens.len());
    diagnostics.extend(lexer_errors.into_iter().map(Into::into));

    // 2. 解析
    // 即使有词法错误，我们也把 tokens 传递给解析器，它可能会发现更多问题。
    let (program, parser_errors) = parser::parse(source, tokens);
    diagnostics.extend(parser_errors.into_iter().map(Into::into));

    // [关键的检查点]
    // 错误标志只在这里检查一次。一旦置位，就不再求值，也不生成代码。
    if diagnostics.has_errors() {
        return Compilation {
            diagnostics,
            symbols,
            instructions: None,
            c_code: None,
        };
    }

    // 3. 求值
    let instructions = Analyzer::new(&mut symbols, &mut diagnostics).analyze(&program);

    // 4. 代码生成
    let c_code = instructions.as_ref().map(codegen::generate);

    Compilation {
        diagnostics,
        symbols,
        instructions,
        c_code,
    }
}

/// 读取源文件。文件不存在时返回 [`DriverError::NotFound`]。
pub fn read_source(path: &Path) -> Result<String, DriverError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DriverError::NotFound(path.to_path_buf()),
        _ => DriverError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// 写出生成的 C 程序，然后按配置构建并运行它。
pub fn emit<T: Toolchain>(config: &Config, c_code: &str, toolchain: &T) -> Result<(), DriverError> {
    if let Some(dir) = config.output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| DriverError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::write(&config.output, c_code).map_err(|source| DriverError::Write {
        path: config.output.clone(),
        source,
    })?;
    info!("generated C program at '{}'", config.output.display());

    if config.emit_only {
        return Ok(());
    }

    // 编译器必须拿到刚写出的那个文件
    let sources = config.build_sources().map_err(|source| DriverError::Resolve {
        path: config.output.clone(),
        source,
    })?;
    toolchain.build(&sources, &config.link_flags)?;
    if config.run {
        toolchain.run()?;
    }
    Ok(())
}

// src/toolchain.rs

//! 外部工具链：把生成的 C 程序和 SDL 运行时一起编译成可执行文件，然后运行它。

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};
use thiserror::Error;

use crate::config::Config;
use crate::diagnostics::codes::{self, ErrorCode};

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{compiler}' exited with {status}")]
    BuildFailed {
        compiler: String,
        status: String,
        stderr: String,
    },

    #[error("'{binary}' exited with {status}")]
    RunFailed { binary: String, status: String },
}

impl ToolchainError {
    pub fn code(&self) -> &'static ErrorCode {
        match self {
            ToolchainError::Spawn { .. } | ToolchainError::BuildFailed { .. } => &codes::E0300_TOOLCHAIN_FAILED,
            ToolchainError::RunFailed { .. } => &codes::E0301_PROGRAM_FAILED,
        }
    }

    /// 外部编译器捕获到的标准错误输出。
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ToolchainError::BuildFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// 生成程序的构建与运行。
pub trait Toolchain {
    /// 编译给定的源文件，并按顺序附加链接参数。
    fn build(&self, sources: &[String], flags: &[String]) -> Result<(), ToolchainError>;

    /// 运行上一步编译出的程序，直到它退出。
    fn run(&self) -> Result<(), ToolchainError>;
}

/// 在运行时目录里调用 gcc（或兼容的编译器）。
#[derive(Debug, Clone)]
pub struct GccToolchain {
    pub compiler: String,
    pub runtime_dir: PathBuf,
    pub binary: String,
}

impl GccToolchain {
    pub fn new(compiler: impl Into<String>, runtime_dir: impl Into<PathBuf>, binary: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            runtime_dir: runtime_dir.into(),
            binary: binary.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.compiler, &config.runtime_dir, &config.binary)
    }

    pub fn runtime_dir(&self) -> &Path {
        &self.runtime_dir
    }
}

impl Toolchain for GccToolchain {
    fn build(&self, sources: &[String], flags: &[String]) -> Result<(), ToolchainError> {
        info!("Compilation of the generated code ...");
        debug!(
            "{} -o {} {} {} (in {})",
            self.compiler,
            self.binary,
            sources.join(" "),
            flags.join(" "),
            self.runtime_dir.display()
        );

        let output = Command::new(&self.compiler)
            .arg("-o")
            .arg(&self.binary)
            .args(sources)
            .args(flags)
            .current_dir(&self.runtime_dir)
            .output()
            .map_err(|source| ToolchainError::Spawn {
                program: self.compiler.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ToolchainError::BuildFailed {
                compiler: self.compiler.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        info!("Compilation successful!");
        Ok(())
    }

    fn run(&self) -> Result<(), ToolchainError> {
        let program = format!("./{}", self.binary);
        info!("Executing the code ...");

        let status = Command::new(&program)
            .current_dir(&self.runtime_dir)
            .status()
            .map_err(|source| ToolchainError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ToolchainError::RunFailed {
                binary: program,
                status: status.to_string(),
            });
        }
        info!("Execution successful!");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_compiler_is_a_spawn_error() {
        let toolchain = GccToolchain::new("drawpp-no-such-compiler", ".", "exe");
        let err = toolchain
            .build(&["generated_code.c".to_string()], &[])
            .expect_err("build should fail");
        assert!(matches!(err, ToolchainError::Spawn { .. }));
        assert_eq!(err.code().code, "E0300");
        assert!(err.stderr().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_compiler_reports_its_status() {
        // `false` 接受任意参数并以 1 退出
        let toolchain = GccToolchain::new("false", ".", "exe");
        let err = toolchain.build(&[], &["-lm".to_string()]).expect_err("build should fail");
        match err {
            ToolchainError::BuildFailed { compiler, .. } => assert_eq!(compiler, "false"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_run_failure_uses_program_code() {
        let err = ToolchainError::RunFailed {
            binary: "./exe".to_string(),
            status: "exit status: 3".to_string(),
        };
        assert_eq!(err.code().code, "E0301");
        assert_eq!(err.to_string(), "'./exe' exited with exit status: 3");
    }
}

// src/config.rs

use std::io;
use std::path::{self, PathBuf};

/// 一次编译运行的配置。CLI 参数最终都落到这里。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Draw++ 源文件
    pub source: PathBuf,
    /// 生成的 C 程序写到哪里
    pub output: PathBuf,
    /// SDL 运行时源码所在的目录，外部编译器在这里执行
    pub runtime_dir: PathBuf,
    pub compiler: String,
    /// 编译出的可执行文件名，相对于 `runtime_dir`
    pub binary: String,
    /// 运行时自带的 C 源码，相对于 `runtime_dir`；生成的程序不在其中
    pub runtime_sources: Vec<String>,
    pub link_flags: Vec<String>,
    /// 只写出 C 程序，不调用外部编译器
    pub emit_only: bool,
    /// 编译成功后运行生成的程序
    pub run: bool,
    /// 用 ariadne 渲染诊断
    pub pretty: bool,
    /// 结束时打印变量和游标
    pub print_symbols: bool,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            output: PathBuf::from("./SDL/generated_code.c"),
            runtime_dir: PathBuf::from("./SDL"),
            compiler: "gcc".to_string(),
            binary: "exe".to_string(),
            runtime_sources: ["draw.c", "handle.c", "newcursor.c"]
                .map(String::from)
                .to_vec(),
            link_flags: ["-lSDL2", "-lm"].map(String::from).to_vec(),
            emit_only: false,
            run: true,
            pretty: false,
            print_symbols: false,
            verbose: false,
        }
    }
}

impl Config {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// 源文件名，用于诊断报告的标题。
    pub fn source_name(&self) -> String {
        self.source.display().to_string()
    }

    /// 外部编译器眼中的生成程序路径。
    ///
    /// 编译器在 `runtime_dir` 里执行：`output` 在该目录下时给出相对路径，
    /// 否则给出绝对路径。
    pub fn generated_source(&self) -> io::Result<PathBuf> {
        match self.output.strip_prefix(&self.runtime_dir) {
            Ok(relative) => Ok(relative.to_path_buf()),
            Err(_) => path::absolute(&self.output),
        }
    }

    /// 传给外部编译器的全部源文件：生成的程序在前，运行时源码在后。
    pub fn build_sources(&self) -> io::Result<Vec<String>> {
        let generated = self.generated_source()?.display().to_string();
        Ok(std::iter::once(generated)
            .chain(self.runtime_sources.iter().cloned())
            .collect())
    }
}

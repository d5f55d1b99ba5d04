pub mod codes;
pub mod hints;


use ariadne::{Color, Label, Report, ReportKind, Source};
use codes::ErrorCode;
use log::warn;
use std::fmt;
use std::io::{self, Write};

use crate::utils::{LineIndex, Span};

// --- 1. 诊断类别 ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Lexical,
    Syntax,
    Semantic,
    Build,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Lexical => "Lexical",
            Severity::Syntax => "Syntax",
            Severity::Semantic => "Semantic",
            Severity::Build => "Build",
        };
        f.write_str(name)
    }
}

// --- 2. Diagnostic ---

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    code: &'static str,
    severity: Severity,
    span: Span,
    // 由 DiagnosticBag 在 report 时根据 span 填写
    line: usize,
    message: String,
    suggestion: Option<String>,
    notes: Vec<String>,
}

impl Diagnostic {
    /// 用错误码的默认消息创建诊断。
    pub fn new(error_code: &'static ErrorCode, span: Span) -> Self {
        Self {
            code: error_code.code,
            severity: error_code.severity,
            span,
            line: 0,
            message: error_code.message.to_string(),
            suggestion: None,
            notes: Vec::new(),
        }
    }

    /// 覆盖默认消息，插入具体的名字、数值等动态信息。
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notes.extend(notes.into_iter().map(Into::into));
        self
    }

    pub fn code(&self) -> &str {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// 从 1 开始的行号；没有经过 DiagnosticBag 的诊断为 0。
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// 纯文本格式：
/// ```text
/// Syntax error on line 3: 'by <number>' missing after 'move a'.
/// Suggested correction: 'move a by <number>'.
/// ```
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error on line {}: {}", self.severity, self.line, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggested correction: {suggestion}")?;
        }
        for note in &self.notes {
            write!(f, "\n{note}")?;
        }
        Ok(())
    }
}

// --- 3. DiagnosticBag ---

/// 一次编译的诊断收集器。
/// 持有行偏移索引和"粘性"错误标志：一旦置位，本次编译内不再清除。
#[derive(Debug)]
pub struct DiagnosticBag {
    source: String,
    index: LineIndex,
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticBag {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            index: LineIndex::new(source),
            diagnostics: Vec::new(),
            has_errors: false,
        }
    }

    /// 记录一条诊断。完全相同的诊断（错误码、行号、消息都一样）只记录一次，
    /// 所以循环体里的同一个错误不会按迭代次数重复。
    pub fn report(&mut self, mut diagnostic: Diagnostic) {
        diagnostic.line = self.index.line_of(diagnostic.span.start);
        self.has_errors = true;

        let duplicate = self.diagnostics.iter().any(|d| {
            d.code == diagnostic.code && d.line == diagnostic.line && d.message == diagnostic.message
        });
        if duplicate {
            return;
        }

        warn!("[{}] line {}: {}", diagnostic.code, diagnostic.line, diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    pub fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, diagnostics: I) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// 第 `line` 行的源代码文本（去掉首尾空白）。
    pub fn line_text(&self, line: usize) -> &str {
        self.index.line_text(line, &self.source)
    }

    /// 所有诊断的纯文本形式，每条诊断之间以换行分隔。
    pub fn render_plain(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| format!("{d}\n"))
            .collect()
    }

    /// 把所有诊断写到 `out`。`pretty` 为真时使用 ariadne 带源码片段的报告。
    pub fn write_to<W: Write>(&self, file_name: &str, pretty: bool, out: &mut W) -> io::Result<()> {
        if !pretty {
            return out.write_all(self.render_plain().as_bytes());
        }

        let mut cache = (file_name, Source::from(self.source.as_str()));
        for diag in &self.diagnostics {
            build_report(file_name, diag).write(&mut cache, &mut *out)?;
        }
        Ok(())
    }

    pub fn print(&self, file_name: &str, pretty: bool) -> io::Result<()> {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        self.write_to(file_name, pretty, &mut handle)
    }
}

// --- 4. ariadne 报告 ---

fn build_report<'a>(file_name: &'a str, diag: &Diagnostic) -> Report<'a, (&'a str, std::ops::Range<usize>)> {
    let color = match diag.severity {
        Severity::Lexical => Color::Yellow,
        Severity::Syntax => Color::Red,
        Severity::Semantic => Color::Magenta,
        Severity::Build => Color::Blue,
    };
    let label_text = diag
        .suggestion
        .as_deref()
        .map(|s| format!("suggested correction: {s}"))
        .unwrap_or_else(|| diag.message.clone());

    let mut report = Report::build(ReportKind::Error, (file_name, diag.span.into_range()))
        .with_code(diag.code)
        .with_message(format!("{} error on line {}: {}", diag.severity, diag.line, diag.message))
        .with_label(
            Label::new((file_name, diag.span.into_range()))
                .with_message(label_text)
                .with_color(color),
        );

    if !diag.notes.is_empty() {
        report = report.with_note(diag.notes.join("\n"));
    }
    report.finish()
}

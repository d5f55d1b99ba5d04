//! src/parser/mod.rs
//!
//! 语法分析阶段的公共接口：接收 Token 流，产出 AST 和其中的语法错误。
//! 解析本身没有副作用，符号表的变化由求值阶段负责。

pub mod ast;
pub mod malformed;
mod parsers;
//测试模块
#[cfg(test)]
mod test;

use chumsky::input::{Input, Stream};
use chumsky::Parser;
use log::debug;

use crate::diagnostics::hints::hints_for;
use crate::lexer::Token;
use crate::parser::ast::{Program, Stmt, StmtKind};
use crate::parser::malformed::{SyntaxError, SyntaxErrorKind};
use crate::utils::{LineIndex, Span};
use parsers::program_parser;

/// parser 模块唯一的公共入口。
///
/// - 输入: 源代码（用于文件末尾的 span 和通用错误的关键字提示）和 Token 向量。
/// - 输出: AST，以及按源码顺序排列的全部语法错误。
///
/// 语法错误既保存在 AST 的 `Malformed` 节点里，也在这里单独返回。
pub fn parse(source: &str, tokens: Vec<(Token, Span)>) -> (Program, Vec<SyntaxError>) {
    // --- 1. 创建 Token 流 ---
    let eoi_span = Span::point(source.len());
    let token_stream = Stream::from_iter(tokens).map(eoi_span, |(token, span)| (token, span));

    // --- 2. 运行解析器 ---
    let (program, parse_errors) = program_parser().parse(token_stream).into_output_errors();
    let mut program = program.unwrap_or_default();

    // --- 3. 给通用错误补上所在行的关键字提示 ---
    let index = LineIndex::new(source);
    fill_hints(&mut program.stmts, source, &index);

    let mut errors = program.syntax_errors();

    // 解析器总会把剩下的 token 吃掉，正常情况下走不到这里
    for error in parse_errors {
        let span = *error.span();
        let line = index.line_text(index.line_of(span.start), source);
        let kind = match error.found() {
            Some(token) => {
                let found = token.to_string();
                SyntaxErrorKind::UnexpectedElement {
                    hints: keywords_on(line, &found),
                    found,
                }
            }
            None => SyntaxErrorKind::UnexpectedEof {
                hints: keywords_on(line, ""),
            },
        };
        errors.push(SyntaxError::new(kind, span));
    }

    debug!(
        "parsed {} top-level statements, {} syntax errors",
        program.stmts.len(),
        errors.len()
    );
    (program, errors)
}

fn keywords_on(line: &str, found: &str) -> Vec<&'static str> {
    hints_for(line, Some(found)).into_iter().map(|hint| hint.keyword).collect()
}

fn fill_hints(stmts: &mut [Stmt], source: &str, index: &LineIndex) {
    for stmt in stmts {
        match &mut stmt.kind {
            StmtKind::Malformed { error, body } => {
                if let SyntaxErrorKind::UnexpectedElement { found, hints } = &mut error.kind {
                    let line = index.line_text(index.line_of(error.span.start), source);
                    *hints = keywords_on(line, found);
                }
                fill_hints(body, source, index);
            }
            StmtKind::If { then_body, else_body, .. } => {
                fill_hints(then_body, source, index);
                if let Some(else_body) = else_body {
                    fill_hints(else_body, source, index);
                }
            }
            StmtKind::For { body, .. } | StmtKind::While { body, .. } => fill_hints(body, source, index),
            _ => {}
        }
    }
}

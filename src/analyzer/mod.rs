// In src/analyzer/mod.rs

// 1. 声明所有模块
mod check;
mod eval;
pub mod instructions;
mod semantic_error;

#[cfg(test)]
mod test;

// 2. 导入依赖
use log::debug;

use crate::diagnostics::DiagnosticBag;
use crate::parser::ast::Program;
use crate::symbols::SymbolTable;
use eval::Evaluator;
pub use instructions::{Instruction, InstructionBuffer};
pub use semantic_error::SemanticError;

/// 语义分析与求值。
///
/// 持有词法分析阶段建立的符号表，以及本次编译的诊断收集器。
pub struct Analyzer<'a> {
    symbols: &'a mut SymbolTable,
    diagnostics: &'a mut DiagnosticBag,
}

impl<'a> Analyzer<'a> {
    pub fn new(symbols: &'a mut SymbolTable, diagnostics: &'a mut DiagnosticBag) -> Self {
        Self { symbols, diagnostics }
    }

    /// 分析并执行整个程序，返回指令缓冲区。出现任何语义错误时返回 `None`。
    pub fn analyze(&mut self, program: &Program) -> Option<InstructionBuffer> {
        // PASS 1: 静态检查
        let mut errors = Vec::new();
        let rejected = check::zero_divisors(&program.stmts, &mut errors);

        // PASS 2: 求值
        let mut evaluator = Evaluator::new(self.symbols, &rejected);
        evaluator.run(&program.stmts);
        let (instructions, eval_errors) = evaluator.finish();
        errors.extend(eval_errors);

        debug!(
            "evaluated {} instructions, {} semantic errors",
            instructions.len(),
            errors.len()
        );
        self.diagnostics.extend(errors.into_iter().map(Into::into));

        if self.diagnostics.has_errors() {
            None
        } else {
            Some(instructions)
        }
    }
}

// In src/analyzer/check.rs

use std::collections::HashSet;

use super::SemanticError;
use crate::parser::ast::{ArithOp, Operand, Stmt, StmtKind};
use crate::utils::Span;

/// PASS 1: 静态检查。
///
/// 找出除数或模数是字面量 0 的算术赋值，每条语句只报告一次，
/// 不论它所在的语句体最终会不会执行。返回这些语句的 span，求值时跳过它们。
pub(super) fn zero_divisors(stmts: &[Stmt], errors: &mut Vec<SemanticError>) -> HashSet<Span> {
    let mut rejected = HashSet::new();
    walk(stmts, &mut rejected, errors);
    rejected
}

fn walk(stmts: &[Stmt], rejected: &mut HashSet<Span>, errors: &mut Vec<SemanticError>) {
    for stmt in stmts {
        match &stmt.kind {
            StmtKind::Arithmetic {
                target,
                op,
                operand: Operand::Literal(0, _),
                ..
            } => {
                let target = target.name.clone();
                let error = match op {
                    ArithOp::Div => SemanticError::DivisionByZero { target, span: stmt.span },
                    ArithOp::Mod => SemanticError::ModuloByZero { target, span: stmt.span },
                    _ => continue,
                };
                errors.push(error);
                rejected.insert(stmt.span);
            }
            StmtKind::If { then_body, else_body, .. } => {
                walk(then_body, rejected, errors);
                if let Some(else_body) = else_body {
                    walk(else_body, rejected, errors);
                }
            }
            StmtKind::For { body, .. } | StmtKind::While { body, .. } | StmtKind::Malformed { body, .. } => {
                walk(body, rejected, errors)
            }
            _ => {}
        }
    }
}

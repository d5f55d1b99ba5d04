// In src/analyzer/eval.rs

use std::collections::HashSet;

use log::trace;

use super::instructions::{Instruction, InstructionBuffer};
use super::SemanticError;
use crate::parser::ast::*;
use crate::symbols::{Cursor, CursorColor, SymbolKind, SymbolTable};
use crate::utils::Span;

/// PASS 2: 按源码顺序把 AST 走一遍。
///
/// 赋值直接修改符号表，其它语句各追加一条指令。
/// 循环和条件语句的语句体在这里执行，每次迭代恰好执行一次。
pub(super) struct Evaluator<'a> {
    symbols: &'a mut SymbolTable,
    /// 静态检查已经拒绝的语句
    rejected: &'a HashSet<Span>,
    instructions: InstructionBuffer,
    errors: Vec<SemanticError>,
}

impl<'a> Evaluator<'a> {
    pub(super) fn new(symbols: &'a mut SymbolTable, rejected: &'a HashSet<Span>) -> Self {
        Self {
            symbols,
            rejected,
            instructions: InstructionBuffer::new(),
            errors: Vec::new(),
        }
    }

    pub(super) fn finish(self) -> (InstructionBuffer, Vec<SemanticError>) {
        (self.instructions, self.errors)
    }

    pub(super) fn run(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.exec(stmt);
        }
    }

    fn exec(&mut self, stmt: &Stmt) {
        trace!("eval {:?}", stmt.span);
        match &stmt.kind {
            StmtKind::Assign { target, value } => {
                if !self.expect_number(target) {
                    return;
                }
                if let Some(value) = self.resolve(value) {
                    self.symbols.assign(&target.name, value);
                }
            }
            StmtKind::Arithmetic {
                target,
                source,
                op,
                operand,
            } => {
                if self.rejected.contains(&stmt.span) {
                    return;
                }
                self.arithmetic(target, source, *op, operand, stmt.span);
            }
            StmtKind::CreateCursor(create) => self.create_cursor(create),
            StmtKind::Move { cursor, distance } => {
                let (Some(name), Some(distance)) = (self.cursor(cursor), self.resolve(distance)) else {
                    return;
                };
                if let Some(cursor) = self.symbols.cursor_mut(&name) {
                    cursor.advance(distance);
                }
                self.instructions.push(Instruction::movement(&name, distance));
            }
            StmtKind::Rotate { cursor, angle } => {
                let (Some(name), Some(angle)) = (self.cursor(cursor), self.resolve(angle)) else {
                    return;
                };
                if let Some(cursor) = self.symbols.cursor_mut(&name) {
                    cursor.rotate(angle);
                }
                self.instructions.push(Instruction::rotation(&name, angle));
            }
            StmtKind::SetThickness { cursor, thickness } => {
                let (Some(name), Some(thickness)) = (self.cursor(cursor), self.resolve(thickness)) else {
                    return;
                };
                if let Some(cursor) = self.symbols.cursor_mut(&name) {
                    cursor.thickness = thickness;
                }
                self.instructions.push(Instruction::thickness(&name, thickness));
            }
            StmtKind::Draw { figure, cursor } => self.draw(figure, cursor),
            StmtKind::Mode(mode) => self.instructions.push(Instruction::Mode(*mode)),
            StmtKind::If {
                condition,
                then_body,
                else_body,
            } => {
                if self.holds(condition) {
                    self.run(then_body);
                } else if let Some(else_body) = else_body {
                    self.run(else_body);
                }
            }
            StmtKind::For { var, start, end, body } => {
                if !self.expect_number(var) {
                    return;
                }
                let (Some(start), Some(end)) = (self.resolve(start), self.resolve(end)) else {
                    return;
                };
                for i in start..=end {
                    self.symbols.assign(&var.name, i);
                    self.run(body);
                }
            }
            // 条件每次迭代前重新求值，没有迭代次数上限
            StmtKind::While { condition, body } => {
                while self.holds(condition) {
                    self.run(body);
                }
            }
            // 有语法错误时不会进入求值
            StmtKind::Malformed { .. } => {}
        }
    }

    fn arithmetic(&mut self, target: &Ident, source: &Ident, op: ArithOp, operand: &Operand, span: Span) {
        if !self.expect_number(target) || !self.expect_number(source) {
            return;
        }
        let Some(rhs) = self.resolve(operand) else {
            return;
        };
        let lhs = self.symbols.value(&source.name).unwrap_or(0);

        let result = match op {
            ArithOp::Add => lhs.checked_add(rhs),
            ArithOp::Sub => lhs.checked_sub(rhs),
            ArithOp::Mul => lhs.checked_mul(rhs),
            ArithOp::Div => floor_div(lhs, rhs),
            ArithOp::Mod => floor_mod(lhs, rhs),
        };
        match result {
            Some(value) => self.symbols.assign(&target.name, value),
            None => self.errors.push(SemanticError::ArithmeticOverflow {
                target: target.name.clone(),
                span,
            }),
        }
    }

    fn create_cursor(&mut self, create: &CreateCursor) {
        let target = &create.target;
        if target.kind != SymbolKind::Cursor {
            self.errors.push(SemanticError::KindMismatch {
                name: target.name.clone(),
                expected: SymbolKind::Cursor,
                found: target.kind,
                span: target.span,
            });
            return;
        }

        let x = self.resolve(&create.x);
        let y = self.resolve(&create.y);
        let color = match &create.color {
            ColorArgs::Rgba(channels) => self.resolve_all(channels).map(CursorColor::Rgba),
            ColorArgs::TwoTone(channels) => self.resolve_all(channels).map(|[r1, g1, b1, r2, g2, b2]| {
                CursorColor::TwoTone {
                    stroke: [r1, g1, b1],
                    secondary: [r2, g2, b2],
                }
            }),
        };
        let thickness = self.resolve(&create.thickness);
        let visibility = self.resolve(&create.visibility);
        let (Some(x), Some(y), Some(color), Some(thickness), Some(visibility)) = (x, y, color, thickness, visibility)
        else {
            return;
        };

        let cursor = Cursor::new(target.name.clone(), x, y, color, thickness, visibility);
        let instruction = Instruction::create(&cursor);
        if self.symbols.create_cursor(cursor) {
            self.instructions.push(instruction);
        } else {
            self.errors.push(SemanticError::CursorRedefined {
                name: target.name.clone(),
                span: target.span,
            });
        }
    }

    fn draw(&mut self, figure: &Figure, cursor: &Ident) {
        let Some(name) = self.cursor(cursor) else {
            return;
        };
        let instruction = match figure {
            Figure::Basic { shape, size } => {
                let Some(size) = self.resolve(size) else {
                    return;
                };
                Instruction::shape(*shape, &name, size)
            }
            Figure::Arc { size, start, end } => {
                let Some([size, start, end]) = self.resolve_all(&[size.clone(), start.clone(), end.clone()]) else {
                    return;
                };
                Instruction::arc(&name, size, start, end)
            }
        };
        self.instructions.push(instruction);
    }

    // --- 值的解析 ---

    /// 直接解析一个值：字面量原样返回，名字必须是已经赋过值的数值变量。
    fn resolve(&mut self, operand: &Operand) -> Option<i64> {
        match operand {
            Operand::Literal(n, _) => Some(*n),
            Operand::Name(ident) => {
                if !self.expect_number(ident) {
                    return None;
                }
                let value = self.symbols.value(&ident.name);
                if value.is_none() {
                    self.errors.push(SemanticError::UndefinedVariable {
                        name: ident.name.clone(),
                        span: ident.span,
                    });
                }
                value
            }
        }
    }

    /// 依次解析所有值，每个出错的值都会报告。
    fn resolve_all<const N: usize>(&mut self, operands: &[Operand; N]) -> Option<[i64; N]> {
        let mut values = [0; N];
        let mut complete = true;
        for (slot, operand) in values.iter_mut().zip(operands) {
            match self.resolve(operand) {
                Some(value) => *slot = value,
                None => complete = false,
            }
        }
        complete.then_some(values)
    }

    /// 条件里的值：未赋值的变量当作 0。
    fn condition_value(&mut self, operand: &Operand) -> i64 {
        match operand {
            Operand::Literal(n, _) => *n,
            Operand::Name(ident) => {
                if self.expect_number(ident) {
                    self.symbols.value(&ident.name).unwrap_or(0)
                } else {
                    0
                }
            }
        }
    }

    fn holds(&mut self, condition: &Condition) -> bool {
        let lhs = self.condition_value(&condition.lhs);
        let rhs = self.condition_value(&condition.rhs);
        match condition.op {
            CompareOp::Lt => lhs < rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Eq => lhs == rhs,
        }
    }

    fn expect_number(&mut self, ident: &Ident) -> bool {
        if ident.kind == SymbolKind::Number {
            return true;
        }
        self.errors.push(SemanticError::KindMismatch {
            name: ident.name.clone(),
            expected: SymbolKind::Number,
            found: ident.kind,
            span: ident.span,
        });
        false
    }

    /// 光标位置上的名字必须是一个已经创建的光标。
    fn cursor(&mut self, ident: &Ident) -> Option<String> {
        if ident.kind != SymbolKind::Cursor {
            self.errors.push(SemanticError::KindMismatch {
                name: ident.name.clone(),
                expected: SymbolKind::Cursor,
                found: ident.kind,
                span: ident.span,
            });
            return None;
        }
        if self.symbols.cursor(&ident.name).is_none() {
            self.errors.push(SemanticError::CursorNotCreated {
                name: ident.name.clone(),
                span: ident.span,
            });
            return None;
        }
        Some(ident.name.clone())
    }
}

/// 向下取整的除法。
fn floor_div(lhs: i64, rhs: i64) -> Option<i64> {
    let quotient = lhs.checked_div(rhs)?;
    if lhs % rhs != 0 && ((lhs < 0) != (rhs < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

/// 结果与除数同号的取模。
fn floor_mod(lhs: i64, rhs: i64) -> Option<i64> {
    let remainder = lhs.checked_rem(rhs)?;
    if remainder != 0 && ((remainder < 0) != (rhs < 0)) {
        Some(remainder + rhs)
    } else {
        Some(remainder)
    }
}

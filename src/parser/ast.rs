use crate::lexer::{AnimationMode, Shape};
use crate::parser::malformed::SyntaxError;
use crate::symbols::SymbolKind;
use crate::utils::Span;

// --- 1. 标识符与操作数 ---

/// 一个标识符，连同词法分析器给它归的类。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub kind: SymbolKind,
    pub span: Span,
}

/// 数值位置上的操作数：字面量或名字。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(i64, Span),
    Name(Ident),
}

impl Operand {
    pub fn span(&self) -> Span {
        match self {
            Operand::Literal(_, span) => *span,
            Operand::Name(ident) => ident.span,
        }
    }
}

// --- 2. 运算符 ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Gt,
    Eq,
}

/// `number_or_id (< | > | =) number_or_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub lhs: Operand,
    pub op: CompareOp,
    pub rhs: Operand,
}

// --- 3. 语句 ---

/// `with (...)` 列表里的颜色部分。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorArgs {
    /// 6 个值的形式：r, g, b, a
    Rgba([Operand; 4]),
    /// 8 个值的形式：描边色 r, g, b 与第二颜色 r, g, b
    TwoTone([Operand; 6]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCursor {
    pub target: Ident,
    pub x: Operand,
    pub y: Operand,
    pub color: ColorArgs,
    pub thickness: Operand,
    pub visibility: Operand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Figure {
    Basic { shape: Shape, size: Operand },
    Arc { size: Operand, start: Operand, end: Operand },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    /// `x = 10` 或 `x = y`
    Assign { target: Ident, value: Operand },
    /// `x = y + 1`
    Arithmetic {
        target: Ident,
        source: Ident,
        op: ArithOp,
        operand: Operand,
    },
    CreateCursor(CreateCursor),
    Move { cursor: Ident, distance: Operand },
    Rotate { cursor: Ident, angle: Operand },
    SetThickness { cursor: Ident, thickness: Operand },
    Draw { figure: Figure, cursor: Ident },
    Mode(AnimationMode),
    If {
        condition: Condition,
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    For {
        var: Ident,
        start: Operand,
        end: Operand,
        body: Vec<Stmt>,
    },
    While { condition: Condition, body: Vec<Stmt> },
    /// 匹配到某个错误产生式的语句；`body` 是已经解析出的语句体（如果有）
    Malformed { error: SyntaxError, body: Vec<Stmt> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// AST 的根节点：按源码顺序排列的语句。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    /// 按源码顺序收集所有（包括嵌套在语句体里的）语法错误。
    pub fn syntax_errors(&self) -> Vec<SyntaxError> {
        let mut errors = Vec::new();
        collect_errors(&self.stmts, &mut errors);
        errors
    }
}

fn collect_errors(stmts: &[Stmt], errors: &mut Vec<SyntaxError>) {
    for stmt in stmts {
        match &stmt.kind {
            StmtKind::Malformed { error, body } => {
                errors.push(error.clone());
                collect_errors(body, errors);
            }
            StmtKind::If { then_body, else_body, .. } => {
                collect_errors(then_body, errors);
                if let Some(else_body) = else_body {
                    collect_errors(else_body, errors);
                }
            }
            StmtKind::For { body, .. } | StmtKind::While { body, .. } => collect_errors(body, errors),
            _ => {}
        }
    }
}

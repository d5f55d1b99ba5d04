//! 错误产生式。
//!
//! 语法分析器对 draw / create / for / if / while 采用"宽松解析、事后校验"：
//! 先按宽松的形状把各个部件收集起来，再在这里检查缺了什么，
//! 得到合法的语句，或者一个指明具体缺失部件的 [`SyntaxError`]。

use thiserror::Error;

use crate::diagnostics::codes::*;
use crate::diagnostics::hints::{self, hint_lines, KEYWORD_HINTS};
use crate::diagnostics::Diagnostic;
use crate::lexer::{Shape, Token};
use crate::parser::ast::*;
use crate::symbols::SymbolKind;
use crate::utils::Span;

// --- 1. 语法错误 ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    // 通用
    #[error("unexpected element '{found}'.")]
    UnexpectedElement { found: String, hints: Vec<&'static str> },
    #[error("unexpected end of file.")]
    UnexpectedEof { hints: Vec<&'static str> },
    #[error("command in an incorrect order '{text}'.")]
    IncorrectOrder { statement: &'static str, text: String },

    // move
    #[error("'id_cursor' and 'by <number>' missing after 'move'.")]
    MoveIncomplete,
    #[error("'id_cursor' missing before the number '{number}'.")]
    MoveMissingCursor { number: String },
    #[error("'by <number>' missing after 'move {cursor}'.")]
    MoveMissingBy { cursor: String },
    #[error("missing number after 'by' in 'move {cursor} by'.")]
    MoveMissingDistance { cursor: String },

    // rotate
    #[error("'id_cursor' and 'by <angle>' missing after 'rotate'.")]
    RotateIncomplete,
    #[error("unexpected element '{found}' after 'rotate', expected a cursor.")]
    RotateExpectedCursor { found: String },
    #[error("missing angle value after cursor '{cursor}'.")]
    RotateMissingAngleValue { cursor: String },
    #[error("missing angle after 'by' for cursor '{cursor}'.")]
    RotateMissingAngle { cursor: String },
    #[error("missing 'by' keyword after cursor '{cursor}'.")]
    RotateMissingBy { cursor: String },

    // set
    #[error("'<cursor> thickness at <number>' missing after 'set'.")]
    SetIncomplete,
    #[error("cursor missing between 'set' and 'thickness'.")]
    SetMissingCursor,
    #[error("'thickness at <number>' missing after 'set {cursor}'.")]
    SetMissingThickness { cursor: String },
    #[error("'at' missing after 'set {cursor} thickness'.")]
    SetMissingAt { cursor: String },
    #[error("missing value after 'at' in 'set {cursor} thickness at'.")]
    SetMissingValue { cursor: String },

    // draw
    #[error("'draw' statement is incorrect or incomplete.")]
    DrawIncomplete,
    #[error("incorrect or missing element after 'draw'.")]
    DrawMissingForm,
    #[error("invalid or missing size for '{form}'.")]
    DrawMissingSize { form: &'static str },
    #[error("incorrect syntax before 'with'.")]
    DrawBeforeWith,
    #[error("missing 'with <cursor>' after the drawing.")]
    DrawMissingWith,
    #[error("missing or invalid cursor after 'with'.")]
    DrawMissingCursor,
    #[error("invalid or missing size after 'arc'.")]
    ArcMissingSize,
    #[error("invalid or missing start angle after the size.")]
    ArcMissingStart,
    #[error("invalid or missing end angle after the start angle.")]
    ArcMissingEnd,

    // create
    #[error("'cursor' missing after '{name} = create'.")]
    CreateMissingCursor { name: String },
    #[error("'at' missing after '{name} = create cursor'.")]
    CreateMissingAt { name: String },
    #[error("invalid or missing position after 'at', expected '(<x>, <y>)'.")]
    CreateBadPosition,
    #[error("'with' missing after the position of cursor '{name}'.")]
    CreateMissingWith { name: String },
    #[error("invalid or missing value list after 'with'.")]
    CreateBadColorList,
    #[error("expected 6 or 8 values after 'with', found {found}.")]
    CreateWrongArity { found: usize },

    // mode
    #[error("missing or unknown animation after 'mode'.")]
    ModeMissingAnimation,

    // for
    #[error("missing identifier after 'for'.")]
    ForMissingIdentifier,
    #[error("'in' missing after 'for {var}'.")]
    ForMissingIn { var: String },
    #[error("'(' missing after 'in'.")]
    ForMissingParen,
    #[error("a comma is missing.")]
    ForMissingComma,
    #[error("invalid or missing bound in the range of 'for {var}'.")]
    ForBadRange { var: String },
    #[error("')' missing after the range of 'for {var}'.")]
    ForMissingClose { var: String },
    #[error("'do' missing after the range of 'for {var}'.")]
    ForMissingDo { var: String },
    #[error("'end' missing to close the 'for {var}' loop.")]
    ForMissingEnd { var: String },

    // if
    #[error("invalid or missing condition after 'if'.")]
    IfMissingCondition,
    #[error("'then' missing after the condition.")]
    IfMissingThen,
    #[error("'end' missing to close the 'if' statement.")]
    IfMissingEnd,

    // while
    #[error("invalid or missing condition after 'while'.")]
    WhileMissingCondition,
    #[error("'do' missing after the condition of 'while'.")]
    WhileMissingDo,
    #[error("'end' missing to close the 'while' loop.")]
    WhileMissingEnd,

    // 赋值
    #[error("missing value after '{name} ='.")]
    AssignMissingValue { name: String },
    #[error("missing number after '{op}' in '{name} = {base} {op}'.")]
    ArithmeticMissingOperand { name: String, base: String, op: &'static str },
    #[error("the operand after '{op}' must be a number, found '{found}'.")]
    ArithmeticOperandNotNumber { op: &'static str, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl SyntaxErrorKind {
    pub fn code(&self) -> &'static ErrorCode {
        use SyntaxErrorKind::*;
        match self {
            UnexpectedElement { .. } => &E0100_UNEXPECTED_ELEMENT,
            UnexpectedEof { .. } => &E0101_UNEXPECTED_EOF,
            IncorrectOrder { .. } => &E0112_INCORRECT_ORDER,
            MoveIncomplete | MoveMissingCursor { .. } | MoveMissingBy { .. } | MoveMissingDistance { .. } => {
                &E0102_MALFORMED_MOVE
            }
            RotateIncomplete
            | RotateExpectedCursor { .. }
            | RotateMissingAngleValue { .. }
            | RotateMissingAngle { .. }
            | RotateMissingBy { .. } => &E0103_MALFORMED_ROTATE,
            SetIncomplete | SetMissingCursor | SetMissingThickness { .. } | SetMissingAt { .. } | SetMissingValue { .. } => {
                &E0104_MALFORMED_SET
            }
            DrawIncomplete | DrawMissingForm | DrawMissingSize { .. } | DrawBeforeWith | DrawMissingWith
            | DrawMissingCursor | ArcMissingSize | ArcMissingStart | ArcMissingEnd => &E0105_MALFORMED_DRAW,
            CreateMissingCursor { .. }
            | CreateMissingAt { .. }
            | CreateBadPosition
            | CreateMissingWith { .. }
            | CreateBadColorList
            | CreateWrongArity { .. } => &E0106_MALFORMED_CREATE,
            ModeMissingAnimation => &E0107_MALFORMED_MODE,
            ForMissingIdentifier
            | ForMissingIn { .. }
            | ForMissingParen
            | ForMissingComma
            | ForBadRange { .. }
            | ForMissingClose { .. }
            | ForMissingDo { .. }
            | ForMissingEnd { .. } => &E0108_MALFORMED_FOR,
            IfMissingCondition | IfMissingThen | IfMissingEnd => &E0109_MALFORMED_IF,
            WhileMissingCondition | WhileMissingDo | WhileMissingEnd => &E0110_MALFORMED_WHILE,
            AssignMissingValue { .. } | ArithmeticMissingOperand { .. } | ArithmeticOperandNotNumber { .. } => {
                &E0111_MALFORMED_ASSIGNMENT
            }
        }
    }

    /// "Suggested correction" 一行的内容。
    pub fn suggestion(&self) -> Option<String> {
        use SyntaxErrorKind::*;
        const FOR_CORRECTION: &str = "'for <identifier> in (<start>, <end>) do <instruction> end'.";
        let text = match self {
            MoveMissingCursor { number } => format!("'move <id_cursor> by {number}'."),
            MoveMissingBy { cursor } | MoveMissingDistance { cursor } => format!("'move {cursor} by <number>'."),
            IncorrectOrder { statement: "rotate", .. } => "'rotate <id_cursor> by <angle>'.".to_string(),
            IncorrectOrder { .. } => "'move <id_cursor> by <number>'.".to_string(),
            RotateMissingAngleValue { cursor } | RotateMissingAngle { cursor } | RotateMissingBy { cursor } => {
                format!("'rotate {cursor} by <angle>'.")
            }
            SetMissingThickness { cursor } | SetMissingAt { cursor } | SetMissingValue { cursor } => {
                format!("'set {cursor} thickness at <number>'.")
            }
            ForMissingIdentifier
            | ForMissingIn { .. }
            | ForMissingParen
            | ForMissingComma
            | ForBadRange { .. }
            | ForMissingClose { .. }
            | ForMissingDo { .. }
            | ForMissingEnd { .. } => FOR_CORRECTION.to_string(),
            CreateMissingCursor { name } | CreateMissingAt { name } | CreateMissingWith { name } => {
                format!("'{name} = create cursor at (<x>, <y>) with (...)'.")
            }
            ArithmeticMissingOperand { name, base, op } => format!("'{name} = {base} {op} <number>'."),
            _ => return None,
        };
        Some(text)
    }

    /// 附在诊断后面的用法说明。
    pub fn usage(&self) -> Vec<String> {
        use SyntaxErrorKind::*;
        let lines: &[&str] = match self {
            UnexpectedElement { hints: keywords, .. } | UnexpectedEof { hints: keywords } => {
                let found: Vec<_> = KEYWORD_HINTS.iter().filter(|h| keywords.contains(&h.keyword)).collect();
                return hint_lines(&found);
            }
            MoveIncomplete => &["Usage :", hints::MOVE_USAGE],
            RotateIncomplete | RotateExpectedCursor { .. } => &["Usage :", hints::ROTATE_USAGE],
            SetIncomplete | SetMissingCursor => &["Usage :", hints::SET_USAGE],
            DrawIncomplete | DrawMissingForm => &[
                "Usage :",
                hints::DRAW_USAGE,
                hints::DRAW_FORMS,
                hints::ARC_WARNING,
                hints::ARC_USAGE,
            ],
            DrawMissingSize { .. } | DrawBeforeWith | DrawMissingWith | DrawMissingCursor => {
                &["Usage :", hints::DRAW_USAGE]
            }
            ArcMissingSize | ArcMissingStart | ArcMissingEnd => &["Usage :", hints::ARC_USAGE],
            CreateBadPosition | CreateBadColorList | CreateWrongArity { .. } => {
                &["Usage :", hints::CREATE_USAGE, hints::CREATE_VALUES]
            }
            ModeMissingAnimation => &["Usage :", hints::MODE_USAGE, hints::MODE_ANIMATIONS],
            IfMissingCondition | IfMissingThen | IfMissingEnd => {
                &["Two possibilities :", hints::IF_USAGE, hints::IF_ELSE_USAGE]
            }
            WhileMissingCondition | WhileMissingDo | WhileMissingEnd => &["Usage :", hints::WHILE_USAGE],
            AssignMissingValue { .. } | ArithmeticOperandNotNumber { .. } => &["Usage :", hints::ASSIGN_USAGE],
            _ => &[],
        };
        lines.iter().map(|line| line.to_string()).collect()
    }
}

impl From<SyntaxError> for Diagnostic {
    fn from(error: SyntaxError) -> Self {
        let mut diagnostic = Diagnostic::new(error.kind.code(), error.span)
            .with_message(error.kind.to_string())
            .with_notes(error.kind.usage());
        if let Some(suggestion) = error.kind.suggestion() {
            diagnostic = diagnostic.with_suggestion(suggestion);
        }
        diagnostic
    }
}

// --- 2. 宽松解析得到的部件 ---

/// 一个 `( ... )` 分组：括号内按原样收集的 token，以及右括号是否出现。
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub items: Vec<(Token, Span)>,
    pub closed: bool,
}

/// 块的收尾方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closing {
    End,
    /// 缺少 `end`，但后面还有别的 token
    Missing,
    /// 缺少 `end`，输入已经结束
    Eof,
}

#[derive(Debug, Clone)]
pub struct RawDraw {
    pub group: Option<Group>,
    pub with: bool,
    pub cursor: Option<Ident>,
}

#[derive(Debug, Clone)]
pub struct RawCreate {
    pub target: Ident,
    pub cursor_keyword: bool,
    pub at: bool,
    pub position: Option<Group>,
    pub with: bool,
    pub values: Option<Group>,
}

#[derive(Debug, Clone)]
pub struct RawCondition {
    pub lhs: Option<Operand>,
    pub op: Option<CompareOp>,
    pub rhs: Option<Operand>,
}

/// 语句体：如果引导关键字（then / do）出现了，就有语句体。
#[derive(Debug, Clone)]
pub struct RawBody {
    pub stmts: Vec<Stmt>,
    pub closing: Closing,
}

#[derive(Debug, Clone)]
pub struct RawFor {
    pub var: Option<Ident>,
    pub in_keyword: bool,
    pub range: Option<Group>,
    pub body: Option<RawBody>,
}

#[derive(Debug, Clone)]
pub struct RawIf {
    pub condition: RawCondition,
    pub then_body: Option<RawBody>,
    pub else_body: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone)]
pub struct RawWhile {
    pub condition: RawCondition,
    pub body: Option<RawBody>,
}

// --- 3. 校验 ---

fn malformed(kind: SyntaxErrorKind, span: Span, body: Vec<Stmt>) -> StmtKind {
    StmtKind::Malformed {
        error: SyntaxError::new(kind, span),
        body,
    }
}

/// 数值位置上可以出现的 token。
pub fn operand_of(token: &Token, span: Span) -> Option<Operand> {
    match token {
        Token::Number(n) => Some(Operand::Literal(*n, span)),
        Token::NumberId(name) => Some(Operand::Name(Ident {
            name: name.clone(),
            kind: SymbolKind::Number,
            span,
        })),
        Token::CursorId(name) => Some(Operand::Name(Ident {
            name: name.clone(),
            kind: SymbolKind::Cursor,
            span,
        })),
        _ => None,
    }
}

/// 按 `v, v, ..., v` 的形状拆分逗号分隔的值；形状不对时返回 `None`。
fn comma_separated(items: &[(Token, Span)]) -> Option<Vec<Operand>> {
    if items.is_empty() || items.len() % 2 == 0 {
        return None;
    }
    items
        .iter()
        .enumerate()
        .map(|(i, (token, span))| {
            if i % 2 == 0 {
                operand_of(token, *span).map(Some)
            } else {
                (*token == Token::Comma).then_some(None)
            }
        })
        .collect::<Option<Vec<_>>>()
        .map(|values| values.into_iter().flatten().collect())
}

/// 第 `index` 个位置是否是一个值，第 `index - 1` 个位置是否是逗号。
fn value_after_comma(items: &[(Token, Span)], index: usize) -> Option<Operand> {
    match (items.get(index - 1), items.get(index)) {
        (Some((Token::Comma, _)), Some((token, span))) => operand_of(token, *span),
        _ => None,
    }
}

pub fn build_draw(raw: RawDraw, span: Span) -> StmtKind {
    use SyntaxErrorKind::*;

    let Some(group) = raw.group else {
        return malformed(DrawIncomplete, span, Vec::new());
    };
    let items = &group.items;

    let figure = match items.first() {
        Some((Token::Shape(shape), _)) => {
            let shape: Shape = *shape;
            let Some(size) = value_after_comma(items, 2) else {
                return malformed(DrawMissingSize { form: shape.keyword() }, span, Vec::new());
            };
            if items.len() != 3 {
                return malformed(DrawBeforeWith, span, Vec::new());
            }
            Figure::Basic { shape, size }
        }
        Some((Token::Arc, _)) => {
            let Some(size) = value_after_comma(items, 2) else {
                return malformed(ArcMissingSize, span, Vec::new());
            };
            let Some(start) = value_after_comma(items, 4) else {
                return malformed(ArcMissingStart, span, Vec::new());
            };
            let Some(end) = value_after_comma(items, 6) else {
                return malformed(ArcMissingEnd, span, Vec::new());
            };
            if items.len() != 7 {
                return malformed(DrawBeforeWith, span, Vec::new());
            }
            Figure::Arc { size, start, end }
        }
        _ => return malformed(DrawMissingForm, span, Vec::new()),
    };

    if !group.closed {
        return malformed(DrawBeforeWith, span, Vec::new());
    }
    if !raw.with {
        return malformed(DrawMissingWith, span, Vec::new());
    }
    match raw.cursor {
        Some(cursor) => StmtKind::Draw { figure, cursor },
        None => malformed(DrawMissingCursor, span, Vec::new()),
    }
}

pub fn build_create(raw: RawCreate, span: Span) -> StmtKind {
    use SyntaxErrorKind::*;
    let name = raw.target.name.clone();

    if !raw.cursor_keyword {
        return malformed(CreateMissingCursor { name }, span, Vec::new());
    }
    if !raw.at {
        return malformed(CreateMissingAt { name }, span, Vec::new());
    }
    let position = raw
        .position
        .filter(|group| group.closed)
        .and_then(|group| comma_separated(&group.items))
        .filter(|values| values.len() == 2);
    let Some(position) = position else {
        return malformed(CreateBadPosition, span, Vec::new());
    };
    if !raw.with {
        return malformed(CreateMissingWith { name }, span, Vec::new());
    }
    let values = raw
        .values
        .filter(|group| group.closed)
        .and_then(|group| comma_separated(&group.items));
    let Some(mut values) = values else {
        return malformed(CreateBadColorList, span, Vec::new());
    };

    let (visibility, thickness) = match (values.len(), values.pop(), values.pop()) {
        (6 | 8, Some(visibility), Some(thickness)) => (visibility, thickness),
        (found, ..) => return malformed(CreateWrongArity { found }, span, Vec::new()),
    };
    let color = match <[Operand; 6]>::try_from(values) {
        Ok(six) => ColorArgs::TwoTone(six),
        Err(values) => match <[Operand; 4]>::try_from(values) {
            Ok(four) => ColorArgs::Rgba(four),
            Err(values) => return malformed(CreateWrongArity { found: values.len() + 2 }, span, Vec::new()),
        },
    };

    let mut position = position.into_iter();
    match (position.next(), position.next()) {
        (Some(x), Some(y)) => StmtKind::CreateCursor(CreateCursor {
            target: raw.target,
            x,
            y,
            color,
            thickness,
            visibility,
        }),
        _ => malformed(CreateBadPosition, span, Vec::new()),
    }
}

fn build_condition(raw: RawCondition) -> Option<Condition> {
    Some(Condition {
        lhs: raw.lhs?,
        op: raw.op?,
        rhs: raw.rhs?,
    })
}

/// 缺少 `end` 时的错误：输入已经结束则报告"意外的文件结尾"。
fn missing_end(closing: Closing, keyword: &'static str, otherwise: SyntaxErrorKind) -> Option<SyntaxErrorKind> {
    match closing {
        Closing::End => None,
        Closing::Missing => Some(otherwise),
        Closing::Eof => Some(SyntaxErrorKind::UnexpectedEof {
            hints: vec![keyword, "end"],
        }),
    }
}

pub fn build_for(raw: RawFor, span: Span) -> StmtKind {
    use SyntaxErrorKind::*;
    let (stmts, closing) = match raw.body {
        Some(body) => (body.stmts, Some(body.closing)),
        None => (Vec::new(), None),
    };

    let Some(var) = raw.var else {
        return malformed(ForMissingIdentifier, span, stmts);
    };
    let name = var.name.clone();
    if !raw.in_keyword {
        return malformed(ForMissingIn { var: name }, span, stmts);
    }
    let Some(range) = raw.range else {
        return malformed(ForMissingParen, span, stmts);
    };
    let items = &range.items;
    let bounds = match items.as_slice() {
        [(start, s1), (Token::Comma, _), (end, s2)] => operand_of(start, *s1).zip(operand_of(end, *s2)),
        [_, (Token::Comma, _), ..] | [(Token::Comma, _), ..] => None,
        [_, _] | [_, _, _] => return malformed(ForMissingComma, span, stmts),
        _ => None,
    };
    let Some((start, end)) = bounds else {
        return malformed(ForBadRange { var: name }, span, stmts);
    };
    if !range.closed {
        return malformed(ForMissingClose { var: name }, span, stmts);
    }
    let Some(closing) = closing else {
        return malformed(ForMissingDo { var: name }, span, stmts);
    };
    if let Some(kind) = missing_end(closing, "for", ForMissingEnd { var: name }) {
        return malformed(kind, span, stmts);
    }
    StmtKind::For {
        var,
        start,
        end,
        body: stmts,
    }
}

pub fn build_if(raw: RawIf, span: Span) -> StmtKind {
    use SyntaxErrorKind::*;
    let (mut stmts, closing) = match raw.then_body {
        Some(body) => (body.stmts, Some(body.closing)),
        None => (Vec::new(), None),
    };

    let Some(condition) = build_condition(raw.condition) else {
        stmts.extend(raw.else_body.unwrap_or_default());
        return malformed(IfMissingCondition, span, stmts);
    };
    let Some(closing) = closing else {
        return malformed(IfMissingThen, span, stmts);
    };
    if let Some(kind) = missing_end(closing, "if", IfMissingEnd) {
        stmts.extend(raw.else_body.unwrap_or_default());
        return malformed(kind, span, stmts);
    }
    StmtKind::If {
        condition,
        then_body: stmts,
        else_body: raw.else_body,
    }
}

pub fn build_while(raw: RawWhile, span: Span) -> StmtKind {
    use SyntaxErrorKind::*;
    let (stmts, closing) = match raw.body {
        Some(body) => (body.stmts, Some(body.closing)),
        None => (Vec::new(), None),
    };

    let Some(condition) = build_condition(raw.condition) else {
        return malformed(WhileMissingCondition, span, stmts);
    };
    let Some(closing) = closing else {
        return malformed(WhileMissingDo, span, stmts);
    };
    if let Some(kind) = missing_end(closing, "while", WhileMissingEnd) {
        return malformed(kind, span, stmts);
    }
    StmtKind::While { condition, body: stmts }
}

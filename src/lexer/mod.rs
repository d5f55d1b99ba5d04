// 导入logos分词库
use logos::Logos;
use log::{debug, trace};
use std::fmt;
use thiserror::Error;

use crate::diagnostics::codes::{
    E0000_UNRESOLVED_IDENTIFIER, E0001_UNRECOGNIZED_CHARACTER, E0002_AUTO_CORRECTED, E0003_INTEGER_OVERFLOW,
};
use crate::diagnostics::Diagnostic;
use crate::suggest::{SequenceMatcher, Suggest};
use crate::symbols::SymbolTable;
use crate::utils::Span;


/// 所有保留字，也是纠错时的候选集合。
pub const KEYWORDS: &[&str] = &[
    "move", "draw", "create", "cursor", "at", "with", "set", "thickness", "color", "if", "then", "else", "while",
    "end", "for", "do", "in", "by", "rotate", "mode", "circle", "filledcircle", "square", "filledsquare", "line",
    "arc", "snail", "bounce", "disco",
];

// logos 解析时需要使用的错误类型
#[derive(Debug, Default, Clone, PartialEq)]
pub enum LexingError {
    #[default]
    InvalidToken,
    /// 整数字面量超出 i64
    IntegerOverflow,
}

/// 非 arc 的图形。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Circle,
    Square,
    Line,
    FilledCircle,
    FilledSquare,
}

impl Shape {
    pub fn keyword(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Line => "line",
            Shape::FilledCircle => "filledcircle",
            Shape::FilledSquare => "filledsquare",
        }
    }

    /// 运行时中对应的绘制函数。
    pub fn c_function(self) -> &'static str {
        match self {
            Shape::Circle => "drawCircle",
            Shape::Square => "drawSquare",
            Shape::Line => "drawLine",
            Shape::FilledCircle => "drawFilledCircle",
            Shape::FilledSquare => "drawFilledSquare",
        }
    }

    /// 生成代码行尾注释里的描述。
    pub fn description(self) -> &'static str {
        match self {
            Shape::Circle => "a circle",
            Shape::Square => "a square",
            Shape::Line => "a line",
            Shape::FilledCircle => "a filled circle",
            Shape::FilledSquare => "a filled square",
        }
    }
}

/// 动画模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationMode {
    Snail,
    Bounce,
    Disco,
}

impl AnimationMode {
    pub fn keyword(self) -> &'static str {
        match self {
            AnimationMode::Snail => "snail",
            AnimationMode::Bounce => "bounce",
            AnimationMode::Disco => "disco",
        }
    }

    /// 生成程序中实现该模式的函数名。
    pub fn procedure(self) -> &'static str {
        match self {
            AnimationMode::Snail => "animateDrawingsnail",
            AnimationMode::Bounce => "animateDrawingbond",
            AnimationMode::Disco => "animateRotation2",
        }
    }
}

/// 词素定义
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(error = LexingError)]
// 跳过空白和换行，行号由 LineIndex 负责
#[logos(skip r"[ \t\r\n\f]+")]
// 跳过 # 开头的注释
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // 语句关键字
    #[token("move")]
    Move,
    #[token("draw")]
    Draw,
    #[token("create")]
    Create,
    #[token("cursor")]
    Cursor,
    #[token("at")]
    At,
    #[token("with")]
    With,
    #[token("set")]
    Set,
    #[token("thickness")]
    Thickness,
    #[token("color")]
    Color,
    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("end")]
    End,
    #[token("for")]
    For,
    #[token("do")]
    Do,
    #[token("in")]
    In,
    #[token("by")]
    By,
    #[token("rotate")]
    Rotate,
    #[token("mode")]
    Mode,

    // 图形
    #[token("circle", |_| Shape::Circle)]
    #[token("square", |_| Shape::Square)]
    #[token("line", |_| Shape::Line)]
    #[token("filledcircle", |_| Shape::FilledCircle)]
    #[token("filledsquare", |_| Shape::FilledSquare)]
    Shape(Shape),
    // arc 的参数个数不同，单独成一个 token
    #[token("arc")]
    Arc,

    // 动画模式
    #[token("snail", |_| AnimationMode::Snail)]
    #[token("bounce", |_| AnimationMode::Bounce)]
    #[token("disco", |_| AnimationMode::Disco)]
    Animation(AnimationMode),

    // 运算与比较
    #[token("=")]
    Assign,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // 分割符号
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // 整数字面量
    #[regex("[0-9]+", lex_number)]
    Number(i64),

    // 原始标识符，只在 logos 内部出现，`lex` 会把它归类成下面两种之一
    #[regex("[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // 已归类的标识符
    CursorId(String),
    NumberId(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Move => "move",
            Token::Draw => "draw",
            Token::Create => "create",
            Token::Cursor => "cursor",
            Token::At => "at",
            Token::With => "with",
            Token::Set => "set",
            Token::Thickness => "thickness",
            Token::Color => "color",
            Token::If => "if",
            Token::Then => "then",
            Token::Else => "else",
            Token::While => "while",
            Token::End => "end",
            Token::For => "for",
            Token::Do => "do",
            Token::In => "in",
            Token::By => "by",
            Token::Rotate => "rotate",
            Token::Mode => "mode",
            Token::Shape(shape) => shape.keyword(),
            Token::Arc => "arc",
            Token::Animation(mode) => mode.keyword(),
            Token::Assign => "=",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Comma => ",",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Number(n) => return write!(f, "{n}"),
            Token::Ident(name) | Token::CursorId(name) | Token::NumberId(name) => name,
        };
        f.write_str(text)
    }
}

fn lex_number(lex: &mut logos::Lexer<Token>) -> Result<i64, LexingError> {
    lex.slice().parse().map_err(|_| LexingError::IntegerOverflow)
}

/// 把一个保留字重新交给 logos，得到它的关键字 token。
fn keyword_token(word: &str) -> Option<Token> {
    let mut lexer = Token::lexer(word);
    match (lexer.next(), lexer.next()) {
        (Some(Ok(token)), None) if !matches!(token, Token::Ident(_)) => Some(token),
        _ => None,
    }
}

// --- 词法错误 ---

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexicalError {
    #[error("variable '{name}' not recognized.")]
    UnresolvedIdentifier { name: String, span: Span },

    #[error("unrecognized character '{character}'. No correction found.")]
    UnrecognizedCharacter { character: char, span: Span },

    #[error("unrecognized element '{text}'.")]
    Corrected {
        text: String,
        keyword: &'static str,
        span: Span,
    },

    #[error("integer literal '{text}' is too large.")]
    IntegerOverflow { text: String, span: Span },
}

impl LexicalError {
    pub fn span(&self) -> Span {
        match self {
            LexicalError::UnresolvedIdentifier { span, .. }
            | LexicalError::UnrecognizedCharacter { span, .. }
            | LexicalError::Corrected { span, .. }
            | LexicalError::IntegerOverflow { span, .. } => *span,
        }
    }
}

impl From<LexicalError> for Diagnostic {
    fn from(error: LexicalError) -> Self {
        let message = error.to_string();
        match error {
            LexicalError::UnresolvedIdentifier { span, .. } => Diagnostic::new(&E0000_UNRESOLVED_IDENTIFIER, span)
                .with_message(message)
                .with_note(
                    "Suggestion: You need to assign a value such as a cursor or a number to a variable for it to be valid.",
                ),
            LexicalError::UnrecognizedCharacter { span, .. } => {
                Diagnostic::new(&E0001_UNRECOGNIZED_CHARACTER, span).with_message(message)
            }
            LexicalError::Corrected { text, keyword, span } => Diagnostic::new(&E0002_AUTO_CORRECTED, span)
                .with_message(message)
                .with_suggestion(format!("'{text}' replaced with '{keyword}'."))
                .with_note("Compilation stops here; fix the spelling to continue."),
            LexicalError::IntegerOverflow { span, .. } => {
                Diagnostic::new(&E0003_INTEGER_OVERFLOW, span).with_message(message)
            }
        }
    }
}

// --- 上下文相关的标识符归类 ---

/// 判断 `text` 开头是不是一个标识符，是则返回它。
fn leading_identifier(text: &str) -> Option<&str> {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() => {}
        _ => return None,
    }
    let end = chars
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    Some(&text[..end])
}

/// 按"已知游标 → 已知数值 → 声明上下文"的顺序归类一个非关键字标识符。
/// `rest` 是标识符之后尚未扫描的输入，`previous` 是上一个输出的 token。
/// 无法归类时返回 `None`。
fn classify(name: &str, rest: &str, previous: Option<&Token>, symbols: &mut SymbolTable) -> Option<Token> {
    if symbols.is_cursor(name) {
        return Some(Token::CursorId(name.to_string()));
    }
    if symbols.is_number(name) {
        return Some(Token::NumberId(name.to_string()));
    }

    // for 之后紧跟的是循环变量
    if previous == Some(&Token::For) {
        symbols.declare_number(name);
        return Some(Token::NumberId(name.to_string()));
    }

    let after = rest.trim_start().strip_prefix('=')?.trim_start();
    if after.starts_with("create cursor") {
        symbols.declare_cursor(name);
        return Some(Token::CursorId(name.to_string()));
    }
    let numeric = after.starts_with(|c: char| c.is_ascii_digit())
        || leading_identifier(after).is_some_and(|first| first == name || symbols.is_number(first));
    if numeric {
        symbols.declare_number(name);
        return Some(Token::NumberId(name.to_string()));
    }
    None
}

/// 对源代码进行词法分析，返回 Token 向量和所有词法错误。
/// 标识符的归类会修改 `symbols`。
pub fn lex(source: &str, symbols: &mut SymbolTable) -> (Vec<(Token, Span)>, Vec<LexicalError>) {
    lex_with(source, symbols, &SequenceMatcher::default())
}

/// 同 [`lex`]，但使用给定的纠错策略。
pub fn lex_with<S: Suggest>(
    source: &str,
    symbols: &mut SymbolTable,
    suggest: &S,
) -> (Vec<(Token, Span)>, Vec<LexicalError>) {
    let mut tokens: Vec<(Token, Span)> = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span: Span = lexer.span().into();
        let slice = lexer.slice();

        match result {
            Ok(Token::Ident(name)) => {
                let previous = tokens.last().map(|(token, _)| token);
                if let Some(token) = classify(&name, lexer.remainder(), previous, symbols) {
                    trace!("identifier '{name}' classified as {token:?}");
                    tokens.push((token, span));
                } else if let Some(found) = suggest.best_match(&name, KEYWORDS) {
                    trace!("identifier '{name}' corrected to '{}' ({:.2})", found.candidate, found.score);
                    if let Some(token) = keyword_token(found.candidate) {
                        tokens.push((token, span));
                    }
                    errors.push(LexicalError::Corrected {
                        text: name,
                        keyword: found.candidate,
                        span,
                    });
                } else {
                    errors.push(LexicalError::UnresolvedIdentifier { name, span });
                }
            }

            Ok(token) => tokens.push((token, span)),

            Err(LexingError::IntegerOverflow) => errors.push(LexicalError::IntegerOverflow {
                text: slice.to_string(),
                span,
            }),

            Err(LexingError::InvalidToken) => {
                let character = slice.chars().next().unwrap_or_default();
                match suggest.best_match(slice, KEYWORDS) {
                    Some(found) => {
                        if let Some(token) = keyword_token(found.candidate) {
                            tokens.push((token, span));
                        }
                        errors.push(LexicalError::Corrected {
                            text: slice.to_string(),
                            keyword: found.candidate,
                            span,
                        });
                    }
                    None => errors.push(LexicalError::UnrecognizedCharacter { character, span }),
                }
            }
        }
    }

    debug!("lexed {} tokens with {} lexical errors", tokens.len(), errors.len());
    (tokens, errors)
}

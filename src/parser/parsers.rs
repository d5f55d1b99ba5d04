// src/parser/parsers.rs

use chumsky::input::ValueInput;
use chumsky::prelude::*;

use crate::lexer::Token;
use crate::parser::ast::*;
use crate::parser::malformed::*;
use crate::symbols::SymbolKind;
use crate::utils::Span;

pub(super) type ParseError<'a> = extra::Err<Rich<'a, Token, Span>>;

/// 一条语句的解析结果：合法的语句，或者匹配到的错误产生式。
type Outcome = Result<StmtKind, SyntaxErrorKind>;

fn settle(outcome: Outcome, span: Span) -> Stmt {
    let kind = match outcome {
        Ok(kind) => kind,
        Err(kind) => StmtKind::Malformed {
            error: SyntaxError::new(kind, span),
            body: Vec::new(),
        },
    };
    Stmt { kind, span }
}

/// 不属于任何语句的 token。提示留空，由 `parse` 按所在行补上。
fn unexpected(token: Token, span: Span) -> Stmt {
    settle(
        Err(SyntaxErrorKind::UnexpectedElement {
            found: token.to_string(),
            hints: Vec::new(),
        }),
        span,
    )
}

fn text_of(operand: &Operand) -> String {
    match operand {
        Operand::Literal(n, _) => n.to_string(),
        Operand::Name(ident) => ident.name.clone(),
    }
}

// --- 1. 基础解析器 ---

/// 光标位置上的名字。数值变量也在这里接受，类别是否匹配交给求值阶段。
fn name<'a, I>() -> impl Parser<'a, I, Ident, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    select! {
        Token::CursorId(name) = e => Ident { name, kind: SymbolKind::Cursor, span: e.span() },
        Token::NumberId(name) = e => Ident { name, kind: SymbolKind::Number, span: e.span() },
    }
    .labelled("identifier")
}

fn number<'a, I>() -> impl Parser<'a, I, i64, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    select! { Token::Number(n) => n }.labelled("number")
}

/// `number_or_id`
fn operand<'a, I>() -> impl Parser<'a, I, Operand, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    choice((
        select! { Token::Number(n) = e => Operand::Literal(n, e.span()) },
        name().map(Operand::Name),
    ))
    .labelled("number or identifier")
}

/// 宽松的 `( ... )`：原样收集括号里的值、逗号和图形名，右括号可以缺失。
fn group<'a, I>() -> impl Parser<'a, I, Group, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    let item = any()
        .filter(|token: &Token| {
            matches!(
                token,
                Token::Number(_)
                    | Token::NumberId(_)
                    | Token::CursorId(_)
                    | Token::Comma
                    | Token::Shape(_)
                    | Token::Arc
            )
        })
        .map_with(|token, e| (token, e.span()));

    just(Token::LParen)
        .ignore_then(item.repeated().collect::<Vec<_>>())
        .then(just(Token::RParen).or_not())
        .map(|(items, close)| Group {
            items,
            closed: close.is_some(),
        })
}

/// 块的收尾：`end`、输入结束，或者两者都不是。
fn closing<'a, I>() -> impl Parser<'a, I, Closing, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    just(Token::End)
        .to(Closing::End)
        .or(end().to(Closing::Eof))
        .or_not()
        .map(|closing| closing.unwrap_or(Closing::Missing))
}

fn condition<'a, I>() -> impl Parser<'a, I, RawCondition, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    let compare = select! {
        Token::Lt => CompareOp::Lt,
        Token::Gt => CompareOp::Gt,
        Token::Assign => CompareOp::Eq,
    };
    operand()
        .or_not()
        .then(compare.or_not())
        .then(operand().or_not())
        .map(|((lhs, op), rhs)| RawCondition { lhs, op, rhs })
}

// --- 2. 单行语句 ---

/// 部件齐全但顺序不对的 move / rotate，例如 `c by move 10`、`move by c 10`。
fn swapped<'a, I>(keyword: Token, statement: &'static str) -> impl Parser<'a, I, Stmt, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    let word = operand().map(|operand| text_of(&operand));
    let by = just(Token::By).to("by".to_string());
    let kw = just(keyword).to(statement.to_string());

    choice((
        word.clone().then(by.clone()).then(kw.clone()).then(word.clone()),
        by.clone().then(word.clone()).then(kw.clone()).then(word.clone()),
        word.clone().then(kw.clone()).then(by.clone()).then(word.clone()),
        kw.then(by).then(word.clone()).then(word),
    ))
    .map_with(move |(((a, b), c), d), e| {
        let kind = SyntaxErrorKind::IncorrectOrder {
            statement,
            text: format!("{a} {b} {c} {d}"),
        };
        settle(Err(kind), e.span())
    })
}

fn move_stmt<'a, I>() -> impl Parser<'a, I, Stmt, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    use SyntaxErrorKind::*;
    let mv = just(Token::Move);

    choice((
        mv.clone()
            .ignore_then(name())
            .then_ignore(just(Token::By))
            .then(operand())
            .map(|(cursor, distance)| -> Outcome { Ok(StmtKind::Move { cursor, distance }) }),
        mv.clone()
            .ignore_then(name())
            .then_ignore(just(Token::By))
            .map(|cursor| -> Outcome { Err(MoveMissingDistance { cursor: cursor.name }) }),
        mv.clone().ignore_then(name()).map(|ident| -> Outcome {
            Err(match ident.kind {
                SymbolKind::Number => MoveMissingCursor { number: ident.name },
                SymbolKind::Cursor => MoveMissingBy { cursor: ident.name },
            })
        }),
        mv.clone().ignore_then(number()).map(|n| -> Outcome {
            Err(MoveMissingCursor { number: n.to_string() })
        }),
        mv.to(Outcome::Err(MoveIncomplete)),
    ))
    .map_with(|outcome, e| settle(outcome, e.span()))
}

fn rotate_stmt<'a, I>() -> impl Parser<'a, I, Stmt, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    use SyntaxErrorKind::*;
    let rotate = just(Token::Rotate);

    choice((
        rotate
            .clone()
            .ignore_then(name())
            .then_ignore(just(Token::By))
            .then(operand())
            .map(|(cursor, angle)| -> Outcome { Ok(StmtKind::Rotate { cursor, angle }) }),
        rotate
            .clone()
            .ignore_then(name())
            .then_ignore(just(Token::By))
            .map(|cursor| -> Outcome { Err(RotateMissingAngle { cursor: cursor.name }) }),
        rotate
            .clone()
            .ignore_then(name())
            .then_ignore(number())
            .map(|cursor| -> Outcome { Err(RotateMissingBy { cursor: cursor.name }) }),
        rotate
            .clone()
            .ignore_then(name())
            .map(|cursor| -> Outcome { Err(RotateMissingAngleValue { cursor: cursor.name }) }),
        rotate.clone().ignore_then(number()).map(|n| -> Outcome {
            Err(RotateExpectedCursor { found: n.to_string() })
        }),
        rotate.to(Outcome::Err(RotateIncomplete)),
    ))
    .map_with(|outcome, e| settle(outcome, e.span()))
}

fn set_stmt<'a, I>() -> impl Parser<'a, I, Stmt, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    use SyntaxErrorKind::*;
    let set = just(Token::Set);
    let set_thickness = set.clone().ignore_then(name()).then_ignore(just(Token::Thickness));

    choice((
        set_thickness
            .clone()
            .then_ignore(just(Token::At))
            .then(operand())
            .map(|(cursor, thickness)| -> Outcome { Ok(StmtKind::SetThickness { cursor, thickness }) }),
        set_thickness
            .clone()
            .then_ignore(just(Token::At))
            .map(|cursor| -> Outcome { Err(SetMissingValue { cursor: cursor.name }) }),
        set_thickness
            .then_ignore(number().or_not())
            .map(|cursor| -> Outcome { Err(SetMissingAt { cursor: cursor.name }) }),
        set.clone()
            .then(just(Token::Thickness))
            .then(just(Token::At).then(operand().or_not()).or_not())
            .to(Outcome::Err(SetMissingCursor)),
        set.clone()
            .ignore_then(name())
            .map(|cursor| -> Outcome { Err(SetMissingThickness { cursor: cursor.name }) }),
        set.to(Outcome::Err(SetIncomplete)),
    ))
    .map_with(|outcome, e| settle(outcome, e.span()))
}

fn mode_stmt<'a, I>() -> impl Parser<'a, I, Stmt, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    just(Token::Mode)
        .ignore_then(select! { Token::Animation(mode) => mode }.or_not())
        .map_with(|mode, e| {
            let outcome = match mode {
                Some(mode) => Ok(StmtKind::Mode(mode)),
                None => Err(SyntaxErrorKind::ModeMissingAnimation),
            };
            settle(outcome, e.span())
        })
}

fn draw_stmt<'a, I>() -> impl Parser<'a, I, Stmt, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    just(Token::Draw)
        .ignore_then(group().or_not())
        .then(just(Token::With).ignore_then(name().or_not()).or_not())
        .map_with(|(group, with), e| {
            let raw = RawDraw {
                group,
                with: with.is_some(),
                cursor: with.flatten(),
            };
            Stmt {
                kind: build_draw(raw, e.span()),
                span: e.span(),
            }
        })
}

fn create_stmt<'a, I>() -> impl Parser<'a, I, Stmt, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    name()
        .then_ignore(just(Token::Assign))
        .then_ignore(just(Token::Create))
        .then(just(Token::Cursor).or_not())
        .then(just(Token::At).or_not())
        .then(group().or_not())
        .then(just(Token::With).or_not())
        .then(group().or_not())
        .map_with(|(((((target, cursor_keyword), at), position), with), values), e| {
            let raw = RawCreate {
                target,
                cursor_keyword: cursor_keyword.is_some(),
                at: at.is_some(),
                position,
                with: with.is_some(),
                values,
            };
            Stmt {
                kind: build_create(raw, e.span()),
                span: e.span(),
            }
        })
}

/// `=` 右边的几种形状。
#[derive(Debug, Clone)]
enum Rhs {
    Arithmetic(Ident, ArithOp, Operand),
    OperandNotNumber(ArithOp, Ident),
    MissingOperand(Ident, ArithOp),
    Value(Operand),
}

fn assignment_stmt<'a, I>() -> impl Parser<'a, I, Stmt, ParseError<'a>> + Clone
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    let arith_op = select! {
        Token::Plus => ArithOp::Add,
        Token::Minus => ArithOp::Sub,
        Token::Star => ArithOp::Mul,
        Token::Slash => ArithOp::Div,
        Token::Percent => ArithOp::Mod,
    };
    let literal = select! { Token::Number(n) = e => Operand::Literal(n, e.span()) };

    let rhs = choice((
        name()
            .then(arith_op)
            .then(literal)
            .map(|((source, op), operand)| Rhs::Arithmetic(source, op, operand)),
        name()
            .then(arith_op)
            .then(name())
            .map(|((_, op), found)| Rhs::OperandNotNumber(op, found)),
        name()
            .then(arith_op)
            .map(|(source, op)| Rhs::MissingOperand(source, op)),
        operand().map(Rhs::Value),
    ));

    name()
        .then_ignore(just(Token::Assign))
        .then(rhs.or_not())
        .map_with(|(target, rhs), e| {
            use SyntaxErrorKind::*;
            let outcome = match rhs {
                Some(Rhs::Arithmetic(source, op, operand)) => Ok(StmtKind::Arithmetic {
                    target,
                    source,
                    op,
                    operand,
                }),
                Some(Rhs::OperandNotNumber(op, found)) => Err(ArithmeticOperandNotNumber {
                    op: op.symbol(),
                    found: found.name,
                }),
                Some(Rhs::MissingOperand(source, op)) => Err(ArithmeticMissingOperand {
                    name: target.name,
                    base: source.name,
                    op: op.symbol(),
                }),
                Some(Rhs::Value(value)) => Ok(StmtKind::Assign { target, value }),
                None => Err(AssignMissingValue { name: target.name }),
            };
            settle(outcome, e.span())
        })
}

// --- 3. 语句与程序 ---

/// 构建完整的 chumsky 解析器。它从不失败：
/// 无法归入任何语句的 token 会变成一条 `UnexpectedElement`，然后从下一个 token 继续。
pub(super) fn program_parser<'a, I>() -> impl Parser<'a, I, Program, ParseError<'a>>
where
    I: Input<'a, Token = Token, Span = Span> + ValueInput<'a>,
{
    let stmt = recursive(|stmt| {
        // 语句体里的杂项 token；`end` 和 `else` 留给外层收尾
        let stray = any()
            .filter(|token: &Token| !matches!(token, Token::End | Token::Else))
            .map_with(|token, e| unexpected(token, e.span()));
        let block = choice((stmt, stray)).repeated().collect::<Vec<_>>().boxed();

        let for_stmt = just(Token::For)
            .ignore_then(name().or_not())
            .then(just(Token::In).or_not())
            .then(group().or_not())
            .then(
                just(Token::Do)
                    .ignore_then(block.clone())
                    .then(closing())
                    .map(|(stmts, closing)| RawBody { stmts, closing })
                    .or_not(),
            )
            .map_with(|(((var, in_keyword), range), body), e| {
                let raw = RawFor {
                    var,
                    in_keyword: in_keyword.is_some(),
                    range,
                    body,
                };
                Stmt {
                    kind: build_for(raw, e.span()),
                    span: e.span(),
                }
            })
            .boxed();

        let if_stmt = just(Token::If)
            .ignore_then(condition())
            .then(
                just(Token::Then)
                    .ignore_then(block.clone())
                    .then(just(Token::Else).ignore_then(block.clone()).or_not())
                    .then(closing())
                    .or_not(),
            )
            .map_with(|(condition, then_part), e| {
                let (then_body, else_body) = match then_part {
                    Some(((stmts, else_body), closing)) => (Some(RawBody { stmts, closing }), else_body),
                    None => (None, None),
                };
                let raw = RawIf {
                    condition,
                    then_body,
                    else_body,
                };
                Stmt {
                    kind: build_if(raw, e.span()),
                    span: e.span(),
                }
            })
            .boxed();

        let while_stmt = just(Token::While)
            .ignore_then(condition())
            .then(
                just(Token::Do)
                    .ignore_then(block)
                    .then(closing())
                    .map(|(stmts, closing)| RawBody { stmts, closing })
                    .or_not(),
            )
            .map_with(|(condition, body), e| {
                let raw = RawWhile { condition, body };
                Stmt {
                    kind: build_while(raw, e.span()),
                    span: e.span(),
                }
            })
            .boxed();

        // 顺序错误的形式要排在 move / rotate 之前，否则 `move by ...` 会先被当成不完整的 move
        let simple = choice((
            swapped(Token::Move, "move"),
            swapped(Token::Rotate, "rotate"),
            move_stmt(),
            rotate_stmt(),
            set_stmt(),
            mode_stmt(),
            draw_stmt(),
        ))
        .boxed();

        choice((simple, create_stmt(), assignment_stmt(), for_stmt, if_stmt, while_stmt))
            .labelled("statement")
            .boxed()
    });

    let stray = any().map_with(|token, e| unexpected(token, e.span()));

    choice((stmt, stray))
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|stmts| Program { stmts })
}

// src/diagnostics/codes.rs

use crate::diagnostics::Severity;

/// 一个错误码及其默认信息。
/// 所有诊断的错误码、类别和默认消息都以这里为准。
#[derive(Debug, Clone)]
pub struct ErrorCode {
    pub code: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub explanation: &'static str,
}

/*
E00xx: 词法分析 (Lexical Analysis) 错误。

E01xx: 语法分析 (Parsing / Syntax) 错误。

E02xx: 语义分析与求值 (Semantic Analysis / Evaluation) 错误。

E03xx: 构建 (Build) 错误，由外部工具链产生。
*/
// --- E00xx: Lexical Analysis Errors ---

pub const E0000_UNRESOLVED_IDENTIFIER: ErrorCode = ErrorCode {
    code: "E0000",
    severity: Severity::Lexical,
    message: "variable not recognized",
    explanation: "An identifier is neither a keyword, a declared cursor nor a declared numeric variable, \
                  and it is not being declared here. A name becomes known when it is assigned a number \
                  (`x = 10`) or a cursor (`c = create cursor at ...`)."
};

pub const E0001_UNRECOGNIZED_CHARACTER: ErrorCode = ErrorCode {
    code: "E0001",
    severity: Severity::Lexical,
    message: "unrecognized character",
    explanation: "The input contains a character that is not part of the Draw++ alphabet \
                  and no keyword is close enough to replace it."
};

pub const E0002_AUTO_CORRECTED: ErrorCode = ErrorCode {
    code: "E0002",
    severity: Severity::Lexical,
    message: "input replaced with the closest keyword",
    explanation: "The text was not recognized but is very similar to a keyword. \
                  The keyword was substituted so analysis could continue; fix the spelling to silence this error."
};

pub const E0003_INTEGER_OVERFLOW: ErrorCode = ErrorCode {
    code: "E0003",
    severity: Severity::Lexical,
    message: "integer literal is too large",
    explanation: "Integer literals must fit into a 64-bit signed integer."
};

// --- E01xx: Syntax Analysis (Parsing) Errors ---

pub const E0100_UNEXPECTED_ELEMENT: ErrorCode = ErrorCode {
    code: "E0100",
    severity: Severity::Syntax,
    message: "unexpected element",
    explanation: "The token does not fit any statement form at this position. \
                  The usage of every keyword found on the offending line is listed below the error."
};

pub const E0101_UNEXPECTED_EOF: ErrorCode = ErrorCode {
    code: "E0101",
    severity: Severity::Syntax,
    message: "unexpected end of file",
    explanation: "The source ended in the middle of a statement, usually a block missing its `end`."
};

pub const E0102_MALFORMED_MOVE: ErrorCode = ErrorCode {
    code: "E0102",
    severity: Severity::Syntax,
    message: "'move' statement is incorrect or incomplete",
    explanation: "A movement is written `move <cursor> by <number>`."
};

pub const E0103_MALFORMED_ROTATE: ErrorCode = ErrorCode {
    code: "E0103",
    severity: Severity::Syntax,
    message: "'rotate' statement is incorrect or incomplete",
    explanation: "A rotation is written `rotate <cursor> by <angle>`."
};

pub const E0104_MALFORMED_SET: ErrorCode = ErrorCode {
    code: "E0104",
    severity: Severity::Syntax,
    message: "'set thickness' statement is incorrect or incomplete",
    explanation: "A thickness change is written `set <cursor> thickness at <number>`."
};

pub const E0105_MALFORMED_DRAW: ErrorCode = ErrorCode {
    code: "E0105",
    severity: Severity::Syntax,
    message: "'draw' statement is incorrect or incomplete",
    explanation: "A drawing is written `draw (<form>, <size>) with <cursor>`, \
                  or `draw (arc, <size>, <start angle>, <end angle>) with <cursor>` for arcs."
};

pub const E0106_MALFORMED_CREATE: ErrorCode = ErrorCode {
    code: "E0106",
    severity: Severity::Syntax,
    message: "'create cursor' statement is incorrect or incomplete",
    explanation: "A cursor is created with `<id> = create cursor at (<x>, <y>) with (...)` \
                  where the list holds 6 or 8 values: the color channels, then thickness and visibility."
};

pub const E0107_MALFORMED_MODE: ErrorCode = ErrorCode {
    code: "E0107",
    severity: Severity::Syntax,
    message: "animation mode is missing or unknown",
    explanation: "An animation mode is selected with `mode snail`, `mode bounce` or `mode disco`."
};

pub const E0108_MALFORMED_FOR: ErrorCode = ErrorCode {
    code: "E0108",
    severity: Severity::Syntax,
    message: "'for' statement is incorrect or incomplete",
    explanation: "A counted loop is written `for <identifier> in (<start>, <end>) do <instructions> end`."
};

pub const E0109_MALFORMED_IF: ErrorCode = ErrorCode {
    code: "E0109",
    severity: Severity::Syntax,
    message: "'if' statement is incorrect or incomplete",
    explanation: "A conditional is written `if <condition> then <instructions> end`, \
                  optionally with `else <instructions>` before `end`."
};

pub const E0110_MALFORMED_WHILE: ErrorCode = ErrorCode {
    code: "E0110",
    severity: Severity::Syntax,
    message: "'while' statement is incorrect or incomplete",
    explanation: "A conditional loop is written `while <condition> do <instructions> end`."
};

pub const E0111_MALFORMED_ASSIGNMENT: ErrorCode = ErrorCode {
    code: "E0111",
    severity: Severity::Syntax,
    message: "assignment is incomplete",
    explanation: "A value is assigned with `<id> = <number or id>`; an arithmetic assignment is written \
                  `<id> = <id> <op> <number>` with op one of + - * / %."
};

pub const E0112_INCORRECT_ORDER: ErrorCode = ErrorCode {
    code: "E0112",
    severity: Severity::Syntax,
    message: "command in an incorrect order",
    explanation: "All the parts of the statement are present but they are not in the expected order."
};

// --- E02xx: Semantic Analysis Errors ---

pub const E0200_DIVISION_BY_ZERO: ErrorCode = ErrorCode {
    code: "E0200",
    severity: Severity::Semantic,
    message: "division by zero",
    explanation: "The right operand of `/` is the literal 0; the assignment is not performed."
};

pub const E0201_MODULO_BY_ZERO: ErrorCode = ErrorCode {
    code: "E0201",
    severity: Severity::Semantic,
    message: "modulo by zero",
    explanation: "The right operand of `%` is the literal 0; the assignment is not performed."
};

pub const E0202_UNDEFINED_VARIABLE: ErrorCode = ErrorCode {
    code: "E0202",
    severity: Severity::Semantic,
    message: "variable not defined",
    explanation: "The value of a numeric variable is read before any value was assigned to it."
};

pub const E0203_KIND_MISMATCH: ErrorCode = ErrorCode {
    code: "E0203",
    severity: Severity::Semantic,
    message: "name used as the wrong kind",
    explanation: "A cursor was used where a number is expected, or a numeric variable where a cursor is expected."
};

pub const E0204_CURSOR_REDEFINED: ErrorCode = ErrorCode {
    code: "E0204",
    severity: Severity::Semantic,
    message: "cursor is already created",
    explanation: "Each cursor is created exactly once; later statements refer to it by name."
};

pub const E0205_ARITHMETIC_OVERFLOW: ErrorCode = ErrorCode {
    code: "E0205",
    severity: Severity::Semantic,
    message: "arithmetic overflow",
    explanation: "The result of the arithmetic does not fit into a 64-bit signed integer."
};

// --- E03xx: Build Errors ---

pub const E0300_TOOLCHAIN_FAILED: ErrorCode = ErrorCode {
    code: "E0300",
    severity: Severity::Build,
    message: "external compiler failed",
    explanation: "The generated program could not be compiled against the SDL runtime. \
                  The compiler's standard error is shown below."
};

pub const E0301_PROGRAM_FAILED: ErrorCode = ErrorCode {
    code: "E0301",
    severity: Severity::Build,
    message: "generated program failed",
    explanation: "The compiled drawing program could not be started or exited with an error."
};

//! 关键字用法提示。
//!
//! 通用语法错误会在出错的那一行里查找关键字，
//! 每找到一个就附上它的完整用法，所以一个错误可以带多条提示。

pub const MOVE_USAGE: &str = "- 'move <id_cursor> by <number>'.";
pub const ROTATE_USAGE: &str = "- 'rotate <id_cursor> by <angle>'.";
pub const DRAW_USAGE: &str = "- 'draw (<form>, <size>) with <cursor>'.";
pub const DRAW_FORMS: &str = "Forms: circle | square | line | filledcircle | filledsquare | arc.";
pub const ARC_WARNING: &str = "Warning, 'arc' has a different usage.";
pub const ARC_USAGE: &str = "- 'draw (arc, <size>, <start angle>, <end angle>) with <cursor>'.";
pub const CREATE_USAGE: &str = "- '<id_cursor> = create cursor at (<number or id_number>, <number or id_number>) \
     with (<number or id_number>, <number or id_number>, <number or id_number>, <number or id_number>, \
     <number or id_number>, <number or id_number>)'.";
pub const CREATE_VALUES: &str = "The 'with' list holds 6 values (r, g, b, a, thickness, visibility) \
     or 8 values (r, g, b, r, g, b, thickness, visibility).";
pub const IF_USAGE: &str = "- 'if <condition> then <program> end'";
pub const IF_ELSE_USAGE: &str = "- 'if <condition> then <program> else <program> end'";
pub const FOR_USAGE: &str = "- 'for <identifier> in (<start>, <end>) do <program> end'";
pub const WHILE_USAGE: &str = "- 'while <condition> do <program> end'.";
pub const MODE_USAGE: &str = "- 'mode <animation>'";
pub const MODE_ANIMATIONS: &str = "Animations: snail | bounce | disco";
pub const SET_USAGE: &str = "- 'set <cursor> thickness at <number or id_number>'";
pub const ASSIGN_USAGE: &str = "- '<id> = <id_number> <+ | - | * | / | %> <number>'";

/// 一个关键字及其提示文本（逐行）。
#[derive(Debug)]
pub struct KeywordHint {
    pub keyword: &'static str,
    pub lines: &'static [&'static str],
}

/// 固定顺序的关键字提示表。
pub const KEYWORD_HINTS: &[KeywordHint] = &[
    KeywordHint {
        keyword: "move",
        lines: &[
            "Suggested correction: check the complete structure of the 'move' statement.",
            "Usage :",
            MOVE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "by",
        lines: &[
            "Suggested correction: ensure 'by' is part of a complete 'move' or 'rotate' statement.",
            "Usage :",
            MOVE_USAGE,
            "Or :",
            ROTATE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "draw",
        lines: &[
            "Suggested correction: check the complete structure of the 'draw' statement.",
            "Usage :",
            DRAW_USAGE,
            DRAW_FORMS,
            ARC_WARNING,
            ARC_USAGE,
        ],
    },
    KeywordHint {
        keyword: "cursor",
        lines: &[
            "Suggested correction: check the complete structure of the 'create cursor' statement.",
            "Usage :",
            CREATE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "create",
        lines: &[
            "Suggested correction: check the complete structure of the 'create cursor' statement.",
            "Usage :",
            CREATE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "with",
        lines: &[
            "Suggested correction: check the complete structure of the 'create cursor' or 'draw' statement.",
            "Usage :",
            CREATE_USAGE,
            "Or :",
            DRAW_USAGE,
            DRAW_FORMS,
            ARC_WARNING,
            ARC_USAGE,
        ],
    },
    KeywordHint {
        keyword: "if",
        lines: &[
            "Suggested correction: check the complete structure of the condition statement.",
            "Two possibilities :",
            IF_USAGE,
            IF_ELSE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "for",
        lines: &[
            "Suggested correction: check the complete structure of the loop statement.",
            "Usage :",
            FOR_USAGE,
        ],
    },
    KeywordHint {
        keyword: "mode",
        lines: &[
            "Suggested correction: check the complete structure of the animation mode.",
            "Usage :",
            MODE_USAGE,
            MODE_ANIMATIONS,
        ],
    },
    KeywordHint {
        keyword: "rotate",
        lines: &[
            "Suggested correction: check the complete structure of the 'rotate' statement.",
            "Usage :",
            ROTATE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "then",
        lines: &[
            "Suggested correction: check the complete structure of the condition statement.",
            "Two possibilities :",
            IF_USAGE,
            IF_ELSE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "else",
        lines: &[
            "Suggested correction: check the complete structure of the condition statement.",
            "Usage :",
            IF_ELSE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "while",
        lines: &[
            "Suggested correction: check the complete structure of the 'while' statement.",
            "Usage :",
            WHILE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "do",
        lines: &[
            "Suggested correction: ensure 'do' is part of a complete 'for' or 'while' statement.",
            FOR_USAGE,
            "Or :",
            WHILE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "set",
        lines: &[
            "Suggested correction: ensure 'set' is part of a complete 'set thickness' statement.",
            "Usage :",
            SET_USAGE,
        ],
    },
    KeywordHint {
        keyword: "thickness",
        lines: &[
            "Suggested correction: ensure 'thickness' is part of a complete 'set thickness' statement.",
            "Usage :",
            SET_USAGE,
        ],
    },
    KeywordHint {
        keyword: "at",
        lines: &[
            "Suggested correction: ensure 'at' is part of a complete 'set thickness' or 'create cursor' statement.",
            "Usage :",
            SET_USAGE,
            "Or :",
            CREATE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "end",
        lines: &[
            "Suggested correction: ensure 'end' is part of a complete 'for', 'if' or 'while' statement.",
            "Usage :",
            FOR_USAGE,
            "Or :",
            IF_USAGE,
            IF_ELSE_USAGE,
            "Or :",
            WHILE_USAGE,
        ],
    },
    KeywordHint {
        keyword: "in",
        lines: &[
            "Suggested correction: ensure 'in' is part of a complete 'for' statement.",
            FOR_USAGE,
        ],
    },
];

/// 找出 `line` 中作为完整单词出现的关键字，或等于出错 token 的关键字，
/// 按 [`KEYWORD_HINTS`] 的顺序返回。
pub fn hints_for(line: &str, offending: Option<&str>) -> Vec<&'static KeywordHint> {
    let words: Vec<&str> = line
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();

    KEYWORD_HINTS
        .iter()
        .filter(|hint| offending == Some(hint.keyword) || words.contains(&hint.keyword))
        .collect()
}

/// 把一组提示展开成逐行的 note。
pub fn hint_lines(hints: &[&KeywordHint]) -> Vec<String> {
    hints
        .iter()
        .flat_map(|hint| hint.lines.iter().map(|line| line.to_string()))
        .collect()
}

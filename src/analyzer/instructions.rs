use log::trace;

use crate::lexer::{AnimationMode, Shape};
use crate::symbols::Cursor;

/// 求值阶段产出的一条目标代码指令，按代码生成需要的类别区分。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `Cursor a = createCursor(...);`
    Create { cursor: String, text: String },
    /// 移动、旋转和粗细设置
    Transform(String),
    Draw(String),
    Mode(AnimationMode),
}

impl Instruction {
    pub fn create(cursor: &Cursor) -> Self {
        let [r, g, b, a] = cursor.color.sdl_channels();
        let text = format!(
            "Cursor {} = createCursor({}, {}, (SDL_Color){{{r}, {g}, {b}, {a}}}, {}, {});",
            cursor.name, cursor.x, cursor.y, cursor.thickness, cursor.visible
        );
        Instruction::Create {
            cursor: cursor.name.clone(),
            text,
        }
    }

    pub fn movement(cursor: &str, distance: i64) -> Self {
        Instruction::Transform(format!("moveCursor(&{cursor},{distance});"))
    }

    pub fn rotation(cursor: &str, angle: i64) -> Self {
        Instruction::Transform(format!("rotateCursor(&{cursor},{angle});"))
    }

    pub fn thickness(cursor: &str, thickness: i64) -> Self {
        Instruction::Transform(format!("setThickness(&{cursor},{thickness});"))
    }

    pub fn shape(shape: Shape, cursor: &str, size: i64) -> Self {
        Instruction::Draw(format!(
            "{}(renderer, &{cursor}, {size}); // Draw {}",
            shape.c_function(),
            shape.description()
        ))
    }

    pub fn arc(cursor: &str, size: i64, start: i64, end: i64) -> Self {
        Instruction::Draw(format!("drawArc(renderer, &{cursor}, {size}, {start}, {end});"))
    }

    /// 指令的目标代码文本。
    pub fn text(&self) -> String {
        match self {
            Instruction::Create { text, .. } | Instruction::Transform(text) | Instruction::Draw(text) => text.clone(),
            Instruction::Mode(mode) => format!("{}(renderer);", mode.procedure()),
        }
    }
}

/// 按求值顺序排列的指令，只追加不删除。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionBuffer {
    instructions: Vec<Instruction>,
}

impl InstructionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        trace!("emit: {}", instruction.text());
        self.instructions.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// 游标创建指令，以及它们创建的游标名。
    pub fn creations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.instructions.iter().filter_map(|instruction| match instruction {
            Instruction::Create { cursor, text } => Some((cursor.as_str(), text.as_str())),
            _ => None,
        })
    }

    pub fn transforms(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().filter_map(|instruction| match instruction {
            Instruction::Transform(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn drawings(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().filter_map(|instruction| match instruction {
            Instruction::Draw(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// 最后一次选择的动画模式，后面的选择覆盖前面的。
    pub fn mode(&self) -> Option<AnimationMode> {
        self.instructions.iter().rev().find_map(|instruction| match instruction {
            Instruction::Mode(mode) => Some(*mode),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a InstructionBuffer {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

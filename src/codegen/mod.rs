// In src/codegen/mod.rs

// 1. 声明所有子模块
mod templates;
#[cfg(test)]
mod test;

// 2. 导入依赖
use log::debug;

use crate::analyzer::InstructionBuffer;
use templates::*;

// --- 核心抽象 ---

/// 按类别拆分好的指令，四个动画函数共用。
struct Sections<'a> {
    creations: Vec<&'a str>,
    cursor_table: String,
    transforms: Vec<&'a str>,
    drawings: Vec<&'a str>,
}

impl<'a> Sections<'a> {
    fn new(buffer: &'a InstructionBuffer) -> Self {
        let (names, creations): (Vec<&str>, Vec<&str>) = buffer.creations().unzip();
        Self {
            creations,
            cursor_table: cursor_table(&names),
            transforms: buffer.transforms().collect(),
            drawings: buffer.drawings().collect(),
        }
    }

    /// 游标创建指令和游标表，每个动画函数的开头都一样。
    fn write_prologue(&self, out: &mut String) {
        for line in &self.creations {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.cursor_table);
        out.push_str("\n\n");
    }
}

/// `Cursor* cursors[] = { &a, &b };`，每个元素占一行。
fn cursor_table(names: &[&str]) -> String {
    let entries: Vec<String> = names.iter().map(|name| format!("&{name}")).collect();
    format!("Cursor* cursors[] = {{\n    {}\n}};", entries.join(",\n    "))
}

/// 逐行写出，每行加上前缀和后缀。
fn write_lines(out: &mut String, lines: &[&str], indent: &str, suffix: &str) {
    for line in lines {
        out.push_str(indent);
        out.push_str(line);
        out.push_str(suffix);
        out.push('\n');
    }
    out.push('\n');
}

// --- 各动画模式 ---

fn write_snail(out: &mut String, sections: &Sections) {
    out.push_str(SNAIL_OPEN);
    sections.write_prologue(out);
    out.push_str(SNAIL_TRANSFORMS);
    write_lines(out, &sections.transforms, "    ", "");
    out.push_str(SNAIL_LOOP);
    // snail 的绘制指令不缩进，也不补分号
    write_lines(out, &sections.drawings, "", "");
    out.push_str(SNAIL_CLOSE);
}

fn write_bounce(out: &mut String, sections: &Sections) {
    out.push_str(BOUNCE_OPEN);
    sections.write_prologue(out);
    out.push_str(BOUNCE_TRANSFORMS);
    write_lines(out, &sections.transforms, "    ", ";");
    out.push_str(BOUNCE_SETUP);
    out.push_str(EVENT_SWITCH);
    out.push_str(BOUNCE_RENDER);
    write_lines(out, &sections.drawings, "        ", ";");
    out.push_str(BOUNCE_CLOSE);
}

fn write_disco(out: &mut String, sections: &Sections) {
    out.push_str(DISCO_OPEN);
    sections.write_prologue(out);
    out.push_str(DISCO_TRANSFORMS);
    write_lines(out, &sections.transforms, "    ", "");
    out.push_str(DISCO_SETUP);
    out.push_str(EVENT_SWITCH);
    out.push_str(DISCO_RENDER);
    out.push_str(DISCO_DRAWINGS);
    write_lines(out, &sections.drawings, "        ", ";");
    out.push_str(DISCO_CLOSE);
}

fn write_default(out: &mut String, sections: &Sections) {
    out.push_str(DEFAULT_OPEN);
    sections.write_prologue(out);
    out.push_str(DEFAULT_TRANSFORMS);
    write_lines(out, &sections.transforms, "    ", "");
    out.push_str(DEFAULT_LOOP);
    write_lines(out, &sections.drawings, "        ", ";");
    out.push_str(DEFAULT_CLOSE);
}

fn write_main(out: &mut String, buffer: &InstructionBuffer) {
    out.push_str(MAIN_OPEN);
    match buffer.mode() {
        Some(mode) => {
            out.push_str("    ");
            out.push_str(mode.procedure());
            out.push_str("(renderer);\n\n");
        }
        None => out.push_str(DEFAULT_ENTRY),
    }
    out.push_str(MAIN_CLOSE);
}

/// 顶层代码生成函数
///
/// 纯模板拼接：相同的指令缓冲区总是生成完全相同的 C 程序文本。
pub fn generate(buffer: &InstructionBuffer) -> String {
    let sections = Sections::new(buffer);
    debug!(
        "generating C program: {} cursors, {} transforms, {} drawings, mode {:?}",
        sections.creations.len(),
        sections.transforms.len(),
        sections.drawings.len(),
        buffer.mode()
    );

    let mut out = String::from(HEADERS);
    write_snail(&mut out, &sections);
    write_bounce(&mut out, &sections);
    write_disco(&mut out, &sections);
    write_default(&mut out, &sections);
    write_main(&mut out, buffer);
    out
}

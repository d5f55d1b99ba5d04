use std::ops::Range;

/// 行偏移索引：预先计算每一行起始的字节偏移，
/// 让任意字节位置都能换算成从 1 开始的行号。
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// `line_starts[i]` 是第 `i + 1` 行第一个字节的偏移，永远至少有一项。
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// 位置 `pos` 所在的行号（从 1 开始）。越界的位置归到最后一行。
    pub fn line_of(&self, pos: usize) -> usize {
        let pos = pos.min(self.len);
        self.line_starts.partition_point(|&start| start <= pos).max(1)
    }

    /// 第 `line` 行（从 1 开始）的字节范围，不含换行符。
    pub fn line_range(&self, line: usize) -> Range<usize> {
        let idx = line.saturating_sub(1).min(self.line_starts.len() - 1);
        let start = self.line_starts[idx];
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.len);
        start..end.max(start)
    }

    /// 第 `line` 行的文本（去掉首尾空白）。
    pub fn line_text<'s>(&self, line: usize, source: &'s str) -> &'s str {
        source
            .get(self.line_range(line))
            .unwrap_or_default()
            .trim()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

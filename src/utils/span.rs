use chumsky::span::Span as ChumskySpan;
use std::ops::Range;

/// 源代码中的一个字节范围 `[start, end)`。
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// 一个长度为零、位于 `pos` 的 span，用于"文件末尾"这类位置。
    pub fn point(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn into_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

// chumsky 需要的 trait：只有一个源文件，所以 context 是 `()`。
impl ChumskySpan for Span {
    type Context = ();
    type Offset = usize;

    fn new(_context: Self::Context, range: Range<Self::Offset>) -> Self {
        Span::new(range.start, range.end)
    }

    fn context(&self) -> Self::Context {}

    fn start(&self) -> Self::Offset {
        self.start
    }

    fn end(&self) -> Self::Offset {
        self.end
    }
}

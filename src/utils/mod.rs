mod line_index;
mod span;


pub use line_index::LineIndex;
pub use span::Span;

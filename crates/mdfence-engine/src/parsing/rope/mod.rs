pub mod lines;
pub mod slice;
pub mod span;

pub use lines::{LineIndex, LineRef, lines_with_spans};
pub use slice::slice_to_string;
pub use span::Span;

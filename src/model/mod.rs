//! Content model: the line store and its height geometry.

pub mod buffer;
pub mod height_index;

pub use buffer::{wrap_rows, wrapped_height, LineBuffer, WrapMode};
pub use height_index::HeightIndex;

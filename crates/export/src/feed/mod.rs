//! CSV feed files: row schemas and the append-only writer.

mod rows;
mod writer;

pub use rows::{CategoryRow, FeedRow, ProductRow};
pub use writer::FeedWriter;

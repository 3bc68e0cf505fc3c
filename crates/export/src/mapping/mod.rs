//! Row mapping for validated entities.

mod category;
mod product;

pub use category::map_category;
pub use product::map_sellable_item;

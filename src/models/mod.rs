mod item;
mod purchase;

pub use item::*;
pub use purchase::*;

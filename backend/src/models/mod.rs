pub mod product;
pub mod projection;

pub use product::*;
pub use projection::IntoWire;

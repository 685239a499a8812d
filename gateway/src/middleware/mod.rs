pub mod body;
pub mod gate;

pub use body::{read_json, BodyLimit};
pub use gate::{authorize, Gated};

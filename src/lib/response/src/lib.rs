mod response;
pub use crate::response::*;

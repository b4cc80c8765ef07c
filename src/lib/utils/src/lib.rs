mod utils;
pub mod test_utils;

pub use crate::utils::*;

//! A line by line regular expression tester, reporting every match with its position so that it can be highlighted.

mod flags;
mod tester;

pub use crate::flags::*;
pub use crate::tester::*;

//! Request head parsing.

mod head_parser;
pub use head_parser::HeadParser;

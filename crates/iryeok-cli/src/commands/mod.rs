pub mod extract;
pub mod headers;
pub mod images;
pub mod parse;

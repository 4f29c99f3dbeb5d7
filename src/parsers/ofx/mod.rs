mod dto;
mod parser;
mod types;

pub mod prelude {
    pub use super::dto::{OfxStatement, OfxTransaction};
    pub use super::parser::OfxParser;
    pub use super::types::OfxDate;
}

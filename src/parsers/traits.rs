/// A statement export format.
pub trait Parser {
    /// One parsed document, before conversion into crate types
    type Output;

    /// Parses decoded content. Errors are human-readable reasons.
    fn parse(content: &str) -> Result<Self::Output, String>;
}

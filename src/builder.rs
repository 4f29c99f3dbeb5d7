use crate::{
    errors::{StatementParseError, StatementResult},
    parsers::prelude::*,
    types::Statement,
};

/// Parser output before it is mapped onto a [`Statement`].
#[derive(Debug, Clone)]
pub enum ParsedStatement {
    Ofx(OfxStatement),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileFormat {
    /// OFX 1.x (SGML) or 2.x (XML), including Quicken's `.qfx`
    #[default]
    Ofx,
}

impl FileFormat {
    fn parse_raw(self, content: &str) -> StatementResult<ParsedStatement> {
        match self {
            FileFormat::Ofx => OfxParser::parse(content)
                .map(ParsedStatement::Ofx)
                .map_err(StatementParseError::ParseFailed),
        }
    }
}

/// Builds a [`Statement`] from already-decoded content. Reading and decoding
/// the file is the caller's job, so the configured encoding always applies.
///
/// ```rust,ignore
/// let statement = ParserBuilder::new()
///     .content(&decoded)
///     .format(FileFormat::Ofx)
///     .parse()?;
/// ```
#[derive(Debug, Default)]
pub struct ParserBuilder {
    content: Option<String>,
    format: FileFormat,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    pub fn parse(self) -> StatementResult<Statement> {
        let content = self.content.ok_or(StatementParseError::MissingContent)?;
        Statement::try_from(self.format.parse_raw(&content)?)
    }
}

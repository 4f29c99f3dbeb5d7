use std::{borrow::Cow, collections::HashSet};

use log::debug;

use super::dto::{OfxStatement, OfxXml};
use crate::parsers::traits::Parser;

pub struct OfxParser;

impl Parser for OfxParser {
    type Output = OfxStatement;

    /// Reads the first bank statement, or failing that the first credit card
    /// statement, of an OFX 1.x (SGML) or 2.x (XML) document.
    fn parse(content: &str) -> Result<Self::Output, String> {
        let body = ofx_element(content)?;
        let xml = if content.trim_start().starts_with("<?xml") {
            Cow::Borrowed(body)
        } else {
            debug!("closing SGML leaf elements");
            Cow::Owned(sgml_to_xml(body))
        };

        let document: OfxXml =
            serde_xml_rs::from_str(&xml).map_err(|e| format!("XML parse error: {}", e))?;

        let statement = match (document.bank_msgs, document.cc_msgs) {
            (Some(bank), _) => bank.stmt_trn_rs.stmt_rs,
            (None, Some(card)) => {
                debug!("no bank statement, using the credit card statement");
                card.cc_stmt_trn_rs.cc_stmt_rs
            }
            (None, None) => return Err("No transaction data found".to_string()),
        };

        OfxStatement::from_raw(statement)
    }
}

/// The `<OFX>...</OFX>` slice of a document, without headers or trailing noise.
fn ofx_element(content: &str) -> Result<&str, String> {
    const OPEN: &str = "<OFX>";
    const CLOSE: &str = "</OFX>";

    let start = content.find(OPEN).ok_or("Missing <OFX> tag")?;
    let end = content.find(CLOSE).ok_or("Missing </OFX> tag")?;
    if end < start {
        return Err("Misplaced </OFX> tag".to_string());
    }
    Ok(&content[start..end + CLOSE.len()])
}

/// Rewrites an SGML `<OFX>` element as XML, one element per line.
///
/// The input is split on `<`, so line breaks do not matter. A start tag
/// followed by text is a leaf and gets closed unless its end tag comes right
/// after. A start tag with no text is an aggregate when the document closes
/// that name somewhere, and an empty leaf otherwise.
fn sgml_to_xml(body: &str) -> String {
    let closed: HashSet<&str> = body
        .split("</")
        .skip(1)
        .filter_map(|rest| rest.split_once('>'))
        .map(|(name, _)| name.trim())
        .collect();

    let mut tokens = body
        .split('<')
        .filter_map(|token| token.split_once('>'))
        .map(|(tag, text)| (tag.trim(), text.trim()))
        .filter(|(tag, _)| !tag.is_empty())
        .peekable();

    let mut xml = String::with_capacity(body.len() + body.len() / 4);
    while let Some((tag, text)) = tokens.next() {
        xml.push('<');
        xml.push_str(tag);
        xml.push('>');
        if tag.starts_with('/') {
            xml.push('\n');
            continue;
        }

        let closes_next = tokens
            .peek()
            .is_some_and(|(next, _)| next.strip_prefix('/') == Some(tag));
        if closes_next {
            xml.push_str(&escape_ampersands(text));
        } else if !text.is_empty() || !closed.contains(tag) {
            xml.push_str(&escape_ampersands(text));
            xml.push_str("</");
            xml.push_str(tag);
            xml.push_str(">\n");
        } else {
            xml.push('\n');
        }
    }
    xml
}

/// SGML exports often carry bare `&` in names and memos, which XML rejects.
fn escape_ampersands(text: &str) -> String {
    const ENTITIES: &[&str] = &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;", "&#"];

    let mut escaped = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c == '&' && !ENTITIES.iter().any(|e| text[i..].starts_with(e)) {
            escaped.push_str("&amp;");
        } else {
            escaped.push(c);
        }
    }
    escaped
}

//! Grammar parser for canonical message text.
//!
//! The text is split on `\n` into a tape of lines and consumed by small
//! line parsers in canonical order. The parser is purely structural: it
//! extracts raw field values and leaves their grammars to
//! [`SiwxMessage::new`](crate::message::SiwxMessage::new).

use crate::canonical::tags;
use crate::error::ParseError;
use crate::message::MessageFields;

#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    text: &'a str,
    offset: usize,
}

/// Cursor over the lines of a message.
struct Tape<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    len: usize,
}

impl<'a> Tape<'a> {
    fn new(text: &'a str) -> Self {
        let mut offset = 0;
        let lines = text
            .split('\n')
            .map(|line| {
                let line = Line { text: line, offset };
                offset += line.text.len() + 1;
                line
            })
            .collect();
        Self {
            lines,
            pos: 0,
            len: text.len(),
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.peek_at(0)
    }

    fn peek_at(&self, ahead: usize) -> Option<&'a str> {
        self.lines.get(self.pos + ahead).map(|line| line.text)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn error(&self, expected: impl Into<String>) -> ParseError {
        match self.lines.get(self.pos) {
            Some(line) => ParseError {
                offset: line.offset,
                line: self.pos + 1,
                expected: expected.into(),
                found: line.text.to_string(),
            },
            None => ParseError {
                offset: self.len,
                line: self.pos + 1,
                expected: expected.into(),
                found: "end of input".to_string(),
            },
        }
    }

    /// Consume the next line whole.
    fn any(&mut self, expected: &str) -> Result<&'a str, ParseError> {
        let text = self.peek().ok_or_else(|| self.error(expected))?;
        self.advance();
        Ok(text)
    }

    /// Consume a line equal to `literal`.
    fn exact(&mut self, literal: &str, expected: &str) -> Result<(), ParseError> {
        match self.peek() {
            Some(text) if text == literal => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error(expected)),
        }
    }

    /// Consume a line starting with `tag`, returning the rest.
    fn tagged(&mut self, tag: &str) -> Result<&'a str, ParseError> {
        match self.peek().and_then(|text| text.strip_prefix(tag)) {
            Some(value) => {
                self.advance();
                Ok(value)
            }
            None => Err(self.error(format!("{tag:?} line"))),
        }
    }

    /// Like [`tagged`](Self::tagged), but absent is not an error.
    fn optional(&mut self, tag: &str) -> Option<&'a str> {
        let value = self.peek()?.strip_prefix(tag)?;
        self.advance();
        Some(value)
    }

    /// Consume a line equal to `literal` if it is next.
    fn optional_exact(&mut self, literal: &str) -> Option<()> {
        if self.peek()? != literal {
            return None;
        }
        self.advance();
        Some(())
    }

    /// Consume consecutive lines starting with `tag`.
    fn many(&mut self, tag: &str) -> Vec<&'a str> {
        let mut values = Vec::new();
        while let Some(value) = self.optional(tag) {
            values.push(value);
        }
        values
    }

    fn end(&self) -> Result<(), ParseError> {
        if self.pos < self.lines.len() {
            return Err(self.error("end of input"));
        }
        Ok(())
    }
}

/// `{domain} wants you to sign in with your {network} account:`
fn header<'a>(tape: &mut Tape<'a>) -> Result<(&'a str, &'a str), ParseError> {
    const EXPECTED: &str = "\"{domain} wants you to sign in with your {network} account:\"";
    let parsed = tape.peek().and_then(|text| {
        let (domain, rest) = text.split_once(tags::WANTS)?;
        let network = rest.strip_suffix(tags::ACCOUNT)?;
        Some((domain, network))
    });
    match parsed {
        Some(fields) => {
            tape.advance();
            Ok(fields)
        }
        None => Err(tape.error(EXPECTED)),
    }
}

/// The statement is present iff the line after it is the URI line.
///
/// A statement that itself starts with `URI: ` is still recognised, since
/// the real URI line follows it.
fn statement<'a>(tape: &mut Tape<'a>) -> Option<&'a str> {
    let follows_uri = tape
        .peek_at(1)
        .is_some_and(|next| next.starts_with(tags::URI));
    if !follows_uri {
        return None;
    }
    let text = tape.peek()?;
    tape.advance();
    Some(text)
}

fn resources<'a>(tape: &mut Tape<'a>) -> Option<Vec<&'a str>> {
    tape.optional_exact(tags::RESOURCES)?;
    Some(tape.many(tags::RESOURCE_ITEM))
}

/// Parse canonical text into raw fields.
///
/// Fails on the first structural mismatch; never returns a partial result.
pub fn parse(text: &str) -> Result<MessageFields, ParseError> {
    let mut tape = Tape::new(text);

    let (domain, network) = header(&mut tape)?;
    let address = tape.any("address line")?;
    tape.exact("", "blank line")?;
    let statement = statement(&mut tape);
    let uri = tape.tagged(tags::URI)?;
    let version = tape.tagged(tags::VERSION)?;
    let chain_id = tape.tagged(tags::CHAIN_ID)?;
    let nonce = tape.tagged(tags::NONCE)?;
    let issued_at = tape.tagged(tags::ISSUED_AT)?;
    let expiration_time = tape.optional(tags::EXPIRATION_TIME);
    let not_before = tape.optional(tags::NOT_BEFORE);
    let request_id = tape.optional(tags::REQUEST_ID);
    let resources = resources(&mut tape);
    tape.end()?;

    Ok(MessageFields {
        domain: domain.to_string(),
        network: network.to_string(),
        address: address.to_string(),
        statement: statement.map(str::to_string),
        uri: uri.to_string(),
        version: Some(version.to_string()),
        chain_id: chain_id.to_string(),
        nonce: nonce.to_string(),
        issued_at: issued_at.to_string(),
        expiration_time: expiration_time.map(str::to_string),
        not_before: not_before.map(str::to_string),
        request_id: request_id.map(str::to_string),
        resources: resources.map(|list| list.into_iter().map(str::to_string).collect()),
    })
}

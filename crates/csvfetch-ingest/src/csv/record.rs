//! Record parsing over a line-oriented stream.

use std::io::{self, BufRead};

use super::Dialect;

/// One parsed record and the bytes it consumed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record {
    /// Fields in order. `None` marks an absent field, which only a blank
    /// line produces.
    pub fields: Vec<Option<String>>,
    /// Stream bytes consumed, line terminators included.
    pub bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    AfterQuote,
}

struct RecordParser {
    dialect: Dialect,
    fields: Vec<Option<String>>,
    current: String,
    state: FieldState,
}

impl RecordParser {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            fields: Vec::new(),
            current: String::new(),
            state: FieldState::Start,
        }
    }

    fn in_quotes(&self) -> bool {
        self.state == FieldState::Quoted
    }

    fn feed(&mut self, line: &str) {
        let Dialect { delimiter, quote } = self.dialect;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            match self.state {
                FieldState::Start if c == quote => self.state = FieldState::Quoted,
                FieldState::Quoted if c == quote => {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&quote) {
                        self.current.push(quote);
                        chars.next();
                    } else {
                        self.state = FieldState::AfterQuote;
                    }
                }
                FieldState::Quoted => self.current.push(c),
                _ if c == delimiter => self.end_field(),
                FieldState::Start => {
                    self.current.push(c);
                    self.state = FieldState::Unquoted;
                }
                FieldState::Unquoted | FieldState::AfterQuote => self.current.push(c),
            }
        }
    }

    fn end_field(&mut self) {
        self.fields.push(Some(std::mem::take(&mut self.current)));
        self.state = FieldState::Start;
    }

    fn finish(mut self) -> Vec<Option<String>> {
        self.end_field();
        self.fields
    }
}

/// Splits a line into its body and its `\n` or `\r\n` terminator.
fn split_terminator(line: &str) -> (&str, &str) {
    let body_len = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .map_or(line.len(), str::len);
    line.split_at(body_len)
}

/// Reads the next record from `reader`.
///
/// Returns `Ok(None)` when the stream has no more data. A quoted field left
/// open at the end of a line continues on the next line with the line break
/// kept; an unterminated quote at end of stream ends the record.
pub(crate) fn read_record<R: BufRead>(
    reader: &mut R,
    dialect: Dialect,
) -> io::Result<Option<Record>> {
    let mut line = String::new();
    let mut bytes = reader.read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }

    let (body, _) = split_terminator(&line);
    if body.is_empty() {
        return Ok(Some(Record {
            fields: vec![None],
            bytes,
        }));
    }

    let mut parser = RecordParser::new(dialect);
    loop {
        let (body, terminator) = split_terminator(&line);
        parser.feed(body);
        if !parser.in_quotes() {
            break;
        }
        parser.current.push_str(terminator);

        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        bytes += read;
    }

    Ok(Some(Record {
        fields: parser.finish(),
        bytes,
    }))
}

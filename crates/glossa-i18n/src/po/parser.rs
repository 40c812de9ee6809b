//! Line-oriented PO parser.
//!
//! The parser walks a cursor over the document's lines. Each entry is an
//! optional block of `#` comments, an optional `msgctxt`, a `msgid`, and
//! either a `msgstr` or a `msgid_plural` followed by `msgstr[n]` forms.
//! Quoted lines directly after a field continue its value.
//!
//! Lines that cannot start an entry (orphaned comments, stray `msgstr`
//! lines, junk) are skipped so hand-edited files still load. Structural
//! damage that would lose data silently is fatal instead: a `msgid_plural`
//! with no `msgid`, a plural array not starting at `msgstr[0]`, an unknown
//! escape sequence, or a field missing its `msgstr`.

use super::{PoEntry, PoFile, PoHeader};
use tracing::debug;

/// PO parsing errors. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid format at line {line}: {message}")]
    InvalidFormat { line: usize, message: String },

    #[error("unexpected end of input at line {line}")]
    UnexpectedEof { line: usize },

    #[error("invalid escape sequence {sequence:?} at line {line}")]
    InvalidEscapeSequence { line: usize, sequence: String },

    #[error("missing msgid at line {line}")]
    MissingMsgid { line: usize },

    #[error("missing msgstr at line {line}")]
    MissingMsgstr { line: usize },
}

/// Parse PO content into its translation entries.
///
/// The header entry (`msgid ""`) is not returned; use [`parse_po_file`] to
/// keep it.
pub fn parse_po(content: &str) -> Result<Vec<PoEntry>, ParseError> {
    parse_po_file(content).map(|file| file.entries)
}

/// Parse PO content, keeping the header separately.
pub fn parse_po_file(content: &str) -> Result<PoFile, ParseError> {
    let raw = Parser::new(content).parse_entries()?;

    let mut file = PoFile::default();
    for entry in raw {
        if !entry.msgid.is_empty() {
            file.entries.push(entry);
        } else if file.header.is_none() && entry.msgctxt.is_none() {
            file.header = Some(PoHeader::parse(&entry.msgstr));
        } else {
            debug!("skipping entry with empty msgid");
        }
    }

    debug!(entries = file.entries.len(), header = file.header.is_some(), "parsed PO content");
    Ok(file)
}

/// Escape a string for use inside a PO quoted literal.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(s: &str, line: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                return Err(ParseError::InvalidEscapeSequence {
                    line,
                    sequence: format!("\\{other}"),
                })
            }
            None => {
                return Err(ParseError::InvalidEscapeSequence {
                    line,
                    sequence: "\\".to_string(),
                })
            }
        }
    }

    Ok(out)
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

fn is_quoted(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('"') && line.ends_with('"')
}

fn starts_entry(line: &str) -> bool {
    line.starts_with("msgid ") || line.starts_with("msgctxt ")
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    /// Lines trimmed off the top of the document, for error positions.
    offset: usize,
}

impl<'a> Parser<'a> {
    fn new(content: &'a str) -> Self {
        let body = content.trim();
        let leading = &content[..content.len() - content.trim_start().len()];
        let lines = if body.is_empty() {
            Vec::new()
        } else {
            body.split('\n').map(str::trim).collect()
        };

        Self {
            lines,
            pos: 0,
            offset: leading.matches('\n').count(),
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn line_no(&self) -> usize {
        self.pos + self.offset + 1
    }

    fn peek_starts_with(&self, prefix: &str) -> bool {
        self.peek().is_some_and(|line| line.starts_with(prefix))
    }

    fn skip_blank(&mut self) {
        while self.peek().is_some_and(str::is_empty) {
            self.pos += 1;
        }
    }

    fn parse_entries(mut self) -> Result<Vec<PoEntry>, ParseError> {
        let mut entries = Vec::new();

        loop {
            self.skip_blank();
            if self.peek().is_none() {
                break;
            }

            let start = self.pos;
            match self.parse_entry() {
                Ok(entry) => entries.push(entry),
                Err(ParseError::MissingMsgid { line }) => {
                    self.pos = start;
                    self.recover(line)?;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(entries)
    }

    /// Skip lines that cannot begin an entry, always making progress.
    fn recover(&mut self, line: usize) -> Result<(), ParseError> {
        if self.peek_starts_with("msgid_plural") {
            return Err(ParseError::MissingMsgid { line });
        }

        let before = self.pos;
        while self
            .peek()
            .is_some_and(|l| is_comment(l) || l.starts_with("msgstr"))
        {
            self.pos += 1;
        }

        if self.pos == before {
            debug!(line = self.line_no(), "dropping unparseable line");
            self.pos += 1;
        } else {
            debug!(line = before + self.offset + 1, skipped = self.pos - before, "skipped orphaned lines");
        }

        Ok(())
    }

    fn parse_entry(&mut self) -> Result<PoEntry, ParseError> {
        let mut entry = PoEntry::default();
        self.parse_comments(&mut entry);

        if self.peek_starts_with("msgctxt ") {
            entry.msgctxt = Some(self.read_field("msgctxt ")?);
            if self.peek().is_none() {
                return Err(ParseError::UnexpectedEof { line: self.line_no() });
            }
        }

        if !self.peek_starts_with("msgid ") {
            return Err(ParseError::MissingMsgid { line: self.line_no() });
        }
        entry.msgid = self.read_field("msgid ")?;

        match self.peek() {
            None => Err(ParseError::UnexpectedEof { line: self.line_no() }),
            Some(line) if line.starts_with("msgid_plural ") => {
                let plural_line = self.line_no();
                entry.msgid_plural = Some(self.read_field("msgid_plural ")?);
                entry.msgstr_plural = self.parse_plural_forms(plural_line)?;
                entry.msgstr = entry.msgstr_plural[0].clone();
                Ok(entry)
            }
            Some(line) if line.starts_with("msgstr ") => {
                entry.msgstr = self.read_field("msgstr ")?;
                Ok(entry)
            }
            Some(line) if line.starts_with("msgstr[") => Err(ParseError::InvalidFormat {
                line: self.line_no(),
                message: "msgstr[n] without msgid_plural".to_string(),
            }),
            Some(_) => Err(ParseError::MissingMsgstr { line: self.line_no() }),
        }
    }

    fn parse_comments(&mut self, entry: &mut PoEntry) {
        while let Some(line) = self.peek() {
            if let Some(rest) = line.strip_prefix("#:") {
                entry
                    .references
                    .extend(rest.split_whitespace().map(String::from));
            } else if let Some(rest) = line.strip_prefix("#,") {
                entry.flags.extend(
                    rest.split(',')
                        .map(str::trim)
                        .filter(|flag| !flag.is_empty())
                        .map(String::from),
                );
            } else if let Some(rest) = line.strip_prefix('#') {
                entry.comments.push(rest.trim().to_string());
            } else {
                break;
            }
            self.pos += 1;
        }
    }

    /// Read the field on the current line, which must start with `prefix`.
    fn read_field(&mut self, prefix: &str) -> Result<String, ParseError> {
        let line = self.peek().unwrap_or_default();
        let rest = line.get(prefix.len()..).unwrap_or_default();
        self.read_value(rest)
    }

    /// Unquote `first` (the current line's literal) and append any
    /// continuation lines that follow it.
    fn read_value(&mut self, first: &str) -> Result<String, ParseError> {
        let first = first.trim();
        if !is_quoted(first) {
            return Err(ParseError::InvalidFormat {
                line: self.line_no(),
                message: format!("expected a quoted string, found {first:?}"),
            });
        }

        let mut value = unescape(&first[1..first.len() - 1], self.line_no())?;
        self.pos += 1;

        while let Some(line) = self.peek().filter(|l| is_quoted(l)) {
            value.push_str(&unescape(&line[1..line.len() - 1], self.line_no())?);
            self.pos += 1;
        }

        Ok(value)
    }

    /// Collect `msgstr[n]` lines up to the next entry start, ordered by index.
    ///
    /// Comments and other lines between forms are passed over. The cursor
    /// ends just after the last form, so comments of the next entry stay put.
    /// Errors point at `start_line`, the `msgid_plural` line.
    fn parse_plural_forms(&mut self, start_line: usize) -> Result<Vec<String>, ParseError> {
        let mut forms: Vec<(usize, String)> = Vec::new();
        let mut scan = self.pos;
        let mut consumed = self.pos;

        while let Some(line) = self.lines.get(scan).copied() {
            if starts_entry(line) {
                break;
            }
            if line.starts_with("msgstr[") {
                self.pos = scan;
                forms.push(self.read_indexed_msgstr(line)?);
                scan = self.pos;
                consumed = self.pos;
            } else {
                scan += 1;
            }
        }
        self.pos = consumed;

        if forms.is_empty() {
            return Err(ParseError::MissingMsgstr { line: start_line });
        }

        forms.sort_by_key(|(index, _)| *index);
        for (expected, (index, _)) in forms.iter().enumerate() {
            if *index != expected {
                let message = if expected == 0 {
                    "plural forms must start at msgstr[0]".to_string()
                } else {
                    format!("msgstr[{expected}] is missing or duplicated")
                };
                return Err(ParseError::InvalidFormat {
                    line: start_line,
                    message,
                });
            }
        }

        Ok(forms.into_iter().map(|(_, value)| value).collect())
    }

    fn read_indexed_msgstr(&mut self, line: &str) -> Result<(usize, String), ParseError> {
        let invalid = |message: String| ParseError::InvalidFormat {
            line: self.line_no(),
            message,
        };

        let rest = &line["msgstr[".len()..];
        let (index, value) = rest
            .split_once(']')
            .ok_or_else(|| invalid("unterminated msgstr index".to_string()))?;
        let index: usize = index
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid msgstr index {index:?}")))?;

        Ok((index, self.read_value(value)?))
    }
}

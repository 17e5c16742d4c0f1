//! Reader for gettext `.po` source files.
//!
//! Only the parts a plain lookup needs are kept: context, msgid, plural id,
//! translations and the `fuzzy` flag. The header entry is returned like any
//! other entry and its fields are never interpreted.

use thiserror::Error;

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoEntry {
    pub msgctxt: Option<String>,
    pub msgid: String,
    pub msgid_plural: Option<String>,
    /// `msgstr`, or `msgstr[0..n]` for plural entries.
    pub msgstr: Vec<String>,
    pub fuzzy: bool,
}

impl PoEntry {
    /// Translation seen by a plain `gettext(msgid)` lookup.
    ///
    /// `None` for the header, fuzzy, context-qualified, plural and
    /// untranslated entries.
    #[must_use]
    pub fn plain_translation(&self) -> Option<&str> {
        if self.msgid.is_empty()
            || self.fuzzy
            || self.msgctxt.is_some()
            || self.msgid_plural.is_some()
        {
            return None;
        }
        self.msgstr.first().map(String::as_str).filter(|s| !s.is_empty())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct PoParseError {
    pub line: usize,
    pub message: String,
}

impl PoParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self { line, message: message.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    IdPlural,
    Str(usize),
}

#[derive(Debug, Default)]
struct Parser {
    entries: Vec<PoEntry>,
    current: PoEntry,
    field: Option<Field>,
    has_msgid: bool,
}

impl Parser {
    /// Closes the current entry once its translations have been read.
    fn finish_translated(&mut self, line: usize) -> Result<(), PoParseError> {
        if self.current.msgstr.is_empty() {
            return Ok(());
        }
        self.finish(line)
    }

    fn finish(&mut self, line: usize) -> Result<(), PoParseError> {
        if self.has_msgid && self.current.msgstr.is_empty() {
            return Err(PoParseError::new(line, "msgid without msgstr"));
        }
        let entry = std::mem::take(&mut self.current);
        if self.has_msgid {
            self.entries.push(entry);
        }
        self.field = None;
        self.has_msgid = false;
        Ok(())
    }

    fn keyword(&mut self, line: usize, field: Field, value: String) -> Result<(), PoParseError> {
        match field {
            Field::Context => {
                self.finish_translated(line)?;
                if self.has_msgid {
                    return Err(PoParseError::new(line, "msgctxt after msgid"));
                }
                self.current.msgctxt = Some(value);
            }
            Field::Id => {
                self.finish_translated(line)?;
                if self.has_msgid {
                    return Err(PoParseError::new(line, "msgid without msgstr"));
                }
                self.current.msgid = value;
                self.has_msgid = true;
            }
            Field::IdPlural => {
                if !self.has_msgid || !self.current.msgstr.is_empty() {
                    return Err(PoParseError::new(line, "msgid_plural outside an entry"));
                }
                self.current.msgid_plural = Some(value);
            }
            Field::Str(index) => {
                if !self.has_msgid {
                    return Err(PoParseError::new(line, "msgstr without msgid"));
                }
                if index != self.current.msgstr.len() {
                    return Err(PoParseError::new(line, format!("msgstr[{index}] out of order")));
                }
                self.current.msgstr.push(value);
            }
        }
        self.field = Some(field);
        Ok(())
    }

    fn continuation(&mut self, line: usize, value: &str) -> Result<(), PoParseError> {
        let target = match self.field {
            Some(Field::Context) => self.current.msgctxt.as_mut(),
            Some(Field::Id) => Some(&mut self.current.msgid),
            Some(Field::IdPlural) => self.current.msgid_plural.as_mut(),
            Some(Field::Str(index)) => self.current.msgstr.get_mut(index),
            None => None,
        };
        let Some(target) = target else {
            return Err(PoParseError::new(line, "string continuation outside a field"));
        };
        target.push_str(value);
        Ok(())
    }
}

/// Parses `.po` text into its entries, obsolete (`#~`) entries excluded.
///
/// # Errors
/// Lines that are neither comments, keywords nor quoted continuations,
/// badly quoted strings and entries with a msgid but no msgstr.
pub fn parse_po(text: &str) -> Result<Vec<PoEntry>, PoParseError> {
    let mut parser = Parser::default();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            parser.finish(line)?;
        } else if let Some(flags) = trimmed.strip_prefix("#,") {
            parser.finish_translated(line)?;
            if flags.split(',').any(|flag| flag.trim() == "fuzzy") {
                parser.current.fuzzy = true;
            }
        } else if trimmed.starts_with('#') {
            parser.finish_translated(line)?;
        } else if trimmed.starts_with('"') {
            parser.continuation(line, &unquote(trimmed, line)?)?;
        } else {
            let (field, rest) = split_keyword(trimmed, line)?;
            parser.keyword(line, field, unquote(rest, line)?)?;
        }
    }

    let last = text.lines().count() + 1;
    parser.finish(last)?;
    Ok(parser.entries)
}

fn split_keyword(line: &str, number: usize) -> Result<(Field, &str), PoParseError> {
    let (keyword, rest) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| PoParseError::new(number, format!("unexpected line '{line}'")))?;
    let rest = rest.trim_start();

    let field = match keyword {
        "msgctxt" => Field::Context,
        "msgid" => Field::Id,
        "msgid_plural" => Field::IdPlural,
        "msgstr" => Field::Str(0),
        _ => {
            let index = keyword
                .strip_prefix("msgstr[")
                .and_then(|s| s.strip_suffix(']'))
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| PoParseError::new(number, format!("unknown keyword '{keyword}'")))?;
            Field::Str(index)
        }
    };
    Ok((field, rest))
}

/// `"a\"b\n"` -> `a"b` + newline
fn unquote(quoted: &str, line: usize) -> Result<String, PoParseError> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| PoParseError::new(line, format!("badly quoted string {quoted}")))?;

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '"' {
            return Err(PoParseError::new(line, "unescaped quote"));
        }
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => return Err(PoParseError::new(line, "unterminated string")),
        }
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    #[rstest]
    fn header_with_only_content_type() {
        let entries = parse_po(
            "msgid \"\"\nmsgstr \"Content-Type: text/plain; charset=UTF-8\\n\"\n\nmsgid \"Search\"\nmsgstr \"Rechercher\"\n",
        )
        .unwrap();

        assert_that!(entries, len(eq(2)));
        assert_eq!(
            entries[0].msgstr,
            vec!["Content-Type: text/plain; charset=UTF-8\n".to_string()]
        );
        assert_eq!(entries[0].plain_translation(), None);
        assert_eq!(entries[1].plain_translation(), Some("Rechercher"));
    }

    #[rstest]
    fn file_without_header() {
        let entries = parse_po("msgid \"Search\"\nmsgstr \"Suchen\"").unwrap();

        assert_eq!(entries[0].msgid, "Search");
        assert_eq!(entries[0].plain_translation(), Some("Suchen"));
    }

    #[rstest]
    fn multiline_strings_and_escapes() {
        let entries = parse_po(
            "msgid \"\"\n\"Long \"\n\"key\"\nmsgstr \"\"\n\"Tab\\there, \\\"quoted\\\"\\n\"\n\"and \\\\ slash\"\n",
        )
        .unwrap();

        assert_eq!(entries[0].msgid, "Long key");
        assert_eq!(entries[0].msgstr[0], "Tab\there, \"quoted\"\nand \\ slash");
    }

    #[rstest]
    fn entries_without_blank_line_separator() {
        let entries =
            parse_po("msgid \"a\"\nmsgstr \"A\"\n#: src/page.html:3\nmsgid \"b\"\nmsgstr \"B\"\n")
                .unwrap();

        let ids: Vec<&str> = entries.iter().map(|e| e.msgid.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[rstest]
    fn flags_context_and_plurals() {
        let entries = parse_po(
            "#, fuzzy, python-format\nmsgid \"Fuzzy\"\nmsgstr \"Approx\"\n\n\
             msgctxt \"menu\"\nmsgid \"Open\"\nmsgstr \"Ouvrir\"\n\n\
             msgid \"page\"\nmsgid_plural \"pages\"\nmsgstr[0] \"page\"\nmsgstr[1] \"pages\"\n",
        )
        .unwrap();

        assert!(entries[0].fuzzy);
        assert_eq!(entries[1].msgctxt.as_deref(), Some("menu"));
        assert_eq!(entries[2].msgid_plural.as_deref(), Some("pages"));
        assert_that!(entries[2].msgstr, len(eq(2)));
        assert!(entries.iter().all(|e| e.plain_translation().is_none()));
    }

    #[rstest]
    fn obsolete_entries_are_ignored() {
        let entries =
            parse_po("#~ msgid \"Old\"\n#~ msgstr \"Vieux\"\n\nmsgid \"New\"\nmsgstr \"Neuf\"\n")
                .unwrap();

        assert_that!(entries, len(eq(1)));
        assert_eq!(entries[0].msgid, "New");
    }

    #[rstest]
    #[case::missing_msgstr("msgid \"a\"\n\nmsgid \"b\"\nmsgstr \"B\"\n", 2)]
    #[case::missing_msgstr_at_end("msgid \"a\"\n", 2)]
    #[case::unknown_keyword("msgid \"a\"\nmsgtxt \"A\"\n", 2)]
    #[case::unterminated("msgid \"a\nmsgstr \"A\"\n", 1)]
    #[case::stray_continuation("\"orphan\"\n", 1)]
    #[case::plural_out_of_order("msgid \"a\"\nmsgid_plural \"as\"\nmsgstr[1] \"A\"\n", 3)]
    fn malformed_input(#[case] text: &str, #[case] line: usize) {
        let error = parse_po(text).unwrap_err();

        assert_eq!(error.line, line);
    }
}

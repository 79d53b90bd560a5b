// The MIT License (MIT)

// Copyright (c) 2014 Y. T. CHUNG

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! INI serializer
//!
//! Output is always readable back by [`Document::load_from_str`] with the
//! default [`ParseOption`](crate::ParseOption), as long as the escape policy is
//! not [`EscapePolicy::Nothing`].

use std::{
    fmt,
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
};

use tracing::debug;

use crate::document::Document;

/// Policies for escaping logic
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EscapePolicy {
    /// Escape absolutely nothing (dangerous)
    Nothing,
    /// Only escape the most necessary things.
    /// This means backslashes, control characters (codepoints U+0000 to U+001F), and delete (U+007F).
    /// Quotes (single or double) are not escaped.
    Basics,
    /// Escape basics and non-ASCII characters in the [Basic Multilingual Plane](https://www.compart.com/en/unicode/plane)
    /// (i.e. between U+007F - U+FFFF)
    BasicsUnicode,
    /// Escape reserved symbols.
    /// This includes everything in EscapePolicy::Basics, plus the comment characters ';' and '#' and the key/value-separating characters '=' and ':'.
    Reserved,
    /// Escape reserved symbols and non-ASCII characters in the BMP.
    ReservedUnicode,
}

impl EscapePolicy {
    fn escape_basics(self) -> bool {
        self != EscapePolicy::Nothing
    }

    fn escape_reserved(self) -> bool {
        matches!(self, EscapePolicy::Reserved | EscapePolicy::ReservedUnicode)
    }

    fn escape_unicode(self) -> bool {
        matches!(self, EscapePolicy::BasicsUnicode | EscapePolicy::ReservedUnicode)
    }

    /// Keys end at the first unescaped '=' or ':', so they always need the reserved set
    fn for_keys(self) -> EscapePolicy {
        match self {
            EscapePolicy::Basics => EscapePolicy::Reserved,
            EscapePolicy::BasicsUnicode => EscapePolicy::ReservedUnicode,
            p => p,
        }
    }

    /// Given a character this returns true if it should be escaped as
    /// per this policy or false if not.
    pub fn should_escape(self, c: char) -> bool {
        match c {
            // ASCII control characters, U+0000 NUL..= U+001F UNIT SEPARATOR, or U+007F DELETE
            '\\' | '\x00'..='\x1f' | '\x7f' => self.escape_basics(),
            ';' | '#' | '=' | ':' => self.escape_reserved(),
            '\u{0080}'..='\u{FFFF}' => self.escape_unicode(),
            _ => false,
        }
    }
}

// Escape non-INI characters
//
// Common escape sequences: https://en.wikipedia.org/wiki/INI_file#Escape_characters
//
// * `\\` \ (a single backslash, escaping the escape character)
// * `\0` Null character
// * `\a` Bell/Alert/Audible
// * `\b` Backspace, Bell character for some applications
// * `\t` Tab character
// * `\r` Carriage return
// * `\n` Line feed
// * `\;` Semicolon
// * `\#` Number sign
// * `\=` Equals sign
// * `\:` Colon
// * `\x????` Unicode character with hexadecimal code point corresponding to ????
fn escape_str(s: &str, policy: EscapePolicy) -> String {
    let mut escaped: String = String::with_capacity(s.len());
    for c in s.chars() {
        if !policy.should_escape(c) {
            escaped.push(c);
            continue;
        }

        match c {
            '\\' => escaped.push_str("\\\\"),
            '\0' => escaped.push_str("\\0"),
            '\x01'..='\x06' | '\x0e'..='\x1f' | '\x7f'..='\u{FFFF}' => {
                escaped.push_str(&format!("\\x{:04x}", c as u32));
            }
            '\x07' => escaped.push_str("\\a"),
            '\x08' => escaped.push_str("\\b"),
            '\x0c' => escaped.push_str("\\f"),
            '\x0b' => escaped.push_str("\\v"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            _ => {
                escaped.push('\\');
                escaped.push(c);
            }
        }
    }
    escaped
}

fn escape_section(name: &str, policy: EscapePolicy) -> String {
    let escaped = escape_str(name, policy);
    if policy.escape_basics() {
        escaped.replace(']', "\\]")
    } else {
        escaped
    }
}

fn escape_key(key: &str, policy: EscapePolicy) -> String {
    let policy = policy.for_keys();
    let escaped = escape_str(key, policy);
    // A key starting with '[' would be read back as a section header
    if policy.escape_basics() && escaped.starts_with('[') {
        format!("\\{}", escaped)
    } else {
        escaped
    }
}

/// Section and key names are trimmed by the parser, so names with edge
/// whitespace (and blank keys) cannot be written back faithfully
fn check_names(doc: &Document) -> io::Result<()> {
    let edge_whitespace = |s: &str| s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace);

    for (section, props) in doc {
        if let Some(name) = section.filter(|name| edge_whitespace(*name)) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("section name {:?} starts or ends with whitespace", name),
            ));
        }
        if let Some((key, _)) = props.iter().find(|(k, _)| k.is_empty() || edge_whitespace(*k)) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("key {:?} is blank or starts or ends with whitespace", key),
            ));
        }
    }
    Ok(())
}

/// Values the parser would trim or unquote are written inside double quotes
fn needs_quote(value: &str) -> bool {
    let edge_whitespace = value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace);
    let leading_quote = value.starts_with(['"', '\'']);
    let comment_char = cfg!(feature = "inline-comment") && value.contains(['#', ';']);
    edge_whitespace || leading_quote || comment_char
}

fn escape_value(value: &str, policy: EscapePolicy) -> String {
    let escaped = escape_str(value, policy);
    if policy.escape_basics() && needs_quote(value) {
        format!("\"{}\"", escaped.replace('"', "\\\""))
    } else {
        escaped
    }
}

/// Newline style
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LineSeparator {
    /// System-dependent line separator
    ///
    /// On UNIX system, uses "\n"
    /// On Windows system, uses "\r\n"
    SystemDefault,

    /// Uses "\n" as new line separator
    CR,

    /// Uses "\r\n" as new line separator
    CRLF,
}

#[cfg(not(windows))]
static DEFAULT_LINE_SEPARATOR: &str = "\n";

#[cfg(windows)]
static DEFAULT_LINE_SEPARATOR: &str = "\r\n";

static DEFAULT_KV_SEPARATOR: &str = "=";

impl fmt::Display for LineSeparator {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.as_str())
    }
}

impl LineSeparator {
    /// String representation
    pub fn as_str(self) -> &'static str {
        match self {
            LineSeparator::SystemDefault => DEFAULT_LINE_SEPARATOR,
            LineSeparator::CR => "\n",
            LineSeparator::CRLF => "\r\n",
        }
    }
}

/// Writing configuration
#[derive(Debug, Clone)]
pub struct WriteOption {
    /// Policies about how to escape characters
    pub escape_policy: EscapePolicy,

    /// Newline style
    pub line_separator: LineSeparator,

    /// Key value separator
    pub kv_separator: &'static str,
}

impl Default for WriteOption {
    fn default() -> WriteOption {
        WriteOption {
            escape_policy: EscapePolicy::Basics,
            line_separator: LineSeparator::SystemDefault,
            kv_separator: DEFAULT_KV_SEPARATOR,
        }
    }
}

impl Document {
    /// Write to a file, replacing its content
    pub fn write_to_file<P: AsRef<Path>>(&self, filename: P) -> io::Result<()> {
        self.write_to_file_opt(filename, Default::default())
    }

    /// Write to a file with options, replacing its content
    pub fn write_to_file_opt<P: AsRef<Path>>(&self, filename: P, opt: WriteOption) -> io::Result<()> {
        // Before truncating
        check_names(self)?;
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(filename.as_ref())?;
        self.write_to_opt(&mut file, opt)?;
        file.flush()?;
        debug!(path = %filename.as_ref().display(), sections = self.len(), "saved ini document");
        Ok(())
    }

    /// Write to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.write_to_opt(writer, Default::default())
    }

    /// Write to a writer with options
    pub fn write_to_opt<W: Write>(&self, writer: &mut W, opt: WriteOption) -> io::Result<()> {
        check_names(self)?;
        let mut firstline = true;

        for (section, props) in self {
            if !props.is_empty() {
                if firstline {
                    firstline = false;
                } else {
                    // Write an empty line between sections
                    writer.write_all(opt.line_separator.as_str().as_bytes())?;
                }
            }

            if let Some(section) = section {
                write!(
                    writer,
                    "[{}]{}",
                    escape_section(section, opt.escape_policy),
                    opt.line_separator
                )?;
            }
            for (k, v) in props {
                let k_str = escape_key(k, opt.escape_policy);
                let v_str = escape_value(v, opt.escape_policy);
                write!(writer, "{}{}{}{}", k_str, opt.kv_separator, v_str, opt.line_separator)?;
            }
        }
        Ok(())
    }
}

// ------------------------------------------------------------------------------

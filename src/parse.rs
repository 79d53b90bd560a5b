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

//! INI parser

use std::{
    borrow::Cow,
    char,
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::Path,
    str::Chars,
};

use tracing::{debug, trace};

use crate::{
    document::Document,
    error::{Error, ParseError},
};

/// Parsing configuration
#[derive(Debug, Clone)]
pub struct ParseOption {
    /// Allow quote (`"` or `'`) in value
    /// For example
    /// ```ini
    /// [Section]
    /// Key1="Quoted value"
    /// Key2='Single Quote' with extra value
    /// ```
    ///
    /// In this example, Value of `Key1` is `Quoted value`,
    /// and value of `Key2` is `Single Quote with extra value`
    /// if `enabled_quote` is set to `true`.
    pub enabled_quote: bool,

    /// Interpret `\` as an escape character
    /// For example
    /// ```ini
    /// [Section]
    /// Key1=C:\Windows
    /// ```
    ///
    /// If `enabled_escape` is true, then the value of `Key` will become `C:Windows` (`\W` equals to `W`).
    pub enabled_escape: bool,

    /// Enables values that span lines
    /// ```ini
    /// [Section]
    /// foo=
    ///   b
    ///   c
    /// ```
    pub enabled_indented_multiline_value: bool,
}

impl Default for ParseOption {
    fn default() -> ParseOption {
        ParseOption {
            enabled_quote: true,
            enabled_escape: true,
            enabled_indented_multiline_value: false,
        }
    }
}

impl Document {
    /// Load from a string
    pub fn load_from_str(buf: &str) -> Result<Document, ParseError> {
        Document::load_from_str_opt(buf, ParseOption::default())
    }

    /// Load from a string with options
    pub fn load_from_str_opt(buf: &str, opt: ParseOption) -> Result<Document, ParseError> {
        let mut parser = Parser::new(buf.chars(), opt);
        parser.parse()
    }

    /// Load from a reader with options
    pub fn read_from_opt<R: Read>(reader: &mut R, opt: ParseOption) -> Result<Document, Error> {
        let mut s = String::new();
        reader.read_to_string(&mut s)?;
        Ok(Document::load_from_str_opt(&s, opt)?)
    }

    /// Load from a file
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> Result<Document, Error> {
        Document::load_from_file_opt(filename, ParseOption::default())
    }

    /// Load from a file with options, skipping a leading UTF-8 BOM
    pub fn load_from_file_opt<P: AsRef<Path>>(filename: P, opt: ParseOption) -> Result<Document, Error> {
        let mut reader = File::open(filename.as_ref())?;

        // UTF-8: EF BB BF
        let mut bom = [0u8; 3];
        let with_bom = reader.read_exact(&mut bom).is_ok() && &bom == b"\xEF\xBB\xBF";
        if !with_bom {
            reader.seek(SeekFrom::Start(0))?;
        }

        let doc = Document::read_from_opt(&mut reader, opt)?;
        debug!(
            path = %filename.as_ref().display(),
            with_bom,
            sections = doc.len(),
            "loaded ini document"
        );
        Ok(doc)
    }
}

// Ini parser
struct Parser<'a> {
    ch: Option<char>,
    rdr: Chars<'a>,
    line: usize,
    col: usize,
    opt: ParseOption,
}

impl<'a> Parser<'a> {
    fn new(rdr: Chars<'a>, opt: ParseOption) -> Parser<'a> {
        let mut p = Parser {
            ch: None,
            line: 0,
            col: 0,
            rdr,
            opt,
        };
        p.bump();
        p
    }

    fn bump(&mut self) {
        self.ch = self.rdr.next();
        match self.ch {
            Some('\n') => {
                self.line += 1;
                self.col = 0;
            }
            Some(..) => {
                self.col += 1;
            }
            None => {}
        }
    }

    #[cold]
    #[inline(never)]
    fn error<U, M: Into<Cow<'static, str>>>(&self, msg: M) -> Result<U, ParseError> {
        Err(ParseError {
            line: self.line + 1,
            col: self.col + 1,
            msg: msg.into(),
        })
    }

    #[cold]
    fn eof_error(&self, expecting: &[Option<char>]) -> Result<char, ParseError> {
        self.error(format!("expecting \"{:?}\" but found EOF.", expecting))
    }

    fn char_or_eof(&self, expecting: &[Option<char>]) -> Result<char, ParseError> {
        match self.ch {
            Some(ch) => Ok(ch),
            None => self.eof_error(expecting),
        }
    }

    fn parse_whitespace(&mut self) {
        while let Some(c) = self.ch {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn parse_whitespace_except_line_break(&mut self) {
        while let Some(c) = self.ch {
            if c == '\n' || c == '\r' || !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    /// Parse the whole INI input
    fn parse(&mut self) -> Result<Document, ParseError> {
        let mut result = Document::new();
        let mut curkey: String = "".into();
        let mut cursec: Option<String> = None;
        // Line of the last section header, the only token a comment can follow on its line
        let mut header_line: Option<usize> = None;

        self.parse_whitespace();
        while let Some(cur_ch) = self.ch {
            match cur_ch {
                ';' | '#' => {
                    // Without inline comments, a comment must start a line
                    //
                    // https://en.wikipedia.org/wiki/INI_file#Comments
                    if cfg!(not(feature = "inline-comment")) && header_line == Some(self.line) {
                        return self.error("doesn't support inline comment");
                    }

                    self.parse_comment();
                }
                '[' => {
                    let sec = self.parse_section()?;
                    let sec = sec.trim().to_owned();
                    header_line = Some(self.line);
                    trace!(section = %sec, line = self.line + 1, "section header");
                    // A repeated header reopens the section it names
                    result.section_or_insert(Some(sec.clone()));
                    cursec = Some(sec);
                }
                '=' | ':' => {
                    if curkey.is_empty() {
                        return self.error("missing key");
                    }
                    let mval = self.parse_val()?;
                    result.set_to(cursec.clone(), std::mem::take(&mut curkey), mval);
                }
                _ => {
                    let mkey = self.parse_key()?;
                    if !matches!(self.ch, Some('=') | Some(':')) {
                        return self.error(format!("missing '=' or ':' after key \"{}\"", mkey.trim()));
                    }
                    curkey = mkey.trim().to_owned();
                }
            }

            self.parse_whitespace();
        }

        Ok(result)
    }

    fn parse_comment(&mut self) {
        while let Some(c) = self.ch {
            self.bump();
            if c == '\n' {
                break;
            }
        }
    }

    fn parse_str_until(&mut self, endpoint: &[Option<char>], check_inline_comment: bool) -> Result<String, ParseError> {
        let mut result: String = String::new();

        let mut in_line_continuation = false;

        while !endpoint.contains(&self.ch) {
            match self.char_or_eof(endpoint)? {
                #[cfg(feature = "inline-comment")]
                ch if check_inline_comment && (ch == ' ' || ch == '\t') => {
                    self.bump();

                    match self.ch {
                        Some('#') | Some(';') => {
                            // [space]#, [space]; starts an inline comment
                            self.parse_comment();
                            if in_line_continuation {
                                result.push(ch);
                                continue;
                            } else {
                                break;
                            }
                        }
                        Some(_) => {
                            result.push(ch);
                            continue;
                        }
                        None => {
                            result.push(ch);
                        }
                    }
                }
                #[cfg(feature = "inline-comment")]
                ch if check_inline_comment && in_line_continuation && (ch == '#' || ch == ';') => {
                    self.parse_comment();
                    continue;
                }
                '\\' => {
                    self.bump();
                    let Some(ch) = self.ch else {
                        result.push('\\');
                        continue;
                    };

                    if ch == '\n' {
                        in_line_continuation = true;
                    } else if self.opt.enabled_escape {
                        match ch {
                            '0' => result.push('\0'),
                            'a' => result.push('\x07'),
                            'b' => result.push('\x08'),
                            'f' => result.push('\x0c'),
                            'v' => result.push('\x0b'),
                            't' => result.push('\t'),
                            'r' => result.push('\r'),
                            'n' => result.push('\n'),
                            'x' => {
                                // Unicode 4 character
                                let mut code: String = String::with_capacity(4);
                                for _ in 0..4 {
                                    self.bump();
                                    let ch = self.char_or_eof(endpoint)?;
                                    code.push(ch);
                                }
                                let r = u32::from_str_radix(&code[..], 16);
                                match r.ok().and_then(char::from_u32) {
                                    Some(ch) => result.push(ch),
                                    None => return self.error("unknown character in \\xHHHH form"),
                                }
                            }
                            c => result.push(c),
                        }
                    } else {
                        result.push('\\');
                        result.push(ch);
                    }
                }
                ch => result.push(ch),
            }
            self.bump();
        }

        let _ = check_inline_comment;
        let _ = in_line_continuation;

        Ok(result)
    }

    fn parse_section(&mut self) -> Result<String, ParseError> {
        // Skip [
        self.bump();
        let sec = self.parse_str_until(&[Some(']')], false)?;
        if let Some(']') = self.ch {
            self.bump();
        }

        #[cfg(feature = "inline-comment")]
        {
            self.parse_whitespace_except_line_break();
            if matches!(self.ch, Some('#') | Some(';')) {
                self.parse_comment();
            }
        }

        Ok(sec)
    }

    /// Parse a key name until '=' or ':', stopping at the end of the line
    fn parse_key(&mut self) -> Result<String, ParseError> {
        self.parse_str_until(&[Some('='), Some(':'), Some('\n'), Some('\r'), None], false)
    }

    fn parse_val(&mut self) -> Result<String, ParseError> {
        self.bump();
        // Allow empty value
        self.parse_whitespace_except_line_break();

        let mut val = String::new();
        let mut val_first_part = true;
        'parse_value_line_loop: loop {
            match self.ch {
                // EOF. Just break
                None => break,

                // Double Quoted
                Some('"') if self.opt.enabled_quote => {
                    self.bump();
                    let quoted_val = self.parse_str_until(&[Some('"')], false)?;
                    val.push_str(&quoted_val);

                    // Eats the "
                    self.bump();

                    // characters after " are still part of the value line
                    val_first_part = false;
                    continue;
                }

                // Single Quoted
                Some('\'') if self.opt.enabled_quote => {
                    self.bump();
                    let quoted_val = self.parse_str_until(&[Some('\'')], false)?;
                    val.push_str(&quoted_val);

                    // Eats the '
                    self.bump();

                    val_first_part = false;
                    continue;
                }

                // Standard value string
                _ => {
                    // Parse until EOL. White spaces are trimmed (both start and end)
                    let standard_val = self.parse_str_until_eol(cfg!(feature = "inline-comment"))?;

                    let trimmed_value = if val_first_part {
                        standard_val.trim()
                    } else {
                        standard_val.trim_end()
                    };
                    val_first_part = false;

                    val.push_str(trimmed_value);

                    if !self.opt.enabled_indented_multiline_value {
                        break;
                    }

                    // A following line starting with ' ' or '\t' continues the value
                    self.bump();
                    loop {
                        match self.ch {
                            Some(' ') | Some('\t') => {
                                self.parse_whitespace_except_line_break();
                                val.push('\n');
                                continue 'parse_value_line_loop;
                            }

                            Some('\r') => {
                                // Probably \r\n, try to eat one more
                                self.bump();
                                if self.ch == Some('\n') {
                                    self.bump();
                                    val.push('\n');
                                } else {
                                    return self.error("\\r is not followed by \\n");
                                }
                            }

                            Some('\n') => {
                                self.bump();
                                val.push('\n');
                            }

                            _ => break 'parse_value_line_loop,
                        }
                    }
                }
            }
        }

        if self.opt.enabled_indented_multiline_value {
            trim_line_feeds(&mut val);
        }

        Ok(val)
    }

    #[inline]
    fn parse_str_until_eol(&mut self, check_inline_comment: bool) -> Result<String, ParseError> {
        self.parse_str_until(&[Some('\n'), Some('\r'), None], check_inline_comment)
    }
}

fn trim_line_feeds(string: &mut String) {
    const LF: char = '\n';
    string.truncate(string.trim_end_matches(LF).len());
    string.drain(..(string.len() - string.trim_start_matches(LF).len()));
}

// ------------------------------------------------------------------------------

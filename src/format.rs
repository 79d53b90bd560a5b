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

//! Output of read results
//!
//! Plain mode prints `key=value`. Export mode prints a line a shell can
//! evaluate; which shell syntax is used depends on the target platform.

use std::io::{self, Write};

use cfg_if::cfg_if;

/// How read results are printed
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OutputMode {
    /// `key=value`
    Plain,
    /// Shell variable assignment, see [`export_line`]
    Export,
}

/// Stateless printer for read results
#[derive(Debug, Copy, Clone)]
pub struct Formatter {
    mode: OutputMode,
    show_section: bool,
}

impl Formatter {
    pub fn new(show_section: bool, show_export: bool) -> Formatter {
        let mode = if show_export {
            OutputMode::Export
        } else {
            OutputMode::Plain
        };
        Formatter { mode, show_section }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Write the `[section]` line if requested
    ///
    /// Nothing is written in export mode or for the general section.
    pub fn section_header<W: Write>(&self, out: &mut W, section: &str) -> io::Result<()> {
        if self.show_section && self.mode == OutputMode::Plain && !section.is_empty() {
            writeln!(out, "[{}]", section)?;
        }
        Ok(())
    }

    pub fn property<W: Write>(&self, out: &mut W, key: &str, value: &str) -> io::Result<()> {
        match self.mode {
            OutputMode::Plain => writeln!(out, "{}={}", key, value),
            OutputMode::Export => writeln!(out, "{}", export_line(key, value)),
        }
    }
}

cfg_if! {
    if #[cfg(windows)] {
        /// `setx KEY "value"`
        pub fn export_line(key: &str, value: &str) -> String {
            format!("setx {} {}", key, quote(value, false))
        }
    } else {
        /// `export KEY="value"`
        pub fn export_line(key: &str, value: &str) -> String {
            format!("export {}={}", key, quote(value, true))
        }
    }
}

/// Double-quote `value`, escaping what would end or alter the quoted string
///
/// With `posix`, `$` and `` ` `` are escaped too so sourcing the line does not expand them.
fn quote(value: &str, posix: bool) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '$' | '`' if posix => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

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

//! Operation requests parsed from `--read` and `--write` arguments
//!
//! Names split on the first `.`, assignments then on the first `=`. An empty
//! section name addresses the general section.

use std::str::FromStr;

use crate::error::CommandError;

/// What `--read` asks for: a whole section or one key of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadTarget {
    pub section: String,
    pub key: Option<String>,
}

/// What `--write` asks for: `section.key=value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub section: String,
    pub key: String,
    pub value: String,
}

/// The single operation of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Read(ReadTarget),
    Write(Assignment),
}

/// Name that addresses the general section, besides the empty name
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Section name as stored in a [`Document`](crate::Document), `None` for the general section
pub fn section_key(name: &str) -> Option<&str> {
    if name.is_empty() || name == DEFAULT_SECTION {
        None
    } else {
        Some(name)
    }
}

/// The parser trims names, so edge whitespace would not survive a reload
fn check_name(name: &str) -> Result<(), CommandError> {
    if name.starts_with(char::is_whitespace) || name.ends_with(char::is_whitespace) {
        return Err(CommandError::Usage(format!(
            "Invalid name '{}': section and key names cannot start or end with whitespace",
            name
        )));
    }
    Ok(())
}

impl ReadTarget {
    pub fn section_key(&self) -> Option<&str> {
        section_key(&self.section)
    }
}

impl Assignment {
    pub fn section_key(&self) -> Option<&str> {
        section_key(&self.section)
    }
}

impl FromStr for ReadTarget {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<ReadTarget, CommandError> {
        if s.is_empty() {
            return Err(CommandError::Usage(
                "Invalid format. Use <section> or <section>.<key>".to_owned(),
            ));
        }

        let target = match s.split_once('.') {
            Some((section, key)) => ReadTarget {
                section: section.to_owned(),
                key: Some(key.to_owned()),
            },
            None => ReadTarget {
                section: s.to_owned(),
                key: None,
            },
        };
        Ok(target)
    }
}

impl FromStr for Assignment {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Assignment, CommandError> {
        let (section, rest) = s.split_once('.').ok_or_else(CommandError::invalid_write)?;
        let (key, value) = rest.split_once('=').ok_or_else(CommandError::invalid_write)?;
        if key.trim().is_empty() {
            return Err(CommandError::invalid_write());
        }
        check_name(section)?;
        check_name(key)?;

        Ok(Assignment {
            section: section.to_owned(),
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}

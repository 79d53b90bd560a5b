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

use std::{borrow::Cow, io, path::PathBuf};

/// Parse error
#[derive(Debug, thiserror::Error)]
#[error("{line}:{col} {msg}")]
pub struct ParseError {
    pub line: usize,
    pub col: usize,
    pub msg: Cow<'static, str>,
}

/// Error while loading an INI document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Failures of a single `inictl` invocation
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("--file is required")]
    MissingFile,

    #[error("Cannot use --read and --write together.")]
    ConflictingRequests,

    #[error("{0}")]
    Usage(String),

    #[error("Failed to read INI file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Error,
    },

    #[error("Section [{0}] not found")]
    SectionNotFound(String),

    #[error("Key '{key}' not found in section [{section}]")]
    KeyNotFound { key: String, section: String },

    #[error("Failed to save INI file {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CommandError {
    /// Whether the usage line should follow the message
    pub fn shows_usage(&self) -> bool {
        matches!(self, CommandError::MissingFile | CommandError::ConflictingRequests)
    }

    pub(crate) fn invalid_write() -> CommandError {
        CommandError::Usage("Invalid format. Use <section>.<key>=<value>".to_owned())
    }
}

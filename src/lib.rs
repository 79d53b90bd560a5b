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

//! Command-line access to INI configuration files
//!
//! The library half is an ordered INI document with its parser and
//! serializer. The binary reads one key or a whole section, or writes one
//! `section.key=value` pair back to disk.
//!
//! ```no_run
//! use inictl::Document;
//!
//! let mut conf = Document::new();
//! conf.set_to(Some("User"), "name", "Raspberry树莓");
//! conf.set_to(Some("Library"), "location", "Guangzhou=world");
//! conf.write_to_file("conf.ini").unwrap();
//!
//! let i = Document::load_from_file("conf.ini").unwrap();
//! for (sec, prop) in &i {
//!     println!("Section: {:?}", sec);
//!     for (k, v) in prop {
//!         println!("{}:{}", k, v);
//!     }
//! }
//! ```

pub mod cli;
pub mod command;
mod document;
mod error;
pub mod format;
mod parse;
pub mod request;
mod write;

pub use crate::{
    document::{Document, PropertyIter, Section, SectionIter, SectionKey},
    error::{CommandError, Error, ParseError},
    parse::ParseOption,
    write::{EscapePolicy, LineSeparator, WriteOption},
};

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

//! Load, read and write operations of one invocation

use std::{io::Write, path::Path};

use tracing::debug;

use crate::{
    cli::Invocation,
    document::Document,
    error::{CommandError, Error},
    format::Formatter,
    request::{Assignment, ReadTarget, Request},
};

/// Load `path`, or start from an empty document if it does not exist
pub fn load_document(path: &Path) -> Result<Document, CommandError> {
    let load_error = |source: Error| CommandError::Load {
        path: path.to_owned(),
        source,
    };

    if !path.try_exists().map_err(|e| load_error(e.into()))? {
        debug!(path = %path.display(), "file does not exist, starting empty");
        return Ok(Document::new());
    }

    Document::load_from_file(path).map_err(load_error)
}

/// Set the key, save the whole document to `path` and confirm on `out`
pub fn write_value<W: Write>(
    doc: &mut Document,
    path: &Path,
    assignment: &Assignment,
    out: &mut W,
) -> Result<(), CommandError> {
    let previous = doc.set_to(
        assignment.section_key(),
        assignment.key.as_str(),
        assignment.value.as_str(),
    );
    debug!(
        section = %assignment.section,
        key = %assignment.key,
        replaced = previous.is_some(),
        "set value"
    );

    doc.write_to_file(path).map_err(|source| CommandError::Save {
        path: path.to_owned(),
        source,
    })?;

    writeln!(
        out,
        "Updated [{}] {}={}",
        assignment.section, assignment.key, assignment.value
    )
    .map_err(CommandError::Output)
}

/// Print one key, or every key of a section in stored order
pub fn read_value<W: Write>(
    doc: &Document,
    target: &ReadTarget,
    formatter: &Formatter,
    out: &mut W,
) -> Result<(), CommandError> {
    let section = doc
        .section(target.section_key())
        .ok_or_else(|| CommandError::SectionNotFound(target.section.clone()))?;

    formatter
        .section_header(out, &target.section)
        .map_err(CommandError::Output)?;

    match target.key {
        None => {
            for (key, value) in section {
                formatter.property(out, key, value).map_err(CommandError::Output)?;
            }
        }
        Some(ref key) => {
            let value = section.get(key).ok_or_else(|| CommandError::KeyNotFound {
                key: key.clone(),
                section: target.section.clone(),
            })?;
            formatter.property(out, key, value).map_err(CommandError::Output)?;
        }
    }
    Ok(())
}

/// Run a validated invocation, printing results to `out`
pub fn run<W: Write>(invocation: &Invocation, out: &mut W) -> Result<(), CommandError> {
    let mut doc = load_document(&invocation.file)?;

    match invocation.request {
        Some(Request::Write(ref assignment)) => write_value(&mut doc, &invocation.file, assignment, out),
        Some(Request::Read(ref target)) => read_value(&doc, target, &invocation.formatter, out),
        None => Ok(()),
    }
}

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

//! Command line arguments

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::{
    error::CommandError,
    format::Formatter,
    request::{Assignment, ReadTarget, Request},
};

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "inictl",
    version,
    about = "Read a key or a whole section of an INI file, or write one key",
    override_usage = "inictl --file <INI_FILE> [--read <SECTION[.KEY]> | --write <SECTION.KEY=VALUE>] [--show-section] [--show-export]"
)]
pub struct Cli {
    /// INI file to process. Created on write if it does not exist
    #[arg(long, value_name = "INI_FILE", env = "INICTL_FILE")]
    pub file: Option<PathBuf>,

    /// Section or section.key to read
    #[arg(long, value_name = "SECTION[.KEY]")]
    pub read: Option<String>,

    /// section.key=value to write
    #[arg(long, value_name = "SECTION.KEY=VALUE")]
    pub write: Option<String>,

    /// Print a [section] line before the keys when reading
    #[arg(long)]
    pub show_section: bool,

    /// Print shell assignments instead of key=value
    #[arg(long)]
    pub show_export: bool,
}

/// A validated invocation
#[derive(Debug, Clone)]
pub struct Invocation {
    pub file: PathBuf,
    pub request: Option<Request>,
    pub formatter: Formatter,
}

impl Cli {
    /// Check flag combinations and parse the request arguments
    ///
    /// Nothing here touches the file system.
    pub fn validate(self) -> Result<Invocation, CommandError> {
        let file = match self.file {
            Some(file) if !file.as_os_str().is_empty() => file,
            _ => return Err(CommandError::MissingFile),
        };

        let request = match (self.read, self.write) {
            (Some(_), Some(_)) => return Err(CommandError::ConflictingRequests),
            (Some(read), None) => Some(Request::Read(read.parse::<ReadTarget>()?)),
            (None, Some(write)) => Some(Request::Write(write.parse::<Assignment>()?)),
            (None, None) => None,
        };

        Ok(Invocation {
            file,
            request,
            formatter: Formatter::new(self.show_section, self.show_export),
        })
    }
}

/// The usage line printed when the flags are unusable
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::format::OutputMode;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("inictl").chain(args.iter().copied())).expect("parse should succeed")
    }

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn read_request() {
        let inv = parse(&["--file", "conf.ini", "--read", "db.host"]).validate().unwrap();
        assert_eq!(inv.file, PathBuf::from("conf.ini"));
        assert_eq!(
            inv.request,
            Some(Request::Read(ReadTarget {
                section: "db".into(),
                key: Some("host".into()),
            }))
        );
        assert_eq!(inv.formatter.mode(), OutputMode::Plain);
    }

    #[test]
    fn write_request() {
        let inv = parse(&["--file", "conf.ini", "--write", "db.host=localhost", "--show-export"])
            .validate()
            .unwrap();
        assert_eq!(
            inv.request,
            Some(Request::Write(Assignment {
                section: "db".into(),
                key: "host".into(),
                value: "localhost".into(),
            }))
        );
        assert_eq!(inv.formatter.mode(), OutputMode::Export);
    }

    #[test]
    fn file_only_has_no_request() {
        let inv = parse(&["--file", "conf.ini"]).validate().unwrap();
        assert_eq!(inv.request, None);
    }

    #[test]
    fn missing_file() {
        let cli = Cli {
            read: Some("db".into()),
            ..Default::default()
        };
        assert!(matches!(cli.validate(), Err(CommandError::MissingFile)));

        let cli = Cli {
            file: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(matches!(cli.validate(), Err(CommandError::MissingFile)));
    }

    #[test]
    fn read_and_write_conflict() {
        let err = parse(&["--file", "conf.ini", "--read", "db", "--write", "db.k=v"])
            .validate()
            .unwrap_err();
        assert!(matches!(err, CommandError::ConflictingRequests));
        assert!(err.shows_usage());
    }

    #[test]
    fn malformed_write() {
        let err = parse(&["--file", "conf.ini", "--write", "db.host"]).validate().unwrap_err();
        assert!(matches!(err, CommandError::Usage(_)));
        assert!(!err.shows_usage());
    }

    #[test]
    fn usage_mentions_flags() {
        let usage = usage();
        assert!(usage.contains("--file <INI_FILE>"));
        assert!(usage.contains("--write"));
    }
}

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

use std::{io, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use inictl::{cli::Cli, command, CommandError};

fn main() -> ExitCode {
    // Logs go to stderr, stdout carries the values. Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Nowhere left to report a failed print
            e.print().ok();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    let result = cli.validate().and_then(|invocation| {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        command::run(&invocation, &mut out)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::MissingFile) => {
            println!("{}", inictl::cli::usage());
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            if err.shows_usage() {
                println!("{}", inictl::cli::usage());
            }
            ExitCode::FAILURE
        }
    }
}

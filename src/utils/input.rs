//! Input utilities for interactive prompts
//!
//! Prompts read a single whitespace-delimited token per line. An empty line
//! means "keep what is there", so every read takes the value to fall back on.

use std::io::{self, BufRead};

/// Source of operator answers for the configuration prompts.
pub trait TokenSource {
    /// Block until one line is available and return its first token, or
    /// `default` when the line holds no token.
    ///
    /// Running out of input is an error: there is nobody left to answer.
    fn read_token(&mut self, default: &str) -> io::Result<String>;
}

/// Reads answers line by line from any buffered reader.
pub struct InputReader<R> {
    reader: R,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl InputReader<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> TokenSource for InputReader<R> {
    fn read_token(&mut self, default: &str) -> io::Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(first_token(&line)
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string()))
    }
}

fn first_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

/// Line-buffered keyboard input.
///
/// Reads whole lines and hands them out piecewise, the way a console
/// stream does:
///   - `read_key()`  — next non-whitespace character (typing `dd` queues two moves)
///   - `read_token()` — next whitespace-delimited word
///   - `discard_line()` — drop whatever is left of the current line
///
/// `Ok(None)` from either reader means end of input.

use std::collections::VecDeque;
use std::io::{self, BufRead};

pub trait InputSource {
    fn read_key(&mut self) -> io::Result<Option<char>>;
    fn read_token(&mut self) -> io::Result<Option<String>>;
    fn discard_line(&mut self);
}

pub struct LineInput<R: BufRead> {
    reader: R,
    /// Unconsumed characters of the current line, including its `\n`.
    pending: VecDeque<char>,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        LineInput {
            reader,
            pending: VecDeque::with_capacity(64),
        }
    }

    /// Pull the next line into `pending`. Returns false at end of input.
    fn refill(&mut self) -> io::Result<bool> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        if !line.ends_with('\n') {
            line.push('\n');
        }
        self.pending.extend(line.chars());
        Ok(true)
    }

    /// Skip whitespace, refilling across lines. False at end of input.
    fn skip_whitespace(&mut self) -> io::Result<bool> {
        loop {
            match self.pending.front() {
                Some(c) if c.is_whitespace() => {
                    self.pending.pop_front();
                }
                Some(_) => return Ok(true),
                None => {
                    if !self.refill()? {
                        return Ok(false);
                    }
                }
            }
        }
    }
}

impl LineInput<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        LineInput::new(io::stdin().lock())
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }
        Ok(self.pending.pop_front())
    }

    fn read_token(&mut self) -> io::Result<Option<String>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }
        let mut token = String::new();
        // The terminating whitespace stays queued so discard_line()
        // only ever drops the current line.
        while let Some(&c) = self.pending.front() {
            if c.is_whitespace() {
                break;
            }
            token.push(c);
            self.pending.pop_front();
        }
        Ok(Some(token))
    }

    fn discard_line(&mut self) {
        while let Some(c) = self.pending.pop_front() {
            if c == '\n' {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(text: &str) -> LineInput<&[u8]> {
        LineInput::new(text.as_bytes())
    }

    #[test]
    fn keys_skip_whitespace_across_lines() {
        let mut i = input("  d\n\n s \n");
        assert_eq!(i.read_key().unwrap(), Some('d'));
        assert_eq!(i.read_key().unwrap(), Some('s'));
        assert_eq!(i.read_key().unwrap(), None);
    }

    #[test]
    fn one_line_queues_several_keys() {
        let mut i = input("dds\n");
        assert_eq!(i.read_key().unwrap(), Some('d'));
        assert_eq!(i.read_key().unwrap(), Some('d'));
        assert_eq!(i.read_key().unwrap(), Some('s'));
    }

    #[test]
    fn tokens_split_on_whitespace() {
        let mut i = input("yes please\nY");
        assert_eq!(i.read_token().unwrap().as_deref(), Some("yes"));
        assert_eq!(i.read_token().unwrap().as_deref(), Some("please"));
        assert_eq!(i.read_token().unwrap().as_deref(), Some("Y"));
        assert_eq!(i.read_token().unwrap(), None);
    }

    #[test]
    fn discard_drops_rest_of_current_line_only() {
        let mut i = input("abc def\n7\n");
        assert_eq!(i.read_token().unwrap().as_deref(), Some("abc"));
        i.discard_line();
        assert_eq!(i.read_token().unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn discard_after_line_end_keeps_next_line() {
        let mut i = input("5\nw\n");
        assert_eq!(i.read_token().unwrap().as_deref(), Some("5"));
        i.discard_line();
        assert_eq!(i.read_key().unwrap(), Some('w'));
    }

    #[test]
    fn empty_input_is_end() {
        let mut i = input("");
        assert_eq!(i.read_key().unwrap(), None);
        assert_eq!(i.read_token().unwrap(), None);
    }
}

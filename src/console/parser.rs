//! Command line parser
//!
//! A line is `<verb>[ <argument>]`. The argument is everything after the
//! first space, kept whole (it may contain further spaces).

/// Parsed command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The complete line as received
    pub line: &'a str,
    /// Text before the first space
    pub verb: &'a str,
    /// Text after the first space; `Some("")` for a trailing space
    pub arg: Option<&'a str>,
}

impl<'a> ParsedCommand<'a> {
    /// Argument, if present and non-empty
    pub fn non_empty_arg(&self) -> Option<&'a str> {
        self.arg.filter(|a| !a.is_empty())
    }

    /// Argument read as a strictly positive integer.
    ///
    /// `None` when the argument is missing, non-numeric, zero or negative.
    pub fn positive_arg(&self) -> Option<u64> {
        self.arg.and_then(parse_positive)
    }
}

/// Split a command line into verb and argument
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    match line.split_once(' ') {
        Some((verb, arg)) => ParsedCommand {
            line,
            verb,
            arg: Some(arg),
        },
        None => ParsedCommand {
            line,
            verb: line,
            arg: None,
        },
    }
}

/// Lenient integer parse.
///
/// Leading blanks and an optional sign are accepted, digits are read up to
/// the first non-digit, and text without leading digits reads as 0. This
/// matches how firmware consoles usually read `p 250ms` or `P abc`.
pub fn parse_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

fn parse_positive(text: &str) -> Option<u64> {
    let value = parse_int(text);
    if value > 0 {
        Some(value as u64)
    } else {
        None
    }
}

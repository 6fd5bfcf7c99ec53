//! Safe literal entry.
//!
//! User input is only ever parsed as a JSON literal (number, string, array,
//! object, boolean, null). Nothing is evaluated.

use std::io::{self, BufRead, Write};

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LiteralError {
    #[error("no input")]
    Empty,

    #[error("not a valid literal: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal(Value);

impl Literal {
    /// Name of the value's type as shown to the user.
    pub fn kind(&self) -> &'static str {
        match &self.0 {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
            Value::Number(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl core::fmt::Display for Literal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

pub fn parse_literal(input: &str) -> Result<Literal, LiteralError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(LiteralError::Empty);
    }
    Ok(Literal(serde_json::from_str(input)?))
}

/// Ask for one literal on `input` and echo the result to `out`.
///
/// Parse failures are reported to `out`, not returned; only I/O errors are.
pub fn prompt_literal<R, W>(input: &mut R, out: &mut W) -> io::Result<Option<Literal>>
where
    R: BufRead,
    W: Write,
{
    writeln!(
        out,
        "Enter a JSON literal (number, string, array, object, true/false, null):"
    )?;
    write!(out, "> ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        writeln!(out, "No input received.")?;
        return Ok(None);
    }

    match parse_literal(&line) {
        Ok(literal) => {
            writeln!(out, "You entered: {literal} (type: {})", literal.kind())?;
            Ok(Some(literal))
        }
        Err(err) => {
            tracing::warn!(error = %err, "rejected literal input");
            writeln!(out, "Invalid input. Please enter a valid JSON literal.")?;
            Ok(None)
        }
    }
}

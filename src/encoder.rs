//! Byte-to-literal encoding

use base64::Engine;
use std::fmt::{self, Write};

/// Encoded characters per line in the escape scheme
pub const ESCAPE_LINE_WIDTH: usize = 80;
/// Encoded characters per line in the base64 scheme
pub const BASE64_LINE_WIDTH: usize = 60;
/// Soft line break for byte string literals. The compiler drops the
/// newline and any leading whitespace on the next line.
pub const LINE_CONTINUATION: &str = "\\\n";

/// Strategy for rendering container bytes as a Rust literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Scheme {
    /// Byte string literal (`b"..."`) with `\xHH` escapes
    #[default]
    Escape,
    /// Standard base64 in a string literal (`"..."`)
    Base64,
}

impl Scheme {
    /// Encode bytes as a complete literal, delimiters included
    pub fn encode(&self, data: &[u8]) -> String {
        match self {
            Scheme::Escape => encode_escaped(data),
            Scheme::Base64 => encode_base64(data),
        }
    }

    /// Rust type of the generated constant
    pub fn rust_type(&self) -> &'static str {
        match self {
            Scheme::Escape => "&[u8]",
            Scheme::Base64 => "&str",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Escape => write!(f, "escape"),
            Scheme::Base64 => write!(f, "base64"),
        }
    }
}

fn encode_escaped(data: &[u8]) -> String {
    let mut output = String::with_capacity(data.len() * 2 + 3);
    output.push_str("b\"");

    let mut column = 0;
    let mut wrapped = false;
    for &byte in data {
        if column >= ESCAPE_LINE_WIDTH {
            output.push_str(LINE_CONTINUATION);
            column = 0;
            wrapped = true;
        }

        let start = output.len();
        // A space right after a break would be swallowed by the continuation
        if byte == b' ' && wrapped && column == 0 {
            output.push_str("\\x20");
        } else {
            push_escaped(&mut output, byte);
        }
        column += output.len() - start;
    }

    output.push('"');
    output
}

fn push_escaped(output: &mut String, byte: u8) {
    match byte {
        b'\n' => output.push_str("\\n"),
        b'\r' => output.push_str("\\r"),
        b'\t' => output.push_str("\\t"),
        b'"' => output.push_str("\\\""),
        b'\\' => output.push_str("\\\\"),
        0x20..=0x7e => output.push(byte as char),
        // Writing to a String cannot fail
        _ => {
            let _ = write!(output, "\\x{:02x}", byte);
        }
    }
}

fn encode_base64(data: &[u8]) -> String {
    let text = base64::engine::general_purpose::STANDARD.encode(data);

    let mut output = String::with_capacity(text.len() + text.len() / BASE64_LINE_WIDTH + 4);
    output.push('"');
    for (i, ch) in text.chars().enumerate() {
        if i % BASE64_LINE_WIDTH == 0 {
            output.push('\n');
        }
        output.push(ch);
    }
    if !text.is_empty() {
        output.push('\n');
    }
    output.push('"');
    output
}

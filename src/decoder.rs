//! Literal-to-byte decoding

use base64::Engine;
use std::fmt;

use crate::encoder::Scheme;

/// Error type for literal decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Literal is not wrapped in the delimiters its scheme expects
    MissingDelimiters { scheme: Scheme },
    /// Character that may not appear unescaped
    UnexpectedCharacter { offset: usize, ch: char },
    /// Unknown escape or malformed `\xHH`
    InvalidEscape { offset: usize, sequence: String },
    /// Literal ends in the middle of an escape sequence
    TruncatedEscape { offset: usize },
    /// Base64 payload is not valid standard base64
    InvalidBase64(base64::DecodeError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MissingDelimiters { scheme } => {
                write!(f, "Literal is missing its {} delimiters", scheme)
            }
            DecodeError::UnexpectedCharacter { offset, ch } => {
                write!(f, "Unexpected character {:?} at offset {}", ch, offset)
            }
            DecodeError::InvalidEscape { offset, sequence } => {
                write!(f, "Invalid escape sequence '{}' at offset {}", sequence, offset)
            }
            DecodeError::TruncatedEscape { offset } => {
                write!(f, "Truncated escape sequence at offset {}", offset)
            }
            DecodeError::InvalidBase64(err) => {
                write!(f, "Invalid base64 data: {}", err)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::InvalidBase64(err) => Some(err),
            _ => None,
        }
    }
}

impl From<base64::DecodeError> for DecodeError {
    fn from(err: base64::DecodeError) -> Self {
        DecodeError::InvalidBase64(err)
    }
}

impl Scheme {
    /// Decode a literal produced by [`Scheme::encode`] back to raw bytes
    pub fn decode(&self, literal: &str) -> Result<Vec<u8>, DecodeError> {
        match self {
            Scheme::Escape => decode_escaped(literal),
            Scheme::Base64 => decode_base64(literal),
        }
    }
}

fn decode_escaped(literal: &str) -> Result<Vec<u8>, DecodeError> {
    let body = literal
        .strip_prefix("b\"")
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or(DecodeError::MissingDelimiters { scheme: Scheme::Escape })?;

    let bytes = body.as_bytes();
    let mut output = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        match byte {
            b'\\' => {
                let offset = i;
                let next = *bytes
                    .get(i + 1)
                    .ok_or(DecodeError::TruncatedEscape { offset })?;
                i += 2;

                match next {
                    b'n' => output.push(b'\n'),
                    b'r' => output.push(b'\r'),
                    b't' => output.push(b'\t'),
                    b'"' => output.push(b'"'),
                    b'\\' => output.push(b'\\'),
                    b'x' => {
                        let hex = bytes
                            .get(i..i + 2)
                            .ok_or(DecodeError::TruncatedEscape { offset })?;
                        output.push(parse_hex(hex).ok_or_else(|| DecodeError::InvalidEscape {
                            offset,
                            sequence: String::from_utf8_lossy(&bytes[offset..i + 2]).into_owned(),
                        })?);
                        i += 2;
                    }
                    b'\n' => i = skip_whitespace(bytes, i),
                    b'\r' if bytes.get(i) == Some(&b'\n') => i = skip_whitespace(bytes, i + 1),
                    _ => {
                        return Err(DecodeError::InvalidEscape {
                            offset,
                            sequence: String::from_utf8_lossy(&bytes[offset..i]).into_owned(),
                        })
                    }
                }
            }
            b'"' => {
                return Err(DecodeError::UnexpectedCharacter { offset: i, ch: '"' });
            }
            0x20..=0x7e => {
                output.push(byte);
                i += 1;
            }
            _ => {
                let ch = body[i..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(DecodeError::UnexpectedCharacter { offset: i, ch });
            }
        }
    }

    Ok(output)
}

fn parse_hex(hex: &[u8]) -> Option<u8> {
    if !hex.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let text = std::str::from_utf8(hex).ok()?;
    u8::from_str_radix(text, 16).ok()
}

/// Position of the first byte after a line continuation's whitespace
fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && matches!(bytes[i], b' ' | b'\t' | b'\n' | b'\r') {
        i += 1;
    }
    i
}

fn decode_base64(literal: &str) -> Result<Vec<u8>, DecodeError> {
    let body = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or(DecodeError::MissingDelimiters { scheme: Scheme::Base64 })?;

    let filtered: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(filtered)?)
}

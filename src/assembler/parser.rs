//! Assembly source parser
//!
//! Splits one source line into label, mnemonic, operands and comment, keeping
//! the character span of each piece for error reporting.

use crate::assembler::{validate_label, AssemblerError, ErrorType};

/// Text plus its (start, end) character span in the source line.
pub type Spanned = (String, (usize, usize));

/// A parsed line of assembly source
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyLine {
    /// Line number in source file (1-indexed)
    pub line_number: usize,

    /// Optional label definition (e.g., "START" from "START:")
    pub label: Option<Spanned>,

    /// Optional mnemonic, uppercased (e.g., "MVI")
    pub mnemonic: Option<Spanned>,

    /// Comma-separated operands, trimmed, case preserved (e.g., "A", "#05")
    pub operands: Vec<Spanned>,

    /// Optional comment text (after semicolon)
    pub comment: Option<String>,

    /// Span of the code part of the line (label through last operand)
    pub span: (usize, usize),
}

/// Parses one line of source.
///
/// Blank and comment-only lines produce an `AssemblyLine` with no label and
/// no mnemonic.
pub fn parse_line(line_number: usize, text: &str) -> Result<AssemblyLine, AssemblerError> {
    let (code, comment) = match text.find(';') {
        Some(pos) => (&text[..pos], Some(text[pos + 1..].trim().to_string())),
        None => (text, None),
    };

    let mut line = AssemblyLine {
        line_number,
        label: None,
        mnemonic: None,
        operands: Vec::new(),
        comment,
        span: trimmed_span(code, 0),
    };

    let mut rest_start = 0;
    if let Some(colon) = code.find(':') {
        let span = trimmed_span(&code[..colon], 0);
        let name = &code[span.0..span.1];
        if let Err(message) = validate_label(name) {
            return Err(AssemblerError::new(
                ErrorType::InvalidLabel,
                line_number,
                span,
                message,
            ));
        }
        line.label = Some((name.to_string(), span));
        rest_start = colon + 1;
    }

    let rest = &code[rest_start..];
    let (start, end) = trimmed_span(rest, rest_start);
    if start == end {
        return Ok(line);
    }
    let body = &code[start..end];

    let mnemonic_len = body.find(char::is_whitespace).unwrap_or(body.len());
    line.mnemonic = Some((
        body[..mnemonic_len].to_ascii_uppercase(),
        (start, start + mnemonic_len),
    ));

    let operand_text = &body[mnemonic_len..];
    if operand_text.trim().is_empty() {
        return Ok(line);
    }

    let mut piece_start = start + mnemonic_len;
    for piece in operand_text.split(',') {
        let span = trimmed_span(piece, piece_start);
        if span.0 == span.1 {
            return Err(AssemblerError::new(
                ErrorType::SyntaxError,
                line_number,
                (piece_start, piece_start + piece.len()),
                "empty operand",
            ));
        }
        line.operands
            .push((code[span.0..span.1].to_string(), span));
        piece_start += piece.len() + 1;
    }

    Ok(line)
}

/// Span of `s` with surrounding whitespace removed, offset by `base`.
fn trimmed_span(s: &str, base: usize) -> (usize, usize) {
    let start = s.len() - s.trim_start().len();
    let end = s.trim_end().len().max(start);
    (base + start, base + end)
}

/// Parse a number from a string.
///
/// Accepted forms:
/// - `#FF` hexadecimal
/// - `0FFH` hexadecimal with `H` suffix (must start with a digit)
/// - `0xFF` hexadecimal
/// - `255` decimal
///
/// The value is returned unrestricted so callers can report range errors for
/// their own operand width.
pub fn parse_number(s: &str) -> Result<u32, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("empty number string".to_string());
    }

    let (digits, radix) = if let Some(hex) = s.strip_prefix('#') {
        (hex, 16)
    } else if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(hex) = s.strip_suffix(['H', 'h']) {
        if !hex.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(format!("invalid number: {}", s));
        }
        (hex, 16)
    } else {
        (s, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("invalid number: {}", s));
    }
    u32::from_str_radix(digits, radix).map_err(|_| format!("number too large: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_hex() {
        assert_eq!(parse_number("#FF").unwrap(), 255);
        assert_eq!(parse_number("#42").unwrap(), 0x42);
        assert_eq!(parse_number("0x1234").unwrap(), 0x1234);
        assert_eq!(parse_number("0FFH").unwrap(), 0xFF);
        assert_eq!(parse_number("20h").unwrap(), 0x20);
    }

    #[test]
    fn test_parse_number_decimal() {
        assert_eq!(parse_number("255").unwrap(), 255);
        assert_eq!(parse_number("42").unwrap(), 42);
        assert_eq!(parse_number("70000").unwrap(), 70000);
    }

    #[test]
    fn test_parse_number_invalid() {
        assert!(parse_number("#XY").is_err());
        assert!(parse_number("FFH").is_err());
        assert!(parse_number("ABC").is_err());
        assert!(parse_number("#").is_err());
        assert!(parse_number("-1").is_err());
        assert!(parse_number("").is_err());
    }

    #[test]
    fn test_parse_full_line() {
        let line = parse_line(3, "LOOP:  mvi a, #05   ; load").unwrap();

        assert_eq!(line.line_number, 3);
        assert_eq!(line.label, Some(("LOOP".to_string(), (0, 4))));
        assert_eq!(line.mnemonic, Some(("MVI".to_string(), (7, 10))));
        assert_eq!(
            line.operands,
            vec![("a".to_string(), (11, 12)), ("#05".to_string(), (14, 17))]
        );
        assert_eq!(line.comment.as_deref(), Some("load"));
    }

    #[test]
    fn test_parse_label_only_and_blank() {
        let line = parse_line(1, "END:").unwrap();
        assert_eq!(line.label.as_ref().map(|l| l.0.as_str()), Some("END"));
        assert!(line.mnemonic.is_none());

        let blank = parse_line(2, "   ; nothing here").unwrap();
        assert!(blank.label.is_none());
        assert!(blank.mnemonic.is_none());
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_line(1, "9LIVES: NOP").unwrap_err();
        assert_eq!(err.error_type, ErrorType::InvalidLabel);

        let err = parse_line(1, "MOV A,").unwrap_err();
        assert_eq!(err.error_type, ErrorType::SyntaxError);
    }
}

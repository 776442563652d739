//! `.s` text to canvas.
//!
//! The parser accepts what the converter and the encoder write, plus the
//! usual hand-edited variations: `;` comments, blank lines, a `label:`
//! colon, a directive on the label line, `.byte` as well as `.byt`, and
//! decimal values next to `$hex`. Anything else is rejected with the line
//! where it was found.

use super::{is_valid_label, BYTES_PER_ROW, PICTURE_BYTES};
use crate::attribute::{AttributeState, CellByte, CELL_WIDTH, WIDTH};
use crate::canvas::Canvas;
use crate::document::PictureDocument;
use crate::error::{FormatError, HiresError};
use crate::palette::OricColour;

/// A labelled byte table as read from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub label: String,
    /// 1-based line the label was found on.
    pub label_line: usize,
    pub bytes: Vec<u8>,
}

/// Parse `.s` text into its label and raw bytes, without checking length.
pub fn parse_table(text: &str) -> Result<ParsedTable, FormatError> {
    let mut label: Option<(String, usize)> = None;
    let mut bytes = Vec::with_capacity(PICTURE_BYTES);

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let code = raw.split_once(';').map_or(raw, |(code, _)| code).trim();
        if code.is_empty() {
            continue;
        }

        let rest = if code.starts_with('.') {
            code
        } else {
            let (token, rest) = split_token(code);
            let name = token.strip_suffix(':').unwrap_or(token);
            if !is_valid_label(name) {
                return Err(FormatError::InvalidLabel {
                    line,
                    label: name.to_string(),
                });
            }
            if label.is_some() {
                return Err(FormatError::MultipleLabels {
                    line,
                    label: name.to_string(),
                });
            }
            label = Some((name.to_string(), line));
            rest
        };

        if rest.is_empty() {
            continue;
        }
        let (directive, values) = split_token(rest);
        if !directive.eq_ignore_ascii_case(".byt") && !directive.eq_ignore_ascii_case(".byte") {
            return Err(FormatError::UnsupportedDirective {
                line,
                directive: directive.to_string(),
            });
        }
        if label.is_none() {
            return Err(FormatError::DataBeforeLabel { line });
        }
        for token in values.split(',') {
            bytes.push(parse_byte(token.trim(), line)?);
        }
    }

    let (label, label_line) = label.ok_or(FormatError::MissingLabel)?;
    Ok(ParsedTable {
        label,
        label_line,
        bytes,
    })
}

fn split_token(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (s, ""),
    }
}

fn parse_byte(token: &str, line: usize) -> Result<u8, FormatError> {
    let parsed = match token.strip_prefix('$') {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => token.parse::<u32>(),
    };
    let value = parsed.map_err(|_| FormatError::InvalidByte {
        line,
        token: token.to_string(),
    })?;
    u8::try_from(value).map_err(|_| FormatError::ByteOutOfRange { line, value })
}

/// Expand an 8000-byte table into pixels.
pub fn decode_bytes(bytes: &[u8]) -> Result<Canvas, HiresError> {
    if bytes.len() < PICTURE_BYTES {
        return Err(FormatError::Truncated {
            row: bytes.len() / BYTES_PER_ROW,
            found: bytes.len(),
            expected: PICTURE_BYTES,
        }
        .into());
    }
    if bytes.len() > PICTURE_BYTES {
        return Err(FormatError::TrailingData {
            found: bytes.len(),
            expected: PICTURE_BYTES,
        }
        .into());
    }

    let mut canvas = Canvas::new(OricColour::Black);
    for (row, (line, out)) in bytes
        .chunks_exact(BYTES_PER_ROW)
        .zip(canvas.pixels_mut().chunks_exact_mut(WIDTH))
        .enumerate()
    {
        let mut state = AttributeState::default();
        for (column, (&byte, cell)) in line.iter().zip(out.chunks_exact_mut(CELL_WIDTH)).enumerate() {
            let decoded = CellByte::from_byte(byte);
            if let CellByte::VideoMode { hires: false, .. } = decoded {
                return Err(FormatError::TextModeAttribute { row, column, byte }.into());
            }
            let mut shown = [OricColour::Black; CELL_WIDTH];
            state.apply(decoded, &mut shown);
            cell.copy_from_slice(&shown);
        }
    }

    Ok(canvas)
}

/// Parse `.s` text into a document.
///
/// Never yields a partial document: any parse or layout error aborts.
pub fn decode(text: &str) -> Result<PictureDocument, HiresError> {
    let table = parse_table(text)?;
    let canvas = decode_bytes(&table.bytes)?;
    Ok(PictureDocument::with_canvas(table.label, canvas))
}

/// Like [`decode`], but the file must carry the label `expected`.
pub fn decode_expecting(text: &str, expected: &str) -> Result<PictureDocument, HiresError> {
    let table = parse_table(text)?;
    if table.label != expected {
        return Err(FormatError::UnexpectedLabel {
            line: table.label_line,
            expected: expected.to_string(),
            found: table.label,
        }
        .into());
    }
    let canvas = decode_bytes(&table.bytes)?;
    Ok(PictureDocument::with_canvas(table.label, canvas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use OricColour::*;

    fn table(label: &str, bytes: &[u8]) -> String {
        super::super::write_table(label, bytes)
    }

    #[test]
    fn test_parse_accepts_hand_edited_text() {
        let text = "; converted picture\n\
                    pic:  .byte 64, $41 ; first two\n\
                    \n\
                    \t.BYT $ff,0\n";
        let parsed = parse_table(text).unwrap();
        assert_eq!(parsed.label, "pic");
        assert_eq!(parsed.label_line, 2);
        assert_eq!(parsed.bytes, vec![0x40, 0x41, 0xff, 0x00]);
    }

    #[test]
    fn test_parse_errors_report_lines() {
        assert_eq!(parse_table("; nothing\n"), Err(FormatError::MissingLabel));
        assert_eq!(
            parse_table("\t.byt $40\n"),
            Err(FormatError::DataBeforeLabel { line: 1 })
        );
        assert_eq!(
            parse_table("pic\n\t.word $4000\n"),
            Err(FormatError::UnsupportedDirective {
                line: 2,
                directive: ".word".to_string()
            })
        );
        assert_eq!(
            parse_table("pic\n\t.byt $40,,$40\n"),
            Err(FormatError::InvalidByte {
                line: 2,
                token: String::new()
            })
        );
        assert_eq!(
            parse_table("pic\n\t.byt $40\n\t.byt $100\n"),
            Err(FormatError::ByteOutOfRange { line: 3, value: 256 })
        );
        assert_eq!(
            parse_table("pic\n\t.byt $40\nother\n"),
            Err(FormatError::MultipleLabels {
                line: 3,
                label: "other".to_string()
            })
        );
        assert_eq!(
            parse_table("9lives\n"),
            Err(FormatError::InvalidLabel {
                line: 1,
                label: "9lives".to_string()
            })
        );
    }

    #[test]
    fn test_truncated_reports_row() {
        let text = table("pic", &[0x40; 500]);
        assert_eq!(
            decode(&text),
            Err(HiresError::MalformedFormat(FormatError::Truncated {
                row: 12,
                found: 500,
                expected: 8000
            }))
        );
    }

    #[test]
    fn test_trailing_data_rejected() {
        let text = table("pic", &[0x40; 8001]);
        assert!(matches!(
            decode(&text),
            Err(HiresError::MalformedFormat(FormatError::TrailingData { found: 8001, .. }))
        ));
    }

    #[test]
    fn test_text_mode_attribute_rejected() {
        let mut bytes = vec![0x40; 8000];
        bytes[3 * 40 + 5] = 0x1a;
        assert_eq!(
            decode_bytes(&bytes),
            Err(HiresError::MalformedFormat(FormatError::TextModeAttribute {
                row: 3,
                column: 5,
                byte: 0x1a
            }))
        );
    }

    #[test]
    fn test_attributes_reset_each_row() {
        let mut bytes = vec![0x40; 8000];
        bytes[0] = 0x11;
        let canvas = decode_bytes(&bytes).unwrap();
        assert!(canvas.row(0).iter().all(|&c| c == Red));
        assert!(canvas.row(1).iter().all(|&c| c == Black));
    }

    #[test]
    fn test_neutral_attributes_show_paper() {
        let mut bytes = vec![0x7f; 8000];
        bytes[0] = 0x12; // paper green
        bytes[1] = 0x1e; // hires mode, no change
        bytes[2] = 0x09; // charset, no change
        let canvas = decode_bytes(&bytes).unwrap();
        assert_eq!(canvas.cell(0, 1).unwrap(), &[Green; 6]);
        assert_eq!(canvas.cell(0, 2).unwrap(), &[Green; 6]);
        assert_eq!(canvas.cell(0, 3).unwrap(), &[White; 6]);
    }

    #[test]
    fn test_decode_expecting_label() {
        let text = table("_LabelPicture", &[0x40; 8000]);
        assert!(decode_expecting(&text, "_LabelPicture").is_ok());
        assert_eq!(
            decode_expecting(&text, "_Other"),
            Err(HiresError::MalformedFormat(FormatError::UnexpectedLabel {
                line: 1,
                expected: "_Other".to_string(),
                found: "_LabelPicture".to_string()
            }))
        );
    }
}

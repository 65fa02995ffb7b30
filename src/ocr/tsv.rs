//! Tesseract TSV parsing
//!
//! The structured recognition pass produces one row per layout element:
//!
//! ```text
//! level page_num block_num par_num line_num word_num left top width height conf text
//! ```
//!
//! Layout rows (page, block, paragraph, line) carry a confidence of `-1`.
//! They are kept here; the confidence aggregation drops non-positive values.

use super::types::{OcrError, OcrWord};

const COLUMN_COUNT: usize = 12;
const CONF: usize = 10;
const TEXT: usize = 11;

/// Parse TSV output into tokens. The header row is optional.
pub fn parse_tsv(tsv: &str) -> Result<Vec<OcrWord>, OcrError> {
    let mut words = Vec::new();

    for (line_no, line) in tsv.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if line_no == 0 && fields.first() == Some(&"level") {
            continue;
        }

        // The text column is dropped by some writers when empty
        if fields.len() < COLUMN_COUNT - 1 {
            return Err(OcrError::RecognitionData(format!(
                "row {} has {} columns, expected {}",
                line_no + 1,
                fields.len(),
                COLUMN_COUNT
            )));
        }

        let confidence = fields[CONF].trim().parse::<f64>().map_err(|_| {
            OcrError::RecognitionData(format!(
                "row {}: invalid confidence {:?}",
                line_no + 1,
                fields[CONF]
            ))
        })?;

        words.push(OcrWord {
            text: fields.get(TEXT).map(|t| t.to_string()).unwrap_or_default(),
            confidence,
        });
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::mean_confidence;

    const SAMPLE: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t2550\t3300\t-1\t
2\t1\t1\t0\t0\t0\t300\t300\t900\t60\t-1\t
5\t1\t1\t1\t1\t1\t300\t300\t200\t60\t96.512\tHello
5\t1\t1\t1\t1\t2\t520\t300\t300\t60\t91.25\t안녕하세요
";

    #[test]
    fn test_parse_sample() {
        let words = parse_tsv(SAMPLE).unwrap();
        assert_eq!(words.len(), 4);
        assert_eq!(words[2].text, "Hello");
        assert_eq!(words[3].text, "안녕하세요");
        assert_eq!(words[0].confidence, -1.0);

        let mean = mean_confidence(&words).unwrap();
        assert!((mean - (96.512 + 91.25) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_without_header_or_text_column() {
        let words = parse_tsv("1\t1\t0\t0\t0\t0\t0\t0\t10\t10\t-1\n").unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "");
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_tsv("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_rows_are_recognition_data_errors() {
        assert!(matches!(
            parse_tsv("garbage line"),
            Err(OcrError::RecognitionData(_))
        ));
        assert!(matches!(
            parse_tsv("5\t1\t1\t1\t1\t1\t300\t300\t200\t60\thigh\tword"),
            Err(OcrError::RecognitionData(_))
        ));
    }
}

//! Test fixtures
//!
//! Builds small PDFs in memory: letter-sized pages, Helvetica text, and a
//! correct cross-reference table.

use std::fmt::Write;

/// PDF whose pages carry the given lines of text. A page with no lines has
/// an empty content stream, like an image-only scan without its image.
pub fn text_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let contents: Vec<String> = pages.iter().map(|lines| content_stream(lines)).collect();
    build_pdf(&contents)
}

/// PDF with `page_count` pages and no text layer
pub fn blank_pdf(page_count: usize) -> Vec<u8> {
    build_pdf(&vec![String::new(); page_count])
}

/// Readable English line of roughly 70 characters
pub fn prose_line(n: usize) -> String {
    format!(
        "Paragraph {} explains how photosynthesis converts light into energy.",
        n
    )
}

fn content_stream(lines: &[&str]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let mut stream = String::from("BT\n/F1 11 Tf\n14 TL\n56 740 Td\n");
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            stream.push_str("T*\n");
        }
        let _ = writeln!(stream, "({}) Tj", escape(line));
    }
    stream.push_str("ET");
    stream
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

fn build_pdf(contents: &[String]) -> Vec<u8> {
    // 1 catalog, 2 page tree, 3 font, then a (page, content) pair per page
    let page_id = |i: usize| 4 + 2 * i;
    let kids: Vec<String> = (0..contents.len())
        .map(|i| format!("{} 0 R", page_id(i)))
        .collect();

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            contents.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    for (i, content) in contents.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            page_id(i) + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        let _ = write!(out, "{} 0 obj\n{}\nendobj\n", i + 1, body);
    }

    let xref_offset = out.len();
    let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(out, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let data = text_pdf(&[&["one"], &[]]);
        let text = String::from_utf8(data).unwrap();

        let start = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[start..]
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();

        assert_eq!(entries.len(), 7);
        for (i, offset) in entries.iter().enumerate() {
            assert!(text[*offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }
}

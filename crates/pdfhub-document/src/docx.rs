// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Minimal OOXML writer: wrap extracted text in a valid .docx package.

use std::io::{Cursor, Write};

use pdfhub_core::error::{PdfHubError, Result};
use pdfhub_core::types::ConversionTarget;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

fn docx_error(err: impl std::fmt::Display) -> PdfHubError {
    PdfHubError::Conversion {
        target: ConversionTarget::WordDocument,
        detail: err.to_string(),
    }
}

/// Build a .docx package containing the given text, one paragraph per
/// input line.
pub fn docx_from_text(text: &str) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut archive = ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        archive
            .start_file("[Content_Types].xml", options)
            .map_err(docx_error)?;
        archive
            .write_all(CONTENT_TYPES_XML.as_bytes())
            .map_err(docx_error)?;

        archive
            .start_file("_rels/.rels", options)
            .map_err(docx_error)?;
        archive.write_all(RELS_XML.as_bytes()).map_err(docx_error)?;

        archive
            .start_file("word/document.xml", options)
            .map_err(docx_error)?;
        archive
            .write_all(document_xml(text).as_bytes())
            .map_err(docx_error)?;

        archive.finish().map_err(docx_error)?;
    }
    Ok(buffer.into_inner())
}

fn document_xml(text: &str) -> String {
    let mut body = String::new();
    for line in text.lines() {
        body.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
        body.push_str(&escape_xml(line));
        body.push_str("</w:t></w:r></w:p>");
    }
    // A document with no paragraphs confuses some readers.
    if body.is_empty() {
        body.push_str("<w:p/>");
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>{}</w:body></w:document>"
        ),
        body
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

//! Multi-format markdown converter

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::DocumentFormat;

use super::converter::DocumentConverter;

/// Replace ligatures and typographic spaces that PDF fonts leave behind
fn cleanup_pdf_text(text: &str) -> String {
    text.replace('\0', "")
        .replace('\u{00A0}', " ") // Non-breaking space
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
}

/// Built-in converter producing markdown from office documents
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert raw file bytes of a known format; `path` is only used in errors
    pub fn convert_bytes(path: &Path, format: DocumentFormat, data: &[u8]) -> Result<String> {
        let markdown = match format {
            DocumentFormat::Docx => Self::from_docx(path, data)?,
            DocumentFormat::Pptx => Self::from_pptx(path, data)?,
            DocumentFormat::Pdf => Self::from_pdf(path, data)?,
            DocumentFormat::Txt | DocumentFormat::Markdown => Self::from_text(data),
        };

        if markdown.trim().is_empty() {
            return Err(Error::conversion(path, "no text content could be extracted"));
        }

        Ok(markdown)
    }

    /// Plain text and markdown pass through unchanged
    fn from_text(data: &[u8]) -> String {
        String::from_utf8_lossy(data).to_string()
    }

    /// Convert a Word document, keeping headings, list items and tables
    fn from_docx(path: &Path, data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data).map_err(|e| Error::conversion(path, e.to_string()))?;

        let mut blocks: Vec<String> = Vec::new();

        for child in &doc.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(p) => {
                    if let Some(block) = docx_paragraph_markdown(p) {
                        blocks.push(block);
                    }
                }
                docx_rs::DocumentChild::Table(t) => {
                    if let Some(block) = docx_table_markdown(t) {
                        blocks.push(block);
                    }
                }
                _ => {}
            }
        }

        Ok(join_blocks(blocks))
    }

    /// Convert a PowerPoint presentation, one `## Slide N` section per slide
    fn from_pptx(path: &Path, data: &[u8]) -> Result<String> {
        use std::io::Read;

        let cursor = std::io::Cursor::new(data);
        let mut archive =
            zip::ZipArchive::new(cursor).map_err(|e| Error::conversion(path, e.to_string()))?;

        // ppt/slides/slide1.xml, slide2.xml, ... (excluding the _rels folder)
        let mut slides: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| {
                let number = name
                    .strip_prefix("ppt/slides/slide")?
                    .strip_suffix(".xml")?
                    .parse::<u32>()
                    .ok()?;
                Some((number, name.to_string()))
            })
            .collect();
        slides.sort_by_key(|(number, _)| *number);

        let mut blocks = Vec::new();
        for (number, name) in slides {
            let mut file = match archive.by_name(&name) {
                Ok(file) => file,
                Err(e) => {
                    tracing::debug!("Skipping slide {} in {}: {}", number, path.display(), e);
                    continue;
                }
            };

            let mut xml = String::new();
            if let Err(e) = file.read_to_string(&mut xml) {
                tracing::debug!("Unreadable slide {} in {}: {}", number, path.display(), e);
                continue;
            }

            let text = extract_text_from_slide_xml(&xml);
            if !text.is_empty() {
                blocks.push(format!("## Slide {}\n\n{}", number, text));
            }
        }

        Ok(join_blocks(blocks))
    }

    /// Convert a PDF, falling back to raw content streams when pdf-extract fails
    fn from_pdf(path: &Path, data: &[u8]) -> Result<String> {
        let extracted = match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
            Ok(Ok(text)) if !text.trim().is_empty() => text,
            Ok(Ok(_)) => {
                tracing::warn!("pdf-extract found no text in {}, trying fallback", path.display());
                Self::extract_pdf_text_fallback(path, data)?
            }
            Ok(Err(e)) => {
                tracing::warn!("pdf-extract failed on {}: {}, trying fallback", path.display(), e);
                Self::extract_pdf_text_fallback(path, data)?
            }
            Err(_) => {
                tracing::error!("pdf-extract panicked on {}, trying fallback", path.display());
                Self::extract_pdf_text_fallback(path, data)?
            }
        };

        let content = cleanup_pdf_text(&extracted)
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if content.is_empty() {
            return Err(Error::conversion(
                path,
                "PDF appears to be image-based or has no extractable text",
            ));
        }

        Ok(content)
    }

    /// Fallback PDF text extraction using lopdf directly
    fn extract_pdf_text_fallback(path: &Path, data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::conversion(path, format!("failed to load PDF: {}", e)))?;

        let mut all_text = String::new();
        for (page_num, page_id) in doc.get_pages() {
            match doc.get_page_content(page_id) {
                Ok(content) => {
                    let text = extract_text_from_content(&content);
                    if !text.trim().is_empty() {
                        all_text.push_str(&text);
                        all_text.push('\n');
                    }
                }
                Err(e) => {
                    tracing::debug!("Could not get content for page {}: {}", page_num, e);
                }
            }
        }

        Ok(all_text)
    }
}

impl DocumentConverter for MarkdownConverter {
    fn convert(&self, path: &Path) -> Result<String> {
        let format = DocumentFormat::from_path(path)?;
        let data = std::fs::read(path).map_err(|e| Error::conversion(path, e.to_string()))?;
        Self::convert_bytes(path, format, &data)
    }

    fn name(&self) -> &str {
        "markdown"
    }
}

/// Markdown heading level for Word styles such as `Title`, `Heading2` or `heading 3`
fn heading_level(style: &str) -> Option<usize> {
    let style = style.to_lowercase().replace(' ', "");
    if style == "title" {
        return Some(1);
    }
    let level = style.strip_prefix("heading")?.parse::<usize>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn docx_paragraph_text(p: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &p.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => docx_run_text(run, &mut text),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = inner {
                        docx_run_text(run, &mut text);
                    }
                }
            }
            _ => {}
        }
    }
    text
}

fn docx_run_text(run: &docx_rs::Run, out: &mut String) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(t) => out.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => out.push('\t'),
            _ => {}
        }
    }
}

fn docx_paragraph_markdown(p: &docx_rs::Paragraph) -> Option<String> {
    let text = docx_paragraph_text(p);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let level = p
        .property
        .style
        .as_ref()
        .and_then(|style| heading_level(&style.val));

    if let Some(level) = level {
        Some(format!("{} {}", "#".repeat(level), text))
    } else if p.has_numbering || p.property.numbering_property.is_some() {
        Some(format!("- {}", text))
    } else {
        Some(text.to_string())
    }
}

fn docx_table_markdown(table: &docx_rs::Table) -> Option<String> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for row in &table.rows {
        #[allow(irrefutable_let_patterns)]
        let docx_rs::TableChild::TableRow(row) = row else {
            continue;
        };
        let mut cells = Vec::new();
        for cell in &row.cells {
            #[allow(irrefutable_let_patterns)]
            let docx_rs::TableRowChild::TableCell(cell) = cell else {
                continue;
            };
            let text = cell
                .children
                .iter()
                .filter_map(|content| match content {
                    docx_rs::TableCellContent::Paragraph(p) => {
                        let text = docx_paragraph_text(p);
                        (!text.trim().is_empty()).then(|| text.trim().to_string())
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" ");
            cells.push(text.replace('|', "\\|"));
        }
        rows.push(cells);
    }

    let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if columns == 0 || rows.iter().all(|r| r.iter().all(|c| c.is_empty())) {
        return None;
    }

    let render = |cells: &[String]| {
        let mut padded = cells.to_vec();
        padded.resize(columns, String::new());
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = vec![render(&rows[0]), format!("|{}", " --- |".repeat(columns))];
    lines.extend(rows[1..].iter().map(|r| render(r)));
    Some(lines.join("\n"))
}

/// Collect `<a:t>` runs from a slide, one line per `<a:p>` paragraph
fn extract_text_from_slide_xml(xml: &str) -> String {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut in_text_element = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_element = true;
                }
            }
            Ok(Event::Text(e)) => {
                if in_text_element {
                    if let Ok(text) = e.unescape() {
                        if !current_line.is_empty() {
                            current_line.push(' ');
                        }
                        current_line.push_str(text.trim());
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_element = false,
                b"p" => {
                    if !current_line.trim().is_empty() {
                        lines.push(std::mem::take(&mut current_line));
                    }
                    current_line.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    if !current_line.trim().is_empty() {
        lines.push(current_line);
    }

    lines.join("\n")
}

/// Extract text from PDF content stream bytes (BT ... ET blocks)
fn extract_text_from_content(content: &[u8]) -> String {
    let content_str = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;
    let mut current_text = String::new();

    for line in content_str.lines() {
        let line = line.trim();

        if line == "BT" {
            in_text_block = true;
            continue;
        }

        if line == "ET" {
            in_text_block = false;
            if !current_text.is_empty() {
                text.push_str(&current_text);
                text.push('\n');
                current_text.clear();
            }
            continue;
        }

        if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) {
            if let (Some(start), Some(end)) = (line.find('('), line.rfind(')')) {
                if start < end {
                    current_text.push_str(&unescape_pdf_string(&line[start + 1..end]));
                }
            }
        }
    }

    text
}

/// Decode backslash escapes of a PDF literal string in a single pass
fn unescape_pdf_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn join_blocks(blocks: Vec<String>) -> String {
    blocks.join("\n\n")
}

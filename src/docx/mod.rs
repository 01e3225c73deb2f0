//! Template .docx handling.
//!
//! A memo template is an ordinary Word package whose paragraph text carries
//! the placeholder tokens of [`fill`]. This module reads the whole package
//! into memory, rewrites `word/document.xml` paragraph by paragraph, and
//! serializes the package back out with every other part byte-identical.
//!
//! Rewriting collapses each paragraph to a single run holding its replaced
//! text: the paragraph's properties (`<w:pPr>`) survive, run-level
//! formatting does not. The templates this tool consumes are flat paragraph
//! text, so nothing of value is lost.
//!
//! # Examples
//!
//! ```rust,no_run
//! use oficios::docx::TemplateDocument;
//! use oficios::docx::fill::Substitutions;
//!
//! # fn fill_one(substitutions: &Substitutions) -> oficios::Result<()> {
//! let mut doc = TemplateDocument::open("plantillas/oficio.docx")?;
//! doc.fill(substitutions)?;
//! doc.save_to("salida/oficio_Pérez_Juan.docx")?;
//! # Ok(())
//! # }
//! ```

pub mod fill;

use crate::error::{Error, Result};
use fill::Substitutions;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesEnd, BytesRef, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::CompressionMethod;
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Part name of the main document within the package.
const DOCUMENT_PART: &str = "word/document.xml";

/// An in-memory Word package loaded from a template file.
///
/// Opened fresh for every record of a run; a filled instance is never
/// reused, so records cannot contaminate each other through shared state.
#[derive(Debug)]
pub struct TemplateDocument {
    /// All package parts as (name, bytes), in archive order
    parts: Vec<(String, Vec<u8>)>,
    /// Index of `word/document.xml` within `parts`
    document_index: usize,
}

impl TemplateDocument {
    /// Open a template from a file path.
    ///
    /// An absent path is [`Error::TemplateNotFound`]; a readable file that
    /// is not a Word package is [`Error::InvalidTemplate`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::TemplateNotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Open a template from raw .docx bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| Error::InvalidTemplate(e.to_string()))?;

        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let mut buf = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut buf)?;
            parts.push((file.name().to_string(), buf));
        }

        let document_index = parts
            .iter()
            .position(|(name, _)| name == DOCUMENT_PART)
            .ok_or_else(|| {
                Error::InvalidTemplate(format!("package has no {}", DOCUMENT_PART))
            })?;

        Ok(Self {
            parts,
            document_index,
        })
    }

    /// Apply a substitution set to every paragraph of the main document.
    pub fn fill(&mut self, substitutions: &Substitutions) -> Result<()> {
        let rewritten =
            rewrite_paragraphs(&self.parts[self.document_index].1, substitutions)?;
        self.parts[self.document_index].1 = rewritten;
        Ok(())
    }

    /// The full text of each paragraph of the main document, in order.
    ///
    /// Paragraph text is the concatenation of its `<w:t>` content, matching
    /// how the fill pass sees it.
    pub fn paragraph_texts(&self) -> Result<Vec<String>> {
        let xml = &self.parts[self.document_index].1;
        let mut reader = Reader::from_reader(xml.as_slice());

        let mut texts = Vec::new();
        let mut current: Option<String> = None;
        let mut nested = 0usize;
        let mut in_text = false;

        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Start(e) if e.name().as_ref() == b"w:p" => {
                    if current.is_none() {
                        current = Some(String::new());
                    } else {
                        nested += 1;
                    }
                },
                Event::End(e) if e.name().as_ref() == b"w:p" => {
                    if nested > 0 {
                        nested -= 1;
                    } else if let Some(text) = current.take() {
                        texts.push(text);
                    }
                },
                Event::Empty(e) if e.name().as_ref() == b"w:p" && current.is_none() => {
                    texts.push(String::new());
                },
                Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
                Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
                Event::Text(t) if in_text => {
                    if let Some(text) = current.as_mut() {
                        let chunk = t.xml_content().map_err(|e| Error::Xml(e.to_string()))?;
                        text.push_str(&chunk);
                    }
                },
                Event::GeneralRef(r) if in_text => {
                    if let Some(text) = current.as_mut() {
                        push_general_ref(text, &r)?;
                    }
                },
                _ => {},
            }
        }

        Ok(texts)
    }

    /// Serialize the package to .docx bytes.
    ///
    /// Entry timestamps are a fixed constant, so serializing the same parts
    /// twice yields identical bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, bytes) in &self.parts {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(bytes)?;
        }

        Ok(writer.finish()?.into_inner())
    }

    /// Write the package to a file, replacing any existing file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Rewrite every `<w:p>` of a document part.
///
/// Events outside paragraphs stream through untouched. Within a paragraph,
/// events are buffered until the closing tag, then re-emitted as the
/// original start tag, the `<w:pPr>` subtree unchanged, and one
/// `<w:r><w:t>` run holding the replaced text.
fn rewrite_paragraphs(xml: &[u8], substitutions: &Substitutions) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));

    let mut paragraph: Option<(BytesStart<'static>, Vec<Event<'static>>)> = None;
    let mut nested = 0usize;

    loop {
        let event = reader.read_event()?;
        match event {
            Event::Eof => break,
            Event::Start(e) if e.name().as_ref() == b"w:p" => {
                match paragraph.as_mut() {
                    None => paragraph = Some((e.into_owned(), Vec::new())),
                    Some((_, events)) => {
                        nested += 1;
                        events.push(Event::Start(e.into_owned()));
                    },
                }
            },
            Event::End(e) if e.name().as_ref() == b"w:p" => {
                if nested > 0 {
                    nested -= 1;
                    if let Some((_, events)) = paragraph.as_mut() {
                        events.push(Event::End(e.into_owned()));
                    }
                } else {
                    let (start, events) = paragraph
                        .take()
                        .ok_or_else(|| Error::Xml("unbalanced w:p element".to_string()))?;
                    write_paragraph(&mut writer, start, &events, substitutions)?;
                }
            },
            other => match paragraph.as_mut() {
                Some((_, events)) => events.push(other.into_owned()),
                None => writer.write_event(other)?,
            },
        }
    }

    Ok(writer.into_inner())
}

/// Append the character a general entity reference stands for.
///
/// Predefined entities (`&amp;`, `&lt;`, ...) and character references
/// (`&#233;`, `&#xE9;`) are the only references WML documents carry; anything
/// else is malformed.
fn push_general_ref(text: &mut String, entity: &BytesRef<'_>) -> Result<()> {
    let name = entity.decode().map_err(|e| Error::Xml(e.to_string()))?;
    if let Some(resolved) = resolve_predefined_entity(&name) {
        text.push_str(resolved);
    } else if let Some(ch) = entity
        .resolve_char_ref()
        .map_err(|e| Error::Xml(e.to_string()))?
    {
        text.push(ch);
    } else {
        return Err(Error::Xml(format!("unresolvable entity reference: &{};", name)));
    }
    Ok(())
}

/// Emit one rewritten paragraph.
fn write_paragraph(
    writer: &mut Writer<Vec<u8>>,
    start: BytesStart<'static>,
    events: &[Event<'static>],
    substitutions: &Substitutions,
) -> Result<()> {
    // Paragraph properties are the first child when present
    let mut properties: Vec<Event<'static>> = Vec::new();
    match events.first() {
        Some(Event::Empty(e)) if e.name().as_ref() == b"w:pPr" => {
            properties.push(events[0].clone());
        },
        Some(Event::Start(e)) if e.name().as_ref() == b"w:pPr" => {
            let mut depth = 0usize;
            for event in events {
                properties.push(event.clone());
                match event {
                    Event::Start(_) => depth += 1,
                    Event::End(_) => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    },
                    _ => {},
                }
            }
        },
        _ => {},
    }

    let mut text = String::new();
    let mut in_text = false;
    for event in events {
        match event {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::Text(t) if in_text => {
                let chunk = t.xml_content().map_err(|e| Error::Xml(e.to_string()))?;
                text.push_str(&chunk);
            },
            Event::GeneralRef(r) if in_text => push_general_ref(&mut text, r)?,
            _ => {},
        }
    }

    let replaced = substitutions.apply(&text);

    writer.write_event(Event::Start(start))?;
    for event in properties {
        writer.write_event(event)?;
    }
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    let mut text_tag = BytesStart::new("w:t");
    text_tag.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(text_tag))?;
    writer.write_event(Event::Text(BytesText::new(&replaced)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;

    Ok(())
}

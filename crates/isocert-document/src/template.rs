//! `.docx` template rendering
//!
//! A docx file is a zip archive of XML parts. Placeholders of the form
//! `{{ key }}` are substituted in the body, header, footer, footnote and
//! endnote parts; every other entry is copied byte for byte.
//!
//! Word often splits the text of one placeholder over several runs, so the
//! characters of `{{ key }}` may be separated by markup. The renderer matches
//! placeholders on the text content only. The markup swallowed by a matched
//! placeholder is emitted right after the substituted value, which keeps the
//! document well formed.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use serde_json::Value;
use zip::{CompressionMethod, ZipArchive, ZipWriter, write::SimpleFileOptions};

use crate::context::Context;
use crate::error::DocumentError;

const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// A loaded `.docx` template
#[derive(Debug, Clone)]
pub struct DocxTemplate {
    data: Vec<u8>,
}

impl DocxTemplate {
    /// Load a template from disk
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let data = std::fs::read(path).map_err(|e| DocumentError::file(path, e))?;
        Self::from_bytes(data)
    }

    /// Load a template from an in-memory docx archive
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, DocumentError> {
        let archive = ZipArchive::new(Cursor::new(data.as_slice()))?;
        if archive.index_for_name(MAIN_DOCUMENT_PART).is_none() {
            return Err(DocumentError::InvalidTemplate(format!(
                "missing {MAIN_DOCUMENT_PART}"
            )));
        }

        Ok(Self { data })
    }

    /// Render the template and return the resulting docx bytes
    pub fn render(&self, context: &Context) -> Result<Vec<u8>, DocumentError> {
        let mut archive = ZipArchive::new(Cursor::new(self.data.as_slice()))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;

            if file.is_dir() || !is_rendered_part(file.name()) {
                writer.raw_copy_file(file)?;
                continue;
            }

            let name = file.name().to_string();
            let mut raw = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut raw)?;
            let xml = String::from_utf8(raw).map_err(|_| DocumentError::Encoding(name.clone()))?;

            writer.start_file(name, options)?;
            writer.write_all(render_xml(&xml, context).as_bytes())?;
        }

        Ok(writer.finish()?.into_inner())
    }

    /// Render the template into a file at `output`
    pub fn render_to_file(&self, context: &Context, output: &Path) -> Result<(), DocumentError> {
        let bytes = self.render(context)?;
        std::fs::write(output, bytes).map_err(|e| DocumentError::file(output, e))
    }
}

fn is_rendered_part(name: &str) -> bool {
    if name == MAIN_DOCUMENT_PART || name == "word/footnotes.xml" || name == "word/endnotes.xml"
    {
        return true;
    }

    name.ends_with(".xml") && (name.starts_with("word/header") || name.starts_with("word/footer"))
}

/// Resolve a placeholder key
///
/// A key present in the context as written wins. Otherwise `a.b.0` walks
/// nested objects by field name and arrays by index.
fn lookup<'c>(context: &'c Context, key: &str) -> Option<&'c Value> {
    if let Some(value) = context.get(key) {
        return Some(value);
    }

    let mut segments = key.split('.').map(str::trim);
    let mut value = context.get(segments.next()?)?;
    for segment in segments {
        value = match value {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(value)
}

/// Text form of a context value
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Text,
    OpenBrace,
    Key,
    CloseBrace,
}

/// Placeholder scanner over one XML part
struct Renderer<'a> {
    context: &'a Context,
    out: String,
    state: State,
    // Input consumed since the first `{` of a candidate placeholder
    pending: String,
    // Markup consumed since the first `{` of a candidate placeholder
    held_tags: String,
    key: String,
}

impl<'a> Renderer<'a> {
    fn new(context: &'a Context, capacity: usize) -> Self {
        Self {
            context,
            out: String::with_capacity(capacity),
            state: State::Text,
            pending: String::new(),
            held_tags: String::new(),
            key: String::new(),
        }
    }

    fn tag(&mut self, tag: &str) {
        if self.state == State::Text {
            self.out.push_str(tag);
        } else {
            self.pending.push_str(tag);
            self.held_tags.push_str(tag);
        }
    }

    fn text(&mut self, c: char) {
        match self.state {
            State::Text => self.start_or_emit(c),
            State::OpenBrace => {
                if c == '{' {
                    self.pending.push(c);
                    self.key.clear();
                    self.state = State::Key;
                } else {
                    self.abandon();
                    self.start_or_emit(c);
                }
            }
            State::Key => match c {
                '}' => {
                    self.pending.push(c);
                    self.state = State::CloseBrace;
                }
                '{' => {
                    self.abandon();
                    self.start_or_emit(c);
                }
                _ => {
                    self.pending.push(c);
                    self.key.push(c);
                }
            },
            State::CloseBrace => {
                if c == '}' {
                    self.substitute(c);
                } else {
                    self.abandon();
                    self.start_or_emit(c);
                }
            }
        }
    }

    fn start_or_emit(&mut self, c: char) {
        if c == '{' {
            self.pending.push(c);
            self.state = State::OpenBrace;
        } else {
            self.out.push(c);
        }
    }

    fn substitute(&mut self, closing: char) {
        let key = self.key.trim();
        if key.is_empty() {
            self.pending.push(closing);
            self.abandon();
            return;
        }

        let value = lookup(self.context, key)
            .map(format_value)
            .unwrap_or_default();
        self.out.push_str(&htmlescape::encode_minimal(&value));
        self.out.push_str(&self.held_tags);
        self.reset();
    }

    /// Give up on the current candidate and emit it unchanged
    fn abandon(&mut self) {
        self.out.push_str(&self.pending);
        self.reset();
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.held_tags.clear();
        self.key.clear();
        self.state = State::Text;
    }

    fn finish(mut self) -> String {
        self.abandon();
        self.out
    }
}

/// Substitute every `{{ key }}` placeholder in an XML part
///
/// Unknown keys render as an empty string. Substituted values are
/// XML-escaped. Text without a complete placeholder is left untouched.
pub fn render_xml(xml: &str, context: &Context) -> String {
    let mut renderer = Renderer::new(context, xml.len());
    let mut rest = xml;

    while let Some(lt) = rest.find('<') {
        for c in rest[..lt].chars() {
            renderer.text(c);
        }

        let tag_end = rest[lt..].find('>').map_or(rest.len(), |gt| lt + gt + 1);
        renderer.tag(&rest[lt..tag_end]);
        rest = &rest[tag_end..];
    }
    for c in rest.chars() {
        renderer.text(c);
    }

    renderer.finish()
}

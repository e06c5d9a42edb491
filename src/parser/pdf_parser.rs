//! PDF document loader using lopdf.

use std::collections::HashSet;
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{Destination, Document, Metadata, Outline, Page};

use super::options::{ErrorMode, ParseOptions};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Readers accept the header anywhere in the first kilobyte.
const HEADER_SEARCH_LEN: usize = 1024;

/// Upper bound on chained indirect references and nested destinations.
const MAX_DEREF_DEPTH: usize = 16;

/// Upper bound on name tree depth.
const MAX_NAME_TREE_DEPTH: u8 = 32;

/// Check whether bytes carry a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    let head = &data[..data.len().min(HEADER_SEARCH_LEN)];
    head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    ///
    /// Encrypted documents are refused with [`Error::Encrypted`].
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        if !is_pdf_bytes(data) {
            return Err(Error::UnknownFormat);
        }

        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        Ok(Self { doc, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Load page texts, metadata and outline into a [`Document`].
    pub fn parse(&self) -> Result<Document> {
        let mut document = Document::new();
        document.metadata = self.extract_metadata();

        let page_ids = self.doc.get_pages();
        document.metadata.page_count = page_ids.len() as u32;

        for (&page_num, &page_id) in page_ids.iter() {
            let text = match self.extract_page_text(page_num) {
                Ok(text) => text,
                Err(e) if self.options.error_mode == ErrorMode::Strict => return Err(e),
                Err(e) => {
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    String::new()
                }
            };
            document.add_page(Page::new(page_num, text).with_object_id(page_id));
        }
        document.index_pages();

        document.outline = self.extract_outline();

        Ok(document)
    }

    /// Extract document metadata.
    fn extract_metadata(&self) -> Metadata {
        let mut metadata = Metadata::with_version(self.doc.version.to_string());

        let info = self
            .doc
            .trailer
            .get(b"Info")
            .ok()
            .and_then(|o| self.deref(o))
            .and_then(|o| o.as_dict().ok());
        if let Some(info) = info {
            metadata.title = info
                .get(b"Title")
                .ok()
                .and_then(|o| self.deref(o))
                .and_then(decode_pdf_string)
                .filter(|t| !t.is_empty());
        }

        metadata
    }

    /// Extract text from a page.
    ///
    /// lopdf asserts on some malformed font and content structures; a panic
    /// is reported like any other extraction error for this page.
    fn extract_page_text(&self, page_num: u32) -> Result<String> {
        let doc = &self.doc;
        match panic::catch_unwind(AssertUnwindSafe(|| doc.extract_text(&[page_num]))) {
            Ok(result) => result.map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e))),
            Err(_) => Err(Error::TextExtract(format!(
                "Page {}: text decoder panicked",
                page_num
            ))),
        }
    }

    /// Extract document outline (bookmarks).
    fn extract_outline(&self) -> Option<Outline> {
        let catalog = self.doc.catalog().ok()?;
        let root = self.deref(catalog.get(b"Outlines").ok()?)?.as_dict().ok()?;
        let first = root.get(b"First").ok()?.as_reference().ok()?;

        let mut outline = Outline::new();
        let mut visited = HashSet::new();
        self.extract_outline_items(first, None, &mut outline, &mut visited);

        (!outline.is_empty()).then_some(outline)
    }

    /// Walk a sibling chain, descending into children as they come.
    fn extract_outline_items(
        &self,
        first: ObjectId,
        parent: Option<usize>,
        outline: &mut Outline,
        visited: &mut HashSet<ObjectId>,
    ) {
        let mut next = Some(first);

        while let Some(item_ref) = next {
            if !visited.insert(item_ref) {
                log::warn!("Outline item {:?} visited twice, stopping", item_ref);
                return;
            }
            let Ok(item) = self.doc.get_dictionary(item_ref) else {
                return;
            };

            let title = item
                .get(b"Title")
                .ok()
                .and_then(|o| self.deref(o))
                .and_then(decode_pdf_string)
                .unwrap_or_default();
            let target = self.outline_destination(item);

            let index = match parent {
                Some(p) => outline.push_child(p, title, target),
                None => outline.push_root(title, target),
            };

            if let Some(child) = item.get(b"First").ok().and_then(|o| o.as_reference().ok()) {
                self.extract_outline_items(child, Some(index), outline, visited);
            }

            next = item.get(b"Next").ok().and_then(|o| o.as_reference().ok());
        }
    }

    /// Get destination from an outline item (`/Dest` or a GoTo action).
    fn outline_destination(&self, item: &Dictionary) -> Option<Destination> {
        if let Ok(dest) = item.get(b"Dest") {
            return self.resolve_destination(dest, 0);
        }

        let action = self.deref(item.get(b"A").ok()?)?.as_dict().ok()?;
        self.resolve_destination(action.get(b"D").ok()?, 0)
    }

    /// Resolve an explicit or named destination.
    fn resolve_destination(&self, dest: &Object, depth: usize) -> Option<Destination> {
        if depth > MAX_DEREF_DEPTH {
            return None;
        }

        match self.deref(dest)? {
            Object::Array(items) => match items.first()? {
                Object::Reference(id) => Some(Destination::Page(*id)),
                Object::Integer(i) => u32::try_from(*i).ok().map(Destination::Index),
                _ => None,
            },
            Object::Dictionary(dict) => self.resolve_destination(dict.get(b"D").ok()?, depth + 1),
            Object::Name(name) | Object::String(name, _) => {
                let target = self.named_destination(name)?;
                self.resolve_destination(target, depth + 1)
            }
            _ => None,
        }
    }

    /// Look a name up in the catalog's `/Dests` dictionary or `/Names` tree.
    fn named_destination(&self, name: &[u8]) -> Option<&Object> {
        let catalog = self.doc.catalog().ok()?;

        let dests = catalog
            .get(b"Dests")
            .ok()
            .and_then(|o| self.deref(o))
            .and_then(|o| o.as_dict().ok());
        if let Some(target) = dests.and_then(|d| d.get(name).ok()) {
            return Some(target);
        }

        let names = self.deref(catalog.get(b"Names").ok()?)?.as_dict().ok()?;
        let tree = self.deref(names.get(b"Dests").ok()?)?.as_dict().ok()?;
        self.lookup_name_tree(tree, name, 0)
    }

    fn lookup_name_tree<'a>(
        &'a self,
        node: &'a Dictionary,
        name: &[u8],
        depth: u8,
    ) -> Option<&'a Object> {
        if depth > MAX_NAME_TREE_DEPTH {
            return None;
        }

        if let Some(Object::Array(pairs)) = node.get(b"Names").ok().and_then(|o| self.deref(o)) {
            for pair in pairs.chunks(2) {
                if let [key, value] = pair {
                    if matches!(self.deref(key), Some(Object::String(k, _)) if k.as_slice() == name) {
                        return Some(value);
                    }
                }
            }
        }

        if let Some(Object::Array(kids)) = node.get(b"Kids").ok().and_then(|o| self.deref(o)) {
            for kid in kids {
                if let Some(Object::Dictionary(kid)) = self.deref(kid) {
                    if let Some(found) = self.lookup_name_tree(kid, name, depth + 1) {
                        return Some(found);
                    }
                }
            }
        }

        None
    }

    /// Follow indirect references to the object they point at.
    fn deref<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        let mut current = obj;
        for _ in 0..MAX_DEREF_DEPTH {
            match current {
                Object::Reference(id) => current = self.doc.get_object(*id).ok()?,
                other => return Some(other),
            }
        }
        None
    }

}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8 or Latin-1).
fn decode_pdf_string(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_text_bytes(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

fn decode_text_bytes(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

//! PDF outline reader using lopdf.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{OutlineNode, PdfOutline};

use super::options::ReadOptions;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Reads the bookmark tree of a PDF document.
pub struct OutlineReader {
    doc: LopdfDocument,
    options: ReadOptions,
}

struct Pending {
    node: OutlineNode,
    /// Next child of `node` still to be read
    next: Option<ObjectId>,
}

impl OutlineReader {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ReadOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ReadOptions::default())
    }

    /// Read a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ReadOptions) -> Result<Self> {
        pdf_version(data)?;

        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; bookmark titles may be unreadable");
        }

        Ok(Self { doc, options })
    }

    /// Read a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Document title from the info dictionary.
    pub fn title(&self) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let info = self.resolve(info).as_dict().ok()?;
        self.text(info, b"Title").filter(|t| !t.trim().is_empty())
    }

    /// Read the outline.
    ///
    /// Returns [`Error::MissingOutline`] when the catalog has no outline or
    /// the outline has no entries.
    pub fn read(&self) -> Result<PdfOutline> {
        let first = self.first_bookmark().ok_or(Error::MissingOutline)?;
        let pages = if self.options.resolve_pages {
            self.page_numbers()
        } else {
            HashMap::new()
        };

        let mut visited = HashSet::new();
        let mut stack = vec![Pending {
            node: OutlineNode::root(),
            next: Some(first),
        }];

        loop {
            let nesting = stack.len();
            let Some(top) = stack.last_mut() else {
                return Err(Error::MissingOutline);
            };

            let Some(id) = top.next.take() else {
                let Some(done) = stack.pop() else {
                    return Err(Error::MissingOutline);
                };
                match stack.last_mut() {
                    Some(parent) => parent.node.add_child(done.node),
                    None => {
                        return Ok(PdfOutline {
                            title: self.title(),
                            root: done.node,
                        })
                    }
                }
                continue;
            };

            if !visited.insert(id) {
                log::warn!("Outline entry {:?} is linked twice; cutting the cycle", id);
                continue;
            }

            let dict = match self.doc.get_dictionary(id) {
                Ok(dict) => dict,
                Err(e) => {
                    log::warn!("Skipping unreadable outline entry {:?}: {}", id, e);
                    continue;
                }
            };

            top.next = self.reference(dict, b"Next");

            let node = OutlineNode {
                label: self.label(dict),
                page: self.destination_page(dict, &pages),
                children: Vec::new(),
            };

            let first_child = self.reference(dict, b"First");
            if first_child.is_some() && nesting >= self.options.max_depth {
                log::warn!(
                    "Outline nesting deeper than {} levels truncated at {:?}",
                    self.options.max_depth,
                    node.label
                );
                top.node.add_child(node);
                continue;
            }

            stack.push(Pending {
                node,
                next: first_child,
            });
        }
    }

    fn first_bookmark(&self) -> Option<ObjectId> {
        let catalog = self.doc.catalog().ok()?;
        let outlines = catalog.get(b"Outlines").ok()?;
        let outlines = self.resolve(outlines).as_dict().ok()?;
        self.reference(outlines, b"First")
    }

    fn label(&self, dict: &Dictionary) -> Option<String> {
        let title = self.text(dict, b"Title")?;
        let title = title.trim_matches('\0');
        if self.options.normalize {
            Some(title.nfc().collect())
        } else {
            Some(title.to_string())
        }
    }

    fn text(&self, dict: &Dictionary, key: &[u8]) -> Option<String> {
        match self.resolve(dict.get(key).ok()?) {
            Object::String(bytes, _) => Some(decode_text(bytes)),
            Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
            _ => None,
        }
    }

    fn reference(&self, dict: &Dictionary, key: &[u8]) -> Option<ObjectId> {
        dict.get(key).ok()?.as_reference().ok()
    }

    /// Follow an indirect reference, leaving direct objects untouched.
    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj.as_reference() {
            Ok(id) => self.doc.get_object(id).unwrap_or(obj),
            Err(_) => obj,
        }
    }

    fn page_numbers(&self) -> HashMap<ObjectId, u32> {
        self.doc
            .get_pages()
            .into_iter()
            .map(|(num, id)| (id, num))
            .collect()
    }

    /// Page targeted by `/Dest` or by a GoTo action's `/D`.
    fn destination_page(&self, dict: &Dictionary, pages: &HashMap<ObjectId, u32>) -> Option<u32> {
        if pages.is_empty() {
            return None;
        }

        if let Ok(dest) = dict.get(b"Dest") {
            return self.page_of(dest, pages);
        }

        let action = self.resolve(dict.get(b"A").ok()?).as_dict().ok()?;
        self.page_of(action.get(b"D").ok()?, pages)
    }

    fn page_of(&self, dest: &Object, pages: &HashMap<ObjectId, u32>) -> Option<u32> {
        // Named destinations are not looked up.
        let target = self.resolve(dest).as_array().ok()?.first()?;
        pages.get(&target.as_reference().ok()?).copied()
    }
}

/// Decode a PDF text string: UTF-16 with a byte order mark, else UTF-8,
/// else Latin-1.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    let utf16 = |be: bool| -> String {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| {
                if be {
                    u16::from_be_bytes([c[0], c[1]])
                } else {
                    u16::from_le_bytes([c[0], c[1]])
                }
            })
            .collect();
        String::from_utf16_lossy(&units)
    };

    match bytes {
        [0xFE, 0xFF, ..] => utf16(true),
        [0xFF, 0xFE, ..] => utf16(false),
        _ => match std::str::from_utf8(bytes) {
            Ok(s) => s.strip_prefix('\u{feff}').unwrap_or(s).to_string(),
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        },
    }
}

/// Check the `%PDF-x.y` header and return the version.
pub fn pdf_version(data: &[u8]) -> Result<String> {
    let version = data
        .strip_prefix(PDF_MAGIC)
        .and_then(|rest| rest.get(..3))
        .ok_or(Error::UnknownFormat)?;

    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version).into_owned())
        }
        _ => Err(Error::UnknownFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_version() {
        assert_eq!(pdf_version(b"%PDF-1.7\n%\xe2\xe3").unwrap(), "1.7");
        assert_eq!(pdf_version(b"%PDF-2.0\n").unwrap(), "2.0");
    }

    #[test]
    fn test_not_a_pdf() {
        assert!(matches!(
            pdf_version(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(pdf_version(b"%PDF"), Err(Error::UnknownFormat)));
        assert!(matches!(
            OutlineReader::from_bytes(b"plain text"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_decode_utf16_titles() {
        let be = [0xFE, 0xFF, 0x00, b'K', 0x00, 0xE4];
        assert_eq!(decode_text(&be), "Kä");
        let le = [0xFF, 0xFE, b'K', 0x00];
        assert_eq!(decode_text(&le), "K");
    }

    #[test]
    fn test_decode_single_byte_titles() {
        assert_eq!(decode_text("Kapitel 1".as_bytes()), "Kapitel 1");
        assert_eq!(decode_text(&[b'S', 0xE9]), "Sé");
    }
}

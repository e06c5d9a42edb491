//! Builds small PDFs in memory for the integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Where a fixture bookmark points.
pub enum Target {
    /// `/Dest` array naming a zero-based page
    Page(usize),
    /// `/Dest` name looked up in the catalog's `/Dests`
    Named(&'static str),
    /// GoTo action whose `/D` names a zero-based page
    Action(usize),
}

/// A bookmark in a fixture outline.
pub struct Mark {
    pub title: &'static str,
    pub target: Target,
    pub children: Vec<Mark>,
}

impl Mark {
    pub fn new(title: &'static str, page: usize) -> Self {
        Self::with_target(title, Target::Page(page))
    }

    pub fn with_target(title: &'static str, target: Target) -> Self {
        Self {
            title,
            target,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Mark>) -> Self {
        self.children = children;
        self
    }
}

/// A sentence of lower-case prose, long enough to never pass as a heading.
pub fn prose(words: usize) -> String {
    let mut line = (0..words)
        .map(|i| ["alpha", "beta", "gamma", "delta"][i % 4])
        .collect::<Vec<_>>()
        .join(" ");
    line.push('.');
    line
}

/// Several prose lines joined with newlines.
pub fn paragraph(lines: usize) -> String {
    (0..lines).map(|_| prose(12)).collect::<Vec<_>>().join("\n")
}

/// Build a PDF whose pages hold the given text, one text object per line.
pub fn build_pdf(pages: &[String], outline: &[Mark]) -> Vec<u8> {
    build_pdf_with(pages, outline, |_, _| {})
}

/// Like [`build_pdf`], with a hook to edit the catalog before saving.
pub fn build_pdf_with<F>(pages: &[String], outline: &[Mark], edit_catalog: F) -> Vec<u8>
where
    F: FnOnce(&mut Dictionary, &[ObjectId]),
{
    assemble(pages, outline, "Font", |_, catalog, page_ids| {
        edit_catalog(catalog, page_ids)
    })
}

/// A PDF whose `/Info` dictionary carries the given title.
pub fn build_pdf_with_title(pages: &[String], title: &str) -> Vec<u8> {
    assemble(pages, &[], "Font", |doc, _, _| {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    })
}

/// A PDF whose page font is not typed as a font, which lopdf's text
/// extraction cannot cope with.
pub fn build_pdf_with_broken_font(pages: &[String]) -> Vec<u8> {
    assemble(pages, &[], "XObject", |_, _, _| {})
}

/// A PDF whose trailer declares standard security with unknown passwords.
pub fn build_encrypted_pdf(pages: &[String]) -> Vec<u8> {
    assemble(pages, &[], "Font", |doc, _, _| {
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
            "O" => Object::string_literal(vec![0x4f; 32]),
            "U" => Object::string_literal(vec![0x55; 32]),
            "P" => -4,
        });
        doc.trailer.set("Encrypt", encrypt_id);
        let file_id = Object::string_literal(vec![0x11; 16]);
        doc.trailer.set("ID", vec![file_id.clone(), file_id]);
    })
}

fn assemble<F>(pages: &[String], outline: &[Mark], font_type: &str, edit: F) -> Vec<u8>
where
    F: FnOnce(&mut Document, &mut Dictionary, &[ObjectId]),
{
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => font_type,
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for text in pages {
        let mut operations = Vec::new();
        for (i, line) in text.lines().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
            operations.push(Operation::new(
                "Td",
                vec![40.into(), (800 - 12 * i as i64).into()],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| id.into()).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if !outline.is_empty() {
        let outlines_id = doc.new_object_id();
        let (first, last) = add_level(&mut doc, outlines_id, outline, &page_ids);
        doc.objects.insert(
            outlines_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => first,
                "Last" => last,
                "Count" => outline.len() as i64,
            }),
        );
        catalog.set("Outlines", outlines_id);
    }
    edit(&mut doc, &mut catalog, &page_ids);

    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save fixture");
    buf
}

fn add_level(
    doc: &mut Document,
    parent: ObjectId,
    marks: &[Mark],
    page_ids: &[ObjectId],
) -> (ObjectId, ObjectId) {
    let ids: Vec<ObjectId> = marks.iter().map(|_| doc.new_object_id()).collect();

    for (i, mark) in marks.iter().enumerate() {
        let mut item = dictionary! {
            "Title" => Object::string_literal(mark.title),
            "Parent" => parent,
        };
        match mark.target {
            Target::Page(page) => item.set("Dest", vec![page_ids[page].into(), "Fit".into()]),
            Target::Named(name) => item.set("Dest", Object::Name(name.as_bytes().to_vec())),
            Target::Action(page) => item.set(
                "A",
                dictionary! {
                    "S" => "GoTo",
                    "D" => vec![page_ids[page].into(), "Fit".into()],
                },
            ),
        }
        if i > 0 {
            item.set("Prev", ids[i - 1]);
        }
        if i + 1 < ids.len() {
            item.set("Next", ids[i + 1]);
        }
        if !mark.children.is_empty() {
            let (first, last) = add_level(doc, ids[i], &mark.children, page_ids);
            item.set("First", first);
            item.set("Last", last);
            item.set("Count", mark.children.len() as i64);
        }
        doc.objects.insert(ids[i], Object::Dictionary(item));
    }

    (ids[0], ids[ids.len() - 1])
}

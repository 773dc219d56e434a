//! Small PDFs built in memory for tests.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

/// One page per entry, each drawing its string with a single text object.
/// An empty string yields a page with no text at all.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    build(pages, Font::Courier)
}

/// Same layout as [`pdf_with_pages`], but the text is drawn through a Type0
/// font with `Identity-H` encoding and a ToUnicode CMap, the way word
/// processors and browsers write PDFs.
pub fn pdf_with_unicode_pages(pages: &[&str]) -> Vec<u8> {
    build(pages, Font::IdentityH)
}

#[derive(Clone, Copy)]
enum Font {
    Courier,
    IdentityH,
}

impl Font {
    fn add_to(self, doc: &mut Document, pages: &[&str]) -> ObjectId {
        match self {
            Font::Courier => doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Courier",
            }),
            Font::IdentityH => {
                let cmap = to_unicode_cmap(pages);
                let to_unicode_id = doc.add_object(Stream::new(dictionary! {}, cmap.into_bytes()));
                let descendant_id = doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "CIDFontType2",
                    "BaseFont" => "NotoSans",
                    "CIDSystemInfo" => dictionary! {
                        "Registry" => Object::string_literal("Adobe"),
                        "Ordering" => Object::string_literal("Identity"),
                        "Supplement" => 0i64,
                    },
                    "CIDToGIDMap" => "Identity",
                });
                doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type0",
                    "BaseFont" => "NotoSans",
                    "Encoding" => "Identity-H",
                    "DescendantFonts" => vec![Object::Reference(descendant_id)],
                    "ToUnicode" => to_unicode_id,
                })
            }
        }
    }

    fn show(self, text: &str) -> Object {
        match self {
            Font::Courier => Object::string_literal(text),
            // Two-byte codes; each code is the UTF-16 unit it stands for.
            Font::IdentityH => Object::String(
                text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
                StringFormat::Hexadecimal,
            ),
        }
    }
}

/// Maps every code used by `pages` back to itself as UTF-16BE.
fn to_unicode_cmap(pages: &[&str]) -> String {
    let mut units: Vec<u16> = pages.iter().flat_map(|page| page.encode_utf16()).collect();
    units.sort_unstable();
    units.dedup();

    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );
    // At most 100 entries per bfchar block.
    for chunk in units.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for unit in chunk {
            cmap.push_str(&format!("<{unit:04X}> <{unit:04X}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }
    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    cmap
}

fn build(pages: &[&str], font: Font) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = font.add_to(&mut doc, pages);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![font.show(text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

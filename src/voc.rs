//! Pascal VOC XML records and writer.
//!
//! One [`ImageRecord`] becomes one XML file. Each [`ObjectRecord`] carries
//! the standard VOC object fields plus the six WIDER FACE attribute labels.
//! The object layout ends with a second `<pose>` element holding the mapped
//! WIDER pose label. Both `<pose>` elements and the element order are fixed.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::codes::AttributeLabels;
use crate::error::WiderVocError;

const SOURCE_DATABASE: &str = "Unknown";
const IMAGE_DEPTH: u32 = 3;
const SEGMENTED: u32 = 0;
const OBJECT_NAME: &str = "face";
const PLACEHOLDER_POSE: &str = "Unspecified";
const TRUNCATED: u32 = 0;

/// Pixel-space box corners, as written to `<bndbox>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BndBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

/// One `<object>` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRecord {
    bndbox: BndBox,
    labels: AttributeLabels,
}

impl ObjectRecord {
    pub fn new(bndbox: BndBox, labels: AttributeLabels) -> Self {
        Self { bndbox, labels }
    }

    /// Always `"face"`.
    pub fn name(&self) -> &'static str {
        OBJECT_NAME
    }

    pub fn bndbox(&self) -> BndBox {
        self.bndbox
    }

    pub fn labels(&self) -> &AttributeLabels {
        &self.labels
    }
}

/// One `<annotation>` document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRecord {
    pub folder: String,
    pub filename: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub objects: Vec<ObjectRecord>,
}

impl ImageRecord {
    /// Creates a record with no objects.
    pub fn new(
        folder: impl Into<String>,
        filename: impl Into<String>,
        path: impl Into<PathBuf>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
            path: path.into(),
            width,
            height,
            objects: Vec::new(),
        }
    }

    pub fn push_object(&mut self, object: ObjectRecord) {
        self.objects.push(object);
    }
}

/// Render a record as a VOC XML document.
pub fn to_voc_xml_string(record: &ImageRecord) -> String {
    let mut xml = String::new();

    writeln!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>").expect("write to string");
    writeln!(xml, "<annotation>").expect("write to string");
    writeln!(xml, "  <folder>{}</folder>", xml_escape(&record.folder)).expect("write to string");
    writeln!(
        xml,
        "  <filename>{}</filename>",
        xml_escape(&record.filename)
    )
    .expect("write to string");
    writeln!(
        xml,
        "  <path>{}</path>",
        xml_escape(&record.path.to_string_lossy())
    )
    .expect("write to string");
    writeln!(xml, "  <source>").expect("write to string");
    writeln!(xml, "    <database>{}</database>", SOURCE_DATABASE).expect("write to string");
    writeln!(xml, "  </source>").expect("write to string");
    writeln!(xml, "  <size>").expect("write to string");
    writeln!(xml, "    <width>{}</width>", record.width).expect("write to string");
    writeln!(xml, "    <height>{}</height>", record.height).expect("write to string");
    writeln!(xml, "    <depth>{}</depth>", IMAGE_DEPTH).expect("write to string");
    writeln!(xml, "  </size>").expect("write to string");
    writeln!(xml, "  <segmented>{}</segmented>", SEGMENTED).expect("write to string");

    for object in &record.objects {
        let bndbox = object.bndbox();

        writeln!(xml, "  <object>").expect("write to string");
        writeln!(xml, "    <name>{}</name>", object.name()).expect("write to string");
        writeln!(xml, "    <pose>{}</pose>", PLACEHOLDER_POSE).expect("write to string");
        writeln!(xml, "    <truncated>{}</truncated>", TRUNCATED).expect("write to string");
        writeln!(xml, "    <bndbox>").expect("write to string");
        writeln!(xml, "      <xmin>{}</xmin>", bndbox.xmin).expect("write to string");
        writeln!(xml, "      <ymin>{}</ymin>", bndbox.ymin).expect("write to string");
        writeln!(xml, "      <xmax>{}</xmax>", bndbox.xmax).expect("write to string");
        writeln!(xml, "      <ymax>{}</ymax>", bndbox.ymax).expect("write to string");
        writeln!(xml, "    </bndbox>").expect("write to string");

        for (tag, label) in object.labels().entries() {
            writeln!(xml, "    <{0}>{1}</{0}>", tag, xml_escape(label)).expect("write to string");
        }

        writeln!(xml, "  </object>").expect("write to string");
    }

    writeln!(xml, "</annotation>").expect("write to string");
    xml
}

/// Write a record to `xml_path`, replacing any existing file.
pub fn write_voc_xml(xml_path: &Path, record: &ImageRecord) -> Result<(), WiderVocError> {
    fs::write(xml_path, to_voc_xml_string(record)).map_err(|source| WiderVocError::VocWrite {
        path: xml_path.to_path_buf(),
        source,
    })
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

//! Batch conversion from a WIDER FACE annotations file to VOC XML files.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::WiderVocError;
use crate::image_meta::read_image_meta;
use crate::voc::{write_voc_xml, ImageRecord, ObjectRecord};
use crate::wider::{open_wider_txt, ImageBlock};

const VOC_XML_EXTENSION: &str = "xml";

/// Inputs for one conversion run.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// The WIDER FACE ground-truth file, e.g. `wider_face_train_bbx_gt.txt`.
    pub annotations_path: PathBuf,
    /// Directory that receives one XML file per image. Created if missing.
    pub target_dir: PathBuf,
    /// Root that image identifiers are resolved against, e.g. `WIDER_train/images`.
    pub images_dir: PathBuf,
}

/// Summary of a finished conversion run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Source annotations file.
    pub annotations: PathBuf,
    /// Output directory.
    pub target_dir: PathBuf,
    /// Number of XML files written.
    pub images: usize,
    /// Number of `<object>` elements written across all files.
    pub objects: usize,
    /// Zero-count blocks whose placeholder box row was skipped.
    pub placeholder_rows: usize,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} -> {}",
            self.annotations.display(),
            self.target_dir.display()
        )?;
        writeln!(f, "  {} images, {} objects", self.images, self.objects)?;
        if self.placeholder_rows > 0 {
            writeln!(
                f,
                "  skipped {} placeholder row(s) after zero-count images",
                self.placeholder_rows
            )?;
        }
        Ok(())
    }
}

/// Convert every image block in the annotations file, printing one
/// `<basename> => <xml path>` line per image to stdout.
pub fn convert_annotations(options: &ConvertOptions) -> Result<ConversionReport, WiderVocError> {
    let stdout = std::io::stdout();
    convert_annotations_with_progress(options, &mut stdout.lock())
}

/// Like [`convert_annotations`], writing progress lines to `progress`.
///
/// The run stops at the first error. Files written for earlier images are
/// left in place; the failing image gets no file.
pub fn convert_annotations_with_progress<W: Write>(
    options: &ConvertOptions,
    progress: &mut W,
) -> Result<ConversionReport, WiderVocError> {
    let reader = open_wider_txt(&options.annotations_path)?;

    let mut report = ConversionReport {
        annotations: options.annotations_path.clone(),
        target_dir: options.target_dir.clone(),
        ..Default::default()
    };

    for block in reader {
        let block = block?;
        let record = build_image_record(&block, &options.images_dir)?;

        fs::create_dir_all(&options.target_dir).map_err(WiderVocError::Io)?;
        let xml_path = xml_output_path(&options.target_dir, &record.filename);
        write_voc_xml(&xml_path, &record)?;

        writeln!(progress, "{} => {}", record.filename, xml_path.display())?;
        progress.flush()?;

        report.images += 1;
        report.objects += record.objects.len();
        if block.skipped_placeholder {
            report.placeholder_rows += 1;
        }
    }

    Ok(report)
}

/// Resolve image metadata and map every box of `block` into a record.
pub fn build_image_record(
    block: &ImageBlock,
    images_dir: &Path,
) -> Result<ImageRecord, WiderVocError> {
    let meta = read_image_meta(&block.image_path, images_dir)?;
    let mut record = ImageRecord::new(meta.folder, meta.basename, meta.path, meta.width, meta.height);

    for wider_box in &block.boxes {
        let labels = wider_box.codes.to_labels()?;
        record.push_object(ObjectRecord::new(wider_box.to_bndbox(), labels));
    }

    Ok(record)
}

/// `<target>/<basename with its extension replaced by .xml>`.
pub fn xml_output_path(target_dir: &Path, basename: &str) -> PathBuf {
    target_dir.join(Path::new(basename).with_extension(VOC_XML_EXTENSION))
}

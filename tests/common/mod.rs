#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use widervoc::ConvertOptions;

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

/// Writes a BMP under `path`. The `.jpg` names used by WIDER FACE are fine
/// here since dimensions are sniffed from the header, not the extension.
pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// A WIDER FACE-style layout under `root`:
/// `wider_face_split/gt.txt`, `images/<folder>/<file>`, and `out/` as target.
pub struct Fixture {
    pub root: PathBuf,
}

impl Fixture {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn annotations_path(&self) -> PathBuf {
        self.root.join("wider_face_split/gt.txt")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn target_dir(&self) -> PathBuf {
        self.root.join("out")
    }

    pub fn image(&self, rel: &str, width: u32, height: u32) -> &Self {
        write_bmp(&self.images_dir().join(rel), width, height);
        self
    }

    pub fn annotations(&self, content: &str) -> &Self {
        let path = self.annotations_path();
        fs::create_dir_all(path.parent().expect("annotations parent")).expect("create split dir");
        fs::write(path, content).expect("write annotations");
        self
    }

    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            annotations_path: self.annotations_path(),
            target_dir: self.target_dir(),
            images_dir: self.images_dir(),
        }
    }
}

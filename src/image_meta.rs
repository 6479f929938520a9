//! Image identifier splitting and header-only dimension reads.

use std::path::{Path, PathBuf};

use crate::error::WiderVocError;

/// Metadata for one image referenced by the annotations file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageMeta {
    /// Event folder, e.g. `0--Parade`.
    pub folder: String,
    /// File name within the folder, e.g. `0_Parade_marchingband_1_100.jpg`.
    pub basename: String,
    /// `image_root` joined with the identifier, made absolute.
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Split a `<folder>/<basename>` identifier into its two components.
pub fn split_image_path(relative_path: &str) -> Result<(&str, &str), WiderVocError> {
    let mut parts = relative_path.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(folder), Some(basename), None) if !folder.is_empty() && !basename.is_empty() => {
            Ok((folder, basename))
        }
        _ => Err(WiderVocError::ImagePathFormat {
            path: relative_path.to_string(),
            message: "expected exactly two components in the form <folder>/<basename>"
                .to_string(),
        }),
    }
}

/// Resolve `relative_path` under `image_root` and read its pixel dimensions.
///
/// Only the image header is decoded; the file is never written.
pub fn read_image_meta(relative_path: &str, image_root: &Path) -> Result<ImageMeta, WiderVocError> {
    let (folder, basename) = split_image_path(relative_path)?;

    let joined = image_root.join(folder).join(basename);
    let (width, height) = read_image_dimensions(&joined)?;
    let path = std::path::absolute(&joined).map_err(WiderVocError::Io)?;

    Ok(ImageMeta {
        folder: folder.to_string(),
        basename: basename.to_string(),
        path,
        width,
        height,
    })
}

fn read_image_dimensions(path: &Path) -> Result<(u32, u32), WiderVocError> {
    let size = imagesize::size(path).map_err(|source| WiderVocError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let width: u32 = size
        .width
        .try_into()
        .map_err(|_| WiderVocError::ImagePathFormat {
            path: path.display().to_string(),
            message: format!("image width {} does not fit in u32", size.width),
        })?;

    let height: u32 = size
        .height
        .try_into()
        .map_err(|_| WiderVocError::ImagePathFormat {
            path: path.display().to_string(),
            message: format!("image height {} does not fit in u32", size.height),
        })?;

    Ok((width, height))
}

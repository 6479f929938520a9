//! WIDER FACE ground-truth text reader.
//!
//! The file is a sequence of image blocks:
//!
//! ```text
//! 0--Parade/0_Parade_marchingband_1_849.jpg
//! 1
//! 449 330 122 149 0 0 0 0 0 0
//! ```
//!
//! i.e. an image identifier, a box count `N`, then `N` rows of ten integers
//! (`x y w h blur expression illumination invalid occlusion pose`).
//!
//! [`WiderReader`] walks the lines with an explicit state machine and yields
//! one [`ImageBlock`] at a time. Every box row must hold exactly ten
//! integers, so a short block fails on the next identifier instead of
//! reading it as box data, and a box row after a complete block is an
//! error. The one exception is the all-zeros placeholder row that follows a
//! zero-count block in the released files.

use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::codes::AttributeCodes;
use crate::error::WiderVocError;
use crate::voc::BndBox;

const BOX_FIELDS: [&str; 10] = [
    "x",
    "y",
    "w",
    "h",
    "blur",
    "expression",
    "illumination",
    "invalid",
    "occlusion",
    "pose",
];

/// One box row: `x y w h` plus the six attribute codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WiderBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub codes: AttributeCodes,
}

impl WiderBox {
    /// Corner form: `xmax = x + w`, `ymax = y + h`.
    #[inline]
    pub fn to_bndbox(&self) -> BndBox {
        BndBox {
            xmin: i64::from(self.x),
            ymin: i64::from(self.y),
            xmax: i64::from(self.x) + i64::from(self.width),
            ymax: i64::from(self.y) + i64::from(self.height),
        }
    }
}

/// One image block from the annotations file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBlock {
    /// Relative identifier, e.g. `0--Parade/0_Parade_marchingband_1_849.jpg`.
    pub image_path: String,
    /// 1-based line number of the identifier.
    pub line: usize,
    pub boxes: Vec<WiderBox>,
    /// True when a zero-count block was followed by the all-zeros
    /// placeholder row that the WIDER FACE release files carry.
    pub skipped_placeholder: bool,
}

#[derive(Debug)]
enum ReaderState {
    AwaitFilename,
    ReadCount {
        image_path: String,
        line: usize,
    },
    ReadBoxes {
        image_path: String,
        line: usize,
        expected: usize,
        boxes: Vec<WiderBox>,
    },
    Done,
}

/// Iterator over the image blocks of a WIDER FACE annotations file.
///
/// The reader is fused: after it yields an error or reaches the end of
/// input, it yields `None` forever.
pub struct WiderReader<R> {
    lines: Lines<R>,
    source: PathBuf,
    pending: Option<String>,
    line: usize,
    state: ReaderState,
}

impl<R: BufRead> WiderReader<R> {
    /// `source` is only used in error messages.
    pub fn new(reader: R, source: impl Into<PathBuf>) -> Self {
        Self {
            lines: reader.lines(),
            source: source.into(),
            pending: None,
            line: 0,
            state: ReaderState::AwaitFilename,
        }
    }

    fn read_raw(&mut self) -> Result<Option<String>, WiderVocError> {
        self.lines
            .next()
            .transpose()
            .map_err(|source| WiderVocError::AnnotationsRead {
                path: self.source.clone(),
                source,
            })
    }

    fn next_line(&mut self) -> Result<Option<String>, WiderVocError> {
        let next = match self.pending.take() {
            Some(line) => Some(line),
            None => self.read_raw()?,
        };
        if next.is_some() {
            self.line += 1;
        }
        Ok(next)
    }

    fn peek_line(&mut self) -> Result<Option<&str>, WiderVocError> {
        if self.pending.is_none() {
            self.pending = self.read_raw()?;
        }
        Ok(self.pending.as_deref())
    }

    fn parse_error(&self, message: String) -> WiderVocError {
        WiderVocError::AnnotationParse {
            path: self.source.clone(),
            line: self.line,
            message,
        }
    }

    fn step(&mut self) -> Result<Option<ImageBlock>, WiderVocError> {
        loop {
            match std::mem::replace(&mut self.state, ReaderState::Done) {
                ReaderState::AwaitFilename => {
                    let Some(raw) = self.next_line()? else {
                        return Ok(None);
                    };
                    let image_path = raw.trim();
                    if image_path.is_empty() {
                        return Ok(None);
                    }
                    self.state = ReaderState::ReadCount {
                        image_path: image_path.to_string(),
                        line: self.line,
                    };
                }
                ReaderState::ReadCount { image_path, line } => {
                    let Some(raw) = self.next_line()? else {
                        return Err(self.parse_error(format!(
                            "unexpected end of file; expected box count for '{image_path}'"
                        )));
                    };
                    let expected = raw.trim().parse::<usize>().map_err(|_| {
                        self.parse_error(format!(
                            "invalid box count '{}' for '{image_path}'; expected non-negative integer",
                            raw.trim()
                        ))
                    })?;
                    self.state = ReaderState::ReadBoxes {
                        image_path,
                        line,
                        expected,
                        boxes: Vec::with_capacity(expected.min(1024)),
                    };
                }
                ReaderState::ReadBoxes {
                    image_path,
                    line,
                    expected,
                    mut boxes,
                } => {
                    if boxes.len() == expected {
                        let skipped_placeholder = self.finish_block(&image_path, expected)?;
                        self.state = ReaderState::AwaitFilename;
                        return Ok(Some(ImageBlock {
                            image_path,
                            line,
                            boxes,
                            skipped_placeholder,
                        }));
                    }

                    let Some(raw) = self.next_line()? else {
                        return Err(self.parse_error(format!(
                            "unexpected end of file; expected {expected} box row(s) for '{image_path}', found {}",
                            boxes.len()
                        )));
                    };
                    let parsed = parse_box_line(&raw, &self.source, self.line)?;
                    boxes.push(parsed);
                    self.state = ReaderState::ReadBoxes {
                        image_path,
                        line,
                        expected,
                        boxes,
                    };
                }
                ReaderState::Done => return Ok(None),
            }
        }
    }

    /// Called once a block has all its declared rows. A zero-count block may
    /// be followed by the all-zeros placeholder row, which is consumed; any
    /// other box row here means the declared count is too small.
    fn finish_block(&mut self, image_path: &str, expected: usize) -> Result<bool, WiderVocError> {
        let line_num = self.line + 1;
        let source = self.source.clone();
        let Some(row) = self
            .peek_line()?
            .and_then(|raw| parse_box_line(raw, &source, line_num).ok())
        else {
            return Ok(false);
        };

        self.next_line()?;
        if expected == 0 && row == WiderBox::default() {
            return Ok(true);
        }
        Err(self.parse_error(format!(
            "unexpected box row after {expected} declared box row(s) for '{image_path}'"
        )))
    }
}

impl<R: BufRead> Iterator for WiderReader<R> {
    type Item = Result<ImageBlock, WiderVocError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }
}

/// Open an annotations file for block-by-block reading.
pub fn open_wider_txt(path: &Path) -> Result<WiderReader<BufReader<std::fs::File>>, WiderVocError> {
    let file = std::fs::File::open(path).map_err(|source| WiderVocError::AnnotationsRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WiderReader::new(BufReader::new(file), path))
}

/// Parse a whole annotations document held in memory.
pub fn from_wider_txt_str(input: &str) -> Result<Vec<ImageBlock>, WiderVocError> {
    WiderReader::new(input.as_bytes(), "<memory>").collect()
}

/// Parse one box row.
pub fn parse_box_line(
    line: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<WiderBox, WiderVocError> {
    // Take at most one extra token so pathological inputs do not allocate unbounded memory.
    let tokens: Vec<&str> = line
        .split_whitespace()
        .take(BOX_FIELDS.len() + 1)
        .collect();

    if tokens.len() != BOX_FIELDS.len() {
        let found = if tokens.len() > BOX_FIELDS.len() {
            format!("more than {}", BOX_FIELDS.len())
        } else {
            tokens.len().to_string()
        };
        return Err(WiderVocError::AnnotationParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!(
                "expected {} integer fields (x y w h blur expression illumination invalid occlusion pose), found {found}",
                BOX_FIELDS.len()
            ),
        });
    }

    let int = |index: usize| parse_int_token::<i32>(tokens[index], BOX_FIELDS[index], file_path, line_num);
    let uint = |index: usize| parse_int_token::<u32>(tokens[index], BOX_FIELDS[index], file_path, line_num);

    Ok(WiderBox {
        x: int(0)?,
        y: int(1)?,
        width: uint(2)?,
        height: uint(3)?,
        codes: AttributeCodes {
            blur: uint(4)?,
            expression: uint(5)?,
            illumination: uint(6)?,
            invalid: uint(7)?,
            occlusion: uint(8)?,
            pose: uint(9)?,
        },
    })
}

/// Fuzz-only entrypoint for whole-document parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_wider_txt(input: &str) -> Result<(), WiderVocError> {
    let _ = from_wider_txt_str(input)?;
    Ok(())
}

fn parse_int_token<T: std::str::FromStr>(
    raw: &str,
    field_name: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<T, WiderVocError> {
    raw.parse::<T>()
        .map_err(|_| WiderVocError::AnnotationParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("invalid {field_name} '{raw}'; expected integer"),
        })
}

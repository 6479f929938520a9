//! WIDER FACE attribute codes and their human-readable labels.
//!
//! Every box in the WIDER FACE ground truth carries six small integer codes.
//! The lookup tables below are fixed; a code that is not a key in its table
//! is an input error rather than something to paper over with a default.

use std::fmt;

use crate::error::WiderVocError;

const BLUR_LABELS: [&str; 3] = ["clear", "normal_blur", "heavy blur"];
const EXPRESSION_LABELS: [&str; 2] = ["typical expression", "exaggerate expression"];
const ILLUMINATION_LABELS: [&str; 2] = ["normal illumination", "extreme illumination"];
const OCCLUSION_LABELS: [&str; 3] = ["no occlusion", "partial occlusion", "heavy occlusion"];
const POSE_LABELS: [&str; 2] = ["typical pose", "atypical pose"];
const INVALID_LABELS: [&str; 2] = ["valid image", "invalid image"];

/// One of the six per-box attribute categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    Blur,
    Expression,
    Illumination,
    Occlusion,
    Pose,
    Invalid,
}

impl Attribute {
    /// All categories, in the order their labels appear in VOC output.
    pub const ALL: [Attribute; 6] = [
        Attribute::Blur,
        Attribute::Expression,
        Attribute::Illumination,
        Attribute::Invalid,
        Attribute::Occlusion,
        Attribute::Pose,
    ];

    /// Category name, which doubles as the VOC element name.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Blur => "blur",
            Attribute::Expression => "expression",
            Attribute::Illumination => "illumination",
            Attribute::Occlusion => "occlusion",
            Attribute::Pose => "pose",
            Attribute::Invalid => "invalid",
        }
    }

    fn table(&self) -> &'static [&'static str] {
        match self {
            Attribute::Blur => &BLUR_LABELS,
            Attribute::Expression => &EXPRESSION_LABELS,
            Attribute::Illumination => &ILLUMINATION_LABELS,
            Attribute::Occlusion => &OCCLUSION_LABELS,
            Attribute::Pose => &POSE_LABELS,
            Attribute::Invalid => &INVALID_LABELS,
        }
    }

    /// Returns the label for `code`, or `None` if the code is not in the table.
    #[inline]
    pub fn label(&self, code: u32) -> Option<&'static str> {
        usize::try_from(code)
            .ok()
            .and_then(|index| self.table().get(index))
            .copied()
    }

    /// Like [`Attribute::label`], but fails with
    /// [`WiderVocError::UnknownAttributeCode`] for unmapped codes.
    pub fn require_label(&self, code: u32) -> Result<&'static str, WiderVocError> {
        self.label(code)
            .ok_or_else(|| WiderVocError::UnknownAttributeCode {
                attribute: self.name(),
                code: code.to_string(),
            })
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a string-form code to its label.
///
/// The string is read as a decimal integer first, so `"01"` and `" 1"` map
/// the same way as `"1"`.
pub fn map_code(attribute: Attribute, code: &str) -> Result<&'static str, WiderVocError> {
    code.trim()
        .parse::<u32>()
        .ok()
        .and_then(|value| attribute.label(value))
        .ok_or_else(|| WiderVocError::UnknownAttributeCode {
            attribute: attribute.name(),
            code: code.to_string(),
        })
}

/// The six raw codes attached to one box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttributeCodes {
    pub blur: u32,
    pub expression: u32,
    pub illumination: u32,
    pub invalid: u32,
    pub occlusion: u32,
    pub pose: u32,
}

impl AttributeCodes {
    /// Map all six codes, failing on the first unknown one.
    pub fn to_labels(&self) -> Result<AttributeLabels, WiderVocError> {
        Ok(AttributeLabels {
            blur: Attribute::Blur.require_label(self.blur)?,
            expression: Attribute::Expression.require_label(self.expression)?,
            illumination: Attribute::Illumination.require_label(self.illumination)?,
            invalid: Attribute::Invalid.require_label(self.invalid)?,
            occlusion: Attribute::Occlusion.require_label(self.occlusion)?,
            pose: Attribute::Pose.require_label(self.pose)?,
        })
    }
}

/// Mapped labels for one box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeLabels {
    pub blur: &'static str,
    pub expression: &'static str,
    pub illumination: &'static str,
    pub invalid: &'static str,
    pub occlusion: &'static str,
    pub pose: &'static str,
}

impl AttributeLabels {
    /// Labels as `(element name, label)` pairs in VOC output order.
    pub fn entries(&self) -> [(&'static str, &'static str); 6] {
        [
            (Attribute::Blur.name(), self.blur),
            (Attribute::Expression.name(), self.expression),
            (Attribute::Illumination.name(), self.illumination),
            (Attribute::Invalid.name(), self.invalid),
            (Attribute::Occlusion.name(), self.occlusion),
            (Attribute::Pose.name(), self.pose),
        ]
    }
}

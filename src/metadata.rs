// src/metadata.rs

use serde::Serialize;

/// One row of the run report, describing a single copied image.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub filename: String,
    pub date: String,
    pub camera: String,
    #[serde(rename = "orig_path")]
    pub original_path: String,
    #[serde(rename = "dest_path")]
    pub destination_path: String,
}

/// Raw value of a tag as stored in the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    /// ASCII field, NUL terminator already removed.
    Ascii(Vec<u8>),
    /// BYTE or UNDEFINED field.
    Bytes(Vec<u8>),
    /// Any other type, rendered through the EXIF display rules.
    Display(String),
}

impl TagValue {
    /// Text form of the value. Byte payloads are decoded as UTF-8 with
    /// undecodable sequences dropped.
    pub fn to_text(&self) -> String {
        match self {
            TagValue::Ascii(bytes) | TagValue::Bytes(bytes) => String::from_utf8_lossy(bytes)
                .chars()
                .filter(|c| *c != char::REPLACEMENT_CHARACTER)
                .collect(),
            TagValue::Display(text) => text.clone(),
        }
    }
}

/// The handful of tags the sorter consults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageTags {
    pub date_time_original: Option<TagValue>,
    pub date_time: Option<TagValue>,
    pub model: Option<TagValue>,
    pub make: Option<TagValue>,
}

impl ImageTags {
    pub fn is_empty(&self) -> bool {
        self.date_time_original.is_none()
            && self.date_time.is_none()
            && self.model.is_none()
            && self.make.is_none()
    }
}

use crate::error::AppError;
use crate::metadata::{ImageTags, TagValue};
use exif::{Field, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads the EXIF block of the image at `path`.
///
/// Any container kamadak-exif understands is accepted (JPEG, TIFF, PNG,
/// HEIF, WebP). Only the primary image is consulted.
pub fn read_tags(path: &Path) -> Result<ImageTags, AppError> {
    log::trace!("Extracting EXIF data for image: {:?}", path);
    let file = File::open(path)?;
    let mut buf_reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut buf_reader)?;

    for field in exif.fields() {
        // Unknown tags display as their numeric id.
        log::trace!("{:?}: {} = {}", path, field.tag, field.display_value());
    }

    let lookup = |tag: Tag| exif.get_field(tag, In::PRIMARY).map(tag_value);

    Ok(ImageTags {
        date_time_original: lookup(Tag::DateTimeOriginal),
        date_time: lookup(Tag::DateTime),
        model: lookup(Tag::Model),
        make: lookup(Tag::Make),
    })
}

/// Like [`read_tags`], but a file that cannot be read yields no tags.
pub fn read_tags_or_empty(path: &Path) -> ImageTags {
    match read_tags(path) {
        Ok(tags) => {
            if tags.is_empty() {
                log::debug!("EXIF block in {:?} has no date or camera tags", path);
            }
            tags
        }
        Err(e) => {
            log::debug!("No EXIF data for {:?}: {}", path, e);
            ImageTags::default()
        }
    }
}

fn tag_value(field: &Field) -> TagValue {
    match &field.value {
        Value::Ascii(strings) => TagValue::Ascii(strings.first().cloned().unwrap_or_default()),
        Value::Byte(bytes) | Value::Undefined(bytes, _) => TagValue::Bytes(bytes.clone()),
        _ => TagValue::Display(field.display_value().to_string()),
    }
}

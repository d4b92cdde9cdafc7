use crate::config::SortMode;
use crate::metadata::{ImageTags, TagValue};
use chrono::NaiveDateTime;

pub const UNSORTED: &str = "unsorted";
pub const UNKNOWN_CAMERA: &str = "UnknownCamera";

const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// EXIF years are exactly four digits followed by a colon. chrono's `%Y`
/// alone would also take a sign or another digit count.
fn has_exif_year(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b':'
}

/// First tag that is present with non-empty text.
fn first_text(candidates: [&Option<TagValue>; 2]) -> String {
    candidates
        .into_iter()
        .flatten()
        .map(TagValue::to_text)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Capture date as `YYYY-MM-DD`, or an empty string when it is missing or
/// not in EXIF `YYYY:MM:DD HH:MM:SS` form.
pub fn capture_date(tags: &ImageTags) -> String {
    let raw = first_text([&tags.date_time_original, &tags.date_time]);
    if raw.is_empty() {
        return String::new();
    }
    if !has_exif_year(&raw) {
        log::debug!("Capture date {:?} does not start with a four-digit year", raw);
        return String::new();
    }
    match NaiveDateTime::parse_from_str(&raw, EXIF_DATETIME_FORMAT) {
        Ok(dt) => dt.date().format("%Y-%m-%d").to_string(),
        Err(e) => {
            log::debug!("Unparseable capture date {:?}: {}", raw, e);
            String::new()
        }
    }
}

/// Camera model, falling back to the make.
pub fn camera_name(tags: &ImageTags) -> String {
    first_text([&tags.model, &tags.make])
}

/// Keeps alphanumerics, spaces, `_` and `-`, then trims.
pub fn sanitize_camera(camera: &str) -> String {
    let kept: String = camera
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    match kept.trim() {
        "" => UNKNOWN_CAMERA.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Name of the subfolder below `sorted_by_<mode>` an image belongs in.
pub fn target_folder(mode: SortMode, date: &str, camera: &str) -> String {
    match mode {
        SortMode::Date if !date.is_empty() => date.to_string(),
        SortMode::Camera if !camera.is_empty() => sanitize_camera(camera),
        _ => UNSORTED.to_string(),
    }
}

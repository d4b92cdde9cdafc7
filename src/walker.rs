use crate::error::AppError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Text after the last `.` of a file name, lowercased.
pub fn extension_of(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// Image files directly inside `folder`, in file-name order.
pub fn list_images(
    folder: &Path,
    allowed_extensions: &HashSet<String>,
) -> Result<Vec<PathBuf>, AppError> {
    log::info!("Starting file discovery in {:?}", folder);
    log::debug!("Configured allowed extensions: {:?}", allowed_extensions);

    let mut images = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() {
            log::trace!("Skipping non-file entry: {:?}", path);
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        match extension_of(&name) {
            Some(ext) if allowed_extensions.contains(&ext) => {
                log::debug!("Discovered image file: {:?}", path);
                images.push(path.to_path_buf());
            }
            Some(ext) => {
                log::trace!("Skipping file due to unsupported extension {:?}: {:?}", ext, path)
            }
            None => log::trace!("Skipping file with no extension: {:?}", path),
        }
    }

    log::info!("File discovery complete, {} images found.", images.len());
    Ok(images)
}

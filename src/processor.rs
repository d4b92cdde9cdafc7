use crate::classifier;
use crate::config::{AppConfig, SortMode};
use crate::error::AppError;
use crate::extractor;
use crate::metadata::ImageRecord;
use crate::report;
use crate::walker;
use path_clean::clean;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs::{self, File, FileTimes};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Settings for one sorting run.
#[derive(Debug, Clone)]
pub struct SortOptions {
    pub mode: SortMode,
    pub report_filename: String,
    pub allowed_extensions: HashSet<String>,
    pub overwrite: bool,
    pub verify_copies: bool,
}

impl From<&AppConfig> for SortOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            mode: config.sort_by,
            report_filename: config.report_filename.clone(),
            allowed_extensions: config.allowed_extensions.clone(),
            overwrite: config.overwrite,
            verify_copies: config.verify_copies,
        }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub report_path: PathBuf,
    pub output_root: PathBuf,
    pub records: Vec<ImageRecord>,
}

impl RunSummary {
    /// Closing lines printed after the per-file progress.
    pub fn summary_lines(&self) -> [String; 3] {
        [
            String::new(),
            format!("Report written to: {}", self.report_path.display()),
            format!("Sorted output folder: {}", self.output_root.display()),
        ]
    }
}

pub fn progress_line(file_name: &str, relative_destination: &Path) -> String {
    format!("[+] {} -> {}", file_name, relative_destination.display())
}

/// Fails with [`AppError::InvalidInput`] unless `folder` is an existing directory.
pub fn validate_input(folder: &Path) -> Result<(), AppError> {
    if folder.is_dir() {
        Ok(())
    } else {
        Err(AppError::InvalidInput(folder.to_path_buf()))
    }
}

/// Copies every image in `folder` into `sorted_by_<mode>/<group>/` and writes
/// the report next to the images.
pub fn organize(folder: &Path, options: &SortOptions) -> Result<RunSummary, AppError> {
    validate_input(folder)?;
    let folder = clean(std::path::absolute(folder)?);
    let output_root = folder.join(format!("sorted_by_{}", options.mode));
    fs::create_dir_all(&output_root)?;

    log::info!("Sorting {:?} by {} into {:?}", folder, options.mode, output_root);

    let mut records = Vec::new();
    for path in walker::list_images(&folder, &options.allowed_extensions)? {
        if let Some(record) = process_image(&folder, &output_root, &path, options)? {
            records.push(record);
        }
    }

    let report_path = folder.join(&options.report_filename);
    report::write_report(&report_path, &records)?;
    log::info!("Processed {} images", records.len());

    Ok(RunSummary {
        report_path,
        output_root,
        records,
    })
}

fn process_image(
    folder: &Path,
    output_root: &Path,
    path: &Path,
    options: &SortOptions,
) -> Result<Option<ImageRecord>, AppError> {
    let file_name = match path.file_name() {
        Some(name) => name,
        None => return Ok(None),
    };

    let tags = extractor::read_tags_or_empty(path);
    let date = classifier::capture_date(&tags);
    let camera = classifier::camera_name(&tags);
    let group = classifier::target_folder(options.mode, &date, &camera);
    log::debug!("{:?}: date={:?} camera={:?} -> {}", path, date, camera, group);

    let target_dir = output_root.join(&group);
    fs::create_dir_all(&target_dir)?;
    let destination = target_dir.join(file_name);

    if destination.exists() {
        if is_same_file(path, &destination)? {
            log::warn!("Skipping {:?}: it is the same file as {:?}", path, destination);
            return Ok(None);
        }
        if !options.overwrite {
            log::warn!("Skipping {:?}: {:?} already exists", path, destination);
            return Ok(None);
        }
        log::warn!("Overwriting existing file {:?}", destination);
    }

    copy_with_metadata(path, &destination)?;
    if options.verify_copies {
        verify_copy(path, &destination)?;
    }

    let relative = destination.strip_prefix(folder).unwrap_or(destination.as_path());
    println!("{}", progress_line(&file_name.to_string_lossy(), relative));

    Ok(Some(ImageRecord {
        filename: file_name.to_string_lossy().into_owned(),
        date,
        camera,
        original_path: path.to_string_lossy().into_owned(),
        destination_path: destination.to_string_lossy().into_owned(),
    }))
}

/// True when both paths resolve to one file, through symlinks or hard links.
fn is_same_file(a: &Path, b: &Path) -> Result<bool, AppError> {
    let (meta_a, meta_b) = match (fs::metadata(a), fs::metadata(b)) {
        (Ok(meta_a), Ok(meta_b)) => (meta_a, meta_b),
        _ => return Ok(false),
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok(meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino())
    }
    #[cfg(not(unix))]
    {
        let _ = (meta_a, meta_b);
        Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
    }
}

/// Copies content, then access/modification times, then permission bits.
/// Refuses to copy a file onto itself, which would truncate it.
pub fn copy_with_metadata(source: &Path, destination: &Path) -> Result<(), AppError> {
    if is_same_file(source, destination)? {
        return Err(AppError::SameFile(source.to_path_buf()));
    }
    let metadata = fs::metadata(source)?;
    let mut reader = File::open(source)?;
    let mut writer = File::create(destination)?;
    io::copy(&mut reader, &mut writer)?;

    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    writer.set_times(times)?;
    drop(writer);

    fs::set_permissions(destination, metadata.permissions())?;
    log::trace!("Copied {:?} to {:?}", source, destination);
    Ok(())
}

pub fn file_digest(path: &Path) -> Result<String, AppError> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0; 8192];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn verify_copy(source: &Path, destination: &Path) -> Result<(), AppError> {
    let expected = file_digest(source)?;
    let actual = file_digest(destination)?;
    log::debug!("Digest for {:?}: {}", source, expected);
    if expected != actual {
        return Err(AppError::CopyMismatch {
            source_path: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }
    Ok(())
}

use crate::error::AppError;
use crate::metadata::ImageRecord;
use std::path::Path;

/// Writes `records` as CSV, replacing whatever is at `path`.
pub fn write_report(path: &Path, records: &[ImageRecord]) -> Result<(), AppError> {
    if path.exists() {
        log::info!("Overwriting existing report {:?}", path);
    }
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(["filename", "date", "camera", "orig_path", "dest_path"])?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    log::debug!("Wrote {} rows to {:?}", records.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn record(name: &str, date: &str) -> ImageRecord {
        ImageRecord {
            filename: name.to_string(),
            date: date.to_string(),
            camera: String::new(),
            original_path: format!("/in/{}", name),
            destination_path: format!("/in/sorted_by_date/x/{}", name),
        }
    }

    #[test]
    fn header_written_even_without_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_report(&path, &[]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "filename,date,camera,orig_path,dest_path\r\n"
        );
    }

    #[test]
    fn rows_follow_input_order_and_replace_old_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        fs::write(&path, "stale contents that must disappear\n").unwrap();

        write_report(&path, &[record("a.jpg", "2020-05-01"), record("b, c.jpg", "")]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["filename", "date", "camera", "orig_path", "dest_path"]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "a.jpg");
        assert_eq!(&rows[0][1], "2020-05-01");
        assert_eq!(&rows[1][0], "b, c.jpg");
        assert_eq!(&rows[1][1], "");
        assert_eq!(&rows[1][4], "/in/sorted_by_date/x/b, c.jpg");
    }
}

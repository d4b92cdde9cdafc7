//! Minimal EXIF-bearing images for tests.

/// ASCII tags to embed. `None` leaves the tag out.
#[derive(Default)]
pub struct ExifFixture<'a> {
    pub make: Option<&'a str>,
    pub model: Option<&'a str>,
    pub date_time: Option<&'a str>,
    pub date_time_original: Option<&'a str>,
}

const ASCII: u16 = 2;
const LONG: u16 = 4;

/// Little-endian TIFF stream with IFD0 and, when needed, an Exif IFD.
pub fn tiff_with_exif(fixture: &ExifFixture) -> Vec<u8> {
    let mut ifd0: Vec<(u16, &str)> = Vec::new();
    if let Some(v) = fixture.make {
        ifd0.push((0x010f, v));
    }
    if let Some(v) = fixture.model {
        ifd0.push((0x0110, v));
    }
    if let Some(v) = fixture.date_time {
        ifd0.push((0x0132, v));
    }
    let exif_ifd: Vec<(u16, &str)> = fixture
        .date_time_original
        .map(|v| vec![(0x9003, v)])
        .unwrap_or_default();

    let ifd_len = |entries: usize| 2 + 12 * entries + 4;
    let ifd0_count = ifd0.len() + usize::from(!exif_ifd.is_empty());
    let exif_offset = 8 + ifd_len(ifd0_count);
    let mut data_offset = exif_offset + if exif_ifd.is_empty() { 0 } else { ifd_len(exif_ifd.len()) };

    let mut out = b"II*\0".to_vec();
    out.extend_from_slice(&8u32.to_le_bytes());
    let mut data = Vec::new();

    let mut write_ifd = |out: &mut Vec<u8>, entries: &[(u16, &str)], pointer: Option<u32>| {
        let count = entries.len() + usize::from(pointer.is_some());
        out.extend_from_slice(&(count as u16).to_le_bytes());
        for (tag, text) in entries {
            let mut bytes = text.as_bytes().to_vec();
            bytes.push(0);
            out.extend_from_slice(&tag.to_le_bytes());
            out.extend_from_slice(&ASCII.to_le_bytes());
            out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            if bytes.len() <= 4 {
                bytes.resize(4, 0);
                out.extend_from_slice(&bytes);
            } else {
                out.extend_from_slice(&(data_offset as u32).to_le_bytes());
                data_offset += bytes.len();
                data.extend_from_slice(&bytes);
            }
        }
        if let Some(offset) = pointer {
            out.extend_from_slice(&0x8769u16.to_le_bytes());
            out.extend_from_slice(&LONG.to_le_bytes());
            out.extend_from_slice(&1u32.to_le_bytes());
            out.extend_from_slice(&offset.to_le_bytes());
        }
        out.extend_from_slice(&0u32.to_le_bytes());
    };

    let pointer = (!exif_ifd.is_empty()).then_some(exif_offset as u32);
    write_ifd(&mut out, ifd0.as_slice(), pointer);
    if !exif_ifd.is_empty() {
        write_ifd(&mut out, exif_ifd.as_slice(), None);
    }
    out.extend_from_slice(&data);
    out
}

/// SOI, an APP1 Exif segment and EOI.
pub fn jpeg_with_exif(fixture: &ExifFixture) -> Vec<u8> {
    let tiff = tiff_with_exif(fixture);
    let mut out = vec![0xff, 0xd8, 0xff, 0xe1];
    out.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&[0xff, 0xd9]);
    out
}

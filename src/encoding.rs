//! Encoding detection for lyric files
//!
//! Lyrics saved from different tools come as UTF-8, UTF-16 or legacy code
//! pages (Windows-1254 is common for Turkish). Files are sniffed and
//! transcoded to UTF-8 before analysis.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Bytes sampled for detection
const SAMPLE_SIZE: usize = 64 * 1024;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Rough confidence (0.0 - 1.0)
    pub confidence: f32,
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Guess the encoding of a byte sample
pub fn detect_encoding(sample: &[u8]) -> EncodingInfo {
    if sample.is_empty() {
        return EncodingInfo::default();
    }

    if let Some(encoding) = detect_bom(sample) {
        return EncodingInfo {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    let encoding = detector.guess(None, true);

    let confidence = if encoding == encoding_rs::UTF_8 {
        if std::str::from_utf8(sample).is_ok() {
            1.0
        } else {
            0.5
        }
    } else {
        0.8
    };

    EncodingInfo {
        name: encoding.name(),
        confidence,
        encoding,
    }
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    if content.len() >= 3 && content[0..3] == [0xEF, 0xBB, 0xBF] {
        return Some(encoding_rs::UTF_8);
    }
    if content.len() >= 2 {
        if content[0..2] == [0xFE, 0xFF] {
            return Some(encoding_rs::UTF_16BE);
        }
        if content[0..2] == [0xFF, 0xFE] {
            return Some(encoding_rs::UTF_16LE);
        }
    }
    None
}

/// Decode raw bytes to UTF-8 text, sniffing the encoding
pub fn decode_bytes(bytes: &[u8]) -> Result<String> {
    let sample = &bytes[..bytes.len().min(SAMPLE_SIZE)];
    let info = detect_encoding(sample);

    if info.encoding != encoding_rs::UTF_8 {
        log::debug!("Transcoding from {} (confidence {:.1})", info.name, info.confidence);
    }

    let mut decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(info.encoding))
        .bom_override(true)
        .build(bytes);

    let mut text = String::new();
    decoder.read_to_string(&mut text)?;
    Ok(text)
}

/// Read a whole lyric file as UTF-8
pub fn read_text_file(path: &Path) -> Result<String> {
    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(|e| Error::io(e, path.to_path_buf()))?;

    decode_bytes(&bytes).map_err(|e| match e {
        Error::Io { source, .. } => Error::io(source, path.to_path_buf()),
        other => other,
    })
}

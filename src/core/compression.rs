// Input decompression backends, selected by file extension

use crate::core::error::{AqError, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCompression {
    None,
    Gzip,
    Lz4,
    Zstd,
}

impl InputCompression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => InputCompression::Gzip,
            Some("lz4") => InputCompression::Lz4,
            Some("zst") => InputCompression::Zstd,
            _ => InputCompression::None,
        }
    }
}

pub fn decoder<R: Read + 'static>(
    reader: R,
    compression: InputCompression,
) -> Result<Box<dyn Read>> {
    match compression {
        InputCompression::None => Ok(Box::new(reader)),

        InputCompression::Gzip => Ok(Box::new(GzDecoder::new(reader))),

        #[cfg(feature = "lz4")]
        InputCompression::Lz4 => {
            let decoder = lz4::Decoder::new(reader)
                .map_err(|e| AqError::DecompressionFailed(format!("LZ4: {e}")))?;
            Ok(Box::new(decoder))
        }

        #[cfg(not(feature = "lz4"))]
        InputCompression::Lz4 => {
            Err(AqError::UnsupportedCompression("lz4".to_string()))
        }

        #[cfg(feature = "zstd")]
        InputCompression::Zstd => {
            let decoder = zstd::Decoder::new(reader)
                .map_err(|e| AqError::DecompressionFailed(format!("Zstd: {e}")))?;
            Ok(Box::new(decoder))
        }

        #[cfg(not(feature = "zstd"))]
        InputCompression::Zstd => {
            Err(AqError::UnsupportedCompression("zstd".to_string()))
        }
    }
}

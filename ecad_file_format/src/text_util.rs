use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn read_with_unknown_encoding(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
    let size = file.metadata().map(|m| m.len() as usize).ok();
    let mut buf = Vec::new();
    buf.try_reserve_exact(size.unwrap_or(0))?;
    file.read_to_end(&mut buf)
        .with_context(|| format!("Failed to read {path:?}"))?;
    Ok(decode_unknown_encoding(&buf))
}

/// Decodes `buf` with a guessed encoding. A byte order mark takes precedence over the guess
/// and is stripped from the output.
pub fn decode_unknown_encoding(buf: &[u8]) -> String {
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(buf, true);
    let encoding = detector.guess(None, true);
    let (text, used_encoding, had_errors) = encoding.decode(buf);
    debug!("Decoding as {}", used_encoding.name());
    if had_errors {
        warn!(
            "Malformed {} sequences replaced while decoding",
            used_encoding.name()
        );
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_bom_is_stripped() {
        let text = decode_unknown_encoding(b"\xEF\xBB\xBFDesignator,Value\r\nR1,10k\r\n");
        assert!(text.starts_with("Designator"));
    }

    #[test]
    fn utf8_without_bom_is_kept() {
        let text = decode_unknown_encoding("Designator,Value\nC1,1µF\n".as_bytes());
        assert!(text.contains("1µF"));
    }
}

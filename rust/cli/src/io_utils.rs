//! Input helpers shared by every command that takes `--input`.
//!
//! `-` reads standard input; a path ending in `.zst` is decompressed with
//! Zstandard before use. A leading UTF-8 BOM is stripped in every case.

use std::io::Read;

// Room exports are small; this bounds a corrupt frame header.
const MAX_DECOMPRESSED: usize = 64 * 1024 * 1024;

/// Reads the text named by `path`, with `-` meaning `stdin`.
pub fn read_input(path: &str, stdin: &mut dyn Read) -> Result<String, String> {
    if path == "-" {
        let mut content = String::new();
        stdin
            .read_to_string(&mut content)
            .map_err(|e| format!("stdin: {}", e))?;
        strip_utf8_bom(&mut content);
        return Ok(content);
    }
    read_text_auto(path)
}

/// Read text file with automatic .zst decompression detection.
///
/// ```rust,no_run
/// # use handscope_cli::io_utils::read_text_auto;
/// let plain = read_text_auto("hands.txt").unwrap();
/// let packed = read_text_auto("hands.txt.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| format!("{}: {}", path, e))?;
        let dec = zstd::bulk::decompress(&comp, MAX_DECOMPRESSED)
            .map_err(|e| format!("{}: {}", path, e))?;
        String::from_utf8(dec).map_err(|e| format!("{}: {}", path, e))?
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn dash_reads_stdin() {
        let mut stdin = Cursor::new("\u{feff}PokerStars Hand #1".as_bytes());
        assert_eq!(read_input("-", &mut stdin).unwrap(), "PokerStars Hand #1");
    }

    #[test]
    fn test_strip_utf8_bom_no_bom() {
        let mut s = "hello".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "hello");
    }

    #[test]
    fn zst_files_are_decompressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hands.txt.zst");
        let packed = zstd::bulk::compress(b"Seat 1: Hero (100 in chips)", 3).unwrap();
        std::fs::write(&path, packed).unwrap();
        let text = read_text_auto(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "Seat 1: Hero (100 in chips)");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_text_auto("/definitely/not/here.txt").unwrap_err();
        assert!(err.starts_with("/definitely/not/here.txt: "));
    }
}

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("page is not valid {encoding}")]
    Malformed { encoding: String },
}

/// Decode page bytes into UTF-8: BOM, then the Content-Type charset, then
/// chardetng's guess. Malformed sequences are an error rather than U+FFFD noise.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<String, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_label)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_from_content_type() {
        let text = decode_page(b"caf\xe9", Some("text/html; Charset=\"ISO-8859-1\"")).unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn bom_wins_over_header() {
        let text =
            decode_page(b"\xEF\xBB\xBFhello", Some("text/html; charset=windows-1252")).unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = decode_page(b"ab\xff\xfd", Some("text/html; charset=utf-8")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Malformed {
                encoding: "UTF-8".into()
            }
        );
    }
}

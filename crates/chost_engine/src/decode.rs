use chardetng::EncodingDetector;
use chost_logging::chost_warn;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Some byte sequences were invalid and became U+FFFD.
    pub had_errors: bool,
}

/// Decode a response body into UTF-8, replacing malformed sequences.
///
/// Order: byte order mark, then the Content-Type charset, then chardetng's guess.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(&['"', '\''][..]).to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedHtml {
    // Strips a matching BOM, which `decode` would otherwise sniff again.
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        chost_warn!(
            "body is not valid {}; malformed bytes replaced",
            encoding.name()
        );
    }
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
        had_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::{charset_param, decode_html};

    #[test]
    fn charset_is_read_case_insensitively_and_unquoted() {
        assert_eq!(
            charset_param("text/html; Charset=\"ISO-8859-1\"").as_deref(),
            Some("ISO-8859-1")
        );
        assert_eq!(charset_param("text/html"), None);
    }

    #[test]
    fn bom_wins_over_header() {
        let decoded = decode_html(b"\xEF\xBB\xBFhello", Some("text/html; charset=ISO-8859-1"));
        assert_eq!(decoded.html, "hello");
        assert_eq!(decoded.encoding_label, "UTF-8");
        assert!(!decoded.had_errors);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let decoded = decode_html(b"caf\xFF ok", Some("text/html; charset=utf-8"));
        assert_eq!(decoded.html, "caf\u{FFFD} ok");
        assert_eq!(decoded.encoding_label, "UTF-8");
        assert!(decoded.had_errors);
    }
}

//! XML decoding utilities.
//!
//! ContentDirectory responses carry their DIDL-Lite payload as escaped text
//! inside the SOAP envelope, and some firmware escapes it a second time. The
//! decoder here is deliberately lenient: unknown entities and bare ampersands
//! (common in resource URLs) are passed through instead of rejected.

use crate::error::{ParseError, ParseResult};
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// Upper bound on decoding passes applied by [`unescape_markup`].
pub const MAX_DECODE_PASSES: usize = 3;

/// Parse an XML string into a deserializable type.
pub fn parse<T: DeserializeOwned>(xml: &str) -> ParseResult<T> {
    quick_xml::de::from_str(xml).map_err(|e| ParseError::XmlDeserializationFailed(e.to_string()))
}

/// Decode one level of XML character and entity references.
///
/// Handles the five predefined entities plus decimal and hexadecimal
/// character references. Anything else is copied verbatim.
///
/// # Example
///
/// Input: `&lt;dc:title&gt;Tom &amp; Jerry&lt;/dc:title&gt;`
/// Output: `<dc:title>Tom & Jerry</dc:title>`
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // Entity names are short; a ';' further away means a bare ampersand.
        let decoded = tail
            .char_indices()
            .take(12)
            .find(|&(_, c)| c == ';')
            .and_then(|(end, _)| decode_reference(&tail[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                result.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                result.push('&');
                rest = &tail[1..];
            }
        }
    }
    result.push_str(rest);

    Cow::Owned(result)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let hex = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"));
            let code = if let Some(hex) = hex {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

/// Decode a response body until it no longer contains escaped markup.
///
/// A body is considered escaped while it still contains an escaped `<`
/// (`&lt;`, `&amp;lt;`, ...). At most [`MAX_DECODE_PASSES`] passes are
/// applied, so a hostile body cannot make this loop forever.
pub fn unescape_markup(body: &str) -> String {
    let mut current = body.to_string();
    for _ in 0..MAX_DECODE_PASSES {
        if !has_escaped_markup(&current) {
            break;
        }
        current = decode_entities(&current).into_owned();
    }
    current
}

fn has_escaped_markup(text: &str) -> bool {
    text.match_indices("lt;")
        .any(|(i, _)| text[..i].trim_end_matches("amp;").ends_with('&'))
}

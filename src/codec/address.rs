//! Opaque host segment codec.
//!
//! The upstream authority (`host[:port]`) is base64 encoded with the URL-safe
//! alphabet and no padding, so the result can sit in a single path segment
//! without escaping. Decoding accepts padded input as well.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use url::Url;

use crate::error::{GatewayError, Result};

const HOST_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode an upstream authority into an opaque path segment.
pub fn encode_host(host: &str) -> String {
    HOST_ENGINE.encode(host.as_bytes())
}

/// Decode an opaque path segment back into the upstream authority.
///
/// Fails with [`GatewayError::MalformedAddress`] if the segment is not
/// codec output or does not decode to a plain `host[:port]`.
pub fn decode_host(segment: &str) -> Result<String> {
    if segment.is_empty() {
        return Err(GatewayError::MalformedAddress("empty host segment".into()));
    }

    let bytes = HOST_ENGINE
        .decode(segment)
        .map_err(|e| GatewayError::MalformedAddress(format!("host segment: {e}")))?;
    let host = String::from_utf8(bytes)
        .map_err(|_| GatewayError::MalformedAddress("host segment is not utf-8".into()))?;

    if host.is_empty() || host.contains(|c: char| matches!(c, '/' | '?' | '#' | '@' | '\\') || c.is_whitespace()) {
        return Err(GatewayError::MalformedAddress(format!("not an authority: {host:?}")));
    }

    // Anything a URL parser would not accept as an authority is tampering.
    let probe = Url::parse(&format!("https://{host}/"))
        .map_err(|e| GatewayError::MalformedAddress(format!("not an authority: {e}")))?;
    if probe.host_str().is_none() {
        return Err(GatewayError::MalformedAddress(format!("not an authority: {host:?}")));
    }

    Ok(host)
}

/// Check that a token can be spliced into an upstream path as one segment.
pub fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(GatewayError::MalformedAddress("empty token".into()));
    }
    if token.contains(|c: char| matches!(c, '/' | '?' | '#' | '\\') || c.is_whitespace()) {
        return Err(GatewayError::MalformedAddress(format!("invalid token: {token:?}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for host in [
            "cdn7.example.com",
            "edge9.example.net",
            "127.0.0.1:8443",
            "a",
            "ab",
            "abc",
            "[::1]:443",
        ] {
            let encoded = encode_host(host);
            assert_eq!(decode_host(&encoded).unwrap(), host);
        }
    }

    #[test]
    fn test_encoded_is_path_safe() {
        // Inputs chosen to hit the '+' and '/' positions of the standard alphabet.
        for host in ["cdn>>>.example.com", "edge???x.example.net", "h.example.org"] {
            let encoded = encode_host(host);
            assert!(
                encoded
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "unsafe segment {encoded}"
            );
        }
    }

    #[test]
    fn test_decode_accepts_padding() {
        // "ab" -> "YWI" unpadded, "YWI=" padded
        assert_eq!(decode_host("YWI").unwrap(), "ab");
        assert_eq!(decode_host("YWI=").unwrap(), "ab");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_host(""), Err(GatewayError::MalformedAddress(_))));
        assert!(matches!(decode_host("!!!"), Err(GatewayError::MalformedAddress(_))));
        // Valid base64, but decodes to a path instead of an authority.
        let smuggled = encode_host("evil.example.com/extra");
        assert!(matches!(decode_host(&smuggled), Err(GatewayError::MalformedAddress(_))));
        let userinfo = encode_host("user@evil.example.com");
        assert!(matches!(decode_host(&userinfo), Err(GatewayError::MalformedAddress(_))));
    }

    #[test]
    fn test_validate_token() {
        assert!(validate_token("abcTOKEN123").is_ok());
        assert!(validate_token("").is_err());
        assert!(validate_token("a/b").is_err());
        assert!(validate_token("a?b").is_err());
    }
}

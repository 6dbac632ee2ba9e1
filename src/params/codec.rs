//! Parameter bag token codec.
//!
//! A bag serializes to compact JSON and then percent-encodes into a single
//! URL-safe token. Decoding is the exact inverse and fails soft: any token
//! that does not parse yields the bag's documented defaults, so callers
//! never observe partial or corrupt state.

use crate::core::Result;
use crate::params::bag::ParamBag;
use tracing::debug;
use url::form_urlencoded;

/// Encode a parameter bag into a URL-safe token.
///
/// Reserved URL characters and non-ASCII content are percent-encoded so the
/// token can be embedded directly as a query-string value.
pub fn encode<T: ParamBag>(bag: &T) -> Result<String> {
    let json = encode_json(bag)?;
    Ok(form_urlencoded::byte_serialize(json.as_bytes()).collect())
}

/// Decode a percent-encoded token back into a parameter bag.
///
/// `None`, empty, and malformed tokens all decode to `T::default()`.
pub fn decode<T: ParamBag>(token: Option<&str>) -> T {
    let Some(token) = token else {
        return T::default();
    };
    if token.is_empty() {
        return T::default();
    }
    // Percent-decode the standalone component by parsing it as a lone
    // query-string value. A token with stray separators fails JSON parsing
    // below and falls back to defaults.
    let pair = format!("v={}", token);
    let decoded = form_urlencoded::parse(pair.as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();
    decode_json::<T>(Some(&decoded))
}

/// Serialize a bag to its compact JSON form (the decoded token layer).
pub fn encode_json<T: ParamBag>(bag: &T) -> Result<String> {
    Ok(serde_json::to_string(bag)?)
}

/// Parse a bag from its JSON form, falling back to defaults on any failure.
pub fn decode_json<T: ParamBag>(json: Option<&str>) -> T {
    let Some(json) = json else {
        return T::default();
    };
    if json.is_empty() {
        return T::default();
    }
    match serde_json::from_str(json) {
        Ok(bag) => bag,
        Err(err) => {
            debug!(key = T::KEY, error = %err, "malformed parameter token, using defaults");
            T::default()
        },
    }
}

/// Parse a bag from its JSON form, enforcing a size ceiling.
///
/// Oversized payloads are treated as malformed and decode to defaults.
pub fn decode_json_bounded<T: ParamBag>(json: Option<&str>, max_bytes: usize) -> T {
    if let Some(json) = json {
        if json.len() > max_bytes {
            debug!(
                key = T::KEY,
                len = json.len(),
                max = max_bytes,
                "parameter token exceeds size limit, using defaults"
            );
            return T::default();
        }
    }
    decode_json(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::bag::{ApiMonitoringParams, MonitoringView};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_default_bag() {
        let bag = ApiMonitoringParams::default();
        let token = encode(&bag).unwrap();
        let decoded: ApiMonitoringParams = decode(Some(&token));
        assert_eq!(decoded, bag);
    }

    #[test]
    fn test_round_trip_unicode_and_symbols() {
        let bag = ApiMonitoringParams {
            selected_domain: "пример.рф/path?=&#+%".to_string(),
            selected_end_point_name: "GET /v1/ユーザー".to_string(),
            selected_view: MonitoringView::EndpointDetails,
            ..ApiMonitoringParams::default()
        };
        let token = encode(&bag).unwrap();
        let decoded: ApiMonitoringParams = decode(Some(&token));
        assert_eq!(decoded, bag);
    }

    #[test]
    fn test_token_is_url_safe() {
        let bag = ApiMonitoringParams {
            selected_domain: "a&b=c d".to_string(),
            ..ApiMonitoringParams::default()
        };
        let token = encode(&bag).unwrap();
        assert!(!token.contains('&'));
        assert!(!token.contains('='));
        assert!(!token.contains(' '));
    }

    #[test]
    fn test_malformed_token_decodes_to_defaults() {
        let decoded: ApiMonitoringParams = decode(Some("not-json"));
        assert_eq!(decoded, ApiMonitoringParams::default());

        let decoded: ApiMonitoringParams = decode(Some("%7Bbroken"));
        assert_eq!(decoded, ApiMonitoringParams::default());
    }

    #[test]
    fn test_missing_and_empty_tokens_decode_to_defaults() {
        let decoded: ApiMonitoringParams = decode(None);
        assert_eq!(decoded, ApiMonitoringParams::default());

        let decoded: ApiMonitoringParams = decode(Some(""));
        assert_eq!(decoded, ApiMonitoringParams::default());
    }

    #[test]
    fn test_oversized_token_decodes_to_defaults() {
        let bag = ApiMonitoringParams {
            selected_domain: "x".repeat(512),
            ..ApiMonitoringParams::default()
        };
        let json = encode_json(&bag).unwrap();
        let decoded: ApiMonitoringParams = decode_json_bounded(Some(&json), 64);
        assert_eq!(decoded, ApiMonitoringParams::default());

        let decoded: ApiMonitoringParams = decode_json_bounded(Some(&json), 8192);
        assert_eq!(decoded, bag);
    }
}

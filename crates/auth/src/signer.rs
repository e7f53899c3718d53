//! HMAC-SHA1 request signing for the Liverate API.
//!
//! The server recomputes the signature from the request it receives, so every
//! step here has to be byte-for-byte reproducible:
//!
//! 1. Merge the signed headers (`auth_api`, `auth_timestamp`) into the parameters
//! 2. Percent-encode every value (keys stay as they are)
//! 3. Sort by key and join as `k=v&k=v`
//! 4. Base string: `METHOD&enc(url)&enc(parameters)`
//! 5. HMAC-SHA1 keyed with `api_key&timestamp&api_secret`, base64 output

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;

use crate::credentials::ApiCredentials;

type HmacSha1 = Hmac<Sha1>;

/// Signed parameter carrying the API key.
pub const AUTH_API: &str = "auth_api";

/// Signed parameter carrying the request timestamp.
pub const AUTH_TIMESTAMP: &str = "auth_timestamp";

/// Characters left untouched by `encode_component`.
///
/// Matches the unreserved set of ECMAScript `encodeURIComponent`, which is what
/// the server uses when it rebuilds the base string.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single URL component.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Reverse `encode_component`.
///
/// Malformed escapes are kept literally and invalid UTF-8 is replaced, so this
/// never fails.
pub fn decode_component(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Build the HMAC key for one request: `api_key&timestamp&api_secret`.
pub fn signature_token(api_key: &str, timestamp_ms: i64, api_secret: &str) -> String {
    format!("{}&{}&{}", api_key, timestamp_ms, api_secret)
}

/// Merge, encode and sort the parameters that take part in the signature.
///
/// Header entries overwrite parameters with the same key. When a key appears
/// more than once in `parameters` the last value wins.
pub fn canonical_parameters(
    parameters: &[(&str, &str)],
    headers: &[(&str, &str)],
) -> Vec<(String, String)> {
    let mut merged: BTreeMap<&str, &str> = BTreeMap::new();
    for &(key, value) in parameters.iter().chain(headers) {
        merged.insert(key, value);
    }

    merged
        .into_iter()
        .map(|(key, value)| (key.to_string(), encode_component(value)))
        .collect()
}

/// Join already-canonical parameters as `k1=v1&k2=v2`.
pub fn serialize_parameters(canonical: &[(String, String)]) -> String {
    canonical
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the string that gets signed.
pub fn signature_base_string(method: &str, url: &str, canonical: &[(String, String)]) -> String {
    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode_component(url),
        encode_component(&serialize_parameters(canonical))
    )
}

/// Compute the base64 HMAC-SHA1 of `message` keyed with `token`.
pub fn hmac_sha1_base64(token: &str, message: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(token.as_bytes()).expect("HMAC can take key of any size");

    mac.update(message.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Compute the request signature.
///
/// Pure function: identical inputs always produce identical output, and the
/// insertion order of `parameters` does not matter.
pub fn build_signature(
    method: &str,
    url: &str,
    parameters: &[(&str, &str)],
    headers: &[(&str, &str)],
    token: &str,
) -> String {
    let canonical = canonical_parameters(parameters, headers);
    let base = signature_base_string(method, url, &canonical);
    hmac_sha1_base64(token, &base)
}

/// Result of signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParameters {
    /// Base64 signature for the `SIGNATURE` header.
    pub signature: String,
    /// The signed parameter set: merged with the auth headers, values
    /// percent-encoded, sorted by key.
    pub parameters: Vec<(String, String)>,
}

impl SignedParameters {
    /// The signed parameters with their values decoded back, ready to be sent
    /// as a form body.
    pub fn decoded(&self) -> Vec<(String, String)> {
        self.parameters
            .iter()
            .map(|(k, v)| (k.clone(), decode_component(v)))
            .collect()
    }
}

/// Request signer for authenticated Liverate API calls.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a ApiCredentials) -> Self {
        Self { credentials }
    }

    /// Sign a request made at `timestamp_ms`.
    ///
    /// The same timestamp is used for the `auth_timestamp` parameter and the
    /// HMAC key, so callers must send that exact value in the `TIMESTAMP` header.
    pub fn sign_request(
        &self,
        method: &str,
        url: &str,
        parameters: &[(&str, &str)],
        timestamp_ms: i64,
    ) -> SignedParameters {
        let api_key = self.credentials.api_key();
        let timestamp = timestamp_ms.to_string();
        let headers = [(AUTH_API, api_key), (AUTH_TIMESTAMP, timestamp.as_str())];

        let token = signature_token(api_key, timestamp_ms, self.credentials.expose_secret());
        let canonical = canonical_parameters(parameters, &headers);
        let base = signature_base_string(method, url, &canonical);

        SignedParameters {
            signature: hmac_sha1_base64(&token, &base),
            parameters: canonical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "AK123";
    const SECRET: &str = "SECRET";
    const TS: i64 = 1_000_000_000_000;
    const RATE_GET: &str = "http://rate.kagogo.co/v1/rate/get";
    const FEEDBACK_SAVE: &str = "http://rate.kagogo.co/v1/feedback/save";

    fn token() -> String {
        signature_token(KEY, TS, SECRET)
    }

    fn sign(method: &str, url: &str, params: &[(&str, &str)]) -> String {
        let ts = TS.to_string();
        let headers = [(AUTH_API, KEY), (AUTH_TIMESTAMP, ts.as_str())];
        build_signature(method, url, params, &headers, &token())
    }

    #[test]
    fn test_token_layout() {
        assert_eq!(token(), "AK123&1000000000000&SECRET");
    }

    #[test]
    fn test_known_vector_get() {
        assert_eq!(
            sign("GET", RATE_GET, &[("objectId", "42")]),
            "iYe+p94h6q/oprxF6y78bx6l+U8="
        );
    }

    #[test]
    fn test_known_vector_get_with_query_in_url() {
        assert_eq!(
            sign(
                "GET",
                "http://rate.kagogo.co/v1/rate/get?objectId=42",
                &[("objectId", "42")]
            ),
            "hiojjghz1Rp0g22LL/8T82DISvQ="
        );
    }

    #[test]
    fn test_known_vector_empty_parameters() {
        assert_eq!(sign("POST", FEEDBACK_SAVE, &[]), "D+WvPs+Y7lQfVfYWcCcL+f+CWeA=");
    }

    #[test]
    fn test_known_vector_reserved_and_unicode_values() {
        let params = [("objectId", "42"), ("comment", "a&b=c d ünï ~*'()!")];
        assert_eq!(
            sign("POST", FEEDBACK_SAVE, &params),
            "NXEhfC1E+ZbOadkqOijVkElnS90="
        );
    }

    #[test]
    fn test_base_string_double_encodes_values() {
        let ts = TS.to_string();
        let headers = [(AUTH_API, KEY), (AUTH_TIMESTAMP, ts.as_str())];
        let canonical = canonical_parameters(&[("comment", "a&b=c d ünï ~*'()!")], &headers);
        let base = signature_base_string("post", FEEDBACK_SAVE, &canonical);

        assert_eq!(
            base,
            "POST&http%3A%2F%2Frate.kagogo.co%2Fv1%2Ffeedback%2Fsave&\
             auth_api%3DAK123%26auth_timestamp%3D1000000000000%26\
             comment%3Da%2526b%253Dc%2520d%2520%25C3%25BCn%25C3%25AF%2520~*'()!"
        );
    }

    #[test]
    fn test_method_is_uppercased() {
        assert_eq!(
            sign("get", RATE_GET, &[("objectId", "42")]),
            sign("GET", RATE_GET, &[("objectId", "42")])
        );
    }

    #[test]
    fn test_deterministic() {
        let params = [("objectId", "42"), ("rating", "4.5")];
        assert_eq!(
            sign("POST", RATE_GET, &params),
            sign("POST", RATE_GET, &params)
        );
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let forward = [("alpha", "1"), ("middle", "2"), ("zebra", "3")];
        let backward = [("zebra", "3"), ("middle", "2"), ("alpha", "1")];
        assert_eq!(
            sign("GET", RATE_GET, &forward),
            sign("GET", RATE_GET, &backward)
        );
    }

    #[test]
    fn test_headers_overwrite_parameters() {
        // A caller-supplied auth_api must not change what gets signed.
        assert_eq!(
            sign("GET", RATE_GET, &[("objectId", "42"), ("auth_api", "spoof")]),
            "iYe+p94h6q/oprxF6y78bx6l+U8="
        );
    }

    #[test]
    fn test_duplicate_parameter_last_wins() {
        assert_eq!(
            sign("GET", RATE_GET, &[("objectId", "7"), ("objectId", "42")]),
            sign("GET", RATE_GET, &[("objectId", "42")])
        );
    }

    #[test]
    fn test_sensitive_to_every_input() {
        let reference = sign("GET", RATE_GET, &[("objectId", "42")]);

        assert_ne!(reference, sign("GET", RATE_GET, &[("objectId", "43")]));
        assert_ne!(reference, sign("POST", RATE_GET, &[("objectId", "42")]));
        assert_ne!(
            reference,
            sign("GET", "http://rate.kagogo.co/v1/rate/save", &[("objectId", "42")])
        );

        let later = (TS + 1).to_string();
        let headers = [(AUTH_API, KEY), (AUTH_TIMESTAMP, later.as_str())];
        let moved = build_signature(
            "GET",
            RATE_GET,
            &[("objectId", "42")],
            &headers,
            &signature_token(KEY, TS + 1, SECRET),
        );
        assert_ne!(reference, moved);
    }

    #[test]
    fn test_canonical_parameters_sorted_and_encoded() {
        let canonical = canonical_parameters(&[("b", "x y"), ("a", "1&2")], &[("c", "=")]);
        assert_eq!(
            canonical,
            vec![
                ("a".to_string(), "1%262".to_string()),
                ("b".to_string(), "x%20y".to_string()),
                ("c".to_string(), "%3D".to_string()),
            ]
        );
    }

    #[test]
    fn test_encode_component_unreserved_set() {
        assert_eq!(encode_component("AZaz09-_.!~*'()"), "AZaz09-_.!~*'()");
        assert_eq!(encode_component("a b/c?d#e"), "a%20b%2Fc%3Fd%23e");
        assert_eq!(encode_component("ü"), "%C3%BC");
    }

    #[test]
    fn test_decode_component_reverses_encoding() {
        let original = "a&b=c d ünï ~*'()! 100%";
        assert_eq!(decode_component(&encode_component(original)), original);
    }

    #[test]
    fn test_decode_component_keeps_malformed_escape() {
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
    }

    #[test]
    fn test_request_signer_matches_free_function() {
        let creds = ApiCredentials::new(KEY, SECRET);
        let signer = RequestSigner::new(&creds);

        let signed = signer.sign_request("GET", RATE_GET, &[("objectId", "42")], TS);

        assert_eq!(signed.signature, "iYe+p94h6q/oprxF6y78bx6l+U8=");
        assert_eq!(
            signed.parameters,
            vec![
                ("auth_api".to_string(), "AK123".to_string()),
                ("auth_timestamp".to_string(), "1000000000000".to_string()),
                ("objectId".to_string(), "42".to_string()),
            ]
        );
    }

    #[test]
    fn test_signed_parameters_decoded() {
        let creds = ApiCredentials::new(KEY, SECRET);
        let signer = RequestSigner::new(&creds);

        let signed = signer.sign_request("POST", FEEDBACK_SAVE, &[("comment", "a&b c")], TS);
        let decoded = signed.decoded();

        assert!(decoded.contains(&("comment".to_string(), "a&b c".to_string())));
        assert!(decoded.contains(&("auth_timestamp".to_string(), "1000000000000".to_string())));
    }
}

use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

fn signed_mac(auth_token: &str, url: &str, params: &[(String, String)]) -> Option<HmacSha1> {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort();

    let mut mac = HmacSha1::new_from_slice(auth_token.as_bytes()).ok()?;
    mac.update(url.as_bytes());
    for (key, value) in sorted {
        mac.update(key.as_bytes());
        mac.update(value.as_bytes());
    }
    Some(mac)
}

/// Computes the `X-Twilio-Signature` value for a form-encoded webhook.
///
/// The signed data is the full request URL followed by every parameter's key
/// and value, in key order.
pub fn compute_signature(auth_token: &str, url: &str, params: &[(String, String)]) -> String {
    signed_mac(auth_token, url, params)
        .map(|mac| general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Checks a webhook signature in constant time.
pub fn validate_signature(
    auth_token: &str,
    signature: &str,
    url: &str,
    params: &[(String, String)],
) -> bool {
    let Ok(expected) = general_purpose::STANDARD.decode(signature.trim()) else {
        return false;
    };

    signed_mac(auth_token, url, params)
        .map(|mac| mac.verify_slice(&expected).is_ok())
        .unwrap_or(false)
}

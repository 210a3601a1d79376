use bytes::Bytes;

/// Fields of an inbound WhatsApp webhook that drive the reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    pub from: Option<String>,
    /// Declared attachment count. `None` when `NumMedia` carries no digits.
    pub num_media: Option<u32>,
    pub media_url: Option<String>,
    pub media_content_type: Option<String>,
}

impl InboundMessage {
    /// Builds the message from decoded form parameters.
    ///
    /// Blank values count as absent. A missing `NumMedia` means no
    /// attachments; otherwise only its leading integer is read.
    pub fn from_params(params: &[(String, String)]) -> Self {
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            from: get("From"),
            num_media: match get("NumMedia") {
                Some(raw) => parse_media_count(&raw),
                None => Some(0),
            },
            media_url: get("MediaUrl0"),
            media_content_type: get("MediaContentType0"),
        }
    }
}

/// Reads the leading integer of `raw`, so `"2abc"` is 2 and `"abc"` is `None`.
/// Negative counts clamp to zero.
fn parse_media_count(raw: &str) -> Option<u32> {
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    if negative {
        return Some(0);
    }
    Some(digits[..end].parse().unwrap_or(u32::MAX))
}

/// Basic auth credentials for downloading Twilio-hosted media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCredentials {
    pub account_sid: String,
    pub auth_token: String,
}

#[derive(Debug, Clone)]
pub struct MediaContent {
    pub data: Bytes,
    pub content_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_params_reads_media_fields() {
        let message = InboundMessage::from_params(&params(&[
            ("From", "whatsapp:+15550001111"),
            ("NumMedia", "1"),
            ("MediaUrl0", "https://api.twilio.com/media/ME1"),
            ("MediaContentType0", "image/jpeg"),
        ]));

        assert_eq!(message.from.as_deref(), Some("whatsapp:+15550001111"));
        assert_eq!(message.num_media, Some(1));
        assert_eq!(
            message.media_url.as_deref(),
            Some("https://api.twilio.com/media/ME1")
        );
        assert_eq!(message.media_content_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_from_params_treats_blank_values_as_absent() {
        let message = InboundMessage::from_params(&params(&[
            ("From", "  "),
            ("NumMedia", " "),
            ("MediaUrl0", ""),
        ]));

        assert_eq!(
            message,
            InboundMessage {
                num_media: Some(0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_media_count_reads_leading_integer() {
        let count = |raw: &str| {
            InboundMessage::from_params(&params(&[("NumMedia", raw)])).num_media
        };

        assert_eq!(count("2abc"), Some(2));
        assert_eq!(count("+1"), Some(1));
        assert_eq!(count("-3"), Some(0));
        assert_eq!(count("99999999999"), Some(u32::MAX));
        assert_eq!(count("many"), None);
        assert_eq!(count("-"), None);
        assert_eq!(InboundMessage::from_params(&[]).num_media, Some(0));
    }
}

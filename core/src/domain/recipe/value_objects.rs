use base64::{Engine as _, engine::general_purpose};

pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone)]
pub struct AnalyzeImageInput {
    pub image_base64: String,
    pub mime_type: String,
}

impl AnalyzeImageInput {
    pub fn new(image_base64: String, mime_type: Option<String>) -> Self {
        let mime_type = mime_type
            .map(|m| m.trim().to_ascii_lowercase())
            .filter(|m| m.starts_with("image/"))
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME_TYPE.to_string());

        Self {
            image_base64,
            mime_type,
        }
    }

    pub fn from_bytes(data: &[u8], mime_type: Option<String>) -> Self {
        Self::new(general_purpose::STANDARD.encode(data), mime_type)
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.image_base64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_defaults_to_jpeg() {
        let input = AnalyzeImageInput::new("abc".to_string(), None);
        assert_eq!(input.mime_type, "image/jpeg");

        let input = AnalyzeImageInput::new("abc".to_string(), Some("text/plain".to_string()));
        assert_eq!(input.mime_type, "image/jpeg");
    }

    #[test]
    fn test_from_bytes_encodes_base64() {
        let input = AnalyzeImageInput::from_bytes(b"hi", Some("image/webp".to_string()));
        assert_eq!(input.image_base64, "aGk=");
        assert_eq!(input.mime_type, "image/webp");
    }

    #[test]
    fn test_data_url_uses_declared_mime_type() {
        let input = AnalyzeImageInput::new("aGk=".to_string(), Some("Image/PNG".to_string()));
        assert_eq!(input.data_url(), "data:image/png;base64,aGk=");
    }
}

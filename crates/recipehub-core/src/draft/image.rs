use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// One image slot of a recipe form: either an uploaded file or a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSource {
    File {
        filename: String,
        content_type: String,
        /// Raw bytes; base64 in the JSON form of a draft.
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
    },
    Url {
        value: String,
    },
}

impl ImageSource {
    pub fn url(value: impl Into<String>) -> Self {
        ImageSource::Url {
            value: value.into(),
        }
    }

    pub fn file(filename: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        ImageSource::File {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// A URL slot left blank carries no image. A chosen file is never
    /// blank, even when it is empty.
    pub fn is_blank(&self) -> bool {
        match self {
            ImageSource::Url { value } => value.trim().is_empty(),
            ImageSource::File { .. } => false,
        }
    }

    /// Validation message for this slot, if any.
    pub fn problem(&self) -> Option<&'static str> {
        match self {
            ImageSource::Url { value } => {
                let v = value.trim();
                if v.is_empty() {
                    Some("Image URL is required")
                } else if !(v.starts_with("http://") || v.starts_with("https://")) {
                    Some("Image URL must start with http:// or https://")
                } else {
                    None
                }
            }
            ImageSource::File { content_type, data, .. } => {
                if data.is_empty() {
                    Some("Image file is empty")
                } else if !content_type.starts_with("image/") {
                    Some("File must be an image")
                } else {
                    None
                }
            }
        }
    }

    /// The single string transmitted for this slot: the URL itself, or a
    /// `data:` URI carrying the file contents.
    pub fn resolve(&self) -> String {
        match self {
            ImageSource::Url { value } => value.trim().to_string(),
            ImageSource::File {
                content_type, data, ..
            } => format!("data:{content_type};base64,{}", STANDARD.encode(data)),
        }
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(d)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

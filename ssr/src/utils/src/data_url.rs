use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DataUrlError {
    #[error("not a data url")]
    MissingScheme,
    #[error("data url has no payload")]
    MissingPayload,
    #[error("only base64 data urls are supported")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Decode(String),
}

/// Bytes and media type carried by a `data:` url
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Decodes a `data:<mime>;base64,<payload>` url, e.g. the output of `canvas.toDataURL`
pub fn decode(url: &str) -> Result<DataUrl, DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPayload)?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or(DataUrlError::NotBase64)?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| DataUrlError::Decode(e.to_string()))?;

    Ok(DataUrl {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_jpeg_data_url() {
        let url = format!("data:image/jpeg;base64,{}", STANDARD.encode([0xff, 0xd8, 0xff]));
        let decoded = decode(&url).unwrap();
        assert_eq!(decoded.mime_type, "image/jpeg");
        assert_eq!(decoded.bytes, vec![0xff, 0xd8, 0xff]);
    }

    #[test]
    fn rejects_non_data_urls() {
        assert_eq!(
            decode("blob:http://localhost/abc"),
            Err(DataUrlError::MissingScheme)
        );
        assert_eq!(decode("data:image/png;base64"), Err(DataUrlError::MissingPayload));
        assert_eq!(decode("data:text/plain,hello"), Err(DataUrlError::NotBase64));
    }

    #[test]
    fn reports_bad_payload() {
        assert!(matches!(
            decode("data:image/jpeg;base64,@@@"),
            Err(DataUrlError::Decode(_))
        ));
    }
}

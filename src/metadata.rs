use crate::error::{Result, ShopError};
use mini_moka::sync::Cache;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

const CACHE_CAPACITY: u64 = 1024;
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Off-chain metadata document addressed by a token URI. Follows the
/// ERC-721 metadata shape plus the storefront's own `price` field.
///
/// `price` arrives as either a JSON string or a number depending on which
/// tool minted the token, so it is normalized to its string form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TokenMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub image: String,
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
}

fn string_or_number<'de, D>(deserializer: D) -> core::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(serde_json::Number),
    }

    match Raw::deserialize(deserializer)? {
        Raw::String(s) => Ok(s),
        Raw::Number(n) => Ok(n.to_string()),
    }
}

/// Parses and validates a metadata document. Field presence is checked here,
/// at the fetch boundary, so pages only ever see a well-formed record.
pub fn parse_document(body: &str) -> Result<TokenMetadata> {
    let metadata: TokenMetadata = serde_json::from_str(body)
        .map_err(|e| ShopError::MetadataValidationError(e.to_string()))?;

    if metadata.image.is_empty() {
        return Err(ShopError::MetadataValidationError(
            "image must not be empty".to_string(),
        ));
    }
    if metadata.price.is_empty() {
        return Err(ShopError::MetadataValidationError(
            "price must not be empty".to_string(),
        ));
    }

    Ok(metadata)
}

/// Fetches token metadata documents over HTTP, caching by URI so the market
/// listing does not refetch documents it has already seen.
#[derive(Clone)]
pub struct MetadataClient {
    client: reqwest::Client,
    cache: Cache<String, TokenMetadata>,
}

impl MetadataClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            cache: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// Issues a single GET to the token URI and validates the response body.
    /// Network and HTTP-status failures map to `MetadataFetchError`; bodies
    /// that do not validate map to `MetadataValidationError`.
    pub async fn fetch(&self, token_uri: &str) -> Result<TokenMetadata> {
        if let Some(hit) = self.cache.get(&token_uri.to_string()) {
            return Ok(hit);
        }

        let response = self
            .client
            .get(token_uri)
            .send()
            .await
            .map_err(|e| ShopError::MetadataFetchError(e.to_string()))?
            .error_for_status()
            .map_err(|e| ShopError::MetadataFetchError(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| ShopError::MetadataFetchError(e.to_string()))?;

        let metadata = parse_document(&body)?;
        self.cache.insert(token_uri.to_string(), metadata.clone());

        Ok(metadata)
    }
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_document_with_string_price() {
        let doc = parse_document(
            r#"{"name": "Sunrise", "description": "dawn", "image": "https://x/img.png", "price": "2.5"}"#,
        )
        .unwrap();

        assert_eq!(doc.name.as_deref(), Some("Sunrise"));
        assert_eq!(doc.image, "https://x/img.png");
        assert_eq!(doc.price, "2.5");
    }

    #[test]
    fn test_parse_document_with_numeric_price() {
        let doc =
            parse_document(r#"{"image": "https://x/img.png", "price": 2.5}"#).unwrap();
        assert_eq!(doc.price, "2.5");

        let doc = parse_document(r#"{"image": "https://x/img.png", "price": 3}"#).unwrap();
        assert_eq!(doc.price, "3");
    }

    #[test]
    fn test_parse_document_ignores_unknown_fields() {
        let doc = parse_document(
            r#"{"image": "https://x/img.png", "price": "1", "attributes": [{"trait_type": "sky"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.price, "1");
    }

    #[test]
    fn test_parse_document_missing_price() {
        let err = parse_document(r#"{"image": "https://x/img.png"}"#).unwrap_err();
        assert!(matches!(err, ShopError::MetadataValidationError(_)));
    }

    #[test]
    fn test_parse_document_missing_image() {
        let err = parse_document(r#"{"price": "1"}"#).unwrap_err();
        assert!(matches!(err, ShopError::MetadataValidationError(_)));
    }

    #[test]
    fn test_parse_document_rejects_non_objects() {
        assert!(parse_document("[]").is_err());
        assert!(parse_document("not json").is_err());
        assert!(parse_document(r#""https://x/img.png""#).is_err());
    }

    #[test]
    fn test_parse_document_rejects_empty_fields() {
        let err = parse_document(r#"{"image": "", "price": "1"}"#).unwrap_err();
        assert!(matches!(err, ShopError::MetadataValidationError(_)));
    }
}

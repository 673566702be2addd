// HTTP response utilities for JSON/CSV bodies with optional Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use serde::Serialize;
use tokio::io::AsyncReadExt;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Whether the client advertised Brotli support with a non-zero quality.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').any(|enc| encoding_quality(enc, "br") > 0.0))
        .unwrap_or(false)
}

/// Quality of one `Accept-Encoding` entry for `coding`: 0 when the entry names
/// another coding, 1 when no `q` is given. An unparsable `q` counts as 0.
fn encoding_quality(entry: &str, coding: &str) -> f32 {
    let mut parts = entry.split(';').map(str::trim);
    if !parts.next().is_some_and(|name| name.eq_ignore_ascii_case(coding)) {
        return 0.0;
    }
    parts
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("q"))
        .map(|(_, value)| value.trim().parse::<f32>().unwrap_or(0.0))
        .unwrap_or(1.0)
}

pub async fn brotli_compress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = BrotliEncoder::new(bytes);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Serialize a value to JSON, optionally compressed with Brotli
pub async fn json_response<T: Serialize>(
    value: &T,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let body = serde_json::to_vec(value).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    bytes_response(body, JSON_CONTENT_TYPE, compress).await
}

/// Build a response around an already encoded body
pub async fn bytes_response(
    body: Vec<u8>,
    content_type: &'static str,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let (body_bytes, content_encoding) = if compress {
        let compressed = brotli_compress(&body).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!(
            "Compressed {} -> {} bytes ({:.1}% reduction)",
            body.len(),
            compressed.len(),
            (1.0 - compressed.len() as f64 / body.len().max(1) as f64) * 100.0
        );
        (compressed, Some("br"))
    } else {
        (body, None)
    };

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, HeaderValue::from(body_bytes.len()));

    if let Some(encoding) = content_encoding {
        response_builder = response_builder
            .header(header::CONTENT_ENCODING, encoding)
            .header(header::VARY, "accept-encoding");
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

// Chunked JSON streaming utilities
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;

use crate::domain::dashboard::StreamMessage;
use crate::infrastructure::http_response::brotli_compress;

pub const FRAME_CONTENT_TYPE: &str = "application/x-dashboard-frames";

/// Create a chunked streaming response, one frame per message
pub async fn chunked_json_stream<S>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = StreamMessage> + Send + 'static,
{
    let byte_stream = stream.then(move |msg| async move { serialize_frame(&msg, compress).await });

    let body = Body::from_stream(byte_stream);

    // Frames are compressed individually, so no Content-Encoding header here.
    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, FRAME_CONTENT_TYPE)
        .header(header::TRANSFER_ENCODING, "chunked");
    if compress {
        response = response.header("x-frame-encoding", "br");
    }

    response.body(body).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single message to a frame: 4-byte big-endian length, then the
/// JSON payload (Brotli-compressed when requested).
pub async fn serialize_frame(msg: &StreamMessage, compress: bool) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(msg)?;

    let payload = if compress { brotli_compress(&json).await? } else { json };

    let length = u32::try_from(payload.len())
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidData, "frame too large"))?;
    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(length);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Helper to create a streaming response from a receiver
pub async fn stream_from_receiver(
    mut rx: tokio::sync::mpsc::Receiver<StreamMessage>,
    compress: bool,
) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(msg) = rx.recv().await {
            yield msg;
        }
    };

    match chunked_json_stream(stream, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

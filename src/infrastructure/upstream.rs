//! Helpers shared by the upstream HTTP clients.

/// Maximum number of response body bytes kept for error messages and logs.
pub const MAX_ERROR_BODY: usize = 1024;

/// Reads at most `limit` bytes of the response body as trimmed, lossy UTF-8.
///
/// Stops reading as soon as the limit is reached. A body that fails mid-stream
/// yields whatever was read so far.
pub async fn read_body_limited(mut response: reqwest::Response, limit: usize) -> String {
    let mut buf: Vec<u8> = Vec::new();

    while buf.len() < limit {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let take = (limit - buf.len()).min(chunk.len());
                buf.extend_from_slice(&chunk[..take]);
            }
            Ok(None) | Err(_) => break,
        }
    }

    String::from_utf8_lossy(&buf).trim().to_string()
}

use futures_util::StreamExt;
use reqwest::header::HeaderMap;

/// Bytes of `": \r\n"` framing around each header line.
const HEADER_LINE_OVERHEAD: u64 = 4;
/// The blank line that ends the header block.
const HEADER_BLOCK_TERMINATOR: u64 = 2;

pub(super) async fn drain_response_body(
    response: reqwest::Response,
) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

/// Approximates the wire size of a header block: one framed line per distinct
/// name, with every value of that name counted in full.
#[must_use]
pub fn estimate_headers_size(headers: &HeaderMap) -> u64 {
    let mut total: u64 = 0;
    for name in headers.keys() {
        let name_len = u64::try_from(name.as_str().len()).unwrap_or(u64::MAX);
        total = total
            .saturating_add(name_len)
            .saturating_add(HEADER_LINE_OVERHEAD);
        for value in headers.get_all(name) {
            let value_len = u64::try_from(value.as_bytes().len()).unwrap_or(u64::MAX);
            total = total.saturating_add(value_len);
        }
    }
    total.saturating_add(HEADER_BLOCK_TERMINATOR)
}

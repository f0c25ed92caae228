//! Offset pagination over the API's per-request row limit

use crate::asa::types::{Row, Table};
use crate::core::http::Transport;
use crate::error::Result;
use tracing::debug;

/// Maximum rows the backend returns per request.
pub const MAX_API_LIMIT: usize = 1000;

/// Execute one logical query, paging through full responses.
///
/// The first request carries no `offset`; every time a page comes back with
/// exactly [`MAX_API_LIMIT`] rows, the next request asks for the rows after
/// the running total. A short page (zero rows included) terminates. A result
/// set that is an exact multiple of the limit therefore costs one extra,
/// empty request; the backend exposes no total-count header to avoid it.
///
/// Pages are fetched strictly in sequence and any failure aborts the whole
/// query with no partial result.
pub async fn execute_query(
    transport: &Transport,
    url: &str,
    params: &[(String, String)],
) -> Result<Table> {
    let mut rows = fetch_page(transport, url, params, None).await?;
    let mut last_page_len = rows.len();
    let mut offset = 0;

    while last_page_len == MAX_API_LIMIT {
        offset += MAX_API_LIMIT;
        debug!(%url, offset, "page limit reached, requesting next page");
        let page = fetch_page(transport, url, params, Some(offset)).await?;
        last_page_len = page.len();
        rows.extend(page);
    }

    Ok(rows)
}

async fn fetch_page(
    transport: &Transport,
    url: &str,
    params: &[(String, String)],
    offset: Option<usize>,
) -> Result<Table> {
    let mut params = params.to_vec();
    if let Some(offset) = offset {
        params.push(("offset".to_string(), offset.to_string()));
    }

    let value = transport.get_json(url, &params).await?;
    let rows: Vec<Row> = serde_json::from_value(value)?;
    Ok(rows)
}

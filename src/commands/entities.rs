//! Entity listing commands.

use super::print_table;
use crate::asa::client::Client;
use crate::asa::types::EntityKind;
use crate::cli::EntityFilters;
use crate::error::Result;

pub async fn handle_entities(
    client: &Client,
    kind: EntityKind,
    filters: EntityFilters,
) -> Result<()> {
    let query = filters.into_query();
    let table = client.get_entities(kind, &query).await?;
    print_table(&table)
}

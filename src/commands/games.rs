//! Games listing command.

use super::print_table;
use crate::asa::client::Client;
use crate::cli::GamesFilters;
use crate::error::Result;

pub async fn handle_games(client: &Client, filters: GamesFilters) -> Result<()> {
    let query = filters.into_query();
    let table = client.get_games(&query).await?;
    print_table(&table)
}

//! Statistics commands.

use super::print_table;
use crate::asa::client::Client;
use crate::cli::StatFilterArgs;
use crate::error::Result;

pub async fn handle_player_xgoals(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_player_xgoals(leagues, &filters).await?)
}

pub async fn handle_player_xpass(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_player_xpass(leagues, &filters).await?)
}

pub async fn handle_player_goals_added(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_player_goals_added(leagues, &filters).await?)
}

pub async fn handle_player_salaries(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_player_salaries(leagues, &filters).await?)
}

pub async fn handle_goalkeeper_xgoals(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_goalkeeper_xgoals(leagues, &filters).await?)
}

pub async fn handle_goalkeeper_goals_added(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_goalkeeper_goals_added(leagues, &filters).await?)
}

pub async fn handle_team_xgoals(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_team_xgoals(leagues, &filters).await?)
}

pub async fn handle_team_xpass(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_team_xpass(leagues, &filters).await?)
}

pub async fn handle_team_goals_added(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_team_goals_added(leagues, &filters).await?)
}

pub async fn handle_team_salaries(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_team_salaries(leagues, &filters).await?)
}

pub async fn handle_game_xgoals(client: &Client, args: StatFilterArgs) -> Result<()> {
    let (leagues, filters) = args.into_parts();
    print_table(&client.get_game_xgoals(leagues, &filters).await?)
}

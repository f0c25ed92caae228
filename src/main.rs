//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use itscalledsoccer::{
    cli::{Asa, Commands, GetCmd},
    commands::{entities, games, stats},
    Client, EntityKind,
};
use tracing::Level;

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = Asa::parse();

    let level = match app.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let client = Client::builder().logging_level(level).build().await?;

    match app.command {
        Commands::Get { cmd } => match cmd {
            GetCmd::Players { filters } => {
                entities::handle_entities(&client, EntityKind::Player, filters).await?
            }
            GetCmd::Teams { filters } => {
                entities::handle_entities(&client, EntityKind::Team, filters).await?
            }
            GetCmd::Stadia { filters } => {
                entities::handle_entities(&client, EntityKind::Stadium, filters).await?
            }
            GetCmd::Managers { filters } => {
                entities::handle_entities(&client, EntityKind::Manager, filters).await?
            }
            GetCmd::Referees { filters } => {
                entities::handle_entities(&client, EntityKind::Referee, filters).await?
            }
            GetCmd::Games { filters } => games::handle_games(&client, filters).await?,
            GetCmd::PlayerXgoals { filters } => {
                stats::handle_player_xgoals(&client, filters).await?
            }
            GetCmd::PlayerXpass { filters } => stats::handle_player_xpass(&client, filters).await?,
            GetCmd::PlayerGoalsAdded { filters } => {
                stats::handle_player_goals_added(&client, filters).await?
            }
            GetCmd::PlayerSalaries { filters } => {
                stats::handle_player_salaries(&client, filters).await?
            }
            GetCmd::GoalkeeperXgoals { filters } => {
                stats::handle_goalkeeper_xgoals(&client, filters).await?
            }
            GetCmd::GoalkeeperGoalsAdded { filters } => {
                stats::handle_goalkeeper_goals_added(&client, filters).await?
            }
            GetCmd::TeamXgoals { filters } => stats::handle_team_xgoals(&client, filters).await?,
            GetCmd::TeamXpass { filters } => stats::handle_team_xpass(&client, filters).await?,
            GetCmd::TeamGoalsAdded { filters } => {
                stats::handle_team_goals_added(&client, filters).await?
            }
            GetCmd::TeamSalaries { filters } => {
                stats::handle_team_salaries(&client, filters).await?
            }
            GetCmd::GameXgoals { filters } => stats::handle_game_xgoals(&client, filters).await?,
        },
    }

    Ok(())
}

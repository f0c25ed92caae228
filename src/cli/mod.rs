//! CLI argument definitions and parsing.

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::asa::client::{EntityQuery, GamesQuery};
use crate::asa::query::StatFilters;
use crate::asa::types::{League, Leagues, OneOrMany};

#[derive(Debug, Parser)]
#[clap(name = "asa", about = "American Soccer Analysis API CLI")]
pub struct Asa {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Get data from the American Soccer Analysis API
    Get {
        #[clap(subcommand)]
        cmd: GetCmd,
    },
}

/// Filters shared by the entity listing commands.
#[derive(Debug, Args)]
pub struct EntityFilters {
    /// League code (repeatable): -l mls -l nwsl.
    #[clap(short, long = "league")]
    pub leagues: Vec<League>,

    /// Entity id (repeatable). Cannot be combined with --name.
    #[clap(long = "id")]
    pub ids: Vec<String>,

    /// Entity name, fuzzy-matched (repeatable). Cannot be combined with --id.
    #[clap(short = 'n', long = "name")]
    pub names: Vec<String>,
}

impl EntityFilters {
    pub fn into_query(self) -> EntityQuery {
        EntityQuery {
            leagues: league_selection(self.leagues),
            ids: opt(self.ids),
            names: opt(self.names),
        }
    }
}

/// Filters for the games command.
#[derive(Debug, Args)]
pub struct GamesFilters {
    /// League code (repeatable): -l mls -l nwsl.
    #[clap(short, long = "league")]
    pub leagues: Vec<League>,

    /// Game id (repeatable).
    #[clap(long = "game-id")]
    pub game_ids: Vec<String>,

    /// Team id (repeatable). Cannot be combined with --team-name.
    #[clap(long = "team-id")]
    pub team_ids: Vec<String>,

    /// Team name, fuzzy-matched (repeatable). Cannot be combined with --team-id.
    #[clap(long = "team-name")]
    pub team_names: Vec<String>,

    /// Season year (repeatable): -s 2021.
    #[clap(short, long = "season")]
    pub seasons: Vec<String>,

    /// Competition stage (repeatable): --stage "Playoffs".
    #[clap(long = "stage")]
    pub stages: Vec<String>,
}

impl GamesFilters {
    pub fn into_query(self) -> GamesQuery {
        GamesQuery {
            leagues: league_selection(self.leagues),
            game_ids: opt(self.game_ids),
            team_ids: opt(self.team_ids),
            team_names: opt(self.team_names),
            seasons: opt(self.seasons),
            stages: opt(self.stages),
        }
    }
}

/// Filters shared by the statistics commands.
///
/// Which of these a given endpoint accepts is validated by the client, so an
/// option that an endpoint does not recognize fails with a clear error
/// instead of being forwarded.
#[derive(Debug, Args)]
pub struct StatFilterArgs {
    /// League code (repeatable): -l mls -l nwsl.
    #[clap(short, long = "league")]
    pub leagues: Vec<League>,

    /// Player id (repeatable). Cannot be combined with --player-name.
    #[clap(long = "player-id")]
    pub player_ids: Vec<String>,

    /// Player name, fuzzy-matched (repeatable). Cannot be combined with --player-id.
    #[clap(long = "player-name")]
    pub player_names: Vec<String>,

    /// Team id (repeatable). Cannot be combined with --team-name.
    #[clap(long = "team-id")]
    pub team_ids: Vec<String>,

    /// Team name, fuzzy-matched (repeatable). Cannot be combined with --team-id.
    #[clap(long = "team-name")]
    pub team_names: Vec<String>,

    /// Game id (repeatable).
    #[clap(long = "game-id")]
    pub game_ids: Vec<String>,

    /// Season year (repeatable): -s 2021.
    #[clap(short, long = "season")]
    pub seasons: Vec<String>,

    /// Start of a date range, YYYY-MM-DD.
    #[clap(long)]
    pub start_date: Option<String>,

    /// End of a date range, YYYY-MM-DD.
    #[clap(long)]
    pub end_date: Option<String>,

    /// Competition stage (repeatable): --stage "Playoffs".
    #[clap(long = "stage")]
    pub stages: Vec<String>,

    /// Minimum minutes played.
    #[clap(long)]
    pub minimum_minutes: Option<u32>,

    /// Shot pattern (repeatable): --shot-pattern Penalty.
    #[clap(long = "shot-pattern")]
    pub shot_patterns: Vec<String>,

    /// General position (repeatable): --general-position ST.
    #[clap(long = "general-position")]
    pub general_positions: Vec<String>,

    /// Goals added action type (repeatable): --action-type Passing.
    #[clap(long = "action-type")]
    pub action_types: Vec<String>,

    /// Compare players against replacement level.
    #[clap(long)]
    pub above_replacement: bool,

    /// Group results by team.
    #[clap(long)]
    pub split_by_teams: bool,

    /// Group results by season.
    #[clap(long)]
    pub split_by_seasons: bool,

    /// Group results by game.
    #[clap(long)]
    pub split_by_games: bool,
}

impl StatFilterArgs {
    pub fn into_parts(self) -> (Leagues, StatFilters) {
        let leagues = league_selection(self.leagues);
        let filters = StatFilters {
            player_ids: opt(self.player_ids),
            player_names: opt(self.player_names),
            team_ids: opt(self.team_ids),
            team_names: opt(self.team_names),
            game_ids: opt(self.game_ids),
            season_name: opt(self.seasons),
            start_date: self.start_date,
            end_date: self.end_date,
            stage_name: opt(self.stages),
            minimum_minutes: self.minimum_minutes,
            shot_pattern: opt(self.shot_patterns),
            general_position: opt(self.general_positions),
            action_type: opt(self.action_types),
            above_replacement: flag(self.above_replacement),
            split_by_teams: flag(self.split_by_teams),
            split_by_seasons: flag(self.split_by_seasons),
            split_by_games: flag(self.split_by_games),
            ..Default::default()
        };
        (leagues, filters)
    }
}

#[derive(Debug, Subcommand)]
pub enum GetCmd {
    /// List players, optionally filtered by league, id or name.
    Players {
        #[clap(flatten)]
        filters: EntityFilters,
    },

    /// List teams, optionally filtered by league, id or name.
    Teams {
        #[clap(flatten)]
        filters: EntityFilters,
    },

    /// List stadia, optionally filtered by league, id or name.
    Stadia {
        #[clap(flatten)]
        filters: EntityFilters,
    },

    /// List managers, optionally filtered by league, id or name.
    Managers {
        #[clap(flatten)]
        filters: EntityFilters,
    },

    /// List referees, optionally filtered by league, id or name.
    Referees {
        #[clap(flatten)]
        filters: EntityFilters,
    },

    /// List games, most recent kickoff first.
    Games {
        #[clap(flatten)]
        filters: GamesFilters,
    },

    /// Player expected goals.
    PlayerXgoals {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },

    /// Player expected passing.
    PlayerXpass {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },

    /// Player goals added (g+).
    PlayerGoalsAdded {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },

    /// Player salaries (MLS only).
    PlayerSalaries {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },

    /// Goalkeeper expected goals.
    GoalkeeperXgoals {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },

    /// Goalkeeper goals added (g+).
    GoalkeeperGoalsAdded {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },

    /// Team expected goals.
    TeamXgoals {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },

    /// Team expected passing.
    TeamXpass {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },

    /// Team goals added (g+).
    TeamGoalsAdded {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },

    /// Team salaries (MLS only).
    TeamSalaries {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },

    /// Game expected goals.
    GameXgoals {
        #[clap(flatten)]
        filters: StatFilterArgs,
    },
}

fn opt(values: Vec<String>) -> Option<OneOrMany> {
    if values.is_empty() {
        None
    } else {
        Some(OneOrMany::Many(values))
    }
}

fn flag(value: bool) -> Option<bool> {
    value.then_some(true)
}

fn league_selection(leagues: Vec<League>) -> Leagues {
    if leagues.is_empty() {
        Leagues::All
    } else {
        Leagues::Many(leagues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_command() {
        let app = Asa::parse_from([
            "asa", "get", "teams", "-l", "mls", "-l", "nwsl", "-n", "Austin",
        ]);
        match app.command {
            Commands::Get {
                cmd: GetCmd::Teams { filters },
            } => {
                let query = filters.into_query();
                assert_eq!(
                    query.leagues,
                    Leagues::Many(vec![League::Mls, League::Nwsl])
                );
                assert_eq!(query.ids, None);
                assert_eq!(
                    query.names,
                    Some(OneOrMany::Many(vec!["Austin".to_string()]))
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_stat_command() {
        let app = Asa::parse_from([
            "asa",
            "get",
            "player-xgoals",
            "-l",
            "mls",
            "-s",
            "2021",
            "--minimum-minutes",
            "500",
            "--split-by-seasons",
        ]);
        match app.command {
            Commands::Get {
                cmd: GetCmd::PlayerXgoals { filters },
            } => {
                let (leagues, filters) = filters.into_parts();
                assert_eq!(leagues, Leagues::Many(vec![League::Mls]));
                assert_eq!(filters.minimum_minutes, Some(500));
                assert_eq!(filters.split_by_seasons, Some(true));
                assert_eq!(filters.split_by_teams, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_no_leagues_means_all() {
        let app = Asa::parse_from(["asa", "get", "games"]);
        match app.command {
            Commands::Get {
                cmd: GetCmd::Games { filters },
            } => {
                assert_eq!(filters.into_query().leagues, Leagues::All);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_bad_league_is_rejected() {
        let result = Asa::try_parse_from(["asa", "get", "teams", "-l", "epl"]);
        assert!(result.is_err());
    }
}

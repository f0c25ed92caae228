//! Filter validation and query-parameter construction

use crate::asa::types::OneOrMany;
use crate::error::{AsaError, Result};
use std::fmt;

/// Entity segment of a statistics endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatEntity {
    Players,
    Goalkeepers,
    Teams,
    Games,
}

impl StatEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatEntity::Players => "players",
            StatEntity::Goalkeepers => "goalkeepers",
            StatEntity::Teams => "teams",
            StatEntity::Games => "games",
        }
    }
}

/// Statistic segment of a statistics endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatType {
    Xgoals,
    Xpass,
    GoalsAdded,
    Salaries,
}

impl StatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatType::Xgoals => "xgoals",
            StatType::Xpass => "xpass",
            StatType::GoalsAdded => "goals-added",
            StatType::Salaries => "salaries",
        }
    }
}

/// One statistics endpoint: `{entity}/{stat}` under a league.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatEndpoint {
    pub entity: StatEntity,
    pub stat: StatType,
}

impl fmt::Display for StatEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity.as_str(), self.stat.as_str())
    }
}

/// Every filter the statistics endpoints recognize, keyed by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Param {
    PlayerId,
    TeamId,
    GameId,
    MinimumMinutes,
    MinimumShots,
    MinimumKeyPasses,
    MinimumPasses,
    MinimumShotsFaced,
    SeasonName,
    StartDate,
    EndDate,
    ShotPattern,
    PassOriginThird,
    StageName,
    GeneralPosition,
    ActionType,
    Position,
    Zone,
    GamestateTrunc,
    AboveReplacement,
    SplitByTeams,
    SplitBySeasons,
    SplitByGames,
    SplitByPositions,
    HomeOnly,
    AwayOnly,
    HomeAdjusted,
    EvenGameState,
}

impl Param {
    pub(crate) fn wire_name(&self) -> &'static str {
        match self {
            Param::PlayerId => "player_id",
            Param::TeamId => "team_id",
            Param::GameId => "game_id",
            Param::MinimumMinutes => "minimum_minutes",
            Param::MinimumShots => "minimum_shots",
            Param::MinimumKeyPasses => "minimum_key_passes",
            Param::MinimumPasses => "minimum_passes",
            Param::MinimumShotsFaced => "minimum_shots_faced",
            Param::SeasonName => "season_name",
            Param::StartDate => "start_date",
            Param::EndDate => "end_date",
            Param::ShotPattern => "shot_pattern",
            Param::PassOriginThird => "pass_origin_third",
            Param::StageName => "stage_name",
            Param::GeneralPosition => "general_position",
            Param::ActionType => "action_type",
            Param::Position => "position",
            Param::Zone => "zone",
            Param::GamestateTrunc => "gamestate_trunc",
            Param::AboveReplacement => "above_replacement",
            Param::SplitByTeams => "split_by_teams",
            Param::SplitBySeasons => "split_by_seasons",
            Param::SplitByGames => "split_by_games",
            Param::SplitByPositions => "split_by_positions",
            Param::HomeOnly => "home_only",
            Param::AwayOnly => "away_only",
            Param::HomeAdjusted => "home_adjusted",
            Param::EvenGameState => "even_game_state",
        }
    }
}

const PLAYERS_XGOALS: &[Param] = &[
    Param::MinimumMinutes,
    Param::MinimumShots,
    Param::MinimumKeyPasses,
    Param::PlayerId,
    Param::TeamId,
    Param::SeasonName,
    Param::StartDate,
    Param::EndDate,
    Param::ShotPattern,
    Param::SplitByTeams,
    Param::SplitBySeasons,
    Param::SplitByGames,
    Param::StageName,
    Param::GeneralPosition,
];

const PLAYERS_XPASS: &[Param] = &[
    Param::MinimumMinutes,
    Param::MinimumPasses,
    Param::PlayerId,
    Param::TeamId,
    Param::SeasonName,
    Param::StartDate,
    Param::EndDate,
    Param::PassOriginThird,
    Param::SplitByTeams,
    Param::SplitBySeasons,
    Param::SplitByGames,
    Param::StageName,
    Param::GeneralPosition,
];

const PLAYERS_GOALS_ADDED: &[Param] = &[
    Param::MinimumMinutes,
    Param::PlayerId,
    Param::TeamId,
    Param::SeasonName,
    Param::StartDate,
    Param::EndDate,
    Param::SplitByTeams,
    Param::SplitBySeasons,
    Param::SplitByGames,
    Param::StageName,
    Param::GeneralPosition,
    Param::ActionType,
    Param::AboveReplacement,
];

const PLAYERS_SALARIES: &[Param] = &[
    Param::PlayerId,
    Param::TeamId,
    Param::Position,
    Param::SeasonName,
    Param::StartDate,
    Param::EndDate,
];

const GOALKEEPERS_XGOALS: &[Param] = &[
    Param::MinimumMinutes,
    Param::MinimumShotsFaced,
    Param::PlayerId,
    Param::TeamId,
    Param::SeasonName,
    Param::StartDate,
    Param::EndDate,
    Param::ShotPattern,
    Param::SplitByTeams,
    Param::SplitBySeasons,
    Param::SplitByGames,
    Param::StageName,
];

const GOALKEEPERS_GOALS_ADDED: &[Param] = &[
    Param::MinimumMinutes,
    Param::PlayerId,
    Param::TeamId,
    Param::SeasonName,
    Param::StartDate,
    Param::EndDate,
    Param::SplitByTeams,
    Param::SplitBySeasons,
    Param::SplitByGames,
    Param::StageName,
    Param::ActionType,
    Param::AboveReplacement,
];

const TEAMS_XGOALS: &[Param] = &[
    Param::TeamId,
    Param::SeasonName,
    Param::StartDate,
    Param::EndDate,
    Param::ShotPattern,
    Param::SplitByTeams,
    Param::SplitBySeasons,
    Param::SplitByGames,
    Param::HomeOnly,
    Param::AwayOnly,
    Param::HomeAdjusted,
    Param::EvenGameState,
    Param::StageName,
];

const TEAMS_XPASS: &[Param] = &[
    Param::TeamId,
    Param::SeasonName,
    Param::StartDate,
    Param::EndDate,
    Param::PassOriginThird,
    Param::SplitByTeams,
    Param::SplitBySeasons,
    Param::SplitByGames,
    Param::HomeOnly,
    Param::AwayOnly,
    Param::StageName,
];

const TEAMS_GOALS_ADDED: &[Param] = &[
    Param::TeamId,
    Param::SeasonName,
    Param::SplitBySeasons,
    Param::StageName,
    Param::ActionType,
    Param::Zone,
    Param::GamestateTrunc,
];

const TEAMS_SALARIES: &[Param] = &[
    Param::TeamId,
    Param::SeasonName,
    Param::SplitByTeams,
    Param::SplitBySeasons,
    Param::SplitByGames,
    Param::SplitByPositions,
];

const GAMES_XGOALS: &[Param] = &[
    Param::GameId,
    Param::SeasonName,
    Param::StartDate,
    Param::EndDate,
    Param::StageName,
];

impl StatEndpoint {
    pub(crate) fn new(entity: StatEntity, stat: StatType) -> Self {
        Self { entity, stat }
    }

    /// Parameters this endpoint recognizes; anything else is rejected
    /// before a request is made.
    pub(crate) fn allowed(&self) -> &'static [Param] {
        match (self.entity, self.stat) {
            (StatEntity::Players, StatType::Xgoals) => PLAYERS_XGOALS,
            (StatEntity::Players, StatType::Xpass) => PLAYERS_XPASS,
            (StatEntity::Players, StatType::GoalsAdded) => PLAYERS_GOALS_ADDED,
            (StatEntity::Players, StatType::Salaries) => PLAYERS_SALARIES,
            (StatEntity::Goalkeepers, StatType::Xgoals) => GOALKEEPERS_XGOALS,
            (StatEntity::Goalkeepers, StatType::GoalsAdded) => GOALKEEPERS_GOALS_ADDED,
            (StatEntity::Teams, StatType::Xgoals) => TEAMS_XGOALS,
            (StatEntity::Teams, StatType::Xpass) => TEAMS_XPASS,
            (StatEntity::Teams, StatType::GoalsAdded) => TEAMS_GOALS_ADDED,
            (StatEntity::Teams, StatType::Salaries) => TEAMS_SALARIES,
            (StatEntity::Games, StatType::Xgoals) => GAMES_XGOALS,
            // No such endpoint is reachable through the public accessors
            _ => &[],
        }
    }
}

/// Reject supplying both halves of an ids/names pair.
pub(crate) fn check_ids_names(
    family: &'static str,
    ids: Option<&OneOrMany>,
    names: Option<&OneOrMany>,
) -> Result<()> {
    if ids.is_some() && names.is_some() {
        return Err(AsaError::IdsAndNames { family });
    }
    Ok(())
}

/// Filters accepted by the statistics accessors.
///
/// One structure covers every endpoint; which fields an endpoint actually
/// recognizes is validated per call, so a filter that an endpoint does not
/// understand fails fast instead of being forwarded.
///
/// Construct with struct-update syntax:
///
/// ```rust
/// use itscalledsoccer::StatFilters;
///
/// let filters = StatFilters {
///     season_name: Some("2021".into()),
///     minimum_minutes: Some(500),
///     ..Default::default()
/// };
/// # let _ = filters;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatFilters {
    /// Cannot be combined with `player_names`.
    pub player_ids: Option<OneOrMany>,
    /// Fuzzy-resolved to ids; cannot be combined with `player_ids`.
    pub player_names: Option<OneOrMany>,
    /// Cannot be combined with `team_names`.
    pub team_ids: Option<OneOrMany>,
    /// Fuzzy-resolved to ids; cannot be combined with `team_ids`.
    pub team_names: Option<OneOrMany>,
    pub game_ids: Option<OneOrMany>,
    pub minimum_minutes: Option<u32>,
    pub minimum_shots: Option<u32>,
    pub minimum_key_passes: Option<u32>,
    pub minimum_passes: Option<u32>,
    pub minimum_shots_faced: Option<u32>,
    /// Season year(s); the API treats these as names.
    pub season_name: Option<OneOrMany>,
    /// YYYY-MM-DD.
    pub start_date: Option<String>,
    /// YYYY-MM-DD.
    pub end_date: Option<String>,
    pub shot_pattern: Option<OneOrMany>,
    pub pass_origin_third: Option<OneOrMany>,
    pub stage_name: Option<OneOrMany>,
    pub general_position: Option<OneOrMany>,
    pub action_type: Option<OneOrMany>,
    pub position: Option<OneOrMany>,
    /// Pitch zones 1-30.
    pub zone: Option<Vec<u8>>,
    /// Truncated score differential, -2..=2.
    pub gamestate_trunc: Option<Vec<i8>>,
    pub above_replacement: Option<bool>,
    pub split_by_teams: Option<bool>,
    pub split_by_seasons: Option<bool>,
    pub split_by_games: Option<bool>,
    pub split_by_positions: Option<bool>,
    pub home_only: Option<bool>,
    pub away_only: Option<bool>,
    pub home_adjusted: Option<bool>,
    pub even_game_state: Option<bool>,
}

impl StatFilters {
    /// Which parameters this set of filters will put on the wire.
    ///
    /// Names count as their id parameter since that is how they are sent.
    fn provided(&self) -> Vec<Param> {
        let mut params = Vec::new();
        if self.player_ids.is_some() || self.player_names.is_some() {
            params.push(Param::PlayerId);
        }
        if self.team_ids.is_some() || self.team_names.is_some() {
            params.push(Param::TeamId);
        }
        if self.game_ids.is_some() {
            params.push(Param::GameId);
        }
        if self.minimum_minutes.is_some() {
            params.push(Param::MinimumMinutes);
        }
        if self.minimum_shots.is_some() {
            params.push(Param::MinimumShots);
        }
        if self.minimum_key_passes.is_some() {
            params.push(Param::MinimumKeyPasses);
        }
        if self.minimum_passes.is_some() {
            params.push(Param::MinimumPasses);
        }
        if self.minimum_shots_faced.is_some() {
            params.push(Param::MinimumShotsFaced);
        }
        if self.season_name.is_some() {
            params.push(Param::SeasonName);
        }
        if self.start_date.is_some() {
            params.push(Param::StartDate);
        }
        if self.end_date.is_some() {
            params.push(Param::EndDate);
        }
        if self.shot_pattern.is_some() {
            params.push(Param::ShotPattern);
        }
        if self.pass_origin_third.is_some() {
            params.push(Param::PassOriginThird);
        }
        if self.stage_name.is_some() {
            params.push(Param::StageName);
        }
        if self.general_position.is_some() {
            params.push(Param::GeneralPosition);
        }
        if self.action_type.is_some() {
            params.push(Param::ActionType);
        }
        if self.position.is_some() {
            params.push(Param::Position);
        }
        if self.zone.is_some() {
            params.push(Param::Zone);
        }
        if self.gamestate_trunc.is_some() {
            params.push(Param::GamestateTrunc);
        }
        if self.above_replacement.is_some() {
            params.push(Param::AboveReplacement);
        }
        if self.split_by_teams.is_some() {
            params.push(Param::SplitByTeams);
        }
        if self.split_by_seasons.is_some() {
            params.push(Param::SplitBySeasons);
        }
        if self.split_by_games.is_some() {
            params.push(Param::SplitByGames);
        }
        if self.split_by_positions.is_some() {
            params.push(Param::SplitByPositions);
        }
        if self.home_only.is_some() {
            params.push(Param::HomeOnly);
        }
        if self.away_only.is_some() {
            params.push(Param::AwayOnly);
        }
        if self.home_adjusted.is_some() {
            params.push(Param::HomeAdjusted);
        }
        if self.even_game_state.is_some() {
            params.push(Param::EvenGameState);
        }
        params
    }

    /// Validate this filter set against an endpoint. Fatal errors only;
    /// nothing here touches the network.
    pub(crate) fn validate(&self, endpoint: &StatEndpoint) -> Result<()> {
        check_ids_names("player", self.player_ids.as_ref(), self.player_names.as_ref())?;
        check_ids_names("team", self.team_ids.as_ref(), self.team_names.as_ref())?;

        let allowed = endpoint.allowed();
        for param in self.provided() {
            if !allowed.contains(&param) {
                return Err(AsaError::UnsupportedParameter {
                    parameter: param.wire_name(),
                    endpoint: endpoint.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Flatten to wire parameters.
    ///
    /// `player_id`/`team_id` take the already-resolved id lists (names never
    /// reach the wire); `game_ids` goes out under the singular `game_id`
    /// key; list values are comma-joined.
    pub(crate) fn wire_params(
        &self,
        player_id: Option<Vec<String>>,
        team_id: Option<Vec<String>>,
    ) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();

        let mut push = |key: Param, value: String| {
            params.push((key.wire_name().to_string(), value));
        };

        if let Some(ids) = player_id {
            push(Param::PlayerId, ids.join(","));
        }
        if let Some(ids) = team_id {
            push(Param::TeamId, ids.join(","));
        }
        if let Some(ids) = &self.game_ids {
            push(Param::GameId, ids.join());
        }
        if let Some(v) = self.minimum_minutes {
            push(Param::MinimumMinutes, v.to_string());
        }
        if let Some(v) = self.minimum_shots {
            push(Param::MinimumShots, v.to_string());
        }
        if let Some(v) = self.minimum_key_passes {
            push(Param::MinimumKeyPasses, v.to_string());
        }
        if let Some(v) = self.minimum_passes {
            push(Param::MinimumPasses, v.to_string());
        }
        if let Some(v) = self.minimum_shots_faced {
            push(Param::MinimumShotsFaced, v.to_string());
        }
        if let Some(v) = &self.season_name {
            push(Param::SeasonName, v.join());
        }
        if let Some(v) = &self.start_date {
            push(Param::StartDate, v.clone());
        }
        if let Some(v) = &self.end_date {
            push(Param::EndDate, v.clone());
        }
        if let Some(v) = &self.shot_pattern {
            push(Param::ShotPattern, v.join());
        }
        if let Some(v) = &self.pass_origin_third {
            push(Param::PassOriginThird, v.join());
        }
        if let Some(v) = &self.stage_name {
            push(Param::StageName, v.join());
        }
        if let Some(v) = &self.general_position {
            push(Param::GeneralPosition, v.join());
        }
        if let Some(v) = &self.action_type {
            push(Param::ActionType, v.join());
        }
        if let Some(v) = &self.position {
            push(Param::Position, v.join());
        }
        if let Some(v) = &self.zone {
            push(
                Param::Zone,
                v.iter()
                    .map(|z| z.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        if let Some(v) = &self.gamestate_trunc {
            push(
                Param::GamestateTrunc,
                v.iter()
                    .map(|g| g.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        if let Some(v) = self.above_replacement {
            push(Param::AboveReplacement, v.to_string());
        }
        if let Some(v) = self.split_by_teams {
            push(Param::SplitByTeams, v.to_string());
        }
        if let Some(v) = self.split_by_seasons {
            push(Param::SplitBySeasons, v.to_string());
        }
        if let Some(v) = self.split_by_games {
            push(Param::SplitByGames, v.to_string());
        }
        if let Some(v) = self.split_by_positions {
            push(Param::SplitByPositions, v.to_string());
        }
        if let Some(v) = self.home_only {
            push(Param::HomeOnly, v.to_string());
        }
        if let Some(v) = self.away_only {
            push(Param::AwayOnly, v.to_string());
        }
        if let Some(v) = self.home_adjusted {
            push(Param::HomeAdjusted, v.to_string());
        }
        if let Some(v) = self.even_game_state {
            push(Param::EvenGameState, v.to_string());
        }

        params
    }
}

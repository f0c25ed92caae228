//! The ASA API client and its builder

use crate::asa::query::{check_ids_names, StatEndpoint, StatEntity, StatFilters, StatType};
use crate::asa::resolve;
use crate::asa::store::EntityStore;
use crate::asa::types::{scalar_to_string, EntityKind, League, Leagues, OneOrMany, Table};
use crate::core::fetch::execute_query;
use crate::core::http::{Transport, TransportConfig, BASE_URL};
use crate::error::{AsaError, Result};
use serde_json::Value;
use tracing::debug;

/// The one league with public salary data.
const SALARY_LEAGUE: League = League::Mls;

/// Filters for the entity accessors (`get_players`, `get_teams`, ...).
#[derive(Debug, Clone, Default)]
pub struct EntityQuery {
    pub leagues: Leagues,
    /// Cannot be combined with `names`.
    pub ids: Option<OneOrMany>,
    /// Fuzzy-resolved against the entity table; cannot be combined with
    /// `ids`.
    pub names: Option<OneOrMany>,
}

/// Filters for [`Client::get_games`].
#[derive(Debug, Clone, Default)]
pub struct GamesQuery {
    pub leagues: Leagues,
    pub game_ids: Option<OneOrMany>,
    /// Cannot be combined with `team_names`.
    pub team_ids: Option<OneOrMany>,
    /// Fuzzy-resolved to team ids; cannot be combined with `team_ids`.
    pub team_names: Option<OneOrMany>,
    /// Season year(s).
    pub seasons: Option<OneOrMany>,
    /// Competition stage name(s).
    pub stages: Option<OneOrMany>,
}

/// Configures and constructs a [`Client`].
pub struct ClientBuilder {
    base_url: String,
    proxies: Vec<(String, String)>,
    logging_level: Option<tracing::Level>,
    lazy: bool,
    cache: bool,
    cache_capacity: usize,
    disk_cache: bool,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            proxies: Vec::new(),
            logging_level: None,
            lazy: true,
            cache: true,
            cache_capacity: 100,
            disk_cache: false,
        }
    }

    /// Point the client at a different API root (mock servers, staging).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Route requests for `scheme` (`http`, `https` or `all`) through a
    /// proxy.
    pub fn proxy(mut self, scheme: impl Into<String>, url: impl Into<String>) -> Self {
        self.proxies.push((scheme.into(), url.into()));
        self
    }

    /// Install a global log subscriber at this level. Skipped when the
    /// process already has one.
    pub fn logging_level(mut self, level: tracing::Level) -> Self {
        self.logging_level = Some(level);
        self
    }

    /// Defer entity-table fetches until first use (the default) or load all
    /// five tables at construction.
    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Enable or disable the in-memory response cache.
    pub fn response_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// How many responses the memory cache holds.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Persist cached responses under the user cache directory.
    pub fn disk_cache(mut self, enabled: bool) -> Self {
        self.disk_cache = enabled;
        self
    }

    pub async fn build(self) -> Result<Client> {
        if let Some(level) = self.logging_level {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        }

        let transport = Transport::new(TransportConfig {
            base_url: self.base_url,
            proxies: self.proxies,
            cache: self.cache,
            cache_capacity: self.cache_capacity,
            disk_cache: self.disk_cache,
        })?;

        let client = Client {
            transport,
            store: EntityStore::new(),
        };

        if !self.lazy {
            for kind in EntityKind::ALL {
                client.store.get_table(&client.transport, kind).await?;
            }
        }

        Ok(client)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the American Soccer Analysis API.
///
/// Entity reference tables are fetched once per kind and cached for the
/// life of the client; statistics are fetched fresh on every call. All
/// requests run strictly in sequence. One instance is not meant to be
/// shared across threads; use one client per thread instead.
///
/// # Examples
///
/// ```rust,no_run
/// use itscalledsoccer::{Client, League, StatFilters};
///
/// # async fn example() -> itscalledsoccer::Result<()> {
/// let client = Client::new().await?;
/// let xgoals = client
///     .get_player_xgoals(
///         League::Mls,
///         &StatFilters {
///             season_name: Some("2021".into()),
///             ..Default::default()
///         },
///     )
///     .await?;
/// println!("{} rows", xgoals.len());
/// # Ok(())
/// # }
/// ```
pub struct Client {
    transport: Transport,
    store: EntityStore,
}

impl Client {
    /// A client with default configuration.
    pub async fn new() -> Result<Self> {
        Self::builder().build().await
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Refetch and replace the cached table for one entity kind.
    pub async fn refresh_entities(&self, kind: EntityKind) -> Result<()> {
        self.store.refresh(&self.transport, kind).await?;
        Ok(())
    }

    /// Rows of the `kind` reference table matching `query`.
    ///
    /// League and id filters combine with AND semantics; names are
    /// fuzzy-resolved to ids first. Rows come back in table order.
    pub async fn get_entities(&self, kind: EntityKind, query: &EntityQuery) -> Result<Table> {
        check_ids_names(kind.singular(), query.ids.as_ref(), query.names.as_ref())?;

        let table = self.store.get_table(&self.transport, kind).await?;

        let ids = if query.names.is_some() {
            resolve::resolve_many(&self.store, &self.transport, kind, query.names.as_ref()).await?
        } else {
            query.ids.as_ref().map(OneOrMany::to_vec)
        };

        let league_filter: Option<Vec<&'static str>> = match &query.leagues {
            Leagues::All => None,
            other => Some(other.to_vec().iter().map(League::as_str).collect()),
        };

        let rows = table
            .iter()
            .filter(|row| {
                let league_ok = league_filter.as_ref().map_or(true, |leagues| {
                    row.get("competition")
                        .and_then(Value::as_str)
                        .map_or(false, |competition| {
                            leagues.iter().any(|league| *league == competition)
                        })
                });
                let id_ok = ids.as_ref().map_or(true, |ids| {
                    row.get(kind.id_field())
                        .and_then(scalar_to_string)
                        .map_or(false, |id| ids.contains(&id))
                });
                league_ok && id_ok
            })
            .cloned()
            .collect();

        Ok(rows)
    }

    /// Information associated with players.
    pub async fn get_players(&self, query: &EntityQuery) -> Result<Table> {
        self.get_entities(EntityKind::Player, query).await
    }

    /// Information associated with teams.
    pub async fn get_teams(&self, query: &EntityQuery) -> Result<Table> {
        self.get_entities(EntityKind::Team, query).await
    }

    /// Information associated with stadia.
    pub async fn get_stadia(&self, query: &EntityQuery) -> Result<Table> {
        self.get_entities(EntityKind::Stadium, query).await
    }

    /// Information associated with managers.
    pub async fn get_managers(&self, query: &EntityQuery) -> Result<Table> {
        self.get_entities(EntityKind::Manager, query).await
    }

    /// Information associated with referees.
    pub async fn get_referees(&self, query: &EntityQuery) -> Result<Table> {
        self.get_entities(EntityKind::Referee, query).await
    }

    /// Games matching `query`, most recent kickoff first.
    pub async fn get_games(&self, query: &GamesQuery) -> Result<Table> {
        check_ids_names("team", query.team_ids.as_ref(), query.team_names.as_ref())?;

        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(ids) = &query.game_ids {
            params.push(("game_id".to_string(), ids.join()));
        }
        let team_ids = if query.team_names.is_some() {
            resolve::resolve_many(
                &self.store,
                &self.transport,
                EntityKind::Team,
                query.team_names.as_ref(),
            )
            .await?
        } else {
            query.team_ids.as_ref().map(OneOrMany::to_vec)
        };
        if let Some(ids) = team_ids {
            params.push(("team_id".to_string(), ids.join(",")));
        }
        if let Some(seasons) = &query.seasons {
            params.push(("season_name".to_string(), seasons.join()));
        }
        if let Some(stages) = &query.stages {
            params.push(("stage_name".to_string(), stages.join()));
        }

        let mut games = Table::new();
        for league in query.leagues.to_vec() {
            let url = format!("{}/{}/games", self.transport.base_url(), league);
            games.extend(execute_query(&self.transport, &url, &params).await?);
        }

        sort_games_by_kickoff_desc(&mut games);
        Ok(games)
    }

    /// Player xG data.
    pub async fn get_player_xgoals(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(StatEntity::Players, StatType::Xgoals, leagues.into(), filters)
            .await
    }

    /// Player xPass data.
    pub async fn get_player_xpass(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(StatEntity::Players, StatType::Xpass, leagues.into(), filters)
            .await
    }

    /// Player goals added (g+) data.
    pub async fn get_player_goals_added(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(
            StatEntity::Players,
            StatType::GoalsAdded,
            leagues.into(),
            filters,
        )
        .await
    }

    /// Player salary data. MLS only.
    pub async fn get_player_salaries(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(
            StatEntity::Players,
            StatType::Salaries,
            leagues.into(),
            filters,
        )
        .await
    }

    /// Goalkeeper xG data.
    pub async fn get_goalkeeper_xgoals(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(
            StatEntity::Goalkeepers,
            StatType::Xgoals,
            leagues.into(),
            filters,
        )
        .await
    }

    /// Goalkeeper goals added (g+) data.
    pub async fn get_goalkeeper_goals_added(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(
            StatEntity::Goalkeepers,
            StatType::GoalsAdded,
            leagues.into(),
            filters,
        )
        .await
    }

    /// Team xG data.
    pub async fn get_team_xgoals(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(StatEntity::Teams, StatType::Xgoals, leagues.into(), filters)
            .await
    }

    /// Team xPass data.
    pub async fn get_team_xpass(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(StatEntity::Teams, StatType::Xpass, leagues.into(), filters)
            .await
    }

    /// Team goals added (g+) data.
    pub async fn get_team_goals_added(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(
            StatEntity::Teams,
            StatType::GoalsAdded,
            leagues.into(),
            filters,
        )
        .await
    }

    /// Team salary data. MLS only.
    pub async fn get_team_salaries(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(StatEntity::Teams, StatType::Salaries, leagues.into(), filters)
            .await
    }

    /// Game xG data.
    pub async fn get_game_xgoals(
        &self,
        leagues: impl Into<Leagues>,
        filters: &StatFilters,
    ) -> Result<Table> {
        self.get_stats(StatEntity::Games, StatType::Xgoals, leagues.into(), filters)
            .await
    }

    /// Shared statistics path: validate, resolve names, then page through
    /// each requested league in order and concatenate.
    async fn get_stats(
        &self,
        entity: StatEntity,
        stat: StatType,
        leagues: Leagues,
        filters: &StatFilters,
    ) -> Result<Table> {
        let endpoint = StatEndpoint::new(entity, stat);
        debug!(endpoint = %endpoint, "get_stats");

        let leagues = match (stat, &leagues) {
            // Salary accessors default to the only league that has data
            (StatType::Salaries, Leagues::All) => vec![SALARY_LEAGUE],
            (_, selection) => selection.to_vec(),
        };
        if stat == StatType::Salaries {
            for league in &leagues {
                if *league != SALARY_LEAGUE {
                    return Err(AsaError::RestrictedLeague {
                        stat: "salary",
                        allowed: SALARY_LEAGUE.as_str(),
                        league: league.to_string(),
                    });
                }
            }
        }

        let mut filters = filters.clone();
        if endpoint == StatEndpoint::new(StatEntity::Teams, StatType::Salaries)
            && filters.split_by_teams.is_none()
            && filters.split_by_seasons.is_none()
            && filters.split_by_positions.is_none()
        {
            // Team salaries must be grouped by something; teams is the
            // documented default
            filters.split_by_teams = Some(true);
        }

        filters.validate(&endpoint)?;

        let player_id = if filters.player_names.is_some() {
            resolve::resolve_many(
                &self.store,
                &self.transport,
                EntityKind::Player,
                filters.player_names.as_ref(),
            )
            .await?
        } else {
            filters.player_ids.as_ref().map(OneOrMany::to_vec)
        };
        let team_id = if filters.team_names.is_some() {
            resolve::resolve_many(
                &self.store,
                &self.transport,
                EntityKind::Team,
                filters.team_names.as_ref(),
            )
            .await?
        } else {
            filters.team_ids.as_ref().map(OneOrMany::to_vec)
        };

        let params = filters.wire_params(player_id, team_id);

        let mut stats = Table::new();
        for league in leagues {
            let url = format!("{}/{}/{}", self.transport.base_url(), league, endpoint);
            stats.extend(execute_query(&self.transport, &url, &params).await?);
        }

        Ok(stats)
    }
}

/// Most recent kickoff first. ISO timestamps in one format compare
/// correctly as strings; rows without one sort last.
fn sort_games_by_kickoff_desc(games: &mut Table) {
    games.sort_by(|a, b| {
        let a = a.get("date_time_utc").and_then(Value::as_str).unwrap_or("");
        let b = b.get("date_time_utc").and_then(Value::as_str).unwrap_or("");
        b.cmp(a)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asa::types::Row;
    use serde_json::json;

    fn game(ts: &str) -> Row {
        match json!({"game_id": ts, "date_time_utc": ts}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_games_sort_most_recent_first() {
        let mut games = vec![
            game("2021-05-01 00:00:00 UTC"),
            game("2022-01-01 00:00:00 UTC"),
            game("2021-12-31 00:00:00 UTC"),
        ];
        sort_games_by_kickoff_desc(&mut games);

        let order: Vec<&str> = games
            .iter()
            .map(|g| g["game_id"].as_str().unwrap())
            .collect();
        assert_eq!(
            order,
            vec![
                "2022-01-01 00:00:00 UTC",
                "2021-12-31 00:00:00 UTC",
                "2021-05-01 00:00:00 UTC"
            ]
        );
    }

    #[test]
    fn test_games_without_timestamp_sort_last() {
        let mut games = vec![Row::new(), game("2021-05-01 00:00:00 UTC")];
        sort_games_by_kickoff_desc(&mut games);

        assert!(games[0].contains_key("date_time_utc"));
        assert!(!games[1].contains_key("date_time_utc"));
    }
}

//! Leagues, entity kinds and argument types for the ASA API.

use crate::error::{AsaError, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One flat JSON object as returned by the API.
pub type Row = serde_json::Map<String, Value>;

/// An ordered collection of rows.
pub type Table = Vec<Row>;

/// Competitions covered by the API.
///
/// Every league-scoped operation takes one or more of these codes; string
/// input is validated at parse time, so an unknown code never reaches the
/// wire.
///
/// # Examples
///
/// ```rust
/// use itscalledsoccer::League;
///
/// let league: League = "mls".parse().unwrap();
/// assert_eq!(league, League::Mls);
/// assert_eq!(league.as_str(), "mls");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
    Nwsl,
    Mls,
    Uslc,
    Usl1,
    Usls,
    Nasl,
    Mlsnp,
}

impl League {
    /// All known leagues, in the order multi-league results are concatenated.
    pub const ALL: [League; 7] = [
        League::Nwsl,
        League::Mls,
        League::Uslc,
        League::Usl1,
        League::Usls,
        League::Nasl,
        League::Mlsnp,
    ];

    /// The league code used in URL paths and the `competition` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            League::Nwsl => "nwsl",
            League::Mls => "mls",
            League::Uslc => "uslc",
            League::Usl1 => "usl1",
            League::Usls => "usls",
            League::Nasl => "nasl",
            League::Mlsnp => "mlsnp",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for League {
    type Err = AsaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "nwsl" => Ok(League::Nwsl),
            "mls" => Ok(League::Mls),
            "uslc" => Ok(League::Uslc),
            "usl1" => Ok(League::Usl1),
            "usls" => Ok(League::Usls),
            "nasl" => Ok(League::Nasl),
            "mlsnp" => Ok(League::Mlsnp),
            _ => Err(AsaError::UnknownLeague {
                league: s.to_string(),
            }),
        }
    }
}

/// League selection for an accessor call.
///
/// `All` expands to [`League::ALL`] (salary accessors narrow it to MLS, the
/// only league with public salary data).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Leagues {
    #[default]
    All,
    One(League),
    Many(Vec<League>),
}

impl Leagues {
    /// The concrete league list, in iteration order.
    pub fn to_vec(&self) -> Vec<League> {
        match self {
            Leagues::All => League::ALL.to_vec(),
            Leagues::One(league) => vec![*league],
            Leagues::Many(leagues) => leagues.clone(),
        }
    }
}

impl From<League> for Leagues {
    fn from(league: League) -> Self {
        Leagues::One(league)
    }
}

impl From<Vec<League>> for Leagues {
    fn from(leagues: Vec<League>) -> Self {
        Leagues::Many(leagues)
    }
}

impl From<&[League]> for Leagues {
    fn from(leagues: &[League]) -> Self {
        Leagues::Many(leagues.to_vec())
    }
}

/// Named entity kinds tracked by the API.
///
/// Each variant carries its wire names, so endpoint construction and column
/// lookups are table lookups rather than string branching. Note the
/// irregular plural for stadiums: the collection path is `stadia`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Team,
    Stadium,
    Manager,
    Referee,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Player,
        EntityKind::Team,
        EntityKind::Stadium,
        EntityKind::Manager,
        EntityKind::Referee,
    ];

    /// Canonical singular name.
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Team => "team",
            EntityKind::Stadium => "stadium",
            EntityKind::Manager => "manager",
            EntityKind::Referee => "referee",
        }
    }

    /// Collection path segment under a league.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Player => "players",
            EntityKind::Team => "teams",
            EntityKind::Stadium => "stadia",
            EntityKind::Manager => "managers",
            EntityKind::Referee => "referees",
        }
    }

    /// Column holding the canonical id.
    pub fn id_field(&self) -> &'static str {
        match self {
            EntityKind::Player => "player_id",
            EntityKind::Team => "team_id",
            EntityKind::Stadium => "stadium_id",
            EntityKind::Manager => "manager_id",
            EntityKind::Referee => "referee_id",
        }
    }

    /// Column holding the display name.
    pub fn name_field(&self) -> &'static str {
        match self {
            EntityKind::Player => "player_name",
            EntityKind::Team => "team_name",
            EntityKind::Stadium => "stadium_name",
            EntityKind::Manager => "manager_name",
            EntityKind::Referee => "referee_name",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.singular())
    }
}

impl FromStr for EntityKind {
    type Err = AsaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "player" | "players" => Ok(EntityKind::Player),
            "team" | "teams" => Ok(EntityKind::Team),
            "stadium" | "stadia" => Ok(EntityKind::Stadium),
            "manager" | "managers" => Ok(EntityKind::Manager),
            "referee" | "referees" => Ok(EntityKind::Referee),
            _ => Err(AsaError::UnknownEntityKind {
                kind: s.to_string(),
            }),
        }
    }
}

/// A single string or a list of strings.
///
/// Filter arguments accept either form; list values are comma-joined on the
/// wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value).iter(),
            OneOrMany::Many(values) => values.iter(),
        }
        .map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    /// Comma-joined wire form.
    pub fn join(&self) -> String {
        self.to_vec().join(",")
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        OneOrMany::One(value)
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<&[&str]> for OneOrMany {
    fn from(values: &[&str]) -> Self {
        OneOrMany::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Render a scalar JSON value the way it appears in a query string.
///
/// Ids come back from the API as strings, but this tolerates numeric ids.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

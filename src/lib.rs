//! American Soccer Analysis API Client
//!
//! A Rust client for the American Soccer Analysis API, covering entity
//! lookups (players, teams, stadia, managers, referees, games) and derived
//! statistics (xG, xPass, goals added, salaries) across American soccer
//! leagues.
//!
//! ## Features
//!
//! - **Entity Lookups**: Cached cross-league reference tables with league
//!   and id filtering
//! - **Fuzzy Name Matching**: Free-text names resolved to canonical ids, so
//!   misspellings and partial names still match
//! - **Statistics Accessors**: Player, goalkeeper, team and game endpoints
//!   with per-endpoint filter validation
//! - **Transparent Pagination**: Results beyond the API's 1000-row page
//!   limit are stitched together automatically
//! - **Response Caching**: In-memory LRU cache with optional disk
//!   persistence
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itscalledsoccer::{Client, EntityQuery, League, StatFilters};
//!
//! # async fn example() -> itscalledsoccer::Result<()> {
//! let client = Client::new().await?;
//!
//! // Every NWSL team
//! let teams = client
//!     .get_teams(&EntityQuery {
//!         leagues: League::Nwsl.into(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // 2021 MLS player xG, names matched fuzzily
//! let xgoals = client
//!     .get_player_xgoals(
//!         League::Mls,
//!         &StatFilters {
//!             player_names: Some("Carles Gil".into()),
//!             season_name: Some("2021".into()),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! # let _ = (teams, xgoals);
//! # Ok(())
//! # }
//! ```

pub mod asa;
pub mod cli;
pub mod commands;
pub mod core;
pub mod error;

// Re-export commonly used types
pub use asa::client::{Client, ClientBuilder, EntityQuery, GamesQuery};
pub use asa::query::{StatFilters, StatEntity, StatType};
pub use asa::types::{EntityKind, League, Leagues, OneOrMany, Row, Table};
pub use error::{AsaError, Result};

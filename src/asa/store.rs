//! Lifetime cache of entity reference tables

use crate::asa::types::{EntityKind, League, Row, Table};
use crate::core::http::Transport;
use crate::error::Result;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// One cache slot per entity kind, fetch-if-absent.
#[derive(Default)]
struct Slots {
    players: Option<Arc<Table>>,
    teams: Option<Arc<Table>>,
    stadia: Option<Arc<Table>>,
    managers: Option<Arc<Table>>,
    referees: Option<Arc<Table>>,
}

impl Slots {
    fn slot(&mut self, kind: EntityKind) -> &mut Option<Arc<Table>> {
        match kind {
            EntityKind::Player => &mut self.players,
            EntityKind::Team => &mut self.teams,
            EntityKind::Stadium => &mut self.stadia,
            EntityKind::Manager => &mut self.managers,
            EntityKind::Referee => &mut self.referees,
        }
    }

    fn get(&self, kind: EntityKind) -> Option<Arc<Table>> {
        match kind {
            EntityKind::Player => self.players.clone(),
            EntityKind::Team => self.teams.clone(),
            EntityKind::Stadium => self.stadia.clone(),
            EntityKind::Manager => self.managers.clone(),
            EntityKind::Referee => self.referees.clone(),
        }
    }
}

/// Per-client cache of the full cross-league reference table for each
/// entity kind. Tables live for the life of the client; refresh replaces a
/// whole table, never part of one.
pub struct EntityStore {
    slots: Mutex<Slots>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Slots::default()),
        }
    }

    /// The full table for `kind`, fetching it on first access.
    pub async fn get_table(&self, transport: &Transport, kind: EntityKind) -> Result<Arc<Table>> {
        if let Some(table) = self.slots.lock().unwrap().get(kind) {
            return Ok(table);
        }

        let table = Arc::new(Self::fetch_table(transport, kind).await?);
        *self.slots.lock().unwrap().slot(kind) = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Refetch and replace the table for `kind`.
    ///
    /// The old table stays in place until the new one is complete, so a
    /// failed refresh leaves the cache as it was.
    pub async fn refresh(&self, transport: &Transport, kind: EntityKind) -> Result<Arc<Table>> {
        let table = Arc::new(Self::fetch_table(transport, kind).await?);
        *self.slots.lock().unwrap().slot(kind) = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Gather `kind` across every league, tagging each row with its source
    /// league under `competition`. A failure for any league fails the whole
    /// fetch; nothing partial is cached.
    async fn fetch_table(transport: &Transport, kind: EntityKind) -> Result<Table> {
        debug!(kind = %kind, "gathering all {}", kind.collection());

        let mut table = Table::new();
        for league in League::ALL {
            let url = format!("{}/{}/{}", transport.base_url(), league, kind.collection());
            let value = transport.get_json(&url, &[]).await?;
            let rows: Vec<Row> = serde_json::from_value(value)?;
            for mut row in rows {
                row.insert(
                    "competition".to_string(),
                    Value::String(league.as_str().to_string()),
                );
                table.push(row);
            }
        }

        Ok(table)
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::TransportConfig;
    use crate::error::AsaError;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_transport(base_url: &str) -> Transport {
        Transport::new(TransportConfig {
            base_url: base_url.to_string(),
            cache: false,
            ..Default::default()
        })
        .unwrap()
    }

    async fn mount_empty_leagues(server: &MockServer, kind: EntityKind, except: &[League]) {
        for league in League::ALL {
            if except.contains(&league) {
                continue;
            }
            Mock::given(method("GET"))
                .and(path(format!("/{}/{}", league, kind.collection())))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .mount(server)
                .await;
        }
    }

    #[tokio::test]
    async fn test_rows_are_tagged_with_their_league() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mls/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"team_id": "t1", "team_name": "Austin FC"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/nwsl/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"team_id": "t2", "team_name": "Portland Thorns"}
            ])))
            .mount(&server)
            .await;
        mount_empty_leagues(&server, EntityKind::Team, &[League::Mls, League::Nwsl]).await;

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();
        let table = store.get_table(&transport, EntityKind::Team).await.unwrap();

        assert_eq!(table.len(), 2);
        // nwsl precedes mls in League::ALL
        assert_eq!(table[0]["competition"], json!("nwsl"));
        assert_eq!(table[0]["team_id"], json!("t2"));
        assert_eq!(table[1]["competition"], json!("mls"));
    }

    #[tokio::test]
    async fn test_table_is_fetched_once() {
        let server = MockServer::start().await;

        for league in League::ALL {
            Mock::given(method("GET"))
                .and(path(format!("/{league}/referees")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .expect(1)
                .mount(&server)
                .await;
        }

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();
        store
            .get_table(&transport, EntityKind::Referee)
            .await
            .unwrap();
        store
            .get_table(&transport, EntityKind::Referee)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_one_failing_league_fails_the_whole_fetch() {
        let server = MockServer::start().await;

        mount_empty_leagues(&server, EntityKind::Manager, &[League::Nasl]).await;
        Mock::given(method("GET"))
            .and(path("/nasl/managers"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();
        let err = store
            .get_table(&transport, EntityKind::Manager)
            .await
            .unwrap_err();
        assert!(matches!(err, AsaError::Http(_)));

        // No partial table was cached: a later call retries the fetch
        let err = store
            .get_table(&transport, EntityKind::Manager)
            .await
            .unwrap_err();
        assert!(matches!(err, AsaError::Http(_)));
    }

    #[tokio::test]
    async fn test_stadium_uses_singular_collection_path() {
        let server = MockServer::start().await;

        mount_empty_leagues(&server, EntityKind::Stadium, &[League::Mls]).await;
        Mock::given(method("GET"))
            .and(path("/mls/stadia"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"stadium_id": "s1", "stadium_name": "Providence Park"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();
        let table = store
            .get_table(&transport, EntityKind::Stadium)
            .await
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table[0]["stadium_id"], json!("s1"));
    }

    #[tokio::test]
    async fn test_refresh_replaces_the_whole_table() {
        let server = MockServer::start().await;

        mount_empty_leagues(&server, EntityKind::Team, &[League::Mls]).await;
        Mock::given(method("GET"))
            .and(path("/mls/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"team_id": "t1"}
            ])))
            .mount(&server)
            .await;

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();

        let before = store.get_table(&transport, EntityKind::Team).await.unwrap();
        let after = store.refresh(&transport, EntityKind::Team).await.unwrap();

        assert_eq!(before.len(), after.len());
        assert!(!Arc::ptr_eq(&before, &after));
    }
}

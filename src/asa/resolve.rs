//! Fuzzy resolution of free-text names to canonical ids

use crate::asa::store::EntityStore;
use crate::asa::types::{scalar_to_string, EntityKind, OneOrMany};
use crate::core::http::Transport;
use crate::error::Result;
use rapidfuzz::fuzz;
use serde_json::Value;
use tracing::info;

/// Lowest partial-ratio score (0-100) accepted as a match.
pub const MIN_MATCH_SCORE: f64 = 70.0;

/// Resolve one free-text name to the best-matching entity id.
///
/// Scores every named row of the kind's reference table with a
/// partial-ratio comparison and keeps the highest scorer, first seen
/// winning ties. A best score under [`MIN_MATCH_SCORE`], or an empty
/// candidate set, resolves to `""` with an informational log line; a miss
/// is not an error. Only the underlying table fetch can fail.
pub async fn resolve_one(
    store: &EntityStore,
    transport: &Transport,
    kind: EntityKind,
    name: &str,
) -> Result<String> {
    let table = store.get_table(transport, kind).await?;

    let mut best: Option<(&serde_json::Map<String, Value>, f64)> = None;
    for row in table.iter() {
        let Some(candidate) = row.get(kind.name_field()).and_then(Value::as_str) else {
            continue;
        };
        let score = fuzz::partial_ratio(name.chars(), candidate.chars());
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((row, score));
        }
    }

    match best {
        Some((row, score)) if score >= MIN_MATCH_SCORE => Ok(row
            .get(kind.id_field())
            .and_then(scalar_to_string)
            .unwrap_or_default()),
        Some((_, score)) => {
            info!(kind = %kind, name, score, "no match found due to score");
            Ok(String::new())
        }
        None => {
            info!(kind = %kind, name, "no match found");
            Ok(String::new())
        }
    }
}

/// Resolve a batch of names, preserving input order and length.
///
/// `None` short-circuits to `None` — "no names requested" is distinct from
/// "every resolution missed". Misses come back as empty-id entries.
pub async fn resolve_many(
    store: &EntityStore,
    transport: &Transport,
    kind: EntityKind,
    names: Option<&OneOrMany>,
) -> Result<Option<Vec<String>>> {
    let Some(names) = names else {
        return Ok(None);
    };

    let mut ids = Vec::new();
    for name in names.iter() {
        ids.push(resolve_one(store, transport, kind, name).await?);
    }
    Ok(Some(ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asa::types::League;
    use crate::core::http::TransportConfig;
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

    /// Serve `players` under mls and empty lists for every other league.
    async fn mount_players(server: &MockServer, players: serde_json::Value) {
        for league in League::ALL {
            let body = if league == League::Mls {
                players.clone()
            } else {
                json!([])
            };
            Mock::given(method("GET"))
                .and(path(format!("/{league}/players")))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(server)
                .await;
        }
    }

    #[tokio::test]
    async fn test_exact_name_resolves_to_its_id() {
        let server = MockServer::start().await;
        mount_players(
            &server,
            json!([
                {"player_id": "p1", "player_name": "Carles Gil"},
                {"player_id": "p2", "player_name": "Hany Mukhtar"}
            ]),
        )
        .await;

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();

        let id = resolve_one(&store, &transport, EntityKind::Player, "Hany Mukhtar")
            .await
            .unwrap();
        assert_eq!(id, "p2");
    }

    #[tokio::test]
    async fn test_partial_name_resolves() {
        let server = MockServer::start().await;
        mount_players(
            &server,
            json!([
                {"player_id": "p1", "player_name": "Carles Gil"},
                {"player_id": "p2", "player_name": "Hany Mukhtar"}
            ]),
        )
        .await;

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();

        let id = resolve_one(&store, &transport, EntityKind::Player, "Mukhtar")
            .await
            .unwrap();
        assert_eq!(id, "p2");
    }

    #[tokio::test]
    async fn test_low_score_resolves_to_empty_id() {
        let server = MockServer::start().await;
        mount_players(
            &server,
            json!([
                {"player_id": "p1", "player_name": "Carles Gil"}
            ]),
        )
        .await;

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();

        let id = resolve_one(&store, &transport, EntityKind::Player, "Zlatan Ibrahimovic")
            .await
            .unwrap();
        assert_eq!(id, "");
    }

    #[tokio::test]
    async fn test_rows_without_a_name_are_skipped() {
        let server = MockServer::start().await;
        mount_players(
            &server,
            json!([
                {"player_id": "p0"},
                {"player_id": "p1", "player_name": "Carles Gil"}
            ]),
        )
        .await;

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();

        let id = resolve_one(&store, &transport, EntityKind::Player, "Carles Gil")
            .await
            .unwrap();
        assert_eq!(id, "p1");
    }

    #[tokio::test]
    async fn test_resolve_many_preserves_order_and_misses() {
        let server = MockServer::start().await;
        mount_players(
            &server,
            json!([
                {"player_id": "p1", "player_name": "Carles Gil"},
                {"player_id": "p2", "player_name": "Hany Mukhtar"}
            ]),
        )
        .await;

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();

        let names = OneOrMany::from(vec![
            "Hany Mukhtar".to_string(),
            "Zlatan Ibrahimovic".to_string(),
            "Carles Gil".to_string(),
        ]);
        let ids = resolve_many(&store, &transport, EntityKind::Player, Some(&names))
            .await
            .unwrap();

        assert_eq!(ids, Some(vec!["p2".into(), "".into(), "p1".into()]));
    }

    #[tokio::test]
    async fn test_resolve_many_none_short_circuits() {
        let server = MockServer::start().await;

        let transport = test_transport(&server.uri());
        let store = EntityStore::new();

        // No names requested: no table fetch, no result list
        let ids = resolve_many(&store, &transport, EntityKind::Player, None)
            .await
            .unwrap();
        assert_eq!(ids, None);
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

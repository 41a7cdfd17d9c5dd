//! The persistence boundary (§6): a trait the core depends on but never
//! implements. Serialization concerns (compact seed strings, opaque
//! metadata) stop here — a real adapter (SQLite, a key-value store, a
//! remote API) is an external collaborator supplied by the embedding
//! application.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RuntimeResult;

/// What the core persists for one agent. Brain state (motivation,
/// memory, current behavior) is deliberately absent — a reloaded agent
/// always starts from initial motivation and empty memory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentBlob {
    pub id: Uuid,
    /// Compact string an external appearance layer can expand back into
    /// a full look; opaque to this crate.
    pub seed: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Serialized agents keyed by id, grouped into named collections. No
/// implementation ships in this crate; tests use an in-memory fake.
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    async fn save(&self, collection: &str, blob: &AgentBlob) -> RuntimeResult<()>;
    async fn load(&self, collection: &str, id: Uuid) -> RuntimeResult<Option<AgentBlob>>;
    async fn list(&self, collection: &str) -> RuntimeResult<Vec<Uuid>>;
    async fn delete(&self, collection: &str, id: Uuid) -> RuntimeResult<()>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryAdapter {
        data: Mutex<HashMap<(String, Uuid), AgentBlob>>,
    }

    #[async_trait]
    impl PersistenceAdapter for InMemoryAdapter {
        async fn save(&self, collection: &str, blob: &AgentBlob) -> RuntimeResult<()> {
            self.data.lock().await.insert((collection.to_string(), blob.id), blob.clone());
            Ok(())
        }

        async fn load(&self, collection: &str, id: Uuid) -> RuntimeResult<Option<AgentBlob>> {
            Ok(self.data.lock().await.get(&(collection.to_string(), id)).cloned())
        }

        async fn list(&self, collection: &str) -> RuntimeResult<Vec<Uuid>> {
            Ok(self
                .data
                .lock()
                .await
                .keys()
                .filter(|(c, _)| c == collection)
                .map(|(_, id)| *id)
                .collect())
        }

        async fn delete(&self, collection: &str, id: Uuid) -> RuntimeResult<()> {
            self.data.lock().await.remove(&(collection.to_string(), id));
            Ok(())
        }
    }

    #[tokio::test]
    async fn round_trips_a_blob() {
        let adapter = InMemoryAdapter::default();
        let blob = AgentBlob {
            id: Uuid::new_v4(),
            seed: "abc123".into(),
            name: Some("Whiskers".into()),
            description: None,
            metadata: serde_json::json!({"coat": "tabby"}),
            created_at: Utc::now(),
        };
        adapter.save("agents", &blob).await.unwrap();
        let loaded = adapter.load("agents", blob.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, blob.name);
        assert_eq!(adapter.list("agents").await.unwrap(), vec![blob.id]);
        adapter.delete("agents", blob.id).await.unwrap();
        assert!(adapter.load("agents", blob.id).await.unwrap().is_none());
    }
}

//! The Agent Registry (C11): the process-wide set of live agents.
//! Insertion order is the iteration order callers see, the same
//! load-bearing guarantee the Interaction Registry's event bus makes
//! for publish order — realized with a `Vec<Uuid>` alongside the
//! lookup map rather than an `IndexMap`, since no crate in this
//! dependency stack already pulls that dependency in (see DESIGN.md).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::agent::Agent;
use crate::error::RuntimeResult;

#[derive(Default)]
struct Inner {
    order: Vec<Uuid>,
    agents: HashMap<Uuid, Arc<Agent>>,
}

#[derive(Default)]
pub struct AgentRegistry {
    inner: Mutex<Inner>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, agent: Agent) -> Arc<Agent> {
        let agent = Arc::new(agent);
        let mut inner = self.inner.lock().await;
        inner.order.push(agent.id());
        inner.agents.insert(agent.id(), agent.clone());
        agent
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Agent>> {
        self.inner.lock().await.agents.get(&id).cloned()
    }

    /// A snapshot in insertion order. Agents added or removed mid-call
    /// by another task are never seen by this snapshot, so iterating it
    /// afterwards can never panic on a vanished entry; callers fetch
    /// each agent individually and skip ones that are already gone.
    pub async fn get_all(&self) -> Vec<Arc<Agent>> {
        let inner = self.inner.lock().await;
        inner.order.iter().filter_map(|id| inner.agents.get(id).cloned()).collect()
    }

    /// Removes and destroys the agent in one step; this is the only
    /// path that tears an agent down, so `Agent::destroy` never needs
    /// to reach back into the registry that holds it.
    pub async fn remove(&self, id: Uuid) -> RuntimeResult<()> {
        let agent = {
            let mut inner = self.inner.lock().await;
            inner.order.retain(|existing| *existing != id);
            inner.agents.remove(&id)
        };
        if let Some(agent) = agent {
            agent.destroy().await?;
        }
        Ok(())
    }

    pub async fn pause_all(&self) -> RuntimeResult<()> {
        for agent in self.get_all().await {
            agent.pause().await?;
        }
        Ok(())
    }

    pub async fn resume_all(&self) -> RuntimeResult<()> {
        for agent in self.get_all().await {
            agent.resume().await?;
        }
        Ok(())
    }

    /// Destroys every agent and empties the registry.
    pub async fn clear(&self) -> RuntimeResult<()> {
        let ids: Vec<Uuid> = {
            let inner = self.inner.lock().await;
            inner.order.clone()
        };
        for id in ids {
            self.remove(id).await?;
        }
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

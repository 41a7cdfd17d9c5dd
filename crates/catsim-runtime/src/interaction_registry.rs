//! The Interaction Registry (C4): a process-wide store of needs, yarns,
//! and the (at most one) active laser, with a typed event bus and
//! nearest-neighbor spatial queries.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;
use uuid::Uuid;

use catsim_core::{NeedKind, Position, YarnState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YarnRecord {
    pub position: Position,
    pub state: YarnState,
    pub velocity: Option<(f64, f64)>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaserRecord {
    pub position: Position,
    pub active: bool,
}

/// One event per topic named in §4.4. Delivery is via
/// `tokio::sync::broadcast`, so every subscriber sees every event in
/// publish order; a handler erroring is the subscriber's problem, never
/// the registry's — it never aborts delivery to anyone else.
#[derive(Clone, Debug)]
pub enum InteractionEvent {
    NeedPlaced { id: Uuid, kind: NeedKind, position: Position },
    NeedRemoved { id: Uuid },
    YarnPlaced { id: Uuid, position: Position },
    YarnMoved { id: Uuid, position: Position, state: YarnState },
    YarnRemoved { id: Uuid },
    LaserActivated { position: Position },
    LaserMoved { position: Position },
    LaserDeactivated,
}

struct Inner {
    needs: HashMap<Uuid, (NeedKind, Position)>,
    yarns: HashMap<Uuid, YarnRecord>,
    laser: Option<LaserRecord>,
}

pub struct InteractionRegistry {
    inner: Mutex<Inner>,
    events: broadcast::Sender<InteractionEvent>,
}

impl InteractionRegistry {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            inner: Mutex::new(Inner {
                needs: HashMap::new(),
                yarns: HashMap::new(),
                laser: None,
            }),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InteractionEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: InteractionEvent) {
        // `broadcast::Sender::send` errors only when there are zero
        // receivers, which simply means nobody cares about this event —
        // not a failure worth logging.
        let _ = self.events.send(event);
    }

    pub fn place_need(&self, kind: NeedKind, pos: Position) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().needs.insert(id, (kind, pos));
        self.publish(InteractionEvent::NeedPlaced { id, kind, position: pos });
        id
    }

    pub fn place_yarn(&self, pos: Position) -> Uuid {
        let id = Uuid::new_v4();
        let record = YarnRecord { position: pos, state: YarnState::Idle, velocity: None };
        self.inner.lock().unwrap().yarns.insert(id, record);
        self.publish(InteractionEvent::YarnPlaced { id, position: pos });
        id
    }

    pub fn move_yarn(&self, id: Uuid, pos: Position, state: YarnState, velocity: Option<(f64, f64)>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.yarns.get_mut(&id) {
            record.position = pos;
            record.state = state;
            record.velocity = velocity;
            drop(inner);
            self.publish(InteractionEvent::YarnMoved { id, position: pos, state });
        }
    }

    pub fn set_laser(&self, pos: Option<Position>) {
        let mut inner = self.inner.lock().unwrap();
        match pos {
            Some(position) => {
                let was_active = inner.laser.map(|l| l.active).unwrap_or(false);
                inner.laser = Some(LaserRecord { position, active: true });
                drop(inner);
                if was_active {
                    self.publish(InteractionEvent::LaserMoved { position });
                } else {
                    self.publish(InteractionEvent::LaserActivated { position });
                }
            }
            None => {
                inner.laser = None;
                drop(inner);
                self.publish(InteractionEvent::LaserDeactivated);
            }
        }
    }

    pub fn remove(&self, id: Uuid) {
        let mut inner = self.inner.lock().unwrap();
        if inner.needs.remove(&id).is_some() {
            drop(inner);
            self.publish(InteractionEvent::NeedRemoved { id });
        } else if inner.yarns.remove(&id).is_some() {
            drop(inner);
            self.publish(InteractionEvent::YarnRemoved { id });
        }
    }

    /// Needs within `radius` of `pos`, sorted by distance ascending.
    pub fn needs_near(&self, pos: Position, radius: f64) -> Vec<(Uuid, NeedKind, Position, f64)> {
        let inner = self.inner.lock().unwrap();
        let mut results: Vec<_> = inner
            .needs
            .iter()
            .map(|(&id, &(kind, p))| (id, kind, p, pos.distance_to(&p)))
            .filter(|&(_, _, _, d)| d <= radius)
            .collect();
        results.sort_by(|a, b| a.3.partial_cmp(&b.3).unwrap());
        results
    }

    /// Yarns within `radius` of `pos`, sorted by distance ascending.
    pub fn yarns_near(&self, pos: Position, radius: f64) -> Vec<(Uuid, YarnRecord, f64)> {
        let inner = self.inner.lock().unwrap();
        let mut results: Vec<_> = inner
            .yarns
            .iter()
            .map(|(&id, &record)| (id, record, pos.distance_to(&record.position)))
            .filter(|&(_, _, d)| d <= radius)
            .collect();
        results.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap());
        results
    }

    pub fn active_laser(&self) -> Option<LaserRecord> {
        self.inner.lock().unwrap().laser.filter(|l| l.active)
    }

    /// Direct by-id lookup, independent of distance — used by explicit
    /// triggers (`respond_to_need`, `play_with_yarn`) to resolve a
    /// caller-supplied id into a position.
    pub fn get_need(&self, id: Uuid) -> Option<(NeedKind, Position)> {
        self.inner.lock().unwrap().needs.get(&id).copied()
    }

    pub fn get_yarn(&self, id: Uuid) -> Option<YarnRecord> {
        self.inner.lock().unwrap().yarns.get(&id).copied()
    }
}

impl Default for InteractionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_near_sorts_by_distance_and_excludes_out_of_radius() {
        let registry = InteractionRegistry::new();
        registry.place_need(NeedKind::FoodBasic, Position::new(100.0, 0.0));
        registry.place_need(NeedKind::Water, Position::new(10.0, 0.0));
        registry.place_need(NeedKind::FoodFancy, Position::new(1000.0, 0.0));

        let found = registry.needs_near(Position::new(0.0, 0.0), 150.0);
        assert_eq!(found.len(), 2);
        assert!(found[0].3 < found[1].3);
    }

    #[test]
    fn exactly_at_radius_counts_as_detected() {
        let registry = InteractionRegistry::new();
        registry.place_need(NeedKind::Water, Position::new(150.0, 0.0));
        let found = registry.needs_near(Position::new(0.0, 0.0), 150.0);
        assert_eq!(found.len(), 1, "closed interval: exactly at radius must count");
    }

    #[test]
    fn remove_drops_need_from_future_queries() {
        let registry = InteractionRegistry::new();
        let id = registry.place_need(NeedKind::Water, Position::new(10.0, 0.0));
        registry.remove(id);
        assert!(registry.needs_near(Position::new(0.0, 0.0), 150.0).is_empty());
    }

    #[test]
    fn at_most_one_active_laser() {
        let registry = InteractionRegistry::new();
        registry.set_laser(Some(Position::new(1.0, 1.0)));
        registry.set_laser(Some(Position::new(2.0, 2.0)));
        assert_eq!(registry.active_laser().unwrap().position, Position::new(2.0, 2.0));
        registry.set_laser(None);
        assert!(registry.active_laser().is_none());
    }

    #[tokio::test]
    async fn subscriber_receives_events_in_publish_order() {
        let registry = InteractionRegistry::new();
        let mut rx = registry.subscribe();
        registry.place_need(NeedKind::Water, Position::new(0.0, 0.0));
        registry.place_yarn(Position::new(0.0, 0.0));

        matches!(rx.recv().await.unwrap(), InteractionEvent::NeedPlaced { .. });
        matches!(rx.recv().await.unwrap(), InteractionEvent::YarnPlaced { .. });
    }
}

//! Bounded ring buffers of recent history, consulted by the decision
//! engine for memory penalties and boundary aversion.
//!
//! # Invariants
//!
//! - **I-MEM-001**: `visited_positions.len() <= bounds.max_visited`.
//! - **I-MEM-002**: `previous_behaviors.len() <= bounds.max_previous_behaviors`.
//! - **I-MEM-003**: `0.0 <= boundary_hits <= 5.0`.

use std::collections::VecDeque;
use std::time::Instant;

use crate::behavior_type::BehaviorType;
use crate::geometry::Position;

/// `memory.maxVisited`/`memory.maxPreviousBehaviors` from the recognized
/// configuration options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemoryBounds {
    pub max_visited: usize,
    pub max_previous_behaviors: usize,
}

impl Default for MemoryBounds {
    fn default() -> Self {
        Self {
            max_visited: 10,
            max_previous_behaviors: 5,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Memory {
    pub visited_positions: VecDeque<Position>,
    pub previous_behaviors: VecDeque<BehaviorType>,
    pub boundary_hits: f32,
    pub last_interaction_time: Option<Instant>,
    pending_boundary_hits: u32,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            visited_positions: VecDeque::new(),
            previous_behaviors: VecDeque::new(),
            boundary_hits: 0.0,
            last_interaction_time: None,
            pending_boundary_hits: 0,
        }
    }
}

impl Memory {
    /// Increments the transient between-decisions counter. Consumed and
    /// reset by the next `record_decision` call.
    pub fn record_boundary_hit(&mut self) {
        self.pending_boundary_hits += 1;
    }

    /// `true` if at least one boundary hit has accumulated since the
    /// last decision, without consuming the counter.
    pub fn has_pending_boundary_hit(&self) -> bool {
        self.pending_boundary_hits > 0
    }

    pub fn record_decision(&mut self, position: Position, behavior: BehaviorType, bounds: &MemoryBounds) {
        let boundary_hit = self.pending_boundary_hits > 0;
        self.pending_boundary_hits = 0;

        self.visited_positions.push_back(position);
        while self.visited_positions.len() > bounds.max_visited {
            self.visited_positions.pop_front();
        }

        self.previous_behaviors.push_back(behavior);
        while self.previous_behaviors.len() > bounds.max_previous_behaviors {
            self.previous_behaviors.pop_front();
        }

        if boundary_hit {
            self.boundary_hits = (self.boundary_hits + 1.0).min(5.0);
        } else {
            self.boundary_hits = (self.boundary_hits - 0.1).max(0.0);
        }
    }

    pub fn note_interaction(&mut self, at: Instant) {
        self.last_interaction_time = Some(at);
    }

    /// Count of occurrences of `behavior` in `previous_behaviors`, used
    /// by the decision engine's memory-penalty rule.
    pub fn occurrences_of(&self, behavior: BehaviorType) -> usize {
        self.previous_behaviors.iter().filter(|&&b| b == behavior).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_positions_trims_to_bound() {
        let mut mem = Memory::default();
        let bounds = MemoryBounds { max_visited: 3, max_previous_behaviors: 5 };
        for i in 0..10 {
            mem.record_decision(Position::new(i as f64, 0.0), BehaviorType::Wandering, &bounds);
        }
        assert_eq!(mem.visited_positions.len(), 3);
        assert_eq!(mem.visited_positions.front().unwrap().x, 7.0);
    }

    #[test]
    fn previous_behaviors_trims_to_bound() {
        let mut mem = Memory::default();
        let bounds = MemoryBounds { max_visited: 10, max_previous_behaviors: 2 };
        mem.record_decision(Position::new(0.0, 0.0), BehaviorType::Wandering, &bounds);
        mem.record_decision(Position::new(0.0, 0.0), BehaviorType::Resting, &bounds);
        mem.record_decision(Position::new(0.0, 0.0), BehaviorType::Playing, &bounds);
        assert_eq!(mem.previous_behaviors.len(), 2);
        assert_eq!(mem.previous_behaviors.front().copied(), Some(BehaviorType::Resting));
    }

    #[test]
    fn boundary_hit_increments_and_caps_at_five() {
        let mut mem = Memory::default();
        let bounds = MemoryBounds::default();
        for _ in 0..10 {
            mem.record_boundary_hit();
            mem.record_decision(Position::new(0.0, 0.0), BehaviorType::Wandering, &bounds);
        }
        assert_eq!(mem.boundary_hits, 5.0);
    }

    #[test]
    fn no_hit_decays_by_one_tenth_and_floors_at_zero() {
        let mut mem = Memory::default();
        let bounds = MemoryBounds::default();
        mem.boundary_hits = 0.25;
        mem.record_decision(Position::new(0.0, 0.0), BehaviorType::Wandering, &bounds);
        assert!((mem.boundary_hits - 0.15).abs() < 1e-6);

        mem.boundary_hits = 0.0;
        mem.record_decision(Position::new(0.0, 0.0), BehaviorType::Wandering, &bounds);
        assert_eq!(mem.boundary_hits, 0.0);
    }

    #[test]
    fn pending_hit_is_consumed_and_reset_at_decision() {
        let mut mem = Memory::default();
        let bounds = MemoryBounds::default();
        mem.record_boundary_hit();
        assert!(mem.has_pending_boundary_hit());
        mem.record_decision(Position::new(0.0, 0.0), BehaviorType::Wandering, &bounds);
        assert!(!mem.has_pending_boundary_hit());
    }

    #[test]
    fn occurrences_of_counts_matches() {
        let mut mem = Memory::default();
        let bounds = MemoryBounds::default();
        mem.record_decision(Position::new(0.0, 0.0), BehaviorType::Playing, &bounds);
        mem.record_decision(Position::new(0.0, 0.0), BehaviorType::Playing, &bounds);
        mem.record_decision(Position::new(0.0, 0.0), BehaviorType::Resting, &bounds);
        assert_eq!(mem.occurrences_of(BehaviorType::Playing), 2);
        assert_eq!(mem.occurrences_of(BehaviorType::Resting), 1);
        assert_eq!(mem.occurrences_of(BehaviorType::Chasing), 0);
    }
}

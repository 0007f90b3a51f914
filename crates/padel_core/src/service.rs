//! Read → apply → write → publish around the pure engine.
//!
//! Points for the same match are applied one at a time: each operation
//! holds that match's lock from load to publish, so two controllers can
//! never both build on the same stale score.

use crate::engine;
use crate::error::{MatchError, Result};
use crate::models::{Match, SettingsOverrides, Team, TeamInfo};
use crate::realtime::{MatchHub, Subscription};
use crate::save::{MatchStore, SaveError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

pub struct MatchService<S: MatchStore> {
    store: S,
    hub: MatchHub,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: MatchStore> MatchService<S> {
    pub fn new(store: S, hub: MatchHub) -> Self {
        Self { store, hub, locks: Mutex::new(HashMap::new()) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn hub(&self) -> &MatchHub {
        &self.hub
    }

    pub fn create_match(
        &self,
        team_a: TeamInfo,
        team_b: TeamInfo,
        overrides: &SettingsOverrides,
        serving_team: Team,
    ) -> Result<Match> {
        let created = engine::create_match(team_a, team_b, overrides, serving_team);
        self.store.save(&created)?;
        info!(match_id = %created.id, "match created");
        Ok(created)
    }

    pub fn get_match(&self, id: &str) -> Result<Match> {
        self.store.load(id).map_err(|err| match err {
            SaveError::NotFound { id } => MatchError::NotFound(id),
            other => MatchError::Save(other),
        })
    }

    /// Score a point on the stored match. A decided match comes back
    /// unchanged and is neither saved nor published.
    pub fn score_point(&self, id: &str, team: Team) -> Result<Match> {
        self.apply(id, |current| {
            let next = engine::score_point(current, team);
            (next.point_history.len() != current.point_history.len()).then_some(next)
        })
    }

    /// Undo the last point on the stored match. With no points recorded
    /// the match comes back unchanged and is neither saved nor published.
    pub fn undo_last_point(&self, id: &str) -> Result<Match> {
        self.apply(id, |current| current.can_undo().then(|| engine::undo_last_point(current)))
    }

    pub fn subscribe<F>(&self, id: &str, on_change: F) -> Subscription
    where
        F: Fn(&Match) + Send + Sync + 'static,
    {
        self.hub.subscribe(id, on_change)
    }

    fn apply<F>(&self, id: &str, op: F) -> Result<Match>
    where
        F: FnOnce(&Match) -> Option<Match>,
    {
        let lock = self.lock_for(id);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.apply_locked(id, op)
        };
        self.release(id, lock);
        result
    }

    fn apply_locked<F>(&self, id: &str, op: F) -> Result<Match>
    where
        F: FnOnce(&Match) -> Option<Match>,
    {
        let current = self.get_match(id)?;
        let Some(next) = op(&current) else {
            debug!(match_id = %id, "nothing to apply");
            return Ok(current);
        };

        self.store.save(&next)?;
        let notified = self.hub.publish(&next);
        debug!(match_id = %id, points = next.points_played(), notified, "match updated");
        Ok(next)
    }

    fn lock_for(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(id.to_string()).or_default())
    }

    /// Drop the map's entry once no other caller holds or waits on it.
    fn release(&self, id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one held here
        if Arc::strong_count(&lock) == 2 {
            locks.remove(id);
        }
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchStatus, PadelPoint};
    use crate::save::MemoryMatchStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn service() -> MatchService<MemoryMatchStore> {
        MatchService::new(MemoryMatchStore::new(), MatchHub::new())
    }

    fn new_match(service: &MatchService<MemoryMatchStore>) -> Match {
        service
            .create_match(
                TeamInfo::new("Reds", "Juan", "Maria"),
                TeamInfo::new("Blues", "Pedro", "Ana"),
                &SettingsOverrides::default(),
                Team::A,
            )
            .unwrap()
    }

    #[test]
    fn test_score_and_undo_persist() {
        let service = service();
        let m = new_match(&service);

        service.score_point(&m.id, Team::A).unwrap();
        let stored = service.score_point(&m.id, Team::A).unwrap();
        assert_eq!(stored.score.current_game.points_a, PadelPoint::Thirty);
        assert_eq!(service.get_match(&m.id).unwrap(), stored);

        let undone = service.undo_last_point(&m.id).unwrap();
        assert_eq!(undone.score.current_game.points_a, PadelPoint::Fifteen);
        assert_eq!(service.get_match(&m.id).unwrap().points_played(), 1);
    }

    #[test]
    fn test_unknown_match() {
        let service = service();
        assert!(matches!(service.score_point("missing", Team::A), Err(MatchError::NotFound(_))));
    }

    #[test]
    fn test_updates_are_published() {
        let service = service();
        let m = new_match(&service);
        let deliveries = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&deliveries);
        let _sub = service.subscribe(&m.id, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        service.score_point(&m.id, Team::B).unwrap();
        service.undo_last_point(&m.id).unwrap();
        // Empty history: quiet, nothing published
        service.undo_last_point(&m.id).unwrap();

        assert_eq!(deliveries.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_completed_match_is_not_rewritten() {
        let service = service();
        let m = new_match(&service);
        for _ in 0..48 {
            service.score_point(&m.id, Team::A).unwrap();
        }
        let done = service.get_match(&m.id).unwrap();
        assert_eq!(done.status, MatchStatus::Completed);

        let again = service.score_point(&m.id, Team::B).unwrap();
        assert_eq!(again, done);
    }

    #[test]
    fn test_missing_ids_leave_no_locks_behind() {
        let service = service();
        for i in 0..1000 {
            let id = format!("missing{i}");
            assert!(service.score_point(&id, Team::A).is_err());
            assert!(service.undo_last_point(&id).is_err());
        }
        assert_eq!(service.tracked_locks(), 0);

        let m = new_match(&service);
        service.score_point(&m.id, Team::A).unwrap();
        service.undo_last_point(&m.id).unwrap();
        assert_eq!(service.tracked_locks(), 0);
    }

    #[test]
    fn test_concurrent_points_are_serialized() {
        let service = Arc::new(service());
        let m = new_match(&service);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = Arc::clone(&service);
                let id = m.id.clone();
                thread::spawn(move || {
                    let team = if i % 2 == 0 { Team::A } else { Team::B };
                    for _ in 0..5 {
                        service.score_point(&id, team).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // No point lost to a stale read
        assert_eq!(service.get_match(&m.id).unwrap().points_played(), 40);
        assert_eq!(service.tracked_locks(), 0);
    }
}

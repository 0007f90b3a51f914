//! In-process fan-out of match updates.
//!
//! Anyone holding a copy of a match (a scoreboard, a second remote)
//! subscribes by match id and receives every newer version published for
//! that id. A delivered match replaces the holder's local copy outright.

use crate::models::Match;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

type Listener = Arc<dyn Fn(&Match) + Send + Sync>;

/// Process-wide hub for callers that do not wire their own.
pub static GLOBAL_HUB: Lazy<MatchHub> = Lazy::new(MatchHub::new);

#[derive(Default)]
struct HubInner {
    next_token: AtomicU64,
    listeners: RwLock<HashMap<String, Vec<(u64, Listener)>>>,
}

impl HubInner {
    fn remove(&self, match_id: &str, token: u64) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let Some(entries) = listeners.get_mut(match_id) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(t, _)| *t != token);
        let removed = entries.len() != before;
        if entries.is_empty() {
            listeners.remove(match_id);
        }
        removed
    }
}

/// Cheap to clone; clones share subscribers.
#[derive(Clone, Default)]
pub struct MatchHub {
    inner: Arc<HubInner>,
}

impl fmt::Debug for MatchHub {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let listeners = self.inner.listeners.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("MatchHub").field("matches", &listeners.len()).finish()
    }
}

/// Handle returned by [`MatchHub::subscribe`].
#[derive(Debug, Clone)]
pub struct Subscription {
    match_id: String,
    token: u64,
    hub: Weak<HubInner>,
}

impl Subscription {
    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    /// Stop receiving updates. Returns false if already unsubscribed or
    /// the hub is gone.
    pub fn unsubscribe(self) -> bool {
        match self.hub.upgrade() {
            Some(inner) => inner.remove(&self.match_id, self.token),
            None => false,
        }
    }
}

impl MatchHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, match_id: &str, on_change: F) -> Subscription
    where
        F: Fn(&Match) + Send + Sync + 'static,
    {
        let token = self.inner.next_token.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(match_id.to_string())
            .or_default()
            .push((token, Arc::new(on_change)));

        log::debug!("Subscriber {} attached to match {}", token, match_id);
        Subscription { match_id: match_id.to_string(), token, hub: Arc::downgrade(&self.inner) }
    }

    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        self.inner.remove(&subscription.match_id, subscription.token)
    }

    /// Deliver `m` to every subscriber of `m.id`, in subscription order.
    /// Returns how many were notified.
    pub fn publish(&self, m: &Match) -> usize {
        // Snapshot the listeners so callbacks may (un)subscribe freely
        let targets: Vec<Listener> = {
            let listeners = self.inner.listeners.read().unwrap_or_else(PoisonError::into_inner);
            listeners
                .get(&m.id)
                .map(|entries| entries.iter().map(|(_, listener)| Arc::clone(listener)).collect())
                .unwrap_or_default()
        };

        for listener in &targets {
            listener(m);
        }

        log::trace!("Published match {} to {} subscribers", m.id, targets.len());
        targets.len()
    }

    pub fn subscriber_count(&self, match_id: &str) -> usize {
        self.inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(match_id)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{create_match, score_point};
    use crate::models::{Team, TeamInfo};
    use std::sync::Mutex;

    fn sample_match() -> Match {
        create_match(TeamInfo::new("A", "1", "2"), TeamInfo::new("B", "3", "4"), &Default::default(), Team::A)
    }

    #[test]
    fn test_publish_reaches_only_matching_id() {
        let hub = MatchHub::new();
        let m = sample_match();
        let other = sample_match();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = hub.subscribe(&m.id, move |update| sink.lock().unwrap().push(update.points_played()));

        assert_eq!(hub.publish(&other), 0);
        let next = score_point(&m, Team::A);
        assert_eq!(hub.publish(&next), 1);
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let hub = MatchHub::new();
        let m = sample_match();
        let count = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&count);
        let first = hub.subscribe(&m.id, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&count);
        let second = hub.subscribe(&m.id, move |_| {
            counter.fetch_add(10, Ordering::SeqCst);
        });
        assert_eq!(hub.subscriber_count(&m.id), 2);

        hub.publish(&m);
        assert!(first.unsubscribe());
        hub.publish(&m);
        assert!(hub.unsubscribe(&second));
        assert!(!hub.unsubscribe(&second));
        hub.publish(&m);

        assert_eq!(count.load(Ordering::SeqCst), 21);
        assert_eq!(hub.subscriber_count(&m.id), 0);
    }

    #[test]
    fn test_callback_may_unsubscribe_itself() {
        let hub = MatchHub::new();
        let m = sample_match();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let inner_slot = Arc::clone(&slot);
        let sub = hub.subscribe(&m.id, move |_| {
            if let Some(sub) = inner_slot.lock().unwrap().take() {
                sub.unsubscribe();
            }
        });
        *slot.lock().unwrap() = Some(sub);

        assert_eq!(hub.publish(&m), 1);
        assert_eq!(hub.publish(&m), 0);
    }

    #[test]
    fn test_subscription_outliving_hub() {
        let hub = MatchHub::new();
        let sub = hub.subscribe("abc", |_| {});
        drop(hub);
        assert!(!sub.unsubscribe());
    }
}

//! Multi-event manager.
//!
//! Holds every live [`GiftExchange`] behind its own mutex. The map itself
//! is only locked long enough to look an event up, so work on one event
//! never blocks another, and a shuffle holds its event's mutex for the
//! whole engine run.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use giftforge_config::EngineConfig;
use giftforge_core::{AssignmentSet, GiftForgeError, Result};
use tracing::info;

use crate::event_code::EventCode;
use crate::exchange::GiftExchange;

/// Shared handle to one event.
pub type SharedExchange = Arc<Mutex<GiftExchange>>;

/// Registry of events keyed by join code.
///
/// # Example
///
/// ```
/// use giftforge_config::EngineConfig;
/// use giftforge_core::NewParticipant;
/// use giftforge_engine::manager::ExchangeManager;
///
/// let manager = ExchangeManager::new();
/// let code = manager.create_event("Book club", 1500, EngineConfig::new());
///
/// manager
///     .with_event(&code, |exchange| {
///         for name in ["ann", "ben", "cas"] {
///             exchange.register(
///                 NewParticipant::new(name, format!("{}@example.com", name)).active(),
///             )?;
///         }
///         Ok(())
///     })
///     .unwrap();
///
/// let draft = manager.shuffle(&code).unwrap();
/// assert_eq!(draft.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct ExchangeManager {
    events: RwLock<HashMap<EventCode, SharedExchange>>,
}

impl ExchangeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an event under a fresh join code.
    pub fn create_event(
        &self,
        name: impl Into<String>,
        base_minimum: u64,
        config: EngineConfig,
    ) -> EventCode {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        let mut rng = rand::rng();
        let code = loop {
            let candidate = EventCode::generate(&mut rng);
            if !events.contains_key(&candidate) {
                break candidate;
            }
        };
        let exchange = GiftExchange::new(code.clone(), name, base_minimum, config);
        info!(event = "event_created", code = %code, name = exchange.name());
        events.insert(code.clone(), Arc::new(Mutex::new(exchange)));
        code
    }

    /// Adds an existing exchange under its own code.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the code is taken.
    pub fn insert(&self, exchange: GiftExchange) -> Result<EventCode> {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        let code = exchange.code().clone();
        if events.contains_key(&code) {
            return Err(GiftForgeError::InvalidState(format!(
                "event code {} is already in use",
                code
            )));
        }
        events.insert(code.clone(), Arc::new(Mutex::new(exchange)));
        Ok(code)
    }

    pub fn get(&self, code: &EventCode) -> Result<SharedExchange> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
            .ok_or_else(|| GiftForgeError::UnknownEvent(code.to_string()))
    }

    /// Runs `f` with exclusive access to one event.
    pub fn with_event<R>(
        &self,
        code: &EventCode,
        f: impl FnOnce(&mut GiftExchange) -> Result<R>,
    ) -> Result<R> {
        let handle = self.get(code)?;
        let mut exchange = lock(&handle);
        f(&mut *exchange)
    }

    /// Shuffles one event, returning a copy of the new draft.
    pub fn shuffle(&self, code: &EventCode) -> Result<AssignmentSet> {
        self.with_event(code, |exchange| exchange.shuffle().cloned())
    }

    pub fn remove_event(&self, code: &EventCode) -> Result<SharedExchange> {
        let removed = self
            .events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(code)
            .ok_or_else(|| GiftForgeError::UnknownEvent(code.to_string()))?;
        info!(event = "event_removed", code = %code);
        Ok(removed)
    }

    /// Codes of all events, sorted.
    pub fn event_codes(&self) -> Vec<EventCode> {
        let mut codes: Vec<EventCode> = self
            .events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        codes.sort();
        codes
    }

    pub fn len(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A panic inside one caller must not take the event down with it.
fn lock(handle: &SharedExchange) -> MutexGuard<'_, GiftExchange> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use giftforge_core::{NewParticipant, ParticipantId};

    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::validator::validate;

    fn populate(manager: &ExchangeManager, code: &EventCode, n: usize) -> Vec<ParticipantId> {
        manager
            .with_event(code, |exchange| {
                (0..n)
                    .map(|i| {
                        exchange.register(
                            NewParticipant::new(format!("P{}", i), format!("p{}@example.com", i))
                                .active(),
                        )
                    })
                    .collect()
            })
            .unwrap()
    }

    #[test]
    fn test_create_and_lookup() {
        let manager = ExchangeManager::new();
        let code = manager.create_event("Office", 2000, EngineConfig::new());

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.event_codes(), vec![code.clone()]);
        let handle = manager.get(&code).unwrap();
        assert_eq!(lock(&handle).name(), "Office");
    }

    #[test]
    fn test_unknown_event() {
        let manager = ExchangeManager::new();
        let code = EventCode::parse("NOPE").unwrap();
        assert!(matches!(
            manager.shuffle(&code),
            Err(GiftForgeError::UnknownEvent(_))
        ));
    }

    #[test]
    fn test_insert_rejects_taken_code() {
        let manager = ExchangeManager::new();
        let code = EventCode::parse("FIXED").unwrap();
        let first = GiftExchange::new(code.clone(), "One", 1000, EngineConfig::new());
        let second = GiftExchange::new(code.clone(), "Two", 1000, EngineConfig::new());

        assert_eq!(manager.insert(first).unwrap(), code);
        assert!(manager.insert(second).is_err());
    }

    #[test]
    fn test_remove_event() {
        let manager = ExchangeManager::new();
        let code = manager.create_event("Gone soon", 500, EngineConfig::new());
        manager.remove_event(&code).unwrap();
        assert!(manager.is_empty());
        assert!(manager.remove_event(&code).is_err());
    }

    #[test]
    fn test_events_are_isolated() {
        let manager = ExchangeManager::new();
        let a = manager.create_event("A", 1000, EngineConfig::new());
        let b = manager.create_event("B", 1000, EngineConfig::new());
        populate(&manager, &a, 4);
        populate(&manager, &b, 2);

        assert!(manager.shuffle(&a).is_ok());
        assert!(manager.shuffle(&b).is_err());
        let b_state = manager.with_event(&b, |e| Ok(e.state().as_str())).unwrap();
        assert_eq!(b_state, "EMPTY");
    }

    #[test]
    fn test_concurrent_shuffles_serialize_per_event() {
        let manager = ExchangeManager::new();
        let codes: Vec<EventCode> = (0..4)
            .map(|i| manager.create_event(format!("Event {}", i), 1000, EngineConfig::new()))
            .collect();
        for code in &codes {
            populate(&manager, code, 12);
        }

        thread::scope(|s| {
            for code in &codes {
                for _ in 0..4 {
                    let manager = &manager;
                    s.spawn(move || {
                        let draft = manager.shuffle(code).unwrap();
                        assert_eq!(draft.len(), 12);
                    });
                }
            }
        });

        for code in &codes {
            manager
                .with_event(code, |exchange| {
                    let active = exchange.registry().list_active();
                    let model = exchange.constraint_model()?;
                    let draft = exchange.state().assignments().cloned();
                    assert!(exchange.state().is_draft());
                    assert_eq!(validate(&draft.unwrap(), &active, &model), Ok(()));
                    Ok(())
                })
                .unwrap();
        }
    }

    #[test]
    fn test_commit_visible_through_manager() {
        let manager = ExchangeManager::new();
        let code = manager.create_event("Family", 2500, EngineConfig::new());
        populate(&manager, &code, 5);
        manager.shuffle(&code).unwrap();

        let mut notifier = RecordingNotifier::new();
        let sent = manager
            .with_event(&code, |exchange| exchange.send_notifications(&mut notifier))
            .unwrap();
        assert_eq!(sent, 5);
        assert!(matches!(
            manager.shuffle(&code),
            Err(GiftForgeError::AssignmentLocked(_))
        ));
    }
}

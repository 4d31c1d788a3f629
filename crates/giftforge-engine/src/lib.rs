//! GiftForge engine
//!
//! This crate provides everything that runs a gift exchange:
//! - Participant registry
//! - Backtracking assignment engine with termination conditions
//! - Result validator
//! - Exchange lifecycle (draft, commit, override)
//! - Multi-event manager with per-event locking
//! - Notification adapter boundary

pub mod engine;
pub mod event_code;
pub mod exchange;
pub mod manager;
pub mod notify;
pub mod partial;
pub mod registry;
pub mod scope;
pub mod statistics;
pub mod termination;
pub mod validator;

pub use engine::{AssignmentEngine, Solved, MIN_PARTICIPANTS};
pub use event_code::EventCode;
pub use exchange::{AssignmentState, ExchangeSummary, GiftExchange, TierShare};
pub use manager::{ExchangeManager, SharedExchange};
pub use notify::{AssignmentNotifier, LoggingNotifier, Notice, NotifyError, RecordingNotifier};
pub use partial::PartialAssignment;
pub use registry::ParticipantRegistry;
pub use scope::SearchScope;
pub use statistics::SearchStatistics;
pub use termination::{AttemptCountTermination, OrTermination, Termination, TimeTermination};
pub use validator::{is_valid, validate};

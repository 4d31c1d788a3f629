//! One gift exchange event and its assignment lifecycle.
//!
//! An exchange moves through three assignment states:
//!
//! ```text
//! Empty --shuffle--> Draft --send_notifications--> Committed
//!                      ^  \__ roster change __/       |
//!                      |                              |
//!                      +--shuffle_overriding_commit---+
//! ```
//!
//! Any roster, exclusion or tier change discards a draft. A committed
//! assignment is only replaced through the explicit override, which asks
//! the notifier to revoke what it sent.

use chrono::NaiveDate;
use giftforge_config::{EngineConfig, TierMode};
use giftforge_core::{
    AssignmentEdge, AssignmentSet, BudgetTier, ConstraintModel, ExclusionPair, ExclusionSet, GiftForgeError,
    NewParticipant, Participant, ParticipantId, ParticipationStatus, Result, TierId, TierRule,
    TierTable,
};
use tracing::{info, warn};

use crate::engine::AssignmentEngine;
use crate::event_code::EventCode;
use crate::notify::{AssignmentNotifier, Notice};
use crate::registry::ParticipantRegistry;
use crate::statistics::SearchStatistics;

/// Where an exchange's assignment stands.
#[derive(Debug, Clone, Default)]
pub enum AssignmentState {
    #[default]
    Empty,
    /// Drawn but not yet announced; may be discarded freely.
    Draft(AssignmentSet),
    /// Announced to the givers; immutable.
    Committed(AssignmentSet),
}

impl AssignmentState {
    pub fn assignments(&self) -> Option<&AssignmentSet> {
        match self {
            AssignmentState::Empty => None,
            AssignmentState::Draft(set) | AssignmentState::Committed(set) => Some(set),
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, AssignmentState::Draft(_))
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, AssignmentState::Committed(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentState::Empty => "EMPTY",
            AssignmentState::Draft(_) => "DRAFT",
            AssignmentState::Committed(_) => "COMMITTED",
        }
    }
}

/// Headline numbers for an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeSummary {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    /// Participants who submitted at least one wishlist item.
    pub wishlists_submitted: usize,
    pub exclusions: usize,
    pub tiers: usize,
    pub state: &'static str,
}

/// How many participants sit in one budget tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierShare {
    pub tier: TierId,
    pub name: String,
    pub minimum: u64,
    pub participants: usize,
}

/// A single gift exchange event.
///
/// # Example
///
/// ```
/// use giftforge_config::EngineConfig;
/// use giftforge_core::NewParticipant;
/// use giftforge_engine::event_code::EventCode;
/// use giftforge_engine::exchange::GiftExchange;
/// use giftforge_engine::notify::RecordingNotifier;
///
/// let code = EventCode::parse("OFFICE").unwrap();
/// let mut exchange = GiftExchange::new(code, "Office party", 2000, EngineConfig::new());
/// for name in ["ann", "ben", "cas", "dee"] {
///     exchange
///         .register(NewParticipant::new(name, format!("{}@example.com", name)).active())
///         .unwrap();
/// }
///
/// exchange.shuffle().unwrap();
/// let mut notifier = RecordingNotifier::new();
/// assert_eq!(exchange.send_notifications(&mut notifier).unwrap(), 4);
/// assert!(exchange.state().is_committed());
/// ```
#[derive(Debug, Clone)]
pub struct GiftExchange {
    code: EventCode,
    name: String,
    date: Option<NaiveDate>,
    description: Option<String>,
    tiers: TierTable,
    registry: ParticipantRegistry,
    exclusions: ExclusionSet,
    config: EngineConfig,
    state: AssignmentState,
    last_statistics: Option<SearchStatistics>,
}

impl GiftExchange {
    /// Creates an event whose base tier has `base_minimum`.
    pub fn new(
        code: EventCode,
        name: impl Into<String>,
        base_minimum: u64,
        config: EngineConfig,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            date: None,
            description: None,
            tiers: TierTable::new(base_minimum),
            registry: ParticipantRegistry::new(),
            exclusions: ExclusionSet::new(),
            config,
            state: AssignmentState::Empty,
            last_statistics: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn code(&self) -> &EventCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Whole days from `today` to the event date, zero once it has passed.
    ///
    /// `None` when the event has no date.
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        self.date
            .map(|date| date.signed_duration_since(today).num_days().max(0))
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &AssignmentState {
        &self.state
    }

    /// Statistics of the most recent successful shuffle.
    pub fn last_statistics(&self) -> Option<SearchStatistics> {
        self.last_statistics
    }

    /// Replaces the engine configuration. Discards a draft.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.discard_draft("config_changed");
    }

    // ---- Roster ----

    pub fn register(&mut self, request: NewParticipant) -> Result<ParticipantId> {
        if let Some(tier) = request.tier {
            self.ensure_tier(tier)?;
        }
        let id = self.registry.register(request)?;
        self.discard_draft("participant_registered");
        Ok(id)
    }

    /// Removes a participant and every exclusion naming them.
    ///
    /// # Errors
    ///
    /// `AssignmentLocked` if the committed assignment references them.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<Participant> {
        let removed = self.registry.remove(id)?;
        self.exclusions.forget(id);
        self.discard_draft("participant_removed");
        Ok(removed)
    }

    pub fn set_status(&mut self, id: ParticipantId, status: ParticipationStatus) -> Result<()> {
        self.registry.set_status(id, status)?;
        self.discard_draft("status_changed");
        Ok(())
    }

    /// Replaces a wishlist; discards a draft only when this activates the
    /// participant.
    pub fn update_wishlist(&mut self, id: ParticipantId, wishlist: Vec<String>) -> Result<()> {
        let was_active = self
            .registry
            .get(id)
            .ok_or(GiftForgeError::UnknownParticipant(id))?
            .is_active();
        self.registry.update_wishlist(id, wishlist)?;
        if !was_active && self.registry.get(id).is_some_and(Participant::is_active) {
            self.discard_draft("participant_activated");
        }
        Ok(())
    }

    pub fn set_tier(&mut self, id: ParticipantId, tier: Option<TierId>) -> Result<()> {
        if let Some(tier) = tier {
            self.ensure_tier(tier)?;
        }
        self.registry.set_tier(id, tier)?;
        self.discard_draft("tier_assigned");
        Ok(())
    }

    // ---- Exclusions ----

    /// Forbids `a` and `b` from drawing each other.
    ///
    /// Returns false if the pair was already excluded.
    pub fn add_exclusion(&mut self, a: ParticipantId, b: ParticipantId) -> Result<bool> {
        self.ensure_participant(a)?;
        self.ensure_participant(b)?;
        let pair = ExclusionPair::new(a, b).ok_or_else(|| {
            GiftForgeError::InvalidState(format!("{} cannot be excluded from themselves", a))
        })?;
        let inserted = self.exclusions.insert(pair);
        if inserted {
            self.discard_draft("exclusion_added");
        }
        Ok(inserted)
    }

    pub fn remove_exclusion(&mut self, a: ParticipantId, b: ParticipantId) -> bool {
        let removed = self.exclusions.remove(a, b);
        if removed {
            self.discard_draft("exclusion_removed");
        }
        removed
    }

    // ---- Tiers ----

    pub fn add_tier(&mut self, name: impl Into<String>, minimum: u64) -> Result<TierId> {
        let id = self.tiers.add(name, minimum)?;
        self.discard_draft("tier_added");
        Ok(id)
    }

    pub fn update_tier(&mut self, id: TierId, name: impl Into<String>, minimum: u64) -> Result<()> {
        self.tiers.update(id, name, minimum)?;
        self.discard_draft("tier_updated");
        Ok(())
    }

    /// Removes a tier nobody is assigned to.
    pub fn remove_tier(&mut self, id: TierId) -> Result<BudgetTier> {
        if self.registry.uses_tier(id) {
            return Err(GiftForgeError::InvalidState(format!(
                "budget tier {} is still assigned to participants",
                id
            )));
        }
        let removed = self.tiers.remove(id)?;
        self.discard_draft("tier_removed");
        Ok(removed)
    }

    // ---- Assignment ----

    /// Builds the constraint model for the current active roster.
    pub fn constraint_model(&self) -> Result<ConstraintModel> {
        let tier_rule = match self.config.tier_mode {
            TierMode::Off => TierRule::Off,
            TierMode::MinFloor => TierRule::min_floor(&self.registry.list_active(), &self.tiers)?,
        };
        Ok(ConstraintModel::new(self.exclusions.clone())
            .with_allow_reciprocal(self.config.allow_reciprocal)
            .with_tier_rule(tier_rule))
    }

    /// Draws a new draft assignment for the active participants.
    ///
    /// A failed draw leaves the current state untouched.
    ///
    /// # Errors
    ///
    /// - `AssignmentLocked` once notifications were sent
    /// - the engine's errors otherwise
    pub fn shuffle(&mut self) -> Result<&AssignmentSet> {
        if self.state.is_committed() {
            return Err(GiftForgeError::AssignmentLocked(format!(
                "notifications for event {} were already sent",
                self.code
            )));
        }
        let assignments = self.draw()?;
        self.state = AssignmentState::Draft(assignments);
        self.draft()
    }

    /// Replaces a committed assignment with a fresh draft.
    ///
    /// The new draw happens first; only when it succeeds are the prior
    /// notifications revoked and the participants unlocked. Returns the
    /// invalidated assignment, or `None` when nothing was committed.
    pub fn shuffle_overriding_commit(
        &mut self,
        notifier: &mut dyn AssignmentNotifier,
    ) -> Result<Option<AssignmentSet>> {
        let previous = match &self.state {
            AssignmentState::Committed(set) => set.clone(),
            _ => {
                self.shuffle()?;
                return Ok(None);
            }
        };

        let fresh = self.draw()?;
        notifier.revoke(&self.code, &previous)?;
        self.registry.unlock_all();
        self.state = AssignmentState::Draft(fresh);
        warn!(
            event = "commit_overridden",
            code = %self.code,
            revoked = previous.len(),
        );
        Ok(Some(previous))
    }

    /// Notifies every giver of the draft, then commits it.
    ///
    /// If a delivery fails, the notices delivered so far are revoked and the
    /// draft stays in place.
    ///
    /// # Errors
    ///
    /// - `InvalidState` without a draft
    /// - `Notification` if the notifier fails
    pub fn send_notifications(&mut self, notifier: &mut dyn AssignmentNotifier) -> Result<usize> {
        let draft = match &self.state {
            AssignmentState::Draft(set) => set.clone(),
            AssignmentState::Committed(_) => {
                return Err(GiftForgeError::InvalidState(
                    "notifications were already sent".to_string(),
                ))
            }
            AssignmentState::Empty => {
                return Err(GiftForgeError::InvalidState(
                    "shuffle before sending notifications".to_string(),
                ))
            }
        };

        let notices = draft
            .iter()
            .map(|edge| self.notice(edge.giver, edge.receiver))
            .collect::<Result<Vec<_>>>()?;

        for (sent, notice) in notices.iter().enumerate() {
            if let Err(err) = notifier.notify(notice) {
                warn!(event = "notify_failed", code = %self.code, error = %err);
                let delivered: AssignmentSet = notices[..sent]
                    .iter()
                    .map(|n| AssignmentEdge::new(n.giver, n.receiver))
                    .collect();
                if !delivered.is_empty() {
                    if let Err(revoke_err) = notifier.revoke(&self.code, &delivered) {
                        warn!(event = "revoke_failed", code = %self.code, error = %revoke_err);
                    }
                }
                return Err(err.into());
            }
        }

        self.registry.lock(draft.participants());
        let count = notices.len();
        self.state = AssignmentState::Committed(draft);
        info!(event = "assignment_committed", code = %self.code, notices = count);
        Ok(count)
    }

    /// The notice `giver` received for the committed assignment.
    pub fn reveal(&self, giver: ParticipantId) -> Result<Notice> {
        let AssignmentState::Committed(set) = &self.state else {
            return Err(GiftForgeError::InvalidState(
                "assignments have not been sent yet".to_string(),
            ));
        };
        let receiver = set
            .iter()
            .find(|edge| edge.giver == giver)
            .map(|edge| edge.receiver)
            .ok_or(GiftForgeError::UnknownParticipant(giver))?;
        self.notice(giver, receiver)
    }

    pub fn summary(&self) -> ExchangeSummary {
        let total = self.registry.len();
        let active = self.registry.iter().filter(|p| p.is_active()).count();
        ExchangeSummary {
            total,
            active,
            pending: total - active,
            wishlists_submitted: self
                .registry
                .iter()
                .filter(|p| !p.wishlist.is_empty())
                .count(),
            exclusions: self.exclusions.len(),
            tiers: self.tiers.len(),
            state: self.state.as_str(),
        }
    }

    /// Participant count per budget tier, ordered by minimum.
    ///
    /// Participants without a tier count towards the base tier.
    pub fn tier_distribution(&self) -> Vec<TierShare> {
        self.tiers
            .sorted()
            .into_iter()
            .map(|tier| TierShare {
                tier: tier.id,
                name: tier.name.clone(),
                minimum: tier.minimum,
                participants: self
                    .registry
                    .iter()
                    .filter(|p| p.tier.unwrap_or(TierId::BASE) == tier.id)
                    .count(),
            })
            .collect()
    }

    fn draw(&mut self) -> Result<AssignmentSet> {
        let active = self.registry.list_active();
        let model = self.constraint_model()?;
        let solved = AssignmentEngine::new(self.config.clone()).solve(&active, &model)?;
        info!(
            event = "draft_created",
            code = %self.code,
            participants = solved.assignments.len(),
            statistics = %solved.statistics,
        );
        self.last_statistics = Some(solved.statistics);
        Ok(solved.assignments)
    }

    fn draft(&self) -> Result<&AssignmentSet> {
        match &self.state {
            AssignmentState::Draft(set) => Ok(set),
            _ => Err(GiftForgeError::InvalidState("no draft assignment".to_string())),
        }
    }

    fn notice(&self, giver: ParticipantId, receiver: ParticipantId) -> Result<Notice> {
        let giver = self
            .registry
            .get(giver)
            .ok_or(GiftForgeError::UnknownParticipant(giver))?;
        let receiver = self
            .registry
            .get(receiver)
            .ok_or(GiftForgeError::UnknownParticipant(receiver))?;
        let tier = self.tiers.resolve(receiver.tier)?;
        Ok(Notice {
            event: self.code.clone(),
            giver: giver.id,
            giver_name: giver.name.clone(),
            giver_contact: giver.contact.clone(),
            receiver: receiver.id,
            receiver_name: receiver.name.clone(),
            receiver_wishlist: receiver.wishlist.clone(),
            receiver_tier: tier.name.clone(),
            receiver_minimum: tier.minimum,
        })
    }

    fn discard_draft(&mut self, cause: &'static str) {
        if self.state.is_draft() {
            self.state = AssignmentState::Empty;
            info!(event = "draft_discarded", code = %self.code, cause = cause);
        }
    }

    fn ensure_participant(&self, id: ParticipantId) -> Result<()> {
        if self.registry.contains(id) {
            Ok(())
        } else {
            Err(GiftForgeError::UnknownParticipant(id))
        }
    }

    fn ensure_tier(&self, id: TierId) -> Result<()> {
        if self.tiers.contains(id) {
            Ok(())
        } else {
            Err(GiftForgeError::UnknownTier(id))
        }
    }
}

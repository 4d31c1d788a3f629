//! Notification boundary.
//!
//! The engine never talks to mail servers or chat services itself. Once a
//! draft is accepted, the exchange hands one [`Notice`] per giver to an
//! [`AssignmentNotifier`]; overriding a committed assignment asks the same
//! notifier to revoke what it sent.

use std::fmt::Debug;

use giftforge_core::{AssignmentSet, GiftForgeError, ParticipantId};
use thiserror::Error;
use tracing::info;

use crate::event_code::EventCode;

/// What a giver is told about their draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub event: EventCode,
    pub giver: ParticipantId,
    pub giver_name: String,
    /// Where the notice should be delivered.
    pub giver_contact: String,
    pub receiver: ParticipantId,
    pub receiver_name: String,
    pub receiver_wishlist: Vec<String>,
    pub receiver_tier: String,
    /// Minimum spend of the receiver's tier, in minor units.
    pub receiver_minimum: u64,
}

/// Failure reported by a notifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("delivery to {contact} failed: {reason}")]
    Delivery { contact: String, reason: String },

    #[error("revoking notices for event {event} failed: {reason}")]
    Revocation { event: String, reason: String },
}

impl From<NotifyError> for GiftForgeError {
    fn from(err: NotifyError) -> Self {
        GiftForgeError::Notification(err.to_string())
    }
}

/// Delivers assignment notices to givers.
pub trait AssignmentNotifier: Send + Debug {
    /// Delivers one notice.
    fn notify(&mut self, notice: &Notice) -> Result<(), NotifyError>;

    /// Withdraws every notice previously sent for `assignments`.
    fn revoke(&mut self, event: &EventCode, assignments: &AssignmentSet)
        -> Result<(), NotifyError>;
}

/// Writes notices to the `tracing` log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl AssignmentNotifier for LoggingNotifier {
    fn notify(&mut self, notice: &Notice) -> Result<(), NotifyError> {
        info!(
            event = "notice_sent",
            code = %notice.event,
            giver = %notice.giver,
            contact = %notice.giver_contact,
            receiver = %notice.receiver,
            tier = %notice.receiver_tier,
        );
        Ok(())
    }

    fn revoke(
        &mut self,
        event: &EventCode,
        assignments: &AssignmentSet,
    ) -> Result<(), NotifyError> {
        info!(
            event = "notices_revoked",
            code = %event,
            count = assignments.len(),
        );
        Ok(())
    }
}

/// Keeps notices in memory.
///
/// # Example
///
/// ```
/// use giftforge_core::ParticipantId;
/// use giftforge_engine::event_code::EventCode;
/// use giftforge_engine::notify::{AssignmentNotifier, Notice, RecordingNotifier};
///
/// let notice = Notice {
///     event: EventCode::parse("XMAS").unwrap(),
///     giver: ParticipantId::new(0),
///     giver_name: "Ann".into(),
///     giver_contact: "ann@example.com".into(),
///     receiver: ParticipantId::new(1),
///     receiver_name: "Ben".into(),
///     receiver_wishlist: vec!["Socks".into()],
///     receiver_tier: "Standard".into(),
///     receiver_minimum: 2000,
/// };
///
/// let mut notifier = RecordingNotifier::new();
/// notifier.notify(&notice).unwrap();
/// assert_eq!(notifier.sent(), &[notice]);
///
/// notifier.fail_for("ann@example.com");
/// let again = notifier.sent()[0].clone();
/// assert!(notifier.notify(&again).is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    sent: Vec<Notice>,
    revoked: Vec<(EventCode, AssignmentSet)>,
    failing_contacts: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later delivery to `contact` fail.
    pub fn fail_for(&mut self, contact: impl Into<String>) {
        self.failing_contacts.push(contact.into());
    }

    pub fn sent(&self) -> &[Notice] {
        &self.sent
    }

    pub fn revoked(&self) -> &[(EventCode, AssignmentSet)] {
        &self.revoked
    }

    /// Notices delivered to `giver`, oldest first.
    pub fn sent_to(&self, giver: ParticipantId) -> Vec<&Notice> {
        self.sent.iter().filter(|n| n.giver == giver).collect()
    }
}

impl AssignmentNotifier for RecordingNotifier {
    fn notify(&mut self, notice: &Notice) -> Result<(), NotifyError> {
        if self.failing_contacts.contains(&notice.giver_contact) {
            return Err(NotifyError::Delivery {
                contact: notice.giver_contact.clone(),
                reason: "mailbox unavailable".to_string(),
            });
        }
        self.sent.push(notice.clone());
        Ok(())
    }

    fn revoke(
        &mut self,
        event: &EventCode,
        assignments: &AssignmentSet,
    ) -> Result<(), NotifyError> {
        self.revoked.push((event.clone(), assignments.clone()));
        Ok(())
    }
}

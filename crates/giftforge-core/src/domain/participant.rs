//! Participant records.

use std::fmt;

use super::tier::TierId;
use crate::error::{GiftForgeError, Result};

/// Stable, opaque participant identity.
///
/// Allocated by the registry in registration order, so ordering by id is
/// ordering by registration.
///
/// # Example
///
/// ```
/// use giftforge_core::ParticipantId;
///
/// let id = ParticipantId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "p7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantId(u64);

impl ParticipantId {
    #[inline]
    pub const fn new(value: u64) -> Self {
        ParticipantId(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Whether a participant takes part in the next shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParticipationStatus {
    /// Invited or added by an organiser, not yet signed up.
    #[default]
    Pending,
    /// Signed up; included in assignment runs.
    Active,
}

/// A registered gift-exchange participant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Contact address, unique per event.
    pub contact: String,
    pub wishlist: Vec<String>,
    /// Budget tier; `None` resolves to the event's base tier.
    pub tier: Option<TierId>,
    pub status: ParticipationStatus,
    /// Work-location flag.
    pub on_site: bool,
    /// Explicit minimum the participant commits to spend as a giver.
    pub contribution_floor: Option<u64>,
}

impl Participant {
    /// Builds a participant record from a validated registration request.
    pub fn from_request(id: ParticipantId, request: NewParticipant) -> Self {
        Self {
            id,
            name: request.name.trim().to_string(),
            contact: request.contact.trim().to_string(),
            wishlist: request.wishlist,
            tier: request.tier,
            status: request.status,
            on_site: request.on_site,
            contribution_floor: request.contribution_floor,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == ParticipationStatus::Active
    }

    /// Returns the contact address in the form used for identity comparison.
    pub fn contact_key(&self) -> String {
        normalize_contact(&self.contact)
    }
}

/// Normalizes a contact address for duplicate detection.
///
/// Addresses compare trimmed and ASCII-case-insensitively.
pub fn normalize_contact(contact: &str) -> String {
    contact.trim().to_ascii_lowercase()
}

/// Registration request for a new participant.
///
/// # Example
///
/// ```
/// use giftforge_core::{NewParticipant, ParticipationStatus};
///
/// let request = NewParticipant::new("Alice", "alice@example.com")
///     .with_wishlist(["Book", "Headphones"])
///     .active();
///
/// assert_eq!(request.status, ParticipationStatus::Active);
/// assert_eq!(request.wishlist.len(), 2);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewParticipant {
    pub name: String,
    pub contact: String,
    pub wishlist: Vec<String>,
    pub tier: Option<TierId>,
    pub status: ParticipationStatus,
    pub on_site: bool,
    pub contribution_floor: Option<u64>,
}

impl NewParticipant {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            wishlist: Vec::new(),
            tier: None,
            status: ParticipationStatus::Pending,
            on_site: false,
            contribution_floor: None,
        }
    }

    pub fn with_wishlist<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.wishlist = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tier(mut self, tier: TierId) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_contribution_floor(mut self, floor: u64) -> Self {
        self.contribution_floor = Some(floor);
        self
    }

    pub fn on_site(mut self, on_site: bool) -> Self {
        self.on_site = on_site;
        self
    }

    /// Marks the participant as signed up.
    pub fn active(mut self) -> Self {
        self.status = ParticipationStatus::Active;
        self
    }

    /// Presence checks on name and contact.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParticipant` if either field is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GiftForgeError::InvalidParticipant(
                "name must not be empty".to_string(),
            ));
        }
        if self.contact.trim().is_empty() {
            return Err(GiftForgeError::InvalidParticipant(
                "contact address must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

//! Budget tiers.
//!
//! Every event owns a [`TierTable`] that always contains a base tier.
//! Minimums are unique within a table.

use std::fmt;

use crate::error::{GiftForgeError, Result};

/// Step used when suggesting the minimum for a newly added tier.
const SUGGESTED_TIER_STEP: u64 = 500;

/// Budget tier identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierId(u64);

impl TierId {
    /// The base tier every event starts with.
    pub const BASE: TierId = TierId(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        TierId(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A named minimum-spend category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BudgetTier {
    pub id: TierId,
    pub name: String,
    /// Minimum spend in currency minor units.
    pub minimum: u64,
}

/// Per-event tier list.
///
/// # Example
///
/// ```
/// use giftforge_core::{TierId, TierTable};
///
/// let mut tiers = TierTable::new(500);
/// let premium = tiers.add("Premium", 1500).unwrap();
///
/// assert_eq!(tiers.resolve(None).unwrap().minimum, 500);
/// assert_eq!(tiers.resolve(Some(premium)).unwrap().name, "Premium");
/// assert!(tiers.add("Also 1500", 1500).is_err());
/// assert_eq!(tiers.next_suggested_minimum(), 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TierTableData")
)]
pub struct TierTable {
    tiers: Vec<BudgetTier>,
    next_id: u64,
}

impl TierTable {
    /// Creates a table holding only the base tier.
    pub fn new(base_minimum: u64) -> Self {
        Self {
            tiers: vec![BudgetTier {
                id: TierId::BASE,
                name: "Standard".to_string(),
                minimum: base_minimum,
            }],
            next_id: 1,
        }
    }

    /// Adds a tier.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTierMinimum` if another tier already uses `minimum`.
    pub fn add(&mut self, name: impl Into<String>, minimum: u64) -> Result<TierId> {
        self.ensure_minimum_free(minimum, None)?;
        let id = TierId(self.next_id);
        self.next_id += 1;
        self.tiers.push(BudgetTier {
            id,
            name: name.into(),
            minimum,
        });
        Ok(id)
    }

    /// Renames a tier and changes its minimum.
    pub fn update(&mut self, id: TierId, name: impl Into<String>, minimum: u64) -> Result<()> {
        self.ensure_minimum_free(minimum, Some(id))?;
        let tier = self
            .tiers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(GiftForgeError::UnknownTier(id))?;
        tier.name = name.into();
        tier.minimum = minimum;
        Ok(())
    }

    /// Removes a non-base tier.
    pub fn remove(&mut self, id: TierId) -> Result<BudgetTier> {
        if id == TierId::BASE {
            return Err(GiftForgeError::InvalidState(
                "the base budget tier cannot be removed".to_string(),
            ));
        }
        let index = self
            .tiers
            .iter()
            .position(|t| t.id == id)
            .ok_or(GiftForgeError::UnknownTier(id))?;
        Ok(self.tiers.remove(index))
    }

    pub fn get(&self, id: TierId) -> Option<&BudgetTier> {
        self.tiers.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TierId) -> bool {
        self.get(id).is_some()
    }

    /// Resolves a participant's tier reference, `None` meaning the base tier.
    pub fn resolve(&self, id: Option<TierId>) -> Result<&BudgetTier> {
        let id = id.unwrap_or(TierId::BASE);
        self.get(id).ok_or(GiftForgeError::UnknownTier(id))
    }

    pub fn base(&self) -> &BudgetTier {
        // Slot 0 holds the base tier: `new` puts it there, `remove` refuses
        // to drop it and deserialization rejects tables without it.
        &self.tiers[0]
    }

    /// Tiers ordered by minimum.
    pub fn sorted(&self) -> Vec<&BudgetTier> {
        let mut tiers: Vec<&BudgetTier> = self.tiers.iter().collect();
        tiers.sort_by_key(|t| t.minimum);
        tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Minimum offered when an organiser adds another tier.
    pub fn next_suggested_minimum(&self) -> u64 {
        self.tiers
            .iter()
            .map(|t| t.minimum)
            .max()
            .unwrap_or(0)
            .saturating_add(SUGGESTED_TIER_STEP)
    }

    fn ensure_minimum_free(&self, minimum: u64, except: Option<TierId>) -> Result<()> {
        let taken = self
            .tiers
            .iter()
            .any(|t| t.minimum == minimum && Some(t.id) != except);
        if taken {
            Err(GiftForgeError::DuplicateTierMinimum(minimum))
        } else {
            Ok(())
        }
    }
}

/// Unchecked wire form of a [`TierTable`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TierTableData {
    tiers: Vec<BudgetTier>,
    next_id: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<TierTableData> for TierTable {
    type Error = GiftForgeError;

    fn try_from(data: TierTableData) -> Result<Self> {
        match data.tiers.first() {
            Some(base) if base.id == TierId::BASE => {}
            _ => {
                return Err(GiftForgeError::InvalidState(
                    "budget tier table must start with the base tier".to_string(),
                ))
            }
        }
        let mut table = TierTable {
            tiers: Vec::with_capacity(data.tiers.len()),
            next_id: data.next_id,
        };
        for tier in data.tiers {
            table.ensure_minimum_free(tier.minimum, None)?;
            if table.contains(tier.id) || (tier.id != TierId::BASE && tier.id.0 >= data.next_id) {
                return Err(GiftForgeError::InvalidState(format!(
                    "budget tier id {} is duplicated or out of range",
                    tier.id
                )));
            }
            table.tiers.push(tier);
        }
        Ok(table)
    }
}

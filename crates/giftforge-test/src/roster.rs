//! Participant roster fixtures.
//!
//! # Example
//!
//! ```
//! use giftforge_test::roster::{ids, named_roster};
//!
//! let roster = named_roster(&["A", "B", "C"]);
//! assert_eq!(roster.len(), 3);
//! assert!(roster.iter().all(|p| p.is_active()));
//! assert_eq!(ids(&roster)[2].value(), 2);
//! ```

use giftforge_core::{NewParticipant, Participant, ParticipantId};

/// Active participants with ids `0..names.len()` and `<name>@example.com`
/// contacts.
pub fn named_roster(names: &[&str]) -> Vec<Participant> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Participant::from_request(
                ParticipantId::new(i as u64),
                NewParticipant::new(*name, format!("{}@example.com", name.to_lowercase()))
                    .with_wishlist([format!("gift for {}", name)])
                    .active(),
            )
        })
        .collect()
}

/// Active roster of `n` participants named `P0`, `P1`, ...
pub fn roster(n: usize) -> Vec<Participant> {
    let names: Vec<String> = (0..n).map(|i| format!("P{}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    named_roster(&refs)
}

/// Ids of `participants`, in order.
pub fn ids(participants: &[Participant]) -> Vec<ParticipantId> {
    participants.iter().map(|p| p.id).collect()
}

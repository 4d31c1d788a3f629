//! Tests for domain types.

use super::*;
use crate::error::GiftForgeError;

// ============================================================================
// Participant Tests
// ============================================================================

mod participant {
    use super::*;

    #[test]
    fn test_from_request_trims_fields() {
        let request = NewParticipant::new("  Alice ", " alice@example.com  ").active();
        let participant = Participant::from_request(ParticipantId::new(1), request);

        assert_eq!(participant.name, "Alice");
        assert_eq!(participant.contact, "alice@example.com");
        assert!(participant.is_active());
    }

    #[test]
    fn test_new_participant_defaults_to_pending() {
        let request = NewParticipant::new("Carol", "carol@example.com");
        assert_eq!(request.status, ParticipationStatus::Pending);
        assert!(request.wishlist.is_empty());
        assert_eq!(request.tier, None);
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = NewParticipant::new("   ", "x@example.com")
            .validate()
            .unwrap_err();
        assert!(matches!(err, GiftForgeError::InvalidParticipant(_)));
    }

    #[test]
    fn test_blank_contact_rejected() {
        let err = NewParticipant::new("Bob", "").validate().unwrap_err();
        assert!(matches!(err, GiftForgeError::InvalidParticipant(_)));
    }

    #[test]
    fn test_contact_key_is_case_insensitive() {
        assert_eq!(
            normalize_contact(" Alice@Example.COM "),
            normalize_contact("alice@example.com")
        );
    }

    #[test]
    fn test_participant_id_ordering() {
        assert!(ParticipantId::new(1) < ParticipantId::new(2));
        assert_eq!(ParticipantId::new(3).to_string(), "p3");
    }
}

// ============================================================================
// TierTable Tests
// ============================================================================

mod tier_table {
    use super::*;

    #[test]
    fn test_base_tier_present() {
        let tiers = TierTable::new(500);
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers.base().id, TierId::BASE);
        assert_eq!(tiers.base().minimum, 500);
    }

    #[test]
    fn test_duplicate_minimum_rejected() {
        let mut tiers = TierTable::new(500);
        tiers.add("Premium", 1500).unwrap();

        let err = tiers.add("Premium 2", 1500).unwrap_err();
        assert!(matches!(err, GiftForgeError::DuplicateTierMinimum(1500)));

        let err = tiers.add("Shadow base", 500).unwrap_err();
        assert!(matches!(err, GiftForgeError::DuplicateTierMinimum(500)));
    }

    #[test]
    fn test_update_keeps_own_minimum() {
        let mut tiers = TierTable::new(500);
        let deluxe = tiers.add("Deluxe", 2500).unwrap();

        tiers.update(deluxe, "Deluxe+", 2500).unwrap();
        assert_eq!(tiers.get(deluxe).unwrap().name, "Deluxe+");

        assert!(tiers.update(deluxe, "Clash", 500).is_err());
    }

    #[test]
    fn test_base_tier_cannot_be_removed() {
        let mut tiers = TierTable::new(500);
        assert!(tiers.remove(TierId::BASE).is_err());
        assert_eq!(tiers.len(), 1);
    }

    #[test]
    fn test_remove_unknown_tier() {
        let mut tiers = TierTable::new(500);
        let err = tiers.remove(TierId::new(42)).unwrap_err();
        assert!(matches!(err, GiftForgeError::UnknownTier(_)));
    }

    #[test]
    fn test_resolve_none_to_base() {
        let mut tiers = TierTable::new(500);
        let premium = tiers.add("Premium", 1500).unwrap();

        assert_eq!(tiers.resolve(None).unwrap().id, TierId::BASE);
        assert_eq!(tiers.resolve(Some(premium)).unwrap().minimum, 1500);
        assert!(tiers.resolve(Some(TierId::new(9))).is_err());
    }

    #[test]
    fn test_sorted_by_minimum() {
        let mut tiers = TierTable::new(500);
        tiers.add("Deluxe", 2500).unwrap();
        tiers.add("Premium", 1500).unwrap();

        let minimums: Vec<u64> = tiers.sorted().iter().map(|t| t.minimum).collect();
        assert_eq!(minimums, vec![500, 1500, 2500]);
    }

    #[test]
    fn test_next_suggested_minimum() {
        let mut tiers = TierTable::new(500);
        assert_eq!(tiers.next_suggested_minimum(), 1000);
        tiers.add("Deluxe", 2500).unwrap();
        assert_eq!(tiers.next_suggested_minimum(), 3000);
    }
}

#[cfg(feature = "serde")]
mod tier_table_serde {
    use super::*;

    #[test]
    fn test_deserialize_valid_table() {
        let tiers: TierTable = toml::from_str(
            r#"
            next_id = 2

            [[tiers]]
            id = 0
            name = "Standard"
            minimum = 500

            [[tiers]]
            id = 1
            name = "Premium"
            minimum = 1500
            "#,
        )
        .unwrap();
        assert_eq!(tiers.base().minimum, 500);
        assert_eq!(tiers.len(), 2);
    }

    #[test]
    fn test_deserialize_rejects_missing_base() {
        let result: Result<TierTable, _> = toml::from_str(
            r#"
            next_id = 2

            [[tiers]]
            id = 1
            name = "Premium"
            minimum = 1500
            "#,
        );
        assert!(result.is_err());

        let empty: Result<TierTable, _> = toml::from_str("next_id = 1\ntiers = []\n");
        assert!(empty.is_err());
    }

    #[test]
    fn test_deserialize_rejects_duplicate_minimum() {
        let result: Result<TierTable, _> = toml::from_str(
            r#"
            next_id = 2

            [[tiers]]
            id = 0
            name = "Standard"
            minimum = 500

            [[tiers]]
            id = 1
            name = "Also 500"
            minimum = 500
            "#,
        );
        assert!(result.is_err());
    }
}

use serde::{Deserialize, Serialize};

/// All timestamps are UTC, assigned by the store at append time.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Opaque store-assigned record key.
///
/// Minted from a per-store monotonic sequence and zero-padded so that
/// lexicographic order equals insertion order. This makes the id usable
/// both as an ordering tiebreaker and as the "new record" detector in
/// the live feed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Mint an id from a store sequence number.
    pub fn from_sequence(seq: u64) -> Self {
        Self(format!("{seq:016x}"))
    }

    /// Parse an id received over the wire (e.g. a path parameter).
    pub fn parse(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_ids_sort_in_insertion_order() {
        let ids: Vec<EventId> = [1u64, 9, 10, 255, 4096]
            .iter()
            .map(|&n| EventId::from_sequence(n))
            .collect();

        let mut sorted = ids.clone();
        sorted.sort();

        assert_eq!(ids, sorted);
    }

    #[test]
    fn id_round_trips_through_display_and_parse() {
        let id = EventId::from_sequence(42);
        assert_eq!(EventId::parse(id.to_string()), id);
    }
}

//! Record id generation

use uuid::Uuid;

/// Generate a new record id
///
/// UUIDv7: a 48-bit millisecond timestamp followed by random bits, rendered
/// without dashes. Ids sort roughly by creation time.
pub fn generate_id() -> String {
    Uuid::now_v7().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_are_compact_hex() {
        let id = generate_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

//! The salon's staff list.

use crate::error::{BookingError, BookingResult};
use crate::model::Resource;

/// The built-in roster, in display order. The last entry books whoever is
/// free first.
pub fn default_roster() -> Vec<Resource> {
    vec![
        Resource::new("Sofia", "Seppälä", "sofia", "QN225Q"),
        Resource::new("Petra", "Larsson", "petra", "3DXXZ3"),
        Resource::new("Caroline", "Asplund", "caroline", "36MMMQ"),
        Resource::new("Hannah", "Åkermark", "hannah", "3MZVNQ"),
        Resource::new("Josefina", "Nettelmark", "josefina", "3M44DQ"),
        Resource::new("", "Snabbast möjliga tid", "dog", ""),
    ]
}

/// Look up a resource by API key or by first name (case-insensitive).
pub fn find_resource<'a>(roster: &'a [Resource], query: &str) -> BookingResult<&'a Resource> {
    roster
        .iter()
        .find(|r| r.key == query)
        .or_else(|| {
            roster
                .iter()
                .find(|r| !r.name.is_empty() && r.name.eq_ignore_ascii_case(query))
        })
        .ok_or_else(|| BookingError::UnknownResource(query.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_keys_are_unique() {
        let roster = default_roster();
        let mut keys: Vec<_> = roster.iter().map(|r| r.key.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), roster.len());
    }

    #[test]
    fn find_by_key_or_name() {
        let roster = default_roster();
        assert_eq!(find_resource(&roster, "3DXXZ3").unwrap().name, "Petra");
        assert_eq!(find_resource(&roster, "petra").unwrap().key, "3DXXZ3");
        assert_eq!(find_resource(&roster, "").unwrap().lastname, "Snabbast möjliga tid");
    }

    #[test]
    fn unknown_resource_is_an_error() {
        let roster = default_roster();
        assert!(matches!(
            find_resource(&roster, "nobody"),
            Err(BookingError::UnknownResource(q)) if q == "nobody"
        ));
    }
}

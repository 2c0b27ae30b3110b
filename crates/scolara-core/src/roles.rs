// ── Application roles ──
//
// Server role identifiers are free-form strings ("Vice Principal",
// "teacher", ...). The application works with a closed set; mapping is
// an explicit table over the normalized identifier, and identifiers
// missing from the table are flagged by the caller rather than guessed
// at with substring heuristics.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The closed application role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

/// Server role identifiers with a known application role.
///
/// The admin aliases match the grants the server actually hands out.
const ROLE_TABLE: &[(&str, Role)] = &[
    ("admin", Role::Admin),
    ("administrator", Role::Admin),
    ("principal", Role::Admin),
    ("vice principal", Role::Admin),
    ("vp", Role::Admin),
    ("dean", Role::Admin),
    ("staff", Role::Admin),
    ("staff admin", Role::Admin),
    ("teacher", Role::Teacher),
    ("student", Role::Student),
];

/// Map a server role identifier to an application role.
///
/// Exact match on the trimmed, lowercased identifier. `None` means the
/// identifier is not in the table and must be flagged by the caller.
pub fn map_server_role(raw: &str) -> Option<Role> {
    let normalized = raw.trim().to_lowercase();
    ROLE_TABLE
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, role)| *role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_identifiers_map() {
        assert_eq!(map_server_role("admin"), Some(Role::Admin));
        assert_eq!(map_server_role("Vice Principal"), Some(Role::Admin));
        assert_eq!(map_server_role("  TEACHER "), Some(Role::Teacher));
        assert_eq!(map_server_role("student"), Some(Role::Student));
    }

    #[test]
    fn unknown_identifiers_are_none_not_guessed() {
        // Substring matching would have called these admin/teacher.
        assert_eq!(map_server_role("administrative assistant"), None);
        assert_eq!(map_server_role("student teacher"), None);
        assert_eq!(map_server_role("janitor"), None);
    }
}

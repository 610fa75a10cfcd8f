//! GUID helpers.
//!
//! Assets built locally carry a placeholder GUID: a `-` followed by a random
//! non-negative number. The tenant swaps placeholders for real GUIDs on save
//! and reports the mapping in `guidAssignments`.

use rand::Rng;
use uuid::Uuid;

/// Generates a fresh placeholder GUID such as `-8376154201827364512`.
pub fn placeholder_guid() -> String {
    let n: i64 = rand::thread_rng().gen_range(0..i64::MAX - 1);
    format!("-{}", n)
}

pub fn is_placeholder_guid(guid: &str) -> bool {
    guid.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// True when `id` is a hyphenated UUID and should be looked up as a GUID
/// rather than a qualified name.
pub fn is_uuid(id: &str) -> bool {
    id.len() == 36 && Uuid::parse_str(id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_negative_number() {
        let guid = placeholder_guid();
        assert!(guid.starts_with('-'));
        assert!(guid[1..].parse::<i64>().unwrap() >= 0);
        assert!(is_placeholder_guid(&guid));
    }

    #[test]
    fn placeholders_differ() {
        assert_ne!(placeholder_guid(), placeholder_guid());
    }

    #[test]
    fn real_guid_is_not_placeholder() {
        assert!(!is_placeholder_guid("9a1e45b8-2e9f-4c7e-9e1f-0a1b2c3d4e5f"));
        assert!(!is_placeholder_guid("-"));
        assert!(!is_placeholder_guid("-12a"));
    }

    #[test]
    fn uuid_detection_requires_hyphenated_form() {
        assert!(is_uuid("9a1e45b8-2e9f-4c7e-9e1f-0a1b2c3d4e5f"));
        assert!(!is_uuid("9a1e45b82e9f4c7e9e1f0a1b2c3d4e5f"));
        assert!(!is_uuid("default/powerbi/1700000000/workspace"));
    }
}

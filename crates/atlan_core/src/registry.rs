//! Registry of asset types linked into the binary.
//!
//! `#[derive(AtlanAsset)]` submits one [`AssetTypeRegistration`] per type;
//! the untyped paths (CLI, in-memory API) use it to answer "is X a Y" for
//! type names they only know as strings.

pub struct AssetTypeRegistration {
    pub type_name: &'static str,
    pub super_types: &'static [&'static str],
}

inventory::collect!(AssetTypeRegistration);

pub fn lookup(type_name: &str) -> Option<&'static AssetTypeRegistration> {
    inventory::iter::<AssetTypeRegistration>
        .into_iter()
        .find(|r| r.type_name == type_name)
}

pub fn is_registered(type_name: &str) -> bool {
    lookup(type_name).is_some()
}

/// All registered type names, sorted.
pub fn registered_type_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = inventory::iter::<AssetTypeRegistration>
        .into_iter()
        .map(|r| r.type_name)
        .collect();
    names.sort_unstable();
    names
}

/// True when `type_name` is `candidate` or has it as a super type.
/// Unregistered types only match themselves.
pub fn is_a(type_name: &str, candidate: &str) -> bool {
    if type_name == candidate {
        return true;
    }
    lookup(type_name).is_some_and(|r| r.super_types.contains(&candidate))
}

/// Registered types that list `super_type` among their super types, sorted.
pub fn subtypes_of(super_type: &str) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = inventory::iter::<AssetTypeRegistration>
        .into_iter()
        .filter(|r| r.super_types.contains(&super_type))
        .map(|r| r.type_name)
        .collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_types_are_registered() {
        assert!(is_registered("PowerBIColumn"));
        assert!(is_registered("Table"));
        assert!(!is_registered("NoSuchType"));
    }

    #[test]
    fn super_type_lookup() {
        assert!(is_a("PowerBIColumn", "PowerBI"));
        assert!(is_a("PowerBIColumn", "Catalog"));
        assert!(is_a("Table", "SQL"));
        assert!(!is_a("Table", "PowerBI"));
        assert!(is_a("Unregistered", "Unregistered"));
    }

    #[test]
    fn subtypes_include_all_power_bi_types() {
        let power_bi = subtypes_of("PowerBI");
        assert_eq!(power_bi.len(), 11);
        assert!(power_bi.contains(&"PowerBIWorkspace"));
        assert!(!power_bi.contains(&"Table"));
    }

    #[test]
    fn registered_names_are_sorted() {
        let names = registered_type_names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}

//! Storage key naming convention.

/// Builds the keys every record family is stored under
pub struct StorageKey;

impl StorageKey {
    pub const USERS: &'static str = "appUsers";
    pub const AUTH_TOKEN: &'static str = "authToken";
    pub const AUTH_USER: &'static str = "authUser";

    pub fn tasks(user_id: u64) -> String {
        format!("tasks_{}", user_id)
    }

    pub fn meals(user_id: u64) -> String {
        format!("meals_{}", user_id)
    }

    pub fn recipes(user_id: u64) -> String {
        format!("recipes_{}", user_id)
    }

    pub fn pantry(user_id: u64) -> String {
        format!("pantry_{}", user_id)
    }

    pub fn routines(user_id: u64) -> String {
        format!("routines_{}", user_id)
    }

    pub fn max_lifts(user_id: u64) -> String {
        format!("maxLifts_{}", user_id)
    }

    pub fn transactions(user_id: u64) -> String {
        format!("transactions_{}", user_id)
    }

    pub fn recurring(user_id: u64) -> String {
        format!("recurring_{}", user_id)
    }

    /// Keys may only contain ASCII letters, digits, `_` and `-`
    pub fn is_valid(key: &str) -> bool {
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_user_keys() {
        assert_eq!(StorageKey::recipes(1), "recipes_1");
        assert_eq!(StorageKey::pantry(2), "pantry_2");
        assert_eq!(StorageKey::tasks(42), "tasks_42");
        assert_eq!(StorageKey::max_lifts(3), "maxLifts_3");
    }

    #[test]
    fn test_key_validation() {
        assert!(StorageKey::is_valid(StorageKey::USERS));
        assert!(StorageKey::is_valid("recurring_7"));
        assert!(!StorageKey::is_valid(""));
        assert!(!StorageKey::is_valid("../etc/passwd"));
        assert!(!StorageKey::is_valid("tasks 1"));
    }
}

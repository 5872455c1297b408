//! The session record persisted across page loads, and the generation guard
//! that deduplicates auth-expiry handling across concurrent requests.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::permission::PermissionSet;

/// Namespace key for the serialized session record.
pub const SESSION_KEY: &str = "auth";
/// Namespace key for the cached permitted navigation tree.
pub const NAV_KEY: &str = "nav";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Everything a session persists: bearer token, profile, permission codes,
/// and the accessible-store restriction (`None` = unrestricted, empty = no
/// stores). Replaced atomically on login, cleared on logout or expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub user: UserProfile,
    pub permissions: Vec<String>,
    #[serde(default)]
    pub accessible_stores: Option<Vec<i64>>,
}

impl SessionRecord {
    pub fn permission_set(&self) -> PermissionSet {
        PermissionSet::new(self.permissions.iter().cloned())
    }

    /// Superusers and unrestricted sessions see every store.
    pub fn can_access_all_stores(&self) -> bool {
        self.user.is_superuser || self.accessible_stores.is_none()
    }

    pub fn can_access_store(&self, store_id: i64) -> bool {
        if self.can_access_all_stores() {
            return true;
        }
        self.accessible_stores
            .as_deref()
            .is_some_and(|ids| ids.contains(&store_id))
    }
}

/// Generation counter guarding the "session expired" side effect.
///
/// Each request snapshots the generation up front; when an auth-expired
/// response arrives, only the claim whose snapshot is still current wins and
/// performs the termination. Claims from other in-flight requests carry a
/// stale snapshot and become no-ops. Advancing on login invalidates late
/// expiry responses from before the new session existed.
#[derive(Debug, Default)]
pub struct AuthExpiryGuard {
    generation: AtomicU64,
}

impl AuthExpiryGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// True exactly once per generation: the winning caller performs the
    /// session termination and notification.
    pub fn claim(&self, snapshot: u64) -> bool {
        self.generation
            .compare_exchange(snapshot, snapshot + 1, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Invalidate outstanding snapshots (called when a new session begins).
    pub fn advance(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord {
            token: "tok-123".into(),
            user: UserProfile {
                id: 7,
                username: "mei".into(),
                email: Some("mei@example.com".into()),
                full_name: None,
                is_active: true,
                is_superuser: false,
                roles: vec!["analyst".into()],
            },
            permissions: vec!["order:view".into(), "kpi:view".into()],
            accessible_stores: Some(vec![1, 4]),
        }
    }

    #[test]
    fn record_round_trips_through_serde() {
        let original = record();
        let raw = serde_json::to_string(&original).unwrap();
        let restored: SessionRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn missing_restriction_deserializes_as_unrestricted() {
        let raw = r#"{
            "token": "t",
            "user": {"id": 1, "username": "a"},
            "permissions": []
        }"#;
        let restored: SessionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(restored.accessible_stores, None);
        assert!(restored.can_access_all_stores());
    }

    #[test]
    fn store_restriction_semantics() {
        let mut r = record();
        assert!(r.can_access_store(1));
        assert!(!r.can_access_store(2));

        r.accessible_stores = Some(Vec::new());
        assert!(!r.can_access_store(1));

        r.accessible_stores = None;
        assert!(r.can_access_store(99));

        r.accessible_stores = Some(Vec::new());
        r.user.is_superuser = true;
        assert!(r.can_access_store(99));
    }

    #[test]
    fn expiry_guard_claims_once_per_generation() {
        let guard = AuthExpiryGuard::new();
        let a = guard.snapshot();
        let b = guard.snapshot();
        // Two concurrent requests observed the same generation; only the
        // first to claim wins.
        assert!(guard.claim(a));
        assert!(!guard.claim(b));

        let c = guard.snapshot();
        assert!(guard.claim(c));
    }

    #[test]
    fn advance_invalidates_outstanding_snapshots() {
        let guard = AuthExpiryGuard::new();
        let stale = guard.snapshot();
        guard.advance();
        assert!(!guard.claim(stale));
    }
}

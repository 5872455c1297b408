use frontend_core::error::ApiError;
use frontend_core::session::SessionRecord;
use serde::Deserialize;

use crate::services::api_client::ApiClient;

#[derive(Debug, Clone, Deserialize)]
pub struct StoreInfo {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

pub async fn all(api: &ApiClient, token: &str) -> Result<Vec<StoreInfo>, ApiError> {
    api.get("/stores/all", Some(token), None::<&()>).await
}

/// The stores offered in filter dropdowns: narrowed by the session's
/// accessible-store restriction. Data-scope enforcement stays with the
/// backend; this only trims the choices shown.
pub fn accessible(stores: Vec<StoreInfo>, record: &SessionRecord) -> Vec<StoreInfo> {
    stores
        .into_iter()
        .filter(|store| record.can_access_store(store.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontend_core::session::UserProfile;

    fn store(id: i64) -> StoreInfo {
        StoreInfo {
            id,
            name: format!("Store {id}"),
            code: format!("S{id:03}"),
            address: None,
            manager: None,
            phone: None,
            is_active: true,
            created_at: "2026-01-01T00:00:00".into(),
        }
    }

    fn record(accessible_stores: Option<Vec<i64>>) -> SessionRecord {
        SessionRecord {
            token: "t".into(),
            user: UserProfile {
                id: 1,
                username: "u".into(),
                email: None,
                full_name: None,
                is_active: true,
                is_superuser: false,
                roles: Vec::new(),
            },
            permissions: Vec::new(),
            accessible_stores,
        }
    }

    #[test]
    fn unrestricted_sessions_see_every_store() {
        let all = vec![store(1), store(2)];
        let kept = accessible(all, &record(None));
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn restricted_sessions_see_only_listed_stores() {
        let all = vec![store(1), store(2), store(3)];
        let kept = accessible(all, &record(Some(vec![2])));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }

    #[test]
    fn empty_restriction_sees_nothing() {
        let all = vec![store(1), store(2)];
        let kept = accessible(all, &record(Some(Vec::new())));
        assert!(kept.is_empty());
    }
}

//! In-memory registry of administrator accounts.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::entities::admin::AdminUser;

#[derive(Clone)]
pub struct AdminRepository {
    admins: Arc<RwLock<Vec<AdminUser>>>,
}

impl AdminRepository {
    pub fn new() -> Self {
        Self {
            admins: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn insert(&self, admin: AdminUser) -> AdminUser {
        let mut admins = self.admins.write().await;
        admins.push(admin.clone());
        admin
    }

    pub async fn find_by_id(&self, id: &str) -> Option<AdminUser> {
        let admins = self.admins.read().await;
        admins.iter().find(|a| a.id == id).cloned()
    }
}

impl Default for AdminRepository {
    fn default() -> Self {
        Self::new()
    }
}

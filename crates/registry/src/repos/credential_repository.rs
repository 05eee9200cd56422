//! In-memory registry of login credentials.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::entities::credential::Credential;
use crate::types::{RegistryError, RegistryResult};

#[derive(Clone)]
pub struct CredentialRepository {
    credentials: Arc<RwLock<Vec<Credential>>>,
}

impl CredentialRepository {
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn insert(&self, credential: Credential) -> RegistryResult<Credential> {
        let mut credentials = self.credentials.write().await;
        if credentials.iter().any(|c| c.email == credential.email) {
            return Err(RegistryError::DuplicateEmail);
        }
        credentials.push(credential.clone());
        Ok(credential)
    }

    pub async fn find_by_email(&self, email: &str) -> Option<Credential> {
        let credentials = self.credentials.read().await;
        credentials.iter().find(|c| c.email == email).cloned()
    }

    pub async fn email_exists(&self, email: &str) -> bool {
        let credentials = self.credentials.read().await;
        credentials.iter().any(|c| c.email == email)
    }
}

impl Default for CredentialRepository {
    fn default() -> Self {
        Self::new()
    }
}

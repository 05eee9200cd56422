//! In-memory registry of waitlist applications.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::entities::waitlist::{NewApplicant, WaitlistMember, WaitlistStatus, WaitlistUpdate};
use crate::types::{RegistryError, RegistryResult};

/// Capacity-bounded waitlist registry.
///
/// Invariant: after every mutation the positions of all PENDING entries form
/// a dense 1..N sequence ordered by application date. Approved and rejected
/// entries keep their last position but drop out of the sequence.
#[derive(Clone)]
pub struct WaitlistRepository {
    entries: Arc<RwLock<Vec<WaitlistMember>>>,
    capacity: usize,
}

impl WaitlistRepository {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add a new pending application. Duplicate-email check, capacity check,
    /// insert, and position recompute all happen under one write lock.
    pub async fn insert(&self, applicant: NewApplicant) -> RegistryResult<WaitlistMember> {
        let mut entries = self.entries.write().await;

        if entries.iter().any(|e| e.email == applicant.email) {
            return Err(RegistryError::DuplicateEmail);
        }

        let pending = entries
            .iter()
            .filter(|e| e.status == WaitlistStatus::Pending)
            .count();
        if pending >= self.capacity {
            return Err(RegistryError::CapacityReached);
        }

        let entry = WaitlistMember::new(applicant, pending + 1, Utc::now());
        let id = entry.id.clone();
        entries.push(entry);
        recompute_positions(&mut entries);

        Ok(entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .expect("entry was just inserted"))
    }

    pub async fn find_by_id(&self, id: &str) -> Option<WaitlistMember> {
        let entries = self.entries.read().await;
        entries.iter().find(|e| e.id == id).cloned()
    }

    pub async fn email_exists(&self, email: &str) -> bool {
        let entries = self.entries.read().await;
        entries.iter().any(|e| e.email == email)
    }

    pub async fn pending_count(&self) -> usize {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|e| e.status == WaitlistStatus::Pending)
            .count()
    }

    /// List applications: pending entries sort by position, everything else by
    /// application date. Returns the page plus the filtered total.
    pub async fn list(
        &self,
        status: Option<WaitlistStatus>,
        limit: usize,
        offset: usize,
    ) -> (Vec<WaitlistMember>, usize) {
        let entries = self.entries.read().await;
        let mut filtered: Vec<WaitlistMember> = entries
            .iter()
            .filter(|e| status.map_or(true, |s| e.status == s))
            .cloned()
            .collect();

        filtered.sort_by(|a, b| {
            if a.status == WaitlistStatus::Pending && b.status == WaitlistStatus::Pending {
                a.position.cmp(&b.position)
            } else {
                a.application_date.cmp(&b.application_date)
            }
        });

        let total = filtered.len();
        let page = filtered.into_iter().skip(offset).take(limit).collect();
        (page, total)
    }

    pub async fn update(&self, id: &str, update: &WaitlistUpdate) -> RegistryResult<WaitlistMember> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(RegistryError::NotFound)?;
        entry.apply(update, Utc::now());
        Ok(entry.clone())
    }

    /// Change an entry's status and recompute pending positions, since any
    /// status change removes the entry from (or keeps it out of) the pending set.
    pub async fn set_status(
        &self,
        id: &str,
        status: WaitlistStatus,
    ) -> RegistryResult<WaitlistMember> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(RegistryError::NotFound)?;
        entry.status = status;
        entry.updated_at = Utc::now();
        let id = entry.id.clone();
        recompute_positions(&mut entries);

        Ok(entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .expect("entry still present after status change"))
    }

    pub async fn delete(&self, id: &str) -> RegistryResult<()> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(RegistryError::NotFound);
        }
        recompute_positions(&mut entries);
        Ok(())
    }
}

/// Reassign dense 1..N positions to the pending subset, ordered by
/// application date.
fn recompute_positions(entries: &mut [WaitlistMember]) {
    let mut pending: Vec<&mut WaitlistMember> = entries
        .iter_mut()
        .filter(|e| e.status == WaitlistStatus::Pending)
        .collect();
    pending.sort_by_key(|e| e.application_date);
    for (index, entry) in pending.into_iter().enumerate() {
        entry.position = index + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant(email: &str) -> NewApplicant {
        NewApplicant {
            email: email.into(),
            first_name: "Wait".into(),
            last_name: "Lister".into(),
            phone: None,
            reason_for_joining: None,
            referred_by: None,
        }
    }

    async fn pending_positions(repo: &WaitlistRepository) -> Vec<usize> {
        let (entries, _) = repo.list(Some(WaitlistStatus::Pending), 1000, 0).await;
        entries.iter().map(|e| e.position).collect()
    }

    #[tokio::test]
    async fn positions_are_assigned_in_application_order() {
        let repo = WaitlistRepository::new(10);
        for i in 0..4 {
            let entry = repo.insert(applicant(&format!("w{i}@example.com"))).await.unwrap();
            assert_eq!(entry.position, i + 1);
        }
        assert_eq!(pending_positions(&repo).await, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn insert_rejects_duplicates_and_capacity() {
        let repo = WaitlistRepository::new(2);
        repo.insert(applicant("a@example.com")).await.unwrap();
        assert_eq!(
            repo.insert(applicant("a@example.com")).await.unwrap_err(),
            RegistryError::DuplicateEmail
        );

        repo.insert(applicant("b@example.com")).await.unwrap();
        assert_eq!(
            repo.insert(applicant("c@example.com")).await.unwrap_err(),
            RegistryError::CapacityReached
        );
    }

    #[tokio::test]
    async fn status_change_closes_the_position_gap() {
        let repo = WaitlistRepository::new(10);
        let first = repo.insert(applicant("a@example.com")).await.unwrap();
        repo.insert(applicant("b@example.com")).await.unwrap();
        repo.insert(applicant("c@example.com")).await.unwrap();

        let rejected = repo
            .set_status(&first.id, WaitlistStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(rejected.status, WaitlistStatus::Rejected);

        assert_eq!(pending_positions(&repo).await, vec![1, 2]);
        assert_eq!(repo.pending_count().await, 2);

        // The rejected entry is kept, not deleted.
        assert!(repo.find_by_id(&first.id).await.is_some());
    }

    #[tokio::test]
    async fn delete_recomputes_positions() {
        let repo = WaitlistRepository::new(10);
        repo.insert(applicant("a@example.com")).await.unwrap();
        let second = repo.insert(applicant("b@example.com")).await.unwrap();
        repo.insert(applicant("c@example.com")).await.unwrap();

        repo.delete(&second.id).await.unwrap();
        assert_eq!(pending_positions(&repo).await, vec![1, 2]);
    }

    #[tokio::test]
    async fn terminal_entries_free_waitlist_capacity() {
        let repo = WaitlistRepository::new(1);
        let only = repo.insert(applicant("a@example.com")).await.unwrap();
        repo.set_status(&only.id, WaitlistStatus::Approved)
            .await
            .unwrap();

        // Capacity counts pending entries only.
        repo.insert(applicant("b@example.com")).await.unwrap();
        assert_eq!(pending_positions(&repo).await, vec![1]);
    }

    #[tokio::test]
    async fn list_sorts_pending_by_position_then_others_by_date() {
        let repo = WaitlistRepository::new(10);
        let a = repo.insert(applicant("a@example.com")).await.unwrap();
        repo.insert(applicant("b@example.com")).await.unwrap();
        repo.insert(applicant("c@example.com")).await.unwrap();
        repo.set_status(&a.id, WaitlistStatus::Rejected).await.unwrap();

        let (pending, total) = repo.list(Some(WaitlistStatus::Pending), 20, 0).await;
        assert_eq!(total, 2);
        assert_eq!(pending[0].email, "b@example.com");
        assert_eq!(pending[1].email, "c@example.com");

        let (_, total) = repo.list(None, 20, 0).await;
        assert_eq!(total, 3);
    }
}

//! In-memory registry of active members.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::entities::member::{Member, MemberStatus, MemberUpdate};
use crate::types::{RegistryError, RegistryResult};

/// Capacity-bounded member registry. Insertion order is preserved so that
/// paginated listings stay stable.
#[derive(Clone)]
pub struct MemberRepository {
    members: Arc<RwLock<Vec<Member>>>,
    capacity: usize,
}

impl MemberRepository {
    pub fn new(capacity: usize) -> Self {
        Self {
            members: Arc::new(RwLock::new(Vec::new())),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert a new active member. The capacity check and the insert share the
    /// write lock, so concurrent requests cannot push the registry past the cap.
    pub async fn insert(&self, member: Member) -> RegistryResult<Member> {
        let mut members = self.members.write().await;

        let active = members
            .iter()
            .filter(|m| m.status == MemberStatus::Active)
            .count();
        if active >= self.capacity {
            return Err(RegistryError::CapacityReached);
        }

        if members.iter().any(|m| m.email == member.email) {
            return Err(RegistryError::DuplicateEmail);
        }

        members.push(member.clone());
        Ok(member)
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Member> {
        let members = self.members.read().await;
        members.iter().find(|m| m.id == id).cloned()
    }

    pub async fn email_exists(&self, email: &str) -> bool {
        let members = self.members.read().await;
        members.iter().any(|m| m.email == email)
    }

    pub async fn active_count(&self) -> usize {
        let members = self.members.read().await;
        members
            .iter()
            .filter(|m| m.status == MemberStatus::Active)
            .count()
    }

    /// List members with an optional status filter. Returns the requested page
    /// and the total size of the filtered set.
    pub async fn list(
        &self,
        status: Option<MemberStatus>,
        limit: usize,
        offset: usize,
    ) -> (Vec<Member>, usize) {
        let members = self.members.read().await;
        let filtered: Vec<&Member> = members
            .iter()
            .filter(|m| status.map_or(true, |s| m.status == s))
            .collect();
        let total = filtered.len();
        let page = filtered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        (page, total)
    }

    pub async fn update(&self, id: &str, update: &MemberUpdate) -> RegistryResult<Member> {
        let mut members = self.members.write().await;
        let member = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RegistryError::NotFound)?;
        member.apply(update, Utc::now());
        Ok(member.clone())
    }

    pub async fn delete(&self, id: &str) -> RegistryResult<()> {
        let mut members = self.members.write().await;
        let before = members.len();
        members.retain(|m| m.id != id);
        if members.len() == before {
            return Err(RegistryError::NotFound);
        }
        Ok(())
    }

    /// Record a successful login. Missing members are ignored; the login path
    /// only touches the registry opportunistically.
    pub async fn touch_last_login(&self, id: &str) {
        let mut members = self.members.write().await;
        if let Some(member) = members.iter_mut().find(|m| m.id == id) {
            member.last_login = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::member::NewMember;

    fn new_member(email: &str) -> Member {
        Member::new(
            NewMember {
                email: email.into(),
                first_name: "Test".into(),
                last_name: "Member".into(),
                phone: None,
                profile_picture: None,
                bio: None,
                address: None,
                preferences: None,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn insert_rejects_beyond_capacity() {
        let repo = MemberRepository::new(2);
        repo.insert(new_member("a@example.com")).await.unwrap();
        repo.insert(new_member("b@example.com")).await.unwrap();

        let err = repo.insert(new_member("c@example.com")).await.unwrap_err();
        assert_eq!(err, RegistryError::CapacityReached);
        assert_eq!(repo.active_count().await, 2);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let repo = MemberRepository::new(10);
        repo.insert(new_member("a@example.com")).await.unwrap();

        let err = repo.insert(new_member("a@example.com")).await.unwrap_err();
        assert_eq!(err, RegistryError::DuplicateEmail);
    }

    #[tokio::test]
    async fn capacity_counts_only_active_members() {
        let repo = MemberRepository::new(1);
        let member = repo.insert(new_member("a@example.com")).await.unwrap();

        // Suspend the only member; a slot opens up.
        {
            let mut members = repo.members.write().await;
            members
                .iter_mut()
                .find(|m| m.id == member.id)
                .unwrap()
                .status = MemberStatus::Suspended;
        }

        repo.insert(new_member("b@example.com")).await.unwrap();
        assert_eq!(repo.active_count().await, 1);
    }

    #[tokio::test]
    async fn list_filters_by_status_and_paginates() {
        let repo = MemberRepository::new(10);
        for i in 0..5 {
            repo.insert(new_member(&format!("m{i}@example.com")))
                .await
                .unwrap();
        }

        let (page, total) = repo.list(Some(MemberStatus::Active), 2, 2).await;
        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].email, "m2@example.com");

        let (page, total) = repo.list(Some(MemberStatus::Suspended), 20, 0).await;
        assert_eq!(total, 0);
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_record_outright() {
        let repo = MemberRepository::new(10);
        let member = repo.insert(new_member("a@example.com")).await.unwrap();

        repo.delete(&member.id).await.unwrap();
        assert!(repo.find_by_id(&member.id).await.is_none());
        assert_eq!(repo.delete(&member.id).await, Err(RegistryError::NotFound));
    }
}

use async_trait::async_trait;
use chapel_core::error::CoreError;
use chapel_core::pagination::{Page, Pagination};
use chapel_core::types::Timestamp;
use chrono::Utc;
use tokio::sync::RwLock;

use super::Table;
use crate::models::member::{CreateMember, Member, MemberStats};
use crate::repositories::MemberRepository;
use crate::RepoResult;

#[derive(Default)]
pub struct MemoryMemberRepository {
    table: RwLock<Table<Member>>,
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn register(&self, user_id: &str, input: &CreateMember) -> RepoResult<Member> {
        let mut table = self.table.write().await;
        let email = input.email.trim();
        if table
            .rows
            .iter()
            .any(|m| m.user_id == user_id || m.email.eq_ignore_ascii_case(email))
        {
            return Err(CoreError::Conflict("Member already exists".into()).into());
        }

        let now = Utc::now();
        let member = Member {
            id: table.next_id(),
            user_id: user_id.to_string(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: email.to_string(),
            phone: input.phone.clone(),
            address: input.address.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            zip: input.zip.clone(),
            birth_date: input.birth_date,
            bio: input.bio.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.push(member.clone());
        Ok(member)
    }

    async fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<Member>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|m| m.user_id == user_id).cloned())
    }

    async fn list(&self, pagination: Pagination) -> RepoResult<Page<Member>> {
        let table = self.table.read().await;
        let mut rows: Vec<&Member> = table.rows.iter().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        let total = rows.len() as i64;
        let items = pagination.slice(&rows).into_iter().cloned().collect();
        Ok(Page::new(items, total, pagination))
    }

    async fn stats(&self, since: Timestamp) -> RepoResult<MemberStats> {
        let table = self.table.read().await;
        Ok(MemberStats {
            total_members: table.rows.len() as i64,
            new_members: table.rows.iter().filter(|m| m.created_at >= since).count() as i64,
        })
    }
}

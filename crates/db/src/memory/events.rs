use std::collections::BTreeSet;

use async_trait::async_trait;
use chapel_core::error::CoreError;
use chapel_core::pagination::{Page, Pagination};
use chapel_core::registration::{attendee_count, check_registration, normalize_email};
use chapel_core::types::{DbId, Timestamp};
use chrono::Utc;
use tokio::sync::RwLock;

use super::Table;
use crate::models::event::{
    CreateEvent, CreateEventRegistration, Event, EventRegistration, EventStats,
};
use crate::repositories::EventRepository;
use crate::RepoResult;

#[derive(Default)]
struct EventTables {
    events: Table<Event>,
    registrations: Table<EventRegistration>,
}

impl EventTables {
    /// Upcoming events, soonest first.
    fn upcoming(&self, now: Timestamp) -> Vec<&Event> {
        let mut out: Vec<&Event> = self.events.rows.iter().filter(|e| e.start_date >= now).collect();
        out.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
        out
    }
}

#[derive(Default)]
pub struct MemoryEventRepository {
    tables: RwLock<EventTables>,
}

impl MemoryEventRepository {
    pub fn seeded(events: Vec<Event>) -> Self {
        Self {
            tables: RwLock::new(EventTables {
                events: Table::seeded(events),
                registrations: Table::default(),
            }),
        }
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn create(&self, input: &CreateEvent) -> RepoResult<Event> {
        let mut tables = self.tables.write().await;
        if tables.events.rows.iter().any(|e| e.slug == input.slug) {
            return Err(CoreError::Conflict(format!(
                "An event with slug '{}' already exists",
                input.slug
            ))
            .into());
        }

        let now = Utc::now();
        let event = Event {
            id: tables.events.next_id(),
            title: input.title.clone(),
            slug: input.slug.clone(),
            description: input.description.clone(),
            content: input.content.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            time_label: input.time_label.clone(),
            location: input.location.clone(),
            image_url: input.image_url.clone(),
            category: input.category.clone(),
            is_recurring: input.is_recurring,
            registration_required: input.registration_required,
            max_attendees: input.max_attendees,
            created_at: now,
            updated_at: now,
        };
        tables.events.rows.push(event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Event>> {
        let tables = self.tables.read().await;
        Ok(tables.events.rows.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Event>> {
        let tables = self.tables.read().await;
        Ok(tables.events.rows.iter().find(|e| e.slug == slug).cloned())
    }

    async fn upcoming(&self, now: Timestamp, limit: i64) -> RepoResult<Vec<Event>> {
        let tables = self.tables.read().await;
        Ok(tables
            .upcoming(now)
            .into_iter()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn list(
        &self,
        pagination: Pagination,
        category: Option<&str>,
    ) -> RepoResult<Page<Event>> {
        let tables = self.tables.read().await;
        let mut matched: Vec<&Event> = tables
            .events
            .rows
            .iter()
            .filter(|e| category.is_none() || e.category.as_deref() == category)
            .collect();
        matched.sort_by(|a, b| b.start_date.cmp(&a.start_date).then_with(|| b.id.cmp(&a.id)));

        let total = matched.len() as i64;
        let items = pagination.slice(&matched).into_iter().cloned().collect();
        Ok(Page::new(items, total, pagination))
    }

    async fn categories(&self) -> RepoResult<Vec<String>> {
        let tables = self.tables.read().await;
        Ok(tables
            .events
            .rows
            .iter()
            .filter_map(|e| e.category.as_deref())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(ToString::to_string)
            .collect())
    }

    async fn register(
        &self,
        event_id: DbId,
        user_id: Option<&str>,
        input: &CreateEventRegistration,
    ) -> RepoResult<EventRegistration> {
        let mut tables = self.tables.write().await;
        let email = normalize_email(&input.email);

        let capacity = tables
            .events
            .rows
            .iter()
            .find(|e| e.id == event_id)
            .map(Event::capacity);
        let existing = tables
            .registrations
            .rows
            .iter()
            .filter(|r| r.event_id == event_id);
        let already_registered = existing.clone().any(|r| normalize_email(&r.email) == email);
        let current_attendees: i64 = existing.map(|r| attendee_count(r.num_guests)).sum();

        check_registration(
            event_id,
            capacity,
            already_registered,
            current_attendees,
            input.num_guests,
        )?;

        let registration = EventRegistration {
            id: tables.registrations.next_id(),
            event_id,
            user_id: user_id.map(ToString::to_string),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email,
            phone: input.phone.clone(),
            num_guests: input.num_guests,
            comments: input.comments.clone(),
            created_at: Utc::now(),
        };
        tables.registrations.rows.push(registration.clone());
        Ok(registration)
    }

    async fn is_registered(&self, event_id: DbId, email: &str) -> RepoResult<bool> {
        let tables = self.tables.read().await;
        let email = normalize_email(email);
        Ok(tables
            .registrations
            .rows
            .iter()
            .any(|r| r.event_id == event_id && normalize_email(&r.email) == email))
    }

    async fn registrations(&self, event_id: DbId) -> RepoResult<Vec<EventRegistration>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<EventRegistration> = tables
            .registrations
            .rows
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn stats(&self, now: Timestamp) -> RepoResult<EventStats> {
        let tables = self.tables.read().await;
        let upcoming = tables.upcoming(now);
        Ok(EventStats {
            upcoming_events: upcoming.len() as i64,
            next_event_name: upcoming.first().map(|e| e.title.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use chrono::Duration;

    use super::*;
    use crate::RepoError;

    fn event(title: &str, slug: &str, days_ahead: i64) -> CreateEvent {
        CreateEvent {
            title: title.to_string(),
            slug: slug.to_string(),
            description: format!("{title} description"),
            content: None,
            start_date: Utc::now() + Duration::days(days_ahead),
            end_date: None,
            time_label: None,
            location: None,
            image_url: None,
            category: None,
            is_recurring: false,
            registration_required: true,
            max_attendees: None,
        }
    }

    fn registrant(email: &str, num_guests: i32) -> CreateEventRegistration {
        CreateEventRegistration {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            phone: None,
            num_guests,
            comments: None,
        }
    }

    #[tokio::test]
    async fn registration_respects_capacity() {
        let repo = MemoryEventRepository::default();
        let mut input = event("Retreat", "retreat", 7);
        input.max_attendees = Some(10);
        let e = repo.create(&input).await.unwrap();

        // 8 attendees already.
        repo.register(e.id, None, &registrant("a@example.com", 3)).await.unwrap();
        repo.register(e.id, None, &registrant("b@example.com", 3)).await.unwrap();

        let err = repo
            .register(e.id, None, &registrant("c@example.com", 2))
            .await
            .unwrap_err();
        assert_matches!(err, RepoError::Core(CoreError::Conflict(_)));

        repo.register(e.id, None, &registrant("c@example.com", 1)).await.unwrap();
        assert_eq!(repo.registrations(e.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn duplicate_email_is_case_insensitive() {
        let repo = MemoryEventRepository::default();
        let e = repo.create(&event("Retreat", "retreat", 7)).await.unwrap();

        repo.register(e.id, Some("user_1"), &registrant("Jane@Example.com", 0))
            .await
            .unwrap();
        let err = repo
            .register(e.id, None, &registrant("jane@example.COM", 0))
            .await
            .unwrap_err();
        assert_matches!(err, RepoError::Core(CoreError::Conflict(_)));

        assert!(repo.is_registered(e.id, "JANE@example.com").await.unwrap());
        assert!(!repo.is_registered(e.id, "john@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn missing_and_open_events_are_rejected() {
        let repo = MemoryEventRepository::default();
        let err = repo
            .register(42, None, &registrant("a@example.com", 0))
            .await
            .unwrap_err();
        assert_matches!(err, RepoError::Core(CoreError::NotFound { id: 42, .. }));

        let mut open = event("Picnic", "picnic", 3);
        open.registration_required = false;
        let e = repo.create(&open).await.unwrap();
        let err = repo
            .register(e.id, None, &registrant("a@example.com", 0))
            .await
            .unwrap_err();
        assert_matches!(err, RepoError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn concurrent_registrations_never_overfill() {
        let repo = Arc::new(MemoryEventRepository::default());
        let mut input = event("Retreat", "retreat", 7);
        input.max_attendees = Some(5);
        let e = repo.create(&input).await.unwrap();

        let event_id = e.id;
        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.register(event_id, None, &registrant(&format!("p{i}@example.com"), 0))
                    .await
                    .is_ok()
            }));
        }
        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 5);
        assert_eq!(repo.registrations(e.id).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn upcoming_list_and_stats() {
        let repo = MemoryEventRepository::default();
        let mut past = event("Past", "past", -3);
        past.category = Some("Worship".to_string());
        repo.create(&past).await.unwrap();
        let mut later = event("Later", "later", 10);
        later.category = Some("Youth".to_string());
        repo.create(&later).await.unwrap();
        repo.create(&event("Soon", "soon", 1)).await.unwrap();

        let now = Utc::now();
        let upcoming = repo.upcoming(now, 10).await.unwrap();
        assert_eq!(
            upcoming.iter().map(|e| e.slug.as_str()).collect::<Vec<_>>(),
            vec!["soon", "later"]
        );

        let stats = repo.stats(now).await.unwrap();
        assert_eq!(stats.upcoming_events, 2);
        assert_eq!(stats.next_event_name.as_deref(), Some("Soon"));

        let youth = repo.list(Pagination::default(), Some("Youth")).await.unwrap();
        assert_eq!(youth.total_count, 1);
        let all = repo.list(Pagination::default(), None).await.unwrap();
        assert_eq!(all.items[0].slug, "later");

        assert_eq!(repo.categories().await.unwrap(), vec!["Worship", "Youth"]);
        assert!(repo.find_by_slug("soon").await.unwrap().is_some());
    }
}

//! Integration tests for the PostgreSQL repositories.
//!
//! Exercises the SQL paths the in-memory store cannot cover:
//! - Filtered, sorted sermon listing with total counts
//! - Title ordering that matches the in-memory store
//! - Atomic view counting by slug
//! - Registration admission under the row lock and the unique email index
//! - Case-insensitive member email uniqueness
//! - Prayer request visibility
//! - Singleton live-stream settings updates

use std::sync::Arc;

use assert_matches::assert_matches;
use chapel_core::error::CoreError;
use chapel_core::pagination::{Page, Pagination};
use chapel_core::sermon_query::{SermonListParams, SermonQuery};
use chapel_db::memory::MemorySermonRepository;
use chapel_db::models::event::{CreateEvent, CreateEventRegistration};
use chapel_db::models::live_stream::UpdateLiveStreamSettings;
use chapel_db::models::member::CreateMember;
use chapel_db::models::prayer_request::CreatePrayerRequest;
use chapel_db::models::sermon::{CreateSermon, Sermon};
use chapel_db::repositories::{
    EventRepository, LiveStreamRepository, MemberRepository, PgEventRepository,
    PgLiveStreamRepository, PgMemberRepository, PgPrayerRequestRepository, PgSermonRepository,
    PrayerRequestRepository, SermonRepository,
};
use chapel_db::RepoError;
use chrono::{Duration, TimeZone, Utc};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_sermon(title: &str, slug: &str, speaker: &str, day: u32, tags: &[&str]) -> CreateSermon {
    CreateSermon {
        title: title.to_string(),
        slug: slug.to_string(),
        description: format!("A message about {title}"),
        content: String::new(),
        scripture_reference: String::new(),
        speaker: speaker.to_string(),
        date: Utc.with_ymd_and_hms(2024, 5, day, 10, 0, 0).unwrap(),
        video_url: None,
        audio_url: None,
        image_url: None,
        series: None,
        tags: tags.iter().map(ToString::to_string).collect(),
        status: None,
    }
}

fn new_event(slug: &str, max_attendees: Option<i32>) -> CreateEvent {
    CreateEvent {
        title: "Men's Retreat".to_string(),
        slug: slug.to_string(),
        description: "A weekend away".to_string(),
        content: None,
        start_date: Utc::now() + Duration::days(14),
        end_date: None,
        time_label: None,
        location: None,
        image_url: None,
        category: Some("Fellowship".to_string()),
        is_recurring: false,
        registration_required: true,
        max_attendees,
    }
}

fn registrant(email: &str, num_guests: i32) -> CreateEventRegistration {
    CreateEventRegistration {
        first_name: "Sam".to_string(),
        last_name: "Lee".to_string(),
        email: email.to_string(),
        phone: None,
        num_guests,
        comments: None,
    }
}

// ---------------------------------------------------------------------------
// Sermons
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_sermon_list_filters_and_counts(pool: PgPool) {
    let repo = PgSermonRepository::new(pool);
    repo.create(&new_sermon("Peace Be Still", "peace-be-still", "Pastor John Smith", 5, &["peace"]))
        .await
        .unwrap();
    repo.create(&new_sermon("100% Faith", "full-faith", "Pastor Sarah Johnson", 12, &["faith"]))
        .await
        .unwrap();
    repo.create(&new_sermon("Walking in Faith", "walking-in-faith", "Pastor John Smith", 19, &["faith"]))
        .await
        .unwrap();

    let params = SermonListParams {
        topic: Some("faith".to_string()),
        ..Default::default()
    };
    let page = repo.list(&SermonQuery::from_params(&params)).await.unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(page.items[0].slug, "walking-in-faith");

    // `%` is matched literally.
    let params = SermonListParams {
        search: Some("100%".to_string()),
        ..Default::default()
    };
    let page = repo.list(&SermonQuery::from_params(&params)).await.unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].slug, "full-faith");

    let params = SermonListParams {
        sort: Some("title".to_string()),
        order: Some("asc".to_string()),
        per_page: Some(2),
        page: Some(2),
        ..Default::default()
    };
    let page = repo.list(&SermonQuery::from_params(&params)).await.unwrap();
    assert_eq!(page.total_count, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].slug, "walking-in-faith");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_title_sort_matches_memory_store(pool: PgPool) {
    let pg = PgSermonRepository::new(pool);
    let memory = MemorySermonRepository::default();
    let sermons = [
        new_sermon("Ab", "ab", "Pastor John Smith", 5, &[]),
        new_sermon("A Z", "a-z", "Pastor John Smith", 6, &[]),
        new_sermon("a-c", "a-c", "Pastor John Smith", 7, &[]),
        new_sermon("Zeal", "zeal", "Pastor John Smith", 8, &[]),
    ];
    for sermon in &sermons {
        pg.create(sermon).await.unwrap();
        memory.create(sermon).await.unwrap();
    }

    for order in ["asc", "desc"] {
        let params = SermonListParams {
            sort: Some("title".to_string()),
            order: Some(order.to_string()),
            ..Default::default()
        };
        let query = SermonQuery::from_params(&params);
        let slugs = |page: Page<Sermon>| {
            page.items.into_iter().map(|s| s.slug).collect::<Vec<_>>()
        };
        let from_pg = slugs(pg.list(&query).await.unwrap());
        let from_memory = slugs(memory.list(&query).await.unwrap());
        assert_eq!(from_pg, from_memory, "order={order}");
    }

    let params = SermonListParams {
        sort: Some("title".to_string()),
        order: Some("asc".to_string()),
        ..Default::default()
    };
    let page = pg.list(&SermonQuery::from_params(&params)).await.unwrap();
    let slugs: Vec<_> = page.items.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(slugs, vec!["a-z", "a-c", "ab", "zeal"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_view_by_slug_increments(pool: PgPool) {
    let repo = PgSermonRepository::new(pool);
    repo.create(&new_sermon("Hope", "hope", "Pastor John Smith", 5, &[]))
        .await
        .unwrap();

    assert_eq!(repo.view_by_slug("hope").await.unwrap().unwrap().view_count, 1);
    assert_eq!(repo.view_by_slug("hope").await.unwrap().unwrap().view_count, 2);
    assert!(repo.view_by_slug("nope").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_sermon_slug_rejected(pool: PgPool) {
    let repo = PgSermonRepository::new(pool);
    repo.create(&new_sermon("Hope", "hope", "Pastor John Smith", 5, &[]))
        .await
        .unwrap();
    let result = repo
        .create(&new_sermon("Hope II", "hope", "Pastor John Smith", 6, &[]))
        .await;
    assert_matches!(result, Err(RepoError::Database(_)));
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_registration_capacity_and_duplicates(pool: PgPool) {
    let repo = PgEventRepository::new(pool);
    let event = repo.create(&new_event("retreat", Some(4))).await.unwrap();

    repo.register(event.id, None, &registrant("sam@example.com", 2))
        .await
        .unwrap();

    let dup = repo
        .register(event.id, None, &registrant("SAM@example.com", 0))
        .await;
    assert_matches!(dup, Err(RepoError::Core(CoreError::Conflict(_))));

    let full = repo
        .register(event.id, None, &registrant("kim@example.com", 1))
        .await;
    assert_matches!(full, Err(RepoError::Core(CoreError::Conflict(_))));

    repo.register(event.id, None, &registrant("kim@example.com", 0))
        .await
        .unwrap();
    assert!(repo.is_registered(event.id, "Kim@Example.com").await.unwrap());

    let missing = repo.register(9999, None, &registrant("x@example.com", 0)).await;
    assert_matches!(missing, Err(RepoError::Core(CoreError::NotFound { .. })));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_registrations_respect_capacity(pool: PgPool) {
    let repo = Arc::new(PgEventRepository::new(pool));
    let event = repo.create(&new_event("retreat", Some(3))).await.unwrap();
    let event_id = event.id;

    let mut handles = Vec::new();
    for i in 0..10 {
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
    assert_eq!(admitted, 3);
    assert_eq!(repo.registrations(event_id).await.unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_member_email_unique_regardless_of_case(pool: PgPool) {
    let repo = PgMemberRepository::new(pool.clone());
    let form = CreateMember {
        user_id: None,
        first_name: "Lydia".to_string(),
        last_name: "Purple".to_string(),
        email: "Lydia@Example.org".to_string(),
        phone: None,
        address: None,
        city: None,
        state: None,
        zip: None,
        birth_date: None,
        bio: None,
    };
    repo.register("user_1", &form).await.unwrap();

    let dup = repo
        .register("user_2", &CreateMember { email: "lydia@example.org".to_string(), ..form })
        .await;
    assert_matches!(dup, Err(RepoError::Core(CoreError::Conflict(_))));

    // A racing insert that skips the pre-check still hits the index.
    let raced = sqlx::query(
        "INSERT INTO members (user_id, first_name, last_name, email) \
         VALUES ('user_3', 'Lydia', 'Purple', 'LYDIA@example.org')",
    )
    .execute(&pool)
    .await
    .unwrap_err();
    let constraint = raced.as_database_error().and_then(|e| e.constraint());
    assert_eq!(constraint, Some("uq_members_email"));
}

// ---------------------------------------------------------------------------
// Prayer requests and live stream
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_public_prayer_requests_hide_private(pool: PgPool) {
    let repo = PgPrayerRequestRepository::new(pool);
    let form = |name: &str, is_private: bool| CreatePrayerRequest {
        name: name.to_string(),
        email: "someone@example.com".to_string(),
        request_text: "Please pray for healing.".to_string(),
        is_private,
    };
    let open = repo.submit(None, &form("Anna", false)).await.unwrap();
    let private = repo.submit(None, &form("Ben", true)).await.unwrap();
    repo.approve(open.id).await.unwrap();
    repo.approve(private.id).await.unwrap();

    let public = repo.list_public(Pagination::default()).await.unwrap();
    assert_eq!(public.total_count, 1);
    assert_eq!(public.items[0].name, "Anna");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_live_stream_settings_update(pool: PgPool) {
    let repo = PgLiveStreamRepository::new(pool);
    let before = repo.settings().await.unwrap();
    assert_eq!(before.resolution, "1080p");

    let patch = UpdateLiveStreamSettings {
        resolution: Some("720p".to_string()),
        ..Default::default()
    };
    let after = repo.update_settings(&patch).await.unwrap();
    assert_eq!(after.resolution, "720p");
    assert_eq!(after.stream_id, before.stream_id);
}

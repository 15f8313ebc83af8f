//! Sample sermons and events for demo instances.

use chapel_core::content::STATUS_PUBLISHED;
use chapel_core::types::Timestamp;
use chrono::{DateTime, Duration, Utc};

use crate::models::event::Event;
use crate::models::sermon::Sermon;

fn sermon_date(raw: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[allow(clippy::too_many_arguments)]
fn sermon(
    id: i64,
    title: &str,
    slug: &str,
    description: &str,
    date: &str,
    speaker: &str,
    series: Option<&str>,
    tags: &[&str],
    view_count: i64,
) -> Sermon {
    let date = sermon_date(date);
    Sermon {
        id,
        title: title.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
        content: String::new(),
        scripture_reference: String::new(),
        speaker: speaker.to_string(),
        date,
        video_url: None,
        audio_url: Some(format!("https://example.com/sermons/{slug}.mp3")),
        image_url: None,
        series: series.map(ToString::to_string),
        tags: tags.iter().map(ToString::to_string).collect(),
        status: STATUS_PUBLISHED.to_string(),
        view_count,
        download_count: 0,
        created_at: date,
        updated_at: date,
    }
}

pub(super) fn sermons() -> Vec<Sermon> {
    vec![
        sermon(
            1,
            "Finding Peace in Troubled Times",
            "finding-peace-in-troubled-times",
            "How to find God's peace when life gets difficult.",
            "2023-04-16T10:00:00Z",
            "Pastor John Smith",
            Some("Peace That Passes Understanding"),
            &["peace", "faith", "trust"],
            1245,
        ),
        sermon(
            2,
            "The Power of Prayer",
            "the-power-of-prayer",
            "Discovering how prayer can transform your life and circumstances.",
            "2023-04-09T10:00:00Z",
            "Pastor John Smith",
            Some("Prayer Warriors"),
            &["prayer", "spiritual disciplines"],
            987,
        ),
        sermon(
            3,
            "Living with Purpose",
            "living-with-purpose",
            "Understanding God's purpose for your life and how to live it out.",
            "2023-04-02T10:00:00Z",
            "Pastor Sarah Johnson",
            None,
            &["purpose", "calling", "mission"],
            756,
        ),
    ]
}

/// Events are dated relative to `now` so they stay upcoming.
pub(super) fn events(now: Timestamp) -> Vec<Event> {
    vec![
        Event {
            id: 1,
            title: "Sunday Worship Service".to_string(),
            slug: "sunday-worship-service".to_string(),
            description: "Join us for worship, prayer, and teaching from God's Word.".to_string(),
            content: None,
            start_date: now + Duration::days(3),
            end_date: None,
            time_label: Some("9:00 AM & 11:00 AM".to_string()),
            location: Some("Main Sanctuary".to_string()),
            image_url: None,
            category: Some("Worship".to_string()),
            is_recurring: true,
            registration_required: false,
            max_attendees: None,
            created_at: now,
            updated_at: now,
        },
        Event {
            id: 2,
            title: "Youth Group Meeting".to_string(),
            slug: "youth-group-meeting".to_string(),
            description: "Games, worship, and small groups for students in grades 6-12."
                .to_string(),
            content: None,
            start_date: now + Duration::days(5),
            end_date: None,
            time_label: Some("6:00 PM - 8:00 PM".to_string()),
            location: Some("Youth Center".to_string()),
            image_url: None,
            category: Some("Youth".to_string()),
            is_recurring: true,
            registration_required: false,
            max_attendees: None,
            created_at: now,
            updated_at: now,
        },
        Event {
            id: 3,
            title: "Community Outreach Day".to_string(),
            slug: "community-outreach-day".to_string(),
            description: "Serve our neighbors through local service projects.".to_string(),
            content: None,
            start_date: now + Duration::days(12),
            end_date: Some(now + Duration::days(12) + Duration::hours(5)),
            time_label: Some("9:00 AM - 2:00 PM".to_string()),
            location: Some("Meet at Church Parking Lot".to_string()),
            image_url: None,
            category: Some("Outreach".to_string()),
            is_recurring: false,
            registration_required: true,
            max_attendees: Some(50),
            created_at: now,
            updated_at: now,
        },
    ]
}

pub mod dashboard;
pub mod events;
pub mod live_stream;
pub mod members;
pub mod prayer_requests;
pub mod sermons;

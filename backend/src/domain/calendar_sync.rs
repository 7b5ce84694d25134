//! External calendar integration.
//!
//! Tasks can be mirrored to a hosted calendar. The only client shipped is
//! [`MockCalendarSync`], which checks that credentials look plausible and
//! then stays disabled: it never signs in and only logs the event calls it
//! would make.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::Task;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

const PLACEHOLDER_CLIENT_ID: &str = "your_google_client_id_here";
const PLACEHOLDER_API_KEY: &str = "your_google_api_key_here";
const CLIENT_ID_DOMAIN: &str = ".apps.googleusercontent.com";
const API_KEY_PREFIX: &str = "AIzaSy";

/// An event created on the remote calendar
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
}

#[async_trait]
pub trait CalendarSync: Send + Sync {
    /// Whether credentials are configured for the current host
    fn is_available(&self) -> bool;

    /// Set the client up. Only the first call does any work.
    async fn initialize(&self) -> bool;

    fn is_signed_in(&self) -> bool;

    async fn sign_in(&self) -> bool;

    async fn sign_out(&self);

    async fn create_event(&self, task: &Task) -> anyhow::Result<CalendarEvent>;

    async fn update_event(&self, event_id: &str, task: &Task) -> anyhow::Result<CalendarEvent>;

    async fn delete_event(&self, event_id: &str) -> anyhow::Result<bool>;

    async fn list_events(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> anyhow::Result<Vec<CalendarEvent>>;
}

pub struct MockCalendarSync {
    client_id: Option<String>,
    api_key: Option<String>,
    public_host: String,
    initialization_attempted: AtomicBool,
    available_for_use: AtomicBool,
}

impl MockCalendarSync {
    pub fn new(client_id: Option<String>, api_key: Option<String>, public_host: impl Into<String>) -> Self {
        Self {
            client_id,
            api_key,
            public_host: public_host.into(),
            initialization_attempted: AtomicBool::new(false),
            available_for_use: AtomicBool::new(false),
        }
    }

    fn has_valid_credentials(&self) -> bool {
        match (&self.client_id, &self.api_key) {
            (Some(client_id), Some(api_key)) => {
                client_id != PLACEHOLDER_CLIENT_ID
                    && api_key != PLACEHOLDER_API_KEY
                    && client_id.contains(CLIENT_ID_DOMAIN)
                    && api_key.starts_with(API_KEY_PREFIX)
            }
            _ => false,
        }
    }
}

#[async_trait]
impl CalendarSync for MockCalendarSync {
    fn is_available(&self) -> bool {
        let valid = self.has_valid_credentials();

        if valid && self.public_host == "localhost" {
            warn!("Calendar API credentials detected but sync is disabled on localhost");
            return false;
        }
        valid
    }

    async fn initialize(&self) -> bool {
        if self.initialization_attempted.swap(true, Ordering::SeqCst) {
            return self.available_for_use.load(Ordering::SeqCst);
        }

        if !self.is_available() {
            warn!("Calendar sync not available or not properly configured");
            return false;
        }

        info!("Calendar sync initialization skipped: no remote client is wired in");
        self.available_for_use.store(false, Ordering::SeqCst);
        false
    }

    fn is_signed_in(&self) -> bool {
        false
    }

    async fn sign_in(&self) -> bool {
        warn!("Calendar sign-in is disabled for the mock client");
        false
    }

    async fn sign_out(&self) {
        info!("Calendar sign-out (mock client)");
    }

    async fn create_event(&self, task: &Task) -> anyhow::Result<CalendarEvent> {
        info!("Mock: would create calendar event for task: {}", task.text);
        Ok(CalendarEvent {
            id: format!("mock_event_{}", Utc::now().timestamp_millis()),
        })
    }

    async fn update_event(&self, event_id: &str, task: &Task) -> anyhow::Result<CalendarEvent> {
        info!("Mock: would update calendar event {} for task: {}", event_id, task.text);
        Ok(CalendarEvent {
            id: event_id.to_string(),
        })
    }

    async fn delete_event(&self, event_id: &str) -> anyhow::Result<bool> {
        info!("Mock: would delete calendar event: {}", event_id);
        Ok(true)
    }

    async fn list_events(
        &self,
        _time_min: DateTime<Utc>,
        _time_max: DateTime<Utc>,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        info!("Mock: would fetch calendar events");
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_ID: &str = "1234.apps.googleusercontent.com";
    const VALID_KEY: &str = "AIzaSyExample";

    fn sync(client_id: Option<&str>, api_key: Option<&str>, host: &str) -> MockCalendarSync {
        MockCalendarSync::new(client_id.map(String::from), api_key.map(String::from), host)
    }

    #[test]
    fn test_credentials_must_look_real() {
        assert!(!sync(None, None, "example.com").is_available());
        assert!(!sync(Some(VALID_ID), None, "example.com").is_available());
        assert!(!sync(Some("my-client"), Some(VALID_KEY), "example.com").is_available());
        assert!(!sync(Some(VALID_ID), Some("key"), "example.com").is_available());
        assert!(!sync(Some(PLACEHOLDER_CLIENT_ID), Some(PLACEHOLDER_API_KEY), "example.com").is_available());
        assert!(sync(Some(VALID_ID), Some(VALID_KEY), "example.com").is_available());
    }

    #[test]
    fn test_client_id_domain_may_appear_anywhere() {
        let padded = format!("{}/", VALID_ID);
        assert!(sync(Some(&padded), Some(VALID_KEY), "example.com").is_available());
    }

    #[test]
    fn test_disabled_on_localhost() {
        assert!(!sync(Some(VALID_ID), Some(VALID_KEY), "localhost").is_available());
    }

    #[tokio::test]
    async fn test_initialize_never_enables_mock() {
        let client = sync(Some(VALID_ID), Some(VALID_KEY), "example.com");
        assert!(!client.initialize().await);
        assert!(!client.initialize().await);
        assert!(!client.sign_in().await);
        assert!(!client.is_signed_in());
    }

    #[tokio::test]
    async fn test_event_calls_are_logged_only() {
        let client = sync(None, None, "localhost");
        let task = Task {
            id: "task::1".to_string(),
            text: "Dentist".to_string(),
            completed: false,
            created_at: Utc::now(),
            calendar_event_id: None,
        };

        let event = client.create_event(&task).await.unwrap();
        assert!(event.id.starts_with("mock_event_"));
        assert_eq!(client.update_event("evt", &task).await.unwrap().id, "evt");
        assert!(client.delete_event("evt").await.unwrap());
        assert!(client.list_events(Utc::now(), Utc::now()).await.unwrap().is_empty());
    }
}

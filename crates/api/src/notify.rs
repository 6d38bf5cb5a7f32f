//! Webhook delivery for appointment notifications.
//!
//! Implements the narrow notification contract: each delivery reports
//! success as a boolean, and callers only log failures. Delivery
//! happens strictly after the database commit, so a dead webhook can
//! never roll back a booking.

use async_trait::async_trait;
use bookline_core::notify::{AppointmentNotice, Notifier};
use serde::Serialize;
use tracing::{debug, error};

#[derive(Debug, Serialize)]
struct WebhookEvent<'a> {
    event: &'a str,
    appointment: &'a AppointmentNotice,
}

/// Posts appointment events as JSON to a configured webhook endpoint.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    async fn deliver(&self, event: &str, notice: &AppointmentNotice) -> bool {
        let body = WebhookEvent {
            event,
            appointment: notice,
        };

        match self.client.post(&self.url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(
                    "Delivered '{}' notification for appointment ID {}",
                    event, notice.id
                );
                true
            }
            Ok(response) => {
                error!(
                    "Webhook returned {} for '{}' notification of appointment ID {}",
                    response.status(),
                    event,
                    notice.id
                );
                false
            }
            Err(err) => {
                error!(
                    "Webhook delivery failed for '{}' notification of appointment ID {}: {}",
                    event, notice.id, err
                );
                false
            }
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn appointment_created(&self, notice: &AppointmentNotice) -> bool {
        self.deliver("created", notice).await
    }

    async fn appointment_updated(&self, notice: &AppointmentNotice) -> bool {
        self.deliver("updated", notice).await
    }

    async fn appointment_cancelled(&self, notice: &AppointmentNotice) -> bool {
        self.deliver("cancelled", notice).await
    }
}

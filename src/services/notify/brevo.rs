use anyhow::Context;
use async_trait::async_trait;

use super::Notifier;
use crate::models::Booking;

const API_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// Transactional email over the Brevo HTTP API.
pub struct BrevoMailer {
    api_key: String,
    from_email: String,
    operator_email: String,
    client: reqwest::Client,
}

impl BrevoMailer {
    pub fn new(api_key: String, from_email: String, operator_email: String) -> Self {
        Self {
            api_key,
            from_email,
            operator_email,
            client: reqwest::Client::new(),
        }
    }

    async fn send(&self, to: &str, subject: &str, html: &str) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "sender": { "email": self.from_email, "name": "Mountline Installs" },
            "to": [{ "email": to }],
            "subject": subject,
            "htmlContent": html,
        });

        self.client
            .post(API_URL)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to reach Brevo")?
            .error_for_status()
            .context("Brevo API returned error")?;

        Ok(())
    }

    async fn send_pair(
        &self,
        booking: &Booking,
        customer_subject: String,
        operator_subject: String,
        summary: String,
    ) -> anyhow::Result<()> {
        let customer_html = format!(
            "<h2>Hi {},</h2><p>{summary}</p>\
             <p><strong>{}</strong> at <strong>{}</strong><br>{}, {}, {} {}</p>\
             <p>Booking #{}</p>",
            booking.name,
            booking.preferred_date,
            booking.appointment_time,
            booking.street_address,
            booking.city,
            booking.state,
            booking.zip_code,
            booking.id,
        );
        self.send(&booking.email, &customer_subject, &customer_html)
            .await?;

        if !self.operator_email.is_empty() {
            let operator_html = format!(
                "<p>{summary}</p>\
                 <p><strong>{}</strong> — {} / {}</p>\
                 <p>{} at {}<br>{}, {}, {} {}</p>\
                 <p>Estimate: ${}<br>Notes: {}</p>",
                booking.name,
                booking.email,
                booking.phone,
                booking.preferred_date,
                booking.appointment_time,
                booking.street_address,
                booking.city,
                booking.state,
                booking.zip_code,
                booking.pricing_total.as_deref().unwrap_or("-"),
                booking.notes.as_deref().unwrap_or("-"),
            );
            self.send(&self.operator_email, &operator_subject, &operator_html)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for BrevoMailer {
    async fn booking_confirmed(&self, booking: &Booking) -> anyhow::Result<()> {
        self.send_pair(
            booking,
            format!("Confirmed: your installation on {}", booking.preferred_date),
            format!(
                "New job: {} — ${}",
                booking.name,
                booking.pricing_total.as_deref().unwrap_or("?")
            ),
            "Your installation appointment is confirmed.".to_string(),
        )
        .await
    }

    async fn booking_cancelled(&self, booking: &Booking) -> anyhow::Result<()> {
        self.send_pair(
            booking,
            format!("Cancelled: installation on {}", booking.preferred_date),
            format!("Cancelled job: {}", booking.name),
            "Your installation appointment has been cancelled.".to_string(),
        )
        .await
    }

    async fn booking_rescheduled(&self, booking: &Booking) -> anyhow::Result<()> {
        self.send_pair(
            booking,
            format!("Rescheduled: installation now on {}", booking.preferred_date),
            format!("Rescheduled job: {}", booking.name),
            "Your installation appointment has been moved.".to_string(),
        )
        .await
    }
}

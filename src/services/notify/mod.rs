pub mod brevo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::Booking;

/// Outbound email seam. Implementations send a customer copy and an
/// operator copy per event; callers treat every method as best-effort.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn booking_confirmed(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn booking_cancelled(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn booking_rescheduled(&self, booking: &Booking) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy)]
pub enum Event {
    Confirmed,
    Cancelled,
    Rescheduled,
}

/// Fire-and-forget dispatch from request handlers. A failed send is
/// logged and swallowed: a booking must never look failed because an
/// email bounced.
pub fn dispatch(notifier: Arc<dyn Notifier>, event: Event, booking: Booking) {
    tokio::spawn(async move {
        let result = match event {
            Event::Confirmed => notifier.booking_confirmed(&booking).await,
            Event::Cancelled => notifier.booking_cancelled(&booking).await,
            Event::Rescheduled => notifier.booking_rescheduled(&booking).await,
        };
        if let Err(e) = result {
            tracing::warn!("notification ({event:?}) failed for booking {}: {e:#}", booking.id);
        }
    });
}

/// Stand-in for local runs without email credentials.
pub struct NoopMailer;

#[async_trait]
impl Notifier for NoopMailer {
    async fn booking_confirmed(&self, booking: &Booking) -> anyhow::Result<()> {
        tracing::debug!("skipping confirmation email for booking {}", booking.id);
        Ok(())
    }

    async fn booking_cancelled(&self, booking: &Booking) -> anyhow::Result<()> {
        tracing::debug!("skipping cancellation email for booking {}", booking.id);
        Ok(())
    }

    async fn booking_rescheduled(&self, booking: &Booking) -> anyhow::Result<()> {
        tracing::debug!("skipping reschedule email for booking {}", booking.id);
        Ok(())
    }
}

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::notify::Notifier;
use crate::store::BookingStore;

pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub notifier: Arc<dyn Notifier>,
    pub config: AppConfig,
}

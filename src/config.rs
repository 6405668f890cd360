use std::env;

use crate::models::SlotTable;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_passcode: String,
    pub slot_table: SlotTable,
    pub next_slot_window_days: u32,
    pub brevo_api_key: String,
    pub email_from: String,
    pub operator_email: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let slot_table = match env::var("SLOT_TABLE") {
            Ok(json) => match SlotTable::from_json(&json) {
                Ok(table) => table,
                Err(e) => {
                    tracing::warn!("ignoring invalid SLOT_TABLE: {e:#}");
                    SlotTable::default()
                }
            },
            Err(_) => SlotTable::default(),
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "mountline.db".to_string()),
            admin_passcode: env::var("ADMIN_PASSCODE").unwrap_or_else(|_| "changeme".to_string()),
            slot_table,
            next_slot_window_days: env::var("NEXT_SLOT_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(14),
            brevo_api_key: env::var("BREVO_API_KEY").unwrap_or_default(),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "bookings@mountline.example".to_string()),
            operator_email: env::var("OPERATOR_EMAIL").unwrap_or_default(),
        }
    }
}

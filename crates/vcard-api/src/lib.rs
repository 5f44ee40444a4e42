pub mod health;
pub mod users;

use std::sync::Arc;

use vcard_db::RecordService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub service: RecordService,
}

//! Chain handlers: logging, user sync, dialog.

mod dialog_handler;
mod logging;
mod user_sync;

pub use dialog_handler::DialogHandler;
pub use logging::LoggingHandler;
pub use user_sync::UserSyncHandler;

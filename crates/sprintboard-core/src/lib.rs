pub mod api;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod drag;
pub mod error;
pub mod forms;
pub mod state;
pub mod sync;
pub mod views;

#[cfg(test)]
mod test_support;

pub use api::{
  Routes,
  TaskApi
};
pub use cache::EntityCache;
pub use config::ClientConfig;
pub use error::{
  ApiError,
  ConfigError,
  FormError
};
pub use state::AppState;
pub use sync::{
  Outcome,
  Refresh,
  RefreshScope,
  SyncClient
};

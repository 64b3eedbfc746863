pub mod reload_sync;

pub use reload_sync::ReloadSyncJob;

pub mod settings;

pub use settings::{CollectionSettings, DatabaseSettings, ServerSettings, Settings, StoreBackend};

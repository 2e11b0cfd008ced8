pub mod settings;

pub use settings::{AppConfig, MetricsSettings, ProviderSettings};

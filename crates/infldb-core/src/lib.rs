pub mod app_config;
pub mod config;
pub mod filter;
pub mod listing;
pub mod performance;
pub mod platform;
pub mod profile;
pub mod sources;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{apply_filter, Filterable, ProfileFilter, DEFAULT_MAX_FOLLOWERS};
pub use listing::{InfluencerListing, PlatformAccount};
pub use performance::{
    analyze_trends, percent_change, summarize, MonthlyPerformance, PerformanceSummary, Trends,
};
pub use platform::{Platform, PLATFORM_ID_SPAN};
pub use profile::{CompositeId, Profile, ProfileKey, ProfileSet, PLACEHOLDER_IMAGE_BASE};
pub use sources::{
    load_sources, load_sources_or_default, parse_sources, ColumnOverrides, SourceConfig,
    SourcesFile,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[source] serde_yaml::Error),

    #[error("sources validation error: {0}")]
    Validation(String),
}

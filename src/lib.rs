pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::http::HttpMoopRepository;
pub use adapters::storage::{LocalStorage, TheaterSettingsStore};
pub use app::search::{SearchFailure, SearchViewModel};
pub use app::settings::{SettingsFailure, SettingsViewModel, MAX_MY_THEATERS};
pub use config::MoopConfig;
pub use domain::model::{
    Area, AreaGroup, CodeGroup, CodeResponse, Movie, Provider, SearchContentsUiModel,
    SettingsUiModel, Theater,
};
pub use domain::ports::{ConfigProvider, MoopRepository, Storage};
pub use utils::error::{MoopError, Result};

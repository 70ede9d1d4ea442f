use crate::adapters::storage::TheaterSettingsStore;
use crate::app::scope::ViewModelScope;
use crate::domain::model::{SettingsUiModel, Theater};
use crate::domain::ports::Storage;
use crate::utils::error::{ErrorCategory, ErrorSeverity, MoopError, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

/// Upper bound of theaters a user can keep in "my theaters".
pub const MAX_MY_THEATERS: usize = 10;

const FAILURE_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct SettingsFailure {
    pub message: String,
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub occurred_at: DateTime<Utc>,
}

impl From<SettingsFailure> for MoopError {
    fn from(failure: SettingsFailure) -> Self {
        MoopError::RequestFailed {
            message: failure.message,
            category: failure.category,
            severity: failure.severity,
        }
    }
}

/// State holder of the "my theaters" settings screen.
pub struct SettingsViewModel<S: Storage + 'static> {
    store: Arc<TheaterSettingsStore<S>>,
    ui_model: Arc<watch::Sender<Option<SettingsUiModel>>>,
    failures: broadcast::Sender<SettingsFailure>,
    scope: ViewModelScope,
}

fn check_selection(theaters: &[Theater]) -> Result<()> {
    if theaters.len() > MAX_MY_THEATERS {
        return Err(MoopError::ValidationError {
            message: format!(
                "At most {} theaters can be selected, got {}",
                MAX_MY_THEATERS,
                theaters.len()
            ),
        });
    }
    Ok(())
}

impl<S: Storage + 'static> SettingsViewModel<S> {
    pub fn new(store: TheaterSettingsStore<S>) -> Self {
        let (ui_model, _) = watch::channel(None);
        let (failures, _) = broadcast::channel(FAILURE_CHANNEL_CAPACITY);
        Self {
            store: Arc::new(store),
            ui_model: Arc::new(ui_model),
            failures,
            scope: ViewModelScope::new(),
        }
    }

    pub fn ui_model(&self) -> watch::Receiver<Option<SettingsUiModel>> {
        self.ui_model.subscribe()
    }

    pub fn failures(&self) -> broadcast::Receiver<SettingsFailure> {
        self.failures.subscribe()
    }

    /// Publishes the saved theaters.
    pub fn load(&self) {
        let store = Arc::clone(&self.store);
        self.run(async move { store.load().await });
    }

    /// Saves `theaters` as the new selection and publishes it.
    pub fn select_theaters(&self, theaters: Vec<Theater>) {
        let store = Arc::clone(&self.store);
        self.run(async move {
            check_selection(&theaters)?;
            store.save(&theaters).await?;
            Ok(theaters)
        });
    }

    fn run<F>(&self, work: F)
    where
        F: std::future::Future<Output = Result<Vec<Theater>>> + Send + 'static,
    {
        let ui_model = Arc::clone(&self.ui_model);
        let failures = self.failures.clone();
        let scope = self.scope.clone();

        self.scope.launch(async move {
            match work.await {
                Ok(theaters) => {
                    tracing::debug!("Publishing {} selected theater(s)", theaters.len());
                    scope.publish(|| {
                        ui_model.send_replace(Some(SettingsUiModel { theaters }));
                    });
                }
                Err(e) => {
                    tracing::warn!("❌ Theater settings update failed: {}", e);
                    let failure = SettingsFailure {
                        message: e.user_friendly_message(),
                        category: e.category(),
                        severity: e.severity(),
                        occurred_at: Utc::now(),
                    };
                    scope.publish(|| {
                        let _ = failures.send(failure);
                    });
                }
            }
        });
    }

    pub fn clear(&self) {
        self.scope.clear();
    }
}

impl<S: Storage + 'static> Drop for SettingsViewModel<S> {
    fn drop(&mut self) {
        self.scope.clear();
    }
}

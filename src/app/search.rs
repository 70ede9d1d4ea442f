use crate::app::scope::ViewModelScope;
use crate::domain::model::SearchContentsUiModel;
use crate::domain::ports::MoopRepository;
use crate::utils::error::{ErrorCategory, ErrorSeverity, MoopError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

const FAILURE_CHANNEL_CAPACITY: usize = 16;

/// A search whose repository call failed. The published snapshot is left
/// untouched when this is emitted.
#[derive(Debug, Clone)]
pub struct SearchFailure {
    pub query: String,
    pub message: String,
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub occurred_at: DateTime<Utc>,
}

impl From<SearchFailure> for MoopError {
    fn from(failure: SearchFailure) -> Self {
        MoopError::RequestFailed {
            message: failure.message,
            category: failure.category,
            severity: failure.severity,
        }
    }
}

/// Search screen state holder.
///
/// Every `search_for` call spawns its own task; overlapping calls are not
/// cancelled or ordered, so the call that completes last decides the
/// published snapshot.
pub struct SearchViewModel<R: MoopRepository + 'static> {
    repository: Arc<R>,
    ui_model: Arc<watch::Sender<Option<SearchContentsUiModel>>>,
    failures: broadcast::Sender<SearchFailure>,
    scope: ViewModelScope,
}

impl<R: MoopRepository + 'static> SearchViewModel<R> {
    pub fn new(repository: Arc<R>) -> Self {
        let (ui_model, _) = watch::channel(None);
        let (failures, _) = broadcast::channel(FAILURE_CHANNEL_CAPACITY);
        Self {
            repository,
            ui_model: Arc::new(ui_model),
            failures,
            scope: ViewModelScope::new(),
        }
    }

    /// Latest snapshot, `None` until the first search completes.
    pub fn ui_model(&self) -> watch::Receiver<Option<SearchContentsUiModel>> {
        self.ui_model.subscribe()
    }

    pub fn failures(&self) -> broadcast::Receiver<SearchFailure> {
        self.failures.subscribe()
    }

    /// Starts a search for `query`. The query is passed to the repository
    /// as is. Outside a Tokio runtime the call is logged and ignored.
    pub fn search_for(&self, query: impl Into<String>) {
        let query = query.into();
        let repository = Arc::clone(&self.repository);
        let ui_model = Arc::clone(&self.ui_model);
        let failures = self.failures.clone();
        let scope = self.scope.clone();

        tracing::debug!("🔍 Searching for '{}'", query);
        self.scope.launch(async move {
            match repository.search_movie(&query).await {
                Ok(movies) => {
                    let snapshot = SearchContentsUiModel::new(movies);
                    let count = snapshot.movies.len();
                    let published = scope.publish(|| {
                        ui_model.send_replace(Some(snapshot));
                    });
                    if published {
                        tracing::debug!("Published {} movie(s) for '{}'", count, query);
                    }
                }
                Err(e) => {
                    tracing::warn!("❌ Search for '{}' failed: {}", query, e);
                    let failure = SearchFailure {
                        query,
                        message: e.user_friendly_message(),
                        category: e.category(),
                        severity: e.severity(),
                        occurred_at: Utc::now(),
                    };
                    scope.publish(|| {
                        // 沒有訂閱者時忽略
                        let _ = failures.send(failure);
                    });
                }
            }
        });
    }

    pub fn is_searching(&self) -> bool {
        self.scope.in_flight() > 0
    }

    /// Ends the view model's scope. In-flight searches are aborted and
    /// nothing is published afterwards.
    pub fn clear(&self) {
        self.scope.clear();
    }
}

impl<R: MoopRepository + 'static> Drop for SearchViewModel<R> {
    fn drop(&mut self) {
        self.scope.clear();
    }
}

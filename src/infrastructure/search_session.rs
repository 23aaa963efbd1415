use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use anyhow::anyhow;
use log::{debug, info};
use tokio::{
    sync::Mutex,
    task::{AbortHandle, JoinHandle},
};

use crate::{Dashboard, DashboardRenderer, ProfileSearch, SearchError, StdResult};

/// The outcome of a submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The dashboard was rendered.
    Displayed,

    /// The search failed and the message was shown.
    Failed(String),

    /// A newer search started before this one completed.
    Superseded,
}

/// A handle on a submitted search.
#[derive(Debug)]
pub struct SearchHandle {
    generation: u64,
    handle: JoinHandle<StdResult<SearchOutcome>>,
}

impl SearchHandle {
    /// Retrieves the generation of the search.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits for the search to complete.
    pub async fn wait(self) -> StdResult<SearchOutcome> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Ok(SearchOutcome::Superseded),
            Err(e) => Err(anyhow!("Search #{} panicked: {e}", self.generation)),
        }
    }
}

struct SessionShared {
    search: Arc<dyn ProfileSearch>,
    renderer: Arc<dyn DashboardRenderer>,
    generation: AtomicU64,
    // Kept outside `display`: a running search holds that lock while it renders.
    in_flight: Mutex<Option<AbortHandle>>,
    display: Mutex<Option<Dashboard>>,
}

impl SessionShared {
    async fn run(&self, generation: u64, username: String) -> StdResult<SearchOutcome> {
        let result = self.search.search(&username).await;

        let mut display = self.display.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale search #{generation} for {username}");
            return Ok(SearchOutcome::Superseded);
        }
        let outcome = match result {
            Ok(dashboard) => {
                self.renderer
                    .render_profile(
                        &dashboard.profile,
                        dashboard.total_stars,
                        &dashboard.top_repositories,
                    )
                    .await?;
                self.renderer
                    .render_charts(&dashboard.languages, &dashboard.star_ranking)
                    .await?;
                *display = Some(dashboard);
                info!("Search #{generation} for {username} displayed");

                SearchOutcome::Displayed
            }
            Err(e) => {
                let message = e.to_string();
                self.renderer.show_error(&message).await?;
                info!("Search #{generation} for {username} failed: {message}");

                SearchOutcome::Failed(message)
            }
        };
        self.renderer.hide_loading().await?;

        Ok(outcome)
    }

    async fn cancel_in_flight(&self) {
        if let Some(previous) = self.in_flight.lock().await.take() {
            if !previous.is_finished() {
                debug!("Cancelling search #{}", self.generation.load(Ordering::SeqCst));
            }
            previous.abort();
        }
    }
}

/// Runs user searches, one at a time: a new search cancels the one in flight.
pub struct SearchSession {
    shared: Arc<SessionShared>,
}

impl SearchSession {
    /// Creates a new `SearchSession` instance with the given search and renderer.
    pub fn new(search: Arc<dyn ProfileSearch>, renderer: Arc<dyn DashboardRenderer>) -> Self {
        Self {
            shared: Arc::new(SessionShared {
                search,
                renderer,
                generation: AtomicU64::new(0),
                in_flight: Mutex::new(None),
                display: Mutex::new(None),
            }),
        }
    }

    /// Starts a search for the given username.
    ///
    /// Returns `None` if the username is blank, after showing the error.
    /// Otherwise the previous search is cancelled, the previous dashboard is hidden
    /// and the new search runs in the background.
    pub async fn submit(&self, username: &str) -> StdResult<Option<SearchHandle>> {
        let username = username.trim().to_string();
        if username.is_empty() {
            self.shared
                .renderer
                .show_error(&SearchError::EmptyUsername.to_string())
                .await?;
            return Ok(None);
        }

        // The aborted search releases the display lock at its next await point.
        self.shared.cancel_in_flight().await;
        let mut display = self.shared.display.lock().await;
        self.shared.cancel_in_flight().await;
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *display = None;
        self.shared.renderer.show_loading().await?;
        self.shared.renderer.hide_error().await?;
        self.shared.renderer.hide_profile().await?;

        info!("Starting search #{generation} for {username}");
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move { shared.run(generation, username).await });
        *self.shared.in_flight.lock().await = Some(handle.abort_handle());

        Ok(Some(SearchHandle { generation, handle }))
    }

    /// Retrieves the generation of the latest search.
    pub fn current_generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }

    /// Retrieves the dashboard currently displayed, if any.
    pub async fn current_dashboard(&self) -> Option<Dashboard> {
        self.shared.display.lock().await.clone()
    }
}

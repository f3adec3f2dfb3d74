//! Shared application state wrapping the tracker

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{
    ElementDeletion, ElementId, ProjectDeletion, ProjectId, StateError, TimerState, TimerTransition, Tracker,
    TrackerView,
};

/// Outcome of one intent together with the state it produced
#[derive(Debug, Clone)]
pub struct IntentResult<T> {
    pub outcome: T,
    pub tracker: TrackerView,
}

/// Main application state. Every intent and every tick goes through the one
/// tracker lock, so they apply one at a time in arrival order.
#[derive(Debug)]
pub struct AppState {
    pub tracker: Arc<Mutex<Tracker>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer updates, consumed by the tick task
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState holding an empty, idle tracker
    pub fn new(port: u16, host: String) -> Self {
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());

        Self {
            tracker: Arc::new(Mutex::new(Tracker::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    fn lock_tracker(&self) -> Result<MutexGuard<'_, Tracker>, StateError> {
        self.tracker.lock().map_err(StateError::poisoned)
    }

    /// Apply an intent to the tracker, record it and publish the new timer state
    pub fn apply<T, F>(&self, action: &str, intent: F) -> Result<IntentResult<T>, StateError>
    where
        F: FnOnce(&mut Tracker) -> T,
    {
        let mut tracker = self.lock_tracker()?;
        let outcome = intent(&mut *tracker);
        let view = TrackerView::from_tracker(&tracker);

        // Published under the lock so watchers never see states out of order
        self.publish_timer_state(TimerState::from_tracker(&tracker));
        drop(tracker);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(IntentResult {
            outcome,
            tracker: view,
        })
    }

    fn publish_timer_state(&self, timer_state: TimerState) {
        if let Err(e) = self.timer_update_tx.send(timer_state) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    pub fn create_project(&self, name: &str) -> Result<IntentResult<Option<ProjectId>>, StateError> {
        let result = self.apply("create-project", |tracker| tracker.create_project(name))?;
        match result.outcome {
            Some(id) => info!("Created project {} ({:?})", id, name.trim()),
            None => debug!("Ignored create-project with blank name"),
        }
        Ok(result)
    }

    pub fn create_element(
        &self,
        project_id: ProjectId,
        name: &str,
    ) -> Result<IntentResult<Option<ElementId>>, StateError> {
        let result = self.apply("create-element", |tracker| tracker.create_element(project_id, name))?;
        match result.outcome {
            Some(id) => info!("Created element {} ({:?}) in project {}", id, name.trim(), project_id),
            None => debug!("Ignored create-element for project {}", project_id),
        }
        Ok(result)
    }

    pub fn start_or_stop_timer(
        &self,
        project_id: ProjectId,
        element_id: Option<ElementId>,
    ) -> Result<IntentResult<TimerTransition>, StateError> {
        let result = self.apply("toggle-timer", |tracker| {
            tracker.start_or_stop_timer(project_id, element_id)
        })?;
        match result.outcome {
            TimerTransition::Started { target } => info!("Started timer for {}", target),
            TimerTransition::Stopped { target, committed } => {
                info!("Stopped timer for {}, committed {}s", target, committed)
            }
            TimerTransition::Switched {
                previous,
                committed,
                target,
            } => info!("Switched timer from {} ({}s committed) to {}", previous, committed, target),
            TimerTransition::Ignored => debug!("Ignored timer toggle for unknown target"),
        }
        Ok(result)
    }

    pub fn delete_project(
        &self,
        project_id: ProjectId,
    ) -> Result<IntentResult<Option<ProjectDeletion>>, StateError> {
        let result = self.apply("delete-project", |tracker| tracker.delete_project(project_id))?;
        match &result.outcome {
            Some(deletion) => {
                info!("Deleted project {} ({:?})", project_id, deletion.name);
                if let Some(ticks) = deletion.discarded_ticks {
                    warn!("Discarded {}s of running time with project {}", ticks, project_id);
                }
            }
            None => debug!("Ignored delete of unknown project {}", project_id),
        }
        Ok(result)
    }

    pub fn delete_element(
        &self,
        project_id: ProjectId,
        element_id: ElementId,
    ) -> Result<IntentResult<Option<ElementDeletion>>, StateError> {
        let result = self.apply("delete-element", |tracker| {
            tracker.delete_element(project_id, element_id)
        })?;
        match &result.outcome {
            Some(deletion) => {
                info!(
                    "Deleted element {} ({:?}) from project {}, subtracted {}s",
                    element_id, deletion.name, project_id, deletion.subtracted
                );
                if let Some(ticks) = deletion.discarded_ticks {
                    warn!("Discarded {}s of running time with element {}", ticks, element_id);
                }
            }
            None => debug!("Ignored delete of unknown element {} in project {}", element_id, project_id),
        }
        Ok(result)
    }

    pub fn toggle_expanded(&self, project_id: ProjectId) -> Result<IntentResult<Option<bool>>, StateError> {
        let result = self.apply("toggle-expanded", |tracker| tracker.toggle_expanded(project_id))?;
        if result.outcome.is_none() {
            debug!("Ignored expand toggle for unknown project {}", project_id);
        }
        Ok(result)
    }

    /// Advance the tick counter for `run_id`. Returns the new count, or None if
    /// that run is no longer the running one.
    pub fn tick(&self, run_id: u64) -> Result<Option<u64>, StateError> {
        let mut tracker = self.lock_tracker()?;
        let ticked = tracker.tick_run(run_id);
        if ticked.is_some() {
            self.publish_timer_state(TimerState::from_tracker(&tracker));
        }
        Ok(ticked)
    }

    /// Subscribe to timer state changes
    pub fn subscribe_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, StateError> {
        self.lock_tracker().map(|tracker| TimerState::from_tracker(&tracker))
    }

    /// Get a display snapshot of the tracker
    pub fn get_view(&self) -> Result<TrackerView, StateError> {
        self.lock_tracker().map(|tracker| TrackerView::from_tracker(&tracker))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

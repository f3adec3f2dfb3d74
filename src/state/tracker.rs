//! Project and timer state engine
//!
//! All state lives in one [`Tracker`]. Intents never fail: an intent that
//! names a blank name or an unknown project/element leaves the state
//! untouched and reports that it was ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{ActiveTimer, Element, ElementId, Project, ProjectId};

/// Result of a start-or-stop intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimerTransition {
    /// Idle -> Running
    Started { target: ActiveTimer },
    /// Running -> Idle, ticks committed to the target
    Stopped { target: ActiveTimer, committed: u64 },
    /// Running -> Running with a different target, ticks committed to `previous`
    Switched {
        previous: ActiveTimer,
        committed: u64,
        target: ActiveTimer,
    },
    /// Target does not exist
    Ignored,
}

impl TimerTransition {
    pub fn is_ignored(&self) -> bool {
        matches!(self, TimerTransition::Ignored)
    }
}

/// A removed project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDeletion {
    pub name: String,
    /// Uncommitted ticks dropped because a timer under the project was running
    pub discarded_ticks: Option<u64>,
}

/// A removed element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDeletion {
    pub name: String,
    /// Committed time taken off the owning project's total
    pub subtracted: u64,
    /// Uncommitted ticks dropped because the element's timer was running
    pub discarded_ticks: Option<u64>,
}

/// The whole tracking state: projects, the single active timer, the tick
/// counter and the per-project expanded flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracker {
    projects: Vec<Project>,
    active_timer: Option<ActiveTimer>,
    tick_count: u64,
    expanded: BTreeMap<ProjectId, bool>,
    /// Bumped every time a timer starts, identifies one Running period
    run_id: u64,
    next_project_id: u64,
    next_element_id: u64,
}

impl Tracker {
    /// Create an idle tracker with no projects
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            active_timer: None,
            tick_count: 0,
            expanded: BTreeMap::new(),
            run_id: 0,
            next_project_id: 1,
            next_element_id: 1,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, project_id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    pub fn active_timer(&self) -> Option<ActiveTimer> {
        self.active_timer
    }

    pub fn is_running(&self) -> bool {
        self.active_timer.is_some()
    }

    /// Seconds elapsed since the active timer started, 0 when idle
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn expanded(&self) -> &BTreeMap<ProjectId, bool> {
        &self.expanded
    }

    pub fn is_expanded(&self, project_id: ProjectId) -> bool {
        self.expanded.get(&project_id).copied().unwrap_or(false)
    }

    /// Append a new empty project. Blank names are ignored.
    pub fn create_project(&mut self, name: &str) -> Option<ProjectId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let id = ProjectId::new(self.next_project_id);
        self.next_project_id += 1;
        self.projects.push(Project::new(id, name));
        self.expanded.insert(id, true);
        Some(id)
    }

    /// Append a new element to an existing project. Blank names and unknown
    /// projects are ignored.
    pub fn create_element(&mut self, project_id: ProjectId, name: &str) -> Option<ElementId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let id = ElementId::new(self.next_element_id);
        let project = self.project_mut(project_id)?;
        project.elements.push(Element::new(id, name));
        self.next_element_id += 1;
        Some(id)
    }

    /// Stop the timer if `(project_id, element_id)` is the running target,
    /// otherwise start it, committing whatever timer was running before.
    pub fn start_or_stop_timer(
        &mut self,
        project_id: ProjectId,
        element_id: Option<ElementId>,
    ) -> TimerTransition {
        let target = ActiveTimer {
            project_id,
            element_id,
        };
        if !self.target_exists(target) {
            return TimerTransition::Ignored;
        }

        if self.active_timer == Some(target) {
            return match self.commit_and_clear() {
                Some((target, committed)) => TimerTransition::Stopped { target, committed },
                None => TimerTransition::Ignored,
            };
        }

        let previous = self.commit_and_clear();
        self.begin_timer(target);

        match previous {
            Some((previous, committed)) => TimerTransition::Switched {
                previous,
                committed,
                target,
            },
            None => TimerTransition::Started { target },
        }
    }

    /// Remove a project with all its elements. A timer running anywhere in
    /// the project is discarded without committing its ticks.
    pub fn delete_project(&mut self, project_id: ProjectId) -> Option<ProjectDeletion> {
        let index = self.projects.iter().position(|p| p.id == project_id)?;

        let discarded_ticks = match self.active_timer {
            Some(active) if active.project_id == project_id => Some(self.discard_timer()),
            _ => None,
        };

        let project = self.projects.remove(index);
        self.expanded.remove(&project_id);

        Some(ProjectDeletion {
            name: project.name,
            discarded_ticks,
        })
    }

    /// Remove an element and take its committed time off the project total.
    /// The element's timer, if running, is discarded without committing.
    pub fn delete_element(
        &mut self,
        project_id: ProjectId,
        element_id: ElementId,
    ) -> Option<ElementDeletion> {
        let index = self
            .project(project_id)?
            .elements
            .iter()
            .position(|el| el.id == element_id)?;

        let discarded_ticks = if self.active_timer == Some(ActiveTimer::element(project_id, element_id)) {
            Some(self.discard_timer())
        } else {
            None
        };

        let project = self.project_mut(project_id)?;
        let element = project.elements.remove(index);
        // total_time >= element.time holds because every element commit also
        // lands in the project total
        project.total_time = project.total_time.saturating_sub(element.time);

        Some(ElementDeletion {
            name: element.name,
            subtracted: element.time,
            discarded_ticks,
        })
    }

    /// Flip the expanded flag of a project, returning the new value
    pub fn toggle_expanded(&mut self, project_id: ProjectId) -> Option<bool> {
        self.project(project_id)?;
        let flag = self.expanded.entry(project_id).or_insert(false);
        *flag = !*flag;
        Some(*flag)
    }

    /// Advance the tick counter by one second while running
    pub fn tick(&mut self) -> Option<u64> {
        self.active_timer?;
        self.tick_count += 1;
        Some(self.tick_count)
    }

    /// Like [`Tracker::tick`], but only for the given run. Ticks scheduled for
    /// an earlier run are dropped.
    pub fn tick_run(&mut self, run_id: u64) -> Option<u64> {
        if run_id != self.run_id {
            return None;
        }
        self.tick()
    }

    /// Committed project total plus live ticks when the project-level timer
    /// of this project is running
    pub fn project_display_time(&self, project_id: ProjectId) -> Option<u64> {
        let project = self.project(project_id)?;
        Some(project.total_time + self.live_ticks_for(ActiveTimer::project(project_id)))
    }

    /// Committed element time plus live ticks when this element's timer is
    /// running
    pub fn element_display_time(&self, project_id: ProjectId, element_id: ElementId) -> Option<u64> {
        let element = self.project(project_id)?.element(element_id)?;
        Some(element.time + self.live_ticks_for(ActiveTimer::element(project_id, element_id)))
    }

    pub(crate) fn live_ticks_for(&self, target: ActiveTimer) -> u64 {
        if self.active_timer == Some(target) {
            self.tick_count
        } else {
            0
        }
    }

    fn project_mut(&mut self, project_id: ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == project_id)
    }

    fn target_exists(&self, target: ActiveTimer) -> bool {
        match (self.project(target.project_id), target.element_id) {
            (Some(project), Some(element_id)) => project.element(element_id).is_some(),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Commit the running timer's ticks into its target and go idle
    fn commit_and_clear(&mut self) -> Option<(ActiveTimer, u64)> {
        let target = self.active_timer.take()?;
        let committed = std::mem::take(&mut self.tick_count);

        if let Some(project) = self.project_mut(target.project_id) {
            if let Some(element_id) = target.element_id {
                if let Some(element) = project.element_mut(element_id) {
                    element.time += committed;
                }
            }
            project.total_time += committed;
        }

        Some((target, committed))
    }

    fn begin_timer(&mut self, target: ActiveTimer) {
        self.active_timer = Some(target);
        self.tick_count = 0;
        self.run_id += 1;
    }

    /// Go idle dropping the pending ticks
    fn discard_timer(&mut self) -> u64 {
        self.active_timer = None;
        std::mem::take(&mut self.tick_count)
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

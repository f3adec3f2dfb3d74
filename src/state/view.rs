//! Read-only snapshot of the tracker for renderers

use serde::{Deserialize, Serialize};

use super::{
    model::{ActiveTimer, ElementId, ProjectId},
    tracker::Tracker,
};
use crate::utils::format_hms;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementView {
    pub id: ElementId,
    pub name: String,
    /// Committed seconds
    pub time: u64,
    /// Committed seconds plus live ticks if this element is running
    pub display_time: u64,
    pub display: String,
    pub running: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectView {
    pub id: ProjectId,
    pub name: String,
    pub expanded: bool,
    /// Committed seconds
    pub total_time: u64,
    /// Committed seconds plus live ticks if the project-level timer is running
    pub display_time: u64,
    pub display: String,
    pub running: bool,
    pub elements: Vec<ElementView>,
}

/// Everything a renderer needs for one frame. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerView {
    pub projects: Vec<ProjectView>,
    pub active_timer: Option<ActiveTimer>,
    pub tick_count: u64,
}

impl TrackerView {
    pub fn from_tracker(tracker: &Tracker) -> Self {
        let active = tracker.active_timer();

        let projects = tracker
            .projects()
            .iter()
            .map(|project| {
                let project_target = ActiveTimer::project(project.id);
                let display_time = project.total_time + tracker.live_ticks_for(project_target);

                let elements = project
                    .elements
                    .iter()
                    .map(|element| {
                        let target = ActiveTimer::element(project.id, element.id);
                        let display_time = element.time + tracker.live_ticks_for(target);
                        ElementView {
                            id: element.id,
                            name: element.name.clone(),
                            time: element.time,
                            display_time,
                            display: format_hms(display_time),
                            running: active == Some(target),
                        }
                    })
                    .collect();

                ProjectView {
                    id: project.id,
                    name: project.name.clone(),
                    expanded: tracker.is_expanded(project.id),
                    total_time: project.total_time,
                    display_time,
                    display: format_hms(display_time),
                    running: active == Some(project_target),
                    elements,
                }
            })
            .collect();

        Self {
            projects,
            active_timer: active,
            tick_count: tracker.tick_count(),
        }
    }

    pub fn project(&self, project_id: ProjectId) -> Option<&ProjectView> {
        self.projects.iter().find(|p| p.id == project_id)
    }
}

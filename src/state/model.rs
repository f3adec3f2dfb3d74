//! Project, element and timer target value types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a project, unique for the lifetime of a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identifier of an element, unique across all projects of a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A named sub-task of a project with its own committed time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    /// Committed seconds
    pub time: u64,
}

impl Element {
    pub fn new(id: ElementId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            time: 0,
        }
    }
}

/// A top-level trackable unit.
///
/// `total_time` accumulates every commit made under the project, both
/// project-level runs and element runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub elements: Vec<Element>,
    /// Committed seconds
    pub total_time: u64,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            elements: Vec::new(),
            total_time: 0,
        }
    }

    pub fn element(&self, element_id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == element_id)
    }

    pub fn element_mut(&mut self, element_id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == element_id)
    }
}

/// The target the running timer is scoped to.
///
/// Two targets are the same only if both the project and the
/// element-or-absence match, so the project-level timer and an element timer
/// of the same project are different targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveTimer {
    pub project_id: ProjectId,
    pub element_id: Option<ElementId>,
}

impl ActiveTimer {
    pub fn project(project_id: ProjectId) -> Self {
        Self {
            project_id,
            element_id: None,
        }
    }

    pub fn element(project_id: ProjectId, element_id: ElementId) -> Self {
        Self {
            project_id,
            element_id: Some(element_id),
        }
    }
}

impl fmt::Display for ActiveTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.element_id {
            Some(element_id) => write!(f, "project {} / element {}", self.project_id, element_id),
            None => write!(f, "project {}", self.project_id),
        }
    }
}

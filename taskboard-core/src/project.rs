// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::{ProjectId, TeamId};

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("project start date {start} must fall before its end date {end}")]
    StartNotBeforeEnd { start: u64, end: u64 },
}

/// Lifecycle status of a project.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planned,
    Active,
    Completed,
    Archived,
    Deleted,
}

impl ProjectStatus {
    pub fn is_deleted(&self) -> bool {
        matches!(self, ProjectStatus::Deleted)
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProjectStatus::Planned => "planned",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
            ProjectStatus::Deleted => "deleted",
        };

        write!(f, "{}", s)
    }
}

/// A project owned by a team, carrying a schedule window.
///
/// The schedule invariant `start_date < end_date` holds for every
/// constructed project; both timestamps are UNIX seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub team_id: TeamId,
    pub name: String,
    pub status: ProjectStatus,
    pub start_date: u64,
    pub end_date: u64,
}

impl Project {
    /// Construct a new project in `Planned` status.
    ///
    /// Fails when the schedule window is empty or inverted.
    pub fn new(
        id: ProjectId,
        team_id: TeamId,
        name: impl Into<String>,
        start_date: u64,
        end_date: u64,
    ) -> Result<Self, ScheduleError> {
        if start_date >= end_date {
            return Err(ScheduleError::StartNotBeforeEnd {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            id,
            team_id,
            name: name.into(),
            status: ProjectStatus::Planned,
            start_date,
            end_date,
        })
    }

    /// Move the schedule window, re-checking the schedule invariant.
    pub fn reschedule(&mut self, start_date: u64, end_date: u64) -> Result<(), ScheduleError> {
        if start_date >= end_date {
            return Err(ScheduleError::StartNotBeforeEnd {
                start: start_date,
                end: end_date,
            });
        }

        self.start_date = start_date;
        self.end_date = end_date;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_window_must_not_be_inverted_or_empty() {
        let result = Project::new(ProjectId::new(1), TeamId::new(1), "launch", 200, 100);
        assert!(matches!(
            result,
            Err(ScheduleError::StartNotBeforeEnd { .. })
        ));

        let result = Project::new(ProjectId::new(1), TeamId::new(1), "launch", 100, 100);
        assert!(matches!(
            result,
            Err(ScheduleError::StartNotBeforeEnd { .. })
        ));
    }

    #[test]
    fn new_projects_start_planned() {
        let project = Project::new(ProjectId::new(1), TeamId::new(1), "launch", 100, 200).unwrap();
        assert_eq!(project.status, ProjectStatus::Planned);
    }

    #[test]
    fn reschedule_re_checks_the_invariant() {
        let mut project =
            Project::new(ProjectId::new(1), TeamId::new(1), "launch", 100, 200).unwrap();

        assert!(project.reschedule(300, 200).is_err());
        // Failed reschedules leave the window untouched.
        assert_eq!((project.start_date, project.end_date), (100, 200));

        project.reschedule(150, 400).unwrap();
        assert_eq!((project.start_date, project.end_date), (150, 400));
    }
}

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{DepartmentColumn, Report, UNASSIGNED};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("no column named {0}")]
    UnknownColumn(String),
    #[error("report {report_id} is not in the {department} column")]
    ReportNotInColumn {
        report_id: String,
        department: String,
    },
}

/// Correlates an optimistic local move with the eventual persist result.
/// The epoch is bumped on every local move of the report, so a late
/// response from an earlier move can be recognized and discarded.
#[derive(Debug, Clone)]
pub struct MoveTicket {
    pub id: Uuid,
    pub report_id: String,
    pub department: String,
    pub epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The persist call confirmed the column the board already shows.
    Applied,
    /// A later local move of the same report made this result stale.
    Superseded,
    /// The persist call failed; the board must be rebuilt from the store.
    NeedsResync,
}

/// Partitions the report list into one column per department, preserving
/// input order. Every report lands in exactly one column; anything with a
/// missing, empty, or unrecognized assignment goes to the sentinel column.
pub fn partition(reports: &[Report], departments: &[String]) -> Vec<DepartmentColumn> {
    let mut columns: Vec<DepartmentColumn> = departments
        .iter()
        .map(|d| DepartmentColumn {
            department: d.clone(),
            reports: Vec::new(),
        })
        .collect();

    for report in reports {
        let department = report
            .assigned_department
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(UNASSIGNED);
        let idx = columns
            .iter()
            .position(|c| c.department == department)
            .or_else(|| columns.iter().position(|c| c.department == UNASSIGNED));
        if let Some(idx) = idx {
            columns[idx].reports.push(report.clone());
        }
    }

    columns
}

#[derive(Debug, Default)]
pub struct Board {
    columns: Vec<DepartmentColumn>,
    move_epochs: HashMap<String, u64>,
    epoch_counter: u64,
    loaded: bool,
}

impl Board {
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn columns(&self) -> &[DepartmentColumn] {
        &self.columns
    }

    /// Replaces the whole partition from an authoritative report list.
    /// Outstanding move tickets become stale: the fetched list already
    /// reflects whatever the store accepted.
    pub fn replace(&mut self, reports: &[Report], departments: &[String]) {
        self.columns = partition(reports, departments);
        self.move_epochs.clear();
        self.loaded = true;
    }

    pub fn column_of(&self, report_id: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.reports.iter().any(|r| r.id == report_id))
            .map(|c| c.department.as_str())
    }

    /// A drop over a card targets that card's column; a drop over a known
    /// department name targets that column; anything else is ignored.
    pub fn resolve_drop_target(&self, over_id: &str, departments: &[String]) -> Option<String> {
        if let Some(department) = self.column_of(over_id) {
            return Some(department.to_string());
        }
        if departments.iter().any(|d| d == over_id) {
            return Some(over_id.to_string());
        }
        None
    }

    /// Applies an optimistic local move. Returns `Ok(None)` when source and
    /// destination are the same column (nothing to do, nothing to persist).
    pub fn move_report(
        &mut self,
        report_id: &str,
        from: &str,
        to: &str,
    ) -> Result<Option<MoveTicket>, BoardError> {
        if from == to {
            return Ok(None);
        }

        let from_idx = self
            .columns
            .iter()
            .position(|c| c.department == from)
            .ok_or_else(|| BoardError::UnknownColumn(from.to_string()))?;
        let report_idx = self.columns[from_idx]
            .reports
            .iter()
            .position(|r| r.id == report_id)
            .ok_or_else(|| BoardError::ReportNotInColumn {
                report_id: report_id.to_string(),
                department: from.to_string(),
            })?;

        let mut report = self.columns[from_idx].reports.remove(report_idx);
        report.assigned_department = Some(to.to_string());

        // The destination may never have been initialized (a department
        // added to the list after the last partition).
        let to_idx = match self.columns.iter().position(|c| c.department == to) {
            Some(idx) => idx,
            None => {
                self.columns.push(DepartmentColumn {
                    department: to.to_string(),
                    reports: Vec::new(),
                });
                self.columns.len() - 1
            }
        };
        self.columns[to_idx].reports.push(report);

        self.epoch_counter += 1;
        self.move_epochs
            .insert(report_id.to_string(), self.epoch_counter);

        Ok(Some(MoveTicket {
            id: Uuid::new_v4(),
            report_id: report_id.to_string(),
            department: to.to_string(),
            epoch: self.epoch_counter,
        }))
    }

    /// Settles a persist result against the ticket's epoch. Only the
    /// latest-issued move of a report is authoritative.
    pub fn complete_move(&mut self, ticket: &MoveTicket, persisted: bool) -> MoveOutcome {
        match self.move_epochs.get(&ticket.report_id) {
            Some(&current) if current == ticket.epoch => {
                if persisted {
                    self.move_epochs.remove(&ticket.report_id);
                    MoveOutcome::Applied
                } else {
                    MoveOutcome::NeedsResync
                }
            }
            _ => MoveOutcome::Superseded,
        }
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use log::{info, warn};

use crate::api::FeeApi;
use crate::errors::SelectionError;
use crate::models::StudentFeeSummary;
use crate::notify::Notifier;
use crate::request::{Refresh, RequestState, SubmitOutcome};

const STUDENTS_FAILED: &str = "Failed to load student fee summary";
const TRACKING_FAILED: &str = "Failed to enable monthly tracking";

/// Student fee summary plus the request state of each row, keyed by student id.
#[derive(Debug, Clone, Default)]
pub struct StudentTable {
    pub session_year: String,
    pub rows: Vec<StudentFeeSummary>,
    row_state: HashMap<i64, RequestState>,
}

impl StudentTable {
    pub fn new(session_year: &str) -> Self {
        Self {
            session_year: session_year.to_string(),
            ..Default::default()
        }
    }

    /// Replace the rows with a fresh copy from the service. Row states survive.
    pub fn refresh<A, N>(&mut self, api: &A, notifier: &mut N) -> bool
    where
        A: FeeApi + ?Sized,
        N: Notifier,
    {
        match api.list_students(&self.session_year) {
            Ok(rows) => {
                if rows.is_empty() {
                    notifier.info(format!("No students found for session {}", self.session_year));
                }
                self.rows = rows;
                true
            }
            Err(e) => {
                notifier.error(e.display_message(STUDENTS_FAILED));
                false
            }
        }
    }

    pub fn row_state(&self, student_id: i64) -> RequestState {
        self.row_state.get(&student_id).cloned().unwrap_or_default()
    }

    pub fn find(&self, student_id: i64) -> Option<&StudentFeeSummary> {
        self.rows.iter().find(|r| r.student_id == student_id)
    }

    pub fn enable_tracking<A, N>(&mut self, api: &A, student_id: i64, notifier: &mut N) -> SubmitOutcome
    where
        A: FeeApi + ?Sized,
        N: Notifier,
    {
        if self.row_state(student_id).is_loading() {
            notifier.warning(SelectionError::Busy.to_string());
            return SubmitOutcome::Blocked;
        }
        if self.find(student_id).is_some_and(|r| r.monthly_tracking_enabled) {
            notifier.info("Monthly tracking is already enabled for this student");
            return SubmitOutcome::Blocked;
        }
        self.row_state.insert(student_id, RequestState::Loading);
        match api.enable_monthly_tracking(student_id, &self.session_year) {
            Ok(resp) => {
                info!("monthly tracking enabled for student {}", student_id);
                self.row_state.insert(student_id, RequestState::Success);
                notifier.success(resp.message.clone());
                // the table re-fetches itself; nothing left for the caller
                self.refresh(api, notifier);
                SubmitOutcome::Completed {
                    message: resp.message,
                    refresh: Vec::new(),
                }
            }
            Err(e) => {
                warn!("monthly tracking for student {} failed: {}", student_id, e);
                let msg = e.display_message(TRACKING_FAILED);
                self.row_state
                    .insert(student_id, RequestState::Error(msg.clone()));
                notifier.error(msg.clone());
                SubmitOutcome::Failed(msg)
            }
        }
    }

    /// Re-fetch whatever a completed dialog asked for that this table owns.
    pub fn apply_refresh<A, N>(&mut self, api: &A, refresh: &[Refresh], notifier: &mut N)
    where
        A: FeeApi + ?Sized,
        N: Notifier,
    {
        if refresh.contains(&Refresh::StudentSummary) {
            self.refresh(api, notifier);
        }
    }
}

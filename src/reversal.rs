// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Full and partial reversal of a recorded payment.
//!
//! A partial reversal must name a strict, non-empty subset of the payment's
//! month allocations. Reversing every allocation goes through the full
//! reversal endpoint instead.

use std::collections::BTreeSet;

use log::{info, warn};
use rust_decimal::Decimal;

use crate::api::{ApiResult, FeeApi};
use crate::errors::SelectionError;
use crate::models::{
    FullReversalRequest, MessageResponse, MonthAllocation, PartialReversalRequest, PaymentRecord,
};
use crate::notify::Notifier;
use crate::request::{Refresh, RequestState, SubmitOutcome};

const REVERSAL_FAILED: &str = "Failed to reverse payment";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReversalAction {
    Full,
    Partial,
}

impl ReversalAction {
    pub fn label(&self) -> &'static str {
        match self {
            ReversalAction::Full => "Full Reversal",
            ReversalAction::Partial => "Partial Reversal (Select Months)",
        }
    }
}

/// Actions offered in the row menu of a historical payment.
pub fn reversal_actions(payment: &PaymentRecord) -> Vec<ReversalAction> {
    if payment.is_reversed {
        return Vec::new();
    }
    match payment.allocations.len() {
        0 | 1 => vec![ReversalAction::Full],
        _ => vec![ReversalAction::Full, ReversalAction::Partial],
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReversalPhase {
    #[default]
    Idle,
    AllocationsLoaded,
    Selecting,
    Submitting,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct ReversalSelection {
    pub student_id: i64,
    pub payment_id: i64,
    allocations: Vec<MonthAllocation>,
    pub selected: BTreeSet<i64>,
    pub reason_id: Option<i64>,
    pub details: String,
    pub phase: ReversalPhase,
}

impl ReversalSelection {
    pub fn new(student_id: i64) -> Self {
        Self {
            student_id,
            ..Default::default()
        }
    }

    /// Start a fresh selection over the allocations of `payment`.
    pub fn load(&mut self, payment: &PaymentRecord) {
        self.payment_id = payment.id;
        self.allocations = payment.allocations.clone();
        self.selected.clear();
        self.reason_id = None;
        self.details.clear();
        self.phase = ReversalPhase::AllocationsLoaded;
    }

    pub fn allocations(&self) -> &[MonthAllocation] {
        &self.allocations
    }

    /// `Idle`, `Submitting` and `Success` are left alone; only `load` reopens.
    fn editing(&mut self) {
        if !matches!(
            self.phase,
            ReversalPhase::Idle | ReversalPhase::Submitting | ReversalPhase::Success
        ) {
            self.phase = ReversalPhase::Selecting;
        }
    }

    pub fn toggle_allocation(&mut self, id: i64) {
        if !self.allocations.iter().any(|a| a.id == id) {
            return;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.editing();
    }

    pub fn select_all(&mut self) {
        self.selected = self.allocations.iter().map(|a| a.id).collect();
        self.editing();
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
        self.editing();
    }

    pub fn set_reason(&mut self, id: i64) {
        self.reason_id = Some(id);
        self.editing();
    }

    pub fn set_details(&mut self, text: &str) {
        self.details = text.to_string();
        self.editing();
    }

    pub fn total(&self) -> Decimal {
        self.allocations
            .iter()
            .filter(|a| self.selected.contains(&a.id))
            .map(|a| a.allocated_amount)
            .sum()
    }

    pub fn validate(&self) -> Result<PartialReversalRequest, SelectionError> {
        let reason_id = valid_reason(self.reason_id)?;
        if self.selected.is_empty() {
            return Err(SelectionError::NoAllocations);
        }
        if self.selected.len() >= self.allocations.len() {
            return Err(SelectionError::AllAllocations);
        }
        Ok(PartialReversalRequest {
            allocation_ids: self.selected.iter().copied().collect(),
            reason_id,
            details: non_blank(&self.details),
        })
    }

    pub fn submit<A, N>(&mut self, api: &A, notifier: &mut N) -> SubmitOutcome
    where
        A: FeeApi + ?Sized,
        N: Notifier,
    {
        match self.phase {
            ReversalPhase::Submitting => {
                notifier.warning(SelectionError::Busy.to_string());
                return SubmitOutcome::Blocked;
            }
            ReversalPhase::Success => {
                notifier.warning(SelectionError::AlreadySubmitted.to_string());
                return SubmitOutcome::Blocked;
            }
            _ => {}
        }
        let req = match self.validate() {
            Ok(r) => r,
            Err(e) => {
                warn!("partial reversal of payment {} blocked: {}", self.payment_id, e);
                notifier.warning(e.to_string());
                return SubmitOutcome::Blocked;
            }
        };
        self.phase = ReversalPhase::Submitting;
        info!(
            "reversing {} of payment {} ({} of {} allocations)",
            self.total(),
            self.payment_id,
            req.allocation_ids.len(),
            self.allocations.len()
        );
        let result = api.reverse_payment_partial(self.payment_id, &req);
        let (outcome, phase) = finish(result, self.student_id, notifier);
        self.phase = match phase {
            RequestState::Success => {
                self.selected.clear();
                self.reason_id = None;
                self.details.clear();
                ReversalPhase::Success
            }
            RequestState::Error(msg) => ReversalPhase::Error(msg),
            _ => ReversalPhase::Selecting,
        };
        outcome
    }
}

/// The simpler sibling flow: reverse the whole payment.
#[derive(Debug, Clone)]
pub struct FullReversal {
    pub student_id: i64,
    pub payment_id: i64,
    pub reason_id: Option<i64>,
    pub details: String,
    pub request: RequestState,
}

impl FullReversal {
    pub fn new(student_id: i64, payment_id: i64) -> Self {
        Self {
            student_id,
            payment_id,
            reason_id: None,
            details: String::new(),
            request: RequestState::Idle,
        }
    }

    pub fn set_reason(&mut self, id: i64) {
        self.reason_id = Some(id);
    }

    pub fn set_details(&mut self, text: &str) {
        self.details = text.to_string();
    }

    pub fn validate(&self) -> Result<FullReversalRequest, SelectionError> {
        Ok(FullReversalRequest {
            reason_id: valid_reason(self.reason_id)?,
            details: non_blank(&self.details),
        })
    }

    pub fn submit<A, N>(&mut self, api: &A, notifier: &mut N) -> SubmitOutcome
    where
        A: FeeApi + ?Sized,
        N: Notifier,
    {
        match self.request {
            RequestState::Loading => {
                notifier.warning(SelectionError::Busy.to_string());
                return SubmitOutcome::Blocked;
            }
            RequestState::Success => {
                notifier.warning(SelectionError::AlreadySubmitted.to_string());
                return SubmitOutcome::Blocked;
            }
            _ => {}
        }
        let req = match self.validate() {
            Ok(r) => r,
            Err(e) => {
                warn!("full reversal of payment {} blocked: {}", self.payment_id, e);
                notifier.warning(e.to_string());
                return SubmitOutcome::Blocked;
            }
        };
        self.request = RequestState::Loading;
        info!("reversing payment {} in full", self.payment_id);
        let result = api.reverse_payment_full(self.payment_id, &req);
        let (outcome, state) = finish(result, self.student_id, notifier);
        if state == RequestState::Success {
            self.reason_id = None;
            self.details.clear();
        }
        self.request = state;
        outcome
    }
}

fn valid_reason(reason_id: Option<i64>) -> Result<i64, SelectionError> {
    reason_id.filter(|id| *id != 0).ok_or(SelectionError::NoReason)
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

fn finish<N: Notifier>(
    result: ApiResult<MessageResponse>,
    student_id: i64,
    notifier: &mut N,
) -> (SubmitOutcome, RequestState) {
    match result {
        Ok(resp) => {
            notifier.success(resp.message.clone());
            (
                SubmitOutcome::Completed {
                    message: resp.message,
                    refresh: vec![Refresh::PaymentHistory(student_id), Refresh::StudentSummary],
                },
                RequestState::Success,
            )
        }
        Err(e) => {
            warn!("reversal for student {} failed: {}", student_id, e);
            let msg = e.display_message(REVERSAL_FAILED);
            notifier.error(msg.clone());
            (SubmitOutcome::Failed(msg.clone()), RequestState::Error(msg))
        }
    }
}

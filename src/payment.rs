// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month selection and submission for recording a fee payment.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use log::{info, warn};
use rust_decimal::Decimal;

use crate::api::FeeApi;
use crate::errors::SelectionError;
use crate::models::{AvailableMonth, AvailableMonths, PaymentMethod, PaymentRequest};
use crate::notify::Notifier;
use crate::request::{Refresh, RequestState, SubmitOutcome};
use crate::utils::{fmt_money, parse_decimal};

pub const DEFAULT_REMARKS: &str = "Monthly fee payment";
const PAYMENT_FAILED: &str = "Failed to record payment";
const MONTHS_FAILED: &str = "Failed to load available months";

/// Client state behind the payment dialog.
///
/// `amount` is rewritten from the selected balances on every toggle, even if
/// the operator typed a different figure in between.
#[derive(Debug, Clone, Default)]
pub struct PaymentSelection {
    balances: BTreeMap<u32, Decimal>,
    pub selected_months: BTreeSet<u32>,
    pub amount: String,
    pub payment_method_id: Option<i64>,
    pub transaction_id: String,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayment {
    pub amount: Decimal,
    pub months: Vec<u32>,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub remarks: Option<String>,
}

impl PaymentSelection {
    pub fn new(months: &[AvailableMonth]) -> Self {
        Self {
            balances: months.iter().map(|m| (m.month, m.balance_amount)).collect(),
            ..Default::default()
        }
    }

    pub fn toggle_month(&mut self, month: u32) {
        if !self.balances.contains_key(&month) {
            return;
        }
        if !self.selected_months.remove(&month) {
            self.selected_months.insert(month);
        }
        self.amount = if self.selected_months.is_empty() {
            String::new()
        } else {
            fmt_money(&self.total_balance())
        };
    }

    pub fn set_amount(&mut self, value: &str) {
        self.amount = value.to_string();
    }

    pub fn set_payment_method(&mut self, id: i64) {
        self.payment_method_id = Some(id);
    }

    pub fn set_transaction_id(&mut self, value: &str) {
        self.transaction_id = value.to_string();
    }

    pub fn set_remarks(&mut self, value: &str) {
        self.remarks = value.to_string();
    }

    pub fn reset(&mut self) {
        self.selected_months.clear();
        self.amount.clear();
        self.payment_method_id = None;
        self.transaction_id.clear();
        self.remarks.clear();
    }

    pub fn total_balance(&self) -> Decimal {
        self.selected_months
            .iter()
            .filter_map(|m| self.balances.get(m))
            .sum()
    }

    pub fn validate(&self, methods: &[PaymentMethod]) -> Result<ValidatedPayment, SelectionError> {
        if self.selected_months.is_empty() {
            return Err(SelectionError::NoMonths);
        }
        let amount = parse_decimal(&self.amount).map_err(|_| SelectionError::InvalidAmount)?;
        if amount <= Decimal::ZERO {
            return Err(SelectionError::InvalidAmount);
        }
        let method = self
            .payment_method_id
            .and_then(|id| methods.iter().find(|m| m.id == id))
            .ok_or(SelectionError::NoPaymentMethod)?;
        let txn = non_blank(&self.transaction_id);
        if method.requires_reference && txn.is_none() {
            return Err(SelectionError::ReferenceRequired(method.description.clone()));
        }
        Ok(ValidatedPayment {
            amount,
            months: self.selected_months.iter().copied().collect(),
            method: method.clone(),
            transaction_id: txn,
            remarks: non_blank(&self.remarks),
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

impl ValidatedPayment {
    pub fn into_request(self, session_year: &str, now: DateTime<Utc>) -> PaymentRequest {
        PaymentRequest {
            amount: self.amount,
            payment_method_id: self.method.id,
            selected_months: self.months,
            session_year: session_year.to_string(),
            transaction_id: self
                .transaction_id
                .unwrap_or_else(|| format!("TXN{}", now.timestamp_millis())),
            remarks: self.remarks.unwrap_or_else(|| DEFAULT_REMARKS.to_string()),
        }
    }
}

pub struct PaymentDialog {
    pub student_id: i64,
    pub session_year: String,
    pub payload: AvailableMonths,
    pub selection: PaymentSelection,
    pub request: RequestState,
}

impl PaymentDialog {
    /// Fetch the unpaid months and open a fresh dialog. Returns `None` when
    /// there is nothing to pay or the fetch failed; the notifier says which.
    pub fn open<A, N>(api: &A, student_id: i64, session_year: &str, notifier: &mut N) -> Option<Self>
    where
        A: FeeApi + ?Sized,
        N: Notifier,
    {
        let payload = match api.get_available_months(student_id, session_year) {
            Ok(p) => p,
            Err(e) => {
                notifier.error(e.display_message(MONTHS_FAILED));
                return None;
            }
        };
        if payload.available_months.is_empty() {
            notifier.info("No unpaid months available for this student");
            return None;
        }
        Some(Self {
            student_id,
            session_year: session_year.to_string(),
            selection: PaymentSelection::new(&payload.available_months),
            payload,
            request: RequestState::Idle,
        })
    }

    pub fn months(&self) -> &[AvailableMonth] {
        &self.payload.available_months
    }

    pub fn submit<A, N>(
        &mut self,
        api: &A,
        methods: &[PaymentMethod],
        notifier: &mut N,
        now: DateTime<Utc>,
    ) -> SubmitOutcome
    where
        A: FeeApi + ?Sized,
        N: Notifier,
    {
        if self.request.is_loading() {
            notifier.warning(SelectionError::Busy.to_string());
            return SubmitOutcome::Blocked;
        }
        let validated = match self.selection.validate(methods) {
            Ok(v) => v,
            Err(e) => {
                warn!("payment for student {} blocked: {}", self.student_id, e);
                notifier.warning(e.to_string());
                return SubmitOutcome::Blocked;
            }
        };
        let req = validated.into_request(&self.session_year, now);

        self.request = RequestState::Loading;
        match api.make_payment(self.student_id, &req) {
            Ok(resp) => {
                info!(
                    "recorded payment of {} for student {} months {:?}",
                    req.amount, self.student_id, req.selected_months
                );
                self.request = RequestState::Success;
                self.selection.reset();
                notifier.success(resp.message.clone());
                SubmitOutcome::Completed {
                    message: resp.message,
                    refresh: vec![Refresh::StudentSummary],
                }
            }
            Err(e) => {
                warn!("payment for student {} failed: {}", self.student_id, e);
                let msg = e.display_message(PAYMENT_FAILED);
                self.request = RequestState::Error(msg.clone());
                notifier.error(msg.clone());
                SubmitOutcome::Failed(msg)
            }
        }
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::cell::RefCell;

use chrono::NaiveDate;
use feeclip::api::{ApiResult, FeeApi};
use feeclip::errors::{ApiError, ErrorDetail};
use feeclip::models::*;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListStudents(String),
    EnableTracking(i64, String),
    AvailableMonths(i64, String),
    MakePayment(i64, PaymentRequest),
    History(i64, String),
    ReverseFull(i64, FullReversalRequest),
    ReversePartial(i64, PartialReversalRequest),
    Methods,
    Reasons,
}

/// In-memory fee service that records every call.
#[derive(Default)]
pub struct FakeFeeApi {
    pub students: RefCell<Vec<StudentFeeSummary>>,
    pub months: Vec<AvailableMonth>,
    pub history: Vec<PaymentRecord>,
    pub methods: Vec<PaymentMethod>,
    pub reasons: Vec<ReversalReason>,
    pub calls: RefCell<Vec<Call>>,
    /// Returned (once) by the next mutation.
    pub fail_next: RefCell<Option<ApiError>>,
}

impl FakeFeeApi {
    pub fn new() -> Self {
        Self {
            students: RefCell::new(vec![student(7, "Asha Rao", false)]),
            months: vec![month(4, "April", "800"), month(5, "May", "800")],
            history: vec![payment(
                31,
                vec![
                    allocation(101, "April", "500"),
                    allocation(102, "May", "500"),
                    allocation(103, "June", "500"),
                ],
            )],
            methods: vec![
                PaymentMethod {
                    id: 1,
                    description: "Cash".into(),
                    requires_reference: false,
                },
                PaymentMethod {
                    id: 2,
                    description: "Bank Transfer".into(),
                    requires_reference: true,
                },
            ],
            reasons: vec![
                ReversalReason {
                    id: 9,
                    description: "Entered in error".into(),
                    is_active: true,
                },
                ReversalReason {
                    id: 10,
                    description: "Legacy".into(),
                    is_active: false,
                },
            ],
            ..Default::default()
        }
    }

    pub fn fail_with(&self, status: u16, detail: ErrorDetail) {
        *self.fail_next.borrow_mut() = Some(ApiError::Rejected { status, detail });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::MakePayment(..)
                        | Call::ReverseFull(..)
                        | Call::ReversePartial(..)
                        | Call::EnableTracking(..)
                )
            })
            .collect()
    }

    fn record(&self, c: Call) {
        self.calls.borrow_mut().push(c);
    }

    fn mutate(&self, c: Call, message: &str) -> ApiResult<MessageResponse> {
        self.record(c);
        if let Some(e) = self.fail_next.borrow_mut().take() {
            return Err(e);
        }
        Ok(MessageResponse {
            message: message.to_string(),
        })
    }
}

impl FeeApi for FakeFeeApi {
    fn list_students(&self, session_year: &str) -> ApiResult<Vec<StudentFeeSummary>> {
        self.record(Call::ListStudents(session_year.into()));
        Ok(self.students.borrow().clone())
    }

    fn enable_monthly_tracking(
        &self,
        student_id: i64,
        session_year: &str,
    ) -> ApiResult<MessageResponse> {
        let res = self.mutate(
            Call::EnableTracking(student_id, session_year.into()),
            "Monthly tracking enabled",
        );
        if res.is_ok() {
            for s in self.students.borrow_mut().iter_mut() {
                if s.student_id == student_id {
                    s.monthly_tracking_enabled = true;
                }
            }
        }
        res
    }

    fn get_available_months(
        &self,
        student_id: i64,
        session_year: &str,
    ) -> ApiResult<AvailableMonths> {
        self.record(Call::AvailableMonths(student_id, session_year.into()));
        Ok(AvailableMonths {
            student: StudentRef {
                id: student_id,
                name: "Asha Rao".into(),
                class_name: Some("5A".into()),
            },
            monthly_fee: dec("800"),
            available_months: self.months.clone(),
            summary: MonthsSummary {
                total_months: self.months.len() as u32,
                total_balance: self.months.iter().map(|m| m.balance_amount).sum(),
                overdue_months: 0,
            },
        })
    }

    fn make_payment(&self, student_id: i64, req: &PaymentRequest) -> ApiResult<MessageResponse> {
        self.mutate(
            Call::MakePayment(student_id, req.clone()),
            "Payment recorded successfully",
        )
    }

    fn get_payment_history(
        &self,
        student_id: i64,
        session_year: &str,
    ) -> ApiResult<PaymentHistory> {
        self.record(Call::History(student_id, session_year.into()));
        Ok(PaymentHistory {
            payment_history: self.history.clone(),
            summary: HistorySummary::default(),
        })
    }

    fn reverse_payment_full(
        &self,
        payment_id: i64,
        req: &FullReversalRequest,
    ) -> ApiResult<MessageResponse> {
        self.mutate(Call::ReverseFull(payment_id, req.clone()), "Payment reversed")
    }

    fn reverse_payment_partial(
        &self,
        payment_id: i64,
        req: &PartialReversalRequest,
    ) -> ApiResult<MessageResponse> {
        self.mutate(
            Call::ReversePartial(payment_id, req.clone()),
            "Selected months reversed",
        )
    }

    fn get_payment_methods(&self) -> ApiResult<Vec<PaymentMethod>> {
        self.record(Call::Methods);
        Ok(self.methods.clone())
    }

    fn get_reversal_reasons(&self) -> ApiResult<Vec<ReversalReason>> {
        self.record(Call::Reasons);
        Ok(self.reasons.clone())
    }
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn month(m: u32, name: &str, balance: &str) -> AvailableMonth {
    AvailableMonth {
        month: m,
        year: if m >= 4 { 2025 } else { 2026 },
        month_name: name.into(),
        monthly_amount: dec(balance),
        balance_amount: dec(balance),
        due_date: NaiveDate::from_ymd_opt(2025, m, 10),
        is_overdue: false,
        days_overdue: 0,
    }
}

pub fn allocation(id: i64, name: &str, amount: &str) -> MonthAllocation {
    MonthAllocation {
        id,
        month_name: name.into(),
        academic_month: 1,
        allocated_amount: dec(amount),
    }
}

pub fn payment(id: i64, allocations: Vec<MonthAllocation>) -> PaymentRecord {
    PaymentRecord {
        id,
        payment_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        amount: allocations.iter().map(|a| a.allocated_amount).sum(),
        payment_method: Some("Cash".into()),
        transaction_id: Some("TXN1".into()),
        remarks: None,
        is_reversed: false,
        allocations,
    }
}

pub fn student(id: i64, name: &str, tracking: bool) -> StudentFeeSummary {
    StudentFeeSummary {
        student_id: id,
        name: name.into(),
        class_name: Some("5A".into()),
        total_fee: dec("9600"),
        paid_amount: dec("1600"),
        balance: dec("8000"),
        collection_percentage: dec("16.7"),
        monthly_tracking_enabled: tracking,
    }
}

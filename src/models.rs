// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableMonth {
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub monthly_amount: Decimal, // after waiver
    pub balance_amount: Decimal,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_overdue: bool,
    #[serde(default)]
    pub days_overdue: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthsSummary {
    #[serde(default)]
    pub total_months: u32,
    #[serde(default)]
    pub total_balance: Decimal,
    #[serde(default)]
    pub overdue_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableMonths {
    pub student: StudentRef,
    #[serde(default)]
    pub monthly_fee: Decimal,
    #[serde(default)]
    pub available_months: Vec<AvailableMonth>,
    #[serde(default)]
    pub summary: MonthsSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub payment_method_id: i64,
    pub selected_months: Vec<u32>,
    pub session_year: String,
    pub transaction_id: String,
    pub remarks: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthAllocation {
    pub id: i64,
    pub month_name: String,
    pub academic_month: u32,
    pub allocated_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: i64,
    pub payment_date: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub is_reversed: bool,
    #[serde(default)]
    pub allocations: Vec<MonthAllocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistorySummary {
    #[serde(default)]
    pub total_paid: Decimal,
    #[serde(default)]
    pub total_reversed: Decimal,
    #[serde(default)]
    pub payment_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentHistory {
    #[serde(default)]
    pub payment_history: Vec<PaymentRecord>,
    #[serde(default)]
    pub summary: HistorySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullReversalRequest {
    pub reason_id: i64,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialReversalRequest {
    pub allocation_ids: Vec<i64>,
    pub reason_id: i64,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: i64,
    pub description: String,
    #[serde(default)]
    pub requires_reference: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReversalReason {
    pub id: i64,
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentFeeSummary {
    pub student_id: i64,
    pub name: String,
    #[serde(default)]
    pub class_name: Option<String>,
    pub total_fee: Decimal,
    pub paid_amount: Decimal,
    pub balance: Decimal,
    #[serde(default)]
    pub collection_percentage: Decimal,
    #[serde(default)]
    pub monthly_tracking_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingRequest {
    pub session_year: String,
}

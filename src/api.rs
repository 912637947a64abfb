// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the remote fee and configuration services.
//!
//! Every dialog talks to the service through [`FeeApi`], so a test double can
//! stand in for [`HttpFeeApi`].

use crate::errors::{ApiError, ErrorDetail};
use crate::models::{
    AvailableMonths, FullReversalRequest, MessageResponse, PartialReversalRequest, PaymentHistory,
    PaymentMethod, PaymentRequest, ReversalReason, StudentFeeSummary, TrackingRequest,
};
use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub trait FeeApi {
    fn list_students(&self, session_year: &str) -> ApiResult<Vec<StudentFeeSummary>>;

    fn enable_monthly_tracking(&self, student_id: i64, session_year: &str)
    -> ApiResult<MessageResponse>;

    fn get_available_months(&self, student_id: i64, session_year: &str)
    -> ApiResult<AvailableMonths>;

    fn make_payment(&self, student_id: i64, req: &PaymentRequest) -> ApiResult<MessageResponse>;

    fn get_payment_history(&self, student_id: i64, session_year: &str)
    -> ApiResult<PaymentHistory>;

    fn reverse_payment_full(
        &self,
        payment_id: i64,
        req: &FullReversalRequest,
    ) -> ApiResult<MessageResponse>;

    fn reverse_payment_partial(
        &self,
        payment_id: i64,
        req: &PartialReversalRequest,
    ) -> ApiResult<MessageResponse>;

    fn get_payment_methods(&self) -> ApiResult<Vec<PaymentMethod>>;

    fn get_reversal_reasons(&self) -> ApiResult<Vec<ReversalReason>>;
}

pub struct HttpFeeApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpFeeApi {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: crate::utils::http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, rb: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => rb.bearer_auth(t),
            None => rb,
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<T> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);
        let resp = self.authorize(self.client.get(&url).query(query)).send()?;
        parse_response(resp)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.url(path);
        debug!("POST {}", url);
        let resp = self.authorize(self.client.post(&url).json(body)).send()?;
        parse_response(resp)
    }
}

fn parse_response<T: DeserializeOwned>(resp: reqwest::blocking::Response) -> ApiResult<T> {
    let status = resp.status();
    let body = resp.text()?;
    if !status.is_success() {
        debug!("HTTP {} body: {}", status, body.chars().take(200).collect::<String>());
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            detail: ErrorDetail::from_body(&body),
        });
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl FeeApi for HttpFeeApi {
    fn list_students(&self, session_year: &str) -> ApiResult<Vec<StudentFeeSummary>> {
        self.get("/fees/students", &[("session_year", session_year)])
    }

    fn enable_monthly_tracking(
        &self,
        student_id: i64,
        session_year: &str,
    ) -> ApiResult<MessageResponse> {
        let body = TrackingRequest {
            session_year: session_year.to_string(),
        };
        self.post(
            &format!("/fees/students/{}/monthly-tracking", student_id),
            &body,
        )
    }

    fn get_available_months(
        &self,
        student_id: i64,
        session_year: &str,
    ) -> ApiResult<AvailableMonths> {
        self.get(
            &format!("/fees/students/{}/available-months", student_id),
            &[("session_year", session_year)],
        )
    }

    fn make_payment(&self, student_id: i64, req: &PaymentRequest) -> ApiResult<MessageResponse> {
        self.post(&format!("/fees/students/{}/payments", student_id), req)
    }

    fn get_payment_history(
        &self,
        student_id: i64,
        session_year: &str,
    ) -> ApiResult<PaymentHistory> {
        self.get(
            &format!("/fees/students/{}/payment-history", student_id),
            &[("session_year", session_year)],
        )
    }

    fn reverse_payment_full(
        &self,
        payment_id: i64,
        req: &FullReversalRequest,
    ) -> ApiResult<MessageResponse> {
        self.post(&format!("/fees/payments/{}/reverse", payment_id), req)
    }

    fn reverse_payment_partial(
        &self,
        payment_id: i64,
        req: &PartialReversalRequest,
    ) -> ApiResult<MessageResponse> {
        self.post(&format!("/fees/payments/{}/reverse-partial", payment_id), req)
    }

    fn get_payment_methods(&self) -> ApiResult<Vec<PaymentMethod>> {
        self.get("/configuration/payment-methods", &[])
    }

    fn get_reversal_reasons(&self) -> ApiResult<Vec<ReversalReason>> {
        self.get("/configuration/reversal-reasons", &[])
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{dec, month};
use feeclip::errors::SelectionError;
use feeclip::models::PaymentMethod;
use feeclip::payment::PaymentSelection;
use rust_decimal::Decimal;

fn methods() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod {
            id: 1,
            description: "Cash".into(),
            requires_reference: false,
        },
        PaymentMethod {
            id: 2,
            description: "Cheque".into(),
            requires_reference: true,
        },
    ]
}

#[test]
fn amount_tracks_selected_balances() {
    let mut sel = PaymentSelection::new(&[month(4, "April", "800"), month(5, "May", "800")]);
    assert_eq!(sel.amount, "");

    sel.toggle_month(4);
    assert_eq!(sel.amount, "800.00");
    sel.toggle_month(5);
    assert_eq!(sel.amount, "1600.00");
    sel.toggle_month(4);
    assert_eq!(sel.amount, "800.00");
}

#[test]
fn amount_matches_sum_after_any_toggle_sequence() {
    let months = vec![
        month(4, "April", "800"),
        month(5, "May", "650.50"),
        month(6, "June", "0.25"),
        month(7, "July", "1200"),
    ];
    let mut sel = PaymentSelection::new(&months);
    let sequence = [4, 6, 7, 4, 5, 6, 6, 7, 4, 5, 5, 7];
    for m in sequence {
        sel.toggle_month(m);
        let expected: Decimal = months
            .iter()
            .filter(|am| sel.selected_months.contains(&am.month))
            .map(|am| am.balance_amount)
            .sum();
        if sel.selected_months.is_empty() {
            assert_eq!(sel.amount, "");
        } else {
            assert_eq!(sel.amount, format!("{:.2}", expected));
            assert_eq!(sel.total_balance(), expected);
        }
    }
}

#[test]
fn deselecting_last_month_clears_amount() {
    let mut sel = PaymentSelection::new(&[month(4, "April", "800")]);
    sel.toggle_month(4);
    assert_eq!(sel.amount, "800.00");
    sel.toggle_month(4);
    assert!(sel.selected_months.is_empty());
    assert_eq!(sel.amount, "");
}

#[test]
fn unknown_month_is_ignored() {
    let mut sel = PaymentSelection::new(&[month(4, "April", "800")]);
    sel.toggle_month(11);
    assert!(sel.selected_months.is_empty());
    assert_eq!(sel.amount, "");
}

// Manual edits do not survive the next toggle; the amount always follows the selection.
#[test]
fn manual_amount_is_overwritten_by_next_toggle() {
    let mut sel = PaymentSelection::new(&[month(4, "April", "800"), month(5, "May", "800")]);
    sel.toggle_month(4);
    sel.set_amount("500");
    assert_eq!(sel.amount, "500");
    assert_eq!(sel.selected_months.len(), 1);

    sel.toggle_month(5);
    assert_eq!(sel.amount, "1600.00");
}

#[test]
fn validation_blocks_incomplete_selection() {
    let mut sel = PaymentSelection::new(&[month(4, "April", "800")]);
    sel.set_payment_method(1);
    assert_eq!(sel.validate(&methods()), Err(SelectionError::NoMonths));

    sel.toggle_month(4);
    sel.set_amount("");
    assert_eq!(sel.validate(&methods()), Err(SelectionError::InvalidAmount));
    sel.set_amount("0");
    assert_eq!(sel.validate(&methods()), Err(SelectionError::InvalidAmount));
    sel.set_amount("abc");
    assert_eq!(sel.validate(&methods()), Err(SelectionError::InvalidAmount));

    sel.set_amount("800");
    sel.payment_method_id = None;
    assert_eq!(sel.validate(&methods()), Err(SelectionError::NoPaymentMethod));
}

#[test]
fn reference_required_names_method() {
    let mut sel = PaymentSelection::new(&[month(4, "April", "800")]);
    sel.toggle_month(4);
    sel.set_payment_method(2);
    sel.set_transaction_id("   ");
    let err = sel.validate(&methods()).unwrap_err();
    assert_eq!(err, SelectionError::ReferenceRequired("Cheque".into()));
    assert_eq!(err.to_string(), "Transaction ID is required for Cheque");

    sel.set_transaction_id("CHQ-0042");
    let ok = sel.validate(&methods()).unwrap();
    assert_eq!(ok.transaction_id.as_deref(), Some("CHQ-0042"));
    assert_eq!(ok.amount, dec("800"));
    assert_eq!(ok.months, vec![4]);
}

#[test]
fn reset_clears_every_field() {
    let mut sel = PaymentSelection::new(&[month(4, "April", "800")]);
    sel.toggle_month(4);
    sel.set_payment_method(1);
    sel.set_transaction_id("X");
    sel.set_remarks("r");
    sel.reset();
    assert!(sel.selected_months.is_empty());
    assert_eq!(sel.amount, "");
    assert_eq!(sel.payment_method_id, None);
    assert_eq!(sel.transaction_id, "");
    assert_eq!(sel.remarks, "");

    // balances survive so the dialog can be reused
    sel.toggle_month(4);
    assert_eq!(sel.amount, "800.00");
}

#[test]
fn amount_is_rounded_to_cents() {
    let mut sel = PaymentSelection::new(&[month(4, "April", "0.999"), month(5, "May", "100.005")]);
    sel.toggle_month(4);
    assert_eq!(sel.amount, "1.00");
    sel.toggle_month(5);
    assert_eq!(sel.total_balance(), dec("101.004"));
    assert_eq!(sel.amount, "101.00");
}

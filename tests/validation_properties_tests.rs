//! Behavioural properties of the address rule sets
//!
//! These tests exercise the public validation API only: rule sets are taken
//! from their operations and run through `validate`.

use storefront::prelude::*;

const REQUIRED: [&str; 7] = [
    "fullName",
    "phoneNumber",
    "addressLine1",
    "city",
    "state",
    "postalCode",
    "country",
];

fn complete() -> Value {
    json!({
        "fullName": "Alan Turing",
        "phoneNumber": "01234 567890",
        "addressLine1": "Bletchley Park",
        "city": "Milton Keynes",
        "state": "Buckinghamshire",
        "postalCode": "MK3 6EB",
        "country": "UK"
    })
}

fn create(payload: Value) -> ValidationOutcome {
    validate(CreateAddress::rule_set(), payload).1
}

fn update(payload: Value) -> ValidationOutcome {
    validate(UpdateAddress::rule_set(), payload).1
}

#[test]
fn test_complete_payloads_are_valid_with_any_default_flag() {
    for flag in [None, Some(json!(true)), Some(json!(false)), Some(json!(null))] {
        let mut payload = complete();
        if let Some(flag) = flag {
            payload["isDefault"] = flag;
        }
        assert_eq!(create(payload), ValidationOutcome::Valid);
    }
}

#[test]
fn test_padded_values_are_valid_and_trimmed() {
    let mut payload = complete();
    for field in REQUIRED {
        let value = payload[field].as_str().unwrap().to_string();
        payload[field] = json!(format!("  {}\n", value));
    }

    let (normalized, outcome) = validate(CreateAddress::rule_set(), payload);
    assert!(outcome.is_valid());
    assert_eq!(normalized, complete());
}

#[test]
fn test_each_missing_field_fails_alone() {
    for field in REQUIRED {
        let mut payload = complete();
        payload.as_object_mut().unwrap().remove(field);

        let outcome = create(payload);
        assert_eq!(outcome.failures().len(), 1, "missing {}", field);
        assert_eq!(outcome.failures()[0].field, field);
    }
}

#[test]
fn test_each_null_or_blank_field_fails_alone() {
    for field in REQUIRED {
        for empty in [json!(null), json!(""), json!(" \t\n ")] {
            let mut payload = complete();
            payload[field] = empty.clone();
            assert_eq!(create(payload).failed_fields(), vec![field], "{} = {}", field, empty);
        }
    }
}

#[test]
fn test_empty_create_has_seven_failures_in_order() {
    let outcome = create(json!({}));
    let fields: Vec<&str> = outcome.failures().iter().map(|f| f.field.as_str()).collect();
    assert_eq!(fields, REQUIRED.to_vec());
}

#[test]
fn test_executor_is_idempotent_on_normalized_payloads() {
    for payload in [complete(), json!({}), json!({"fullName": "  x ", "isDefault": "nope"})] {
        let (normalized, first) = validate(CreateAddress::rule_set(), payload);
        let (again, second) = validate(CreateAddress::rule_set(), normalized.clone());
        assert_eq!(first, second);
        assert_eq!(normalized, again);
    }
}

#[test]
fn test_update_empty_payload_is_valid() {
    assert_eq!(update(json!({})), ValidationOutcome::Valid);
}

#[test]
fn test_is_default_yes_fails_in_both_rule_sets() {
    let outcome = update(json!({"isDefault": "yes"}));
    assert_eq!(outcome.failed_fields(), vec!["isDefault"]);

    let mut payload = complete();
    payload["isDefault"] = json!("yes");
    assert_eq!(create(payload).failed_fields(), vec!["isDefault"]);
}

#[test]
fn test_whitespace_full_name_is_rejected() {
    let mut payload = complete();
    payload["fullName"] = json!("   ");
    let outcome = create(payload);
    assert_eq!(
        outcome,
        ValidationOutcome::Invalid(vec![ValidationFailure::new(
            "fullName",
            "Full name is required"
        )])
    );
}

#[test]
fn test_unknown_fields_pass_through_untouched() {
    let mut payload = complete();
    payload["giftNote"] = json!("  hi  ");
    let (normalized, outcome) = validate(CreateAddress::rule_set(), payload);
    assert!(outcome.is_valid());
    assert_eq!(normalized["giftNote"], "  hi  ");
}

#[test]
fn test_concurrent_evaluations_are_independent() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let payload = if i % 2 == 0 { complete() } else { json!({}) };
                create(payload).failures().len()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = if i % 2 == 0 { 0 } else { 7 };
        assert_eq!(handle.join().unwrap(), expected);
    }
}

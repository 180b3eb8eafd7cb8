//! Rule sets for the address book operations

use crate::core::validation::{Operation, RuleKind, RuleSet, ValueType};
use std::sync::OnceLock;

/// Address text fields with their display labels, in declaration order
pub const ADDRESS_FIELDS: [(&str, &str); 7] = [
    ("fullName", "Full name"),
    ("phoneNumber", "Phone number"),
    ("addressLine1", "Address line 1"),
    ("city", "City"),
    ("state", "State"),
    ("postalCode", "Postal code"),
    ("country", "Country"),
];

pub const IS_DEFAULT: &str = "isDefault";

const IS_DEFAULT_MESSAGE: &str = "isDefault must be a boolean";

/// `POST /addresses`
pub struct CreateAddress;

impl Operation for CreateAddress {
    const NAME: &'static str = "address.create";

    fn rule_set() -> &'static RuleSet {
        static RULES: OnceLock<RuleSet> = OnceLock::new();
        RULES.get_or_init(create_address_rules)
    }
}

/// `PUT|PATCH /addresses/{id}`
pub struct UpdateAddress;

impl Operation for UpdateAddress {
    const NAME: &'static str = "address.update";

    fn rule_set() -> &'static RuleSet {
        static RULES: OnceLock<RuleSet> = OnceLock::new();
        RULES.get_or_init(update_address_rules)
    }
}

/// Every text field trimmed, present, non-blank and a string
fn create_address_rules() -> RuleSet {
    let mut builder = RuleSet::builder(CreateAddress::NAME);
    for (field, label) in ADDRESS_FIELDS {
        builder = builder
            .trim(field)
            .required(field, format!("{} is required", label))
            .type_check(field, ValueType::String, format!("{} must be a string", label));
    }
    builder
        .optional(
            IS_DEFAULT,
            RuleKind::TypeCheck {
                expected: ValueType::Boolean,
            },
            IS_DEFAULT_MESSAGE,
        )
        .build()
        .expect("built-in address rule set is valid")
}

/// Same fields, none required, types still enforced
fn update_address_rules() -> RuleSet {
    let mut builder = RuleSet::builder(UpdateAddress::NAME);
    for (field, label) in ADDRESS_FIELDS {
        builder = builder.trim(field).optional(
            field,
            RuleKind::TypeCheck {
                expected: ValueType::String,
            },
            format!("{} must be a string", label),
        );
    }
    builder
        .optional(
            IS_DEFAULT,
            RuleKind::TypeCheck {
                expected: ValueType::Boolean,
            },
            IS_DEFAULT_MESSAGE,
        )
        .build()
        .expect("built-in address rule set is valid")
}

//! Address book records

use crate::core::error::{RequestError, StorefrontError};
use crate::core::validation::as_boolean;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A stored shipping address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted by `POST /addresses`, read from a validated payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub full_name: String,
    pub phone_number: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub is_default: Option<Value>,
}

/// Fields accepted by `PUT|PATCH /addresses/{id}`; absent or null means unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub is_default: Option<Value>,
}

fn from_payload<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T, StorefrontError> {
    if !payload.is_object() {
        return Err(RequestError::InvalidJson {
            message: "expected a JSON object".to_string(),
        }
        .into());
    }
    serde_json::from_value(payload).map_err(|e| StorefrontError::Internal(e.to_string()))
}

impl NewAddress {
    /// Read a payload that already passed the create rule set
    pub fn from_validated(payload: Value) -> Result<Self, StorefrontError> {
        from_payload(payload)
    }

    pub fn wants_default(&self) -> bool {
        self.is_default.as_ref().and_then(as_boolean).unwrap_or(false)
    }

    pub fn into_address(self, is_default: bool) -> Address {
        let now = Utc::now();
        Address {
            id: Uuid::new_v4(),
            full_name: self.full_name,
            phone_number: self.phone_number,
            address_line1: self.address_line1,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            is_default,
            created_at: now,
            updated_at: now,
        }
    }
}

impl AddressPatch {
    /// Read a payload that already passed the update rule set
    pub fn from_validated(payload: Value) -> Result<Self, StorefrontError> {
        from_payload(payload)
    }

    /// Requested default flag, if the patch sets one
    pub fn default_flag(&self) -> Option<bool> {
        self.is_default.as_ref().and_then(as_boolean)
    }

    /// Apply present fields to `address` and bump its timestamp
    pub fn apply(self, address: &mut Address) {
        let default_flag = self.default_flag();
        let fields = [
            (self.full_name, &mut address.full_name),
            (self.phone_number, &mut address.phone_number),
            (self.address_line1, &mut address.address_line1),
            (self.city, &mut address.city),
            (self.state, &mut address.state),
            (self.postal_code, &mut address.postal_code),
            (self.country, &mut address.country),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(flag) = default_flag {
            address.is_default = flag;
        }
        address.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_address() -> NewAddress {
        NewAddress::from_validated(json!({
            "fullName": "Grace Hopper",
            "phoneNumber": "555-0100",
            "addressLine1": "1 Navy Way",
            "city": "Arlington",
            "state": "VA",
            "postalCode": "22202",
            "country": "US",
            "isDefault": "true",
            "nickname": "ignored"
        }))
        .unwrap()
    }

    #[test]
    fn test_new_address_coerces_default_flag() {
        let draft = new_address();
        assert!(draft.wants_default());
        let address = draft.into_address(true);
        assert_eq!(address.city, "Arlington");
        assert!(address.is_default);
        assert_eq!(address.created_at, address.updated_at);
    }

    #[test]
    fn test_address_serializes_camel_case() {
        let body = serde_json::to_value(new_address().into_address(false)).unwrap();
        assert_eq!(body["addressLine1"], "1 Navy Way");
        assert_eq!(body["isDefault"], false);
        assert!(body.get("address_line1").is_none());
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut address = new_address().into_address(true);
        let patch = AddressPatch::from_validated(json!({
            "city": "Washington",
            "state": null,
            "isDefault": false
        }))
        .unwrap();

        patch.apply(&mut address);
        assert_eq!(address.city, "Washington");
        assert_eq!(address.state, "VA");
        assert!(!address.is_default);
        assert!(address.updated_at >= address.created_at);
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let err = AddressPatch::from_validated(json!(["city"])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_JSON");
    }
}

//! Customer models for the MyRepairApp API.
//!
//! A customer is a flat record of contact and billing fields with no
//! behavior beyond the JSON round trip. This is the single authoritative
//! schema; earlier revisions of the service client carried a second,
//! out-of-date field set that has been folded into this one.

use std::fmt;

use serde_json::{json, Value};

use crate::error::WrenchError;
use crate::models::common::{get_f64, get_i64, get_str};

/// A MyRepairApp customer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    /// Unique customer ID (wire key `id`).
    pub customer_id: Option<i64>,
    /// First name (wire key `firstName`).
    pub first_name: Option<String>,
    /// Last name (wire key `lastName`).
    pub last_name: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Primary phone number (wire key `primaryPhone`).
    pub primary_phone: Option<String>,
    /// Secondary contact phone (wire key `contactPhone`).
    pub contact_phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Driver's license number (wire key `driversLicense`).
    pub drivers_license: Option<i64>,
    /// Store credit balance (wire key `storeCredit`).
    pub store_credit: Option<f64>,
    /// Preferred contact methods (wire key `preferredContactMethods`).
    pub preferred_contact_methods: Vec<String>,
    /// Billing agent (wire key `billingAgent`).
    pub billing_agent: Option<String>,
    /// Net payment terms (wire key `netTerms`).
    pub net_terms: Option<String>,
    /// Postal code (wire key `postalCode`).
    pub postal_code: Option<i64>,
    /// Referral source reference (wire key `referralSourceId`).
    pub referral_source_id: Option<String>,
    /// Street address line 1.
    pub street1: Option<String>,
    /// Street address line 2.
    pub street2: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
}

impl Customer {
    /// Builds a customer from a decoded service JSON object.
    ///
    /// Lookup is permissive: absent or null keys leave the field empty.
    pub fn from_wire(data: &Value) -> Result<Self, WrenchError> {
        let preferred_contact_methods = data
            .get("preferredContactMethods")
            .and_then(Value::as_array)
            .map(|methods| {
                methods
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Customer {
            customer_id: get_i64(data, "id"),
            first_name: get_str(data, "firstName"),
            last_name: get_str(data, "lastName"),
            company: get_str(data, "company"),
            primary_phone: get_str(data, "primaryPhone"),
            contact_phone: get_str(data, "contactPhone"),
            email: get_str(data, "email"),
            drivers_license: get_i64(data, "driversLicense"),
            store_credit: get_f64(data, "storeCredit"),
            preferred_contact_methods,
            billing_agent: get_str(data, "billingAgent"),
            net_terms: get_str(data, "netTerms"),
            postal_code: get_i64(data, "postalCode"),
            referral_source_id: get_str(data, "referralSourceId"),
            street1: get_str(data, "street1"),
            street2: get_str(data, "street2"),
            country: get_str(data, "country"),
            state: get_str(data, "state"),
            city: get_str(data, "city"),
        })
    }

    /// Exports the customer as a wire-schema JSON object.
    ///
    /// An empty preferred-contact-methods list exports as null, matching
    /// what the service sends back for customers with none set.
    pub fn to_wire(&self) -> serde_json::Map<String, Value> {
        let mut out = serde_json::Map::new();

        out.insert("id".into(), json!(self.customer_id));
        out.insert("firstName".into(), json!(self.first_name));
        out.insert("lastName".into(), json!(self.last_name));
        out.insert("company".into(), json!(self.company));
        out.insert("primaryPhone".into(), json!(self.primary_phone));
        out.insert("contactPhone".into(), json!(self.contact_phone));
        out.insert("email".into(), json!(self.email));
        out.insert("driversLicense".into(), json!(self.drivers_license));
        out.insert("storeCredit".into(), json!(self.store_credit));
        out.insert(
            "preferredContactMethods".into(),
            if self.preferred_contact_methods.is_empty() {
                Value::Null
            } else {
                json!(self.preferred_contact_methods)
            },
        );
        out.insert("billingAgent".into(), json!(self.billing_agent));
        out.insert("netTerms".into(), json!(self.net_terms));
        out.insert("postalCode".into(), json!(self.postal_code));
        out.insert("referralSourceId".into(), json!(self.referral_source_id));
        out.insert("street1".into(), json!(self.street1));
        out.insert("street2".into(), json!(self.street2));
        out.insert("country".into(), json!(self.country));
        out.insert("state".into(), json!(self.state));
        out.insert("city".into(), json!(self.city));

        out
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample_customer_json() -> Value {
        json!({
            "id": 42,
            "firstName": "Maja",
            "lastName": "Holm",
            "company": "Holm ApS",
            "primaryPhone": "+45 11 22 33 44",
            "contactPhone": null,
            "email": "maja@example.com",
            "driversLicense": 998877,
            "storeCredit": 25.5,
            "preferredContactMethods": ["email", "sms"],
            "billingAgent": null,
            "netTerms": "net30",
            "postalCode": 5000,
            "referralSourceId": null,
            "street1": "Langegade 1",
            "street2": null,
            "country": "DK",
            "state": null,
            "city": "Odense"
        })
    }

    #[test]
    fn test_customer_round_trip() {
        let customer = Customer::from_wire(&sample_customer_json()).unwrap();
        assert_eq!(customer.customer_id, Some(42));
        assert_eq!(customer.first_name.as_deref(), Some("Maja"));
        assert_eq!(customer.store_credit, Some(25.5));
        assert_eq!(
            customer.preferred_contact_methods,
            vec!["email".to_string(), "sms".to_string()]
        );

        let wire = customer.to_wire();
        let reparsed = Customer::from_wire(&Value::Object(wire)).unwrap();
        assert_eq!(reparsed, customer);
    }

    #[test]
    fn test_empty_contact_methods_export_as_null() {
        let customer = Customer {
            customer_id: Some(7),
            ..Default::default()
        };
        let wire = customer.to_wire();
        assert_eq!(wire.get("preferredContactMethods"), Some(&Value::Null));
    }

    #[test]
    fn test_customer_display_is_full_name() {
        let customer = Customer {
            first_name: Some("Maja".into()),
            last_name: Some("Holm".into()),
            ..Default::default()
        };
        assert_eq!(customer.to_string(), "Maja Holm");
    }

    #[test]
    fn test_from_wire_missing_keys_are_none() {
        let customer = Customer::from_wire(&json!({"id": 1})).unwrap();
        assert_eq!(customer.customer_id, Some(1));
        assert_eq!(customer.email, None);
        assert!(customer.preferred_contact_methods.is_empty());
    }
}

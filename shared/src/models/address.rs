//! Delivery Address Model

use serde::{Deserialize, Serialize};

use super::restaurant::GeoPoint;

/// Structured delivery address captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAddress {
    pub house_no: String,
    pub street: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    pub area: String,
    pub city: String,
    pub pincode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

/// Delivery address on an order
///
/// Older orders carried a single free-text string; both shapes stay
/// readable. `untagged` lets the structured form deserialize from an
/// object and the legacy form from a plain string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DeliveryAddress {
    Structured(StructuredAddress),
    Legacy(String),
}

impl DeliveryAddress {
    /// Completeness check used by order placement.
    ///
    /// Structured addresses need every non-optional field filled;
    /// legacy free text just needs to be non-blank.
    pub fn is_complete(&self) -> bool {
        match self {
            DeliveryAddress::Structured(a) => {
                !a.house_no.trim().is_empty()
                    && !a.street.trim().is_empty()
                    && !a.area.trim().is_empty()
                    && !a.city.trim().is_empty()
                    && !a.pincode.trim().is_empty()
            }
            DeliveryAddress::Legacy(s) => !s.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for DeliveryAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryAddress::Structured(a) => {
                write!(f, "{}, {}", a.house_no, a.street)?;
                if let Some(landmark) = &a.landmark {
                    write!(f, ", near {}", landmark)?;
                }
                write!(f, ", {}, {} - {}", a.area, a.city, a.pincode)
            }
            DeliveryAddress::Legacy(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured() -> StructuredAddress {
        StructuredAddress {
            house_no: "42".into(),
            street: "MG Road".into(),
            landmark: None,
            area: "Indiranagar".into(),
            city: "Bangalore".into(),
            pincode: "560038".into(),
            location: None,
        }
    }

    #[test]
    fn structured_address_completeness() {
        let mut addr = structured();
        assert!(DeliveryAddress::Structured(addr.clone()).is_complete());

        addr.city = "  ".into();
        assert!(!DeliveryAddress::Structured(addr).is_complete());
    }

    #[test]
    fn legacy_address_roundtrips_from_plain_string() {
        let addr: DeliveryAddress = serde_json::from_str("\"123 Main Street, Mumbai\"").unwrap();
        assert_eq!(addr, DeliveryAddress::Legacy("123 Main Street, Mumbai".into()));
        assert!(addr.is_complete());
        assert!(!DeliveryAddress::Legacy("   ".into()).is_complete());
    }
}

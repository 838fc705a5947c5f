//! # Order Types
//!
//! Order identifier and the read-only order record returned by a lookup.

use serde_json::Value;
use std::fmt;

/// Opaque order identifier supplied by the caller.
///
/// Holds the string form used both in the lookup URL and in the token
/// payload. Strings pass through verbatim, numbers are rendered in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    /// Create from a string. Returns `None` for an empty string.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Extract from a JSON value.
    ///
    /// Accepts non-empty strings and non-zero numbers. Everything else
    /// (null, `""`, `0`, booleans, arrays, objects) counts as missing.
    /// Numbers are held as doubles and rendered the way a browser would,
    /// so `1e21` becomes `"1e+21"` and integers past 2^53 lose precision.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::new(s.as_str()),
            Value::Number(n) => {
                let f = n.as_f64()?;
                if f == 0.0 || !f.is_finite() {
                    None
                } else {
                    Some(Self(js_number_string(f)))
                }
            }
            _ => None,
        }
    }

    /// Extract `orderId` from a raw request body.
    ///
    /// A body that is empty or is not a JSON object yields `None`.
    pub fn from_request_body(body: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(body).ok()?;
        value.get("orderId").and_then(Self::from_json)
    }

    /// Borrow the string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Render a finite, non-zero double like ECMAScript `Number::toString`.
fn js_number_string(f: f64) -> String {
    if f < 0.0 {
        return format!("-{}", js_number_string(-f));
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e-7" or "1e21".
    let sci = format!("{:e}", f);
    let (mantissa, exp) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exp: i32 = match exp.parse() {
        Ok(exp) => exp,
        Err(_) => return sci,
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exp + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", lead, sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", lead, rest, sign, (n - 1).abs())
        }
    }
}

/// Payment status of an order as reported upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    /// `"paid"`
    Paid,
    /// Any other reported value, rendered as text
    Other(String),
    /// Field absent somewhere along `data.attributes.status`
    Missing,
}

impl OrderStatus {
    fn from_json(value: Option<&Value>) -> Self {
        match value {
            None => OrderStatus::Missing,
            Some(Value::String(s)) if s == "paid" => OrderStatus::Paid,
            Some(Value::String(s)) => OrderStatus::Other(s.clone()),
            Some(other) => OrderStatus::Other(other.to_string()),
        }
    }

    /// Text shown to the caller in `Order status: <status>`
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Paid => "paid",
            OrderStatus::Other(s) => s,
            OrderStatus::Missing => "undefined",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Order record fetched from the commerce provider
#[derive(Debug, Clone)]
pub struct OrderRecord {
    /// Provider's order ID (`data.id`), diagnostics only
    pub provider_id: Option<String>,

    /// Provider's order identifier (`data.attributes.identifier`), diagnostics only
    pub identifier: Option<String>,

    /// Payment status
    pub status: OrderStatus,
}

impl OrderRecord {
    /// Parse from a JSON:API order document.
    ///
    /// Missing fields never fail; an absent status becomes [`OrderStatus::Missing`].
    pub fn from_document(doc: &Value) -> Self {
        let data = doc.get("data");
        let attributes = data.and_then(|d| d.get("attributes"));

        let provider_id = data.and_then(|d| d.get("id")).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        let identifier = attributes
            .and_then(|a| a.get("identifier"))
            .and_then(|v| v.as_str())
            .map(String::from);

        let status = OrderStatus::from_json(attributes.and_then(|a| a.get("status")));

        Self {
            provider_id,
            identifier,
            status,
        }
    }

    /// Check if the order was paid
    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_id_from_string_and_number() {
        assert_eq!(OrderId::from_json(&json!("ord_1")).unwrap().as_str(), "ord_1");
        assert_eq!(OrderId::from_json(&json!(12345)).unwrap().as_str(), "12345");
        assert_eq!(OrderId::from_json(&json!(-7)).unwrap().as_str(), "-7");
        assert_eq!(OrderId::from_json(&json!(1.5)).unwrap().as_str(), "1.5");
        assert_eq!(OrderId::from_json(&json!(3.0)).unwrap().as_str(), "3");
    }

    #[test]
    fn test_order_id_matches_browser_number_text() {
        let cases = [
            (json!(1e21), "1e+21"),
            (json!(2.5e25), "2.5e+25"),
            (json!(1e20), "100000000000000000000"),
            (json!(1e-7), "1e-7"),
            (json!(1.5e-7), "1.5e-7"),
            (json!(0.000001), "0.000001"),
            (json!(123.456), "123.456"),
            (json!(-0.5), "-0.5"),
            (json!(12345678901234567890u64), "12345678901234567000"),
        ];
        for (value, expected) in cases {
            assert_eq!(OrderId::from_json(&value).unwrap().as_str(), expected, "{}", value);
        }
    }

    #[test]
    fn test_order_id_rejects_falsy_values() {
        assert!(OrderId::from_json(&json!("")).is_none());
        assert!(OrderId::from_json(&json!(0)).is_none());
        assert!(OrderId::from_json(&json!(0.0)).is_none());
        assert!(OrderId::from_json(&json!(null)).is_none());
        assert!(OrderId::from_json(&json!(false)).is_none());
        assert!(OrderId::from_json(&json!({"id": 1})).is_none());
    }

    #[test]
    fn test_order_id_from_request_body() {
        let id = OrderId::from_request_body(br#"{"orderId":"abc"}"#).unwrap();
        assert_eq!(id.to_string(), "abc");

        assert!(OrderId::from_request_body(b"").is_none());
        assert!(OrderId::from_request_body(b"not json").is_none());
        assert!(OrderId::from_request_body(b"[1,2]").is_none());
        assert!(OrderId::from_request_body(br#"{"order_id":"abc"}"#).is_none());
    }

    #[test]
    fn test_record_paid() {
        let doc = json!({
            "data": {
                "type": "orders",
                "id": "1",
                "attributes": {
                    "identifier": "104e18a2-d755-4d4b-80c4-a6c1dcbe1c10",
                    "status": "paid"
                }
            }
        });
        let record = OrderRecord::from_document(&doc);
        assert!(record.is_paid());
        assert_eq!(record.provider_id.as_deref(), Some("1"));
        assert_eq!(
            record.identifier.as_deref(),
            Some("104e18a2-d755-4d4b-80c4-a6c1dcbe1c10")
        );
    }

    #[test]
    fn test_record_other_status() {
        let doc = json!({ "data": { "attributes": { "status": "refunded" } } });
        let record = OrderRecord::from_document(&doc);
        assert!(!record.is_paid());
        assert_eq!(record.status.label(), "refunded");
    }

    #[test]
    fn test_record_missing_status_is_undefined() {
        for doc in [json!({}), json!({ "data": {} }), json!({ "data": { "attributes": {} } })] {
            let record = OrderRecord::from_document(&doc);
            assert_eq!(record.status, OrderStatus::Missing);
            assert_eq!(record.status.to_string(), "undefined");
        }
    }

    #[test]
    fn test_record_non_string_status() {
        let doc = json!({ "data": { "attributes": { "status": null } } });
        assert_eq!(OrderRecord::from_document(&doc).status.label(), "null");

        let doc = json!({ "data": { "attributes": { "status": 3 } } });
        assert_eq!(OrderRecord::from_document(&doc).status.label(), "3");
    }

    #[test]
    fn test_status_is_case_sensitive() {
        let doc = json!({ "data": { "attributes": { "status": "PAID" } } });
        assert!(!OrderRecord::from_document(&doc).is_paid());
    }
}

use super::{FieldPatch, one_of, stamped};
use crate::core::entity::new_id;
use crate::core::error::ValidationError;
use crate::core::field::FieldUpdates;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

const PAYMENT_METHODS: &[&str] = &["CARD", "CASH", ""];
const PAYMENT_STATUSES: &[&str] = &["PENDING", "PAID"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "CARD")]
    Card,
    #[serde(rename = "CASH")]
    Cash,
    /// Explicitly left blank by the client
    #[serde(rename = "")]
    Unspecified,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Unspecified => "",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "CARD" => Some(PaymentMethod::Card),
            "CASH" => Some(PaymentMethod::Cash),
            "" => Some(PaymentMethod::Unspecified),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PENDING" => Some(PaymentStatus::Pending),
            "PAID" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub payment_due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Invoice, "invoice", invoice_id);

fn validate_payment_method(value: &str) -> Result<(), validator::ValidationError> {
    one_of("payment_method", value, PAYMENT_METHODS)
}

fn validate_payment_status(value: &str) -> Result<(), validator::ValidationError> {
    one_of("payment_status", value, PAYMENT_STATUSES)
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewInvoice {
    #[validate(
        required(message = "order_id is required"),
        length(min = 1, message = "order_id is required")
    )]
    pub order_id: Option<String>,
    #[validate(custom(function = "validate_payment_method"))]
    pub payment_method: Option<String>,
    #[validate(custom(function = "validate_payment_status"))]
    pub payment_status: Option<String>,
}

impl NewInvoice {
    /// Validate the payload and build the record
    ///
    /// Status defaults to `PENDING`; payment is due one day after creation.
    pub fn into_record(self, now: DateTime<Utc>) -> Result<Invoice, ValidationError> {
        self.validate()?;
        Ok(Invoice {
            invoice_id: new_id(),
            order_id: self.order_id.unwrap_or_default(),
            payment_method: self.payment_method.as_deref().and_then(PaymentMethod::parse),
            payment_status: self
                .payment_status
                .as_deref()
                .and_then(PaymentStatus::parse)
                .unwrap_or_default(),
            payment_due_date: now + Duration::days(1),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InvoicePatch {
    #[validate(custom(function = "validate_payment_method"))]
    pub payment_method: Option<String>,
    #[validate(custom(function = "validate_payment_status"))]
    pub payment_status: Option<String>,
}

impl FieldPatch for InvoicePatch {
    fn into_updates(self, now: DateTime<Utc>) -> Result<FieldUpdates, ValidationError> {
        self.validate()?;
        let mut updates = stamped(now);
        updates
            .set_if_some("payment_method", self.payment_method)
            .set_if_some("payment_status", self.payment_status);
        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_on_create() {
        let now = Utc::now();
        let invoice = NewInvoice {
            order_id: Some("o1".into()),
            ..Default::default()
        }
        .into_record(now)
        .unwrap();

        assert_eq!(invoice.payment_status, PaymentStatus::Pending);
        assert_eq!(invoice.payment_method, None);
        assert_eq!(invoice.payment_due_date, now + Duration::days(1));
    }

    #[test]
    fn test_rejects_unknown_status_and_method() {
        let err = NewInvoice {
            order_id: Some("o1".into()),
            payment_status: Some("LATE".into()),
            ..Default::default()
        }
        .into_record(Utc::now())
        .unwrap_err();
        assert_eq!(err.first_field(), Some("payment_status"));

        let err = InvoicePatch {
            payment_method: Some("CHEQUE".into()),
            ..Default::default()
        }
        .into_updates(Utc::now())
        .unwrap_err();
        assert_eq!(err.first_field(), Some("payment_method"));
    }

    #[test]
    fn test_blank_method_is_kept_distinct_from_absent() {
        let invoice = NewInvoice {
            order_id: Some("o1".into()),
            payment_method: Some(String::new()),
            payment_status: Some("PAID".into()),
        }
        .into_record(Utc::now())
        .unwrap();
        assert_eq!(invoice.payment_method, Some(PaymentMethod::Unspecified));
        assert_eq!(invoice.payment_status, PaymentStatus::Paid);

        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["payment_method"], "");
        assert_eq!(json["payment_status"], "PAID");
    }
}

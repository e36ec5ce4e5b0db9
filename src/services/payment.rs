//! Payment hand-off to the hosted gateway page.
//!
//! The backend opens the gateway transaction and signs it; the client only
//! turns the returned parameters into an auto-submitting POST form. A hand-off
//! is consumed by [`PaymentHandoff::begin`] and cannot be retried.

use std::fmt::Write as _;

use serde_json::Value;

use crate::{
    api::payments::PaymentsApi,
    error::{ClientError, ClientResult},
    lifecycle::{LifecycleEntity, RentalAction},
    models::{enums::Role, payment::PaymentInitiation, Rental},
};

const PAYMENT_URL_KEY: &str = "payment_url";

/// Gateway form: posted to `action` with `fields` as hidden inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    pub action: String,
    /// Every initiation parameter except `payment_url`, in the order received
    pub fields: Vec<(String, String)>,
}

impl PaymentForm {
    pub fn from_initiation(initiation: PaymentInitiation) -> ClientResult<Self> {
        let mut action = None;
        let mut fields = Vec::with_capacity(initiation.0.len());

        for (key, value) in initiation.0 {
            if key == PAYMENT_URL_KEY {
                match value {
                    Value::String(url) if !url.is_empty() => action = Some(url),
                    other => {
                        return Err(ClientError::Decode(format!(
                            "payment_url must be a non-empty string, got {}",
                            other
                        )))
                    }
                }
            } else {
                fields.push((key, field_value(value)));
            }
        }

        let action = action
            .ok_or_else(|| ClientError::Decode("Payment initiation has no payment_url".to_string()))?;
        Ok(Self { action, fields })
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Full-screen blocking page that posts the form as soon as it loads
    pub fn render_html(&self) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Redirecting to payment</title></head>\n\
             <body style=\"margin:0\">\n\
             <div style=\"position:fixed;inset:0;display:flex;flex-direction:column;align-items:center;justify-content:center;background:#fff\">\n\
             <p style=\"font-size:1.25rem;font-weight:bold\">Redirecting to payment...</p>\n\
             <p>Please do not refresh the page.</p>\n</div>\n",
        );
        let _ = writeln!(
            html,
            "<form id=\"payment-form\" action=\"{}\" method=\"POST\" style=\"display:none\">",
            escape_html(&self.action)
        );
        for (name, value) in &self.fields {
            let _ = writeln!(
                html,
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                escape_html(name),
                escape_html(value)
            );
        }
        html.push_str("</form>\n<script>document.getElementById(\"payment-form\").submit();</script>\n</body>\n</html>\n");
        html
    }
}

fn field_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// One-shot payment start for a single rental
pub struct PaymentHandoff {
    api: PaymentsApi,
    rental_id: i64,
}

impl PaymentHandoff {
    pub fn new(api: PaymentsApi, rental_id: i64) -> Self {
        Self { api, rental_id }
    }

    /// Hand-off for a rental the customer is currently allowed to pay
    pub fn for_rental(api: PaymentsApi, rental: &Rental) -> ClientResult<Self> {
        if !rental.actions_for(Role::Customer).contains(&RentalAction::PayNow) {
            return Err(ClientError::BadRequest(format!(
                "Rental #{} cannot be paid while {}",
                rental.id, rental.status
            )));
        }
        Ok(Self::new(api, rental.id))
    }

    pub fn rental_id(&self) -> i64 {
        self.rental_id
    }

    /// Open the gateway transaction and build the form to post
    pub async fn begin(self) -> ClientResult<PaymentForm> {
        tracing::info!("Initiating payment for rental #{}", self.rental_id);
        let initiation = self.api.initiate(self.rental_id).await?;
        let form = PaymentForm::from_initiation(initiation)?;
        tracing::debug!("Payment form targets {} with {} fields", form.action, form.fields.len());
        Ok(form)
    }
}

/// Where the gateway sent the user back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success,
    Failure,
}

impl PaymentOutcome {
    /// Map a return route (`/payment-success`, `/payment-failure`, or a full URL ending in one)
    pub fn from_return_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let path = path.trim_end_matches('/');
        if path.ends_with("/payment-success") || path == "payment-success" {
            Some(PaymentOutcome::Success)
        } else if path.ends_with("/payment-failure") || path == "payment-failure" {
            Some(PaymentOutcome::Failure)
        } else {
            None
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PaymentOutcome::Success => "Payment successful! The store has been notified.",
            PaymentOutcome::Failure => "Payment failed or was cancelled. You can try again from your dashboard.",
        }
    }
}

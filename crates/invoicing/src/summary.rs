use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoicely_core::InvoiceId;

use crate::invoice::Invoice;

/// Listing row: the columns a tabular invoice overview shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub invoice_number: f64,
    pub date: NaiveDate,
    pub customer_name: String,
    pub billing_address: String,
    pub shipping_address: String,
    pub total_amount: f64,
}

impl From<&Invoice> for InvoiceSummary {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id.clone(),
            invoice_number: invoice.invoice_number,
            date: invoice.date,
            customer_name: invoice.customer_name.clone(),
            billing_address: invoice.billing_address.clone(),
            shipping_address: invoice.shipping_address.clone(),
            total_amount: invoice.total_amount,
        }
    }
}

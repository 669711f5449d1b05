//! Candidate invoices as they exist during an editing session.
//!
//! A draft may be partially filled: every scalar is optional and numbers are
//! plain `f64` so that a fractional quantity can be represented (and then
//! rejected by validation). Drafts deserialize from partial JSON.

use serde::{Deserialize, Serialize};

use invoicely_core::{InvoiceId, ItemId, SundryId};

use crate::invoice::{BillSundry, Invoice, InvoiceItem};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDraft {
    pub id: Option<ItemId>,
    pub item_name: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub amount: Option<f64>,
}

impl ItemDraft {
    /// The form's blank row: fresh id, empty name, zero quantity/price/amount.
    pub fn blank() -> Self {
        Self {
            id: Some(ItemId::generate()),
            item_name: Some(String::new()),
            quantity: Some(0.0),
            price: Some(0.0),
            amount: Some(0.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SundryDraft {
    pub id: Option<SundryId>,
    pub bill_sundry_name: Option<String>,
    pub amount: Option<f64>,
}

impl SundryDraft {
    pub fn blank() -> Self {
        Self {
            id: Some(SundryId::generate()),
            bill_sundry_name: Some(String::new()),
            amount: Some(0.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceDraft {
    pub id: Option<InvoiceId>,
    /// Raw date text as entered; parsed during validation.
    pub date: Option<String>,
    pub invoice_number: Option<f64>,
    pub customer_name: Option<String>,
    pub billing_address: Option<String>,
    pub shipping_address: Option<String>,
    #[serde(rename = "gstID")]
    pub gst_id: Option<String>,
    pub items: Vec<ItemDraft>,
    #[serde(rename = "billSundrys")]
    pub bill_sundries: Vec<SundryDraft>,
    pub total_amount: Option<f64>,
}

/// Starting point for a new invoice: fresh id, one blank item, no sundries,
/// header fields (including the date) left for the caller.
pub fn default_invoice() -> InvoiceDraft {
    InvoiceDraft {
        id: Some(InvoiceId::generate()),
        items: vec![ItemDraft::blank()],
        ..InvoiceDraft::default()
    }
}

impl InvoiceDraft {
    /// Append a blank item and return its index.
    pub fn add_item(&mut self) -> usize {
        self.items.push(ItemDraft::blank());
        self.items.len() - 1
    }

    /// Remove the item at `index`; `None` (and no change) when out of range.
    pub fn remove_item(&mut self, index: usize) -> Option<ItemDraft> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Append a blank bill sundry and return its index.
    pub fn add_bill_sundry(&mut self) -> usize {
        self.bill_sundries.push(SundryDraft::blank());
        self.bill_sundries.len() - 1
    }

    /// Remove the sundry at `index`; `None` (and no change) when out of range.
    pub fn remove_bill_sundry(&mut self, index: usize) -> Option<SundryDraft> {
        (index < self.bill_sundries.len()).then(|| self.bill_sundries.remove(index))
    }
}

impl From<&InvoiceItem> for ItemDraft {
    fn from(item: &InvoiceItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            item_name: Some(item.item_name.clone()),
            quantity: Some(item.quantity as f64),
            price: Some(item.price),
            amount: Some(item.amount),
        }
    }
}

impl From<&BillSundry> for SundryDraft {
    fn from(sundry: &BillSundry) -> Self {
        Self {
            id: Some(sundry.id.clone()),
            bill_sundry_name: Some(sundry.bill_sundry_name.clone()),
            amount: Some(sundry.amount),
        }
    }
}

/// Seed an edit session from a stored record.
impl From<&Invoice> for InvoiceDraft {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: Some(invoice.id.clone()),
            date: Some(invoice.date.format("%Y-%m-%d").to_string()),
            invoice_number: Some(invoice.invoice_number),
            customer_name: Some(invoice.customer_name.clone()),
            billing_address: Some(invoice.billing_address.clone()),
            shipping_address: Some(invoice.shipping_address.clone()),
            gst_id: Some(invoice.gst_id.clone()),
            items: invoice.items.iter().map(ItemDraft::from).collect(),
            bill_sundries: invoice.bill_sundries.iter().map(SundryDraft::from).collect(),
            total_amount: Some(invoice.total_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_invoice_has_one_blank_item() {
        let draft = default_invoice();

        assert!(draft.id.is_some());
        assert_eq!(draft.date, None);
        assert_eq!(draft.customer_name, None);
        assert_eq!(draft.total_amount, None);
        assert!(draft.bill_sundries.is_empty());
        assert_eq!(draft.items.len(), 1);

        let item = &draft.items[0];
        assert!(item.id.is_some());
        assert_eq!(item.item_name.as_deref(), Some(""));
        assert_eq!(item.quantity, Some(0.0));
        assert_eq!(item.price, Some(0.0));
        assert_eq!(item.amount, Some(0.0));
    }

    #[test]
    fn default_invoices_get_fresh_ids() {
        let a = default_invoice();
        let b = default_invoice();
        assert_ne!(a.id, b.id);
        assert_ne!(a.items[0].id, b.items[0].id);
    }

    #[test]
    fn add_and_remove_rows() {
        let mut draft = default_invoice();

        assert_eq!(draft.add_item(), 1);
        assert_eq!(draft.add_bill_sundry(), 0);
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.bill_sundries.len(), 1);

        let first = draft.items[0].id.clone();
        let removed = draft.remove_item(0).unwrap();
        assert_eq!(removed.id, first);
        assert_eq!(draft.items.len(), 1);

        assert!(draft.remove_item(5).is_none());
        assert_eq!(draft.items.len(), 1);

        assert!(draft.remove_bill_sundry(0).is_some());
        assert!(draft.remove_bill_sundry(0).is_none());
    }

    #[test]
    fn partial_json_fills_missing_fields_with_none() {
        let draft: InvoiceDraft = serde_json::from_str(
            r#"{ "customerName": "ABC", "items": [{ "itemName": "Widget", "quantity": 1.5 }] }"#,
        )
        .unwrap();

        assert_eq!(draft.customer_name.as_deref(), Some("ABC"));
        assert_eq!(draft.id, None);
        assert_eq!(draft.gst_id, None);
        assert!(draft.bill_sundries.is_empty());
        assert_eq!(draft.items[0].quantity, Some(1.5));
        assert_eq!(draft.items[0].price, None);
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoicely_core::{Entity, InvoiceId, ItemId, SundryId};

/// A purchasable line on an invoice.
///
/// Invariant (checked by validation, not by construction): `amount == quantity * price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: ItemId,
    pub item_name: String,
    pub quantity: i64,
    pub price: f64,
    pub amount: f64,
}

impl InvoiceItem {
    /// Build an item whose amount already satisfies the quantity × price invariant.
    pub fn priced(id: ItemId, item_name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            id,
            item_name: item_name.into(),
            quantity,
            price,
            amount: quantity as f64 * price,
        }
    }

    /// `quantity * price`, computed the way the invariant compares it.
    pub fn computed_amount(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// Ad-hoc surcharge or discount added to an invoice total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSundry {
    pub id: SundryId,
    pub bill_sundry_name: String,
    pub amount: f64,
}

impl BillSundry {
    pub fn new(id: SundryId, bill_sundry_name: impl Into<String>, amount: f64) -> Self {
        Self {
            id,
            bill_sundry_name: bill_sundry_name.into(),
            amount,
        }
    }
}

/// A validated billing document.
///
/// Whole-invoice invariant: `total_amount == items_total() + sundries_total()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub date: NaiveDate,
    pub invoice_number: f64,
    pub customer_name: String,
    pub billing_address: String,
    pub shipping_address: String,
    #[serde(rename = "gstID")]
    pub gst_id: String,
    pub items: Vec<InvoiceItem>,
    #[serde(rename = "billSundrys")]
    pub bill_sundries: Vec<BillSundry>,
    pub total_amount: f64,
}

impl Invoice {
    /// Sum of item amounts, accumulated in order from zero.
    pub fn items_total(&self) -> f64 {
        sum_in_order(self.items.iter().map(|i| i.amount))
    }

    /// Sum of sundry amounts, accumulated in order from zero.
    pub fn sundries_total(&self) -> f64 {
        sum_in_order(self.bill_sundries.iter().map(|s| s.amount))
    }

    /// The total the invoice must declare: item sum plus sundry sum.
    pub fn computed_total(&self) -> f64 {
        self.items_total() + self.sundries_total()
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Left fold from `0.0`. Float addition is not associative, so every total in
/// the crate goes through here to compare equal bit-for-bit.
pub(crate) fn sum_in_order(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

//! Fixed records loaded into a fresh store at startup.

use chrono::NaiveDate;

use invoicely_core::{InvoiceId, ItemId};

use crate::invoice::{Invoice, InvoiceItem};

// Evaluated at compile time, so a bad literal fails the build.
const SEED_0_DATE: NaiveDate = ymd(2022, 12, 12);
const SEED_1_DATE: NaiveDate = ymd(2023, 1, 1);

/// Seed invoices, in listing order.
///
/// Every record satisfies the validation rules, so seeding can go through the
/// store's regular `create` path.
pub fn seed_invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            id: InvoiceId::from("0"),
            date: SEED_0_DATE,
            invoice_number: 123.0,
            customer_name: "ABC".to_string(),
            billing_address: "123, Gachibowli, Hyderabad".to_string(),
            shipping_address: "123, Gachibowli, Hyderabad".to_string(),
            gst_id: "XXXXXX".to_string(),
            items: vec![InvoiceItem::priced(ItemId::from("1"), "Item 1", 1, 0.0)],
            bill_sundries: vec![],
            total_amount: 0.0,
        },
        Invoice {
            id: InvoiceId::from("1"),
            date: SEED_1_DATE,
            invoice_number: 124.0,
            customer_name: "XYZ".to_string(),
            billing_address: "456, Gachibowli, Hyderabad".to_string(),
            shipping_address: "124, Gachibowli, Hyderabad".to_string(),
            gst_id: "XXXXXX".to_string(),
            items: vec![
                InvoiceItem::priced(ItemId::from("1"), "Item 1", 6, 10.0),
                InvoiceItem::priced(ItemId::from("2"), "Item 2", 2, 20.0),
            ],
            bill_sundries: vec![],
            total_amount: 100.0,
        },
    ]
}

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("seed date is not a calendar date"),
    }
}

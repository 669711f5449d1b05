//! Invoice validation rules.
//!
//! Every rule is evaluated and all violations are reported together; the
//! whole-invoice total rule runs last. Numeric consistency checks use exact
//! `f64` equality on the values as supplied, with no tolerance.
//!
//! Validation is pure: the only environmental input is `today`, which the
//! caller passes in.

use std::collections::HashSet;
use std::hash::Hash;

use chrono::{Local, NaiveDate};

use invoicely_core::FieldErrors;

use crate::draft::{InvoiceDraft, ItemDraft, SundryDraft};
use crate::invoice::{BillSundry, Invoice, InvoiceItem, sum_in_order};

pub const MSG_INVALID_DATE: &str = "Invalid date";
pub const MSG_NO_ITEMS: &str = "There should be at least one item to generate invoice";
pub const MSG_QUANTITY_NOT_INTEGER: &str = "Item quantity must be an integer";
pub const MSG_ITEM_AMOUNT_MISMATCH: &str =
    "Amount must be equal to product of the quantity and price";
pub const MSG_TOTAL_MISMATCH: &str =
    "Total amount must be equal to the sum of item and bill sundry amounts";
pub const MSG_DUPLICATE_ITEM_ID: &str = "Item id must be unique within the invoice";
pub const MSG_DUPLICATE_SUNDRY_ID: &str = "Bill sundry id must be unique within the invoice";

/// Check a candidate and, if it is valid, produce the typed record.
pub fn validate_draft(draft: &InvoiceDraft, today: NaiveDate) -> Result<Invoice, FieldErrors> {
    let mut errors = FieldErrors::new();

    let id = required(&mut errors, "id", draft.id.clone(), "Invoice id is required");
    let date = check_date(&mut errors, draft.date.as_deref(), today);
    let invoice_number = number(
        &mut errors,
        "invoiceNumber",
        draft.invoice_number,
        "Invoice number",
    );
    let customer_name = text(
        &mut errors,
        "customerName",
        draft.customer_name.as_deref(),
        "Customer name is required",
    );
    let billing_address = text(
        &mut errors,
        "billingAddress",
        draft.billing_address.as_deref(),
        "Billing Address is required",
    );
    let shipping_address = text(
        &mut errors,
        "shippingAddress",
        draft.shipping_address.as_deref(),
        "Shipping Address is required",
    );
    let gst_id = text(
        &mut errors,
        "gstID",
        draft.gst_id.as_deref(),
        "GST ID Number is required",
    );

    if draft.items.is_empty() {
        errors.add("items", MSG_NO_ITEMS);
    }
    let items: Vec<Checked<InvoiceItem>> = draft
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| check_item(&mut errors, index, item))
        .collect();
    let sundries: Vec<Checked<BillSundry>> = draft
        .bill_sundries
        .iter()
        .enumerate()
        .map(|(index, sundry)| check_sundry(&mut errors, index, sundry))
        .collect();
    check_unique_ids(
        &mut errors,
        "items",
        draft.items.iter().map(|i| i.id.as_ref()),
        MSG_DUPLICATE_ITEM_ID,
    );
    check_unique_ids(
        &mut errors,
        "billSundrys",
        draft.bill_sundries.iter().map(|s| s.id.as_ref()),
        MSG_DUPLICATE_SUNDRY_ID,
    );

    let total_amount = number(&mut errors, "totalAmount", draft.total_amount, "Total amount");
    check_total(&mut errors, total_amount, &items, &sundries);

    let items = items.into_iter().map(|c| c.record).collect::<Option<Vec<_>>>();
    let bill_sundries = sundries.into_iter().map(|c| c.record).collect::<Option<Vec<_>>>();

    match (
        id,
        date,
        invoice_number,
        customer_name,
        billing_address,
        shipping_address,
        gst_id,
        items,
        bill_sundries,
        total_amount,
    ) {
        (
            Some(id),
            Some(date),
            Some(invoice_number),
            Some(customer_name),
            Some(billing_address),
            Some(shipping_address),
            Some(gst_id),
            Some(items),
            Some(bill_sundries),
            Some(total_amount),
        ) if errors.is_empty() => Ok(Invoice {
            id,
            date,
            invoice_number,
            customer_name,
            billing_address,
            shipping_address,
            gst_id,
            items,
            bill_sundries,
            total_amount,
        }),
        _ => Err(errors),
    }
}

/// Re-check a typed record against the same rules (as of `today`).
pub fn validate(invoice: &Invoice, today: NaiveDate) -> Result<(), FieldErrors> {
    validate_draft(&InvoiceDraft::from(invoice), today).map(|_| ())
}

/// [`validate`] against the local wall-clock date.
pub fn validate_now(invoice: &Invoice) -> Result<(), FieldErrors> {
    validate(invoice, Local::now().date_naive())
}

/// Outcome of checking one row: the typed record when the row is clean, and
/// its amount whenever that amount alone is usable for the total rule.
struct Checked<T> {
    record: Option<T>,
    amount: Option<f64>,
}

fn check_item(errors: &mut FieldErrors, index: usize, item: &ItemDraft) -> Checked<InvoiceItem> {
    let path = |field: &str| format!("items.{index}.{field}");
    let before = errors.len();

    let id = required(errors, path("id"), item.id.clone(), "Item id is required");
    let item_name = text(
        errors,
        path("itemName"),
        item.item_name.as_deref(),
        "Item name is required",
    );
    let quantity = match item.quantity {
        None => {
            errors.add(path("quantity"), "Item quantity is required");
            None
        }
        Some(q) => match integral(q) {
            Some(q) => Some(q),
            None => {
                errors.add(path("quantity"), MSG_QUANTITY_NOT_INTEGER);
                None
            }
        },
    };
    let price = number(errors, path("price"), item.price, "Item price");
    let amount = number(errors, path("amount"), item.amount, "Item amount");

    if let (Some(q), Some(p), Some(a)) = (quantity, price, amount) {
        if a != q as f64 * p {
            errors.add(path("amount"), MSG_ITEM_AMOUNT_MISMATCH);
        }
    }

    let record = match (id, item_name, quantity, price, amount) {
        (Some(id), Some(item_name), Some(quantity), Some(price), Some(amount))
            if errors.len() == before =>
        {
            Some(InvoiceItem {
                id,
                item_name,
                quantity,
                price,
                amount,
            })
        }
        _ => None,
    };

    Checked { record, amount }
}

fn check_sundry(
    errors: &mut FieldErrors,
    index: usize,
    sundry: &SundryDraft,
) -> Checked<BillSundry> {
    let path = |field: &str| format!("billSundrys.{index}.{field}");

    let id = required(errors, path("id"), sundry.id.clone(), "Bill sundry id is required");
    let bill_sundry_name = text(
        errors,
        path("billSundryName"),
        sundry.bill_sundry_name.as_deref(),
        "Bill sundry name is required",
    );
    let amount = number(errors, path("amount"), sundry.amount, "Bill sundry amount");

    let record = match (id, bill_sundry_name, amount) {
        (Some(id), Some(bill_sundry_name), Some(amount)) => Some(BillSundry {
            id,
            bill_sundry_name,
            amount,
        }),
        _ => None,
    };

    Checked { record, amount }
}

/// Flags every row whose id repeats an earlier row's id in the same list.
fn check_unique_ids<'a, I: Eq + Hash + 'a>(
    errors: &mut FieldErrors,
    list: &str,
    ids: impl Iterator<Item = Option<&'a I>>,
    message: &str,
) {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if let Some(id) = id {
            if !seen.insert(id) {
                errors.add(format!("{list}.{index}.id"), message);
            }
        }
    }
}

/// Cross-field rule. Skipped when the declared total or any row amount is
/// itself unusable; those fields already carry their own violation.
fn check_total(
    errors: &mut FieldErrors,
    total_amount: Option<f64>,
    items: &[Checked<InvoiceItem>],
    sundries: &[Checked<BillSundry>],
) {
    let Some(total) = total_amount else {
        return;
    };
    let item_amounts: Option<Vec<f64>> = items.iter().map(|c| c.amount).collect();
    let sundry_amounts: Option<Vec<f64>> = sundries.iter().map(|c| c.amount).collect();

    if let (Some(item_amounts), Some(sundry_amounts)) = (item_amounts, sundry_amounts) {
        if total != sum_in_order(item_amounts) + sum_in_order(sundry_amounts) {
            errors.add("totalAmount", MSG_TOTAL_MISMATCH);
        }
    }
}

fn check_date(errors: &mut FieldErrors, raw: Option<&str>, today: NaiveDate) -> Option<NaiveDate> {
    match raw {
        None | Some("") => {
            errors.add("date", "Date is required");
            None
        }
        Some(raw) => match parse_date(raw) {
            Some(date) if date <= today => Some(date),
            _ => {
                errors.add("date", MSG_INVALID_DATE);
                None
            }
        },
    }
}

/// `YYYY-MM-DD`; chrono also accepts unpadded month/day (`2023-1-1`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn required<T>(
    errors: &mut FieldErrors,
    path: impl Into<String>,
    value: Option<T>,
    message: &str,
) -> Option<T> {
    if value.is_none() {
        errors.add(path, message);
    }
    value
}

fn text(
    errors: &mut FieldErrors,
    path: impl Into<String>,
    value: Option<&str>,
    message: &str,
) -> Option<String> {
    match value {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => {
            errors.add(path, message);
            None
        }
    }
}

fn number(
    errors: &mut FieldErrors,
    path: impl Into<String>,
    value: Option<f64>,
    label: &str,
) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() => Some(v),
        Some(_) => {
            errors.add(path, format!("{label} must be a number"));
            None
        }
        None => {
            errors.add(path, format!("{label} is required"));
            None
        }
    }
}

/// The exact `i64` value of `v`, if it has no fractional part and fits.
fn integral(v: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
    (v.is_finite() && v.fract() == 0.0 && in_range).then_some(v as i64)
}

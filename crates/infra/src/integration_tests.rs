//! Integration tests for the full editing pipeline.
//!
//! Tests: Draft → Validation → Store → Listing
//!
//! Verifies:
//! - A filled-in default draft becomes a stored invoice
//! - Edit sessions seeded from stored records round-trip through `update`
//! - Concurrent writers never corrupt ids or ordering

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use chrono::NaiveDate;

    use invoicely_core::{DomainError, FixedClock, InvoiceId};
    use invoicely_invoicing::{InvoiceDraft, default_invoice, seed_invoices, validate_draft};

    use crate::store::{InMemoryInvoiceStore, InvoiceStore};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn setup() -> Arc<InMemoryInvoiceStore> {
        let store = InMemoryInvoiceStore::with_clock(FixedClock(today()))
            .with_seed(seed_invoices())
            .unwrap();
        Arc::new(store)
    }

    fn filled_draft() -> InvoiceDraft {
        let mut draft = default_invoice();
        draft.date = Some("2024-06-01".to_string());
        draft.invoice_number = Some(125.0);
        draft.customer_name = Some("Acme".to_string());
        draft.billing_address = Some("1 Main Road".to_string());
        draft.shipping_address = Some("2 Dock Street".to_string());
        draft.gst_id = Some("29ABCDE1234F1Z5".to_string());

        let item = &mut draft.items[0];
        item.item_name = Some("Bolts".to_string());
        item.quantity = Some(6.0);
        item.price = Some(10.0);
        item.amount = Some(60.0);

        let idx = draft.add_bill_sundry();
        draft.bill_sundries[idx].bill_sundry_name = Some("Packing".to_string());
        draft.bill_sundries[idx].amount = Some(5.0);

        draft.total_amount = Some(65.0);
        draft
    }

    #[test]
    fn new_invoice_flows_from_draft_to_listing() {
        let store = setup();
        let draft = filled_draft();

        let invoice = validate_draft(&draft, today()).unwrap();
        store.create(invoice.clone()).unwrap();

        let rows = store.list_summaries().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].id, invoice.id);
        assert_eq!(rows[2].customer_name, "Acme");
        assert_eq!(rows[2].total_amount, 65.0);
    }

    #[test]
    fn invalid_draft_never_reaches_the_store() {
        let store = setup();
        let mut draft = filled_draft();
        draft.total_amount = Some(60.0);

        let errors = validate_draft(&draft, today()).unwrap_err();
        assert_eq!(errors.paths().collect::<Vec<_>>(), ["totalAmount"]);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn edit_session_round_trips_through_update() {
        let store = setup();
        let id = InvoiceId::from("1");

        let mut draft = InvoiceDraft::from(&store.get_by_id(&id).unwrap());
        draft.items[1].quantity = Some(3.0);

        // Stale amount: the edit is refused and the stored record is unchanged.
        let errors = validate_draft(&draft, today()).unwrap_err();
        assert!(errors.contains("items.1.amount"));

        draft.items[1].amount = Some(60.0);
        draft.total_amount = Some(120.0);
        let edited = validate_draft(&draft, today()).unwrap();
        store.update(&id, edited.clone()).unwrap();

        assert_eq!(store.get_by_id(&id).unwrap(), edited);
        let ids: Vec<_> = store.list().unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, [InvoiceId::from("0"), InvoiceId::from("1")]);
    }

    #[test]
    fn delete_then_edit_reports_not_found() {
        let store = setup();
        let id = InvoiceId::from("0");
        let stale = store.get_by_id(&id).unwrap();

        store.delete(&id).unwrap();
        assert_eq!(store.update(&id, stale), Err(DomainError::not_found("0")));
        assert_eq!(store.delete(&id), Err(DomainError::not_found("0")));
    }

    #[test]
    fn concurrent_creates_keep_unique_ids() {
        let store = setup();
        let threads = 8;
        let per_thread = 25;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..per_thread {
                        let invoice = validate_draft(&filled_draft(), today()).unwrap();
                        store.create(invoice).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2 + threads * per_thread);
        let mut ids: Vec<_> = listed.iter().map(|i| i.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), listed.len());
    }

    #[test]
    fn racing_duplicate_creates_admit_exactly_one() {
        let store = setup();
        let invoice = validate_draft(&filled_draft(), today()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                let invoice = invoice.clone();
                thread::spawn(move || store.create(invoice))
            })
            .collect();
        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            outcomes
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| matches!(e, DomainError::DuplicateId(_)))
        );
        assert_eq!(store.len().unwrap(), 3);
    }
}

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use invoicely_core::{Clock, DomainError, DomainResult, Entity, InvoiceId, SystemClock};
use invoicely_invoicing::{Invoice, InvoiceSummary, validation};

/// Authoritative, ordered collection of invoices keyed by id.
///
/// `create` and `update` only accept records that pass validation; a rejected
/// operation leaves the collection's contents, size and order untouched.
pub trait InvoiceStore: Send + Sync {
    /// Append a new invoice at the end of the collection.
    fn create(&self, invoice: Invoice) -> DomainResult<()>;
    /// A copy of the invoice with `id`.
    fn get_by_id(&self, id: &InvoiceId) -> DomainResult<Invoice>;
    /// Replace the invoice with `id` in place. `invoice.id` must equal `id`.
    fn update(&self, id: &InvoiceId, invoice: Invoice) -> DomainResult<()>;
    /// Remove the invoice with `id`, keeping the relative order of the rest.
    fn delete(&self, id: &InvoiceId) -> DomainResult<()>;
    /// Snapshot of every invoice in current order.
    fn list(&self) -> DomainResult<Vec<Invoice>>;

    /// Listing rows for tabular display, in current order.
    fn list_summaries(&self) -> DomainResult<Vec<InvoiceSummary>> {
        Ok(self.list()?.iter().map(InvoiceSummary::from).collect())
    }
}

impl<S> InvoiceStore for Arc<S>
where
    S: InvoiceStore + ?Sized,
{
    fn create(&self, invoice: Invoice) -> DomainResult<()> {
        (**self).create(invoice)
    }

    fn get_by_id(&self, id: &InvoiceId) -> DomainResult<Invoice> {
        (**self).get_by_id(id)
    }

    fn update(&self, id: &InvoiceId, invoice: Invoice) -> DomainResult<()> {
        (**self).update(id, invoice)
    }

    fn delete(&self, id: &InvoiceId) -> DomainResult<()> {
        (**self).delete(id)
    }

    fn list(&self) -> DomainResult<Vec<Invoice>> {
        (**self).list()
    }

    fn list_summaries(&self) -> DomainResult<Vec<InvoiceSummary>> {
        (**self).list_summaries()
    }
}

/// Process-lifetime invoice store.
///
/// A single lock guards the whole collection, so readers never observe a
/// partially-applied mutation. The clock supplies "today" for the date rule.
#[derive(Debug)]
pub struct InMemoryInvoiceStore {
    invoices: RwLock<Vec<Invoice>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            invoices: RwLock::new(Vec::new()),
            clock: Arc::new(clock),
        }
    }

    /// Load `records` through the regular `create` path, in order.
    pub fn with_seed(self, records: impl IntoIterator<Item = Invoice>) -> DomainResult<Self> {
        for record in records {
            self.create(record)?;
        }
        Ok(self)
    }

    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Vec<Invoice>>> {
        self.invoices
            .read()
            .map_err(|_| DomainError::unavailable("invoice store lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Vec<Invoice>>> {
        self.invoices
            .write()
            .map_err(|_| DomainError::unavailable("invoice store lock poisoned"))
    }

    fn check(&self, invoice: &Invoice) -> DomainResult<()> {
        validation::validate(invoice, self.clock.today()).map_err(|errors| {
            tracing::debug!(invoice_id = %invoice.id, violations = errors.len(), "invoice rejected");
            DomainError::Validation(errors)
        })
    }
}

impl Default for InMemoryInvoiceStore {
    fn default() -> Self {
        Self::new()
    }
}

fn position(invoices: &[Invoice], id: &InvoiceId) -> DomainResult<usize> {
    invoices
        .iter()
        .position(|i| i.id() == id)
        .ok_or_else(|| DomainError::not_found(id.as_str()))
}

impl InvoiceStore for InMemoryInvoiceStore {
    fn create(&self, invoice: Invoice) -> DomainResult<()> {
        self.check(&invoice)?;

        let mut invoices = self.write()?;
        if invoices.iter().any(|i| i.id() == invoice.id()) {
            tracing::warn!(invoice_id = %invoice.id, "create with an id that already exists");
            return Err(DomainError::duplicate_id(invoice.id.as_str()));
        }

        tracing::info!(invoice_id = %invoice.id, position = invoices.len(), "invoice created");
        invoices.push(invoice);
        Ok(())
    }

    fn get_by_id(&self, id: &InvoiceId) -> DomainResult<Invoice> {
        let invoices = self.read()?;
        let idx = position(&invoices, id)?;
        Ok(invoices[idx].clone())
    }

    fn update(&self, id: &InvoiceId, invoice: Invoice) -> DomainResult<()> {
        // Unknown ids are reported as such whatever the payload holds.
        let mut invoices = self.write()?;
        let idx = position(&invoices, id)?;
        if &invoice.id != id {
            return Err(DomainError::id_mismatch(id.as_str(), invoice.id.as_str()));
        }
        self.check(&invoice)?;

        invoices[idx] = invoice;

        tracing::info!(invoice_id = %id, position = idx, "invoice updated");
        Ok(())
    }

    fn delete(&self, id: &InvoiceId) -> DomainResult<()> {
        let mut invoices = self.write()?;
        let idx = position(&invoices, id)?;
        invoices.remove(idx);

        tracing::info!(invoice_id = %id, "invoice deleted");
        Ok(())
    }

    fn list(&self) -> DomainResult<Vec<Invoice>> {
        Ok(self.read()?.clone())
    }
}

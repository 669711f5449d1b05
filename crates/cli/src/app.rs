//! Composition root: owns the store and runs operator commands against it.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use invoicely_core::{Clock, DomainError, InvoiceId};
use invoicely_infra::{InMemoryInvoiceStore, InvoiceStore};
use invoicely_invoicing::{InvoiceDraft, seed_invoices, validate_draft};

use crate::cli::Command;
use crate::config::AppConfig;

/// Whether a command achieved what was asked (drives the exit code).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

pub struct App {
    store: Arc<InMemoryInvoiceStore>,
    clock: Arc<dyn Clock>,
}

impl App {
    /// Build the store for this process, seeding it when configured.
    pub fn build(config: &AppConfig, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let store = InMemoryInvoiceStore::with_clock(clock.clone());
        let store = if config.seed {
            store
                .with_seed(seed_invoices())
                .context("failed to load seed invoices")?
        } else {
            store
        };
        let invoices = store.len()?;
        tracing::info!(invoices, seeded = config.seed, "invoice store ready");

        Ok(Self {
            store: Arc::new(store),
            clock,
        })
    }

    /// Shared handle for collaborators that read or write invoices.
    pub fn store(&self) -> Arc<InMemoryInvoiceStore> {
        self.store.clone()
    }

    pub fn run(&self, command: &Command, out: &mut impl Write) -> anyhow::Result<Outcome> {
        match command {
            Command::List => self.list(out),
            Command::Show { id } => self.show(&InvoiceId::from(id.as_str()), out),
            Command::Check { path } => self.check(path, out),
            Command::Submit { path } => self.submit(path, out),
        }
    }

    fn list(&self, out: &mut impl Write) -> anyhow::Result<Outcome> {
        for row in self.store.list_summaries()? {
            writeln!(out, "{}", serde_json::to_string(&row)?)?;
        }
        Ok(Outcome::Success)
    }

    fn show(&self, id: &InvoiceId, out: &mut impl Write) -> anyhow::Result<Outcome> {
        match self.store.get_by_id(id) {
            Ok(invoice) => {
                writeln!(out, "{}", serde_json::to_string_pretty(&invoice)?)?;
                Ok(Outcome::Success)
            }
            Err(err) if err.is_not_found() => {
                writeln!(out, "invoice {id} not found")?;
                Ok(Outcome::Failure)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn check(&self, path: &Path, out: &mut impl Write) -> anyhow::Result<Outcome> {
        let draft = read_draft(path)?;
        match validate_draft(&draft, self.clock.today()) {
            Ok(_) => {
                writeln!(out, "valid")?;
                Ok(Outcome::Success)
            }
            Err(errors) => {
                writeln!(out, "{}", serde_json::to_string_pretty(&errors)?)?;
                Ok(Outcome::Failure)
            }
        }
    }

    fn submit(&self, path: &Path, out: &mut impl Write) -> anyhow::Result<Outcome> {
        let draft = read_draft(path)?;
        let invoice = match validate_draft(&draft, self.clock.today()) {
            Ok(invoice) => invoice,
            Err(errors) => {
                writeln!(out, "{}", serde_json::to_string_pretty(&errors)?)?;
                return Ok(Outcome::Failure);
            }
        };

        match self.store.create(invoice) {
            Ok(()) => self.list(out),
            Err(DomainError::DuplicateId(id)) => {
                writeln!(out, "invoice {id} already exists")?;
                Ok(Outcome::Failure)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn read_draft(path: &Path) -> anyhow::Result<InvoiceDraft> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("malformed draft {}", path.display()))
}

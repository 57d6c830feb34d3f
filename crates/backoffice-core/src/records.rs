//! # Records
//!
//! Process-lifetime collections behind the Merchants and Tickets pages.
//! Nothing here is persisted; a restart starts both collections empty.

use crate::form::FormRecord;
use crate::{CoreError, Result};
use serde::Serialize;

// =============================================================================
// MERCHANTS
// =============================================================================

/// An onboarded merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Merchant {
    pub id: String,
    pub application: FormRecord,
}

/// Merchants registered through the onboarding form, in submission order.
#[derive(Debug, Clone, Default)]
pub struct MerchantRegistry {
    merchants: Vec<Merchant>,
    next_seq: u32,
}

impl MerchantRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a submitted application and return its id (`MER-0001`, ...).
    pub fn add(&mut self, application: FormRecord) -> String {
        self.next_seq = self.next_seq.saturating_add(1);
        let id = format!("MER-{:04}", self.next_seq);
        tracing::debug!(id = %id, "merchant registered");
        self.merchants.push(Merchant {
            id: id.clone(),
            application,
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Merchant> {
        self.merchants.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn all(&self) -> &[Merchant] {
        &self.merchants
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.merchants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }
}

// =============================================================================
// TICKETS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Resolved,
}

/// A support ticket raised from the chatbot or the tickets page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: String,
    pub issue: String,
    pub status: TicketStatus,
}

#[derive(Debug, Clone, Default)]
pub struct TicketLog {
    tickets: Vec<Ticket>,
    next_seq: u32,
}

impl TicketLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a ticket and return its id (`TKT-0001`, ...).
    pub fn raise(&mut self, issue: impl Into<String>) -> String {
        self.next_seq = self.next_seq.saturating_add(1);
        let id = format!("TKT-{:04}", self.next_seq);
        self.tickets.push(Ticket {
            id: id.clone(),
            issue: issue.into(),
            status: TicketStatus::Open,
        });
        id
    }

    /// Mark a ticket resolved. Resolving twice is harmless.
    pub fn resolve(&mut self, id: &str) -> Result<()> {
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::UnknownTicket(id.to_owned()))?;
        ticket.status = TicketStatus::Resolved;
        Ok(())
    }

    #[must_use]
    pub fn all(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn open(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|t| t.status == TicketStatus::Open)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

//! Conditional-request coordinator.
//!
//! Each theatre identifier is either Absent or Present:
//!
//! - create: Absent → Present, no precondition
//! - read: no transition; `If-None-Match` equal to the current ETag gives
//!   NotModified
//! - replace: Present → Present; `If-Match` is required and must equal the
//!   current ETag
//! - delete: Present → Absent; `If-Match` is optional but must equal the
//!   current ETag when given
//!
//! Replace and delete run their ETag check and their write while holding the
//! identifier's [`KeyLocks`] guard, so a check can never pass against a
//! version that another writer is about to overwrite.

use crate::error::ConditionalError;
use crate::model::{Theatre, TheatreDraft};
use crate::query::TheatreQuery;
use chrono::{DateTime, Utc};
use nebula_canonical::{compute_etag, Canonicalizer, ETag};
use nebula_store::{KeyLocks, ResourceStore};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// A theatre together with the ETag of exactly that value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned {
    /// Stored value.
    pub theatre: Theatre,
    /// Strong validator for `theatre`.
    pub etag: ETag,
}

/// Result of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The client's copy is stale or absent; send the body.
    Fresh(Versioned),
    /// The client's `If-None-Match` equals the current ETag.
    NotModified {
        /// Current (and client-held) ETag.
        etag: ETag,
    },
}

/// Applies the ETag protocol on top of a [`ResourceStore`].
pub struct Coordinator<S> {
    store: S,
    locks: KeyLocks,
    canonicalizer: Canonicalizer,
    clock: Clock,
}

impl<S> Coordinator<S>
where
    S: ResourceStore<Theatre>,
{
    /// Creates a coordinator over `store` using the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(Utc::now))
    }

    /// Creates a coordinator with an explicit time source.
    pub fn with_clock(store: S, clock: Clock) -> Self {
        Self {
            store,
            locks: KeyLocks::new(),
            canonicalizer: Canonicalizer::new(),
            clock,
        }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Computes the ETag of a theatre value.
    pub fn etag(&self, theatre: &Theatre) -> Result<ETag, ConditionalError> {
        Ok(compute_etag(theatre, &self.canonicalizer)?)
    }

    /// Stores a new theatre under a fresh identifier.
    pub fn create(&self, draft: TheatreDraft) -> Result<Versioned, ConditionalError> {
        let theatre = Theatre::create(Uuid::new_v4(), draft, (self.clock)());
        let etag = self.etag(&theatre)?;
        self.store.put(theatre.id, theatre.clone())?;
        info!(id = %theatre.id, %etag, "theatre created");
        Ok(Versioned { theatre, etag })
    }

    /// Reads a theatre, honouring `If-None-Match`.
    pub fn read(
        &self,
        id: Uuid,
        if_none_match: Option<&str>,
    ) -> Result<ReadOutcome, ConditionalError> {
        let theatre = self.store.get(&id)?.ok_or(ConditionalError::NotFound)?;
        let etag = self.etag(&theatre)?;

        if if_none_match.is_some_and(|candidate| etag.matches(candidate)) {
            debug!(%id, %etag, "client copy is current");
            return Ok(ReadOutcome::NotModified { etag });
        }
        Ok(ReadOutcome::Fresh(Versioned { theatre, etag }))
    }

    /// Replaces every business field of an existing theatre.
    ///
    /// Never creates: an unknown identifier is [`ConditionalError::NotFound`].
    pub fn replace(
        &self,
        id: Uuid,
        draft: TheatreDraft,
        if_match: Option<&str>,
    ) -> Result<Versioned, ConditionalError> {
        // Blocking lock taken on a runtime worker: nothing may await while held.
        let _guard = self.locks.acquire(id);

        let existing = self.locked_existing(id)?;
        let current = self.etag(&existing)?;
        self.check_if_match(id, &current, if_match, true)?;

        let theatre = existing.replaced_by(draft, (self.clock)());
        let etag = self.etag(&theatre)?;
        self.store.put(id, theatre.clone())?;
        info!(%id, previous = %current, %etag, "theatre replaced");
        Ok(Versioned { theatre, etag })
    }

    /// Deletes a theatre, honouring an optional `If-Match`.
    pub fn delete(&self, id: Uuid, if_match: Option<&str>) -> Result<Theatre, ConditionalError> {
        // Blocking lock taken on a runtime worker: nothing may await while held.
        let _guard = self.locks.acquire(id);

        let existing = self.locked_existing(id)?;
        let current = self.etag(&existing)?;
        self.check_if_match(id, &current, if_match, false)?;

        self.store.delete(&id)?;
        self.locks.remove(&id);
        info!(%id, etag = %current, "theatre deleted");
        Ok(existing)
    }

    /// Lists theatres matching `query`, oldest first.
    pub fn list(&self, query: &TheatreQuery) -> Result<Vec<Theatre>, ConditionalError> {
        let mut theatres = self.store.list(query)?;
        theatres.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(theatres)
    }

    /// Loads `id` while its key guard is held. An unknown identifier gets
    /// its lock entry dropped before returning, so misses leave no trace in
    /// the lock table.
    fn locked_existing(&self, id: Uuid) -> Result<Theatre, ConditionalError> {
        match self.store.get(&id)? {
            Some(theatre) => Ok(theatre),
            None => {
                self.locks.remove(&id);
                Err(ConditionalError::NotFound)
            }
        }
    }

    fn check_if_match(
        &self,
        id: Uuid,
        current: &ETag,
        if_match: Option<&str>,
        required: bool,
    ) -> Result<(), ConditionalError> {
        match if_match {
            None if required => {
                warn!(%id, "write without If-Match");
                Err(ConditionalError::PreconditionRequired)
            }
            None => Ok(()),
            Some(candidate) if current.matches(candidate) => Ok(()),
            Some(candidate) => {
                warn!(%id, %current, supplied = candidate, "stale If-Match");
                Err(ConditionalError::PreconditionFailed)
            }
        }
    }
}

//! Property identifiers and the change records built from them.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// A closed set of observable attributes owned by one model.
///
/// Implemented by a small enum per model so that the identifiers a model can
/// emit are checked at compile time. `name` is the stable string form that
/// observers see in [`ChangeRecord::property_id`].
pub trait PropertyKey: Copy + Eq + Debug + 'static {
    /// Stable, non-empty name of this property.
    fn name(&self) -> &'static str;
}

/// Identifies the dispatcher that produced a change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SourceId(u64);

impl SourceId {
    /// Generate a new unique source ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::new()
    }
}

/// One notification: which property of which source went from what to what.
///
/// Records are only built by the dispatcher and are immutable once built.
/// Serializes as `{ "source", "propertyId", "oldValue", "newValue" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord<P> {
    source: SourceId,
    #[serde(skip)]
    property: P,
    property_id: &'static str,
    old_value: String,
    new_value: String,
}

impl<P: PropertyKey> ChangeRecord<P> {
    pub(crate) fn new(source: SourceId, property: P, old_value: String, new_value: String) -> Self {
        Self {
            source,
            property,
            property_id: property.name(),
            old_value,
            new_value,
        }
    }

    /// The dispatcher that emitted this record.
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// The typed property identifier.
    pub fn property(&self) -> P {
        self.property
    }

    /// String form of the property identifier.
    pub fn property_id(&self) -> &'static str {
        self.property_id
    }

    /// Value before the change, as text.
    pub fn old_value(&self) -> &str {
        &self.old_value
    }

    /// Value after the change, as text.
    pub fn new_value(&self) -> &str {
        &self.new_value
    }
}

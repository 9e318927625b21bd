//! Domain entity model.
//!
//! Purpose: Define the identity contract shared by every record the CRUD
//! service wrapper manages.

use uuid::Uuid;

/// A domain record uniquely identified by a UUID guid.
///
/// `KIND` is the human-readable entity type name carried in error messages.
///
/// # Examples
/// ```
/// use commons::models::Entity;
/// use uuid::Uuid;
///
/// struct Widget {
///     guid: Uuid,
/// }
///
/// impl Entity for Widget {
///     const KIND: &'static str = "Widget";
///
///     fn guid(&self) -> Uuid {
///         self.guid
///     }
/// }
/// ```
pub trait Entity: Send + Sync {
    /// Entity type name used in error messages.
    const KIND: &'static str;

    /// Stable unique identifier of this record.
    fn guid(&self) -> Uuid;
}

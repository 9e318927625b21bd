//! Traceability middleware decorating each response with correlation headers.
//!
//! Every request/response pair is stamped with a flat key-value correlation
//! set: a constant application id, the inbound transaction id when the client
//! supplies one, a freshly generated request id, and the handling duration in
//! milliseconds. The header keys are driven by [`TraceDatafill`]; the set
//! itself lives in a per-request [`TraceData`] mapping and is never shared
//! across requests.

pub mod compositor;
pub mod extractor;
pub mod filter;

pub use compositor::ResponseHeaderCompositor;
pub use extractor::RequestHeaderExtractor;
pub use filter::Traceability;

/// Header vocabulary shared by the traceability components.
///
/// Constructed once at startup and handed to [`Traceability::new`]; the
/// extractor, compositor, and filter all read it through a shared reference.
///
/// # Examples
/// ```
/// use commons::middleware::traceability::TraceDatafill;
///
/// let datafill = TraceDatafill::new("example-service");
/// assert_eq!(datafill.application_id, "X-Application-Id");
/// assert_eq!(datafill.application_name, "example-service");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceDatafill {
    /// Header key carrying the constant application identifier.
    pub application_id: String,
    /// Constant value written under the [`Self::application_id`] key.
    pub application_name: String,
    /// Header key carrying the client-supplied transaction identifier.
    pub transaction_id: String,
    /// Header key carrying the per-request identifier.
    pub request_id: String,
    /// Header key carrying the handling duration in milliseconds.
    pub duration: String,
    /// Separator joining multi-valued headers inside [`TraceData`].
    pub list_separator: String,
}

impl TraceDatafill {
    /// Default header vocabulary for the given application name.
    #[must_use]
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_id: "X-Application-Id".to_owned(),
            application_name: application_name.into(),
            transaction_id: "X-Transaction-Id".to_owned(),
            request_id: "X-Request-Id".to_owned(),
            duration: "X-Duration-Ms".to_owned(),
            list_separator: ",".to_owned(),
        }
    }
}

/// Insertion-ordered trace key-value set for a single request.
///
/// Keys are unique; inserting an existing key overwrites its value in place
/// without changing its position. A value may carry several logical values
/// joined by the configured separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceData(Vec<(String, String)>);

impl TraceData {
    /// Insert or overwrite an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(existing, _)| *existing == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Look up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

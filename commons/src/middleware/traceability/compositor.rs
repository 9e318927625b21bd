//! Writes trace data back onto outbound response headers.

use std::sync::Arc;

use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::error;

use super::{TraceData, TraceDatafill};

/// Appends a [`TraceData`] mapping onto a response header collection.
#[derive(Debug, Clone)]
pub struct ResponseHeaderCompositor {
    datafill: Arc<TraceDatafill>,
}

impl ResponseHeaderCompositor {
    /// Create a compositor over the shared header vocabulary.
    #[must_use]
    pub fn new(datafill: Arc<TraceDatafill>) -> Self {
        Self { datafill }
    }

    /// Append every present trace entry onto the outbound headers.
    ///
    /// Values joined with the configured separator are re-expanded into one
    /// header line per element, in split order. Keys absent from the mapping
    /// are skipped; existing headers are never replaced, only appended to.
    /// Values that cannot be encoded as a header are logged and skipped.
    pub fn compose(&self, trace_data: &TraceData, headers: &mut HeaderMap) {
        let keys = [
            self.datafill.application_id.as_str(),
            self.datafill.transaction_id.as_str(),
            self.datafill.request_id.as_str(),
            self.datafill.duration.as_str(),
        ];
        for key in keys {
            let Some(joined) = trace_data.get(key) else {
                continue;
            };
            for value in joined.split(self.datafill.list_separator.as_str()) {
                match (HeaderName::try_from(key), HeaderValue::from_str(value)) {
                    (Ok(name), Ok(header_value)) => {
                        headers.append(name, header_value);
                    }
                    _ => {
                        error!(key, value, "failed to encode trace header");
                    }
                }
            }
        }
    }
}

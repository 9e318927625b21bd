//! Builds the initial trace data set from inbound request headers.

use std::sync::Arc;

use actix_web::http::header::HeaderMap;
use uuid::Uuid;

use super::{TraceData, TraceDatafill};

/// Reads inbound request headers into a [`TraceData`] mapping.
///
/// Extraction has no failure path: absent optional headers are normal and
/// simply leave their key out of the mapping.
#[derive(Debug, Clone)]
pub struct RequestHeaderExtractor {
    datafill: Arc<TraceDatafill>,
}

impl RequestHeaderExtractor {
    /// Create an extractor over the shared header vocabulary.
    #[must_use]
    pub fn new(datafill: Arc<TraceDatafill>) -> Self {
        Self { datafill }
    }

    /// Produce the initial trace data for one request.
    ///
    /// The application id entry is constant. The transaction id is carried
    /// over only when the inbound request supplies one; multiple header lines
    /// are joined with the configured separator in arrival order. The request
    /// id is generated fresh on every invocation and never derived from a
    /// client-supplied value.
    #[must_use]
    pub fn extract(&self, headers: &HeaderMap) -> TraceData {
        let mut trace_data = TraceData::default();
        trace_data.insert(
            &self.datafill.application_id,
            &self.datafill.application_name,
        );
        let transaction_ids: Vec<&str> = headers
            .get_all(self.datafill.transaction_id.as_str())
            .filter_map(|value| value.to_str().ok())
            .collect();
        if !transaction_ids.is_empty() {
            trace_data.insert(
                &self.datafill.transaction_id,
                transaction_ids.join(&self.datafill.list_separator),
            );
        }
        trace_data.insert(&self.datafill.request_id, Uuid::new_v4().to_string());
        trace_data
    }
}

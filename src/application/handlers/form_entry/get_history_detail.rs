//! GetHistoryDetailHandler - Query handler for one of the caller's submissions.

use std::sync::Arc;

use crate::domain::form_entry::FormEntryError;
use crate::domain::foundation::{FormEntryId, Principal};
use crate::ports::{EntryDetail, FormEntryReader};

/// Query for one history entry.
#[derive(Debug, Clone)]
pub struct GetHistoryDetailQuery {
    pub entry_id: FormEntryId,
}

/// Handler for a history entry with its answers.
///
/// Field labels come from the current field rows, not from a snapshot taken
/// at submission time. Someone else's entry reads as missing.
pub struct GetHistoryDetailHandler {
    reader: Arc<dyn FormEntryReader>,
}

impl GetHistoryDetailHandler {
    pub fn new(reader: Arc<dyn FormEntryReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetHistoryDetailQuery,
        principal: &Principal,
    ) -> Result<EntryDetail, FormEntryError> {
        self.reader
            .find_for_user(&principal.user_id, query.entry_id)
            .await?
            .ok_or_else(|| FormEntryError::not_found(query.entry_id))
    }
}

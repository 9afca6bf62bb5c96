//! Form-entry module - end-user submissions against a campaign form.

mod entry;
mod errors;

pub use entry::{
    parse_answers, Answer, AnswerInput, EntryStatus, FormDetailEntry, FormEntry,
};
pub use errors::FormEntryError;

//! Workspace module - tenants and their membership rosters.

mod errors;
mod member;
mod workspace;

pub use errors::WorkspaceError;
pub use member::{MembershipStatus, WorkspaceMember};
pub use workspace::{Workspace, MAX_TITLE_LENGTH};

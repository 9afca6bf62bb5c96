//! Workspace and membership command and query handlers.

mod create_workspace;
mod delete_workspace;
mod get_member;
mod get_workspace;
mod invite_member;
mod list_members;
mod list_workspaces;
mod remove_member;
mod update_member_status;
mod update_workspace;

pub use create_workspace::{CreateWorkspaceCommand, CreateWorkspaceHandler};
pub use delete_workspace::{DeleteWorkspaceCommand, DeleteWorkspaceHandler};
pub use get_member::{GetMemberHandler, GetMemberQuery};
pub use get_workspace::{GetWorkspaceHandler, GetWorkspaceQuery};
pub use invite_member::{InviteMemberCommand, InviteMemberHandler};
pub use list_members::{ListMembersHandler, ListMembersQuery};
pub use list_workspaces::{ListWorkspacesHandler, ListWorkspacesQuery};
pub use remove_member::{RemoveMemberCommand, RemoveMemberHandler};
pub use update_member_status::{UpdateMemberStatusCommand, UpdateMemberStatusHandler};
pub use update_workspace::{UpdateWorkspaceCommand, UpdateWorkspaceHandler};

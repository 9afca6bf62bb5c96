//! Workspace, roster and access-check ports over the in-memory tables.

use async_trait::async_trait;

use super::store::{apply_sort, FailPoint, InMemoryStore, Stored, Tables};
use crate::domain::foundation::{
    CampaignId, DomainError, ErrorCode, MemberId, Page, PageRequest, UserId, WorkspaceId,
};
use crate::domain::workspace::{Workspace, WorkspaceMember};
use crate::ports::{
    AccessChecker, MemberView, WorkspaceReader, WorkspaceRepository, WorkspaceView,
};

fn workspace_not_found(id: WorkspaceId) -> DomainError {
    DomainError::new(ErrorCode::WorkspaceNotFound, format!("Workspace not found: {}", id))
}

fn member_not_found(id: MemberId) -> DomainError {
    DomainError::new(ErrorCode::MemberNotFound, format!("Member not found: {}", id))
}

fn holds_access(tables: &Tables, workspace_id: WorkspaceId, user_id: &UserId) -> bool {
    tables.members.iter().any(|m| {
        !m.deleted
            && m.value.workspace_id() == workspace_id
            && m.value.user_id() == user_id
            && m.value.grants_access()
    })
}

fn workspace_view(tables: &Tables, workspace: &Workspace) -> WorkspaceView {
    let campaigns = tables.live_campaign_ids(workspace.id());
    let total_entry = tables
        .entries
        .iter()
        .filter(|e| !e.deleted && campaigns.contains(&e.value.campaign_id()))
        .count() as u64;

    WorkspaceView {
        id: workspace.id(),
        key: workspace.key().to_string(),
        title: workspace.title().to_string(),
        slug: workspace.slug().to_string(),
        description: workspace.description().to_string(),
        is_publish: workspace.is_publish(),
        total_campaign: campaigns.len() as u64,
        total_entry,
        created_at: workspace.created_at(),
        updated_at: workspace.updated_at(),
    }
}

#[async_trait]
impl WorkspaceRepository for InMemoryStore {
    async fn create_with_owner(
        &self,
        workspace: &Workspace,
        owner: &WorkspaceMember,
    ) -> Result<(), DomainError> {
        self.write(|t| {
            if t.workspaces.iter().any(|w| w.value.key() == workspace.key()) {
                return Err(DomainError::new(
                    ErrorCode::DuplicateKey,
                    format!("Workspace key already taken: {}", workspace.key()),
                ));
            }
            t.workspaces.push(Stored::live(workspace.clone()));
            self.check(FailPoint::MemberInsert)?;
            t.members.push(Stored::live(owner.clone()));
            Ok(())
        })
    }

    async fn update(&self, workspace: &Workspace) -> Result<(), DomainError> {
        self.write(|t| {
            let row = t
                .workspaces
                .iter_mut()
                .find(|w| !w.deleted && w.value.id() == workspace.id())
                .ok_or_else(|| workspace_not_found(workspace.id()))?;
            row.value = workspace.clone();
            Ok(())
        })
    }

    async fn soft_delete(&self, id: WorkspaceId) -> Result<(), DomainError> {
        self.write(|t| {
            let row = t
                .workspaces
                .iter_mut()
                .find(|w| !w.deleted && w.value.id() == id)
                .ok_or_else(|| workspace_not_found(id))?;
            row.deleted = true;
            Ok(())
        })
    }

    async fn find_by_id(&self, id: WorkspaceId) -> Result<Option<Workspace>, DomainError> {
        self.read(|t| {
            t.workspaces
                .iter()
                .find(|w| !w.deleted && w.value.id() == id)
                .map(|w| w.value.clone())
        })
    }

    async fn add_member(&self, member: &WorkspaceMember) -> Result<(), DomainError> {
        self.write(|t| {
            self.check(FailPoint::MemberInsert)?;
            t.members.push(Stored::live(member.clone()));
            Ok(())
        })
    }

    async fn update_member(&self, member: &WorkspaceMember) -> Result<(), DomainError> {
        self.write(|t| {
            let row = t
                .members
                .iter_mut()
                .find(|m| !m.deleted && m.value.id() == member.id())
                .ok_or_else(|| member_not_found(member.id()))?;
            row.value = member.clone();
            Ok(())
        })
    }

    async fn soft_delete_member(&self, id: MemberId) -> Result<(), DomainError> {
        self.write(|t| {
            let row = t
                .members
                .iter_mut()
                .find(|m| !m.deleted && m.value.id() == id)
                .ok_or_else(|| member_not_found(id))?;
            row.deleted = true;
            Ok(())
        })
    }

    async fn find_member(
        &self,
        workspace_id: WorkspaceId,
        id: MemberId,
    ) -> Result<Option<WorkspaceMember>, DomainError> {
        self.read(|t| {
            t.members
                .iter()
                .find(|m| !m.deleted && m.value.id() == id && m.value.workspace_id() == workspace_id)
                .map(|m| m.value.clone())
        })
    }

    async fn find_member_by_user(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> Result<Option<WorkspaceMember>, DomainError> {
        self.read(|t| {
            t.members
                .iter()
                .find(|m| {
                    !m.deleted
                        && m.value.workspace_id() == workspace_id
                        && m.value.user_id() == user_id
                })
                .map(|m| m.value.clone())
        })
    }
}

#[async_trait]
impl WorkspaceReader for InMemoryStore {
    async fn list(
        &self,
        member: Option<&UserId>,
        request: &PageRequest,
    ) -> Result<Page<WorkspaceView>, DomainError> {
        self.read(|t| {
            let mut views: Vec<WorkspaceView> = t
                .workspaces
                .iter()
                .filter(|w| !w.deleted)
                .filter(|w| member.map_or(true, |u| holds_access(t, w.value.id(), u)))
                .filter(|w| request.matches_search(w.value.title()))
                .map(|w| workspace_view(t, &w.value))
                .collect();
            apply_sort(&mut views, request.sort.as_ref(), |column, a, b| match column {
                "title" => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                "updated_at" => a.updated_at.cmp(&b.updated_at),
                _ => a.created_at.cmp(&b.created_at),
            });
            Page::from_all(views, request)
        })
    }

    async fn get(&self, id: WorkspaceId) -> Result<Option<WorkspaceView>, DomainError> {
        self.read(|t| {
            t.workspaces
                .iter()
                .find(|w| !w.deleted && w.value.id() == id)
                .map(|w| workspace_view(t, &w.value))
        })
    }

    async fn list_members(
        &self,
        workspace_id: WorkspaceId,
        request: &PageRequest,
    ) -> Result<Page<MemberView>, DomainError> {
        self.read(|t| {
            let mut views: Vec<MemberView> = t
                .members
                .iter()
                .filter(|m| !m.deleted && m.value.workspace_id() == workspace_id)
                .filter(|m| request.matches_search(m.value.user_id().as_str()))
                .map(|m| MemberView::from(&m.value))
                .collect();
            apply_sort(&mut views, request.sort.as_ref(), |column, a, b| match column {
                "user_id" => a.user_id.cmp(&b.user_id),
                "status" => a.status.code().cmp(b.status.code()),
                _ => a.created_at.cmp(&b.created_at),
            });
            Page::from_all(views, request)
        })
    }
}

#[async_trait]
impl AccessChecker for InMemoryStore {
    async fn has_workspace_access(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        self.read(|t| t.workspace_is_live(workspace_id) && holds_access(t, workspace_id, user_id))
    }

    async fn has_campaign_access(
        &self,
        workspace_id: WorkspaceId,
        campaign_id: CampaignId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        self.read(|t| {
            t.live_campaign(campaign_id)
                .map_or(false, |c| c.workspace_id() == workspace_id)
                && holds_access(t, workspace_id, user_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QueryParams;
    use crate::domain::workspace::MembershipStatus;
    use crate::ports::WORKSPACE_SORT_COLUMNS;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn seeded(store: &InMemoryStore, title: &str, owner: &str) -> Workspace {
        let workspace = Workspace::new(title, "", true).unwrap();
        let member = WorkspaceMember::owner(workspace.id(), user(owner));
        store.create_with_owner(&workspace, &member).await.unwrap();
        workspace
    }

    #[tokio::test]
    async fn owner_gets_access() {
        let store = InMemoryStore::new();
        let ws = seeded(&store, "Acme", "alice").await;

        assert!(store.has_workspace_access(ws.id(), &user("alice")).await.unwrap());
        assert!(!store.has_workspace_access(ws.id(), &user("bob")).await.unwrap());
    }

    #[tokio::test]
    async fn invited_member_has_no_access_until_approved() {
        let store = InMemoryStore::new();
        let ws = seeded(&store, "Acme", "alice").await;
        let mut member = WorkspaceMember::new(ws.id(), user("bob"), MembershipStatus::Invited);
        store.add_member(&member).await.unwrap();
        assert!(!store.has_workspace_access(ws.id(), &user("bob")).await.unwrap());

        member.change_status(MembershipStatus::Approved);
        store.update_member(&member).await.unwrap();
        assert!(store.has_workspace_access(ws.id(), &user("bob")).await.unwrap());
    }

    #[tokio::test]
    async fn failed_owner_insert_rolls_back_workspace() {
        let store = InMemoryStore::new();
        store.fail_at(FailPoint::MemberInsert);

        let workspace = Workspace::new("Acme", "", true).unwrap();
        let member = WorkspaceMember::owner(workspace.id(), user("alice"));
        assert!(store.create_with_owner(&workspace, &member).await.is_err());

        assert!(store.find_by_id(workspace.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleted_workspace_disappears_from_reads_and_access() {
        let store = InMemoryStore::new();
        let ws = seeded(&store, "Acme", "alice").await;
        store.soft_delete(ws.id()).await.unwrap();

        assert!(store.get(ws.id()).await.unwrap().is_none());
        assert!(!store.has_workspace_access(ws.id(), &user("alice")).await.unwrap());
        let err = store.soft_delete(ws.id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkspaceNotFound);
    }

    #[tokio::test]
    async fn list_filters_by_membership_and_sorts() {
        let store = InMemoryStore::new();
        seeded(&store, "Beta", "alice").await;
        seeded(&store, "Alpha", "alice").await;
        seeded(&store, "Gamma", "bob").await;

        let request = QueryParams::default()
            .with_order_by("title:asc")
            .resolve(WORKSPACE_SORT_COLUMNS)
            .unwrap();
        let mine = store.list(Some(&user("alice")), &request).await.unwrap();
        let titles: Vec<_> = mine.items.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);

        let all = store.list(None, &request).await.unwrap();
        assert_eq!(all.total, 3);
    }

    #[tokio::test]
    async fn removed_member_is_hidden() {
        let store = InMemoryStore::new();
        let ws = seeded(&store, "Acme", "alice").await;
        let member = WorkspaceMember::new(ws.id(), user("bob"), MembershipStatus::Approved);
        store.add_member(&member).await.unwrap();
        store.soft_delete_member(member.id()).await.unwrap();

        assert!(store
            .find_member_by_user(ws.id(), &user("bob"))
            .await
            .unwrap()
            .is_none());
        let roster = store
            .list_members(ws.id(), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(roster.total, 1);
    }
}

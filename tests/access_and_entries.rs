//! Authorization, submission atomicity and soft-delete filtering.

mod common;

use common::{principal, text_field, Fixture};
use kiraform::adapters::memory::FailPoint;
use kiraform::application::handlers::{
    CreateCampaignCommand, CreateCampaignHandler, CreateWorkspaceCommand, CreateWorkspaceHandler,
    DeleteCampaignCommand, DeleteCampaignHandler, DeleteWorkspaceCommand, DeleteWorkspaceHandler,
    GetCampaignHandler, GetCampaignQuery, GetHistoryHandler, GetHistoryQuery,
    InviteMemberCommand, InviteMemberHandler, ListCampaignsHandler, ListCampaignsQuery,
    ListMembersHandler, ListMembersQuery, ListWorkspacesHandler, ListWorkspacesQuery,
    PreviewCampaignHandler, PreviewCampaignQuery, RemoveMemberCommand, RemoveMemberHandler,
    SubmitEntryCommand, SubmitEntryHandler, UpdateMemberStatusCommand, UpdateMemberStatusHandler,
};
use kiraform::domain::campaign::CampaignError;
use kiraform::domain::form_entry::{AnswerInput, FormEntryError};
use kiraform::domain::foundation::{CampaignId, ErrorKind, Principal, QueryParams, WorkspaceId};
use kiraform::domain::workspace::{MembershipStatus, WorkspaceError};
use kiraform::ports::CampaignRepository;

async fn submit(
    fx: &Fixture,
    campaign_id: CampaignId,
    submitter: &Principal,
) -> Result<(), FormEntryError> {
    let answers = fx
        .forms(campaign_id)
        .await
        .iter()
        .map(|f| AnswerInput {
            campaign_form_id: f.id.to_string(),
            campaign_form_attribute_id: None,
            value: "answer".to_string(),
        })
        .collect();
    SubmitEntryHandler::new(fx.store.clone(), fx.store.clone())
        .handle(
            SubmitEntryCommand {
                campaign_id,
                product_id: None,
                answers,
            },
            Some(submitter),
        )
        .await
        .map(|_| ())
}

// =============================================================================
// Authorization
// =============================================================================

#[tokio::test]
async fn admin_passes_without_any_membership_row() {
    let fx = Fixture::new().await;
    let root = principal("root", "ADMIN");
    let guard = fx.guard();

    assert!(guard
        .can_access_workspace(&root, WorkspaceId::new())
        .await
        .unwrap());
    assert!(guard
        .can_access_campaign(&root, WorkspaceId::new(), CampaignId::new())
        .await
        .unwrap());
}

#[tokio::test]
async fn membership_grants_access_only_once_approved() {
    let fx = Fixture::new().await;
    let campaign_id = fx.create_campaign(vec![text_field("Name")]).await.unwrap();
    let bob = principal("bob", "user");
    let guard = fx.guard();

    assert!(!guard.can_access_workspace(&bob, fx.workspace_id).await.unwrap());

    let member = InviteMemberHandler::new(guard.clone(), fx.store.clone())
        .handle(
            InviteMemberCommand {
                workspace_id: fx.workspace_id,
                user_id: "bob".to_string(),
                status: MembershipStatus::Invited,
            },
            &fx.owner,
        )
        .await
        .unwrap();
    assert!(!guard.can_access_workspace(&bob, fx.workspace_id).await.unwrap());
    assert!(!guard
        .can_access_campaign(&bob, fx.workspace_id, campaign_id)
        .await
        .unwrap());

    UpdateMemberStatusHandler::new(guard.clone(), fx.store.clone())
        .handle(
            UpdateMemberStatusCommand {
                workspace_id: fx.workspace_id,
                member_id: member.id(),
                status: MembershipStatus::Approved,
            },
            &fx.owner,
        )
        .await
        .unwrap();
    assert!(guard.can_access_workspace(&bob, fx.workspace_id).await.unwrap());
    assert!(guard
        .can_access_campaign(&bob, fx.workspace_id, campaign_id)
        .await
        .unwrap());
}

#[tokio::test]
async fn campaign_access_requires_the_campaign_to_be_in_that_workspace() {
    let fx = Fixture::new().await;
    let other = CreateWorkspaceHandler::new(fx.store.clone())
        .handle(
            CreateWorkspaceCommand {
                title: "Second Studio".to_string(),
                description: String::new(),
                is_publish: true,
            },
            &fx.owner,
        )
        .await
        .unwrap();
    let foreign = CreateCampaignHandler::new(fx.guard(), fx.store.clone(), fx.store.clone())
        .handle(
            CreateCampaignCommand {
                workspace_id: other.id(),
                title: "Elsewhere".to_string(),
                description: String::new(),
                is_publish: true,
                fields: vec![],
            },
            &fx.owner,
        )
        .await
        .unwrap()
        .id();
    let guard = fx.guard();

    assert!(guard
        .can_access_campaign(&fx.owner, other.id(), foreign)
        .await
        .unwrap());
    assert!(!guard
        .can_access_campaign(&fx.owner, fx.workspace_id, foreign)
        .await
        .unwrap());
}

#[tokio::test]
async fn duplicate_invitation_is_a_conflict() {
    let fx = Fixture::new().await;
    let handler = InviteMemberHandler::new(fx.guard(), fx.store.clone());
    let cmd = InviteMemberCommand {
        workspace_id: fx.workspace_id,
        user_id: "carol".to_string(),
        status: MembershipStatus::Requested,
    };

    handler.handle(cmd.clone(), &fx.owner).await.unwrap();
    let err = handler.handle(cmd, &fx.owner).await.unwrap_err();

    assert!(matches!(err, WorkspaceError::AlreadyMember(_)));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

// =============================================================================
// Submission atomicity
// =============================================================================

#[tokio::test]
async fn failed_detail_insert_leaves_no_entry_header() {
    let fx = Fixture::new().await;
    let visitor = principal("visitor", "user");
    let campaign_id = fx
        .create_campaign(vec![text_field("Name"), text_field("Email")])
        .await
        .unwrap();
    fx.store.fail_at(FailPoint::DetailInsert);

    let result = submit(&fx, campaign_id, &visitor).await;

    assert!(matches!(result, Err(FormEntryError::Infrastructure(_))));
    assert_eq!(fx.store.entry_row_count(), 0);
    let history = GetHistoryHandler::new(fx.store.clone())
        .handle(GetHistoryQuery::default(), &visitor)
        .await
        .unwrap();
    assert_eq!(history.total, 0);
}

// =============================================================================
// Soft-delete filtering
// =============================================================================

#[tokio::test]
async fn deleted_campaign_disappears_from_every_read() {
    let fx = Fixture::new().await;
    let visitor = principal("visitor", "user");
    let kept = fx.create_campaign(vec![text_field("Name")]).await.unwrap();
    let dropped = fx.create_campaign(vec![text_field("Name")]).await.unwrap();
    submit(&fx, dropped, &visitor).await.unwrap();
    let key = CampaignRepository::find(fx.store.as_ref(), dropped)
        .await
        .unwrap()
        .unwrap()
        .key()
        .to_string();

    DeleteCampaignHandler::new(fx.guard(), fx.store.clone())
        .handle(
            DeleteCampaignCommand {
                workspace_id: fx.workspace_id,
                campaign_id: dropped,
            },
            &fx.owner,
        )
        .await
        .unwrap();

    let listed = ListCampaignsHandler::new(fx.guard(), fx.store.clone())
        .handle(
            ListCampaignsQuery {
                workspace_id: fx.workspace_id,
                params: QueryParams::default(),
            },
            &fx.owner,
        )
        .await
        .unwrap();
    assert_eq!(listed.total, 1);
    assert_eq!(listed.items[0].id, kept);

    let fetched = GetCampaignHandler::new(fx.guard(), fx.store.clone(), fx.store.clone())
        .handle(
            GetCampaignQuery {
                workspace_id: fx.workspace_id,
                campaign_id: dropped,
            },
            &principal("root", "admin"),
        )
        .await;
    assert!(matches!(fetched, Err(CampaignError::NotFound(_))));

    let previewed = PreviewCampaignHandler::new(fx.store.clone(), fx.store.clone())
        .handle(PreviewCampaignQuery { key })
        .await;
    assert!(matches!(previewed, Err(CampaignError::KeyNotFound(_))));

    assert!(submit(&fx, dropped, &visitor).await.is_err());
}

#[tokio::test]
async fn removed_member_is_unlisted_and_loses_access() {
    let fx = Fixture::new().await;
    let dave = principal("dave", "user");
    let guard = fx.guard();
    let member = InviteMemberHandler::new(guard.clone(), fx.store.clone())
        .handle(
            InviteMemberCommand {
                workspace_id: fx.workspace_id,
                user_id: "dave".to_string(),
                status: MembershipStatus::Approved,
            },
            &fx.owner,
        )
        .await
        .unwrap();
    assert!(guard.can_access_workspace(&dave, fx.workspace_id).await.unwrap());

    RemoveMemberHandler::new(guard.clone(), fx.store.clone())
        .handle(
            RemoveMemberCommand {
                workspace_id: fx.workspace_id,
                member_id: member.id(),
            },
            &fx.owner,
        )
        .await
        .unwrap();

    let roster = ListMembersHandler::new(guard.clone(), fx.store.clone())
        .handle(
            ListMembersQuery {
                workspace_id: fx.workspace_id,
                params: QueryParams::default(),
            },
            &fx.owner,
        )
        .await
        .unwrap();
    assert!(roster.items.iter().all(|m| m.id != member.id()));
    assert!(!guard.can_access_workspace(&dave, fx.workspace_id).await.unwrap());
}

#[tokio::test]
async fn deleted_workspace_hides_its_campaigns() {
    let fx = Fixture::new().await;
    let campaign_id = fx.create_campaign(vec![text_field("Name")]).await.unwrap();

    DeleteWorkspaceHandler::new(fx.guard(), fx.store.clone())
        .handle(
            DeleteWorkspaceCommand {
                workspace_id: fx.workspace_id,
            },
            &fx.owner,
        )
        .await
        .unwrap();

    let workspaces = ListWorkspacesHandler::new(fx.store.clone())
        .handle(ListWorkspacesQuery::default(), &fx.owner)
        .await
        .unwrap();
    assert_eq!(workspaces.total, 0);
    assert!(submit(&fx, campaign_id, &fx.owner).await.is_err());
}

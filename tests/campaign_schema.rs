//! Campaign creation and schema reconciliation, end to end through the
//! handlers and the in-memory store.

mod common;

use std::collections::HashSet;

use common::{choice_field, existing, option, principal, text_field, Fixture};
use kiraform::adapters::memory::FailPoint;
use kiraform::application::handlers::{
    GetHistoryDetailHandler, GetHistoryDetailQuery, SubmitEntryCommand, SubmitEntryHandler,
};
use kiraform::domain::form_entry::AnswerInput;

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn failed_field_insert_leaves_no_campaign_rows() {
    let fx = Fixture::new().await;
    fx.store.fail_at(FailPoint::FieldInsert);

    let result = fx
        .create_campaign(vec![text_field("Name"), choice_field("Size", &["S", "M"])])
        .await;

    assert!(result.is_err());
    assert_eq!(fx.store.campaign_row_count(), 0);
}

#[tokio::test]
async fn failed_option_insert_leaves_no_field_rows() {
    let fx = Fixture::new().await;
    fx.store.fail_at(FailPoint::AttributeInsert);

    assert!(fx
        .create_campaign(vec![text_field("Name"), choice_field("Size", &["S"])])
        .await
        .is_err());
    fx.store.clear_failures();
    let id = fx.create_campaign(vec![text_field("Name")]).await.unwrap();

    assert_eq!(fx.store.campaign_row_count(), 1);
    assert_eq!(fx.store.raw_fields(id).len(), 1);
}

#[tokio::test]
async fn schema_reads_back_in_payload_order() {
    let fx = Fixture::new().await;
    let id = fx
        .create_campaign(vec![
            text_field("Name"),
            choice_field("Colour", &["Red", "Green", "Blue"]),
            text_field("Comment"),
        ])
        .await
        .unwrap();

    let forms = fx.forms(id).await;

    let titles: Vec<_> = forms.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["Name", "Colour", "Comment"]);
    let labels: Vec<_> = forms[1].attributes.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["Red", "Green", "Blue"]);
    assert!(forms[1]
        .attributes
        .iter()
        .all(|a| a.campaign_form_id == forms[1].id));
}

#[tokio::test]
async fn generated_keys_are_unique_even_when_created_concurrently() {
    let fx = Fixture::new().await;
    let mut ids = Vec::new();
    for _ in 0..10 {
        ids.push(fx.create_campaign(vec![]).await.unwrap());
    }
    let (a, b) = tokio::join!(fx.create_campaign(vec![]), fx.create_campaign(vec![]));
    ids.push(a.unwrap());
    ids.push(b.unwrap());

    let mut keys = HashSet::new();
    for id in &ids {
        let campaign = kiraform::ports::CampaignRepository::find(fx.store.as_ref(), *id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(campaign.key().len(), 8);
        keys.insert(campaign.key().to_string());
    }
    assert_eq!(keys.len(), ids.len());
}

// =============================================================================
// Reconciliation
// =============================================================================

#[tokio::test]
async fn omitted_field_is_soft_deleted_and_kept_fields_update_in_place() {
    let fx = Fixture::new().await;
    let id = fx
        .create_campaign(vec![text_field("A"), text_field("B"), text_field("C")])
        .await
        .unwrap();
    let before = fx.forms(id).await;
    let mut a = existing(&before[0]);
    a.title = "A'".to_string();
    let mut c = existing(&before[2]);
    c.title = "C'".to_string();

    fx.update_fields(id, vec![a, c]).await.unwrap();

    let after = fx.forms(id).await;
    assert_eq!(after.len(), 2);
    assert_eq!(after[0].id, before[0].id);
    assert_eq!(after[0].title, "A'");
    assert_eq!(after[1].id, before[2].id);
    assert_eq!(after[1].title, "C'");

    let raw = fx.store.raw_fields(id);
    assert_eq!(raw.len(), 3);
    let b = raw.iter().find(|(f, _)| f.id == before[1].id).unwrap();
    assert!(b.1);
}

#[tokio::test]
async fn field_without_id_is_created_under_the_campaign() {
    let fx = Fixture::new().await;
    let id = fx.create_campaign(vec![text_field("Name")]).await.unwrap();
    let before = fx.forms(id).await;

    fx.update_fields(
        id,
        vec![existing(&before[0]), choice_field("Size", &["S", "L"])],
    )
    .await
    .unwrap();

    assert_eq!(fx.store.raw_fields(id).len(), 2);
    let after = fx.forms(id).await;
    let created = &after[1];
    assert_ne!(created.id, before[0].id);
    assert_eq!(created.campaign_id, id);
    assert_eq!(created.attributes.len(), 2);
    assert!(created
        .attributes
        .iter()
        .all(|a| a.campaign_form_id == created.id));
}

#[tokio::test]
async fn option_diff_deletes_omitted_and_creates_new() {
    let fx = Fixture::new().await;
    let id = fx
        .create_campaign(vec![choice_field("Size", &["X", "Y"])])
        .await
        .unwrap();
    let field = fx.forms(id).await.remove(0);
    let x_id = field.attributes[0].id;

    let mut only_x = existing(&field);
    only_x.attributes = vec![option(Some(x_id.to_string()), "X'")];
    fx.update_fields(id, vec![only_x.clone()]).await.unwrap();

    let after = fx.forms(id).await.remove(0);
    assert_eq!(after.attributes.len(), 1);
    assert_eq!(after.attributes[0].id, x_id);
    assert_eq!(after.attributes[0].label, "X'");

    let mut with_z = only_x;
    with_z.attributes.push(option(None, "Z"));
    fx.update_fields(id, vec![with_z]).await.unwrap();

    let after = fx.forms(id).await.remove(0);
    let labels: Vec<_> = after.attributes.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["X'", "Z"]);
    assert_eq!(after.attributes[0].id, x_id);
}

#[tokio::test]
async fn malformed_id_fails_before_any_write() {
    let fx = Fixture::new().await;
    let id = fx
        .create_campaign(vec![text_field("A"), text_field("B")])
        .await
        .unwrap();
    let before = fx.forms(id).await;
    let mut broken = existing(&before[1]);
    broken.id = Some("not-a-uuid".to_string());

    let err = fx
        .update_fields(id, vec![existing(&before[0]), broken])
        .await
        .unwrap_err();

    assert!(err.contains("fields[1].id"));
    assert_eq!(fx.forms(id).await, before);
}

#[tokio::test]
async fn failed_apply_rolls_back_the_whole_diff() {
    let fx = Fixture::new().await;
    let id = fx.create_campaign(vec![text_field("A")]).await.unwrap();
    let before = fx.forms(id).await;
    fx.store.fail_at(FailPoint::FieldInsert);

    assert!(fx
        .update_fields(id, vec![text_field("New")])
        .await
        .is_err());

    assert_eq!(fx.forms(id).await, before);
    assert!(fx.store.raw_fields(id).iter().all(|(_, deleted)| !deleted));
}

// =============================================================================
// Worked example
// =============================================================================

#[tokio::test]
async fn entry_outlives_the_field_it_answered() {
    let fx = Fixture::new().await;
    let visitor = principal("visitor", "user");
    let id = fx.create_campaign(vec![text_field("F1")]).await.unwrap();
    let f1 = fx.forms(id).await.remove(0);

    let entry = SubmitEntryHandler::new(fx.store.clone(), fx.store.clone())
        .handle(
            SubmitEntryCommand {
                campaign_id: id,
                product_id: None,
                answers: vec![AnswerInput {
                    campaign_form_id: f1.id.to_string(),
                    campaign_form_attribute_id: None,
                    value: "hello".to_string(),
                }],
            },
            Some(&visitor),
        )
        .await
        .unwrap();

    fx.update_fields(id, vec![]).await.unwrap();

    assert!(fx.forms(id).await.is_empty());
    let detail = GetHistoryDetailHandler::new(fx.store.clone())
        .handle(GetHistoryDetailQuery { entry_id: entry.id() }, &visitor)
        .await
        .unwrap();
    assert_eq!(detail.details.len(), 1);
    assert_eq!(detail.details[0].campaign_form_id, f1.id);
    assert_eq!(detail.details[0].value, "hello");
}

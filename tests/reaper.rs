// ABOUTME: Tests for discovery and deletion of old stack generations.
// ABOUTME: Covers tag scoping, multi-page listings and partial failure.

mod support;

use risr::deploy::{DeployError, find_old_groups, reap_old_groups};
use risr::provider::ProviderError;
use risr::types::{GroupName, StackName};
use support::mock_provider::{Call, MockProvider, foreign_group, stack_group};

fn web() -> StackName {
    StackName::new("web").unwrap()
}

fn keep() -> GroupName {
    GroupName::new("web-new001")
}

#[tokio::test]
async fn finds_only_tagged_groups_of_the_stack() {
    let mock = MockProvider::new()
        .with_existing_group(stack_group("web-abc123", "web"))
        .with_existing_group(stack_group("web2-abc123", "web2"))
        .with_existing_group(foreign_group("web-untagged"))
        .with_existing_group(stack_group("web-new001", "web"));

    let old = find_old_groups(&mock, &web(), &keep()).await.unwrap();

    assert_eq!(old, vec![GroupName::new("web-abc123")]);
}

#[tokio::test]
async fn reads_every_page() {
    let mut mock = MockProvider::new().with_page_size(2);
    for i in 0..7 {
        mock = mock.with_existing_group(stack_group(&format!("web-00000{i}"), "web"));
    }

    let old = find_old_groups(&mock, &web(), &keep()).await.unwrap();

    assert_eq!(old.len(), 7);
    assert_eq!(mock.count(|c| matches!(c, Call::ListGroupsPage(_))), 4);
}

#[tokio::test]
async fn deletes_each_old_group_once_with_force() {
    let mock = MockProvider::new()
        .with_page_size(1)
        .with_existing_group(stack_group("web-aaa111", "web"))
        .with_existing_group(stack_group("web-bbb222", "web"));

    let removed = reap_old_groups(&mock, &web(), &keep()).await.unwrap();

    assert_eq!(
        removed,
        vec![GroupName::new("web-aaa111"), GroupName::new("web-bbb222")]
    );
    assert_eq!(
        mock.deletes(),
        vec![
            ("web-aaa111".to_string(), true),
            ("web-bbb222".to_string(), true),
        ]
    );
}

#[tokio::test]
async fn listing_completes_before_first_delete() {
    let mock = MockProvider::new()
        .with_page_size(1)
        .with_existing_group(stack_group("web-aaa111", "web"))
        .with_existing_group(stack_group("web-bbb222", "web"));

    reap_old_groups(&mock, &web(), &keep()).await.unwrap();

    assert_eq!(
        mock.calls(),
        vec![
            Call::ListGroupsPage(0),
            Call::ListGroupsPage(1),
            Call::DeleteGroup {
                name: "web-aaa111".to_string(),
                force: true
            },
            Call::DeleteGroup {
                name: "web-bbb222".to_string(),
                force: true
            },
        ]
    );
}

#[tokio::test]
async fn first_delete_failure_stops_the_sweep() {
    let mock = MockProvider::new()
        .with_existing_group(stack_group("web-aaa111", "web"))
        .with_existing_group(stack_group("web-bbb222", "web"))
        .with_existing_group(stack_group("web-ccc333", "web"))
        .fail_delete(
            "web-bbb222",
            ProviderError::Transport("throttled".to_string()),
        );

    let err = reap_old_groups(&mock, &web(), &keep()).await.unwrap_err();

    assert!(matches!(err, DeployError::DeleteGroup { ref name, .. } if name == "web-bbb222"));
    assert_eq!(
        mock.deletes(),
        vec![
            ("web-aaa111".to_string(), true),
            ("web-bbb222".to_string(), true),
        ]
    );
}

#[tokio::test]
async fn listing_failure_deletes_nothing() {
    let mock = MockProvider::new()
        .with_existing_group(stack_group("web-aaa111", "web"))
        .fail_list(ProviderError::Transport("timeout".to_string()));

    let err = reap_old_groups(&mock, &web(), &keep()).await.unwrap_err();

    assert!(matches!(err, DeployError::ListGroups(_)));
    assert!(mock.deletes().is_empty());
}

#[tokio::test]
async fn nothing_to_reap_is_ok() {
    let mock = MockProvider::new().with_existing_group(foreign_group("legacy"));

    let removed = reap_old_groups(&mock, &web(), &keep()).await.unwrap();

    assert!(removed.is_empty());
    assert!(mock.deletes().is_empty());
}

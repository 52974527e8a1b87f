//! End-to-end dispatch through the service container.

use rstest::{fixture, rstest};
use switchboard::mediator::services::DispatchError;
use switchboard::outcome::FailureKind;
use tokio_util::sync::CancellationToken;

use super::helpers::{Catalogue, CreateItem, GetItem, RemoveItem, catalogue};

#[fixture]
fn app() -> Catalogue {
    catalogue()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn command_then_query_reach_their_handlers(app: Catalogue) {
    let id = app
        .mediator
        .execute(CreateItem { name: "lamp".into() }, CancellationToken::new())
        .await
        .expect("dispatch should succeed")
        .expect("creation should succeed");

    let name = app
        .mediator
        .query(GetItem { id }, CancellationToken::new())
        .await
        .expect("dispatch should succeed")
        .expect("item should exist");

    assert_eq!(name, "lamp");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handler_failures_pass_through_unchanged(app: Catalogue) {
    app.mediator
        .send(CreateItem { name: "lamp".into() }, CancellationToken::new())
        .await
        .expect("dispatch should succeed")
        .expect("first creation should succeed");

    let failure = app
        .mediator
        .send(CreateItem { name: "lamp".into() }, CancellationToken::new())
        .await
        .expect("dispatch should succeed")
        .expect_err("duplicate creation should fail");

    assert_eq!(failure.kind(), FailureKind::ResourceConflict);
    assert_eq!(failure.code(), "item.exists");
    assert_eq!(failure.issues(), ["item 'lamp' already exists"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validation_failures_are_reported_as_invalid_requests(app: Catalogue) {
    let failure = app
        .mediator
        .send(CreateItem { name: "  ".into() }, CancellationToken::new())
        .await
        .expect("dispatch should succeed")
        .expect_err("blank name should be rejected");

    assert_eq!(failure.kind(), FailureKind::RequestInvalid);
    assert_eq!(failure.kind().status_code(), 400);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn void_requests_mutate_shared_state(app: Catalogue) {
    let id = app
        .mediator
        .send(CreateItem { name: "desk".into() }, CancellationToken::new())
        .await
        .expect("dispatch should succeed")
        .expect("creation should succeed");

    app.mediator
        .send_void(RemoveItem { id }, CancellationToken::new())
        .await
        .expect("void dispatch should succeed");

    assert!(app.store.lock().expect("store lock").is_empty());
    let failure = app
        .mediator
        .send(GetItem { id }, CancellationToken::new())
        .await
        .expect("dispatch should succeed")
        .expect_err("removed item should be missing");
    assert_eq!(failure.kind(), FailureKind::ResourceNotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn absent_requests_fail_before_lookup(app: Catalogue) {
    let result = app
        .mediator
        .send_optional::<GetItem>(None, CancellationToken::new())
        .await;
    assert!(matches!(result, Err(DispatchError::MissingRequest)));

    let void_result = app
        .mediator
        .send_void_optional::<RemoveItem>(None, CancellationToken::new())
        .await;
    assert!(matches!(void_result, Err(DispatchError::MissingRequest)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn present_optional_requests_dispatch_normally(app: Catalogue) {
    let id = app
        .mediator
        .send_optional(
            Some(CreateItem {
                name: "chair".into(),
            }),
            CancellationToken::new(),
        )
        .await
        .expect("dispatch should succeed")
        .expect("creation should succeed");
    assert_eq!(id, 1);
}

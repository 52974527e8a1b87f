//! Parallel dispatch and cooperative cancellation.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::helpers::{CreateItem, GetItem, WaitForCancellation, catalogue};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_dispatches_share_one_mediator() {
    let app = catalogue();
    let mediator = Arc::new(app.mediator);

    let tasks: Vec<_> = (0..16)
        .map(|index| {
            let mediator = Arc::clone(&mediator);
            tokio::spawn(async move {
                mediator
                    .send(
                        CreateItem {
                            name: format!("item-{index}"),
                        },
                        CancellationToken::new(),
                    )
                    .await
            })
        })
        .collect();

    let mut ids = BTreeSet::new();
    for task in tasks {
        let id = task
            .await
            .expect("task should not panic")
            .expect("dispatch should succeed")
            .expect("creation should succeed");
        ids.insert(id);
    }

    assert_eq!(ids.len(), 16);
    for id in ids {
        mediator
            .send(GetItem { id }, CancellationToken::new())
            .await
            .expect("dispatch should succeed")
            .expect("created item should be readable");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn cancellation_token_reaches_the_handler() {
    let app = catalogue();
    let mediator = Arc::new(app.mediator);
    let token = CancellationToken::new();

    let pending = {
        let mediator = Arc::clone(&mediator);
        let token = token.clone();
        tokio::spawn(async move { mediator.send(WaitForCancellation, token).await })
    };

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!pending.is_finished());
    token.cancel();

    let observed = tokio::time::timeout(Duration::from_secs(5), pending)
        .await
        .expect("handler should observe cancellation")
        .expect("task should not panic")
        .expect("dispatch should succeed");
    assert!(observed);
}

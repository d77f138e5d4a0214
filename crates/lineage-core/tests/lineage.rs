mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use lineage_core::{
    CancelHandle, InconsistentData, LineageConfig, LineageError, LineageService,
};
use lineage_ledger::{InMemoryLedger, LedgerQuery};
use lineage_types::{ParentLink, RelationshipKind};

#[tokio::test]
async fn lone_original_provenance() {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(1), original()).unwrap();
    let service = LineageService::new(ledger);

    let report = service.get_provenance_metadata(&x(1)).await.unwrap();
    assert!(report.is_consistent());
    let meta = report.value;
    assert_eq!(meta.generation, 0);
    assert!(meta.is_original);
    assert_eq!(meta.descendant_count, 0);
    assert!(meta.parents.is_empty());
    assert!(meta.children.is_empty());
}

#[tokio::test]
async fn single_remix_ancestry_and_descendants() {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(1), original()).unwrap();
    ledger.insert(x(2), remix(x(1), 1)).unwrap();
    let service = LineageService::new(ledger);

    let ancestry = service.get_ancestry(&x(2)).await.unwrap();
    assert_eq!(assets(&ancestry.value), vec![x(1), x(2)]);
    assert!(ancestry.is_consistent());

    let descendants = service.get_descendants(&x(1)).await.unwrap();
    assert_eq!(assets(&descendants.value), vec![x(2)]);

    let node = service.build_lineage_tree(&x(2)).await.unwrap().value;
    assert_eq!(node.parents, vec![ParentLink::remix(x(1))]);
    assert_eq!(node.generation, 1);
}

#[tokio::test]
async fn descendants_span_generations_in_order() {
    let service = LineageService::new(chain());
    let descendants = service.get_descendants(&x(1)).await.unwrap().value;
    assert_eq!(assets(&descendants), vec![x(2), x(3)]);
    assert_eq!(
        descendants.iter().map(|n| n.generation).collect::<Vec<_>>(),
        vec![1, 2]
    );

    let meta = service.get_provenance_metadata(&x(1)).await.unwrap().value;
    assert_eq!(meta.descendant_count, 2);
    assert_eq!(meta.children, vec![x(2)]);
}

#[tokio::test]
async fn self_parent_terminates() {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(4), remix(x(4), 1)).unwrap();
    let service = LineageService::new(ledger);

    let ancestry = service.get_ancestry(&x(4)).await.unwrap();
    assert_eq!(assets(&ancestry.value), vec![x(4)]);

    let descendants = service.get_descendants(&x(4)).await.unwrap();
    assert!(descendants.value.is_empty());
}

#[tokio::test]
async fn self_link_does_not_skew_generation_check() {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(4), remix(x(4), 1)).unwrap();
    ledger.insert(x(1), original()).unwrap();
    ledger
        .insert(
            x(5),
            derived(vec![ParentLink::remix(x(5)), ParentLink::remix(x(1))], 1),
        )
        .unwrap();
    let service = LineageService::new(ledger);

    let lone = service.get_ancestry(&x(4)).await.unwrap();
    assert!(lone.is_consistent(), "{:?}", lone.warnings);

    let mixed = service.get_ancestry(&x(5)).await.unwrap();
    assert_eq!(assets(&mixed.value), vec![x(1), x(5)]);
    assert!(mixed.is_consistent(), "{:?}", mixed.warnings);
}

#[tokio::test]
async fn cross_collection_parent_is_terminal() {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(1), original()).unwrap();
    ledger
        .insert(
            y(5),
            derived(
                vec![ParentLink::new(x(1), RelationshipKind::InspiredBy)],
                1,
            ),
        )
        .unwrap();
    let service = LineageService::new(ledger);

    let node = service.build_lineage_tree(&y(5)).await.unwrap().value;
    assert_eq!(node.parents, vec![ParentLink::new(x(1), RelationshipKind::InspiredBy)]);

    let ancestry = service.get_ancestry(&y(5)).await.unwrap();
    assert_eq!(assets(&ancestry.value), vec![y(5)]);
    assert!(ancestry.is_consistent());

    let meta = service.get_provenance_metadata(&y(5)).await.unwrap().value;
    assert!(!meta.is_original);
    assert!(meta.parent_summaries[0].cross_collection);
    assert_eq!(meta.parent_summaries[0].label, "Inspired By");

    // children are followed regardless of collection
    let descendants = service.get_descendants(&x(1)).await.unwrap().value;
    assert_eq!(assets(&descendants), vec![y(5)]);
}

#[tokio::test]
async fn repeated_ancestry_is_identical() {
    let service = LineageService::new(chain());
    let first = service.get_ancestry(&x(3)).await.unwrap();
    let second = service.get_ancestry(&x(3)).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(assets(&first.value), vec![x(1), x(2), x(3)]);
}

#[tokio::test]
async fn diamond_is_visited_once() {
    //   1
    //  / \
    // 2   3
    //  \ /
    //   4
    let ledger = InMemoryLedger::new();
    ledger.insert(x(1), original()).unwrap();
    ledger.insert(x(2), remix(x(1), 1)).unwrap();
    ledger
        .insert(x(3), derived(vec![ParentLink::new(x(1), RelationshipKind::Adaptation)], 1))
        .unwrap();
    ledger
        .insert(
            x(4),
            derived(
                vec![
                    ParentLink::new(x(2), RelationshipKind::Composite),
                    ParentLink::new(x(3), RelationshipKind::Composite),
                ],
                2,
            ),
        )
        .unwrap();
    let service = LineageService::new(ledger);

    let ancestry = service.get_ancestry(&x(4)).await.unwrap();
    assert_eq!(assets(&ancestry.value), vec![x(1), x(2), x(3), x(4)]);
    assert!(ancestry.is_consistent());

    let descendants = service.get_descendants(&x(1)).await.unwrap();
    assert_eq!(assets(&descendants.value), vec![x(2), x(3), x(4)]);
}

#[tokio::test]
async fn cycle_back_to_root_excludes_root() {
    let ledger = chain();
    ledger.link_child(&x(3), x(1)).unwrap();
    let service = LineageService::new(ledger);

    let descendants = service.get_descendants(&x(1)).await.unwrap().value;
    assert_eq!(assets(&descendants), vec![x(2), x(3)]);
    assert!(!assets(&descendants).contains(&x(1)));
}

#[tokio::test]
async fn unknown_asset_is_not_found() {
    let service = LineageService::new(chain());
    assert_eq!(
        service.get_ancestry(&x(99)).await.unwrap_err(),
        LineageError::NotFound(x(99))
    );
    assert_eq!(
        service.get_descendants(&x(99)).await.unwrap_err(),
        LineageError::NotFound(x(99))
    );
    assert_eq!(
        service.get_provenance_metadata(&x(99)).await.unwrap_err(),
        LineageError::NotFound(x(99))
    );
}

#[tokio::test]
async fn outage_mid_traversal_aborts_whole_call() {
    let ledger = chain();
    ledger.set_unavailable(x(1)).unwrap();
    let service = LineageService::new(ledger);

    let err = service.get_ancestry(&x(3)).await.unwrap_err();
    assert!(matches!(err, LineageError::LedgerUnavailable(_)));
    assert!(err.is_retryable());

    let ledger = chain();
    ledger.set_unavailable(x(3)).unwrap();
    let service = LineageService::new(ledger);
    let err = service.get_provenance_metadata(&x(1)).await.unwrap_err();
    assert!(matches!(err, LineageError::LedgerUnavailable(_)));
}

#[tokio::test]
async fn missing_parent_is_reported_and_skipped() {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(2), remix(x(9), 1)).unwrap();
    let service = LineageService::new(ledger);

    let ancestry = service.get_ancestry(&x(2)).await.unwrap();
    assert_eq!(assets(&ancestry.value), vec![x(2)]);
    assert_eq!(
        ancestry.warnings,
        vec![InconsistentData::MissingParent {
            asset: x(2),
            parent: x(9),
        }]
    );
}

#[tokio::test]
async fn missing_child_is_reported_and_skipped() {
    let ledger = chain();
    ledger.link_child(&x(1), x(50)).unwrap();
    let service = LineageService::new(ledger);

    let descendants = service.get_descendants(&x(1)).await.unwrap();
    assert_eq!(assets(&descendants.value), vec![x(2), x(3)]);
    assert_eq!(
        descendants.warnings,
        vec![InconsistentData::MissingChild {
            asset: x(1),
            child: x(50),
        }]
    );
}

#[tokio::test]
async fn requested_generation_zero_derivative_is_flagged() {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(1), original()).unwrap();
    ledger.insert(x(2), remix(x(1), 0)).unwrap();
    let service = LineageService::new(ledger);

    let ancestry = service.get_ancestry(&x(2)).await.unwrap();
    assert_eq!(assets(&ancestry.value), vec![x(1), x(2)]);
    assert_eq!(
        ancestry.warnings,
        vec![InconsistentData::DerivativeAtGenerationZero { asset: x(2) }]
    );

    let tree = service.build_lineage_tree(&x(2)).await.unwrap();
    assert_eq!(tree.warnings.len(), 1);
}

#[tokio::test]
async fn generation_zero_derivative_is_expanded_only_when_requested() {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(1), original()).unwrap();
    ledger.insert(x(2), remix(x(1), 0)).unwrap();
    ledger.insert(x(3), remix(x(2), 1)).unwrap();
    let service = LineageService::new(ledger);
    let flagged = vec![InconsistentData::DerivativeAtGenerationZero { asset: x(2) }];

    let ancestry = service.get_ancestry(&x(2)).await.unwrap();
    assert_eq!(assets(&ancestry.value), vec![x(1), x(2)]);
    assert_eq!(ancestry.warnings, flagged);

    let descendants = service.get_descendants(&x(2)).await.unwrap();
    assert_eq!(assets(&descendants.value), vec![x(3)]);
    assert_eq!(descendants.warnings, flagged);

    let meta = service.get_provenance_metadata(&x(2)).await.unwrap();
    assert_eq!(meta.value.descendant_count, 1);
    assert_eq!(meta.warnings, flagged);

    // reached from below, x2 stays a leaf
    let from_below = service.get_ancestry(&x(3)).await.unwrap();
    assert_eq!(assets(&from_below.value), vec![x(2), x(3)]);
    assert_eq!(from_below.warnings, flagged);

    // reached from above, x2 is listed but its children are not followed
    let from_above = service.get_descendants(&x(1)).await.unwrap();
    assert_eq!(assets(&from_above.value), vec![x(2)]);
    assert_eq!(from_above.warnings, flagged);
}

#[tokio::test]
async fn generation_disagreeing_with_parents_is_reported() {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(1), original()).unwrap();
    ledger.insert(x(2), remix(x(1), 1)).unwrap();
    ledger.insert(x(3), remix(x(2), 5)).unwrap();
    let service = LineageService::new(ledger);

    let ancestry = service.get_ancestry(&x(3)).await.unwrap();
    assert_eq!(assets(&ancestry.value), vec![x(1), x(2), x(3)]);
    assert_eq!(
        ancestry.warnings,
        vec![InconsistentData::GenerationMismatch {
            asset: x(3),
            reported: 5,
            expected: 2,
        }]
    );

    let quiet = LineageService::with_config(
        chain(),
        LineageConfig {
            check_generations: false,
            ..LineageConfig::default()
        },
    )
    .unwrap();
    assert!(quiet.get_ancestry(&x(3)).await.unwrap().is_consistent());
}

#[tokio::test]
async fn original_with_generation_is_reported() {
    let ledger = InMemoryLedger::new();
    let mut info = original();
    info.generation = 3;
    ledger.insert(x(1), info).unwrap();
    let service = LineageService::new(ledger);

    let meta = service.get_provenance_metadata(&x(1)).await.unwrap();
    assert!(meta.value.is_original);
    assert_eq!(meta.value.generation, 3);
    assert_eq!(
        meta.warnings,
        vec![InconsistentData::OriginalWithGeneration {
            asset: x(1),
            generation: 3,
        }]
    );
}

#[tokio::test]
async fn cancelled_before_start_issues_no_queries() {
    let ledger = Arc::new(chain());
    let service = LineageService::new(ledger.clone());
    let (handle, signal) = CancelHandle::pair();
    handle.cancel();

    let err = service.get_ancestry_with(&x(3), &signal).await.unwrap_err();
    assert_eq!(err, LineageError::Cancelled);
    assert_eq!(ledger.query_count(), 0);
}

#[tokio::test]
async fn cancelled_parent_check_issues_no_queries() {
    let ledger = Arc::new(chain());
    let service = LineageService::new(ledger.clone());
    let (handle, signal) = CancelHandle::pair();
    handle.cancel();

    let err = service
        .is_derivative_of_with(&x(2), &x(1), &signal)
        .await
        .unwrap_err();
    assert_eq!(err, LineageError::Cancelled);
    assert_eq!(ledger.query_count(), 0);
}

#[tokio::test]
async fn cancel_during_parent_check() {
    let service = LineageService::new(SlowLedger {
        inner: chain(),
        delay: Duration::from_secs(10),
    });
    let (handle, signal) = CancelHandle::pair();

    let (child, parent) = (x(2), x(1));
    let (result, ()) = tokio::join!(service.is_derivative_of_with(&child, &parent, &signal), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.cancel();
    });
    assert_eq!(result.unwrap_err(), LineageError::Cancelled);
}

#[tokio::test]
async fn cancel_during_traversal() {
    let service = LineageService::new(SlowLedger {
        inner: chain(),
        delay: Duration::from_secs(10),
    });
    let (handle, signal) = CancelHandle::pair();

    let root = x(1);
    let (result, ()) = tokio::join!(service.get_descendants_with(&root, &signal), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.cancel();
    });
    assert_eq!(result.unwrap_err(), LineageError::Cancelled);
}

#[tokio::test]
async fn deadline_expiry_is_cancelled() {
    let service = LineageService::with_config(
        SlowLedger {
            inner: chain(),
            delay: Duration::from_secs(10),
        },
        LineageConfig {
            query_timeout_ms: Some(30),
            ..LineageConfig::default()
        },
    )
    .unwrap();

    let err = service.get_provenance_metadata(&x(1)).await.unwrap_err();
    assert_eq!(err, LineageError::Cancelled);
}

#[tokio::test]
async fn provenance_fetches_each_asset_once() {
    let ledger = Arc::new(chain());
    let service = LineageService::new(ledger.clone());

    service.get_provenance_metadata(&x(1)).await.unwrap();
    // two queries (record + children) per asset, three assets
    assert_eq!(ledger.query_count(), 6);
}

#[tokio::test]
async fn fan_out_matches_sequential() {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(1), original()).unwrap();
    for id in 2..30 {
        ledger.insert(x(id), remix(x(1), 1)).unwrap();
        ledger.insert(x(id + 100), remix(x(id), 2)).unwrap();
    }
    let ledger = Arc::new(ledger);

    let sequential =
        LineageService::with_config(ledger.clone(), LineageConfig::sequential()).unwrap();
    let parallel = LineageService::with_config(
        ledger.clone(),
        LineageConfig {
            max_concurrency: 16,
            ..LineageConfig::default()
        },
    )
    .unwrap();

    let a = sequential.get_descendants(&x(1)).await.unwrap();
    let b = parallel.get_descendants(&x(1)).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a.value.len(), 56);
    assert!(a.value[..28].iter().all(|n| n.generation == 1));
}

#[tokio::test]
async fn is_derivative_of_checks_direct_parents() {
    let service = LineageService::new(chain());
    assert!(service.is_derivative_of(&x(2), &x(1)).await.unwrap());
    assert!(!service.is_derivative_of(&x(3), &x(1)).await.unwrap());
    assert!(service.ledger().is_derivative_of(&x(3), &x(2)).await.unwrap());
}

#[test]
fn zero_concurrency_config_is_rejected() {
    let result = LineageService::with_config(
        chain(),
        LineageConfig {
            max_concurrency: 0,
            ..LineageConfig::default()
        },
    );
    assert!(result.is_err());
}

mod harness;
mod support;

use std::sync::Arc;

use walletlens::adapter::outbound::memory::MemoryCache;
use walletlens::adapter::outbound::sqlite::SqliteHistoryStore;
use walletlens::application::{HistoryRecorder, QueryOptions, SummaryPolicy};
use walletlens::testkit::domain::{nth_subject, sample_summary, subject};

use harness::temp_db::TempDb;
use support::{account_service, example_upstream};

#[tokio::test]
async fn recorded_queries_come_back_newest_first() {
    let db = TempDb::create("newest-first");
    let store = Arc::new(SqliteHistoryStore::new(db.pool().clone()));
    let upstream = example_upstream();
    let service = account_service(
        &upstream,
        Arc::new(MemoryCache::new()),
        store,
        SummaryPolicy::default(),
    );

    let first = service.query(&subject()).await.unwrap();
    service.flush().await;
    let second = service.query(&subject()).await.unwrap();
    service.flush().await;

    let entries = service.history(&subject(), None).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].queried_at >= entries[1].queried_at);
    assert_eq!(entries[0].snapshot, second);
    assert_eq!(entries[1].snapshot, first);
}

#[tokio::test]
async fn history_defaults_to_twenty_entries() {
    let db = TempDb::create("default-limit");
    let recorder = HistoryRecorder::new(Arc::new(SqliteHistoryStore::new(db.pool().clone())));

    for _ in 0..25 {
        recorder.save(&subject(), &sample_summary()).await.unwrap();
    }

    assert_eq!(recorder.retrieve(&subject(), None).await.unwrap().len(), 20);
    assert_eq!(recorder.retrieve(&subject(), Some(3)).await.unwrap().len(), 3);
    assert_eq!(recorder.retrieve(&subject(), Some(100)).await.unwrap().len(), 25);
}

#[tokio::test]
async fn history_is_per_address() {
    let db = TempDb::create("per-address");
    let recorder = HistoryRecorder::new(Arc::new(SqliteHistoryStore::new(db.pool().clone())));

    recorder.save(&subject(), &sample_summary()).await.unwrap();
    recorder.save(&nth_subject(1), &sample_summary()).await.unwrap();
    recorder.save(&nth_subject(1), &sample_summary()).await.unwrap();

    assert_eq!(recorder.retrieve(&subject(), None).await.unwrap().len(), 1);
    assert_eq!(recorder.retrieve(&nth_subject(1), None).await.unwrap().len(), 2);
    assert!(recorder.retrieve(&nth_subject(2), None).await.unwrap().is_empty());
}

#[tokio::test]
async fn cache_hits_are_recorded_too() {
    let db = TempDb::create("cache-hits");
    let upstream = example_upstream();
    let service = account_service(
        &upstream,
        Arc::new(MemoryCache::new()),
        Arc::new(SqliteHistoryStore::new(db.pool().clone())),
        SummaryPolicy::default(),
    );

    service.query(&subject()).await.unwrap();
    service.query(&subject()).await.unwrap();
    service.flush().await;

    assert_eq!(service.history(&subject(), None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn unrecorded_query_is_not_in_history() {
    let db = TempDb::create("unrecorded");
    let upstream = example_upstream();
    let service = account_service(
        &upstream,
        Arc::new(MemoryCache::new()),
        Arc::new(SqliteHistoryStore::new(db.pool().clone())),
        SummaryPolicy::default(),
    );

    service
        .query_with(
            &subject(),
            QueryOptions {
                record: false,
                deadline: None,
            },
        )
        .await
        .unwrap();
    service.flush().await;

    assert!(service.history(&subject(), None).await.unwrap().is_empty());
    assert!(db.path().exists());
}

//! Integration tests for [`storage::MessageRepository`].
//!
//! Covers create/select_all/delete_all through the [`storage::Repository`] trait and
//! `find_by_period` range, boundary and skip behaviour, using SQLite files in a temp dir.
//! Rows with fixed periods are written with raw SQL through the shared pool.

use chrono::{NaiveDate, NaiveDateTime};
use storage::period::format_period;
use storage::{
    ensure_schema, Level, LevelRepository, Message, MessageRepository, ObjectLog,
    ObjectLogRepository, Repository, SqlitePoolManager, StorageError,
};
use tempfile::TempDir;

async fn open_pool() -> (TempDir, SqlitePoolManager) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("messages.db");
    let pool = SqlitePoolManager::new(path.to_str().unwrap())
        .await
        .expect("Failed to create pool");
    ensure_schema(pool.pool())
        .await
        .expect("Failed to create schema");
    (dir, pool)
}

async fn seed_level(pool: &SqlitePoolManager, name: &str) -> i64 {
    LevelRepository::with_pool(pool.clone())
        .create(&Level::new(0, name))
        .await
        .expect("Failed to create level")
}

async fn seed_object(pool: &SqlitePoolManager, name: &str) -> i64 {
    ObjectLogRepository::with_pool(pool.clone())
        .create(&ObjectLog::new(0, name))
        .await
        .expect("Failed to create object")
}

async fn insert_at(
    pool: &SqlitePoolManager,
    period: &NaiveDateTime,
    level_id: i64,
    object_id: i64,
    text: &str,
) -> i64 {
    sqlx::query("INSERT INTO messages (period, id_level, id_object, text) VALUES (?, ?, ?, ?)")
        .bind(format_period(period))
        .bind(level_id)
        .bind(object_id)
        .bind(text)
        .execute(pool.pool())
        .await
        .expect("Failed to insert message")
        .last_insert_rowid()
}

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// **Test: Created message is visible in select_all with joined names.**
///
/// **Setup:** Temp DB with level INFO and object svc1.
/// **Action:** `create(Message::draft(..))`, then `select_all()`.
/// **Expected:** Positive id; the row carries the text and the resolved level/object names.
#[tokio::test]
async fn test_create_then_select_all() {
    let (_dir, pool) = open_pool().await;
    let info = seed_level(&pool, "INFO").await;
    let svc1 = seed_object(&pool, "svc1").await;
    let repo = MessageRepository::with_pool(pool);

    let id = repo
        .create(&Message::draft(info, svc1, "Hello World"))
        .await
        .expect("Failed to create message");

    assert!(id > 0);
    let all = repo.select_all().await.expect("Failed to select messages");
    assert_eq!(all.len(), 1);
    assert_eq!(all.count, None);
    let message = &all.records[0];
    assert_eq!(message.id, id);
    assert_eq!(message.text, "Hello World");
    assert_eq!(message.level.name.as_deref(), Some("INFO"));
    assert_eq!(message.object.name.as_deref(), Some("svc1"));
}

/// **Test: Repository::new bootstraps the schema on a fresh database.**
///
/// **Setup:** `sqlite::memory:` URL.
/// **Action:** `MessageRepository::new`, then `select_all()`.
/// **Expected:** Empty result, no error.
#[tokio::test]
async fn test_new_creates_schema_in_memory() {
    let repo = MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let all = repo.select_all().await.expect("Failed to select messages");

    assert!(all.is_empty());
}

/// **Test: Unknown object id is rejected by the store.**
///
/// **Setup:** Level exists, object 4242 does not.
/// **Action:** `create`.
/// **Expected:** `StorageError::ConstraintViolation`.
#[tokio::test]
async fn test_create_unknown_object_fails() {
    let (_dir, pool) = open_pool().await;
    let info = seed_level(&pool, "INFO").await;
    let repo = MessageRepository::with_pool(pool);

    let err = repo
        .create(&Message::draft(info, 4242, "nobody"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::ConstraintViolation(_)), "{err}");
}

/// **Test: delete_all followed by select_all is empty.**
#[tokio::test]
async fn test_delete_all() {
    let (_dir, pool) = open_pool().await;
    let info = seed_level(&pool, "INFO").await;
    let svc1 = seed_object(&pool, "svc1").await;
    let repo = MessageRepository::with_pool(pool);
    for i in 0..4 {
        repo.create(&Message::draft(info, svc1, format!("Message {}", i)))
            .await
            .unwrap();
    }

    repo.delete_all().await.expect("Failed to delete messages");

    assert!(repo.select_all().await.unwrap().is_empty());
}

/// **Test: Boot/shutdown scenario across two levels and objects.**
///
/// **Setup:** A("boot", INFO, svc1) at T1, B("shutdown", ERROR, svc2) at T2 > T1.
/// **Action:** `find_by_period(T1, T2, 10, 0)` and `find_by_period(T1, T1, 10, 0)`.
/// **Expected:** `[A, B]` with count 2, then `[A]` with count 1.
#[tokio::test]
async fn test_find_by_period_scenario() {
    let (_dir, pool) = open_pool().await;
    let info = seed_level(&pool, "INFO").await;
    let error = seed_level(&pool, "ERROR").await;
    let svc1 = seed_object(&pool, "svc1").await;
    let svc2 = seed_object(&pool, "svc2").await;
    let t1 = ts("2024-01-15 08:00:00");
    let t2 = ts("2024-01-15 17:30:00");
    let a = insert_at(&pool, &t1, info, svc1, "boot").await;
    let b = insert_at(&pool, &t2, error, svc2, "shutdown").await;
    let repo = MessageRepository::with_pool(pool);

    let page = repo.find_by_period(&t1, &t2, 10, 0).await.unwrap();
    assert_eq!(page.iter().map(|m| m.id).collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(page.count, Some(2));
    assert_eq!(page.records[0].period, t1);
    assert_eq!(page.records[1].level.name.as_deref(), Some("ERROR"));

    let page = repo.find_by_period(&t1, &t1, 10, 0).await.unwrap();
    assert_eq!(page.iter().map(|m| m.id).collect::<Vec<_>>(), vec![a]);
    assert_eq!(page.count, Some(1));
}

/// **Test: Range is closed on both ends and excludes rows outside it.**
///
/// **Setup:** Rows one second before `from`, at `from`, inside, at `to`, one second after `to`.
/// **Action:** `find_by_period(from, to, 100, 0)`.
/// **Expected:** The three rows at/inside the bounds, in period order; count 3.
#[tokio::test]
async fn test_find_by_period_closed_interval() {
    let (_dir, pool) = open_pool().await;
    let info = seed_level(&pool, "INFO").await;
    let svc1 = seed_object(&pool, "svc1").await;
    let from = ts("2024-02-01 00:00:00");
    let to = ts("2024-02-01 23:59:59");
    insert_at(&pool, &ts("2024-01-31 23:59:59"), info, svc1, "before").await;
    insert_at(&pool, &to, info, svc1, "at to").await;
    insert_at(&pool, &ts("2024-02-01 12:00:00"), info, svc1, "inside").await;
    insert_at(&pool, &from, info, svc1, "at from").await;
    insert_at(&pool, &ts("2024-02-02 00:00:00"), info, svc1, "after").await;
    let repo = MessageRepository::with_pool(pool);

    let page = repo.find_by_period(&from, &to, 100, 0).await.unwrap();

    let texts: Vec<&str> = page.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["at from", "inside", "at to"]);
    assert_eq!(page.count, Some(3));
    assert_eq!(repo.count_by_period(&from, &to).await.unwrap(), 3);
}

/// **Test: Walking pages with offset visits every row once in period order.**
///
/// **Setup:** 7 rows with increasing periods, inserted out of order.
/// **Action:** `find_by_period` with limit 3 and offsets 0, 3, 6.
/// **Expected:** Pages of 3, 3, 1 rows; concatenation is sorted; every page reports count 7.
#[tokio::test]
async fn test_find_by_period_pages() {
    let (_dir, pool) = open_pool().await;
    let info = seed_level(&pool, "INFO").await;
    let svc1 = seed_object(&pool, "svc1").await;
    let base = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    for minute in [6, 2, 4, 0, 5, 1, 3] {
        let period = base.and_hms_opt(10, minute, 0).unwrap();
        insert_at(&pool, &period, info, svc1, &format!("m{}", minute)).await;
    }
    let repo = MessageRepository::with_pool(pool);
    let from = base.and_hms_opt(0, 0, 0).unwrap();
    let to = base.and_hms_opt(23, 59, 59).unwrap();

    let mut seen = Vec::new();
    for (offset, expected_len) in [(0, 3), (3, 3), (6, 1)] {
        let page = repo.find_by_period(&from, &to, 3, offset).await.unwrap();
        assert_eq!(page.len(), expected_len);
        assert_eq!(page.count, Some(7));
        seen.extend(page.into_iter().map(|m| m.text));
    }

    let expected: Vec<String> = (0..7).map(|m| format!("m{}", m)).collect();
    assert_eq!(seen, expected);
}

/// **Test: limit 0 returns no rows but a non-zero count; inverted range returns nothing.**
#[tokio::test]
async fn test_find_by_period_edge_cases() {
    let (_dir, pool) = open_pool().await;
    let info = seed_level(&pool, "INFO").await;
    let svc1 = seed_object(&pool, "svc1").await;
    let t = ts("2024-04-04 04:04:04");
    insert_at(&pool, &t, info, svc1, "only").await;
    let repo = MessageRepository::with_pool(pool);

    let page = repo.find_by_period(&t, &t, 0, 0).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.count, Some(1));

    let page = repo
        .find_by_period(&ts("2024-04-05 00:00:00"), &ts("2024-04-03 00:00:00"), 10, 0)
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.count, Some(0));
}

/// **Test: A row whose period does not match the format is silently omitted.**
///
/// **Setup:** One valid row and one row stored with period `"15/01/2024 09:00"`.
/// **Action:** `select_all()` and a `find_by_period` covering every string period.
/// **Expected:** Only the valid row is returned; neither call fails.
#[tokio::test]
async fn test_unparseable_period_rows_are_omitted() {
    let (_dir, pool) = open_pool().await;
    let info = seed_level(&pool, "INFO").await;
    let svc1 = seed_object(&pool, "svc1").await;
    let good = insert_at(&pool, &ts("2024-01-15 09:00:00"), info, svc1, "good").await;
    sqlx::query("INSERT INTO messages (period, id_level, id_object, text) VALUES (?, ?, ?, ?)")
        .bind("15/01/2024 09:00")
        .bind(info)
        .bind(svc1)
        .bind("bad")
        .execute(pool.pool())
        .await
        .unwrap();
    let repo = MessageRepository::with_pool(pool);

    let all = repo.select_all().await.expect("Select must not fail");
    assert_eq!(all.iter().map(|m| m.id).collect::<Vec<_>>(), vec![good]);

    let page = repo
        .find_by_period(&ts("1970-01-01 00:00:00"), &ts("9999-12-31 23:59:59"), 10, 0)
        .await
        .expect("Range query must not fail");
    assert_eq!(page.iter().map(|m| m.id).collect::<Vec<_>>(), vec![good]);
}

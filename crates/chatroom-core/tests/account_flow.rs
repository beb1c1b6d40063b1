use chatroom_core::{AccountService, ChatConfig, ChatError, Database, PASSWORD_HASH_COST};
use tempfile::{tempdir, TempDir};

// Cheapest cost bcrypt accepts; the production cost has its own test below.
const TEST_COST: u32 = 4;

async fn setup(cost: u32) -> (TempDir, Database, AccountService) {
    let dir = tempdir().unwrap();
    let config = ChatConfig::with_base_dir(dir.path()).with_bcrypt_cost(cost);
    let db = Database::open(&config).await.unwrap();
    let accounts = AccountService::new(db.clone(), config.bcrypt_cost);
    (dir, db, accounts)
}

async fn stored_hash(db: &Database, username: &str) -> String {
    sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(db.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_register_then_authenticate() {
    let (_dir, _db, accounts) = setup(TEST_COST).await;

    let registered = accounts.register("alice", "password123").await.unwrap();
    assert_eq!(registered.username, "alice");

    let logged_in = accounts.authenticate("alice", "password123").await.unwrap();
    assert_eq!(logged_in, registered);
}

#[tokio::test]
async fn test_ids_are_monotonic() {
    let (_dir, _db, accounts) = setup(TEST_COST).await;

    let a = accounts.register("alice", "pw").await.unwrap();
    let b = accounts.register("bob", "pw").await.unwrap();
    assert!(b.id > a.id);
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let (_dir, _db, accounts) = setup(TEST_COST).await;

    accounts.register("alice", "first").await.unwrap();
    let err = accounts.register("alice", "second").await.unwrap_err();
    assert!(matches!(err, ChatError::DuplicateUsername));

    // The original password still works; the failed attempt wrote nothing.
    accounts.authenticate("alice", "first").await.unwrap();
    let err = accounts.authenticate("alice", "second").await.unwrap_err();
    assert!(matches!(err, ChatError::IncorrectPassword));
}

#[tokio::test]
async fn test_usernames_are_case_sensitive() {
    let (_dir, _db, accounts) = setup(TEST_COST).await;

    let lower = accounts.register("alice", "pw").await.unwrap();
    let upper = accounts.register("Alice", "pw").await.unwrap();
    assert_ne!(lower.id, upper.id);

    let err = accounts.authenticate("ALICE", "pw").await.unwrap_err();
    assert!(matches!(err, ChatError::UserNotFound));
}

#[tokio::test]
async fn test_wrong_password() {
    let (_dir, _db, accounts) = setup(TEST_COST).await;

    accounts.register("bob", "correct horse").await.unwrap();
    for attempt in ["", "correct", "correct horse ", "Correct horse"] {
        let err = accounts.authenticate("bob", attempt).await.unwrap_err();
        assert!(
            matches!(err, ChatError::IncorrectPassword),
            "{attempt:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_unknown_user() {
    let (_dir, _db, accounts) = setup(TEST_COST).await;

    let err = accounts.authenticate("nobody", "pw").await.unwrap_err();
    assert!(matches!(err, ChatError::UserNotFound));
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn test_plaintext_never_stored() {
    let (_dir, db, accounts) = setup(TEST_COST).await;

    accounts.register("carol", "s3cret").await.unwrap();
    let hash = stored_hash(&db, "carol").await;
    assert_ne!(hash, "s3cret");
    assert!(!hash.contains("s3cret"));
    assert!(bcrypt::verify("s3cret", &hash).unwrap());
}

#[tokio::test]
async fn test_default_cost_is_ten() {
    let (_dir, db, accounts) = setup(PASSWORD_HASH_COST).await;

    accounts.register("dave", "pw").await.unwrap();
    let hash = stored_hash(&db, "dave").await;
    assert!(hash.starts_with("$2b$10$"), "unexpected hash prefix: {hash}");
}

#[tokio::test]
async fn test_empty_credentials_accepted() {
    let (_dir, _db, accounts) = setup(TEST_COST).await;

    let user = accounts.register("", "").await.unwrap();
    assert_eq!(accounts.authenticate("", "").await.unwrap(), user);
}

#[tokio::test]
async fn test_corrupt_hash_is_incorrect_password() {
    let (_dir, db, accounts) = setup(TEST_COST).await;

    sqlx::query("INSERT INTO users (username, password_hash) VALUES ('eve', 'plain')")
        .execute(db.pool())
        .await
        .unwrap();

    let err = accounts.authenticate("eve", "plain").await.unwrap_err();
    assert!(matches!(err, ChatError::IncorrectPassword));
}

#[tokio::test]
async fn test_hashing_failure_writes_nothing() {
    let (_dir, db, _) = setup(TEST_COST).await;
    let broken = AccountService::new(db.clone(), 99);

    let err = broken.register("frank", "pw").await.unwrap_err();
    assert!(matches!(err, ChatError::HashingFailure(_)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let (_dir, _db, accounts) = setup(TEST_COST).await;

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let accounts = accounts.clone();
            tokio::spawn(async move { accounts.register("racer", &format!("pw{i}")).await })
        })
        .collect();

    let mut ok = 0;
    let mut dup = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(ChatError::DuplicateUsername) => dup += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(dup, 3);
}

#[tokio::test]
async fn test_accounts_survive_reopen() {
    let dir = tempdir().unwrap();
    let config = ChatConfig::with_base_dir(dir.path()).with_bcrypt_cost(TEST_COST);

    let id = {
        let db = Database::open(&config).await.unwrap();
        let accounts = AccountService::new(db.clone(), TEST_COST);
        let id = accounts.register("grace", "pw").await.unwrap().id;
        db.close().await;
        id
    };

    let db = Database::open(&config).await.unwrap();
    let accounts = AccountService::new(db, TEST_COST);
    assert_eq!(accounts.authenticate("grace", "pw").await.unwrap().id, id);
}

#[tokio::test]
async fn test_closed_store_is_unavailable() {
    let (_dir, db, accounts) = setup(TEST_COST).await;
    db.close().await;
    assert!(db.is_closed());

    let err = accounts.authenticate("anyone", "pw").await.unwrap_err();
    assert!(matches!(err, ChatError::StorageUnavailable(_)));
}

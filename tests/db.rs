use hopigo::db::run_migrations;

mod common;

#[test]
fn test_creates_pool_and_applies_migrations_once() {
    let test_db = common::TestDb::new("test_creates_pool.db");
    assert!(test_db.pool().get().is_ok());
    assert_eq!(run_migrations(&test_db.pool()), Ok(0));
}

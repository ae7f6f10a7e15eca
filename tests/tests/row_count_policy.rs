use rowbase::{model, Field, Model, Record, RowCountPolicy};
use tests::{models, tests, DbTest};

model! {
    #[table = "users"]
    struct User {
        id: Field::string().ddl("varchar(50)").primary_key(),
        name: Field::string().ddl("varchar(50)").default("anon"),
    }
}

async fn strict_policy_fails_on_missing_rows(test: &mut DbTest) {
    let mut builder = models!(User);
    builder.row_count_policy(RowCountPolicy::Strict);
    let db = test.setup_db(builder).await;
    assert_eq!(db.row_count_policy(), RowCountPolicy::Strict);

    let ghost = User::from(Record::new().with("id", "ghost"));

    let err = ghost.update(&db).await.unwrap_err();
    assert!(err.is_condition_failed());
    assert!(err.to_string().contains("affected rows: 0"), "{err}");

    let err = ghost.remove(&db).await.unwrap_err();
    assert!(err.is_condition_failed());
}

async fn strict_policy_accepts_single_row_writes(test: &mut DbTest) {
    let mut builder = models!(User);
    builder.row_count_policy(RowCountPolicy::Strict);
    let db = test.setup_db(builder).await;

    let mut u1 = User::from(Record::new().with("id", "u1"));
    u1.save(&db).await.unwrap();
    u1.set("name", "Bob");
    u1.update(&db).await.unwrap();
    u1.remove(&db).await.unwrap();
}

async fn default_policy_warns(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;
    assert_eq!(db.row_count_policy(), RowCountPolicy::Warn);

    let ghost = User::from(Record::new().with("id", "ghost"));
    ghost.update(&db).await.unwrap();
    ghost.remove(&db).await.unwrap();
}

tests!(
    strict_policy_fails_on_missing_rows,
    strict_policy_accepts_single_row_writes,
    default_policy_warns,
);

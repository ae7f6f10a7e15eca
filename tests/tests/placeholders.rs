use pretty_assertions::assert_eq;
use rowbase::{driver::Capability, model, Field, FindAll, Model, Record, Value};
use tests::{db::memory::SetupMemory, models, DbTest, MemoryDriver};

model! {
    #[table = "users"]
    struct User {
        id: Field::string().ddl("varchar(50)").primary_key(),
        name: Field::string().default("anon"),
    }
}

#[tokio::test]
async fn statements_use_the_driver_placeholder() {
    let driver = MemoryDriver::with_capability(&Capability::POSTGRESQL);
    let mut test = DbTest::new(Box::new(SetupMemory::with_driver(driver)));
    let db = test.setup_db(models!(User)).await;

    let mut u1 = User::from(Record::new().with("id", "u1"));
    u1.save(&db).await.unwrap();

    let found = User::find(&db, "u1".into()).await.unwrap().unwrap();
    assert_eq!(found.value("name"), Value::from("anon"));

    User::find_all(&db, FindAll::new().filter("`name`=?").arg("anon").limit((0, 1)))
        .await
        .unwrap();

    assert_eq!(
        test.log().sql(),
        [
            "insert into `users` (`name`, `id`) values ($1, $2)",
            "select `id`, `name` from `users` where `id`=$1",
            "select `id`, `name` from `users` where `name`=$1 limit $2, $3",
        ]
    );
}

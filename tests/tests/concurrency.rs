use rowbase::{model, Field, Model, Record};
use tests::{db::memory::SetupMemory, models, DbTest, MemoryDriver};
use tokio::sync::Barrier;

use std::{sync::Arc, time::Duration};

model! {
    #[table = "users"]
    struct User {
        id: Field::string().ddl("varchar(50)").primary_key(),
        name: Field::string().default("anon"),
    }
}

#[tokio::test]
async fn concurrent_saves_do_not_block_each_other() {
    let driver = MemoryDriver::new();
    let mut test = DbTest::new(Box::new(SetupMemory::with_driver(driver.clone())));
    let db = test.setup_db(models!(User)).await;

    // Each insert waits until the other one is in flight too, so the saves
    // only finish if they run at the same time.
    driver.pause_writes(Arc::new(Barrier::new(2)));

    let mut a = User::from(Record::new().with("id", "a"));
    let mut b = User::from(Record::new().with("id", "b"));

    let (saved_a, saved_b) = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(a.save(&db), b.save(&db))
    })
    .await
    .expect("concurrent saves blocked each other");

    saved_a.unwrap();
    saved_b.unwrap();
    assert_eq!(driver.rows("users").len(), 2);
    assert_eq!(test.log().count(|op| op.sql().is_some()), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn saves_from_spawned_tasks() {
    let driver = MemoryDriver::new();
    let mut test = DbTest::new(Box::new(SetupMemory::with_driver(driver.clone())));
    let db = test.setup_db(models!(User)).await;

    let tasks = (0..8)
        .map(|i| {
            let db = db.clone();
            tokio::spawn(async move {
                let mut user = User::from(Record::new().with("id", format!("u{i}")));
                user.save(&db).await
            })
        })
        .collect::<Vec<_>>();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(driver.rows("users").len(), 8);
}

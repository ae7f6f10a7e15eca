use crate::{
    init_tracing,
    logging_driver::{DriverOp, LoggingDriver},
    ExecLog, Setup,
};

use rowbase::{db::Builder, driver::Capability, Db, Result};

use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex},
};

/// Sets up a database for one test and records every driver operation.
pub struct DbTest {
    setup: Box<dyn Setup>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl DbTest {
    pub fn new(setup: Box<dyn Setup>) -> Self {
        init_tracing();

        Self {
            setup,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Try to setup a database with models, returns Result for error handling
    pub async fn try_setup_db(&mut self, mut builder: Builder) -> Result<Db> {
        let db = builder.build()?;

        // Always wrap with logging
        let driver = LoggingDriver::new(self.setup.driver().await?);
        self.ops_log = driver.ops_log_handle();

        db.init_pool(driver, &self.setup.options()).await?;

        for schema in db.schemas() {
            self.setup.create_table(&db, schema).await?;
        }

        // Only keep what the test itself runs.
        self.ops_log.lock().unwrap().clear();

        Ok(db)
    }

    /// Setup a database with models, always with logging enabled
    pub async fn setup_db(&mut self, builder: Builder) -> Db {
        self.try_setup_db(builder).await.unwrap()
    }

    /// Get the operations log for assertions
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }

    /// Get capability information from the setup
    pub fn capability(&self) -> &'static Capability {
        self.setup.capability()
    }

    /// Runs `test_fn` to completion on a fresh current-thread runtime.
    pub fn run_test<F>(&mut self, test_fn: F)
    where
        F: for<'a> FnOnce(&'a mut DbTest) -> Pin<Box<dyn Future<Output = ()> + 'a>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");

        runtime.block_on(test_fn(self));
    }
}

//! Connection pooling for database connections.

use std::ops::{Deref, DerefMut};

use deadpool::managed::PoolError;
use rowbase_core::{
    driver::{Capability, Connection, Driver},
    ConnectOptions, Error, Result,
};

/// A fixed-size pool of driver connections.
///
/// Cloning is cheap; clones share the same connections.
#[derive(Debug, Clone)]
pub struct Pool {
    inner: deadpool::managed::Pool<Manager>,
    capability: &'static Capability,
}

impl Pool {
    /// Creates a pool holding at most `options.maxsize` connections, then
    /// opens `options.minsize` of them up front.
    ///
    /// Opening the initial connections surfaces bad credentials or an
    /// unreachable server here instead of on the first statement.
    pub async fn new(driver: impl Driver, options: &ConnectOptions) -> Result<Pool> {
        let capability = driver.capability();

        let inner = deadpool::managed::Pool::builder(Manager {
            driver: Box::new(driver),
        })
        .runtime(deadpool::Runtime::Tokio1)
        .max_size(options.maxsize)
        .build()
        .map_err(Error::connection_pool)?;

        let pool = Pool { inner, capability };

        let mut warm = Vec::with_capacity(options.minsize);
        for _ in 0..options.minsize {
            warm.push(pool.get().await?);
        }

        Ok(pool)
    }

    /// Retrieves a connection from the pool, opening one if none is idle and
    /// the pool is below its maximum size.
    pub async fn get(&self) -> Result<PoolConnection> {
        let connection = self.inner.get().await.map_err(|err| match err {
            PoolError::Backend(err) => err,
            PoolError::Closed => Error::pool_not_initialized(),
            err => Error::connection_pool(err),
        })?;
        Ok(PoolConnection { inner: connection })
    }

    /// Returns the database driver's capabilities.
    pub fn capability(&self) -> &'static Capability {
        self.capability
    }

    /// Number of open connections, idle or in use.
    pub fn size(&self) -> usize {
        self.inner.status().size
    }

    pub fn max_size(&self) -> usize {
        self.inner.status().max_size
    }

    /// Closes the pool. Idle connections are dropped immediately; borrowed
    /// ones when they are returned.
    pub fn close(&self) {
        self.inner.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

#[derive(Debug)]
struct Manager {
    driver: Box<dyn Driver>,
}

impl deadpool::managed::Manager for Manager {
    type Type = Box<dyn Connection>;
    type Error = Error;

    async fn create(&self) -> Result<Self::Type> {
        self.driver.connect().await
    }

    async fn recycle(
        &self,
        _obj: &mut Self::Type,
        _metrics: &deadpool::managed::Metrics,
    ) -> deadpool::managed::RecycleResult<Self::Error> {
        Ok(())
    }
}

/// A connection retrieved from a pool.
///
/// When dropped, the connection is returned to the pool for reuse.
pub struct PoolConnection {
    inner: deadpool::managed::Object<Manager>,
}

impl Deref for PoolConnection {
    type Target = Box<dyn Connection>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

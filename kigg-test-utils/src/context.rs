//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context includes an
//! in-memory SQLite database, a mock HTTP server standing in for the OpenID provider, and a
//! session backed by a memory store.

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Test context structure returned by `TestBuilder`
///
/// ```ignore
/// let mut test = TestBuilder::new().with_user_tables().build().await?;
///
/// let user = test.user().insert_user("jan", "jan@kigg.pl").await?;
///
/// // Assert all mocks were called
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session used by the request under test
    pub session: Session,

    /// Mock HTTP server for the OpenID provider
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        // A single connection keeps every query on the same in-memory database
        let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await?;

        Ok(TestContext {
            db,
            session,
            server,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock server, used as the OpenID issuer.
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Absolute URL of a path on the mock server.
    pub fn server_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server.url(), path)
    }

    /// Registers an additional mock endpoint after the context is built.
    pub fn add_mock<F>(&mut self, builder: F)
    where
        F: FnOnce(&mut ServerGuard) -> Mock,
    {
        let mock = builder(&mut self.server);
        self.mocks.push(mock);
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

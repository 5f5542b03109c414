//! Declarative test builder.
//!
//! Tables and mock endpoints are queued on the builder and created during the final `build()`
//! call. Database rows are inserted afterwards through the fixture helpers on [`TestContext`].

use mockito::{Mock, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_user_tables: bool,
    blocked_ips: Vec<String>,

    mock_builders: Vec<Box<dyn FnOnce(&mut ServerGuard) -> Mock>>,
    openid_endpoints: Vec<(String, Option<String>, usize)>, // (sub, email, expected_requests)
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_user_tables: false,
            blocked_ips: Vec::new(),
            mock_builders: Vec::new(),
            openid_endpoints: Vec::new(),
        }
    }

    /// Add the tables required for membership: users, their IP addresses and blocked IPs.
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// ```no_run
    /// use kigg_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), kigg_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(UpcomingEvent)
    ///     .with_table(Recommendation)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a blocked IP address row. Requires the user tables.
    pub fn with_blocked_ip(mut self, ip_address: &str) -> Self {
        self.blocked_ips.push(ip_address.to_string());
        self
    }

    /// Add a custom mock endpoint.
    ///
    /// Custom endpoints are created before the OpenID shortcuts so that tests can register an
    /// error response for a path ahead of a success response.
    pub fn with_mock_endpoint<F>(mut self, builder: F) -> Self
    where
        F: FnOnce(&mut ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(builder));
        self
    }

    /// Add token and userinfo endpoints of the mock OpenID provider.
    ///
    /// The userinfo endpoint answers with the provided subject and, when set, email. Both
    /// endpoints must be called exactly `expected_requests` times.
    pub fn with_openid_endpoints(
        mut self,
        sub: &str,
        email: Option<&str>,
        expected_requests: usize,
    ) -> Self {
        self.openid_endpoints.push((
            sub.to_string(),
            email.map(str::to_string),
            expected_requests,
        ));
        self
    }

    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_user_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::User),
                schema.create_table_from_entity(entity::prelude::UserIpAddress),
                schema.create_table_from_entity(entity::prelude::BlockedIp),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for ip_address in self.blocked_ips {
            setup.user().insert_blocked_ip(&ip_address).await?;
        }

        // 3. Create mock endpoints
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (sub, email, expected) in self.openid_endpoints {
            let (token, userinfo) = setup
                .openid()
                .create_openid_endpoints(&sub, email.as_deref(), expected);
            mocks.push(token);
            mocks.push(userinfo);
        }

        setup.mocks.extend(mocks);

        Ok(setup)
    }
}

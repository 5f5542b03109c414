//! Test harness shared by the unit and integration tests of the `kigg` crate.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares tables and mock endpoints, and the
//! [`TestContext`] it builds exposes the database, session and fixture helpers.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant, fixtures::user::factory, test_setup_with_tables, test_setup_with_user_tables,
        TestBuilder, TestContext, TestError,
    };
}

/// Builds a [`TestContext`] with the provided entity tables.
///
/// ```ignore
/// let test = test_setup_with_tables!(entity::prelude::UpcomingEvent)?;
/// ```
#[macro_export]
macro_rules! test_setup_with_tables {
    () => {{
        $crate::TestBuilder::new().build().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        $crate::TestBuilder::new()
            $(.with_table($entity))+
            .build()
            .await
    }};
}

/// Builds a [`TestContext`] with the user tables plus any additional entity tables.
#[macro_export]
macro_rules! test_setup_with_user_tables {
    () => {{
        $crate::TestBuilder::new().with_user_tables().build().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        $crate::TestBuilder::new()
            .with_user_tables()
            $(.with_table($entity))+
            .build()
            .await
    }};
}

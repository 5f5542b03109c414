use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tower_sessions::SessionManagerLayer;
use tower_sessions_redis_store::RedisStore;

use crate::server::{
    config::Config,
    email::{EmailSender, LogOnlyEmailSender, SmtpEmailSender},
    error::Error,
    event::EventAggregator,
    model::app::{AppState, Settings},
    openid::{DisabledRelyingParty, OidcRelyingParty, OpenIdRelyingParty},
    service::blocked_ip::BlockedIpCollection,
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis and configure session management
pub async fn connect_to_session(
    config: &Config,
) -> Result<SessionManagerLayer<RedisStore<tower_sessions_redis_store::fred::prelude::Pool>>, Error>
{
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
    use tower_sessions_redis_store::fred::prelude::*;

    let config = Config::from_url(&config.valkey_url)?;
    let pool = tower_sessions_redis_store::fred::prelude::Pool::new(config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    let session_store = RedisStore::new(pool);

    // Set secure based on build mode: in development (debug) use false, otherwise true.
    let development_mode = cfg!(debug_assertions);
    let secure_cookies = !development_mode;

    let session = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session)
}

/// SMTP delivery when `SMTP_URL` is set, otherwise mail is logged and dropped
pub fn build_email_sender(config: &Config) -> Result<Arc<dyn EmailSender>, Error> {
    match &config.smtp_url {
        Some(smtp_url) => Ok(Arc::new(SmtpEmailSender::new(smtp_url, &config.email_from)?)),
        None => {
            tracing::warn!("SMTP_URL is not set, outgoing email will not be delivered");

            Ok(Arc::new(LogOnlyEmailSender))
        }
    }
}

/// Relying party for the configured provider, the provider answers at `{ROOT_URL}/OpenId`
pub fn build_relying_party(config: &Config) -> Result<Arc<dyn OpenIdRelyingParty>, Error> {
    match &config.openid {
        Some(openid) => {
            let redirect_url = format!("{}/OpenId", config.root_url);

            Ok(Arc::new(OidcRelyingParty::new(openid, &redirect_url)?))
        }
        None => {
            tracing::warn!("OPENID_CLIENT_ID is not set, OpenID sign in is disabled");

            Ok(Arc::new(DisabledRelyingParty))
        }
    }
}

/// Assembles the application state and starts the domain event logger
pub async fn build_app_state(config: &Config, db: DatabaseConnection) -> Result<AppState, Error> {
    let blocked_ips = BlockedIpCollection::load(&db).await?;
    let events = EventAggregator::new();
    events.spawn_logger();

    Ok(AppState {
        db,
        settings: Arc::new(Settings::from(config)),
        email_sender: build_email_sender(config)?,
        openid: build_relying_party(config)?,
        blocked_ips,
        events,
    })
}

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    email::{registration_email, EmailSender},
    error::Error,
    model::app::Settings,
    service::user::create_user,
    util::id::shrink,
};

pub struct SignupService<'a> {
    db: &'a DatabaseConnection,
    settings: &'a Settings,
    email_sender: &'a dyn EmailSender,
}

impl<'a> SignupService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        settings: &'a Settings,
        email_sender: &'a dyn EmailSender,
    ) -> Self {
        Self {
            db,
            settings,
            email_sender,
        }
    }

    /// Registers an inactive account and mails its activation link.
    ///
    /// Inputs are expected to be validated and trimmed.
    pub async fn signup(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<entity::user::Model, Error> {
        let txn = self.db.begin().await?;

        let user = create_user(&txn, self.settings, user_name, email, Some(password)).await?;

        txn.commit().await?;

        let activation_url = format!("{}/Activate/{}", self.settings.root_url, shrink(user.id));

        self.email_sender
            .send(registration_email(
                self.settings,
                email,
                user_name,
                password,
                &activation_url,
            ))
            .await?;

        tracing::info!("User registered: {}", user.user_name);

        Ok(user)
    }
}

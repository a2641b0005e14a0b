//! Newsletter subscriber business logic service.

use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::api::common::{CreatedResponse, PaginationFilter, validation_errors_to_message};
use crate::database::models::{CreateSubscriber, Subscriber, UpdateSubscriber};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::subscriber_repository::SubscriberRepository;
use crate::utils::jwt::Claims;

pub struct SubscriberService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> SubscriberService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_subscriber(
        &self,
        payload: CreateSubscriber,
        actor: &Claims,
    ) -> ServiceResult<CreatedResponse> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let repo = SubscriberRepository::new(self.pool);

        if repo.get_subscriber_by_email(&payload.email).await?.is_some() {
            return Err(ServiceError::validation(format!(
                "Email {} is existed!",
                payload.email
            )));
        }

        let subscriber = repo
            .create_subscriber(
                &Uuid::now_v7().to_string(),
                &payload.name,
                &payload.email,
                &payload.skills,
                actor.user_id(),
            )
            .await?;

        Ok(CreatedResponse {
            id: subscriber.id,
            created_at: subscriber.created_at,
        })
    }

    pub async fn get_subscribers(
        &self,
        pagination: &PaginationFilter,
    ) -> ServiceResult<(Vec<Subscriber>, u64)> {
        let repo = SubscriberRepository::new(self.pool);

        let subscribers = repo.get_subscribers(pagination).await?;
        let total = repo.get_subscribers_count().await?;

        Ok((subscribers, total))
    }

    pub async fn get_subscriber_required(&self, id: &str) -> ServiceResult<Subscriber> {
        let subscriber = SubscriberRepository::new(self.pool)
            .get_subscriber_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Subscriber", id))?;

        Ok(subscriber)
    }

    /// Updates the acting user's subscription, creating it when absent.
    pub async fn update_own_subscription(
        &self,
        payload: UpdateSubscriber,
        actor: &Claims,
    ) -> ServiceResult<Subscriber> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let repo = SubscriberRepository::new(self.pool);

        let updated = repo
            .update_subscriber_by_email(
                &actor.email,
                payload.name.as_deref(),
                payload.skills.as_deref(),
                actor.user_id(),
            )
            .await?;

        match updated {
            Some(subscriber) => Ok(subscriber),
            None => {
                let subscriber = repo
                    .create_subscriber(
                        &Uuid::now_v7().to_string(),
                        payload.name.as_deref().unwrap_or(&actor.name),
                        &actor.email,
                        payload.skills.as_deref().unwrap_or_default(),
                        actor.user_id(),
                    )
                    .await?;
                Ok(subscriber)
            }
        }
    }

    /// The skills the acting user subscribed to; empty when there is no
    /// subscription for their email.
    pub async fn get_skills(&self, actor: &Claims) -> ServiceResult<Vec<String>> {
        let subscriber = SubscriberRepository::new(self.pool)
            .get_subscriber_by_email(&actor.email)
            .await?;

        Ok(subscriber.map(|s| s.skills.0).unwrap_or_default())
    }

    pub async fn delete_subscriber(&self, id: &str, actor: &Claims) -> ServiceResult<()> {
        let deleted = SubscriberRepository::new(self.pool)
            .soft_delete_subscriber(id, actor.user_id())
            .await?;

        if !deleted {
            return Err(ServiceError::not_found("Subscriber", id));
        }

        Ok(())
    }
}

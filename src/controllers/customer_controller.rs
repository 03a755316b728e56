use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::DeletedResponse;
use crate::dto::customer_dto::{CreateCustomerRequest, CustomerListQuery, UpdateCustomerRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::customer::Customer;
use crate::repositories::customer_repository::CustomerRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct CustomerController {
    repository: CustomerRepository,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        query: CustomerListQuery,
    ) -> AppResult<Vec<Customer>> {
        self.repository.list(&query, user.depot_scope()).await
    }

    /// Cliente visible para el usuario (403 si es de otro depósito)
    pub async fn get(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<Customer> {
        let customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))?;
        user.ensure_depot(&customer.depot_cd)?;
        Ok(customer)
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateCustomerRequest,
    ) -> AppResult<Customer> {
        user.ensure_admin()?;
        request.validate()?;
        if request.cust_cd.trim().is_empty() {
            return Err(AppError::BadRequest("custCd is required".to_string()));
        }

        let customer = self.repository.create(request).await?;
        info!(
            "🧾 Cliente {} ({}) creado por {}",
            customer.cust_cd, customer.depot_cd, user.user_id
        );
        Ok(customer)
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateCustomerRequest,
    ) -> AppResult<Customer> {
        user.ensure_admin()?;
        request.validate()?;
        self.get(user, id).await?;
        self.repository.update(id, request).await
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<DeletedResponse> {
        user.ensure_admin()?;
        self.get(user, id).await?;
        self.repository.delete(id).await?;
        Ok(DeletedResponse::new(id))
    }
}

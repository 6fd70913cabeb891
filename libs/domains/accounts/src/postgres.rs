use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity::{admin, user},
    error::AccountResult,
    models::{Admin, AdminStatus, User, UserFilter},
    repository::{AdminRepository, UserRepository},
};

pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: User) -> AccountResult<User> {
        let active_model: user::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> AccountResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> AccountResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: UserFilter) -> AccountResult<Vec<User>> {
        let mut query = user::Entity::find();

        if let Some(search) = filter.search.filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", search.trim());
            query = query.filter(Expr::cust_with_values(
                "(users.name ILIKE $1 OR users.email ILIKE $2)",
                [pattern.clone(), pattern],
            ));
        }

        let models = query
            .order_by_desc(user::Column::CreatedAt)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, input: User) -> AccountResult<User> {
        let id = input.id;
        let active_model: user::ActiveModel = input.into();
        let model = active_model.update(&self.db).await?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> AccountResult<bool> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(result.rows_affected > 0)
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

pub struct PgAdminRepository {
    db: DatabaseConnection,
}

impl PgAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn create(&self, input: Admin) -> AccountResult<Admin> {
        let active_model: admin::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(admin_id = %model.id, username = %model.username, "Created admin");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> AccountResult<Option<Admin>> {
        let model = admin::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> AccountResult<Option<Admin>> {
        let model = admin::Entity::find()
            .filter(admin::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_username(&self, username: &str) -> AccountResult<Option<Admin>> {
        let model = admin::Entity::find()
            .filter(admin::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> AccountResult<Vec<Admin>> {
        let models = admin::Entity::find()
            .order_by_desc(admin::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn set_status(&self, id: Uuid, status: AdminStatus) -> AccountResult<Option<Admin>> {
        let Some(model) = admin::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_model = model.into_active_model();
        active_model.status = Set(status);
        let updated = active_model.update(&self.db).await?;

        tracing::info!(admin_id = %id, status = %status, "Updated admin status");
        Ok(Some(updated.into()))
    }

    async fn set_password_hash(&self, id: Uuid, password_hash: String) -> AccountResult<bool> {
        let result = admin::Entity::update_many()
            .col_expr(admin::Column::PasswordHash, Expr::value(password_hash))
            .filter(admin::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        let count = admin::Entity::find()
            .filter(admin::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

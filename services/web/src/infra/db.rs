use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
    sea_query::{Expr, ExprTrait as _},
};

use smartstudy_web_schema::{otp_storage, study_sessions, users};

use crate::domain::repository::{OtpRepository, StudySessionRepository, UserRepository};
use crate::domain::types::{
    AccountKind, GoogleProfile, NewStudySession, NewUser, OtpRecord, User,
};
use crate::error::WebServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, WebServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WebServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_email_account(&self, email: &str) -> Result<Option<User>, WebServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::AuthType.eq("email"))
            .one(&self.db)
            .await
            .context("find email account")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, WebServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::GoogleId.eq(google_id))
            .one(&self.db)
            .await
            .context("find user by google id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<User, WebServiceError> {
        let google_id = match &user.kind {
            AccountKind::Email => None,
            AccountKind::Google { google_id } => Some(google_id.clone()),
        };
        let model = users::ActiveModel {
            google_id: Set(google_id),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            profile_picture: Set(user.profile_picture.clone()),
            points: Set(0),
            total_study_time: Set(0),
            auth_type: Set(user.kind.tag().to_owned()),
            email_verified: Set(user.email_verified),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(user_from_model(model))
    }

    async fn update_google_profile(
        &self,
        google_id: &str,
        profile: &GoogleProfile,
    ) -> Result<(), WebServiceError> {
        users::Entity::update_many()
            .col_expr(users::Column::Email, Expr::value(profile.email.clone()))
            .col_expr(users::Column::Name, Expr::value(profile.name.clone()))
            .col_expr(
                users::Column::ProfilePicture,
                Expr::value(profile.picture.clone()),
            )
            .col_expr(users::Column::AuthType, Expr::value("google"))
            .filter(users::Column::GoogleId.eq(google_id))
            .exec(&self.db)
            .await
            .context("update google profile")?;
        Ok(())
    }

    async fn add_study_reward(
        &self,
        id: i64,
        points: i32,
        seconds: i64,
    ) -> Result<(), WebServiceError> {
        users::Entity::update_many()
            .col_expr(
                users::Column::Points,
                Expr::col(users::Column::Points).add(points),
            )
            .col_expr(
                users::Column::TotalStudyTime,
                Expr::col(users::Column::TotalStudyTime).add(seconds),
            )
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("add study reward")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    let kind = match (model.auth_type.as_str(), model.google_id) {
        ("google", Some(google_id)) => AccountKind::Google { google_id },
        _ => AccountKind::Email,
    };
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        profile_picture: model.profile_picture,
        points: model.points,
        total_study_time: model.total_study_time,
        email_verified: model.email_verified,
        kind,
    }
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn replace(&self, record: &OtpRecord) -> Result<(), WebServiceError> {
        let record = record.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    otp_storage::Entity::delete_by_id(record.email.clone())
                        .exec(txn)
                        .await?;
                    otp_storage::ActiveModel {
                        email: Set(record.email),
                        code: Set(record.code),
                        expires_at: Set(record.expires_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("replace otp")?;
        Ok(())
    }

    async fn take(&self, email: &str) -> Result<Option<OtpRecord>, WebServiceError> {
        let email = email.to_owned();
        let model = self
            .db
            .transaction::<_, Option<otp_storage::Model>, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let found = otp_storage::Entity::find_by_id(email.clone()).one(txn).await?;
                    if found.is_some() {
                        otp_storage::Entity::delete_by_id(email).exec(txn).await?;
                    }
                    Ok(found)
                })
            })
            .await
            .context("take otp")?;
        Ok(model.map(otp_from_model))
    }
}

fn otp_from_model(model: otp_storage::Model) -> OtpRecord {
    OtpRecord {
        email: model.email,
        code: model.code,
        expires_at: model.expires_at,
    }
}

// ── Study session repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStudySessionRepository {
    pub db: DatabaseConnection,
}

impl StudySessionRepository for DbStudySessionRepository {
    async fn create(&self, session: &NewStudySession) -> Result<i64, WebServiceError> {
        let model = study_sessions::ActiveModel {
            user_id: Set(session.user_id),
            mode: Set(session.mode.clone()),
            duration_secs: Set(session.duration_secs),
            completed: Set(false),
            started_at: Set(session.started_at),
            ended_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create study session")?;
        Ok(model.id)
    }

    async fn complete(
        &self,
        id: i64,
        user_id: i64,
        ended_at: DateTime<Utc>,
    ) -> Result<bool, WebServiceError> {
        let result = study_sessions::Entity::update_many()
            .col_expr(study_sessions::Column::Completed, Expr::value(true))
            .col_expr(study_sessions::Column::EndedAt, Expr::value(ended_at))
            .filter(study_sessions::Column::Id.eq(id))
            .filter(study_sessions::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("complete study session")?;
        Ok(result.rows_affected > 0)
    }
}

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::WebServiceError;

pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub users: U,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub async fn execute(&self, user_id: i64) -> Result<User, WebServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(WebServiceError::AccountNotFound)
    }
}

use smartstudy_session_types::flow::PendingFlow;

use crate::domain::repository::{Mailer, OtpRepository, UserRepository};
use crate::domain::types::{AccountKind, NewUser};
use crate::error::WebServiceError;
use crate::usecase::otp::{issue_otp, verify_otp};
use crate::usecase::session::{SessionGrant, issue_session_token};

// ── Start registration ────────────────────────────────────────────────────────

pub struct StartRegistrationInput {
    pub email: String,
    pub name: String,
}

pub struct StartRegistrationUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> StartRegistrationUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    /// Validate the form, make sure the email is free, then issue and mail
    /// an OTP. The duplicate check runs first so a taken email leaves no
    /// trace in the OTP store. On success the caller parks a `Register`
    /// pending flow and waits for the code.
    pub async fn execute(
        &self,
        input: StartRegistrationInput,
    ) -> Result<PendingFlow, WebServiceError> {
        if input.email.is_empty() {
            return Err(WebServiceError::MissingField("email"));
        }
        if input.name.is_empty() {
            return Err(WebServiceError::MissingField("name"));
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(WebServiceError::EmailAlreadyRegistered);
        }

        issue_otp(&self.otps, &self.mailer, &input.email).await?;

        Ok(PendingFlow::Register {
            email: input.email,
            name: input.name,
        })
    }
}

// ── Confirm registration ──────────────────────────────────────────────────────

pub struct ConfirmRegistrationUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub users: U,
    pub otps: O,
    pub session_secret: String,
}

impl<U, O> ConfirmRegistrationUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    /// Burn the OTP, and only on a match create the account: variant
    /// `email`, email verified by the code itself, zero points and study
    /// time. The unique index on email settles any concurrent duplicate.
    pub async fn execute(
        &self,
        email: &str,
        name: &str,
        submitted_code: &str,
    ) -> Result<SessionGrant, WebServiceError> {
        if !verify_otp(&self.otps, email, submitted_code).await? {
            return Err(WebServiceError::InvalidOtp);
        }

        let user = self
            .users
            .create(&NewUser {
                email: email.to_owned(),
                name: name.to_owned(),
                profile_picture: None,
                email_verified: true,
                kind: AccountKind::Email,
            })
            .await?;

        let session_token = issue_session_token(user.id, false, &self.session_secret)?;
        Ok(SessionGrant {
            user,
            session_token,
        })
    }
}

use smartstudy_session_types::flow::PendingFlow;

use crate::domain::repository::{Mailer, OtpRepository, UserRepository};
use crate::error::WebServiceError;
use crate::usecase::otp::{issue_otp, verify_otp};
use crate::usecase::session::{SessionGrant, issue_session_token};

// ── Start login ───────────────────────────────────────────────────────────────

pub struct StartLoginUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> StartLoginUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    /// OTP login is only offered to `email`-variant accounts. An unknown
    /// email and a Google-only account get the same answer: the lookup
    /// filters on the variant, so both simply come back empty.
    pub async fn execute(&self, email: String) -> Result<PendingFlow, WebServiceError> {
        if email.is_empty() {
            return Err(WebServiceError::MissingField("email"));
        }

        if self.users.find_email_account(&email).await?.is_none() {
            return Err(WebServiceError::AccountNotFound);
        }

        issue_otp(&self.otps, &self.mailer, &email).await?;

        Ok(PendingFlow::Login { email })
    }
}

// ── Confirm login ─────────────────────────────────────────────────────────────

pub struct ConfirmLoginUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub users: U,
    pub otps: O,
    pub session_secret: String,
}

impl<U, O> ConfirmLoginUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    /// Burn the OTP, then load the account. The confirm step looks up by
    /// email alone, without the variant filter the start step applies.
    pub async fn execute(
        &self,
        email: &str,
        submitted_code: &str,
    ) -> Result<SessionGrant, WebServiceError> {
        if !verify_otp(&self.otps, email, submitted_code).await? {
            return Err(WebServiceError::InvalidOtp);
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(WebServiceError::AccountNotFound)?;

        let session_token = issue_session_token(user.id, false, &self.session_secret)?;
        Ok(SessionGrant {
            user,
            session_token,
        })
    }
}

use chrono::{Duration, Utc};
use rand::RngExt;

use crate::domain::repository::{Mailer, OtpRepository};
use crate::domain::types::{OTP_LEN, OTP_TTL_SECS, OtpRecord};
use crate::error::WebServiceError;

/// Generate a uniformly random fixed-width decimal code. Leading zeros are
/// legal, hence a string and never an integer.
pub(crate) fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Issue a fresh OTP for an email and hand it to the mailer. Replaces any
/// outstanding code for the address first. A mail failure aborts the flow;
/// the caller never transitions to a pending state.
pub async fn issue_otp<O, M>(otps: &O, mailer: &M, email: &str) -> Result<(), WebServiceError>
where
    O: OtpRepository,
    M: Mailer,
{
    let code = generate_code();
    let record = OtpRecord {
        email: email.to_owned(),
        code: code.clone(),
        expires_at: Utc::now() + Duration::seconds(OTP_TTL_SECS),
    };
    otps.replace(&record).await?;
    mailer.send_otp_email(email, &code).await
}

/// Verify a submitted OTP. Single-shot: the stored record is removed before
/// the comparison result is used, so a wrong code, an expired code, and a
/// correct code all consume the slot. Re-verifying afterwards always fails
/// until a new code is issued.
pub async fn verify_otp<O>(otps: &O, email: &str, submitted: &str) -> Result<bool, WebServiceError>
where
    O: OtpRepository,
{
    let Some(record) = otps.take(email).await? else {
        return Ok(false);
    };
    Ok(record.code == submitted && Utc::now() <= record.expires_at)
}

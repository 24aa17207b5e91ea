use chrono::{Duration, Utc};

use smartstudy_web::domain::repository::OtpRepository;
use smartstudy_web::domain::types::OtpRecord;
use smartstudy_web::usecase::otp::{issue_otp, verify_otp};

use crate::helpers::{MockMailer, MockOtpRepo};

const EMAIL: &str = "a@x.com";

fn live_record(code: &str) -> OtpRecord {
    OtpRecord {
        email: EMAIL.to_owned(),
        code: code.to_owned(),
        expires_at: Utc::now() + Duration::minutes(10),
    }
}

#[tokio::test]
async fn should_verify_issued_code_exactly_once() {
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::working();

    issue_otp(&otps, &mailer, EMAIL).await.unwrap();
    let code = mailer.last_code().expect("a code was mailed");
    assert_eq!(code, otps.stored_code(EMAIL).unwrap());

    assert!(verify_otp(&otps, EMAIL, &code).await.unwrap());
    // Burned on the first attempt; the same code never verifies twice.
    assert!(!verify_otp(&otps, EMAIL, &code).await.unwrap());
}

#[tokio::test]
async fn should_invalidate_first_code_when_second_is_issued() {
    let otps = MockOtpRepo::empty();

    otps.replace(&live_record("111111")).await.unwrap();
    otps.replace(&live_record("222222")).await.unwrap();

    // The first code is gone, and the attempt burned the replacement too.
    assert!(!verify_otp(&otps, EMAIL, "111111").await.unwrap());
    assert!(!verify_otp(&otps, EMAIL, "222222").await.unwrap());
}

#[tokio::test]
async fn should_burn_slot_on_wrong_code() {
    let otps = MockOtpRepo::empty();
    otps.replace(&live_record("123456")).await.unwrap();

    assert!(!verify_otp(&otps, EMAIL, "000000").await.unwrap());
    // The correct code no longer helps.
    assert!(!verify_otp(&otps, EMAIL, "123456").await.unwrap());
    assert!(otps.is_empty());
}

#[tokio::test]
async fn should_reject_correct_but_expired_code() {
    let otps = MockOtpRepo::empty();
    otps.replace(&OtpRecord {
        email: EMAIL.to_owned(),
        code: "123456".to_owned(),
        expires_at: Utc::now() - Duration::seconds(1),
    })
    .await
    .unwrap();

    assert!(!verify_otp(&otps, EMAIL, "123456").await.unwrap());
    // Expired attempts consume the slot like any other.
    assert!(otps.is_empty());
}

#[tokio::test]
async fn should_reject_when_no_code_outstanding() {
    let otps = MockOtpRepo::empty();
    assert!(!verify_otp(&otps, EMAIL, "123456").await.unwrap());
}

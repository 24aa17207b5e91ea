use smartstudy_session_types::flow::PendingFlow;
use smartstudy_session_types::token::validate_session_token;

use smartstudy_web::domain::types::AccountKind;
use smartstudy_web::error::WebServiceError;
use smartstudy_web::usecase::register::{
    ConfirmRegistrationUseCase, StartRegistrationInput, StartRegistrationUseCase,
};

use crate::helpers::{MockMailer, MockOtpRepo, MockUserRepo, TEST_SESSION_SECRET, email_user};

fn start_input(email: &str, name: &str) -> StartRegistrationInput {
    StartRegistrationInput {
        email: email.to_owned(),
        name: name.to_owned(),
    }
}

#[tokio::test]
async fn should_reject_missing_fields() {
    let otps = MockOtpRepo::empty();
    let uc = StartRegistrationUseCase {
        users: MockUserRepo::empty(),
        otps: otps.clone(),
        mailer: MockMailer::working(),
    };

    let result = uc.execute(start_input("", "Ann")).await;
    assert!(matches!(result, Err(WebServiceError::MissingField("email"))));

    let result = uc.execute(start_input("a@x.com", "")).await;
    assert!(matches!(result, Err(WebServiceError::MissingField("name"))));

    assert!(otps.is_empty());
}

#[tokio::test]
async fn should_reject_taken_email_before_issuing_any_code() {
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::working();
    let uc = StartRegistrationUseCase {
        users: MockUserRepo::new(vec![email_user(1, "a@x.com")]),
        otps: otps.clone(),
        mailer: mailer.clone(),
    };

    let result = uc.execute(start_input("a@x.com", "Ann")).await;

    assert!(matches!(result, Err(WebServiceError::EmailAlreadyRegistered)));
    assert!(otps.is_empty(), "no OTP side effect for a taken email");
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_abort_flow_when_mail_delivery_fails() {
    let users = MockUserRepo::empty();
    let uc = StartRegistrationUseCase {
        users: users.clone(),
        otps: MockOtpRepo::empty(),
        mailer: MockMailer::broken(),
    };

    let result = uc.execute(start_input("a@x.com", "Ann")).await;

    assert!(matches!(result, Err(WebServiceError::MailDelivery(_))));
    assert!(users.users_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_issue_and_mail_code_then_await_confirmation() {
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::working();
    let uc = StartRegistrationUseCase {
        users: MockUserRepo::empty(),
        otps: otps.clone(),
        mailer: mailer.clone(),
    };

    let flow = uc.execute(start_input("a@x.com", "Ann")).await.unwrap();

    assert_eq!(
        flow,
        PendingFlow::Register {
            email: "a@x.com".to_owned(),
            name: "Ann".to_owned(),
        }
    );
    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "a@x.com");
    assert_eq!(Some(&sent[0].1), otps.stored_code("a@x.com").as_ref());
}

#[tokio::test]
async fn should_reject_wrong_code_without_creating_account() {
    let users = MockUserRepo::empty();
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::working();

    let start = StartRegistrationUseCase {
        users: users.clone(),
        otps: otps.clone(),
        mailer: mailer.clone(),
    };
    start.execute(start_input("a@x.com", "Ann")).await.unwrap();
    let correct = mailer.last_code().unwrap();
    let wrong = if correct == "000000" { "999999" } else { "000000" };

    let confirm = ConfirmRegistrationUseCase {
        users: users.clone(),
        otps: otps.clone(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
    };
    let result = confirm.execute("a@x.com", "Ann", wrong).await;

    assert!(matches!(result, Err(WebServiceError::InvalidOtp)));
    assert!(users.users_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_create_verified_email_account_on_correct_code() {
    let users = MockUserRepo::empty();
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::working();

    let start = StartRegistrationUseCase {
        users: users.clone(),
        otps: otps.clone(),
        mailer: mailer.clone(),
    };

    // First attempt with a wrong code burns the outstanding OTP, so the flow
    // needs a fresh code before the correct confirmation can land.
    start.execute(start_input("a@x.com", "Ann")).await.unwrap();
    let correct = mailer.last_code().unwrap();
    let wrong = if correct == "000000" { "999999" } else { "000000" };
    let confirm = ConfirmRegistrationUseCase {
        users: users.clone(),
        otps: otps.clone(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
    };
    assert!(matches!(
        confirm.execute("a@x.com", "Ann", wrong).await,
        Err(WebServiceError::InvalidOtp)
    ));

    start.execute(start_input("a@x.com", "Ann")).await.unwrap();
    let code = mailer.last_code().unwrap();
    let grant = confirm.execute("a@x.com", "Ann", &code).await.unwrap();

    assert_eq!(grant.user.email, "a@x.com");
    assert_eq!(grant.user.name, "Ann");
    assert_eq!(grant.user.kind, AccountKind::Email);
    assert!(grant.user.email_verified);
    assert_eq!(grant.user.points, 0);
    assert_eq!(grant.user.total_study_time, 0);

    let stored = users.users_handle();
    assert_eq!(stored.lock().unwrap().len(), 1);

    let info = validate_session_token(&grant.session_token, TEST_SESSION_SECRET).unwrap();
    assert_eq!(info.user_id, grant.user.id);
}

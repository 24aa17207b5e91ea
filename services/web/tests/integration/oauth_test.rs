use smartstudy_session_types::cookie::{REMEMBER_SESSION_EXP, SESSION_EXP};
use smartstudy_session_types::flow::PendingFlow;
use smartstudy_session_types::token::validate_session_token;

use smartstudy_web::domain::types::AccountKind;
use smartstudy_web::error::WebServiceError;
use smartstudy_web::usecase::oauth::{
    DEFAULT_NEXT_URL, OAuthCallbackInput, OAuthCallbackUseCase, StartOAuthUseCase,
};

use crate::helpers::{MockGoogle, MockUserRepo, TEST_SESSION_SECRET, google_userinfo};

fn callback_input(state: &str, stored: &str) -> OAuthCallbackInput {
    OAuthCallbackInput {
        code: "auth-code".to_owned(),
        returned_state: state.to_owned(),
        stored_state: stored.to_owned(),
    }
}

#[tokio::test]
async fn should_build_authorization_url_carrying_the_pending_state() {
    let uc = StartOAuthUseCase {
        google: MockGoogle::broken_userinfo(),
    };

    let out = uc.execute(None);

    let PendingFlow::Oauth { state, next_url } = out.flow else {
        panic!("expected an oauth pending flow");
    };
    assert!(out.authorization_url.contains(&format!("state={state}")));
    assert_eq!(next_url, DEFAULT_NEXT_URL);
}

#[tokio::test]
async fn should_remember_explicit_next_url() {
    let uc = StartOAuthUseCase {
        google: MockGoogle::broken_userinfo(),
    };

    let out = uc.execute(Some("/groups".to_owned()));

    assert!(matches!(
        out.flow,
        PendingFlow::Oauth { next_url, .. } if next_url == "/groups"
    ));
}

#[tokio::test]
async fn should_reject_state_mismatch_before_touching_anything() {
    let users = MockUserRepo::empty();
    let google = MockGoogle::with_userinfo(google_userinfo("sub-1", "gail@x.com", "Gail"));
    let uc = OAuthCallbackUseCase {
        google: google.clone(),
        users: users.clone(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
    };

    let result = uc.execute(callback_input("forged", "expected")).await;

    assert!(matches!(result, Err(WebServiceError::StateMismatch)));
    assert_eq!(*google.exchange_calls.lock().unwrap(), 0);
    assert!(users.users_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_create_verified_google_account_on_first_callback() {
    let users = MockUserRepo::empty();
    let uc = OAuthCallbackUseCase {
        google: MockGoogle::with_userinfo(google_userinfo("sub-1", "gail@x.com", "Gail")),
        users: users.clone(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
    };

    let grant = uc.execute(callback_input("s", "s")).await.unwrap();

    assert_eq!(
        grant.user.kind,
        AccountKind::Google {
            google_id: "sub-1".to_owned(),
        }
    );
    assert!(grant.user.email_verified);
    assert_eq!(grant.user.points, 0);
    assert_eq!(grant.user.total_study_time, 0);

    // OAuth sessions always remember.
    let info = validate_session_token(&grant.session_token, TEST_SESSION_SECRET).unwrap();
    let short_lived = validate_session_token(
        &smartstudy_web::usecase::session::issue_session_token(
            grant.user.id,
            false,
            TEST_SESSION_SECRET,
        )
        .unwrap(),
        TEST_SESSION_SECRET,
    )
    .unwrap();
    assert_eq!(info.exp - short_lived.exp, REMEMBER_SESSION_EXP - SESSION_EXP);
}

#[tokio::test]
async fn should_update_existing_account_instead_of_duplicating() {
    let users = MockUserRepo::empty();

    let first = OAuthCallbackUseCase {
        google: MockGoogle::with_userinfo(google_userinfo("sub-1", "old@x.com", "Gail")),
        users: users.clone(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
    };
    let created = first.execute(callback_input("s", "s")).await.unwrap();

    // Second callback for the same external id, with a changed profile.
    let second = OAuthCallbackUseCase {
        google: MockGoogle::with_userinfo(google_userinfo("sub-1", "new@x.com", "Gail R")),
        users: users.clone(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
    };
    let grant = second.execute(callback_input("t", "t")).await.unwrap();

    assert_eq!(grant.user.id, created.user.id);
    assert_eq!(grant.user.email, "new@x.com");
    assert_eq!(grant.user.name, "Gail R");

    let stored = users.users_handle();
    let stored = stored.lock().unwrap();
    assert_eq!(stored.len(), 1, "callback must update, not duplicate");
    assert_eq!(stored[0].email, "new@x.com");
}

#[tokio::test]
async fn should_fail_closed_when_userinfo_is_unavailable() {
    let users = MockUserRepo::empty();
    let uc = OAuthCallbackUseCase {
        google: MockGoogle::broken_userinfo(),
        users: users.clone(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
    };

    let result = uc.execute(callback_input("s", "s")).await;

    assert!(matches!(result, Err(WebServiceError::OauthUpstream(_))));
    assert!(users.users_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_fail_closed_when_code_exchange_fails() {
    let users = MockUserRepo::empty();
    let uc = OAuthCallbackUseCase {
        google: MockGoogle::broken_exchange(),
        users: users.clone(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
    };

    let result = uc.execute(callback_input("s", "s")).await;

    assert!(matches!(result, Err(WebServiceError::OauthUpstream(_))));
    assert!(users.users_handle().lock().unwrap().is_empty());
}

use sea_orm::Database;
use tracing::info;

use smartstudy_core::tracing::init_tracing;
use smartstudy_web::config::WebConfig;
use smartstudy_web::infra::google::GoogleOAuthClient;
use smartstudy_web::infra::mailer::RelayMailer;
use smartstudy_web::infra::suggest::ChatSuggestionProvider;
use smartstudy_web::router::build_router;
use smartstudy_web::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = WebConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let google = GoogleOAuthClient::new(
        config.google_client_id,
        config.google_client_secret,
        config.google_redirect_uri,
    );
    let mailer = RelayMailer::new(config.mail_api_url, config.mail_api_key, config.mail_from);
    let suggestions = ChatSuggestionProvider::new(
        config.suggestion_api_url,
        config.suggestion_api_key,
    );

    let state = AppState {
        db,
        google,
        mailer,
        suggestions,
        session_secret: config.session_secret,
        cookie_domain: config.cookie_domain,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.web_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("web service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}

use crate::domain::repository::Mailer;
use crate::error::WebServiceError;
use crate::infra::outbound_client;

/// OTP mail dispatched through an HTTP mail relay. The relay is opaque: any
/// failure surfaces as "could not deliver", never as a statement about the
/// address.
#[derive(Clone)]
pub struct RelayMailer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl RelayMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            http: outbound_client(),
            api_url,
            api_key,
            from,
        }
    }
}

fn delivery_failed(what: &'static str) -> impl FnOnce(reqwest::Error) -> WebServiceError {
    move |e| WebServiceError::MailDelivery(anyhow::Error::new(e).context(what))
}

fn otp_email_html(code: &str) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2>Study Smart Timer - One-Time Password</h2>\
         <p>Your OTP for authentication is:</p>\
         <h1 style=\"letter-spacing: 5px;\">{code}</h1>\
         <p>This OTP will expire in 10 minutes.</p>\
         <p>If you didn't request this OTP, please ignore this email.</p>\
         </div>"
    )
}

impl Mailer for RelayMailer {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), WebServiceError> {
        let body = serde_json::json!({
            "from": self.from,
            "to": to,
            "subject": "Your Study Smart Timer OTP",
            "html": otp_email_html(code),
        });
        self.http
            .post(format!("{}/messages", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(delivery_failed("otp mail request"))?
            .error_for_status()
            .map_err(delivery_failed("otp mail status"))?;
        Ok(())
    }
}

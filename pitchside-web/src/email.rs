//! Outbound mail
//!
//! Notifications are best effort: missing SMTP credentials is a valid
//! disabled state, and delivery failures are logged and reported as
//! not-sent. Nothing in here ever fails the surrounding request.

use crate::WebConfig;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

const SMTP_PORT: u16 = 587;

/// SMTP mailer. `None` transport means mail is disabled.
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
    to: Option<Mailbox>,
}

impl Mailer {
    /// Build a mailer from configuration. Any missing credential disables
    /// the mailer instead of erroring.
    pub fn from_config(config: &WebConfig) -> Self {
        if !config.mail_configured() {
            info!("SMTP not configured; outbound mail disabled");
            return Self::disabled();
        }

        let from: Mailbox = match config.smtp_user.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                warn!(error = %e, "Invalid SMTP_USER address; outbound mail disabled");
                return Self::disabled();
            }
        };

        let to: Mailbox = match config.smtp_to_email.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                warn!(error = %e, "Invalid SMTP_TO_EMAIL address; outbound mail disabled");
                return Self::disabled();
            }
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)
        {
            Ok(builder) => builder
                .port(SMTP_PORT)
                .credentials(Credentials::new(
                    config.smtp_user.clone(),
                    config.smtp_password.clone(),
                ))
                .build(),
            Err(e) => {
                warn!(error = %e, host = %config.smtp_server, "Failed to create SMTP transport; outbound mail disabled");
                return Self::disabled();
            }
        };

        info!(host = %config.smtp_server, port = SMTP_PORT, "Created SMTP transport");
        Self {
            transport: Some(transport),
            from: Some(from),
            to: Some(to),
        }
    }

    /// A mailer that skips every send
    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: None,
            to: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Send a plain-text message to the configured recipient.
    ///
    /// Returns whether the message was actually handed to the relay; a
    /// disabled mailer or a delivery failure both report `false`.
    pub async fn send(&self, subject: &str, body: &str) -> bool {
        let (Some(transport), Some(from), Some(to)) = (&self.transport, &self.from, &self.to)
        else {
            debug!(subject = %subject, "SMTP not configured; skipping email");
            return false;
        };

        let message = Message::builder()
            .from(from.clone())
            .to(to.clone())
            .subject(subject)
            .body(body.to_string());

        let message = match message {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, subject = %subject, "Failed to build email message");
                return false;
            }
        };

        match transport.send(message).await {
            Ok(response) if response.is_positive() => {
                info!(subject = %subject, "Email sent");
                true
            }
            Ok(response) => {
                warn!(code = %response.code(), subject = %subject, "Relay refused email");
                false
            }
            Err(e) => {
                warn!(error = %e, subject = %subject, "Failed to send email");
                false
            }
        }
    }

    /// Notify the admin of a contact form submission
    pub async fn send_contact_notification(&self, name: &str, email: &str, message: &str) -> bool {
        let subject = format!("New Contact: {name}");
        let body = format!("Name: {name}\nEmail: {email}\n\nMessage:\n{message}");
        self.send(&subject, &body).await
    }

    /// Notify the admin of a new registration
    pub async fn send_registration_notification(&self, username: &str) -> bool {
        let subject = format!("New User Registered: {username}");
        let body = format!(
            "A new user has registered on the site.\n\nUsername: {username}\nTime: {}",
            chrono::Utc::now().to_rfc2822()
        );
        self.send(&subject, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_mailer_reports_not_sent() {
        let mailer = Mailer::disabled();
        assert!(!mailer.is_enabled());
        assert!(!mailer.send("subject", "body").await);
        assert!(!mailer.send_contact_notification("A", "a@b.c", "hi").await);
    }

    #[test]
    fn partial_credentials_disable_mail() {
        let config = WebConfig {
            smtp_user: "site@example.com".to_string(),
            // password and recipient left empty
            ..WebConfig::default()
        };

        let mailer = Mailer::from_config(&config);
        assert!(!mailer.is_enabled());
    }

    #[test]
    fn full_credentials_enable_mail() {
        let config = WebConfig {
            smtp_user: "site@example.com".to_string(),
            smtp_password: "secret".to_string(),
            smtp_to_email: "admin@example.com".to_string(),
            ..WebConfig::default()
        };

        let mailer = Mailer::from_config(&config);
        assert!(mailer.is_enabled());
    }

    #[test]
    fn unparseable_sender_disables_mail() {
        let config = WebConfig {
            smtp_user: "not an address".to_string(),
            smtp_password: "secret".to_string(),
            smtp_to_email: "admin@example.com".to_string(),
            ..WebConfig::default()
        };

        let mailer = Mailer::from_config(&config);
        assert!(!mailer.is_enabled());
    }
}

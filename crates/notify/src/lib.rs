//! Outbound email notifications.
//!
//! Delivery is always best-effort: every send is spawned onto the runtime
//! and failures are logged, never propagated. A missing SMTP configuration
//! disables delivery entirely without affecting any request path.

pub mod mailer;
pub mod templates;

use std::sync::Arc;

pub use mailer::{EmailConfig, EmailError, Mailer};

/// Fire-and-forget notification sender shared across handlers.
pub struct Notifier {
    mailer: Option<Arc<Mailer>>,
}

impl Notifier {
    pub fn new(mailer: Option<Mailer>) -> Self {
        Notifier {
            mailer: mailer.map(Arc::new),
        }
    }

    /// Build from the environment; delivery is disabled when SMTP is not
    /// configured or the transport cannot be constructed.
    pub fn from_env() -> Self {
        let mailer = match EmailConfig::from_env() {
            Some(config) => match Mailer::new(&config) {
                Ok(m) => {
                    tracing::info!(host = %config.smtp_host, "email delivery enabled");
                    Some(m)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to build smtp transport, email disabled");
                    None
                }
            },
            None => {
                tracing::info!("SMTP_HOST not set, email delivery disabled");
                None
            }
        };
        Notifier::new(mailer)
    }

    pub fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    /// Spawn a send in the background. The caller never observes the
    /// outcome; failures are logged at warn level.
    pub fn send_best_effort(&self, to: String, subject: String, html_body: String) {
        let Some(mailer) = self.mailer.clone() else {
            tracing::debug!(%to, %subject, "email disabled, dropping notification");
            return;
        };
        tokio::spawn(async move {
            if let Err(err) = mailer.send(&to, &subject, &html_body).await {
                tracing::warn!(%to, %subject, error = %err, "failed to send notification email");
            }
        });
    }

    /// Send and wait for the result. Used where the caller reports
    /// delivery success, such as the steward credentials email.
    pub async fn send_and_report(&self, to: &str, subject: &str, html_body: &str) -> bool {
        let Some(mailer) = &self.mailer else {
            tracing::debug!(%to, %subject, "email disabled, dropping notification");
            return false;
        };
        match mailer.send(to, subject, html_body).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%to, %subject, error = %err, "failed to send notification email");
                false
            }
        }
    }
}

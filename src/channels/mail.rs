use super::payload;
use super::traits::Channel;
use crate::config::MailConfig;
use crate::error::ChannelError;
use async_trait::async_trait;
use lettre::message::Message;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

/// Emergency email over authenticated SMTP with STARTTLS.
pub struct MailChannel {
    config: MailConfig,
}

impl MailChannel {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Channel for MailChannel {
    fn name(&self) -> &'static str {
        "mail"
    }

    fn validate(&self) -> Result<(), ChannelError> {
        match self.config.password.as_deref() {
            Some(p) if !p.is_empty() => Ok(()),
            _ => Err(ChannelError::ConfigurationMissing {
                field: "smtp_password",
            }),
        }
    }

    async fn send(&self) -> Result<Option<String>, ChannelError> {
        self.validate()?;
        let password = self.config.password.clone().unwrap_or_default();

        let message = Message::builder()
            .from(
                self.config
                    .sender
                    .parse()
                    .map_err(|e| ChannelError::Delivery(format!("bad sender address: {e}")))?,
            )
            .to(self
                .config
                .recipient
                .parse()
                .map_err(|e| ChannelError::Delivery(format!("bad recipient address: {e}")))?)
            .subject(payload::ALERT_SUBJECT)
            .body(payload::ALERT_MAIL_BODY.to_string())
            .map_err(|e| ChannelError::Delivery(e.to_string()))?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
            .map_err(|e| ChannelError::Delivery(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(self.config.sender.clone(), password))
            .build();

        mailer
            .send(message)
            .await
            .map_err(|e| ChannelError::Delivery(e.to_string()))?;

        Ok(None)
    }
}

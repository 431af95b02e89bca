use super::payload;
use super::traits::Channel;
use crate::config::SmsConfig;
use crate::error::ChannelError;
use async_trait::async_trait;
use reqwest::Client;

/// Emergency text message via the provider's REST API.
pub struct SmsChannel {
    config: SmsConfig,
    client: Client,
}

impl SmsChannel {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn messages_url(&self, account_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{account_sid}/Messages.json",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Channel for SmsChannel {
    fn name(&self) -> &'static str {
        "sms"
    }

    fn validate(&self) -> Result<(), ChannelError> {
        if self.config.account_sid.as_deref().is_none_or(str::is_empty) {
            return Err(ChannelError::ConfigurationMissing {
                field: "account_sid",
            });
        }
        if self.config.auth_token.as_deref().is_none_or(str::is_empty) {
            return Err(ChannelError::ConfigurationMissing {
                field: "auth_token",
            });
        }
        Ok(())
    }

    async fn send(&self) -> Result<Option<String>, ChannelError> {
        self.validate()?;
        let account_sid = self.config.account_sid.clone().unwrap_or_default();
        let auth_token = self.config.auth_token.clone().unwrap_or_default();

        let params = [
            ("Body", payload::ALERT_SMS_BODY),
            ("From", self.config.from_number.as_str()),
            ("To", self.config.to_number.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url(&account_sid))
            .basic_auth(&account_sid, Some(&auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| ChannelError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::Delivery(format!(
                "provider returned {status}: {body}"
            )));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChannelError::Delivery(e.to_string()))?;
        let sid = data
            .get("sid")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        Ok(sid)
    }
}

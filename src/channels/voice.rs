use super::traits::Channel;
use crate::config::VoiceConfig;
use crate::error::ChannelError;
use async_trait::async_trait;
use reqwest::Client;

/// Automated emergency voice call via the provider's REST API. The spoken
/// content comes from a remote call-script resource the provider fetches.
pub struct VoiceChannel {
    config: VoiceConfig,
    client: Client,
}

impl VoiceChannel {
    pub fn new(config: VoiceConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn calls_url(&self, account_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{account_sid}/Calls.json",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Channel for VoiceChannel {
    fn name(&self) -> &'static str {
        "voice"
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
        if self.config.script_url.as_deref().is_none_or(str::is_empty) {
            return Err(ChannelError::ConfigurationMissing {
                field: "script_url",
            });
        }
        Ok(())
    }

    async fn send(&self) -> Result<Option<String>, ChannelError> {
        self.validate()?;
        let account_sid = self.config.account_sid.clone().unwrap_or_default();
        let auth_token = self.config.auth_token.clone().unwrap_or_default();
        let script_url = self.config.script_url.clone().unwrap_or_default();

        let params = [
            ("Url", script_url.as_str()),
            ("From", self.config.from_number.as_str()),
            ("To", self.config.to_number.as_str()),
        ];

        let response = self
            .client
            .post(self.calls_url(&account_sid))
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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn voice_config(api_base: String) -> VoiceConfig {
        VoiceConfig {
            account_sid: Some("AC123".into()),
            auth_token: Some("tok".into()),
            from_number: "+15550100".into(),
            to_number: "+15550101".into(),
            script_url: Some("https://handler.example.com/alert.xml".into()),
            api_base,
        }
    }

    #[test]
    fn missing_script_url_fails_validation() {
        let mut config = voice_config("https://api.twilio.com".into());
        config.script_url = None;
        let ch = VoiceChannel::new(config);
        assert!(matches!(
            ch.validate(),
            Err(ChannelError::ConfigurationMissing {
                field: "script_url"
            })
        ));
    }

    #[tokio::test]
    async fn call_initiation_returns_provider_sid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
            .and(body_string_contains("From=%2B15550100"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"sid": "CA99", "status": "queued"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ch = VoiceChannel::new(voice_config(server.uri()));
        let sid = ch.send().await.expect("call should be initiated");
        assert_eq!(sid.as_deref(), Some("CA99"));
    }

    #[tokio::test]
    async fn incomplete_config_sends_no_requests() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = voice_config(server.uri());
        config.auth_token = Some(String::new());
        let ch = VoiceChannel::new(config);
        assert!(matches!(
            ch.send().await.unwrap_err(),
            ChannelError::ConfigurationMissing { .. }
        ));
    }
}

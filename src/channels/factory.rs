use crate::channels::{Channel, MailChannel, SmsChannel, VoiceChannel};
use crate::config::ChannelsConfig;
use std::sync::Arc;

/// Assemble the registered channel set from config. A channel is registered
/// whenever its table exists; credential completeness is checked per dispatch
/// via `Channel::validate`, so an incomplete channel still shows up here and
/// reports its own failure instead of silently vanishing.
pub fn build_channels(channels_config: &ChannelsConfig) -> Vec<Arc<dyn Channel>> {
    let mut channels: Vec<Arc<dyn Channel>> = Vec::with_capacity(3);

    if let Some(ref mail) = channels_config.mail {
        channels.push(Arc::new(MailChannel::new(mail.clone())));
    }

    if let Some(ref sms) = channels_config.sms {
        channels.push(Arc::new(SmsChannel::new(sms.clone())));
    }

    if let Some(ref voice) = channels_config.voice {
        channels.push(Arc::new(VoiceChannel::new(voice.clone())));
    }

    channels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SmsConfig;

    #[test]
    fn empty_config_builds_no_channels() {
        let channels = build_channels(&ChannelsConfig::default());
        assert!(channels.is_empty());
    }

    #[test]
    fn present_but_incomplete_channel_is_still_registered() {
        let config = ChannelsConfig {
            sms: Some(SmsConfig {
                account_sid: None,
                auth_token: None,
                from_number: "+15550100".into(),
                to_number: "+15550101".into(),
                api_base: "https://api.twilio.com".into(),
            }),
            ..ChannelsConfig::default()
        };
        let channels = build_channels(&config);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name(), "sms");
        assert!(channels[0].validate().is_err());
    }
}

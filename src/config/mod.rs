pub mod schema;

pub use schema::{
    ChannelsConfig, Config, DetectorConfig, GatewayConfig, MailConfig, SmsConfig, VoiceConfig,
};

pub mod factory;
pub mod mail;
pub mod payload;
pub mod sms;
pub mod traits;
pub mod voice;

pub use mail::MailChannel;
pub use sms::SmsChannel;
pub use traits::Channel;
pub use voice::VoiceChannel;

use crate::config::ChannelsConfig;

/// Validate every registered channel's configuration without sending
/// anything. Surfaces at process start what would otherwise only show up as
/// a failed channel during a real emergency.
pub fn doctor_channels(config: &ChannelsConfig) {
    let channels = factory::build_channels(config);

    if channels.is_empty() {
        println!("No notification channels configured.");
        println!("Add [channels.mail], [channels.sms] or [channels.voice] to config.toml.");
        return;
    }

    println!("◆ Channel configuration check");
    println!();
    for channel in &channels {
        match channel.validate() {
            Ok(()) => println!("  ✓ {:<6} configured", channel.name()),
            Err(e) => println!("  ✗ {:<6} {e}", channel.name()),
        }
    }
}

//! The fixed emergency payload. Deliberately carries no detection detail:
//! the dispatcher's job is uniform notification, not diagnostics.

pub const ALERT_SUBJECT: &str = "!!! FIRE ALERT DETECTED !!!";

pub const ALERT_MAIL_BODY: &str = "A fire or smoke event has been confirmed by the AI detection system.\n\
Please check the cameras immediately.";

pub const ALERT_SMS_BODY: &str = "!!! FIRE ALERT DETECTED !!! Check cameras immediately.";

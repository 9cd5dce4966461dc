//! Payment text detection for inbound SMS and posted notifications.
//!
//! Both listeners funnel through the same classifier (`is_payment_like`) so a
//! keyword change applies to every source at once. Qualifying texts are pushed
//! into a [`BridgeSink`](paybridge_events::BridgeSink); everything else is
//! dropped without any observable effect.

mod classifier;
mod error;
mod gsm7;
mod notification;
mod pdu;
mod sms;

pub use classifier::{is_payment_like, payment_text, PAYMENT_KEYWORDS};
pub use error::PduError;
pub use notification::{notification_text, NotificationListener, PostedNotification};
pub use pdu::{GsmPduDecoder, PduDecoder, SmsFormat};
pub use sms::{decode_hex, reassemble, SmsBroadcast, SmsReceiver, SMS_RECEIVED_ACTION};

//! SMS-received broadcast handling.

use std::sync::Arc;

use paybridge_events::{BridgeSinkRef, MessageSource, PaymentMessageEvent};
use serde::{Deserialize, Deserializer};

use crate::classifier::payment_text;
use crate::pdu::{GsmPduDecoder, PduDecoder, SmsFormat};

/// Intent action of an inbound SMS broadcast.
pub const SMS_RECEIVED_ACTION: &str = "android.provider.Telephony.SMS_RECEIVED";

/// Contents of an SMS broadcast as delivered by the OS.
///
/// Every field may be missing. On the wire, fragments are hex strings; a
/// fragment that is null or not valid hex is kept as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsBroadcast {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "hex_fragments")]
    pub pdus: Option<Vec<Option<Vec<u8>>>>,
    #[serde(default)]
    pub format: Option<String>,
}

impl SmsBroadcast {
    /// A well-formed SMS-received broadcast.
    pub fn received(pdus: Vec<Vec<u8>>, format: impl Into<String>) -> Self {
        Self {
            action: Some(SMS_RECEIVED_ACTION.to_string()),
            pdus: Some(pdus.into_iter().map(Some).collect()),
            format: Some(format.into()),
        }
    }
}

fn hex_fragments<'de, D>(deserializer: D) -> Result<Option<Vec<Option<Vec<u8>>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|fragments| {
        fragments
            .into_iter()
            .map(|fragment| fragment.as_deref().and_then(decode_hex))
            .collect()
    }))
}

/// Decode a hex string (either case). Returns `None` on odd length or bad digits.
pub fn decode_hex(input: &str) -> Option<Vec<u8>> {
    hex::decode(input.trim()).ok()
}

/// Concatenate the decoded body of every fragment in delivery order.
///
/// Missing fragments, undecodable fragments and binary fragments contribute
/// nothing. Fragments are not reordered by their concatenation headers.
pub fn reassemble(
    pdus: &[Option<Vec<u8>>],
    format: Option<&str>,
    decoder: &dyn PduDecoder,
) -> String {
    let format = match SmsFormat::parse(format) {
        Ok(format) => format,
        Err(e) => {
            tracing::debug!(error = %e, "sms_format_unsupported");
            return String::new();
        }
    };

    let mut message = String::new();
    for (index, pdu) in pdus.iter().enumerate() {
        let Some(pdu) = pdu else {
            continue;
        };
        match decoder.decode_body(pdu, format) {
            Ok(Some(body)) => message.push_str(&body),
            Ok(None) => {}
            Err(e) => tracing::debug!(index, error = %e, "sms_fragment_undecodable"),
        }
    }
    message
}

/// Event source for inbound SMS.
pub struct SmsReceiver {
    sink: BridgeSinkRef,
    decoder: Arc<dyn PduDecoder>,
}

impl SmsReceiver {
    pub fn new(sink: BridgeSinkRef) -> Self {
        Self::with_decoder(sink, Arc::new(GsmPduDecoder))
    }

    /// Use a different fragment decoder, e.g. one backed by the OS.
    pub fn with_decoder(sink: BridgeSinkRef, decoder: Arc<dyn PduDecoder>) -> Self {
        Self { sink, decoder }
    }

    /// Handle one broadcast. Non-SMS broadcasts and non-payment texts are dropped.
    pub fn on_receive(&self, broadcast: &SmsBroadcast) {
        if broadcast.action.as_deref() != Some(SMS_RECEIVED_ACTION) {
            tracing::debug!(action = ?broadcast.action, "skip_broadcast");
            return;
        }

        let pdus = match broadcast.pdus.as_deref() {
            Some(pdus) if !pdus.is_empty() => pdus,
            _ => {
                tracing::debug!(reason = "no_fragments", "skip_sms");
                return;
            }
        };

        let message = reassemble(pdus, broadcast.format.as_deref(), self.decoder.as_ref());
        let Some(text) = payment_text(&message) else {
            tracing::debug!(fragments = pdus.len(), reason = "not_payment_like", "skip_sms");
            return;
        };

        let event = PaymentMessageEvent::new(text, MessageSource::SmsInbox);
        tracing::info!(
            id = %event.id,
            fragments = pdus.len(),
            len = text.len(),
            "payment_sms_detected"
        );
        self.sink.emit_payment_message(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paybridge_events::InMemorySink;

    // "Your card was " and "paid EGP 150", GSM 7-bit, no SMSC.
    const PART_ONE: &str = "00040A8110325476980000622071415000000ED9775D0E1A87E564D03D3C0701";
    const PART_TWO: &str = "00040A8110325476980000622071415000000CF0709A0C2A1EA1A0580D06";

    fn receiver() -> (Arc<InMemorySink>, SmsReceiver) {
        let sink = Arc::new(InMemorySink::new());
        let receiver = SmsReceiver::new(sink.clone());
        (sink, receiver)
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("00ff1A"), Some(vec![0x00, 0xFF, 0x1A]));
        assert_eq!(decode_hex(""), Some(vec![]));
        assert_eq!(decode_hex("abc"), None);
        assert_eq!(decode_hex("zz"), None);
        assert_eq!(decode_hex(" 0A0b\n"), Some(vec![0x0A, 0x0B]));
    }

    #[test]
    fn test_multipart_sms_is_concatenated() {
        let (sink, receiver) = receiver();
        let broadcast = SmsBroadcast::received(
            vec![decode_hex(PART_ONE).unwrap(), decode_hex(PART_TWO).unwrap()],
            "3gpp",
        );

        receiver.on_receive(&broadcast);

        let messages = sink.payment_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].raw_message, "Your card was paid EGP 150");
        assert_eq!(messages[0].source, MessageSource::SmsInbox);
    }

    #[test]
    fn test_fragments_keep_delivery_order() {
        let (sink, receiver) = receiver();
        let broadcast = SmsBroadcast::received(
            vec![decode_hex(PART_TWO).unwrap(), decode_hex(PART_ONE).unwrap()],
            "3gpp",
        );

        receiver.on_receive(&broadcast);

        assert_eq!(
            sink.payment_messages()[0].raw_message,
            "paid EGP 150Your card was"
        );
    }

    #[test]
    fn test_null_and_garbage_fragments_are_empty() {
        let (sink, receiver) = receiver();
        let broadcast = SmsBroadcast {
            action: Some(SMS_RECEIVED_ACTION.to_string()),
            pdus: Some(vec![None, Some(vec![0x00]), decode_hex(PART_TWO)]),
            format: None,
        };

        receiver.on_receive(&broadcast);

        assert_eq!(sink.payment_messages()[0].raw_message, "paid EGP 150");
    }

    #[test]
    fn test_non_payment_sms_is_dropped() {
        let (sink, receiver) = receiver();
        // "hellohello"
        let pdu = decode_hex(
            "07917283010010F5040BC87238880900F10000993092516195800AE8329BFD4697D9EC37",
        )
        .unwrap();

        receiver.on_receive(&SmsBroadcast::received(vec![pdu], "3gpp"));

        assert!(sink.is_empty());
    }

    #[test]
    fn test_other_actions_are_ignored() {
        let (sink, receiver) = receiver();
        let mut broadcast = SmsBroadcast::received(vec![decode_hex(PART_TWO).unwrap()], "3gpp");
        broadcast.action = Some("android.intent.action.BOOT_COMPLETED".to_string());

        receiver.on_receive(&broadcast);

        assert!(sink.is_empty());
    }

    #[test]
    fn test_missing_fields_are_ignored() {
        let (sink, receiver) = receiver();

        receiver.on_receive(&SmsBroadcast::default());
        receiver.on_receive(&SmsBroadcast {
            action: Some(SMS_RECEIVED_ACTION.to_string()),
            pdus: Some(vec![]),
            format: Some("3gpp".to_string()),
        });

        assert!(sink.is_empty());
    }

    #[test]
    fn test_unsupported_format_yields_nothing() {
        let (sink, receiver) = receiver();

        receiver.on_receive(&SmsBroadcast::received(
            vec![decode_hex(PART_TWO).unwrap()],
            "3gpp2",
        ));

        assert!(sink.is_empty());
    }

    #[test]
    fn test_deserialize_hex_payload() {
        let json = format!(
            r#"{{"action":"{SMS_RECEIVED_ACTION}","pdus":["{PART_TWO}",null,"xyz"],"format":"3gpp"}}"#
        );
        let broadcast: SmsBroadcast = serde_json::from_str(&json).unwrap();

        let pdus = broadcast.pdus.unwrap();
        assert_eq!(pdus.len(), 3);
        assert!(pdus[0].is_some());
        assert!(pdus[1].is_none());
        assert!(pdus[2].is_none());
    }

    #[test]
    fn test_deserialize_empty_payload() {
        let broadcast: SmsBroadcast = serde_json::from_str("{}").unwrap();
        assert!(broadcast.action.is_none());
        assert!(broadcast.pdus.is_none());
    }
}

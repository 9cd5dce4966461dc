//! SMS-DELIVER PDU decoding (3GPP TS 23.040).
//!
//! Android hands the SMS receiver raw PDU fragments, each prefixed with the
//! SMSC address block, together with a format tag. Only the message body is
//! extracted here; addresses and timestamps are skipped.

use crate::error::PduError;
use crate::gsm7;

const MTI_MASK: u8 = 0x03;
const MTI_DELIVER: u8 = 0x00;
const UDHI_FLAG: u8 = 0x40;
const SCTS_LEN: usize = 7;

/// Encoding family announced by the SMS broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsFormat {
    /// GSM/UMTS/LTE, tag `"3gpp"`.
    Gsm3gpp,
    /// CDMA, tag `"3gpp2"`.
    Cdma3gpp2,
}

impl SmsFormat {
    /// Parse the broadcast's format tag. A missing tag means `3gpp`.
    pub fn parse(tag: Option<&str>) -> Result<Self, PduError> {
        match tag {
            None | Some("3gpp") => Ok(Self::Gsm3gpp),
            Some("3gpp2") => Ok(Self::Cdma3gpp2),
            Some(other) => Err(PduError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Decodes the text body of one PDU fragment.
///
/// `Ok(None)` means the fragment is valid but carries no text (binary data).
pub trait PduDecoder: Send + Sync {
    fn decode_body(&self, pdu: &[u8], format: SmsFormat) -> Result<Option<String>, PduError>;
}

/// Built-in decoder for 3GPP SMS-DELIVER PDUs.
#[derive(Debug, Default, Clone, Copy)]
pub struct GsmPduDecoder;

impl PduDecoder for GsmPduDecoder {
    fn decode_body(&self, pdu: &[u8], format: SmsFormat) -> Result<Option<String>, PduError> {
        match format {
            SmsFormat::Gsm3gpp => decode_deliver(pdu),
            SmsFormat::Cdma3gpp2 => Err(PduError::UnsupportedFormat("3gpp2".to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alphabet {
    Gsm7,
    EightBit,
    Ucs2,
}

fn alphabet(dcs: u8) -> Result<Alphabet, PduError> {
    let alphabet = match dcs >> 4 {
        // General data coding, including the automatic-deletion group.
        0x0..=0x7 => {
            if dcs & 0x20 != 0 {
                return Err(PduError::Compressed);
            }
            match (dcs >> 2) & 0x03 {
                0x01 => Alphabet::EightBit,
                0x02 => Alphabet::Ucs2,
                _ => Alphabet::Gsm7,
            }
        }
        0xC | 0xD => Alphabet::Gsm7,
        0xE => Alphabet::Ucs2,
        0xF if dcs & 0x04 != 0 => Alphabet::EightBit,
        _ => Alphabet::Gsm7,
    };
    Ok(alphabet)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn byte(&mut self) -> Result<u8, PduError> {
        let value = *self.bytes.get(self.pos).ok_or(PduError::Truncated(self.pos))?;
        self.pos += 1;
        Ok(value)
    }

    fn skip(&mut self, len: usize) -> Result<(), PduError> {
        if self.pos + len > self.bytes.len() {
            return Err(PduError::Truncated(self.bytes.len()));
        }
        self.pos += len;
        Ok(())
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

fn decode_deliver(pdu: &[u8]) -> Result<Option<String>, PduError> {
    let mut reader = Reader::new(pdu);

    let smsc_len = reader.byte()? as usize;
    reader.skip(smsc_len)?;

    let first_octet = reader.byte()?;
    if first_octet & MTI_MASK != MTI_DELIVER {
        return Err(PduError::NotDeliver(first_octet & MTI_MASK));
    }
    let has_header = first_octet & UDHI_FLAG != 0;

    // Originating address: length counts semi-octets for numeric and
    // alphanumeric addresses alike.
    let address_len = reader.byte()? as usize;
    let _type_of_address = reader.byte()?;
    reader.skip(address_len.div_ceil(2))?;

    let _protocol_id = reader.byte()?;
    let dcs = reader.byte()?;
    reader.skip(SCTS_LEN)?;

    let user_data_len = reader.byte()? as usize;
    let offset = reader.pos;
    let user_data = reader.rest();

    match alphabet(dcs)? {
        Alphabet::Gsm7 => decode_gsm7(user_data, user_data_len, has_header, offset).map(Some),
        Alphabet::Ucs2 => decode_ucs2(user_data, user_data_len, has_header, offset).map(Some),
        Alphabet::EightBit => Ok(None),
    }
}

/// `user_data_len` counts septets, header included.
fn decode_gsm7(
    data: &[u8],
    user_data_len: usize,
    has_header: bool,
    offset: usize,
) -> Result<String, PduError> {
    let header_septets = if has_header {
        let header_len = *data.first().ok_or(PduError::Truncated(offset))? as usize;
        ((header_len + 1) * 8).div_ceil(7)
    } else {
        0
    };

    let text_septets = user_data_len
        .checked_sub(header_septets)
        .ok_or(PduError::Truncated(offset))?;

    let skip_bits = header_septets * 7;
    if data.len() < gsm7::packed_len(skip_bits, text_septets) {
        return Err(PduError::Truncated(offset + data.len()));
    }

    let septets = gsm7::unpack_septets(data, skip_bits, text_septets);
    Ok(gsm7::decode(&septets))
}

/// `user_data_len` counts octets, header included.
fn decode_ucs2(
    data: &[u8],
    user_data_len: usize,
    has_header: bool,
    offset: usize,
) -> Result<String, PduError> {
    let data = data
        .get(..user_data_len)
        .ok_or(PduError::Truncated(offset + data.len()))?;

    let body = if has_header {
        let header_len = *data.first().ok_or(PduError::Truncated(offset))? as usize;
        data.get(header_len + 1..)
            .ok_or(PduError::Truncated(offset + data.len()))?
    } else {
        data
    };

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16_lossy(&units))
}

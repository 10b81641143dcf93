//! Inventory frame builder and reply classifier.
//!
//! Wire format:
//! ```text
//! ┌──────────────────────────┬───────────┬───────────┐
//! │ command bytes (N B)      │ CRC low   │ CRC high  │
//! └──────────────────────────┴───────────┴───────────┘
//! ```
//!
//! Replies come back as raw bytes. Three shapes matter to the scan
//! loop: the reader's fixed "no tag in field" sentinel, anything too
//! short to carry a tag id, and a full inventory reply whose bytes 6
//! and 7 hold the tag id.

use crate::error::ProtocolError;
use crate::protocol::crc;

/// The reader's fixed reply when no tag is in the field.
pub const EMPTY_FIELD_REPLY: [u8; 6] = [0x05, 0x00, 0x0F, 0xFB, 0xE2, 0xA7];

/// Byte positions of the tag id within an inventory reply.
const TAG_ID_HI: usize = 6;
const TAG_ID_LO: usize = 7;

/// Minimum reply length that carries a tag id.
const MIN_TAG_REPLY: usize = 8;

/// What one reader exchange amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The field is empty; keep polling.
    NoTag,
    /// The exchange failed or the reply was malformed; keep polling.
    Fault,
    /// A tag answered with this id.
    Tag(u16),
}

/// Append the CRC-16 to a command, producing the bytes to put on the
/// wire.
pub fn frame(command: &[u8]) -> Vec<u8> {
    crc::append(command)
}

/// Classify a reply (or a failed exchange) for the scan loop.
///
/// Short replies where the id positions do not exist classify as
/// [`Classification::Fault`] — never an index panic.
pub fn classify(exchange: &Result<Vec<u8>, ProtocolError>) -> Classification {
    let reply = match exchange {
        Ok(bytes) => bytes,
        Err(_) => return Classification::Fault,
    };

    if reply.as_slice() == EMPTY_FIELD_REPLY {
        return Classification::NoTag;
    }
    if reply.len() < MIN_TAG_REPLY {
        return Classification::Fault;
    }

    // Hex-concatenation semantics: byte 6 is the high half, byte 7 the
    // low half of the 16-bit id.
    let id = (u16::from(reply[TAG_ID_HI]) << 8) | u16::from(reply[TAG_ID_LO]);
    Classification::Tag(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_appends_two_crc_bytes() {
        let framed = frame(&[0x04, 0xFF, 0x0F]);
        assert_eq!(framed.len(), 5);
        assert_eq!(crc::checksum(&framed[..3]), {
            u16::from(framed[4]) << 8 | u16::from(framed[3])
        });
    }

    #[test]
    fn empty_field_reply_is_no_tag() {
        let exchange = Ok(EMPTY_FIELD_REPLY.to_vec());
        assert_eq!(classify(&exchange), Classification::NoTag);
    }

    #[test]
    fn failed_exchange_is_fault() {
        let exchange = Err(ProtocolError::ShortReply { len: 0 });
        assert_eq!(classify(&exchange), Classification::Fault);
    }

    #[test]
    fn short_reply_is_fault_not_panic() {
        for len in 0..8 {
            let reply = vec![0xAAu8; len];
            if reply.as_slice() == EMPTY_FIELD_REPLY {
                continue;
            }
            assert_eq!(
                classify(&Ok(reply)),
                Classification::Fault,
                "len {len}"
            );
        }
    }

    #[test]
    fn tag_id_reads_positions_six_and_seven() {
        let reply = vec![0x05, 0x00, 0x0F, 0x01, 0x02, 0x03, 0x2A, 0x1F];
        assert_eq!(classify(&Ok(reply)), Classification::Tag(0x2A1F));
        assert_eq!(0x2A1F, 10783);
    }

    #[test]
    fn longer_replies_still_classify() {
        let reply = vec![0x05, 0x00, 0x0F, 0x01, 0x02, 0x03, 0x00, 0x11, 0x99, 0x99];
        assert_eq!(classify(&Ok(reply)), Classification::Tag(0x0011));
    }
}

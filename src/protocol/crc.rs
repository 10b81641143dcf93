//! CRC-16 checksum for tag reader frames.
//!
//! Reflected CRC-16 with polynomial 0x8408 and initial register
//! 0xFFFF, processed bit-serially LSB first — the variant the reader
//! module verifies on every inventory command.

const POLY: u16 = 0x8408;
const INIT: u16 = 0xFFFF;

/// Compute the checksum over `data`.
pub fn checksum(data: &[u8]) -> u16 {
    let mut value = INIT;
    for &byte in data {
        value ^= u16::from(byte);
        for _ in 0..8 {
            if value & 0x0001 != 0 {
                value = (value >> 1) ^ POLY;
            } else {
                value >>= 1;
            }
        }
    }
    value
}

/// Append the checksum to `payload`, low byte first.
pub fn append(payload: &[u8]) -> Vec<u8> {
    let crc = checksum(payload);
    let mut frame = Vec::with_capacity(payload.len() + 2);
    frame.extend_from_slice(payload);
    frame.push((crc & 0x00FF) as u8);
    frame.push((crc >> 8) as u8);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_yields_init() {
        assert_eq!(checksum(&[]), INIT);
    }

    #[test]
    fn append_is_low_byte_first() {
        let payload = [0x04, 0xFF, 0x0F];
        let crc = checksum(&payload);
        let framed = append(&payload);
        assert_eq!(framed.len(), 5);
        assert_eq!(&framed[..3], &payload);
        assert_eq!(framed[3], (crc & 0xFF) as u8);
        assert_eq!(framed[4], (crc >> 8) as u8);
    }

    #[test]
    fn recompute_matches_appended_bytes() {
        let framed = append(&[0x04, 0xFF, 0x0F]);
        let (payload, tail) = framed.split_at(framed.len() - 2);
        let crc = checksum(payload);
        assert_eq!(tail, [(crc & 0xFF) as u8, (crc >> 8) as u8]);
    }

    #[test]
    fn single_bit_flip_changes_checksum() {
        let payload = [0x04, 0xFF, 0x0F];
        let reference = checksum(&payload);
        for byte in 0..payload.len() {
            for bit in 0..8 {
                let mut corrupted = payload;
                corrupted[byte] ^= 1 << bit;
                assert_ne!(
                    checksum(&corrupted),
                    reference,
                    "flip of byte {byte} bit {bit} went undetected"
                );
            }
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bit_flips_never_collide(
            payload in proptest::collection::vec(any::<u8>(), 1..32),
            byte_idx in 0usize..32,
            bit in 0u8..8,
        ) {
            prop_assume!(byte_idx < payload.len());
            let reference = checksum(&payload);
            let mut corrupted = payload.clone();
            corrupted[byte_idx] ^= 1 << bit;
            prop_assert_ne!(checksum(&corrupted), reference);
        }

        #[test]
        fn framed_tail_always_verifies(
            payload in proptest::collection::vec(any::<u8>(), 0..32),
        ) {
            let framed = append(&payload);
            let crc = checksum(&framed[..payload.len()]);
            prop_assert_eq!(framed[payload.len()], (crc & 0xFF) as u8);
            prop_assert_eq!(framed[payload.len() + 1], (crc >> 8) as u8);
        }
    }
}

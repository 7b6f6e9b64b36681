use std::convert::TryInto;

/// Little-endian integer encoding, zero-padded/truncated to `length` bytes.
pub fn int_to_bytes(int: u64, length: usize) -> Vec<u8> {
    let mut vec = int.to_le_bytes().to_vec();
    vec.resize(length, 0);
    vec
}

/// Big-endian 64-bit integer decoding, used to extract a deposit's value field from the first
/// 8 bytes of `deposit_data`.
pub fn bytes_to_u64_be(bytes: &[u8]) -> Option<u64> {
    let array: [u8; 8] = bytes.try_into().ok()?;
    Some(u64::from_be_bytes(array))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_to_bytes_value_0_length_8() {
        assert_eq!(int_to_bytes(0, 8), vec![0x00; 8]);
    }

    #[test]
    fn int_to_bytes_value_2521273052_length_8() {
        assert_eq!(
            int_to_bytes(2_521_273_052, 8),
            vec![0xdc, 0x92, 0x47, 0x96, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn bytes_to_u64_be_round_trips_a_big_endian_value() {
        let bytes = 42_424_242_u64.to_be_bytes();
        assert_eq!(bytes_to_u64_be(&bytes), Some(42_424_242));
    }

    #[test]
    fn bytes_to_u64_be_rejects_wrong_length() {
        assert_eq!(bytes_to_u64_be(&[0u8; 4]), None);
    }
}

//! Generated text identifiers for records.
//!
//! Randomness and the clock are inputs, so the generators are deterministic
//! when given a seeded RNG and a fixed timestamp.

use rand::Rng;
use uuid::{NoContext, Timestamp, Uuid};

use crate::limits::{RANDOM_ID_LEN, ULID_LEN};

/// Lowercase Crockford base-32 alphabet.
const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

const ULID_TIME_BITS: u32 = 48;
const ULID_RANDOM_BITS: u32 = 80;

/// Generates a random id of [`RANDOM_ID_LEN`] lowercase base-32 characters.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..RANDOM_ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generates a lowercase ULID.
///
/// ```text
/// ulid = base32(unix_millis[48 bits] || random[80 bits])
/// ```
///
/// ULIDs from different milliseconds sort by time as plain strings.
pub fn ulid<R: Rng + ?Sized>(unix_millis: u64, rng: &mut R) -> String {
    let time = u128::from(unix_millis) & ((1u128 << ULID_TIME_BITS) - 1);
    let random = rng.r#gen::<u128>() & ((1u128 << ULID_RANDOM_BITS) - 1);
    encode_base32((time << ULID_RANDOM_BITS) | random)
}

/// Encodes 128 bits as 26 base-32 characters, most significant first.
fn encode_base32(value: u128) -> String {
    (0..ULID_LEN)
        .map(|i| {
            let shift = 5 * (ULID_LEN - 1 - i);
            ALPHABET[((value >> shift) & 0x1F) as usize] as char
        })
        .collect()
}

/// Generates a UUIDv7, embedding `unix_nanos` if given or the current time otherwise.
pub fn uuid_v7(unix_nanos: Option<u128>) -> Uuid {
    match unix_nanos {
        Some(nanos) => {
            let seconds = (nanos / 1_000_000_000) as u64;
            let subsec_nanos = (nanos % 1_000_000_000) as u32;
            Uuid::new_v7(Timestamp::from_unix(NoContext, seconds, subsec_nanos))
        }
        None => Uuid::now_v7(),
    }
}

/// Generates a random UUIDv4.
pub fn uuid_v4() -> Uuid {
    Uuid::new_v4()
}

/// Current time in milliseconds since the Unix epoch, clamped at zero.
pub fn unix_millis_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_random_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = random_id(&mut rng);
        assert_eq!(id.len(), RANDOM_ID_LEN);
        assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_random_id_deterministic_with_seed() {
        let a = random_id(&mut StdRng::seed_from_u64(42));
        let b = random_id(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_ulid_shape() {
        let id = ulid(1_700_000_000_000, &mut StdRng::seed_from_u64(1));
        assert_eq!(id.len(), ULID_LEN);
        // 128 bits in 130: the first character carries only 3 bits.
        assert!(id.as_bytes()[0] <= b'7');
        assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_ulid_sorts_by_time() {
        let mut rng = StdRng::seed_from_u64(3);
        let earlier = ulid(1_700_000_000_000, &mut rng);
        let later = ulid(1_700_000_000_001, &mut rng);
        assert!(earlier < later);
        assert_eq!(earlier[..10], ulid(1_700_000_000_000, &mut rng)[..10]);
    }

    #[test]
    fn test_encode_base32() {
        assert_eq!(encode_base32(0), "0".repeat(ULID_LEN));
        assert_eq!(encode_base32(u128::MAX), format!("7{}", "z".repeat(ULID_LEN - 1)));
    }

    #[test]
    fn test_uuid_v7_timestamp() {
        let uuid = uuid_v7(Some(1_700_000_000_123_000_000));
        assert_eq!(uuid.get_version_num(), 7);
        let (seconds, _) = uuid.get_timestamp().unwrap().to_unix();
        assert_eq!(seconds, 1_700_000_000);
    }

    #[test]
    fn test_uuid_versions() {
        assert_eq!(uuid_v7(None).get_version_num(), 7);
        assert_eq!(uuid_v4().get_version_num(), 4);
    }
}

//! Limits applied while decoding untrusted payloads and rendering literals.

/// Maximum extension payload size accepted by the decoder (16 MiB).
pub const MAX_PAYLOAD_LEN: usize = 16 * 1024 * 1024;

/// Maximum nesting of arrays and objects inside a literal.
pub const MAX_LITERAL_DEPTH: usize = 128;

/// Length of ids produced by `RecordId::random`.
pub const RANDOM_ID_LEN: usize = 20;

/// Length of a ULID in its base-32 text form.
pub const ULID_LEN: usize = 26;

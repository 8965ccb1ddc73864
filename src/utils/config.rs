//! Application configuration constants.
//! Pipeline shape and digest tuning in one place.

// ---- Pipeline ----

/// Fixed shape of the standard pipeline: sequence numbering, batch fan-out, output join.
pub struct PipelineConsts;

impl PipelineConsts {
    /// First sequence number handed to a stage's first input item. The turnstile
    /// counter starts here too, so the first unit may write immediately.
    pub const FIRST_SEQ: u64 = 1;
    /// Sub-checksums computed per item in the batch digest stage (indices 0..BATCH_WIDTH).
    pub const BATCH_WIDTH: usize = 6;
    /// Separator between sorted batch digests in the combined output.
    pub const JOIN_SEPARATOR: &'static str = "_";
}

// ---- Digest primitives ----

/// Keying and output shape of the reference digest suite.
pub struct DigestConsts;

impl DigestConsts {
    /// Domain-separation key for the keyed blake3 fast checksum (32 bytes).
    /// Changing this changes every pipeline output.
    pub const CHECKSUM_KEY: [u8; 32] = *b"hashmill.fast.checksum.key.v1\0\0\0";
    /// Hex length of one fast checksum (blake3, 32-byte digest).
    pub const FAST_HEX_LEN: usize = 64;
    /// Hex length of one slow digest (MD5, 16-byte digest).
    pub const SLOW_HEX_LEN: usize = 32;
}

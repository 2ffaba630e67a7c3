//! Deterministic mapping from external FAQ ids to numeric Qdrant point ids.

/// Maps an external identifier to a Qdrant point id.
///
/// Identifiers that already are unsigned integers are used as-is; any other
/// string maps to the first 8 bytes of its BLAKE3 digest (little-endian).
pub fn point_id_for(id: &str) -> u64 {
    if let Ok(n) = id.parse::<u64>() {
        return n;
    }
    let digest = blake3::hash(id.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

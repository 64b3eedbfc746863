use sha2::{Digest, Sha256};

/// Content digest of one watched source, compared between reload ticks to
/// detect byte-level change.
pub type Fingerprint = [u8; 32];

pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Short hex form for log lines.
pub fn fingerprint_hex(fp: &Fingerprint) -> String {
    fp.iter().take(8).map(|b| format!("{b:02x}")).collect()
}

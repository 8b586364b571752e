use sha2::{Digest, Sha256};

/// Deterministic one-way pseudonymization of a raw identifier.
/// SHA-256 over salt ‖ value, hex-encoded (64 chars). Absent identifiers map
/// to `None` — a placeholder must never be hashed.
pub fn hash_id(raw: Option<&str>, salt: &str) -> Option<String> {
    let raw = raw?;
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(raw.as_bytes());
    Some(hex::encode(hasher.finalize()))
}

/// Masked, non-identifiable rendering of an email for display surfaces.
/// "test.email@example.com" -> "t***l@e***e.com"
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return String::new();
    };
    if local.is_empty() || domain.is_empty() {
        return String::new();
    }

    let masked_local = mask_part(local);

    let masked_domain = match domain.split_once('.') {
        Some((main, tld)) if !main.is_empty() => format!("{}.{}", mask_part(main), tld),
        _ => mask_part(domain),
    };

    format!("{masked_local}@{masked_domain}")
}

fn mask_part(part: &str) -> String {
    let chars: Vec<char> = part.chars().collect();
    match chars.as_slice() {
        [] => String::new(),
        [only] => format!("{only}***"),
        [first, .., last] if chars.len() > 2 => format!("{first}***{last}"),
        [first, ..] => format!("{first}***"),
    }
}

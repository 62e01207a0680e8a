//! Time and ID helpers

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an order ID: `ORD-<millis>-<random suffix>`.
///
/// The timestamp keeps IDs roughly sortable by creation time; the
/// 6-char alphanumeric suffix avoids collisions when two orders land
/// in the same millisecond.
pub fn order_id() -> String {
    use rand::Rng;
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("ORD-{}-{}", now_millis(), suffix)
}

/// Generate a user ID
pub fn user_id() -> String {
    format!("user-{}", uuid::Uuid::new_v4())
}

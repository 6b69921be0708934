/// Marker printed in place of a sensitive value.
pub const REDACTED: &str = "<redacted>";

/// Keys containing "password" in any casing are never printed with their value.
pub fn is_sensitive(key: &str) -> bool {
    key.to_lowercase().contains("password")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sensitive() {
        assert!(is_sensitive("MY_SOME_PASSWORD"));
        assert!(is_sensitive("my_password_file"));
        assert!(is_sensitive("APP_DbPassWord"));
        assert!(!is_sensitive("MY_PASS"));
        assert!(!is_sensitive("MY_TOKEN"));
    }
}

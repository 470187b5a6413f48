use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use roll_core::enums::UserRole;

    use super::parse_enum;

    #[test]
    fn parses_role_case_insensitively() {
        let role: UserRole = parse_enum("Lecturer", "role").expect("role should parse");
        assert_eq!(role, UserRole::Lecturer);
    }

    #[test]
    fn errors_on_invalid_role() {
        let err = parse_enum::<UserRole>("admin", "role").expect_err("should fail");
        assert!(err.to_string().contains("invalid role 'admin'"));
    }
}

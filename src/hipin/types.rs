use serde::{Deserialize, Serialize};

/// Account state returned by the profile endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "isCheckIn", default)]
    pub is_checked_in: bool,
}

/// Envelope the API wraps payloads in. A 2xx response without `data` means
/// the service did not recognize the token.
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub data: Option<AccountInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_wire_shape() {
        let raw = r#"{"data":{"id":"u-1","name":"alice","isCheckIn":true}}"#;
        let profile: ProfileResponse = serde_json::from_str(raw).unwrap();
        let account = profile.data.unwrap();
        assert_eq!(account.id, "u-1");
        assert_eq!(account.name.as_deref(), Some("alice"));
        assert!(account.is_checked_in);
    }

    #[test]
    fn test_profile_missing_fields_default() {
        let raw = r#"{"data":{"id":"u-2"}}"#;
        let profile: ProfileResponse = serde_json::from_str(raw).unwrap();
        let account = profile.data.unwrap();
        assert!(account.name.is_none());
        assert!(!account.is_checked_in);
    }

    #[test]
    fn test_profile_without_data_is_none() {
        let profile: ProfileResponse = serde_json::from_str("{}").unwrap();
        assert!(profile.data.is_none());
    }
}

use serde::{Deserialize, Serialize};

/// A single roster entry. The wire names match the persisted blob format:
/// a JSON array of `{"firstName": ..., "lastName": ...}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

impl StudentRecord {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let record = StudentRecord::new("Ada", "Lovelace");
        assert_eq!(record.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_wire_field_names() {
        let record = StudentRecord::new("Grace", "Hopper");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"firstName":"Grace","lastName":"Hopper"}"#);

        let parsed: StudentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}

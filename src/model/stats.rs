use serde::{Deserialize, Serialize};

/// Lifetime completion statistics (stats.json)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "completed", default)]
    pub completed_count: u32,
}

impl Stats {
    /// Record one more finished task, returning the new total
    pub fn record_completion(&mut self) -> u32 {
        self.completed_count += 1;
        self.completed_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_defaults_to_zero() {
        let stats: Stats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.completed_count, 0);
    }

    #[test]
    fn pretty_document_shape() {
        let stats = Stats { completed_count: 3 };
        insta::assert_snapshot!(serde_json::to_string_pretty(&stats).unwrap(), @r#"
        {
          "completed": 3
        }
        "#);
    }
}

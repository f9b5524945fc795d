//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

use crate::view::ActiveView;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Default, Serialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// View the data was taken from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ActiveView>,

    /// Whether another page can be loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next_page: Option<bool>,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Metadata::default()
            },
        }
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    format_json_with(data, |_| {})
}

/// Format data as pretty-printed JSON, filling in extra metadata.
pub fn format_json_with<T: Serialize + ?Sized>(
    data: &T,
    fill: impl FnOnce(&mut Metadata),
) -> Result<String, serde_json::Error> {
    let mut output = JsonOutput::new(data);
    fill(&mut output.meta);
    serde_json::to_string_pretty(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::*;
    use crate::models::EmployeeDisplay;

    #[test]
    fn test_json_output_new() {
        let output = JsonOutput::new(vec!["1", "2"]);

        assert_eq!(output.data, vec!["1", "2"]);
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.timestamp.is_empty());
        assert!(output.meta.view.is_none());
    }

    #[test]
    fn test_format_json_employees() {
        let rows = vec![EmployeeDisplay::from(&ana()), EmployeeDisplay::from(&bo())];

        let result = format_json(&rows).unwrap();

        assert!(result.contains("\"data\""));
        assert!(result.contains("\"name\": \"Ana Lee\""));
        assert!(result.contains("\"timestamp\""));
        assert!(!result.contains("\"has_next_page\""));
    }

    #[test]
    fn test_format_json_with_filtered_view() {
        let rows: Vec<EmployeeDisplay> = vec![];

        let result = format_json_with(&rows, |meta| {
            meta.view = Some(ActiveView::Filtered("7".to_string()));
            meta.has_next_page = Some(false);
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["data"], serde_json::json!([]));
        assert_eq!(value["meta"]["view"]["view"], "filtered");
        assert_eq!(value["meta"]["view"]["employee_id"], "7");
        assert_eq!(value["meta"]["has_next_page"], false);
    }
}

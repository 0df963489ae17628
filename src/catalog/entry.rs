use crate::step::StepKind;
use serde::Serialize;

/// Timestamp layout of the second catalog field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One parsed catalog line: `name,timestamp,tag_1,...,tag_n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub timestamp: String,
    /// Raw step tags in flow order. Unknown tags are kept here and only
    /// dropped when the entry is turned back into a flow.
    pub tags: Vec<String>,
}

impl CatalogEntry {
    /// Parse one line. Blank lines yield `None`; empty tokens (for example a
    /// trailing comma) are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            return None;
        }
        let mut fields = line.split(',');
        let name = fields.next().unwrap_or_default().to_string();
        let timestamp = fields.next().unwrap_or_default().to_string();
        let tags = fields
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        Some(Self {
            name,
            timestamp,
            tags,
        })
    }

    pub fn encode(&self) -> String {
        let mut fields = Vec::with_capacity(self.tags.len() + 2);
        fields.push(self.name.as_str());
        fields.push(self.timestamp.as_str());
        fields.extend(self.tags.iter().map(String::as_str));
        fields.join(",")
    }

    /// Human-readable block used when browsing the catalog.
    pub fn listing(&self) -> String {
        let mut text = format!(
            "Flow Name: {}\nTimestamp: {}\nSteps:\n",
            self.name, self.timestamp
        );
        for tag in &self.tags {
            text.push_str(&format!("- {tag}\n"));
        }
        text.push('\n');
        text
    }
}

/// Name of the flow stored on `line`, without parsing the rest.
pub fn line_name(line: &str) -> &str {
    line.split(',').next().unwrap_or_default()
}

pub fn tags_for(kinds: &[StepKind]) -> Vec<String> {
    kinds.iter().map(|kind| kind.tag().to_string()).collect()
}

/// Whether `name` can be stored without breaking the line format.
pub fn is_storable_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains([',', '\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_name_timestamp_and_tags() {
        let entry = CatalogEntry::parse("Budget,2024-05-01 09:30:00,TitleStep,EndStep")
            .expect("entry");
        assert_eq!(entry.name, "Budget");
        assert_eq!(entry.timestamp, "2024-05-01 09:30:00");
        assert_eq!(entry.tags, vec!["TitleStep", "EndStep"]);
        assert_eq!(entry.encode(), "Budget,2024-05-01 09:30:00,TitleStep,EndStep");
        assert_eq!(
            entry.listing(),
            "Flow Name: Budget\nTimestamp: 2024-05-01 09:30:00\nSteps:\n- TitleStep\n- EndStep\n\n"
        );
    }

    #[test]
    fn trailing_comma_and_blank_lines_are_tolerated() {
        let entry = CatalogEntry::parse("Old,2023-01-01 00:00:00,NumberInputStep,EndStep,\r")
            .expect("entry");
        assert_eq!(entry.tags, vec!["NumberInputStep", "EndStep"]);
        assert_eq!(CatalogEntry::parse(""), None);
        assert_eq!(CatalogEntry::parse("   "), None);
    }

    #[test]
    fn names_with_separators_are_not_storable() {
        assert!(is_storable_name("Monthly report"));
        assert!(!is_storable_name("a,b"));
        assert!(!is_storable_name("  "));
        assert_eq!(line_name("A,ts,TitleStep"), "A");
    }
}

//! Flow catalog: persisted flow skeletons, one per line.
//!
//! A skeleton is a flow's name, the save time and its step tags. Field values
//! are never stored, so a loaded flow always starts from default steps.
mod entry;
mod store;

pub use entry::{is_storable_name, CatalogEntry, TIMESTAMP_FORMAT};
pub use store::{CatalogError, CatalogStore, FileCatalog};

use crate::flow::Flow;
use crate::step::{Step, StepKind};
use entry::{line_name, tags_for};

/// Result of loading a flow by name.
#[derive(Debug)]
pub struct LoadedFlow {
    pub flow: Flow,
    pub found: bool,
    /// Tags that name no known step kind, skipped during the load.
    pub unknown_tags: Vec<String>,
}

/// Append the skeleton of `flow`, stamped with the current local time.
pub fn save_flow(
    store: &mut impl CatalogStore,
    flow: &Flow,
) -> Result<CatalogEntry, CatalogError> {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    save_flow_at(store, flow, &timestamp)
}

pub fn save_flow_at(
    store: &mut impl CatalogStore,
    flow: &Flow,
    timestamp: &str,
) -> Result<CatalogEntry, CatalogError> {
    let entry = CatalogEntry {
        name: flow.name().to_string(),
        timestamp: timestamp.to_string(),
        tags: tags_for(&flow.kinds()),
    };
    store.append_line(&entry.encode())?;
    tracing::info!(flow = %entry.name, steps = entry.tags.len(), "flow saved to catalog");
    Ok(entry)
}

/// Every entry in file order. A catalog that cannot be read is reported and
/// lists as empty.
pub fn list_entries(store: &impl CatalogStore) -> Vec<CatalogEntry> {
    match store.read_lines() {
        Ok(lines) => lines
            .iter()
            .map(String::as_str)
            .filter_map(CatalogEntry::parse)
            .collect(),
        Err(err) => {
            let err = anyhow::Error::from(err);
            tracing::error!(error = %format!("{err:#}"), "catalog listing failed");
            Vec::new()
        }
    }
}

pub fn list_names(store: &impl CatalogStore) -> Vec<String> {
    list_entries(store)
        .into_iter()
        .map(|entry| entry.name)
        .collect()
}

/// Rebuild the first flow stored under `name` from default steps. Missing
/// names and unreadable catalogs produce an empty flow.
pub fn load_flow(store: &impl CatalogStore, name: &str) -> LoadedFlow {
    let mut loaded = LoadedFlow {
        flow: Flow::new(name),
        found: false,
        unknown_tags: Vec::new(),
    };
    let line = match store.find_by_name(name) {
        Ok(Some(line)) => line,
        Ok(None) => {
            tracing::debug!(flow = %name, "flow not in catalog");
            return loaded;
        }
        Err(err) => {
            let err = anyhow::Error::from(err);
            tracing::error!(flow = %name, error = %format!("{err:#}"), "catalog load failed");
            return loaded;
        }
    };
    let Some(entry) = CatalogEntry::parse(&line) else {
        return loaded;
    };
    loaded.found = true;
    for tag in entry.tags {
        match tag.parse::<StepKind>() {
            Ok(kind) => {
                if let Err(err) = loaded.flow.add_step(Step::for_kind(kind)) {
                    tracing::error!(error = %err, "step dropped while loading");
                }
            }
            Err(err) => {
                tracing::warn!(flow = %name, error = %err, "skipping unknown step tag");
                loaded.unknown_tags.push(tag);
            }
        }
    }
    loaded
}

/// Remove every line stored under `name` and return how many were removed.
/// Other lines are kept byte for byte. On failure the catalog is unchanged.
pub fn delete_flow(store: &mut impl CatalogStore, name: &str) -> Result<usize, CatalogError> {
    let lines = store.read_lines()?;
    let before = lines.len();
    let kept: Vec<String> = lines
        .into_iter()
        .filter(|line| line_name(line) != name)
        .collect();
    let removed = before - kept.len();
    if removed == 0 {
        return Ok(0);
    }
    store.replace_all(&kept)?;
    tracing::info!(flow = %name, removed, "flow deleted from catalog");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn flow_of(name: &str, kinds: &[StepKind]) -> Flow {
        let mut flow = Flow::new(name);
        for kind in kinds {
            flow.add_step(Step::for_kind(*kind)).expect("add step");
        }
        flow
    }

    #[test]
    fn save_and_load_round_trip_the_kind_sequence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut catalog = FileCatalog::new(dir.path().join("flows.csv"));
        let kinds = [
            StepKind::Title,
            StepKind::NumberInput,
            StepKind::NumberInput,
            StepKind::Calculus,
            StepKind::End,
        ];
        let mut flow = flow_of("Budget", &kinds);
        if let Step::NumberInput(number) = &mut flow.steps_mut()[1] {
            number.value = 12.5;
        }
        let entry = save_flow(&mut catalog, &flow).expect("save");
        chrono::NaiveDateTime::parse_from_str(&entry.timestamp, TIMESTAMP_FORMAT)
            .expect("timestamp layout");

        let loaded = load_flow(&catalog, "Budget");
        assert!(loaded.found);
        assert!(loaded.unknown_tags.is_empty());
        assert_eq!(loaded.flow.name(), "Budget");
        assert_eq!(loaded.flow.kinds(), kinds.to_vec());
        assert_eq!(loaded.flow, flow_of("Budget", &kinds));
    }

    #[test]
    fn saved_line_has_no_trailing_separator() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut catalog = FileCatalog::new(dir.path().join("flows.csv"));
        let flow = flow_of("Notes", &[StepKind::Text, StepKind::End]);
        save_flow_at(&mut catalog, &flow, "2024-02-03 04:05:06").expect("save");
        assert_eq!(
            fs::read_to_string(catalog.path()).expect("read"),
            "Notes,2024-02-03 04:05:06,TextStep,EndStep\n"
        );
        assert_eq!(list_names(&catalog), vec!["Notes"]);
    }

    #[test]
    fn unknown_tags_are_skipped_and_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("flows.csv");
        fs::write(&path, "Mixed,2024-01-01 00:00:00,TitleStep,ChartStep,EndStep,\n")
            .expect("seed catalog");
        let catalog = FileCatalog::new(&path);
        let loaded = load_flow(&catalog, "Mixed");
        assert_eq!(loaded.flow.kinds(), vec![StepKind::Title, StepKind::End]);
        assert_eq!(loaded.unknown_tags, vec!["ChartStep"]);
    }

    #[test]
    fn missing_name_loads_an_empty_flow() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = FileCatalog::new(dir.path().join("flows.csv"));
        let loaded = load_flow(&catalog, "Nope");
        assert!(!loaded.found);
        assert!(loaded.flow.is_empty());
    }

    #[test]
    fn delete_keeps_other_lines_byte_identical() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("flows.csv");
        let original = "A,2024-01-01 00:00:00,TitleStep\n\
                        B,2024-01-02 00:00:00,NumberInputStep,EndStep,\n\
                        A,2024-01-03 00:00:00,EndStep\n";
        fs::write(&path, original).expect("seed catalog");
        let mut catalog = FileCatalog::new(&path);

        assert_eq!(delete_flow(&mut catalog, "A").expect("delete"), 2);
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "B,2024-01-02 00:00:00,NumberInputStep,EndStep,\n"
        );
        assert_eq!(delete_flow(&mut catalog, "A").expect("delete again"), 0);
        assert_eq!(list_names(&catalog), vec!["B"]);
    }

    #[test]
    fn unreadable_catalog_lists_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut catalog = FileCatalog::new(dir.path());
        assert!(list_entries(&catalog).is_empty());
        assert!(!load_flow(&catalog, "A").found);
        let err = delete_flow(&mut catalog, "A").expect_err("directory");
        assert!(format!("{:#}", anyhow::Error::from(err)).starts_with("unable to open catalog"));
    }
}

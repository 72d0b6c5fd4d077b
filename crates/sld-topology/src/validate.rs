//! Topology validation logic.
//!
//! Only problems that make a graph meaningless are rejected here. Dangling
//! switch ends and connection entries are tolerated; the graph builder
//! reports them as diagnostics instead.

use std::collections::HashMap;

use crate::schema::TopologyDoc;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub fn validate_topology(topology: &TopologyDoc) -> Result<(), ValidationError> {
    // Ids are global across stations; nodes and switches share the keyspace.
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for (station_name, station) in &topology.stations {
        let ids = station.nodes.keys().chain(station.switches.keys());
        for id in ids {
            if id.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("station '{}' segment id", station_name),
                    value: id.clone(),
                    reason: "must not be empty".to_string(),
                });
            }
            if let Some(first) = owners.insert(id.as_str(), station_name.as_str()) {
                return Err(ValidationError::DuplicateId {
                    id: id.clone(),
                    context: format!("stations '{}' and '{}'", first, station_name),
                });
            }
        }
    }

    for (name, feed) in topology.feeds.entries() {
        let context = match name {
            Some(name) => format!("feed '{}'", name),
            None => "feeds".to_string(),
        };
        if !owners.contains_key(feed.node.as_str()) {
            return Err(ValidationError::MissingReference {
                id: feed.node.clone(),
                context,
            });
        }
        if feed.phase.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("{} phase", context),
                value: feed.phase.clone(),
                reason: "must not be empty".to_string(),
            });
        }
    }

    Ok(())
}

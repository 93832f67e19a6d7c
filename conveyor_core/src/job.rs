//! # Job Files
//!
//! A `Job` groups the conveyors quoted for one customer. Jobs serialize to
//! JSON; see [`crate::file_io`] for atomic saves and version checks.
//!
//! ```text
//! Job
//! ├── meta: JobMetadata (version, job id, customer, timestamps)
//! └── conveyors: HashMap<Uuid, ConveyorInput>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::job::Job;
//! use conveyor_core::conveyor::ConveyorInput;
//!
//! let mut job = Job::new("Q-2291", "Midwest Machining");
//! let id = job.add_conveyor(ConveyorInput::default());
//! assert!(job.get_conveyor(&id).is_some());
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conveyor::{calculate_with, ConveyorInput, ConveyorOutput};
use crate::settings::CalculatorSettings;

/// Current schema version for job files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root job container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub meta: JobMetadata,

    /// Conveyors keyed by UUID
    pub conveyors: HashMap<Uuid, ConveyorInput>,
}

impl Job {
    /// Create an empty job.
    pub fn new(job_id: impl Into<String>, customer: impl Into<String>) -> Self {
        let now = Utc::now();
        Job {
            meta: JobMetadata {
                version: SCHEMA_VERSION.to_string(),
                job_id: job_id.into(),
                customer: customer.into(),
                created: now,
                modified: now,
            },
            conveyors: HashMap::new(),
        }
    }

    /// Add a conveyor. Returns its new UUID.
    pub fn add_conveyor(&mut self, input: ConveyorInput) -> Uuid {
        let id = Uuid::new_v4();
        self.conveyors.insert(id, input);
        self.touch();
        id
    }

    pub fn get_conveyor(&self, id: &Uuid) -> Option<&ConveyorInput> {
        self.conveyors.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn conveyor_count(&self) -> usize {
        self.conveyors.len()
    }

    /// Calculate every conveyor. Ordered by id so output is stable.
    pub fn calculate_all(&self, settings: &CalculatorSettings) -> BTreeMap<Uuid, ConveyorOutput> {
        self.conveyors
            .iter()
            .map(|(id, input)| (*id, calculate_with(input, settings)))
            .collect()
    }
}

impl Default for Job {
    fn default() -> Self {
        Job::new("", "")
    }
}

/// Job metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Quote or order number
    pub job_id: String,

    pub customer: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

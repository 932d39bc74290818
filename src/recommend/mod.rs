//! Plant suggestions from a completion backend.
//!
//! The backend's reply is not parsed into real plant data: each returned name
//! becomes a [`PlantRecord::placeholder`], so only `id` and `scientific_name`
//! of a recommended record can be trusted.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::errors::RequestError;
use crate::matcher::{FacetSelection, SearchResults};
use crate::model::PlantRecord;
use crate::prompt;
use crate::provider::DynBackend;

pub mod care;

pub use care::CareInfo;

/// Observable lifecycle of the most recent recommendation request.
///
/// `Failed` carries only the error; the last successful records stay
/// available from [`Requester::results`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Requesting,
    Succeeded(Vec<PlantRecord>),
    Failed(String),
}

pub struct Requester {
    backend: DynBackend,
    count: usize,
    in_flight: AtomicBool,
    state: Mutex<RequestState>,
    results: Mutex<SearchResults>,
}

/// Held for the duration of one request; releases the in-flight flag on drop.
struct InFlight<'a> {
    owner: &'a Requester,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.owner.state.lock();
        if matches!(*state, RequestState::Requesting) {
            *state = RequestState::Idle;
        }
        drop(state);
        self.owner.in_flight.store(false, Ordering::Release);
    }
}

impl Requester {
    pub fn new(backend: DynBackend, count: usize) -> Self {
        Self {
            backend,
            count,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(RequestState::Idle),
            results: Mutex::new(SearchResults::NotSearched),
        }
    }

    pub fn state(&self) -> RequestState {
        self.state.lock().clone()
    }

    /// Records from the last successful submit. Failed submits leave them as they were.
    pub fn results(&self) -> SearchResults {
        self.results.lock().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlight<'_>, RequestError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| RequestError::InFlight)?;
        *self.state.lock() = RequestState::Requesting;
        Ok(InFlight { owner: self })
    }

    /// Asks the backend for plants matching `sel`. Fails with
    /// [`RequestError::InFlight`] while another submit is outstanding.
    pub async fn submit(&self, sel: &FacetSelection) -> Result<Vec<PlantRecord>, RequestError> {
        let _guard = self.begin().map_err(|e| {
            warn!("recommendation rejected: request already in flight");
            e
        })?;

        let prompt = prompt::recommendation_prompt(sel, self.count);
        info!(state = %sel.state, plant_type = %sel.plant_type, "requesting recommendations");

        let outcome = self
            .backend
            .complete(&prompt)
            .await
            .map(|text| placeholders(&text));

        *self.state.lock() = match &outcome {
            Ok(records) => {
                info!(count = records.len(), "recommendations received");
                self.results.lock().record(records.clone());
                RequestState::Succeeded(records.clone())
            }
            Err(e) => {
                warn!(error = %e, "recommendation request failed");
                RequestState::Failed(e.to_string())
            }
        };
        outcome
    }

    /// Requirements and care text for one plant. Not subject to the in-flight guard.
    pub async fn care_info(&self, plant_name: &str) -> Result<CareInfo, RequestError> {
        let text = self.backend.complete(&prompt::care_prompt(plant_name)).await?;
        Ok(care::parse(&text))
    }
}

/// Splits completion text on ", " into trimmed, non-empty names.
pub fn parse_names(text: &str) -> Vec<String> {
    text.trim()
        .split(", ")
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

fn placeholders(text: &str) -> Vec<PlantRecord> {
    parse_names(text).into_iter().map(PlantRecord::placeholder).collect()
}

use crate::client::{DashboardBackend, DataQuery};
use crate::context::{ContextBuilder, ContextSummary};
use crate::dataset::{Dataset, ModuleKind};
use crate::sort::{SortDirection, SortEngine};
use crate::Result;
use tracing::{info, warn};

/// Holds the single loaded dataset and the listing sort state derived from it
#[derive(Debug, Default)]
pub struct DatasetStore {
    dataset: Option<Dataset>,
    suburb: Option<String>,
    sort: SortEngine,
    generation: u64,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Suburb the current dataset was loaded for
    pub fn suburb(&self) -> Option<&str> {
        self.suburb.as_deref()
    }

    /// Number of successful loads so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Validate, fetch and, on success, replace the dataset.
    ///
    /// Validation failures return before the backend is called. A failed fetch
    /// leaves the previous dataset and sort state untouched.
    pub async fn load<B>(
        &mut self,
        backend: &B,
        suburb: &str,
        modules: &[ModuleKind],
        property_type: &str,
    ) -> Result<&Dataset>
    where
        B: DashboardBackend + ?Sized,
    {
        let query = DataQuery::new(suburb, modules, property_type)?;
        info!(
            target: "dataset_store",
            suburb = %query.suburb,
            endpoints = %query.endpoints(),
            "Loading dataset"
        );

        let dataset = match backend.fetch_dataset(&query).await {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!(target: "dataset_store", error = %e, "Dataset load failed; keeping previous dataset");
                return Err(e);
            }
        };

        Ok(self.replace(query.suburb, dataset))
    }

    /// Swap in a new dataset wholesale and discard state derived from the old one
    pub fn replace(&mut self, suburb: impl Into<String>, dataset: Dataset) -> &Dataset {
        self.sort.reset();
        self.suburb = Some(suburb.into());
        self.generation += 1;
        info!(
            target: "dataset_store",
            generation = self.generation,
            modules = ?dataset.modules(),
            "Dataset replaced"
        );
        self.dataset.insert(dataset)
    }

    /// Sort the listing records by `column`, toggling that column's direction.
    ///
    /// Returns `None` when no properties module is loaded.
    pub fn sort_properties(&mut self, column: &str) -> Option<SortDirection> {
        let records = &mut self.dataset.as_mut()?.properties.as_mut()?.properties;
        Some(self.sort.sort(records, column))
    }

    pub fn sort_direction(&self, column: &str) -> Option<SortDirection> {
        self.sort.direction(column)
    }

    /// Chat context for the current dataset
    pub fn context(&self, builder: &ContextBuilder, suburb: &str) -> ContextSummary {
        builder.build(self.dataset(), suburb)
    }
}

//! Catalog of variants and their static metadata.

use crate::{Engine, SessionError};
use derive_getters::Getters;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Immutable description of one variant.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct VariantDescriptor {
    /// Position in the engine's catalog.
    index: usize,
    /// Display name, unique within the registry.
    name: String,
    /// Grid rows.
    rows: usize,
    /// Grid columns.
    columns: usize,
    /// Asset name for each cell state.
    cell_states: Vec<String>,
    /// Whether rank and file labels are drawn.
    coordinate_labels: bool,
}

impl VariantDescriptor {
    /// Size of the cell-state vocabulary.
    pub fn cell_state_count(&self) -> usize {
        self.cell_states.len()
    }

    /// Asset name for a cell state.
    pub fn cell_state_name(&self, state: usize) -> Result<&str, SessionError> {
        self.cell_states
            .get(state)
            .map(String::as_str)
            .ok_or_else(|| SessionError::out_of_range("cell state", state, self.cell_states.len()))
    }
}

/// Variants offered by an engine, probed once at startup.
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    variants: Vec<Arc<VariantDescriptor>>,
}

impl VariantRegistry {
    /// Enumerates the engine's catalog, creating one game per variant to
    /// capture its board shape and cell-state vocabulary.
    #[instrument(skip(engine), fields(count = engine.variant_count()))]
    pub fn from_engine(engine: &dyn Engine) -> Result<Self, SessionError> {
        let count = engine.variant_count();
        let mut variants = Vec::with_capacity(count);

        for index in 0..count {
            let name = engine.variant_name(index).ok_or_else(|| {
                error!(index, "Engine lists a variant it cannot name");
                SessionError::out_of_range("variant", index, count)
            })?;
            let game = engine.new_game(index).ok_or_else(|| {
                error!(index, %name, "Engine lists a variant it cannot create");
                SessionError::out_of_range("variant", index, count)
            })?;

            if game.rows() == 0 || game.columns() == 0 || game.cell_state_count() == 0 {
                error!(%name, rows = game.rows(), columns = game.columns(), "Variant has an empty board");
                return Err(SessionError::out_of_range("board dimension", 0, 0));
            }

            let cell_states = (0..game.cell_state_count())
                .map(|state| game.cell_state_asset_name(state))
                .collect();

            debug!(index, %name, rows = game.rows(), columns = game.columns(), "Registered variant");
            variants.push(Arc::new(VariantDescriptor {
                index,
                name,
                rows: game.rows(),
                columns: game.columns(),
                cell_states,
                coordinate_labels: game.coordinate_labels(),
            }));
        }

        info!(count = variants.len(), "Variant registry populated");
        Ok(Self { variants })
    }

    /// Number of variants.
    pub fn count(&self) -> usize {
        self.variants.len()
    }

    /// Name of the variant at `index`.
    pub fn name(&self, index: usize) -> Result<&str, SessionError> {
        self.describe_ref(index).map(|d| d.name().as_str())
    }

    /// Descriptor of the variant at `index`.
    pub fn describe(&self, index: usize) -> Result<Arc<VariantDescriptor>, SessionError> {
        self.describe_ref(index).cloned()
    }

    /// Index of the variant whose name matches, ignoring case.
    pub fn find(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.variants
            .iter()
            .position(|d| d.name().eq_ignore_ascii_case(wanted))
    }

    /// All descriptors in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &VariantDescriptor> {
        self.variants.iter().map(Arc::as_ref)
    }

    fn describe_ref(&self, index: usize) -> Result<&Arc<VariantDescriptor>, SessionError> {
        self.variants
            .get(index)
            .ok_or_else(|| SessionError::out_of_range("variant", index, self.variants.len()))
    }
}

//! The address-selection flow: resolve, position, look up the grid operator, build the popup.
//!
//! `run` performs the lookups in order and reports progress through `emit`, so the caller
//! (normally a worker thread) never touches UI state directly. Events arrive in the order
//! the states are entered; a `Positioned` event is never retracted by a later failure.

use tracing::{error, info};

use crate::LookupError;
use crate::address::{AddressLookup, AddressSuggestion, ResolvedAddress};
use crate::grid::{GridOperator, GridOperatorLookup};
use crate::popup::PopupContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Resolving,
    Positioned,
    OperatorLookup,
    PopupShown,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Positioned(ResolvedAddress),
    OperatorLookup,
    PopupReady(PopupContent),
    Failed(String),
}

impl SelectionEvent {
    pub fn state(&self) -> SelectionState {
        match self {
            Self::Positioned(_) => SelectionState::Positioned,
            Self::OperatorLookup => SelectionState::OperatorLookup,
            Self::PopupReady(_) => SelectionState::PopupShown,
            Self::Failed(_) => SelectionState::Failed,
        }
    }
}

pub fn run(
    address: &dyn AddressLookup,
    grid: &dyn GridOperatorLookup,
    suggestion: &AddressSuggestion,
    emit: &mut dyn FnMut(SelectionEvent),
) {
    let resolved = match address.get_by_id(&suggestion.id) {
        Ok(resolved) => resolved,
        Err(err) => {
            error!(id = %suggestion.id, error = %err, "address lookup failed");
            emit(SelectionEvent::Failed(err.to_string()));
            return;
        }
    };
    info!(
        id = %resolved.id,
        lat = resolved.coordinates.lat,
        lon = resolved.coordinates.lon,
        "address resolved"
    );
    emit(SelectionEvent::Positioned(resolved));

    let operator = if grid.is_enabled() {
        emit(SelectionEvent::OperatorLookup);
        match lookup_operator(grid, &suggestion.display_text) {
            Ok(operator) => operator,
            Err(err) => {
                error!(address = %suggestion.display_text, error = %err, "grid operator lookup failed");
                emit(SelectionEvent::Failed(err.to_string()));
                return;
            }
        }
    } else {
        None
    };

    emit(SelectionEvent::PopupReady(PopupContent::build(
        &suggestion.display_text,
        operator,
    )));
}

/// First candidate, then first supplier for its external id. Any gap means "no operator".
fn lookup_operator(
    grid: &dyn GridOperatorLookup,
    full_address_text: &str,
) -> Result<Option<GridOperator>, LookupError> {
    let candidates = grid.autocomplete_operator(full_address_text)?;
    let Some(external_id) = candidates
        .into_iter()
        .next()
        .and_then(|c| c.external_supplier_id)
    else {
        info!(address = %full_address_text, "no grid operator candidate");
        return Ok(None);
    };
    let supplier = grid.supplier_by_external_id(&external_id)?.into_iter().next();
    if supplier.is_none() {
        info!(%external_id, "no supplier for external id");
    }
    Ok(supplier)
}

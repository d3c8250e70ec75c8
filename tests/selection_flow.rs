mod support;

use pretty_assertions::assert_eq;

use danmarkskort::address::{AddressSuggestion, Coordinates};
use danmarkskort::grid::GridOperator;
use danmarkskort::popup::PopupContent;
use danmarkskort::selection::{self, SelectionEvent, SelectionState};

use support::{FakeGrid, FakeRegistry};

fn run(registry: &FakeRegistry, grid: &FakeGrid, pick: &AddressSuggestion) -> Vec<SelectionEvent> {
    let mut events = Vec::new();
    selection::run(registry, grid, pick, &mut |e: SelectionEvent| events.push(e));
    events
}

fn copenhagen() -> (FakeRegistry, AddressSuggestion) {
    (
        FakeRegistry::default().point("cph", [12.5683, 55.6761]),
        AddressSuggestion::new("cph", "Rådhuspladsen 1, 1550 København V"),
    )
}

fn states(events: &[SelectionEvent]) -> Vec<SelectionState> {
    events.iter().map(SelectionEvent::state).collect()
}

#[test]
fn registry_coordinates_are_swapped_before_positioning() {
    let (registry, pick) = copenhagen();
    let events = run(&registry, &FakeGrid::disabled(), &pick);

    let SelectionEvent::Positioned(resolved) = &events[0] else {
        panic!("expected Positioned first, got {events:?}");
    };
    assert_eq!(resolved.coordinates, Coordinates::new(55.6761, 12.5683));
    assert_eq!(resolved.coordinates.lat, 55.6761);
    assert_eq!(resolved.coordinates.lon, 12.5683);
}

#[test]
fn disabled_grid_skips_operator_state() {
    let (registry, pick) = copenhagen();
    let grid = FakeGrid::disabled();
    let events = run(&registry, &grid, &pick);

    assert_eq!(
        states(&events),
        vec![SelectionState::Positioned, SelectionState::PopupShown]
    );
    assert_eq!(
        events.last(),
        Some(&SelectionEvent::PopupReady(PopupContent::build(
            "Rådhuspladsen 1, 1550 København V",
            None
        )))
    );
    assert!(grid.calls().is_empty());
}

#[test]
fn candidate_without_external_id_never_asks_for_supplier() {
    let (registry, pick) = copenhagen();
    let grid = FakeGrid::with_operator(None, vec![support::radius_elnet()]);
    let events = run(&registry, &grid, &pick);

    assert_eq!(
        states(&events),
        vec![
            SelectionState::Positioned,
            SelectionState::OperatorLookup,
            SelectionState::PopupShown
        ]
    );
    assert!(matches!(
        events.last(),
        Some(SelectionEvent::PopupReady(PopupContent { operator: None, .. }))
    ));
    assert_eq!(
        grid.calls(),
        vec!["autocomplete_operator:Rådhuspladsen 1, 1550 København V".to_string()]
    );
}

#[test]
fn empty_supplier_result_means_no_operator() {
    let (registry, pick) = copenhagen();
    let grid = FakeGrid::with_operator(Some("42"), Vec::new());
    let events = run(&registry, &grid, &pick);

    assert!(matches!(
        events.last(),
        Some(SelectionEvent::PopupReady(PopupContent { operator: None, .. }))
    ));
    assert_eq!(grid.calls().len(), 2);
}

#[test]
fn only_first_candidate_and_first_supplier_are_used() {
    let (registry, pick) = copenhagen();
    let mut grid = FakeGrid::with_operator(
        Some("first"),
        vec![
            GridOperator {
                name: "Cerius A/S".to_string(),
                website_url: Some("https://cerius.dk".to_string()),
                ..Default::default()
            },
            support::radius_elnet(),
        ],
    );
    grid.candidates.push(danmarkskort::grid::OperatorCandidate {
        external_supplier_id: Some("second".to_string()),
    });
    let events = run(&registry, &grid, &pick);

    let Some(SelectionEvent::PopupReady(content)) = events.last() else {
        panic!("expected popup, got {events:?}");
    };
    let card = content.operator.as_ref().expect("operator");
    assert_eq!(card.name.as_deref(), Some("Cerius A/S"));
    assert_eq!(card.phone, None);
    assert_eq!(card.logo_url, None);
    assert_eq!(
        card.website.as_ref().map(|w| w.href.as_str()),
        Some("https://cerius.dk")
    );
    assert!(grid.calls().contains(&"supplier_by_external_id:first".to_string()));
}

#[test]
fn address_failure_stops_before_positioning() {
    let registry = FakeRegistry::default();
    let grid = FakeGrid::with_operator(Some("42"), vec![support::radius_elnet()]);
    let pick = AddressSuggestion::new("missing", "Ukendtvej 1");
    let events = run(&registry, &grid, &pick);

    assert_eq!(states(&events), vec![SelectionState::Failed]);
    assert!(grid.calls().is_empty());
}

#[test]
fn operator_failure_fails_after_positioning() {
    let (registry, pick) = copenhagen();
    let grid = FakeGrid {
        autocomplete_fails: true,
        ..FakeGrid::with_operator(Some("42"), Vec::new())
    };
    let events = run(&registry, &grid, &pick);

    assert_eq!(
        states(&events),
        vec![
            SelectionState::Positioned,
            SelectionState::OperatorLookup,
            SelectionState::Failed
        ]
    );
    let Some(SelectionEvent::Failed(message)) = events.last() else {
        panic!("expected failure, got {events:?}");
    };
    assert_eq!(message, "elnet autocomplete returned HTTP 502");
}

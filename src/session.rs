//! Session-scoped controller owning every piece of mutable UI state.
//!
//! Input events (`on_search_input`, `tick`, `pick`, `dismiss_suggestions`) mutate the state
//! directly or hand a lookup to the spawner. Lookup results come back over a channel and are
//! applied in `drain`, always on the thread that owns the session.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::address::{AddressLookup, AddressSuggestion};
use crate::debounce::Debouncer;
use crate::grid::GridOperatorLookup;
use crate::map::{MapSurface, MapView};
use crate::selection::{self, SelectionEvent, SelectionState};
use crate::suggestions::SuggestionList;
use crate::worker::Spawn;
use crate::{LookupError, statics};

type Waker = Arc<dyn Fn() + Send + Sync>;

/// A lookup result on its way back to the session. `generation` identifies the request
/// that produced it so answers to superseded requests can be dropped.
#[derive(Debug)]
pub enum WorkerMessage {
    Suggestions {
        generation: u64,
        result: Result<Vec<AddressSuggestion>, LookupError>,
    },
    Selection {
        generation: u64,
        event: SelectionEvent,
    },
}

pub struct Session<M: MapSurface = MapView> {
    address: Arc<dyn AddressLookup>,
    grid: Arc<dyn GridOperatorLookup>,
    spawner: Box<dyn Spawn>,
    waker: Waker,
    tx: Sender<WorkerMessage>,
    rx: Receiver<WorkerMessage>,

    search_text: String,
    debounce: Debouncer<String>,
    suggestions: SuggestionList,
    suggestion_generation: u64,
    searching: bool,

    map: M,
    selection_state: SelectionState,
    selection_generation: u64,
    alert: Option<String>,
}

impl<M: MapSurface> Session<M> {
    pub fn new(
        address: Arc<dyn AddressLookup>,
        grid: Arc<dyn GridOperatorLookup>,
        spawner: Box<dyn Spawn>,
        map: M,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            address,
            grid,
            spawner,
            waker: Arc::new(|| {}),
            tx,
            rx,
            search_text: String::new(),
            debounce: Debouncer::new(Duration::from_millis(statics::SEARCH_DEBOUNCE_MS)),
            suggestions: SuggestionList::default(),
            suggestion_generation: 0,
            searching: false,
            map,
            selection_state: SelectionState::Idle,
            selection_generation: 0,
            alert: None,
        }
    }

    /// Called by workers after posting a message (the GUI passes `request_repaint`).
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Arc::new(waker);
        self
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn search_text_mut(&mut self) -> &mut String {
        &mut self.search_text
    }

    pub fn suggestions(&self) -> &SuggestionList {
        &self.suggestions
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection_state
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn grid_operator_enabled(&self) -> bool {
        self.grid.is_enabled()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn acknowledge_alert(&mut self) {
        self.alert = None;
    }

    /// The search text changed; (re)start the quiet period.
    pub fn on_search_input(&mut self, now: Instant) {
        self.debounce.schedule(self.search_text.clone(), now);
    }

    /// Time until the pending search falls due, so the caller can wake up for it.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.debounce.time_until_due(now)
    }

    /// Fire the debounced search if its quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(text) = self.debounce.poll(now) {
            self.search(&text);
        }
    }

    fn search(&mut self, text: &str) {
        let query = text.trim();
        if query.chars().count() < statics::SEARCH_MIN_CHARS {
            self.suggestion_generation += 1;
            self.searching = false;
            self.suggestions.render(Vec::new());
            return;
        }

        self.suggestion_generation += 1;
        self.searching = true;
        let generation = self.suggestion_generation;
        let query = query.to_string();
        let address = Arc::clone(&self.address);
        let tx = self.tx.clone();
        let waker = Arc::clone(&self.waker);
        debug!(%query, generation, "autocomplete");
        let spawned = self.spawner.spawn(
            "address-autocomplete",
            Box::new(move || {
                let result = address.autocomplete(&query);
                let _ = tx.send(WorkerMessage::Suggestions { generation, result });
                waker();
            }),
        );
        if let Err(err) = spawned {
            warn!(error = %err, "autocomplete not started");
            self.searching = false;
            self.suggestions.render(Vec::new());
        }
    }

    /// A dropdown row was clicked.
    pub fn pick(&mut self, index: usize) {
        let Some(suggestion) = self.suggestions.get(index).cloned() else {
            return;
        };
        self.suggestions.clear();
        self.debounce.cancel();
        // An autocomplete still in flight must not reopen the list.
        self.suggestion_generation += 1;
        self.searching = false;
        self.search_text = suggestion.display_text.clone();
        self.select(suggestion);
    }

    fn select(&mut self, suggestion: AddressSuggestion) {
        self.selection_generation += 1;
        self.selection_state = SelectionState::Resolving;
        let generation = self.selection_generation;
        let address = Arc::clone(&self.address);
        let grid = Arc::clone(&self.grid);
        let tx = self.tx.clone();
        let waker = Arc::clone(&self.waker);
        info!(id = %suggestion.id, text = %suggestion.display_text, generation, "address picked");
        let spawned = self.spawner.spawn(
            "address-selection",
            Box::new(move || {
                selection::run(&*address, &*grid, &suggestion, &mut |event: SelectionEvent| {
                    let _ = tx.send(WorkerMessage::Selection { generation, event });
                    waker();
                });
            }),
        );
        if let Err(err) = spawned {
            error!(error = %err, "address lookup not started");
            self.selection_state = SelectionState::Failed;
            self.alert = Some(statics::DA_ALERT_LOOKUP_FAILED.to_string());
        }
    }

    /// Click outside the dropdown and search field.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.hide();
    }

    /// Apply every lookup result received so far. Returns whether anything changed.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(message) => changed |= self.apply(message),
                Err(TryRecvError::Empty) => break,
                // The session keeps its own sender, so this cannot happen while it lives.
                Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    fn apply(&mut self, message: WorkerMessage) -> bool {
        match message {
            WorkerMessage::Suggestions { generation, result } => {
                if generation != self.suggestion_generation {
                    debug!(generation, latest = self.suggestion_generation, "stale suggestions dropped");
                    return false;
                }
                self.searching = false;
                match result {
                    Ok(hits) => self.suggestions.render(hits),
                    Err(err) => {
                        warn!(error = %err, "autocomplete failed");
                        self.suggestions.render(Vec::new());
                    }
                }
                true
            }
            WorkerMessage::Selection { generation, event } => {
                if generation != self.selection_generation {
                    debug!(generation, latest = self.selection_generation, "stale selection event dropped");
                    return false;
                }
                self.selection_state = event.state();
                match event {
                    SelectionEvent::Positioned(resolved) => {
                        self.map.set_marker_position(resolved.coordinates);
                        self.map
                            .recenter(resolved.coordinates, statics::ADDRESS_ZOOM);
                    }
                    SelectionEvent::OperatorLookup => {}
                    SelectionEvent::PopupReady(content) => {
                        self.map.show_popup(content, statics::POPUP_MAX_WIDTH);
                    }
                    SelectionEvent::Failed(_) => {
                        self.alert = Some(statics::DA_ALERT_LOOKUP_FAILED.to_string());
                    }
                }
                true
            }
        }
    }
}

//! Filter selection with an in-flight guard
//!
//! [`FilterSelect`] holds the committed filter value of a selection widget.
//! A new selection is refused while the transactions triggered by the
//! previous one are still loading, and the widget keeps showing the last
//! committed value.

use log::debug;

use crate::client::Employee;

/// Label shown when nothing can be selected.
pub const EMPTY_LABEL: &str = "No items";

/// An item that can be offered by a selection widget.
pub trait Selectable {
    /// Stable key identifying the item.
    fn identify(&self) -> String;
    /// Human readable label.
    fn display(&self) -> String;
}

impl Selectable for Employee {
    fn identify(&self) -> String {
        self.id.clone()
    }

    fn display(&self) -> String {
        self.full_name()
    }
}

/// Result of a selection attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome<T> {
    /// Accepted. The filter-change callback should run with this value.
    Committed(T),
    /// Refused while loading. The widget keeps displaying `keep`.
    Rejected { keep: Option<T> },
    /// Nothing was selected.
    Ignored,
}

/// What the widget's dropdown shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Menu {
    Loading(String),
    Empty,
    Items(Vec<MenuItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub selected: bool,
}

/// Selection state of one filter widget.
#[derive(Debug, Clone)]
pub struct FilterSelect<T> {
    label: String,
    loading_label: String,
    committed: Option<T>,
}

impl<T: Selectable + Clone> FilterSelect<T> {
    pub fn new(label: impl Into<String>, loading_label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            loading_label: loading_label.into(),
            committed: None,
        }
    }

    /// Start with `value` already committed.
    pub fn with_default(mut self, value: T) -> Self {
        self.committed = Some(value);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The last committed value.
    #[allow(dead_code)]
    pub fn selected(&self) -> Option<&T> {
        self.committed.as_ref()
    }

    /// Attempt to change the selection.
    ///
    /// While `is_loading_transactions` is set every attempt is rejected,
    /// including an empty one.
    pub fn select(
        &mut self,
        candidate: Option<T>,
        is_loading_transactions: bool,
    ) -> SelectionOutcome<T> {
        if is_loading_transactions {
            debug!(
                "Selection rejected while transactions load; keeping {:?}",
                self.committed.as_ref().map(Selectable::display)
            );
            return SelectionOutcome::Rejected {
                keep: self.committed.clone(),
            };
        }

        let Some(candidate) = candidate else {
            return SelectionOutcome::Ignored;
        };

        self.committed = Some(candidate.clone());
        SelectionOutcome::Committed(candidate)
    }

    /// Text the widget's input shows.
    pub fn input_value(&self) -> String {
        self.committed
            .as_ref()
            .map(Selectable::display)
            .unwrap_or_default()
    }

    /// Dropdown contents for `items`.
    pub fn menu(&self, items: &[T], is_loading_items: bool) -> Menu {
        if is_loading_items {
            return Menu::Loading(format!("{}...", self.loading_label));
        }
        if items.is_empty() {
            return Menu::Empty;
        }

        let selected_key = self.committed.as_ref().map(Selectable::identify);
        Menu::Items(
            items
                .iter()
                .map(|item| {
                    let key = item.identify();
                    MenuItem {
                        selected: selected_key.as_deref() == Some(key.as_str()),
                        label: item.display(),
                        key,
                    }
                })
                .collect(),
        )
    }

    /// Index of the committed value within `items`.
    pub fn position(&self, items: &[T]) -> Option<usize> {
        let key = self.committed.as_ref()?.identify();
        items.iter().position(|item| item.identify() == key)
    }
}

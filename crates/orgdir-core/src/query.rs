//! Search-option normalisation.
//!
//! [`CollectionOptions`] is what the transport hands over verbatim;
//! [`SearchOptions`] is the canonical descriptor every downstream layer
//! consumes. Normalisation happens exactly once per request, so resolution
//! and storage code never branch on a missing operation or sort order.

use serde::{Deserialize, Serialize};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Comparison applied between a filter field and its value.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperation {
  #[default]
  Equals,
  Contains,
  StartsWith,
}

/// Direction of a sort.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
  #[default]
  Ascending,
  Descending,
}

// ─── Raw caller-supplied options ─────────────────────────────────────────────

/// Pagination/filter/sort parameters exactly as supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct CollectionOptions {
  /// Index of the first item to return.
  pub first:            usize,
  /// Maximum number of items to return.
  pub max:              usize,
  pub filter:           Option<String>,
  pub filter_operation: Option<FilterOperation>,
  pub filter_value:     Option<String>,
  pub sort_by:          Option<String>,
  pub sort_order:       Option<SortOrder>,
}

// ─── Canonical descriptor ────────────────────────────────────────────────────

/// A fully-defaulted filter: field, operation and value are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
  pub field:     String,
  pub operation: FilterOperation,
  pub value:     String,
}

/// A fully-defaulted sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
  pub field: String,
  pub order: SortOrder,
}

/// Canonical query descriptor consumed by scope resolution and the user
/// store. Built once per request via [`SearchOptions::from_collection`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
  pub first:  usize,
  pub max:    usize,
  pub filter: Option<Filter>,
  pub sort:   Option<Sort>,
}

impl SearchOptions {
  pub fn build() -> Self {
    Self::default()
  }

  pub fn with_range(mut self, max: usize, first: usize) -> Self {
    self.max = max;
    self.first = first;
    self
  }

  /// Attach a filter. An empty field means "no filter" and leaves the
  /// descriptor unchanged.
  pub fn with_filter(
    mut self,
    field: impl Into<String>,
    operation: FilterOperation,
    value: impl Into<String>,
  ) -> Self {
    let field = field.into();
    if !field.is_empty() {
      self.filter = Some(Filter { field, operation, value: value.into() });
    }
    self
  }

  /// Attach a sort. An empty field means "no sort".
  pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
    let field = field.into();
    if !field.is_empty() {
      self.sort = Some(Sort { field, order });
    }
    self
  }

  /// Normalise raw caller-supplied options: offset and limit pass through,
  /// a missing filter operation defaults to `equals`, a missing sort order
  /// defaults to `ascending`. Total — there is no failure path.
  pub fn from_collection(raw: &CollectionOptions) -> Self {
    Self::build()
      .with_range(raw.max, raw.first)
      .with_filter(
        raw.filter.as_deref().unwrap_or_default(),
        raw.filter_operation.unwrap_or_default(),
        raw.filter_value.as_deref().unwrap_or_default(),
      )
      .with_sort(
        raw.sort_by.as_deref().unwrap_or_default(),
        raw.sort_order.unwrap_or_default(),
      )
  }
}

//! The paginated collection envelope returned by list operations.

use serde::Serialize;

/// An ordered page of results plus paging metadata.
///
/// `total_results` always reflects the full matching-set size, independent
/// of the page actually returned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
  pub start_index:    usize,
  pub total_results:  usize,
  pub items_per_page: usize,
  pub entry:          Vec<T>,
}

impl<T> Collection<T> {
  pub fn new(
    entry: Vec<T>,
    start_index: usize,
    total_results: usize,
    items_per_page: usize,
  ) -> Self {
    Self { start_index, total_results, items_per_page, entry }
  }

  /// A single-page collection wrapping `entry` with trivial metadata.
  pub fn of(entry: Vec<T>) -> Self {
    let len = entry.len();
    Self { start_index: 0, total_results: len, items_per_page: len, entry }
  }
}

//! Listing collaborator contract.

use trawl_core::Item;

#[cfg(test)]
use mockall::automock;

/// The paginated, filtered result set a selection was made against.
///
/// The engine never builds queries itself. It asks the listing for the
/// rows it displayed, and, for all-pages scope, for the full result set
/// with pagination removed. How the listing produces rows (and how much it
/// holds in memory while doing so) is its own concern.
#[cfg_attr(test, automock)]
pub trait Listing: Send + Sync {
    /// Resource type of the listed rows.
    fn resource_type(&self) -> &str;

    /// Rows currently displayed.
    fn current_page(&self) -> Vec<Item>;

    /// Re-run the query with pagination removed.
    fn rerun_unpaginated(&self) -> Vec<Item>;

    /// Total rows across all pages.
    fn total_count(&self) -> usize;

    /// Rows per page; 0 means the listing is unpaginated.
    fn page_size(&self) -> usize;

    /// Whether rows are addressed at revision granularity.
    ///
    /// Queried once per request; selection keys carry a revision field
    /// only when this is true.
    fn uses_revisions(&self) -> bool {
        false
    }

    /// Whether the result set spans more than the displayed page.
    ///
    /// Gates offering the all-pages scope: with a single page the two
    /// scopes select the same rows.
    fn spans_multiple_pages(&self) -> bool {
        self.page_size() > 0 && self.total_count() > self.page_size()
    }
}

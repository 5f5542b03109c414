/// Offset of the first row on `page` (1-based, missing or zero meaning the first page).
///
/// Saturates at `u64::MAX` for pages past any possible row.
pub fn start_index(page: Option<u64>, per_page: u64) -> u64 {
    (current_page(page) - 1).saturating_mul(per_page)
}

/// Normalises a requested page number.
pub fn current_page(page: Option<u64>) -> u64 {
    page.filter(|page| *page > 0).unwrap_or(1)
}

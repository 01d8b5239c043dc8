use crate::errors::TabularError;

/// Bounds of one page within a table. Invariant:
/// `0 <= start <= end <= total_rows` and `end - start <= rows_per_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub start: usize,
    pub end: usize,
    pub total_pages: usize,
}

/// Computes the bounds of the requested page, validating `page` against the
/// total row count. An empty table keeps `total_pages = 0` and accepts any
/// `page >= 1`, returning an empty slice.
pub fn paginate(
    total_rows: usize,
    page: i64,
    rows_per_page: usize,
) -> Result<PageBounds, TabularError> {
    let total_pages = (total_rows as f64 / rows_per_page as f64).ceil() as usize;

    if page < 1 || (total_rows > 0 && page as usize > total_pages) {
        return Err(TabularError::invalid_page(total_pages));
    }

    // Saturate: huge pages are legal against an empty table, and the min
    // below bounds the result anyway.
    let start = std::cmp::min(
        (page as usize - 1).saturating_mul(rows_per_page),
        total_rows,
    );
    let end = std::cmp::min(start + rows_per_page, total_rows);

    Ok(PageBounds {
        start,
        end,
        total_pages,
    })
}

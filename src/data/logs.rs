//! Ping log filtering, sorting and pagination.
//!
//! [`query_logs`] is the pure core: selection filter, then status-class
//! filter, then a stable sort, then a page slice. [`LogQuery`] holds the
//! interactive state the log view threads into it.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;

use pingwatch_types::{CheckRecord, EndpointId};

use crate::error::CoreError;

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Status-class filter for the log view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StatusFilter {
    #[default]
    All,
    Success,
    ClientError,
    ServerError,
}

impl StatusFilter {
    /// Whether a status code passes this filter. Absent codes only pass `All`.
    pub fn matches(&self, status: Option<u16>) -> bool {
        let range = match self {
            StatusFilter::All => return true,
            StatusFilter::Success => 200..300,
            StatusFilter::ClientError => 400..500,
            StatusFilter::ServerError => 500..600,
        };
        status.is_some_and(|code| range.contains(&code))
    }

    /// Cycle to the next filter.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Success,
            StatusFilter::Success => StatusFilter::ClientError,
            StatusFilter::ClientError => StatusFilter::ServerError,
            StatusFilter::ServerError => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Statuses",
            StatusFilter::Success => "Success (2xx)",
            StatusFilter::ClientError => "Client Error (4xx)",
            StatusFilter::ServerError => "Server Error (5xx)",
        }
    }
}

/// Column to sort the log view by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortKey {
    #[default]
    Timestamp,
    EndpointName,
    EndpointUrl,
    StatusCode,
    ResponseTime,
}

impl SortKey {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortKey::Timestamp => SortKey::EndpointName,
            SortKey::EndpointName => SortKey::EndpointUrl,
            SortKey::EndpointUrl => SortKey::StatusCode,
            SortKey::StatusCode => SortKey::ResponseTime,
            SortKey::ResponseTime => SortKey::Timestamp,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Timestamp => "time",
            SortKey::EndpointName => "name",
            SortKey::EndpointUrl => "url",
            SortKey::StatusCode => "status",
            SortKey::ResponseTime => "latency",
        }
    }

    /// Compare two records on this key, ascending.
    ///
    /// Strings compare case-sensitively; absent status codes and latencies
    /// order before present ones.
    fn compare(&self, a: &CheckRecord, b: &CheckRecord) -> Ordering {
        match self {
            SortKey::Timestamp => a.created_at.cmp(&b.created_at),
            SortKey::EndpointName => a.target.name.cmp(&b.target.name),
            SortKey::EndpointUrl => a.target.url.cmp(&b.target.url),
            SortKey::StatusCode => a.status_code.cmp(&b.status_code),
            SortKey::ResponseTime => a.response_time.cmp(&b.response_time),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Sort key plus direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LogSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    size: usize,
    index: usize,
}

impl PageRequest {
    /// Zero-based `index` into pages of `size` rows. A size of zero is rejected.
    pub fn new(size: usize, index: usize) -> Result<Self, CoreError> {
        if size == 0 {
            return Err(CoreError::InvalidPageSize(size));
        }
        Ok(Self { size, index })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// One page of the filtered, sorted log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a> {
    pub rows: Vec<&'a CheckRecord>,
    /// Rows matching the filters, across all pages.
    pub total_count: usize,
    pub page_count: usize,
    pub page_index: usize,
    pub page_size: usize,
}

impl Page<'_> {
    /// 1-based position of the first row shown, 0 when the page is empty.
    pub fn first_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.page_index * self.page_size + 1
        }
    }

    /// 1-based position of the last row shown, 0 when the page is empty.
    pub fn last_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.page_index * self.page_size + self.rows.len()
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0 && self.page_count > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

/// Filter, sort and paginate ping log records.
///
/// An empty `selected` set yields an empty result; callers that want
/// "everything" must expand the selection themselves. Indices past the last
/// page return no rows but still report the totals.
pub fn query_logs<'a>(
    records: &'a [CheckRecord],
    selected: &BTreeSet<EndpointId>,
    status: StatusFilter,
    sort: LogSort,
    page: PageRequest,
) -> Page<'a> {
    let mut rows: Vec<&CheckRecord> = records
        .iter()
        .filter(|r| selected.contains(&r.endpoint_id()))
        .filter(|r| status.matches(r.status_code))
        .collect();

    // sort_by is stable, so equal keys keep input order in both directions
    rows.sort_by(|a, b| {
        let ord = sort.key.compare(a, b);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    let total_count = rows.len();
    let page_count = total_count.div_ceil(page.size);
    let start = page.index.saturating_mul(page.size).min(total_count);
    let end = start.saturating_add(page.size).min(total_count);

    Page {
        rows: rows[start..end].to_vec(),
        total_count,
        page_count,
        page_index: page.index,
        page_size: page.size,
    }
}

/// Interactive state of the log view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Explicitly chosen endpoints. Empty means all of them.
    pub selected: BTreeSet<EndpointId>,
    pub status: StatusFilter,
    pub sort: LogSort,
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl LogQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            selected: BTreeSet::new(),
            status: StatusFilter::default(),
            sort: LogSort::default(),
            page_index: 0,
            page_size,
        }
    }

    /// Run the query against `records`, treating an empty selection as `known`.
    pub fn run<'a>(
        &self,
        records: &'a [CheckRecord],
        known: &BTreeSet<EndpointId>,
    ) -> Result<Page<'a>, CoreError> {
        let page = PageRequest::new(self.page_size, self.page_index)?;
        let selection = if self.selected.is_empty() {
            known
        } else {
            &self.selected
        };
        Ok(query_logs(records, selection, self.status, self.sort, page))
    }

    /// Header click: the active column flips direction, another column sorts ascending.
    pub fn click_sort(&mut self, key: SortKey) {
        if self.sort.key == key {
            self.sort.direction = self.sort.direction.toggle();
        } else {
            self.sort = LogSort {
                key,
                direction: SortDirection::Asc,
            };
        }
        self.page_index = 0;
    }

    /// Move to the next sort column, keeping the direction.
    pub fn cycle_sort_key(&mut self) {
        self.sort.key = self.sort.key.next();
        self.page_index = 0;
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort.direction = self.sort.direction.toggle();
        self.page_index = 0;
    }

    pub fn cycle_status(&mut self) {
        self.status = self.status.next();
        self.page_index = 0;
    }

    pub fn toggle_endpoint(&mut self, id: EndpointId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.page_index = 0;
    }

    /// "Select All" when anything is unselected, otherwise "Deselect All".
    pub fn toggle_all(&mut self, known: &BTreeSet<EndpointId>) {
        if self.all_selected(known) {
            self.selected.clear();
        } else {
            self.selected = known.clone();
        }
        self.page_index = 0;
    }

    pub fn all_selected(&self, known: &BTreeSet<EndpointId>) -> bool {
        !known.is_empty() && known.is_subset(&self.selected)
    }

    /// Summary of the endpoint picker button.
    pub fn selection_label(&self) -> String {
        if self.selected.is_empty() {
            "All Endpoints".to_string()
        } else {
            format!("{} Selected", self.selected.len())
        }
    }

    pub fn next_page(&mut self, page_count: usize) {
        if self.page_index + 1 < page_count {
            self.page_index += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Pull the page index back inside `page_count` after the data shrank.
    pub fn clamp_page(&mut self, page_count: usize) {
        self.page_index = self.page_index.min(page_count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{check, named_check};
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn all(ids: &[u64]) -> BTreeSet<EndpointId> {
        ids.iter().copied().map(EndpointId).collect()
    }

    fn ids(page: &Page<'_>) -> Vec<u64> {
        page.rows.iter().map(|r| r.id.0).collect()
    }

    fn sample() -> Vec<CheckRecord> {
        vec![
            check(1, 1, Some(200), 128, t0() - Duration::minutes(5)),
            check(2, 2, Some(500), 1523, t0() - Duration::minutes(15)),
            check(3, 3, Some(408), 5000, t0() - Duration::minutes(25)),
            check(4, 4, Some(200), 95, t0() - Duration::minutes(35)),
            check(5, 1, Some(200), 132, t0() - Duration::minutes(60)),
            check(6, 2, Some(404), 205, t0() - Duration::minutes(120)),
            check(7, 3, None, 110, t0() - Duration::minutes(180)),
        ]
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let records = sample();
        let page = query_logs(
            &records,
            &all(&[1, 2, 3, 4]),
            StatusFilter::All,
            LogSort::default(),
            PageRequest::new(10, 0).unwrap(),
        );
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(page.total_count, 7);
        assert_eq!(page.page_count, 1);
    }

    #[test]
    fn test_selection_then_status_filter() {
        let records = sample();
        let page = query_logs(
            &records,
            &all(&[2, 3]),
            StatusFilter::ClientError,
            LogSort::default(),
            PageRequest::new(10, 0).unwrap(),
        );
        assert_eq!(ids(&page), vec![3, 6]);
        assert!(page.rows.iter().all(|r| (400..500).contains(&r.status_code.unwrap())));
    }

    #[test]
    fn test_absent_status_only_in_all() {
        let records = sample();
        let sel = all(&[3]);
        let req = PageRequest::new(10, 0).unwrap();
        for filter in [
            StatusFilter::Success,
            StatusFilter::ClientError,
            StatusFilter::ServerError,
        ] {
            let page = query_logs(&records, &sel, filter, LogSort::default(), req);
            assert!(!ids(&page).contains(&7));
        }
        let page = query_logs(&records, &sel, StatusFilter::All, LogSort::default(), req);
        assert!(ids(&page).contains(&7));
    }

    #[test]
    fn test_empty_selection_is_empty_result() {
        let records = sample();
        let page = query_logs(
            &records,
            &BTreeSet::new(),
            StatusFilter::All,
            LogSort::default(),
            PageRequest::new(10, 0).unwrap(),
        );
        assert!(page.rows.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.page_count, 0);
    }

    #[test]
    fn test_sort_by_latency_ascending() {
        let records = sample();
        let sort = LogSort {
            key: SortKey::ResponseTime,
            direction: SortDirection::Asc,
        };
        let page = query_logs(
            &records,
            &all(&[1, 2, 3, 4]),
            StatusFilter::All,
            sort,
            PageRequest::new(3, 0).unwrap(),
        );
        assert_eq!(ids(&page), vec![4, 7, 1]);
    }

    #[test]
    fn test_absent_status_sorts_first_ascending() {
        let records = sample();
        let sort = LogSort {
            key: SortKey::StatusCode,
            direction: SortDirection::Asc,
        };
        let page = query_logs(
            &records,
            &all(&[1, 2, 3, 4]),
            StatusFilter::All,
            sort,
            PageRequest::new(10, 0).unwrap(),
        );
        assert_eq!(ids(&page), vec![7, 1, 4, 5, 6, 3, 2]);
    }

    #[test]
    fn test_string_sort_is_case_sensitive() {
        let records = vec![
            named_check(1, 1, "beta", "https://b.example", t0()),
            named_check(2, 2, "Alpha", "https://a.example", t0()),
            named_check(3, 3, "alpha", "https://c.example", t0()),
        ];
        let sort = LogSort {
            key: SortKey::EndpointName,
            direction: SortDirection::Asc,
        };
        let page = query_logs(
            &records,
            &all(&[1, 2, 3]),
            StatusFilter::All,
            sort,
            PageRequest::new(10, 0).unwrap(),
        );
        assert_eq!(ids(&page), vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_keep_input_order_both_directions() {
        let records = vec![
            check(1, 1, Some(200), 50, t0()),
            check(2, 1, Some(500), 50, t0()),
            check(3, 1, Some(200), 10, t0()),
            check(4, 1, Some(404), 50, t0()),
        ];
        let sel = all(&[1]);
        let req = PageRequest::new(10, 0).unwrap();

        let asc = LogSort {
            key: SortKey::ResponseTime,
            direction: SortDirection::Asc,
        };
        let desc = LogSort {
            key: SortKey::ResponseTime,
            direction: SortDirection::Desc,
        };
        assert_eq!(
            ids(&query_logs(&records, &sel, StatusFilter::All, asc, req)),
            vec![3, 1, 2, 4]
        );
        assert_eq!(
            ids(&query_logs(&records, &sel, StatusFilter::All, desc, req)),
            vec![1, 2, 4, 3]
        );
    }

    #[test]
    fn test_third_page_of_twenty_five() {
        let records: Vec<_> =
            (0..25).map(|i| check(i, 1, Some(200), 10, t0() + Duration::seconds(i as i64))).collect();
        let page = query_logs(
            &records,
            &all(&[1]),
            StatusFilter::All,
            LogSort::default(),
            PageRequest::new(10, 2).unwrap(),
        );
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.first_row(), 21);
        assert_eq!(page.last_row(), 25);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_past_end_is_empty_with_totals() {
        let records = sample();
        let page = query_logs(
            &records,
            &all(&[1, 2, 3, 4]),
            StatusFilter::All,
            LogSort::default(),
            PageRequest::new(5, 9).unwrap(),
        );
        assert!(page.rows.is_empty());
        assert_eq!(page.total_count, 7);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.first_row(), 0);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(PageRequest::new(0, 0), Err(CoreError::InvalidPageSize(0)));
        let query = LogQuery::new(0);
        assert!(query.run(&sample(), &all(&[1])).is_err());
    }

    #[test]
    fn test_query_empty_selection_means_known() {
        let records = sample();
        let query = LogQuery::default();
        let page = query.run(&records, &all(&[1, 2, 3, 4])).unwrap();
        assert_eq!(page.total_count, 7);

        let mut query = LogQuery::default();
        query.toggle_endpoint(EndpointId(1));
        let page = query.run(&records, &all(&[1, 2, 3, 4])).unwrap();
        assert_eq!(ids(&page), vec![1, 5]);
        assert_eq!(query.selection_label(), "1 Selected");
    }

    #[test]
    fn test_click_sort_toggles_or_switches() {
        let mut query = LogQuery::default();
        query.page_index = 3;

        query.click_sort(SortKey::Timestamp);
        assert_eq!(query.sort.direction, SortDirection::Asc);
        assert_eq!(query.page_index, 0);

        query.click_sort(SortKey::Timestamp);
        assert_eq!(query.sort.direction, SortDirection::Desc);

        query.click_sort(SortKey::StatusCode);
        assert_eq!(query.sort.key, SortKey::StatusCode);
        assert_eq!(query.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_toggle_all() {
        let known = all(&[1, 2]);
        let mut query = LogQuery::default();
        assert_eq!(query.selection_label(), "All Endpoints");

        query.toggle_all(&known);
        assert!(query.all_selected(&known));

        query.toggle_all(&known);
        assert!(query.selected.is_empty());

        query.toggle_endpoint(EndpointId(1));
        query.toggle_all(&known);
        assert_eq!(query.selected, known);
    }

    #[test]
    fn test_paging_bounds() {
        let mut query = LogQuery::default();
        query.prev_page();
        assert_eq!(query.page_index, 0);
        query.next_page(2);
        query.next_page(2);
        assert_eq!(query.page_index, 1);
        query.clamp_page(0);
        assert_eq!(query.page_index, 0);
    }

    fn arb_records() -> impl Strategy<Value = Vec<CheckRecord>> {
        proptest::collection::vec(
            (1u64..4, proptest::option::of(100u16..600), 0u64..5, 0i64..5),
            0..60,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (endpoint, status, latency, minute))| {
                    check(i as u64, endpoint, status, latency, t0() + Duration::minutes(minute))
                })
                .collect()
        })
    }

    fn arb_sort() -> impl Strategy<Value = LogSort> {
        (
            prop_oneof![
                Just(SortKey::Timestamp),
                Just(SortKey::EndpointName),
                Just(SortKey::EndpointUrl),
                Just(SortKey::StatusCode),
                Just(SortKey::ResponseTime),
            ],
            prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)],
        )
            .prop_map(|(key, direction)| LogSort { key, direction })
    }

    fn arb_filter() -> impl Strategy<Value = StatusFilter> {
        prop_oneof![
            Just(StatusFilter::All),
            Just(StatusFilter::Success),
            Just(StatusFilter::ClientError),
            Just(StatusFilter::ServerError),
        ]
    }

    proptest! {
        #[test]
        fn prop_pages_concatenate_to_full_result(
            records in arb_records(),
            sort in arb_sort(),
            filter in arb_filter(),
            size in 1usize..8,
        ) {
            let sel = all(&[1, 2]);
            let everything = query_logs(&records, &sel, filter, sort, PageRequest::new(usize::MAX, 0).unwrap());

            let mut joined = Vec::new();
            let first = query_logs(&records, &sel, filter, sort, PageRequest::new(size, 0).unwrap());
            for index in 0..first.page_count {
                let page = query_logs(&records, &sel, filter, sort, PageRequest::new(size, index).unwrap());
                prop_assert_eq!(page.total_count, everything.total_count);
                joined.extend(page.rows);
            }
            prop_assert_eq!(ids(&everything), joined.iter().map(|r| r.id.0).collect::<Vec<_>>());
        }

        #[test]
        fn prop_idempotent(records in arb_records(), sort in arb_sort(), filter in arb_filter()) {
            let sel = all(&[1, 3]);
            let req = PageRequest::new(7, 1).unwrap();
            prop_assert_eq!(
                query_logs(&records, &sel, filter, sort, req),
                query_logs(&records, &sel, filter, sort, req)
            );
        }

        #[test]
        fn prop_filter_correct(records in arb_records(), filter in arb_filter()) {
            let sel = all(&[1, 2, 3]);
            let page = query_logs(&records, &sel, filter, LogSort::default(), PageRequest::new(100, 0).unwrap());
            for row in &page.rows {
                prop_assert!(filter.matches(row.status_code));
                if filter == StatusFilter::Success {
                    prop_assert!(matches!(row.status_code, Some(200..=299)));
                }
                if filter == StatusFilter::ClientError {
                    prop_assert!(matches!(row.status_code, Some(400..=499)));
                }
            }
        }

        #[test]
        fn prop_sort_stable(records in arb_records(), sort in arb_sort()) {
            let sel = all(&[1, 2, 3]);
            let page = query_logs(&records, &sel, StatusFilter::All, sort, PageRequest::new(100, 0).unwrap());
            // Input ids are ascending, so equal keys must keep ascending ids.
            for pair in page.rows.windows(2) {
                if sort.key.compare(pair[0], pair[1]) == Ordering::Equal {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}

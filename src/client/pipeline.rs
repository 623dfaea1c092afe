//! Pure filter → sort → group pipeline feeding the supervisor's request
//! table. Re-run eagerly whenever its inputs change; the only stateful
//! pieces are the applied-criteria holder and the input-edge debouncer.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use derive_more::Display;
use strum_macros::EnumString;

use crate::model::certification_request::{CertificationRequest, Status};

/// Filter inputs as they arrive from the UI. Empty string means "no
/// constraint"; budget bounds are free-text and only constrain when they
/// parse as numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub employee_name: String,
    pub status: String,
    pub min_budget: String,
    pub max_budget: String,
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum FilterError {
    #[display(fmt = "Minimum budget cannot be greater than maximum budget")]
    MinExceedsMax,
}

impl std::error::Error for FilterError {}

fn parse_budget(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.trim().parse::<f64>().ok()
}

impl FilterCriteria {
    /// Invalid only when both bounds are numeric and min > max.
    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(min), Some(max)) = (
            parse_budget(&self.min_budget),
            parse_budget(&self.max_budget),
        ) {
            if min > max {
                return Err(FilterError::MinExceedsMax);
            }
        }
        Ok(())
    }

    /// All four constraints are conjunctive.
    pub fn matches(&self, request: &CertificationRequest) -> bool {
        if !self.employee_name.is_empty() && request.employee_name != self.employee_name {
            return false;
        }
        if !self.status.is_empty() && request.status.as_str() != self.status {
            return false;
        }
        if let Some(min) = parse_budget(&self.min_budget) {
            if request.estimated_budget < min {
                return false;
            }
        }
        if let Some(max) = parse_budget(&self.max_budget) {
            if request.estimated_budget > max {
                return false;
            }
        }
        true
    }
}

/// Holds the criteria currently applied to the view. An invalid update is
/// rejected and the prior criteria stay in force, so the table never loses
/// its last valid filter state.
#[derive(Debug, Default)]
pub struct FilterState {
    applied: FilterCriteria,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> &FilterCriteria {
        &self.applied
    }

    pub fn try_apply(&mut self, next: FilterCriteria) -> Result<(), FilterError> {
        next.validate()?;
        self.applied = next;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.applied = FilterCriteria::default();
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumString)]
pub enum SortField {
    #[strum(serialize = "estimatedBudget")]
    EstimatedBudget,
    #[strum(serialize = "expectedDate")]
    ExpectedDate,
    #[strum(serialize = "employeeName")]
    EmployeeName,
    #[strum(serialize = "description")]
    Description,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortKey {
    fn default() -> Self {
        Self {
            field: SortField::ExpectedDate,
            direction: SortDirection::Asc,
        }
    }
}

impl SortKey {
    /// Re-selecting the active field toggles direction; a new field resets
    /// to ascending.
    pub fn toggled(self, field: SortField) -> Self {
        if field == self.field {
            let direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
            Self { field, direction }
        } else {
            Self {
                field,
                direction: SortDirection::Asc,
            }
        }
    }
}

/// One status bucket in fixed display order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusGroup {
    pub status: Status,
    pub requests: Vec<CertificationRequest>,
}

/// Grouped view model consumed by the table renderer. An entirely empty
/// result collapses to a single no-matches state instead of four empty
/// groups.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupedView {
    NoMatches,
    Groups(Vec<StatusGroup>),
}

pub fn filter(
    requests: &[CertificationRequest],
    criteria: &FilterCriteria,
) -> Vec<CertificationRequest> {
    requests
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

fn cmp_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable sort: equal keys keep their relative input order, so repeated
/// re-renders never visibly reorder equal-valued rows.
pub fn sort(requests: &mut [CertificationRequest], key: SortKey) {
    requests.sort_by(|a, b| {
        let ordering = match key.field {
            SortField::EstimatedBudget => a.estimated_budget.total_cmp(&b.estimated_budget),
            SortField::ExpectedDate => a.expected_date.cmp(&b.expected_date),
            SortField::EmployeeName => cmp_case_insensitive(&a.employee_name, &b.employee_name),
            SortField::Description => cmp_case_insensitive(&a.description, &b.description),
        };
        match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Partition into the four fixed-order status buckets, preserving the
/// incoming (already sorted) order inside each bucket.
pub fn group(requests: Vec<CertificationRequest>) -> GroupedView {
    if requests.is_empty() {
        return GroupedView::NoMatches;
    }

    let mut groups: Vec<StatusGroup> = Status::ORDER
        .iter()
        .map(|status| StatusGroup {
            status: *status,
            requests: Vec::new(),
        })
        .collect();

    for request in requests {
        let idx = Status::ORDER
            .iter()
            .position(|s| *s == request.status)
            .expect("status is in the fixed order table");
        groups[idx].requests.push(request);
    }

    GroupedView::Groups(groups)
}

/// The whole pipeline: filter, stable-sort, group.
pub fn build_view(
    requests: &[CertificationRequest],
    criteria: &FilterCriteria,
    key: SortKey,
) -> GroupedView {
    let mut rows = filter(requests, criteria);
    sort(&mut rows, key);
    group(rows)
}

/// Unique employee names in first-seen order, for the filter dropdown.
pub fn employee_names(requests: &[CertificationRequest]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for request in requests {
        if !names.contains(&request.employee_name) {
            names.push(request.employee_name.clone());
        }
    }
    names
}

/// Poll-based debounce for the filter-input edge: criteria only fire once
/// the input has been quiet for the delay (300ms by default).
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(FilterCriteria, Instant)>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records a keystroke-edge change, restarting the quiet period.
    pub fn submit(&mut self, criteria: FilterCriteria, now: Instant) {
        self.pending = Some((criteria, now));
    }

    /// Returns the pending criteria once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<FilterCriteria> {
        match &self.pending {
            Some((_, at)) if now.duration_since(*at) >= self.delay => {
                self.pending.take().map(|(criteria, _)| criteria)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn request(
        id: i64,
        name: &str,
        budget: f64,
        date: &str,
        status: Status,
    ) -> CertificationRequest {
        CertificationRequest {
            id,
            employee_id: 1,
            employee_name: name.into(),
            description: format!("cert {id}"),
            estimated_budget: budget,
            expected_date: date.parse().unwrap(),
            status,
        }
    }

    fn sample() -> Vec<CertificationRequest> {
        vec![
            request(1, "Alice", 300.0, "2026-10-01", Status::Submitted),
            request(2, "Bob", 500.0, "2026-09-01", Status::Approved),
            request(3, "Alice", 150.0, "2026-11-01", Status::Submitted),
            request(4, "Carol", 500.0, "2026-08-30", Status::Rejected),
            request(5, "bob", 70.0, "2026-12-01", Status::Draft),
        ]
    }

    fn criteria(name: &str, status: &str, min: &str, max: &str) -> FilterCriteria {
        FilterCriteria {
            employee_name: name.into(),
            status: status.into(),
            min_budget: min.into(),
            max_budget: max.into(),
        }
    }

    #[test]
    fn empty_criteria_keep_everything() {
        let rows = filter(&sample(), &FilterCriteria::default());
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn all_constraints_are_conjunctive() {
        let rows = filter(&sample(), &criteria("Alice", "submitted", "200", ""));
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn status_filter_returns_exactly_that_subset() {
        let rows = filter(&sample(), &criteria("", "submitted", "", ""));
        assert!(rows.iter().all(|r| r.status == Status::Submitted));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn budget_bounds_are_inclusive() {
        let rows = filter(&sample(), &criteria("", "", "150", "500"));
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn non_numeric_budget_strings_impose_no_constraint() {
        let rows = filter(&sample(), &criteria("", "", "abc", ""));
        assert_eq!(rows.len(), 5);
        // Validation treats them the same way
        assert_eq!(criteria("", "", "abc", "10").validate(), Ok(()));
    }

    #[test]
    fn min_greater_than_max_is_invalid() {
        assert_eq!(
            criteria("", "", "500", "100").validate(),
            Err(FilterError::MinExceedsMax)
        );
        assert_eq!(criteria("", "", "100", "100").validate(), Ok(()));
    }

    #[test]
    fn rejected_update_keeps_the_prior_criteria() {
        let mut state = FilterState::new();
        state.try_apply(criteria("Alice", "", "", "")).unwrap();

        let err = state.try_apply(criteria("Bob", "", "500", "100"));
        assert_eq!(err, Err(FilterError::MinExceedsMax));
        // Prior valid state survives
        assert_eq!(state.applied().employee_name, "Alice");

        state.reset();
        assert_eq!(state.applied(), &FilterCriteria::default());
    }

    #[test]
    fn default_sort_is_expected_date_ascending() {
        let mut rows = sample();
        sort(&mut rows, SortKey::default());
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3, 5]);
    }

    #[test]
    fn descending_reverses_distinct_keys_exactly() {
        let mut asc = sample();
        sort(
            &mut asc,
            SortKey {
                field: SortField::ExpectedDate,
                direction: SortDirection::Asc,
            },
        );
        let mut desc = sample();
        sort(
            &mut desc,
            SortKey {
                field: SortField::ExpectedDate,
                direction: SortDirection::Desc,
            },
        );
        let mut reversed: Vec<i64> = asc.iter().map(|r| r.id).collect();
        reversed.reverse();
        assert_eq!(desc.iter().map(|r| r.id).collect::<Vec<_>>(), reversed);
    }

    #[test]
    fn equal_keys_keep_relative_input_order_in_both_directions() {
        // ids 2 and 4 share budget 500.0
        let mut asc = sample();
        sort(
            &mut asc,
            SortKey {
                field: SortField::EstimatedBudget,
                direction: SortDirection::Asc,
            },
        );
        let asc_ids: Vec<i64> = asc.iter().map(|r| r.id).collect();
        assert_eq!(asc_ids, vec![5, 3, 1, 2, 4]);

        let mut desc = sample();
        sort(
            &mut desc,
            SortKey {
                field: SortField::EstimatedBudget,
                direction: SortDirection::Desc,
            },
        );
        let desc_ids: Vec<i64> = desc.iter().map(|r| r.id).collect();
        // 2 still precedes 4: ties are never reordered
        assert_eq!(desc_ids, vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let mut rows = sample();
        sort(
            &mut rows,
            SortKey {
                field: SortField::EmployeeName,
                direction: SortDirection::Asc,
            },
        );
        let names: Vec<&str> = rows.iter().map(|r| r.employee_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Alice", "Bob", "bob", "Carol"]);
    }

    #[test]
    fn toggling_flips_direction_only_on_the_same_field() {
        let key = SortKey::default();
        let toggled = key.toggled(SortField::ExpectedDate);
        assert_eq!(toggled.direction, SortDirection::Desc);
        assert_eq!(
            toggled.toggled(SortField::ExpectedDate).direction,
            SortDirection::Asc
        );

        let switched = toggled.toggled(SortField::EstimatedBudget);
        assert_eq!(switched.field, SortField::EstimatedBudget);
        assert_eq!(switched.direction, SortDirection::Asc);
    }

    #[test]
    fn sort_fields_parse_from_their_wire_names() {
        assert_eq!(
            SortField::from_str("estimatedBudget").unwrap(),
            SortField::EstimatedBudget
        );
        assert_eq!(
            SortField::from_str("employeeName").unwrap(),
            SortField::EmployeeName
        );
        assert!(SortField::from_str("id").is_err());
    }

    #[test]
    fn groups_partition_the_filtered_set_exactly_once_each() {
        let view = build_view(&sample(), &FilterCriteria::default(), SortKey::default());
        let GroupedView::Groups(groups) = view else {
            panic!("expected groups");
        };
        assert_eq!(groups.len(), 4);
        assert_eq!(
            groups.iter().map(|g| g.status).collect::<Vec<_>>(),
            Status::ORDER.to_vec()
        );
        // Union of the buckets is the whole set, each row exactly once
        let mut ids: Vec<i64> = groups
            .iter()
            .flat_map(|g| g.requests.iter().map(|r| r.id))
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        // Every bucket only holds its own status
        for g in &groups {
            assert!(g.requests.iter().all(|r| r.status == g.status));
        }
    }

    #[test]
    fn empty_buckets_are_still_represented() {
        let rows = vec![request(1, "Alice", 300.0, "2026-10-01", Status::Submitted)];
        let GroupedView::Groups(groups) =
            build_view(&rows, &FilterCriteria::default(), SortKey::default())
        else {
            panic!("expected groups");
        };
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[1].requests.len(), 1);
        assert!(groups[0].requests.is_empty());
        assert!(groups[2].requests.is_empty());
        assert!(groups[3].requests.is_empty());
    }

    #[test]
    fn fully_empty_result_is_a_single_no_matches_state() {
        let view = build_view(
            &sample(),
            &criteria("Nobody", "", "", ""),
            SortKey::default(),
        );
        assert_eq!(view, GroupedView::NoMatches);
        assert_eq!(build_view(&[], &FilterCriteria::default(), SortKey::default()), GroupedView::NoMatches);
    }

    #[test]
    fn groups_preserve_intra_bucket_sort_order() {
        let GroupedView::Groups(groups) = build_view(
            &sample(),
            &FilterCriteria::default(),
            SortKey {
                field: SortField::EstimatedBudget,
                direction: SortDirection::Asc,
            },
        ) else {
            panic!("expected groups");
        };
        let submitted: Vec<i64> = groups[1].requests.iter().map(|r| r.id).collect();
        assert_eq!(submitted, vec![3, 1]);
    }

    #[test]
    fn employee_names_are_unique_in_first_seen_order() {
        assert_eq!(
            employee_names(&sample()),
            vec!["Alice", "Bob", "Carol", "bob"]
        );
    }

    #[test]
    fn debouncer_fires_only_after_the_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let t0 = Instant::now();

        debouncer.submit(criteria("Alice", "", "", ""), t0);
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(100)), None);

        // A second keystroke restarts the window
        debouncer.submit(criteria("Bob", "", "", ""), t0 + Duration::from_millis(200));
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(400)), None);

        let fired = debouncer.poll(t0 + Duration::from_millis(500));
        assert_eq!(fired.unwrap().employee_name, "Bob");
        // Nothing left pending afterwards
        assert_eq!(debouncer.poll(t0 + Duration::from_secs(1)), None);
    }
}

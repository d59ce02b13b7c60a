use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{InstanceStatus, RepeatType, Task, TaskInstance};

/// Inclusive calendar date range over which occurrences are requested.
///
/// A window where `end` precedes `start` is valid to construct and selects
/// no dates; [`expand`] returns an empty list for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window selecting exactly one day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    /// Seven-day window beginning at `start`.
    pub fn week_from(start: NaiveDate) -> Self {
        Self {
            start,
            end: start + Days::new(6),
        }
    }

    /// First to last day of the month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap();
        Self {
            start: first,
            end: first + Months::new(1) - Days::new(1),
        }
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True when the window selects no dates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// One concrete calendar-dated occurrence of a task, merged with any
/// persisted completion override.
///
/// Occurrences are computed fresh on every expansion, carry no identity
/// beyond the call that produced them, and are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    /// The source task definition, carried through unchanged.
    pub task: Task,
    /// The concrete date this occurrence falls on.
    pub instance_date: NaiveDate,
    /// Id of the matching [`TaskInstance`] override, if one exists.
    pub instance_id: Option<Uuid>,
    /// Completion state, `Pending` unless an override says otherwise.
    pub instance_status: InstanceStatus,
    /// Completion timestamp from the override, if present.
    pub instance_completed_at: Option<DateTime<Utc>>,
}

impl Occurrence {
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.instance_status == InstanceStatus::Completed
    }
}

/// Date of the `n`-th occurrence (0-based) counted from `start`.
///
/// Monthly steps are computed from `start` rather than from the previous
/// occurrence, so the day-of-month is preserved wherever the target month
/// has it: stepping monthly from Jan 31 yields Feb 29 (clamped to the last
/// day of the shorter month) and then Mar 31 again, instead of drifting to
/// the 28th/29th for good.
///
/// Returns `None` past the end of the calendar, which callers treat as
/// exhaustion.
fn nth_occurrence(start: NaiveDate, repeat: RepeatType, interval: u32, n: u32) -> Option<NaiveDate> {
    let steps = u64::from(n) * u64::from(interval);
    match repeat {
        RepeatType::None => (n == 0).then_some(start),
        RepeatType::Daily => start.checked_add_days(Days::new(steps)),
        RepeatType::Weekly => start.checked_add_days(Days::new(steps * 7)),
        RepeatType::Monthly => start.checked_add_months(Months::new(u32::try_from(steps).ok()?)),
    }
}

fn merge_occurrence(
    task: &Task,
    date: NaiveDate,
    overrides: &HashMap<(Uuid, NaiveDate), &TaskInstance>,
) -> Occurrence {
    match overrides.get(&(task.id, date)) {
        Some(inst) => Occurrence {
            task: task.clone(),
            instance_date: date,
            instance_id: Some(inst.id),
            instance_status: inst.status,
            instance_completed_at: inst.completed_at,
        },
        None => Occurrence {
            task: task.clone(),
            instance_date: date,
            instance_id: None,
            instance_status: InstanceStatus::Pending,
            instance_completed_at: None,
        },
    }
}

/// Expands task definitions into the concrete occurrences falling inside
/// `window`, merging in persisted per-occurrence overrides.
///
/// # Arguments
/// * `tasks` - Snapshot of task definitions
/// * `overrides` - Snapshot of per-occurrence completion overrides
/// * `window` - Inclusive date range to expand over
///
/// # Behavior
/// - Non-recurring tasks contribute one occurrence when their due date lies
///   inside the window; undated non-recurring tasks contribute nothing.
/// - Recurring tasks enumerate from `max(due_date, window.start)` (an
///   undated recurring task anchors to the window start), stepping daily by
///   `interval` days, weekly by `7 × interval` days, and monthly by
///   `interval` calendar months, until past the window end. Intervals below
///   1 are clamped to 1 so enumeration always terminates.
/// - Each emitted occurrence is merged with the override keyed by
///   `(task_id, date)` when one exists; otherwise it defaults to pending.
///   Overrides that match no task are ignored.
/// - The result is sorted ascending by date; the sort is stable, so
///   same-date occurrences keep their generation order.
///
/// Pure function of its inputs: no I/O, no shared state, deterministic. A
/// reversed window yields an empty list.
pub fn expand(tasks: &[Task], overrides: &[TaskInstance], window: &DateWindow) -> Vec<Occurrence> {
    if window.is_empty() {
        return Vec::new();
    }

    // Override lookup keyed by (task, date) for O(1) merge during generation.
    let mut override_map: HashMap<(Uuid, NaiveDate), &TaskInstance> =
        HashMap::with_capacity(overrides.len());
    for inst in overrides {
        override_map.insert((inst.task_id, inst.instance_date), inst);
    }

    let mut occurrences = Vec::new();
    for task in tasks {
        if !task.repeat_type.is_recurring() {
            if let Some(due) = task.due_date {
                if window.contains(due) {
                    occurrences.push(merge_occurrence(task, due, &override_map));
                }
            }
            continue;
        }

        let anchor = task.due_date.unwrap_or(window.start);
        let first = anchor.max(window.start);
        let interval = task.effective_interval();
        for n in 0u32.. {
            let Some(date) = nth_occurrence(first, task.repeat_type, interval, n) else {
                break;
            };
            if date > window.end {
                break;
            }
            occurrences.push(merge_occurrence(task, date, &override_map));
        }
    }

    occurrences.sort_by_key(|o| o.instance_date);
    occurrences
}

/// Occurrences landing on a single day.
pub fn occurrences_for_date(
    tasks: &[Task],
    overrides: &[TaskInstance],
    date: NaiveDate,
) -> Vec<Occurrence> {
    expand(tasks, overrides, &DateWindow::single_day(date))
}

/// Occurrences in the seven days beginning at `week_start`.
pub fn occurrences_for_week(
    tasks: &[Task],
    overrides: &[TaskInstance],
    week_start: NaiveDate,
) -> Vec<Occurrence> {
    expand(tasks, overrides, &DateWindow::week_from(week_start))
}

/// Occurrences in the calendar month containing `date`.
pub fn occurrences_for_month(
    tasks: &[Task],
    overrides: &[TaskInstance],
    date: NaiveDate,
) -> Vec<Occurrence> {
    expand(tasks, overrides, &DateWindow::month_of(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstanceStatus, RepeatType, Task, TaskInstance};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn one_off(due: Option<NaiveDate>) -> Task {
        Task {
            title: "One-off".to_string(),
            due_date: due,
            ..Task::default()
        }
    }

    fn recurring(repeat: RepeatType, interval: i64, due: Option<NaiveDate>) -> Task {
        Task {
            title: format!("{repeat} task"),
            due_date: due,
            repeat_type: repeat,
            repeat_interval: Some(interval),
            ..Task::default()
        }
    }

    fn override_for(task: &Task, on: NaiveDate, status: InstanceStatus) -> TaskInstance {
        TaskInstance {
            id: Uuid::now_v7(),
            task_id: task.id,
            instance_date: on,
            status,
            completed_at: (status == InstanceStatus::Completed).then(Utc::now),
            created_at: Utc::now(),
        }
    }

    fn dates(occurrences: &[Occurrence]) -> Vec<NaiveDate> {
        occurrences.iter().map(|o| o.instance_date).collect()
    }

    mod window_tests {
        use super::*;

        #[test]
        fn single_day_contains_only_that_day() {
            let w = DateWindow::single_day(date(2024, 3, 5));
            assert!(w.contains(date(2024, 3, 5)));
            assert!(!w.contains(date(2024, 3, 4)));
            assert!(!w.contains(date(2024, 3, 6)));
            assert!(!w.is_empty());
        }

        #[test]
        fn week_spans_seven_days() {
            let w = DateWindow::week_from(date(2024, 3, 4));
            assert_eq!(w.start, date(2024, 3, 4));
            assert_eq!(w.end, date(2024, 3, 10));
        }

        #[test]
        fn month_of_covers_first_to_last_day() {
            let w = DateWindow::month_of(date(2024, 2, 14));
            assert_eq!(w.start, date(2024, 2, 1));
            assert_eq!(w.end, date(2024, 2, 29)); // leap year

            let w = DateWindow::month_of(date(2023, 2, 14));
            assert_eq!(w.end, date(2023, 2, 28));

            let w = DateWindow::month_of(date(2024, 12, 31));
            assert_eq!(w.start, date(2024, 12, 1));
            assert_eq!(w.end, date(2024, 12, 31));
        }

        #[test]
        fn reversed_window_is_empty() {
            let w = DateWindow::new(date(2024, 3, 10), date(2024, 3, 1));
            assert!(w.is_empty());
            assert!(!w.contains(date(2024, 3, 5)));
        }
    }

    mod cadence_tests {
        use super::*;
        use rstest::rstest;

        #[rstest]
        #[case(RepeatType::Daily, 1, 3, date(2024, 3, 4))]
        #[case(RepeatType::Daily, 2, 3, date(2024, 3, 7))]
        #[case(RepeatType::Weekly, 1, 2, date(2024, 3, 15))]
        #[case(RepeatType::Weekly, 2, 1, date(2024, 3, 15))]
        #[case(RepeatType::Monthly, 1, 2, date(2024, 5, 1))]
        #[case(RepeatType::Monthly, 3, 1, date(2024, 6, 1))]
        fn nth_steps_by_cadence(
            #[case] repeat: RepeatType,
            #[case] interval: u32,
            #[case] n: u32,
            #[case] expected: NaiveDate,
        ) {
            let start = date(2024, 3, 1);
            assert_eq!(nth_occurrence(start, repeat, interval, n), Some(expected));
        }

        #[test]
        fn monthly_clamps_to_shorter_months_without_drifting() {
            let start = date(2024, 1, 31);
            let got: Vec<_> = (0..4)
                .map(|n| nth_occurrence(start, RepeatType::Monthly, 1, n).unwrap())
                .collect();
            assert_eq!(
                got,
                vec![
                    date(2024, 1, 31),
                    date(2024, 2, 29), // clamped, leap year
                    date(2024, 3, 31), // day-of-month restored
                    date(2024, 4, 30),
                ]
            );

            let got: Vec<_> = (0..3)
                .map(|n| nth_occurrence(date(2023, 1, 31), RepeatType::Monthly, 1, n).unwrap())
                .collect();
            assert_eq!(
                got,
                vec![date(2023, 1, 31), date(2023, 2, 28), date(2023, 3, 31)]
            );
        }

        #[test]
        fn non_recurring_yields_only_the_start() {
            let start = date(2024, 3, 1);
            assert_eq!(nth_occurrence(start, RepeatType::None, 1, 0), Some(start));
            assert_eq!(nth_occurrence(start, RepeatType::None, 1, 1), None);
        }
    }

    mod expansion_tests {
        use super::*;

        #[test]
        fn one_off_task_appears_inside_its_window_only() {
            let task = one_off(Some(date(2024, 3, 10)));
            let march = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31));
            let april = DateWindow::new(date(2024, 4, 1), date(2024, 4, 30));

            let result = expand(&[task.clone()], &[], &march);
            assert_eq!(dates(&result), vec![date(2024, 3, 10)]);
            assert_eq!(result[0].instance_status, InstanceStatus::Pending);
            assert!(result[0].instance_id.is_none());

            assert!(expand(&[task], &[], &april).is_empty());
        }

        #[test]
        fn undated_one_off_task_never_appears() {
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31));
            assert!(expand(&[one_off(None)], &[], &window).is_empty());
        }

        #[test]
        fn daily_cadence_with_interval() {
            let task = recurring(RepeatType::Daily, 2, Some(date(2024, 3, 1)));
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 7));
            let result = expand(&[task], &[], &window);
            assert_eq!(
                dates(&result),
                vec![
                    date(2024, 3, 1),
                    date(2024, 3, 3),
                    date(2024, 3, 5),
                    date(2024, 3, 7),
                ]
            );
        }

        #[test]
        fn weekly_cadence_steps_seven_days() {
            let task = recurring(RepeatType::Weekly, 1, Some(date(2024, 3, 1)));
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 21));
            let result = expand(&[task], &[], &window);
            assert_eq!(
                dates(&result),
                vec![date(2024, 3, 1), date(2024, 3, 8), date(2024, 3, 15)]
            );
        }

        #[test]
        fn monthly_cadence_clamps_february() {
            let task = recurring(RepeatType::Monthly, 1, Some(date(2024, 1, 31)));
            let window = DateWindow::new(date(2024, 1, 1), date(2024, 4, 30));
            let result = expand(&[task], &[], &window);
            assert_eq!(
                dates(&result),
                vec![
                    date(2024, 1, 31),
                    date(2024, 2, 29),
                    date(2024, 3, 31),
                    date(2024, 4, 30),
                ]
            );
        }

        #[test]
        fn anchor_before_window_enumerates_from_window_start() {
            let task = recurring(RepeatType::Daily, 2, Some(date(2024, 2, 1)));
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 5));
            let result = expand(&[task], &[], &window);
            assert_eq!(
                dates(&result),
                vec![date(2024, 3, 1), date(2024, 3, 3), date(2024, 3, 5)]
            );
        }

        #[test]
        fn anchor_after_window_yields_nothing() {
            let task = recurring(RepeatType::Daily, 1, Some(date(2024, 4, 1)));
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31));
            assert!(expand(&[task], &[], &window).is_empty());
        }

        #[test]
        fn override_merges_onto_matching_occurrence_only() {
            let task = recurring(RepeatType::Daily, 2, Some(date(2024, 3, 1)));
            let done = override_for(&task, date(2024, 3, 3), InstanceStatus::Completed);
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 7));

            let result = expand(&[task], &[done.clone()], &window);
            assert_eq!(result.len(), 4);
            for occ in &result {
                if occ.instance_date == date(2024, 3, 3) {
                    assert_eq!(occ.instance_status, InstanceStatus::Completed);
                    assert_eq!(occ.instance_id, Some(done.id));
                    assert!(occ.instance_completed_at.is_some());
                } else {
                    assert_eq!(occ.instance_status, InstanceStatus::Pending);
                    assert!(occ.instance_id.is_none());
                    assert!(occ.instance_completed_at.is_none());
                }
            }
        }

        #[test]
        fn override_merges_onto_one_off_task() {
            let task = one_off(Some(date(2024, 3, 10)));
            let done = override_for(&task, date(2024, 3, 10), InstanceStatus::Completed);
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31));

            let result = expand(&[task], &[done], &window);
            assert_eq!(result.len(), 1);
            assert!(result[0].is_completed());
        }

        #[test]
        fn orphan_override_is_ignored() {
            let task = recurring(RepeatType::Daily, 1, Some(date(2024, 3, 1)));
            let mut orphan = override_for(&task, date(2024, 3, 2), InstanceStatus::Completed);
            orphan.task_id = Uuid::now_v7();
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 3));

            let result = expand(&[task], &[orphan], &window);
            assert_eq!(result.len(), 3);
            assert!(result.iter().all(|o| !o.is_completed()));
        }

        #[test]
        fn output_is_sorted_across_tasks() {
            let a = recurring(RepeatType::Weekly, 1, Some(date(2024, 3, 2)));
            let b = recurring(RepeatType::Daily, 3, Some(date(2024, 3, 1)));
            let c = one_off(Some(date(2024, 3, 5)));
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 14));

            let result = expand(&[a, b, c], &[], &window);
            let got = dates(&result);
            let mut sorted = got.clone();
            sorted.sort();
            assert_eq!(got, sorted);
        }

        #[test]
        fn same_date_occurrences_keep_generation_order() {
            let first = one_off(Some(date(2024, 3, 5)));
            let second = one_off(Some(date(2024, 3, 5)));
            let window = DateWindow::single_day(date(2024, 3, 5));

            let result = expand(&[first.clone(), second.clone()], &[], &window);
            assert_eq!(result.len(), 2);
            assert_eq!(result[0].task.id, first.id);
            assert_eq!(result[1].task.id, second.id);
        }

        #[test]
        fn zero_duration_window_selects_one_day() {
            let task = recurring(RepeatType::Daily, 1, Some(date(2024, 3, 1)));
            let result = expand(&[task], &[], &DateWindow::single_day(date(2024, 3, 5)));
            assert_eq!(dates(&result), vec![date(2024, 3, 5)]);
        }

        #[test]
        fn undated_recurring_task_anchors_to_window_start() {
            let task = recurring(RepeatType::Daily, 1, None);
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 3));
            let result = expand(&[task], &[], &window);
            assert_eq!(
                dates(&result),
                vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3)]
            );
        }

        #[test]
        fn zero_interval_is_clamped_and_terminates() {
            let task = recurring(RepeatType::Daily, 0, Some(date(2024, 3, 1)));
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 3));
            let result = expand(&[task], &[], &window);
            assert_eq!(result.len(), 3);

            let task = recurring(RepeatType::Weekly, -4, Some(date(2024, 3, 1)));
            let result = expand(&[task], &[], &window);
            assert_eq!(dates(&result), vec![date(2024, 3, 1)]);
        }

        #[test]
        fn reversed_window_returns_empty() {
            let task = recurring(RepeatType::Daily, 1, Some(date(2024, 3, 1)));
            let window = DateWindow::new(date(2024, 3, 10), date(2024, 3, 1));
            assert!(expand(&[task], &[], &window).is_empty());
        }

        #[test]
        fn expansion_is_idempotent() {
            let tasks = vec![
                recurring(RepeatType::Daily, 2, Some(date(2024, 3, 1))),
                recurring(RepeatType::Monthly, 1, Some(date(2024, 1, 31))),
                one_off(Some(date(2024, 3, 10))),
            ];
            let overrides = vec![override_for(
                &tasks[0],
                date(2024, 3, 3),
                InstanceStatus::Completed,
            )];
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31));

            let first = expand(&tasks, &overrides, &window);
            let second = expand(&tasks, &overrides, &window);
            assert_eq!(first, second);
        }

        #[test]
        fn bad_task_does_not_suppress_others() {
            let broken = Task {
                repeat_type: RepeatType::Daily,
                repeat_interval: Some(-1),
                due_date: None,
                ..Task::default()
            };
            let fine = one_off(Some(date(2024, 3, 2)));
            let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 3));

            let result = expand(&[broken, fine], &[], &window);
            assert!(result
                .iter()
                .any(|o| o.instance_date == date(2024, 3, 2) && !o.task.repeat_type.is_recurring()));
        }
    }

    mod view_helper_tests {
        use super::*;

        #[test]
        fn for_date_is_a_single_day_expansion() {
            let task = recurring(RepeatType::Daily, 1, Some(date(2024, 3, 1)));
            let result = occurrences_for_date(&[task], &[], date(2024, 3, 5));
            assert_eq!(dates(&result), vec![date(2024, 3, 5)]);
        }

        #[test]
        fn for_week_covers_seven_days() {
            let task = recurring(RepeatType::Daily, 1, Some(date(2024, 3, 1)));
            let result = occurrences_for_week(&[task], &[], date(2024, 3, 4));
            assert_eq!(result.len(), 7);
            assert_eq!(result.first().unwrap().instance_date, date(2024, 3, 4));
            assert_eq!(result.last().unwrap().instance_date, date(2024, 3, 10));
        }

        #[test]
        fn for_month_covers_the_whole_month() {
            let task = recurring(RepeatType::Weekly, 1, Some(date(2024, 2, 5)));
            let result = occurrences_for_month(&[task], &[], date(2024, 2, 14));
            assert_eq!(
                dates(&result),
                vec![
                    date(2024, 2, 5),
                    date(2024, 2, 12),
                    date(2024, 2, 19),
                    date(2024, 2, 26),
                ]
            );
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn base() -> NaiveDate {
            date(2024, 1, 1)
        }

        fn arb_task() -> impl Strategy<Value = Task> {
            (
                proptest::option::of(0i64..120),
                prop_oneof![
                    Just(RepeatType::None),
                    Just(RepeatType::Daily),
                    Just(RepeatType::Weekly),
                    Just(RepeatType::Monthly),
                ],
                proptest::option::of(-3i64..6),
            )
                .prop_map(|(due_offset, repeat, interval)| Task {
                    title: "prop task".to_string(),
                    due_date: due_offset.map(|d| base() + Days::new(d as u64)),
                    repeat_type: repeat,
                    repeat_interval: interval,
                    ..Task::default()
                })
        }

        fn arb_window() -> impl Strategy<Value = DateWindow> {
            (0i64..120, -5i64..45).prop_map(|(start_offset, len)| {
                let start = base() + Days::new(start_offset as u64);
                let end = if len < 0 {
                    start - Days::new(len.unsigned_abs())
                } else {
                    start + Days::new(len as u64)
                };
                DateWindow::new(start, end)
            })
        }

        proptest! {
            #[test]
            fn expansion_is_deterministic(
                tasks in proptest::collection::vec(arb_task(), 0..8),
                window in arb_window(),
            ) {
                let first = expand(&tasks, &[], &window);
                let second = expand(&tasks, &[], &window);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn occurrences_stay_inside_the_window(
                tasks in proptest::collection::vec(arb_task(), 0..8),
                window in arb_window(),
            ) {
                let result = expand(&tasks, &[], &window);
                for occ in &result {
                    prop_assert!(window.contains(occ.instance_date));
                }
            }

            #[test]
            fn output_is_non_decreasing_by_date(
                tasks in proptest::collection::vec(arb_task(), 0..8),
                window in arb_window(),
            ) {
                let result = expand(&tasks, &[], &window);
                for pair in result.windows(2) {
                    prop_assert!(pair[0].instance_date <= pair[1].instance_date);
                }
            }

            #[test]
            fn daily_occurrence_count_is_bounded_by_window_length(
                interval in -2i64..5,
                window in arb_window(),
            ) {
                let task = Task {
                    due_date: None,
                    repeat_type: RepeatType::Daily,
                    repeat_interval: Some(interval),
                    ..Task::default()
                };
                let result = expand(&[task], &[], &window);
                let days = if window.is_empty() {
                    0
                } else {
                    (window.end - window.start).num_days() + 1
                };
                prop_assert!(result.len() as i64 <= days);
            }
        }
    }
}

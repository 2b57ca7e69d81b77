//! Pure leave/exchange submission rules: day counting, the leave-type
//! catalog, and pre-persistence validation. No I/O lives here; the one check
//! that needs the database (partner day status) is performed by the request
//! handler and reported through [`ValidationError::PartnerNotOff`].

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::model::policy::LeaveTypeDef;
use crate::model::schedule::{DayStatus, WorkSchedule};
use crate::model::template::WorkScheduleTemplate;

pub const EXCHANGE_TYPE: &str = "Exchange Off Days";
pub const SICK_TYPE: &str = "Sick Leave";

/// Hard cap on sick leave, applied regardless of the catalog's configured max.
pub const SICK_LEAVE_MAX_DAYS: i64 = 1;

fn def(
    value: &str,
    label: &str,
    max_days: i64,
    paid: bool,
    description: &str,
) -> LeaveTypeDef {
    LeaveTypeDef {
        value: value.to_string(),
        label: label.to_string(),
        max_days,
        paid,
        description: Some(description.to_string()),
        requires_coverage: true,
        is_exchange: false,
    }
}

/// Built-in catalog, used whenever no policy is published. A published
/// policy's `leaveTypes` replaces this wholesale.
pub static BUILTIN_CATALOG: Lazy<Vec<LeaveTypeDef>> = Lazy::new(|| {
    let mut types = vec![
        def("Annual Leave", "Annual Leave", 14, true, "Paid vacation time"),
        def(
            SICK_TYPE,
            "Sick Leave",
            1,
            true,
            "Paid sick day (1 day maximum per request)",
        ),
        def("Emergency Leave", "Emergency Leave", 3, false, "Unpaid emergency leave"),
        def("Personal Leave", "Personal Day", 1, false, "Unpaid personal day"),
        def("Maternity Leave", "Maternity Leave", 70, false, "Unpaid maternity leave"),
        def("Paternity Leave", "Paternity Leave", 7, false, "Unpaid paternity leave"),
        def("Bereavement Leave", "Bereavement Leave", 5, false, "Unpaid bereavement leave"),
        def("Religious Leave", "Religious Leave", 2, false, "Unpaid religious observance"),
        def("Compensatory Time", "Comp Time", 3, false, "Unpaid compensation time"),
        def("Unpaid Leave", "Unpaid Leave", 30, false, "Unpaid leave"),
    ];
    types.push(LeaveTypeDef {
        value: EXCHANGE_TYPE.to_string(),
        label: EXCHANGE_TYPE.to_string(),
        max_days: 1,
        paid: false,
        description: Some("Exchange scheduled off days with other days".to_string()),
        requires_coverage: false,
        is_exchange: true,
    });
    types
});

pub fn find_type<'a>(catalog: &'a [LeaveTypeDef], value: &str) -> Option<&'a LeaveTypeDef> {
    catalog.iter().find(|t| t.value == value)
}

/// Inclusive day count between two dates; 0 when either is missing,
/// order-independent otherwise.
pub fn calculate_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> i64 {
    match (start, end) {
        (Some(start), Some(end)) => (end - start).num_days().abs() + 1,
        _ => 0,
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Unknown leave type: {0}")]
    UnknownType(String),
    #[error(
        "Sick leave cannot exceed 1 day per request. For longer illnesses, \
         please submit multiple single-day requests."
    )]
    SickLeaveTooLong,
    #[error("{label} cannot exceed {max_days} days per request")]
    ExceedsMaxDays { label: String, max_days: i64 },
    #[error("Please nominate a coverage partner for {0}")]
    CoverageRequired(String),
    #[error("Exchange requests must cover exactly one day")]
    ExchangeNotSingleDay,
    #[error("Please select an exchange partner")]
    ExchangePartnerMissing,
    #[error("Please provide a reason for the exchange")]
    ExchangeReasonMissing,
    #[error("The partner's desired off day must differ from the requested date")]
    ExchangeSameDate,
    #[error("{partner} is working on {date}; choose a partner who is off that day")]
    PartnerNotOff { partner: String, date: NaiveDate },
}

/// What the submission form provides, before any defaulting or persistence.
#[derive(Debug, Default)]
pub struct RequestDraft<'a> {
    pub leave_type: &'a str,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: &'a str,
    pub coverage_by: Option<&'a str>,
    pub exchange_partner_id: Option<u64>,
    pub exchange_reason: Option<&'a str>,
    pub partner_desired_off_date: Option<NaiveDate>,
}

/// Validate a draft against the catalog. Returns the derived inclusive day
/// count on success. The partner day-status check is the caller's
/// responsibility (it needs the partner's schedule).
pub fn validate_request(
    draft: &RequestDraft<'_>,
    catalog: &[LeaveTypeDef],
) -> Result<i64, ValidationError> {
    if draft.leave_type.is_empty()
        || draft.start_date.is_none()
        || draft.end_date.is_none()
        || draft.reason.trim().is_empty()
    {
        return Err(ValidationError::MissingFields);
    }

    let leave_type = find_type(catalog, draft.leave_type)
        .ok_or_else(|| ValidationError::UnknownType(draft.leave_type.to_string()))?;

    let days = calculate_days(draft.start_date, draft.end_date);

    // Hard cap wins over whatever the catalog says.
    if draft.leave_type == SICK_TYPE && days > SICK_LEAVE_MAX_DAYS {
        return Err(ValidationError::SickLeaveTooLong);
    }

    if days > leave_type.max_days {
        return Err(ValidationError::ExceedsMaxDays {
            label: leave_type.label.clone(),
            max_days: leave_type.max_days,
        });
    }

    if leave_type.is_exchange {
        validate_exchange(draft, days)?;
    } else if leave_type.requires_coverage
        && draft.coverage_by.map_or(true, |c| c.trim().is_empty())
    {
        return Err(ValidationError::CoverageRequired(leave_type.label.clone()));
    }

    Ok(days)
}

fn validate_exchange(draft: &RequestDraft<'_>, days: i64) -> Result<(), ValidationError> {
    if days != 1 {
        return Err(ValidationError::ExchangeNotSingleDay);
    }
    if draft.exchange_partner_id.is_none() {
        return Err(ValidationError::ExchangePartnerMissing);
    }
    if draft.exchange_reason.map_or(true, |r| r.trim().is_empty()) {
        return Err(ValidationError::ExchangeReasonMissing);
    }
    let desired = draft
        .partner_desired_off_date
        .ok_or(ValidationError::ExchangeSameDate)?;
    if Some(desired) == draft.start_date {
        return Err(ValidationError::ExchangeSameDate);
    }
    Ok(())
}

/// Day status for (employee, date): the concrete week schedule wins, then the
/// active template, then the default weekday pattern.
pub fn derive_day_status(
    date: NaiveDate,
    schedule: Option<&WorkSchedule>,
    template: Option<&WorkScheduleTemplate>,
) -> DayStatus {
    use chrono::Datelike;
    let weekday = date.weekday();
    if let Some(schedule) = schedule {
        return schedule.status_for(weekday);
    }
    if let Some(template) = template {
        return template.status_for(weekday);
    }
    DayStatus::default_for(weekday)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn draft<'a>(leave_type: &'a str, start: &str, end: &str, reason: &'a str) -> RequestDraft<'a> {
        RequestDraft {
            leave_type,
            start_date: Some(d(start)),
            end_date: Some(d(end)),
            reason,
            ..Default::default()
        }
    }

    #[test]
    fn day_count_is_inclusive() {
        assert_eq!(calculate_days(Some(d("2026-03-02")), Some(d("2026-03-02"))), 1);
        assert_eq!(calculate_days(Some(d("2026-03-02")), Some(d("2026-03-08"))), 7);
    }

    #[test]
    fn day_count_is_order_independent() {
        assert_eq!(
            calculate_days(Some(d("2026-03-08")), Some(d("2026-03-02"))),
            calculate_days(Some(d("2026-03-02")), Some(d("2026-03-08")))
        );
    }

    #[test]
    fn day_count_zero_when_date_missing() {
        assert_eq!(calculate_days(None, Some(d("2026-03-02"))), 0);
        assert_eq!(calculate_days(Some(d("2026-03-02")), None), 0);
        assert_eq!(calculate_days(None, None), 0);
    }

    #[test]
    fn sick_leave_capped_at_one_day_regardless_of_catalog() {
        // Catalog deliberately mis-configured with a generous max.
        let catalog = vec![LeaveTypeDef {
            value: SICK_TYPE.to_string(),
            label: "Sick Leave".to_string(),
            max_days: 10,
            paid: true,
            description: None,
            requires_coverage: false,
            is_exchange: false,
        }];
        let two_days = draft(SICK_TYPE, "2026-03-02", "2026-03-03", "flu");
        assert_eq!(
            validate_request(&two_days, &catalog),
            Err(ValidationError::SickLeaveTooLong)
        );
    }

    #[test]
    fn max_days_enforced_per_type() {
        let mut req = draft("Annual Leave", "2026-03-02", "2026-03-20", "long trip");
        req.coverage_by = Some("John Smith");
        match validate_request(&req, &BUILTIN_CATALOG) {
            Err(ValidationError::ExceedsMaxDays { max_days, .. }) => assert_eq!(max_days, 14),
            other => panic!("expected ExceedsMaxDays, got {:?}", other),
        }
    }

    #[test]
    fn missing_reason_rejected() {
        let req = draft("Annual Leave", "2026-03-02", "2026-03-04", "  ");
        assert_eq!(
            validate_request(&req, &BUILTIN_CATALOG),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn non_exchange_types_need_a_coverage_partner() {
        let req = draft("Annual Leave", "2026-03-02", "2026-03-04", "vacation");
        assert_eq!(
            validate_request(&req, &BUILTIN_CATALOG),
            Err(ValidationError::CoverageRequired("Annual Leave".to_string()))
        );

        let mut covered = draft("Annual Leave", "2026-03-02", "2026-03-04", "vacation");
        covered.coverage_by = Some("John Smith");
        assert_eq!(validate_request(&covered, &BUILTIN_CATALOG), Ok(3));
    }

    fn exchange_draft<'a>(start: &str, desired: &str) -> RequestDraft<'a> {
        RequestDraft {
            leave_type: EXCHANGE_TYPE,
            start_date: Some(d(start)),
            end_date: Some(d(start)),
            reason: "swap",
            exchange_partner_id: Some(9),
            exchange_reason: Some("family event"),
            partner_desired_off_date: Some(d(desired)),
            ..Default::default()
        }
    }

    #[test]
    fn valid_exchange_passes() {
        let req = exchange_draft("2026-03-07", "2026-03-10");
        assert_eq!(validate_request(&req, &BUILTIN_CATALOG), Ok(1));
    }

    #[test]
    fn exchange_must_be_single_day() {
        let mut req = exchange_draft("2026-03-07", "2026-03-10");
        req.end_date = Some(d("2026-03-08"));
        assert_eq!(
            validate_request(&req, &BUILTIN_CATALOG),
            Err(ValidationError::ExchangeNotSingleDay)
        );
    }

    #[test]
    fn exchange_needs_partner_and_reason() {
        let mut req = exchange_draft("2026-03-07", "2026-03-10");
        req.exchange_partner_id = None;
        assert_eq!(
            validate_request(&req, &BUILTIN_CATALOG),
            Err(ValidationError::ExchangePartnerMissing)
        );

        let mut req = exchange_draft("2026-03-07", "2026-03-10");
        req.exchange_reason = Some("");
        assert_eq!(
            validate_request(&req, &BUILTIN_CATALOG),
            Err(ValidationError::ExchangeReasonMissing)
        );
    }

    #[test]
    fn exchange_desired_date_must_differ_from_requested() {
        let req = exchange_draft("2026-03-07", "2026-03-07");
        assert_eq!(
            validate_request(&req, &BUILTIN_CATALOG),
            Err(ValidationError::ExchangeSameDate)
        );
    }

    #[test]
    fn policy_catalog_overrides_builtin() {
        let catalog = vec![def("Annual Leave", "Annual Leave", 5, true, "short cap")];
        let mut req = draft("Annual Leave", "2026-03-02", "2026-03-08", "trip");
        req.coverage_by = Some("John Smith");
        assert_eq!(
            validate_request(&req, &catalog),
            Err(ValidationError::ExceedsMaxDays {
                label: "Annual Leave".to_string(),
                max_days: 5
            })
        );
    }

    #[test]
    fn partner_not_off_message_names_partner_and_date() {
        let err = ValidationError::PartnerNotOff {
            partner: "John Smith".to_string(),
            date: d("2026-03-04"),
        };
        assert_eq!(
            err.to_string(),
            "John Smith is working on 2026-03-04; choose a partner who is off that day"
        );
    }

    #[test]
    fn unknown_type_rejected() {
        let req = draft("Sabbatical", "2026-03-02", "2026-03-02", "rest");
        assert_eq!(
            validate_request(&req, &BUILTIN_CATALOG),
            Err(ValidationError::UnknownType("Sabbatical".to_string()))
        );
    }

    mod day_status {
        use super::*;
        use crate::model::schedule::{DayStatus, WorkSchedule};
        use crate::model::template::WorkScheduleTemplate;

        fn schedule(saturday: &str) -> WorkSchedule {
            WorkSchedule {
                id: 1,
                employee_id: 7,
                week_start_date: d("2026-03-02"),
                monday_status: "working".into(),
                tuesday_status: "working".into(),
                wednesday_status: "working".into(),
                thursday_status: "working".into(),
                friday_status: "working".into(),
                saturday_status: saturday.into(),
                sunday_status: "off".into(),
                created_at: None,
            }
        }

        fn template(saturday: &str) -> WorkScheduleTemplate {
            WorkScheduleTemplate {
                id: 1,
                employee_id: 7,
                monday_status: "working".into(),
                tuesday_status: "working".into(),
                wednesday_status: "working".into(),
                thursday_status: "working".into(),
                friday_status: "working".into(),
                saturday_status: saturday.into(),
                sunday_status: "off".into(),
                is_active: true,
                created_at: None,
            }
        }

        #[test]
        fn schedule_wins_over_template() {
            // 2026-03-07 is a Saturday
            let status = derive_day_status(
                d("2026-03-07"),
                Some(&schedule("working")),
                Some(&template("off")),
            );
            assert_eq!(status, DayStatus::Working);
        }

        #[test]
        fn template_wins_over_default() {
            // Default would be working on a Wednesday
            let mut t = template("off");
            t.wednesday_status = "off".into();
            assert_eq!(derive_day_status(d("2026-03-04"), None, Some(&t)), DayStatus::Off);
        }

        #[test]
        fn default_pattern_when_nothing_recorded() {
            assert_eq!(derive_day_status(d("2026-03-04"), None, None), DayStatus::Working);
            assert_eq!(derive_day_status(d("2026-03-07"), None, None), DayStatus::Off);
        }
    }
}

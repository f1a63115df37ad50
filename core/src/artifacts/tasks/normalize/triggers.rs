use crate::utils::time::{
    milliseconds_to_duration, minutes_to_duration, naive_to_utc, parts_to_utc,
};
use chrono::FixedOffset;
use common::records::{TriggerKind, TriggerRecord};
use common::windows::{
    BaseTrigger, CalendarTrigger, JobTrigger, JobTriggerFlags, JobTriggerKind, TaskJob,
    XmlTriggers,
};

/// Day-of-week mask bits in calendar order
const DAYS_OF_WEEK: [(u16, &str); 7] = [
    (0x1, "Sunday"),
    (0x2, "Monday"),
    (0x4, "Tuesday"),
    (0x8, "Wednesday"),
    (0x10, "Thursday"),
    (0x20, "Friday"),
    (0x40, "Saturday"),
];

/// Month mask bits in calendar order
const MONTHS_OF_YEAR: [(u16, &str); 12] = [
    (0x1, "January"),
    (0x2, "February"),
    (0x4, "March"),
    (0x8, "April"),
    (0x10, "May"),
    (0x20, "June"),
    (0x40, "July"),
    (0x80, "August"),
    (0x100, "September"),
    (0x200, "October"),
    (0x400, "November"),
    (0x800, "December"),
];

/// A trigger record with only its kind set
pub(crate) fn empty_trigger(kind: TriggerKind) -> TriggerRecord {
    TriggerRecord {
        kind,
        enabled: None,
        start_boundary: None,
        end_boundary: None,
        execution_time_limit: None,
        repetition_interval: None,
        repetition_duration: None,
        repetition_stop_duration_end: None,
        days_between_triggers: None,
        weeks_between_triggers: None,
        days_of_week: None,
        day_of_month: None,
        months_of_year: None,
        which_week: None,
        user_id: None,
        delay: None,
        random_delay: None,
        subscription: None,
        state_change: None,
        state_name: None,
        unused: None,
        padding: None,
        reserved2: None,
        reserved3: None,
    }
}

/// Normalize one packed `Job` trigger. The union words are interpreted per
/// trigger type. Words a type does not use are kept verbatim in `unused`
pub(crate) fn job_trigger(
    trigger: &JobTrigger,
    job: &TaskJob,
    offset: &FixedOffset,
) -> TriggerRecord {
    let kind = match trigger.kind {
        JobTriggerKind::Once => TriggerKind::Once,
        JobTriggerKind::Daily => TriggerKind::Daily,
        JobTriggerKind::Weekly => TriggerKind::Weekly,
        JobTriggerKind::MonthlyDate => TriggerKind::MonthlyDate,
        JobTriggerKind::MonthlyDow => TriggerKind::MonthlyDayOfWeek,
        JobTriggerKind::OnIdle => TriggerKind::Idle,
        JobTriggerKind::AtSystemStart => TriggerKind::Boot,
        JobTriggerKind::AtLogon => TriggerKind::Logon,
        JobTriggerKind::Unrecognized(_) => TriggerKind::Unrecognized,
    };
    let mut record = empty_trigger(kind);

    record.enabled = Some(!trigger.flags.contains(&JobTriggerFlags::Disabled));
    record.start_boundary = parts_to_utc(
        trigger.begin_year,
        trigger.begin_month,
        trigger.begin_day,
        trigger.start_hour,
        trigger.start_minute,
        offset,
    );
    if trigger.flags.contains(&JobTriggerFlags::HasEndDate) {
        record.end_boundary = parts_to_utc(
            trigger.end_year,
            trigger.end_month,
            trigger.end_day,
            0,
            0,
            offset,
        );
    }
    record.execution_time_limit = Some(milliseconds_to_duration(job.max_run_time));
    if trigger.minutes_interval != 0 {
        record.repetition_interval = Some(minutes_to_duration(trigger.minutes_interval));
    }
    if trigger.minutes_duration != 0 {
        record.repetition_duration = Some(minutes_to_duration(trigger.minutes_duration));
    }
    record.repetition_stop_duration_end =
        Some(trigger.flags.contains(&JobTriggerFlags::KillAtDurationEnd));

    record.padding = Some(trigger.padding);
    record.reserved2 = Some(trigger.reserved2);
    record.reserved3 = Some(trigger.reserved3);

    match trigger.kind {
        JobTriggerKind::Daily => {
            record.days_between_triggers = Some(trigger.specific0);
            record.unused = Some(vec![trigger.specific1, trigger.specific2]);
        }
        JobTriggerKind::Weekly => {
            record.weeks_between_triggers = Some(trigger.specific0);
            record.days_of_week = Some(expand_mask(trigger.specific1, &DAYS_OF_WEEK));
            record.unused = Some(vec![trigger.specific2]);
        }
        JobTriggerKind::MonthlyDate => {
            // Day bits 1-31 spread over two words
            let day_mask =
                u32::from(trigger.specific0) | (u32::from(trigger.specific1) << 16);
            let mut days = Vec::new();
            for day in 1..=31 {
                let bit = 1 << (day - 1);
                if (day_mask & bit) == bit {
                    days.push(day);
                }
            }
            record.day_of_month = Some(days);
            record.months_of_year = Some(expand_mask(trigger.specific2, &MONTHS_OF_YEAR));
        }
        JobTriggerKind::MonthlyDow => {
            record.which_week = Some(vec![trigger.specific0]);
            record.days_of_week = Some(expand_mask(trigger.specific1, &DAYS_OF_WEEK));
            record.months_of_year = Some(expand_mask(trigger.specific2, &MONTHS_OF_YEAR));
        }
        _ => {
            record.unused = Some(vec![
                trigger.specific0,
                trigger.specific1,
                trigger.specific2,
            ]);
        }
    }

    record
}

/// Normalize every trigger of a Task XML tree
pub(crate) fn xml_triggers(triggers: &XmlTriggers, offset: &FixedOffset) -> Vec<TriggerRecord> {
    let mut records = Vec::new();

    for boot in &triggers.boot {
        let mut record = base_record(TriggerKind::Boot, &boot.common, offset);
        record.delay = boot.delay.clone();
        records.push(record);
    }
    for registration in &triggers.registration {
        let mut record = base_record(TriggerKind::Registration, &registration.common, offset);
        record.delay = registration.delay.clone();
        records.push(record);
    }
    for idle in &triggers.idle {
        records.push(base_record(TriggerKind::Idle, &idle.common, offset));
    }
    for time in &triggers.time {
        // A one-shot trigger. The XML format has no dedicated Once element
        let mut record = base_record(TriggerKind::Once, &time.common, offset);
        record.random_delay = time.random_delay.clone();
        records.push(record);
    }
    for event in &triggers.event {
        let mut record = base_record(TriggerKind::Event, &event.common, offset);
        record.delay = event.delay.clone();
        if !event.subscription.is_empty() {
            record.subscription = Some(event.subscription.clone());
        }
        records.push(record);
    }
    for logon in &triggers.logon {
        let mut record = base_record(TriggerKind::Logon, &logon.common, offset);
        record.user_id = logon.user_id.clone();
        record.delay = logon.delay.clone();
        records.push(record);
    }
    for session in &triggers.session {
        let mut record = base_record(TriggerKind::SessionStateChange, &session.common, offset);
        record.user_id = session.user_id.clone();
        record.delay = session.delay.clone();
        record.state_change = session.state_change.clone();
        records.push(record);
    }
    for wnf in &triggers.wnf {
        let mut record = base_record(TriggerKind::WindowsNotification, &wnf.common, offset);
        record.delay = wnf.delay.clone();
        record.state_name = Some(wnf.state_name.clone());
        records.push(record);
    }
    for calendar in &triggers.calendar {
        records.push(calendar_record(calendar, offset));
    }

    records
}

/// Fill the fields every XML trigger shares
fn base_record(kind: TriggerKind, common: &BaseTrigger, offset: &FixedOffset) -> TriggerRecord {
    let mut record = empty_trigger(kind);
    record.enabled = common.enabled;
    record.start_boundary = common
        .start_boundary
        .as_deref()
        .and_then(|value| naive_to_utc(value, offset));
    record.end_boundary = common
        .end_boundary
        .as_deref()
        .and_then(|value| naive_to_utc(value, offset));
    record.execution_time_limit = common.execution_time_limit.clone();
    if let Some(repetition) = common.repetition.as_ref() {
        if !repetition.interval.is_empty() {
            record.repetition_interval = Some(repetition.interval.clone());
        }
        record.repetition_duration = repetition.duration.clone();
        record.repetition_stop_duration_end = repetition.stop_at_duration_end;
    }
    record
}

/// A `CalendarTrigger` takes its kind from whichever schedule child is present
fn calendar_record(calendar: &CalendarTrigger, offset: &FixedOffset) -> TriggerRecord {
    let kind = if calendar.schedule_by_day.is_some() {
        TriggerKind::Daily
    } else if calendar.schedule_by_week.is_some() {
        TriggerKind::Weekly
    } else if calendar.schedule_by_month.is_some() {
        TriggerKind::MonthlyDate
    } else if calendar.schedule_by_month_day_of_week.is_some() {
        TriggerKind::MonthlyDayOfWeek
    } else {
        TriggerKind::Once
    };

    let mut record = base_record(kind, &calendar.common, offset);
    record.random_delay = calendar.random_delay.clone();

    if let Some(day) = calendar.schedule_by_day.as_ref() {
        record.days_between_triggers = day.days_interval;
    }
    if let Some(week) = calendar.schedule_by_week.as_ref() {
        record.weeks_between_triggers = week.weeks_interval;
        record.days_of_week = week.days_of_week.clone();
    }
    if let Some(month) = calendar.schedule_by_month.as_ref() {
        record.day_of_month = month.days_of_month.as_ref().map(|days| {
            days.iter()
                .filter_map(|value| str::parse(value).ok())
                .collect()
        });
        record.months_of_year = month.months.clone();
    }
    if let Some(month_dow) = calendar.schedule_by_month_day_of_week.as_ref() {
        record.which_week = month_dow.weeks.as_ref().map(|weeks| {
            weeks.iter().map(|value| parse_week(value)).collect()
        });
        record.days_of_week = month_dow.days_of_week.clone();
        record.months_of_year = month_dow.months.clone();
    }

    record
}

/// `Week` values are 1-4 or the string `Last`, which means week five
fn parse_week(value: &str) -> u16 {
    if value.eq_ignore_ascii_case("last") {
        return 5;
    }
    str::parse(value).unwrap_or_default()
}

/// Expand a bitmask into names, preserving the table order
fn expand_mask(mask: u16, table: &[(u16, &str)]) -> Vec<String> {
    let mut names = Vec::new();
    for (bit, name) in table {
        if (mask & bit) == *bit {
            names.push((*name).to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::{expand_mask, job_trigger, parse_week, xml_triggers, DAYS_OF_WEEK, MONTHS_OF_YEAR};
    use chrono::FixedOffset;
    use common::records::TriggerKind;
    use common::windows::{
        BaseTrigger, ByMonthDayWeek, CalendarTrigger, JobPriority, JobStatus, JobTrigger,
        JobTriggerKind, TaskJob, XmlTriggers,
    };

    fn sample_job() -> TaskJob {
        TaskJob {
            job_id: String::new(),
            product_version: String::from("Windows 10"),
            format_version: 1,
            error_retry_count: 0,
            error_retry_interval: 0,
            idle_deadline: 60,
            idle_wait: 10,
            priority: JobPriority::Normal,
            max_run_time: 259200000,
            exit_code: 0,
            status: JobStatus::Ready,
            flags: Vec::new(),
            system_time: String::new(),
            running_instance_count: 0,
            application_name: String::from("cmd.exe"),
            parameters: String::new(),
            working_directory: String::new(),
            author: String::new(),
            comments: String::new(),
            user_data: String::new(),
            start_error: 0,
            triggers: Vec::new(),
            path: String::from("At1.job"),
        }
    }

    fn raw_trigger(kind: JobTriggerKind) -> JobTrigger {
        JobTrigger {
            trigger_size: 48,
            reserved1: 0,
            begin_year: 2023,
            begin_month: 5,
            begin_day: 23,
            end_year: 0,
            end_month: 0,
            end_day: 0,
            start_hour: 0,
            start_minute: 0,
            minutes_duration: 0,
            minutes_interval: 0,
            flags: Vec::new(),
            kind,
            specific0: 0,
            specific1: 0,
            specific2: 0,
            padding: 0,
            reserved2: 0,
            reserved3: 0,
        }
    }

    #[test]
    fn test_job_trigger_weekly() {
        let mut trigger = raw_trigger(JobTriggerKind::Weekly);
        trigger.specific0 = 1;
        trigger.specific1 = 0x2a; // Monday, Wednesday, Friday

        let utc = FixedOffset::east_opt(0).unwrap();
        let job = sample_job();
        let record = job_trigger(&trigger, &job, &utc);

        assert_eq!(record.kind, TriggerKind::Weekly);
        assert_eq!(record.weeks_between_triggers, Some(1));
        assert_eq!(
            record.days_of_week.as_ref().unwrap(),
            &vec![
                String::from("Monday"),
                String::from("Wednesday"),
                String::from("Friday")
            ]
        );
        assert_eq!(record.unused.as_ref().unwrap(), &vec![0]);
        assert_eq!(record.enabled, Some(true));
        assert_eq!(record.end_boundary, None);
    }

    #[test]
    fn test_job_trigger_monthly_date() {
        let mut trigger = raw_trigger(JobTriggerKind::MonthlyDate);
        trigger.specific0 = 1 << 14; // the 15th
        trigger.specific2 = 0x4 | 0x10 | 0x20 | 0x40 | 0x80 | 0x200;

        let utc = FixedOffset::east_opt(0).unwrap();
        let job = sample_job();
        let record = job_trigger(&trigger, &job, &utc);

        assert_eq!(record.kind, TriggerKind::MonthlyDate);
        assert_eq!(record.day_of_month.as_ref().unwrap(), &vec![15]);
        assert_eq!(
            record.months_of_year.as_ref().unwrap(),
            &vec![
                String::from("March"),
                String::from("May"),
                String::from("June"),
                String::from("July"),
                String::from("August"),
                String::from("October")
            ]
        );
    }

    #[test]
    fn test_job_trigger_unrecognized() {
        let mut trigger = raw_trigger(JobTriggerKind::Unrecognized(0x30));
        trigger.specific0 = 7;

        let utc = FixedOffset::east_opt(0).unwrap();
        let job = sample_job();
        let record = job_trigger(&trigger, &job, &utc);

        assert_eq!(record.kind, TriggerKind::Unrecognized);
        assert_eq!(record.enabled, Some(true));
        assert_eq!(record.unused.as_ref().unwrap(), &vec![7, 0, 0]);
        assert_eq!(record.days_of_week, None);
    }

    #[test]
    fn test_expand_mask_calendar_order() {
        // Bits set out of order still come out calendar ordered
        assert_eq!(
            expand_mask(0x41, &DAYS_OF_WEEK),
            vec![String::from("Sunday"), String::from("Saturday")]
        );
        assert_eq!(
            expand_mask(0x801, &MONTHS_OF_YEAR),
            vec![String::from("January"), String::from("December")]
        );
    }

    #[test]
    fn test_xml_triggers_month_day_week() {
        let triggers = XmlTriggers {
            boot: Vec::new(),
            registration: Vec::new(),
            idle: Vec::new(),
            time: Vec::new(),
            event: Vec::new(),
            logon: Vec::new(),
            session: Vec::new(),
            calendar: vec![CalendarTrigger {
                common: BaseTrigger {
                    id: None,
                    start_boundary: Some(String::from("2023-06-14T08:00:00")),
                    end_boundary: None,
                    enabled: None,
                    execution_time_limit: None,
                    repetition: None,
                },
                random_delay: None,
                schedule_by_day: None,
                schedule_by_week: None,
                schedule_by_month: None,
                schedule_by_month_day_of_week: Some(ByMonthDayWeek {
                    weeks: Some(vec![String::from("2"), String::from("Last")]),
                    days_of_week: Some(vec![String::from("Wednesday")]),
                    months: Some(vec![String::from("June"), String::from("September")]),
                }),
            }],
            wnf: Vec::new(),
        };

        let utc = FixedOffset::east_opt(0).unwrap();
        let records = xml_triggers(&triggers, &utc);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.kind, TriggerKind::MonthlyDayOfWeek);
        assert_eq!(record.which_week.as_ref().unwrap(), &vec![2, 5]);
        assert_eq!(
            record.days_of_week.as_ref().unwrap(),
            &vec![String::from("Wednesday")]
        );
        assert_eq!(
            record.months_of_year.as_ref().unwrap(),
            &vec![String::from("June"), String::from("September")]
        );
        assert_eq!(
            record.start_boundary.as_ref().unwrap(),
            "2023-06-14T08:00:00+00:00"
        );
        assert_eq!(record.enabled, None);
    }

    #[test]
    fn test_parse_week() {
        assert_eq!(parse_week("2"), 2);
        assert_eq!(parse_week("Last"), 5);
    }
}

use crate::artifacts::tasks::error::TaskError;
use crate::artifacts::tasks::schemas::principals::id_attribute;
use crate::utils::strings::extract_utf8_string;
use common::windows::{
    BaseTrigger, BootTrigger, ByDay, ByMonth, ByMonthDayWeek, ByWeek, CalendarTrigger,
    EventTrigger, IdleTrigger, LogonTrigger, Repetition, SessionTrigger, TimeTrigger, WnfTrigger,
    XmlTriggers,
};
use log::error;
use quick_xml::{
    events::{BytesStart, Event},
    name::QName,
    Reader,
};

/// Parse the `Triggers` subtree of a Task. Any unrecognized trigger element
/// fails the whole file
pub(crate) fn parse_triggers(reader: &mut Reader<&[u8]>) -> Result<XmlTriggers, TaskError> {
    let mut info = XmlTriggers {
        boot: Vec::new(),
        registration: Vec::new(),
        idle: Vec::new(),
        time: Vec::new(),
        event: Vec::new(),
        logon: Vec::new(),
        session: Vec::new(),
        calendar: Vec::new(),
        wnf: Vec::new(),
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Triggers xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"BootTrigger" => process_boot(&mut info, &tag, reader, true)?,
                b"RegistrationTrigger" => process_boot(&mut info, &tag, reader, false)?,
                b"IdleTrigger" => process_idle(&mut info, &tag, reader)?,
                b"TimeTrigger" => process_time(&mut info, &tag, reader)?,
                b"EventTrigger" => process_event(&mut info, &tag, reader)?,
                b"LogonTrigger" => process_logon(&mut info, &tag, reader)?,
                b"SessionStateChangeTrigger" => process_session(&mut info, &tag, reader)?,
                b"CalendarTrigger" => process_calendar(&mut info, &tag, reader)?,
                b"WnfStateChangeTrigger" => process_notification(&mut info, &tag, reader)?,
                _ => {
                    error!(
                        "[taskscan] Unknown trigger element: {}",
                        extract_utf8_string(tag.name().as_ref())
                    );
                    return Err(TaskError::UnknownTrigger);
                }
            },
            // Triggers with no children show up as empty elements. Ex: <IdleTrigger/>
            Ok(Event::Empty(tag)) => match tag.name().as_ref() {
                b"BootTrigger" => info.boot.push(BootTrigger {
                    common: base_trigger(&tag),
                    delay: None,
                }),
                b"RegistrationTrigger" => info.registration.push(BootTrigger {
                    common: base_trigger(&tag),
                    delay: None,
                }),
                b"IdleTrigger" => info.idle.push(IdleTrigger {
                    common: base_trigger(&tag),
                }),
                b"TimeTrigger" => info.time.push(TimeTrigger {
                    common: base_trigger(&tag),
                    random_delay: None,
                }),
                b"LogonTrigger" => info.logon.push(LogonTrigger {
                    common: base_trigger(&tag),
                    user_id: None,
                    delay: None,
                }),
                _ => {
                    error!(
                        "[taskscan] Unknown trigger element: {}",
                        extract_utf8_string(tag.name().as_ref())
                    );
                    return Err(TaskError::UnknownTrigger);
                }
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Triggers" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(info)
}

/// Start a `BaseTrigger` with the `id` attribute of the trigger element
fn base_trigger(tag: &BytesStart<'_>) -> BaseTrigger {
    BaseTrigger {
        id: id_attribute(tag),
        start_boundary: None,
        end_boundary: None,
        enabled: None,
        execution_time_limit: None,
        repetition: None,
    }
}

/// Parse `BootTrigger` and `RegistrationTrigger` options. Both share the same shape
fn process_boot(
    info: &mut XmlTriggers,
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
    is_boot: bool,
) -> Result<(), TaskError> {
    let mut common = base_trigger(start);
    let mut delay = None;

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read BootTrigger xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Delay" => {
                    delay = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => process_common(&mut common, &tag.name(), reader)?,
            },
            Ok(Event::End(tag)) => match tag.name().as_ref() {
                b"BootTrigger" | b"RegistrationTrigger" => break,
                _ => (),
            },
            _ => (),
        }
    }

    let boot = BootTrigger { common, delay };
    if is_boot {
        info.boot.push(boot);
    } else {
        info.registration.push(boot);
    }
    Ok(())
}

/// Parse `IdleTrigger` options
fn process_idle(
    info: &mut XmlTriggers,
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
) -> Result<(), TaskError> {
    let mut common = base_trigger(start);
    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read IdleTrigger xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => process_common(&mut common, &tag.name(), reader)?,
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"IdleTrigger" {
                    break;
                }
            }
            _ => (),
        }
    }

    info.idle.push(IdleTrigger { common });
    Ok(())
}

/// Parse `TimeTrigger` options
fn process_time(
    info: &mut XmlTriggers,
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
) -> Result<(), TaskError> {
    let mut common = base_trigger(start);
    let mut random_delay = None;

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read TimeTrigger xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"RandomDelay" => {
                    random_delay =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => process_common(&mut common, &tag.name(), reader)?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"TimeTrigger" {
                    break;
                }
            }
            _ => (),
        }
    }

    info.time.push(TimeTrigger {
        common,
        random_delay,
    });
    Ok(())
}

/// Parse `EventTrigger` options
fn process_event(
    info: &mut XmlTriggers,
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
) -> Result<(), TaskError> {
    let mut event = EventTrigger {
        common: base_trigger(start),
        subscription: Vec::new(),
        delay: None,
        number_of_occurrences: None,
        period_of_occurrence: None,
        matching_element: None,
        value_queries: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read EventTrigger xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Subscription" => {
                    event
                        .subscription
                        .push(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Delay" => {
                    event.delay =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"MatchingElement" => {
                    event.matching_element =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"PeriodOfOccurrence" => {
                    event.period_of_occurrence =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"NumberOfOccurrences" => {
                    event.number_of_occurrences = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"ValueQueries" => event.value_queries = Some(process_event_values(reader)?),
                _ => process_common(&mut event.common, &tag.name(), reader)?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"EventTrigger" {
                    break;
                }
            }
            _ => (),
        }
    }

    info.event.push(event);
    Ok(())
}

/// Parse `LogonTrigger` options
fn process_logon(
    info: &mut XmlTriggers,
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
) -> Result<(), TaskError> {
    let mut logon = LogonTrigger {
        common: base_trigger(start),
        user_id: None,
        delay: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read LogonTrigger xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"UserId" => {
                    logon.user_id =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Delay" => {
                    logon.delay =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => process_common(&mut logon.common, &tag.name(), reader)?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"LogonTrigger" {
                    break;
                }
            }
            _ => (),
        }
    }

    info.logon.push(logon);
    Ok(())
}

/// Parse `SessionStateChangeTrigger` options
fn process_session(
    info: &mut XmlTriggers,
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
) -> Result<(), TaskError> {
    let mut session = SessionTrigger {
        common: base_trigger(start),
        user_id: None,
        delay: None,
        state_change: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read SessionStateChangeTrigger xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Delay" => {
                    session.delay =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"StateChange" => {
                    session.state_change =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"UserId" => {
                    session.user_id =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => process_common(&mut session.common, &tag.name(), reader)?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"SessionStateChangeTrigger" {
                    break;
                }
            }
            _ => (),
        }
    }

    info.session.push(session);
    Ok(())
}

/// Parse `WnfStateChangeTrigger` (Windows Notification) options
fn process_notification(
    info: &mut XmlTriggers,
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
) -> Result<(), TaskError> {
    let mut wnf = WnfTrigger {
        common: base_trigger(start),
        state_name: String::new(),
        delay: None,
        data: None,
        data_offset: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read WnfStateChangeTrigger xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Delay" => {
                    wnf.delay = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"StateName" => {
                    wnf.state_name = reader.read_text(tag.name()).unwrap_or_default().to_string();
                }
                b"Data" => {
                    wnf.data = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"DataOffset" => {
                    wnf.data_offset =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => process_common(&mut wnf.common, &tag.name(), reader)?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"WnfStateChangeTrigger" {
                    break;
                }
            }
            _ => (),
        }
    }

    info.wnf.push(wnf);
    Ok(())
}

/// Parse `CalendarTrigger` options
fn process_calendar(
    info: &mut XmlTriggers,
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
) -> Result<(), TaskError> {
    let mut cal = CalendarTrigger {
        common: base_trigger(start),
        random_delay: None,
        schedule_by_day: None,
        schedule_by_week: None,
        schedule_by_month: None,
        schedule_by_month_day_of_week: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read CalendarTrigger xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"RandomDelay" => {
                    cal.random_delay =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"ScheduleByDay" => cal.schedule_by_day = Some(process_cal_day(reader)?),
                b"ScheduleByWeek" => cal.schedule_by_week = Some(process_cal_week(reader)?),
                b"ScheduleByMonth" => cal.schedule_by_month = Some(process_cal_month(reader)?),
                b"ScheduleByMonthDayOfWeek" => {
                    cal.schedule_by_month_day_of_week = Some(process_cal_month_day_week(reader)?);
                }
                _ => process_common(&mut cal.common, &tag.name(), reader)?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"CalendarTrigger" {
                    break;
                }
            }
            _ => (),
        }
    }

    info.calendar.push(cal);
    Ok(())
}

/// Parse common values between all triggers
fn process_common(
    common: &mut BaseTrigger,
    name: &QName<'_>,
    reader: &mut Reader<&[u8]>,
) -> Result<(), TaskError> {
    match name.as_ref() {
        b"StartBoundary" => {
            common.start_boundary = Some(reader.read_text(*name).unwrap_or_default().to_string());
        }
        b"EndBoundary" => {
            common.end_boundary = Some(reader.read_text(*name).unwrap_or_default().to_string());
        }
        b"ExecutionTimeLimit" => {
            common.execution_time_limit =
                Some(reader.read_text(*name).unwrap_or_default().to_string());
        }
        b"Enabled" => {
            common.enabled =
                Some(str::parse(&reader.read_text(*name).unwrap_or_default()).unwrap_or_default());
        }
        b"Repetition" => {
            process_repetition(common, reader)?;
        }
        _ => (),
    }
    Ok(())
}

/// Parse repetition values
fn process_repetition(common: &mut BaseTrigger, reader: &mut Reader<&[u8]>) -> Result<(), TaskError> {
    let mut repetition = Repetition {
        interval: String::new(),
        duration: None,
        stop_at_duration_end: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Repetition xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Interval" => {
                    repetition.interval =
                        reader.read_text(tag.name()).unwrap_or_default().to_string();
                }
                b"Duration" => {
                    repetition.duration =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"StopAtDurationEnd" => {
                    repetition.stop_at_duration_end = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Repetition" {
                    break;
                }
            }
            _ => (),
        }
    }
    common.repetition = Some(repetition);
    Ok(())
}

/// Process the Values in `ValueQueries` in `EventTriggers`
fn process_event_values(reader: &mut Reader<&[u8]>) -> Result<Vec<String>, TaskError> {
    let mut values = Vec::new();
    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read EventTrigger Values xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => {
                if tag.name().as_ref() == b"Value" {
                    values.push(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
            }
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"ValueQueries" {
                    break;
                }
            }
            _ => (),
        }
    }
    Ok(values)
}

/// Parse Day information from `CalendarTrigger`
fn process_cal_day(reader: &mut Reader<&[u8]>) -> Result<ByDay, TaskError> {
    let mut day = ByDay {
        days_interval: None,
    };
    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Calendar ByDay xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => {
                if tag.name().as_ref() == b"DaysInterval" {
                    day.days_interval = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
            }
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"ScheduleByDay" {
                    break;
                }
            }
            _ => (),
        }
    }
    Ok(day)
}

/// Parse Week information from `CalendarTrigger`
fn process_cal_week(reader: &mut Reader<&[u8]>) -> Result<ByWeek, TaskError> {
    let mut week = ByWeek {
        weeks_interval: None,
        days_of_week: None,
    };
    let mut days = Vec::new();
    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Calendar ByWeek xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"WeeksInterval" => {
                    week.weeks_interval = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"DaysOfWeek" => (),
                // Day of week names. Ex: Monday, Tuesday
                _ => days.push(extract_utf8_string(tag.name().0)),
            },
            // Day names are usually empty elements. Ex: <Monday/>
            Ok(Event::Empty(tag)) => days.push(extract_utf8_string(tag.name().0)),
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"ScheduleByWeek" {
                    break;
                }
            }
            _ => (),
        }
    }
    week.days_of_week = Some(days);
    Ok(week)
}

/// Parse Month information from `CalendarTrigger`
fn process_cal_month(reader: &mut Reader<&[u8]>) -> Result<ByMonth, TaskError> {
    let mut month = ByMonth {
        days_of_month: None,
        months: None,
    };
    let mut days = Vec::new();
    let mut months = Vec::new();
    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Calendar ByMonth xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Months" | b"DaysOfMonth" => (),
                b"Day" => {
                    days.push(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                // Month names. Ex: July, August
                _ => months.push(extract_utf8_string(tag.name().0)),
            },
            Ok(Event::Empty(tag)) => months.push(extract_utf8_string(tag.name().0)),
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"ScheduleByMonth" {
                    break;
                }
            }
            _ => (),
        }
    }
    month.days_of_month = Some(days);
    month.months = Some(months);

    Ok(month)
}

/// Parse Month-Day-Week information from `CalendarTrigger`
fn process_cal_month_day_week(reader: &mut Reader<&[u8]>) -> Result<ByMonthDayWeek, TaskError> {
    let mut month = ByMonthDayWeek {
        weeks: None,
        days_of_week: None,
        months: None,
    };
    let mut days = Vec::new();
    let mut months = Vec::new();
    let mut weeks = Vec::new();

    let mut value = "";
    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Calendar ByMonthDayOfWeek xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Months" => value = "months",
                b"DaysOfWeek" => value = "days",
                b"Weeks" => value = "weeks",
                b"Week" => {
                    weeks.push(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => {
                    if value == "months" {
                        months.push(extract_utf8_string(tag.name().0));
                    } else if value == "days" {
                        days.push(extract_utf8_string(tag.name().0));
                    }
                }
            },
            Ok(Event::Empty(tag)) => {
                if value == "months" {
                    months.push(extract_utf8_string(tag.name().0));
                } else if value == "days" {
                    days.push(extract_utf8_string(tag.name().0));
                }
            }
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"ScheduleByMonthDayOfWeek" {
                    break;
                }
            }
            _ => (),
        }
    }
    month.days_of_week = Some(days);
    month.weeks = Some(weeks);
    month.months = Some(months);

    Ok(month)
}

#[cfg(test)]
mod tests {
    use super::parse_triggers;
    use crate::artifacts::tasks::error::TaskError;
    use quick_xml::Reader;

    #[test]
    fn test_parse_triggers_calendar_daily() {
        let xml = r#"
        <CalendarTrigger>
          <StartBoundary>2019-10-21T12:26:22</StartBoundary>
          <ScheduleByDay>
            <DaysInterval>1</DaysInterval>
          </ScheduleByDay>
        </CalendarTrigger>
             "#;

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let result = parse_triggers(&mut reader).unwrap();
        assert_eq!(
            result.calendar[0].common.start_boundary.as_ref().unwrap(),
            "2019-10-21T12:26:22"
        );
        assert_eq!(
            result.calendar[0]
                .schedule_by_day
                .as_ref()
                .unwrap()
                .days_interval,
            Some(1)
        );
    }

    #[test]
    fn test_parse_triggers_calendar_weekly() {
        let xml = r#"
        <CalendarTrigger>
          <StartBoundary>2015-01-07T23:11:03.1365259</StartBoundary>
          <ScheduleByWeek>
            <WeeksInterval>1</WeeksInterval>
            <DaysOfWeek>
              <Monday/>
              <Wednesday/>
              <Friday/>
            </DaysOfWeek>
          </ScheduleByWeek>
        </CalendarTrigger>
             "#;

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let result = parse_triggers(&mut reader).unwrap();
        let week = result.calendar[0].schedule_by_week.as_ref().unwrap();
        assert_eq!(week.weeks_interval, Some(1));
        assert_eq!(
            week.days_of_week.as_ref().unwrap(),
            &vec![
                String::from("Monday"),
                String::from("Wednesday"),
                String::from("Friday")
            ]
        );
    }

    #[test]
    fn test_parse_triggers_calendar_month_day_week() {
        let xml = r#"
        <CalendarTrigger>
          <ScheduleByMonthDayOfWeek>
            <Weeks>
              <Week>2</Week>
              <Week>Last</Week>
            </Weeks>
            <DaysOfWeek>
              <Wednesday/>
            </DaysOfWeek>
            <Months>
              <June/>
              <September/>
            </Months>
          </ScheduleByMonthDayOfWeek>
        </CalendarTrigger>
             "#;

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let result = parse_triggers(&mut reader).unwrap();
        let schedule = result.calendar[0]
            .schedule_by_month_day_of_week
            .as_ref()
            .unwrap();
        assert_eq!(
            schedule.weeks.as_ref().unwrap(),
            &vec![String::from("2"), String::from("Last")]
        );
        assert_eq!(
            schedule.days_of_week.as_ref().unwrap(),
            &vec![String::from("Wednesday")]
        );
        assert_eq!(
            schedule.months.as_ref().unwrap(),
            &vec![String::from("June"), String::from("September")]
        );
    }

    #[test]
    fn test_parse_triggers_logon() {
        let xml = r#"
        <LogonTrigger id="logon">
          <Enabled>false</Enabled>
          <UserId>Administrator</UserId>
          <Delay>PT5M</Delay>
        </LogonTrigger>
             "#;

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let result = parse_triggers(&mut reader).unwrap();
        assert_eq!(result.logon[0].common.id.as_ref().unwrap(), "logon");
        assert_eq!(result.logon[0].common.enabled, Some(false));
        assert_eq!(result.logon[0].user_id.as_ref().unwrap(), "Administrator");
        assert_eq!(result.logon[0].delay.as_ref().unwrap(), "PT5M");
    }

    #[test]
    fn test_parse_triggers_event_repetition() {
        let xml = r#"
        <EventTrigger>
          <Subscription>&lt;QueryList&gt;&lt;/QueryList&gt;</Subscription>
          <Repetition>
            <Interval>PT15M</Interval>
            <Duration>P1D</Duration>
            <StopAtDurationEnd>true</StopAtDurationEnd>
          </Repetition>
        </EventTrigger>
             "#;

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let result = parse_triggers(&mut reader).unwrap();
        assert_eq!(result.event[0].subscription.len(), 1);
        let repetition = result.event[0].common.repetition.as_ref().unwrap();
        assert_eq!(repetition.interval, "PT15M");
        assert_eq!(repetition.duration.as_ref().unwrap(), "P1D");
        assert_eq!(repetition.stop_at_duration_end, Some(true));
    }

    #[test]
    fn test_parse_triggers_unknown() {
        let xml = "<SurpriseTrigger><Delay>PT1M</Delay></SurpriseTrigger>";
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let result = parse_triggers(&mut reader);
        assert!(matches!(result, Err(TaskError::UnknownTrigger)));
    }
}

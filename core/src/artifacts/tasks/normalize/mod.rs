use crate::artifacts::tasks::normalize::actions::{job_actions, xml_actions};
use crate::artifacts::tasks::normalize::triggers::{job_trigger, xml_triggers};
use crate::utils::time::{milliseconds_to_duration, minutes_to_duration, naive_to_utc};
use chrono::FixedOffset;
use common::records::{TaskGroup, TaskRecord};
use common::windows::{JobFlags, JobPriority, TaskJob, TaskXml};

pub(crate) mod actions;
pub(crate) mod triggers;

/// Turn a decoded `Job` file into the canonical record shape.
/// The binary format always encodes its strings and flag booleans, so those
/// fields are always populated. Fields the format cannot express stay `None`
pub(crate) fn normalize_job(job: TaskJob, offset: &FixedOffset) -> TaskGroup {
    let retry_interval = if job.error_retry_interval == 0 {
        None
    } else {
        Some(minutes_to_duration(u32::from(job.error_retry_interval)))
    };

    let task = TaskRecord {
        uri: None,
        task_path: Some(job.path.clone()),
        security_descriptor: None,
        source: None,
        date: None,
        last_run_date: naive_to_utc(&job.system_time, offset),
        author: Some(job.author.clone()),
        version: Some(job.format_version.to_string()),
        description: Some(job.comments.clone()),
        documentation: None,
        principal_id: None,
        user_id: None,
        logon_type: None,
        group_id: None,
        display_name: None,
        run_level: None,
        process_token_sid_type: None,
        required_privileges: None,
        allow_start_on_demand: None,
        restart_on_failure_interval: retry_interval,
        restart_on_failure_count: Some(job.error_retry_count.to_string()),
        multiple_instances_policy: None,
        disallow_start_on_batteries: Some(job.flags.contains(&JobFlags::DontStartIfOnBatteries)),
        stop_going_on_batteries: Some(job.flags.contains(&JobFlags::KillIfGoingOnBatteries)),
        allow_hard_terminate: None,
        start_when_available: None,
        network_profile_name: None,
        run_only_network_available: Some(job.flags.contains(&JobFlags::RunIfConnectedToInternet)),
        wake_to_run: Some(job.flags.contains(&JobFlags::SystemRequired)),
        enabled: Some(!job.flags.contains(&JobFlags::Disabled)),
        hidden: Some(job.flags.contains(&JobFlags::Hidden)),
        delete_expired_task_after: None,
        idle_duration: Some(minutes_to_duration(u32::from(job.idle_wait))),
        idle_wait_timeout: Some(minutes_to_duration(u32::from(job.idle_deadline))),
        idle_stop_on_idle_end: Some(job.flags.contains(&JobFlags::KillOnIdleEnd)),
        idle_restart_on_idle: Some(job.flags.contains(&JobFlags::RestartOnIdleResume)),
        network_settings_name: None,
        network_settings_id: None,
        execution_time_limit: Some(milliseconds_to_duration(job.max_run_time)),
        priority: Some(job_priority(&job.priority)),
        run_only_idle: Some(job.flags.contains(&JobFlags::StartOnlyIfIdle)),
        unified_scheduling_engine: None,
        disallow_start_on_remote_app_session: None,
        data: Some(job.user_data.clone()),
    };

    let triggers = job
        .triggers
        .iter()
        .map(|trigger| job_trigger(trigger, &job, offset))
        .collect();

    TaskGroup {
        task,
        triggers,
        actions: job_actions(&job),
    }
}

/// Turn a decoded Task XML tree into the canonical record shape.
/// Elements absent from the document stay `None`. A task without a URI keeps
/// its file path as identity instead
pub(crate) fn normalize_xml(task_xml: TaskXml, offset: &FixedOffset) -> TaskGroup {
    let registration = task_xml.registration_info.as_ref();
    let principal = task_xml.principals.first();
    let settings = task_xml.settings.as_ref();
    let idle = settings.and_then(|value| value.idle_settings.as_ref());
    let network = settings.and_then(|value| value.network_settings.as_ref());
    let restart = settings.and_then(|value| value.restart_on_failure.as_ref());

    let uri = registration.and_then(|value| value.uri.clone());
    let task_path = if uri.is_none() {
        Some(task_xml.path.clone())
    } else {
        None
    };

    let task = TaskRecord {
        uri,
        task_path,
        security_descriptor: registration.and_then(|value| value.security_descriptor.clone()),
        source: registration.and_then(|value| value.source.clone()),
        date: registration
            .and_then(|value| value.date.as_deref())
            .and_then(|value| naive_to_utc(value, offset)),
        last_run_date: None,
        author: registration.and_then(|value| value.author.clone()),
        version: registration.and_then(|value| value.version.clone()),
        description: registration.and_then(|value| value.description.clone()),
        documentation: registration.and_then(|value| value.documentation.clone()),
        principal_id: principal.and_then(|value| value.id_attribute.clone()),
        user_id: principal.and_then(|value| value.user_id.clone()),
        logon_type: principal.and_then(|value| value.logon_type.clone()),
        group_id: principal.and_then(|value| value.group_id.clone()),
        display_name: principal.and_then(|value| value.display_name.clone()),
        run_level: principal.and_then(|value| value.run_level.clone()),
        process_token_sid_type: principal.and_then(|value| value.process_token_sid_type.clone()),
        required_privileges: principal.and_then(|value| value.required_privileges.clone()),
        allow_start_on_demand: settings.and_then(|value| value.allow_start_on_demand),
        restart_on_failure_interval: restart.and_then(|value| value.interval.clone()),
        restart_on_failure_count: restart.and_then(|value| value.count.clone()),
        multiple_instances_policy: settings
            .and_then(|value| value.multiple_instances_policy.clone()),
        disallow_start_on_batteries: settings
            .and_then(|value| value.disallow_start_if_on_batteries),
        stop_going_on_batteries: settings.and_then(|value| value.stop_if_going_on_batteries),
        allow_hard_terminate: settings.and_then(|value| value.allow_hard_terminate),
        start_when_available: settings.and_then(|value| value.start_when_available),
        network_profile_name: settings.and_then(|value| value.network_profile_name.clone()),
        run_only_network_available: settings.and_then(|value| value.run_only_if_network_available),
        wake_to_run: settings.and_then(|value| value.wake_to_run),
        enabled: settings.and_then(|value| value.enabled),
        hidden: settings.and_then(|value| value.hidden),
        delete_expired_task_after: settings
            .and_then(|value| value.delete_expired_tasks_after.clone()),
        idle_duration: idle.and_then(|value| value.duration.clone()),
        idle_wait_timeout: idle.and_then(|value| value.wait_timeout.clone()),
        idle_stop_on_idle_end: idle.and_then(|value| value.stop_on_idle_end),
        idle_restart_on_idle: idle.and_then(|value| value.restart_on_idle),
        network_settings_name: network.and_then(|value| value.name.clone()),
        network_settings_id: network.and_then(|value| value.id.clone()),
        execution_time_limit: settings.and_then(|value| value.execution_time_limit.clone()),
        priority: settings
            .and_then(|value| value.priority)
            .map(|value| value.to_string()),
        run_only_idle: settings.and_then(|value| value.run_only_if_idle),
        unified_scheduling_engine: settings.and_then(|value| value.use_unified_scheduling_engine),
        disallow_start_on_remote_app_session: settings
            .and_then(|value| value.disallow_start_on_remote_app_session),
        data: task_xml.data.clone(),
    };

    let triggers = match task_xml.triggers.as_ref() {
        Some(value) => xml_triggers(value, offset),
        None => Vec::new(),
    };

    TaskGroup {
        task,
        triggers,
        actions: xml_actions(&task_xml.actions),
    }
}

/// Render the `Job` priority the way the canonical model expects it
fn job_priority(priority: &JobPriority) -> String {
    match priority {
        JobPriority::Normal => String::from("normal"),
        JobPriority::High => String::from("high"),
        JobPriority::Idle => String::from("idle"),
        JobPriority::Realtime => String::from("realtime"),
        JobPriority::Unknown => String::from("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::{job_priority, normalize_job, normalize_xml};
    use crate::artifacts::tasks::xml::process_xml;
    use chrono::FixedOffset;
    use common::records::{ActionRecord, TriggerKind};
    use common::windows::{
        JobFlags, JobPriority, JobStatus, JobTrigger, JobTriggerKind, TaskJob,
    };

    fn sample_job() -> TaskJob {
        TaskJob {
            job_id: String::from("01402ff8-7371-4bba-a728-a7d4f012d5c6"),
            product_version: String::from("Windows 10"),
            format_version: 1,
            error_retry_count: 0,
            error_retry_interval: 0,
            idle_deadline: 60,
            idle_wait: 15,
            priority: JobPriority::Normal,
            max_run_time: 259200000,
            exit_code: 0,
            status: JobStatus::HasNotRun,
            flags: vec![
                JobFlags::DontStartIfOnBatteries,
                JobFlags::KillIfGoingOnBatteries,
                JobFlags::StartOnlyIfIdle,
                JobFlags::KillOnIdleEnd,
                JobFlags::SystemRequired,
            ],
            system_time: String::from("2023-5-21T10:44:25.794"),
            running_instance_count: 0,
            application_name: String::from("C:\\WINDOWS\\NOTEPAD.EXE"),
            parameters: String::new(),
            working_directory: String::from("C:\\Documents and Settings\\John"),
            author: String::from("user1"),
            comments: String::from("At job task for testing purposes"),
            user_data: String::new(),
            start_error: 0,
            triggers: vec![JobTrigger {
                trigger_size: 48,
                reserved1: 0,
                begin_year: 2023,
                begin_month: 5,
                begin_day: 11,
                end_year: 2023,
                end_month: 5,
                end_day: 12,
                start_hour: 0,
                start_minute: 0,
                minutes_duration: 795,
                minutes_interval: 12,
                flags: vec![
                    common::windows::JobTriggerFlags::HasEndDate,
                    common::windows::JobTriggerFlags::KillAtDurationEnd,
                ],
                kind: JobTriggerKind::Daily,
                specific0: 3,
                specific1: 0,
                specific2: 0,
                padding: 0,
                reserved2: 0,
                reserved3: 0,
            }],
            path: String::from("sysvol\\windows\\tasks\\AtTask.job"),
        }
    }

    #[test]
    fn test_normalize_job() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let group = normalize_job(sample_job(), &utc);

        let task = &group.task;
        assert_eq!(task.uri, None);
        assert_eq!(
            task.task_path.as_ref().unwrap(),
            "sysvol\\windows\\tasks\\AtTask.job"
        );
        assert_eq!(
            task.last_run_date.as_ref().unwrap(),
            "2023-05-21T10:44:25.794+00:00"
        );
        assert_eq!(task.author.as_ref().unwrap(), "user1");
        assert_eq!(task.version.as_ref().unwrap(), "1");
        assert_eq!(
            task.description.as_ref().unwrap(),
            "At job task for testing purposes"
        );
        assert_eq!(task.restart_on_failure_interval, None);
        assert_eq!(task.restart_on_failure_count.as_ref().unwrap(), "0");
        assert_eq!(task.disallow_start_on_batteries, Some(true));
        assert_eq!(task.stop_going_on_batteries, Some(true));
        assert_eq!(task.run_only_network_available, Some(false));
        assert_eq!(task.wake_to_run, Some(true));
        assert_eq!(task.enabled, Some(true));
        assert_eq!(task.hidden, Some(false));
        assert_eq!(task.idle_duration.as_ref().unwrap(), "PT15M");
        assert_eq!(task.idle_wait_timeout.as_ref().unwrap(), "PT1H");
        assert_eq!(task.idle_stop_on_idle_end, Some(true));
        assert_eq!(task.idle_restart_on_idle, Some(false));
        assert_eq!(task.execution_time_limit.as_ref().unwrap(), "P3D");
        assert_eq!(task.priority.as_ref().unwrap(), "normal");
        assert_eq!(task.run_only_idle, Some(true));
        assert_eq!(task.allow_start_on_demand, None);
        assert_eq!(task.unified_scheduling_engine, None);
        assert_eq!(task.multiple_instances_policy, None);

        assert_eq!(group.triggers.len(), 1);
        let trigger = &group.triggers[0];
        assert_eq!(trigger.kind, TriggerKind::Daily);
        assert_eq!(trigger.enabled, Some(true));
        assert_eq!(
            trigger.start_boundary.as_ref().unwrap(),
            "2023-05-11T00:00:00+00:00"
        );
        assert_eq!(
            trigger.end_boundary.as_ref().unwrap(),
            "2023-05-12T00:00:00+00:00"
        );
        assert_eq!(trigger.days_between_triggers, Some(3));
        assert_eq!(trigger.repetition_interval.as_ref().unwrap(), "PT12M");
        assert_eq!(trigger.repetition_duration.as_ref().unwrap(), "PT13H15M");
        assert_eq!(trigger.repetition_stop_duration_end, Some(true));
        assert_eq!(trigger.execution_time_limit.as_ref().unwrap(), "P3D");
        assert_eq!(trigger.padding, Some(0));
        assert_eq!(trigger.reserved2, Some(0));
        assert_eq!(trigger.reserved3, Some(0));

        assert_eq!(group.actions.len(), 1);
        assert_eq!(
            group.actions[0],
            ActionRecord::Exec {
                command: String::from("C:\\WINDOWS\\NOTEPAD.EXE"),
                arguments: Some(String::new()),
                working_directory: Some(String::from("C:\\Documents and Settings\\John")),
            }
        );
    }

    #[test]
    fn test_normalize_xml() {
        let xml = r#"<Task>
          <RegistrationInfo>
            <URI>\Microsoft\Windows\Maps\MapsToastTask</URI>
            <Date>2014-11-05T00:00:00</Date>
            <SecurityDescriptor>D:(A;;FRFX;;;AU)</SecurityDescriptor>
          </RegistrationInfo>
          <Triggers>
            <CalendarTrigger>
              <StartBoundary>2023-05-12T00:00:00</StartBoundary>
              <ScheduleByDay>
                <DaysInterval>1</DaysInterval>
              </ScheduleByDay>
            </CalendarTrigger>
          </Triggers>
          <Principals>
            <Principal id="Users">
              <GroupId>S-1-5-4</GroupId>
              <DisplayName>test_xml.xml</DisplayName>
            </Principal>
          </Principals>
          <Settings>
            <MultipleInstancesPolicy>Queue</MultipleInstancesPolicy>
            <DisallowStartIfOnBatteries>false</DisallowStartIfOnBatteries>
            <StopIfGoingOnBatteries>false</StopIfGoingOnBatteries>
            <StartWhenAvailable>true</StartWhenAvailable>
            <Enabled>true</Enabled>
            <Hidden>true</Hidden>
            <ExecutionTimeLimit>PT5S</ExecutionTimeLimit>
            <UseUnifiedSchedulingEngine>true</UseUnifiedSchedulingEngine>
          </Settings>
          <Actions>
            <ComHandler>
              <ClassId>{9885AEF2-BD9F-41E0-B15E-B3141395E803}</ClassId>
            </ComHandler>
          </Actions>
        </Task>"#;

        let parsed = process_xml(xml, "MapsToastTask").unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let group = normalize_xml(parsed, &utc);

        let task = &group.task;
        assert_eq!(
            task.uri.as_ref().unwrap(),
            "\\Microsoft\\Windows\\Maps\\MapsToastTask"
        );
        assert_eq!(task.task_path, None);
        assert_eq!(task.date.as_ref().unwrap(), "2014-11-05T00:00:00+00:00");
        assert_eq!(task.last_run_date, None);
        assert_eq!(task.version, None);
        assert_eq!(task.principal_id.as_ref().unwrap(), "Users");
        assert_eq!(task.group_id.as_ref().unwrap(), "S-1-5-4");
        assert_eq!(task.display_name.as_ref().unwrap(), "test_xml.xml");
        assert_eq!(task.user_id, None);
        assert_eq!(task.multiple_instances_policy.as_ref().unwrap(), "Queue");
        assert_eq!(task.disallow_start_on_batteries, Some(false));
        assert_eq!(task.stop_going_on_batteries, Some(false));
        assert_eq!(task.start_when_available, Some(true));
        assert_eq!(task.enabled, Some(true));
        assert_eq!(task.hidden, Some(true));
        assert_eq!(task.execution_time_limit.as_ref().unwrap(), "PT5S");
        assert_eq!(task.unified_scheduling_engine, Some(true));
        // Tri-state: absent settings stay absent, not false
        assert_eq!(task.wake_to_run, None);
        assert_eq!(task.run_only_network_available, None);
        assert_eq!(task.priority, None);
        assert_eq!(task.run_only_idle, None);
        assert_eq!(task.idle_duration, None);
        assert_eq!(task.idle_stop_on_idle_end, None);
        assert_eq!(task.data, None);

        assert_eq!(group.triggers.len(), 1);
        assert_eq!(group.triggers[0].kind, TriggerKind::Daily);
        assert_eq!(group.triggers[0].days_between_triggers, Some(1));
        assert_eq!(
            group.triggers[0].start_boundary.as_ref().unwrap(),
            "2023-05-12T00:00:00+00:00"
        );

        assert_eq!(group.actions.len(), 1);
        assert_eq!(
            group.actions[0],
            ActionRecord::ComHandler {
                class_id: String::from("{9885AEF2-BD9F-41E0-B15E-B3141395E803}"),
                data: None,
            }
        );
    }

    #[test]
    fn test_normalize_xml_no_uri_keeps_path() {
        let xml = "<Task><Actions><Exec><Command>calc.exe</Command></Exec></Actions></Task>";
        let parsed = process_xml(xml, "C:\\custom\\task.xml").unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let group = normalize_xml(parsed, &utc);

        assert_eq!(group.task.uri, None);
        assert_eq!(group.task.task_path.as_ref().unwrap(), "C:\\custom\\task.xml");
    }

    #[test]
    fn test_job_priority() {
        assert_eq!(job_priority(&JobPriority::Realtime), "realtime");
    }
}

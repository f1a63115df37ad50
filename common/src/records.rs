use serde::Serialize;
use std::collections::HashMap;

/**
 * Canonical, format-agnostic representation of one Schedule Task.
 * Both the XML format and the legacy `Job` format normalize into this shape.
 *
 * Exactly one identity field is populated: `uri` for XML tasks, `task_path`
 * for binary `Job` files. Optional fields stay `None` when the source format
 * does not encode them. Absent is not the same as empty or false.
 */
#[derive(Debug, PartialEq, Serialize)]
pub struct TaskRecord {
    pub uri: Option<String>,
    pub task_path: Option<String>,
    pub security_descriptor: Option<String>,
    pub source: Option<String>,
    /**RFC 3339 UTC */
    pub date: Option<String>,
    /**RFC 3339 UTC */
    pub last_run_date: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub documentation: Option<String>,
    pub principal_id: Option<String>,
    pub user_id: Option<String>,
    pub logon_type: Option<String>,
    pub group_id: Option<String>,
    pub display_name: Option<String>,
    pub run_level: Option<String>,
    pub process_token_sid_type: Option<String>,
    pub required_privileges: Option<Vec<String>>,
    pub allow_start_on_demand: Option<bool>,
    /**ISO-8601 duration, kept opaque (ex: PT5M) */
    pub restart_on_failure_interval: Option<String>,
    pub restart_on_failure_count: Option<String>,
    pub multiple_instances_policy: Option<String>,
    pub disallow_start_on_batteries: Option<bool>,
    pub stop_going_on_batteries: Option<bool>,
    pub allow_hard_terminate: Option<bool>,
    pub start_when_available: Option<bool>,
    pub network_profile_name: Option<String>,
    pub run_only_network_available: Option<bool>,
    pub wake_to_run: Option<bool>,
    pub enabled: Option<bool>,
    pub hidden: Option<bool>,
    pub delete_expired_task_after: Option<String>,
    pub idle_duration: Option<String>,
    pub idle_wait_timeout: Option<String>,
    pub idle_stop_on_idle_end: Option<bool>,
    pub idle_restart_on_idle: Option<bool>,
    pub network_settings_name: Option<String>,
    pub network_settings_id: Option<String>,
    pub execution_time_limit: Option<String>,
    pub priority: Option<String>,
    pub run_only_idle: Option<bool>,
    pub unified_scheduling_engine: Option<bool>,
    pub disallow_start_on_remote_app_session: Option<bool>,
    /**Arbitrary data, base64 encoded */
    pub data: Option<String>,
}

/// One scheduling rule owned by a single `TaskRecord`
#[derive(Debug, PartialEq, Serialize)]
pub struct TriggerRecord {
    pub kind: TriggerKind,
    pub enabled: Option<bool>,
    /**RFC 3339 UTC */
    pub start_boundary: Option<String>,
    /**RFC 3339 UTC */
    pub end_boundary: Option<String>,
    pub execution_time_limit: Option<String>,
    pub repetition_interval: Option<String>,
    pub repetition_duration: Option<String>,
    pub repetition_stop_duration_end: Option<bool>,
    pub days_between_triggers: Option<u16>,
    pub weeks_between_triggers: Option<u16>,
    /**Day names in calendar order */
    pub days_of_week: Option<Vec<String>>,
    pub day_of_month: Option<Vec<u16>>,
    /**Month names in calendar order */
    pub months_of_year: Option<Vec<String>>,
    pub which_week: Option<Vec<u16>>,
    pub user_id: Option<String>,
    pub delay: Option<String>,
    pub random_delay: Option<String>,
    pub subscription: Option<Vec<String>>,
    pub state_change: Option<String>,
    pub state_name: Option<String>,
    /**Stored verbatim from `Job` triggers, never re-derived */
    pub unused: Option<Vec<u16>>,
    pub padding: Option<u16>,
    pub reserved2: Option<u16>,
    pub reserved3: Option<u16>,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum TriggerKind {
    Once,
    Daily,
    Weekly,
    MonthlyDate,
    MonthlyDayOfWeek,
    Event,
    Logon,
    Idle,
    Boot,
    Registration,
    SessionStateChange,
    WindowsNotification,
    Unrecognized,
}

/// One action owned by a single `TaskRecord`
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "action_type")]
pub enum ActionRecord {
    Exec {
        command: String,
        arguments: Option<String>,
        working_directory: Option<String>,
    },
    ComHandler {
        class_id: String,
        data: Option<String>,
    },
    SendEmail {
        server: Option<String>,
        subject: Option<String>,
        to: Option<String>,
        cc: Option<String>,
        bcc: Option<String>,
        reply_to: Option<String>,
        from: Option<String>,
        headers: Option<HashMap<String, String>>,
        body: Option<String>,
        attachments: Option<Vec<String>>,
    },
    ShowMessage {
        title: Option<String>,
        body: String,
    },
}

/// All records produced from one source file. Grouping never crosses files
#[derive(Debug, PartialEq, Serialize)]
pub struct TaskGroup {
    pub task: TaskRecord,
    pub triggers: Vec<TriggerRecord>,
    pub actions: Vec<ActionRecord>,
}

/// One item of the scan output stream
#[derive(Debug, PartialEq, Serialize)]
pub enum TaskOutput {
    Task(TaskRecord),
    Trigger(TriggerRecord),
    Action(ActionRecord),
    Group(TaskGroup),
}

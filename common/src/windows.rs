use serde::Serialize;
use std::collections::HashMap;

/**
 * The old Windows Task format. Disabled on Windows 8 and higher. But can be enabled via Registry
 * Format at: [libyal](https://github.com/libyal/dtformats/blob/main/documentation/Job%20file%20format.asciidoc)
 */
#[derive(Debug, PartialEq, Serialize)]
pub struct TaskJob {
    pub job_id: String,
    pub product_version: String,
    pub format_version: u16,
    pub error_retry_count: u16,
    pub error_retry_interval: u16,
    pub idle_deadline: u16,
    pub idle_wait: u16,
    pub priority: JobPriority,
    /**Milliseconds */
    pub max_run_time: u32,
    pub exit_code: u32,
    pub status: JobStatus,
    pub flags: Vec<JobFlags>,
    /**Naive SYSTEMTIME of the last run. Empty if the job never ran */
    pub system_time: String,
    pub running_instance_count: u16,
    pub application_name: String,
    pub parameters: String,
    pub working_directory: String,
    pub author: String,
    pub comments: String,
    /**Arbitrary data, base64 encoded */
    pub user_data: String,
    pub start_error: u32,
    pub triggers: Vec<JobTrigger>,
    pub path: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum JobPriority {
    Normal,
    High,
    Idle,
    Realtime,
    Unknown,
}

/// Additional status codes at [Microsoft](https://learn.microsoft.com/en-us/windows/win32/taskschd/task-scheduler-error-and-success-constants)
#[derive(Debug, PartialEq, Serialize)]
pub enum JobStatus {
    Ready,
    Running,
    Disabled,
    HasNotRun,
    NoMoreRuns,
    NotScheduled,
    Terminated,
    NoValidTriggers,
    SomeTriggersFailed,
    BatchLogonProblem,
    Queued,
    Unknown,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum JobFlags {
    Interactive,
    DeleteWhenDone,
    Disabled,
    StartOnlyIfIdle,
    KillOnIdleEnd,
    DontStartIfOnBatteries,
    KillIfGoingOnBatteries,
    RunOnlyIfDocked,
    Hidden,
    RunIfConnectedToInternet,
    RestartOnIdleResume,
    SystemRequired,
    RunOnlyIfLoggedOn,
    ApplicationName,
}

/**
 * One packed 48-byte trigger from the `Job` variable section.
 * The union words (`specific0..2`) are interpreted per `kind` by the
 * normalizer. Padding and reserved values are stored exactly as read.
 */
#[derive(Debug, PartialEq, Serialize)]
pub struct JobTrigger {
    pub trigger_size: u16,
    pub reserved1: u16,
    pub begin_year: u16,
    pub begin_month: u16,
    pub begin_day: u16,
    pub end_year: u16,
    pub end_month: u16,
    pub end_day: u16,
    pub start_hour: u16,
    pub start_minute: u16,
    pub minutes_duration: u32,
    pub minutes_interval: u32,
    pub flags: Vec<JobTriggerFlags>,
    pub kind: JobTriggerKind,
    pub specific0: u16,
    pub specific1: u16,
    pub specific2: u16,
    pub padding: u16,
    pub reserved2: u16,
    pub reserved3: u16,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum JobTriggerFlags {
    HasEndDate,
    KillAtDurationEnd,
    Disabled,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum JobTriggerKind {
    Once,
    Daily,
    Weekly,
    MonthlyDate,
    MonthlyDow,
    OnIdle,
    AtSystemStart,
    AtLogon,
    Unrecognized(u32),
}

/**
 * Structure of a XML format Schedule Task
 * Schema at: [Task XML](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-tsch/0d6383e4-de92-43e7-b0bb-a60cfa36379f)
 */
#[derive(Debug, PartialEq, Serialize)]
pub struct TaskXml {
    pub registration_info: Option<RegistrationInfo>,
    pub triggers: Option<XmlTriggers>,
    pub settings: Option<Settings>,
    /**Arbitrary data, base64 encoded */
    pub data: Option<String>,
    pub principals: Vec<Principals>,
    pub actions: Actions,
    pub path: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct RegistrationInfo {
    pub uri: Option<String>,
    pub security_descriptor: Option<String>,
    pub source: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub documentation: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Principals {
    pub id_attribute: Option<String>,
    pub user_id: Option<String>,
    pub logon_type: Option<String>,
    pub group_id: Option<String>,
    pub display_name: Option<String>,
    pub run_level: Option<String>,
    pub process_token_sid_type: Option<String>,
    pub required_privileges: Option<Vec<String>>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Settings {
    pub allow_start_on_demand: Option<bool>,
    pub restart_on_failure: Option<RestartType>,
    pub multiple_instances_policy: Option<String>,
    pub disallow_start_if_on_batteries: Option<bool>,
    pub stop_if_going_on_batteries: Option<bool>,
    pub allow_hard_terminate: Option<bool>,
    pub start_when_available: Option<bool>,
    pub network_profile_name: Option<String>,
    pub run_only_if_network_available: Option<bool>,
    pub wake_to_run: Option<bool>,
    pub enabled: Option<bool>,
    pub hidden: Option<bool>,
    pub delete_expired_tasks_after: Option<String>,
    pub idle_settings: Option<IdleSettings>,
    pub network_settings: Option<NetworkSettings>,
    pub execution_time_limit: Option<String>,
    pub priority: Option<u8>,
    pub run_only_if_idle: Option<bool>,
    pub use_unified_scheduling_engine: Option<bool>,
    pub disallow_start_on_remote_app_session: Option<bool>,
    pub maintenance_settings: Option<MaintenanceSettings>,
    pub volatile: Option<bool>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct RestartType {
    pub interval: Option<String>,
    pub count: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct IdleSettings {
    pub duration: Option<String>,
    pub wait_timeout: Option<String>,
    pub stop_on_idle_end: Option<bool>,
    pub restart_on_idle: Option<bool>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct NetworkSettings {
    pub name: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct MaintenanceSettings {
    pub period: Option<String>,
    pub deadline: Option<String>,
    pub exclusive: Option<bool>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct XmlTriggers {
    pub boot: Vec<BootTrigger>,
    pub registration: Vec<BootTrigger>,
    pub idle: Vec<IdleTrigger>,
    pub time: Vec<TimeTrigger>,
    pub event: Vec<EventTrigger>,
    pub logon: Vec<LogonTrigger>,
    pub session: Vec<SessionTrigger>,
    pub calendar: Vec<CalendarTrigger>,
    pub wnf: Vec<WnfTrigger>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct BaseTrigger {
    pub id: Option<String>,
    pub start_boundary: Option<String>,
    pub end_boundary: Option<String>,
    pub enabled: Option<bool>,
    pub execution_time_limit: Option<String>,
    pub repetition: Option<Repetition>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Repetition {
    pub interval: String,
    pub duration: Option<String>,
    pub stop_at_duration_end: Option<bool>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct BootTrigger {
    pub common: BaseTrigger,
    pub delay: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct IdleTrigger {
    pub common: BaseTrigger,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct TimeTrigger {
    pub common: BaseTrigger,
    pub random_delay: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct EventTrigger {
    pub common: BaseTrigger,
    pub subscription: Vec<String>,
    pub delay: Option<String>,
    pub number_of_occurrences: Option<u8>,
    pub period_of_occurrence: Option<String>,
    pub matching_element: Option<String>,
    pub value_queries: Option<Vec<String>>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct LogonTrigger {
    pub common: BaseTrigger,
    pub user_id: Option<String>,
    pub delay: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SessionTrigger {
    pub common: BaseTrigger,
    pub user_id: Option<String>,
    pub delay: Option<String>,
    pub state_change: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct WnfTrigger {
    pub common: BaseTrigger,
    pub state_name: String,
    pub delay: Option<String>,
    pub data: Option<String>,
    pub data_offset: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CalendarTrigger {
    pub common: BaseTrigger,
    pub random_delay: Option<String>,
    pub schedule_by_day: Option<ByDay>,
    pub schedule_by_week: Option<ByWeek>,
    pub schedule_by_month: Option<ByMonth>,
    pub schedule_by_month_day_of_week: Option<ByMonthDayWeek>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ByDay {
    pub days_interval: Option<u16>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ByWeek {
    pub weeks_interval: Option<u16>,
    pub days_of_week: Option<Vec<String>>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ByMonth {
    pub days_of_month: Option<Vec<String>>,
    pub months: Option<Vec<String>>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ByMonthDayWeek {
    pub weeks: Option<Vec<String>>,
    pub days_of_week: Option<Vec<String>>,
    pub months: Option<Vec<String>>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Actions {
    pub exec: Vec<ExecType>,
    pub com_handler: Vec<ComHandlerType>,
    pub send_email: Vec<SendEmailType>,
    pub show_message: Vec<ShowMessageType>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ExecType {
    pub command: String,
    pub arguments: Option<String>,
    pub working_directory: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ComHandlerType {
    pub class_id: String,
    pub data: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SendEmailType {
    pub server: Option<String>,
    pub subject: Option<String>,
    pub to: Option<String>,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub reply_to: Option<String>,
    pub from: Option<String>,
    pub header_fields: Option<HashMap<String, String>>,
    pub body: Option<String>,
    pub attachment: Option<Vec<String>>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ShowMessageType {
    pub title: Option<String>,
    pub body: String,
}

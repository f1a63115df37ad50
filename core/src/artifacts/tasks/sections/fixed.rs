use crate::utils::{
    nom_helper::{nom_unsigned_four_bytes, nom_unsigned_two_bytes, Endian},
    uuid::format_guid_le_bytes,
};
use common::windows::{JobFlags, JobPriority, JobStatus};
use nom::bytes::complete::take;
use std::mem::size_of;

#[derive(Debug)]
pub(crate) struct Fixed {
    pub(crate) product_version: String,
    pub(crate) format_version: u16,
    pub(crate) job_id: String,
    pub(crate) app_offset: u16,
    pub(crate) triggers_offset: u16,
    pub(crate) error_retry_count: u16,
    pub(crate) error_retry_interval: u16,
    pub(crate) idle_deadline: u16,
    pub(crate) idle_wait: u16,
    pub(crate) priority: JobPriority,
    pub(crate) max_run_time: u32,
    pub(crate) exit_code: u32,
    pub(crate) status: JobStatus,
    pub(crate) flags: Vec<JobFlags>,
    pub(crate) system_time: String,
}

/// Parse the fixed 68 byte section at the start of a `Job` file
pub(crate) fn parse_fixed(data: &[u8]) -> nom::IResult<&[u8], Fixed> {
    let (input, product_version_data) = nom_unsigned_two_bytes(data, Endian::Le)?;
    let (input, format_version) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, uuid_data) = take(size_of::<u128>())(input)?;
    let job_id = format_guid_le_bytes(uuid_data);

    let (input, app_offset) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, triggers_offset) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, error_retry_count) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, error_retry_interval) = nom_unsigned_two_bytes(input, Endian::Le)?;

    let (input, idle_deadline) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, idle_wait) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, priority_data) = nom_unsigned_four_bytes(input, Endian::Le)?;

    let (input, max_run_time) = nom_unsigned_four_bytes(input, Endian::Le)?;
    let (input, exit_code) = nom_unsigned_four_bytes(input, Endian::Le)?;
    let (input, status_data) = nom_unsigned_four_bytes(input, Endian::Le)?;
    let (input, flag_data) = nom_unsigned_four_bytes(input, Endian::Le)?;

    let (input, system_time_data) = take(size_of::<u128>())(input)?;
    let (_, system_time) = system_time(system_time_data)?;

    let fixed = Fixed {
        product_version: product_version(&product_version_data),
        format_version,
        job_id,
        app_offset,
        triggers_offset,
        error_retry_count,
        error_retry_interval,
        idle_deadline,
        idle_wait,
        priority: priority(priority_data),
        max_run_time,
        exit_code,
        status: status(status_data),
        flags: flags(flag_data),
        system_time,
    };

    Ok((input, fixed))
}

/// Determine the Product Version from the `Job` file
fn product_version(version: &u16) -> String {
    match version {
        0x400 => String::from("Windows NT 4.0"),
        0x500 => String::from("Windows 2000"),
        0x501 => String::from("Windows XP"),
        0x600 => String::from("Windows Vista"),
        0x601 => String::from("Windows 7"),
        0x602 => String::from("Windows 8"),
        0x603 => String::from("Windows 8.1"),
        0xa00 => String::from("Windows 10"),
        _ => String::from("Unknown"),
    }
}

/// Determine the `Job` Priority
fn priority(priority: u32) -> JobPriority {
    match priority {
        0x20 => JobPriority::Normal,
        0x40 => JobPriority::High,
        0x80 => JobPriority::Idle,
        0x100 => JobPriority::Realtime,
        _ => JobPriority::Unknown,
    }
}

/// Determine the `Job` Status
fn status(status: u32) -> JobStatus {
    match status {
        0x41300 => JobStatus::Ready,
        0x41301 => JobStatus::Running,
        0x41302 => JobStatus::Disabled,
        0x41303 => JobStatus::HasNotRun,
        0x41304 => JobStatus::NoMoreRuns,
        0x41305 => JobStatus::NotScheduled,
        0x41306 => JobStatus::Terminated,
        0x41307 => JobStatus::NoValidTriggers,
        0x4131b => JobStatus::SomeTriggersFailed,
        0x4311c => JobStatus::BatchLogonProblem,
        0x43125 => JobStatus::Queued,
        _ => JobStatus::Unknown,
    }
}

/// Determine the Flags associated with the `Job`
fn flags(flags: u32) -> Vec<JobFlags> {
    let values = [
        (0x1, JobFlags::Interactive),
        (0x2, JobFlags::DeleteWhenDone),
        (0x4, JobFlags::Disabled),
        (0x10, JobFlags::StartOnlyIfIdle),
        (0x20, JobFlags::KillOnIdleEnd),
        (0x40, JobFlags::DontStartIfOnBatteries),
        (0x80, JobFlags::KillIfGoingOnBatteries),
        (0x100, JobFlags::RunOnlyIfDocked),
        (0x200, JobFlags::Hidden),
        (0x400, JobFlags::RunIfConnectedToInternet),
        (0x800, JobFlags::RestartOnIdleResume),
        (0x1000, JobFlags::SystemRequired),
        (0x2000, JobFlags::RunOnlyIfLoggedOn),
        (0x01000000, JobFlags::ApplicationName),
    ];

    let mut flag_vec = Vec::new();
    for (bit, value) in values {
        if (flags & bit) == bit {
            flag_vec.push(value);
        }
    }

    flag_vec
}

/// Get last run time of the `Job`. All zeroes means the task never ran
fn system_time(data: &[u8]) -> nom::IResult<&[u8], String> {
    if data == [0; 16] {
        return Ok((data, String::new()));
    }

    let (input, year) = nom_unsigned_two_bytes(data, Endian::Le)?;
    let (input, month) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, _weekday) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, day) = nom_unsigned_two_bytes(input, Endian::Le)?;

    let (input, hours) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, mins) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, seconds) = nom_unsigned_two_bytes(input, Endian::Le)?;
    let (input, milliseconds) = nom_unsigned_two_bytes(input, Endian::Le)?;

    // Milliseconds are a fraction. Pad to three digits so 5 reads as .005 and not .5
    let timestamp = format!("{year}-{month}-{day}T{hours}:{mins}:{seconds}.{milliseconds:03}");

    Ok((input, timestamp))
}

#[cfg(test)]
mod tests {
    use super::{flags, parse_fixed, priority, product_version, status, system_time};
    use common::windows::{JobFlags, JobPriority, JobStatus};

    /// A Windows 10 At1.job fixed section
    fn fixed_section() -> Vec<u8> {
        let mut data = vec![
            0x00, 0x0a, // Windows 10
            0x01, 0x00, // format version 1
        ];
        // job id 01402ff8-7371-4bba-a728-a7d4f012d5c6
        data.extend([
            0xf8, 0x2f, 0x40, 0x01, 0x71, 0x73, 0xba, 0x4b, 0xa7, 0x28, 0xa7, 0xd4, 0xf0, 0x12,
            0xd5, 0xc6,
        ]);
        data.extend(70u16.to_le_bytes()); // app name offset
        data.extend(222u16.to_le_bytes()); // triggers offset
        data.extend([0x00, 0x00, 0x00, 0x00]); // error retry count and interval
        data.extend(60u16.to_le_bytes()); // idle deadline
        data.extend(10u16.to_le_bytes()); // idle wait
        data.extend(0x20u32.to_le_bytes()); // normal priority
        data.extend(259200000u32.to_le_bytes()); // max run time
        data.extend([0x00, 0x00, 0x00, 0x00]); // exit code
        data.extend(0x41303u32.to_le_bytes()); // has not run
        data.extend(0x01000002u32.to_le_bytes()); // DeleteWhenDone and ApplicationName
        data.extend([0x00; 16]); // never ran
        data
    }

    #[test]
    fn test_parse_fixed() {
        let data = fixed_section();
        let (remaining, result) = parse_fixed(&data).unwrap();

        assert!(remaining.is_empty());
        assert_eq!(result.product_version, "Windows 10");
        assert_eq!(result.format_version, 1);
        assert_eq!(result.job_id, "01402ff8-7371-4bba-a728-a7d4f012d5c6");
        assert_eq!(result.app_offset, 70);
        assert_eq!(result.triggers_offset, 222);
        assert_eq!(result.error_retry_count, 0);
        assert_eq!(result.error_retry_interval, 0);
        assert_eq!(result.idle_deadline, 60);
        assert_eq!(result.idle_wait, 10);
        assert_eq!(result.priority, JobPriority::Normal);
        assert_eq!(result.max_run_time, 259200000);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.status, JobStatus::HasNotRun);
        assert_eq!(
            result.flags,
            vec![JobFlags::DeleteWhenDone, JobFlags::ApplicationName]
        );
        assert_eq!(result.system_time, "");
    }

    #[test]
    fn test_product_version() {
        assert_eq!(product_version(&0x400), "Windows NT 4.0");
        assert_eq!(product_version(&0x999), "Unknown");
    }

    #[test]
    fn test_priority() {
        assert_eq!(priority(0x100), JobPriority::Realtime);
    }

    #[test]
    fn test_status() {
        assert_eq!(status(0x41304), JobStatus::NoMoreRuns);
    }

    #[test]
    fn test_flags() {
        assert_eq!(flags(0x1), vec![JobFlags::Interactive]);
        assert_eq!(
            flags(0x60),
            vec![JobFlags::KillOnIdleEnd, JobFlags::DontStartIfOnBatteries]
        );
    }

    #[test]
    fn test_system_time() {
        let test = [
            0xe7, 0x07, 0x05, 0x00, 0x04, 0x00, 0x0b, 0x00, 0x0c, 0x00, 0x1e, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        let (_, result) = system_time(&test).unwrap();
        assert_eq!(result, "2023-5-11T12:30:0.000");
    }

    #[test]
    fn test_system_time_small_milliseconds() {
        let test = [
            0xe7, 0x07, 0x05, 0x00, 0x00, 0x00, 0x15, 0x00, 0x0a, 0x00, 0x2c, 0x00, 0x19, 0x00,
            0x05, 0x00,
        ];
        let (_, result) = system_time(&test).unwrap();
        assert_eq!(result, "2023-5-21T10:44:25.005");
    }
}

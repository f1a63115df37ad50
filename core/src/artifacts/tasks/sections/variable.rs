use crate::utils::{
    encoding::base64_encode_standard,
    nom_helper::{nom_unsigned_four_bytes, nom_unsigned_two_bytes, Endian},
    strings::extract_utf16_string,
};
use common::windows::{JobTrigger, JobTriggerFlags, JobTriggerKind};
use nom::bytes::complete::take;

#[derive(Debug)]
pub(crate) struct Variable {
    pub(crate) running_instance_count: u16,
    pub(crate) app_name: String,
    pub(crate) parameters: String,
    pub(crate) working_directory: String,
    pub(crate) author: String,
    pub(crate) comment: String,
    pub(crate) user_data: String,
    pub(crate) start_error: u32,
    /**Unused */
    pub(crate) task_flags: u32,
    pub(crate) triggers: Vec<JobTrigger>,
}

/// Parse the Variable section of the `Job` file
pub(crate) fn parse_variable(data: &[u8]) -> nom::IResult<&[u8], Variable> {
    let (input, running_instance_count) = nom_unsigned_two_bytes(data, Endian::Le)?;
    let (input, app_name) = get_string(input)?;
    let (input, parameters) = get_string(input)?;
    let (input, working_directory) = get_string(input)?;
    let (input, author) = get_string(input)?;
    let (input, comment) = get_string(input)?;

    let (input, user_data) = user_data(input)?;
    let (input, (start_error, task_flags)) = reserved_data(input)?;

    let (input, triggers) = triggers(input)?;

    let variable = Variable {
        running_instance_count,
        app_name,
        parameters,
        working_directory,
        author,
        comment,
        user_data,
        start_error,
        task_flags,
        triggers,
    };

    Ok((input, variable))
}

/// Extract strings in the Variable section
fn get_string(data: &[u8]) -> nom::IResult<&[u8], String> {
    let (input, size) = nom_unsigned_two_bytes(data, Endian::Le)?;

    // Size is in UTF16 characters, including the null terminator
    let adjust_size: usize = 2;
    let (input, string_data) = take(usize::from(size) * adjust_size)(input)?;
    let value = extract_utf16_string(string_data);

    Ok((input, value))
}

/// Get User Data in the Variable section
fn user_data(data: &[u8]) -> nom::IResult<&[u8], String> {
    let (input, size) = nom_unsigned_two_bytes(data, Endian::Le)?;

    let (input, user_data) = take(size)(input)?;
    let value = base64_encode_standard(user_data);

    Ok((input, value))
}

/// Get Reserved Data in the Variable section
fn reserved_data(data: &[u8]) -> nom::IResult<&[u8], (u32, u32)> {
    let (input, size) = nom_unsigned_two_bytes(data, Endian::Le)?;

    let none = 0;
    if size == none {
        return Ok((input, (0, 0)));
    }

    let (input, start_error) = nom_unsigned_four_bytes(input, Endian::Le)?;
    let (input, task_flags) = nom_unsigned_four_bytes(input, Endian::Le)?;

    Ok((input, (start_error, task_flags)))
}

/// Get the 48 byte `Job` triggers
fn triggers(data: &[u8]) -> nom::IResult<&[u8], Vec<JobTrigger>> {
    let (mut trigger_data, trigger_count) = nom_unsigned_two_bytes(data, Endian::Le)?;
    let mut count = 0;

    let mut trigger_vec = Vec::new();
    while count < trigger_count {
        let (input, trigger_size) = nom_unsigned_two_bytes(trigger_data, Endian::Le)?;
        let (input, reserved1) = nom_unsigned_two_bytes(input, Endian::Le)?;

        let (input, begin_year) = nom_unsigned_two_bytes(input, Endian::Le)?;
        let (input, begin_month) = nom_unsigned_two_bytes(input, Endian::Le)?;
        let (input, begin_day) = nom_unsigned_two_bytes(input, Endian::Le)?;

        let (input, end_year) = nom_unsigned_two_bytes(input, Endian::Le)?;
        let (input, end_month) = nom_unsigned_two_bytes(input, Endian::Le)?;
        let (input, end_day) = nom_unsigned_two_bytes(input, Endian::Le)?;

        let (input, start_hour) = nom_unsigned_two_bytes(input, Endian::Le)?;
        let (input, start_minute) = nom_unsigned_two_bytes(input, Endian::Le)?;

        let (input, minutes_duration) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, minutes_interval) = nom_unsigned_four_bytes(input, Endian::Le)?;

        let (input, flag_data) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, type_data) = nom_unsigned_four_bytes(input, Endian::Le)?;

        let (input, specific0) = nom_unsigned_two_bytes(input, Endian::Le)?;
        let (input, specific1) = nom_unsigned_two_bytes(input, Endian::Le)?;
        let (input, specific2) = nom_unsigned_two_bytes(input, Endian::Le)?;

        let (input, padding) = nom_unsigned_two_bytes(input, Endian::Le)?;
        let (input, reserved2) = nom_unsigned_two_bytes(input, Endian::Le)?;
        let (input, reserved3) = nom_unsigned_two_bytes(input, Endian::Le)?;

        let trigger = JobTrigger {
            trigger_size,
            reserved1,
            begin_year,
            begin_month,
            begin_day,
            end_year,
            end_month,
            end_day,
            start_hour,
            start_minute,
            minutes_duration,
            minutes_interval,
            flags: trigger_flags(flag_data),
            kind: trigger_kind(type_data),
            specific0,
            specific1,
            specific2,
            padding,
            reserved2,
            reserved3,
        };
        trigger_vec.push(trigger);
        trigger_data = input;

        count += 1;
    }

    Ok((trigger_data, trigger_vec))
}

/// Get Trigger Flags
fn trigger_flags(data: u32) -> Vec<JobTriggerFlags> {
    let end_data = 0x1;
    let duration_end = 0x2;
    let disabled = 0x4;

    let mut flag_vec = Vec::new();

    if (data & end_data) == end_data {
        flag_vec.push(JobTriggerFlags::HasEndDate);
    }
    if (data & duration_end) == duration_end {
        flag_vec.push(JobTriggerFlags::KillAtDurationEnd);
    }
    if (data & disabled) == disabled {
        flag_vec.push(JobTriggerFlags::Disabled);
    }

    flag_vec
}

/// Get the Trigger Type
fn trigger_kind(data: u32) -> JobTriggerKind {
    match data {
        0x0 => JobTriggerKind::Once,
        0x1 => JobTriggerKind::Daily,
        0x2 => JobTriggerKind::Weekly,
        0x3 => JobTriggerKind::MonthlyDate,
        0x4 => JobTriggerKind::MonthlyDow,
        0x5 => JobTriggerKind::OnIdle,
        0x6 => JobTriggerKind::AtSystemStart,
        0x7 => JobTriggerKind::AtLogon,
        _ => JobTriggerKind::Unrecognized(data),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        get_string, parse_variable, reserved_data, trigger_flags, trigger_kind, triggers, user_data,
    };
    use common::windows::{JobTriggerFlags, JobTriggerKind};

    /// Build a Variable section for cmd.exe with one Once trigger
    fn variable_section() -> Vec<u8> {
        let mut data = vec![0x00, 0x00]; // running instance count
        for value in ["cmd.exe", "", "", "WORKGROUP\\DESKTOP$", "At job"] {
            let chars: Vec<u16> = value.encode_utf16().collect();
            data.extend(((chars.len() as u16) + 1).to_le_bytes());
            for unit in chars {
                data.extend(unit.to_le_bytes());
            }
            data.extend([0x00, 0x00]); // null terminator
        }
        data.extend([0x00, 0x00]); // no user data
        data.extend(8u16.to_le_bytes()); // reserved section
        data.extend(267011u32.to_le_bytes()); // start error
        data.extend([0x00, 0x00, 0x00, 0x00]); // task flags

        data.extend(1u16.to_le_bytes()); // one trigger
        data.extend(48u16.to_le_bytes()); // trigger size
        data.extend([0x00, 0x00]); // reserved1
        data.extend(2023u16.to_le_bytes());
        data.extend(5u16.to_le_bytes());
        data.extend(11u16.to_le_bytes()); // begin date
        data.extend([0x00; 6]); // no end date
        data.extend(13u16.to_le_bytes());
        data.extend(15u16.to_le_bytes()); // start time
        data.extend([0x00; 8]); // no duration or interval
        data.extend(0u32.to_le_bytes()); // flags
        data.extend(0u32.to_le_bytes()); // Once
        data.extend([0x00; 6]); // trigger specific values
        data.extend([0x00; 6]); // padding and reserved
        data
    }

    #[test]
    fn test_parse_variable() {
        let data = variable_section();
        let (_, result) = parse_variable(&data).unwrap();

        assert_eq!(result.running_instance_count, 0);
        assert_eq!(result.app_name, "cmd.exe");
        assert_eq!(result.parameters, "");
        assert_eq!(result.working_directory, "");
        assert_eq!(result.author, "WORKGROUP\\DESKTOP$");
        assert_eq!(result.comment, "At job");
        assert_eq!(result.user_data, "");
        assert_eq!(result.start_error, 267011);
        assert_eq!(result.task_flags, 0);

        assert_eq!(result.triggers.len(), 1);
        let trigger = &result.triggers[0];
        assert_eq!(trigger.trigger_size, 48);
        assert_eq!(trigger.begin_year, 2023);
        assert_eq!(trigger.begin_month, 5);
        assert_eq!(trigger.begin_day, 11);
        assert_eq!(trigger.start_hour, 13);
        assert_eq!(trigger.start_minute, 15);
        assert_eq!(trigger.kind, JobTriggerKind::Once);
        assert_eq!(trigger.flags, vec![]);
        assert_eq!(trigger.padding, 0);
        assert_eq!(trigger.reserved2, 0);
        assert_eq!(trigger.reserved3, 0);
    }

    #[test]
    fn test_get_string() {
        let test = [
            8, 0, 99, 0, 109, 0, 100, 0, 46, 0, 101, 0, 120, 0, 101, 0, 0, 0, 0,
        ];
        let (_, result) = get_string(&test).unwrap();
        assert_eq!(result, "cmd.exe");
    }

    #[test]
    fn test_get_string_size_larger_than_data() {
        // Size word claims 0x8000 UTF16 characters but almost no data follows
        let test = [0x00, 0x80, 65, 0];
        assert!(get_string(&test).is_err());
    }

    #[test]
    fn test_user_data() {
        let test = [
            8, 0, 99, 0, 109, 0, 100, 0, 46, 0, 101, 0, 120, 0, 101, 0, 0, 0, 0,
        ];
        let (_, result) = user_data(&test).unwrap();
        assert_eq!(result, "YwBtAGQALgA=");
    }

    #[test]
    fn test_reserved_data() {
        let test = [8, 0, 3, 19, 4, 0, 0, 0, 0, 0];
        let (_, (error, task_flags)) = reserved_data(&test).unwrap();
        assert_eq!(error, 267011);
        assert_eq!(task_flags, 0);
    }

    #[test]
    fn test_reserved_data_empty() {
        let test = [0, 0];
        let (_, (error, task_flags)) = reserved_data(&test).unwrap();
        assert_eq!(error, 0);
        assert_eq!(task_flags, 0);
    }

    #[test]
    fn test_triggers_weekly() {
        let mut test = Vec::new();
        test.extend(1u16.to_le_bytes());
        test.extend(48u16.to_le_bytes());
        test.extend([0x00, 0x00]);
        test.extend(2023u16.to_le_bytes());
        test.extend(5u16.to_le_bytes());
        test.extend(11u16.to_le_bytes());
        test.extend([0x00; 6]);
        test.extend([0x00; 4]);
        test.extend([0x00; 8]);
        test.extend(0x1u32.to_le_bytes()); // HasEndDate
        test.extend(0x2u32.to_le_bytes()); // Weekly
        test.extend(1u16.to_le_bytes()); // every week
        test.extend(0x7cu16.to_le_bytes()); // Monday through Friday
        test.extend([0x00; 2]);
        test.extend([0x00; 6]);

        let (_, result) = triggers(&test).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, JobTriggerKind::Weekly);
        assert_eq!(result[0].flags, vec![JobTriggerFlags::HasEndDate]);
        assert_eq!(result[0].specific0, 1);
        assert_eq!(result[0].specific1, 0x7c);
    }

    #[test]
    fn test_trigger_flags() {
        assert_eq!(trigger_flags(0x7).len(), 3);
    }

    #[test]
    fn test_trigger_kind() {
        assert_eq!(trigger_kind(0x4), JobTriggerKind::MonthlyDow);
        assert_eq!(trigger_kind(0x30), JobTriggerKind::Unrecognized(0x30));
    }
}

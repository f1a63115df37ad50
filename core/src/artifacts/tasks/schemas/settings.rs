use crate::artifacts::tasks::error::TaskError;
use common::windows::{IdleSettings, MaintenanceSettings, NetworkSettings, RestartType, Settings};
use log::error;
use quick_xml::{events::Event, Reader};

/// Parse the `Settings` subtree of a Task
pub(crate) fn parse_settings(reader: &mut Reader<&[u8]>) -> Result<Settings, TaskError> {
    let mut info = Settings {
        allow_start_on_demand: None,
        restart_on_failure: None,
        multiple_instances_policy: None,
        disallow_start_if_on_batteries: None,
        stop_if_going_on_batteries: None,
        allow_hard_terminate: None,
        start_when_available: None,
        network_profile_name: None,
        run_only_if_network_available: None,
        wake_to_run: None,
        enabled: None,
        hidden: None,
        delete_expired_tasks_after: None,
        idle_settings: None,
        network_settings: None,
        execution_time_limit: None,
        priority: None,
        run_only_if_idle: None,
        use_unified_scheduling_engine: None,
        disallow_start_on_remote_app_session: None,
        maintenance_settings: None,
        volatile: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Settings xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"AllowStartOnDemand" => {
                    info.allow_start_on_demand = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"RestartOnFailure" => {
                    info.restart_on_failure = Some(parse_restart(reader)?);
                }
                b"MultipleInstancesPolicy" => {
                    info.multiple_instances_policy =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"DisallowStartIfOnBatteries" => {
                    info.disallow_start_if_on_batteries = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"StopIfGoingOnBatteries" => {
                    info.stop_if_going_on_batteries = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"AllowHardTerminate" => {
                    info.allow_hard_terminate = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"StartWhenAvailable" => {
                    info.start_when_available = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"NetworkProfileName" => {
                    info.network_profile_name =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"RunOnlyIfNetworkAvailable" => {
                    info.run_only_if_network_available = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"WakeToRun" => {
                    info.wake_to_run = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"Enabled" => {
                    info.enabled = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"Hidden" => {
                    info.hidden = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"DeleteExpiredTaskAfter" => {
                    info.delete_expired_tasks_after =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"IdleSettings" => {
                    info.idle_settings = Some(parse_idle(reader)?);
                }
                b"NetworkSettings" => {
                    info.network_settings = Some(parse_network(reader)?);
                }
                b"ExecutionTimeLimit" => {
                    info.execution_time_limit =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Priority" => {
                    info.priority = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"RunOnlyIfIdle" => {
                    info.run_only_if_idle = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"UseUnifiedSchedulingEngine" => {
                    info.use_unified_scheduling_engine = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"DisallowStartOnRemoteAppSession" => {
                    info.disallow_start_on_remote_app_session = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"MaintenanceSettings" => {
                    info.maintenance_settings = Some(parse_maintenance(reader)?);
                }
                b"Volatile" => {
                    info.volatile = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Settings" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(info)
}

/// Parse `RestartOnFailure` options
fn parse_restart(reader: &mut Reader<&[u8]>) -> Result<RestartType, TaskError> {
    let mut restart = RestartType {
        interval: None,
        count: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read RestartOnFailure xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Interval" => {
                    restart.interval =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Count" => {
                    restart.count =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"RestartOnFailure" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(restart)
}

/// Parse `IdleSettings` options
fn parse_idle(reader: &mut Reader<&[u8]>) -> Result<IdleSettings, TaskError> {
    let mut idle = IdleSettings {
        duration: None,
        wait_timeout: None,
        stop_on_idle_end: None,
        restart_on_idle: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read IdleSettings xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Duration" => {
                    idle.duration =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"WaitTimeout" => {
                    idle.wait_timeout =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"StopOnIdleEnd" => {
                    idle.stop_on_idle_end = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                b"RestartOnIdle" => {
                    idle.restart_on_idle = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"IdleSettings" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(idle)
}

/// Parse `NetworkSettings` options
fn parse_network(reader: &mut Reader<&[u8]>) -> Result<NetworkSettings, TaskError> {
    let mut network = NetworkSettings {
        name: None,
        id: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read NetworkSettings xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Name" => {
                    network.name =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Id" => {
                    network.id =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"NetworkSettings" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(network)
}

/// Parse `MaintenanceSettings` options
fn parse_maintenance(reader: &mut Reader<&[u8]>) -> Result<MaintenanceSettings, TaskError> {
    let mut maintenance = MaintenanceSettings {
        period: None,
        deadline: None,
        exclusive: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read MaintenanceSettings xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Period" => {
                    maintenance.period =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Deadline" => {
                    maintenance.deadline =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Exclusive" => {
                    maintenance.exclusive = Some(
                        str::parse(&reader.read_text(tag.name()).unwrap_or_default())
                            .unwrap_or_default(),
                    );
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"MaintenanceSettings" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(maintenance)
}

use sysinfo::{Pid, System};

/// Name of the managed server binary as it appears in the process table.
pub const SERVER_PROCESS_NAME: &str = "ArmaReforgerServer";

/// Scans the process table for the managed server and returns its pid.
///
/// The result is recomputed on every call; no handle is kept, since the
/// server can die or be restarted outside the panel's control. With more
/// than one matching process the first hit wins and the scan order is
/// unspecified, but only a single instance is expected. A failed scan is
/// indistinguishable from "not running".
pub fn find_server_pid(system: &mut System, process_name: &str) -> Option<u32> {
    system.refresh_processes();
    system
        .processes()
        .iter()
        .find(|(_, process)| {
            process.name().contains(process_name)
                || process.cmd().iter().any(|arg| arg.contains(process_name))
        })
        .map(|(pid, _)| pid.as_u32())
}

/// Seconds since the process started, or 0 if it has already exited or the
/// query fails. Advisory only; never an error.
pub fn process_uptime(system: &mut System, pid: u32) -> u64 {
    system.refresh_processes();
    system
        .process(Pid::from_u32(pid))
        .map(|process| process.run_time())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_of_unknown_pid_is_zero() {
        let mut system = System::new();
        // pid near the top of the 32-bit range should not exist
        assert_eq!(process_uptime(&mut system, u32::MAX - 7), 0);
    }

    #[test]
    fn nonexistent_binary_is_not_found() {
        let mut system = System::new();
        assert_eq!(
            find_server_pid(&mut system, "NoSuchReforgerBinary42"),
            None
        );
    }
}

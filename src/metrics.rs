use serde::Serialize;
use sysinfo::{Pid, System};

/// One point-in-time resource snapshot. Produced fresh per query and never
/// stored; every field degrades to zero when the underlying query fails.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MetricsSample {
    pub cpu: f64,
    pub ram_process: f64,
    pub uptime_sec: u64,
    pub ram_used: f64,
    pub ram_total: f64,
}

/// Samples CPU, memory and uptime for the given pid, plus host-wide memory.
/// With no pid the process-specific fields are zero.
pub fn sample(system: &mut System, pid: Option<u32>) -> MetricsSample {
    system.refresh_memory();
    system.refresh_cpu();
    system.refresh_processes();

    let total_kib = system.total_memory() / 1024;
    let available_kib = system.available_memory() / 1024;
    // used = total - available; "total - free" would overcount because free
    // ignores reclaimable caches
    let ram_total = kib_to_mib(total_kib);
    let ram_used = kib_to_mib(total_kib.saturating_sub(available_kib));

    let (cpu, ram_process, uptime_sec) =
        match pid.and_then(|pid| system.process(Pid::from_u32(pid))) {
            Some(process) => (
                normalize_cpu(process.cpu_usage(), system.cpus().len()),
                kib_to_mib(process.memory() / 1024),
                process.run_time(),
            ),
            None => (0.0, 0.0, 0),
        };

    MetricsSample {
        cpu,
        ram_process,
        uptime_sec,
        ram_used,
        ram_total,
    }
}

/// Divides the raw per-core percentage by the logical core count so the
/// result stays below 100 on multi-core hosts. One decimal.
pub fn normalize_cpu(raw_percent: f32, core_count: usize) -> f64 {
    let cores = core_count.max(1) as f64;
    round_one(f64::from(raw_percent) / cores)
}

pub fn kib_to_mib(kib: u64) -> f64 {
    round_one(kib as f64 / 1024.0)
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn format_uptime(seconds: u64) -> String {
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_is_normalized_per_core() {
        assert_eq!(normalize_cpu(400.0, 8), 50.0);
    }

    #[test]
    fn zero_cores_does_not_divide_by_zero() {
        assert_eq!(normalize_cpu(37.0, 0), 37.0);
    }

    #[test]
    fn kib_converts_and_rounds() {
        assert_eq!(kib_to_mib(1536), 1.5);
        assert_eq!(kib_to_mib(0), 0.0);
    }

    #[test]
    fn uptime_formats_by_magnitude() {
        assert_eq!(format_uptime(45), "45s");
        assert_eq!(format_uptime(125), "2m 5s");
        assert_eq!(format_uptime(7325), "2h 2m");
    }

    #[test]
    fn sample_without_pid_has_zero_process_fields() {
        let mut system = System::new();
        let sample = sample(&mut system, None);
        assert_eq!(sample.cpu, 0.0);
        assert_eq!(sample.ram_process, 0.0);
        assert_eq!(sample.uptime_sec, 0);
    }
}

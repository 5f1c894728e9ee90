//! Wall-clock and process CPU timing for the verbose summary

use std::time::Instant;

/// Value reported when the CPU clock cannot be sampled
pub const SAMPLE_FAILED: f64 = -1.0;

/// One reading of both clocks
#[derive(Debug, Clone, Copy)]
pub struct TimingSample {
    pub real: Instant,
    /// Process CPU time in seconds, or [`SAMPLE_FAILED`]
    pub cpu: f64,
}

impl TimingSample {
    pub fn now() -> Self {
        Self {
            real: Instant::now(),
            cpu: cpu_seconds(),
        }
    }
}

/// Elapsed durations in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Elapsed {
    pub real: f64,
    /// CPU seconds, or [`SAMPLE_FAILED`] if either CPU sample failed
    pub cpu: f64,
}

/// Session-wide timer, started once at the first verbose test
#[derive(Debug, Default)]
pub struct Timer {
    baseline: Option<TimingSample>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the baseline sample unless one exists; returns true if it started now
    pub fn start_if_needed(&mut self) -> bool {
        if self.baseline.is_some() {
            return false;
        }
        self.baseline = Some(TimingSample::now());
        log::debug!("timer started");
        true
    }

    pub fn is_started(&self) -> bool {
        self.baseline.is_some()
    }

    /// Time since the baseline, or zero if the timer never started
    pub fn elapsed(&self) -> Elapsed {
        match self.baseline {
            Some(start) => elapsed_between(&start, &TimingSample::now()),
            None => Elapsed::default(),
        }
    }
}

fn elapsed_between(start: &TimingSample, end: &TimingSample) -> Elapsed {
    let cpu = if start.cpu == SAMPLE_FAILED || end.cpu == SAMPLE_FAILED {
        SAMPLE_FAILED
    } else {
        end.cpu - start.cpu
    };
    Elapsed {
        real: end.real.duration_since(start.real).as_secs_f64(),
        cpu,
    }
}

/// CPU time consumed by this process, in seconds
#[cfg(unix)]
pub fn cpu_seconds() -> f64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
    if rc != 0 {
        return SAMPLE_FAILED;
    }
    ts.tv_sec as f64 + ts.tv_nsec as f64 / 1_000_000_000.0
}

/// CPU time is only sampled on unix hosts
#[cfg(not(unix))]
pub fn cpu_seconds() -> f64 {
    SAMPLE_FAILED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_only_once() {
        let mut timer = Timer::new();
        assert!(!timer.is_started());
        assert!(timer.start_if_needed());
        assert!(!timer.start_if_needed());
        assert!(timer.is_started());
    }

    #[test]
    fn test_unstarted_timer_reports_zero() {
        let timer = Timer::new();
        assert_eq!(timer.elapsed(), Elapsed::default());
    }

    #[test]
    fn test_elapsed_is_non_negative() {
        let mut timer = Timer::new();
        timer.start_if_needed();
        let elapsed = timer.elapsed();
        assert!(elapsed.real >= 0.0);
        assert!(elapsed.cpu >= 0.0 || elapsed.cpu == SAMPLE_FAILED);
    }

    #[test]
    fn test_failed_cpu_sample_propagates() {
        let start = TimingSample {
            real: Instant::now(),
            cpu: SAMPLE_FAILED,
        };
        let end = TimingSample {
            real: Instant::now(),
            cpu: 2.5,
        };
        assert_eq!(elapsed_between(&start, &end).cpu, SAMPLE_FAILED);
    }

    #[cfg(unix)]
    #[test]
    fn test_cpu_clock_advances() {
        let before = cpu_seconds();
        let mut acc = 0u64;
        for i in 0..200_000u64 {
            acc = acc.wrapping_add(i * i);
        }
        std::hint::black_box(acc);
        assert!(cpu_seconds() >= before);
    }
}

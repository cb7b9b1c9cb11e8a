//! End-of-run statistics.

use std::time::Duration;

use delivery::StatsSnapshot;
use observability::ReadingSummary;

/// Statistics for one completed simulation run
#[derive(Debug, Clone)]
pub struct SimulationStats {
    /// Ticks completed
    pub ticks: u64,

    /// Sensors in the fleet
    pub fleet_size: usize,

    /// Wall-clock run duration
    pub duration: Duration,

    /// Sensor tasks that timed out or panicked
    pub task_failures: u64,

    /// Delivery counters at shutdown
    pub delivery: StatsSnapshot,

    /// Aggregated reading summary
    pub readings: ReadingSummary,
}

impl SimulationStats {
    /// Readings produced per second of wall time
    pub fn readings_per_sec(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.readings.total_readings as f64 / secs
        } else {
            0.0
        }
    }

    /// Print the final run summary to stdout
    pub fn print_summary(&self) {
        println!("\n=== Simulation Statistics ===");
        println!("Duration: {:.1}s", self.duration.as_secs_f64());
        println!("Ticks completed: {}", self.ticks);
        println!("Fleet size: {}", self.fleet_size);
        println!(
            "Readings generated: {} ({:.1}/s)",
            self.readings.total_readings,
            self.readings_per_sec()
        );
        if self.task_failures > 0 {
            println!("Task failures: {}", self.task_failures);
        }
        println!("Sensors registered: {}", self.delivery.sensors_registered);
        println!("Data points sent: {}", self.delivery.data_points_sent);
        println!(
            "Requests: {} ok / {} failed",
            self.delivery.successful_requests, self.delivery.failed_requests
        );
        match self.delivery.success_rate() {
            Some(rate) => println!("Success rate: {:.1}%", rate),
            None => println!("Success rate: N/A"),
        }
        println!("Alerts generated: {}", self.delivery.alerts_generated);
        println!();
        print!("{}", self.readings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: u64, secs: u64) -> SimulationStats {
        let readings = ReadingSummary {
            total_readings: total,
            ..Default::default()
        };
        SimulationStats {
            ticks: 10,
            fleet_size: 50,
            duration: Duration::from_secs(secs),
            task_failures: 0,
            delivery: StatsSnapshot::default(),
            readings,
        }
    }

    #[test]
    fn readings_per_sec_handles_zero_duration() {
        assert_eq!(stats(100, 0).readings_per_sec(), 0.0);
        assert!((stats(100, 10).readings_per_sec() - 10.0).abs() < 1e-9);
    }
}

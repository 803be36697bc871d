use crate::core::units::month_for_hour;
use serde::Deserialize;

/// Period and resolution of a run, in hours from the start of the year.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SimulationTime {
    #[serde(rename(deserialize = "start"))]
    start_time: f64,
    #[serde(rename(deserialize = "end"))]
    end_time: f64,
    step: f64,
}

impl SimulationTime {
    pub fn new(start_time: f64, end_time: f64, step: f64) -> Self {
        Self {
            start_time,
            end_time,
            step,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        if self.end_time <= self.start_time {
            return 0;
        }
        ((self.end_time - self.start_time) / self.step).ceil() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = SimulationTimeIteration> + '_ {
        (0..self.total_steps()).map(|index| SimulationTimeIteration {
            index,
            time: self.start_time + index as f64 * self.step,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationTimeIteration {
    pub index: usize,
    pub time: f64,
}

impl SimulationTimeIteration {
    pub fn current_hour(&self) -> u32 {
        self.time.floor() as u32
    }

    /// Zero-based month of the year this timestep falls in.
    pub fn current_month(&self) -> usize {
        month_for_hour(self.current_hour())
    }
}

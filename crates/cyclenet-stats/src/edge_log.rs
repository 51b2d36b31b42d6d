//! Per-edge entry/exit log and running ridership.

use cyclenet_core::{CyclistId, SimTime};

/// One entry or exit event on a directed edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeEventKind {
    Enter,
    Exit,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeLogEntry {
    pub time: SimTime,
    pub kind: EdgeEventKind,
    pub cyclist: CyclistId,
}

/// Usage count and full entry/exit log for one directed edge.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeStats {
    /// Number of cyclists that have entered this edge (entries, not exits).
    pub usage_count: u64,
    pub log: Vec<EdgeLogEntry>,
}

impl EdgeStats {
    pub fn record_enter(&mut self, time: SimTime, cyclist: CyclistId) {
        self.usage_count += 1;
        self.log.push(EdgeLogEntry { time, kind: EdgeEventKind::Enter, cyclist });
    }

    pub fn record_exit(&mut self, time: SimTime, cyclist: CyclistId) {
        self.log.push(EdgeLogEntry { time, kind: EdgeEventKind::Exit, cyclist });
    }

    /// Net ridership (cumulative entries minus exits) after each logged
    /// event, in log order — a post-hoc density timeline.
    pub fn ridership_series(&self) -> Vec<(SimTime, i64)> {
        let mut running = 0i64;
        self.log
            .iter()
            .map(|entry| {
                running += match entry.kind {
                    EdgeEventKind::Enter => 1,
                    EdgeEventKind::Exit => -1,
                };
                (entry.time, running)
            })
            .collect()
    }
}

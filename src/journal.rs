use crate::common::StationId;
use std::collections::VecDeque;
use std::ops::Not;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum TrafficState {
    Departed,
    Arrived,
}

impl Not for TrafficState {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            TrafficState::Departed => TrafficState::Arrived,
            TrafficState::Arrived => TrafficState::Departed,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct TrafficEvent {
    pub station: StationId,
    pub number: String,
    pub state: TrafficState,
}

impl TrafficEvent {
    pub fn departed(station: StationId, number: &str) -> Self {
        TrafficEvent {
            station,
            number: number.to_string(),
            state: TrafficState::Departed,
        }
    }

    pub fn arrived(station: StationId, number: &str) -> Self {
        TrafficEvent {
            station,
            number: number.to_string(),
            state: TrafficState::Arrived,
        }
    }
}

/// FIFO record of departure/arrival notifications. A single movement step
/// always appends the departure before the arrival.
#[derive(Default)]
pub struct TrafficLog(VecDeque<TrafficEvent>);

impl TrafficLog {
    pub fn new() -> Self {
        TrafficLog(VecDeque::new())
    }

    pub fn push(&mut self, event: TrafficEvent) {
        self.0.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = TrafficEvent> {
        self.0.drain(..)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_drain_in_push_order() {
        let mut log = TrafficLog::new();
        log.push(TrafficEvent::departed(0, "ABC-11"));
        log.push(TrafficEvent::arrived(1, "ABC-11"));
        assert_eq!(log.len(), 2);

        let events: Vec<TrafficEvent> = log.drain().collect();
        assert_eq!(events[0], TrafficEvent::departed(0, "ABC-11"));
        assert_eq!(events[1], TrafficEvent::arrived(1, "ABC-11"));
        assert!(log.is_empty());
    }

    #[test]
    fn state_negation_flips() {
        assert_eq!(!TrafficState::Departed, TrafficState::Arrived);
        assert_eq!(!TrafficState::Arrived, TrafficState::Departed);
    }
}

use cyclenet_core::SimTime;

use crate::queue::EventQueue;

#[cfg(test)]
mod ordering {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(3.0), "c").unwrap();
        q.schedule(SimTime(1.0), "a").unwrap();
        q.schedule(SimTime(2.0), "b").unwrap();

        assert_eq!(q.step(), Some((SimTime(1.0), "a")));
        assert_eq!(q.step(), Some((SimTime(2.0), "b")));
        assert_eq!(q.step(), Some((SimTime(3.0), "c")));
        assert_eq!(q.step(), None);
    }

    #[test]
    fn ties_break_fifo() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(5.0), "first").unwrap();
        q.schedule(SimTime(5.0), "second").unwrap();
        q.schedule(SimTime(5.0), "third").unwrap();

        assert_eq!(q.step(), Some((SimTime(5.0), "first")));
        assert_eq!(q.step(), Some((SimTime(5.0), "second")));
        assert_eq!(q.step(), Some((SimTime(5.0), "third")));
    }

    #[test]
    fn now_advances_monotonically() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(10.0), ()).unwrap();
        q.schedule(SimTime(20.0), ()).unwrap();
        assert_eq!(q.now(), SimTime::ZERO);
        q.step();
        assert_eq!(q.now(), SimTime(10.0));
        q.step();
        assert_eq!(q.now(), SimTime(20.0));
    }
}

#[cfg(test)]
mod scheduling {
    use super::*;

    #[test]
    fn rejects_time_in_the_past() {
        let mut q: EventQueue<()> = EventQueue::new();
        q.schedule(SimTime(10.0), ()).unwrap();
        q.step();
        assert!(q.schedule(SimTime(5.0), ()).is_err());
    }

    #[test]
    fn len_and_is_empty_track_live_events() {
        let mut q = EventQueue::new();
        assert!(q.is_empty());
        let id = q.schedule(SimTime(1.0), "x").unwrap();
        assert_eq!(q.len(), 1);
        assert!(!q.is_empty());
        q.cancel(id);
        assert!(q.is_empty());
    }

    #[test]
    fn peek_time_does_not_consume() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(7.0), "only").unwrap();
        assert_eq!(q.peek_time(), Some(SimTime(7.0)));
        assert_eq!(q.peek_time(), Some(SimTime(7.0)));
        assert_eq!(q.step(), Some((SimTime(7.0), "only")));
    }
}

#[cfg(test)]
mod cancellation {
    use super::*;

    #[test]
    fn cancelled_event_is_skipped() {
        let mut q = EventQueue::new();
        let id = q.schedule(SimTime(1.0), "cancel-me").unwrap();
        q.schedule(SimTime(2.0), "keep-me").unwrap();

        assert!(q.cancel(id));
        assert_eq!(q.step(), Some((SimTime(2.0), "keep-me")));
    }

    #[test]
    fn cancel_of_already_fired_is_noop() {
        let mut q = EventQueue::new();
        let id = q.schedule(SimTime(1.0), "a").unwrap();
        q.step();
        assert!(!q.cancel(id));
    }

    #[test]
    fn cancel_of_unknown_id_returns_false() {
        let mut q: EventQueue<()> = EventQueue::new();
        let bogus = q.schedule(SimTime(1.0), ()).unwrap();
        q.cancel(bogus);
        assert!(!q.cancel(bogus)); // already cancelled once
    }

    #[test]
    fn cancelling_every_event_leaves_queue_empty() {
        let mut q = EventQueue::new();
        let a = q.schedule(SimTime(1.0), "a").unwrap();
        let b = q.schedule(SimTime(2.0), "b").unwrap();
        q.cancel(a);
        q.cancel(b);
        assert!(q.peek_time().is_none());
        assert_eq!(q.step(), None);
    }
}

//! Unit tests for cafe-kernel.

use cafe_core::{ProcessId, SimTime};

use crate::{Context, KernelError, ProcessBody, Step};

// ── Toy world ─────────────────────────────────────────────────────────────────

/// Shared log of `(time, label)` pairs written by toy bodies.
#[derive(Default)]
struct Log(Vec<(f64, &'static str)>);

/// A handful of bodies exercising each kernel primitive.
enum Toy {
    /// Holds `gap` seconds `naps` times, logging each resume, then terminates.
    Sleeper { label: &'static str, naps: u32, gap: f64 },
    /// Never suspends.
    Spinner,
    /// Parks on first resume, terminates on the second.
    Parker { label: &'static str, parked: bool },
    /// Activates `target`, either after itself or with a delay, then ends.
    Waker { target: ProcessId, after: bool, delay: f64 },
    /// Spawns a one-shot sleeper, puts it right after itself, then holds.
    Spawner { spawned: bool },
    /// Holds a negative duration.
    BackInTime,
}

impl ProcessBody<Log> for Toy {
    type Role = &'static str;
    type Error = KernelError;

    fn role(&self) -> &'static str {
        match self {
            Toy::Sleeper { label, .. } | Toy::Parker { label, .. } => *label,
            Toy::Spinner => "spinner",
            Toy::Waker { .. } => "waker",
            Toy::Spawner { .. } => "spawner",
            Toy::BackInTime => "back",
        }
    }

    fn step(&mut self, ctx: &mut Context<'_, Log, Self>) -> Result<Step, KernelError> {
        let now = ctx.now().as_secs();
        match self {
            Toy::Sleeper { label, naps, gap } => {
                ctx.world.0.push((now, *label));
                if *naps == 0 {
                    return Ok(Step::Terminate);
                }
                *naps -= 1;
                Ok(Step::Hold(*gap))
            }
            Toy::Spinner => Ok(Step::Continue),
            Toy::Parker { label, parked } => {
                ctx.world.0.push((now, *label));
                if *parked {
                    Ok(Step::Terminate)
                } else {
                    *parked = true;
                    Ok(Step::Passivate)
                }
            }
            Toy::Waker { target, after, delay } => {
                if *after {
                    ctx.activate_after(*target)?;
                } else {
                    ctx.activate(*target, *delay)?;
                }
                ctx.world.0.push((now, "waker"));
                Ok(Step::Terminate)
            }
            Toy::Spawner { spawned } => {
                if *spawned {
                    return Ok(Step::Terminate);
                }
                *spawned = true;
                let child = ctx.spawn(Toy::Sleeper { label: "child", naps: 0, gap: 0.0 })?;
                ctx.activate_after(child)?;
                ctx.world.0.push((now, "spawner"));
                Ok(Step::Hold(5.0))
            }
            Toy::BackInTime => Ok(Step::Hold(-1.0)),
        }
    }
}

fn sleeper(label: &'static str, naps: u32, gap: f64) -> Toy {
    Toy::Sleeper { label, naps, gap }
}

// ── EventList ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_list_tests {
    use super::*;
    use crate::{EventList, Lane};

    #[test]
    fn pops_in_time_order() {
        let mut list = EventList::new();
        list.schedule(ProcessId(0), SimTime(30.0), Lane::Normal).unwrap();
        list.schedule(ProcessId(1), SimTime(10.0), Lane::Normal).unwrap();
        list.schedule(ProcessId(2), SimTime(20.0), Lane::Normal).unwrap();

        let order: Vec<_> = std::iter::from_fn(|| list.pop_earliest()).map(|e| e.process).collect();
        assert_eq!(order, vec![ProcessId(1), ProcessId(2), ProcessId(0)]);
    }

    #[test]
    fn same_instant_is_fifo() {
        let mut list = EventList::new();
        for i in 0..5 {
            list.schedule(ProcessId(i), SimTime(1.0), Lane::Normal).unwrap();
        }
        let order: Vec<_> = std::iter::from_fn(|| list.pop_earliest()).map(|e| e.process.0).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn after_current_lane_goes_first() {
        let mut list = EventList::new();
        list.schedule(ProcessId(0), SimTime(0.0), Lane::Normal).unwrap();
        list.schedule(ProcessId(1), SimTime(0.0), Lane::AfterCurrent).unwrap();
        list.schedule(ProcessId(2), SimTime(0.0), Lane::AfterCurrent).unwrap();
        let order: Vec<_> = std::iter::from_fn(|| list.pop_earliest()).map(|e| e.process.0).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn pop_advances_clock() {
        let mut list = EventList::new();
        list.schedule(ProcessId(0), SimTime(7.5), Lane::Normal).unwrap();
        assert_eq!(list.now(), SimTime::ZERO);
        let ev = list.pop_earliest().unwrap();
        assert_eq!(ev.due, SimTime(7.5));
        assert_eq!(list.now(), SimTime(7.5));
    }

    #[test]
    fn schedule_in_past_rejected() {
        let mut list = EventList::new();
        list.schedule(ProcessId(0), SimTime(5.0), Lane::Normal).unwrap();
        list.pop_earliest();
        let err = list.schedule(ProcessId(1), SimTime(4.0), Lane::Normal).unwrap_err();
        assert_eq!(
            err,
            KernelError::InvalidSchedule { process: ProcessId(1), due: SimTime(4.0), now: SimTime(5.0) }
        );
        // Same instant is fine.
        list.schedule(ProcessId(1), SimTime(5.0), Lane::Normal).unwrap();
    }

    #[test]
    fn non_finite_due_rejected() {
        let mut list = EventList::new();
        assert!(list.schedule(ProcessId(0), SimTime(f64::NAN), Lane::Normal).is_err());
        assert!(list.schedule(ProcessId(0), SimTime(f64::INFINITY), Lane::Normal).is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn empty_pop_is_none() {
        let mut list = EventList::new();
        assert!(list.pop_earliest().is_none());
        assert!(list.peek().is_none());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn time_never_decreases() {
        let mut list = EventList::new();
        for (i, t) in [4.0, 1.0, 3.0, 1.0, 9.0, 0.5].into_iter().enumerate() {
            list.schedule(ProcessId(i as u32), SimTime(t), Lane::Normal).unwrap();
        }
        let mut last = SimTime::ZERO;
        while let Some(ev) = list.pop_earliest() {
            assert!(ev.due >= last);
            assert_eq!(list.now(), ev.due);
            last = ev.due;
        }
    }

    #[test]
    fn contains_tracks_pending() {
        let mut list = EventList::new();
        list.schedule(ProcessId(3), SimTime(1.0), Lane::Normal).unwrap();
        assert!(list.contains(ProcessId(3)));
        list.pop_earliest();
        assert!(!list.contains(ProcessId(3)));
    }
}

// ── WaitQueue ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wait_queue_tests {
    use crate::WaitQueue;

    #[test]
    fn fifo_order() {
        let mut q = WaitQueue::new();
        q.insert('a');
        q.insert('b');
        q.insert('c');
        assert_eq!(q.first(), Some(&'a'));
        assert_eq!(q.remove_first(), Some('a'));
        assert_eq!(q.remove_first(), Some('b'));
        assert_eq!(q.remove_first(), Some('c'));
        assert_eq!(q.remove_first(), None);
    }

    #[test]
    fn remove_non_head() {
        let mut q = WaitQueue::new();
        for i in 0..4 {
            q.insert(i);
        }
        assert!(q.remove(&2));
        assert!(!q.remove(&2));
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![0, 1, 3]);
    }

    #[test]
    fn observers_do_not_mutate() {
        let mut q = WaitQueue::new();
        q.insert(10);
        q.insert(20);
        for _ in 0..3 {
            assert_eq!(q.len(), 2);
            assert!(!q.is_empty());
            assert_eq!(q.first(), Some(&10));
        }
        assert!(q.contains(&20));
    }

    #[test]
    fn empty_queue() {
        let q: WaitQueue<u8> = WaitQueue::default();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert!(q.first().is_none());
    }
}

// ── ProcessTable ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod process_table_tests {
    use super::*;
    use crate::process::next_id;

    #[test]
    fn ids_follow_slot_index() {
        assert_eq!(next_id(0), Ok(ProcessId(0)));
        assert_eq!(next_id(41), Ok(ProcessId(41)));
        assert_eq!(next_id(u32::MAX as usize - 1), Ok(ProcessId(u32::MAX - 1)));
    }

    #[test]
    fn id_space_exhaustion_is_an_error() {
        let full = u32::MAX as usize;
        assert_eq!(next_id(full), Err(KernelError::ProcessTableFull { spawned: full }));
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler_tests {
    use super::*;
    use crate::{ProcessState, RunState, Scheduler};

    fn sched() -> Scheduler<Log, Toy> {
        Scheduler::new(100)
    }

    #[test]
    fn hold_advances_time() {
        let mut s = sched();
        let mut log = Log::default();
        let id = s.spawn(sleeper("a", 3, 2.5)).unwrap();
        s.activate(id, 0.0).unwrap();
        let end = s.run(&mut log, None).unwrap();
        assert_eq!(end, RunState::Exhausted(SimTime(7.5)));
        assert_eq!(log.0, vec![(0.0, "a"), (2.5, "a"), (5.0, "a"), (7.5, "a")]);
        assert_eq!(s.state(id), Some(ProcessState::Terminated));
        assert_eq!(s.events_processed(), 4);
    }

    #[test]
    fn new_process_is_passive_until_activated() {
        let mut s = sched();
        let mut log = Log::default();
        let id = s.spawn(sleeper("idle", 0, 0.0)).unwrap();
        assert_eq!(s.state(id), Some(ProcessState::Passive));
        assert!(matches!(s.run(&mut log, None).unwrap(), RunState::Exhausted(_)));
        assert!(log.0.is_empty());
    }

    #[test]
    fn passivate_then_external_activation() {
        let mut s = sched();
        let mut log = Log::default();
        let parker = s.spawn(Toy::Parker { label: "p", parked: false }).unwrap();
        s.activate(parker, 0.0).unwrap();
        let waker = s.spawn(Toy::Waker { target: parker, after: false, delay: 3.0 }).unwrap();
        s.activate(waker, 1.0).unwrap();

        s.run(&mut log, None).unwrap();
        assert_eq!(log.0, vec![(0.0, "p"), (1.0, "waker"), (4.0, "p")]);
        assert_eq!(s.state(parker), Some(ProcessState::Terminated));
    }

    #[test]
    fn activating_scheduled_process_fails() {
        let mut s = sched();
        let id = s.spawn(sleeper("a", 0, 0.0)).unwrap();
        s.activate(id, 0.0).unwrap();
        let err = s.activate(id, 1.0).unwrap_err();
        assert_eq!(err, KernelError::NotPassive { process: id, state: ProcessState::Scheduled });
    }

    #[test]
    fn activating_unknown_process_fails() {
        let mut s = sched();
        assert_eq!(s.activate(ProcessId(9), 0.0), Err(KernelError::UnknownProcess(ProcessId(9))));
    }

    #[test]
    fn activate_after_runs_before_earlier_same_instant_events() {
        let mut s = sched();
        let mut log = Log::default();
        // "late" is queued at t=0 before the waker even runs...
        let parker = s.spawn(Toy::Parker { label: "parker", parked: true }).unwrap();
        let waker = s.spawn(Toy::Waker { target: parker, after: true, delay: 0.0 }).unwrap();
        let late = s.spawn(sleeper("late", 0, 0.0)).unwrap();
        s.activate(waker, 0.0).unwrap();
        s.activate(late, 0.0).unwrap();
        s.run(&mut log, None).unwrap();
        // ...but the process activated "after" the waker overtakes it.
        assert_eq!(log.0, vec![(0.0, "waker"), (0.0, "parker"), (0.0, "late")]);
    }

    #[test]
    fn spawned_child_runs_right_after_parent() {
        let mut s = sched();
        let mut log = Log::default();
        let parent = s.spawn(Toy::Spawner { spawned: false }).unwrap();
        let other = s.spawn(sleeper("other", 0, 0.0)).unwrap();
        s.activate(parent, 0.0).unwrap();
        s.activate(other, 0.0).unwrap();
        s.run(&mut log, None).unwrap();
        assert_eq!(log.0, vec![(0.0, "spawner"), (0.0, "child"), (0.0, "other")]);
        assert_eq!(s.processes().len(), 3);
        assert_eq!(s.role(ProcessId(2)), Some("child"));
    }

    #[test]
    fn runaway_process_detected() {
        let mut s = sched();
        let mut log = Log::default();
        let id = s.spawn(Toy::Spinner).unwrap();
        s.activate(id, 0.0).unwrap();
        let err = s.run(&mut log, None).unwrap_err();
        assert_eq!(err, KernelError::Runaway { process: id, steps: 100 });
    }

    #[test]
    fn negative_hold_is_invalid_schedule() {
        let mut s = sched();
        let mut log = Log::default();
        let id = s.spawn(Toy::BackInTime).unwrap();
        s.activate(id, 2.0).unwrap();
        let err = s.run(&mut log, None).unwrap_err();
        assert!(matches!(err, KernelError::InvalidSchedule { process, .. } if process == id));
    }

    #[test]
    fn stop_time_leaves_later_events_pending() {
        let mut s = sched();
        let mut log = Log::default();
        let id = s.spawn(sleeper("a", 10, 4.0)).unwrap();
        s.activate(id, 0.0).unwrap();
        let end = s.run(&mut log, Some(SimTime(10.0))).unwrap();
        assert_eq!(end, RunState::StopTimeReached(SimTime(10.0)));
        assert_eq!(s.now(), SimTime(10.0));
        assert_eq!(log.0.len(), 3); // t = 0, 4, 8
        assert_eq!(s.state(id), Some(ProcessState::Scheduled));
        assert_eq!(s.events().peek_time(), Some(SimTime(12.0)));
    }

    #[test]
    fn event_at_stop_time_is_processed() {
        let mut s = sched();
        let mut log = Log::default();
        let id = s.spawn(sleeper("a", 0, 0.0)).unwrap();
        s.activate(id, 10.0).unwrap();
        s.run(&mut log, Some(SimTime(10.0))).unwrap();
        assert_eq!(log.0, vec![(10.0, "a")]);
    }

    #[test]
    fn resumption_reports_outcome() {
        let mut s = sched();
        let mut log = Log::default();
        let id = s.spawn(sleeper("a", 1, 1.0)).unwrap();
        s.activate(id, 0.0).unwrap();
        match s.step(&mut log, None).unwrap() {
            RunState::Resumed(r) => {
                assert_eq!(r.process, id);
                assert_eq!(r.role, "a");
                assert_eq!(r.outcome, ProcessState::Scheduled);
                assert_eq!(r.steps, 1);
                assert_eq!(r.time, SimTime::ZERO);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Boolean constraint propagation over two watched literals.
//!
//! The trail doubles as the propagation queue: everything between the queue
//! head and the end of the trail is still waiting to be propagated.

use crate::sat::clause_storage::{ClauseAllocator, ClauseRef};
use crate::sat::logging::targets;
use crate::sat::trail::Trail;
use crate::sat::watch::{WatchLists, Watcher};

/// Propagates every queued assignment to a fixpoint.
///
/// Returns the first falsified clause found, in which case the rest of the
/// queue is dropped. `propagations` is incremented once per literal taken
/// off the queue.
///
/// For every clause the two watched literals are kept at positions 0 and 1,
/// and each watched literal `l` has a watcher in the list of `!l`.
pub fn propagate(
    trail: &mut Trail,
    ca: &mut ClauseAllocator,
    watches: &mut WatchLists,
    propagations: &mut u64,
) -> Option<ClauseRef> {
    while let Some(p) = trail.next_to_propagate() {
        *propagations += 1;
        let false_lit = !p;
        let mut ws = watches.take(p);
        let mut conflict = None;

        let mut i = 0;
        let mut j = 0;
        'watchers: while i < ws.len() {
            let Watcher { cref, blocker } = ws[i];
            if trail.value(blocker).is_true() {
                ws[j] = ws[i];
                i += 1;
                j += 1;
                continue;
            }

            let clause = ca.get_mut(cref);
            if clause[0] == false_lit {
                clause.swap(0, 1);
            }
            assert_eq!(
                clause[1], false_lit,
                "{cref} is in the watch list of {p:?} but does not watch {false_lit:?}"
            );
            i += 1;

            let first = clause[0];
            let watcher = Watcher::new(cref, first);
            if first != blocker && trail.value(first).is_true() {
                ws[j] = watcher;
                j += 1;
                continue;
            }

            for k in 2..clause.len() {
                if !trail.value(clause[k]).is_false() {
                    clause.swap(1, k);
                    let new_watch = clause[1];
                    log::trace!(
                        target: targets::PROPAGATION,
                        "{cref} moves its watch from {false_lit:?} to {new_watch:?}"
                    );
                    watches.append(!new_watch, watcher);
                    continue 'watchers;
                }
            }

            ws[j] = watcher;
            j += 1;
            if trail.value(first).is_false() {
                log::trace!(target: targets::PROPAGATION, "Conflict in {cref} on {p:?}");
                conflict = Some(cref);
                trail.flush_queue();
                while i < ws.len() {
                    ws[j] = ws[i];
                    i += 1;
                    j += 1;
                }
            } else {
                log::trace!(target: targets::PROPAGATION, "{first:?} implied by {cref}");
                trail.enqueue(first, Some(cref));
            }
        }

        ws.truncate(j);
        watches.restore(p, ws);
        if conflict.is_some() {
            return conflict;
        }
    }
    None
}

//! Message list / thread tracker.
//!
//! Sits on top of the connection client and groups messages into
//! *threads* by MIN/MRN linkage. Each thread carries a computed status
//! (open, standby, accepted, rejected, timed out, ...), honors the
//! per-segment response timeouts from the template catalog by
//! auto-sending an error reply on expiry, and exposes a thread-oriented
//! query API to the user interface.
//!
//! The tracker runs on the caller's thread and on the client worker via
//! the receive callback; one mutex covers all its state. The update
//! callback always fires with that mutex released.

use std::{
    sync::Arc,
    time::Duration,
};

use parking_lot::Mutex;

use cpdlc_types::{
    arg::{Arg, ErrInfo},
    catalog::{lookup, MsgDir, MsgTemplate, RespType},
    message::{Message, PacketType, Segment},
};

use crate::{
    client::{Client, LogonStatus, MessageLink, MsgStatus, MsgToken},
    clock::{SystemClock, TimeSource},
};

/// Identifier of one message thread, unique within its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MsgThrId(u32);

/// Computed status of a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgThrStatus {
    /// Awaiting a response from the remote side.
    Open,
    /// The latest outbound message is still being transmitted.
    Pending,
    /// The latest outbound message failed to transmit.
    Failed,
    /// The remote side answered STANDBY.
    Standby,
    /// Closed with WILCO or AFFIRM.
    Accepted,
    /// Closed with UNABLE or NEGATIVE.
    Rejected,
    /// No response arrived within the template timeout.
    TimedOut,
    /// Closed normally.
    Closed,
    /// The remote side sent DISREGARD.
    Disregard,
    /// Closed by an ERROR message.
    Error,
    /// The connection went away with the thread still open.
    ConnEnded,
}

impl MsgThrStatus {
    /// Final statuses are sticky: once reached, only UI flags may change.
    pub fn is_final(self) -> bool {
        !matches!(
            self,
            MsgThrStatus::Open | MsgThrStatus::Pending | MsgThrStatus::Standby
        )
    }
}

/// One message of a thread, as handed to the UI.
#[derive(Debug, Clone)]
pub struct ThrMsg {
    pub msg: Message,
    /// Send token, when this endpoint originated the message.
    pub token: Option<MsgToken>,
    /// Wall-clock UTC receive/send time for display.
    pub hours: u8,
    pub mins: u8,
    /// True when this endpoint originated the message.
    pub sent: bool,
}

#[derive(Debug)]
struct MsgBucket {
    msg: Message,
    token: Option<MsgToken>,
    sent: bool,
    hours: u8,
    mins: u8,
    /// Monotonic stamp, for timeout arithmetic.
    mono: Duration,
}

#[derive(Debug)]
struct MsgThread {
    id: MsgThrId,
    status: MsgThrStatus,
    buckets: Vec<MsgBucket>,
    dirty: bool,
    reviewed: bool,
    mod_inserted: bool,
    mod_execd: bool,
}

type UpdateCb = Arc<dyn Fn(&[MsgThrId]) + Send + Sync>;

struct MsgListState {
    threads: Vec<MsgThread>,
    next_min: u32,
    next_thr_id: u32,
    update_cb: Option<UpdateCb>,
}

struct MsgListInner {
    link: Arc<dyn MessageLink>,
    clock: Arc<dyn TimeSource>,
    state: Mutex<MsgListState>,
}

/// A thread-tracking message list. Cheap to clone; all clones refer to
/// the same list.
#[derive(Clone)]
pub struct MsgList {
    inner: Arc<MsgListInner>,
}

impl std::fmt::Debug for MsgList {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("MsgList")
            .field("threads", &state.threads.len())
            .field("next_min", &state.next_min)
            .finish_non_exhaustive()
    }
}

impl MsgList {
    /// Creates a list on top of `client` and hooks itself into the
    /// client's receive callback.
    pub fn new(client: &Client) -> Self {
        let list = Self::with_link(Arc::new(client.clone()), Arc::new(SystemClock::new()));
        let weak = Arc::downgrade(&list.inner);
        client.set_msg_recv_cb(move || {
            if let Some(inner) = weak.upgrade() {
                MsgList { inner }.process_incoming();
            }
        });
        list
    }

    /// Creates a list over an arbitrary link and clock. The caller is
    /// responsible for pumping [`MsgList::process_incoming`].
    pub fn with_link(link: Arc<dyn MessageLink>, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            inner: Arc::new(MsgListInner {
                link,
                clock,
                state: Mutex::new(MsgListState {
                    threads: Vec::new(),
                    next_min: 1,
                    next_thr_id: 1,
                    update_cb: None,
                }),
            }),
        }
    }

    /// Drains the link's inbound queue, filing every message into its
    /// thread. Invokes the update callback (outside the list lock) with
    /// the ids of all threads that changed.
    pub fn process_incoming(&self) {
        let mut updated = Vec::new();
        let update_cb = {
            let mut state = self.inner.state.lock();
            let cb = state.update_cb.clone();
            while let Some(msg) = self.inner.link.receive_message() {
                let idx = match find_thr_by_mrn(&state.threads, &msg) {
                    Some(idx) => idx,
                    None => alloc_thread(&mut state),
                };
                let (hours, mins) = self.inner.clock.utc_hours_mins();
                let mono = self.inner.clock.monotonic();
                let thr = &mut state.threads[idx];
                thr.buckets.push(MsgBucket {
                    msg,
                    token: None,
                    sent: false,
                    hours,
                    mins,
                    mono,
                });
                thr.dirty = true;
                thr.reviewed = false;
                thr_status_upd(&self.inner, &mut state, idx);
                if cb.is_some() {
                    updated.push(state.threads[idx].id);
                }
            }
            cb
        };
        if let Some(cb) = update_cb {
            cb(&updated);
        }
    }

    /// Sends `msg` on an existing thread, or on a fresh one when
    /// `thr_id` is `None`. Returns the thread the message landed on.
    pub fn send(&self, msg: Message, thr_id: Option<MsgThrId>) -> MsgThrId {
        let mut state = self.inner.state.lock();
        let idx = send_impl(&self.inner, &mut state, msg, thr_id);
        let id = state.threads[idx].id;
        thr_status_upd(&self.inner, &mut state, idx);
        id
    }

    /// Recomputes every thread's status; drives response timeouts.
    pub fn update(&self) {
        let mut state = self.inner.state.lock();
        for idx in 0..state.threads.len() {
            thr_status_upd(&self.inner, &mut state, idx);
        }
    }

    /// Lists thread ids, newest first. With `ignore_closed`, finalized
    /// threads that have been seen are skipped; `stale_timeout` instead
    /// skips only those finalized more than that long ago.
    pub fn thr_ids(&self, ignore_closed: bool, stale_timeout: Option<Duration>) -> Vec<MsgThrId> {
        let now = self.inner.clock.monotonic();
        let state = self.inner.state.lock();
        state
            .threads
            .iter()
            .rev()
            .filter(|thr| {
                let stale = match (stale_timeout, thr.buckets.last()) {
                    (Some(timeout), Some(last)) => now.saturating_sub(last.mono) > timeout,
                    _ => false,
                };
                !((ignore_closed || stale) && !thr.dirty && thr.status.is_final())
            })
            .map(|thr| thr.id)
            .collect()
    }

    pub fn thr_id_exists(&self, thr_id: MsgThrId) -> bool {
        let state = self.inner.state.lock();
        index_of(&state, thr_id).is_some()
    }

    /// The thread's status plus its dirty (unseen inbound content) flag.
    pub fn thr_status(&self, thr_id: MsgThrId) -> (MsgThrStatus, bool) {
        let state = self.inner.state.lock();
        let thr = thread(&state, thr_id);
        (thr.status, thr.dirty)
    }

    pub fn thr_mark_seen(&self, thr_id: MsgThrId) {
        let mut state = self.inner.state.lock();
        thread_mut(&mut state, thr_id).dirty = false;
    }

    pub fn thr_is_reviewed(&self, thr_id: MsgThrId) -> bool {
        thread(&self.inner.state.lock(), thr_id).reviewed
    }

    pub fn thr_mark_reviewed(&self, thr_id: MsgThrId) {
        thread_mut(&mut self.inner.state.lock(), thr_id).reviewed = true;
    }

    pub fn thr_is_mod_inserted(&self, thr_id: MsgThrId) -> bool {
        thread(&self.inner.state.lock(), thr_id).mod_inserted
    }

    pub fn thr_mark_mod_inserted(&self, thr_id: MsgThrId) {
        thread_mut(&mut self.inner.state.lock(), thr_id).mod_inserted = true;
    }

    pub fn thr_is_mod_execd(&self, thr_id: MsgThrId) -> bool {
        thread(&self.inner.state.lock(), thr_id).mod_execd
    }

    pub fn thr_mark_mod_execd(&self, thr_id: MsgThrId) {
        thread_mut(&mut self.inner.state.lock(), thr_id).mod_execd = true;
    }

    pub fn thr_msg_count(&self, thr_id: MsgThrId) -> usize {
        thread(&self.inner.state.lock(), thr_id).buckets.len()
    }

    /// A copy of the `msg_nr`-th message of the thread, with its send
    /// token, display timestamp, and direction flag.
    pub fn thr_msg(&self, thr_id: MsgThrId, msg_nr: usize) -> ThrMsg {
        let state = self.inner.state.lock();
        let bucket = &thread(&state, thr_id).buckets[msg_nr];
        ThrMsg {
            msg: bucket.msg.clone(),
            token: bucket.token,
            hours: bucket.hours,
            mins: bucket.mins,
            sent: bucket.sent,
        }
    }

    /// The callsign of the other endpoint of this thread.
    pub fn remote_callsign(&self, thr_id: MsgThrId) -> String {
        let state = self.inner.state.lock();
        let first = &thread(&state, thr_id).buckets[0];
        let id = if first.sent {
            first.msg.to_id()
        } else {
            first.msg.from_id()
        };
        id.map(|cs| cs.as_str().to_owned()).unwrap_or_default()
    }

    pub fn remove_thr(&self, thr_id: MsgThrId) {
        let mut state = self.inner.state.lock();
        let idx = index_of(&state, thr_id).expect("unknown thread id");
        state.threads.remove(idx);
    }

    /// Forces a non-final thread to `Closed`. Subsequent inbound
    /// messages referencing it will open fresh threads.
    pub fn thr_close(&self, thr_id: MsgThrId) {
        let mut state = self.inner.state.lock();
        let thr = thread_mut(&mut state, thr_id);
        if !thr.status.is_final() {
            thr.status = MsgThrStatus::Closed;
        }
    }

    pub fn thr_is_done(&self, thr_id: MsgThrId) -> bool {
        thread(&self.inner.state.lock(), thr_id).status.is_final()
    }

    /// Installs a callback invoked (outside the list lock) with the ids
    /// of threads changed by the last receive.
    pub fn set_update_cb(&self, cb: impl Fn(&[MsgThrId]) + Send + Sync + 'static) {
        self.inner.state.lock().update_cb = Some(Arc::new(cb));
    }
}

fn index_of(state: &MsgListState, thr_id: MsgThrId) -> Option<usize> {
    state.threads.iter().position(|thr| thr.id == thr_id)
}

fn thread<'a>(state: &'a MsgListState, thr_id: MsgThrId) -> &'a MsgThread {
    let idx = index_of(state, thr_id).expect("unknown thread id");
    &state.threads[idx]
}

fn thread_mut<'a>(state: &'a mut MsgListState, thr_id: MsgThrId) -> &'a mut MsgThread {
    let idx = index_of(state, thr_id).expect("unknown thread id");
    &mut state.threads[idx]
}

fn alloc_thread(state: &mut MsgListState) -> usize {
    let id = MsgThrId(state.next_thr_id);
    state.next_thr_id += 1;
    state.threads.push(MsgThread {
        id,
        status: MsgThrStatus::Open,
        buckets: Vec::new(),
        dirty: false,
        reviewed: false,
        mod_inserted: false,
        mod_execd: false,
    });
    state.threads.len() - 1
}

/// Finds the thread an inbound message belongs to via its MRN: the most
/// recent bucket whose MIN the message references.
fn find_thr_by_mrn(threads: &[MsgThread], msg: &Message) -> Option<usize> {
    let mrn = msg.mrn()?;
    let disregard = is_disregard_msg(msg);
    for (idx, thr) in threads.iter().enumerate().rev() {
        // Manually closed threads are skipped, so the UI can force
        // subsequent uplinks into fresh threads by closing a thread.
        if thr.status == MsgThrStatus::Closed {
            continue;
        }
        for bucket in thr.buckets.iter().rev() {
            // A DISREGARD references the peer's own earlier message,
            // which this endpoint holds as a received bucket.
            let side_matches = if disregard { !bucket.sent } else { bucket.sent };
            if side_matches && bucket.msg.min() == Some(mrn) {
                return Some(idx);
            }
        }
    }
    None
}

fn send_impl(
    inner: &MsgListInner,
    state: &mut MsgListState,
    mut msg: Message,
    thr_id: Option<MsgThrId>,
) -> usize {
    let idx = match thr_id {
        Some(id) => index_of(state, id).expect("unknown thread id"),
        None => alloc_thread(state),
    };
    if thr_id.is_none() {
        state.threads[idx].status = MsgThrStatus::Open;
    } else {
        debug_assert!(!state.threads[idx].status.is_final());
    }

    // The reply chain: reference the most recent bucket going the other
    // way. A fresh MIN is always allocated.
    let msg_dir = msg.dir();
    if let Some(min) = state.threads[idx]
        .buckets
        .iter()
        .rev()
        .find(|bucket| bucket.msg.dir() != msg_dir)
        .and_then(|bucket| bucket.msg.min())
    {
        msg.set_mrn(min);
    }
    msg.set_min(state.next_min);
    state.next_min += 1;

    let token = inner.link.send_message(&msg);
    let (hours, mins) = inner.clock.utc_hours_mins();
    let mono = inner.clock.monotonic();
    state.threads[idx].buckets.push(MsgBucket {
        msg,
        token,
        sent: true,
        hours,
        mins,
        mono,
    });
    idx
}

fn first_template(msg: &Message) -> Option<&'static MsgTemplate> {
    msg.segs().first().map(Segment::template)
}

fn msg_is_dl_req(msg: &Message) -> bool {
    match first_template(msg) {
        Some(tmpl) if tmpl.is_dl() => {
            matches!(tmpl.ty, 6..=27 | 49..=54 | 70 | 71)
        }
        _ => false,
    }
}

/// Does the message require any response at all?
fn msg_req_resp(msg: &Message) -> bool {
    msg.segs().iter().any(|seg| {
        !matches!(
            seg.template().resp,
            RespType::NotRequired | RespType::Operational
        )
    })
}

fn msg_is_stby(msg: &Message) -> bool {
    matches!(first_template(msg), Some(tmpl)
        if (tmpl.is_dl() && tmpl.ty == 2) || (!tmpl.is_dl() && tmpl.ty == 1))
}

fn msg_is_accept(msg: &Message) -> bool {
    matches!(first_template(msg), Some(tmpl)
        if (tmpl.is_dl() && matches!(tmpl.ty, 0 | 4)) || (!tmpl.is_dl() && tmpl.ty == 4))
}

fn msg_is_reject(msg: &Message) -> bool {
    matches!(first_template(msg), Some(tmpl)
        if (tmpl.is_dl() && matches!(tmpl.ty, 1 | 5 | 62))
            || (!tmpl.is_dl() && matches!(tmpl.ty, 0 | 5 | 159)))
}

fn is_error_msg(msg: &Message) -> bool {
    matches!(first_template(msg), Some(tmpl)
        if (tmpl.is_dl() && tmpl.ty == 62) || (!tmpl.is_dl() && tmpl.ty == 159))
}

fn msg_is_rgr(msg: &Message) -> bool {
    // ROGER is type 3 in both directions.
    matches!(first_template(msg), Some(tmpl) if tmpl.ty == 3)
}

fn msg_is_link_mgmt(msg: &Message) -> bool {
    matches!(first_template(msg), Some(tmpl)
        if !tmpl.is_dl() && matches!(tmpl.ty, 160 | 161))
}

fn is_disregard_msg(msg: &Message) -> bool {
    matches!(first_template(msg), Some(tmpl) if !tmpl.is_dl() && tmpl.ty == 168)
}

/// The smallest non-zero per-segment timeout across the whole thread.
fn thr_get_timeout(thr: &MsgThread) -> u32 {
    thr.buckets
        .iter()
        .flat_map(|bucket| bucket.msg.segs())
        .map(|seg| seg.template().timeout)
        .filter(|&timeout| timeout != 0)
        .min()
        .unwrap_or(0)
}

enum Decision {
    Nothing,
    Status(MsgThrStatus, bool),
    Timeout { reply_mrn: Option<u32> },
}

fn thr_status_upd(inner: &MsgListInner, state: &mut MsgListState, idx: usize) {
    let decision = {
        let thr = &state.threads[idx];
        if thr.status.is_final() || thr.buckets.is_empty() {
            return;
        }

        let timeout = thr_get_timeout(thr);
        let is_atc = inner.link.is_atc();
        let now = inner.clock.monotonic();
        let first = thr.buckets.first().unwrap();
        let last = thr.buckets.last().unwrap();

        if thr.buckets.len() == 1 && !msg_req_resp(&first.msg) {
            Decision::Status(MsgThrStatus::Closed, false)
        } else if last.sent && !is_atc && msg_is_dl_req(&last.msg) {
            let status = match last.token.map(|token| inner.link.message_status(token)) {
                Some(MsgStatus::Sending) => MsgThrStatus::Pending,
                Some(MsgStatus::SendFailed) => MsgThrStatus::Failed,
                _ => MsgThrStatus::Open,
            };
            Decision::Status(status, false)
        } else if msg_is_stby(&last.msg) {
            Decision::Status(MsgThrStatus::Standby, false)
        } else if msg_is_accept(&last.msg) {
            Decision::Status(MsgThrStatus::Accepted, false)
        } else if thr.status != MsgThrStatus::Standby
            && timeout != 0
            && now.saturating_sub(last.mono) > Duration::from_secs(u64::from(timeout))
        {
            Decision::Timeout {
                reply_mrn: last.msg.min(),
            }
        } else if msg_is_reject(&last.msg) {
            Decision::Status(MsgThrStatus::Rejected, false)
        } else if msg_is_rgr(&last.msg) || msg_is_link_mgmt(&last.msg) {
            Decision::Status(MsgThrStatus::Closed, false)
        } else if is_disregard_msg(&last.msg) {
            Decision::Status(MsgThrStatus::Disregard, false)
        } else if is_error_msg(&last.msg) {
            Decision::Status(MsgThrStatus::Error, true)
        } else if inner.link.logon_status() != LogonStatus::Complete {
            Decision::Status(MsgThrStatus::ConnEnded, true)
        } else {
            Decision::Nothing
        }
    };

    match decision {
        Decision::Nothing => {}
        Decision::Status(status, clear_dirty) => {
            let thr = &mut state.threads[idx];
            thr.status = status;
            if clear_dirty {
                thr.dirty = false;
            }
        }
        Decision::Timeout { reply_mrn } => {
            // Exactly one automatic error reply per timed-out thread; the
            // TimedOut status is final, so this branch cannot re-fire.
            let mut err = Message::new(PacketType::Cpdlc);
            if let Some(mrn) = reply_mrn {
                err.set_mrn(mrn);
            }
            let template = lookup(MsgDir::Downlink, 62, None).unwrap();
            err.add_seg(Segment::new(template, vec![Arg::ErrInfo(ErrInfo::AppError)]).unwrap())
                .unwrap();
            let thr_id = state.threads[idx].id;
            send_impl(inner, state, err, Some(thr_id));
            let thr = &mut state.threads[idx];
            thr.status = MsgThrStatus::TimedOut;
            thr.dirty = false;
        }
    }
}

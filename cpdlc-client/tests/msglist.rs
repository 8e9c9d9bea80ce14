//! Thread-tracker scenarios, driven through a scripted link and a fake
//! clock.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};

use cpdlc_client::{
    clock::TimeSource,
    msglist::MsgList,
    LogonStatus, MessageLink, MsgStatus, MsgThrStatus, MsgToken,
};
use cpdlc_types::{
    arg::{Altitude, Arg, ErrInfo},
    catalog::{lookup, MsgDir},
    core::CallSign,
    message::{Message, PacketType, Segment},
};

#[derive(Default)]
struct MockState {
    next_token: u64,
    sent: Vec<Message>,
    statuses: HashMap<u64, MsgStatus>,
    inbox: VecDeque<Message>,
    logon_status: Option<LogonStatus>,
}

struct MockLink {
    is_atc: bool,
    state: Mutex<MockState>,
}

impl MockLink {
    fn aircraft() -> Arc<Self> {
        Arc::new(Self {
            is_atc: false,
            state: Mutex::new(MockState::default()),
        })
    }

    fn push_inbound(&self, msg: Message) {
        self.state.lock().unwrap().inbox.push_back(msg);
    }

    fn sent(&self) -> Vec<Message> {
        self.state.lock().unwrap().sent.clone()
    }

    fn set_logon_status(&self, status: LogonStatus) {
        self.state.lock().unwrap().logon_status = Some(status);
    }

    fn set_status_for(&self, token: MsgToken, status: MsgStatus) {
        self.state.lock().unwrap().statuses.insert(token.raw(), status);
    }
}

impl MessageLink for MockLink {
    fn is_atc(&self) -> bool {
        self.is_atc
    }

    fn logon_status(&self) -> LogonStatus {
        self.state
            .lock()
            .unwrap()
            .logon_status
            .unwrap_or(LogonStatus::Complete)
    }

    fn send_message(&self, msg: &Message) -> Option<MsgToken> {
        let mut state = self.state.lock().unwrap();
        state.next_token += 1;
        state.sent.push(msg.clone());
        MsgToken::from_raw(state.next_token)
    }

    fn message_status(&self, token: MsgToken) -> MsgStatus {
        self.state
            .lock()
            .unwrap()
            .statuses
            .get(&token.raw())
            .copied()
            .unwrap_or(MsgStatus::Sent)
    }

    fn receive_message(&self) -> Option<Message> {
        self.state.lock().unwrap().inbox.pop_front()
    }
}

struct FakeClock {
    now: Mutex<Duration>,
}

impl FakeClock {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Duration::from_secs(1000)),
        })
    }

    fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl TimeSource for FakeClock {
    fn utc_hours_mins(&self) -> (u8, u8) {
        let mins = self.now.lock().unwrap().as_secs() / 60;
        (((mins / 60) % 24) as u8, (mins % 60) as u8)
    }

    fn monotonic(&self) -> Duration {
        *self.now.lock().unwrap()
    }
}

fn setup() -> (Arc<MockLink>, Arc<FakeClock>, MsgList) {
    let link = MockLink::aircraft();
    let clock = FakeClock::new();
    let list = MsgList::with_link(link.clone(), clock.clone());
    (link, clock, list)
}

fn seg(dir: MsgDir, ty: u8, args: Vec<Arg>) -> Segment {
    Segment::new(lookup(dir, ty, None).unwrap(), args).unwrap()
}

fn downlink(ty: u8, args: Vec<Arg>) -> Message {
    let mut msg = Message::new(PacketType::Cpdlc);
    msg.add_seg(seg(MsgDir::Downlink, ty, args)).unwrap();
    msg
}

fn uplink(ty: u8, args: Vec<Arg>, min: u32, mrn: Option<u32>) -> Message {
    let mut msg = Message::new(PacketType::Cpdlc);
    msg.set_from(CallSign::try_from("KZOA").unwrap());
    msg.set_to(CallSign::try_from("N12345").unwrap());
    msg.set_min(min);
    if let Some(mrn) = mrn {
        msg.set_mrn(mrn);
    }
    msg.add_seg(seg(MsgDir::Uplink, ty, args)).unwrap();
    msg
}

fn fl(level: i32) -> Arg {
    Arg::Altitude(Altitude::flight_level(level))
}

#[test]
fn request_then_accept_closes_thread() {
    let (link, _clock, list) = setup();

    let thr = list.send(downlink(6, vec![fl(350)]), None);
    let sent_min = link.sent()[0].min().unwrap();

    // The ATC side answers with a clearance, then a roger.
    link.push_inbound(uplink(19, vec![fl(350)], 100, Some(sent_min)));
    list.process_incoming();
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Open);

    link.push_inbound(uplink(3, vec![], 101, Some(sent_min)));
    list.process_incoming();

    assert_eq!(list.thr_msg_count(thr), 3);
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Closed);
    assert!(list.thr_is_done(thr));
}

#[test]
fn standby_then_clearance_then_wilco() {
    let (link, _clock, list) = setup();

    let thr = list.send(downlink(9, vec![fl(370)]), None);
    let req_min = link.sent()[0].min().unwrap();

    link.push_inbound(uplink(1, vec![], 50, Some(req_min)));
    list.process_incoming();
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Standby);

    link.push_inbound(uplink(20, vec![fl(370)], 51, Some(req_min)));
    list.process_incoming();
    // The clearance alone does not resolve the thread.
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Standby);

    let thr_after = list.send(downlink(0, vec![]), Some(thr));
    assert_eq!(thr_after, thr);
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Accepted);

    // The WILCO must reference the clearance, not the standby.
    let wilco = link.sent().last().unwrap().clone();
    assert_eq!(wilco.mrn(), Some(51));
}

#[test]
fn response_timeout_sends_one_error_reply() {
    let (link, clock, list) = setup();

    let thr = list.send(downlink(9, vec![fl(390)]), None);
    let req_min = link.sent()[0].min().unwrap();

    clock.advance(Duration::from_secs(99));
    list.update();
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Open);

    clock.advance(Duration::from_secs(2));
    list.update();
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::TimedOut);

    let sent = link.sent();
    assert_eq!(sent.len(), 2);
    let err = &sent[1];
    assert_eq!(err.mrn(), Some(req_min));
    let seg = &err.segs()[0];
    assert_eq!(seg.template().ty, 62);
    assert!(seg.template().is_dl());
    assert_eq!(seg.arg(0), Some(&Arg::ErrInfo(ErrInfo::AppError)));

    // Sticky: further updates neither re-fire nor change the status.
    clock.advance(Duration::from_secs(500));
    list.update();
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::TimedOut);
    assert_eq!(link.sent().len(), 2);
}

#[test]
fn standby_suppresses_timeout() {
    let (link, clock, list) = setup();

    let thr = list.send(downlink(9, vec![fl(390)]), None);
    let req_min = link.sent()[0].min().unwrap();
    link.push_inbound(uplink(1, vec![], 50, Some(req_min)));
    list.process_incoming();

    clock.advance(Duration::from_secs(1000));
    list.update();
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Standby);
    assert_eq!(link.sent().len(), 1);
}

#[test]
fn min_assignment_is_strictly_increasing() {
    let (link, _clock, list) = setup();

    list.send(downlink(6, vec![fl(310)]), None);
    list.send(downlink(18, vec![Arg::Speed(cpdlc_types::arg::Speed::knots(280))]), None);
    list.send(downlink(41, vec![]), None);

    let mins: Vec<u32> = link.sent().iter().map(|msg| msg.min().unwrap()).collect();
    assert!(mins.windows(2).all(|w| w[0] < w[1]));
    assert!(mins[0] > 0);
}

#[test]
fn reply_mrn_links_to_uplink_min() {
    let (link, _clock, list) = setup();

    // An unsolicited clearance opens a new thread.
    link.push_inbound(uplink(20, vec![fl(330)], 77, None));
    list.process_incoming();
    let thr = list.thr_ids(false, None)[0];
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Open);
    assert!(list.thr_status(thr).1, "inbound content must mark dirty");

    let thr_after = list.send(downlink(0, vec![]), Some(thr));
    assert_eq!(thr_after, thr);
    assert_eq!(link.sent()[0].mrn(), Some(77));
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Accepted);
}

#[test]
fn mark_seen_is_idempotent() {
    let (link, _clock, list) = setup();

    link.push_inbound(uplink(20, vec![fl(330)], 12, None));
    list.process_incoming();
    let thr = list.thr_ids(false, None)[0];
    assert!(list.thr_status(thr).1);

    list.thr_mark_seen(thr);
    assert!(!list.thr_status(thr).1);
    list.thr_mark_seen(thr);
    assert!(!list.thr_status(thr).1);
}

#[test]
fn disregard_finalizes_thread() {
    let (link, _clock, list) = setup();

    // A clearance arrives, then the controller retracts it. The
    // DISREGARD references the controller's own earlier MIN.
    link.push_inbound(uplink(20, vec![fl(330)], 500, None));
    list.process_incoming();
    let thr = list.thr_ids(false, None)[0];

    link.push_inbound(uplink(168, vec![], 501, Some(500)));
    list.process_incoming();
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Disregard);
    assert!(list.thr_is_done(thr));
}

#[test]
fn closed_threads_do_not_capture_new_traffic() {
    let (link, _clock, list) = setup();

    let thr = list.send(downlink(9, vec![fl(370)]), None);
    let req_min = link.sent()[0].min().unwrap();
    list.thr_close(thr);

    // A late reply to the request must open a fresh thread.
    link.push_inbound(uplink(20, vec![fl(370)], 60, Some(req_min)));
    list.process_incoming();

    let ids = list.thr_ids(false, None);
    assert_eq!(ids.len(), 2);
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Closed);
    assert_eq!(list.thr_msg_count(thr), 1);
}

#[test]
fn connection_loss_finalizes_open_threads() {
    let (link, _clock, list) = setup();

    let thr = list.send(downlink(9, vec![fl(370)]), None);
    link.set_logon_status(LogonStatus::None);
    list.update();

    let (status, dirty) = list.thr_status(thr);
    assert_eq!(status, MsgThrStatus::ConnEnded);
    assert!(!dirty);

    // Sticky even if the link comes back.
    link.set_logon_status(LogonStatus::Complete);
    list.update();
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::ConnEnded);
}

#[test]
fn send_failure_surfaces_as_thread_status() {
    let (link, _clock, list) = setup();

    let thr = list.send(downlink(9, vec![fl(370)]), None);
    let token = list.thr_msg(thr, 0).token.unwrap();

    link.set_status_for(token, MsgStatus::Sending);
    list.update();
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Pending);

    link.set_status_for(token, MsgStatus::SendFailed);
    list.update();
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Failed);
    assert!(list.thr_is_done(thr));
}

#[test]
fn no_response_thread_closes_immediately() {
    let (link, _clock, list) = setup();

    let thr = list.send(downlink(41, vec![]), None);
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Closed);
    assert_eq!(link.sent().len(), 1);
}

#[test]
fn thread_queries_and_removal() {
    let (link, _clock, list) = setup();

    link.push_inbound(uplink(20, vec![fl(330)], 5, None));
    list.process_incoming();
    let thr = list.thr_ids(false, None)[0];

    assert!(list.thr_id_exists(thr));
    assert_eq!(list.remote_callsign(thr), "KZOA");

    let view = list.thr_msg(thr, 0);
    assert!(!view.sent);
    assert!(view.token.is_none());
    assert_eq!(view.msg.min(), Some(5));

    assert!(!list.thr_is_reviewed(thr));
    list.thr_mark_reviewed(thr);
    assert!(list.thr_is_reviewed(thr));

    list.remove_thr(thr);
    assert!(!list.thr_id_exists(thr));
    let _ = link;
}

#[test]
fn stale_threads_are_filtered() {
    let (link, clock, list) = setup();

    let thr = list.send(downlink(41, vec![]), None);
    assert_eq!(list.thr_status(thr).0, MsgThrStatus::Closed);
    let _ = link;

    // Recent finalized threads still show without ignore_closed.
    assert_eq!(list.thr_ids(false, Some(Duration::from_secs(60))).len(), 1);
    clock.advance(Duration::from_secs(120));
    assert!(list.thr_ids(false, Some(Duration::from_secs(60))).is_empty());
    assert!(list.thr_ids(true, None).is_empty());
    assert_eq!(list.thr_ids(false, None).len(), 1);
}

#[test]
fn update_cb_reports_changed_threads() {
    let (link, _clock, list) = setup();

    let changed: Arc<Mutex<Vec<Vec<cpdlc_client::MsgThrId>>>> =
        Arc::new(Mutex::new(Vec::new()));
    let log = changed.clone();
    list.set_update_cb(move |ids| log.lock().unwrap().push(ids.to_vec()));

    link.push_inbound(uplink(20, vec![fl(330)], 5, None));
    link.push_inbound(uplink(19, vec![fl(310)], 6, None));
    list.process_incoming();

    let calls = changed.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 2);
}

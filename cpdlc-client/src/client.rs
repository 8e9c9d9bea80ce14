//! The CPDLC connection client.
//!
//! A [`Client`] owns one background worker thread that maintains the
//! server connection: resolve, connect, TLS handshake, LOGON, the
//! send/receive loop, keepalive, and teardown. API callers hand in
//! [`Message`]s and the client serializes them over the wire; inbound
//! messages are queued and surfaced through [`Client::recv_msg`] plus an
//! optional receive callback.
//!
//! The client does not track inter-message relationships. Threading of
//! requests and responses lives in [`crate::msglist`].

use std::{
    collections::VecDeque,
    num::NonZeroU64,
    path::{Path, PathBuf},
    sync::{Arc, Weak},
    thread::{self, JoinHandle},
    time::Instant,
};

use parking_lot::Mutex;

use cpdlc_codec::MessageCodec;
use cpdlc_types::{
    core::CallSign,
    message::{Imi, Message, PacketType},
};

use crate::worker;

/// The well-known CPDLC-over-TCP port.
pub const DEFAULT_PORT: u16 = 17622;

/// The `from` sentinel that suppresses callsign stamping on send.
pub const AUTO_FROM: &str = "AUTO";

/// Opaque handle to an in-flight outbound message. Never zero; "no token"
/// is expressed as `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MsgToken(NonZeroU64);

impl MsgToken {
    /// Wraps a raw token value; zero is not a token. Alternative
    /// [`MessageLink`] implementations mint their tokens with this.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    pub fn raw(self) -> u64 {
        self.0.get()
    }
}

/// Send status of a tracked outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgStatus {
    /// Still queued or partially written.
    Sending,
    /// Fully handed to the transport.
    Sent,
    /// The link went down before transmission completed.
    SendFailed,
    /// The token is unknown (or its terminal status was already queried).
    InvalidToken,
}

/// Link/logon state, as visible to the API side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogonStatus {
    /// No link.
    None,
    /// TCP connect in progress.
    ConnectingLink,
    /// TLS handshake in progress.
    HandshakingLink,
    /// Transport is up, no logon exchange yet.
    LinkAvail,
    /// LOGON sent, waiting for the server's verdict.
    InProg,
    /// Logged on; normal message exchange is possible.
    Complete,
}

impl LogonStatus {
    /// Is the transport established (LinkAvail or beyond)?
    pub fn link_ready(self) -> bool {
        self >= LogonStatus::LinkAvail
    }
}

/// Client TLS key material configuration.
#[derive(Debug, Clone, Default)]
pub(crate) enum KeyConfig {
    #[default]
    None,
    Files {
        key_file: PathBuf,
        cert_file: PathBuf,
        password: Option<String>,
    },
    Pem {
        key_pem: String,
        cert_pem: String,
        password: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct LinkConfig {
    pub host: String,
    pub port: u16,
    pub ca_file: Option<PathBuf>,
    pub key: KeyConfig,
    pub unenc_local: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 0,
            ca_file: None,
            key: KeyConfig::None,
            unenc_local: false,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct LogonInfo {
    pub do_logon: bool,
    pub data: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub nda: Option<String>,
}

#[derive(Debug)]
pub(crate) struct OutBuf {
    pub token: MsgToken,
    pub status: MsgStatus,
    pub buf: Vec<u8>,
    pub bytes_sent: usize,
    pub track_sent: bool,
}

pub(crate) type MsgSentCb = Arc<dyn Fn(&[MsgToken]) + Send + Sync>;
pub(crate) type MsgRecvCb = Arc<dyn Fn() + Send + Sync>;

pub(crate) struct ClientState {
    pub cfg: LinkConfig,
    pub fmt_plain: bool,
    pub fmt_arinc622: bool,
    /// Bitrate simulation, bits per second; negative disables.
    pub bitrate_rx: i64,
    pub bitrate_tx: i64,
    pub rx_in_prog: bool,
    pub tx_in_prog: bool,

    pub logon: LogonInfo,
    pub logon_status: LogonStatus,
    pub logon_failure: String,

    pub worker: Option<JoinHandle<()>>,
    pub worker_running: bool,

    next_token: u64,
    pub sending: VecDeque<OutBuf>,
    pub sent: Vec<OutBuf>,
    pub inbuf: Vec<u8>,
    pub inbox: VecDeque<Message>,
    /// When any data was last sent or received; drives keepalive.
    pub last_data_rdwr: Instant,

    pub msg_sent_cb: Option<MsgSentCb>,
    pub msg_recv_cb: Option<MsgRecvCb>,
}

impl std::fmt::Debug for ClientState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ClientState")
            .field("logon_status", &self.logon_status)
            .field("sending", &self.sending.len())
            .field("inbox", &self.inbox.len())
            .finish_non_exhaustive()
    }
}

impl ClientState {
    fn new() -> Self {
        Self {
            cfg: LinkConfig::default(),
            fmt_plain: true,
            fmt_arinc622: false,
            bitrate_rx: -1,
            bitrate_tx: -1,
            rx_in_prog: false,
            tx_in_prog: false,
            logon: LogonInfo::default(),
            logon_status: LogonStatus::None,
            logon_failure: String::new(),
            worker: None,
            worker_running: false,
            next_token: 0,
            sending: VecDeque::new(),
            sent: Vec::new(),
            inbuf: Vec::new(),
            inbox: VecDeque::new(),
            last_data_rdwr: Instant::now(),
            msg_sent_cb: None,
            msg_recv_cb: None,
        }
    }

    pub(crate) fn set_logon_failure(&mut self, failure: Option<&str>) {
        self.logon_failure.clear();
        if let Some(failure) = failure {
            self.logon_failure.push_str(failure);
        }
    }

    /// Serializes `msg` and appends it to the outbound queue. The caller
    /// decides whether the resulting token is tracked past transmission.
    pub(crate) fn enqueue_msg(&mut self, msg: &mut Message, track_sent: bool) -> MsgToken {
        msg.fmt_plain = self.fmt_plain;
        msg.fmt_arinc622 = self.fmt_arinc622;

        self.next_token += 1;
        let token = MsgToken(NonZeroU64::new(self.next_token).unwrap());
        self.sending.push_back(OutBuf {
            token,
            status: MsgStatus::Sending,
            buf: MessageCodec::encode(msg),
            bytes_sent: 0,
            track_sent,
        });
        token
    }

    /// Queries (and on terminal states, retires) a token's status.
    pub(crate) fn msg_status(&mut self, token: MsgToken) -> MsgStatus {
        if let Some(at) = self.sent.iter().position(|out| out.token == token) {
            return self.sent.swap_remove(at).status;
        }
        if self.sending.iter().any(|out| out.token == token) {
            return MsgStatus::Sending;
        }
        MsgStatus::InvalidToken
    }
}

pub(crate) struct ClientInner {
    pub is_atc: bool,
    pub state: Mutex<ClientState>,
}

/// A CPDLC client handle. Cheap to clone; all clones refer to the same
/// connection.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("is_atc", &self.inner.is_atc)
            .field("state", &*self.inner.state.lock())
            .finish()
    }
}

impl Client {
    /// Creates a client with empty configuration. `is_atc` selects ground
    /// behavior: no data-authority gating, no END_SVC/NDA handling.
    pub fn new(is_atc: bool) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                is_atc,
                state: Mutex::new(ClientState::new()),
            }),
        }
    }

    pub fn is_atc(&self) -> bool {
        self.inner.is_atc
    }

    pub fn set_host(&self, host: &str) {
        let mut state = self.inner.state.lock();
        host.clone_into(&mut state.cfg.host);
        if !host.eq_ignore_ascii_case("localhost") {
            state.cfg.unenc_local = false;
        }
    }

    pub fn host(&self) -> String {
        self.inner.state.lock().cfg.host.clone()
    }

    /// Sets the server port; 0 selects [`DEFAULT_PORT`].
    pub fn set_port(&self, port: u16) {
        self.inner.state.lock().cfg.port = port;
    }

    pub fn port(&self) -> u16 {
        self.inner.state.lock().cfg.port
    }

    /// CA bundle used for server certificate verification. Without one,
    /// the system trust store is used.
    pub fn set_ca_file(&self, ca_file: Option<&Path>) {
        self.inner.state.lock().cfg.ca_file = ca_file.map(Path::to_path_buf);
    }

    pub fn ca_file(&self) -> Option<PathBuf> {
        self.inner.state.lock().cfg.ca_file.clone()
    }

    /// Configures a client certificate and key from PEM files.
    pub fn set_key_file(&self, key_file: &Path, password: Option<&str>, cert_file: &Path) {
        self.inner.state.lock().cfg.key = KeyConfig::Files {
            key_file: key_file.to_path_buf(),
            cert_file: cert_file.to_path_buf(),
            password: password.map(str::to_owned),
        };
    }

    /// Configures a client certificate and key from in-memory PEM data.
    pub fn set_key_mem(&self, key_pem: &str, password: Option<&str>, cert_pem: &str) {
        self.inner.state.lock().cfg.key = KeyConfig::Pem {
            key_pem: key_pem.to_owned(),
            cert_pem: cert_pem.to_owned(),
            password: password.map(str::to_owned),
        };
    }

    /// Removes any configured client key material.
    pub fn clear_key(&self) {
        self.inner.state.lock().cfg.key = KeyConfig::None;
    }

    /// Permits a plaintext link, but only to localhost.
    pub fn set_unencrypted_loopback(&self, flag: bool) {
        self.inner.state.lock().cfg.unenc_local = flag;
    }

    pub fn unencrypted_loopback(&self) -> bool {
        self.inner.state.lock().cfg.unenc_local
    }

    /// Selects the ARINC 622 output envelope for outbound messages.
    pub fn set_arinc622(&self, flag: bool) {
        self.inner.state.lock().fmt_arinc622 = flag;
    }

    pub fn arinc622(&self) -> bool {
        self.inner.state.lock().fmt_arinc622
    }

    /// Simulated receive bitrate in bit/s; negative disables pacing.
    pub fn set_bitrate_rx(&self, bitrate: i64) {
        self.inner.state.lock().bitrate_rx = bitrate;
    }

    pub fn bitrate_rx(&self) -> i64 {
        self.inner.state.lock().bitrate_rx
    }

    /// Simulated transmit bitrate in bit/s; negative disables pacing.
    pub fn set_bitrate_tx(&self, bitrate: i64) {
        self.inner.state.lock().bitrate_tx = bitrate;
    }

    pub fn bitrate_tx(&self) -> i64 {
        self.inner.state.lock().bitrate_tx
    }

    pub fn rx_in_progress(&self) -> bool {
        self.inner.state.lock().rx_in_prog
    }

    pub fn tx_in_progress(&self) -> bool {
        self.inner.state.lock().tx_in_prog
    }

    /// Records logon credentials and requests a logon exchange, spawning
    /// the worker thread if it is not already running.
    pub fn logon(&self, logon_data: &str, from: &str, to: Option<&str>) {
        let mut state = self.inner.state.lock();

        state.logon.do_logon = true;
        state.logon.data = Some(logon_data.to_owned());
        state.logon.from = Some(from.to_owned());
        state.logon.to = to.map(str::to_owned);
        state.logon.nda = None;
        state.set_logon_failure(None);

        if !state.worker_running {
            state.worker_running = true;
            let weak = Arc::downgrade(&self.inner);
            let handle = thread::Builder::new()
                .name("cpdlc-client".to_owned())
                .spawn(move || worker::worker_main(weak))
                .expect("spawning the client worker failed");
            state.worker = Some(handle);
        }
    }

    /// With an identity, sends a soft logoff message and keeps the link.
    /// Without one, tears the whole link down.
    pub fn logoff(&self, from: Option<&str>) {
        match from {
            Some(_) => {
                let mut msg = Message::new(PacketType::Cpdlc);
                msg.set_logoff(true);
                msg.set_imi(Imi::Disconnect);
                self.send_msg(&msg);
            }
            None => {
                let mut state = self.inner.state.lock();
                state.logon_status = LogonStatus::None;
                state.set_logon_failure(None);
            }
        }
    }

    pub fn logon_status(&self) -> LogonStatus {
        self.inner.state.lock().logon_status
    }

    /// The failure text of the last link or logon error, if any.
    pub fn logon_failure(&self) -> String {
        self.inner.state.lock().logon_failure.clone()
    }

    pub fn reset_logon_failure(&self) {
        self.inner.state.lock().set_logon_failure(None);
    }

    /// The current data authority (the facility we are logged on to).
    pub fn cda(&self) -> String {
        self.inner.state.lock().logon.to.clone().unwrap_or_default()
    }

    /// The next data authority, if one has been announced.
    pub fn nda(&self) -> String {
        self.inner
            .state
            .lock()
            .logon
            .nda
            .clone()
            .unwrap_or_default()
    }

    /// Deep-copies `msg`, stamps `from` (unless set to [`AUTO_FROM`]) and
    /// `to` (from the current data authority), and enqueues it. Returns
    /// `None` when not logged on.
    pub fn send_msg(&self, msg: &Message) -> Option<MsgToken> {
        let mut state = self.inner.state.lock();

        let from = state.logon.from.clone()?;
        let mut msg = msg.clone();
        if msg.from_id().map(|cs| cs.as_str()) != Some(AUTO_FROM) {
            match CallSign::try_from(from) {
                Ok(from) => msg.set_from(from),
                Err(_) => return None,
            }
        }
        if state.logon_status != LogonStatus::Complete {
            return None;
        }
        if let Some(to) = state
            .logon
            .to
            .as_deref()
            .and_then(|to| CallSign::try_from(to).ok())
        {
            msg.set_to(to);
        }
        Some(state.enqueue_msg(&mut msg, true))
    }

    /// Queries a token's status. Terminal statuses (`Sent`, `SendFailed`)
    /// retire the token: subsequent queries return `InvalidToken`.
    pub fn msg_status(&self, token: MsgToken) -> MsgStatus {
        self.inner.state.lock().msg_status(token)
    }

    /// Pops the next inbound message, transferring ownership.
    pub fn recv_msg(&self) -> Option<Message> {
        self.inner.state.lock().inbox.pop_front()
    }

    /// Installs a callback invoked from the worker whenever tracked
    /// messages finish transmission. Called with the client lock released.
    pub fn set_msg_sent_cb(&self, cb: impl Fn(&[MsgToken]) + Send + Sync + 'static) {
        self.inner.state.lock().msg_sent_cb = Some(Arc::new(cb));
    }

    /// Installs a callback invoked from the worker whenever new inbound
    /// messages are queued. Called with the client lock released.
    pub fn set_msg_recv_cb(&self, cb: impl Fn() + Send + Sync + 'static) {
        self.inner.state.lock().msg_recv_cb = Some(Arc::new(cb));
    }

    /// Tears the link down and joins the worker thread.
    pub fn shutdown(&self) {
        let handle = {
            let mut state = self.inner.state.lock();
            state.logon_status = LogonStatus::None;
            state.worker.take()
        };
        if let Some(handle) = handle {
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }
}

/// The seam between the message list and whatever delivers its messages.
///
/// [`Client`] is the production implementation; tests drive the list with
/// a scripted mock.
pub trait MessageLink: Send + Sync {
    fn is_atc(&self) -> bool;
    fn logon_status(&self) -> LogonStatus;
    fn send_message(&self, msg: &Message) -> Option<MsgToken>;
    fn message_status(&self, token: MsgToken) -> MsgStatus;
    fn receive_message(&self) -> Option<Message>;
}

impl MessageLink for Client {
    fn is_atc(&self) -> bool {
        Client::is_atc(self)
    }

    fn logon_status(&self) -> LogonStatus {
        Client::logon_status(self)
    }

    fn send_message(&self, msg: &Message) -> Option<MsgToken> {
        Client::send_msg(self, msg)
    }

    fn message_status(&self, token: MsgToken) -> MsgStatus {
        Client::msg_status(self, token)
    }

    fn receive_message(&self) -> Option<Message> {
        Client::recv_msg(self)
    }
}

pub(crate) type ClientRef = Weak<ClientInner>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_requires_logon() {
        let client = Client::new(false);
        let msg = Message::new(PacketType::Cpdlc);
        assert_eq!(client.send_msg(&msg), None);
        assert_eq!(client.logon_status(), LogonStatus::None);
    }

    #[test]
    fn test_token_lifecycle() {
        let mut state = ClientState::new();
        let mut msg = Message::new(PacketType::Cpdlc);
        let token = state.enqueue_msg(&mut msg, true);

        assert_eq!(state.msg_status(token), MsgStatus::Sending);

        // Simulate the worker completing the transmission.
        let mut out = state.sending.pop_front().unwrap();
        out.status = MsgStatus::Sent;
        out.buf.clear();
        state.sent.push(out);

        assert_eq!(state.msg_status(token), MsgStatus::Sent);
        assert_eq!(state.msg_status(token), MsgStatus::InvalidToken);
    }

    #[test]
    fn test_tokens_are_monotonic(){
        let mut state = ClientState::new();
        let mut msg = Message::new(PacketType::Cpdlc);
        let a = state.enqueue_msg(&mut msg, false);
        let b = state.enqueue_msg(&mut msg, false);
        let c = state.enqueue_msg(&mut msg, false);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_localhost_guard() {
        let client = Client::new(false);
        client.set_unencrypted_loopback(true);
        client.set_host("localhost");
        assert!(client.unencrypted_loopback());
        client.set_host("cpdlc.example.com");
        assert!(!client.unencrypted_loopback());
    }
}

//! Change Feed Binding
//!
//! Browser WebSocket carrying the realtime channel. Frames are handed to a
//! `FeedSession`; the resulting signals go into an mpsc queue drained by the
//! dashboard's pump. Handlers are kept alive by the `Subscription` and
//! dropped when it is cancelled.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use leads_core::realtime::{FeedSession, HeartbeatTick, HEARTBEAT_INTERVAL_MS};
use leads_core::{ConnectivityStatus, DashboardConfig, DashboardError, DashboardResult, FeedSignal};

/// Handle on one live channel. Cancelling is idempotent; dropping cancels.
#[derive(Default)]
pub struct Subscription {
    live: Option<LiveChannel>,
}

struct LiveChannel {
    socket: WebSocket,
    session: Rc<RefCell<FeedSession>>,
    signals: UnboundedSender<FeedSignal>,
    _heartbeat: Interval,
    _onopen: Closure<dyn FnMut()>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onclose: Closure<dyn FnMut(CloseEvent)>,
    _onerror: Closure<dyn FnMut(Event)>,
}

impl Subscription {
    /// Leave the channel, close the socket and end the signal queue
    pub fn cancel(&mut self) {
        if let Some(live) = self.live.take() {
            live.shutdown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl LiveChannel {
    fn shutdown(self) {
        let socket = &self.socket;
        socket.set_onopen(None);
        socket.set_onmessage(None);
        socket.set_onclose(None);
        socket.set_onerror(None);

        if socket.ready_state() == WebSocket::OPEN {
            let leave = self.session.borrow_mut().leave_frame();
            match leave {
                Ok(frame) => {
                    if let Err(e) = send_text(socket, &frame) {
                        log::warn!("[REALTIME] Failed to leave channel: {e}");
                    }
                }
                Err(e) => log::warn!("[REALTIME] Failed to encode leave: {e}"),
            }
        }
        if let Err(e) = socket.close() {
            log::warn!("[REALTIME] Failed to close socket: {e:?}");
        }
        self.signals.close_channel();
        log::info!("[REALTIME] Subscription cancelled");
    }
}

fn send_text(socket: &WebSocket, text: &str) -> DashboardResult<()> {
    socket
        .send_with_str(text)
        .map_err(|e| DashboardError::Socket(format!("Failed to send frame: {e:?}")))
}

fn emit(signals: &UnboundedSender<FeedSignal>, signal: Option<FeedSignal>) {
    if let Some(signal) = signal {
        // The receiver is gone only after cancel; nothing left to notify
        let _ = signals.unbounded_send(signal);
    }
}

/// Open the change feed for the `leads` table
pub fn subscribe(config: &DashboardConfig) -> DashboardResult<(Subscription, UnboundedReceiver<FeedSignal>)> {
    let endpoint = config.realtime_endpoint();
    log::info!(
        "[REALTIME] Connecting to {}",
        endpoint.host_str().unwrap_or("realtime endpoint")
    );

    let socket = WebSocket::new(endpoint.as_str())
        .map_err(|e| DashboardError::Socket(format!("Failed to create WebSocket: {e:?}")))?;
    let session = Rc::new(RefCell::new(FeedSession::for_leads(config)));
    let (signals, receiver) = mpsc::unbounded();

    // Join the channel once the socket is open
    let onopen = {
        let socket = socket.clone();
        let session = session.clone();
        let signals = signals.clone();
        Closure::<dyn FnMut()>::new(move || {
            let join = session.borrow_mut().join_frame();
            if let Err(e) = join.and_then(|frame| send_text(&socket, &frame)) {
                log::error!("[REALTIME] Join failed: {e}");
                emit(&signals, session.borrow_mut().transition(ConnectivityStatus::ChannelError));
            }
        })
    };

    let onmessage = {
        let session = session.clone();
        let signals = signals.clone();
        Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                log::warn!("[REALTIME] Ignoring non-text frame");
                return;
            };
            let handled = session.borrow_mut().handle_frame(&text);
            match handled {
                Ok(batch) => batch.into_iter().for_each(|signal| emit(&signals, Some(signal))),
                Err(e) => log::warn!("[REALTIME] Skipping frame: {e}"),
            }
        })
    };

    let onclose = {
        let session = session.clone();
        let signals = signals.clone();
        Closure::<dyn FnMut(CloseEvent)>::new(move |event: CloseEvent| {
            log::info!("[REALTIME] Socket closed: {} ({})", event.reason(), event.code());
            emit(&signals, session.borrow_mut().transition(ConnectivityStatus::Closed));
        })
    };

    let onerror = {
        let session = session.clone();
        let signals = signals.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            log::error!("[REALTIME] Socket error");
            emit(&signals, session.borrow_mut().transition(ConnectivityStatus::ChannelError));
        })
    };

    socket.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    socket.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    socket.set_onclose(Some(onclose.as_ref().unchecked_ref()));
    socket.set_onerror(Some(onerror.as_ref().unchecked_ref()));

    let heartbeat = {
        let socket = socket.clone();
        let session = session.clone();
        let signals = signals.clone();
        Interval::new(HEARTBEAT_INTERVAL_MS, move || {
            if socket.ready_state() != WebSocket::OPEN {
                return;
            }
            let tick = session.borrow_mut().heartbeat();
            match tick {
                Ok(HeartbeatTick::Send(frame)) => {
                    if let Err(e) = send_text(&socket, &frame) {
                        log::warn!("[REALTIME] Heartbeat not sent: {e}");
                    }
                }
                Ok(HeartbeatTick::TimedOut) => {
                    emit(&signals, session.borrow_mut().transition(ConnectivityStatus::TimedOut));
                    let _ = socket.close();
                }
                Err(e) => log::error!("[REALTIME] Heartbeat encode failed: {e}"),
            }
        })
    };

    let live = LiveChannel {
        socket,
        session,
        signals,
        _heartbeat: heartbeat,
        _onopen: onopen,
        _onmessage: onmessage,
        _onclose: onclose,
        _onerror: onerror,
    };
    Ok((Subscription { live: Some(live) }, receiver))
}

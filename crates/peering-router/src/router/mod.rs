//! The route-to-intent engine: update pipeline, resolution callback
//! handling and the query surface.
//!
//! One dedicated worker drains batches of route updates from an
//! unbounded queue and applies them against the route table. Routes
//! whose next hop has no known MAC are parked in the pending index and
//! picked up again by the host-event callback. Both paths mutate the
//! same state and therefore share one mutual-exclusion domain; the
//! intent sink is invoked under that lock so the table and the
//! submission stream cannot diverge.

use crate::config::{InterfaceService, PeeringConfigService};
use crate::error::RouterError;
use crate::host::{HostEvent, HostEventKind, HostListener, HostService, ListenerId};
use crate::intent::{IntentSink, IntentSynthesizer, RouteIntent};
use crate::resolve::PendingResolutions;
use crate::route::{RouteEntry, RouteTable, RouteUpdate, UpdateKind};
use log::{debug, info, warn};
use parking_lot::Mutex;
use peering_types::{Ipv4Prefix, MacAddress};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

/// Router configuration.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Next-hop address marking locally originated routes. Updates whose
    /// next hop equals this address still land in the route table but
    /// are never forwarded through the intent pipeline.
    pub local_next_hop: Ipv4Addr,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            local_next_hop: Ipv4Addr::UNSPECIFIED,
        }
    }
}

/// All mutable engine state behind one lock.
///
/// The route table, pending-resolution index and MAC cache must move
/// together: the pipeline and the resolution callback read and write
/// overlapping pieces, and updating them under separate locks would let
/// the table and the intent stream diverge.
#[derive(Default)]
struct RouterState {
    routes: RouteTable,
    pending: PendingResolutions,
}

struct RouterCore {
    config: RouterConfig,
    state: Mutex<RouterState>,
    sink: Arc<dyn IntentSink>,
    hosts: Arc<dyn HostService>,
    synth: IntentSynthesizer,
}

impl RouterCore {
    /// Applies one batch atomically and hands the resulting submissions
    /// and withdrawals to the intent sink in a single call.
    fn process_updates(&self, updates: Vec<RouteUpdate>) {
        let mut state = self.state.lock();
        let mut submissions: Vec<(Ipv4Prefix, RouteIntent)> = Vec::new();
        let mut withdrawals: Vec<Ipv4Prefix> = Vec::new();

        for update in updates {
            match update.kind() {
                UpdateKind::Update => {
                    if let Some(intent) =
                        self.process_route_add(&mut state, update.entry(), &mut withdrawals)
                    {
                        submissions.push((update.entry().prefix(), intent));
                    }
                }
                UpdateKind::Delete => {
                    self.process_route_delete(&mut state, update.entry(), &mut withdrawals);
                }
            }
        }

        self.sink.update_route_intents(submissions, withdrawals);
    }

    /// Applies one announce/replace update. Returns the intent to
    /// submit, or `None` when the update is a duplicate, locally
    /// originated, parked on resolution, or has no egress.
    fn process_route_add(
        &self,
        state: &mut RouterState,
        entry: RouteEntry,
        withdrawals: &mut Vec<Ipv4Prefix>,
    ) -> Option<RouteIntent> {
        debug!("Processing route add: {}", entry);

        if let Some(previous) = state.routes.put(entry) {
            if previous.next_hop() == entry.next_hop() {
                // Same prefix, same next hop: nothing to do.
                return None;
            }
            // This update supersedes the previous next hop: the old
            // intent must go, and the superseded entry must not linger
            // in the pending set.
            withdrawals.push(entry.prefix());
            state.pending.unpark(&previous);
        }

        if entry.next_hop() == self.config.local_next_hop {
            debug!("Own route {} to {}", entry.prefix(), entry.next_hop());
            return None;
        }

        // Keep the host subsystem resolving this next hop.
        self.hosts.start_monitoring(entry.next_hop());

        let mac = match state.pending.cached_mac(entry.next_hop()) {
            Some(mac) => Some(mac),
            None => {
                let mac = self
                    .hosts
                    .hosts_by_ip(entry.next_hop())
                    .first()
                    .map(|host| host.mac);
                if let Some(mac) = mac {
                    state.pending.cache_mac(entry.next_hop(), mac);
                }
                mac
            }
        };

        let Some(mac) = mac else {
            state.pending.park(entry);
            return None;
        };

        self.synth.synthesize(entry.prefix(), entry.next_hop(), mac)
    }

    /// Applies one withdraw update.
    fn process_route_delete(
        &self,
        state: &mut RouterState,
        entry: RouteEntry,
        withdrawals: &mut Vec<Ipv4Prefix>,
    ) {
        debug!("Processing route delete: {}", entry);

        if state.routes.remove_exact(&entry.prefix()) {
            // Only withdraw when an entry was actually removed;
            // otherwise the prefix was never installed or is gone.
            withdrawals.push(entry.prefix());
        }

        state.pending.unpark(&entry);
    }

    /// Re-evaluates routes parked on `address` once its MAC is known.
    fn on_address_resolved(&self, address: Ipv4Addr, mac: MacAddress) {
        debug!("Resolved {} => {}", address, mac);

        let mut state = self.state.lock();
        let mut submissions: Vec<(Ipv4Prefix, RouteIntent)> = Vec::new();

        for entry in state.pending.take_waiting(address) {
            // Only push routes whose table entry survived the wait: the
            // prefix may have been withdrawn, or its next hop superseded,
            // while the resolution was outstanding.
            let current = state.routes.get_exact(&entry.prefix());
            if current.map_or(false, |c| c.next_hop() == entry.next_hop()) {
                if let Some(intent) = self.synth.synthesize(entry.prefix(), address, mac) {
                    submissions.push((entry.prefix(), intent));
                }
            } else {
                debug!("{} was revoked before {} resolved", entry, address);
            }
        }

        if !submissions.is_empty() {
            // Resolution never implies withdrawal.
            self.sink.update_route_intents(submissions, Vec::new());
        }

        state.pending.cache_mac(address, mac);
    }
}

/// Bridges host events into the engine under its lock.
struct HostWatcher(Arc<RouterCore>);

impl HostListener for HostWatcher {
    fn on_host_event(&self, event: &HostEvent) {
        debug!("Received host event: {:?} {}", event.kind, event.host);

        match event.kind {
            HostEventKind::Added | HostEventKind::Updated => {
                for address in &event.host.addresses {
                    self.0.on_address_resolved(*address, event.host.mac);
                }
            }
            HostEventKind::Removed => {
                let mut state = self.0.state.lock();
                for address in &event.host.addresses {
                    state.pending.evict_mac(*address);
                }
            }
        }
    }
}

/// Handles of a started pipeline.
struct Running {
    tx: UnboundedSender<Vec<RouteUpdate>>,
    worker: JoinHandle<()>,
    listener: ListenerId,
}

/// The route-to-forwarding-intent engine.
///
/// Consumes batches of route updates, maintains the border route table,
/// resolves next hops to MAC addresses via the host service, and emits
/// submit/withdraw instructions to the intent sink.
pub struct Router {
    core: Arc<RouterCore>,
    running: Mutex<Option<Running>>,
}

impl Router {
    /// Creates a router over the given boundary services.
    pub fn new(
        config: RouterConfig,
        sink: Arc<dyn IntentSink>,
        hosts: Arc<dyn HostService>,
        peering: Arc<dyn PeeringConfigService>,
        interfaces: Arc<dyn InterfaceService>,
    ) -> Self {
        let synth = IntentSynthesizer::new(peering, interfaces);
        Router {
            core: Arc::new(RouterCore {
                config,
                state: Mutex::new(RouterState::default()),
                sink,
                hosts,
                synth,
            }),
            running: Mutex::new(None),
        }
    }

    /// Starts the update worker and registers for host events.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<(), RouterError> {
        let mut running = self.running.lock();
        if running.is_some() {
            return Err(RouterError::AlreadyStarted);
        }

        let listener = self
            .core
            .hosts
            .add_listener(Arc::new(HostWatcher(self.core.clone())));

        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<RouteUpdate>>();
        let core = self.core.clone();
        let worker = tokio::spawn(async move {
            while let Some(batch) = rx.recv().await {
                core.process_updates(batch);
            }
        });

        *running = Some(Running {
            tx,
            worker,
            listener,
        });
        info!("Router started");
        Ok(())
    }

    /// Stops the worker, deregisters the host listener and resets all
    /// in-memory state.
    ///
    /// This is a fail-fast reset, not a graceful drain: the current
    /// batch may be abandoned and queued batches are discarded. Restart
    /// begins from empty state and relies on the route source to resend.
    pub fn stop(&self) -> Result<(), RouterError> {
        let running = self.running.lock().take().ok_or(RouterError::NotStarted)?;

        self.core.hosts.remove_listener(running.listener);
        running.worker.abort();
        drop(running.tx);

        let mut state = self.core.state.lock();
        state.routes.clear();
        state.pending.clear();
        info!("Router stopped");
        Ok(())
    }

    /// Enqueues a batch of route updates.
    ///
    /// Never blocks; the queue is unbounded. Batches are processed in
    /// FIFO arrival order, each in its own iteration order. When the
    /// pipeline is not running the batch is dropped with a log —
    /// delivery after stop is best-effort by design.
    pub fn update(&self, updates: Vec<RouteUpdate>) {
        let running = self.running.lock();
        let delivered = match running.as_ref() {
            Some(running) => running.tx.send(updates).is_ok(),
            None => false,
        };
        if !delivered {
            warn!("Dropping route update batch: pipeline is not running");
        }
    }

    /// Returns a snapshot of all currently known routes.
    ///
    /// Holds the lock only long enough to copy.
    pub fn routes(&self) -> Vec<RouteEntry> {
        self.core.state.lock().routes.routes()
    }
}

//! Single-writer war tasks
//!
//! Each [`War`] lives inside one tokio task that owns it outright. Callers hold
//! a cloneable [`WarHandle`] and talk to the task over a command channel, so
//! concurrent submissions against the same war are serialized by the channel
//! instead of by locks.

use ahash::AHashMap;
use tokio::sync::{mpsc, oneshot};

use crate::combat::random::RandomSource;
use crate::core::error::{ActionError, EngineError, Result};
use crate::core::types::{CombatantId, Timestamp, WarId};
use crate::war::combatant::Combatant;
use crate::war::history::{ActionRequest, BattleAction};
use crate::war::lifecycle::{TurnAdvance, War};

/// Commands queued before the owning task starts pushing back on senders
const COMMAND_BUFFER: usize = 64;

/// Commands sent from handles to the owning task.
#[derive(Debug)]
enum Command {
    Join {
        combatant: Box<Combatant>,
        now: Timestamp,
        reply: oneshot::Sender<Result<CombatantId>>,
    },
    Submit {
        request: ActionRequest,
        now: Timestamp,
        reply: oneshot::Sender<std::result::Result<BattleAction, ActionError>>,
    },
    Advance {
        intervals: u32,
        reply: oneshot::Sender<TurnAdvance>,
    },
    Tick {
        now: Timestamp,
        reply: oneshot::Sender<TurnAdvance>,
    },
    Sweep {
        now: Timestamp,
        reply: oneshot::Sender<bool>,
    },
    Snapshot {
        reply: oneshot::Sender<War>,
    },
}

/// Handle to a running war task
#[derive(Debug, Clone)]
pub struct WarHandle {
    id: WarId,
    tx: mpsc::Sender<Command>,
}

/// Move `war` into its own task and return a handle to it
///
/// Must be called from inside a tokio runtime. The task ends once every
/// handle has been dropped.
pub fn spawn_war<R>(war: War, rng: R) -> WarHandle
where
    R: RandomSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let id = war.id;
    tokio::spawn(run(war, rng, rx));
    tracing::debug!(war = %id, "War task spawned");
    WarHandle { id, tx }
}

async fn run<R: RandomSource>(mut war: War, mut rng: R, mut rx: mpsc::Receiver<Command>) {
    while let Some(command) = rx.recv().await {
        // A dropped reply receiver only means the caller stopped waiting
        match command {
            Command::Join { combatant, now, reply } => {
                let _ = reply.send(war.join(*combatant, now));
            }
            Command::Submit { request, now, reply } => {
                let _ = reply.send(war.submit(&request, &mut rng, now));
            }
            Command::Advance { intervals, reply } => {
                let _ = reply.send(war.advance_turns(intervals));
            }
            Command::Tick { now, reply } => {
                let _ = reply.send(war.tick(now));
            }
            Command::Sweep { now, reply } => {
                let _ = reply.send(war.abandon_if_idle(now));
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(war.clone());
            }
        }
    }
    tracing::debug!(war = %war.id, "War task stopped");
}

impl WarHandle {
    pub fn id(&self) -> WarId {
        self.id
    }

    /// True once the owning task has gone away
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| EngineError::WarClosed)?;
        response.await.map_err(|_| EngineError::WarClosed)
    }

    pub async fn join(&self, combatant: Combatant, now: Timestamp) -> Result<CombatantId> {
        self.request(|reply| Command::Join { combatant: Box::new(combatant), now, reply })
            .await?
    }

    pub async fn submit(&self, request: ActionRequest, now: Timestamp) -> Result<BattleAction> {
        Ok(self
            .request(|reply| Command::Submit { request, now, reply })
            .await??)
    }

    pub async fn advance(&self, intervals: u32) -> Result<TurnAdvance> {
        self.request(|reply| Command::Advance { intervals, reply }).await
    }

    pub async fn tick(&self, now: Timestamp) -> Result<TurnAdvance> {
        self.request(|reply| Command::Tick { now, reply }).await
    }

    /// Abandon the war if it has been idle too long; true if it was
    pub async fn sweep(&self, now: Timestamp) -> Result<bool> {
        self.request(|reply| Command::Sweep { now, reply }).await
    }

    /// Copy of the war as of the moment the task handled this request
    pub async fn snapshot(&self) -> Result<War> {
        self.request(|reply| Command::Snapshot { reply }).await
    }
}

/// Index of running wars by id
#[derive(Debug, Default)]
pub struct WarRegistry {
    wars: AHashMap<WarId, WarHandle>,
}

impl WarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `war` and register its handle
    pub fn spawn<R>(&mut self, war: War, rng: R) -> WarHandle
    where
        R: RandomSource + Send + 'static,
    {
        let handle = spawn_war(war, rng);
        self.insert(handle.clone());
        handle
    }

    pub fn insert(&mut self, handle: WarHandle) -> Option<WarHandle> {
        self.wars.insert(handle.id, handle)
    }

    pub fn get(&self, id: WarId) -> Option<&WarHandle> {
        self.wars.get(&id)
    }

    pub fn remove(&mut self, id: WarId) -> Option<WarHandle> {
        self.wars.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.wars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wars.is_empty()
    }

    /// Run the inactivity sweep over every war
    ///
    /// Returns the ids of wars abandoned by this sweep. Handles whose task has
    /// stopped are dropped from the registry.
    pub async fn sweep_inactive(&mut self, now: Timestamp) -> Vec<WarId> {
        let mut abandoned = Vec::new();
        let mut closed = Vec::new();

        for (id, handle) in &self.wars {
            match handle.sweep(now).await {
                Ok(true) => abandoned.push(*id),
                Ok(false) => {}
                Err(_) => closed.push(*id),
            }
        }
        for id in closed {
            tracing::warn!(war = %id, "Dropping handle to stopped war");
            self.wars.remove(&id);
        }

        if !abandoned.is_empty() {
            tracing::info!(count = abandoned.len(), "Inactivity sweep abandoned wars");
        }
        abandoned
    }
}

//! Session Context
//!
//! Tracks whether a signing agent is authorized and which account it speaks
//! for. Two states only: disconnected, or connected to one wallet. Leaving
//! the connected state (explicit disconnect or reported loss) always lands
//! in disconnected; getting back needs a fresh `connect`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;

use crate::config::GatewayConfig;
use crate::error::{SessionError, TransportError, WalletError};
use crate::gateway::TodoGateway;
use crate::payload::{AccountAddress, EntryFunctionTransaction, PendingTransaction};
use crate::transport::{LedgerClient, TransactionSigner};

/// Static description of a supported wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletInfo {
    pub name: &'static str,
    /// Key used when probing the environment for the wallet
    pub detection_key: &'static str,
    pub install_url: &'static str,
}

pub const PETRA_INSTALL_URL: &str =
    "https://chromewebstore.google.com/detail/petra-aptos-wallet/ejjladinnckdgjemekebdpeokbikhfci";

pub const KNOWN_WALLETS: [WalletInfo; 3] = [
    WalletInfo {
        name: "Petra",
        detection_key: "petra",
        install_url: PETRA_INSTALL_URL,
    },
    WalletInfo {
        name: "Martian",
        detection_key: "martian",
        install_url: "https://chromewebstore.google.com/detail/martian-aptos-wallet/efbglgofoippbgcjepnhiblaibcnclgk",
    },
    WalletInfo {
        name: "Pontem",
        detection_key: "pontem",
        install_url: "https://chromewebstore.google.com/detail/pontem-aptos-wallet/phkbamefinggmakgklpkljjmgibohnba",
    },
];

/// Look up a known wallet by display name or detection key.
pub fn wallet_info(name: &str) -> Option<&'static WalletInfo> {
    KNOWN_WALLETS
        .iter()
        .find(|w| w.name.eq_ignore_ascii_case(name) || w.detection_key.eq_ignore_ascii_case(name))
}

/// External program holding the account's private credential
#[async_trait(?Send)]
pub trait WalletAgent {
    fn name(&self) -> &str;

    async fn connect(&self) -> Result<AccountAddress, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    async fn sign_and_submit(
        &self,
        transaction: &EntryFunctionTransaction,
    ) -> Result<PendingTransaction, WalletError>;
}

/// Discovery of wallet agents present in the environment
pub trait WalletRegistry {
    /// Names of the agents that report ready
    fn list_available(&self) -> Vec<String>;

    fn is_ready(&self, name: &str) -> bool;

    fn agent(&self, name: &str) -> Option<Rc<dyn WalletAgent>>;
}

/// An authorized account plus the agent that can sign for it
#[derive(Clone)]
pub struct Identity {
    wallet: String,
    address: AccountAddress,
    agent: Rc<dyn WalletAgent>,
}

impl Identity {
    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    /// Signing capability for the gateway
    pub fn signer(&self) -> Rc<dyn TransactionSigner> {
        Rc::new(AgentSigner {
            agent: Rc::clone(&self.agent),
        })
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("wallet", &self.wallet)
            .field("address", &self.address)
            .finish()
    }
}

struct AgentSigner {
    agent: Rc<dyn WalletAgent>,
}

#[async_trait(?Send)]
impl TransactionSigner for AgentSigner {
    async fn sign_and_submit(
        &self,
        transaction: &EntryFunctionTransaction,
    ) -> Result<PendingTransaction, TransportError> {
        self.agent
            .sign_and_submit(transaction)
            .await
            .map_err(TransportError::from)
    }
}

#[derive(Debug, Clone)]
pub enum SessionState {
    Disconnected,
    Connected(Identity),
}

/// Connection lifecycle with the wallet agents found by `R`
pub struct Session<R> {
    registry: R,
    state: RefCell<SessionState>,
    generation: Cell<u64>,
}

impl<R: WalletRegistry> Session<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            state: RefCell::new(SessionState::Disconnected),
            generation: Cell::new(0),
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Agents that are installed and ready to connect
    pub fn available_wallets(&self) -> Vec<String> {
        self.registry
            .list_available()
            .into_iter()
            .filter(|name| self.registry.is_ready(name))
            .collect()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        match &*self.state.borrow() {
            SessionState::Connected(identity) => Some(identity.clone()),
            SessionState::Disconnected => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(&*self.state.borrow(), SessionState::Connected(_))
    }

    /// Bumped on every state change; consumers rebuild their gateway when it moves.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Ask the named agent for a session.
    ///
    /// Switching to a different wallet disconnects the current one first, so a
    /// failed switch leaves the session disconnected. Any other failure leaves
    /// the session as it was.
    pub async fn connect(&self, name: &str) -> Result<Identity, SessionError> {
        let agent = self
            .registry
            .agent(name)
            .ok_or_else(|| SessionError::UnknownWallet { name: name.to_string() })?;
        if !self.registry.is_ready(name) {
            return Err(SessionError::NotReady { name: name.to_string() });
        }

        if let Some(current) = self.identity() {
            if current.wallet == agent.name() {
                return Ok(current);
            }
            log::info!("Switching wallet from {} to {}", current.wallet, agent.name());
            if let Err(error) = self.disconnect().await {
                log::warn!("{}", error);
            }
        }

        let address = agent.connect().await.map_err(|source| SessionError::Connect {
            name: name.to_string(),
            source,
        })?;

        let identity = Identity {
            wallet: agent.name().to_string(),
            address,
            agent,
        };
        log::info!("Connected {} as {}", identity.wallet, identity.address);
        self.set_state(SessionState::Connected(identity.clone()));
        Ok(identity)
    }

    /// Tear the session down. The session is disconnected even if the agent reports an error.
    pub async fn disconnect(&self) -> Result<(), SessionError> {
        let Some(identity) = self.take_identity() else {
            return Ok(());
        };
        log::info!("Disconnecting {}", identity.wallet);
        identity
            .agent
            .disconnect()
            .await
            .map_err(|source| SessionError::Disconnect {
                name: identity.wallet.clone(),
                source,
            })
    }

    /// The agent reported that it dropped the connection.
    pub fn handle_connection_lost(&self) {
        if let Some(identity) = self.take_identity() {
            log::warn!("Lost connection to {} ({})", identity.wallet, identity.address);
        }
    }

    /// Gateway for the current state: signing when connected, read-only otherwise.
    pub fn gateway(&self, config: &GatewayConfig, ledger: Rc<dyn LedgerClient>) -> TodoGateway {
        let gateway = TodoGateway::new(config.clone(), ledger);
        match self.identity() {
            Some(identity) => gateway.with_signer(Some(identity.signer()), Some(identity.address().clone())),
            None => gateway,
        }
    }

    fn take_identity(&self) -> Option<Identity> {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), SessionState::Disconnected);
        match previous {
            SessionState::Connected(identity) => {
                self.bump();
                Some(identity)
            }
            SessionState::Disconnected => None,
        }
    }

    fn set_state(&self, state: SessionState) {
        *self.state.borrow_mut() = state;
        self.bump();
    }

    fn bump(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}

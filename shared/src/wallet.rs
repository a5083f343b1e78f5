//! # Wallet Connection State Machine
//!
//! Folds provider responses and provider events into a [`ConnectionState`].
//! Each transition reports what should happen to the active chain and which
//! toast to show, leaving the actual side effects to the caller.
//!
//! ```text
//! Disconnected --ConnectRequested--> Connecting
//! Connecting   --Connected(ok)-----> Connected
//! Connecting   --ConnectFailed-----> Disconnected
//! Connected    --AccountsChanged([])> Disconnected
//! any          --ChainChanged(unsupported)--> Disconnected
//! ```

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::chains::{Chain, ChainKey};
use crate::notify::Notification;
use crate::utils::truncate_address;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected { address: Address, chain: ChainKey },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }

    pub fn address(&self) -> Option<Address> {
        match self {
            ConnectionState::Connected { address, .. } => Some(*address),
            _ => None,
        }
    }

    /// Label for the wallet badge: shortened address when connected.
    pub fn display_address(&self) -> Option<String> {
        self.address().map(|a| truncate_address(&a.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// User pressed "Connect Wallet"
    ConnectRequested,
    /// `eth_requestAccounts` + `eth_chainId` resolved
    Connected { accounts: Vec<Address>, chain_id: u64 },
    /// Silent `eth_accounts` check on page load
    Restored { accounts: Vec<Address>, chain_id: u64 },
    ConnectFailed(String),
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
    DisconnectRequested,
}

/// What the transition asks of the settings state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainUpdate {
    Keep,
    Set(ChainKey),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub chain: ChainUpdate,
    pub notification: Option<Notification>,
}

impl Transition {
    fn quiet() -> Self {
        Self {
            chain: ChainUpdate::Keep,
            notification: None,
        }
    }

    fn new(chain: ChainUpdate, notification: Notification) -> Self {
        Self {
            chain,
            notification: Some(notification),
        }
    }
}

pub fn unsupported_chain_notice() -> Notification {
    Notification::destructive(
        "Unsupported Chain",
        "The selected chain is not supported. Please switch to a supported chain.",
    )
}

fn disconnected_notice() -> Notification {
    Notification::info("Wallet Disconnected", "Your wallet has been disconnected")
}

impl ConnectionState {
    /// Apply one event and report the follow-up for chain selection and toasts.
    pub fn apply(&mut self, event: WalletEvent) -> Transition {
        match event {
            WalletEvent::ConnectRequested => {
                *self = ConnectionState::Connecting;
                Transition::quiet()
            }

            WalletEvent::Connected { accounts, chain_id } => {
                let Some(address) = accounts.first().copied() else {
                    *self = ConnectionState::Disconnected;
                    return Transition::new(
                        ChainUpdate::Keep,
                        Notification::destructive(
                            "Connection Failed",
                            "No accounts were returned by the wallet",
                        ),
                    );
                };
                self.connect(address, chain_id, "Wallet Connected")
            }

            WalletEvent::Restored { accounts, chain_id } => match accounts.first().copied() {
                Some(address) => self.connect(address, chain_id, "Wallet Reconnected"),
                None => {
                    *self = ConnectionState::Disconnected;
                    Transition::quiet()
                }
            },

            WalletEvent::ConnectFailed(reason) => {
                *self = ConnectionState::Disconnected;
                Transition::new(
                    ChainUpdate::Keep,
                    Notification::destructive("Connection Failed", reason),
                )
            }

            WalletEvent::AccountsChanged(accounts) => {
                let ConnectionState::Connected { address, chain } = self.clone() else {
                    return Transition::quiet();
                };
                match accounts.first().copied() {
                    None => {
                        *self = ConnectionState::Disconnected;
                        Transition::new(ChainUpdate::Keep, disconnected_notice())
                    }
                    Some(next) if next == address => Transition::quiet(),
                    Some(next) => {
                        *self = ConnectionState::Connected {
                            address: next,
                            chain,
                        };
                        Transition::new(
                            ChainUpdate::Keep,
                            Notification::info(
                                "Account Changed",
                                format!("Connected to {}", truncate_address(&next.to_string())),
                            ),
                        )
                    }
                }
            }

            WalletEvent::ChainChanged(chain_id) => match Chain::by_id(chain_id) {
                Some(chain) => {
                    if let ConnectionState::Connected { address, .. } = self.clone() {
                        *self = ConnectionState::Connected {
                            address,
                            chain: chain.key,
                        };
                    }
                    Transition::new(
                        ChainUpdate::Set(chain.key),
                        Notification::info("Chain Changed", format!("Switched to {}", chain.name)),
                    )
                }
                None => {
                    *self = ConnectionState::Disconnected;
                    Transition::new(ChainUpdate::Clear, unsupported_chain_notice())
                }
            },

            WalletEvent::DisconnectRequested => {
                *self = ConnectionState::Disconnected;
                Transition::new(ChainUpdate::Keep, disconnected_notice())
            }
        }
    }

    fn connect(&mut self, address: Address, chain_id: u64, title: &str) -> Transition {
        match Chain::by_id(chain_id) {
            Some(chain) => {
                *self = ConnectionState::Connected {
                    address,
                    chain: chain.key,
                };
                Transition::new(
                    ChainUpdate::Set(chain.key),
                    Notification::success(
                        title,
                        format!(
                            "Connected to {} on {}",
                            truncate_address(&address.to_string()),
                            chain.name
                        ),
                    ),
                )
            }
            None => {
                *self = ConnectionState::Disconnected;
                Transition::new(ChainUpdate::Clear, unsupported_chain_notice())
            }
        }
    }
}

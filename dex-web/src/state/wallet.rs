//! Wallet connection context.
//!
//! Wraps the [`ConnectionState`] machine: every provider callback or button
//! press becomes a [`WalletEvent`], and the resulting transition is fanned
//! out to the settings context (chain selection) and the toaster.

use alloy_primitives::Address;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_evm::{dex, EvmError, Receipt};
use shared::chains::Chain;
use shared::dto::Token;
use shared::wallet::{ConnectionState, WalletEvent};

use crate::error::{AppError, Result};
use crate::services::ethereum::{self, client};
use crate::state::{SettingsContext, ToastContext};

/// Last transaction shown in the "submitted" dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedTx {
    pub hash: String,
    pub explorer_url: String,
}

#[derive(Clone, Copy)]
pub struct WalletContext {
    pub connection: RwSignal<ConnectionState>,
    pub swapping: RwSignal<bool>,
    pub submitted_tx: RwSignal<Option<SubmittedTx>>,
    settings: SettingsContext,
    toasts: ToastContext,
}

impl WalletContext {
    pub fn new(settings: SettingsContext, toasts: ToastContext) -> Self {
        Self {
            connection: RwSignal::new(ConnectionState::Disconnected),
            swapping: RwSignal::new(false),
            submitted_tx: RwSignal::new(None),
            settings,
            toasts,
        }
    }

    pub fn apply(self, event: WalletEvent) {
        log::debug!("Wallet event: {:?}", event);
        let mut transition = None;
        self.connection
            .update(|state| transition = Some(state.apply(event)));
        let Some(transition) = transition else {
            return;
        };

        for notification in self.settings.apply_transition(transition) {
            self.toasts.push(notification);
        }
    }

    /// Prompt the wallet for accounts.
    pub fn connect(self) {
        self.apply(WalletEvent::ConnectRequested);
        spawn_local(async move {
            let client = client();
            let result = async {
                let accounts = client.request_accounts().await?;
                let chain_id = client.chain_id().await?;
                Ok::<_, EvmError>((accounts, chain_id))
            }
            .await;

            let event = match result {
                Ok((accounts, chain_id)) => WalletEvent::Connected { accounts, chain_id },
                Err(e) => {
                    log::error!("Wallet connection failed: {}", e);
                    WalletEvent::ConnectFailed(e.user_message())
                }
            };
            self.apply(event);
        });
    }

    /// Reconnect without prompting when the site is already authorised.
    pub async fn restore(self) {
        if !ethereum::wallet_available() {
            log::info!("No injected wallet found");
            return;
        }
        let client = client();
        let result = async {
            let accounts = client.accounts().await?;
            let chain_id = client.chain_id().await?;
            Ok::<_, EvmError>((accounts, chain_id))
        }
        .await;

        match result {
            Ok((accounts, _)) if accounts.is_empty() => {}
            Ok((accounts, chain_id)) => self.apply(WalletEvent::Restored { accounts, chain_id }),
            Err(e) => log::warn!("Silent wallet reconnect failed: {}", e),
        }
    }

    pub fn disconnect(self) {
        self.apply(WalletEvent::DisconnectRequested);
    }

    pub fn address(&self) -> Option<Address> {
        self.connection.with(|state| state.address())
    }

    /// Connected account and active chain, or why there is none.
    pub fn session(&self) -> Result<(Address, &'static Chain)> {
        let address = self
            .connection
            .with_untracked(|state| state.address())
            .ok_or_else(AppError::not_connected)?;
        let chain = self
            .settings
            .active_chain_untracked()
            .ok_or_else(|| AppError::Wallet("Please switch to a supported network".to_string()))?;
        Ok((address, chain))
    }

    /// Read `token`'s balance for the connected account and cache it in the
    /// token list. `None` when disconnected or the read failed.
    pub async fn fetch_balance(self, token: &Token) -> Option<String> {
        let (owner, chain) = self.session().ok()?;
        match dex::fetch_balance(&client(), chain, token, owner).await {
            Ok(balance) => {
                self.settings.update_balance(token.address, &balance);
                Some(balance)
            }
            Err(e) => {
                log::warn!("Failed to fetch {} balance: {}", token.symbol, e);
                None
            }
        }
    }

    pub fn show_submitted(self, chain: &Chain, receipt: &Receipt) {
        let hash = receipt.tx_hash();
        self.submitted_tx.set(Some(SubmittedTx {
            explorer_url: chain.explorer_tx_url(&hash),
            hash,
        }));
    }

    /// Ask the wallet to move to `chain`. The resulting `chainChanged`
    /// event updates the connection state.
    pub fn switch_chain(self, chain: &'static Chain) {
        spawn_local(async move {
            match client().switch_chain(chain.chain_id).await {
                Ok(()) => log::info!("Requested switch to {}", chain.name),
                Err(e) => {
                    if matches!(e, EvmError::ChainNotAdded(_)) {
                        log::warn!("{} is not configured in the wallet", chain.name);
                    }
                    self.toasts
                        .report("Network Switch Failed", &AppError::from(e));
                }
            }
        });
    }
}

pub fn provide_wallet_context(settings: SettingsContext, toasts: ToastContext) -> WalletContext {
    let ctx = WalletContext::new(settings, toasts);
    provide_context(ctx);
    ctx
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}

//! # Settings State
//!
//! Active chain, the token list that belongs to it, and the few preferences
//! that survive a reload (chain key and theme).
//!
//! Persistence goes through [`KeyValueStore`] so the same rules run against
//! `window.localStorage` in the browser and [`MemoryStore`] in tests.

use alloy_primitives::Address;
use std::cell::RefCell;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

use crate::chains::{Chain, ChainKey};
use crate::dto::Token;
use crate::notify::Notification;
use crate::wallet::{ChainUpdate, Transition};

pub const CHAIN_STORAGE_KEY: &str = "chain";
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage is not available")]
    Unavailable,

    #[error("Failed to read '{0}'")]
    Read(String),

    #[error("Failed to write '{0}'")]
    Write(String),
}

/// String key/value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for native tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Saved theme, dark when nothing usable is stored.
    pub fn load(store: &dyn KeyValueStore) -> Theme {
        store
            .get(THEME_STORAGE_KEY)
            .ok()
            .flatten()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(THEME_STORAGE_KEY, self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(()),
        }
    }
}

/// Result of adding a token to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Added,
    AlreadyExists,
}

/// Chain selection plus the token list for that chain.
///
/// `active_chain == None` means the wallet sits on a network this app does
/// not support; the UI gates every panel behind the unsupported-chain
/// screen in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsState {
    active_chain: Option<ChainKey>,
    pub token_list: Vec<Token>,
}

impl SettingsState {
    pub fn new(active_chain: Option<ChainKey>) -> Self {
        let token_list = active_chain
            .map(|key| Chain::by_key(key).default_tokens())
            .unwrap_or_default();
        Self {
            active_chain,
            token_list,
        }
    }

    /// Restore the persisted chain key, falling back to `default` when the
    /// entry is missing or unknown.
    pub fn restore(store: &dyn KeyValueStore, default: ChainKey) -> Self {
        let saved = store
            .get(CHAIN_STORAGE_KEY)
            .ok()
            .flatten()
            .and_then(|raw| raw.parse::<ChainKey>().ok());
        Self::new(Some(saved.unwrap_or(default)))
    }

    pub fn active_key(&self) -> Option<ChainKey> {
        self.active_chain
    }

    pub fn active_chain(&self) -> Option<&'static Chain> {
        self.active_chain.map(Chain::by_key)
    }

    /// Switch chains. Selecting a different supported chain resets the token
    /// list to that chain's defaults and yields a "selected" notice.
    pub fn set_active_chain(&mut self, chain: Option<ChainKey>) -> Option<Notification> {
        if self.active_chain == chain {
            return None;
        }
        self.active_chain = chain;
        match chain {
            Some(key) => {
                let chain = Chain::by_key(key);
                self.token_list = chain.default_tokens();
                Some(Notification::info(
                    format!("{} selected", chain.name),
                    format!("You are now using {} network", chain.name),
                ))
            }
            None => {
                self.token_list.clear();
                None
            }
        }
    }

    /// Map the wallet's reported chain id onto a supported chain. Unknown or
    /// missing ids fall back to Base.
    pub fn apply_detected_chain_id(&mut self, chain_id: Option<u64>) -> Option<Notification> {
        let key = chain_id
            .and_then(Chain::by_id)
            .map(|chain| chain.key)
            .unwrap_or(ChainKey::Base);
        self.set_active_chain(Some(key))
    }

    /// Apply a wallet transition's chain change. Returns the notices to show,
    /// the chain selection first and then the wallet's own.
    pub fn apply_transition(&mut self, transition: Transition) -> Vec<Notification> {
        let selected = match transition.chain {
            ChainUpdate::Keep => None,
            ChainUpdate::Set(key) => self.set_active_chain(Some(key)),
            ChainUpdate::Clear => self.set_active_chain(None),
        };
        selected.into_iter().chain(transition.notification).collect()
    }

    /// Write the active chain key (Base while unsupported).
    pub fn persist(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let key = self.active_chain.unwrap_or(ChainKey::Base);
        store.set(CHAIN_STORAGE_KEY, key.as_str())
    }

    pub fn find_token(&self, address: &Address) -> Option<&Token> {
        self.token_list.iter().find(|t| t.address == *address)
    }

    /// Append `token` unless one with the same address is already listed.
    /// `Address` equality ignores checksum casing.
    pub fn import_token(&mut self, token: Token) -> ImportOutcome {
        if self.find_token(&token.address).is_some() {
            return ImportOutcome::AlreadyExists;
        }
        self.token_list.push(token);
        ImportOutcome::Added
    }

    /// Replace the cached balance of one token. Returns false when the token
    /// is not in the list.
    pub fn update_balance(&mut self, address: &Address, balance: &str) -> bool {
        match self.token_list.iter_mut().find(|t| t.address == *address) {
            Some(token) => {
                token.balance = balance.to_string();
                true
            }
            None => false,
        }
    }
}

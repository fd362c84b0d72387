//! Auth context: where the bearer token lives and how to leave the page.
//!
//! The contract is intentionally small: read the token, clear the token,
//! navigate. Nothing here validates tokens or tracks expiry.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::RefCell;
use std::rc::Rc;

/// Storage for the bearer token.
pub trait TokenStore {
    fn token(&self) -> Option<String>;
    fn clear(&self);
}

/// Full-page navigation.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Token kept in `localStorage` under `key`.
#[derive(Debug, Clone)]
pub struct LocalStorageTokens {
    key: String,
}

impl LocalStorageTokens {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    #[cfg(feature = "hydrate")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl TokenStore for LocalStorageTokens {
    fn token(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            Self::storage()
                .and_then(|s| s.get_item(&self.key).ok().flatten())
                .filter(|token| !token.is_empty())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = Self::storage() {
                if storage.remove_item(&self.key).is_err() {
                    log::warn!("failed to remove {} from localStorage", self.key);
                }
            }
        }
    }
}

/// In-memory token store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokens {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self { slot: Rc::new(RefCell::new(Some(token.into()))) }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.slot.borrow_mut() = Some(token.into());
    }
}

impl TokenStore for MemoryTokens {
    fn token(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

/// Navigates through `window.location`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            if window.location().set_href(path).is_err() {
                log::warn!("navigation to {path} failed");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    }
}

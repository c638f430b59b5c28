use std::cell::RefCell;

const TOKEN_KEY: &str = "token";

/// Persistence for the bearer token.
pub trait SessionStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// Logs a failed storage write. Returns whether the write went through.
fn stored<E>(result: Result<(), E>, action: &str) -> bool {
    if result.is_err() {
        log::warn!("could not {action} session token");
        return false;
    }
    true
}

/// Token kept in `window.localStorage`. Every call goes to storage.
#[derive(Default)]
pub struct LocalStorageSession;

impl LocalStorageSession {
    /// Storage can be missing (sandboxed iframes, some private modes).
    pub fn available() -> bool {
        Self::storage().is_some()
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStore for LocalStorageSession {
    fn get(&self) -> Option<String> {
        Self::storage()?
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn set(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            stored(storage.set_item(TOKEN_KEY, token), "persist");
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            stored(storage.remove_item(TOKEN_KEY), "remove");
        }
    }
}

/// Token kept for the lifetime of the page only.
#[derive(Default)]
pub struct MemorySession {
    token: RefCell<Option<String>>,
}

impl MemorySession {
    #[cfg(test)]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySession {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone().filter(|token| !token.is_empty())
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

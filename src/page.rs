//! Display targets the resolvers write into.
//!
//! The resolvers never look anything up by identifier; the host hands them
//! capabilities implementing [`DisplayTarget`] and [`TitleTarget`].

use std::{
    fmt,
    net::IpAddr,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::endpoint::AddressFamily;

pub const PLACEHOLDER: &str = "(fetching)";

/// A text slot with a one-way visibility flag.
pub trait DisplayTarget: Send + Sync {
    fn is_visible(&self) -> bool;
    fn set_text(&self, text: &str);
    /// Hidden to visible. There is no way back.
    fn reveal(&self);
}

pub trait TitleTarget: Send + Sync {
    fn set_title(&self, title: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotState {
    pub text: String,
    pub visible: bool,
}

/// In-memory [`DisplayTarget`]. Clones share the same slot.
#[derive(Debug, Clone)]
pub struct Slot {
    inner: Arc<Mutex<SlotState>>,
}

impl Slot {
    pub fn hidden() -> Self {
        Self::with_state(PLACEHOLDER, false)
    }

    /// A slot that was already filled in before the resolvers ran.
    pub fn filled(text: impl Into<String>) -> Self {
        Self::with_state(text, true)
    }

    fn with_state(text: impl Into<String>, visible: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotState {
                text: text.into(),
                visible,
            })),
        }
    }

    pub fn snapshot(&self) -> SlotState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        // a panicked writer cannot leave the state half-updated
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DisplayTarget for Slot {
    fn is_visible(&self) -> bool {
        self.lock().visible
    }

    fn set_text(&self, text: &str) {
        text.clone_into(&mut self.lock().text);
    }

    fn reveal(&self) {
        self.lock().visible = true;
    }
}

#[derive(Debug, Clone)]
pub struct Title {
    inner: Arc<Mutex<String>>,
}

impl Title {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(title.into())),
        }
    }

    pub fn get(&self) -> String {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl TitleTarget for Title {
    fn set_title(&self, title: &str) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = title.to_string();
    }
}

/// The page the binary renders: a title and one slot per address family.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: Title,
    pub ip4: Slot,
    pub ip6: Slot,
}

impl Page {
    pub fn new() -> Self {
        Self {
            title: Title::new("What's your IP?"),
            ip4: Slot::hidden(),
            ip6: Slot::hidden(),
        }
    }

    /// A page that already shows `known`; the other family is left hidden.
    pub fn known(known: IpAddr) -> Self {
        let page = Self::new();
        let title = match known {
            IpAddr::V4(ip) => Title::new(format!("Your public IP is {ip}")),
            IpAddr::V6(_) => page.title.clone(),
        };
        let filled = Slot::filled(known.to_string());
        match AddressFamily::of(&known) {
            AddressFamily::V4 => Self {
                title,
                ip4: filled,
                ..page
            },
            AddressFamily::V6 => Self {
                title,
                ip6: filled,
                ..page
            },
        }
    }

    pub fn slot(&self, family: AddressFamily) -> &Slot {
        match family {
            AddressFamily::V4 => &self.ip4,
            AddressFamily::V6 => &self.ip6,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title.get())?;
        for (name, slot) in [("IPv4", &self.ip4), ("IPv6", &self.ip6)] {
            let state = slot.snapshot();
            if state.visible {
                writeln!(f, "Your public {name} is {}", state.text)?;
            }
        }
        Ok(())
    }
}

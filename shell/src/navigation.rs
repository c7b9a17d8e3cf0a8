use std::fmt;
use tokio::sync::watch;

/// Views the shell can put at the navigation root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Splash,
    Home,
    About,
    Settings,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Splash => "Splash",
            Page::Home => "Home",
            Page::About => "About",
            Page::Settings => "Settings",
        };
        f.write_str(name)
    }
}

/// Entry of the side menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub title: &'static str,
    pub page: Page,
}

const MENU: [MenuEntry; 3] = [
    MenuEntry {
        title: "Home",
        page: Page::Home,
    },
    MenuEntry {
        title: "About",
        page: Page::About,
    },
    MenuEntry {
        title: "Settings",
        page: Page::Settings,
    },
];

/// The static side menu.
pub fn menu() -> &'static [MenuEntry] {
    &MENU
}

/// Owner of the navigation root.
pub trait Navigator: Send + Sync {
    /// Replaces the whole navigation stack with `page`.
    fn set_root(&self, page: Page);

    fn root(&self) -> Page;
}

/// Navigator publishing the current root through a watch channel.
pub struct RootNavigator {
    root_tx: watch::Sender<Page>,
}

impl RootNavigator {
    pub fn new(initial: Page) -> Self {
        let (root_tx, _) = watch::channel(initial);
        Self { root_tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Page> {
        self.root_tx.subscribe()
    }

    /// Resets the root to the menu entry's page, leaving no back history.
    pub fn open_page(&self, entry: &MenuEntry) {
        self.set_root(entry.page);
    }
}

impl Default for RootNavigator {
    fn default() -> Self {
        Self::new(Page::Splash)
    }
}

impl Navigator for RootNavigator {
    fn set_root(&self, page: Page) {
        log::info!("Navigation root -> {page}");
        self.root_tx.send_replace(page);
    }

    fn root(&self) -> Page {
        *self.root_tx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_has_three_fixed_entries() {
        let titles: Vec<&str> = menu().iter().map(|entry| entry.title).collect();
        assert_eq!(titles, vec!["Home", "About", "Settings"]);
    }

    #[test]
    fn test_open_page_resets_root() {
        let navigator = RootNavigator::default();
        let rx = navigator.subscribe();
        assert_eq!(navigator.root(), Page::Splash);

        navigator.open_page(&menu()[2]);

        assert_eq!(navigator.root(), Page::Settings);
        assert_eq!(*rx.borrow(), Page::Settings);
    }
}

use std::sync::Mutex;

/// Translation service the shell configures during startup.
pub trait Translator: Send + Sync {
    /// Registers languages translations can be loaded for.
    fn add_langs(&self, codes: &[&str]);

    /// Language used when a key is missing in the active language.
    fn set_default_lang(&self, code: &str);

    /// Switches the active language.
    fn use_lang(&self, code: &str);
}

#[derive(Debug, Default)]
struct RegistryState {
    registered: Vec<String>,
    default_lang: Option<String>,
    active: Option<String>,
}

/// In-memory [`Translator`] that only tracks language selection.
///
/// Translation tables belong to the view layer; the registry records which
/// languages exist and which one is active so views can load the right one.
#[derive(Debug, Default)]
pub struct LanguageRegistry {
    state: Mutex<RegistryState>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registered(&self) -> Vec<String> {
        self.with_state(|state| state.registered.clone())
    }

    pub fn default_lang(&self) -> Option<String> {
        self.with_state(|state| state.default_lang.clone())
    }

    pub fn active(&self) -> Option<String> {
        self.with_state(|state| state.active.clone())
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut RegistryState) -> R) -> R {
        match self.state.lock() {
            Ok(mut state) => f(&mut state),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl Translator for LanguageRegistry {
    fn add_langs(&self, codes: &[&str]) {
        self.with_state(|state| {
            for code in codes {
                if !state.registered.iter().any(|known| known == code) {
                    state.registered.push(code.to_string());
                }
            }
        });
    }

    fn set_default_lang(&self, code: &str) {
        self.with_state(|state| state.default_lang = Some(code.to_string()));
    }

    fn use_lang(&self, code: &str) {
        let registered = self.with_state(|state| {
            state.active = Some(code.to_string());
            state.registered.iter().any(|known| known == code)
        });

        if registered {
            log::info!("Active language: {code}");
        } else {
            log::warn!("Active language '{code}' has not been registered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_langs_ignores_duplicates() {
        let registry = LanguageRegistry::new();
        registry.add_langs(&["en", "fr"]);
        registry.add_langs(&["en"]);

        assert_eq!(registry.registered(), vec!["en", "fr"]);
    }

    #[test]
    fn test_use_lang_sets_single_active_language() {
        let registry = LanguageRegistry::new();
        registry.add_langs(&["en"]);
        registry.set_default_lang("en");
        registry.use_lang("en");
        registry.use_lang("fr");

        assert_eq!(registry.default_lang().as_deref(), Some("en"));
        assert_eq!(registry.active().as_deref(), Some("fr"));
    }
}

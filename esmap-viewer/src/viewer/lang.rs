//! Observable language store.
//!
//! Locale tables ship embedded; [`LanguageStore::init`] loads one and is
//! gated so repeated callers share a single initialization. Interested
//! components register change listeners with [`LanguageStore::subscribe`]
//! and detach them with [`LanguageStore::unsubscribe`]; `t` falls back to
//! the key itself so panels never render blanks for unknown keys.

use std::collections::HashMap;

static EN_LOCALE: &str = include_str!("../../locales/en.json");
static KO_LOCALE: &str = include_str!("../../locales/ko.json");

/// Handle returned by [`LanguageStore::subscribe`].
pub type SubscriptionId = usize;

pub struct LanguageStore {
    locale: String,
    strings: HashMap<String, String>,
    loaded: bool,
    listeners: Vec<(SubscriptionId, Box<dyn Fn()>)>,
    next_subscription: SubscriptionId,
}

#[allow(dead_code)]
impl LanguageStore {
    pub fn new() -> Self {
        LanguageStore {
            locale: String::new(),
            strings: HashMap::new(),
            loaded: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Load the given locale. Idempotent: once a locale is loaded, further
    /// calls for the same locale return without reloading or notifying.
    pub fn init(&mut self, locale: &str) {
        if self.loaded && self.locale == locale {
            return;
        }
        self.strings = load_locale(locale);
        self.locale = locale.to_string();
        self.loaded = true;
        self.notify();
    }

    /// Switch locales, reloading and notifying listeners.
    pub fn set_locale(&mut self, locale: &str) {
        self.loaded = false;
        self.init(locale);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translate a key, falling back to the key itself.
    pub fn t(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn()>) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener();
        }
    }
}

impl Default for LanguageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn load_locale(locale: &str) -> HashMap<String, String> {
    let raw = match locale {
        "en" => EN_LOCALE,
        _ => KO_LOCALE,
    };
    match serde_json::from_str(raw) {
        Ok(strings) => strings,
        Err(error) => {
            tracing::warn!(%locale, %error, "embedded locale table failed to parse");
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn translates_after_init_and_falls_back_before() {
        let mut store = LanguageStore::new();
        assert_eq!(store.t("visualizer.notfound"), "visualizer.notfound");

        store.init("en");
        assert_eq!(store.t("visualizer.notfound"), "not found");
        assert_eq!(store.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn init_is_idempotent_per_locale() {
        let mut store = LanguageStore::new();
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        store.subscribe(Box::new(move || seen.set(seen.get() + 1)));

        store.init("en");
        store.init("en");
        store.init("en");
        assert_eq!(count.get(), 1);

        store.set_locale("ko");
        assert_eq!(count.get(), 2);
        assert_eq!(store.locale(), "ko");
        assert_eq!(store.t("visualizer.notfound"), "찾을 수 없음");
    }

    #[test]
    fn unsubscribe_detaches_the_listener() {
        let mut store = LanguageStore::new();
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let id = store.subscribe(Box::new(move || seen.set(seen.get() + 1)));

        store.init("en");
        store.unsubscribe(id);
        store.set_locale("ko");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn both_locales_cover_the_same_keys() {
        let en: HashMap<String, String> = serde_json::from_str(EN_LOCALE).unwrap();
        let ko: HashMap<String, String> = serde_json::from_str(KO_LOCALE).unwrap();
        let mut en_keys: Vec<_> = en.keys().collect();
        let mut ko_keys: Vec<_> = ko.keys().collect();
        en_keys.sort();
        ko_keys.sort();
        assert_eq!(en_keys, ko_keys);
    }
}

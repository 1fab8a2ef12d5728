//! Deduplicating translation cache.
//!
//! Turns many UI-driven lookups into a few host round-trips. A lookup never
//! blocks: a miss returns the key itself as a placeholder and queues a request;
//! the reply arrives later through the dispatch table and the UI re-renders.
//!
//! # Key lifecycle
//!
//! ```text
//! absent --resolve--> pending --reply--> resolved
//!    ^                                      |
//!    +---------------- clear ---------------+
//! ```
//!
//! # Invariants
//!
//! - A key is requested at most once while pending. Lookups of a pending key
//!   return the raw key without a new request.
//! - No key is both pending and resolved.
//! - Translation keys are their own correlation ids.

use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use hostbridge_proto::{
    Outbound,
    payloads::{TranslationBatch, TranslationReply},
};
use serde_json::Value;

/// Placeholder substituted left-to-right by [`substitute`].
pub const PLACEHOLDER: &str = "%s";

/// What a batch reply does to keys that are still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PendingPolicy {
    /// A batch reply is authoritative for the whole pending set and clears
    /// every pending key, including ones it did not answer. Matches what
    /// existing hosts expect; an unanswered key is requested again on the
    /// next lookup.
    #[default]
    ClearAll,
    /// A batch reply clears only the keys it answered.
    ClearReplied,
}

/// Translation cache with request deduplication and batching.
#[derive(Debug, Default)]
pub struct TranslationCache {
    translations: HashMap<String, String>,
    pending: HashSet<String>,
    locale: Option<Value>,
    policy: PendingPolicy,
    outgoing: Vec<Outbound>,
}

impl TranslationCache {
    /// Empty cache with the default [`PendingPolicy`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty cache with the given batch-reply policy.
    pub fn with_policy(policy: PendingPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    /// Batch-reply policy in use.
    pub fn policy(&self) -> PendingPolicy {
        self.policy
    }

    /// Look up `key`, see [`resolve_with`](Self::resolve_with).
    pub fn resolve(&mut self, key: &str) -> String {
        self.resolve_with(key, &[])
    }

    /// Look up `key` and substitute `args` into its `%s` placeholders.
    ///
    /// - Resolved: the cached value with placeholders filled left-to-right.
    /// - Resolved to an empty string: the key, with no new request.
    /// - Pending: the key unchanged, with no new request.
    /// - Absent: the key unchanged; the key becomes pending and one request is
    ///   queued.
    pub fn resolve_with(&mut self, key: &str, args: &[&dyn Display]) -> String {
        if let Some(value) = self.translations.get(key) {
            if value.is_empty() {
                return key.to_owned();
            }
            return substitute(value, args);
        }

        if self.pending.contains(key) {
            tracing::trace!(key, "translation already pending");
            return key.to_owned();
        }

        self.pending.insert(key.to_owned());
        self.outgoing.push(Outbound::Translate { key: key.to_owned() });
        key.to_owned()
    }

    /// Request every key that is neither resolved nor pending.
    ///
    /// Eligible keys go out in one comma-joined batch. A key containing a comma
    /// cannot survive the join and is requested on its own instead. Returns
    /// the number of keys requested.
    pub fn resolve_many<I, K>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut batch = Vec::new();
        let mut requested = 0;

        for key in keys {
            let key = key.as_ref();
            if self.translations.contains_key(key) || !self.pending.insert(key.to_owned()) {
                continue;
            }
            requested += 1;
            if key.contains(',') {
                self.outgoing.push(Outbound::Translate { key: key.to_owned() });
            } else {
                batch.push(key.to_owned());
            }
        }

        if !batch.is_empty() {
            tracing::debug!(keys = batch.len(), "requesting translation batch");
            self.outgoing.push(Outbound::TranslateMultiple { keys: batch });
        }
        requested
    }

    /// Apply a single-key reply. The key stops being pending.
    pub fn apply_reply(&mut self, reply: TranslationReply) {
        self.pending.remove(&reply.key);
        self.translations.insert(reply.key, reply.value);
    }

    /// Apply a batch reply, clearing pending keys per the [`PendingPolicy`].
    ///
    /// Returns the number of entries merged.
    pub fn apply_batch(&mut self, batch: TranslationBatch) -> usize {
        let merged = batch.len();
        match self.policy {
            PendingPolicy::ClearAll => {
                if self.pending.len() > merged {
                    tracing::debug!(
                        dropped = self.pending.len() - merged,
                        "batch reply cleared unanswered pending keys"
                    );
                }
                self.pending.clear();
            },
            PendingPolicy::ClearReplied => {
                for key in batch.keys() {
                    self.pending.remove(key);
                }
            },
        }
        self.translations.extend(batch);
        merged
    }

    /// Forget every resolved and pending key.
    pub fn clear(&mut self) {
        self.translations.clear();
        self.pending.clear();
    }

    /// Record the host locale descriptor.
    ///
    /// When it replaces a different descriptor the cache is cleared, since
    /// every cached value belongs to the old locale. Returns `true` in that
    /// case.
    pub fn set_locale(&mut self, locale: Value) -> bool {
        let changed = self.locale.as_ref().is_some_and(|previous| *previous != locale);
        if changed {
            tracing::info!("locale changed, clearing translation cache");
            self.clear();
        }
        self.locale = Some(locale);
        changed
    }

    /// Last locale descriptor from the host.
    pub fn locale_info(&self) -> Option<&Value> {
        self.locale.as_ref()
    }

    /// Whether `key` has a resolved value.
    pub fn has_translation(&self, key: &str) -> bool {
        self.translations.contains_key(key)
    }

    /// Whether `key` has been requested and not yet answered.
    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains(key)
    }

    /// Number of pending keys.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pending keys.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    /// All resolved translations.
    pub fn translations(&self) -> &HashMap<String, String> {
        &self.translations
    }

    /// Whether requests are queued for the transport.
    pub fn has_outgoing(&self) -> bool {
        !self.outgoing.is_empty()
    }

    /// Take queued requests for the transport.
    pub fn take_outgoing(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.outgoing)
    }
}

/// Replace each `%s` in `template` with the next argument.
///
/// Placeholders beyond the last argument stay literally `%s`; surplus
/// arguments are ignored.
pub fn substitute(template: &str, args: &[&dyn Display]) -> String {
    let mut pieces = template.split(PLACEHOLDER);
    let mut out = String::with_capacity(template.len());
    out.push_str(pieces.next().unwrap_or_default());

    let mut args = args.iter();
    for piece in pieces {
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str(PLACEHOLDER),
        }
        out.push_str(piece);
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn requested_keys(cache: &mut TranslationCache) -> Vec<String> {
        cache
            .take_outgoing()
            .into_iter()
            .flat_map(|message| match message {
                Outbound::Translate { key } => vec![key],
                Outbound::TranslateMultiple { keys } => keys,
                Outbound::JsLoaded | Outbound::LoginComplete(_) => vec![],
            })
            .collect()
    }

    fn reply(key: &str, value: &str) -> TranslationReply {
        TranslationReply { key: key.into(), value: value.into() }
    }

    #[test]
    fn miss_returns_key_and_requests_once() {
        let mut cache = TranslationCache::new();

        assert_eq!(cache.resolve("Back"), "Back");
        assert_eq!(cache.resolve("Back"), "Back");

        assert_eq!(cache.take_outgoing(), vec![Outbound::Translate { key: "Back".into() }]);
        assert!(cache.is_pending("Back"));
    }

    #[test]
    fn reply_resolves_and_clears_pending() {
        let mut cache = TranslationCache::new();
        cache.resolve("Back");
        cache.apply_reply(reply("Back", "Voltar"));

        assert_eq!(cache.resolve("Back"), "Voltar");
        assert!(!cache.is_pending("Back"));
        assert_eq!(requested_keys(&mut cache), vec!["Back".to_owned()]);
    }

    #[test]
    fn substitution_is_left_to_right() {
        let mut cache = TranslationCache::new();
        cache.apply_reply(reply("%s of %s", "%s de %s"));

        assert_eq!(cache.resolve_with("%s of %s", &[&1, &"two"]), "1 de two");
    }

    #[test]
    fn missing_arguments_leave_placeholders() {
        assert_eq!(substitute("%s/%s/%s", &[&"a"]), "a/%s/%s");
        assert_eq!(substitute("no placeholders", &[&1]), "no placeholders");
        assert_eq!(substitute("", &[]), "");
    }

    #[test]
    fn empty_translation_falls_back_to_key_without_request() {
        let mut cache = TranslationCache::new();
        cache.apply_reply(reply("Help", ""));

        assert_eq!(cache.resolve("Help"), "Help");
        assert!(!cache.has_outgoing());
    }

    #[test]
    fn resolve_many_batches_and_skips_known_keys() {
        let mut cache = TranslationCache::new();
        cache.apply_reply(reply("Back", "Voltar"));
        cache.resolve("Level");
        let _ = cache.take_outgoing();

        let requested = cache.resolve_many(["Back", "Level", "Status", "Type", "Status"]);

        assert_eq!(requested, 2);
        assert_eq!(
            cache.take_outgoing(),
            vec![Outbound::TranslateMultiple { keys: vec!["Status".into(), "Type".into()] }]
        );
    }

    #[test]
    fn keys_with_commas_are_requested_alone() {
        let mut cache = TranslationCache::new();
        cache.resolve_many(["Yes", "Sorry, no", "No"]);

        assert_eq!(
            cache.take_outgoing(),
            vec![
                Outbound::Translate { key: "Sorry, no".into() },
                Outbound::TranslateMultiple { keys: vec!["Yes".into(), "No".into()] },
            ]
        );
    }

    #[test]
    fn batch_reply_clears_all_pending_by_default() {
        let mut cache = TranslationCache::new();
        cache.resolve_many(["Back", "Level"]);
        cache.resolve("Unrelated");

        cache.apply_batch(TranslationBatch::from([("Back".to_owned(), "Voltar".to_owned())]));

        assert_eq!(cache.pending_count(), 0);
        assert_eq!(cache.resolve("Back"), "Voltar");
    }

    #[test]
    fn clear_replied_policy_keeps_unanswered_keys_pending() {
        let mut cache = TranslationCache::with_policy(PendingPolicy::ClearReplied);
        cache.resolve_many(["Back", "Level"]);

        cache.apply_batch(TranslationBatch::from([("Back".to_owned(), "Voltar".to_owned())]));

        assert!(!cache.is_pending("Back"));
        assert!(cache.is_pending("Level"));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut cache = TranslationCache::new();
        cache.apply_reply(reply("Back", "Voltar"));
        cache.resolve("Level");
        cache.clear();

        assert!(!cache.has_translation("Back"));
        assert_eq!(cache.pending_count(), 0);
    }

    #[test]
    fn locale_change_clears_cache() {
        let mut cache = TranslationCache::new();
        assert!(!cache.set_locale(json!({"name": "en"})));
        cache.apply_reply(reply("Back", "Back"));

        assert!(!cache.set_locale(json!({"name": "en"})));
        assert!(cache.has_translation("Back"));

        assert!(cache.set_locale(json!({"name": "pt"})));
        assert!(!cache.has_translation("Back"));
        assert_eq!(cache.locale_info(), Some(&json!({"name": "pt"})));
    }
}

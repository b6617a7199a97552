//! Whole-sheet replacement.
//!
//! `replace_sync` parses and commits in one step. The asynchronous
//! [`SharedStyleSheet::replace`] locks the stylesheet immediately, yields
//! once to the executor and commits when polled again. While it is pending,
//! rule insertion and deletion fail with [`Error::LockedSheet`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parking_lot::{Mutex, MutexGuard};

use crate::logging::targets;
use crate::rules::{NamespaceTable, ReplaceState, StyleSheet, TreeBuilder};
use crate::syntax::tokenize;
use crate::{Error, Result};

impl StyleSheet {
    /// Replace every rule with the rules parsed from `text`.
    ///
    /// Only constructed stylesheets can be replaced. `@import` rules and
    /// invalid statements are dropped.
    #[tracing::instrument(
        target = "horizon_lattice_cssom::replace",
        skip_all,
        fields(len = text.len())
    )]
    pub fn replace_sync(&mut self, text: &str) -> Result<()> {
        self.begin_replace()?;
        self.commit_replace(text);
        Ok(())
    }

    /// Take the replace lock.
    fn begin_replace(&mut self) -> Result<()> {
        if !self.config.constructed {
            tracing::debug!(target: targets::REPLACE, "replace rejected: stylesheet is not constructed");
            return Err(Error::LockedSheet);
        }
        if let Err(error) = self.ensure_unlocked() {
            tracing::debug!(target: targets::REPLACE, "replace rejected: another replace is pending");
            return Err(error);
        }
        self.replace_state = ReplaceState::Pending;
        Ok(())
    }

    /// Parse `text`, swap it in for the current rules and release the lock.
    ///
    /// The new rules are built before the old ones are removed, so the
    /// rule list is never observed half rebuilt. Ids of the old rules no
    /// longer resolve afterwards.
    fn commit_replace(&mut self, text: &str) {
        let options = self.config.parser.clone();
        let mut namespaces = NamespaceTable::new();
        let rules = TreeBuilder::new(&mut self.arena, &mut namespaces, &options)
            .allow_imports(false)
            .build_stylesheet(&tokenize(text));

        for id in std::mem::replace(&mut self.rules, rules) {
            self.arena.remove_subtree(id);
        }
        self.namespaces = namespaces;
        self.replace_state = ReplaceState::Idle;

        tracing::debug!(target: targets::REPLACE, rules = self.rules.len(), "replaced stylesheet rules");
    }
}

/// A stylesheet shared between tasks.
#[derive(Debug, Clone, Default)]
pub struct SharedStyleSheet {
    inner: Arc<Mutex<StyleSheet>>,
}

impl SharedStyleSheet {
    /// Wrap a stylesheet.
    pub fn new(sheet: StyleSheet) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sheet)),
        }
    }

    /// Lock the stylesheet for reading or synchronous mutation.
    pub fn lock(&self) -> MutexGuard<'_, StyleSheet> {
        self.inner.lock()
    }

    /// Returns `true` if both handles share the same stylesheet.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Replace every rule asynchronously.
    ///
    /// The stylesheet is locked before this returns. The returned future
    /// resolves to this stylesheet once the new rules are committed, or to
    /// [`Error::LockedSheet`] if the stylesheet is not constructed or
    /// another replace is pending. A pending replace is never abandoned:
    /// dropping the future commits it.
    #[tracing::instrument(
        target = "horizon_lattice_cssom::replace",
        skip_all,
        fields(len = text.len())
    )]
    pub fn replace(&self, text: &str) -> Replace {
        let step = match self.lock().begin_replace() {
            Ok(()) => Step::Scheduled,
            Err(error) => Step::Rejected(error),
        };
        Replace {
            sheet: self.clone(),
            text: text.to_string(),
            step,
        }
    }
}

#[derive(Debug)]
enum Step {
    Rejected(Error),
    Scheduled,
    Yielded,
    Committed,
}

/// Future returned by [`SharedStyleSheet::replace`].
#[derive(Debug)]
#[must_use = "a replace commits when polled or dropped"]
pub struct Replace {
    sheet: SharedStyleSheet,
    text: String,
    step: Step,
}

impl Replace {
    fn commit(&mut self) {
        self.sheet.lock().commit_replace(&self.text);
        self.step = Step::Committed;
    }
}

impl Future for Replace {
    type Output = Result<SharedStyleSheet>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match this.step {
            Step::Rejected(ref error) => Poll::Ready(Err(error.clone())),
            Step::Committed => Poll::Ready(Ok(this.sheet.clone())),
            Step::Scheduled => {
                this.step = Step::Yielded;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Step::Yielded => {
                this.commit();
                Poll::Ready(Ok(this.sheet.clone()))
            }
        }
    }
}

impl Drop for Replace {
    fn drop(&mut self) {
        if matches!(self.step, Step::Scheduled | Step::Yielded) {
            tracing::trace!(target: targets::REPLACE, "committing replace on drop");
            self.commit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;

    #[test]
    fn test_replace_sync() {
        let mut sheet = StyleSheet::constructed();
        sheet.insert_rule(".old {}", 0).unwrap();
        let old = sheet.top_level()[0];

        sheet
            .replace_sync(
                r#"
                @import "./stylesheet.css";
                @namespace <bad-string-or-url>;
                .selector { color: green }
                color: red
                "#,
            )
            .unwrap();

        assert_eq!(sheet.css_text(), ".selector { color: green; }");
        assert!(sheet.rule(old).is_none());
        assert_eq!(sheet.replace_state(), ReplaceState::Idle);
    }

    #[test]
    fn test_replace_sync_requires_constructed_sheet() {
        let mut sheet = StyleSheet::parse(".selector { color: red }", SheetConfig::default());
        assert_eq!(sheet.replace_sync(""), Err(Error::LockedSheet));
        assert_eq!(sheet.top_level().len(), 1);
    }

    #[test]
    fn test_replace_resets_namespaces() {
        let mut sheet = StyleSheet::constructed();
        sheet
            .replace_sync("@namespace svg url(http://www.w3.org/2000/svg); svg|a {}")
            .unwrap();
        assert!(sheet.namespaces().is_declared("svg"));

        sheet.replace_sync("svg|a {} .b {}").unwrap();
        assert!(!sheet.namespaces().is_declared("svg"));
        assert_eq!(sheet.css_text(), ".b {}");
    }

    #[test]
    fn test_dropped_replace_commits() {
        let shared = SharedStyleSheet::new(StyleSheet::constructed());
        let pending = shared.replace(".a { color: orange }");
        assert_eq!(shared.lock().replace_state(), ReplaceState::Pending);
        assert_eq!(shared.lock().insert_rule(".b {}", 0), Err(Error::LockedSheet));

        drop(pending);
        assert_eq!(shared.lock().replace_state(), ReplaceState::Idle);
        assert_eq!(shared.lock().css_text(), ".a { color: orange; }");
    }
}

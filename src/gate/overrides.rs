//! Policy override hooks.
//!
//! Each gate decision consults an optional callback with the built-in
//! default as input; embedders can substitute any value. Absent callbacks
//! mean the built-in policy applies unchanged.

use std::sync::Arc;

type StatusCodeFn = Arc<dyn Fn(u16) -> u16 + Send + Sync>;
type RedirectUrlFn = Arc<dyn Fn(String) -> String + Send + Sync>;
type CanonicalUrlFn = Arc<dyn Fn(Option<String>) -> Option<String> + Send + Sync>;

/// Optional override callbacks for the gate's policy values.
#[derive(Clone, Default)]
pub struct Overrides {
    status_code: Option<StatusCodeFn>,
    redirect_url: Option<RedirectUrlFn>,
    canonical_url: Option<CanonicalUrlFn>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute the status code used for author archive requests.
    pub fn with_status_code<F>(mut self, f: F) -> Self
    where
        F: Fn(u16) -> u16 + Send + Sync + 'static,
    {
        self.status_code = Some(Arc::new(f));
        self
    }

    /// Substitute the redirect target URL.
    pub fn with_redirect_url<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.redirect_url = Some(Arc::new(f));
        self
    }

    /// Substitute the canonical URL after suppression has been applied.
    pub fn with_canonical_url<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<String>) -> Option<String> + Send + Sync + 'static,
    {
        self.canonical_url = Some(Arc::new(f));
        self
    }

    pub fn status_code(&self, default: u16) -> u16 {
        match &self.status_code {
            Some(f) => f(default),
            None => default,
        }
    }

    pub fn redirect_url(&self, default: String) -> String {
        match &self.redirect_url {
            Some(f) => f(default),
            None => default,
        }
    }

    pub fn canonical_url(&self, computed: Option<String>) -> Option<String> {
        match &self.canonical_url {
            Some(f) => f(computed),
            None => computed,
        }
    }
}

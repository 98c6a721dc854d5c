//! Path → view table.
//!
//! Each path resolves to exactly one view. Deferred views are constructed on
//! first navigation and cached afterwards. There is no fallback route:
//! unknown paths resolve to `None`.

use std::fmt;
use std::sync::{Arc, OnceLock};

use super::views::{MonitorView, PublisherView, SubscriberView, View};

/// When a route's view is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    /// Built together with the table.
    Eager,
    /// Built on the first [`RouteEntry::view`] call.
    Deferred,
}

enum ViewSlot {
    Eager(Arc<dyn View>),
    Deferred {
        load: fn() -> Arc<dyn View>,
        loaded: OnceLock<Arc<dyn View>>,
    },
}

/// One navigable route.
pub struct RouteEntry {
    path: &'static str,
    name: &'static str,
    title: &'static str,
    slot: ViewSlot,
}

impl RouteEntry {
    /// Creates a route whose view already exists.
    #[must_use]
    pub fn eager(
        path: &'static str,
        name: &'static str,
        title: &'static str,
        view: Arc<dyn View>,
    ) -> Self {
        Self {
            path,
            name,
            title,
            slot: ViewSlot::Eager(view),
        }
    }

    /// Creates a route whose view is built by `load` on first navigation.
    #[must_use]
    pub fn deferred(
        path: &'static str,
        name: &'static str,
        title: &'static str,
        load: fn() -> Arc<dyn View>,
    ) -> Self {
        Self {
            path,
            name,
            title,
            slot: ViewSlot::Deferred {
                load,
                loaded: OnceLock::new(),
            },
        }
    }

    /// Route path (e.g. `/monitor`).
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Route name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Display title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Loading strategy.
    #[must_use]
    pub const fn loading(&self) -> Loading {
        match self.slot {
            ViewSlot::Eager(_) => Loading::Eager,
            ViewSlot::Deferred { .. } => Loading::Deferred,
        }
    }

    /// Returns `true` once the view exists.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        match &self.slot {
            ViewSlot::Eager(_) => true,
            ViewSlot::Deferred { loaded, .. } => loaded.get().is_some(),
        }
    }

    /// Returns the view, constructing a deferred one on first use.
    #[must_use]
    pub fn view(&self) -> Arc<dyn View> {
        match &self.slot {
            ViewSlot::Eager(view) => Arc::clone(view),
            ViewSlot::Deferred { load, loaded } => Arc::clone(loaded.get_or_init(|| {
                tracing::debug!(path = self.path, "loading deferred view");
                load()
            })),
        }
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("title", &self.title)
            .field("loading", &self.loading())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// The application's route table.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Creates a table from explicit entries. Earlier entries win on
    /// duplicate paths.
    #[must_use]
    pub fn new(routes: Vec<RouteEntry>) -> Self {
        Self { routes }
    }

    /// The three application routes: publisher (eager), subscriber and
    /// monitor (deferred).
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            RouteEntry::eager("/", "Publisher", "Message Publishing", Arc::new(PublisherView)),
            RouteEntry::deferred(
                "/subscriber",
                "Subscriber",
                "Message Subscription",
                load_subscriber,
            ),
            RouteEntry::deferred("/monitor", "Monitor", "Live Monitor", load_monitor),
        ])
    }

    /// Resolves `path` to its route.
    ///
    /// The empty path is the root, and a trailing `/` is ignored. Query
    /// strings are not interpreted, so `/monitor?x=1` does not resolve.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        self.routes.iter().find(|route| route.path == normalized)
    }

    /// All routes in declaration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }
}

fn load_subscriber() -> Arc<dyn View> {
    Arc::new(SubscriberView)
}

fn load_monitor() -> Arc<dyn View> {
    Arc::new(MonitorView)
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn standard_routes_resolve() {
        let table = RouteTable::standard();
        let names: Vec<_> = ["/", "/subscriber", "/monitor"]
            .iter()
            .filter_map(|path| table.resolve(path))
            .map(RouteEntry::name)
            .collect();
        assert_eq!(names, ["Publisher", "Subscriber", "Monitor"]);
    }

    #[test]
    fn unknown_path_is_unhandled() {
        let table = RouteTable::standard();
        assert!(table.resolve("/settings").is_none());
        assert!(table.resolve("/monitor?tab=1").is_none());
        assert!(table.resolve("/Monitor").is_none());
    }

    #[test]
    fn empty_and_trailing_slash_paths() {
        let table = RouteTable::standard();
        let Some(root) = table.resolve("") else {
            panic!("empty path must resolve to root");
        };
        assert_eq!(root.name(), "Publisher");
        let Some(monitor) = table.resolve("/monitor/") else {
            panic!("trailing slash must resolve");
        };
        assert_eq!(monitor.name(), "Monitor");
    }

    #[test]
    fn root_is_eager_others_deferred() {
        let table = RouteTable::standard();
        let loading: Vec<_> = table.routes().iter().map(RouteEntry::loading).collect();
        assert_eq!(loading, [Loading::Eager, Loading::Deferred, Loading::Deferred]);
    }

    #[test]
    fn deferred_view_loads_once_on_first_navigation() {
        let table = RouteTable::standard();
        let Some(entry) = table.resolve("/subscriber") else {
            panic!("subscriber must resolve");
        };
        assert!(!entry.is_loaded());

        let first = entry.view();
        assert!(entry.is_loaded());
        let second = entry.view();
        assert!(Arc::ptr_eq(&first, &second));

        let Some(monitor) = table.resolve("/monitor") else {
            panic!("monitor must resolve");
        };
        assert!(!monitor.is_loaded());
    }

    #[test]
    fn first_entry_wins_on_duplicate_paths() {
        let table = RouteTable::new(vec![
            RouteEntry::eager("/", "First", "First", Arc::new(PublisherView)),
            RouteEntry::eager("/", "Second", "Second", Arc::new(MonitorView)),
        ]);
        let Some(root) = table.resolve("/") else {
            panic!("root must resolve");
        };
        assert_eq!(root.name(), "First");
    }
}

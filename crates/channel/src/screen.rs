//! Active-screen tracking
//!
//! The refresh router only optimizes the "already on this screen" case;
//! every screen reloads itself on activation. The channel therefore only
//! ever *reads* the active screen through [`ActiveScreen`]; mutation
//! belongs to the navigation layer.

use std::sync::Arc;

use arc_swap::ArcSwap;

/// The screens the router gates refreshes on. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Friends,
    UnstartedTournaments,
    StartedTournaments,
    Other,
}

impl Screen {
    /// Map a navigation path to a screen.
    pub fn from_path(path: &str) -> Screen {
        match path.trim_end_matches('/') {
            "/home" | "" => Screen::Home,
            "/friends" => Screen::Friends,
            "/unstarted-tournaments" => Screen::UnstartedTournaments,
            "/started-tournaments" => Screen::StartedTournaments,
            _ => Screen::Other,
        }
    }
}

/// Lock-free, read-mostly handle on the currently active screen.
///
/// Cheap to clone; the router and dispatcher read it at call time, the
/// navigation collaborator writes it on route changes.
#[derive(Clone)]
pub struct ActiveScreen(Arc<ArcSwap<Screen>>);

impl ActiveScreen {
    pub fn new(initial: Screen) -> Self {
        Self(Arc::new(ArcSwap::from_pointee(initial)))
    }

    pub fn get(&self) -> Screen {
        **self.0.load()
    }

    /// Called by the navigation layer on route changes.
    pub fn set(&self, screen: Screen) {
        self.0.store(Arc::new(screen));
    }
}

impl Default for ActiveScreen {
    fn default() -> Self {
        Self::new(Screen::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_paths() {
        assert_eq!(Screen::from_path("/home"), Screen::Home);
        assert_eq!(Screen::from_path("/friends"), Screen::Friends);
        assert_eq!(
            Screen::from_path("/unstarted-tournaments"),
            Screen::UnstartedTournaments
        );
        assert_eq!(
            Screen::from_path("/started-tournaments"),
            Screen::StartedTournaments
        );
    }

    #[test]
    fn unknown_paths_map_to_other() {
        assert_eq!(Screen::from_path("/chess"), Screen::Other);
        assert_eq!(Screen::from_path("/friends/42"), Screen::Other);
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(Screen::from_path("/friends/"), Screen::Friends);
    }

    #[test]
    fn active_screen_updates_are_visible_to_clones() {
        let screen = ActiveScreen::new(Screen::Home);
        let reader = screen.clone();
        screen.set(Screen::Friends);
        assert_eq!(reader.get(), Screen::Friends);
    }
}

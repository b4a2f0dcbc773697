//! Headless document
//!
//! In-memory stand-in for a browser page: ordered containers, league card
//! bindings, a cookie string and a history stack with back/forward.

use std::sync::Mutex;

use super::{BrowserEvent, LeagueLink, NavigationState, RenderTarget, TargetError, LEAGUES_CONTAINER};

#[derive(Debug, Default)]
struct PageState {
    containers: Vec<(String, String)>,
    bindings: Vec<LeagueLink>,
    history: Vec<String>,
    position: usize,
}

impl PageState {
    fn container_mut(&mut self, id: &str) -> Option<&mut String> {
        self.containers
            .iter_mut()
            .find(|(cid, _)| cid == id)
            .map(|(_, html)| html)
    }
}

/// A page without a browser
#[derive(Debug)]
pub struct HeadlessDocument {
    state: Mutex<PageState>,
    cookie: String,
}

impl HeadlessDocument {
    /// Page at `path` whose shell already contains the leagues container
    pub fn new(path: impl Into<String>) -> Self {
        let state = PageState {
            containers: vec![(LEAGUES_CONTAINER.to_string(), String::new())],
            bindings: Vec::new(),
            history: vec![NavigationState::new(path).path().to_string()],
            position: 0,
        };
        Self {
            state: Mutex::new(state),
            cookie: String::new(),
        }
    }

    /// Page without any containers
    pub fn empty(path: impl Into<String>) -> Self {
        let doc = Self::new(path);
        doc.lock().containers.clear();
        doc
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = cookie.into();
        self
    }

    /// `document.cookie` equivalent
    pub fn cookie(&self) -> &str {
        &self.cookie
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current location
    pub fn navigation(&self) -> NavigationState {
        let state = self.lock();
        NavigationState::new(state.history[state.position].clone())
    }

    /// Event fired once the page has loaded
    pub fn load_event(&self) -> BrowserEvent {
        BrowserEvent::Load(self.navigation())
    }

    /// Contents of a container, if it exists
    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.lock()
            .containers
            .iter()
            .find(|(cid, _)| cid == id)
            .map(|(_, html)| html.clone())
    }

    /// Container ids in document order
    pub fn container_ids(&self) -> Vec<String> {
        self.lock().containers.iter().map(|(id, _)| id.clone()).collect()
    }

    /// Currently bound league cards
    pub fn league_links(&self) -> Vec<LeagueLink> {
        self.lock().bindings.clone()
    }

    /// Activate the league card with `slug`, if one is bound
    pub fn click_league(&self, slug: &str) -> Option<BrowserEvent> {
        self.lock()
            .bindings
            .iter()
            .find(|link| link.slug == slug)
            .cloned()
            .map(BrowserEvent::LeagueClicked)
    }

    /// History entries, oldest first
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Browser back button; `None` at the start of history
    pub fn back(&self) -> Option<BrowserEvent> {
        let mut state = self.lock();
        if state.position == 0 {
            return None;
        }
        state.position -= 1;
        let nav = NavigationState::new(state.history[state.position].clone());
        Some(BrowserEvent::PopState(nav))
    }

    /// Browser forward button; `None` at the end of history
    pub fn forward(&self) -> Option<BrowserEvent> {
        let mut state = self.lock();
        if state.position + 1 >= state.history.len() {
            return None;
        }
        state.position += 1;
        let nav = NavigationState::new(state.history[state.position].clone());
        Some(BrowserEvent::PopState(nav))
    }
}

impl RenderTarget for HeadlessDocument {
    fn has_container(&self, id: &str) -> bool {
        self.lock().containers.iter().any(|(cid, _)| cid == id)
    }

    fn create_container(&self, id: &str) {
        let mut state = self.lock();
        if state.container_mut(id).is_none() {
            state.containers.push((id.to_string(), String::new()));
        }
    }

    fn set_inner_html(&self, id: &str, html: &str) -> Result<(), TargetError> {
        let mut state = self.lock();
        let container = state
            .container_mut(id)
            .ok_or_else(|| TargetError::MissingContainer(id.to_string()))?;
        *container = html.to_string();
        Ok(())
    }

    fn bind_league_clicks(&self, links: Vec<LeagueLink>) {
        self.lock().bindings = links;
    }

    fn push_history(&self, path: &str) {
        let mut state = self.lock();
        let keep = state.position + 1;
        state.history.truncate(keep);
        state.history.push(path.to_string());
        state.position = keep;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::TEAMS_CONTAINER;

    fn link(slug: &str) -> LeagueLink {
        LeagueLink {
            id: format!("id-{}", slug),
            slug: slug.to_string(),
            path: format!("/league/{}", slug),
        }
    }

    #[test]
    fn test_shell_has_leagues_container() {
        let doc = HeadlessDocument::new("/");
        assert!(doc.has_container(LEAGUES_CONTAINER));
        assert!(!doc.has_container(TEAMS_CONTAINER));
        assert!(HeadlessDocument::empty("/").container_ids().is_empty());
    }

    #[test]
    fn test_set_inner_html_requires_container() {
        let doc = HeadlessDocument::new("/");
        assert_eq!(
            doc.set_inner_html(TEAMS_CONTAINER, "<p></p>"),
            Err(TargetError::MissingContainer(TEAMS_CONTAINER.to_string()))
        );

        doc.create_container(TEAMS_CONTAINER);
        doc.create_container(TEAMS_CONTAINER);
        doc.set_inner_html(TEAMS_CONTAINER, "<p>teams</p>").unwrap();
        assert_eq!(doc.inner_html(TEAMS_CONTAINER).as_deref(), Some("<p>teams</p>"));
        assert_eq!(doc.container_ids(), vec![LEAGUES_CONTAINER, TEAMS_CONTAINER]);
    }

    #[test]
    fn test_history_back_forward() {
        let doc = HeadlessDocument::new("/");
        doc.push_history("/league/a");
        doc.push_history("/league/b");
        assert_eq!(doc.navigation().path(), "/league/b");

        assert_eq!(
            doc.back(),
            Some(BrowserEvent::PopState(NavigationState::new("/league/a")))
        );
        assert_eq!(
            doc.back(),
            Some(BrowserEvent::PopState(NavigationState::new("/")))
        );
        assert_eq!(doc.back(), None);

        assert_eq!(
            doc.forward(),
            Some(BrowserEvent::PopState(NavigationState::new("/league/a")))
        );

        // pushing from the middle drops the forward entries
        doc.push_history("/league/c");
        assert_eq!(doc.history(), vec!["/", "/league/a", "/league/c"]);
        assert_eq!(doc.forward(), None);
    }

    #[test]
    fn test_click_league_uses_bindings() {
        let doc = HeadlessDocument::new("/");
        assert_eq!(doc.click_league("nhl"), None);

        doc.bind_league_clicks(vec![link("nhl"), link("mls")]);
        assert_eq!(
            doc.click_league("mls"),
            Some(BrowserEvent::LeagueClicked(link("mls")))
        );

        doc.bind_league_clicks(vec![link("nba")]);
        assert_eq!(doc.click_league("nhl"), None);
        assert_eq!(doc.league_links(), vec![link("nba")]);
    }

    #[test]
    fn test_cookie() {
        let doc = HeadlessDocument::new("/").with_cookie("io.prismic.preview=abc");
        assert_eq!(doc.cookie(), "io.prismic.preview=abc");
    }
}

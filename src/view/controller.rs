//! View Controller
//!
//! Drives the page lifecycle: reads the navigation state, fetches through
//! the content gateway, maps documents into view models and renders them
//! into the target.
//!
//! Fetch failures are logged and swallowed at each render operation; the
//! container keeps whatever it showed before. Malformed records and target
//! errors abort the render and propagate.

use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::model::{teams_of, ImageOptions, LeagueView};
use super::{template, ViewResult};
use crate::browser::{
    BrowserEvent, LeagueLink, NavigationState, RenderTarget, ViewState, LEAGUES_CONTAINER,
    TEAMS_CONTAINER,
};
use crate::content::{ContentGateway, RouteTable, LEAGUE_TYPE};

/// What happens when an older render finishes after a newer one started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Every completed fetch writes its markup, oldest included
    #[default]
    LastWriteWins,
    /// Only the newest render per container may write
    DiscardStale,
}

/// Rendering options
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub routes: RouteTable,
    pub images: ImageOptions,
    pub stale_policy: StalePolicy,
}

pub struct ViewController {
    gateway: Arc<dyn ContentGateway>,
    options: ViewOptions,
    leagues_generation: AtomicU64,
    teams_generation: AtomicU64,
}

impl ViewController {
    pub fn new(gateway: Arc<dyn ContentGateway>, options: ViewOptions) -> Self {
        Self {
            gateway,
            options,
            leagues_generation: AtomicU64::new(0),
            teams_generation: AtomicU64::new(0),
        }
    }

    /// Dispatch a lifecycle event and return the resulting view
    pub async fn handle_event(
        &self,
        event: BrowserEvent,
        target: &dyn RenderTarget,
    ) -> ViewResult<ViewState> {
        match event {
            BrowserEvent::Load(nav) | BrowserEvent::PopState(nav) => {
                self.run_lifecycle(&nav, target).await
            }
            BrowserEvent::LeagueClicked(link) => self.activate_league(&link, target).await,
        }
    }

    /// Full page lifecycle for `nav`: league list first, then the team list
    /// if the path names a league.
    pub async fn run_lifecycle(
        &self,
        nav: &NavigationState,
        target: &dyn RenderTarget,
    ) -> ViewResult<ViewState> {
        let view = nav.view_state(&self.options.routes);
        tracing::info!(path = %nav.path(), ?view, "Running page lifecycle");

        self.render_leagues(target).await?;

        if !target.has_container(TEAMS_CONTAINER) {
            target.create_container(TEAMS_CONTAINER);
        }

        let ViewState::Detail { slug } = view else {
            self.clear_teams(target)?;
            return Ok(ViewState::List);
        };

        let league = match self.gateway.get_by_slug(LEAGUE_TYPE, &slug).await {
            Ok(league) => league,
            Err(e) => {
                tracing::error!(%slug, error = %e, "Error resolving league");
                self.clear_teams(target)?;
                return Ok(ViewState::List);
            }
        };

        self.render_teams(&league.id, target).await?;
        Ok(ViewState::Detail { slug })
    }

    /// League card click: push the league path, then render its teams
    pub async fn activate_league(
        &self,
        link: &LeagueLink,
        target: &dyn RenderTarget,
    ) -> ViewResult<ViewState> {
        tracing::info!(league_id = %link.id, path = %link.path, "League selected");
        target.push_history(&link.path);
        self.render_teams(&link.id, target).await?;
        Ok(ViewState::Detail {
            slug: link.slug.clone(),
        })
    }

    /// Fetch every league and render one card per league
    pub async fn render_leagues(&self, target: &dyn RenderTarget) -> ViewResult<()> {
        let ticket = self.leagues_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let documents = match self.gateway.list_by_type(LEAGUE_TYPE).await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching leagues");
                return Ok(());
            }
        };

        let leagues = documents
            .iter()
            .map(|doc| LeagueView::from_document(doc, &self.options.routes))
            .collect::<Result<Vec<_>, _>>()?;

        if self.is_stale(&self.leagues_generation, ticket) {
            tracing::debug!(ticket, "Discarding stale league render");
            return Ok(());
        }

        target.set_inner_html(LEAGUES_CONTAINER, &template::leagues_section(&leagues))?;
        target.bind_league_clicks(leagues.iter().map(LeagueView::link).collect());

        tracing::info!(count = leagues.len(), "Rendered leagues");
        Ok(())
    }

    /// Fetch one league by identifier and render its embedded teams
    pub async fn render_teams(&self, league_id: &str, target: &dyn RenderTarget) -> ViewResult<()> {
        let ticket = self.teams_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let league = match self.gateway.get_by_id(league_id).await {
            Ok(league) => league,
            Err(e) => {
                tracing::error!(%league_id, error = %e, "Error fetching teams");
                return Ok(());
            }
        };

        let teams = teams_of(&league, &self.options.routes, &self.options.images)?;

        if self.is_stale(&self.teams_generation, ticket) {
            tracing::debug!(%league_id, ticket, "Discarding stale team render");
            return Ok(());
        }

        if !target.has_container(TEAMS_CONTAINER) {
            target.create_container(TEAMS_CONTAINER);
        }
        target.set_inner_html(TEAMS_CONTAINER, &template::teams_section(&teams))?;

        tracing::info!(%league_id, count = teams.len(), "Rendered teams");
        Ok(())
    }

    /// Empty the teams container. Team renders already in flight become stale.
    fn clear_teams(&self, target: &dyn RenderTarget) -> ViewResult<()> {
        self.teams_generation.fetch_add(1, Ordering::SeqCst);
        target.set_inner_html(TEAMS_CONTAINER, "")?;
        Ok(())
    }

    fn is_stale(&self, generation: &AtomicU64, ticket: u64) -> bool {
        self.options.stale_policy == StalePolicy::DiscardStale
            && generation.load(Ordering::SeqCst) != ticket
    }
}

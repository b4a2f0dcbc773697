//! HTML templates for league and team cards


use super::{LeagueView, TeamView};
use crate::richtext::Escaped;

pub fn league_card(league: &LeagueView) -> String {
    let logo = league
        .logo_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<img src="{}" alt="{}" class="league-logo" />"#,
                Escaped(url),
                Escaped(&league.name)
            )
        })
        .unwrap_or_default();

    format!(
        r#"
    <div class="card league-card" data-league-id="{id}" data-league-slug="{slug}">
      {logo}
      <h2>{name}</h2>
      <p>Last Updated: {date}</p>
    </div>
  "#,
        id = Escaped(&league.id),
        slug = Escaped(&league.slug),
        logo = logo,
        name = Escaped(&league.name),
        date = Escaped(&league.last_updated),
    )
}

/// The full contents of the leagues container
pub fn leagues_section(leagues: &[LeagueView]) -> String {
    let cards: String = leagues.iter().map(league_card).collect();
    format!(
        r#"
      <h1>Leagues</h1>
      <div class="leagues-container">{}</div>
    "#,
        cards
    )
}

fn color_swatch(color: &str) -> String {
    format!(
        r#"
      <div class="team-colors">
        <div class="color" style="background-color: {color};"></div>
        <span>{color}</span>
      </div>"#,
        color = Escaped(color)
    )
}

pub fn team_card(team: &TeamView) -> String {
    let logo = match (&team.logo_url, &team.logo_srcset) {
        (Some(src), Some(srcset)) => format!(
            r#"
      <img
        class="team-logo"
        src="{}"
        srcset="{}"
        alt="{}"
      />"#,
            Escaped(src),
            Escaped(srcset),
            Escaped(&team.name)
        ),
        _ => String::new(),
    };

    // stadium_html is already markup produced by the rich text renderer
    format!(
        r#"
    <div class="card team-card">{logo}
      <h3>{name}</h3>
      <p>Est. {founded}</p>
      {stadium}{color_1}{color_2}
    </div>
  "#,
        logo = logo,
        name = Escaped(&team.name),
        founded = Escaped(&team.founded_year),
        stadium = team.stadium_html,
        color_1 = color_swatch(&team.main_color_1),
        color_2 = color_swatch(&team.main_color_2),
    )
}

/// The full contents of the teams container
pub fn teams_section(teams: &[TeamView]) -> String {
    let cards: String = teams.iter().map(team_card).collect();
    format!(
        r#"
      <h1>Teams</h1>
      <div class="teams-container">{}</div>
    "#,
        cards
    )
}

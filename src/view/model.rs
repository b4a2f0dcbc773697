//! View Models
//!
//! Display-ready records mapped from raw content documents. Nested field
//! access goes through accessors that fail with [`MalformedRecordError`]
//! when the upstream record lacks an expected field.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::MalformedRecordError;
use crate::browser::LeagueLink;
use crate::content::{Document, RouteTable};
use crate::richtext::{self, Element, RichTextField};

/// Card data for one league
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub logo_url: Option<String>,
    /// `dd/mm/yyyy`
    pub last_updated: String,
    /// Path pushed when the card is activated
    pub path: String,
}

impl LeagueView {
    pub fn from_document(doc: &Document, routes: &RouteTable) -> Result<Self, MalformedRecordError> {
        let record = format!("league {}", doc.id);

        let slug = doc
            .uid
            .clone()
            .ok_or_else(|| MalformedRecordError::new(&record, "uid"))?;
        let name = first_text(doc.field("name"), &record, "name")?;
        let logo_url = image_url(doc.field("logo"));
        let last_updated = doc
            .last_publication_date
            .as_deref()
            .and_then(format_date)
            .ok_or_else(|| MalformedRecordError::new(&record, "last_publication_date"))?;
        let path = routes
            .url_for(doc)
            .unwrap_or_else(|| format!("/league/{}", slug));

        Ok(Self {
            id: doc.id.clone(),
            slug,
            name,
            logo_url,
            last_updated,
            path,
        })
    }

    /// Click binding for this card
    pub fn link(&self) -> LeagueLink {
        LeagueLink {
            id: self.id.clone(),
            slug: self.slug.clone(),
            path: self.path.clone(),
        }
    }
}

/// Card data for one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamView {
    pub name: String,
    pub founded_year: String,
    pub stadium_html: String,
    pub main_color_1: String,
    pub main_color_2: String,
    /// Transformed primary image
    pub logo_url: Option<String>,
    /// Width variants, `srcset` syntax
    pub logo_srcset: Option<String>,
}

impl TeamView {
    /// Map one entry of a league's `teams` group
    pub fn from_value(
        team: &Value,
        record: &str,
        routes: &RouteTable,
        images: &ImageOptions,
    ) -> Result<Self, MalformedRecordError> {
        let name = first_text(team.get("team_name"), record, "team_name")?;
        let founded_year = first_text(team.get("founded_year"), record, "founded_year")?;
        let main_color_1 = first_text(team.get("main_color_1"), record, "main_color_1")?;
        let main_color_2 = first_text(team.get("main_color_2"), record, "main_color_2")?;

        let stadium = rich_text(team.get("stadium"), record, "stadium")?;
        let stadium_html = richtext::as_html(&stadium, Some(routes), Some(&codespan_serializer));

        let base = image_url(team.get("team_logo"));
        let logo_url = base.as_deref().map(|url| images.primary(url));
        let logo_srcset = base.as_deref().map(|url| images.srcset(url));

        Ok(Self {
            name,
            founded_year,
            stadium_html,
            main_color_1,
            main_color_2,
            logo_url,
            logo_srcset,
        })
    }
}

/// Teams of a league, in source order
pub fn teams_of(
    league: &Document,
    routes: &RouteTable,
    images: &ImageOptions,
) -> Result<Vec<TeamView>, MalformedRecordError> {
    let teams = league
        .field("teams")
        .and_then(Value::as_array)
        .ok_or_else(|| MalformedRecordError::new(format!("league {}", league.id), "teams"))?;

    teams
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let record = format!("team {} of league {}", i, league.id);
            TeamView::from_value(team, &record, routes, images)
        })
        .collect()
}

/// Render `label` spans named `codespan` as `<code>`; defer everything else
pub fn codespan_serializer(element: &Element<'_>, children: &str) -> Option<String> {
    match element {
        Element::Span(span) if span.label_name() == Some("codespan") => {
            Some(format!("<code>{}</code>", children))
        }
        _ => None,
    }
}

/// Text of the first run of a rich text field
pub fn first_text(
    field: Option<&Value>,
    record: &str,
    name: &str,
) -> Result<String, MalformedRecordError> {
    field
        .and_then(Value::as_array)
        .and_then(|runs| runs.first())
        .and_then(|run| run.get("text"))
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| MalformedRecordError::new(record, format!("{}[0].text", name)))
}

/// A rich text field; absent or null counts as empty
fn rich_text(
    field: Option<&Value>,
    record: &str,
    name: &str,
) -> Result<RichTextField, MalformedRecordError> {
    match field {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|_| MalformedRecordError::new(record, name)),
    }
}

/// URL of an image field; empty image fields have none
fn image_url(field: Option<&Value>) -> Option<String> {
    field
        .and_then(|image| image.get("url"))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(String::from)
}

/// Format a publication timestamp as `dd/mm/yyyy` (en-GB ordering, UTC)
pub fn format_date(timestamp: &str) -> Option<String> {
    let date = DateTime::parse_from_rfc3339(timestamp)
        .or_else(|_| DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .or_else(|_| NaiveDate::parse_from_str(timestamp, "%Y-%m-%d"))
        .ok()?;
    Some(date.format("%d/%m/%Y").to_string())
}

/// Image transform settings for team logos
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageOptions {
    /// Two hex colors, `from,to`; empty disables the effect
    #[serde(default = "default_duotone")]
    pub duotone: Option<String>,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Responsive variants, smallest first
    #[serde(default = "default_variants")]
    pub variants: Vec<ImageVariant>,
}

/// One `srcset` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageVariant {
    pub width: u32,
    pub height: u32,
}

fn default_duotone() -> Option<String> {
    Some("ff0000,0000ff".to_string())
}

fn default_width() -> u32 {
    300
}

fn default_height() -> u32 {
    200
}

fn default_variants() -> Vec<ImageVariant> {
    vec![
        ImageVariant {
            width: 150,
            height: 100,
        },
        ImageVariant {
            width: 300,
            height: 200,
        },
    ]
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            duotone: default_duotone(),
            width: default_width(),
            height: default_height(),
            variants: default_variants(),
        }
    }
}

impl ImageOptions {
    /// Main image: duotone plus fixed size
    pub fn primary(&self, base: &str) -> String {
        let size = format!("h={}&w={}", self.height, self.width);
        match &self.duotone {
            Some(colors) if !colors.is_empty() => {
                with_query(base, &format!("duotone={}&{}", colors, size))
            }
            _ => with_query(base, &size),
        }
    }

    /// `srcset` value with one entry per variant
    pub fn srcset(&self, base: &str) -> String {
        self.variants
            .iter()
            .map(|v| {
                format!(
                    "{} {}w",
                    with_query(base, &format!("h={}&w={}", v.height, v.width)),
                    v.width
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Append a query string, respecting one already present
fn with_query(base: &str, query: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn league_doc(data: Value) -> Document {
        Document {
            id: "L1".into(),
            uid: Some("premier-league".into()),
            doc_type: "league".into(),
            href: None,
            url: None,
            tags: vec![],
            lang: None,
            first_publication_date: None,
            last_publication_date: Some("2023-03-15T00:00:00Z".into()),
            data,
        }
    }

    fn team() -> Value {
        json!({
            "team_name": [{ "type": "heading3", "text": "Arsenal", "spans": [] }],
            "founded_year": [{ "type": "paragraph", "text": "1886", "spans": [] }],
            "stadium": [{ "type": "paragraph", "text": "Emirates Stadium", "spans": [
                { "start": 0, "end": 8, "type": "label", "data": { "label": "codespan" } }
            ] }],
            "main_color_1": [{ "type": "paragraph", "text": "#EF0107", "spans": [] }],
            "main_color_2": [{ "type": "paragraph", "text": "#063672", "spans": [] }],
            "team_logo": { "url": "https://images.prismic.io/leagues/arsenal.png", "alt": null }
        })
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2023-03-15T00:00:00Z").as_deref(), Some("15/03/2023"));
        assert_eq!(format_date("2023-03-15T10:20:30+0000").as_deref(), Some("15/03/2023"));
        assert_eq!(format_date("2023-12-01").as_deref(), Some("01/12/2023"));
        assert_eq!(format_date("yesterday"), None);
    }

    #[test]
    fn test_league_view() {
        let doc = league_doc(json!({
            "name": [{ "type": "heading1", "text": "Premier League", "spans": [] }],
            "logo": { "url": "https://images.prismic.io/leagues/pl.png" }
        }));

        let view = LeagueView::from_document(&doc, &RouteTable::default()).unwrap();
        assert_eq!(view.id, "L1");
        assert_eq!(view.slug, "premier-league");
        assert_eq!(view.name, "Premier League");
        assert_eq!(view.logo_url.as_deref(), Some("https://images.prismic.io/leagues/pl.png"));
        assert_eq!(view.last_updated, "15/03/2023");
        assert_eq!(view.path, "/league/premier-league");
        assert_eq!(view.link().id, "L1");
    }

    #[test]
    fn test_league_without_name_is_malformed() {
        let doc = league_doc(json!({ "name": [] }));
        let err = LeagueView::from_document(&doc, &RouteTable::default()).unwrap_err();
        assert_eq!(err, MalformedRecordError::new("league L1", "name[0].text"));
    }

    #[test]
    fn test_team_view() {
        let view = TeamView::from_value(
            &team(),
            "team 0 of league L1",
            &RouteTable::default(),
            &ImageOptions::default(),
        )
        .unwrap();

        assert_eq!(view.name, "Arsenal");
        assert_eq!(view.founded_year, "1886");
        assert_eq!(view.stadium_html, "<p><code>Emirates</code> Stadium</p>");
        assert_eq!(view.main_color_1, "#EF0107");
        assert_eq!(view.main_color_2, "#063672");
        assert_eq!(
            view.logo_url.as_deref(),
            Some("https://images.prismic.io/leagues/arsenal.png?duotone=ff0000,0000ff&h=200&w=300")
        );
        assert_eq!(
            view.logo_srcset.as_deref(),
            Some(concat!(
                "https://images.prismic.io/leagues/arsenal.png?h=100&w=150 150w, ",
                "https://images.prismic.io/leagues/arsenal.png?h=200&w=300 300w"
            ))
        );
    }

    #[test]
    fn test_team_missing_founded_year_is_malformed() {
        let mut team = team();
        team.as_object_mut().unwrap().remove("founded_year");

        let err = TeamView::from_value(
            &team,
            "team 0 of league L1",
            &RouteTable::default(),
            &ImageOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.field, "founded_year[0].text");
        assert_eq!(err.record, "team 0 of league L1");
    }

    #[test]
    fn test_teams_of() {
        let doc = league_doc(json!({ "teams": [team(), team()] }));
        let teams = teams_of(&doc, &RouteTable::default(), &ImageOptions::default()).unwrap();
        assert_eq!(teams.len(), 2);

        let doc = league_doc(json!({ "teams": [] }));
        assert!(teams_of(&doc, &RouteTable::default(), &ImageOptions::default())
            .unwrap()
            .is_empty());

        let doc = league_doc(json!({}));
        let err = teams_of(&doc, &RouteTable::default(), &ImageOptions::default()).unwrap_err();
        assert_eq!(err.field, "teams");
    }

    #[test]
    fn test_image_query_on_existing_query() {
        let images = ImageOptions {
            duotone: None,
            ..ImageOptions::default()
        };
        assert_eq!(
            images.primary("https://images.prismic.io/x.png?auto=compress,format"),
            "https://images.prismic.io/x.png?auto=compress,format&h=200&w=300"
        );
    }

    #[test]
    fn test_empty_image_has_no_url() {
        assert_eq!(image_url(Some(&json!({}))), None);
        assert_eq!(image_url(Some(&json!({ "url": "" }))), None);
        assert_eq!(image_url(None), None);
    }
}

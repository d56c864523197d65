//! Listing pages rendered as a repeated "card" per posting.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use time::OffsetDateTime;

use super::{
    JobSource, NOT_AVAILABLE, RECENTLY, RawPosting, ScrapeError, SkillSet, age::UNKNOWN_AGE_DAYS,
    age::parse_relative_age, endpoint_with_query,
};

/// Where a card's link comes from.
#[derive(Debug, Clone, Copy)]
pub enum LinkFrom {
    /// The `href` of the title element.
    Title,
    /// The `href` of the first element matching the selector; cards without one are skipped.
    Element(&'static str),
}

/// How old a card's posting is assumed to be.
#[derive(Debug, Clone, Copy)]
pub enum CardAge {
    /// The portal's search already limits age; use a fixed estimate.
    Fixed(i64),
    /// Read relative text (`3 days ago`) from an element, falling back to `fallback` days.
    Element {
        selector: &'static str,
        fallback: i64,
    },
}

/// A portal whose search results are HTML cards located by CSS selectors.
#[derive(Debug, Clone, Copy)]
pub struct CardSource {
    /// Portal display name.
    pub name: &'static str,
    /// Search page URL without query.
    pub endpoint: &'static str,
    /// Query pairs for the configured skills.
    pub query: fn(&SkillSet) -> Vec<(&'static str, String)>,
    /// Selector of one result card.
    pub card: &'static str,
    /// Only the first `limit` cards are considered.
    pub limit: usize,
    /// Selector of the title inside a card; cards without one are skipped.
    pub title: &'static str,
    /// Selector of the company inside a card.
    pub company: &'static str,
    /// Where the posting link is read from.
    pub link: LinkFrom,
    /// Prefix for relative links; applied only when the `href` is non-empty.
    pub base_url: Option<&'static str>,
    /// How the posting age is estimated.
    pub age: CardAge,
}

struct Selectors {
    card: Selector,
    title: Selector,
    company: Selector,
    link: Option<Selector>,
    age: Option<Selector>,
}

fn selector(css: &'static str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|err| ScrapeError::Selector {
        selector: css,
        message: err.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

impl CardSource {
    fn selectors(&self) -> Result<Selectors, ScrapeError> {
        Ok(Selectors {
            card: selector(self.card)?,
            title: selector(self.title)?,
            company: selector(self.company)?,
            link: match self.link {
                LinkFrom::Title => None,
                LinkFrom::Element(css) => Some(selector(css)?),
            },
            age: match self.age {
                CardAge::Fixed(_) => None,
                CardAge::Element { selector: css, .. } => Some(selector(css)?),
            },
        })
    }

    fn absolute(&self, href: &str) -> String {
        match self.base_url {
            Some(base) if !href.is_empty() => format!("{base}{href}"),
            _ => href.to_owned(),
        }
    }

    fn read_card(&self, card: ElementRef<'_>, selectors: &Selectors) -> Option<RawPosting> {
        let title_element = card.select(&selectors.title).next()?;
        let href = match &selectors.link {
            None => title_element.value().attr("href"),
            Some(link) => card.select(link).next()?.value().attr("href"),
        };

        let title = element_text(title_element);
        let company = card
            .select(&selectors.company)
            .next()
            .map(element_text)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned());

        let days_ago = match (self.age, &selectors.age) {
            (CardAge::Element { fallback, .. }, Some(age)) => card
                .select(age)
                .next()
                .map(|element| parse_relative_age(&element_text(element)))
                .filter(|days| *days != UNKNOWN_AGE_DAYS)
                .unwrap_or(fallback),
            (CardAge::Element { fallback, .. }, None) => fallback,
            (CardAge::Fixed(days), _) => days,
        };

        Some(RawPosting {
            search_text: format!("{title} {company}"),
            link: self.absolute(href.unwrap_or_default()),
            title,
            company,
            posted_date: RECENTLY.to_owned(),
            days_ago,
        })
    }
}

impl JobSource for CardSource {
    fn name(&self) -> &'static str {
        self.name
    }

    /// Card ages are estimates, so listing pages are never dropped for being old.
    fn filters_by_age(&self) -> bool {
        false
    }

    fn request_url(&self, skills: &SkillSet) -> Url {
        endpoint_with_query(self.endpoint, (self.query)(skills))
    }

    fn parse(&self, body: &str, _now: OffsetDateTime) -> Result<Vec<RawPosting>, ScrapeError> {
        let selectors = self.selectors()?;
        let document = Html::parse_document(body);

        Ok(document
            .select(&selectors.card)
            .take(self.limit)
            .filter_map(|card| self.read_card(card, &selectors))
            .collect())
    }
}

use quick_xml::{Reader, escape::resolve_predefined_entity, events::Event};
use reqwest::Url;
use time::{OffsetDateTime, format_description::well_known::Rfc2822};

use super::{JobSource, NOT_AVAILABLE, RawPosting, ScrapeError, SkillSet, age::days_since};

const FEED_URL: &str = "https://weworkremotely.com/categories/remote-programming-jobs.rss";
const LIMIT: usize = 20;

/// We Work Remotely programming category RSS feed.
pub struct WeWorkRemotely;

#[derive(Debug, Default)]
struct FeedItem {
    title: Option<String>,
    link: Option<String>,
    pub_date: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum FeedField {
    Title,
    Link,
    PubDate,
}

impl FeedItem {
    fn field_mut(&mut self, field: FeedField) -> &mut Option<String> {
        match field {
            FeedField::Title => &mut self.title,
            FeedField::Link => &mut self.link,
            FeedField::PubDate => &mut self.pub_date,
        }
    }
}

fn xml_error(err: impl ToString) -> ScrapeError {
    ScrapeError::Xml(err.to_string())
}

/// Resolve `&name;` / `&#NN;` / `&#xNN;` references split out of text events.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix('x').or_else(|| numeric.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => numeric.parse::<u32>().ok(),
        };
        return code.and_then(char::from_u32).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_owned)
}

/// Collect the `<item>` entries of an RSS document.
fn read_items(body: &str) -> Result<Vec<FeedItem>, ScrapeError> {
    let mut reader = Reader::from_str(body);
    let mut items = Vec::new();
    let mut current: Option<FeedItem> = None;
    let mut field: Option<FeedField> = None;

    loop {
        let chunk = match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => {
                match start.name().as_ref() {
                    b"item" => current = Some(FeedItem::default()),
                    b"title" => field = Some(FeedField::Title),
                    b"link" => field = Some(FeedField::Link),
                    b"pubDate" => field = Some(FeedField::PubDate),
                    _ => field = None,
                }
                continue;
            }
            Event::End(end) => {
                if end.name().as_ref() == b"item" {
                    items.extend(current.take());
                }
                field = None;
                continue;
            }
            Event::Text(text) => text.decode().map_err(xml_error)?.into_owned(),
            Event::CData(cdata) => cdata.decode().map_err(xml_error)?.into_owned(),
            Event::GeneralRef(reference) => {
                let name = reference.decode().map_err(xml_error)?;
                resolve_reference(&name).unwrap_or_else(|| format!("&{name};"))
            }
            Event::Eof => break,
            _ => continue,
        };

        if let (Some(item), Some(field)) = (current.as_mut(), field) {
            item.field_mut(field)
                .get_or_insert_with(String::new)
                .push_str(&chunk);
        }
    }

    Ok(items)
}

/// Company names are the prefix of `Company - Role` titles.
fn company_from_title(title: &str) -> String {
    title
        .split_once(" - ")
        .map(|(company, _)| company.to_owned())
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

fn age_of(pub_date: &str, now: OffsetDateTime) -> i64 {
    // Unparseable feed dates count as fresh: the feed only lists open positions.
    OffsetDateTime::parse(pub_date, &Rfc2822)
        .map(|posted| days_since(posted, now))
        .unwrap_or(0)
}

impl JobSource for WeWorkRemotely {
    fn name(&self) -> &'static str {
        "We Work Remotely"
    }

    fn request_url(&self, _skills: &SkillSet) -> Url {
        Url::parse(FEED_URL).expect("portal endpoints are valid URLs")
    }

    fn parse(&self, body: &str, now: OffsetDateTime) -> Result<Vec<RawPosting>, ScrapeError> {
        let items = read_items(body)?;

        Ok(items
            .into_iter()
            .take(LIMIT)
            .map(|item| {
                let title = item
                    .title
                    .map(|title| title.trim().to_owned())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
                let posted_date = item
                    .pub_date
                    .map(|date| date.trim().to_owned())
                    .unwrap_or_default();
                RawPosting {
                    company: company_from_title(&title),
                    link: item.link.map(|link| link.trim().to_owned()).unwrap_or_default(),
                    days_ago: age_of(&posted_date, now),
                    search_text: title.clone(),
                    title,
                    posted_date,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    const NOW: OffsetDateTime = datetime!(2024-05-10 12:00 UTC);

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>We Work Remotely: Remote Programming Jobs</title>
    <link>https://weworkremotely.com</link>
    <item>
      <title>Acme &amp; Sons - Senior Java Developer</title>
      <link>https://weworkremotely.com/remote-jobs/acme-java</link>
      <pubDate>Tue, 07 May 2024 10:00:00 +0000</pubDate>
      <description><![CDATA[<p>Spring Boot</p>]]></description>
    </item>
    <item>
      <title><![CDATA[Solo Rust Contractor]]></title>
      <link>https://weworkremotely.com/remote-jobs/solo</link>
      <pubDate>sometime soon</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_feed_items_only() {
        let postings = WeWorkRemotely.parse(FEED, NOW).unwrap();
        assert_eq!(postings.len(), 2);

        let first = &postings[0];
        assert_eq!(first.title, "Acme & Sons - Senior Java Developer");
        assert_eq!(first.company, "Acme & Sons");
        assert_eq!(first.link, "https://weworkremotely.com/remote-jobs/acme-java");
        assert_eq!(first.days_ago, 3);
        assert_eq!(first.search_text, first.title);
    }

    #[test]
    fn unparseable_dates_count_as_fresh() {
        let postings = WeWorkRemotely.parse(FEED, NOW).unwrap();
        let second = &postings[1];
        assert_eq!(second.title, "Solo Rust Contractor");
        assert_eq!(second.company, "N/A");
        assert_eq!(second.days_ago, 0);
        assert_eq!(second.posted_date, "sometime soon");
    }

    #[test]
    fn numeric_references_are_resolved() {
        assert_eq!(resolve_reference("#8211").as_deref(), Some("\u{2013}"));
        assert_eq!(resolve_reference("#x41").as_deref(), Some("A"));
        assert_eq!(resolve_reference("lt").as_deref(), Some("<"));
        assert_eq!(resolve_reference("nbsp"), None);
    }

    #[test]
    fn only_first_twenty_items_are_read() {
        let item = "<item><title>X - Java</title><link>l</link></item>";
        let body = format!("<rss><channel>{}</channel></rss>", item.repeat(30));
        assert_eq!(WeWorkRemotely.parse(&body, NOW).unwrap().len(), 20);
    }

    #[test]
    fn broken_xml_is_an_error() {
        let body = "<rss><channel><item><title>x</item></channel></rss>";
        assert!(matches!(
            WeWorkRemotely.parse(body, NOW),
            Err(ScrapeError::Xml(_))
        ));
    }
}

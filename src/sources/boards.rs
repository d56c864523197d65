//! HTML job boards and the selectors locating their result cards.

use super::{
    SkillSet,
    cards::{CardAge, CardSource, LinkFrom},
};

/// LinkedIn guest job search, last 24 hours.
pub const LINKEDIN: CardSource = CardSource {
    name: "LinkedIn",
    endpoint: "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search",
    query: |skills: &SkillSet| {
        vec![
            ("keywords", skills.keywords(3, " OR ")),
            ("location", "Worldwide".into()),
            ("f_TPR", "r86400".into()),
            ("start", "0".into()),
        ]
    },
    card: "li",
    limit: 20,
    title: "h3.base-search-card__title",
    company: "h4.base-search-card__subtitle",
    link: LinkFrom::Element("a.base-card__full-link"),
    base_url: None,
    age: CardAge::Element {
        selector: "time",
        fallback: 1,
    },
};

/// Glassdoor job search.
pub const GLASSDOOR: CardSource = CardSource {
    name: "Glassdoor",
    endpoint: "https://www.glassdoor.com/Job/jobs.htm",
    query: |skills: &SkillSet| {
        vec![
            ("sc.keyword", skills.keywords(2, " ")),
            ("fromAge", "10".into()),
        ]
    },
    card: "li.react-job-listing",
    limit: 20,
    title: r#"a[data-test="job-link"]"#,
    company: "div.d-flex.justify-content-between.align-items-start",
    link: LinkFrom::Title,
    base_url: Some("https://www.glassdoor.com"),
    age: CardAge::Fixed(3),
};

/// AngelList startup roles.
pub const ANGELLIST: CardSource = CardSource {
    name: "AngelList",
    endpoint: "https://angel.co/jobs",
    query: |skills: &SkillSet| vec![("filter", skills.keywords(3, " "))],
    card: "div.styles_role__xb3g6",
    limit: 15,
    title: "div.styles_title__rbj3g",
    company: "div.styles_subtitle__q4dod",
    link: LinkFrom::Element("a"),
    base_url: Some("https://angel.co"),
    age: CardAge::Fixed(2),
};

/// Monster remote search.
pub const MONSTER: CardSource = CardSource {
    name: "Monster",
    endpoint: "https://www.monster.com/jobs/search/",
    query: |skills: &SkillSet| {
        vec![
            ("q", skills.keywords(3, " ")),
            ("where", "remote".into()),
            ("fromage", "10".into()),
        ]
    },
    card: "section.card-content",
    limit: 15,
    title: "h2.title",
    company: "div.company",
    link: LinkFrom::Element("a"),
    base_url: None,
    age: CardAge::Fixed(4),
};

/// Dice remote US search.
pub const DICE: CardSource = CardSource {
    name: "Dice",
    endpoint: "https://www.dice.com/jobs",
    query: |skills: &SkillSet| {
        vec![
            ("q", skills.keywords(3, " ")),
            ("countryCode", "US".into()),
            ("radius", "30".into()),
            ("radiusUnit", "mi".into()),
            ("page", "1".into()),
            ("pageSize", "20".into()),
            ("filters.remote", "true".into()),
            ("language", "en".into()),
        ]
    },
    card: "dhi-search-card",
    limit: 15,
    title: "a.card-title-link",
    company: "a.ng-star-inserted",
    link: LinkFrom::Title,
    base_url: None,
    age: CardAge::Fixed(3),
};

/// FlexJobs search.
pub const FLEXJOBS: CardSource = CardSource {
    name: "FlexJobs",
    endpoint: "https://www.flexjobs.com/search",
    query: |skills: &SkillSet| vec![("search", skills.keywords(3, " "))],
    card: "div.job-list-item",
    limit: 15,
    title: "a.job-title",
    company: "div.job-company",
    link: LinkFrom::Title,
    base_url: Some("https://www.flexjobs.com"),
    age: CardAge::Fixed(2),
};

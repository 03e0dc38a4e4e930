//! Atom feed for the post collection

use atom_syndication::{Category, Entry, Feed, FixedDateTime, Link, Person, Text};
use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::{Collection, PostMetadata};
use crate::error::Result;
use crate::helpers::full_url;
use crate::templates::image_url;

/// Build the feed for every post in `collection`. `now` stands in for the
/// update time of a site without posts.
pub fn build_feed(config: &SiteConfig, collection: &Collection, now: DateTime<Utc>) -> Feed {
    let home = full_url(config, "");
    let updated = collection
        .latest()
        .map(PostMetadata::effective_date)
        .unwrap_or(now);

    let mut feed = Feed::default();
    feed.set_title(config.defaults.title.as_str());
    feed.set_subtitle(Some(Text::from(config.defaults.description.as_str())));
    feed.set_id(home.clone());
    feed.set_links(vec![alternate(&home)]);
    feed.set_updated(fixed(updated));
    feed.set_authors(vec![author(config, &config.defaults.author)]);
    feed.set_rights(Some(Text::from(config.copyright.as_str())));
    if !config.defaults.banner.is_empty() {
        feed.set_logo(Some(full_url(config, &config.defaults.banner)));
    }
    feed.set_categories(
        collection
            .tags()
            .iter()
            .map(|tag| {
                let mut category = Category::default();
                category.set_term(tag.as_str());
                category
            })
            .collect::<Vec<_>>(),
    );
    feed.set_entries(
        collection
            .posts()
            .iter()
            .map(|post| entry(config, post))
            .collect::<Vec<_>>(),
    );
    feed
}

/// Serialize the feed to Atom XML
pub fn atom_xml(feed: &Feed) -> Result<String> {
    let bytes = feed.write_to(Vec::new())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn entry(config: &SiteConfig, post: &PostMetadata) -> Entry {
    let url = full_url(config, &post.outfile);

    let mut links = vec![alternate(&url)];
    if let Some(image) = image_url(config, post) {
        let mut enclosure = Link::default();
        enclosure.set_href(image);
        enclosure.set_rel("enclosure");
        links.push(enclosure);
    }

    let mut entry = Entry::default();
    entry.set_title(post.title.as_str());
    entry.set_id(url);
    entry.set_links(links);
    entry.set_summary(Some(Text::from(post.description.as_str())));
    entry.set_authors(vec![author(config, &post.author)]);
    entry.set_published(Some(fixed(post.date)));
    entry.set_updated(fixed(post.effective_date()));
    entry
}

fn alternate(href: &str) -> Link {
    let mut link = Link::default();
    link.set_href(href);
    link.set_rel("alternate");
    link
}

fn author(config: &SiteConfig, name: &str) -> Person {
    let mut person = Person::default();
    person.set_name(name);
    person.set_uri(Some(full_url(config, "#contact")));
    person
}

fn fixed(date: DateTime<Utc>) -> FixedDateTime {
    date.fixed_offset()
}

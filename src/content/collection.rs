//! The sorted set of pages a build works from

use indexmap::IndexMap;

use super::PostMetadata;

/// Chronological neighbors of a post
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors<'a> {
    /// The next older post
    pub previous: Option<&'a PostMetadata>,
    /// The next newer post
    pub next: Option<&'a PostMetadata>,
}

impl Neighbors<'_> {
    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }
}

/// All pages of a site, newest first, split into posts and other pages
#[derive(Debug, Clone, Default)]
pub struct Collection {
    posts: Vec<PostMetadata>,
    pages: Vec<PostMetadata>,
    tags: Vec<String>,
}

impl Collection {
    /// Build from metadata in discovery order.
    ///
    /// A repeated filepath replaces the earlier record but keeps its
    /// discovery position. Equal effective dates keep discovery order.
    pub fn new<I>(metas: I, post_prefix: &str) -> Self
    where
        I: IntoIterator<Item = PostMetadata>,
    {
        let mut by_path: IndexMap<String, PostMetadata> = IndexMap::new();
        for meta in metas {
            by_path.insert(meta.filepath.clone(), meta);
        }

        let mut sorted: Vec<PostMetadata> = by_path.into_values().collect();
        sorted.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));

        let (posts, pages): (Vec<_>, Vec<_>) = sorted
            .into_iter()
            .partition(|meta| meta.filepath.starts_with(post_prefix));

        let tags = tag_set(&posts);

        Self { posts, pages, tags }
    }

    /// Posts, newest first
    pub fn posts(&self) -> &[PostMetadata] {
        &self.posts
    }

    /// Non-post pages, newest first
    pub fn pages(&self) -> &[PostMetadata] {
        &self.pages
    }

    /// Every distinct post tag, sorted ascending
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Neighbors of the post at `index` in [`Collection::posts`]
    pub fn neighbors(&self, index: usize) -> Neighbors<'_> {
        Neighbors {
            previous: self.posts.get(index + 1),
            next: index.checked_sub(1).and_then(|i| self.posts.get(i)),
        }
    }

    /// The newest post, if any
    pub fn latest(&self) -> Option<&PostMetadata> {
        self.posts.first()
    }

    pub fn len(&self) -> usize {
        self.posts.len() + self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flatten, dedup and sort the tags of `posts`. Case is significant.
pub fn tag_set(posts: &[PostMetadata]) -> Vec<String> {
    let mut tags: Vec<String> = posts.iter().flat_map(|p| p.tags.iter().cloned()).collect();
    tags.sort();
    tags.dedup();
    tags
}

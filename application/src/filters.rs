use domain::{Document, SearchRequest, Timestamp};
use tracing::trace;

/// One narrowing stage of a search. Values inside a pass are OR-ed.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPass<'a> {
    /// Content contains any of the needles.
    ContentContains(Vec<&'a str>),
    /// Title starts with any of the prefixes.
    TitlePrefix(Vec<&'a str>),
    /// Author id equals any of the ids.
    AuthorIn(Vec<&'a str>),
    /// Created lies within the inclusive bounds; a missing bound is open.
    CreatedWithin {
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    },
}

impl<'a> FilterPass<'a> {
    /// Builds the passes for the fields of `request` that actually constrain.
    /// A list holding only empty strings constrains nothing and yields no pass.
    pub fn from_request(request: &'a SearchRequest) -> Vec<Self> {
        let mut passes = Vec::with_capacity(4);
        if let Some(needles) = non_empty(request.contains_contents.as_deref()) {
            passes.push(Self::ContentContains(needles));
        }
        if let Some(prefixes) = non_empty(request.title_prefixes.as_deref()) {
            passes.push(Self::TitlePrefix(prefixes));
        }
        if let Some(ids) = non_empty(request.author_ids.as_deref()) {
            passes.push(Self::AuthorIn(ids));
        }
        if request.created_from.is_some() || request.created_to.is_some() {
            passes.push(Self::CreatedWithin {
                from: request.created_from,
                to: request.created_to,
            });
        }
        passes
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::ContentContains(needles) => doc
                .content
                .as_deref()
                .is_some_and(|content| needles.iter().any(|needle| content.contains(needle))),
            Self::TitlePrefix(prefixes) => doc
                .title
                .as_deref()
                .is_some_and(|title| prefixes.iter().any(|prefix| title.starts_with(prefix))),
            Self::AuthorIn(ids) => doc.author_id().is_some_and(|id| ids.contains(&id)),
            Self::CreatedWithin { from, to } => doc.created.is_some_and(|created| {
                from.is_none_or(|from| created >= from) && to.is_none_or(|to| created <= to)
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ContentContains(_) => "content_contains",
            Self::TitlePrefix(_) => "title_prefix",
            Self::AuthorIn(_) => "author_in",
            Self::CreatedWithin { .. } => "created_within",
        }
    }
}

/// Runs every active pass of `request` over `documents`, narrowing in place.
pub fn apply(mut documents: Vec<Document>, request: &SearchRequest) -> Vec<Document> {
    for pass in FilterPass::from_request(request) {
        if documents.is_empty() {
            break;
        }
        documents.retain(|doc| pass.matches(doc));
        trace!(pass = pass.name(), remaining = documents.len(), "Applied filter pass");
    }
    documents
}

fn non_empty(values: Option<&[String]>) -> Option<Vec<&str>> {
    let kept: Vec<&str> = values?
        .iter()
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .collect();
    (!kept.is_empty()).then_some(kept)
}

mod document;
pub mod front_matter;
mod record;
mod slug;

pub use self::{
    document::{Mark, Node},
    front_matter::FrontMatter,
    record::{
        Content, EXCERPT_LEN, NewsletterRecord, NoContent, RecordBuilder, WithContent,
        derive_excerpt, parse_date,
    },
    slug::Slug,
};

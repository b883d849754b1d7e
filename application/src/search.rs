//! Keyword lookup over the text fields of ledger records.
//!
//! Nothing is indexed ahead of time: every query filters a fresh scan, so results
//! always reflect committed state and keep the scan's insertion order.

use kernel::prelude::entity::{Account, Book, Member};

pub trait Searchable {
    fn text_fields(&self) -> Vec<&str>;
}

impl Searchable for Book {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.title().as_ref().as_str(), self.author().as_ref().as_str()]
    }
}

impl Searchable for Member {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.name().as_ref().as_str(), self.email().as_ref().as_str()]
    }
}

impl Searchable for Account {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.owner().as_ref().as_str()]
    }
}

#[derive(Debug, Clone)]
pub struct Keyword(String);

impl Keyword {
    pub fn new(keyword: impl AsRef<str>) -> Self {
        Self(keyword.as_ref().to_lowercase())
    }

    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        record
            .text_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.0))
    }

    pub fn filter<T: Searchable>(&self, records: Vec<T>) -> Vec<T> {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::prelude::entity::{
        Book, BookAuthor, BookIsbn, BookTitle, Member, MemberEmail, MemberId, MemberName,
    };

    use crate::search::Keyword;

    fn book(isbn: &str, title: &str, author: &str) -> Book {
        Book::register(
            BookIsbn::new(isbn),
            BookTitle::new(title),
            BookAuthor::new(author),
        )
    }

    #[test]
    fn matches_title_or_author_ignoring_case() {
        let books = vec![
            book("1", "Dune", "Frank Herbert"),
            book("2", "Hyperion", "Dan Simmons"),
            book("3", "Children of Dune", "Frank Herbert"),
        ];

        let found = Keyword::new("dUNE").filter(books.clone());
        let isbns = found
            .iter()
            .map(|book| book.isbn().as_ref().as_str())
            .collect::<Vec<_>>();
        assert_eq!(isbns, vec!["1", "3"]);

        let found = Keyword::new("simmons").filter(books.clone());
        assert_eq!(found, vec![books[1].clone()]);

        assert!(Keyword::new("Asimov").filter(books).is_empty());
    }

    #[test]
    fn empty_keyword_matches_everything() {
        let member = Member::new(
            MemberId::new(Uuid::new_v4()),
            MemberName::new("Chani"),
            MemberEmail::new("chani@sietch.example"),
        );
        assert!(Keyword::new("").matches(&member));
        assert!(Keyword::new("SIETCH").matches(&member));
    }
}

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub is_available: bool,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            isbn,
            title,
            author,
            availability,
        } = value.into_destruct();
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            is_available: availability.into(),
        }
    }
}

pub struct GetBookDto {
    pub isbn: String,
}

pub struct CreateBookDto {
    pub isbn: String,
    pub title: String,
    pub author: String,
}

pub struct DeleteBookDto {
    pub isbn: String,
}

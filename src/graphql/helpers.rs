// Mapping helpers shared by the GraphQL query and mutation modules.

use std::collections::HashMap;

use crate::db::{AuthorRecord, BookRecord, BookWithAuthor, UserRecord};
use crate::graphql::types::{Author, Book, User};

/// Convert an AuthorRecord to a GraphQL Author with its book count.
pub(crate) fn author_to_graphql(record: AuthorRecord, book_count: i64) -> Author {
    Author {
        id: record.id.into(),
        name: record.name,
        born: record.born,
        book_count: book_count as i32,
    }
}

/// Convert a book record plus its author to a GraphQL Book.
pub(crate) fn book_record_to_graphql(
    book: BookRecord,
    author: AuthorRecord,
    book_count: i64,
) -> Book {
    Book {
        id: book.id.into(),
        title: book.title,
        published: book.published,
        author: author_to_graphql(author, book_count),
        genres: book.genres,
    }
}

/// Convert a joined book row to a GraphQL Book, taking the author's book
/// count from a grouped-count map.
pub(crate) fn book_row_to_graphql(row: BookWithAuthor, counts: &HashMap<String, i64>) -> Book {
    let book_count = counts.get(&row.author.id).copied().unwrap_or(0);
    book_record_to_graphql(row.book, row.author, book_count)
}

/// Convert a UserRecord to a GraphQL User. The password hash stays behind.
pub(crate) fn user_to_graphql(record: UserRecord) -> User {
    User {
        id: record.id.into(),
        username: record.username,
        favorite_genre: record.favorite_genre,
    }
}

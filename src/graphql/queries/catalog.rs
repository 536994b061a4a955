//! Catalog queries: counts, book listings, author listings.

use super::prelude::*;

#[derive(Default)]
pub struct CatalogQueries;

#[Object]
impl CatalogQueries {
    /// Total number of books in the catalog.
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let db = ctx.data_unchecked::<Database>();
        let count = db.books().count().await.map_err(errors::internal)?;
        Ok(count as i32)
    }

    /// Total number of authors in the catalog.
    async fn author_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let db = ctx.data_unchecked::<Database>();
        let count = db.authors().count().await.map_err(errors::internal)?;
        Ok(count as i32)
    }

    /// Books in the catalog, optionally filtered by author name and/or
    /// genre. Filters AND-combine; an unknown author name yields an empty
    /// list, not an error.
    async fn all_books(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> Result<Vec<Book>> {
        let db = ctx.data_unchecked::<Database>();

        let author_id = match author {
            Some(name) => match db
                .authors()
                .find_by_name(&name)
                .await
                .map_err(errors::internal)?
            {
                Some(author) => Some(author.id),
                // Unknown author name: nothing can match.
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let rows = db
            .books()
            .find(BookFilter { author_id, genre })
            .await
            .map_err(errors::internal)?;
        let counts = db.books().counts_by_author().await.map_err(errors::internal)?;

        Ok(rows
            .into_iter()
            .map(|row| book_row_to_graphql(row, &counts))
            .collect())
    }

    /// Every author, each with the number of catalog books referencing it.
    async fn all_authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let db = ctx.data_unchecked::<Database>();

        let authors = db.authors().list().await.map_err(errors::internal)?;
        // One grouped query instead of a count per author.
        let counts: HashMap<String, i64> =
            db.books().counts_by_author().await.map_err(errors::internal)?;

        Ok(authors
            .into_iter()
            .map(|author| {
                let book_count = counts.get(&author.id).copied().unwrap_or(0);
                author_to_graphql(author, book_count)
            })
            .collect())
    }
}

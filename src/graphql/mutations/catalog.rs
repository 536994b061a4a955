//! Catalog mutations: adding books and editing authors. Both require an
//! authenticated caller.

use super::prelude::*;

#[derive(Default)]
pub struct CatalogMutations;

#[Object]
impl CatalogMutations {
    /// Add a book, creating its author on first reference.
    ///
    /// The author is resolved (or created) before the title is validated,
    /// so a rejected book can still leave a new author behind. This
    /// matches the write order of the catalog since its first version.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published: i32,
        genres: Vec<String>,
    ) -> Result<Book> {
        let user = ctx.current_user()?;
        let db = ctx.data_unchecked::<Database>();

        let args = errors::args_value(json!({
            "title": &title,
            "author": &author,
            "published": published,
            "genres": &genres,
        }));

        let author_record = db
            .authors()
            .get_or_create(&author)
            .await
            .map_err(|e| errors::from_store(e, args.clone()))?;

        let book = db
            .books()
            .create(CreateBook {
                title,
                published,
                author_id: author_record.id.clone(),
                genres,
            })
            .await
            .map_err(|e| errors::from_store(e, args.clone()))?;

        let book_count = db
            .books()
            .count_by_author(&author_record.id)
            .await
            .map_err(errors::internal)?;

        tracing::info!(
            user_id = %user.id,
            book_id = %book.id,
            author_id = %author_record.id,
            "book added"
        );

        Ok(book_record_to_graphql(book, author_record, book_count))
    }

    /// Set an author's birth year, addressed by name.
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> Result<Author> {
        let user = ctx.current_user()?;
        let db = ctx.data_unchecked::<Database>();

        let args = errors::args_value(json!({
            "name": &name,
            "setBornTo": set_born_to,
        }));

        let author = db
            .authors()
            .find_by_name(&name)
            .await
            .map_err(|e| errors::from_store(e, args.clone()))?
            .ok_or_else(|| errors::invalid_input("Author not found", args.clone()))?;

        let updated = db
            .authors()
            .set_born(&author.id, set_born_to)
            .await
            .map_err(|e| errors::from_store(e, args.clone()))?
            .ok_or_else(|| errors::invalid_input("Author not found", args))?;

        let book_count = db
            .books()
            .count_by_author(&updated.id)
            .await
            .map_err(errors::internal)?;

        tracing::info!(
            user_id = %user.id,
            author_id = %updated.id,
            born = set_born_to,
            "author updated"
        );

        Ok(author_to_graphql(updated, book_count))
    }
}

//! Integration tests for the catalog store layer
//!
//! Repository behavior against a real (in-memory) SQLite database:
//! validation, uniqueness, get-or-create convergence, listing filters,
//! and the grouped book counts.

use assert_matches::assert_matches;
use biblio::db::{BookFilter, CreateBook, CreateUser, Database, StoreError};
use pretty_assertions::assert_eq;
use sqlx::sqlite::SqlitePoolOptions;

async fn test_db() -> Database {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    let db = Database::new(pool);
    db.migrate().await.expect("migrations");
    db
}

fn book(title: &str, author_id: &str, published: i32, genres: &[&str]) -> CreateBook {
    CreateBook {
        title: title.to_string(),
        published,
        author_id: author_id.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

fn user(username: &str, favorite_genre: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        favorite_genre: favorite_genre.to_string(),
        password_hash: "$fake$hash".to_string(),
    }
}

// ============================================================================
// Authors
// ============================================================================

#[tokio::test]
async fn get_or_create_reuses_the_existing_author() {
    let db = test_db().await;

    let first = db.authors().get_or_create("Sandra Cisneros").await.unwrap();
    let second = db.authors().get_or_create("Sandra Cisneros").await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(db.authors().count().await.unwrap(), 1);
}

#[tokio::test]
async fn get_or_create_names_are_case_sensitive() {
    let db = test_db().await;

    db.authors().get_or_create("bell hooks").await.unwrap();
    db.authors().get_or_create("Bell Hooks").await.unwrap();

    assert_eq!(db.authors().count().await.unwrap(), 2);
}

#[tokio::test]
async fn set_born_updates_only_existing_authors() {
    let db = test_db().await;
    let author = db.authors().get_or_create("Ursula Le Guin").await.unwrap();
    assert_eq!(author.born, None);

    let updated = db.authors().set_born(&author.id, 1929).await.unwrap();
    assert_eq!(updated.expect("updated record").born, Some(1929));

    let missing = db.authors().set_born("no-such-id", 1900).await.unwrap();
    assert!(missing.is_none());
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn usernames_are_unique() {
    let db = test_db().await;

    db.users().create(user("louise", "horror")).await.unwrap();
    let duplicate = db.users().create(user("louise", "comedy")).await;

    assert_matches!(duplicate, Err(StoreError::Validation(_)));
}

#[tokio::test]
async fn short_usernames_are_rejected_by_chars_not_bytes() {
    let db = test_db().await;

    let short = db.users().create(user("ab", "crime")).await;
    assert_matches!(short, Err(StoreError::Validation(_)));

    // Three characters, five bytes
    let unicode = db.users().create(user("héè", "crime")).await;
    assert!(unicode.is_ok());
}

#[tokio::test]
async fn find_by_username_is_exact() {
    let db = test_db().await;
    db.users().create(user("marta", "essays")).await.unwrap();

    assert!(db.users().find_by_username("marta").await.unwrap().is_some());
    assert!(db.users().find_by_username("Marta").await.unwrap().is_none());
    assert!(db.users().find_by_username("mart").await.unwrap().is_none());
}

#[tokio::test]
async fn created_users_are_found_by_id() {
    let db = test_db().await;
    let created = db.users().create(user("nadia", "poetry")).await.unwrap();

    let fetched = db
        .users()
        .find_by_id(&created.id)
        .await
        .unwrap()
        .expect("stored user");
    assert_eq!(fetched.username, "nadia");
    assert_eq!(fetched.favorite_genre, "poetry");
    assert_eq!(fetched.password_hash, "$fake$hash");
}

// ============================================================================
// Books
// ============================================================================

#[tokio::test]
async fn short_titles_are_rejected_by_chars_not_bytes() {
    let db = test_db().await;
    let author = db.authors().get_or_create("Anon").await.unwrap();

    let rejected = db.books().create(book("A", &author.id, 2001, &[])).await;
    assert_matches!(rejected, Err(StoreError::Validation(_)));
    assert_eq!(db.books().count().await.unwrap(), 0);

    // Two characters, four bytes
    let unicode = db.books().create(book("éß", &author.id, 2001, &[])).await;
    assert!(unicode.is_ok());
    assert_eq!(db.books().count().await.unwrap(), 1);
}

#[tokio::test]
async fn find_joins_books_with_their_authors() {
    let db = test_db().await;
    let author = db.authors().get_or_create("Octavia Butler").await.unwrap();
    db.books()
        .create(book("Kindred", &author.id, 1979, &["time travel"]))
        .await
        .unwrap();

    let rows = db.books().find(BookFilter::default()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].book.title, "Kindred");
    assert_eq!(rows[0].book.published, 1979);
    assert_eq!(rows[0].book.genres, vec!["time travel".to_string()]);
    assert_eq!(rows[0].author.name, "Octavia Butler");
    assert_eq!(rows[0].author.id, author.id);
}

#[tokio::test]
async fn filters_combine_with_and() {
    let db = test_db().await;
    let butler = db.authors().get_or_create("Octavia Butler").await.unwrap();
    let gibson = db.authors().get_or_create("William Gibson").await.unwrap();

    db.books()
        .create(book("Kindred", &butler.id, 1979, &["classic"]))
        .await
        .unwrap();
    db.books()
        .create(book("Dawn", &butler.id, 1987, &["scifi"]))
        .await
        .unwrap();
    db.books()
        .create(book("Neuromancer", &gibson.id, 1984, &["scifi"]))
        .await
        .unwrap();

    let by_author = db
        .books()
        .find(BookFilter {
            author_id: Some(butler.id.clone()),
            genre: None,
        })
        .await
        .unwrap();
    assert_eq!(by_author.len(), 2);

    let by_genre = db
        .books()
        .find(BookFilter {
            author_id: None,
            genre: Some("scifi".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(by_genre.len(), 2);

    let both = db
        .books()
        .find(BookFilter {
            author_id: Some(butler.id.clone()),
            genre: Some("scifi".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].book.title, "Dawn");
}

#[tokio::test]
async fn empty_genre_list_matches_no_genre_filter() {
    let db = test_db().await;
    let author = db.authors().get_or_create("Anon").await.unwrap();
    db.books()
        .create(book("Untagged", &author.id, 2020, &[]))
        .await
        .unwrap();

    let all = db.books().find(BookFilter::default()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].book.genres.is_empty());

    let filtered = db
        .books()
        .find(BookFilter {
            author_id: None,
            genre: Some("anything".to_string()),
        })
        .await
        .unwrap();
    assert!(filtered.is_empty());
}

#[tokio::test]
async fn grouped_counts_match_individual_counts() {
    let db = test_db().await;
    let butler = db.authors().get_or_create("Octavia Butler").await.unwrap();
    let gibson = db.authors().get_or_create("William Gibson").await.unwrap();
    let silent = db.authors().get_or_create("No Books Yet").await.unwrap();

    db.books()
        .create(book("Kindred", &butler.id, 1979, &[]))
        .await
        .unwrap();
    db.books()
        .create(book("Dawn", &butler.id, 1987, &[]))
        .await
        .unwrap();
    db.books()
        .create(book("Neuromancer", &gibson.id, 1984, &[]))
        .await
        .unwrap();

    let counts = db.books().counts_by_author().await.unwrap();
    assert_eq!(counts.get(&butler.id), Some(&2));
    assert_eq!(counts.get(&gibson.id), Some(&1));
    // Authors without books are simply absent from the grouped map
    assert_eq!(counts.get(&silent.id), None);

    for (author_id, grouped) in &counts {
        let single = db.books().count_by_author(author_id).await.unwrap();
        assert_eq!(*grouped, single);
    }
}

// ============================================================================
// Connection / Migrations
// ============================================================================

#[tokio::test]
async fn file_database_persists_across_reconnects() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let url = format!("sqlite://{}", path.display());

    let db = Database::connect(&url, 2).await.unwrap();
    db.migrate().await.unwrap();
    db.authors().get_or_create("Persisted").await.unwrap();
    db.pool().close().await;

    let db = Database::connect(&url, 2).await.unwrap();
    // Re-running migrations on an up-to-date database is a no-op
    db.migrate().await.unwrap();
    assert!(
        db.authors()
            .find_by_name("Persisted")
            .await
            .unwrap()
            .is_some()
    );
}

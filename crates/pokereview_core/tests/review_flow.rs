use pokereview_core::db::open_db_in_memory;
use pokereview_core::{
    CategoryService, CountryService, NewOwner, NewPokemon, NewReview, OwnerService, Pokemon,
    PokemonService, Review, ReviewService, Reviewer, ReviewerService, ServiceError,
    SqliteCategoryRepository, SqliteCountryRepository, SqliteOwnerRepository,
    SqlitePokemonRepository, SqliteReviewRepository, SqliteReviewerRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_review_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let reviewer = seed_reviewer(&conn, "Samuel", "Oak");
    let pokemon = seed_pokemon(&conn, "Pikachu");
    let service = review_service(&conn);

    let review = service
        .create_review(
            reviewer.uuid,
            pokemon.uuid,
            &new_review("Sparky", "Shockingly loyal", 5),
        )
        .unwrap();

    assert_eq!(review.reviewer_uuid, reviewer.uuid);
    assert_eq!(review.pokemon_uuid, pokemon.uuid);

    let loaded = service.get_review(review.uuid).unwrap();
    assert_eq!(loaded, review);
    assert_eq!(loaded.rating, 5);
}

#[test]
fn empty_text_is_conflict_before_reference_checks() {
    let conn = open_db_in_memory().unwrap();
    let service = review_service(&conn);

    // Both references are bogus; the text rule still wins.
    let err = service
        .create_review(Uuid::new_v4(), Uuid::new_v4(), &new_review("Sparky", "", 5))
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(count_rows(&conn, "reviews"), 0);
}

#[test]
fn whitespace_only_text_is_accepted() {
    let conn = open_db_in_memory().unwrap();
    let reviewer = seed_reviewer(&conn, "Samuel", "Oak");
    let pokemon = seed_pokemon(&conn, "Pikachu");
    let service = review_service(&conn);

    let review = service
        .create_review(reviewer.uuid, pokemon.uuid, &new_review("Hmm", " ", 2))
        .unwrap();

    assert_eq!(service.get_review(review.uuid).unwrap().text, " ");
}

#[test]
fn missing_reviewer_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let pokemon = seed_pokemon(&conn, "Pikachu");
    let service = review_service(&conn);

    let err = service
        .create_review(Uuid::new_v4(), pokemon.uuid, &new_review("Sparky", "ok", 3))
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::NotFound(reason) if reason.contains("reviewer not found")
    ));
    assert_eq!(count_rows(&conn, "reviews"), 0);
}

#[test]
fn missing_pokemon_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let reviewer = seed_reviewer(&conn, "Samuel", "Oak");
    let service = review_service(&conn);

    let err = service
        .create_review(reviewer.uuid, Uuid::new_v4(), &new_review("Sparky", "ok", 3))
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::NotFound(reason) if reason.contains("pokemon not found")
    ));
    assert_eq!(count_rows(&conn, "reviews"), 0);
}

#[test]
fn update_review_replaces_content_fields_only() {
    let conn = open_db_in_memory().unwrap();
    let reviewer = seed_reviewer(&conn, "Samuel", "Oak");
    let pokemon = seed_pokemon(&conn, "Pikachu");
    let service = review_service(&conn);
    let review = service
        .create_review(
            reviewer.uuid,
            pokemon.uuid,
            &new_review("Sparky", "Shockingly loyal", 5),
        )
        .unwrap();

    // The payload points at different records; stored references must win.
    let payload = Review::with_id(
        review.uuid,
        Uuid::new_v4(),
        Uuid::new_v4(),
        "Revised",
        "Still loyal",
        4,
    )
    .unwrap();
    let updated = service.update_review(review.uuid, &payload).unwrap();

    assert_eq!(updated.title, "Revised");
    assert_eq!(updated.text, "Still loyal");
    assert_eq!(updated.rating, 4);
    assert_eq!(updated.pokemon_uuid, pokemon.uuid);
    assert_eq!(updated.reviewer_uuid, reviewer.uuid);
}

#[test]
fn update_review_with_mismatched_payload_id_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let reviewer = seed_reviewer(&conn, "Samuel", "Oak");
    let pokemon = seed_pokemon(&conn, "Pikachu");
    let service = review_service(&conn);
    let review = service
        .create_review(reviewer.uuid, pokemon.uuid, &new_review("Sparky", "ok", 3))
        .unwrap();

    let foreign_payload = Review::new(pokemon.uuid, reviewer.uuid, "Other", "text", 1);
    let err = service
        .update_review(review.uuid, &foreign_payload)
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(service.get_review(review.uuid).unwrap().title, "Sparky");
}

#[test]
fn delete_missing_review_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = review_service(&conn);

    let err = service.delete_review(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn deleted_review_is_gone() {
    let conn = open_db_in_memory().unwrap();
    let reviewer = seed_reviewer(&conn, "Samuel", "Oak");
    let pokemon = seed_pokemon(&conn, "Pikachu");
    let service = review_service(&conn);
    let review = service
        .create_review(reviewer.uuid, pokemon.uuid, &new_review("Sparky", "ok", 3))
        .unwrap();

    service.delete_review(review.uuid).unwrap();

    assert_eq!(count_rows(&conn, "reviews"), 0);
    let err = service.get_review(review.uuid).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn review_listing_may_be_empty() {
    let conn = open_db_in_memory().unwrap();
    let service = review_service(&conn);

    assert!(service.list_reviews().unwrap().is_empty());
}

#[test]
fn get_reviews_of_a_pokemon_filters_by_pokemon() {
    let conn = open_db_in_memory().unwrap();
    let reviewer = seed_reviewer(&conn, "Samuel", "Oak");
    let pikachu = seed_pokemon(&conn, "Pikachu");
    let eevee = seed_pokemon(&conn, "Eevee");
    let service = review_service(&conn);

    let pikachu_review = service
        .create_review(reviewer.uuid, pikachu.uuid, &new_review("Sparky", "ok", 5))
        .unwrap();
    service
        .create_review(reviewer.uuid, eevee.uuid, &new_review("Fluffy", "ok", 4))
        .unwrap();

    let filtered = service.get_reviews_of_a_pokemon(pikachu.uuid).unwrap();
    assert_eq!(filtered, vec![pikachu_review]);

    assert!(service
        .get_reviews_of_a_pokemon(Uuid::new_v4())
        .unwrap()
        .is_empty());
}

#[test]
fn duplicate_reviewer_name_pair_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = ReviewerService::new(SqliteReviewerRepository::try_new(&conn).unwrap());

    service.create_reviewer("Samuel", "Oak").unwrap();
    let err = service.create_reviewer(" samuel ", "OAK").unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(count_rows(&conn, "reviewers"), 1);
}

#[test]
fn blank_reviewer_names_are_invalid_input() {
    let conn = open_db_in_memory().unwrap();
    let service = ReviewerService::new(SqliteReviewerRepository::try_new(&conn).unwrap());

    let err = service.create_reviewer("  ", "Oak").unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(count_rows(&conn, "reviewers"), 0);
}

#[test]
fn empty_reviewer_listing_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ReviewerService::new(SqliteReviewerRepository::try_new(&conn).unwrap());

    let err = service.list_reviewers().unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn update_reviewer_replaces_names() {
    let conn = open_db_in_memory().unwrap();
    let service = ReviewerService::new(SqliteReviewerRepository::try_new(&conn).unwrap());

    let created = service.create_reviewer("Samuel", "Oak").unwrap();
    let payload = Reviewer::with_id(created.uuid, "Gary", "Oak").unwrap();

    let updated = service.update_reviewer(created.uuid, &payload).unwrap();
    assert_eq!(updated.first_name, "Gary");
    assert_eq!(service.get_reviewer(created.uuid).unwrap().first_name, "Gary");
}

#[test]
fn get_reviews_by_reviewer_requires_existing_reviewer() {
    let conn = open_db_in_memory().unwrap();
    let service = ReviewerService::new(SqliteReviewerRepository::try_new(&conn).unwrap());

    let err = service.get_reviews_by_reviewer(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn get_reviews_by_reviewer_lists_their_reviews() {
    let conn = open_db_in_memory().unwrap();
    let oak = seed_reviewer(&conn, "Samuel", "Oak");
    let elm = seed_reviewer(&conn, "Professor", "Elm");
    let pokemon = seed_pokemon(&conn, "Pikachu");
    let reviews = review_service(&conn);

    let oak_review = reviews
        .create_review(oak.uuid, pokemon.uuid, &new_review("Sparky", "ok", 5))
        .unwrap();
    reviews
        .create_review(elm.uuid, pokemon.uuid, &new_review("Zappy", "ok", 3))
        .unwrap();

    let reviewers = ReviewerService::new(SqliteReviewerRepository::try_new(&conn).unwrap());
    let listed = reviewers.get_reviews_by_reviewer(oak.uuid).unwrap();
    assert_eq!(listed, vec![oak_review]);
}

#[test]
fn deleting_reviewer_cascades_their_reviews() {
    let conn = open_db_in_memory().unwrap();
    let reviewer = seed_reviewer(&conn, "Samuel", "Oak");
    let pokemon = seed_pokemon(&conn, "Pikachu");
    let reviews = review_service(&conn);
    reviews
        .create_review(reviewer.uuid, pokemon.uuid, &new_review("Sparky", "ok", 5))
        .unwrap();
    assert_eq!(count_rows(&conn, "reviews"), 1);

    let reviewers = ReviewerService::new(SqliteReviewerRepository::try_new(&conn).unwrap());
    reviewers.delete_reviewer(reviewer.uuid).unwrap();

    assert_eq!(count_rows(&conn, "reviewers"), 0);
    assert_eq!(count_rows(&conn, "reviews"), 0);
}

fn review_service(
    conn: &Connection,
) -> ReviewService<
    SqliteReviewRepository<'_>,
    SqliteReviewerRepository<'_>,
    SqlitePokemonRepository<'_>,
> {
    ReviewService::new(
        SqliteReviewRepository::try_new(conn).unwrap(),
        SqliteReviewerRepository::try_new(conn).unwrap(),
        SqlitePokemonRepository::try_new(conn).unwrap(),
    )
}

fn new_review(title: &str, text: &str, rating: i32) -> NewReview {
    NewReview {
        title: title.to_string(),
        text: text.to_string(),
        rating,
    }
}

fn seed_reviewer(conn: &Connection, first_name: &str, last_name: &str) -> Reviewer {
    ReviewerService::new(SqliteReviewerRepository::try_new(conn).unwrap())
        .create_reviewer(first_name, last_name)
        .unwrap()
}

fn seed_pokemon(conn: &Connection, name: &str) -> Pokemon {
    let country = CountryService::new(SqliteCountryRepository::try_new(conn).unwrap())
        .create_country(format!("{name} homeland"))
        .unwrap();

    let owner_service = OwnerService::new(
        SqliteOwnerRepository::try_new(conn).unwrap(),
        SqliteCountryRepository::try_new(conn).unwrap(),
    );
    let owner = owner_service
        .create_owner(
            country.uuid,
            &NewOwner {
                first_name: "Ash".to_string(),
                last_name: format!("{name} trainer"),
            },
        )
        .unwrap();

    let category = CategoryService::new(SqliteCategoryRepository::try_new(conn).unwrap())
        .create_category(format!("{name} type"))
        .unwrap();

    let pokemon_service = PokemonService::new(
        SqlitePokemonRepository::try_new(conn).unwrap(),
        SqliteOwnerRepository::try_new(conn).unwrap(),
        SqliteCategoryRepository::try_new(conn).unwrap(),
    );
    pokemon_service
        .create_pokemon(
            owner.uuid,
            category.uuid,
            &NewPokemon {
                name: name.to_string(),
                birth_date: 825379200000,
            },
        )
        .unwrap()
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

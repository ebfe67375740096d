use pokereview_core::db::migrations::latest_version;
use pokereview_core::db::open_db_in_memory;
use pokereview_core::{
    Category, CategoryService, CountryService, NewOwner, NewPokemon, Owner, OwnerService, Pokemon,
    PokemonService, RepoError, ServiceError, SqliteCategoryRepository, SqliteCountryRepository,
    SqliteOwnerRepository, SqlitePokemonRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let created = service.create_category("Fire").unwrap();
    let loaded = service.get_category(created.uuid).unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Fire");
}

#[test]
fn duplicate_name_with_padding_and_case_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    service.create_category("Fire").unwrap();
    let err = service.create_category("  fire ").unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(count_rows(&conn, "categories"), 1);

    let stored = service.list_categories().unwrap();
    assert_eq!(stored[0].name, "Fire");
}

#[test]
fn blank_name_is_invalid_input() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let err = service.create_category("   ").unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(count_rows(&conn, "categories"), 0);
}

#[test]
fn empty_listing_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let err = service.list_categories().unwrap_err();

    assert_eq!(err.code(), "not_found");
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn listing_is_ordered_by_name_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    service.create_category("Water").unwrap();
    service.create_category("electric").unwrap();
    service.create_category("Fire").unwrap();

    let names: Vec<String> = service
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|category| category.name)
        .collect();
    assert_eq!(names, vec!["electric", "Fire", "Water"]);
}

#[test]
fn update_with_mismatched_payload_id_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let created = service.create_category("Fire").unwrap();
    let foreign_payload = Category::new("Water");

    let err = service
        .update_category(created.uuid, &foreign_payload)
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(service.get_category(created.uuid).unwrap().name, "Fire");
}

#[test]
fn update_missing_category_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let payload = Category::new("Ghost");
    let err = service.update_category(payload.uuid, &payload).unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn update_replaces_name() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let created = service.create_category("Fire").unwrap();
    let payload = Category::with_id(created.uuid, "Blaze").unwrap();

    let updated = service.update_category(created.uuid, &payload).unwrap();

    assert_eq!(updated.uuid, created.uuid);
    assert_eq!(updated.name, "Blaze");
    assert_eq!(service.get_category(created.uuid).unwrap().name, "Blaze");
}

#[test]
fn delete_missing_category_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    service.create_category("Fire").unwrap();
    let err = service.delete_category(Uuid::new_v4()).unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(count_rows(&conn, "categories"), 1);
}

#[test]
fn deleting_category_drops_links_and_keeps_pokemon() {
    let conn = open_db_in_memory().unwrap();
    let (_, category, pokemon) = seed_pokemon_chain(&conn, "Pikachu");
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    service.delete_category(category.uuid).unwrap();

    assert_eq!(count_rows(&conn, "pokemon_categories"), 0);
    assert_eq!(count_rows(&conn, "pokemon"), 1);
    assert!(service
        .get_pokemon_by_category(category.uuid)
        .unwrap()
        .is_empty());

    let pokemon_service = PokemonService::new(
        SqlitePokemonRepository::try_new(&conn).unwrap(),
        SqliteOwnerRepository::try_new(&conn).unwrap(),
        SqliteCategoryRepository::try_new(&conn).unwrap(),
    );
    assert_eq!(pokemon_service.get_pokemon(pokemon.uuid).unwrap(), pokemon);
}

#[test]
fn get_pokemon_by_category_lists_linked_pokemon() {
    let conn = open_db_in_memory().unwrap();
    let (_, category, pokemon) = seed_pokemon_chain(&conn, "Pikachu");
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let linked = service.get_pokemon_by_category(category.uuid).unwrap();
    assert_eq!(linked, vec![pokemon]);

    let unlinked = service.create_category("Ghost").unwrap();
    assert!(service
        .get_pokemon_by_category(unlinked.uuid)
        .unwrap()
        .is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteCategoryRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_categories_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCategoryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("categories"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_categories_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE categories (
            uuid TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT 0
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCategoryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "categories",
            column: "updated_at"
        })
    ));
}

fn seed_pokemon_chain(conn: &Connection, name: &str) -> (Owner, Category, Pokemon) {
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
    let pokemon = pokemon_service
        .create_pokemon(
            owner.uuid,
            category.uuid,
            &NewPokemon {
                name: name.to_string(),
                birth_date: 825379200000,
            },
        )
        .unwrap();

    (owner, category, pokemon)
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

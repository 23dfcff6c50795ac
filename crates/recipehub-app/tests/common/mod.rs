//! In-process fake RecipeHub backend shared by the app integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use recipehub_app::AppState;
use recipehub_app::config::RecipeHubConfig;
use recipehub_app::storage::{MemoryStorage, SessionStorage};

pub const ALICE: (&str, &str) = ("alice@example.com", "secret1");
pub const BOB: (&str, &str) = ("bob@example.com", "hunter22");

const TIMESTAMP: &str = "2024-01-01T00:00:00Z";

struct FakeUser {
    id: u64,
    name: String,
    email: String,
    password: String,
}

struct Db {
    users: Vec<FakeUser>,
    recipes: BTreeMap<u64, Value>,
    favorites: BTreeMap<u64, BTreeSet<u64>>,
    next_recipe_id: u64,
}

#[derive(Clone)]
struct Shared {
    db: Arc<Mutex<Db>>,
    hits: Arc<AtomicUsize>,
}

impl Shared {
    fn open(&self) -> MutexGuard<'_, Db> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.db.lock().unwrap()
    }
}

type Reply = (StatusCode, Json<Value>);

fn fail(status: StatusCode, detail: &str) -> Reply {
    (status, Json(json!({ "detail": detail })))
}

fn ok(body: Value) -> Reply {
    (StatusCode::OK, Json(body))
}

fn caller(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer token-")?
        .parse()
        .ok()
}

fn require_caller(headers: &HeaderMap) -> Result<u64, Reply> {
    caller(headers).ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "Not authenticated"))
}

pub fn recipe_json(id: u64, title: &str, user_id: u64, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} the easy way"),
        "cooking_time": 20,
        "prep_time": 10,
        "servings": 2,
        "difficulty": "easy",
        "category": category,
        "cuisine": "Other",
        "user_id": user_id,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
        "ingredients": [{
            "ingredient_id": 1,
            "quantity": 2.0,
            "ingredient": { "id": 1, "name": "flour", "unit": "cup" }
        }],
        "instructions": [{ "id": id * 10, "step_number": 1, "description": "Mix" }]
    })
}

/// Server-side copy of a create/update body.
fn stored_recipe(id: u64, user_id: u64, mut body: Value) -> Value {
    if let Some(obj) = body.as_object_mut() {
        obj.insert("id".into(), json!(id));
        obj.insert("user_id".into(), json!(user_id));
        obj.insert("created_at".into(), json!(TIMESTAMP));
        obj.insert("updated_at".into(), json!(TIMESTAMP));
    }
    body
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(State(s): State<Shared>, Form(body): Form<LoginBody>) -> Reply {
    let db = s.open();
    match db
        .users
        .iter()
        .find(|u| u.email == body.username && u.password == body.password)
    {
        Some(user) => ok(json!({
            "access_token": format!("token-{}", user.id),
            "token_type": "bearer"
        })),
        None => fail(StatusCode::UNAUTHORIZED, "Incorrect email or password"),
    }
}

#[derive(Deserialize)]
struct RegisterBody {
    name: String,
    email: String,
    password: String,
}

async fn register(State(s): State<Shared>, Json(body): Json<RegisterBody>) -> Reply {
    let mut db = s.open();
    if db.users.iter().any(|u| u.email == body.email) {
        return fail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    let id = db.users.len() as u64 + 1;
    db.users.push(FakeUser {
        id,
        name: body.name.clone(),
        email: body.email.clone(),
        password: body.password,
    });
    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "email": body.email, "name": body.name })),
    )
}

async fn me(State(s): State<Shared>, headers: HeaderMap) -> Result<Reply, Reply> {
    let id = require_caller(&headers)?;
    let db = s.open();
    let user = db
        .users
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "Unknown user"))?;
    Ok(ok(json!({
        "id": user.id,
        "email": user.email,
        "name": user.name,
        "created_at": TIMESTAMP
    })))
}

async fn list_recipes(State(s): State<Shared>) -> Reply {
    let db = s.open();
    ok(Value::Array(db.recipes.values().cloned().collect()))
}

async fn my_recipes(State(s): State<Shared>, headers: HeaderMap) -> Result<Reply, Reply> {
    let id = require_caller(&headers)?;
    let db = s.open();
    let mine = db
        .recipes
        .values()
        .filter(|r| r["user_id"] == json!(id))
        .cloned()
        .collect();
    Ok(ok(Value::Array(mine)))
}

async fn get_recipe(State(s): State<Shared>, Path(id): Path<u64>) -> Reply {
    let db = s.open();
    match db.recipes.get(&id) {
        Some(recipe) => ok(recipe.clone()),
        None => fail(StatusCode::NOT_FOUND, "Recipe not found"),
    }
}

async fn create_recipe(
    State(s): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Reply, Reply> {
    let user_id = require_caller(&headers)?;
    let mut db = s.open();
    let id = db.next_recipe_id;
    db.next_recipe_id += 1;
    let recipe = stored_recipe(id, user_id, body);
    db.recipes.insert(id, recipe.clone());
    Ok((StatusCode::CREATED, Json(recipe)))
}

fn owned(db: &Db, id: u64, user_id: u64) -> Result<(), Reply> {
    match db.recipes.get(&id) {
        None => Err(fail(StatusCode::NOT_FOUND, "Recipe not found")),
        Some(r) if r["user_id"] != json!(user_id) => {
            Err(fail(StatusCode::FORBIDDEN, "Not your recipe"))
        }
        Some(_) => Ok(()),
    }
}

async fn update_recipe(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Reply, Reply> {
    let user_id = require_caller(&headers)?;
    let mut db = s.open();
    owned(&db, id, user_id)?;
    let recipe = stored_recipe(id, user_id, body);
    db.recipes.insert(id, recipe.clone());
    Ok(ok(recipe))
}

async fn delete_recipe(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, Reply> {
    let user_id = require_caller(&headers)?;
    let mut db = s.open();
    owned(&db, id, user_id)?;
    db.recipes.remove(&id);
    for set in db.favorites.values_mut() {
        set.remove(&id);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_favorites(State(s): State<Shared>, headers: HeaderMap) -> Result<Reply, Reply> {
    let user_id = require_caller(&headers)?;
    let db = s.open();
    let ids = db.favorites.get(&user_id).cloned().unwrap_or_default();
    let recipes = ids
        .iter()
        .filter_map(|id| db.recipes.get(id).cloned())
        .collect();
    Ok(ok(Value::Array(recipes)))
}

async fn add_favorite(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Reply, Reply> {
    let user_id = require_caller(&headers)?;
    let mut db = s.open();
    if !db.recipes.contains_key(&id) {
        return Err(fail(StatusCode::NOT_FOUND, "Recipe not found"));
    }
    db.favorites.entry(user_id).or_default().insert(id);
    Ok(ok(json!({ "message": "Recipe added to favorites" })))
}

async fn remove_favorite(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, Reply> {
    let user_id = require_caller(&headers)?;
    let mut db = s.open();
    db.favorites.entry(user_id).or_default().remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn list_ingredients(State(s): State<Shared>) -> Reply {
    let _db = s.open();
    ok(json!([
        { "id": 1, "name": "flour", "unit": "cup" },
        { "id": 2, "name": "egg", "unit": "piece" },
        { "id": 3, "name": "milk", "unit": "ml" }
    ]))
}

fn seed() -> Db {
    let users = vec![
        FakeUser {
            id: 1,
            name: "Alice".into(),
            email: ALICE.0.into(),
            password: ALICE.1.into(),
        },
        FakeUser {
            id: 2,
            name: "Bob".into(),
            email: BOB.0.into(),
            password: BOB.1.into(),
        },
    ];

    let recipes = [
        recipe_json(1, "Pancakes", 1, "breakfast"),
        recipe_json(2, "Tomato Soup", 2, "lunch"),
        recipe_json(3, "Omelette", 2, "breakfast"),
        recipe_json(5, "Lasagna", 1, "dinner"),
    ]
    .into_iter()
    .map(|r| (r["id"].as_u64().unwrap(), r))
    .collect();

    let favorites = BTreeMap::from([(1, BTreeSet::from([2]))]);

    Db {
        users,
        recipes,
        favorites,
        next_recipe_id: 100,
    }
}

pub struct FakeBackend {
    pub addr: SocketAddr,
    shared: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let shared = Shared {
            db: Arc::new(Mutex::new(seed())),
            hits: Arc::new(AtomicUsize::new(0)),
        };

        let app = Router::new()
            .route("/api/login", post(login))
            .route("/api/users/create", post(register))
            .route("/api/users/me", get(me))
            .route("/api/recipes", get(list_recipes))
            .route("/api/recipes/my-recipes", get(my_recipes))
            .route("/api/recipes/create", post(create_recipe))
            .route(
                "/api/recipes/{id}",
                get(get_recipe).put(update_recipe).delete(delete_recipe),
            )
            .route(
                "/api/recipes/{id}/favorite",
                post(add_favorite).delete(remove_favorite),
            )
            .route("/api/favorites", get(list_favorites))
            .route("/api/ingredients", get(list_ingredients))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, shared }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests the backend has handled so far.
    pub fn hits(&self) -> usize {
        self.shared.hits.load(Ordering::SeqCst)
    }

    pub fn recipe_title(&self, id: u64) -> Option<String> {
        let db = self.shared.db.lock().unwrap();
        db.recipes
            .get(&id)
            .and_then(|r| r["title"].as_str().map(str::to_string))
    }

    pub fn state(&self) -> AppState {
        self.state_with(Arc::new(MemoryStorage::new()))
    }

    pub fn state_with(&self, storage: Arc<dyn SessionStorage>) -> AppState {
        let config = RecipeHubConfig {
            api_base_url: self.base_url(),
            ..RecipeHubConfig::default()
        };
        AppState::new(&config, storage).unwrap()
    }
}

pub fn ids(recipes: &[recipehub_core::models::recipe::Recipe]) -> Vec<u64> {
    recipes.iter().map(|r| r.id).collect()
}

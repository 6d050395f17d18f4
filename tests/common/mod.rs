//! In-process stand-in for the news backend, served over real HTTP so the
//! client is exercised end to end.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

use news_admin::config::{AggregatorConfig, AppConfig};
use news_admin::models::Category;
use news_admin::NewsApi;

pub const TOKEN: &str = "tok-123";
pub const PASSWORD: &str = "correct-horse";

pub const WORLD_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Fixture World</title>
    <link>https://world.example</link>
    <description>World news</description>
    <item>
      <title>Markets steady</title>
      <description>Stocks flat ahead of rate decision</description>
      <link>https://world.example/2</link>
      <pubDate>Sat, 17 Oct 2026 18:30:00 GMT</pubDate>
    </item>
    <item>
      <title>Ceasefire talks resume</title>
      <description><![CDATA[<p>Negotiators meet in <b>Cairo</b>.</p>]]></description>
      <link>https://world.example/1</link>
      <pubDate>Sun, 18 Oct 2026 09:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

pub const TECH_ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Fixture Tech</title>
  <id>urn:fixture:tech</id>
  <updated>2026-10-18T12:00:00Z</updated>
  <entry>
    <title>Chip markets rally</title>
    <id>urn:fixture:tech:1</id>
    <link href="https://tech.example/1"/>
    <updated>2026-10-18T12:00:00Z</updated>
    <summary>Foundries report record orders</summary>
  </entry>
</feed>"#;

/// What the fake backend saw, in arrival order.
#[derive(Debug, Default)]
pub struct Recorded {
    pub calls: Vec<String>,
    pub bodies: Vec<Value>,
    pub auth: Vec<Option<String>>,
}

impl Recorded {
    pub fn last_body(&self) -> Option<&Value> {
        self.bodies.last()
    }
}

type State = web::Data<Mutex<Recorded>>;

pub struct FakeBackend {
    pub base: String,
    pub recorded: State,
    handle: ServerHandle,
}

impl FakeBackend {
    pub async fn start() -> FakeBackend {
        let recorded: State = web::Data::new(Mutex::new(Recorded::default()));
        let data = recorded.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/api/login", web::post().to(login))
                .route("/api/news", web::get().to(list_news))
                .route("/api/news", web::post().to(create_news))
                .route("/api/news/{id}", web::put().to(update_news))
                .route("/api/news/{id}", web::delete().to(delete_news))
                .route("/api/generate", web::post().to(generate))
                .route("/api/search", web::post().to(search))
                .route("/api/live-feed", web::get().to(live_feed))
                .route("/api/rss-feeds/health", web::get().to(feed_health))
                .route("/api/rss-feeds", web::get().to(list_feeds))
                .route("/api/rss-feeds", web::post().to(add_feed))
                .route("/api/rss-feeds/{id}", web::delete().to(delete_feed))
                .route("/api/stats", web::get().to(stats))
                .route("/api/subscribers", web::get().to(subscribers))
                .route("/api/newsletter/send", web::post().to(newsletter))
                .route("/api/contact-messages", web::get().to(contact_messages))
                .route(
                    "/api/contact-messages/{id}/read",
                    web::patch().to(mark_read),
                )
                .route("/api/contact-messages/{id}", web::delete().to(delete_message))
                .route("/broken/api/stats", web::get().to(malformed_stats))
                .route("/rss/world.xml", web::get().to(world_rss))
                .route("/rss/tech.xml", web::get().to(tech_atom))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind fake backend");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        FakeBackend {
            base: format!("http://{addr}"),
            recorded,
            handle,
        }
    }

    pub fn config(&self) -> AppConfig {
        let mut default_feeds = BTreeMap::new();
        default_feeds.insert(Category::World, vec![format!("{}/rss/world.xml", self.base)]);
        default_feeds.insert(
            Category::Technology,
            vec![format!("{}/rss/tech.xml", self.base)],
        );
        AppConfig {
            aggregator: AggregatorConfig {
                default_feeds,
                ..Default::default()
            },
            ..Default::default()
        }
        .with_api_url(&self.base)
        .expect("valid base url")
    }

    pub fn api(&self) -> NewsApi {
        NewsApi::new(&self.config()).expect("client builds")
    }

    /// Client pointed at a path prefix whose endpoints answer 200 with bodies that do not decode.
    pub fn broken_api(&self) -> NewsApi {
        let config = self
            .config()
            .with_api_url(&format!("{}/broken", self.base))
            .expect("valid base url");
        NewsApi::new(&config).expect("client builds")
    }

    pub fn authed_api(&self) -> NewsApi {
        self.api().with_token(Some(TOKEN.to_string()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.recorded.lock().unwrap().calls.clone()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.recorded.lock().unwrap().last_body().cloned()
    }

    pub fn last_auth(&self) -> Option<String> {
        self.recorded.lock().unwrap().auth.last().cloned().flatten()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn record(state: &State, req: &HttpRequest, body: Option<Value>) {
    let mut recorded = state.lock().unwrap();
    recorded
        .calls
        .push(format!("{} {}", req.method(), req.uri()));
    recorded.auth.push(
        req.headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );
    if let Some(body) = body {
        recorded.bodies.push(body);
    }
}

fn news_item(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "summary": ["First point"],
        "content": "Full story",
        "category": "India",
        "tags": ["monsoon"],
        "image_url": "https://cdn.example.com/a.jpg",
        "video_url": null,
        "source": null,
        "source_url": null,
        "author": "Desk",
        "published_at": "2026-10-18T08:30:00Z",
        "is_breaking": false,
        "is_featured": true,
        "is_ai_generated": false
    })
}

async fn login(req: HttpRequest, state: State, body: web::Json<Value>) -> HttpResponse {
    record(&state, &req, Some(body.0.clone()));
    match body["password"].as_str() {
        Some(PASSWORD) => HttpResponse::Ok().json(json!({"success": true, "token": TOKEN})),
        Some("locked") => {
            HttpResponse::Ok().json(json!({"success": false, "message": "Account locked"}))
        }
        _ => HttpResponse::Unauthorized().json(json!({"error": "Invalid credentials"})),
    }
}

async fn list_news(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    HttpResponse::Ok().json(json!([
        news_item("n1", "Monsoon arrives early"),
        news_item("n2", "Budget session opens"),
        {
            "id": "n3",
            "title": "Wire copy",
            "summary": null,
            "content": null,
            "category": null,
            "tags": null,
            "image_url": null,
            "published_at": null,
            "is_breaking": null,
            "is_featured": null,
            "is_ai_generated": null
        }
    ]))
}

async fn create_news(req: HttpRequest, state: State, body: web::Json<Value>) -> HttpResponse {
    record(&state, &req, Some(body.0.clone()));
    HttpResponse::Created().json(json!({"id": "n3", "title": body["title"]}))
}

async fn update_news(
    req: HttpRequest,
    state: State,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    record(&state, &req, Some(body.0.clone()));
    HttpResponse::Ok().json(json!({"id": path.into_inner(), "updated": true}))
}

async fn delete_news(req: HttpRequest, state: State, path: web::Path<String>) -> HttpResponse {
    record(&state, &req, None);
    if path.as_str() == "missing" {
        HttpResponse::NotFound().json(json!({"error": "Article not found"}))
    } else {
        HttpResponse::NoContent().finish()
    }
}

async fn generate(req: HttpRequest, state: State, body: web::Json<Value>) -> HttpResponse {
    record(&state, &req, Some(body.0.clone()));
    if body["prompt"] == "explode" {
        return HttpResponse::InternalServerError().json(json!({"error": "model crashed"}));
    }
    HttpResponse::Ok().json(json!({
        "title": "ISRO schedules Gaganyaan test",
        "summary": ["Uncrewed flight first", "Launch window in December"],
        "category": "Tech",
        "tags": ["space", "isro"]
    }))
}

async fn search(req: HttpRequest, state: State, body: web::Json<Value>) -> HttpResponse {
    record(&state, &req, Some(body.0.clone()));
    HttpResponse::InternalServerError().json(json!({"error": {"message": "search index offline"}}))
}

async fn live_feed(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    if req.query_string() == "category=India" {
        HttpResponse::Ok().json(json!({"articles": [{
            "title": "Backend story",
            "summary": ["From the server"],
            "url": "https://backend.example/1",
            "publishedAt": "2026-10-18T10:00:00Z",
            "source": "PTI"
        }]}))
    } else {
        HttpResponse::ServiceUnavailable().finish()
    }
}

async fn list_feeds(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    let host = req.connection_info().host().to_string();
    HttpResponse::Ok().json(json!([
        {"id": "f1", "name": "Fixture World", "url": format!("http://{host}/rss/world.xml"), "category": "World"},
        {"id": "f2", "name": "Fixture Tech", "url": format!("http://{host}/rss/tech.xml"), "category": "Tech"}
    ]))
}

async fn add_feed(req: HttpRequest, state: State, body: web::Json<Value>) -> HttpResponse {
    record(&state, &req, Some(body.0.clone()));
    if body["url"] == "https://dup.example/rss" {
        return HttpResponse::Conflict().json(json!({"error": "Feed already exists"}));
    }
    HttpResponse::Created().json(json!({
        "id": "f9",
        "name": body["name"],
        "url": body["url"],
        "category": body["category"]
    }))
}

async fn delete_feed(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    HttpResponse::NoContent().finish()
}

async fn feed_health(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    HttpResponse::Ok().json(json!({"f1": "ok", "f2": "error"}))
}

async fn stats(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    HttpResponse::Ok().json(json!({
        "total": 12,
        "aiCount": 3,
        "breakingCount": 1,
        "featuredCount": 2,
        "originals": 12,
        "live": 40,
        "feeds": 2,
        "categories": {"India": 8, "World": 4}
    }))
}

async fn subscribers(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    HttpResponse::Ok().json(json!([
        {"id": "s1", "email": "a@example.com", "name": "Asha", "whatsapp": null, "created_at": "2026-09-01T10:00:00Z"},
        {"id": "s2", "email": "b@example.com", "name": null, "whatsapp": "+91 98765 43210", "created_at": "2026-09-02T10:00:00Z"}
    ]))
}

async fn newsletter(req: HttpRequest, state: State, body: web::Json<Value>) -> HttpResponse {
    record(&state, &req, Some(body.0.clone()));
    HttpResponse::Ok().json(json!({"success": true, "count": 2}))
}

async fn contact_messages(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    HttpResponse::Ok().json(json!([
        {"id": "m1", "name": "Ravi", "email": "ravi@example.com", "message": "Great coverage", "status": "unread", "created_at": "2026-10-10T10:00:00Z"},
        {"id": "m2", "name": "Meera", "email": "meera@example.com", "message": "Typo in headline", "status": "read", "created_at": "2026-10-09T10:00:00Z"}
    ]))
}

async fn mark_read(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    HttpResponse::Ok().json(json!({"success": true}))
}

async fn delete_message(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    HttpResponse::Ok().json(json!({"success": true}))
}

async fn malformed_stats(req: HttpRequest, state: State) -> HttpResponse {
    record(&state, &req, None);
    HttpResponse::Ok()
        .content_type("application/json")
        .body(r#"{"total": "twelve"}"#)
}

async fn world_rss() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/rss+xml")
        .body(WORLD_RSS)
}

async fn tech_atom() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/atom+xml")
        .body(TECH_ATOM)
}
